//! Report DTOs
//!
//! Submission requests are the wire-format normalization point: day fields
//! deserialize as `YYYY-MM-DD` dates and enum-like strings are parsed into
//! their closed domain types before anything reaches the services.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::workflow::allowed_targets;
use crate::domain::{
    ChecklistItem, DomainError, DomainResult, InspectionForm, MaintenanceForm, MaintenanceKind,
    Priority, RepairForm, Report, ReportStatus, UserRole, WorkOrderForm,
};

/// Report API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportDto {
    pub id: String,
    pub form_type: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    /// True once the report is completed; the status control must render
    /// as locked, not merely disabled.
    pub locked: bool,
    /// Statuses the acting role may move this report into (empty when
    /// locked or read-only).
    pub allowed_statuses: Vec<String>,
    /// Form-specific fields
    #[schema(value_type = Object)]
    pub details: serde_json::Value,
}

impl ReportDto {
    /// Render a report for the given acting role.
    pub fn for_role(report: Report, role: UserRole) -> Self {
        let allowed = allowed_targets(role, report.status)
            .into_iter()
            .map(|s| s.as_str().to_string())
            .collect();

        let mut details =
            serde_json::to_value(&report.payload).unwrap_or(serde_json::Value::Null);
        // The discriminator is surfaced as a top-level field.
        if let Some(object) = details.as_object_mut() {
            object.remove("form_type");
        }

        Self {
            form_type: report.form_type().as_str().to_string(),
            status: report.status.as_str().to_string(),
            created_at: report.created_at,
            locked: report.is_locked(),
            allowed_statuses: allowed,
            details,
            id: report.id,
        }
    }
}

/// New report id
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmittedDto {
    pub id: String,
}

/// List query parameters
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListReportsParams {
    /// Filter by form type (maintenance, repair, inspection, work-order)
    pub form_type: Option<String>,
    /// Filter by status (Pendiente, En Progreso, ...)
    pub status: Option<String>,
}

/// Status change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangeStatusRequest {
    /// One of: Pendiente, En Progreso, Esperando Repuestos, Completado, Cancelado
    #[validate(length(min = 1))]
    pub status: String,
}

pub fn parse_status(s: &str) -> DomainResult<ReportStatus> {
    ReportStatus::parse(s)
        .ok_or_else(|| DomainError::Validation(format!("Unknown status '{s}'")))
}

// ── Submission requests ─────────────────────────────────────────

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitMaintenanceRequest {
    #[validate(length(min = 1, max = 120))]
    pub location: String,
    #[validate(length(min = 1, max = 80))]
    pub equipment_model: String,
    #[validate(length(min = 1, max = 60))]
    pub serial_number: String,
    /// preventive or corrective
    pub kind: String,
    #[schema(value_type = String, format = Date)]
    pub scheduled_date: NaiveDate,
    #[validate(length(min = 1, max = 2000))]
    pub work_performed: String,
    #[serde(default)]
    pub parts_used: Vec<String>,
    #[validate(range(max = 200_000))]
    pub hours_meter: Option<u32>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

impl SubmitMaintenanceRequest {
    pub fn into_form(self) -> DomainResult<MaintenanceForm> {
        let kind = match self.kind.as_str() {
            "preventive" => MaintenanceKind::Preventive,
            "corrective" => MaintenanceKind::Corrective,
            other => {
                return Err(DomainError::Validation(format!(
                    "Unknown maintenance kind '{other}'"
                )))
            }
        };
        Ok(MaintenanceForm {
            location: self.location,
            equipment_model: self.equipment_model,
            serial_number: self.serial_number,
            kind,
            scheduled_date: self.scheduled_date,
            work_performed: self.work_performed,
            parts_used: self.parts_used,
            hours_meter: self.hours_meter,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitRepairRequest {
    #[validate(length(min = 1, max = 120))]
    pub location: String,
    #[validate(length(min = 1, max = 80))]
    pub equipment_model: String,
    #[validate(length(min = 1, max = 60))]
    pub serial_number: String,
    #[validate(length(min = 1, max = 2000))]
    pub failure_description: String,
    #[validate(length(max = 2000))]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub parts_replaced: Vec<String>,
    #[schema(value_type = String, format = Date)]
    pub scheduled_date: NaiveDate,
    #[validate(range(min = 0.0, max = 10_000.0))]
    pub downtime_hours: Option<f64>,
}

impl SubmitRepairRequest {
    pub fn into_form(self) -> RepairForm {
        RepairForm {
            location: self.location,
            equipment_model: self.equipment_model,
            serial_number: self.serial_number,
            failure_description: self.failure_description,
            diagnosis: self.diagnosis,
            parts_replaced: self.parts_replaced,
            scheduled_date: self.scheduled_date,
            downtime_hours: self.downtime_hours,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChecklistItemDto {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub passed: bool,
    #[validate(length(max = 500))]
    pub note: Option<String>,
}

impl From<ChecklistItemDto> for ChecklistItem {
    fn from(item: ChecklistItemDto) -> Self {
        Self {
            name: item.name,
            passed: item.passed,
            note: item.note,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitInspectionRequest {
    #[validate(length(min = 1, max = 120))]
    pub location: String,
    #[validate(length(min = 1, max = 80))]
    pub equipment_model: String,
    #[validate(length(min = 1, max = 60))]
    pub serial_number: String,
    #[schema(value_type = String, format = Date)]
    pub scheduled_date: NaiveDate,
    #[validate(nested)]
    #[serde(default)]
    pub checklist: Vec<ChecklistItemDto>,
    #[validate(length(min = 1, max = 200))]
    pub overall_condition: String,
}

impl SubmitInspectionRequest {
    pub fn into_form(self) -> InspectionForm {
        InspectionForm {
            location: self.location,
            equipment_model: self.equipment_model,
            serial_number: self.serial_number,
            scheduled_date: self.scheduled_date,
            checklist: self.checklist.into_iter().map(Into::into).collect(),
            overall_condition: self.overall_condition,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitWorkOrderRequest {
    #[validate(length(min = 1, max = 120))]
    pub location: String,
    #[validate(length(min = 1, max = 80))]
    pub equipment_model: String,
    #[validate(length(min = 1, max = 100))]
    pub requested_by: String,
    #[schema(value_type = String, format = Date)]
    pub scheduled_date: NaiveDate,
    /// low, medium, high or urgent
    pub priority: String,
    #[validate(length(min = 1, max = 2000))]
    pub task_description: String,
    #[validate(range(min = 0.0, max = 1000.0))]
    pub estimated_hours: Option<f64>,
}

impl SubmitWorkOrderRequest {
    pub fn into_form(self) -> DomainResult<WorkOrderForm> {
        let priority = match self.priority.as_str() {
            "low" => Priority::Low,
            "medium" => Priority::Medium,
            "high" => Priority::High,
            "urgent" => Priority::Urgent,
            other => {
                return Err(DomainError::Validation(format!(
                    "Unknown priority '{other}'"
                )))
            }
        };
        Ok(WorkOrderForm {
            location: self.location,
            equipment_model: self.equipment_model,
            requested_by: self.requested_by,
            scheduled_date: self.scheduled_date,
            priority,
            task_description: self.task_description,
            estimated_hours: self.estimated_hours,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────
