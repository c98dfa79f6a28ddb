//! Report domain entity
//!
//! A report is a persisted record of a submitted form. The per-form fields
//! live in [`ReportPayload`], a tagged union keyed by form type; the
//! envelope (`id`, `status`, `created_at`) is common to every kind.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Report status, displayed to users in Spanish as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportStatus {
    #[serde(rename = "Pendiente")]
    Pendiente,
    #[serde(rename = "En Progreso")]
    EnProgreso,
    #[serde(rename = "Esperando Repuestos")]
    EsperandoRepuestos,
    #[serde(rename = "Completado")]
    Completado,
    #[serde(rename = "Cancelado")]
    Cancelado,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 5] = [
        Self::Pendiente,
        Self::EnProgreso,
        Self::EsperandoRepuestos,
        Self::Completado,
        Self::Cancelado,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pendiente => "Pendiente",
            Self::EnProgreso => "En Progreso",
            Self::EsperandoRepuestos => "Esperando Repuestos",
            Self::Completado => "Completado",
            Self::Cancelado => "Cancelado",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pendiente" => Some(Self::Pendiente),
            "En Progreso" => Some(Self::EnProgreso),
            "Esperando Repuestos" => Some(Self::EsperandoRepuestos),
            "Completado" => Some(Self::Completado),
            "Cancelado" => Some(Self::Cancelado),
            _ => None,
        }
    }

    /// Completado is terminal; nothing transitions out of it.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completado)
    }
}

impl Default for ReportStatus {
    fn default() -> Self {
        Self::Pendiente
    }
}

/// Discriminator identifying which structured schema a report follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormType {
    Maintenance,
    Repair,
    Inspection,
    WorkOrder,
}

impl FormType {
    pub const ALL: [FormType; 4] = [
        Self::Maintenance,
        Self::Repair,
        Self::Inspection,
        Self::WorkOrder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Maintenance => "maintenance",
            Self::Repair => "repair",
            Self::Inspection => "inspection",
            Self::WorkOrder => "work-order",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "maintenance" => Some(Self::Maintenance),
            "repair" => Some(Self::Repair),
            "inspection" => Some(Self::Inspection),
            "work-order" => Some(Self::WorkOrder),
            _ => None,
        }
    }
}

/// Kind of maintenance work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceKind {
    Preventive,
    Corrective,
}

/// Work-order priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

/// One line of an inspection checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub name: String,
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceForm {
    pub location: String,
    pub equipment_model: String,
    pub serial_number: String,
    pub kind: MaintenanceKind,
    pub scheduled_date: NaiveDate,
    pub work_performed: String,
    pub parts_used: Vec<String>,
    pub hours_meter: Option<u32>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairForm {
    pub location: String,
    pub equipment_model: String,
    pub serial_number: String,
    pub failure_description: String,
    pub diagnosis: Option<String>,
    pub parts_replaced: Vec<String>,
    pub scheduled_date: NaiveDate,
    pub downtime_hours: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionForm {
    pub location: String,
    pub equipment_model: String,
    pub serial_number: String,
    pub scheduled_date: NaiveDate,
    pub checklist: Vec<ChecklistItem>,
    pub overall_condition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrderForm {
    pub location: String,
    pub equipment_model: String,
    pub requested_by: String,
    pub scheduled_date: NaiveDate,
    pub priority: Priority,
    pub task_description: String,
    pub estimated_hours: Option<f64>,
}

/// Per-form-type payload of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form_type", rename_all = "kebab-case")]
pub enum ReportPayload {
    Maintenance(MaintenanceForm),
    Repair(RepairForm),
    Inspection(InspectionForm),
    WorkOrder(WorkOrderForm),
}

impl ReportPayload {
    pub fn form_type(&self) -> FormType {
        match self {
            Self::Maintenance(_) => FormType::Maintenance,
            Self::Repair(_) => FormType::Repair,
            Self::Inspection(_) => FormType::Inspection,
            Self::WorkOrder(_) => FormType::WorkOrder,
        }
    }

    pub fn location(&self) -> &str {
        match self {
            Self::Maintenance(f) => &f.location,
            Self::Repair(f) => &f.location,
            Self::Inspection(f) => &f.location,
            Self::WorkOrder(f) => &f.location,
        }
    }

    pub fn equipment_model(&self) -> &str {
        match self {
            Self::Maintenance(f) => &f.equipment_model,
            Self::Repair(f) => &f.equipment_model,
            Self::Inspection(f) => &f.equipment_model,
            Self::WorkOrder(f) => &f.equipment_model,
        }
    }

    pub fn scheduled_date(&self) -> NaiveDate {
        match self {
            Self::Maintenance(f) => f.scheduled_date,
            Self::Repair(f) => f.scheduled_date,
            Self::Inspection(f) => f.scheduled_date,
            Self::WorkOrder(f) => f.scheduled_date,
        }
    }
}

/// Persisted report record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Generated unique identifier, immutable
    pub id: String,
    /// Current workflow status
    pub status: ReportStatus,
    /// Creation timestamp, set once
    pub created_at: DateTime<Utc>,
    /// Form-specific fields
    #[serde(flatten)]
    pub payload: ReportPayload,
}

impl Report {
    pub fn new(id: impl Into<String>, payload: ReportPayload) -> Self {
        Self {
            id: id.into(),
            status: ReportStatus::Pendiente,
            created_at: Utc::now(),
            payload,
        }
    }

    pub fn form_type(&self) -> FormType {
        self.payload.form_type()
    }

    /// Whether the status workflow refuses any further transition.
    pub fn is_locked(&self) -> bool {
        self.status.is_terminal()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_work_order() -> WorkOrderForm {
        WorkOrderForm {
            location: "Planta Norte".into(),
            equipment_model: "CAT 320D".into(),
            requested_by: "supervisor@acme.com".into(),
            scheduled_date: NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
            priority: Priority::High,
            task_description: "Revisión hidráulica".into(),
            estimated_hours: Some(4.0),
        }
    }

    #[test]
    fn new_report_is_pendiente() {
        let report = Report::new("R1", ReportPayload::WorkOrder(sample_work_order()));
        assert_eq!(report.status, ReportStatus::Pendiente);
        assert_eq!(report.form_type(), FormType::WorkOrder);
        assert!(!report.is_locked());
    }

    #[test]
    fn completado_locks_report() {
        let mut report = Report::new("R2", ReportPayload::WorkOrder(sample_work_order()));
        report.status = ReportStatus::Completado;
        assert!(report.is_locked());
    }

    #[test]
    fn cancelado_does_not_lock() {
        let mut report = Report::new("R3", ReportPayload::WorkOrder(sample_work_order()));
        report.status = ReportStatus::Cancelado;
        assert!(!report.is_locked());
    }

    #[test]
    fn status_roundtrip() {
        for status in ReportStatus::ALL {
            assert_eq!(ReportStatus::parse(status.as_str()), Some(status));
        }
        assert!(ReportStatus::parse("Terminado").is_none());
    }

    #[test]
    fn status_serializes_display_string() {
        let json = serde_json::to_string(&ReportStatus::EsperandoRepuestos).unwrap();
        assert_eq!(json, "\"Esperando Repuestos\"");
    }

    #[test]
    fn form_type_roundtrip() {
        for ft in FormType::ALL {
            assert_eq!(FormType::parse(ft.as_str()), Some(ft));
        }
        assert!(FormType::parse("audit").is_none());
    }

    #[test]
    fn payload_tagging_matches_form_type() {
        let payload = ReportPayload::WorkOrder(sample_work_order());
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["form_type"], "work-order");

        let back: ReportPayload = serde_json::from_value(value).unwrap();
        assert_eq!(back.form_type(), FormType::WorkOrder);
    }

    #[test]
    fn report_serializes_flat_payload() {
        let report = Report::new("R4", ReportPayload::WorkOrder(sample_work_order()));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["id"], "R4");
        assert_eq!(value["status"], "Pendiente");
        assert_eq!(value["form_type"], "work-order");
        assert_eq!(value["location"], "Planta Norte");
        assert_eq!(value["scheduled_date"], "2024-06-12");
    }
}
