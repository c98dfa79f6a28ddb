use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::domain::{
    DomainError, DomainResult, FormType, Report, ReportRepositoryInterface, ReportStatus,
};
use crate::infrastructure::database::entities::report;

pub struct SeaOrmReportRepository {
    db: DatabaseConnection,
}

impl SeaOrmReportRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_status_to_domain(status: report::ReportStatus) -> ReportStatus {
    match status {
        report::ReportStatus::Pendiente => ReportStatus::Pendiente,
        report::ReportStatus::EnProgreso => ReportStatus::EnProgreso,
        report::ReportStatus::EsperandoRepuestos => ReportStatus::EsperandoRepuestos,
        report::ReportStatus::Completado => ReportStatus::Completado,
        report::ReportStatus::Cancelado => ReportStatus::Cancelado,
    }
}

fn domain_status_to_entity(status: ReportStatus) -> report::ReportStatus {
    match status {
        ReportStatus::Pendiente => report::ReportStatus::Pendiente,
        ReportStatus::EnProgreso => report::ReportStatus::EnProgreso,
        ReportStatus::EsperandoRepuestos => report::ReportStatus::EsperandoRepuestos,
        ReportStatus::Completado => report::ReportStatus::Completado,
        ReportStatus::Cancelado => report::ReportStatus::Cancelado,
    }
}

fn domain_form_type_to_entity(form_type: FormType) -> report::FormType {
    match form_type {
        FormType::Maintenance => report::FormType::Maintenance,
        FormType::Repair => report::FormType::Repair,
        FormType::Inspection => report::FormType::Inspection,
        FormType::WorkOrder => report::FormType::WorkOrder,
    }
}

fn report_model_to_domain(model: report::Model) -> DomainResult<Report> {
    let payload = serde_json::from_value(model.payload).map_err(|e| {
        DomainError::Persistence(format!("corrupt payload for report {}: {e}", model.id))
    })?;
    Ok(Report {
        id: model.id,
        status: entity_status_to_domain(model.status),
        created_at: model.created_at,
        payload,
    })
}

fn report_to_active_model(report: &Report) -> DomainResult<report::ActiveModel> {
    let payload = serde_json::to_value(&report.payload)
        .map_err(|e| DomainError::Persistence(format!("failed serializing payload: {e}")))?;
    Ok(report::ActiveModel {
        id: Set(report.id.clone()),
        form_type: Set(domain_form_type_to_entity(report.form_type())),
        status: Set(domain_status_to_entity(report.status)),
        created_at: Set(report.created_at),
        payload: Set(payload),
    })
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Persistence(e.to_string())
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl ReportRepositoryInterface for SeaOrmReportRepository {
    async fn list_reports(&self) -> DomainResult<Vec<Report>> {
        let models = report::Entity::find()
            .order_by_desc(report::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        models.into_iter().map(report_model_to_domain).collect()
    }

    async fn get_report(&self, id: &str) -> DomainResult<Option<Report>> {
        let model = report::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        model.map(report_model_to_domain).transpose()
    }

    async fn save_report(&self, report: Report) -> DomainResult<String> {
        let id = report.id.clone();
        report_to_active_model(&report)?
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        Ok(id)
    }

    async fn update_report(&self, report: Report) -> DomainResult<()> {
        let existing = report::Entity::find_by_id(&report.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "Report",
                field: "id",
                value: report.id,
            });
        }

        report_to_active_model(&report)?
            .update(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
