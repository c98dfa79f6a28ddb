//! Report submission and status management — application-layer orchestration

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::workflow::{check_transition, TransitionDecision};
use crate::domain::{
    DomainError, DomainResult, FormType, InspectionForm, MaintenanceForm, RepairForm, Report,
    ReportPayload, ReportRepositoryInterface, ReportStatus, UserRole, WorkOrderForm,
};

/// Optional filters for report listings
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub form_type: Option<FormType>,
    pub status: Option<ReportStatus>,
}

pub struct ReportService {
    repo: Arc<dyn ReportRepositoryInterface>,
}

impl ReportService {
    pub fn new(repo: Arc<dyn ReportRepositoryInterface>) -> Self {
        Self { repo }
    }

    // ── Submissions ─────────────────────────────────────────────
    //
    // One operation per form type. Date fields reach this layer already
    // normalized to wire types (NaiveDate / RFC 3339 instants) by the DTO
    // conversion. Every submission starts life as Pendiente.

    pub async fn submit_maintenance(&self, form: MaintenanceForm) -> DomainResult<String> {
        self.append(ReportPayload::Maintenance(form)).await
    }

    pub async fn submit_repair(&self, form: RepairForm) -> DomainResult<String> {
        self.append(ReportPayload::Repair(form)).await
    }

    pub async fn submit_inspection(&self, form: InspectionForm) -> DomainResult<String> {
        self.append(ReportPayload::Inspection(form)).await
    }

    pub async fn submit_work_order(&self, form: WorkOrderForm) -> DomainResult<String> {
        self.append(ReportPayload::WorkOrder(form)).await
    }

    async fn append(&self, payload: ReportPayload) -> DomainResult<String> {
        let form_type = payload.form_type();
        let report = Report::new(Uuid::new_v4().to_string(), payload);
        let id = self.repo.save_report(report).await?;
        info!(%id, form_type = form_type.as_str(), "report submitted");
        Ok(id)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list_reports(&self, filter: ReportFilter) -> DomainResult<Vec<Report>> {
        let reports = self.repo.list_reports().await?;
        Ok(reports
            .into_iter()
            .filter(|r| filter.form_type.map_or(true, |ft| r.form_type() == ft))
            .filter(|r| filter.status.map_or(true, |s| r.status == s))
            .collect())
    }

    pub async fn get_report(&self, id: &str) -> DomainResult<Report> {
        self.repo
            .get_report(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Report",
                field: "id",
                value: id.to_string(),
            })
    }

    // ── Status workflow ─────────────────────────────────────────

    /// Change a report's status on behalf of `actor`.
    ///
    /// Completed reports are hard-locked for every role; only managing
    /// roles may mutate status at all; re-setting the current status is a
    /// no-op success. After a successful write the full list is re-read
    /// from the store (read-after-write, no optimistic merge) and returned.
    pub async fn change_status(
        &self,
        actor: UserRole,
        id: &str,
        requested: ReportStatus,
    ) -> DomainResult<Vec<Report>> {
        let report = self.get_report(id).await?;

        match check_transition(actor, report.status, requested) {
            TransitionDecision::Locked => {
                return Err(DomainError::StatusLocked(id.to_string()));
            }
            TransitionDecision::Forbidden => {
                return Err(DomainError::Forbidden(format!(
                    "role {} may not change report status",
                    actor.as_str()
                )));
            }
            TransitionDecision::NoOp => {
                return self.repo.list_reports().await;
            }
            TransitionDecision::Allowed => {}
        }

        let previous = report.status;
        let updated = Report {
            status: requested,
            ..report
        };
        self.repo.update_report(updated).await?;

        info!(
            %id,
            from = previous.as_str(),
            to = requested.as_str(),
            actor = actor.as_str(),
            "report status changed"
        );

        self.repo.list_reports().await
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryReportRepository;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    fn work_order() -> WorkOrderForm {
        WorkOrderForm {
            location: "Planta Norte".into(),
            equipment_model: "CAT 320D".into(),
            requested_by: "supervision@fieldserve.app".into(),
            scheduled_date: NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
            priority: crate::domain::Priority::High,
            task_description: "Fuga hidráulica en brazo".into(),
            estimated_hours: Some(6.0),
        }
    }

    fn service() -> (Arc<InMemoryReportRepository>, ReportService) {
        let repo = Arc::new(InMemoryReportRepository::new());
        (repo.clone(), ReportService::new(repo))
    }

    #[tokio::test]
    async fn submission_appends_pendiente_report() {
        let (_, service) = service();
        let id = service.submit_work_order(work_order()).await.unwrap();

        let report = service.get_report(&id).await.unwrap();
        assert_eq!(report.status, ReportStatus::Pendiente);
        assert_eq!(report.form_type(), FormType::WorkOrder);
    }

    #[tokio::test]
    async fn list_filters_by_type_and_status() {
        let (_, service) = service();
        let id = service.submit_work_order(work_order()).await.unwrap();
        service
            .submit_repair(RepairForm {
                location: "Planta Sur".into(),
                equipment_model: "Komatsu PC200".into(),
                serial_number: "KMT-8842".into(),
                failure_description: "No arranca".into(),
                diagnosis: None,
                parts_replaced: vec![],
                scheduled_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
                downtime_hours: None,
            })
            .await
            .unwrap();

        let work_orders = service
            .list_reports(ReportFilter {
                form_type: Some(FormType::WorkOrder),
                status: None,
            })
            .await
            .unwrap();
        assert_eq!(work_orders.len(), 1);
        assert_eq!(work_orders[0].id, id);

        service
            .change_status(UserRole::Admin, &id, ReportStatus::EnProgreso)
            .await
            .unwrap();
        let pending = service
            .list_reports(ReportFilter {
                form_type: None,
                status: Some(ReportStatus::Pendiente),
            })
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_ne!(pending[0].id, id);
    }

    #[tokio::test]
    async fn status_change_is_read_after_write() {
        let (_, service) = service();
        let id = service.submit_work_order(work_order()).await.unwrap();

        let refreshed = service
            .change_status(UserRole::Supervisor, &id, ReportStatus::EsperandoRepuestos)
            .await
            .unwrap();

        let listed = refreshed.iter().find(|r| r.id == id).unwrap();
        assert_eq!(listed.status, ReportStatus::EsperandoRepuestos);
    }

    #[tokio::test]
    async fn technician_cannot_change_status() {
        let (_, service) = service();
        let id = service.submit_work_order(work_order()).await.unwrap();

        let err = service
            .change_status(UserRole::Technician, &id, ReportStatus::EnProgreso)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        assert_eq!(
            service.get_report(&id).await.unwrap().status,
            ReportStatus::Pendiente
        );
    }

    #[tokio::test]
    async fn completado_is_locked_even_for_admin() {
        let (_, service) = service();
        let id = service.submit_work_order(work_order()).await.unwrap();
        service
            .change_status(UserRole::Admin, &id, ReportStatus::Completado)
            .await
            .unwrap();

        let err = service
            .change_status(UserRole::Admin, &id, ReportStatus::EnProgreso)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::StatusLocked(_)));
        assert_eq!(
            service.get_report(&id).await.unwrap().status,
            ReportStatus::Completado
        );
    }

    #[tokio::test]
    async fn same_status_is_noop_success() {
        let (_, service) = service();
        let id = service.submit_work_order(work_order()).await.unwrap();

        let list = service
            .change_status(UserRole::Admin, &id, ReportStatus::Pendiente)
            .await
            .unwrap();
        assert_eq!(
            list.iter().find(|r| r.id == id).unwrap().status,
            ReportStatus::Pendiente
        );
    }

    #[tokio::test]
    async fn missing_report_is_not_found() {
        let (_, service) = service();
        let err = service
            .change_status(UserRole::Admin, "missing", ReportStatus::EnProgreso)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    // ── Persistence-failure semantics ───────────────────────────

    struct FailingUpdates {
        inner: InMemoryReportRepository,
    }

    #[async_trait]
    impl ReportRepositoryInterface for FailingUpdates {
        async fn list_reports(&self) -> DomainResult<Vec<Report>> {
            self.inner.list_reports().await
        }
        async fn get_report(&self, id: &str) -> DomainResult<Option<Report>> {
            self.inner.get_report(id).await
        }
        async fn save_report(&self, report: Report) -> DomainResult<String> {
            self.inner.save_report(report).await
        }
        async fn update_report(&self, _report: Report) -> DomainResult<()> {
            Err(DomainError::Persistence("connection reset".into()))
        }
    }

    #[tokio::test]
    async fn failed_persistence_leaves_list_unchanged() {
        let repo = Arc::new(FailingUpdates {
            inner: InMemoryReportRepository::new(),
        });
        let service = ReportService::new(repo);
        let id = service.submit_work_order(work_order()).await.unwrap();

        let err = service
            .change_status(UserRole::Admin, &id, ReportStatus::EnProgreso)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));

        // No optimistic update was committed.
        let list = service.list_reports(ReportFilter::default()).await.unwrap();
        assert_eq!(list[0].status, ReportStatus::Pendiente);
    }
}
