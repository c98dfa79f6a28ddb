//! In-memory storage implementations for development and testing

use async_trait::async_trait;
use dashmap::DashMap;

use super::kv::KeyValueStore;
use crate::domain::{DomainError, DomainResult, Report, ReportRepositoryInterface};

/// In-memory key-value store
#[derive(Default)]
pub struct InMemoryKvStore {
    entries: DashMap<String, String>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.entries.get(key).map(|e| e.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// In-memory report store
#[derive(Default)]
pub struct InMemoryReportRepository {
    reports: DashMap<String, Report>,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportRepositoryInterface for InMemoryReportRepository {
    async fn list_reports(&self) -> DomainResult<Vec<Report>> {
        let mut reports: Vec<Report> = self.reports.iter().map(|e| e.value().clone()).collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }

    async fn get_report(&self, id: &str) -> DomainResult<Option<Report>> {
        Ok(self.reports.get(id).map(|e| e.value().clone()))
    }

    async fn save_report(&self, report: Report) -> DomainResult<String> {
        let id = report.id.clone();
        self.reports.insert(id.clone(), report);
        Ok(id)
    }

    async fn update_report(&self, report: Report) -> DomainResult<()> {
        if !self.reports.contains_key(&report.id) {
            return Err(DomainError::NotFound {
                entity: "Report",
                field: "id",
                value: report.id,
            });
        }
        self.reports.insert(report.id.clone(), report);
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Priority, ReportPayload, WorkOrderForm};
    use chrono::NaiveDate;

    fn report(id: &str) -> Report {
        Report::new(
            id,
            ReportPayload::WorkOrder(WorkOrderForm {
                location: "Planta Sur".into(),
                equipment_model: "Komatsu PC200".into(),
                requested_by: "ops@acme.com".into(),
                scheduled_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
                priority: Priority::Medium,
                task_description: "Cambio de aceite".into(),
                estimated_hours: None,
            }),
        )
    }

    #[tokio::test]
    async fn kv_set_get_remove() {
        let store = InMemoryKvStore::new();
        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_missing_report_is_not_found() {
        let repo = InMemoryReportRepository::new();
        let err = repo.update_report(report("missing")).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let repo = InMemoryReportRepository::new();
        let mut older = report("old");
        older.created_at -= chrono::Duration::hours(1);
        repo.save_report(older).await.unwrap();
        repo.save_report(report("new")).await.unwrap();

        let listed = repo.list_reports().await.unwrap();
        assert_eq!(listed[0].id, "new");
        assert_eq!(listed[1].id, "old");
    }
}
