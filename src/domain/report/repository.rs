use async_trait::async_trait;

use super::model::Report;
use crate::domain::DomainResult;

/// Persistence port for the report store.
///
/// One save method per form type, matching the submission layer: each tags
/// the stored document with its form type and returns the generated id.
#[async_trait]
pub trait ReportRepositoryInterface: Send + Sync {
    /// All reports, newest first.
    async fn list_reports(&self) -> DomainResult<Vec<Report>>;

    async fn get_report(&self, id: &str) -> DomainResult<Option<Report>>;

    /// Append a new report document. The payload carries the form-type tag.
    async fn save_report(&self, report: Report) -> DomainResult<String>;

    /// Replace an existing report. Fails with NotFound if absent.
    async fn update_report(&self, report: Report) -> DomainResult<()>;
}
