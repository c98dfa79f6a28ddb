//! Dashboard aggregation: counts and recent activity derived from the
//! report list.

use crate::domain::{FormType, Report, ReportStatus};

/// How many reports the recent-activity feed shows.
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total: usize,
    /// One entry per status, in the fixed enumeration order.
    pub by_status: Vec<(ReportStatus, usize)>,
    /// One entry per form type, in the fixed enumeration order.
    pub by_form_type: Vec<(FormType, usize)>,
    /// Latest reports, newest first.
    pub recent: Vec<Report>,
}

/// Summarize a report list. Expects `reports` newest first, as the store
/// returns them.
pub fn summarize(reports: &[Report]) -> DashboardSummary {
    let by_status = ReportStatus::ALL
        .into_iter()
        .map(|status| (status, reports.iter().filter(|r| r.status == status).count()))
        .collect();

    let by_form_type = FormType::ALL
        .into_iter()
        .map(|ft| (ft, reports.iter().filter(|r| r.form_type() == ft).count()))
        .collect();

    DashboardSummary {
        total: reports.len(),
        by_status,
        by_form_type,
        recent: reports.iter().take(RECENT_ACTIVITY_LIMIT).cloned().collect(),
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Priority, ReportPayload, WorkOrderForm};
    use chrono::NaiveDate;

    fn report(id: &str, status: ReportStatus) -> Report {
        let mut report = Report::new(
            id,
            ReportPayload::WorkOrder(WorkOrderForm {
                location: "Planta Norte".into(),
                equipment_model: "CAT 320D".into(),
                requested_by: "ops@acme.com".into(),
                scheduled_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                priority: Priority::Low,
                task_description: "Inspección general".into(),
                estimated_hours: None,
            }),
        );
        report.status = status;
        report
    }

    #[test]
    fn empty_list_yields_zeroes() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert!(summary.recent.is_empty());
        assert!(summary.by_status.iter().all(|(_, n)| *n == 0));
        assert!(summary.by_form_type.iter().all(|(_, n)| *n == 0));
    }

    #[test]
    fn counts_by_status_and_type() {
        let reports = vec![
            report("a", ReportStatus::Pendiente),
            report("b", ReportStatus::Pendiente),
            report("c", ReportStatus::Completado),
        ];
        let summary = summarize(&reports);
        assert_eq!(summary.total, 3);

        let pendiente = summary
            .by_status
            .iter()
            .find(|(s, _)| *s == ReportStatus::Pendiente)
            .unwrap();
        assert_eq!(pendiente.1, 2);

        let work_orders = summary
            .by_form_type
            .iter()
            .find(|(ft, _)| *ft == FormType::WorkOrder)
            .unwrap();
        assert_eq!(work_orders.1, 3);
    }

    #[test]
    fn recent_is_capped() {
        let reports: Vec<Report> = (0..15)
            .map(|i| report(&format!("r{i}"), ReportStatus::Pendiente))
            .collect();
        let summary = summarize(&reports);
        assert_eq!(summary.recent.len(), RECENT_ACTIVITY_LIMIT);
        assert_eq!(summary.recent[0].id, "r0");
    }
}
