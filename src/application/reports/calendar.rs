//! Calendar aggregation: scheduled visits grouped by day.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{FormType, Report, ReportStatus};

/// One scheduled visit, as shown in a calendar cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledVisit {
    pub report_id: String,
    pub form_type: FormType,
    pub location: String,
    pub equipment_model: String,
    pub status: ReportStatus,
}

/// All visits scheduled on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub visits: Vec<ScheduledVisit>,
}

/// Group the reports scheduled within `[from, to]` by day, ascending.
/// Days without visits are omitted.
pub fn scheduled_visits(reports: &[Report], from: NaiveDate, to: NaiveDate) -> Vec<CalendarDay> {
    let mut days: BTreeMap<NaiveDate, Vec<ScheduledVisit>> = BTreeMap::new();

    for report in reports {
        let date = report.payload.scheduled_date();
        if date < from || date > to {
            continue;
        }
        days.entry(date).or_default().push(ScheduledVisit {
            report_id: report.id.clone(),
            form_type: report.form_type(),
            location: report.payload.location().to_string(),
            equipment_model: report.payload.equipment_model().to_string(),
            status: report.status,
        });
    }

    days.into_iter()
        .map(|(date, visits)| CalendarDay { date, visits })
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────
