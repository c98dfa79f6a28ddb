pub mod model;
pub mod repository;

pub use model::{
    ChecklistItem, FormType, InspectionForm, MaintenanceForm, MaintenanceKind, Priority,
    RepairForm, Report, ReportPayload, ReportStatus, WorkOrderForm,
};
pub use repository::ReportRepositoryInterface;
