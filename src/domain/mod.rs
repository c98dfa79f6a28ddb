//! Core business entities, types and traits

pub mod advisory;
pub mod error;
pub mod profile;
pub mod report;
pub mod workflow;

pub use advisory::{
    AdvisoryProvider, FormSuggestion, FormSuggestionInput, TroubleshootInput, TroubleshootingGuide,
};
pub use error::{AppError, DomainError, DomainResult, InfraError};
pub use profile::{ProfilePatch, UserProfile, UserRole};
pub use report::{
    ChecklistItem, FormType, InspectionForm, MaintenanceForm, MaintenanceKind, Priority,
    RepairForm, Report, ReportPayload, ReportRepositoryInterface, ReportStatus, WorkOrderForm,
};
pub use workflow::{allowed_targets, check_transition, TransitionDecision};
