pub mod dto;
pub mod handlers;

pub use dto::{
    ChangeStatusRequest, ChecklistItemDto, ListReportsParams, ReportDto, SubmitInspectionRequest,
    SubmitMaintenanceRequest, SubmitRepairRequest, SubmitWorkOrderRequest, SubmittedDto,
};
pub use handlers::ReportHandlerState;
