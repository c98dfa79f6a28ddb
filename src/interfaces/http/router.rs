//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::FromRef,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{ReportService, SessionService, WorkTimerService};
use crate::domain::AdvisoryProvider;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::modules::{
    advisory, calendar, dashboard, health, reports, session, timer,
};

/// Unified state for every route; Axum extracts the per-module handler
/// state via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SessionService>,
    pub reports: Arc<ReportService>,
    pub advisory: Arc<dyn AdvisoryProvider>,
    pub timer: Arc<WorkTimerService>,
}

impl FromRef<AppState> for session::SessionHandlerState {
    fn from_ref(s: &AppState) -> Self {
        session::SessionHandlerState {
            session: Arc::clone(&s.session),
        }
    }
}

impl FromRef<AppState> for reports::ReportHandlerState {
    fn from_ref(s: &AppState) -> Self {
        reports::ReportHandlerState {
            reports: Arc::clone(&s.reports),
            session: Arc::clone(&s.session),
        }
    }
}

impl FromRef<AppState> for dashboard::DashboardHandlerState {
    fn from_ref(s: &AppState) -> Self {
        dashboard::DashboardHandlerState {
            reports: Arc::clone(&s.reports),
            session: Arc::clone(&s.session),
        }
    }
}

impl FromRef<AppState> for calendar::CalendarHandlerState {
    fn from_ref(s: &AppState) -> Self {
        calendar::CalendarHandlerState {
            reports: Arc::clone(&s.reports),
        }
    }
}

impl FromRef<AppState> for advisory::AdvisoryHandlerState {
    fn from_ref(s: &AppState) -> Self {
        advisory::AdvisoryHandlerState {
            advisory: Arc::clone(&s.advisory),
        }
    }
}

impl FromRef<AppState> for timer::TimerHandlerState {
    fn from_ref(s: &AppState) -> Self {
        timer::TimerHandlerState {
            timer: Arc::clone(&s.timer),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Session
        session::handlers::login,
        session::handlers::logout,
        session::handlers::get_current_profile,
        session::handlers::list_users,
        session::handlers::create_user,
        session::handlers::update_profile,
        // Reports
        reports::handlers::list_reports,
        reports::handlers::get_report,
        reports::handlers::change_status,
        reports::handlers::submit_maintenance,
        reports::handlers::submit_repair,
        reports::handlers::submit_inspection,
        reports::handlers::submit_work_order,
        // Dashboard
        dashboard::handlers::get_dashboard,
        // Calendar
        calendar::handlers::get_calendar,
        // Advisory
        advisory::handlers::suggest_form,
        advisory::handlers::troubleshoot,
        // Timer
        timer::handlers::start_timer,
        timer::handlers::get_timer,
        timer::handlers::stop_timer,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthDto,
            // Session
            session::ProfileDto,
            session::LoginRequest,
            session::CreateUserRequest,
            session::UpdateProfileRequest,
            // Reports
            reports::ReportDto,
            reports::SubmittedDto,
            reports::ChangeStatusRequest,
            reports::SubmitMaintenanceRequest,
            reports::SubmitRepairRequest,
            reports::SubmitInspectionRequest,
            reports::SubmitWorkOrderRequest,
            reports::ChecklistItemDto,
            // Dashboard
            dashboard::DashboardDto,
            dashboard::StatusCountDto,
            dashboard::FormTypeCountDto,
            // Calendar
            calendar::CalendarDayDto,
            calendar::VisitDto,
            // Advisory
            advisory::SuggestFormRequest,
            advisory::SuggestFormDto,
            advisory::TroubleshootRequest,
            advisory::TroubleshootDto,
            // Timer
            timer::TimerStatusDto,
        )
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Session", description = "Session and user-directory management"),
        (name = "Reports", description = "Form submissions and status workflow"),
        (name = "Dashboard", description = "Recent activity and counts"),
        (name = "Calendar", description = "Scheduled visits by day"),
        (name = "Advisory", description = "AI form suggestions and troubleshooting"),
        (name = "Timer", description = "Durable work-session timer"),
    ),
    info(
        title = "FieldServe API",
        version = "1.0.0",
        description = "REST API for heavy-equipment field-service management",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let session_routes = Router::new()
        .route("/login", post(session::handlers::login))
        .route("/logout", post(session::handlers::logout))
        .route("/current", get(session::handlers::get_current_profile))
        .route(
            "/users",
            get(session::handlers::list_users).post(session::handlers::create_user),
        )
        .route("/profile", put(session::handlers::update_profile));

    let report_routes = Router::new()
        .route("/", get(reports::handlers::list_reports))
        .route("/maintenance", post(reports::handlers::submit_maintenance))
        .route("/repair", post(reports::handlers::submit_repair))
        .route("/inspection", post(reports::handlers::submit_inspection))
        .route("/work-orders", post(reports::handlers::submit_work_order))
        .route("/{id}", get(reports::handlers::get_report))
        .route("/{id}/status", put(reports::handlers::change_status));

    let timer_routes = Router::new()
        .route("/", get(timer::handlers::get_timer))
        .route("/start", post(timer::handlers::start_timer))
        .route("/stop", post(timer::handlers::stop_timer));

    let advisory_routes = Router::new()
        .route("/suggest-form", post(advisory::handlers::suggest_form))
        .route("/troubleshoot", post(advisory::handlers::troubleshoot));

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::handlers::health_check))
        .nest("/api/v1/session", session_routes)
        .nest("/api/v1/reports", report_routes)
        .route("/api/v1/dashboard", get(dashboard::handlers::get_dashboard))
        .route("/api/v1/calendar", get(calendar::handlers::get_calendar))
        .nest("/api/v1/advisory", advisory_routes)
        .nest("/api/v1/timer", timer_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────
