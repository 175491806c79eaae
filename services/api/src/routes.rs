use crate::infra::{
    deserialize_optional_date, resolve_schedule_type, AppState, ProgramState,
};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use hpv_tracker::eligibility::{age, EligibilityStatus, Profile, ScreeningAnswers};
use hpv_tracker::error::AppError;
use hpv_tracker::program::{Clinic, ProgramConfig};
use hpv_tracker::schedule::{
    reminder_plan, DoseHistory, Reminder, ScheduleType, SeriesSnapshot, VaccineDose,
};
use hpv_tracker::triage::{classify, SymptomReport, TriageLevel};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

const UNNAMED_PROFILE: &str = "Your child";

#[derive(Debug, Deserialize)]
pub(crate) struct EligibilityRequest {
    pub(crate) profile: Profile,
    pub(crate) screening: ScreeningAnswers,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EligibilityResponse {
    pub(crate) status: EligibilityStatus,
    pub(crate) rule: &'static str,
    pub(crate) message: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ScheduleRequest {
    #[serde(default)]
    pub(crate) schedule_type: Option<ScheduleType>,
    #[serde(default)]
    pub(crate) age_at_first_dose: Option<u32>,
    #[serde(default)]
    pub(crate) immunocompromised: bool,
    #[serde(default)]
    pub(crate) doses: Vec<VaccineDose>,
    #[serde(default)]
    pub(crate) eligibility_complete: bool,
    #[serde(default)]
    pub(crate) clinic_found: bool,
    #[serde(default)]
    pub(crate) months_after_dose1: Option<u32>,
    #[serde(default)]
    pub(crate) profile_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScheduleResponse {
    #[serde(flatten)]
    pub(crate) snapshot: SeriesSnapshot,
    pub(crate) reminders: Vec<Reminder>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TriageResponse {
    pub(crate) level: TriageLevel,
    pub(crate) message: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ClinicQuery {
    #[serde(default)]
    pub(crate) area: Option<String>,
}

/// Engine endpoints, bound to the loaded program.
pub(crate) fn program_router(program: Arc<ProgramState>) -> Router {
    Router::new()
        .route("/api/v1/eligibility", post(eligibility_endpoint))
        .route("/api/v1/schedule", post(schedule_endpoint))
        .route("/api/v1/triage", post(triage_endpoint))
        .route("/api/v1/program", get(program_endpoint))
        .route("/api/v1/clinics", get(clinics_endpoint))
        .with_state(program)
}

pub(crate) fn with_program_routes(program: Arc<ProgramState>) -> Router {
    program_router(program)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn eligibility_endpoint(
    State(program): State<Arc<ProgramState>>,
    Json(payload): Json<EligibilityRequest>,
) -> Result<Json<EligibilityResponse>, AppError> {
    let EligibilityRequest {
        profile,
        screening,
        today,
    } = payload;

    let today = today.unwrap_or_else(age::today);
    let decision = program
        .engine
        .evaluate(&profile, &screening, today)
        .inspect_err(|err| warn!(error = %err, "eligibility evaluation rejected"))?;

    info!(status = decision.status.label(), rule = decision.rule, "eligibility evaluated");

    Ok(Json(EligibilityResponse {
        status: decision.status,
        rule: decision.rule,
        message: decision.message(),
    }))
}

pub(crate) async fn schedule_endpoint(
    State(program): State<Arc<ProgramState>>,
    Json(payload): Json<ScheduleRequest>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let config = program.config();
    let schedule_type = resolve_schedule_type(
        payload.schedule_type,
        payload.age_at_first_dose,
        payload.immunocompromised,
        config,
    )?;
    let history = DoseHistory::new(payload.doses)
        .inspect_err(|err| warn!(error = %err, "dose history rejected"))?;
    let months = payload
        .months_after_dose1
        .unwrap_or(config.dose2_months_after_dose1);

    let snapshot = SeriesSnapshot::compute(
        &history,
        schedule_type,
        months,
        payload.eligibility_complete,
        payload.clinic_found,
    );

    let today = payload.today.unwrap_or_else(age::today);
    let name = payload
        .profile_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNNAMED_PROFILE);
    let reminders = match (snapshot.next_dose, snapshot.due_date) {
        (Some(next_dose), Some(due_date)) => reminder_plan(next_dose, due_date, name, today),
        _ => Vec::new(),
    };

    Ok(Json(ScheduleResponse {
        snapshot,
        reminders,
    }))
}

pub(crate) async fn triage_endpoint(Json(report): Json<SymptomReport>) -> Json<TriageResponse> {
    let level = classify(&report);
    Json(TriageResponse {
        level,
        message: level.message(),
    })
}

pub(crate) async fn program_endpoint(
    State(program): State<Arc<ProgramState>>,
) -> Json<ProgramConfig> {
    Json(program.config().clone())
}

pub(crate) async fn clinics_endpoint(
    State(program): State<Arc<ProgramState>>,
    Query(query): Query<ClinicQuery>,
) -> Json<Vec<Clinic>> {
    let clinics = match query.area.as_deref() {
        Some(area) if !area.trim().is_empty() => {
            program.clinics.in_area(area).into_iter().cloned().collect()
        }
        _ => program.clinics.clinics().to_vec(),
    };
    Json(clinics)
}
