use crate::cli::ServeArgs;
use crate::infra::{AppState, ProgramState};
use crate::routes::with_program_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hpv_tracker::config::AppConfig;
use hpv_tracker::eligibility::EligibilityError;
use hpv_tracker::error::AppError;
use hpv_tracker::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let program_config = config.program.program_config()?;
    let clinics = config.program.clinic_directory()?;
    info!(
        copy_variant = %program_config.copy_variant,
        clinics = clinics.len(),
        "program loaded"
    );
    let program = Arc::new(
        ProgramState::new(program_config, clinics).map_err(EligibilityError::Config)?,
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_program_routes(program)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "hpv tracker api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
