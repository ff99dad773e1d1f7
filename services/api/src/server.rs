use crate::cli::ServeArgs;
use crate::infra::{build_dashboard_service, AppState, InMemoryResultStore};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use staffing_ratios::config::AppConfig;
use staffing_ratios::error::AppError;
use staffing_ratios::telemetry;
use staffing_ratios::workflows::ratios::RatioCalculationService;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let ratio_service = Arc::new(RatioCalculationService::new(
        Arc::new(InMemoryResultStore::default()),
        config.ratios.constants(),
    ));
    let dashboard_service = Arc::new(build_dashboard_service(&config.dashboard)?);
    if !dashboard_service.is_configured() {
        info!("no contracts file configured; dashboard summary disabled");
    }

    let app = with_service_routes(ratio_service, dashboard_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        therapy_rounding = %config.ratios.therapy_rounding,
        gerocultor_rounding = %config.ratios.gerocultor_rounding,
        "staffing ratio service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
