use crate::cli::ServeArgs;
use crate::infra::{AppState, StaticCatalogRepository};
use crate::routes::with_quote_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use quote_desk::config::AppConfig;
use quote_desk::error::AppError;
use quote_desk::telemetry;
use quote_desk::workflows::quoting::QuoteService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.catalog.take() {
        config.catalog.document_path = Some(path);
    }
    if let Some(path) = args.rules.take() {
        config.catalog.rules_path = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(StaticCatalogRepository::load(
        config.catalog.document_path.as_deref(),
        config.catalog.rules_path.as_deref(),
    )?);
    let quote_service = Arc::new(QuoteService::new(repository));

    let issues = quote_service.audit()?;
    if !issues.is_empty() {
        warn!(
            issue_count = issues.len(),
            "catalog has references the eligibility engine will skip"
        );
    }

    let app = with_quote_routes(quote_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "quote desk ready");

    axum::serve(listener, app).await?;
    Ok(())
}
