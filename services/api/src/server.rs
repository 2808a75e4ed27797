use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAuditRepository, InMemoryReviewPublisher};
use crate::routes::with_audit_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hotel_audit::audit::AuditService;
use hotel_audit::checklist::ChecklistCatalog;
use hotel_audit::config::AppConfig;
use hotel_audit::error::AppError;
use hotel_audit::telemetry;
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

    let catalog = Arc::new(ChecklistCatalog::standard());
    let repository = Arc::new(InMemoryAuditRepository::default());
    let reviews = Arc::new(InMemoryReviewPublisher::default());
    let audit_service = Arc::new(AuditService::new(catalog, repository, reviews));

    let app = with_audit_routes(audit_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "hotel audit service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
