use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryCandidateRepository};
use crate::routes::with_matching_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use internship_match::config::AppConfig;
use internship_match::engine::{
    sample_candidates, strategy_from_config, taxonomy_from_config, MatchingService,
};
use internship_match::error::AppError;
use internship_match::telemetry;
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

    let taxonomy = taxonomy_from_config(&config.engine)?;
    let strategy = strategy_from_config(&config.engine, taxonomy.clone())?;
    let repository = Arc::new(InMemoryCandidateRepository::seeded(sample_candidates()));
    let matching_service = Arc::new(MatchingService::new(repository, strategy, &taxonomy));

    let app = with_matching_routes(matching_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        scorer = ?config.engine.scorer,
        "internship matching service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
