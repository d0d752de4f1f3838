use std::net::SocketAddr;

use axum::{Router, middleware, routing::get};
use patientql_graphql::{GRAPHQL_PATH, GraphQLState, graphql_handler, graphql_handler_get};
use patientql_storage::DynStorage;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{bootstrap, config::AppConfig, handlers, middleware as app_middleware};

pub struct PatientqlServer {
    addr: SocketAddr,
    app: Router,
}

/// Assembles the router around an already connected storage handle.
pub fn build_app(cfg: &AppConfig, storage: DynStorage) -> anyhow::Result<Router> {
    let body_limit = cfg.server.body_limit_bytes;
    let graphql_state = GraphQLState::new(storage, cfg.graphql.clone())?;

    let graphql = Router::new()
        .route(
            GRAPHQL_PATH,
            get(graphql_handler_get).post(graphql_handler),
        )
        .with_state(graphql_state);

    let app = Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .merge(graphql)
        .layer(axum::extract::DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    use tracing::field::Empty;
                    let req_id = req
                        .headers()
                        .get(app_middleware::REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("")
                        .to_string();
                    tracing::info_span!(
                        "http.request",
                        http.method = %req.method(),
                        http.target = %req.uri(),
                        http.status_code = Empty,
                        request_id = %req_id
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record(
                            "http.status_code",
                            tracing::field::display(res.status().as_u16()),
                        );
                        tracing::info!(
                            http.status = %res.status().as_u16(),
                            elapsed_ms = %latency.as_millis(),
                            "request handled"
                        );
                    },
                ),
        )
        // Outermost, so the trace span sees the id it assigns.
        .layer(middleware::from_fn(app_middleware::request_id));

    Ok(app)
}

pub struct ServerBuilder {
    addr: SocketAddr,
    config: AppConfig,
    storage: Option<DynStorage>,
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerBuilder {
    pub fn new() -> Self {
        let cfg = AppConfig::default();
        Self {
            addr: cfg.addr(),
            config: cfg,
            storage: None,
        }
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_config(mut self, cfg: AppConfig) -> Self {
        self.addr = cfg.addr();
        self.config = cfg;
        self
    }

    /// Uses `storage` instead of connecting the configured backend.
    pub fn with_storage(mut self, storage: DynStorage) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Connects storage (unless one was supplied) and builds the router.
    ///
    /// # Errors
    ///
    /// Fails when the backend cannot be reached or the schema cannot be built.
    pub async fn build(self) -> anyhow::Result<PatientqlServer> {
        let storage = match self.storage {
            Some(storage) => storage,
            None => bootstrap::connect_storage(&self.config.storage).await?,
        };

        let app = build_app(&self.config, storage)?;

        Ok(PatientqlServer {
            addr: self.addr,
            app,
        })
    }
}

impl PatientqlServer {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
