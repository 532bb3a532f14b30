//! Main webserver implementation
//!
//! Wires the timetable engine into an axum router and runs it until Ctrl+C,
//! optionally reloading the school from its gateway on a fixed interval.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use tokio::task::JoinHandle;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, TraceLayer},
};

use engine::{StoreGateway, TimetableEngine};
use shared::{Class, Lesson, ProcessId, Subject, Teacher, logging, process_info, process_warn};

use crate::error::{WebServerError, WebServerResult};
use crate::state::WebServerState;
use crate::web::handlers::{api, collections};

/// Largest accepted request body, sized for whole-school imports
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// HTTP front of a timetable engine
pub struct WebServer<G>
where
    G: StoreGateway,
{
    state: Arc<WebServerState>,
    engine: Arc<TimetableEngine<G>>,
    static_dir: Option<PathBuf>,
    reload_interval: Option<Duration>,
}

// Clones share the engine; `G` need not be `Clone`
impl<G> Clone for WebServer<G>
where
    G: StoreGateway,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            engine: Arc::clone(&self.engine),
            static_dir: self.static_dir.clone(),
            reload_interval: self.reload_interval,
        }
    }
}

impl<G> WebServer<G>
where
    G: StoreGateway + 'static,
{
    pub fn new(bind_address: SocketAddr, engine: TimetableEngine<G>) -> Self {
        Self {
            state: Arc::new(WebServerState::new(bind_address)),
            engine: Arc::new(engine),
            static_dir: None,
            reload_interval: None,
        }
    }

    /// Serve a front-end bundle from `dir`, answering unknown paths with its `index.html`
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Reload the school from the gateway every `interval`
    pub fn with_reload_interval(mut self, interval: Duration) -> Self {
        self.reload_interval = Some(interval);
        self
    }

    pub fn state(&self) -> &Arc<WebServerState> {
        &self.state
    }

    pub fn engine(&self) -> &Arc<TimetableEngine<G>> {
        &self.engine
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        let router = Router::new()
            .route("/health", get(api::health::<G>))
            .route("/api/status", get(api::status::<G>))
            .route("/api/snapshot", get(api::snapshot::<G>))
            .route("/api/conflicts", get(api::conflicts::<G>))
            .route("/api/lessons/validate", post(api::validate_lesson::<G>))
            .route("/api/lessons/:id/move", put(api::move_lesson::<G>))
            .route("/api/lessons/:id/validate-move", get(api::validate_move::<G>))
            .route("/api/classes/:id/grid", get(api::class_grid::<G>))
            .route("/api/teachers/:id/grid", get(api::teacher_grid::<G>))
            .route("/api/import", post(api::import::<G>))
            .route("/api/export", get(api::export::<G>))
            .route("/api/reset", delete(api::reset::<G>))
            .merge(collection_routes::<G, Subject>("/api/subjects"))
            .merge(collection_routes::<G, Teacher>("/api/teachers"))
            .merge(collection_routes::<G, Class>("/api/classes"))
            .merge(collection_routes::<G, Lesson>("/api/lessons"))
            .with_state(self.clone());

        let router = match &self.static_dir {
            Some(dir) => router.fallback_service(
                ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
            ),
            None => router,
        };

        router
            .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO)),
            )
            .layer(CorsLayer::permissive())
    }

    /// Start the webserver and block until shutdown
    pub async fn run(&self) -> WebServerResult<()> {
        let router = self.build_router();
        let address = self.state.bind_address;

        let listener = tokio::net::TcpListener::bind(address)
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Failed to bind {address}: {e}")))?;

        let reload_task = self
            .reload_interval
            .map(|interval| spawn_reload(Arc::clone(&self.engine), interval));

        logging::log_startup(
            ProcessId::current(),
            &format!("listening on http://{address} ({})", self.engine.gateway().describe()),
        );

        let served = axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal(Arc::clone(&self.state)))
            .await;

        if let Some(task) = reload_task {
            task.abort();
        }
        self.state.set_running(false);

        served.map_err(WebServerError::from)
    }
}

/// CRUD routes of one collection under `base`
fn collection_routes<G, R>(base: &str) -> Router<WebServer<G>>
where
    G: StoreGateway + 'static,
    R: engine::MutableRecord,
{
    Router::new()
        .route(
            base,
            get(collections::list::<G, R>).post(collections::create::<G, R>),
        )
        .route(
            &format!("{base}/:id"),
            get(collections::get_one::<G, R>)
                .put(collections::update::<G, R>)
                .delete(collections::delete::<G, R>),
        )
}

fn spawn_reload<G>(engine: Arc<TimetableEngine<G>>, interval: Duration) -> JoinHandle<()>
where
    G: StoreGateway + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately
        ticker.tick().await;

        process_info!(ProcessId::current(), "🔄 Reloading from gateway every {:?}", interval);
        loop {
            ticker.tick().await;
            if let Err(e) = engine.reload().await {
                process_warn!(ProcessId::current(), "⚠️ Periodic reload failed: {}", e);
            }
        }
    })
}

async fn shutdown_signal(state: Arc<WebServerState>) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => logging::log_shutdown(ProcessId::current(), "Received Ctrl+C signal"),
        Err(err) => {
            logging::log_error(ProcessId::current(), "Signal handling", &err);
            // Without a signal handler the server runs until killed
            std::future::pending::<()>().await;
        }
    }
    state.set_running(false);
}
