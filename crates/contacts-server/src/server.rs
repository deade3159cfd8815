use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use contacts_settings::ServerSettings;
use contacts_store::ContactStore;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::routes::{destroy, root};
use crate::shutdown::ShutdownCoordinator;
use crate::{assets, health, view};

/// How long `ServerHandle::shutdown` waits for in-flight requests.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared application state passed to Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContactStore>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self {
            store,
            start_time: Instant::now(),
        }
    }
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState, settings: &ServerSettings) -> Router {
    Router::new()
        .route("/", get(root::get_root).post(root::post_root))
        .route("/contacts/{contact_id}/destroy", post(destroy::post_destroy))
        .route("/health", get(health::health_handler))
        .route("/app.css", get(assets::stylesheet))
        .route("/app.js", get(assets::script))
        .fallback(not_found)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(RequestBodyLimitLayer::new(settings.max_body_bytes))
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    settings.request_timeout(),
                )),
        )
}

/// Bind, then serve in the background until the handle is shut down.
pub async fn start(
    settings: &ServerSettings,
    store: Arc<dyn ContactStore>,
) -> Result<ServerHandle, std::io::Error> {
    let router = build_router(AppState::new(store), settings);
    let listener = TcpListener::bind(settings.bind_addr()).await?;
    let addr = listener.local_addr()?;

    let shutdown = ShutdownCoordinator::new();
    let token = shutdown.token();
    let server = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router)
            .with_graceful_shutdown(token.cancelled_owned())
            .await
        {
            error!(error = %e, "server exited with error");
        }
    });

    info!(%addr, "contacts server started");

    Ok(ServerHandle {
        addr,
        shutdown,
        server,
    })
}

/// Handle returned by `start()`; owns the serving task.
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: ShutdownCoordinator,
    server: JoinHandle<()>,
}

impl ServerHandle {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop accepting connections and wait for in-flight requests to finish.
    pub async fn shutdown(self) {
        self.shutdown.shutdown();
        let mut server = self.server;
        match tokio::time::timeout(SHUTDOWN_TIMEOUT, &mut server).await {
            Ok(Ok(())) => info!("server stopped"),
            Ok(Err(e)) => error!(error = %e, "server task failed"),
            Err(_) => {
                warn!("shutdown timed out after {SHUTDOWN_TIMEOUT:?}, aborting server task");
                server.abort();
            }
        }
    }
}

async fn not_found() -> (StatusCode, Html<String>) {
    (
        StatusCode::NOT_FOUND,
        Html(view::error_page("404", "Not Found")),
    )
}

fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    error!("request handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(view::error_page("Oops!", "Unexpected Server Error")),
    )
        .into_response()
}
