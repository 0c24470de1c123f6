mod ballot_handlers;
mod error;
pub mod response;
mod routes;
mod state;

pub use ballot_handlers::{
    CastVoteRequest, TallyResponse, VoteResponse, VotedResponse, VoterRequest,
};
pub use error::{ApiError, ApiResult};
pub use state::ApiState;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the application router with CORS and request tracing applied.
pub fn create_app(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    routes::create_routes()
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Serve the API on `addr` until `shutdown` resolves.
pub async fn start_server<F>(
    addr: SocketAddr,
    state: ApiState,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    serve(listener, state, shutdown).await?;
    Ok(())
}

/// Serve the API on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: ApiState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::info!(addr = %listener.local_addr()?, "api_listening");

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown)
        .await
}
