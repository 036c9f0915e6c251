use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    delete_transcription_handler, get_transcription_handler, health_handler,
    list_lexicon_handler, list_transcriptions_handler, root_handler, transcribe_handler,
    upsert_lexicon_handler,
};
use crate::presentation::state::AppState;

/// Room for multipart framing and text fields on top of the audio itself.
const MULTIPART_OVERHEAD_BYTES: u64 = 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = state
        .transcription_service
        .max_upload_bytes()
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let body_limit = usize::try_from(body_limit).unwrap_or(usize::MAX);

    Router::new()
        .route("/", get(root_handler))
        .route("/v1/health", get(health_handler))
        .route(
            "/v1/transcribe",
            post(transcribe_handler).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/v1/transcriptions", get(list_transcriptions_handler))
        .route(
            "/v1/transcriptions/{id}",
            get(get_transcription_handler).delete(delete_transcription_handler),
        )
        .route(
            "/v1/lexicon",
            get(list_lexicon_handler).post(upsert_lexicon_handler),
        )
        .layer(trace_layer)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .with_state(state)
}
