use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub struct MockServer {
    pub base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            tx.send(()).ok();
        }
    }
}

/// Serves `route` with a fixed status and body.
pub async fn start(route: &str, status: u16, body: &'static str) -> MockServer {
    let app = Router::new().route(
        route,
        post(move || async move {
            let status = StatusCode::from_u16(status).unwrap();
            (status, body).into_response()
        }),
    );
    serve(app).await
}

/// Answers 200 with `body` only when `header` equals `expected`, 401 otherwise.
pub async fn start_requiring_header(
    route: &str,
    header: &'static str,
    expected: &'static str,
    body: &'static str,
) -> MockServer {
    let app = Router::new().route(
        route,
        post(move |headers: HeaderMap| async move {
            match headers.get(header).and_then(|v| v.to_str().ok()) {
                Some(value) if value == expected => (StatusCode::OK, body).into_response(),
                _ => (
                    StatusCode::UNAUTHORIZED,
                    r#"{"error": {"message": "Incorrect API key provided"}}"#,
                )
                    .into_response(),
            }
        }),
    );
    serve(app).await
}

async fn serve(app: Router) -> MockServer {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    MockServer {
        base_url: format!("http://{}", addr),
        shutdown: Some(shutdown_tx),
    }
}
