use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// logs one line per request. the query string is left out since it
/// carries customer addresses.
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();
    let response = next.run(request).await;
    log::info!(
        "{method} {path} {} {}ms",
        response.status().as_u16(),
        start.elapsed().as_millis()
    );
    response
}
