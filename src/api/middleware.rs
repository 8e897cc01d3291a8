use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use log::info;

/// Log method, uri, status and elapsed time of every request
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    info!("[{}]\t{}\t{}\t{:?}", method, uri, response.status().as_u16(), start.elapsed());
    response
}
