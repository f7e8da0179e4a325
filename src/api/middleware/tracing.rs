//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Request tracing for every route of the service.
///
/// Each request gets an `INFO` span carrying method, URI and HTTP version;
/// the response is logged at `INFO` with its status and latency in
/// milliseconds. Redirects and statistics reads show up like this:
///
/// ```text
/// INFO request{method=GET uri=/aZ3kQ9 version=HTTP/1.1}: finished processing request latency=0 ms status=307
/// INFO request{method=GET uri=/shorturls/aZ3kQ9 version=HTTP/1.1}: finished processing request latency=1 ms status=200
/// ```
///
/// Audit events are emitted separately on the `audit` target, so
/// `RUST_LOG=tower_http=info,audit=warn` keeps request logs while muting
/// routine audit traffic.
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
