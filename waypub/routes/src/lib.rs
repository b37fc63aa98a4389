use axum::http::StatusCode;
use tower_http::classify::{SharedClassifier, StatusInRangeAsFailures};

pub mod error;
pub use error::{ApiError, ApiResult};

pub mod negotiate;

pub mod builders;

pub mod activitypub;

#[cfg(test)]
pub(crate) mod test_utils;

/// largest request body the framework will buffer before refusing a delivery
const BODY_LIMIT: usize = 1024 * 1024;

pub trait ActivityPubRouter {
	fn ap_routes(self) -> Self where Self: Sized { self }
}

/// buffer the request body and bind the request to the server context
///
/// responders need the raw bytes twice (json parsing and http signature
/// verification), so the body is captured up front
pub async fn capture<T>(
	ctx: &waypub::Context<T>,
	request: axum::extract::Request,
) -> ApiResult<waypub::RequestContext<T>> {
	let (parts, body) = request.into_parts();
	let body = axum::body::to_bytes(body, BODY_LIMIT)
		.await
		.map_err(|_| ApiError::Status(StatusCode::PAYLOAD_TOO_LARGE))?;
	ctx.request(parts, body).map_err(|_| ApiError::bad_request())
}

pub async fn serve<T: Send + Sync + 'static>(
	ctx: waypub::Context<T>,
	bind: String,
) -> Result<(), std::io::Error> {
	use tower_http::{cors::CorsLayer, trace::TraceLayer};

	let router = axum::Router::new()
		.ap_routes()
		.layer(
			TraceLayer::new(SharedClassifier::new(StatusInRangeAsFailures::new(500..=999)))
				.make_span_with(|req: &axum::http::Request<_>| {
					tracing::span!(
						tracing::Level::INFO,
						"request",
						uri = %req.uri(),
						status_code = tracing::field::Empty,
					)
				})
		)
		.layer(CorsLayer::permissive())
		.with_state(ctx);

	tracing::info!("serving federation endpoints on {bind}");

	let listener = tokio::net::TcpListener::bind(bind).await?;
	axum::serve(listener, router).await?;

	Ok(())
}
