use std::time::Duration;

use apvoc::{Activity, Base};
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use waypub::traits::KvKey;
use waypub::{Context, RequestContext};

use crate::ApiError;

/// processed deliveries are remembered for this long
const IDEMPOTENCE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

pub async fn post<T: Send + Sync + 'static>(
	State(ctx): State<Context<T>>,
	request: Request,
) -> Response {
	match crate::capture(&ctx, request).await {
		Ok(rctx) => respond(&rctx, None).await,
		Err(e) => e.into_response(),
	}
}

pub async fn post_scoped<T: Send + Sync + 'static>(
	State(ctx): State<Context<T>>,
	Path(handle): Path<String>,
	request: Request,
) -> Response {
	match crate::capture(&ctx, request).await {
		Ok(rctx) => respond(&rctx, Some(&handle)).await,
		Err(e) => e.into_response(),
	}
}

/// ingest one signed delivery, `handle` being `None` on the shared inbox
///
/// verification comes first (embedded proof, then the http signature), then
/// the replay check, then listener dispatch; the delivery is only recorded
/// as processed after the listener returns cleanly, so a crashed listener
/// leads to redelivery rather than silent loss
pub async fn respond<T: Send + Sync>(ctx: &RequestContext<T>, handle: Option<&str>) -> Response {
	let registry = ctx.registry();

	// an inbox without an actor dispatcher cannot exist, refuse everything
	let Some(dispatcher) = registry.actor_dispatcher() else {
		tracing::error!("no actor dispatcher registered, refusing delivery");
		return registry.not_found().respond(ctx.parts()).await;
	};
	if let Some(handle) = handle {
		match dispatcher.dispatch(ctx, handle).await {
			Ok(Some(_)) => {},
			Ok(None) => {
				tracing::warn!("refusing delivery for unknown actor '{handle}'");
				return registry.not_found().respond(ctx.parts()).await;
			},
			Err(e) => return ApiError::Callback(e).into_response(),
		}
	}

	let json: serde_json::Value = match serde_json::from_slice(ctx.body()) {
		Ok(x) => x,
		Err(e) => {
			notify(ctx, &e).await;
			return (StatusCode::BAD_REQUEST, "Invalid JSON.").into_response();
		},
	};

	// an embedded linked-data proof authenticates the document on its own
	let verified = match ctx.proofs() {
		Some(proofs) => match proofs.verify_activity(&json, ctx.loader()).await {
			Ok(x) => x,
			Err(e) => {
				notify(ctx, e.as_ref()).await;
				return (StatusCode::BAD_REQUEST, "Invalid activity.").into_response();
			},
		},
		None => None,
	};

	// otherwise authenticity is rooted in the http signature on the request
	let mut signed_key = None;
	let activity = match verified {
		Some(x) => x,
		None => {
			let key = match ctx.signed_key().await {
				Ok(x) => x.cloned(),
				Err(e) => return ApiError::Callback(e).into_response(),
			};
			let Some(key) = key else {
				return (StatusCode::UNAUTHORIZED, "Failed to verify the request signature.").into_response();
			};
			signed_key = Some(key);
			json
		},
	};

	let kind = match activity.activity_type() {
		Ok(x) => x,
		Err(e) => {
			notify(ctx, &e).await;
			return (StatusCode::BAD_REQUEST, "Invalid activity.").into_response();
		},
	};

	// replayed deliveries are acknowledged without running the listener again
	let aid = activity.id().ok().map(str::to_string);
	let idempotence_key = aid.as_ref().map(|id| {
		KvKey::new(ctx.cfg().inbox.idempotence_prefix.clone()).join(id.as_str())
	});
	if let Some(ref key) = idempotence_key {
		match ctx.store().get(key).await {
			Ok(Some(seen)) if truthy(&seen) => {
				let id = aid.unwrap_or_default();
				return (
					StatusCode::ACCEPTED,
					format!("Activity <{id}> has already been processed."),
				).into_response();
			},
			Ok(_) => {},
			Err(e) => return ApiError::Callback(e).into_response(),
		}
	}

	let actor_node = activity.actor();
	let actor_id = match actor_node.id() {
		Ok(x) => x.to_string(),
		Err(_) => return (StatusCode::BAD_REQUEST, "Missing actor.").into_response(),
	};

	// on the http signature path the key must belong to the declared actor;
	// an embedded proof already binds the two
	if let Some(ref key) = signed_key {
		match ctx.signatures().actor_owns_key(&activity, key, ctx.loader()).await {
			Ok(true) => {},
			Ok(false) => {
				tracing::warn!("refusing delivery: signing key does not belong to {actor_id}");
				return (StatusCode::UNAUTHORIZED, "The signer and the actor do not match.").into_response();
			},
			Err(e) => return ApiError::Callback(e).into_response(),
		}
	}

	let Some(listener) = registry.listener_for(kind) else {
		tracing::warn!("no listener registered for {} activities, accepting and ignoring", kind.as_ref());
		return StatusCode::ACCEPTED.into_response();
	};

	if let Err(e) = listener.handle(ctx, activity).await {
		notify(ctx, e.as_ref()).await;
		return (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.").into_response();
	}

	// record only after the listener succeeded: a failed listener must be
	// redeliverable, a failed record merely risks running it twice
	if let Some(key) = idempotence_key {
		if let Err(e) = ctx.store().set(&key, serde_json::Value::Bool(true), Some(IDEMPOTENCE_TTL)).await {
			tracing::error!("failed recording processed delivery '{key}': {e}");
		}
	}

	tracing::info!("{actor_id} delivered {} activity", kind.as_ref());
	StatusCode::ACCEPTED.into_response()
}

async fn notify<T>(ctx: &RequestContext<T>, error: &(dyn std::error::Error + Send + Sync + 'static)) {
	if let Some(handler) = ctx.registry().error_handler() {
		handler.handle(ctx, error).await;
	}
}

fn truthy(value: &serde_json::Value) -> bool {
	!matches!(value, serde_json::Value::Null | serde_json::Value::Bool(false))
}
