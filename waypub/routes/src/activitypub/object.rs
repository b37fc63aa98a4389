use std::collections::HashMap;

use apvoc::LD;
use axum::extract::{Path, Request, State};
use axum::response::{IntoResponse, Response};

use waypub::{Context, RequestContext};

use crate::builders::JsonLD;
use crate::{negotiate, ApiResult};

pub async fn view<T: Send + Sync + 'static>(
	State(ctx): State<Context<T>>,
	Path(params): Path<HashMap<String, String>>,
	request: Request,
) -> Response {
	match crate::capture(&ctx, request).await {
		Ok(rctx) => respond(&rctx, &params).await.unwrap_or_else(|e| e.into_response()),
		Err(e) => e.into_response(),
	}
}

/// serve the object identified by the route parameters, same precedence
/// rules as the actor responder
pub async fn respond<T: Send + Sync>(
	ctx: &RequestContext<T>,
	params: &HashMap<String, String>,
) -> ApiResult<Response> {
	let registry = ctx.registry();

	let Some(dispatcher) = registry.object_dispatcher() else {
		return Ok(registry.not_found().respond(ctx.parts()).await);
	};

	let Some(object) = dispatcher.dispatch(ctx, params).await? else {
		return Ok(registry.not_found().respond(ctx.parts()).await);
	};

	if !negotiate::accepts_json_ld(ctx.headers()) {
		return Ok(registry.not_acceptable().respond(ctx.parts()).await);
	}

	if let Some(authorizer) = registry.object_authorizer() {
		let key = ctx.signed_key().await?;
		let owner = ctx.signed_key_owner().await?;
		if !authorizer.authorize(ctx, params, key, owner).await? {
			return Ok(registry.unauthorized().respond(ctx.parts()).await);
		}
	}

	Ok(JsonLD(object.ld_context()).into_response())
}
