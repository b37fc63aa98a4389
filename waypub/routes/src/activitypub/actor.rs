use apvoc::LD;
use axum::extract::{Path, Request, State};
use axum::response::{IntoResponse, Response};

use waypub::{Context, RequestContext};

use crate::builders::JsonLD;
use crate::{negotiate, ApiResult};

pub async fn view<T: Send + Sync + 'static>(
	State(ctx): State<Context<T>>,
	Path(handle): Path<String>,
	request: Request,
) -> Response {
	match crate::capture(&ctx, request).await {
		Ok(rctx) => respond(&rctx, &handle).await.unwrap_or_else(|e| e.into_response()),
		Err(e) => e.into_response(),
	}
}

/// serve the actor document for `handle`
///
/// precedence is observable and fixed: missing dispatcher or unknown handle
/// beat content negotiation, which beats authorization
pub async fn respond<T: Send + Sync>(ctx: &RequestContext<T>, handle: &str) -> ApiResult<Response> {
	let registry = ctx.registry();

	let Some(dispatcher) = registry.actor_dispatcher() else {
		return Ok(registry.not_found().respond(ctx.parts()).await);
	};

	let Some(actor) = dispatcher.dispatch(ctx, handle).await? else {
		return Ok(registry.not_found().respond(ctx.parts()).await);
	};

	if !negotiate::accepts_json_ld(ctx.headers()) {
		return Ok(registry.not_acceptable().respond(ctx.parts()).await);
	}

	if let Some(authorizer) = registry.actor_authorizer() {
		let key = ctx.signed_key().await?;
		let owner = ctx.signed_key_owner().await?;
		if !authorizer.authorize(ctx, handle, key, owner).await? {
			return Ok(registry.unauthorized().respond(ctx.parts()).await);
		}
	}

	Ok(JsonLD(actor.ld_context()).into_response())
}

#[cfg(test)]
mod test {
	use axum::http::{header, StatusCode};

	use crate::test_utils::{body_string, fixture, get_context, Fixture};

	#[tokio::test]
	async fn unknown_handles_fall_back_to_not_found() {
		let Fixture { ctx, .. } = fixture();
		let rctx = get_context(&ctx, "/actors/alice", None);
		let res = super::respond(&rctx, "alice").await.unwrap();
		assert_eq!(res.status(), StatusCode::NOT_FOUND);
	}

	#[tokio::test]
	async fn browsers_get_the_not_acceptable_fallback() {
		let Fixture { ctx, .. } = fixture();
		let rctx = get_context(&ctx, "/actors/mara", Some("text/html"));
		let res = super::respond(&rctx, "mara").await.unwrap();
		assert_eq!(res.status(), StatusCode::NOT_ACCEPTABLE);
	}

	#[tokio::test]
	async fn known_handles_serialize_with_the_standard_headers() {
		let Fixture { ctx, .. } = fixture();
		let rctx = get_context(&ctx, "/actors/mara", Some("application/activity+json"));
		let res = super::respond(&rctx, "mara").await.unwrap();
		assert_eq!(res.status(), StatusCode::OK);
		assert_eq!(res.headers().get(header::CONTENT_TYPE).unwrap(), "application/activity+json");
		assert_eq!(res.headers().get(header::VARY).unwrap(), "Accept");
		let doc: serde_json::Value = serde_json::from_str(&body_string(res).await).unwrap();
		assert_eq!(doc.get("id").unwrap().as_str().unwrap(), "https://social.example/actors/mara");
		assert!(doc.get("@context").is_some());
	}

	#[tokio::test]
	async fn missing_dispatcher_beats_negotiation() {
		let Fixture { ctx, .. } = crate::test_utils::fixture_bare();
		// even with a non-negotiable request the 404 fallback wins
		let rctx = get_context(&ctx, "/actors/mara", Some("text/html"));
		let res = super::respond(&rctx, "mara").await.unwrap();
		assert_eq!(res.status(), StatusCode::NOT_FOUND);
	}

	#[tokio::test]
	async fn denied_requests_get_the_unauthorized_fallback_verbatim() {
		use crate::test_utils::{fixture_custom, Deny, StaticActors, Teapot};
		let registry = waypub::Registry::new()
			.with_actor_dispatcher(StaticActors)
			.with_actor_authorizer(Deny)
			.with_unauthorized(Teapot);
		let Fixture { ctx, .. } = fixture_custom(registry);
		let rctx = get_context(&ctx, "/actors/mara", None);
		let res = super::respond(&rctx, "mara").await.unwrap();
		assert_eq!(res.status(), StatusCode::IM_A_TEAPOT);
		assert_eq!(body_string(res).await, "no");
	}

	#[tokio::test]
	async fn authorization_sees_the_verified_signature_state() {
		use crate::test_utils::{fixture_custom, fixture_custom_unsigned, AllowSigned, StaticActors};
		let registry = || waypub::Registry::new()
			.with_actor_dispatcher(StaticActors)
			.with_actor_authorizer(AllowSigned);

		// signed request: the predicate receives key and owner, admits
		let Fixture { ctx, .. } = fixture_custom(registry());
		let rctx = get_context(&ctx, "/actors/mara", None);
		assert_eq!(super::respond(&rctx, "mara").await.unwrap().status(), StatusCode::OK);

		// unsigned request: the predicate receives nulls, refuses
		let Fixture { ctx, .. } = fixture_custom_unsigned(registry());
		let rctx = get_context(&ctx, "/actors/mara", None);
		assert_eq!(super::respond(&rctx, "mara").await.unwrap().status(), StatusCode::UNAUTHORIZED);
	}
}
