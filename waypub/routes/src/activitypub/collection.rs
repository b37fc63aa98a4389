use apvoc::Base;
use axum::extract::{Path, Request, State};
use axum::response::{IntoResponse, Response};

use waypub::{Context, RequestContext};

use crate::{builders, negotiate, ApiResult};

/// in-process check applied to every projected item before it is served
pub type ItemPredicate = dyn Fn(&serde_json::Value) -> bool + Send + Sync;

pub async fn outbox<T: Send + Sync + 'static>(
	State(ctx): State<Context<T>>,
	Path(handle): Path<String>,
	request: Request,
) -> Response {
	view(ctx, "outbox", handle, request).await
}

pub async fn followers<T: Send + Sync + 'static>(
	State(ctx): State<Context<T>>,
	Path(handle): Path<String>,
	request: Request,
) -> Response {
	view(ctx, "followers", handle, request).await
}

pub async fn following<T: Send + Sync + 'static>(
	State(ctx): State<Context<T>>,
	Path(handle): Path<String>,
	request: Request,
) -> Response {
	view(ctx, "following", handle, request).await
}

pub async fn liked<T: Send + Sync + 'static>(
	State(ctx): State<Context<T>>,
	Path(handle): Path<String>,
	request: Request,
) -> Response {
	view(ctx, "liked", handle, request).await
}

async fn view<T: Send + Sync + 'static>(
	ctx: Context<T>,
	name: &str,
	handle: String,
	request: Request,
) -> Response {
	match crate::capture(&ctx, request).await {
		Ok(rctx) => respond(&rctx, name, &handle, None, None)
			.await
			.unwrap_or_else(|e| e.into_response()),
		Err(e) => e.into_response(),
	}
}

/// serve the collection registered under `name` for `handle`, either as a
/// summary (no `cursor` query parameter) or as one specific page
///
/// `filter` is forwarded opaquely to the collection callbacks; `predicate`
/// additionally drops items in-process for dispatchers that cannot filter
/// natively
pub async fn respond<T: Send + Sync>(
	ctx: &RequestContext<T>,
	name: &str,
	handle: &str,
	filter: Option<&serde_json::Value>,
	predicate: Option<&ItemPredicate>,
) -> ApiResult<Response> {
	let registry = ctx.registry();

	let Some(callbacks) = registry.collection(name) else {
		return Ok(registry.not_found().respond(ctx.parts()).await);
	};

	let cursor = ctx.url()
		.query_pairs()
		.find(|(k, _)| k == "cursor")
		.map(|(_, v)| v.into_owned());

	let document = match cursor {
		// no cursor: serve a summary of the whole collection
		None => {
			let first = match callbacks.first_cursor() {
				Some(producer) => producer.cursor(ctx, handle).await?,
				None => None,
			};
			let total_items = match callbacks.counter() {
				Some(counter) => counter.count(ctx, handle).await?,
				None => None,
			};
			match first {
				// no pagination offered: inline everything
				None => {
					let Some(page) = callbacks.dispatcher().dispatch(ctx, handle, None, filter).await? else {
						return Ok(registry.not_found().respond(ctx.parts()).await);
					};
					let items = project(name, page.items, predicate);
					builders::collection_inline(ctx.url(), total_items, items)
				},
				Some(first) => {
					let last = match callbacks.last_cursor() {
						Some(producer) => producer.cursor(ctx, handle).await?,
						None => None,
					};
					builders::collection_summary(ctx.url(), total_items, &first, last.as_deref())
				},
			}
		},
		// cursor given: serve that page
		Some(cursor) => {
			let Some(page) = callbacks.dispatcher().dispatch(ctx, handle, Some(&cursor), filter).await? else {
				return Ok(registry.not_found().respond(ctx.parts()).await);
			};
			let items = project(name, page.items, predicate);
			builders::collection_page(ctx.url(), items, page.prev_cursor.as_deref(), page.next_cursor.as_deref())
		},
	};

	if !negotiate::accepts_json_ld(ctx.headers()) {
		return Ok(registry.not_acceptable().respond(ctx.parts()).await);
	}

	if let Some(authorizer) = callbacks.authorizer() {
		let key = ctx.signed_key().await?;
		let owner = ctx.signed_key_owner().await?;
		if !authorizer.authorize(ctx, handle, key, owner).await? {
			return Ok(registry.unauthorized().respond(ctx.parts()).await);
		}
	}

	Ok(document.into_response())
}

/// normalize dispatcher items down to objects, links and bare urls
///
/// anything else is reduced to its id, or dropped when it has none; the
/// predicate then gets the final say, warning once per response when it
/// actually rejects something
fn project(
	name: &str,
	items: Vec<serde_json::Value>,
	predicate: Option<&ItemPredicate>,
) -> Vec<serde_json::Value> {
	let mut out = Vec::with_capacity(items.len());
	let mut warned = false;
	for item in items {
		let Some(item) = project_item(item) else { continue };
		if let Some(predicate) = predicate {
			if !predicate(&item) {
				if !warned {
					tracing::warn!(
						"collection '{name}' apparently does not implement filtering; this may result in a large payload"
					);
					warned = true;
				}
				continue;
			}
		}
		out.push(item);
	}
	out
}

fn project_item(item: serde_json::Value) -> Option<serde_json::Value> {
	if item.is_string() {
		return Some(item);
	}
	match item.base_type() {
		Ok(_) => Some(item),
		Err(_) => match item.id() {
			Ok(id) => Some(serde_json::Value::String(id.to_string())),
			Err(_) => None,
		},
	}
}
