use apvoc::{BaseMut, CollectionMut, CollectionPageMut, Node, LD};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use url::Url;

use crate::negotiate;

// got this from https://github.com/kitsune-soc/kitsune/blob/b023a12b687dd9a274233a5a9950f2de5e192344/kitsune/src/http/responder.rs
// i was trying to do it with middlewares but this is way cleaner
pub struct JsonLD<T>(pub T);
impl<T: serde::Serialize> IntoResponse for JsonLD<T> {
	fn into_response(self) -> Response {
		(
			[
				(header::CONTENT_TYPE, apvoc::jsonld::CONTENT_TYPE_ACTIVITY_JSON),
				(header::VARY, "Accept"),
			],
			axum::Json(self.0),
		).into_response()
	}
}

/// collection summary pointing at its edge pages, items never embedded
pub fn collection_summary(
	url: &Url,
	total_items: Option<u64>,
	first_cursor: &str,
	last_cursor: Option<&str>,
) -> JsonLD<serde_json::Value> {
	JsonLD(
		apvoc::new()
			.set_id(Some(url.as_str()))
			.set_collection_type(Some(apvoc::CollectionType::OrderedCollection))
			.set_total_items(total_items)
			.set_first(Node::link(with_cursor(url, first_cursor).to_string()))
			.set_last(Node::maybe_link(last_cursor.map(|x| with_cursor(url, x).to_string())))
			.ld_context()
	)
}

/// the degenerate summary for collections that do not paginate: everything inline
pub fn collection_inline(
	url: &Url,
	total_items: Option<u64>,
	items: Vec<serde_json::Value>,
) -> JsonLD<serde_json::Value> {
	JsonLD(
		apvoc::new()
			.set_id(Some(url.as_str()))
			.set_collection_type(Some(apvoc::CollectionType::OrderedCollection))
			.set_total_items(total_items)
			.set_ordered_items(Node::array(items))
			.ld_context()
	)
}

/// one page of a collection, navigation derived from the request url
pub fn collection_page(
	url: &Url,
	items: Vec<serde_json::Value>,
	prev_cursor: Option<&str>,
	next_cursor: Option<&str>,
) -> JsonLD<serde_json::Value> {
	JsonLD(
		apvoc::new()
			.set_id(Some(url.as_str()))
			.set_collection_type(Some(apvoc::CollectionType::OrderedCollectionPage))
			.set_part_of(Node::link(without_cursor(url).to_string()))
			.set_prev(Node::maybe_link(prev_cursor.map(|x| with_cursor(url, x).to_string())))
			.set_next(Node::maybe_link(next_cursor.map(|x| with_cursor(url, x).to_string())))
			.set_ordered_items(Node::array(items))
			.ld_context()
	)
}

/// emit a prebuilt document as ActivityStreams, no content negotiation
pub fn object_response(object: serde_json::Value) -> Response {
	(
		[(header::CONTENT_TYPE, apvoc::jsonld::CONTENT_TYPE_ACTIVITY_JSON)],
		axum::Json(object.ld_context()),
	).into_response()
}

/// emit a prebuilt document only if the client negotiates for it;
/// `None` means the caller should produce its own (html) response instead
pub fn object_response_if_acceptable(
	headers: &HeaderMap,
	object: serde_json::Value,
) -> Option<Response> {
	if !negotiate::accepts_json_ld(headers) {
		return None;
	}
	let mut response = object_response(object);
	response.headers_mut().insert(header::VARY, HeaderValue::from_static("Accept"));
	Some(response)
}

/// request url with `cursor` replaced, other query parameters untouched
pub(crate) fn with_cursor(url: &Url, cursor: &str) -> Url {
	let mut out = without_cursor(url);
	out.query_pairs_mut().append_pair("cursor", cursor);
	out
}

/// request url with the `cursor` query parameter dropped
pub(crate) fn without_cursor(url: &Url) -> Url {
	let remaining: Vec<(String, String)> = url
		.query_pairs()
		.filter(|(k, _)| k != "cursor")
		.map(|(k, v)| (k.into_owned(), v.into_owned()))
		.collect();
	let mut out = url.clone();
	out.set_query(None);
	if !remaining.is_empty() {
		let mut query = out.query_pairs_mut();
		for (k, v) in remaining {
			query.append_pair(&k, &v);
		}
	}
	out
}
