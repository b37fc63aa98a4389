use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Bytes;
use axum::http::request::Parts;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};

use waypub::registry::{
	ActorDispatcher, Authorizer, CollectionCounter, CollectionDispatcher, CursorProducer,
	ErrorHandler, Fallback, InboxListener, ObjectDispatcher,
};
use waypub::traits::{DocumentLoader, KvKey, MemoryStore, ProofVerifier, SignatureVerifier, StaticLoader};
use waypub::{BoxError, CollectionCallbacks, Config, Context, Page, Registry, RequestContext};

pub struct StaticActors;

#[async_trait::async_trait]
impl ActorDispatcher<()> for StaticActors {
	async fn dispatch(&self, ctx: &RequestContext<()>, handle: &str) -> Result<Option<Value>, BoxError> {
		Ok(match handle {
			"mara" => Some(json!({
				"id": format!("{}/actors/mara", ctx.base()),
				"type": "Person",
				"preferredUsername": "mara",
			})),
			_ => None,
		})
	}
}

pub struct StaticObjects;

#[async_trait::async_trait]
impl ObjectDispatcher<()> for StaticObjects {
	async fn dispatch(&self, ctx: &RequestContext<()>, params: &HashMap<String, String>) -> Result<Option<Value>, BoxError> {
		Ok(match params.get("id").map(String::as_str) {
			Some("n1") => Some(json!({
				"id": format!("{}/objects/n1", ctx.base()),
				"type": "Note",
				"content": "hello",
			})),
			_ => None,
		})
	}
}

/// cursored collection: one known page at "p5", edges at "c0".."c9"
pub struct OutboxPages;

#[async_trait::async_trait]
impl CollectionDispatcher<()> for OutboxPages {
	async fn dispatch(
		&self,
		_ctx: &RequestContext<()>,
		_handle: &str,
		cursor: Option<&str>,
		_filter: Option<&Value>,
	) -> Result<Option<Page>, BoxError> {
		Ok(match cursor {
			Some("p5") => Some(Page {
				items: vec![json!("https://e/u1")],
				prev_cursor: Some("p4".to_string()),
				next_cursor: Some("p6".to_string()),
			}),
			_ => Some(Page { items: vec![], prev_cursor: None, next_cursor: None }),
		})
	}
}

pub struct FixedCursor(pub &'static str);

#[async_trait::async_trait]
impl CursorProducer<()> for FixedCursor {
	async fn cursor(&self, _ctx: &RequestContext<()>, _handle: &str) -> Result<Option<String>, BoxError> {
		Ok(Some(self.0.to_string()))
	}
}

pub struct OutboxCount;

#[async_trait::async_trait]
impl CollectionCounter<()> for OutboxCount {
	async fn count(&self, _ctx: &RequestContext<()>, _handle: &str) -> Result<Option<u64>, BoxError> {
		Ok(Some(42))
	}
}

/// uncursored collection, always served inline
pub struct FollowerList;

#[async_trait::async_trait]
impl CollectionDispatcher<()> for FollowerList {
	async fn dispatch(
		&self,
		_ctx: &RequestContext<()>,
		_handle: &str,
		_cursor: Option<&str>,
		_filter: Option<&Value>,
	) -> Result<Option<Page>, BoxError> {
		Ok(Some(Page {
			items: vec![
				json!("https://e/f1"),
				json!({"type": "Person", "id": "https://e/f2"}),
			],
			prev_cursor: None,
			next_cursor: None,
		}))
	}
}

#[derive(Default)]
pub struct CountingListener {
	pub calls: AtomicUsize,
	pub fail: bool,
}

#[async_trait::async_trait]
impl InboxListener<()> for Arc<CountingListener> {
	async fn handle(&self, _ctx: &RequestContext<()>, _activity: Value) -> Result<(), BoxError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if self.fail {
			return Err("listener exploded".into());
		}
		Ok(())
	}
}

#[derive(Default)]
pub struct RecordingErrors {
	pub calls: AtomicUsize,
}

#[async_trait::async_trait]
impl ErrorHandler<()> for Arc<RecordingErrors> {
	async fn handle(&self, _ctx: &RequestContext<()>, _error: &(dyn std::error::Error + Send + Sync + 'static)) {
		self.calls.fetch_add(1, Ordering::SeqCst);
	}
}

/// denies everything, for fallback precedence checks
pub struct Deny;

#[async_trait::async_trait]
impl Authorizer<()> for Deny {
	async fn authorize(
		&self,
		_ctx: &RequestContext<()>,
		_handle: &str,
		_key: Option<&Value>,
		_owner: Option<&Value>,
	) -> Result<bool, BoxError> {
		Ok(false)
	}
}

/// admits exactly the requests carrying a verified signature
pub struct AllowSigned;

#[async_trait::async_trait]
impl Authorizer<()> for AllowSigned {
	async fn authorize(
		&self,
		_ctx: &RequestContext<()>,
		_handle: &str,
		key: Option<&Value>,
		owner: Option<&Value>,
	) -> Result<bool, BoxError> {
		Ok(key.is_some() && owner.is_some())
	}
}

pub struct Teapot;

#[async_trait::async_trait]
impl Fallback for Teapot {
	async fn respond(&self, _parts: &Parts) -> Response {
		(StatusCode::IM_A_TEAPOT, "no").into_response()
	}
}

pub struct TestSigner {
	pub key: Option<Value>,
	pub owns: bool,
}

impl TestSigner {
	pub fn valid() -> Self {
		Self {
			key: Some(json!({
				"id": "https://e/@bob#main-key",
				"owner": "https://e/@bob",
			})),
			owns: true,
		}
	}

	pub fn absent() -> Self {
		Self { key: None, owns: false }
	}

	pub fn foreign() -> Self {
		Self { key: Some(json!({"id": "https://e/@eve#main-key", "owner": "https://e/@eve"})), owns: false }
	}
}

#[async_trait::async_trait]
impl SignatureVerifier for TestSigner {
	async fn verify_request(
		&self,
		_parts: &Parts,
		_body: &[u8],
		_window: std::time::Duration,
	) -> Result<Option<Value>, BoxError> {
		Ok(self.key.clone())
	}

	async fn key_owner(&self, key: &Value) -> Result<Option<Value>, BoxError> {
		Ok(key.get("owner").map(|owner| json!({"id": owner, "type": "Person"})))
	}

	async fn actor_owns_key(
		&self,
		_activity: &Value,
		_key: &Value,
		_loader: &dyn DocumentLoader,
	) -> Result<bool, BoxError> {
		Ok(self.owns)
	}
}

pub struct StaticProofs {
	activity: Option<Value>,
	fail: bool,
}

impl StaticProofs {
	pub fn verified(activity: Value) -> Self {
		Self { activity: Some(activity), fail: false }
	}

	pub fn none() -> Self {
		Self { activity: None, fail: false }
	}

	pub fn failing() -> Self {
		Self { activity: None, fail: true }
	}
}

#[async_trait::async_trait]
impl ProofVerifier for StaticProofs {
	async fn verify_activity(
		&self,
		_document: &Value,
		_loader: &dyn DocumentLoader,
	) -> Result<Option<Value>, BoxError> {
		if self.fail {
			return Err("proof does not verify".into());
		}
		Ok(self.activity.clone())
	}
}

pub struct Fixture {
	pub ctx: Context<()>,
	pub store: Arc<MemoryStore>,
	pub listener: Arc<CountingListener>,
	pub errors: Arc<RecordingErrors>,
}

fn standard_registry(listener: Arc<CountingListener>, errors: Arc<RecordingErrors>) -> Registry<()> {
	Registry::new()
		.with_actor_dispatcher(StaticActors)
		.with_object_dispatcher(StaticObjects)
		.with_collection(
			"outbox",
			CollectionCallbacks::new(OutboxPages)
				.with_counter(OutboxCount)
				.with_first_cursor(FixedCursor("c0"))
				.with_last_cursor(FixedCursor("c9")),
		)
		.with_collection("followers", CollectionCallbacks::new(FollowerList))
		.with_listener(apvoc::ActivityType::Activity, listener)
		.with_error_handler(errors)
}

fn assemble(registry: Registry<()>, signer: TestSigner, proofs: Option<StaticProofs>, listener: Arc<CountingListener>, errors: Arc<RecordingErrors>) -> Fixture {
	let store = Arc::new(MemoryStore::new());
	let mut config = Config::default();
	config.instance.domain = "social.example".to_string();
	let ctx = Context::new(
		config,
		registry,
		store.clone(),
		Arc::new(signer),
		proofs.map(|p| Arc::new(p) as Arc<dyn ProofVerifier>),
		Arc::new(StaticLoader::new()),
		(),
	);
	Fixture { ctx, store, listener, errors }
}

fn standard(signer: TestSigner, proofs: Option<StaticProofs>, failing_listener: bool) -> Fixture {
	let listener = Arc::new(CountingListener { calls: AtomicUsize::new(0), fail: failing_listener });
	let errors = Arc::new(RecordingErrors::default());
	let registry = standard_registry(listener.clone(), errors.clone());
	assemble(registry, signer, proofs, listener, errors)
}

/// registered dispatchers, valid signature, no proof verifier
pub fn fixture() -> Fixture {
	standard(TestSigner::valid(), None, false)
}

/// nothing registered at all
pub fn fixture_bare() -> Fixture {
	let listener = Arc::new(CountingListener::default());
	let errors = Arc::new(RecordingErrors::default());
	assemble(Registry::new(), TestSigner::valid(), None, listener, errors)
}

/// caller-assembled registry, valid signature
pub fn fixture_custom(registry: Registry<()>) -> Fixture {
	let listener = Arc::new(CountingListener::default());
	let errors = Arc::new(RecordingErrors::default());
	assemble(registry, TestSigner::valid(), None, listener, errors)
}

/// caller-assembled registry, nothing signed
pub fn fixture_custom_unsigned(registry: Registry<()>) -> Fixture {
	let listener = Arc::new(CountingListener::default());
	let errors = Arc::new(RecordingErrors::default());
	assemble(registry, TestSigner::absent(), None, listener, errors)
}

pub fn fixture_unsigned() -> Fixture {
	standard(TestSigner::absent(), None, false)
}

pub fn fixture_mismatched() -> Fixture {
	standard(TestSigner::foreign(), None, false)
}

pub fn fixture_failing_listener() -> Fixture {
	standard(TestSigner::valid(), None, true)
}

pub fn fixture_proofed(proofs: StaticProofs) -> Fixture {
	// the signature backend vouches for nobody here, the proof must carry it
	standard(TestSigner::foreign(), Some(proofs), false)
}

pub fn fixture_proofed_signed(proofs: StaticProofs) -> Fixture {
	standard(TestSigner::valid(), Some(proofs), false)
}

pub fn get_context(ctx: &Context<()>, path: &str, accept: Option<&str>) -> RequestContext<()> {
	let mut builder = Request::builder().uri(path);
	if let Some(accept) = accept {
		builder = builder.header("Accept", accept);
	}
	let (parts, _) = builder.body(()).unwrap().into_parts();
	ctx.request(parts, Bytes::new()).unwrap()
}

pub fn post_context(ctx: &Context<()>, path: &str, body: &str) -> RequestContext<()> {
	let (parts, _) = Request::builder()
		.method("POST")
		.uri(path)
		.header("Content-Type", "application/activity+json")
		.body(())
		.unwrap()
		.into_parts();
	ctx.request(parts, Bytes::from(body.to_string())).unwrap()
}

pub fn seen_key(ctx: &Context<()>, id: &str) -> KvKey {
	KvKey::new(ctx.cfg().inbox.idempotence_prefix.clone()).join(id)
}

pub async fn body_string(res: Response) -> String {
	let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
	String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(res: Response) -> Value {
	serde_json::from_str(&body_string(res).await).unwrap()
}
