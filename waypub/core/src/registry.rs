use std::collections::HashMap;
use std::sync::Arc;

use apvoc::ActivityType;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::context::RequestContext;
use crate::BoxError;

/// one slice of a collection, as produced by a collection dispatcher
pub struct Page {
	pub items: Vec<serde_json::Value>,
	pub prev_cursor: Option<String>,
	pub next_cursor: Option<String>,
}

/// produces the actor document for a local handle, `None` when unknown
#[async_trait::async_trait]
pub trait ActorDispatcher<T>: Send + Sync {
	async fn dispatch(
		&self,
		ctx: &RequestContext<T>,
		handle: &str,
	) -> Result<Option<serde_json::Value>, BoxError>;
}

/// produces an object document for the route parameters it was mounted on
#[async_trait::async_trait]
pub trait ObjectDispatcher<T>: Send + Sync {
	async fn dispatch(
		&self,
		ctx: &RequestContext<T>,
		params: &HashMap<String, String>,
	) -> Result<Option<serde_json::Value>, BoxError>;
}

/// produces one page of a collection, `None` when the collection is unknown
#[async_trait::async_trait]
pub trait CollectionDispatcher<T>: Send + Sync {
	async fn dispatch(
		&self,
		ctx: &RequestContext<T>,
		handle: &str,
		cursor: Option<&str>,
		filter: Option<&serde_json::Value>,
	) -> Result<Option<Page>, BoxError>;
}

/// counts the items of a collection, `None` when counting is unsupported
#[async_trait::async_trait]
pub trait CollectionCounter<T>: Send + Sync {
	async fn count(
		&self,
		ctx: &RequestContext<T>,
		handle: &str,
	) -> Result<Option<u64>, BoxError>;
}

/// yields an edge cursor (first or last) of a collection
#[async_trait::async_trait]
pub trait CursorProducer<T>: Send + Sync {
	async fn cursor(
		&self,
		ctx: &RequestContext<T>,
		handle: &str,
	) -> Result<Option<String>, BoxError>;
}

/// decides whether a request may read a handle-scoped resource
///
/// `key` and `owner` are the verified signing key and its actor, both `None`
/// on unsigned requests
#[async_trait::async_trait]
pub trait Authorizer<T>: Send + Sync {
	async fn authorize(
		&self,
		ctx: &RequestContext<T>,
		handle: &str,
		key: Option<&serde_json::Value>,
		owner: Option<&serde_json::Value>,
	) -> Result<bool, BoxError>;
}

/// same as [`Authorizer`] but scoped on object route parameters
#[async_trait::async_trait]
pub trait ObjectAuthorizer<T>: Send + Sync {
	async fn authorize(
		&self,
		ctx: &RequestContext<T>,
		params: &HashMap<String, String>,
		key: Option<&serde_json::Value>,
		owner: Option<&serde_json::Value>,
	) -> Result<bool, BoxError>;
}

/// receives verified activities delivered to an inbox
#[async_trait::async_trait]
pub trait InboxListener<T>: Send + Sync {
	async fn handle(
		&self,
		ctx: &RequestContext<T>,
		activity: serde_json::Value,
	) -> Result<(), BoxError>;
}

/// notified of failures inside the inbox pipeline, must not fail itself
#[async_trait::async_trait]
pub trait ErrorHandler<T>: Send + Sync {
	async fn handle(&self, ctx: &RequestContext<T>, error: &(dyn std::error::Error + Send + Sync + 'static));
}

/// builds the response returned when a resource is missing, not negotiable
/// or not authorized; whatever this produces is returned verbatim
#[async_trait::async_trait]
pub trait Fallback: Send + Sync {
	async fn respond(&self, parts: &Parts) -> Response;
}

struct StatusFallback(StatusCode);

#[async_trait::async_trait]
impl Fallback for StatusFallback {
	async fn respond(&self, _parts: &Parts) -> Response {
		self.0.into_response()
	}
}

/// callbacks backing one named collection endpoint
pub struct CollectionCallbacks<T> {
	dispatcher: Arc<dyn CollectionDispatcher<T>>,
	counter: Option<Arc<dyn CollectionCounter<T>>>,
	first_cursor: Option<Arc<dyn CursorProducer<T>>>,
	last_cursor: Option<Arc<dyn CursorProducer<T>>>,
	authorizer: Option<Arc<dyn Authorizer<T>>>,
}

impl<T> CollectionCallbacks<T> {
	pub fn new(dispatcher: impl CollectionDispatcher<T> + 'static) -> Self {
		Self {
			dispatcher: Arc::new(dispatcher),
			counter: None,
			first_cursor: None,
			last_cursor: None,
			authorizer: None,
		}
	}

	pub fn with_counter(mut self, counter: impl CollectionCounter<T> + 'static) -> Self {
		self.counter = Some(Arc::new(counter));
		self
	}

	pub fn with_first_cursor(mut self, producer: impl CursorProducer<T> + 'static) -> Self {
		self.first_cursor = Some(Arc::new(producer));
		self
	}

	pub fn with_last_cursor(mut self, producer: impl CursorProducer<T> + 'static) -> Self {
		self.last_cursor = Some(Arc::new(producer));
		self
	}

	pub fn with_authorizer(mut self, authorizer: impl Authorizer<T> + 'static) -> Self {
		self.authorizer = Some(Arc::new(authorizer));
		self
	}

	pub fn dispatcher(&self) -> &dyn CollectionDispatcher<T> {
		self.dispatcher.as_ref()
	}

	pub fn counter(&self) -> Option<&dyn CollectionCounter<T>> {
		self.counter.as_deref()
	}

	pub fn first_cursor(&self) -> Option<&dyn CursorProducer<T>> {
		self.first_cursor.as_deref()
	}

	pub fn last_cursor(&self) -> Option<&dyn CursorProducer<T>> {
		self.last_cursor.as_deref()
	}

	pub fn authorizer(&self) -> Option<&dyn Authorizer<T>> {
		self.authorizer.as_deref()
	}
}

/// every callback the framework dispatches through, assembled once before
/// serving and only borrowed afterwards
pub struct Registry<T> {
	actor: Option<Arc<dyn ActorDispatcher<T>>>,
	actor_authorizer: Option<Arc<dyn Authorizer<T>>>,
	object: Option<Arc<dyn ObjectDispatcher<T>>>,
	object_authorizer: Option<Arc<dyn ObjectAuthorizer<T>>>,
	collections: HashMap<String, CollectionCallbacks<T>>,
	listeners: HashMap<ActivityType, Arc<dyn InboxListener<T>>>,
	on_error: Option<Arc<dyn ErrorHandler<T>>>,
	not_found: Arc<dyn Fallback>,
	not_acceptable: Arc<dyn Fallback>,
	unauthorized: Arc<dyn Fallback>,
}

impl<T> Default for Registry<T> {
	fn default() -> Self {
		Self {
			actor: None,
			actor_authorizer: None,
			object: None,
			object_authorizer: None,
			collections: HashMap::new(),
			listeners: HashMap::new(),
			on_error: None,
			not_found: Arc::new(StatusFallback(StatusCode::NOT_FOUND)),
			not_acceptable: Arc::new(StatusFallback(StatusCode::NOT_ACCEPTABLE)),
			unauthorized: Arc::new(StatusFallback(StatusCode::UNAUTHORIZED)),
		}
	}
}

impl<T> Registry<T> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_actor_dispatcher(mut self, dispatcher: impl ActorDispatcher<T> + 'static) -> Self {
		self.actor = Some(Arc::new(dispatcher));
		self
	}

	pub fn with_actor_authorizer(mut self, authorizer: impl Authorizer<T> + 'static) -> Self {
		self.actor_authorizer = Some(Arc::new(authorizer));
		self
	}

	pub fn with_object_dispatcher(mut self, dispatcher: impl ObjectDispatcher<T> + 'static) -> Self {
		self.object = Some(Arc::new(dispatcher));
		self
	}

	pub fn with_object_authorizer(mut self, authorizer: impl ObjectAuthorizer<T> + 'static) -> Self {
		self.object_authorizer = Some(Arc::new(authorizer));
		self
	}

	pub fn with_collection(mut self, name: impl Into<String>, callbacks: CollectionCallbacks<T>) -> Self {
		self.collections.insert(name.into(), callbacks);
		self
	}

	pub fn with_listener(mut self, kind: ActivityType, listener: impl InboxListener<T> + 'static) -> Self {
		self.listeners.insert(kind, Arc::new(listener));
		self
	}

	pub fn with_error_handler(mut self, handler: impl ErrorHandler<T> + 'static) -> Self {
		self.on_error = Some(Arc::new(handler));
		self
	}

	pub fn with_not_found(mut self, fallback: impl Fallback + 'static) -> Self {
		self.not_found = Arc::new(fallback);
		self
	}

	pub fn with_not_acceptable(mut self, fallback: impl Fallback + 'static) -> Self {
		self.not_acceptable = Arc::new(fallback);
		self
	}

	pub fn with_unauthorized(mut self, fallback: impl Fallback + 'static) -> Self {
		self.unauthorized = Arc::new(fallback);
		self
	}

	pub fn actor_dispatcher(&self) -> Option<&dyn ActorDispatcher<T>> {
		self.actor.as_deref()
	}

	pub fn actor_authorizer(&self) -> Option<&dyn Authorizer<T>> {
		self.actor_authorizer.as_deref()
	}

	pub fn object_dispatcher(&self) -> Option<&dyn ObjectDispatcher<T>> {
		self.object.as_deref()
	}

	pub fn object_authorizer(&self) -> Option<&dyn ObjectAuthorizer<T>> {
		self.object_authorizer.as_deref()
	}

	pub fn collection(&self, name: &str) -> Option<&CollectionCallbacks<T>> {
		self.collections.get(name)
	}

	/// nearest listener along the class chain of `kind`, most specific first
	pub fn listener_for(&self, kind: ActivityType) -> Option<&dyn InboxListener<T>> {
		let mut probe = Some(kind);
		while let Some(x) = probe {
			if let Some(listener) = self.listeners.get(&x) {
				return Some(listener.as_ref());
			}
			probe = x.parent();
		}
		None
	}

	pub fn error_handler(&self) -> Option<&dyn ErrorHandler<T>> {
		self.on_error.as_deref()
	}

	pub fn not_found(&self) -> &dyn Fallback {
		self.not_found.as_ref()
	}

	pub fn not_acceptable(&self) -> &dyn Fallback {
		self.not_acceptable.as_ref()
	}

	pub fn unauthorized(&self) -> &dyn Fallback {
		self.unauthorized.as_ref()
	}
}
