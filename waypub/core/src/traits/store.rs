use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::BoxError;

/// ordered string segments identifying one stored value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KvKey(Vec<String>);

impl KvKey {
	pub fn new(segments: Vec<String>) -> Self {
		Self(segments)
	}

	/// extend this key with one more segment
	pub fn join(mut self, segment: impl Into<String>) -> Self {
		self.0.push(segment.into());
		self
	}

	pub fn segments(&self) -> &[String] {
		&self.0
	}
}

impl From<Vec<String>> for KvKey {
	fn from(segments: Vec<String>) -> Self {
		Self(segments)
	}
}

impl std::fmt::Display for KvKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0.join("::"))
	}
}

/// key-value storage the framework records its own state into
///
/// implementations must provide read-after-write on the same key
#[async_trait::async_trait]
pub trait KvStore: Send + Sync {
	async fn get(&self, key: &KvKey) -> Result<Option<serde_json::Value>, BoxError>;
	async fn set(&self, key: &KvKey, value: serde_json::Value, ttl: Option<Duration>) -> Result<(), BoxError>;
}

/// process-local store, enough for tests and single node deployments
#[derive(Default)]
pub struct MemoryStore {
	entries: RwLock<HashMap<KvKey, (serde_json::Value, Option<Instant>)>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub async fn contains(&self, key: &KvKey) -> bool {
		self.get(key).await.ok().flatten().is_some()
	}

	/// when the value at `key` lapses, if ever
	pub async fn expiry(&self, key: &KvKey) -> Option<Instant> {
		self.entries.read().await.get(key).and_then(|(_, deadline)| *deadline)
	}
}

#[async_trait::async_trait]
impl KvStore for MemoryStore {
	async fn get(&self, key: &KvKey) -> Result<Option<serde_json::Value>, BoxError> {
		match self.entries.read().await.get(key) {
			None => Ok(None),
			Some((_, Some(deadline))) if *deadline <= Instant::now() => Ok(None),
			Some((value, _)) => Ok(Some(value.clone())),
		}
	}

	async fn set(&self, key: &KvKey, value: serde_json::Value, ttl: Option<Duration>) -> Result<(), BoxError> {
		let deadline = ttl.map(|x| Instant::now() + x);
		self.entries.write().await.insert(key.clone(), (value, deadline));
		Ok(())
	}
}
