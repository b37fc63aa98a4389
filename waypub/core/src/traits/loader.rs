use std::collections::HashMap;

use crate::BoxError;

/// resolves remote json-ld documents by url
///
/// proof verification and key ownership checks go through this, so deployments
/// can cache contexts and keys however they like
#[async_trait::async_trait]
pub trait DocumentLoader: Send + Sync {
	async fn load(&self, url: &str) -> Result<serde_json::Value, BoxError>;
}

/// serves only preloaded documents, never touching the network
#[derive(Default)]
pub struct StaticLoader {
	documents: HashMap<String, serde_json::Value>,
}

impl StaticLoader {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_document(mut self, url: impl Into<String>, document: serde_json::Value) -> Self {
		self.documents.insert(url.into(), document);
		self
	}
}

#[async_trait::async_trait]
impl DocumentLoader for StaticLoader {
	async fn load(&self, url: &str) -> Result<serde_json::Value, BoxError> {
		self.documents
			.get(url)
			.cloned()
			.ok_or_else(|| format!("document '{url}' is not preloaded").into())
	}
}
