use std::time::Duration;

use axum::http::request::Parts;

use crate::traits::DocumentLoader;
use crate::BoxError;

/// the http signature primitives, supplied by the embedding server
///
/// the framework decides *when* requests get verified and what a failed check
/// means for the response; the cryptography itself lives behind this trait
#[async_trait::async_trait]
pub trait SignatureVerifier: Send + Sync {
	/// check the signature on a request, returning the signing key document
	/// when valid and within the allowed clock skew, `None` otherwise
	async fn verify_request(
		&self,
		parts: &Parts,
		body: &[u8],
		window: Duration,
	) -> Result<Option<serde_json::Value>, BoxError>;

	/// resolve the actor document a key belongs to, if any
	async fn key_owner(
		&self,
		key: &serde_json::Value,
	) -> Result<Option<serde_json::Value>, BoxError>;

	/// whether the actor an activity declares really controls `key`
	async fn actor_owns_key(
		&self,
		activity: &serde_json::Value,
		key: &serde_json::Value,
		loader: &dyn DocumentLoader,
	) -> Result<bool, BoxError>;
}
