use crate::traits::DocumentLoader;
use crate::BoxError;

/// linked-data proof verification for activities carrying an embedded signature
#[async_trait::async_trait]
pub trait ProofVerifier: Send + Sync {
	/// verify the proof embedded in `document`, returning the verified
	/// activity, `Ok(None)` when no usable proof is present, or an error
	/// when the document is malformed
	async fn verify_activity(
		&self,
		document: &serde_json::Value,
		loader: &dyn DocumentLoader,
	) -> Result<Option<serde_json::Value>, BoxError>;
}
