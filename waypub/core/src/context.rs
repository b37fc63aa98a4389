use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use tokio::sync::OnceCell;
use url::Url;

use crate::config::Config;
use crate::registry::Registry;
use crate::traits::{DocumentLoader, KvStore, ProofVerifier, SignatureVerifier};
use crate::BoxError;

/// shared server state: configuration, the callback registry and the
/// external collaborators, behind one cheap-to-clone handle
pub struct Context<T>(Arc<ContextInner<T>>);

struct ContextInner<T> {
	config: Config,
	registry: Registry<T>,
	store: Arc<dyn KvStore>,
	signatures: Arc<dyn SignatureVerifier>,
	proofs: Option<Arc<dyn ProofVerifier>>,
	loader: Arc<dyn DocumentLoader>,
	data: T,
	domain: String,
	protocol: String,
	base_url: String,
}

impl<T> Clone for Context<T> {
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}

impl<T> Context<T> {
	pub fn new(
		config: Config,
		registry: Registry<T>,
		store: Arc<dyn KvStore>,
		signatures: Arc<dyn SignatureVerifier>,
		proofs: Option<Arc<dyn ProofVerifier>>,
		loader: Arc<dyn DocumentLoader>,
		data: T,
	) -> Self {
		let mut domain = config.instance.domain.clone();
		let protocol = if domain.starts_with("http://")
		{ "http://" } else { "https://" }.to_string();
		if domain.ends_with('/') {
			domain.replace_range(domain.len() - 1.., "");
		}
		if domain.starts_with("http") {
			domain = domain.replace("https://", "").replace("http://", "");
		}
		let base_url = format!("{protocol}{domain}");

		Self(Arc::new(ContextInner {
			config, registry, store, signatures, proofs, loader, data, domain, protocol, base_url,
		}))
	}

	pub fn cfg(&self) -> &Config {
		&self.0.config
	}

	pub fn registry(&self) -> &Registry<T> {
		&self.0.registry
	}

	pub fn store(&self) -> &dyn KvStore {
		self.0.store.as_ref()
	}

	pub fn signatures(&self) -> &dyn SignatureVerifier {
		self.0.signatures.as_ref()
	}

	pub fn proofs(&self) -> Option<&dyn ProofVerifier> {
		self.0.proofs.as_deref()
	}

	pub fn loader(&self) -> &dyn DocumentLoader {
		self.0.loader.as_ref()
	}

	pub fn data(&self) -> &T {
		&self.0.data
	}

	pub fn domain(&self) -> &str {
		&self.0.domain
	}

	pub fn protocol(&self) -> &str {
		&self.0.protocol
	}

	pub fn base(&self) -> &str {
		&self.0.base_url
	}

	/// bind this context to one incoming request
	///
	/// the body must already be captured in full: signature verification and
	/// json parsing both need to read it
	pub fn request(&self, parts: Parts, body: Bytes) -> Result<RequestContext<T>, url::ParseError> {
		let url = match parts.uri.scheme() {
			Some(_) => Url::parse(&parts.uri.to_string())?,
			None => {
				let path = parts.uri.path_and_query().map(|x| x.as_str()).unwrap_or("/");
				Url::parse(&format!("{}{}", self.base(), path))?
			},
		};
		Ok(RequestContext {
			ctx: self.clone(),
			url,
			parts,
			body,
			signed_key: OnceCell::new(),
			key_owner: OnceCell::new(),
		})
	}
}

/// one request bound to the server [`Context`], carrying the absolute url,
/// the captured body and the lazily verified signature state
pub struct RequestContext<T> {
	ctx: Context<T>,
	url: Url,
	parts: Parts,
	body: Bytes,
	signed_key: OnceCell<Option<serde_json::Value>>,
	key_owner: OnceCell<Option<serde_json::Value>>,
}

impl<T> std::ops::Deref for RequestContext<T> {
	type Target = Context<T>;

	fn deref(&self) -> &Self::Target {
		&self.ctx
	}
}

impl<T> RequestContext<T> {
	pub fn url(&self) -> &Url {
		&self.url
	}

	pub fn parts(&self) -> &Parts {
		&self.parts
	}

	pub fn headers(&self) -> &HeaderMap {
		&self.parts.headers
	}

	pub fn body(&self) -> &[u8] {
		&self.body
	}

	/// the key which signed this request, verified at most once per request
	/// no matter how many callbacks ask for it
	pub async fn signed_key(&self) -> Result<Option<&serde_json::Value>, BoxError> {
		let window = Duration::from_secs(self.ctx.cfg().security.signature_window_seconds);
		let key = self.signed_key
			.get_or_try_init(|| async {
				self.ctx.signatures().verify_request(&self.parts, &self.body, window).await
			})
			.await?;
		Ok(key.as_ref())
	}

	/// the actor owning the signing key, resolved at most once per request
	pub async fn signed_key_owner(&self) -> Result<Option<&serde_json::Value>, BoxError> {
		let owner = self.key_owner
			.get_or_try_init(|| async {
				match self.signed_key().await? {
					None => Ok(None),
					Some(key) => self.ctx.signatures().key_owner(key).await,
				}
			})
			.await?;
		Ok(owner.as_ref())
	}
}
