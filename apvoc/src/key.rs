// not part of ActivityStreams proper but every federated server exchanges these

use crate::{getter, Field};

pub trait PublicKey: crate::Base {
	fn owner(&self) -> Field<&str>;
	fn public_key_pem(&self) -> Field<&str>;
}

impl PublicKey for serde_json::Value {
	getter! { owner -> &str }
	getter! { public_key_pem::publicKeyPem -> &str }
}

#[cfg(test)]
mod test {
	use super::PublicKey;

	#[test]
	fn keys_expose_owner_and_pem() {
		let key = serde_json::json!({
			"id": "https://example.net/actors/mara#main-key",
			"owner": "https://example.net/actors/mara",
			"publicKeyPem": "-----BEGIN PUBLIC KEY-----",
		});
		assert_eq!(key.owner().unwrap(), "https://example.net/actors/mara");
		assert!(key.public_key_pem().unwrap().starts_with("-----BEGIN"));
		assert!(serde_json::json!({}).owner().is_err());
	}
}
