pub const CONTEXT_ACTIVITY_STREAMS: &str = "https://www.w3.org/ns/activitystreams";
pub const CONTEXT_SECURITY: &str = "https://w3id.org/security/v1";

pub const CONTENT_TYPE_ACTIVITY_JSON: &str = "application/activity+json";

/// media types which mean "give me ActivityStreams", parameters ignored
pub fn is_activity_pub_content_type(value: &str) -> bool {
	matches!(
		value.split(';').next().unwrap_or_default().trim(),
		"application/activity+json" | "application/ld+json" | "application/json"
	)
}

pub trait LD {
	fn ld_context(self) -> Self;
}

impl LD for serde_json::Value {
	fn ld_context(mut self) -> Self {
		if let Some(obj) = self.as_object_mut() {
			obj.insert(
				"@context".to_string(),
				serde_json::Value::Array(vec![
					serde_json::Value::String(CONTEXT_ACTIVITY_STREAMS.into()),
					serde_json::Value::String(CONTEXT_SECURITY.into()),
				]),
			);
		} else {
			tracing::warn!("cannot add @context to json value different than object");
		}
		self
	}
}
