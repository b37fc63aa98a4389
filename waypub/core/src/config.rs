#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct Config {
	#[serde(default)]
	pub instance: InstanceConfig,

	#[serde(default)]
	pub security: SecurityConfig,

	#[serde(default)]
	pub inbox: InboxConfig,
}

#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct InstanceConfig {
	#[serde_inline_default("waypub".into())]
	pub name: String,

	#[serde_inline_default("federated service built on waypub".into())]
	pub description: String,

	#[serde_inline_default("waypub.example".into())]
	pub domain: String,

	#[serde(default)]
	pub contact: Option<String>,
}

#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct SecurityConfig {
	/// how much clock skew to tolerate when verifying http signatures, in seconds
	#[serde_inline_default(3600u64)]
	pub signature_window_seconds: u64,
}

#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct InboxConfig {
	/// key segments prepended to activity ids when recording processed deliveries
	#[serde_inline_default(vec!["waypub".into(), "inbox".into(), "seen".into()])]
	pub idempotence_prefix: Vec<String>,
}

impl Config {
	pub fn load(path: Option<&std::path::PathBuf>) -> Self {
		let Some(cfg_path) = path else { return Config::default() };
		match std::fs::read_to_string(cfg_path) {
			Ok(x) => match toml::from_str(&x) {
				Ok(cfg) => return cfg,
				Err(e) => tracing::error!("failed parsing config file: {e}"),
			},
			Err(e) => tracing::error!("failed reading config file: {e}"),
		}
		Config::default()
	}
}

#[cfg(test)]
mod test {
	#[test]
	fn defaults_fill_every_section() {
		let config = super::Config::default();
		assert_eq!(config.security.signature_window_seconds, 3600);
		assert!(!config.inbox.idempotence_prefix.is_empty());
		assert!(!config.instance.domain.is_empty());
	}

	#[test]
	fn partial_files_keep_defaults_elsewhere() {
		let config: super::Config = toml::from_str(r#"
			[instance]
			domain = "social.example"
		"#).unwrap();
		assert_eq!(config.instance.domain, "social.example");
		assert_eq!(config.security.signature_window_seconds, 3600);
	}
}
