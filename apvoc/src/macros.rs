#[derive(Debug, thiserror::Error)]
#[error("invalid type value")]
pub struct TypeValueError;

macro_rules! strenum {
	( $(pub enum $enum_name:ident { $($flat:ident),* ; $($deep:ident($inner:ident)),* };)+ ) => {
		$(
			#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
			pub enum $enum_name {
				$($flat,)*
				$($deep($inner),)*
			}

			impl AsRef<str> for $enum_name {
				fn as_ref(&self) -> &str {
					match self {
						$(Self::$flat => stringify!($flat),)*
						$(Self::$deep(x) => x.as_ref(),)*
					}
				}
			}

			impl TryFrom<&str> for $enum_name {
				type Error = $crate::macros::TypeValueError;

				fn try_from(value: &str) -> Result<Self, Self::Error> {
					match value {
						$(stringify!($flat) => Ok(Self::$flat),)*
						_ => {
							$(
								if let Ok(x) = $inner::try_from(value) {
									return Ok(Self::$deep(x));
								}
							)*
							Err($crate::macros::TypeValueError)
						},
					}
				}
			}
		)*
	};
}

pub(crate) use strenum;

macro_rules! getter {
	($name:ident -> type $t:ty) => {
		paste::paste! {
			fn [< $name:snake >](&self) -> $crate::Field<$t> {
				self.get("type")
					.and_then(|x| x.as_str())
					.and_then(|x| x.try_into().ok())
					.ok_or($crate::FieldErr("type"))
			}
		}
	};

	($name:ident -> &str) => {
		paste::paste! {
			fn [< $name:snake >](&self) -> $crate::Field<&str> {
				self.get(stringify!($name))
					.and_then(|x| x.as_str())
					.ok_or($crate::FieldErr(stringify!($name)))
			}
		}
	};

	($name:ident::$rename:ident -> &str) => {
		paste::paste! {
			fn [< $name:snake >](&self) -> $crate::Field<&str> {
				self.get(stringify!($rename))
					.and_then(|x| x.as_str())
					.ok_or($crate::FieldErr(stringify!($rename)))
			}
		}
	};

	($name:ident -> u64) => {
		paste::paste! {
			fn [< $name:snake >](&self) -> $crate::Field<u64> {
				self.get(stringify!($name))
					.and_then(|x| x.as_u64())
					.ok_or($crate::FieldErr(stringify!($name)))
			}
		}
	};

	($name:ident::$rename:ident -> u64) => {
		paste::paste! {
			fn [< $name:snake >](&self) -> $crate::Field<u64> {
				self.get(stringify!($rename))
					.and_then(|x| x.as_u64())
					.ok_or($crate::FieldErr(stringify!($rename)))
			}
		}
	};

	($name:ident -> chrono::DateTime<chrono::Utc>) => {
		paste::paste! {
			fn [< $name:snake >](&self) -> $crate::Field<chrono::DateTime<chrono::Utc>> {
				Ok(
					chrono::DateTime::parse_from_rfc3339(
							self
								.get(stringify!($name))
								.and_then(|x| x.as_str())
								.ok_or($crate::FieldErr(stringify!($name)))?
						)
						.map_err(|e| {
							tracing::warn!("invalid time string ({e}), ignoring");
							$crate::FieldErr(stringify!($name))
						})?
						.with_timezone(&chrono::Utc)
				)
			}
		}
	};

	($name:ident -> node $t:ty) => {
		paste::paste! {
			fn [< $name:snake >](&self) -> $crate::Node<$t> {
				match self.get(stringify!($name)) {
					Some(x) => $crate::Node::from(x.clone()),
					None => $crate::Node::Empty,
				}
			}
		}
	};

	($name:ident::$rename:ident -> node $t:ty) => {
		paste::paste! {
			fn [< $name:snake >](&self) -> $crate::Node<$t> {
				match self.get(stringify!($rename)) {
					Some(x) => $crate::Node::from(x.clone()),
					None => $crate::Node::Empty,
				}
			}
		}
	};
}

pub(crate) use getter;

macro_rules! setter {
	($name:ident -> type $t:ty) => {
		paste::paste! {
			fn [< set_$name:snake >](mut self, val: Option<$t>) -> Self {
				$crate::macros::set_maybe_value(
					&mut self, "type", val.map(|x| serde_json::Value::String(x.as_ref().to_string()))
				);
				self
			}
		}
	};

	($name:ident -> &str) => {
		paste::paste! {
			fn [< set_$name:snake >](mut self, val: Option<&str>) -> Self {
				$crate::macros::set_maybe_value(
					&mut self, stringify!($name), val.map(|x| serde_json::Value::String(x.to_string()))
				);
				self
			}
		}
	};

	($name:ident -> u64) => {
		paste::paste! {
			fn [< set_$name:snake >](mut self, val: Option<u64>) -> Self {
				$crate::macros::set_maybe_value(
					&mut self, stringify!($name), val.map(|x| serde_json::Value::Number(serde_json::Number::from(x)))
				);
				self
			}
		}
	};

	($name:ident::$rename:ident -> u64) => {
		paste::paste! {
			fn [< set_$name:snake >](mut self, val: Option<u64>) -> Self {
				$crate::macros::set_maybe_value(
					&mut self, stringify!($rename), val.map(|x| serde_json::Value::Number(serde_json::Number::from(x)))
				);
				self
			}
		}
	};

	($name:ident -> chrono::DateTime<chrono::Utc>) => {
		paste::paste! {
			fn [< set_$name:snake >](mut self, val: Option<chrono::DateTime<chrono::Utc>>) -> Self {
				$crate::macros::set_maybe_value(
					&mut self, stringify!($name), val.map(|x| serde_json::Value::String(x.to_rfc3339()))
				);
				self
			}
		}
	};

	($name:ident -> node $t:ty) => {
		paste::paste! {
			fn [< set_$name:snake >](mut self, val: $crate::Node<$t>) -> Self {
				$crate::macros::set_maybe_node(
					&mut self, stringify!($name), val
				);
				self
			}
		}
	};

	($name:ident::$rename:ident -> node $t:ty) => {
		paste::paste! {
			fn [< set_$name:snake >](mut self, val: $crate::Node<$t>) -> Self {
				$crate::macros::set_maybe_node(
					&mut self, stringify!($rename), val
				);
				self
			}
		}
	};
}

pub(crate) use setter;

pub(crate) fn set_maybe_node(obj: &mut serde_json::Value, key: &str, node: crate::Node<serde_json::Value>) {
	if node.is_nothing() {
		set_maybe_value(obj, key, None)
	} else {
		set_maybe_value(obj, key, Some(node.into()))
	}
}

pub(crate) fn set_maybe_value(obj: &mut serde_json::Value, key: &str, value: Option<serde_json::Value>) {
	if let Some(map) = obj.as_object_mut() {
		match value {
			Some(x) => map.insert(key.to_string(), x),
			None => map.remove(key),
		};
	} else {
		tracing::error!("error setting '{key}' on json value: not an object");
	}
}
