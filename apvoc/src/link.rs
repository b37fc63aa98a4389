use crate::{getter, strenum, Field, FieldErr};

strenum! {
	pub enum LinkType {
		Link,
		Mention;
	};
}

pub trait Link: crate::Base {
	fn href(&self) -> Field<&str>;
	fn link_type(&self) -> Field<LinkType> { Err(FieldErr("type")) }
	fn rel(&self) -> Field<&str> { Err(FieldErr("rel")) }
}

impl Link for String {
	fn href(&self) -> Field<&str> {
		Ok(self)
	}
}

impl Link for serde_json::Value {
	getter! { link_type -> type LinkType }
	getter! { rel -> &str }

	fn href(&self) -> Field<&str> {
		match self {
			serde_json::Value::String(x) => Ok(x),
			_ => self.get("href")
				.and_then(|x| x.as_str())
				.ok_or(FieldErr("href")),
		}
	}
}
