/// ActivityStreams node: nothing, one thing, a link to a thing, or many things
pub enum Node<T: super::Base> {
	Array(std::collections::VecDeque<Node<T>>),
	Object(Box<T>),
	Link(Box<dyn crate::Link + Sync + Send>),
	Empty,
}

impl<T: super::Base> From<Option<T>> for Node<T> {
	fn from(value: Option<T>) -> Self {
		match value {
			Some(x) => Node::Object(Box::new(x)),
			None => Node::Empty,
		}
	}
}

impl<T: super::Base> Node<T> {
	/// reference to the embedded object, or the first one if many are present
	pub fn get(&self) -> Option<&T> {
		match self {
			Node::Empty | Node::Link(_) => None,
			Node::Object(x) => Some(x),
			Node::Array(v) => v.iter().filter_map(|x| x.get()).next(),
		}
	}

	/// consume the node, returning the embedded object if any
	pub fn extract(self) -> Option<T> {
		match self {
			Node::Empty | Node::Link(_) => None,
			Node::Object(x) => Some(*x),
			Node::Array(mut v) => v.pop_front()?.extract(),
		}
	}

	pub fn is_nothing(&self) -> bool {
		matches!(self, Node::Empty)
	}

	pub fn is_link(&self) -> bool {
		matches!(self, Node::Link(_))
	}

	pub fn is_object(&self) -> bool {
		matches!(self, Node::Object(_))
	}

	pub fn len(&self) -> usize {
		match self {
			Node::Empty => 0,
			Node::Link(_) => 1,
			Node::Object(_) => 1,
			Node::Array(v) => v.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// id of the underlying thing: href for links, id field for objects
	pub fn id(&self) -> crate::Field<&str> {
		match self {
			Node::Empty => Err(crate::FieldErr("id")),
			Node::Link(uri) => uri.href(),
			Node::Object(obj) => obj.id(),
			Node::Array(arr) => arr.front().ok_or(crate::FieldErr("id"))?.id(),
		}
	}
}

impl Node<serde_json::Value> {
	pub fn link(uri: String) -> Self {
		Node::Link(Box::new(uri))
	}

	pub fn maybe_link(uri: Option<String>) -> Self {
		match uri {
			Some(uri) => Node::Link(Box::new(uri)),
			None => Node::Empty,
		}
	}

	pub fn object(x: serde_json::Value) -> Self {
		Node::Object(Box::new(x))
	}

	pub fn array(values: Vec<serde_json::Value>) -> Self {
		Node::Array(
			std::collections::VecDeque::from_iter(
				values.into_iter().map(Node::object)
			)
		)
	}

	pub fn maybe_array(values: Vec<serde_json::Value>) -> Self {
		if values.is_empty() {
			Node::Empty
		} else {
			Node::array(values)
		}
	}
}

impl From<serde_json::Value> for Node<serde_json::Value> {
	fn from(value: serde_json::Value) -> Self {
		use crate::Link;
		match value {
			serde_json::Value::String(uri) => Node::Link(Box::new(uri)),
			serde_json::Value::Array(arr) => Node::Array(
				std::collections::VecDeque::from_iter(
					arr.into_iter().map(Node::from)
				)
			),
			serde_json::Value::Object(_) => match value.link_type() {
				Ok(_) => Node::Link(Box::new(value)),
				Err(_) => Node::Object(Box::new(value)),
			},
			_ => Node::Empty,
		}
	}
}

impl From<Node<serde_json::Value>> for serde_json::Value {
	fn from(value: Node<serde_json::Value>) -> Self {
		match value {
			Node::Empty => serde_json::Value::Null,
			Node::Link(l) => serde_json::Value::String(l.href().unwrap_or_default().to_string()),
			Node::Object(o) => *o,
			Node::Array(arr) =>
				serde_json::Value::Array(arr.into_iter().map(|x| x.into()).collect()),
		}
	}
}
