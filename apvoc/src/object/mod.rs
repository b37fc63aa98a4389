pub mod activity;
pub mod actor;
pub mod collection;

use crate::{getter, setter, strenum, Field, FieldErr, Link, Node};

use activity::ActivityType;
use actor::{Actor, ActorType};
use collection::{Collection, CollectionType};

strenum! {
	pub enum DocumentType {
		Audio,
		Document,
		Image,
		Page,
		Video;
	};

	pub enum ObjectType {
		Object,
		Article,
		Event,
		Note,
		Place,
		Profile,
		Relationship,
		Tombstone;

		Activity(ActivityType),
		Actor(ActorType),
		Collection(CollectionType),
		Document(DocumentType)
	};
}

pub trait Object: crate::Base {
	type Link: Link;
	type Actor: Actor;
	type Object: Object;
	type Collection: Collection;

	fn object_type(&self) -> Field<ObjectType> { Err(FieldErr("type")) }
	fn attributed_to(&self) -> Node<Self::Actor> { Node::Empty }
	fn content(&self) -> Field<&str> { Err(FieldErr("content")) }
	fn name(&self) -> Field<&str> { Err(FieldErr("name")) }
	fn summary(&self) -> Field<&str> { Err(FieldErr("summary")) }
	fn published(&self) -> Field<chrono::DateTime<chrono::Utc>> { Err(FieldErr("published")) }
	fn updated(&self) -> Field<chrono::DateTime<chrono::Utc>> { Err(FieldErr("updated")) }
	fn url(&self) -> Node<Self::Link> { Node::Empty }
	fn to(&self) -> Node<Self::Link> { Node::Empty }
	fn cc(&self) -> Node<Self::Link> { Node::Empty }
	fn media_type(&self) -> Field<&str> { Err(FieldErr("mediaType")) }
}

pub trait ObjectMut: crate::BaseMut {
	type Link: Link;
	type Actor: Actor;
	type Object: Object;
	type Collection: Collection;

	fn set_object_type(self, val: Option<ObjectType>) -> Self;
	fn set_attributed_to(self, val: Node<Self::Actor>) -> Self;
	fn set_content(self, val: Option<&str>) -> Self;
	fn set_name(self, val: Option<&str>) -> Self;
	fn set_summary(self, val: Option<&str>) -> Self;
	fn set_published(self, val: Option<chrono::DateTime<chrono::Utc>>) -> Self;
	fn set_url(self, val: Node<Self::Link>) -> Self;
	fn set_to(self, val: Node<Self::Link>) -> Self;
	fn set_cc(self, val: Node<Self::Link>) -> Self;
}

impl Object for serde_json::Value {
	type Link = serde_json::Value;
	type Actor = serde_json::Value;
	type Object = serde_json::Value;
	type Collection = serde_json::Value;

	getter! { object_type -> type ObjectType }
	getter! { attributed_to::attributedTo -> node Self::Actor }
	getter! { content -> &str }
	getter! { name -> &str }
	getter! { summary -> &str }
	getter! { published -> chrono::DateTime<chrono::Utc> }
	getter! { updated -> chrono::DateTime<chrono::Utc> }
	getter! { url -> node Self::Link }
	getter! { to -> node Self::Link }
	getter! { cc -> node Self::Link }
	getter! { media_type::mediaType -> &str }
}

impl ObjectMut for serde_json::Value {
	type Link = serde_json::Value;
	type Actor = serde_json::Value;
	type Object = serde_json::Value;
	type Collection = serde_json::Value;

	setter! { object_type -> type ObjectType }
	setter! { attributed_to::attributedTo -> node Self::Actor }
	setter! { content -> &str }
	setter! { name -> &str }
	setter! { summary -> &str }
	setter! { published -> chrono::DateTime<chrono::Utc> }
	setter! { url -> node Self::Link }
	setter! { to -> node Self::Link }
	setter! { cc -> node Self::Link }
}
