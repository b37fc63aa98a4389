use crate::{getter, setter, strenum, Field, FieldErr, Node};

use super::{Object, ObjectMut};

strenum! {
	pub enum CollectionType {
		Collection,
		CollectionPage,
		OrderedCollection,
		OrderedCollectionPage;
	};
}

pub trait Collection: Object {
	type CollectionPage: CollectionPage;

	fn collection_type(&self) -> Field<CollectionType> { Err(FieldErr("type")) }
	fn total_items(&self) -> Field<u64> { Err(FieldErr("totalItems")) }
	fn first(&self) -> Node<Self::CollectionPage> { Node::Empty }
	fn last(&self) -> Node<Self::CollectionPage> { Node::Empty }
	fn items(&self) -> Node<Self::Object> { Node::Empty }
	fn ordered_items(&self) -> Node<Self::Object> { Node::Empty }
}

pub trait CollectionMut: ObjectMut {
	type CollectionPage: CollectionPage;

	fn set_collection_type(self, val: Option<CollectionType>) -> Self;
	fn set_total_items(self, val: Option<u64>) -> Self;
	fn set_first(self, val: Node<Self::CollectionPage>) -> Self;
	fn set_last(self, val: Node<Self::CollectionPage>) -> Self;
	fn set_items(self, val: Node<Self::Object>) -> Self;
	fn set_ordered_items(self, val: Node<Self::Object>) -> Self;
}

pub trait CollectionPage: Collection {
	fn part_of(&self) -> Node<Self::Collection> { Node::Empty }
	fn next(&self) -> Node<Self::CollectionPage> { Node::Empty }
	fn prev(&self) -> Node<Self::CollectionPage> { Node::Empty }
}

pub trait CollectionPageMut: CollectionMut {
	fn set_part_of(self, val: Node<Self::Collection>) -> Self;
	fn set_next(self, val: Node<Self::CollectionPage>) -> Self;
	fn set_prev(self, val: Node<Self::CollectionPage>) -> Self;
}

impl Collection for serde_json::Value {
	type CollectionPage = serde_json::Value;

	getter! { collection_type -> type CollectionType }
	getter! { total_items::totalItems -> u64 }
	getter! { first -> node Self::CollectionPage }
	getter! { last -> node Self::CollectionPage }
	getter! { items -> node <Self as Object>::Object }
	getter! { ordered_items::orderedItems -> node <Self as Object>::Object }
}

impl CollectionMut for serde_json::Value {
	type CollectionPage = serde_json::Value;

	setter! { collection_type -> type CollectionType }
	setter! { total_items::totalItems -> u64 }
	setter! { first -> node Self::CollectionPage }
	setter! { last -> node Self::CollectionPage }
	setter! { items -> node <Self as Object>::Object }
	setter! { ordered_items::orderedItems -> node <Self as Object>::Object }
}

impl CollectionPage for serde_json::Value {
	getter! { part_of::partOf -> node Self::Collection }
	getter! { next -> node Self::CollectionPage }
	getter! { prev -> node Self::CollectionPage }
}

impl CollectionPageMut for serde_json::Value {
	setter! { part_of::partOf -> node Self::Collection }
	setter! { next -> node Self::CollectionPage }
	setter! { prev -> node Self::CollectionPage }
}
