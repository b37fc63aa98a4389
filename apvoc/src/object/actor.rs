use crate::{getter, strenum, Field, FieldErr, Node, PublicKey};

use super::Object;

strenum! {
	pub enum ActorType {
		Application,
		Group,
		Organization,
		Person,
		Service;
	};
}

pub trait Actor: Object {
	type PublicKey: PublicKey;

	fn actor_type(&self) -> Field<ActorType> { Err(FieldErr("type")) }
	fn preferred_username(&self) -> Field<&str> { Err(FieldErr("preferredUsername")) }
	fn inbox(&self) -> Node<Self::Collection> { Node::Empty }
	fn outbox(&self) -> Node<Self::Collection> { Node::Empty }
	fn following(&self) -> Node<Self::Collection> { Node::Empty }
	fn followers(&self) -> Node<Self::Collection> { Node::Empty }
	fn public_key(&self) -> Node<Self::PublicKey> { Node::Empty }
}

impl Actor for serde_json::Value {
	type PublicKey = serde_json::Value;

	getter! { actor_type -> type ActorType }
	getter! { preferred_username::preferredUsername -> &str }
	getter! { inbox -> node Self::Collection }
	getter! { outbox -> node Self::Collection }
	getter! { following -> node Self::Collection }
	getter! { followers -> node Self::Collection }
	getter! { public_key::publicKey -> node Self::PublicKey }
}
