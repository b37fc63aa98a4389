mod macros;
pub(crate) use macros::{getter, setter, strenum};

mod field;
pub use field::{Field, FieldErr};

mod node;
pub use node::Node;

mod base;
pub use base::{Base, BaseMut, BaseType};

mod link;
pub use link::{Link, LinkType};

mod key;
pub use key::PublicKey;

mod object;
pub use object::{
	Object, ObjectMut, ObjectType, DocumentType,
	activity::{
		Activity, ActivityType,
		AcceptType, IgnoreType, IntransitiveActivityType, OfferType, RejectType,
	},
	actor::{Actor, ActorType},
	collection::{
		Collection, CollectionMut, CollectionType,
		CollectionPage, CollectionPageMut,
	},
};

pub mod jsonld;
pub use jsonld::LD;

/// blank document to start building on
pub fn new() -> serde_json::Value {
	serde_json::Value::Object(serde_json::Map::default())
}
