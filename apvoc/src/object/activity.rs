use crate::{getter, strenum, Field, FieldErr, Node};

use super::Object;

strenum! {
	pub enum AcceptType {
		Accept,
		TentativeAccept;
	};

	pub enum IgnoreType {
		Ignore,
		Block;
	};

	pub enum IntransitiveActivityType {
		IntransitiveActivity,
		Arrive,
		Question,
		Travel;
	};

	pub enum OfferType {
		Offer,
		Invite;
	};

	pub enum RejectType {
		Reject,
		TentativeReject;
	};

	pub enum ActivityType {
		Activity,
		Add,
		Announce,
		Create,
		Delete,
		Dislike,
		Flag,
		Follow,
		Join,
		Leave,
		Like,
		Listen,
		Move,
		Read,
		Remove,
		Undo,
		Update,
		View;

		Accept(AcceptType),
		Ignore(IgnoreType),
		IntransitiveActivity(IntransitiveActivityType),
		Offer(OfferType),
		Reject(RejectType)
	};
}

impl ActivityType {
	/// the type this one specializes, one step up towards the `Activity` root
	pub fn parent(self) -> Option<Self> {
		match self {
			Self::Activity => None,
			Self::Accept(AcceptType::Accept)
			| Self::Ignore(IgnoreType::Ignore)
			| Self::IntransitiveActivity(IntransitiveActivityType::IntransitiveActivity)
			| Self::Offer(OfferType::Offer)
			| Self::Reject(RejectType::Reject) => Some(Self::Activity),
			Self::Accept(_) => Some(Self::Accept(AcceptType::Accept)),
			Self::Ignore(_) => Some(Self::Ignore(IgnoreType::Ignore)),
			Self::IntransitiveActivity(_) => Some(Self::IntransitiveActivity(IntransitiveActivityType::IntransitiveActivity)),
			Self::Offer(_) => Some(Self::Offer(OfferType::Offer)),
			Self::Reject(_) => Some(Self::Reject(RejectType::Reject)),
			_ => Some(Self::Activity),
		}
	}
}

pub trait Activity: Object {
	fn activity_type(&self) -> Field<ActivityType> { Err(FieldErr("type")) }
	fn actor(&self) -> Node<Self::Actor> { Node::Empty }
	fn object(&self) -> Node<Self::Object> { Node::Empty }
	fn target(&self) -> Node<Self::Object> { Node::Empty }
}

impl Activity for serde_json::Value {
	getter! { activity_type -> type ActivityType }
	getter! { actor -> node Self::Actor }
	getter! { object -> node <Self as Object>::Object }
	getter! { target -> node <Self as Object>::Object }
}

#[cfg(test)]
mod test {
	use super::{AcceptType, ActivityType, IgnoreType};

	#[test]
	fn type_values_parse_across_the_hierarchy() {
		assert_eq!(ActivityType::try_from("Create").unwrap(), ActivityType::Create);
		assert_eq!(
			ActivityType::try_from("TentativeAccept").unwrap(),
			ActivityType::Accept(AcceptType::TentativeAccept),
		);
		assert_eq!(
			ActivityType::try_from("Block").unwrap(),
			ActivityType::Ignore(IgnoreType::Block),
		);
		assert!(ActivityType::try_from("Burrow").is_err());
		assert_eq!(ActivityType::Ignore(IgnoreType::Block).as_ref(), "Block");
	}

	#[test]
	fn parent_walks_to_the_activity_root() {
		let mut probe = Some(ActivityType::Accept(AcceptType::TentativeAccept));
		let mut chain = Vec::new();
		while let Some(x) = probe {
			chain.push(x);
			probe = x.parent();
		}
		assert_eq!(chain, vec![
			ActivityType::Accept(AcceptType::TentativeAccept),
			ActivityType::Accept(AcceptType::Accept),
			ActivityType::Activity,
		]);
		assert_eq!(ActivityType::Announce.parent(), Some(ActivityType::Activity));
		assert_eq!(ActivityType::Activity.parent(), None);
	}
}
