pub mod actor;
pub mod collection;
pub mod inbox;
pub mod object;

use axum::routing::{get, post};
use axum::Router;

use waypub::Context;

impl<T: Send + Sync + 'static> super::ActivityPubRouter for Router<Context<T>> {
	fn ap_routes(self) -> Self {
		use crate::activitypub as ap;

		self
			// shared inbox for server wide deliveries
			.route("/inbox", post(ap::inbox::post::<T>))
			// actor routes
			.route("/actors/{handle}", get(ap::actor::view::<T>))
			.route("/actors/{handle}/inbox", post(ap::inbox::post_scoped::<T>))
			.route("/actors/{handle}/outbox", get(ap::collection::outbox::<T>))
			.route("/actors/{handle}/followers", get(ap::collection::followers::<T>))
			.route("/actors/{handle}/following", get(ap::collection::following::<T>))
			.route("/actors/{handle}/liked", get(ap::collection::liked::<T>))
			// specific object routes
			.route("/objects/{id}", get(ap::object::view::<T>))
	}
}
