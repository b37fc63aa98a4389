pub mod config;
pub use config::Config;

pub mod context;
pub use context::{Context, RequestContext};

pub mod registry;
pub use registry::{CollectionCallbacks, Page, Registry};

pub mod traits;

/// error type carried across callback and collaborator boundaries
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
