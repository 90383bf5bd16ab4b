//! Listing projections and publish-flag deployment.

pub mod deploy;
pub mod projection;
pub mod service;

pub use deploy::DeployPlan;
pub use projection::ProjectionRules;
pub use service::PublishService;
