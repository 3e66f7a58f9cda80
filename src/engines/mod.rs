pub mod analysis;
pub mod association;
pub mod encoding;
pub mod metrics;
pub mod null_model;
pub mod validation;
