pub mod analytics;
pub mod annotations;
pub mod item;
pub mod metadata;
pub mod status;
