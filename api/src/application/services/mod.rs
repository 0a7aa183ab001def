pub mod diff;
pub mod templates;
pub mod versioning;
