pub mod prompt;
pub mod version;
