pub mod auth_extractor;
pub mod utils;
