pub mod admin_credentials;
pub mod file_session_store;
pub mod fixtures;
pub mod gemini;
pub mod generate;
pub mod jwt;
pub mod memory_session_store;
pub mod money;
pub mod origin_checks;
pub mod validate_utils;
