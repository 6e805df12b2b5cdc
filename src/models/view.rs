pub mod admin;
pub mod session;
pub mod task;
pub mod wallet;
