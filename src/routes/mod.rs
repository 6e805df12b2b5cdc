pub mod admin;
pub mod ai;
pub mod auth_routes;
pub mod notifications;
pub mod tasks;
pub mod wallet;
