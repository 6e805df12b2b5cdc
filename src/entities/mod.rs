pub mod category;
pub mod dispute;
pub mod kyc_request;
pub mod money_movement;
pub mod notification;
pub mod platform_settings;
pub mod submission;
pub mod task;
pub mod transaction;
pub mod user;
