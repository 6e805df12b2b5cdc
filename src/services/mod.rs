pub mod ai_service;
pub mod moderation_service;
pub mod session_service;
pub mod task_service;
pub mod wallet_service;
