pub mod generative_model;
pub mod origin_check;
pub mod session_store;
