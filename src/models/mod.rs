pub mod market_board;
pub mod session;
pub mod view;
