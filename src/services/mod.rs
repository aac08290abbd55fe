pub mod session;
pub mod stats;
pub mod store;
pub mod trivia;
