pub mod app;
pub mod hub;
pub mod session;
pub mod types;
