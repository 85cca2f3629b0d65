pub mod config;
pub mod display;
pub mod model;
pub mod session;
pub mod standings;
