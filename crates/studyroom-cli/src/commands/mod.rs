pub mod config;
pub mod study;
pub mod timer;
