pub mod config;
pub mod events;
pub mod sim;
pub mod sys;
pub mod world;
