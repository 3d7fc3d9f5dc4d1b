pub mod board;
pub mod config;
pub mod console;
pub mod engine;
pub mod error;
pub mod game;
pub mod input;
pub mod protocol;
