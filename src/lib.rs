pub mod cli;
pub mod config;
pub mod error;
pub mod image;
pub mod terminal;
pub mod transport;
pub mod wizard;
