pub mod args;
pub mod config;
pub mod error;
pub mod locations;
pub mod random;
pub mod scenario;
pub mod sweep;
