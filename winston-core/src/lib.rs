pub mod analysis;
pub mod config;
pub mod error;
pub mod files;
pub mod lock;
pub mod names;
pub mod params;
pub mod progress;
pub mod results;
pub mod tracker;
pub mod wire;

pub use error::Error;
