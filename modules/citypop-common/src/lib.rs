pub mod types;
pub mod config;
pub mod error;
pub mod format;

pub use types::*;
pub use config::{CoercionMode, Config};
pub use error::CityPopError;
pub use format::*;
