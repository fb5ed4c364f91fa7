pub mod assumption;
pub mod canvas;
pub mod config;
pub mod error;
pub mod experiment;
pub mod io;
pub mod paths;
pub mod risk;
pub mod slug;
pub mod types;
pub mod viability;

pub use error::{Result, RocketMapError};
