pub mod config;
pub mod error;
pub mod fixed;
pub mod types;

pub use fixed::Fixed2;
pub use types::{EntityId, Tick};
