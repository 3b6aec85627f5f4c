pub mod config;
pub mod data;
pub mod state;

pub use config::*;
pub use data::*;
pub use state::*;
