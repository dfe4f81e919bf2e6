pub use self::{config::*, core::*, engine::*};

pub mod config;
pub mod core;
pub mod engine;
