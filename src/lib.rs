pub mod models;
pub mod services;
pub mod view;
pub mod cli;
pub mod utils;

pub use anyhow::{Error, Result};
