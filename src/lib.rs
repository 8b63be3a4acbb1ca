pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod metadata;
pub mod resolver;
pub mod template;
pub mod ui;
pub mod validator;
pub mod warning;

pub use error::{PublishError, Result};
