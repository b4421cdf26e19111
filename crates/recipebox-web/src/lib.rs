//! Recipebox Web - server-rendered recipe pages
//!
//! The pages never touch a store directly: every read and write goes through
//! [`ApiClient`] to the recipe API.

pub mod client;
pub mod config;
pub mod pages;
pub mod render;

pub use client::{ApiClient, ClientError};
pub use config::WebConfig;
pub use pages::router;
