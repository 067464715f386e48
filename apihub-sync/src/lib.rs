//! Syncs a SwaggerHub API catalog into API hub.
//!
//! A pass lists the owner's APIs, fetches each OpenAPI document, translates
//! everything into API hub metadata and submits it as one upsert batch.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod server;
pub mod services;

pub use error::{Result, SyncError};
