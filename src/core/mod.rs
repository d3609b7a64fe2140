//! Core components of the `moex-iss` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`IssClient`] and its builder.
//! - The primary [`IssError`] type.
//! - The tabular data model ([`TableSet`], [`Table`], [`Row`], [`Value`]).
//! - [`IssRequest`], the replayable single-endpoint request.

/// The main client (`IssClient`), builder, and configuration.
pub mod client;
/// The primary error type (`IssError`) for the crate.
pub mod error;
/// Tables, rows and cells as returned by ISS.
pub mod models;
/// A single replayable ISS request.
pub mod request;
/// The page-fetch abstraction the paging engine runs on.
pub mod services;
pub(crate) mod wire;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::IssClient`
pub use client::constants::CURSOR_TABLE;
pub use client::{IssClient, IssClientBuilder};
pub use error::IssError;
pub use models::{Row, Table, TableSet, Value};
pub use request::IssRequest;
pub use services::PageSource;
