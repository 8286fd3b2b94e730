//! Canteen Admin - dashboard view-models and command line front end
//!
//! Screens live in [`views`]; each one drives the typed
//! [`ApiClient`](canteen_client::ApiClient) and keeps its own rows, forms and
//! notices. [`commands`] maps CLI commands onto those screens.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logger;
pub mod navigation;
pub mod notice;
pub mod views;

pub use cli::Cli;
pub use config::AdminConfig;
pub use notice::{Notice, NoticeKind, Notices};
