#[macro_use]
pub mod db;

pub mod activity;
pub mod api;
pub mod auth;
pub mod club;
pub mod config;
pub mod dir;
pub mod error;
pub mod event;
pub mod notifications;
pub mod seed;
pub mod stats;
pub mod store;
pub mod user;
pub mod util;

pub use config::Config;
pub use error::{Error, Result};
pub use store::Store;
