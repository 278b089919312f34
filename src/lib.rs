//! Link manager — bookmarks organized into named groups, with search and a
//! server-rendered page.
//!
//! This library crate exposes all modules for use by the shell binary and integration tests.

pub mod app;
pub mod config;
pub mod database;
pub mod logging;
pub mod managers;
pub mod request_router;
pub mod services;
pub mod types;
pub mod ui;
