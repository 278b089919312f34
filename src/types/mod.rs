// Link manager shared type definitions
// Each submodule defines types used across the application.

pub mod bookmark;
pub mod errors;
pub mod flash;
pub mod group;
pub mod http;
pub mod page;
pub mod search;
