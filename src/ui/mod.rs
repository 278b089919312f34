//! Link manager UI layer.
//!
//! Built-in implementations of the page-assembly seams: [`templates::TemplateRenderer`]
//! renders the named sections from the JSON view context, [`page_builder::PageBuilder`]
//! wraps them in a Bootstrap page shell. Both can be swapped out through
//! `App::with_presentation`.

pub mod page_builder;
pub mod templates;
