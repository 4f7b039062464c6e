//! # setgen-docs — Documentation Renderers
//!
//! Renders the human-facing documentation of a settings schema in two
//! flavors from one tree walk:
//!
//! - [`render_text`]: the settings file syntax with `; ` comments.
//! - [`render_html`] / [`render_html_page`]: the same layout with anchored
//!   comments, hyperlinks and collapsible expert groups.
//!
//! Comments are wrapped by [`setgen_core::wrap`]. A `[label](url)` link in
//! a comment is one unsplittable unit for the wrapper in both flavors (see
//! [`inline`]).

pub mod html;
pub mod inline;
pub mod plain;
pub mod walk;

pub use html::{render_html, render_html_page, PageOptions};
pub use plain::render_text;

/// Default comment wrap width in columns.
pub const DEFAULT_WIDTH: usize = 80;
