//! Render module for turning items into text
//!
//! This module handles:
//! - Converting raw HTML bodies into markdown-flavoured plain text
//! - Formatting item header blocks and indenting nested blocks
//! - Formatting the flat top-level listing

pub mod format;
mod markdown;

pub use format::{assemble_subtree, format_listing, header_block, indent_block};
pub use markdown::{MarkdownRenderer, TextRenderer};
