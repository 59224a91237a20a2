mod colour;
pub use colour::*;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod fonts;
pub use fonts::*;

mod generate;
pub use generate::*;

/// Utility functions and structures to layout text inside schema boxes
pub mod layout;

mod page;
pub use page::*;

/// Pre-defined page sizes
pub mod pagesize;

mod rect;
pub use rect::*;

mod schema;
pub use schema::*;

/// The schema kinds and their PDF and editing-surface renderers
pub mod schemas;

mod transform;
pub use transform::*;

/// The editing surface: element trees, modes and editors
pub mod ui;

mod content;
pub(crate) mod refs;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
