//! Text layout arithmetic shared by every text-bearing schema.
//!
//! The pieces are pure functions meant to be composed by the caller, in this order:
//!
//! 1. resolve a font size, either the static one or
//!    [`calculate_dynamic_font_size`](crate::layout::calculate_dynamic_font_size)
//! 2. wrap the text at that size with [`split_text_to_size`](crate::layout::split_text_to_size)
//! 3. position the lines with [`vertical_offset`](crate::layout::vertical_offset) and
//!    [`horizontal_offset`](crate::layout::horizontal_offset), stretching justified lines
//!    with [`justify_spacing`](crate::layout::justify_spacing)
//!
//! All measurements go through a [`Measure`](crate::layout::Measure) built once from the
//! resolved size, so what was measured is what gets drawn.
//!
//! # Example
//!
//! ```
//! use pdf_schemas::layout::{split_text_to_size, Measure, MonospaceMetrics};
//! use pdf_schemas::Pt;
//!
//! let metrics = MonospaceMetrics::default();
//! let measure = Measure::new(&metrics, Pt(10.0), Pt(0.0));
//! let lines = split_text_to_size("hello big world", &measure, Pt(50.0));
//! assert_eq!(lines.len(), 2);
//! ```

mod align;
mod fit;
mod metrics;
mod wrap;

pub use align::*;
pub use fit::*;
pub use metrics::*;
pub use wrap::*;
