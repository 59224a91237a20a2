//! Pre-defined page sizes for common paper formats.
//!
//! All sizes are provided in portrait orientation (width, height).
//!
//! # Example
//!
//! ```
//! use pdf_schemas::pagesize::{self, A4};
//! use pdf_schemas::Mm;
//!
//! let (width, height) = pagesize::from_mm(Mm(210.0), Mm(297.0));
//! assert!((*width - *A4.0).abs() < 1e-3);
//! assert!((*height - *A4.1).abs() < 1e-3);
//! ```

use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(14.0 * 72.0));

pub const A3: PageSize = (Pt(297.0 * PT_PER_MM), Pt(420.0 * PT_PER_MM));
pub const A4: PageSize = (Pt(210.0 * PT_PER_MM), Pt(297.0 * PT_PER_MM));
pub const A5: PageSize = (Pt(148.0 * PT_PER_MM), Pt(210.0 * PT_PER_MM));

/// A page size given in millimetres, as templates declare it
pub fn from_mm(width: Mm, height: Mm) -> PageSize {
    (width.into(), height.into())
}
