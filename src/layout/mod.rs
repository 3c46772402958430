//! Layout building blocks: page margins and line wrapping.
//!
//! ```
//! use pdf_flow::layout::LineWrap;
//! use pdf_flow::Pt;
//!
//! // pretend every character is 1pt wide
//! let width = |s: &str| Pt(s.chars().count() as f32);
//! let lines = LineWrap::column(Pt(10.0)).wrap("the quick brown fox", width);
//! assert_eq!(lines, vec!["the quick", "brown fox"]);
//! ```

mod margins;
mod wrap;

pub use margins::*;
pub use wrap::*;
