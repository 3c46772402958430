//! Flowing, paginated document layout on top of [`pdf_writer`].
//!
//! A [`Manuscript`] is an ordered list of [`Block`]s (headings, paragraphs, list items,
//! label/value lines, verbatim text, title page material). The [`FlowEngine`] lays the
//! blocks out top to bottom, breaking pages line by line, while a [`PageDecorator`]
//! stamps running headers and page-number footers. Fonts come from a [`FontResolver`],
//! which walks a chain of candidate families until one covers every required script.
//!
//! ```no_run
//! use pdf_flow::{render_document, FlowConfig, FontResolver, Manuscript, RunningTitle};
//!
//! # fn main() -> Result<(), pdf_flow::PDFError> {
//! let mut manuscript = Manuscript::new();
//! manuscript
//!     .heading(1, "1", "Introduction")
//!     .paragraph("Flowing text, wrapped to the column and broken across pages.");
//!
//! let family = FontResolver::default().load()?;
//! let decorator = RunningTitle::new("Report");
//! let document = render_document(&manuscript, FlowConfig::default(), family, decorator)?;
//! document.write_to_path("report.pdf")?;
//! # Ok(())
//! # }
//! ```

mod block;
pub use block::*;

mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

mod config;
pub use config::*;

mod content;

mod decorator;
pub use decorator::*;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod flow;
pub use flow::*;

mod font;
pub use font::*;

mod info;
pub use info::*;

/// Page margins and line wrapping
pub mod layout;

mod outline;
pub use outline::*;

mod page;
pub use page::*;

/// Standard page sizes
pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod resolver;
pub use resolver::*;

mod style;
pub use style::*;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
