//! Pre-defined page sizes for common paper formats.
//!
//! All sizes are provided in portrait orientation (width, height) where width ≤ height.
//! Use the [`PageOrientation`](crate::pagesize::PageOrientation) trait to flip them.
//!
//! ```
//! use pdf_flow::pagesize::{A4, PageOrientation};
//!
//! let landscape = A4.landscape();
//! assert!(landscape.0 > landscape.1);
//! ```

use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

// north american sizes
pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(13.0 * 72.0));

// iso a-series (converted from mm to points)
pub const A3: PageSize = (Pt(297.0 * 72.0 / 25.4), Pt(420.0 * 72.0 / 25.4));
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));
pub const A6: PageSize = (Pt(105.0 * 72.0 / 25.4), Pt(148.0 * 72.0 / 25.4));

/// Flip a page size between portrait and landscape
pub trait PageOrientation {
    /// Width no greater than height
    fn portrait(self) -> Self;
    /// Width no smaller than height
    fn landscape(self) -> Self;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> PageSize {
        let (w, h) = self;
        if w > h {
            (h, w)
        } else {
            (w, h)
        }
    }

    fn landscape(self) -> PageSize {
        let (w, h) = self;
        if w < h {
            (h, w)
        } else {
            (w, h)
        }
    }
}
