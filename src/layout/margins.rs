use crate::pagesize::PageSize;
use crate::units::Pt;

/// Margins bound the body flow on every page. Running headers and footers live
/// outside of them, in the reserved zones between the margins and the page edges.
/// The margins are also written to each page's `ArtBox`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl<D: Into<Pt>>(top: D, right: D, bottom: D, left: D) -> Margins {
        Margins {
            top: top.into(),
            right: right.into(),
            bottom: bottom.into(),
            left: left.into(),
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric<D: Into<Pt>>(vertical: D, horizontal: D) -> Margins {
        let vertical: Pt = vertical.into();
        let horizontal: Pt = horizontal.into();
        Margins {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Width left for content between the left and right margins
    pub fn printable_width(&self, page_size: PageSize) -> Pt {
        page_size.0 - self.left - self.right
    }

    /// Height left for content between the top and bottom margins
    pub fn printable_height(&self, page_size: PageSize) -> Pt {
        page_size.1 - self.top - self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize::A4;
    use crate::units::Mm;

    #[test]
    fn a4_with_25mm_margins_leaves_160mm_column() {
        let margins = Margins::all(Mm(25.0));
        let width: Mm = margins.printable_width(A4).into();
        let height: Mm = margins.printable_height(A4).into();
        assert!((width.0 - 160.0).abs() < 0.01);
        assert!((height.0 - 247.0).abs() < 0.01);
    }

    #[test]
    fn symmetric_margins() {
        let m = Margins::symmetric(Pt(10.0), Pt(20.0));
        assert_eq!(m, Margins::trbl(Pt(10.0), Pt(20.0), Pt(10.0), Pt(20.0)));
    }
}
