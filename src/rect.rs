use crate::units::*;

/// A rectangle in PDF page space, specified by two opposite corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the lower-left corner.
    pub x1: Pt,
    /// The y-coordinate of the lower-left corner.
    pub y1: Pt,
    /// The x-coordinate of the upper-right corner.
    pub x2: Pt,
    /// The y-coordinate of the upper-right corner.
    pub y2: Pt,
}

impl Rect {
    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}
