//! Length units. All layout arithmetic happens in [`Pt`]; [`Mm`] and [`In`] exist so that
//! configuration can be written in whatever unit the document was designed in.

use derive_more::{
    Add, AddAssign, Deref, DerefMut, Display, From, Into, MulAssign, Sub, SubAssign, Sum,
};
use std::ops::{Div, Mul, Neg};

const PT_PER_IN: f32 = 72.0;
const MM_PER_IN: f32 = 25.4;

/// PostScript points, 1/72 of an inch
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    MulAssign,
    Sum,
    Deref,
    DerefMut,
    From,
    Into,
    Display,
)]
pub struct Pt(pub f32);

/// Millimetres
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    Deref,
    From,
    Into,
    Display,
)]
pub struct Mm(pub f32);

/// Inches
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    Deref,
    From,
    Into,
    Display,
)]
pub struct In(pub f32);

impl Pt {
    /// The larger of two lengths
    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }

    /// The smaller of two lengths
    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }
}

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Mul<Pt> for f32 {
    type Output = Pt;

    fn mul(self, rhs: Pt) -> Pt {
        Pt(self * rhs.0)
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

/// Dividing two lengths yields a plain ratio
impl Div<Pt> for Pt {
    type Output = f32;

    fn div(self, rhs: Pt) -> f32 {
        self.0 / rhs.0
    }
}

impl Neg for Pt {
    type Output = Pt;

    fn neg(self) -> Pt {
        Pt(-self.0)
    }
}

impl From<Mm> for Pt {
    fn from(mm: Mm) -> Pt {
        Pt(mm.0 * PT_PER_IN / MM_PER_IN)
    }
}

impl From<In> for Pt {
    fn from(inches: In) -> Pt {
        Pt(inches.0 * PT_PER_IN)
    }
}

impl From<Pt> for Mm {
    fn from(pt: Pt) -> Mm {
        Mm(pt.0 * MM_PER_IN / PT_PER_IN)
    }
}

impl From<Pt> for In {
    fn from(pt: Pt) -> In {
        In(pt.0 / PT_PER_IN)
    }
}

impl From<Mm> for In {
    fn from(mm: Mm) -> In {
        In(mm.0 / MM_PER_IN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inches_are_72_points() {
        assert_eq!(Pt::from(In(1.0)), Pt(72.0));
        assert_eq!(In::from(Pt(36.0)), In(0.5));
    }

    #[test]
    fn millimetres_round_trip_through_points() {
        let pt: Pt = Mm(25.0).into();
        let mm: Mm = pt.into();
        assert!((mm.0 - 25.0).abs() < 1e-4);
    }

    #[test]
    fn body_line_height_is_about_six_and_a_third_mm() {
        // 12pt text at 1.5 line spacing
        let mm: Mm = (Pt(12.0) * 1.5).into();
        assert!((mm.0 - 6.35).abs() < 0.01);
    }

    #[test]
    fn point_arithmetic() {
        let mut p = Pt(10.0) + Pt(5.0) - Pt(3.0);
        p += Pt(1.0);
        assert_eq!(p, Pt(13.0));
        assert_eq!(Pt(10.0) / Pt(4.0), 2.5);
        assert_eq!(-Pt(2.0), Pt(-2.0));
        let total: Pt = [Pt(1.0), Pt(2.0)].into_iter().sum();
        assert_eq!(total, Pt(3.0));
    }
}
