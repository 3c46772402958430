use crate::colour::{colours, Colour};
use crate::units::Pt;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Weight {
    #[default]
    Regular,
    Bold,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Slant {
    #[default]
    Upright,
    Italic,
}

/// One of the four faces of a family. Weight and slant combine independently.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Variant {
    pub weight: Weight,
    pub slant: Slant,
}

impl Variant {
    pub const REGULAR: Variant = Variant::new(Weight::Regular, Slant::Upright);
    pub const BOLD: Variant = Variant::new(Weight::Bold, Slant::Upright);
    pub const ITALIC: Variant = Variant::new(Weight::Regular, Slant::Italic);
    pub const BOLD_ITALIC: Variant = Variant::new(Weight::Bold, Slant::Italic);

    /// Every variant, in the order the faces of a family are registered
    pub const ALL: [Variant; 4] = [
        Variant::REGULAR,
        Variant::BOLD,
        Variant::ITALIC,
        Variant::BOLD_ITALIC,
    ];

    pub const fn new(weight: Weight, slant: Slant) -> Variant {
        Variant { weight, slant }
    }

    /// Position of this variant in [`Variant::ALL`]
    pub const fn index(self) -> usize {
        match (self.weight, self.slant) {
            (Weight::Regular, Slant::Upright) => 0,
            (Weight::Bold, Slant::Upright) => 1,
            (Weight::Regular, Slant::Italic) => 2,
            (Weight::Bold, Slant::Italic) => 3,
        }
    }
}

/// Everything needed to draw a run of text, apart from the family, which is fixed for
/// the whole document.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextStyle {
    pub variant: Variant,
    pub size: Pt,
    pub colour: Colour,
}

impl TextStyle {
    pub fn new(variant: Variant, size: Pt) -> TextStyle {
        TextStyle {
            variant,
            size,
            colour: colours::BLACK,
        }
    }

    pub fn regular(size: Pt) -> TextStyle {
        TextStyle::new(Variant::REGULAR, size)
    }

    pub fn bold(size: Pt) -> TextStyle {
        TextStyle::new(Variant::BOLD, size)
    }

    pub fn italic(size: Pt) -> TextStyle {
        TextStyle::new(Variant::ITALIC, size)
    }

    pub fn with_colour(self, colour: Colour) -> TextStyle {
        TextStyle { colour, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_indices_match_registration_order() {
        for (i, variant) in Variant::ALL.iter().enumerate() {
            assert_eq!(variant.index(), i);
        }
    }

    #[test]
    fn bold_and_italic_combine() {
        let v = Variant::new(Weight::Bold, Slant::Italic);
        assert_eq!(v, Variant::BOLD_ITALIC);
        assert_ne!(v, Variant::BOLD);
    }
}
