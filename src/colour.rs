/// A colour, expressed in the RGB or grey colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the Gray space, g ranges from 0 to 255
    pub fn new_grey_bytes(g: u8) -> Colour {
        Colour::Grey {
            g: g as f32 / 255.0,
        }
    }
}

impl Default for Colour {
    fn default() -> Self {
        colours::BLACK
    }
}

/// Colours the layout engine uses out of the box
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    /// Running header / footer text (128 of 255)
    pub const MID_GREY: Colour = Colour::Grey { g: 128.0 / 255.0 };
    /// Placeholder box fill
    pub const LIGHT_GREY: Colour = Colour::Grey { g: 0.9 };
}
