use smart_leds::RGB8;

pub type Rgb = RGB8;

/// Color with a dedicated white component
///
/// The white byte only reaches the wire on four-channel strips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgbw {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub w: u8,
}

impl Rgbw {
    pub const fn new(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self { r, g, b, w }
    }
}

impl From<Rgb> for Rgbw {
    fn from(color: Rgb) -> Self {
        Self::new(color.r, color.g, color.b, 0)
    }
}
