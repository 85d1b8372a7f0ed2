use std::fmt;

/// An RGB triple. Serialized as `rgb(r,g,b)` to match what the diagram
/// surface expects as a fill/stroke value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    /// Parse a hex color of the form `#rrggbb` or `rrggbb`,
    /// case-insensitive. Malformed input falls back to black rather than
    /// failing.
    pub fn from_hex(hex: &str) -> Rgb {
        let s = hex.strip_prefix('#').unwrap_or(hex);
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Rgb::BLACK;
        }
        Rgb {
            r: u8::from_str_radix(&s[0..2], 16).unwrap_or(0),
            g: u8::from_str_radix(&s[2..4], 16).unwrap_or(0),
            b: u8::from_str_radix(&s[4..6], 16).unwrap_or(0),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Linearly interpolate each channel and round to the nearest integer.
///
/// `t` is not clamped; out-of-range values extrapolate, with channels
/// saturating at their 0..=255 bounds. Callers wanting a valid blend must
/// constrain `t` to `[0, 1]`.
pub fn lerp(c1: Rgb, c2: Rgb, t: f32) -> Rgb {
    let ch = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Rgb {
        r: ch(c1.r, c2.r),
        g: ch(c1.g, c2.g),
        b: ch(c1.b, c2.b),
    }
}

/// Convenience wrapper interpolating between two hex strings.
pub fn lerp_hex(c1: &str, c2: &str, t: f32) -> Rgb {
    lerp(Rgb::from_hex(c1), Rgb::from_hex(c2), t)
}
