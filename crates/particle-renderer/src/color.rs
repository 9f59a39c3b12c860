//! Colors and CSS color parsing

/// RGBA color with sRGB-encoded channels in [0, 1].
///
/// Frames are presented to a non-sRGB surface, so blending happens on the
/// encoded values directly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }

    /// Multiply the current alpha
    pub fn fade(mut self, factor: f32) -> Self {
        self.a = (self.a * factor).clamp(0.0, 1.0);
        self
    }

    /// Integer channels, alpha dropped
    pub fn to_rgb8(self) -> [u8; 3] {
        [to_u8(self.r), to_u8(self.g), to_u8(self.b)]
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Component-wise interpolation from `self` (t = 0) to `other` (t = 1)
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Catppuccin Mocha base, used to clear every frame
    pub fn background() -> Color {
        let rgb = catppuccin::PALETTE.mocha.colors.base.rgb;
        Color::from_rgba8(rgb.r, rgb.g, rgb.b, 255)
    }

    /// Parse CSS color text. Anything unrecognized becomes opaque black.
    pub fn parse(text: &str) -> Color {
        parse_css(text.trim()).unwrap_or(Color::BLACK)
    }
}

fn to_u8(c: f32) -> u8 {
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

fn parse_css(text: &str) -> Option<Color> {
    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = text.to_ascii_lowercase();
    let (body, has_alpha) = if let Some(rest) = lower.strip_prefix("rgba(") {
        (rest.strip_suffix(')')?, true)
    } else if let Some(rest) = lower.strip_prefix("rgb(") {
        (rest.strip_suffix(')')?, false)
    } else {
        return None;
    };

    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let expected = if has_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }

    let channel = |s: &str| s.parse::<f32>().ok().map(|v| v.clamp(0.0, 255.0).round() as u8);
    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    let a = if has_alpha {
        parts[3].parse::<f32>().ok()?.clamp(0.0, 1.0)
    } else {
        1.0
    };

    Some(Color::from_rgba8(r, g, b, 255).with_alpha(a))
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::from_rgba8(r, g, b, 255))
        }
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
            Some(Color::from_rgba8(digit(0)?, digit(1)?, digit(2)?, 255))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::parse("#3b82f6").to_rgb8(), [0x3b, 0x82, 0xf6]);
        assert_eq!(Color::parse("#f0a").to_rgb8(), [0xff, 0x00, 0xaa]);
        assert_eq!(Color::parse("#F59E0B").to_rgb8(), [0xf5, 0x9e, 0x0b]);
    }

    #[test]
    fn test_parse_rgb_functions() {
        assert_eq!(Color::parse("rgb(10, 20, 30)").to_rgb8(), [10, 20, 30]);
        let c = Color::parse("rgba(255,0,0,0.5)");
        assert_eq!(c.to_rgb8(), [255, 0, 0]);
        assert!((c.a - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_malformed_is_black() {
        for bad in ["", "blue", "#12", "#gggggg", "rgb(1,2)", "rgba(1,2,3)", "rgb(a,b,c)"] {
            assert_eq!(Color::parse(bad), Color::BLACK, "{bad}");
        }
    }

    #[test]
    fn test_background_is_mocha_base() {
        assert_eq!(Color::background().to_rgb8(), [30, 30, 46]);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Color::new(1.0, 0.0, 0.0, 0.8);
        let b = a.with_alpha(0.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert!((a.lerp(b, 0.5).a - 0.4).abs() < 1e-6);
    }
}
