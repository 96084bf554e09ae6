//! Theme color parsing with hardcoded fallbacks.
//!
//! Theme values arrive as CSS strings (custom properties, computed styles)
//! and may be absent or malformed. Parse failures are recoverable by
//! design: callers substitute a default and keep the frame loop running.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,
    #[error("malformed color `{0}`")]
    Malformed(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

/// Accent used whenever a theme color fails to parse.
pub const FALLBACK_ACCENT: Rgba = Rgba {
    r: 0x60,
    g: 0xa5,
    b: 0xfa,
    a: 1.0,
};

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Additive lighten, clamped per channel.
    pub fn lighten(self, amount: i16) -> Self {
        let adj = |c: u8| (c as i16 + amount).clamp(0, 255) as u8;
        Self {
            r: adj(self.r),
            g: adj(self.g),
            b: adj(self.b),
            a: self.a,
        }
    }

    /// WCAG relative luminance, 0 (black) to 1 (white).
    pub fn luminance(&self) -> f32 {
        fn linear(c: u8) -> f32 {
            let v = c as f32 / 255.0;
            if v <= 0.03928 {
                v / 12.92
            } else {
                ((v + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }

    /// Normalized channels for GPU upload.
    pub fn to_linear_f32(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a,
        ]
    }
}

/// Parses `#rgb`, `#rrggbb`, `rgb(...)` and `rgba(...)` strings.
pub fn parse(input: &str) -> Result<Rgba, ColorParseError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ColorParseError::Empty);
    }
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| ColorParseError::Malformed(input.to_string()));
    }
    if s.starts_with("rgb") {
        return parse_rgb_fn(s).ok_or_else(|| ColorParseError::Malformed(input.to_string()));
    }
    Err(ColorParseError::Malformed(input.to_string()))
}

/// Parse, falling back to `default` with a warning on malformed input.
/// Capability-absence (empty string) falls back silently.
pub fn parse_or(input: &str, default: Rgba) -> Rgba {
    match parse(input) {
        Ok(c) => c,
        Err(ColorParseError::Empty) => default,
        Err(err) => {
            log::warn!("color parse failed ({err}); using fallback");
            default
        }
    }
}

/// Glow intensity for a surface of luminance `l`: dark surfaces glow, light
/// ones do not.
pub fn glow_from_luminance(l: f32) -> f32 {
    ((0.6 - l) / 0.6).clamp(0.0, 1.0)
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    let expand = |c: u8| (c << 4) | c;
    match hex.len() {
        3 => {
            let v = u16::from_str_radix(hex, 16).ok()?;
            Some(Rgba::opaque(
                expand(((v >> 8) & 0xf) as u8),
                expand(((v >> 4) & 0xf) as u8),
                expand((v & 0xf) as u8),
            ))
        }
        6 => {
            let v = u32::from_str_radix(hex, 16).ok()?;
            Some(Rgba::opaque(
                ((v >> 16) & 0xff) as u8,
                ((v >> 8) & 0xff) as u8,
                (v & 0xff) as u8,
            ))
        }
        _ => None,
    }
}

fn parse_rgb_fn(s: &str) -> Option<Rgba> {
    let open = s.find('(')?;
    let close = s.rfind(')')?;
    let parts: Vec<&str> = s.get(open + 1..close)?.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let chan = |p: &str| -> Option<u8> {
        let v: f32 = p.parse().ok()?;
        if !v.is_finite() {
            return None;
        }
        Some(v.clamp(0.0, 255.0) as u8)
    };
    let r = chan(parts[0])?;
    let g = chan(parts[1])?;
    let b = chan(parts[2])?;
    let a = if parts.len() == 4 {
        let v: f32 = parts[3].parse().ok()?;
        v.clamp(0.0, 1.0)
    } else {
        1.0
    };
    Some(Rgba { r, g, b, a })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(parse("#fff").unwrap(), Rgba::opaque(255, 255, 255));
        assert_eq!(parse("#60a5fa").unwrap(), Rgba::opaque(0x60, 0xa5, 0xfa));
    }

    #[test]
    fn parses_rgb_functions() {
        assert_eq!(parse("rgb(12, 40, 120)").unwrap(), Rgba::opaque(12, 40, 120));
        let c = parse("rgba(12, 40, 120, 0.5)").unwrap();
        assert!((c.a - 0.5).abs() < 1e-6);
    }

    #[test]
    fn malformed_input_is_recoverable() {
        assert!(parse("#zzz").is_err());
        assert!(parse("hsl(10, 10%, 10%)").is_err());
        assert_eq!(parse_or("#zzz", FALLBACK_ACCENT), FALLBACK_ACCENT);
        assert_eq!(parse_or("", FALLBACK_ACCENT), FALLBACK_ACCENT);
    }

    #[test]
    fn luminance_orders_black_below_white() {
        let black = Rgba::opaque(0, 0, 0).luminance();
        let white = Rgba::opaque(255, 255, 255).luminance();
        assert!(black < 0.01);
        assert!(white > 0.99);
        assert!(glow_from_luminance(black) > glow_from_luminance(white));
    }
}
