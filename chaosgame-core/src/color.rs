use serde::{Deserialize, Serialize};

/// A solid RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Map a hue in degrees to RGB at full saturation and value.
    ///
    /// Standard HSV sector conversion with `s = v = 1`. The hue is wrapped
    /// into `[0, 360)` first, so out-of-range and negative values are legal.
    pub fn from_hue(degrees: f64) -> Self {
        let h = degrees.rem_euclid(360.0) / 60.0;
        let i = h.floor();
        let f = h - i;

        // With s = v = 1: p = 0, q = 1 - f, t = f.
        let q = 1.0 - f;
        let (r, g, b) = match i as u32 % 6 {
            0 => (1.0, f, 0.0),
            1 => (q, 1.0, 0.0),
            2 => (0.0, 1.0, f),
            3 => (0.0, q, 1.0),
            4 => (f, 0.0, 1.0),
            _ => (1.0, 0.0, q),
        };

        Self {
            r: (r * 255.0).round() as u8,
            g: (g * 255.0).round() as u8,
            b: (b * 255.0).round() as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hues() {
        assert_eq!(Rgb::from_hue(0.0), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::from_hue(120.0), Rgb::new(0, 255, 0));
        assert_eq!(Rgb::from_hue(240.0), Rgb::new(0, 0, 255));
    }

    #[test]
    fn secondary_hues() {
        assert_eq!(Rgb::from_hue(60.0), Rgb::new(255, 255, 0));
        assert_eq!(Rgb::from_hue(180.0), Rgb::new(0, 255, 255));
        assert_eq!(Rgb::from_hue(300.0), Rgb::new(255, 0, 255));
    }

    #[test]
    fn hue_wraps() {
        assert_eq!(Rgb::from_hue(360.0), Rgb::from_hue(0.0));
        assert_eq!(Rgb::from_hue(480.0), Rgb::from_hue(120.0));
        assert_eq!(Rgb::from_hue(-120.0), Rgb::from_hue(240.0));
    }
}
