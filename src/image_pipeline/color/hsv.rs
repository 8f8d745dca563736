//! RGB to HSV conversion

/// Hue in degrees `[0, 360)`, saturation and value in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

/// Converts an 8-bit RGB triple to HSV.
///
/// Black and grays have no defined hue; both report `hue = 0`.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let value = max;
    if max == 0.0 {
        return Hsv {
            hue: 0.0,
            saturation: 0.0,
            value,
        };
    }

    let saturation = delta / max;
    if delta == 0.0 {
        return Hsv {
            hue: 0.0,
            saturation,
            value,
        };
    }

    // Ties resolve red first, then green.
    let mut hue = if r == max {
        60.0 * ((g - b) / delta)
    } else if g == max {
        60.0 * (2.0 + (b - r) / delta)
    } else {
        60.0 * (4.0 + (r - g) / delta)
    };
    if hue < 0.0 {
        hue += 360.0;
    }

    Hsv {
        hue,
        saturation,
        value,
    }
}
