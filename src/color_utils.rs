//! Color utility functions for label states.
//!
//! Labels without an explicit background color get one from a golden-angle
//! palette so neighbouring labels stay visually distinct.

/// Convert HSV to RGB.
///
/// # Arguments
/// * `h` - Hue in degrees (0-360)
/// * `s` - Saturation (0.0-1.0)
/// * `v` - Value/brightness (0.0-1.0)
///
/// # Returns
/// RGB tuple with values in range 0.0-1.0
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r + m, g + m, b + m)
}

/// Format normalized RGB components as a `#rrggbb` string.
pub fn rgb_to_hex(r: f32, g: f32, b: f32) -> String {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}

/// Palette color for the label at `index`.
pub fn label_color(index: usize) -> String {
    let hue = (index as f32 * 137.5) % 360.0;
    let (r, g, b) = hsv_to_rgb(hue, 0.7, 0.9);
    rgb_to_hex(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_to_rgb_red() {
        let (r, g, b) = hsv_to_rgb(0.0, 1.0, 1.0);
        assert!((r - 1.0).abs() < 0.01);
        assert!(g.abs() < 0.01);
        assert!(b.abs() < 0.01);
    }

    #[test]
    fn test_hsv_to_rgb_blue() {
        let (r, g, b) = hsv_to_rgb(240.0, 1.0, 1.0);
        assert!(r.abs() < 0.01);
        assert!(g.abs() < 0.01);
        assert!((b - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_rgb_to_hex() {
        assert_eq!(rgb_to_hex(1.0, 0.0, 0.0), "#ff0000");
        assert_eq!(rgb_to_hex(0.0, 1.0, 1.0), "#00ffff");
        // Out of range components are clamped
        assert_eq!(rgb_to_hex(2.0, -1.0, 0.0), "#ff0000");
    }

    #[test]
    fn test_label_color_distinct() {
        let first = label_color(0);
        let second = label_color(1);
        assert_eq!(first.len(), 7);
        assert!(first.starts_with('#'));
        assert_ne!(first, second);
    }
}
