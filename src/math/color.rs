//! Palette generation for rendering symbol ids

/// Number of ids covered by one trip around the hue circle
pub const HUE_PERIOD: f32 = 16.0;

/// Convert HSV components in `[0, 1]` to 8-bit RGB
///
/// Hue wraps, so values outside `[0, 1)` are taken modulo one.
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> [u8; 3] {
    let (r, g, b) = if saturation <= 0.0 {
        (value, value, value)
    } else {
        let h = hue.rem_euclid(1.0) * 6.0;
        let sector = h.floor();
        let f = h - sector;
        let p = value * (1.0 - saturation);
        let q = value * f.mul_add(-saturation, 1.0);
        let t = value * (1.0 - f).mul_add(-saturation, 1.0);

        match sector as u8 {
            0 => (value, t, p),
            1 => (q, value, p),
            2 => (p, value, t),
            3 => (p, q, value),
            4 => (t, p, value),
            _ => (value, p, q),
        }
    };

    [to_channel(r), to_channel(g), to_channel(b)]
}

/// Distinct colour for a symbol id, spreading ids around the hue circle
pub fn symbol_color(id: i32, saturation: f32, value: f32) -> [u8; 3] {
    hsv_to_rgb(id as f32 / HUE_PERIOD, saturation, value)
}

fn to_channel(component: f32) -> u8 {
    (component.clamp(0.0, 1.0) * 255.0).round() as u8
}
