// ---------------------------------------------------------------------------
// Hex codes
// ---------------------------------------------------------------------------

/// Parse `#rgb` or `#rrggbb` (the `#` is optional) into channel values.
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some((channel(0)?, channel(1)?, channel(2)?))
        }
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some((channel(0)?, channel(2)?, channel(4)?))
        }
        _ => None,
    }
}

pub fn to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

// ---------------------------------------------------------------------------
// HslColor
// ---------------------------------------------------------------------------

/// Hue in degrees (0..360), saturation and lightness in percent (0..100).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslColor {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl HslColor {
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: h.rem_euclid(360.0),
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
        }
    }

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let (r, g, b) = (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let l = (max + min) / 2.0;

        if delta == 0.0 {
            return Self::new(0.0, 0.0, l * 100.0);
        }

        let s = delta / (1.0 - (2.0 * l - 1.0).abs());
        let h = if max == r {
            ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        Self::new(h * 60.0, s * 100.0, l * 100.0)
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        parse_hex(hex).map(|(r, g, b)| Self::from_rgb(r, g, b))
    }

    pub fn to_rgb(self) -> (u8, u8, u8) {
        let s = self.s / 100.0;
        let l = self.l / 100.0;
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h = self.h / 60.0;
        let x = c * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        (channel(r), channel(g), channel(b))
    }

    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb();
        to_hex(r, g, b)
    }
}

// ---------------------------------------------------------------------------
// ColorPicker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderFocus {
    Hue,
    Saturation,
    Lightness,
}

impl SliderFocus {
    pub fn next(self) -> Self {
        match self {
            SliderFocus::Hue => SliderFocus::Saturation,
            SliderFocus::Saturation => SliderFocus::Lightness,
            SliderFocus::Lightness => SliderFocus::Hue,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            SliderFocus::Hue => SliderFocus::Lightness,
            SliderFocus::Saturation => SliderFocus::Hue,
            SliderFocus::Lightness => SliderFocus::Saturation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMode {
    Slider,
    HexInput,
}

/// Interactive state behind the color input. The picker never owns the
/// field value; callers copy `hex()` into the form after every change.
#[derive(Debug, Clone)]
pub struct ColorPicker {
    pub color: HslColor,
    pub focus: SliderFocus,
    pub mode: PickerMode,
    pub hex_input: String,
}

impl ColorPicker {
    /// Start from the field's current value. An unparseable value leaves the
    /// sliders at black but keeps the text for the hex editor.
    pub fn new(value: &str) -> Self {
        Self {
            color: HslColor::from_hex(value).unwrap_or(HslColor::new(0.0, 0.0, 0.0)),
            focus: SliderFocus::Hue,
            mode: PickerMode::Slider,
            hex_input: value.to_string(),
        }
    }

    pub fn hex(&self) -> String {
        self.color.to_hex()
    }

    pub fn adjust(&mut self, delta: f64) {
        let c = self.color;
        self.color = match self.focus {
            SliderFocus::Hue => HslColor::new(c.h + delta, c.s, c.l),
            SliderFocus::Saturation => HslColor::new(c.h, c.s + delta, c.l),
            SliderFocus::Lightness => HslColor::new(c.h, c.s, c.l + delta),
        };
        self.hex_input = self.hex();
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            PickerMode::Slider => PickerMode::HexInput,
            PickerMode::HexInput => PickerMode::Slider,
        };
    }

    /// Apply the hex buffer to the sliders. Returns false when it does not parse.
    pub fn commit_hex_input(&mut self) -> bool {
        match HslColor::from_hex(&self.hex_input) {
            Some(c) => {
                self.color = c;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_long_and_short() {
        assert_eq!(parse_hex("#d87b64"), Some((0xd8, 0x7b, 0x64)));
        assert_eq!(parse_hex("D87B64"), Some((0xd8, 0x7b, 0x64)));
        assert_eq!(parse_hex("#fa0"), Some((0xff, 0xaa, 0x00)));
    }

    #[test]
    fn parse_hex_rejects_garbage() {
        assert_eq!(parse_hex(""), None);
        assert_eq!(parse_hex("#12"), None);
        assert_eq!(parse_hex("#gg0000"), None);
        assert_eq!(parse_hex("#ff00aa00"), None);
        assert_eq!(parse_hex("#é00"), None);
    }

    #[test]
    fn hsl_primaries() {
        assert_eq!(HslColor::new(0.0, 100.0, 50.0).to_hex(), "#ff0000");
        assert_eq!(HslColor::new(120.0, 100.0, 50.0).to_hex(), "#00ff00");
        assert_eq!(HslColor::new(240.0, 100.0, 50.0).to_hex(), "#0000ff");
        assert_eq!(HslColor::new(0.0, 0.0, 100.0).to_hex(), "#ffffff");
    }

    #[test]
    fn hsl_preserves_default_color() {
        let c = HslColor::from_hex("#d87b64").unwrap();
        assert_eq!(c.to_hex(), "#d87b64");
    }

    #[test]
    fn hsl_clamps_and_wraps() {
        let c = HslColor::new(400.0, 150.0, -10.0);
        assert!((c.h - 40.0).abs() < 0.01);
        assert!((c.s - 100.0).abs() < 0.01);
        assert!(c.l.abs() < 0.01);
    }

    #[test]
    fn picker_adjust_updates_hex_buffer() {
        let mut picker = ColorPicker::new("#ff0000");
        picker.focus = SliderFocus::Hue;
        picker.adjust(120.0);
        assert_eq!(picker.hex(), "#00ff00");
        assert_eq!(picker.hex_input, "#00ff00");
    }

    #[test]
    fn picker_hue_wraps_below_zero() {
        let mut picker = ColorPicker::new("#ff0000");
        picker.adjust(-10.0);
        assert!((picker.color.h - 350.0).abs() < 0.5);
    }

    #[test]
    fn picker_commit_invalid_hex_keeps_color() {
        let mut picker = ColorPicker::new("#00ff00");
        picker.hex_input = "nope".into();
        assert!(!picker.commit_hex_input());
        assert_eq!(picker.hex(), "#00ff00");
    }

    #[test]
    fn slider_focus_cycles() {
        assert_eq!(SliderFocus::Hue.next(), SliderFocus::Saturation);
        assert_eq!(SliderFocus::Hue.prev(), SliderFocus::Lightness);
        assert_eq!(SliderFocus::Lightness.next(), SliderFocus::Hue);
    }
}
