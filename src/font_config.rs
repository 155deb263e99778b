// src/font_config.rs

// Font sizes and text measurement shared by the renderer and the PDF backend.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::config::rc;
use crate::constants::POINTS_PER_INCH;

/// Which configured size a piece of text uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Suptitle,
    Title,
    Label,
    Tick,
    Annotation,
    Legend,
}

impl TextRole {
    /// Configured size in points.
    pub fn points(self) -> f64 {
        let font = &rc().font;
        match self {
            TextRole::Suptitle => font.suptitle,
            TextRole::Title => font.title,
            TextRole::Label => font.label,
            TextRole::Tick => font.tick,
            TextRole::Annotation => font.annotation,
            TextRole::Legend => font.legend,
        }
    }
}

/// Points to pixels at `dpi`.
pub fn pt_to_px(points: f64, dpi: u32) -> f64 {
    points * dpi as f64 / POINTS_PER_INCH
}

/// Configured font family for all text.
pub fn font_family() -> &'static str {
    rc().font.family.as_str()
}

static MEASURE_FONT: OnceLock<Option<rusttype::Font<'static>>> = OnceLock::new();

fn find_system_font_bytes() -> Option<&'static [u8]> {
    let candidates = [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];
    for p in candidates.iter() {
        if Path::new(p).exists() {
            if let Ok(bytes) = fs::read(p) {
                // Leak into static for the rusttype lifetime
                let leaked = Box::leak(bytes.into_boxed_slice());
                return Some(&*leaked);
            }
        }
    }
    None
}

/// System font used for measuring text, parsed once per process.
fn measure_font() -> Option<&'static rusttype::Font<'static>> {
    MEASURE_FONT
        .get_or_init(|| find_system_font_bytes().and_then(rusttype::Font::try_from_bytes))
        .as_ref()
}

/// Advance width of `text` in pixels, measured with a system TTF if one is
/// installed.
fn measured_text_width_px(text: &str, font_px: f32) -> Option<f32> {
    let font = measure_font()?;
    let scale = rusttype::Scale::uniform(font_px);
    Some(
        text.chars()
            .map(|ch| font.glyph(ch).scaled(scale).h_metrics().advance_width)
            .sum(),
    )
}

/// Per-character width estimate for proportional sans fonts.
fn estimated_text_width_px(text: &str, font_px: f32) -> f32 {
    let mut w = 0.0f32;
    for ch in text.chars() {
        w += match ch {
            'i' | 'l' | 'I' | 'j' | '\'' | '|' | ':' | '.' | ',' => 0.28,
            ' ' => 0.28,
            'f' | 't' | 'r' => 0.36,
            '0'..='9' => 0.56,
            'm' | 'w' | 'M' | 'W' => 0.85,
            c if c.is_uppercase() => 0.67,
            _ => 0.52,
        };
    }
    w * font_px
}

/// (width, height) of a single line of text in pixels.
pub fn text_size_px(text: &str, font_px: f64) -> (u32, u32) {
    let font_px = font_px as f32;
    let width = measured_text_width_px(text, font_px)
        .unwrap_or_else(|| estimated_text_width_px(text, font_px));
    (width.ceil().max(0.0) as u32, font_px.ceil().max(1.0) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pt_to_px() {
        assert_eq!(pt_to_px(72.0, 100), 100.0);
        assert_eq!(pt_to_px(9.0, 200), 25.0);
    }

    #[test]
    fn test_text_size_grows_with_text() {
        let (short, h1) = text_size_px("a", 12.0);
        let (long, h2) = text_size_px("a much longer label", 12.0);
        assert!(long > short);
        assert_eq!(h1, h2);
        assert_eq!(h1, 12);
    }

    #[test]
    fn test_measure_font_is_parsed_once() {
        let first = measure_font().map(|f| f as *const _);
        let second = measure_font().map(|f| f as *const _);
        assert_eq!(first, second);
    }

    #[test]
    fn test_estimate_is_proportional_to_size() {
        let small = estimated_text_width_px("Label 42", 10.0);
        let large = estimated_text_width_px("Label 42", 20.0);
        assert!((large - 2.0 * small).abs() < 1e-3);
    }
}
