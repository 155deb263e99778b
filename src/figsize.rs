// src/figsize.rs

use crate::config::rc;
use crate::constants::GOLDEN;
use crate::error::Result;
use crate::length::Dim;

/// Figure width and height in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigSize {
    pub width: f64,
    pub height: f64,
}

impl FigSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Pixel dimensions at `dpi`, never smaller than 1x1.
    pub fn pixels(&self, dpi: u32) -> (u32, u32) {
        let px = |inches: f64| ((inches * dpi as f64).round() as i64).max(1) as u32;
        (px(self.width), px(self.height))
    }
}

impl From<FigSize> for (f64, f64) {
    fn from(s: FigSize) -> Self {
        (s.width, s.height)
    }
}

/// Requested size of a figure in convenient units.
///
/// `aspect` is the width / height of a single axes; the figure aspect becomes
/// `aspect * ncols / nrows` so that each axes in an `nrows x ncols` grid keeps
/// roughly that shape (padding between axes is neglected).
#[derive(Debug, Clone, PartialEq)]
pub struct SizeSpec {
    pub width: Dim,
    pub height: Dim,
    pub aspect: f64,
    pub nrows: usize,
    pub ncols: usize,
}

impl Default for SizeSpec {
    fn default() -> Self {
        Self {
            width: Dim::Default,
            height: Dim::Default,
            aspect: GOLDEN,
            nrows: 1,
            ncols: 1,
        }
    }
}

impl SizeSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: impl Into<Dim>) -> Self {
        self.width = width.into();
        self
    }

    pub fn height(mut self, height: impl Into<Dim>) -> Self {
        self.height = height.into();
        self
    }

    pub fn aspect(mut self, aspect: f64) -> Self {
        self.aspect = aspect;
        self
    }

    pub fn grid(mut self, nrows: usize, ncols: usize) -> Self {
        self.nrows = nrows;
        self.ncols = ncols;
        self
    }

    pub fn figure_aspect(&self) -> f64 {
        self.aspect * self.ncols.max(1) as f64 / self.nrows.max(1) as f64
    }

    /// Computes the concrete size, taking `default_width` when neither
    /// dimension is given. When both are given the aspect is ignored.
    pub fn resolve(&self, default_width: f64) -> Result<FigSize> {
        let aspect = self.figure_aspect();
        let size = match (self.width.to_inches()?, self.height.to_inches()?) {
            (None, None) => FigSize::new(default_width, default_width / aspect),
            (None, Some(h)) => FigSize::new(h * aspect, h),
            (Some(w), None) => FigSize::new(w, w / aspect),
            (Some(w), Some(h)) => FigSize::new(w, h),
        };
        log::debug!(
            "Resolved figure size {:.3} x {:.3} in (aspect {:.3})",
            size.width,
            size.height,
            aspect
        );
        Ok(size)
    }
}

/// Resolves `spec` against the configured default figure width.
pub fn standard_figsize(spec: &SizeSpec) -> Result<FigSize> {
    spec.resolve(rc().figure.width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_no_arguments_uses_default_width() {
        let size = SizeSpec::new().resolve(6.4).unwrap();
        assert_eq!(size.width, 6.4);
        assert!(close(size.height, 6.4 / GOLDEN));
    }

    #[test]
    fn test_standard_figsize_uses_rc_width() {
        let size = standard_figsize(&SizeSpec::new()).unwrap();
        let w = rc().figure.width;
        assert_eq!(size.width, w);
        assert!(close(size.height, w / GOLDEN));
    }

    #[test]
    fn test_width_only_with_grid() {
        let size = SizeSpec::new().width(10.0).grid(2, 1).resolve(6.4).unwrap();
        assert_eq!(size.width, 10.0);
        assert!(close(size.height, 10.0 * 2.0 / GOLDEN));
    }

    #[test]
    fn test_height_only() {
        let size = SizeSpec::new().height(2.0).aspect(1.5).grid(1, 2).resolve(6.4).unwrap();
        assert!(close(size.width, 6.0));
        assert_eq!(size.height, 2.0);
    }

    #[test]
    fn test_both_given_ignores_aspect_and_grid() {
        let size = SizeSpec::new()
            .width(10.0)
            .height(5.0)
            .aspect(3.0)
            .grid(4, 1)
            .resolve(6.4)
            .unwrap();
        assert_eq!(size, FigSize::new(10.0, 5.0));
    }

    #[test]
    fn test_length_strings() {
        let size = SizeSpec::new().width("2.54cm").height("72.27pt").resolve(6.4).unwrap();
        assert!(close(size.width, 1.0));
        assert!(close(size.height, 1.0));

        let size = SizeSpec::new().width("tex_letter_width").resolve(6.4).unwrap();
        assert!(close(size.height, 4.77376504773765 / GOLDEN));
    }

    #[test]
    fn test_unit_error_propagates() {
        let err = SizeSpec::new().width("3parsecs").resolve(6.4).unwrap_err();
        assert!(matches!(err, Error::UnknownUnit { .. }));
    }

    #[test]
    fn test_pixels() {
        assert_eq!(FigSize::new(6.4, 4.8).pixels(100), (640, 480));
        assert_eq!(FigSize::new(0.0, 0.0).pixels(100), (1, 1));
    }
}
