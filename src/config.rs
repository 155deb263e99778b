// src/config.rs

//! Process-wide defaults ("rc params") for figures and output.
//!
//! The config file is optional. Lookup order:
//! 1. `$DOCFIGS_CONFIG`
//! 2. `./docfigs.toml`
//!
//! Anything missing falls back to the built-in defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::constants::{
    CONFIG_ENV_VAR, CONFIG_FILE_NAME, DEFAULT_DPI,
    DEFAULT_FIGURE_WIDTH_IN, DEFAULT_SAVE_DIR, DEFAULT_SAVE_TYPE, FONT_SIZE_ANNOTATION_PT,
    FONT_SIZE_LABEL_PT, FONT_SIZE_LEGEND_PT, FONT_SIZE_SUPTITLE_PT, FONT_SIZE_TICK_PT,
    FONT_SIZE_TITLE_PT, MAX_DPI, MIN_DPI,
};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RcParams {
    pub figure: FigureParams,
    pub font: FontParams,
    pub output: OutputParams,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct FigureParams {
    /// Default figure width in inches; the size calculator starts from this.
    pub width: f64,
    pub dpi: u32,
}

impl Default for FigureParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_FIGURE_WIDTH_IN,
            dpi: DEFAULT_DPI,
        }
    }
}

/// Font family and sizes in points.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct FontParams {
    pub family: String,
    pub suptitle: f64,
    pub title: f64,
    pub label: f64,
    pub tick: f64,
    pub annotation: f64,
    pub legend: f64,
}

impl Default for FontParams {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            suptitle: FONT_SIZE_SUPTITLE_PT,
            title: FONT_SIZE_TITLE_PT,
            label: FONT_SIZE_LABEL_PT,
            tick: FONT_SIZE_TICK_PT,
            annotation: FONT_SIZE_ANNOTATION_PT,
            legend: FONT_SIZE_LEGEND_PT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct OutputParams {
    pub save_dir: String,
    pub save_type: String,
    pub parallel: bool,
    /// Worker count when `parallel` is on; 0 lets the pool decide.
    pub workers: usize,
}

impl Default for OutputParams {
    fn default() -> Self {
        Self {
            save_dir: DEFAULT_SAVE_DIR.to_string(),
            save_type: DEFAULT_SAVE_TYPE.to_string(),
            parallel: true,
            workers: 0,
        }
    }
}

impl RcParams {
    /// Load from the default location, or defaults if there is no file.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        log::info!("Loading config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let params: RcParams = toml::from_str(contents)?;
        params.validate()?;
        Ok(params)
    }

    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return PathBuf::from(path);
        }
        PathBuf::from(CONFIG_FILE_NAME)
    }

    fn validate(&self) -> Result<()> {
        let f = &self.figure;
        if !(f.width.is_finite() && f.width > 0.0) {
            return Err(Error::Config(format!(
                "figure.width must be positive, got {}",
                f.width
            )));
        }
        if !(MIN_DPI..=MAX_DPI).contains(&f.dpi) {
            return Err(Error::Config(format!(
                "figure.dpi must be between {MIN_DPI} and {MAX_DPI}, got {}",
                f.dpi
            )));
        }
        let font = &self.font;
        for (name, size) in [
            ("suptitle", font.suptitle),
            ("title", font.title),
            ("label", font.label),
            ("tick", font.tick),
            ("annotation", font.annotation),
            ("legend", font.legend),
        ] {
            if !(size > 0.0 && size <= 144.0) {
                return Err(Error::Config(format!(
                    "font.{name} must be in (0, 144], got {size}"
                )));
            }
        }
        if self.output.save_dir.is_empty() {
            return Err(Error::Config("output.save_dir must not be empty".into()));
        }
        Ok(())
    }
}

static RC: OnceLock<RcParams> = OnceLock::new();

/// The process-wide parameters, loaded on first use.
pub fn rc() -> &'static RcParams {
    RC.get_or_init(|| {
        RcParams::load().unwrap_or_else(|e| {
            log::warn!("Ignoring config file: {e}");
            RcParams::default()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let rc = RcParams::default();
        assert_eq!(rc.figure.width, 6.4);
        assert_eq!(rc.figure.dpi, 100);
        assert_eq!(rc.output.save_dir, "figures");
        assert_eq!(rc.output.save_type, "pdf");
        assert!(rc.output.parallel);
        assert!(rc.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let rc = RcParams::from_toml_str(
            r#"
[figure]
width = 3.4

[output]
save_type = "svg"
parallel = false
"#,
        )
        .unwrap();
        assert_eq!(rc.figure.width, 3.4);
        assert_eq!(rc.figure.dpi, 100);
        assert_eq!(rc.output.save_type, "svg");
        assert!(!rc.output.parallel);
        assert_eq!(rc.font, FontParams::default());
    }

    #[test]
    fn test_deny_unknown_fields() {
        let result = RcParams::from_toml_str("[figure]\nwidht = 3.0\n");
        assert!(matches!(result, Err(Error::Toml(_))));

        // Heights always come from the width and aspect ratio.
        let result = RcParams::from_toml_str("[figure]\nheight = 3.0\n");
        assert!(matches!(result, Err(Error::Toml(_))));
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            RcParams::from_toml_str("[figure]\ndpi = 5\n"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            RcParams::from_toml_str("[figure]\nwidth = -1.0\n"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            RcParams::from_toml_str("[font]\ntick = 0.0\n"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let rc = RcParams::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(rc, RcParams::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docfigs.toml");
        std::fs::write(&path, "[figure]\ndpi = 300\n").unwrap();
        let rc = RcParams::load_from(&path).unwrap();
        assert_eq!(rc.figure.dpi, 300);
    }
}
