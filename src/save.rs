// src/save.rs

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use plotters::backend::{BitMapBackend, SVGBackend};
use plotters::drawing::IntoDrawingArea;

use crate::error::{Error, Result};
use crate::figure::Figure;
use crate::pdf_backend::PdfBackend;
use crate::plot_framework::draw_figure;

/// Output format, which also picks the drawing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveType {
    #[default]
    Pdf,
    Svg,
    Png,
}

impl SaveType {
    pub fn extension(self) -> &'static str {
        match self {
            SaveType::Pdf => "pdf",
            SaveType::Svg => "svg",
            SaveType::Png => "png",
        }
    }
}

impl FromStr for SaveType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(SaveType::Pdf),
            "svg" => Ok(SaveType::Svg),
            "png" => Ok(SaveType::Png),
            _ => Err(Error::UnsupportedSaveType(s.to_string())),
        }
    }
}

impl fmt::Display for SaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Renders `fig` to `path` with the backend for `save_type`.
pub fn save_figure(fig: &Figure, path: &Path, save_type: SaveType) -> Result<()> {
    let size = fig.pixel_size();
    match save_type {
        SaveType::Pdf => {
            let title = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let root = PdfBackend::new(path, size, fig.dpi())
                .with_title(title)
                .into_drawing_area();
            draw_figure(fig, &root)?;
            root.present()?;
        }
        SaveType::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_figure(fig, &root)?;
            root.present()?;
        }
        SaveType::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_figure(fig, &root)?;
            root.present()?;
        }
    }
    log::debug!("Rendered {} ({}x{} px)", path.display(), size.0, size.1);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figsize::FigSize;

    #[test]
    fn test_parse_save_type() {
        assert_eq!("pdf".parse::<SaveType>().unwrap(), SaveType::Pdf);
        assert_eq!("SVG".parse::<SaveType>().unwrap(), SaveType::Svg);
        assert_eq!("png".parse::<SaveType>().unwrap(), SaveType::Png);
        assert!(matches!(
            "eps".parse::<SaveType>(),
            Err(Error::UnsupportedSaveType(t)) if t == "eps"
        ));
    }

    #[test]
    fn test_extension_round_trips_through_display() {
        for t in [SaveType::Pdf, SaveType::Svg, SaveType::Png] {
            assert_eq!(t.to_string(), t.extension());
        }
    }

    #[test]
    fn test_save_empty_figure_as_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.svg");
        let fig = Figure::new(FigSize::new(2.0, 1.0)).with_dpi(50);
        save_figure(&fig, &path, SaveType::Svg).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_save_empty_figure_as_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.pdf");
        let fig = Figure::new(FigSize::new(2.0, 1.0));
        save_figure(&fig, &path, SaveType::Pdf).unwrap();
        assert!(path.exists());
    }
}
