// src/pdf_backend.rs

//! A plotters drawing backend that writes vector PDF through oxidize-pdf.
//!
//! Plotters lays the figure out in pixels at the figure dpi; every coordinate
//! is scaled to PDF points (72 per inch) and flipped so the origin sits at the
//! bottom left, as PDF expects. Text is set in the standard Helvetica faces.

use std::path::{Path, PathBuf};

use oxidize_pdf::{Color as PdfColor, Document, Font, Page};
use plotters_backend::text_anchor::{HPos, VPos};
use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind,
    FontStyle,
};

use crate::constants::POINTS_PER_INCH;
use crate::font_config::text_size_px;

// Distance from the top of a text line to its baseline, as a fraction of the
// font size.
const BASELINE_RATIO: f64 = 0.8;

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct PdfBackendError(String);

type PdfResult = Result<(), DrawingErrorKind<PdfBackendError>>;

fn pdf_err(msg: impl ToString) -> DrawingErrorKind<PdfBackendError> {
    DrawingErrorKind::DrawingError(PdfBackendError(msg.to_string()))
}

pub struct PdfBackend {
    path: PathBuf,
    size: (u32, u32),
    // PDF points per backend pixel.
    scale: f64,
    page: Option<Page>,
    title: Option<String>,
}

impl PdfBackend {
    /// `size` is in pixels at `dpi`; the page is `size / dpi` inches.
    pub fn new(path: impl AsRef<Path>, size: (u32, u32), dpi: u32) -> Self {
        let scale = POINTS_PER_INCH / dpi.max(1) as f64;
        let page = Page::new(size.0 as f64 * scale, size.1 as f64 * scale);
        Self {
            path: path.as_ref().to_path_buf(),
            size,
            scale,
            page: Some(page),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn to_pdf(&self, (x, y): BackendCoord) -> (f64, f64) {
        (
            x as f64 * self.scale,
            (self.size.1 as f64 - y as f64) * self.scale,
        )
    }

    fn page(&mut self) -> Result<&mut Page, DrawingErrorKind<PdfBackendError>> {
        self.page
            .as_mut()
            .ok_or_else(|| pdf_err("page already written"))
    }

    fn stroke_path(&mut self, points: &[(f64, f64)], color: BackendColor, width: f64) -> PdfResult {
        if points.len() < 2 || color.alpha == 0.0 {
            return Ok(());
        }
        let page = self.page()?;
        let g = page.graphics();
        g.set_opacity(color.alpha)
            .set_stroke_color(pdf_color(color))
            .set_line_width(width)
            .move_to(points[0].0, points[0].1);
        for &(x, y) in &points[1..] {
            g.line_to(x, y);
        }
        g.stroke();
        Ok(())
    }

    fn fill_path(&mut self, points: &[(f64, f64)], color: BackendColor) -> PdfResult {
        if points.len() < 3 || color.alpha == 0.0 {
            return Ok(());
        }
        let page = self.page()?;
        let g = page.graphics();
        g.set_opacity(color.alpha)
            .set_fill_color(pdf_color(color))
            .move_to(points[0].0, points[0].1);
        for &(x, y) in &points[1..] {
            g.line_to(x, y);
        }
        g.close_path().fill();
        Ok(())
    }
}

fn pdf_color(color: BackendColor) -> PdfColor {
    let (r, g, b) = color.rgb;
    PdfColor::rgb(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
}

impl DrawingBackend for PdfBackend {
    type ErrorType = PdfBackendError;

    fn get_size(&self) -> (u32, u32) {
        self.size
    }

    fn ensure_prepared(&mut self) -> PdfResult {
        Ok(())
    }

    /// Writes the document. Later calls are no-ops.
    fn present(&mut self) -> PdfResult {
        let Some(page) = self.page.take() else {
            return Ok(());
        };
        let mut doc = Document::new();
        if let Some(title) = &self.title {
            doc.set_title(title);
        }
        doc.add_page(page);
        doc.save(&self.path).map_err(pdf_err)?;
        log::debug!("Wrote PDF {}", self.path.display());
        Ok(())
    }

    fn draw_pixel(&mut self, point: BackendCoord, color: BackendColor) -> PdfResult {
        let ul = (point.0, point.1);
        let br = (point.0 + 1, point.1 + 1);
        self.draw_rect(ul, br, &color, true)
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> PdfResult {
        let points = [self.to_pdf(from), self.to_pdf(to)];
        let width = style.stroke_width().max(1) as f64 * self.scale;
        self.stroke_path(&points, style.color(), width)
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> PdfResult {
        let color = style.color();
        if color.alpha == 0.0 {
            return Ok(());
        }
        let (x0, y_top) = self.to_pdf(upper_left);
        let (x1, y_bottom) = self.to_pdf(bottom_right);
        let (w, h) = ((x1 - x0).abs(), (y_top - y_bottom).abs());
        let line_width = style.stroke_width().max(1) as f64 * self.scale;
        let page = self.page()?;
        let g = page.graphics();
        g.set_opacity(color.alpha);
        if fill {
            g.set_fill_color(pdf_color(color))
                .rect(x0.min(x1), y_bottom.min(y_top), w, h)
                .fill();
        } else {
            g.set_stroke_color(pdf_color(color))
                .set_line_width(line_width)
                .rect(x0.min(x1), y_bottom.min(y_top), w, h)
                .stroke();
        }
        Ok(())
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> PdfResult {
        let points: Vec<(f64, f64)> = path.into_iter().map(|p| self.to_pdf(p)).collect();
        let width = style.stroke_width().max(1) as f64 * self.scale;
        self.stroke_path(&points, style.color(), width)
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> PdfResult {
        let color = style.color();
        if color.alpha == 0.0 || radius == 0 {
            return Ok(());
        }
        let (cx, cy) = self.to_pdf(center);
        let r = radius as f64 * self.scale;
        let line_width = style.stroke_width().max(1) as f64 * self.scale;
        let page = self.page()?;
        let g = page.graphics();
        g.set_opacity(color.alpha);
        if fill {
            g.set_fill_color(pdf_color(color)).circle(cx, cy, r).fill();
        } else {
            g.set_stroke_color(pdf_color(color))
                .set_line_width(line_width)
                .circle(cx, cy, r)
                .stroke();
        }
        Ok(())
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> PdfResult {
        let points: Vec<(f64, f64)> = vert.into_iter().map(|p| self.to_pdf(p)).collect();
        self.fill_path(&points, style.color())
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> PdfResult {
        if style.color().alpha == 0.0 || text.trim().is_empty() {
            return Ok(());
        }
        let font_px = style.size();
        let (width, height) = text_size_px(text, font_px);
        let (width, height) = (width as i32, height as i32);
        let anchor = style.anchor();
        let dx = match anchor.h_pos {
            HPos::Left => 0,
            HPos::Right => -width,
            HPos::Center => -width / 2,
        };
        let dy = match anchor.v_pos {
            VPos::Top => 0,
            VPos::Center => -height / 2,
            VPos::Bottom => -height,
        };
        let baseline = (
            pos.0 + dx,
            pos.1 + dy + (height as f64 * BASELINE_RATIO).round() as i32,
        );
        let (x, y) = self.to_pdf(baseline);
        let font = match style.style() {
            FontStyle::Bold => Font::HelveticaBold,
            FontStyle::Italic | FontStyle::Oblique => Font::HelveticaOblique,
            FontStyle::Normal => Font::Helvetica,
        };
        let font_pt = font_px * self.scale;
        let page = self.page()?;
        page.text()
            .set_font(font, font_pt)
            .at(x, y)
            .write(text)
            .map_err(pdf_err)?;
        Ok(())
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<Self::ErrorType>> {
        Ok(text_size_px(text, style.size()))
    }
}
