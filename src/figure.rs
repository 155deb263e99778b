// src/figure.rs

//! A small retained figure model: a figure owns a grid of axes, each axes
//! owns its series and text. Nothing is drawn until the figure is saved or
//! displayed, so one figure can go to any backend.

use std::ops::Range;

use plotters::style::RGBColor;

use crate::config::rc;
use crate::constants::{LINE_WIDTH_PLOT, MARKER_SIZE};
use crate::error::Result;
use crate::figsize::{standard_figsize, FigSize, SizeSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Line,
    Markers,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub data: Vec<(f64, f64)>,
    pub kind: SeriesKind,
    pub label: Option<String>,
    /// `None` takes the next color of the axes' color cycle.
    pub color: Option<RGBColor>,
    pub stroke_width: u32,
}

impl Series {
    pub fn label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = Some(label.into());
        self
    }

    pub fn color(&mut self, color: RGBColor) -> &mut Self {
        self.color = Some(color);
        self
    }

    pub fn stroke_width(&mut self, width: u32) -> &mut Self {
        self.stroke_width = width;
        self
    }
}

/// Coordinate system of a text position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Coords {
    /// Fractions of the plot area: (0, 0) bottom left, (1, 1) top right.
    #[default]
    Axes,
    /// Data coordinates of the axes.
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub coords: Coords,
    pub h_align: HAlign,
    pub v_align: VAlign,
    /// Points; `None` uses the configured annotation size.
    pub font_size: Option<f64>,
    pub bold: bool,
}

impl TextItem {
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            coords: Coords::Axes,
            h_align: HAlign::Left,
            v_align: VAlign::Bottom,
            font_size: None,
            bold: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Axes {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub x_range: Option<Range<f64>>,
    pub y_range: Option<Range<f64>>,
    pub series: Vec<Series>,
    pub texts: Vec<TextItem>,
}

impl Axes {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_series(&mut self, data: Vec<(f64, f64)>, kind: SeriesKind) -> &mut Series {
        self.series.push(Series {
            data,
            kind,
            label: None,
            color: None,
            stroke_width: if kind == SeriesKind::Line {
                LINE_WIDTH_PLOT
            } else {
                MARKER_SIZE
            },
        });
        let last = self.series.len() - 1;
        &mut self.series[last]
    }

    /// Adds a line through `data`.
    pub fn plot<I>(&mut self, data: I) -> &mut Series
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        self.push_series(data.into_iter().collect(), SeriesKind::Line)
    }

    /// Adds unconnected markers at `data`.
    pub fn scatter<I>(&mut self, data: I) -> &mut Series
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        self.push_series(data.into_iter().collect(), SeriesKind::Markers)
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.x_label = Some(label.into());
        self
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.y_label = Some(label.into());
        self
    }

    pub fn set_xlim(&mut self, range: Range<f64>) -> &mut Self {
        self.x_range = Some(range);
        self
    }

    pub fn set_ylim(&mut self, range: Range<f64>) -> &mut Self {
        self.y_range = Some(range);
        self
    }

    pub fn text(&mut self, item: TextItem) -> &mut Self {
        self.texts.push(item);
        self
    }

    pub fn has_legend(&self) -> bool {
        self.series.iter().any(|s| s.label.is_some())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    size: FigSize,
    dpi: u32,
    suptitle: Option<String>,
    nrows: usize,
    ncols: usize,
    axes: Vec<Axes>,
}

impl Figure {
    /// An empty figure of `size`, at the configured dpi.
    pub fn new(size: FigSize) -> Self {
        Self {
            size,
            dpi: rc().figure.dpi,
            suptitle: None,
            nrows: 0,
            ncols: 0,
            axes: Vec::new(),
        }
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi.max(1);
        self
    }

    pub fn size(&self) -> FigSize {
        self.size
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        self.size.pixels(self.dpi)
    }

    pub fn suptitle(&self) -> Option<&str> {
        self.suptitle.as_deref()
    }

    pub fn set_suptitle(&mut self, title: impl Into<String>) -> &mut Self {
        self.suptitle = Some(title.into());
        self
    }

    /// Replaces the axes with an `nrows x ncols` grid (row-major).
    pub fn add_subplots(&mut self, nrows: usize, ncols: usize) -> &mut [Axes] {
        self.nrows = nrows;
        self.ncols = ncols;
        self.axes = vec![Axes::new(); nrows * ncols];
        &mut self.axes
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    pub fn axes(&self) -> &[Axes] {
        &self.axes
    }

    pub fn axes_mut(&mut self) -> &mut [Axes] {
        &mut self.axes
    }

    pub fn ax(&mut self, row: usize, col: usize) -> Option<&mut Axes> {
        if row >= self.nrows || col >= self.ncols {
            return None;
        }
        self.axes.get_mut(row * self.ncols + col)
    }
}

/// A figure sized by [`standard_figsize`], without axes.
pub fn standard_figure(spec: &SizeSpec) -> Result<Figure> {
    Ok(Figure::new(standard_figsize(spec)?))
}

/// A figure with an `nrows x ncols` grid of axes. The grid shape also feeds
/// the size calculation, overriding whatever grid `spec` carried.
pub fn standard_subplots(nrows: usize, ncols: usize, spec: SizeSpec) -> Result<Figure> {
    let spec = spec.grid(nrows, ncols);
    let mut fig = Figure::new(standard_figsize(&spec)?);
    fig.add_subplots(nrows, ncols);
    Ok(fig)
}
