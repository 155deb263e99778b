// src/plot_framework.rs

use std::ops::Range;

use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::coord::Shift;
use plotters::drawing::DrawingArea;
use plotters::element::{Circle, PathElement, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, WHITE};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color, FontDesc, FontFamily, FontStyle, RGBColor, TextStyle};
use plotters_backend::DrawingBackend;

use crate::constants::{
    AUTOSCALE_MARGIN, AXES_MARGIN_PT, GRID_COLOR, LINE_WIDTH_LEGEND, TICK_COUNT_X, TICK_COUNT_Y,
    X_LABEL_AREA_PT, Y_LABEL_AREA_PT,
};
use crate::error::Result;
use crate::figure::{Axes, Coords, Figure, HAlign, SeriesKind, TextItem, VAlign};
use crate::font_config::{font_family, pt_to_px, TextRole};

/// Calculate plot range with padding.
/// Adds `AUTOSCALE_MARGIN` of the span on each side, or a fixed padding for
/// very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 {
        0.5
    } else {
        range * AUTOSCALE_MARGIN
    };
    (min - padding, max + padding)
}

/// Tick label text: "k"/"M" notation for large values, one or two decimals
/// for small fractional values, integers otherwise.
pub fn format_tick_label(v: f64) -> String {
    if v.abs() >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if v.abs() >= 10_000.0 {
        format!("{:.0}k", v / 1000.0)
    } else if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else if v.abs() < 1.0 {
        format!("{:.2}", v)
    } else if v.abs() < 10.0 {
        format!("{:.1}", v)
    } else {
        format!("{:.0}", v)
    }
}

/// Matplotlib-style default color cycle.
pub fn cycle_color(index: usize) -> RGBColor {
    let c = colorous::TABLEAU10[index % colorous::TABLEAU10.len()];
    RGBColor(c.r, c.g, c.b)
}

fn data_bounds<'a, I>(points: I) -> Option<((f64, f64), (f64, f64))>
where
    I: Iterator<Item = &'a (f64, f64)>,
{
    let mut bounds: Option<((f64, f64), (f64, f64))> = None;
    for &(x, y) in points {
        if !x.is_finite() || !y.is_finite() {
            continue;
        }
        bounds = Some(match bounds {
            None => ((x, x), (y, y)),
            Some(((x0, x1), (y0, y1))) => ((x0.min(x), x1.max(x)), (y0.min(y), y1.max(y))),
        });
    }
    bounds
}

/// Explicit limits win; otherwise the data extent plus padding, or 0..1 for
/// axes without data.
pub fn axes_ranges(ax: &Axes) -> (Range<f64>, Range<f64>) {
    let bounds = data_bounds(ax.series.iter().flat_map(|s| s.data.iter()));
    let (auto_x, auto_y) = match bounds {
        Some(((x0, x1), (y0, y1))) => (calculate_range(x0, x1), calculate_range(y0, y1)),
        None => ((0.0, 1.0), (0.0, 1.0)),
    };
    let x = ax.x_range.clone().unwrap_or(auto_x.0..auto_x.1);
    let y = ax.y_range.clone().unwrap_or(auto_y.0..auto_y.1);
    (x, y)
}

fn text_style(role_points: f64, dpi: u32, bold: bool) -> TextStyle<'static> {
    let style = if bold {
        FontStyle::Bold
    } else {
        FontStyle::Normal
    };
    FontDesc::new(
        FontFamily::from(font_family()),
        pt_to_px(role_points, dpi),
        style,
    )
    .color(&BLACK)
}

fn anchor_pos(h: HAlign, v: VAlign) -> Pos {
    let h = match h {
        HAlign::Left => HPos::Left,
        HAlign::Center => HPos::Center,
        HAlign::Right => HPos::Right,
    };
    let v = match v {
        VAlign::Top => VPos::Top,
        VAlign::Center => VPos::Center,
        VAlign::Bottom => VPos::Bottom,
    };
    Pos::new(h, v)
}

/// Draws a whole figure: white background, optional suptitle, then each
/// axes in its cell of an evenly split grid.
pub fn draw_figure<DB>(fig: &Figure, root: &DrawingArea<DB, Shift>) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let dpi = fig.dpi();
    let body = match fig.suptitle() {
        Some(title) => root.titled(title, text_style(TextRole::Suptitle.points(), dpi, false))?,
        None => root.clone(),
    };

    let (nrows, ncols) = fig.shape();
    if nrows == 0 || ncols == 0 {
        return Ok(());
    }
    let cells = body.split_evenly((nrows, ncols));
    for (ax, cell) in fig.axes().iter().zip(cells.iter()) {
        draw_axes(ax, cell, dpi)?;
    }
    Ok(())
}

fn draw_axes<DB>(ax: &Axes, area: &DrawingArea<DB, Shift>, dpi: u32) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let px = |pt: f64| pt_to_px(pt, dpi).round().max(0.0) as u32;
    let (x_range, y_range) = axes_ranges(ax);

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(px(AXES_MARGIN_PT))
        .x_label_area_size(px(X_LABEL_AREA_PT))
        .y_label_area_size(px(Y_LABEL_AREA_PT));
    if let Some(title) = &ax.title {
        builder.caption(title, text_style(TextRole::Title.points(), dpi, false));
    }
    let mut chart = builder.build_cartesian_2d(x_range, y_range)?;

    let tick_formatter = |v: &f64| format_tick_label(*v);
    let mut mesh = chart.configure_mesh();
    mesh.x_labels(TICK_COUNT_X)
        .y_labels(TICK_COUNT_Y)
        .x_label_formatter(&tick_formatter)
        .y_label_formatter(&tick_formatter)
        .bold_line_style(GRID_COLOR)
        .light_line_style(GRID_COLOR.mix(0.3))
        .label_style(text_style(TextRole::Tick.points(), dpi, false))
        .axis_desc_style(text_style(TextRole::Label.points(), dpi, false));
    if let Some(x_label) = &ax.x_label {
        mesh.x_desc(x_label.as_str());
    }
    if let Some(y_label) = &ax.y_label {
        mesh.y_desc(y_label.as_str());
    }
    mesh.draw()?;

    for (idx, s) in ax.series.iter().enumerate() {
        let color = s.color.unwrap_or_else(|| cycle_color(idx));
        let size = s.stroke_width;
        match s.kind {
            SeriesKind::Line => {
                let anno = chart.draw_series(LineSeries::new(
                    s.data.iter().copied(),
                    color.stroke_width(size),
                ))?;
                if let Some(label) = &s.label {
                    anno.label(label.as_str()).legend(move |(x, y)| {
                        PathElement::new(
                            vec![(x, y), (x + 20, y)],
                            color.stroke_width(LINE_WIDTH_LEGEND),
                        )
                    });
                }
            }
            SeriesKind::Markers => {
                let anno = chart.draw_series(
                    s.data
                        .iter()
                        .map(|&point| Circle::new(point, size, color.filled())),
                )?;
                if let Some(label) = &s.label {
                    anno.label(label.as_str())
                        .legend(move |(x, y)| Circle::new((x + 10, y), size, color.filled()));
                }
            }
        }
    }

    if ax.has_legend() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(text_style(TextRole::Legend.points(), dpi, false))
            .draw()?;
    }

    // Text positions are resolved against the plotting area, then drawn on
    // the whole cell so labels outside the frame are not lost.
    let (frame_x, frame_y) = chart.plotting_area().get_pixel_range();
    let cell_base = area.get_base_pixel();
    for item in &ax.texts {
        let (abs_x, abs_y) = match item.coords {
            Coords::Axes => (
                frame_x.start as f64 + item.x * (frame_x.end - frame_x.start) as f64,
                frame_y.end as f64 - item.y * (frame_y.end - frame_y.start) as f64,
            ),
            Coords::Data => {
                let (x, y) = chart.backend_coord(&(item.x, item.y));
                (x as f64, y as f64)
            }
        };
        let rel = (
            abs_x.round() as i32 - cell_base.0,
            abs_y.round() as i32 - cell_base.1,
        );
        draw_text_item(area, item, rel, dpi)?;
    }
    Ok(())
}

fn draw_text_item<DB>(
    area: &DrawingArea<DB, Shift>,
    item: &TextItem,
    pos: (i32, i32),
    dpi: u32,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let points = item
        .font_size
        .unwrap_or_else(|| TextRole::Annotation.points());
    let style = text_style(points, dpi, item.bold).pos(anchor_pos(item.h_align, item.v_align));
    area.draw(&Text::new(item.text.clone(), pos, style))?;
    Ok(())
}
