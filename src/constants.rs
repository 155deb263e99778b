// src/constants.rs

use plotters::style::RGBColor;

// Golden ratio, the default width / height aspect of a single axes.
pub const GOLDEN: f64 = 1.618_033_988_749_895;

// Default figure width in inches, as shipped by most plotting libraries.
pub const DEFAULT_FIGURE_WIDTH_IN: f64 = 6.4;
pub const DEFAULT_DPI: u32 = 100;
pub const MIN_DPI: u32 = 10;
pub const MAX_DPI: u32 = 2400;

// PDF user space units per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

// Font sizes in points. Converted to pixels with the figure dpi at render time.
pub const FONT_SIZE_SUPTITLE_PT: f64 = 14.0;
pub const FONT_SIZE_TITLE_PT: f64 = 12.0;
pub const FONT_SIZE_LABEL_PT: f64 = 10.0;
pub const FONT_SIZE_TICK_PT: f64 = 8.0;
pub const FONT_SIZE_ANNOTATION_PT: f64 = 10.0;
pub const FONT_SIZE_LEGEND_PT: f64 = 8.0;

// Axes layout, in points.
pub const AXES_MARGIN_PT: f64 = 6.0;
pub const X_LABEL_AREA_PT: f64 = 28.0;
pub const Y_LABEL_AREA_PT: f64 = 36.0;
pub const TICK_COUNT_X: usize = 8;
pub const TICK_COUNT_Y: usize = 6;

// Fraction of the data span added on each side when autoscaling.
pub const AUTOSCALE_MARGIN: f64 = 0.05;

// Stroke widths in pixels.
pub const LINE_WIDTH_PLOT: u32 = 2;
pub const LINE_WIDTH_LEGEND: u32 = 2;
pub const MARKER_SIZE: u32 = 3;

pub const GRID_COLOR: RGBColor = RGBColor(220, 220, 220);

// Annotation offsets from the frame edge, in axes fractions.
pub const ANNOTATE_PAD_INSIDE: (f64, f64) = (0.03, 0.03);
pub const ANNOTATE_PAD_OUTSIDE_LEFT: f64 = 0.12;
pub const ANNOTATE_PAD_OUTSIDE_RIGHT: f64 = 0.02;
pub const ANNOTATE_PAD_OUTSIDE_TOP: f64 = 0.02;
pub const ANNOTATE_PAD_OUTSIDE_BOTTOM: f64 = 0.15;
pub const LABEL_SUBPLOT_EDGE_PAD: f64 = 0.05;

// Output defaults.
pub const DEFAULT_SAVE_DIR: &str = "figures";
pub const DEFAULT_SAVE_TYPE: &str = "pdf";

// Environment variable naming an alternative config file.
pub const CONFIG_ENV_VAR: &str = "DOCFIGS_CONFIG";
pub const CONFIG_FILE_NAME: &str = "docfigs.toml";
