// src/lib.rs - Library interface for docfigs

pub mod annotate;
pub mod cli;
pub mod config;
pub mod constants;
pub mod display;
pub mod error;
pub mod figsize;
pub mod figure;
pub mod font_config;
pub mod length;
pub mod pdf_backend;
pub mod plot_framework;
pub mod registry;
pub mod runner;
pub mod save;
pub mod units;

pub use annotate::{annotate, label_subplot, Anchor, Annotation, Labels, Loc};
pub use cli::parse_args;
pub use error::{Error, Result};
pub use figsize::{standard_figsize, FigSize, SizeSpec};
pub use figure::{standard_figure, standard_subplots, Axes, Figure};
pub use length::{len2inch, Dim};
pub use registry::{verbose, FigureEntry, FigureRegistry, Producer, ProducerResult};
pub use runner::{make_figs, parse_args_make_figs, MakeFigsOptions, Parallelism};
pub use save::SaveType;

pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
