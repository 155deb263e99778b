// src/error.rs

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Every failure docfigs can report. Nothing is retried: producers, sizes and
/// saves fail fast and the error travels straight back to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// A length string ended in something that is not a key of `UNITS`.
    #[error("unknown length unit {unit:?} in {input:?}")]
    UnknownUnit { input: String, unit: String },

    /// The numeric prefix of a length string could not be parsed.
    #[error("invalid numeric prefix {prefix:?} in length {input:?}")]
    InvalidLength { input: String, prefix: String },

    /// A figure name requested on the command line is not registered.
    #[error("no figure named {0:?} is registered")]
    UnknownFigure(String),

    #[error("unsupported save type {0:?} (expected one of: pdf, svg, png)")]
    UnsupportedSaveType(String),

    /// Explicit annotation labels did not match the number of plot areas.
    #[error("{labels} labels given for {areas} plot areas")]
    LabelCount { labels: usize, areas: usize },

    /// A user supplied producer failed while building its figure.
    #[error("figure {name:?} failed: {source}")]
    Producer {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("render error: {0}")]
    Render(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl<E> From<DrawingAreaErrorKind<E>> for Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        Error::Render(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
