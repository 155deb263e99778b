// src/runner.rs

//! Batch production of registered figures: build each one, then either save
//! it to `<save_dir>/<name>.<ext>` or hand the lot to a [`Display`].

use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::cli::parse_args;
use crate::config::rc;
use crate::display::{Display, ViewerDisplay};
use crate::error::{Error, Result};
use crate::figure::Figure;
use crate::registry::{FigureEntry, FigureRegistry};
use crate::save::{save_figure, SaveType};

/// How many figures are built at once when saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parallelism {
    Off,
    /// One worker per core.
    Auto,
    Workers(usize),
}

impl From<bool> for Parallelism {
    fn from(parallel: bool) -> Self {
        if parallel {
            Parallelism::Auto
        } else {
            Parallelism::Off
        }
    }
}

impl From<usize> for Parallelism {
    fn from(workers: usize) -> Self {
        match workers {
            0 => Parallelism::Auto,
            n => Parallelism::Workers(n),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MakeFigsOptions {
    /// Relative paths are taken from the directory of the running program.
    pub save_dir: PathBuf,
    pub save_type: String,
    pub parallel: Parallelism,
}

impl Default for MakeFigsOptions {
    fn default() -> Self {
        let output = &rc().output;
        let parallel = if !output.parallel {
            Parallelism::Off
        } else {
            Parallelism::from(output.workers)
        };
        Self {
            save_dir: PathBuf::from(&output.save_dir),
            save_type: output.save_type.clone(),
            parallel,
        }
    }
}

impl MakeFigsOptions {
    pub fn save_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.save_dir = dir.into();
        self
    }

    pub fn save_type(mut self, save_type: impl Into<String>) -> Self {
        self.save_type = save_type.into();
        self
    }

    pub fn parallel(mut self, parallel: impl Into<Parallelism>) -> Self {
        self.parallel = parallel.into();
        self
    }
}

/// `save_dir` joined onto the parent directory of `program`, unless it is
/// already absolute.
pub fn resolve_save_dir(program: Option<&str>, save_dir: &Path) -> PathBuf {
    if save_dir.is_absolute() {
        return save_dir.to_path_buf();
    }
    match program.and_then(|p| Path::new(p).parent()) {
        Some(parent) => parent.join(save_dir),
        None => save_dir.to_path_buf(),
    }
}

thread_local! {
    static CURRENT_FIGURE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Name of the figure being produced on this thread, if any.
pub fn current_figure() -> Option<String> {
    CURRENT_FIGURE.with(|c| c.borrow().clone())
}

struct CurrentFigureGuard {
    previous: Option<String>,
}

impl CurrentFigureGuard {
    fn enter(name: &str) -> Self {
        let previous = CURRENT_FIGURE.with(|c| c.borrow_mut().replace(name.to_string()));
        Self { previous }
    }
}

impl Drop for CurrentFigureGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT_FIGURE.with(|c| *c.borrow_mut() = previous);
    }
}

#[doc(hidden)]
pub fn figprint_line(args: fmt::Arguments<'_>) {
    match current_figure() {
        Some(name) => println!("[{name}] {args}"),
        None => println!("{args}"),
    }
}

/// `println!` prefixed with the name of the figure being produced, so output
/// from parallel workers can be told apart.
#[macro_export]
macro_rules! figprint {
    ($($arg:tt)*) => {
        $crate::runner::figprint_line(format_args!($($arg)*))
    };
}

fn produce(entry: &FigureEntry) -> Result<Figure> {
    let _guard = CurrentFigureGuard::enter(&entry.name);
    entry.call().map_err(|source| Error::Producer {
        name: entry.name.clone(),
        source,
    })
}

fn make_and_save(entry: &FigureEntry, dir: &Path, save_type: SaveType) -> Result<()> {
    let fig = produce(entry)?;
    let path = dir.join(format!("{}.{}", entry.name, save_type.extension()));
    save_figure(&fig, &path, save_type)?;
    drop(fig);
    log::info!("Saved {}", path.display());
    Ok(())
}

/// Builds every figure in `figures` and saves them (`save == true`) or shows
/// them with `display`. The first failure aborts the run.
pub fn make_figs(
    save: bool,
    figures: &FigureRegistry,
    opts: &MakeFigsOptions,
    display: &dyn Display,
) -> Result<()> {
    let start = Instant::now();
    if !save {
        let mut shown = Vec::with_capacity(figures.len());
        for entry in figures {
            shown.push((entry.name.clone(), produce(entry)?));
        }
        return display.show(&shown);
    }

    let save_type: SaveType = opts.save_type.parse()?;
    let program = std::env::args().next();
    let dir = resolve_save_dir(program.as_deref(), &opts.save_dir);
    fs::create_dir_all(&dir)?;
    log::debug!("Saving {} figures as {} to {}", figures.len(), save_type, dir.display());

    match opts.parallel {
        Parallelism::Off => {
            for entry in figures {
                make_and_save(entry, &dir, save_type)?;
            }
        }
        Parallelism::Auto | Parallelism::Workers(_) => {
            let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("docfigs-{i}"));
            if let Parallelism::Workers(n) = opts.parallel {
                builder = builder.num_threads(n);
            }
            let pool = builder.build()?;
            let entries: Vec<&FigureEntry> = figures.iter().collect();
            pool.install(|| {
                entries
                    .par_iter()
                    .try_for_each(|entry| make_and_save(entry, &dir, save_type))
            })?;
        }
    }

    log::info!(
        "Saved {} figure(s) to {} in {:.2?}",
        figures.len(),
        dir.display(),
        start.elapsed()
    );
    Ok(())
}

/// Parses `std::env::args()` and runs [`make_figs`] with the configured
/// output options and the system image viewer.
pub fn parse_args_make_figs(registry: &FigureRegistry, default_save: bool) -> Result<()> {
    let (save, figures) = parse_args(std::env::args(), registry, default_save)?;
    make_figs(save, &figures, &MakeFigsOptions::default(), &ViewerDisplay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figsize::FigSize;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorder {
        shown: Mutex<Vec<String>>,
    }

    impl Display for Recorder {
        fn show(&self, figures: &[(String, Figure)]) -> Result<()> {
            let mut shown = self.shown.lock().unwrap();
            shown.extend(figures.iter().map(|(name, _)| name.clone()));
            Ok(())
        }
    }

    fn counting(calls: &Arc<AtomicUsize>) -> impl Fn() -> crate::registry::ProducerResult + Send + Sync {
        let calls = Arc::clone(calls);
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(Figure::new(FigSize::new(1.0, 1.0)))
        }
    }

    #[test]
    fn test_parallelism_conversions() {
        assert_eq!(Parallelism::from(true), Parallelism::Auto);
        assert_eq!(Parallelism::from(false), Parallelism::Off);
        assert_eq!(Parallelism::from(4usize), Parallelism::Workers(4));
        assert_eq!(Parallelism::from(0usize), Parallelism::Auto);
    }

    #[test]
    fn test_resolve_save_dir() {
        assert_eq!(
            resolve_save_dir(Some("/opt/paper/make_figs"), Path::new("figures")),
            PathBuf::from("/opt/paper/figures")
        );
        assert_eq!(
            resolve_save_dir(Some("make_figs"), Path::new("figures")),
            PathBuf::from("figures")
        );
        assert_eq!(
            resolve_save_dir(Some("/opt/paper/make_figs"), Path::new("/tmp/out")),
            PathBuf::from("/tmp/out")
        );
        assert_eq!(resolve_save_dir(None, Path::new("out")), PathBuf::from("out"));
    }

    #[test]
    fn test_display_path_runs_in_order() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut reg = FigureRegistry::new();
        reg.add("b", "demo", counting(&calls))
            .add("a", "demo", counting(&calls));
        let recorder = Recorder::default();
        make_figs(false, &reg, &MakeFigsOptions::default(), &recorder).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(*recorder.shown.lock().unwrap(), ["b", "a"]);
    }

    #[test]
    fn test_unsupported_type_fails_before_producing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut reg = FigureRegistry::new();
        reg.add("a", "demo", counting(&calls));
        let dir = tempfile::tempdir().unwrap();
        let opts = MakeFigsOptions::default()
            .save_dir(dir.path())
            .save_type("pgf");
        let err = make_figs(true, &reg, &opts, &Recorder::default()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedSaveType(t) if t == "pgf"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_producer_failure_names_the_figure() {
        let mut reg = FigureRegistry::new();
        reg.add("broken", "demo", || Err("no data".into()));
        let dir = tempfile::tempdir().unwrap();
        let opts = MakeFigsOptions::default()
            .save_dir(dir.path())
            .save_type("svg")
            .parallel(false);
        let err = make_figs(true, &reg, &opts, &Recorder::default()).unwrap_err();
        match err {
            Error::Producer { name, source } => {
                assert_eq!(name, "broken");
                assert_eq!(source.to_string(), "no data");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_current_figure_is_set_while_producing() {
        let seen = Arc::new(Mutex::new(None));
        let seen_in = Arc::clone(&seen);
        let mut reg = FigureRegistry::new();
        reg.add("tagged", "demo", move || {
            *seen_in.lock().unwrap() = current_figure();
            crate::figprint!("building");
            Ok(Figure::new(FigSize::new(1.0, 1.0)))
        });
        make_figs(false, &reg, &MakeFigsOptions::default(), &Recorder::default()).unwrap();
        assert_eq!(seen.lock().unwrap().as_deref(), Some("tagged"));
        assert_eq!(current_figure(), None);
    }
}
