// tests/make_figs_integration_test.rs

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use docfigs::display::Display;
use docfigs::{
    annotate, make_figs, parse_args, standard_subplots, Annotation, Error, Figure, FigureRegistry,
    Labels, MakeFigsOptions, Parallelism, ProducerResult, SizeSpec,
};

struct NoDisplay;

impl Display for NoDisplay {
    fn show(&self, _figures: &[(String, Figure)]) -> docfigs::Result<()> {
        panic!("nothing should be shown when saving");
    }
}

fn line_figure() -> ProducerResult {
    let mut fig = standard_subplots(1, 1, SizeSpec::new().width("8cm"))?;
    let ax = &mut fig.axes_mut()[0];
    ax.plot((0..50).map(|i| (i as f64, (i as f64 / 5.0).sin())))
        .label("sin");
    ax.set_title("Line").set_xlabel("x").set_ylabel("y");
    Ok(fig)
}

fn panel_figure() -> ProducerResult {
    let mut fig = standard_subplots(1, 3, SizeSpec::new().width(6.0))?;
    for ax in fig.axes_mut() {
        ax.scatter([(0.0, 1.0), (1.0, 0.5), (2.0, 2.0)]);
    }
    annotate(fig.axes_mut(), Labels::Auto, &Annotation::default())?;
    Ok(fig)
}

fn registry() -> FigureRegistry {
    let mut reg = FigureRegistry::new();
    reg.add("a", module_path!(), line_figure)
        .add("b", module_path!(), panel_figure);
    reg
}

fn run_and_check(parallel: Parallelism) {
    let reg = registry();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("figures");
    let opts = MakeFigsOptions::default()
        .save_dir(&out)
        .save_type("pdf")
        .parallel(parallel);

    make_figs(true, &reg, &opts, &NoDisplay).unwrap();

    for name in ["a", "b"] {
        let bytes = fs::read(out.join(format!("{name}.pdf"))).unwrap();
        assert!(bytes.starts_with(b"%PDF"), "{name}.pdf is not a PDF");
    }
    assert_eq!(fs::read_dir(&out).unwrap().count(), 2);
    assert_eq!(reg.names().collect::<Vec<_>>(), ["a", "b"]);
}

#[test]
fn test_save_sequential() {
    run_and_check(Parallelism::Off);
}

#[test]
fn test_save_parallel() {
    run_and_check(Parallelism::Auto);
    run_and_check(Parallelism::Workers(2));
}

#[test]
fn test_parse_then_save_selection() {
    let reg = registry();
    let (save, selected) = parse_args(["prog", "save", "b"], &reg, false).unwrap();
    assert!(save);

    let dir = tempfile::tempdir().unwrap();
    let opts = MakeFigsOptions::default()
        .save_dir(dir.path())
        .save_type("pdf")
        .parallel(false);
    make_figs(save, &selected, &opts, &NoDisplay).unwrap();

    assert!(dir.path().join("b.pdf").exists());
    assert!(!dir.path().join("a.pdf").exists());
}

#[test]
fn test_unsupported_save_type_runs_nothing() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut reg = FigureRegistry::new();
    reg.add("a", module_path!(), move || {
        counter.fetch_add(1, Ordering::SeqCst);
        line_figure()
    });

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never");
    let opts = MakeFigsOptions::default().save_dir(&out).save_type("pgf");
    let err = make_figs(true, &reg, &opts, &NoDisplay).unwrap_err();

    assert!(matches!(err, Error::UnsupportedSaveType(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!out.exists());
}

#[test]
fn test_filter_default_keeps_only_this_crates_figures() {
    let mut reg = registry();
    reg.add("library_fig", "docfigs", line_figure);
    let kept = docfigs::filter_default!(reg);
    assert_eq!(kept.names().collect::<Vec<_>>(), ["a", "b"]);
}
