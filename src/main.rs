// src/main.rs

use std::error::Error;

use docfigs::{
    annotate, filter_default, label_subplot, register, standard_figure, standard_subplots,
    verbose, Anchor, Annotation, FigureRegistry, Labels, Loc, ProducerResult, SizeSpec,
};

fn sampled(f: impl Fn(f64) -> f64, from: f64, to: f64, n: usize) -> Vec<(f64, f64)> {
    let step = (to - from) / (n.max(2) - 1) as f64;
    (0..n)
        .map(|i| {
            let x = from + i as f64 * step;
            (x, f(x))
        })
        .collect()
}

/// Single panel at the default width.
fn damped_oscillation() -> ProducerResult {
    let mut fig = standard_figure(&SizeSpec::new())?;
    let ax = &mut fig.add_subplots(1, 1)[0];
    ax.plot(sampled(|t| (-0.3 * t).exp() * (2.0 * t).cos(), 0.0, 10.0, 400))
        .label("x(t)");
    ax.plot(sampled(|t| (-0.3 * t).exp(), 0.0, 10.0, 100))
        .label("envelope");
    ax.set_title("Damped oscillation")
        .set_xlabel("t [s]")
        .set_ylabel("x [m]");
    Ok(fig)
}

/// Two panels across the text width, labelled (a) and (b) outside the frame.
fn two_panel() -> ProducerResult {
    let spec = SizeSpec::new().width("standard_text_width");
    let mut fig = standard_subplots(1, 2, spec)?;
    fig.set_suptitle("Powers");
    for (k, ax) in fig.axes_mut().iter_mut().enumerate() {
        let p = (k + 2) as i32;
        ax.plot(sampled(|x| x.powi(p), -1.0, 1.0, 200));
        ax.set_xlabel("x").set_ylabel(format!("x^{p}"));
    }
    annotate(
        fig.axes_mut(),
        Labels::Auto,
        &Annotation::at(Anchor::TopLeft).outside(true).template("({})"),
    )?;
    Ok(fig)
}

/// One revtex column wide, with a corner label.
fn column_scatter() -> ProducerResult {
    let spec = SizeSpec::new().width("revtex_column_width").aspect(1.0);
    let mut fig = standard_subplots(1, 1, spec)?;
    let ax = &mut fig.axes_mut()[0];
    let points: Vec<(f64, f64)> = (0..60)
        .map(|i| {
            let x = i as f64 / 6.0;
            (x, 0.5 * x + (1.7 * x).sin())
        })
        .collect();
    ax.scatter(points).label("samples");
    ax.set_xlabel("x").set_ylabel("y");
    label_subplot(ax, "c", "lower right".parse().unwrap_or_default(), true, None);
    Ok(fig)
}

fn grid_of_four() -> ProducerResult {
    let spec = SizeSpec::new().width("tex_letter_width").height("3.5in");
    let mut fig = standard_subplots(2, 2, spec)?;
    for (k, ax) in fig.axes_mut().iter_mut().enumerate() {
        let freq = (k + 1) as f64;
        ax.plot(sampled(|x| (freq * x).sin(), 0.0, std::f64::consts::TAU, 300));
        ax.set_title(format!("f = {freq}"));
    }
    let labels: Labels = ["i", "ii", "iii", "iv"].into_iter().collect();
    annotate(fig.axes_mut(), labels, &Annotation::at(Anchor::TopRight))?;
    for ax in fig.axes_mut() {
        label_subplot(ax, "sin", Loc::At(0.5, 0.1), false, None);
    }
    Ok(fig)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();
    log::debug!("docfigs {}", docfigs::crate_version());

    let mut registry = FigureRegistry::new();
    register!(registry, damped_oscillation);
    register!(registry, two_panel);
    register!(registry, column_scatter);
    register!(
        registry,
        "grid_of_four",
        verbose("grid_of_four", "2x2 grid on a letter page", grid_of_four)
    );

    docfigs::parse_args_make_figs(&filter_default!(registry), false)?;
    Ok(())
}
