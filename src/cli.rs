// src/cli.rs

use clap::{CommandFactory, FromArgMatches, Parser};

use crate::error::{Error, Result};
use crate::registry::FigureRegistry;
use crate::units::describe_units;

#[derive(Parser, Debug)]
#[command(
    about = "Build registered figures, then save them to files or show them.",
    disable_help_flag = true
)]
struct Cli {
    /// `save` or `nosave`, followed by figure names (default: all figures).
    /// Only the first token can ask for help; later ones are always names.
    #[arg(value_name = "FIGURE", trailing_var_arg = true, allow_hyphen_values = true)]
    targets: Vec<String>,
}

fn command(prog: &str, registry: &FigureRegistry, default_save: bool) -> clap::Command {
    let names: Vec<&str> = registry.names().collect();
    let after_help = format!(
        "  - save/nosave overrides the default save/display behavior\n    \
         Default: save = {default_save}\n  \
         - Any figure names listed (after the optional save/nosave)\n    \
         will be processed. Default: process all figures.\n\n\
         Figures: {}\n\n\
         Length units:\n{}",
        if names.is_empty() {
            "(none registered)".to_string()
        } else {
            names.join(", ")
        },
        describe_units()
    );
    Cli::command()
        .bin_name(prog.to_string())
        .override_usage(format!("{prog} [-h|--help] [save|nosave] [fig1 [fig2 ...]]"))
        .after_help(after_help)
}

/// Usage text as printed for `-h`, `--help` or `help`.
pub fn help_text(prog: &str, registry: &FigureRegistry, default_save: bool) -> String {
    command(prog, registry, default_save).render_help().to_string()
}

/// Splits `args` (conventionally `std::env::args()`) into the save flag and
/// the selected figures.
///
/// - element 0 is the program name
/// - a leading `save` / `nosave` overrides `default_save`
/// - no names, or the single name `all`, select the whole registry
/// - otherwise the named figures are selected in the order given
///
/// Help requests print the usage and exit the process with status 0.
pub fn parse_args<I, T>(
    args: I,
    registry: &FigureRegistry,
    default_save: bool,
) -> Result<(bool, FigureRegistry)>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let prog = args.first().map(String::as_str).unwrap_or("docfigs");
    if args.len() <= 1 {
        return Ok((default_save, registry.clone()));
    }

    let mut cmd = command(prog, registry, default_save);
    if matches!(args[1].as_str(), "help" | "-h" | "--help") {
        cmd.print_help()?;
        std::process::exit(0);
    }

    let matches = cmd.try_get_matches_from_mut(&args)?;
    let cli = Cli::from_arg_matches(&matches)?;

    let mut save = default_save;
    let mut targets = cli.targets.as_slice();
    match targets.first().map(String::as_str) {
        Some("save") => {
            save = true;
            targets = &targets[1..];
        }
        Some("nosave") => {
            save = false;
            targets = &targets[1..];
        }
        _ => {}
    }

    if targets.is_empty() || targets[0] == "all" {
        return Ok((save, registry.clone()));
    }

    let mut selected = FigureRegistry::new();
    for name in targets {
        let entry = registry
            .get(name)
            .ok_or_else(|| Error::UnknownFigure(name.clone()))?;
        selected.insert(entry.clone());
    }
    log::debug!(
        "Selected figures: {}",
        selected.names().collect::<Vec<_>>().join(", ")
    );
    Ok((save, selected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figsize::FigSize;
    use crate::figure::Figure;
    use crate::registry::ProducerResult;

    fn blank() -> ProducerResult {
        Ok(Figure::new(FigSize::new(1.0, 1.0)))
    }

    fn registry() -> FigureRegistry {
        let mut reg = FigureRegistry::new();
        reg.add("fig1", "demo", blank)
            .add("fig2", "demo", blank)
            .add("fig3", "demo", blank);
        reg
    }

    fn names(reg: &FigureRegistry) -> Vec<&str> {
        reg.names().collect()
    }

    #[test]
    fn test_no_arguments_selects_everything() {
        let reg = registry();
        let (save, figs) = parse_args(["prog"], &reg, true).unwrap();
        assert!(save);
        assert_eq!(names(&figs), ["fig1", "fig2", "fig3"]);

        let (save, figs) = parse_args(Vec::<String>::new(), &reg, false).unwrap();
        assert!(!save);
        assert_eq!(figs.len(), 3);
    }

    #[test]
    fn test_save_flags() {
        let reg = registry();
        let (save, figs) = parse_args(["prog", "save"], &reg, false).unwrap();
        assert!(save);
        assert_eq!(figs.len(), 3);

        let (save, figs) = parse_args(["prog", "nosave", "all"], &reg, true).unwrap();
        assert!(!save);
        assert_eq!(figs.len(), 3);
    }

    #[test]
    fn test_names_kept_in_argument_order() {
        let reg = registry();
        let (save, figs) = parse_args(["prog", "nosave", "fig3", "fig1"], &reg, true).unwrap();
        assert!(!save);
        assert_eq!(names(&figs), ["fig3", "fig1"]);

        let (save, figs) = parse_args(["prog", "fig2"], &reg, true).unwrap();
        assert!(save);
        assert_eq!(names(&figs), ["fig2"]);
    }

    #[test]
    fn test_unknown_name_is_an_error() {
        let reg = registry();
        let err = parse_args(["prog", "fig1", "missing"], &reg, true).unwrap_err();
        assert!(matches!(err, Error::UnknownFigure(name) if name == "missing"));
    }

    #[test]
    fn test_dashed_tokens_are_figure_names() {
        let reg = registry();
        let err = parse_args(["prog", "--bogus"], &reg, true).unwrap_err();
        assert!(matches!(err, Error::UnknownFigure(name) if name == "--bogus"));
    }

    #[test]
    fn test_help_token_after_first_position_is_a_name() {
        let reg = registry();
        for help in ["-h", "--help", "help"] {
            let err = parse_args(["prog", "nosave", "fig2", help], &reg, true).unwrap_err();
            assert!(matches!(err, Error::UnknownFigure(name) if name == help));
        }
    }

    #[test]
    fn test_help_text_shows_default_and_figures() {
        let text = help_text("prog", &registry(), false);
        assert!(text.contains("prog [-h|--help] [save|nosave]"));
        assert!(text.contains("Default: save = false"));
        assert!(text.contains("fig1, fig2, fig3"));
        assert!(text.contains("Length units:"));
        assert!(text.contains("revtex_column_width"));
    }
}
