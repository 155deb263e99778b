// src/units.rs

//! Named lengths that figure sizes can be expressed in.
//!
//! Text block sizes of common LaTeX classes can be found by putting
//! `\showthe\linewidth` (or `\showthe\textheight`) in the document and running
//! `pdflatex` directly: compilation stops and prints the length in `pt`.
//! For multi-column beamer slides, `\column{XX\textwidth}` gives a linewidth
//! of XX times `beamer_ar169_width`.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    pub name: &'static str,
    pub inches: f64,
    pub description: &'static str,
}

const TEX_POINTS_PER_INCH: f64 = 72.27;

pub static UNITS: &[Unit] = &[
    Unit {
        name: "pt",
        inches: 1.0 / TEX_POINTS_PER_INCH,
        description: "LaTeX point. Not quite the same as a printer's point.",
    },
    Unit {
        name: "cm",
        inches: 1.0 / 2.54,
        description: "Centimeter",
    },
    Unit {
        name: "mm",
        inches: 1.0 / 25.4,
        description: "Millimeter",
    },
    Unit {
        name: "in",
        inches: 1.0,
        description: "Inch",
    },
    Unit {
        name: "standard_text_width",
        inches: 6.5,
        description: "Reasonable width based on published scientific docs.",
    },
    Unit {
        name: "standard_text_height",
        inches: 9.5,
        description: "Reasonable height based on published scientific docs.",
    },
    Unit {
        name: "beamer_ar169_width",
        inches: 5.511811263318113,
        description: "\\documentclass[aspectratio=169]{beamer} \\linewidth",
    },
    Unit {
        name: "beamer_ar169_height",
        inches: 3.3893697246436973,
        description: "\\documentclass[aspectratio=169]{beamer} \\textheight",
    },
    Unit {
        name: "tex_letter_width",
        inches: 4.77376504773765,
        description: "\\documentclass{article} \\linewidth, letter paper",
    },
    Unit {
        name: "tex_letter_height",
        inches: 7.610350076103501,
        description: "\\documentclass{article} \\textheight, letter paper",
    },
    Unit {
        name: "tex_letter_twocol_width",
        inches: 3.1755915317559156,
        description: "\\documentclass[twocolumn]{article} \\linewidth, letter paper",
    },
    Unit {
        name: "tex_letter_twocol_height",
        inches: 7.610350076103501,
        description: "\\documentclass[twocolumn]{article} \\textheight, letter paper",
    },
    Unit {
        name: "revtex_column_width",
        inches: 246.0 / TEX_POINTS_PER_INCH,
        description: "\\documentclass[reprint]{revtex4-2} \\columnwidth",
    },
    Unit {
        name: "revtex_text_width",
        inches: 510.0 / TEX_POINTS_PER_INCH,
        description: "\\documentclass[reprint]{revtex4-2} \\textwidth",
    },
];

/// Looks up a unit by its exact key.
pub fn unit(name: &str) -> Option<&'static Unit> {
    UNITS.iter().find(|u| u.name == name)
}

/// Inches per `name`, if the unit exists.
pub fn inches_per(name: &str) -> Option<f64> {
    unit(name).map(|u| u.inches)
}

/// One line per unit, as listed at the end of the command line help.
pub fn describe_units() -> String {
    let width = UNITS.iter().map(|u| u.name.len()).max().unwrap_or(0);
    UNITS
        .iter()
        .map(|u| format!("{:<width$}  {:>9.5} in  {}", u.name, u.inches, u.description))
        .collect::<Vec<_>>()
        .join("\n")
}
