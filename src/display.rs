// src/display.rs

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::Command;

use crate::error::Result;
use crate::figure::Figure;
use crate::save::{save_figure, SaveType};

/// Shows produced figures to the user and returns once they are dismissed.
pub trait Display {
    fn show(&self, figures: &[(String, Figure)]) -> Result<()>;
}

/// Renders each figure to a PNG in a temporary directory, opens it with the
/// platform image viewer and waits for Enter on stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct ViewerDisplay;

impl ViewerDisplay {
    fn open(path: &Path) -> io::Result<()> {
        let mut cmd = if cfg!(target_os = "macos") {
            Command::new("open")
        } else if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/C", "start", ""]);
            c
        } else {
            Command::new("xdg-open")
        };
        cmd.arg(path).spawn().map(|_| ())
    }
}

impl Display for ViewerDisplay {
    fn show(&self, figures: &[(String, Figure)]) -> Result<()> {
        if figures.is_empty() {
            log::info!("No figures to show");
            return Ok(());
        }
        let dir = tempfile::Builder::new().prefix("docfigs-").tempdir()?;
        for (name, fig) in figures {
            let path = dir.path().join(format!("{name}.png"));
            save_figure(fig, &path, SaveType::Png)?;
            if let Err(e) = Self::open(&path) {
                log::warn!("Could not open a viewer for {}: {}", path.display(), e);
                println!("{}: {}", name, path.display());
            }
        }

        print!("Press Enter to close {} figure(s)...", figures.len());
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        // `dir` is removed on drop.
        Ok(())
    }
}
