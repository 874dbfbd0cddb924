//! Console operator: shows candidates and collects y/N verdicts.

use std::io::Write;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::warn;

use pixleak_recover::Operator;

/// Interactive operator backed by stdin and an optional external viewer.
///
/// With a viewer command configured, each candidate is opened with
/// `<command> <artifact>` and the prompt follows once the viewer exits.
/// Without one, the artifact path is printed for the operator to open
/// themselves.
pub struct ConsoleOperator {
    viewer: Option<String>,
}

impl ConsoleOperator {
    pub fn new(viewer: Option<String>) -> Self {
        Self { viewer }
    }
}

impl Operator for ConsoleOperator {
    fn present(&mut self, artifact: &Path) -> Result<()> {
        println!("candidate: {}", artifact.display());

        if let Some(viewer) = &self.viewer {
            // a broken viewer should not kill the run; the path is already
            // printed, so the operator can still open the file by hand
            match Command::new(viewer).arg(artifact).status() {
                Ok(status) if !status.success() => {
                    warn!(%viewer, %status, "viewer exited with failure");
                }
                Err(e) => {
                    warn!(%viewer, error = %e, "failed to launch viewer");
                }
                Ok(_) => {}
            }
        }
        Ok(())
    }

    fn confirm(&mut self) -> Result<bool> {
        print!("Was that legible? [y/N] ");
        std::io::stdout().flush().context("flushing prompt")?;

        let mut answer = String::new();
        std::io::stdin()
            .read_line(&mut answer)
            .context("reading operator answer")?;
        Ok(answer.trim() == "y")
    }
}
