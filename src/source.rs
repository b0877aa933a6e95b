//! Remote fetch collaborator boundary. The viewer core only ever sees
//! "a source of raw text, or failure" — identical to pasted input.
//! Token resolution, endpoint selection and fallback live on the
//! other side of this boundary.

use anyhow::{Context, Result, bail};
use std::process::Command;

/// a source of raw log text for a named workflow
pub trait RawLogSource {
    fn fetch(&self, workflow: &str) -> Result<String>;
}

/// fetches logs by running an external command with the workflow name
/// substituted for `{workflow}` in the template; the command is
/// expected to resolve its own credentials and print log text to
/// stdout
pub struct CommandSource {
    template: String,
}

impl CommandSource {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl RawLogSource for CommandSource {
    fn fetch(&self, workflow: &str) -> Result<String> {
        // a cancelled selection hands us an empty key; fail here rather
        // than running a command with a hole in it
        if workflow.is_empty() {
            bail!("workflow name is empty");
        }

        let command = self.template.replace("{workflow}", workflow);
        log::debug!("fetching logs via: {command}");

        let output = Command::new("sh")
            .arg("-c")
            .arg(&command)
            .output()
            .with_context(|| format!("failed to run fetch command: {command}"))?;

        if !output.status.success() {
            bail!(
                "fetch command exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
