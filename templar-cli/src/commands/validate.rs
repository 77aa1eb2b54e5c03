//! `templar validate` — batch parse check for every managed template.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use templar_core::template::{is_managed_template, parse_template};
use templar_plan::TEMPLATE_EXTENSION;

/// Arguments for `templar validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the template repository.
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,
}

impl ValidateArgs {
    pub fn run(self) -> Result<()> {
        let mut paths = Vec::new();
        collect_template_paths(&self.repo, &mut paths)
            .with_context(|| format!("failed to walk {}", self.repo.display()))?;
        paths.sort();

        let mut checked = 0usize;
        let mut failures = 0usize;
        for path in paths {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            if !is_managed_template(&text) {
                continue;
            }
            checked += 1;
            let relative = path.strip_prefix(&self.repo).unwrap_or(&path);
            match parse_template(relative, &text) {
                Ok(record) => {
                    println!(
                        "  {}  {}  {}",
                        "✓".green(),
                        relative.display(),
                        record.resource_id()
                    );
                }
                Err(err) => {
                    failures += 1;
                    println!("  {}  {}: {}", "✗".red(), relative.display(), err);
                }
            }
        }

        if failures > 0 {
            bail!("{failures} of {checked} managed templates failed to parse");
        }
        println!("{checked} managed templates OK");
        Ok(())
    }
}

/// Recursively collect `.yaml` paths, skipping `.git`.
fn collect_template_paths(dir: &Path, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            if entry.file_name() == ".git" {
                continue;
            }
            collect_template_paths(&path, out)?;
        } else if path
            .extension()
            .map(|ext| ext == TEMPLATE_EXTENSION)
            .unwrap_or(false)
        {
            out.push(path);
        }
    }
    Ok(())
}
