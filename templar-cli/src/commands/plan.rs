//! `templar plan` — classify template changes and print the resulting plan.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use similar::TextDiff;

use templar_core::types::{Deletion, TemplateRecord};
use templar_core::Config;
use templar_git::{GitRepo, VcsClient};
use templar_plan::{GitDiff, Plan};

/// Arguments for `templar plan`.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Path to the template repository.
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,

    /// Baseline revision. Defaults to the remote default branch tip.
    #[arg(long)]
    pub from: Option<String>,

    /// Target revision. Defaults to the current HEAD.
    #[arg(long)]
    pub to: Option<String>,

    /// Proceed without complaint when the working tree is dirty.
    #[arg(long)]
    pub allow_dirty: bool,

    /// Account registry file. Defaults to `<repo>/templar.yaml`.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Additionally print a unified diff of each modified document.
    #[arg(long)]
    pub diff: bool,
}

impl PlanArgs {
    pub fn run(self) -> Result<()> {
        let config = load_config(&self.repo, self.config.as_deref())?;
        let client = GitRepo::open(&self.repo)
            .with_context(|| format!("failed to open repository at {}", self.repo.display()))?;

        let result = templar_plan::plan(
            &config,
            &client,
            self.from.as_deref(),
            self.to.as_deref(),
            self.allow_dirty,
        )
        .context("reconciliation pass failed")?;

        print_plan(&result);
        if self.diff {
            print_diffs(&client, &result.changes.modified_files)?;
        }
        Ok(())
    }
}

fn load_config(repo: &Path, explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => {
            Config::load(path).with_context(|| format!("failed to load {}", path.display()))
        }
        None => {
            let default_path = repo.join("templar.yaml");
            if default_path.exists() {
                Config::load(&default_path)
                    .with_context(|| format!("failed to load {}", default_path.display()))
            } else {
                log::warn!(
                    "no account registry at {}; wildcard scopes cannot be expanded",
                    default_path.display()
                );
                Ok(Config::default())
            }
        }
    }
}

fn print_plan(plan: &Plan) {
    if plan.changes.is_empty() {
        println!("No managed template changes.");
        return;
    }

    println!(
        "Plan: {} new, {} deleted, {} modified",
        plan.changes.new_files.len(),
        plan.changes.deleted_files.len(),
        plan.changes.modified_files.len()
    );

    for diff in &plan.changes.new_files {
        let line = describe(plan, &diff.path);
        println!("  {}  {}", "+".green(), line);
    }
    for diff in &plan.changes.deleted_files {
        let line = describe(plan, &diff.path);
        println!("  {}  {}", "✗".red(), line);
    }
    for diff in &plan.changes.modified_files {
        let line = describe(plan, &diff.path);
        println!("  {}  {}", "~".yellow(), line);
    }
}

/// One summary line for the record at `path`.
fn describe(plan: &Plan, path: &Path) -> String {
    match plan.templates.iter().find(|t| t.file_path.as_path() == path) {
        Some(record) => format!(
            "{}  {}  {}{}",
            path.display(),
            record.template_type(),
            record.resource_id(),
            directive_note(record)
        ),
        // A new file's record parses from the working tree; a deleted file
        // already marked deleted produces no record at all.
        None => path.display().to_string(),
    }
}

fn directive_note(record: &TemplateRecord) -> String {
    match &record.scope().deleted {
        Deletion::Partial(directives) => {
            let n = directives.len();
            if n == 1 {
                "  (1 deletion directive)".to_string()
            } else {
                format!("  ({n} deletion directives)")
            }
        }
        _ => String::new(),
    }
}

fn print_diffs(client: &GitRepo, modified: &[GitDiff]) -> Result<()> {
    for diff in modified {
        let Some(baseline) = &diff.content else {
            continue;
        };
        let current = client
            .read_worktree_file(&diff.path)
            .with_context(|| format!("failed to read {}", diff.path.display()))?;

        let old_header = format!("a/{}", diff.path.display());
        let new_header = format!("b/{}", diff.path.display());
        let unified = TextDiff::from_lines(baseline.as_str(), current.as_str())
            .unified_diff()
            .header(&old_header, &new_header)
            .context_radius(3)
            .to_string();
        print!("{unified}");
        if !unified.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}
