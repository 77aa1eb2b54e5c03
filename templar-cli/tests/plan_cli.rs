//! Integration tests for `templar plan` over a real repository.

use std::path::Path;

use assert_cmd::Command;
use git2::{Repository, RepositoryInitOptions, Signature};
use predicates::prelude::*;
use tempfile::TempDir;

const ROLE_WIDE: &str = concat!(
    "template_type: Templar::AWS::Role\n",
    "name: deploy-bot\n",
    "included_accounts:\n",
    "  - prod\n",
    "  - staging\n",
);

const ROLE_NARROW: &str = concat!(
    "template_type: Templar::AWS::Role\n",
    "name: deploy-bot\n",
    "included_accounts:\n",
    "  - staging\n",
);

const CONFIG: &str = concat!(
    "accounts:\n",
    "  - account_id: '100000000001'\n",
    "    account_name: prod\n",
    "  - account_id: '100000000002'\n",
    "    account_name: staging\n",
);

fn commit_file(repo: &Repository, rel: &str, content: &str, message: &str) -> String {
    let workdir = repo.workdir().expect("workdir");
    let path = workdir.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdir");
    }
    std::fs::write(path, content).expect("write");

    let mut index = repo.index().expect("index");
    index.add_path(Path::new(rel)).expect("add");
    index.write().expect("index write");
    let tree_id = index.write_tree().expect("write tree");
    let tree = repo.find_tree(tree_id).expect("find tree");
    let sig = Signature::now("tester", "tester@example.com").expect("signature");
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<_> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("commit")
        .to_string()
}

#[test]
fn plan_prints_modified_record_with_directive() {
    let dir = TempDir::new().expect("tempdir");
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head("main");
    let repo = Repository::init_opts(dir.path(), &opts).expect("init");

    std::fs::write(dir.path().join("templar.yaml"), CONFIG).expect("config");
    let first = commit_file(&repo, "roles/deploy-bot.yaml", ROLE_WIDE, "add role");
    let second = commit_file(&repo, "roles/deploy-bot.yaml", ROLE_NARROW, "narrow");

    Command::cargo_bin("templar")
        .expect("binary")
        .args(["plan", "--allow-dirty", "--from", &first, "--to", &second, "--repo"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan: 0 new, 0 deleted, 1 modified"))
        .stdout(predicate::str::contains("deploy-bot"))
        .stdout(predicate::str::contains("(1 deletion directive)"));
}

#[test]
fn plan_diff_shows_unified_diff() {
    let dir = TempDir::new().expect("tempdir");
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head("main");
    let repo = Repository::init_opts(dir.path(), &opts).expect("init");

    let first = commit_file(&repo, "roles/deploy-bot.yaml", ROLE_WIDE, "add role");
    let second = commit_file(&repo, "roles/deploy-bot.yaml", ROLE_NARROW, "narrow");

    Command::cargo_bin("templar")
        .expect("binary")
        .args([
            "plan",
            "--allow-dirty",
            "--diff",
            "--from",
            &first,
            "--to",
            &second,
            "--repo",
        ])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("--- a/roles/deploy-bot.yaml"))
        .stdout(predicate::str::contains("+++ b/roles/deploy-bot.yaml"))
        .stdout(predicate::str::contains("-  - prod"));
}

#[test]
fn plan_reports_no_changes_for_identical_revisions() {
    let dir = TempDir::new().expect("tempdir");
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head("main");
    let repo = Repository::init_opts(dir.path(), &opts).expect("init");

    let first = commit_file(&repo, "roles/deploy-bot.yaml", ROLE_WIDE, "add role");

    Command::cargo_bin("templar")
        .expect("binary")
        .args(["plan", "--allow-dirty", "--from", &first, "--to", &first, "--repo"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No managed template changes."));
}
