// tests/integration_test.rs
use std::fs;
use std::path::Path;
use std::process::Command;

use auto_version::cli::{run_release_workflow, ReleaseWorkflowArgs, WorkflowOutcome};
use auto_version::config::Config;
use auto_version::git::{Git2Repository, Repository};
use auto_version::AutoVersionError;
use git2::Repository as RawRepository;
use tempfile::TempDir;

#[test]
fn test_auto_version_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_auto-version"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("auto-version"));
    assert!(stdout.contains("--hotfix"));
    assert!(stdout.contains("--push"));
}

#[test]
fn test_auto_version_rejects_test_with_push() {
    let output = Command::new(env!("CARGO_BIN_EXE_auto-version"))
        .args(["--test", "--push"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}

// Helper: create a commit touching a file named after the commit count
fn commit(repo: &RawRepository, message: &str) -> git2::Oid {
    let workdir = repo.workdir().expect("repository has a workdir");
    let count = fs::read_dir(workdir).unwrap().count();
    let name = format!("file_{}.txt", count);
    fs::write(workdir.join(&name), message).expect("Could not write file");

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new(&name))
        .expect("Could not add file to index");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");
    let sig = repo.signature().expect("Could not get sig");

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("Could not create commit")
}

fn tag_head(repo: &RawRepository, name: &str) {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.tag_lightweight(name, head.as_object(), false)
        .expect("Could not create tag");
}

// Helper function to setup a temporary git repo with a tagged history
fn setup_test_repo() -> (TempDir, RawRepository) {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = RawRepository::init(temp_dir.path()).expect("Could not init git repo");

    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }

    commit(&repo, "Initial commit");
    tag_head(&repo, "v1.0.0");

    commit(&repo, "CB-1 - first feature");
    commit(&repo, "chore: misc");
    commit(&repo, "CB-1 - follow-up");
    commit(&repo, "OB-3 - other team");

    (temp_dir, repo)
}

fn offline() -> ReleaseWorkflowArgs {
    ReleaseWorkflowArgs {
        offline: true,
        ..Default::default()
    }
}

#[test]
fn test_latest_tag_from_history() {
    let (temp_dir, _raw) = setup_test_repo();
    let repo = Git2Repository::open(temp_dir.path()).unwrap();
    assert_eq!(repo.latest_tag().unwrap(), "v1.0.0");
}

#[test]
fn test_latest_tag_prefers_nearest() {
    let (temp_dir, raw) = setup_test_repo();
    tag_head(&raw, "v1.1.0");
    commit(&raw, "CB-9 - after");

    let repo = Git2Repository::open(temp_dir.path()).unwrap();
    assert_eq!(repo.latest_tag().unwrap(), "v1.1.0");
}

#[test]
fn test_no_tag_found() {
    let temp_dir = TempDir::new().unwrap();
    let raw = RawRepository::init(temp_dir.path()).unwrap();
    {
        let mut config = raw.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }
    commit(&raw, "Initial commit");

    let repo = Git2Repository::open(temp_dir.path()).unwrap();
    assert!(matches!(repo.latest_tag(), Err(AutoVersionError::NoTagFound)));
}

#[test]
fn test_commit_subjects_oldest_first() {
    let (temp_dir, _raw) = setup_test_repo();
    let repo = Git2Repository::open(temp_dir.path()).unwrap();

    let subjects = repo.list_commit_subjects("v1.0.0", "HEAD").unwrap();
    assert_eq!(
        subjects,
        vec![
            "CB-1 - first feature (test@example.com)",
            "chore: misc (test@example.com)",
            "CB-1 - follow-up (test@example.com)",
            "OB-3 - other team (test@example.com)",
        ]
    );
}

#[test]
fn test_create_and_delete_tag() {
    let (temp_dir, raw) = setup_test_repo();
    let repo = Git2Repository::open(temp_dir.path()).unwrap();

    repo.create_tag("v9.9.9").unwrap();
    assert!(raw.find_reference("refs/tags/v9.9.9").is_ok());
    repo.delete_tag("v9.9.9").unwrap();
    assert!(raw.find_reference("refs/tags/v9.9.9").is_err());
}

#[test]
fn test_workflow_test_mode_leaves_repo_untouched() {
    let (temp_dir, raw) = setup_test_repo();
    let repo = Git2Repository::open(temp_dir.path()).unwrap();
    let args = ReleaseWorkflowArgs {
        test: true,
        ..offline()
    };

    let result = run_release_workflow(&repo, &args, &Config::default()).unwrap();

    assert_eq!(result.outcome, WorkflowOutcome::DryRun);
    assert_eq!(result.tag, "v1.1.0");
    assert!(result.lines.contains(&"* OB-3 - other team (test@example.com)".to_string()));
    assert!(raw.find_reference("refs/tags/v1.1.0").is_err());
    assert!(!temp_dir.path().join("templates").exists());
}

#[test]
fn test_workflow_creates_tag_on_head() {
    let (temp_dir, raw) = setup_test_repo();
    let repo = Git2Repository::open(temp_dir.path()).unwrap();

    let result = run_release_workflow(&repo, &offline(), &Config::default()).unwrap();

    assert_eq!(result.outcome, WorkflowOutcome::Tagged);
    let tagged = raw
        .find_reference("refs/tags/v1.1.0")
        .unwrap()
        .peel_to_commit()
        .unwrap()
        .id();
    let head = raw.head().unwrap().peel_to_commit().unwrap().id();
    assert_eq!(tagged, head);
    assert_eq!(
        &result.lines[5..],
        &[
            "* CB-1:".to_string(),
            "    1. first feature (test@example.com)".to_string(),
            "    2. follow-up (test@example.com)".to_string(),
            String::new(),
            "* OB-3 - other team (test@example.com)".to_string(),
        ]
    );
}

#[test]
fn test_workflow_without_qualifying_commits_removes_tag() {
    let (temp_dir, raw) = setup_test_repo();
    tag_head(&raw, "v1.1.0");
    commit(&raw, "chore: nothing to report");

    let repo = Git2Repository::open(temp_dir.path()).unwrap();
    let result = run_release_workflow(&repo, &offline(), &Config::default()).unwrap();

    assert_eq!(result.outcome, WorkflowOutcome::NoQualifyingCommits);
    assert!(raw.find_reference("refs/tags/v1.2.0").is_err());
}

#[test]
fn test_fetch_tags_from_origin() {
    let (origin_dir, origin) = setup_test_repo();
    let clone_dir = TempDir::new().unwrap();
    let clone = RawRepository::clone(origin_dir.path().to_str().unwrap(), clone_dir.path())
        .expect("Could not clone");

    tag_head(&origin, "v1.5.0");
    assert!(clone.find_reference("refs/tags/v1.5.0").is_err());

    let repo = Git2Repository::from_git2(clone);
    repo.fetch_tags("origin").unwrap();
    assert_eq!(repo.latest_tag().unwrap(), "v1.5.0");
}

#[test]
fn test_fetch_from_unknown_remote_fails() {
    let (temp_dir, _raw) = setup_test_repo();
    let repo = Git2Repository::open(temp_dir.path()).unwrap();
    let err = repo.fetch_tags("nowhere").unwrap_err();
    assert!(err.is_external());
}

#[test]
fn test_workflow_push_publishes_to_origin() {
    let (temp_dir, raw) = setup_test_repo();
    let origin_dir = TempDir::new().unwrap();
    let origin = RawRepository::init_bare(origin_dir.path()).unwrap();
    raw.remote("origin", origin_dir.path().to_str().unwrap())
        .unwrap();
    let branch = raw.head().unwrap().shorthand().unwrap().to_string();

    let repo = Git2Repository::open(temp_dir.path()).unwrap();
    let args = ReleaseWorkflowArgs {
        push: true,
        ..offline()
    };
    let config = Config::default();
    let result = run_release_workflow(&repo, &args, &config).unwrap();

    assert_eq!(result.outcome, WorkflowOutcome::Published);

    let note = temp_dir
        .path()
        .join(&config.paths.release_notes_dir)
        .join("RELEASE_NOTES_v1.1.0.md");
    assert!(note.exists());

    let head = raw.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.summary(), Some("Generate release note: v1.1.0"));
    assert!(head
        .tree()
        .unwrap()
        .get_path(&config.paths.history_file)
        .is_ok());

    assert!(origin.find_reference("refs/tags/v1.1.0").is_ok());
    let pushed_head = origin
        .find_reference(&format!("refs/heads/{}", branch))
        .unwrap()
        .peel_to_commit()
        .unwrap()
        .id();
    assert_eq!(pushed_head, head.id());
}

#[test]
fn test_workflow_push_failure_rolls_back() {
    let (temp_dir, raw) = setup_test_repo();
    // no "origin" remote configured, so pushing fails after the tag exists
    let repo = Git2Repository::open(temp_dir.path()).unwrap();
    let args = ReleaseWorkflowArgs {
        push: true,
        ..offline()
    };

    let err = run_release_workflow(&repo, &args, &Config::default()).unwrap_err();
    assert!(err.is_external());
    assert!(raw.find_reference("refs/tags/v1.1.0").is_err());
}
