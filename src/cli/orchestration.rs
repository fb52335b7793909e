//! Main workflow orchestration logic
//!
//! Runs the release as an ordered list of steps: fetch tags, read the latest
//! version, decide the next one, tag, classify, group, render and optionally
//! persist and push. Once the new tag exists every failure deletes it again
//! before the error is returned.

use std::path::PathBuf;

use crate::analyzer::{VersionAnalyzer, VersionDecision};
use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{classify_with_report, ClassifyReport, PrefixRules, Version};
use crate::error::Result;
use crate::git::Repository;
use crate::release_notes::{
    group, writer, ReleaseNoteDocument, ReleaseNoteRenderer, WorkdirSnapshot,
};

/// Arguments for the release workflow
///
/// Mirrors the CLI flags so the workflow can be driven without clap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReleaseWorkflowArgs {
    /// Increment the release field regardless of commit markers
    pub hotfix: bool,

    /// Classify and render only; no tag mutation, no file writes
    pub test: bool,

    /// Persist the note, commit it and push branch and tag
    pub push: bool,

    /// Skip fetching tags from the remote
    pub offline: bool,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// Tag created locally, note rendered
    Tagged,
    /// Tag created, note persisted and everything pushed
    Published,
    /// `test` mode: nothing was changed
    DryRun,
    /// No commit matched a prefix; the new tag was removed again
    NoQualifyingCommits,
}

/// Result of a release workflow run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub previous_tag: String,
    pub tag: String,
    pub decision: VersionDecision,
    pub outcome: WorkflowOutcome,
    /// Rendered release note; empty when there was nothing to report
    pub lines: Vec<String>,
    /// Raw log lines of the range, oldest first
    pub subjects: Vec<String>,
    /// Files written and committed in push mode
    pub written: Vec<PathBuf>,
    pub warnings: Vec<BoundaryWarning>,
}

/// Main release workflow
///
/// # Arguments
///
/// * `repo` - Version-control collaborator
/// * `args` - Workflow flags (hotfix, test, push, offline)
/// * `config` - Loaded configuration
///
/// # Returns
///
/// The created tag and rendered note, or the first hard error. A tag created
/// by this run never survives an error.
pub fn run_release_workflow<R: Repository>(
    repo: &R,
    args: &ReleaseWorkflowArgs,
    config: &Config,
) -> Result<WorkflowResult> {
    let rules = config.prefix_rules()?;
    let analyzer = VersionAnalyzer::from_config(config)?;
    let renderer = ReleaseNoteRenderer::from_config(&config.render);

    if !args.offline {
        tracing::info!(remote = %config.remote, "fetching tags");
        repo.fetch_tags(&config.remote)?;
    }

    let previous_tag = repo.latest_tag()?;
    let current = Version::parse(&previous_tag)?;
    tracing::info!(tag = %previous_tag, "latest tag");

    let subjects = repo.list_commit_subjects(&previous_tag, "HEAD")?;
    let decision = analyzer.decide(current, &subjects, args.hotfix)?;
    let tag = decision.next.to_string();
    tracing::info!(tag = %tag, field = ?decision.field, "next version");

    let mut result = WorkflowResult {
        previous_tag,
        tag,
        decision,
        outcome: WorkflowOutcome::DryRun,
        lines: Vec::new(),
        subjects,
        written: Vec::new(),
        warnings: Vec::new(),
    };

    if args.test {
        build_note(&mut result, &rules, &renderer);
        if result.lines.is_empty() {
            result.outcome = WorkflowOutcome::NoQualifyingCommits;
        }
        return Ok(result);
    }

    repo.create_tag(&result.tag)?;
    tracing::info!(tag = %result.tag, "created tag");

    match publish(repo, args, config, &rules, &renderer, &mut result) {
        Ok(()) => {
            if result.outcome == WorkflowOutcome::NoQualifyingCommits {
                rollback(repo, &mut result);
            }
            Ok(result)
        }
        Err(e) => {
            tracing::warn!(tag = %result.tag, error = %e, "release failed, removing tag");
            rollback(repo, &mut result);
            Err(e)
        }
    }
}

fn publish<R: Repository>(
    repo: &R,
    args: &ReleaseWorkflowArgs,
    config: &Config,
    rules: &PrefixRules,
    renderer: &ReleaseNoteRenderer,
    result: &mut WorkflowResult,
) -> Result<()> {
    build_note(result, rules, renderer);
    if result.lines.is_empty() {
        result.outcome = WorkflowOutcome::NoQualifyingCommits;
        return Ok(());
    }

    if !args.push {
        result.outcome = WorkflowOutcome::Tagged;
        return Ok(());
    }

    let document = ReleaseNoteDocument::new(result.decision.next, result.lines.clone());
    let root = repo.workdir()?;
    let snapshot = WorkdirSnapshot::capture(&root, &config.paths, &document)?;

    // until the commit lands the written files are undone with the tag
    let committed = writer::persist(&root, &config.paths, &document).and_then(|written| {
        repo.add_and_commit(&written, &format!("Generate release note: {}", result.tag))?;
        Ok(written)
    });
    match committed {
        Ok(written) => result.written = written,
        Err(e) => {
            if let Err(restore_err) = snapshot.restore() {
                tracing::warn!(error = %restore_err, "could not restore release note files");
            }
            return Err(e);
        }
    }

    let branch = repo.push_branch(&config.remote)?;
    tracing::info!(branch = %branch, remote = %config.remote, "pushed branch");
    repo.push_tag(&config.remote, &result.tag)?;
    tracing::info!(tag = %result.tag, remote = %config.remote, "pushed tag");

    result.outcome = WorkflowOutcome::Published;
    Ok(())
}

/// Classify, group and render the range into `result`
fn build_note(
    result: &mut WorkflowResult,
    rules: &PrefixRules,
    renderer: &ReleaseNoteRenderer,
) {
    let report: ClassifyReport = classify_with_report(&result.subjects, rules);
    if report.skipped() > 0 {
        result.warnings.push(BoundaryWarning::SkippedCommits {
            no_email: report.skipped_no_email,
            unmatched: report.skipped_unmatched,
        });
    }

    if report.commits.is_empty() {
        result.warnings.push(BoundaryWarning::NoQualifyingCommits {
            from: result.previous_tag.clone(),
            to: result.tag.clone(),
        });
        return;
    }

    let groups = group(&report.commits);
    result.lines = renderer.render(&result.decision.next, &groups);
}

fn rollback<R: Repository>(repo: &R, result: &mut WorkflowResult) {
    match repo.delete_tag(&result.tag) {
        Ok(()) => tracing::info!(tag = %result.tag, "deleted tag"),
        Err(e) => {
            let warning = BoundaryWarning::RollbackFailed {
                tag: result.tag.clone(),
                reason: e.to_string(),
            };
            tracing::warn!("{}", warning);
            result.warnings.push(warning);
        }
    }
}
