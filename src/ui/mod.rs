//! User interface module - terminal output for a workflow run.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_commit_analysis, display_error,
    display_manual_push_instruction, display_proposed_tag, display_release_note, display_status,
    display_success,
};

use crate::cli::{WorkflowOutcome, WorkflowResult};

/// Report a finished run: warnings, version change, note and final status
pub fn display_workflow_result(result: &WorkflowResult, remote: &str) {
    display_commit_analysis(&result.subjects, &result.previous_tag);
    display_proposed_tag(&result.previous_tag, &result.tag, result.decision.hotfix);

    for warning in &result.warnings {
        display_boundary_warning(warning);
    }

    if !result.lines.is_empty() {
        display_release_note(&result.lines);
    }

    match result.outcome {
        WorkflowOutcome::DryRun => {
            display_status(&format!(
                "Test run: tag {} was not created and no files were written",
                result.tag
            ));
        }
        WorkflowOutcome::NoQualifyingCommits => {
            display_status("No valid commits to process, nothing was released");
        }
        WorkflowOutcome::Tagged => {
            display_success(&format!("Created tag: {}", result.tag));
            display_manual_push_instruction(&result.tag, remote);
        }
        WorkflowOutcome::Published => {
            for path in &result.written {
                display_success(&format!("Written: {}", path.display()));
            }
            display_success(&format!("Published {} to {}", result.tag, remote));
        }
    }
}
