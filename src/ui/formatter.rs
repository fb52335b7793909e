//! Pure formatting functions for UI output.

use console::style;

use crate::boundary::BoundaryWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the commits found in the release range.
///
/// Shows up to 10 commit lines; longer ranges end with a count of the rest.
pub fn display_commit_analysis(subjects: &[String], previous_tag: &str) {
    println!(
        "\n{}",
        style(format!("Commits since '{}'", previous_tag)).bold()
    );
    println!("{}", style(format!("{} commits:", subjects.len())).underlined());

    for (i, subject) in subjects.iter().take(10).enumerate() {
        println!("  {}. {}", i + 1, shorten(subject, 60));
    }

    if subjects.len() > 10 {
        println!("  ... and {} more commits", subjects.len() - 10);
    }
}

/// Display the version change.
pub fn display_proposed_tag(old_tag: &str, new_tag: &str, hotfix: bool) {
    let kind = if hotfix { "hotfix" } else { "minor" };
    println!("\n{}", style(format!("Version bump ({}):", kind)).bold());
    println!("  From: {}", style(old_tag).red());
    println!("  To:   {}", style(new_tag).green());
}

/// Print the rendered release note.
pub fn display_release_note(lines: &[String]) {
    println!();
    for line in lines {
        println!("{}", line);
    }
}

/// Display manual push instruction for a tag.
pub fn display_manual_push_instruction(tag: &str, remote: &str) {
    println!(
        "\n{} To push this tag later, run:\n  {}",
        style("→").yellow(),
        style(format!("git push {} {}", remote, tag)).cyan()
    );
}

/// Cut `text` to at most `max` characters
pub fn shorten(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
