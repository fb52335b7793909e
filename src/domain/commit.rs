use regex::Regex;
use std::sync::LazyLock;

use crate::domain::prefix::PrefixRules;

/// Author address inside a `"<subject> (<email>)"` log line.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)+").expect("Invalid email regex")
});

/// A commit line that matched one of the configured prefix rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedCommit {
    /// Digits found in the matched prefix; empty when the prefix carries none
    pub ticket: String,
    /// Label of the rule that matched
    pub team: String,
    /// Subject without prefix, separator and author suffix
    pub message: String,
    pub email: String,
}

/// Classification output together with what was dropped on the way
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifyReport {
    pub commits: Vec<ClassifiedCommit>,
    pub skipped_no_email: usize,
    pub skipped_unmatched: usize,
}

impl ClassifyReport {
    pub fn skipped(&self) -> usize {
        self.skipped_no_email + self.skipped_unmatched
    }
}

/// Classify raw log lines, dropping the ones that carry no email or match no rule
pub fn classify(lines: &[String], rules: &PrefixRules) -> Vec<ClassifiedCommit> {
    classify_with_report(lines, rules).commits
}

/// Like [`classify`], but also counts the lines that were skipped
pub fn classify_with_report(lines: &[String], rules: &PrefixRules) -> ClassifyReport {
    let mut report = ClassifyReport::default();

    for line in lines {
        let subject = strip_leading_brackets(line.trim());
        if subject.is_empty() {
            continue;
        }

        let Some(email) = author_email(&subject) else {
            tracing::debug!(line = %line, "skipping commit without author email");
            report.skipped_no_email += 1;
            continue;
        };

        let Some((rule, span)) = rules.first_match(&subject) else {
            tracing::debug!(line = %line, "skipping commit without a known prefix");
            report.skipped_unmatched += 1;
            continue;
        };

        let ticket = ticket_number(span, &rule.label);
        let message = clean_message(&subject[span.len()..], email);

        report.commits.push(ClassifiedCommit {
            ticket,
            team: rule.label.clone(),
            message,
            email: email.to_string(),
        });
    }

    report
}

/// Remove one leading `[...]` pair, keeping the text inside it in place
pub fn strip_leading_brackets(line: &str) -> String {
    if let Some(rest) = line.strip_prefix('[') {
        if let Some(close) = rest.find(']') {
            return format!("{}{}", &rest[..close], &rest[close + 1..]);
        }
    }
    line.to_string()
}

/// Digits of the matched span that follow the label itself
fn ticket_number(span: &str, label: &str) -> String {
    let rest = match span.get(..label.len()) {
        Some(head) if head.eq_ignore_ascii_case(label) => &span[label.len()..],
        _ => span,
    };
    rest.chars().filter(char::is_ascii_digit).collect()
}

/// The author email; the last address on the line wins since the log format
/// appends it at the end.
fn author_email(line: &str) -> Option<&str> {
    EMAIL_RE.find_iter(line).last().map(|m| m.as_str())
}

fn clean_message(rest: &str, email: &str) -> String {
    let mut msg = rest.trim_start();
    if let Some(stripped) = msg.strip_prefix('-').or_else(|| msg.strip_prefix(':')) {
        msg = stripped.trim_start();
    }

    let msg = msg.trim_end();
    let suffix = format!("({})", email);
    msg.strip_suffix(suffix.as_str())
        .unwrap_or(msg)
        .trim_end()
        .to_string()
}
