use indexmap::IndexMap;
use std::fmt;

use crate::domain::ClassifiedCommit;

/// Identity of a ticket group
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicketKey {
    pub team: String,
    pub ticket: String,
}

impl TicketKey {
    pub fn new(team: impl Into<String>, ticket: impl Into<String>) -> Self {
        TicketKey {
            team: team.into(),
            ticket: ticket.into(),
        }
    }

    pub fn of(commit: &ClassifiedCommit) -> Self {
        TicketKey::new(commit.team.clone(), commit.ticket.clone())
    }
}

impl fmt::Display for TicketKey {
    /// `CB-42`, or just `HOTFIX` when there is no ticket number
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ticket.is_empty() {
            write!(f, "{}", self.team)
        } else {
            write!(f, "{}-{}", self.team, self.ticket)
        }
    }
}

/// Commits per ticket, in first-seen ticket order
pub type TicketGroups = IndexMap<TicketKey, Vec<ClassifiedCommit>>;

/// Partition commits by (team, ticket).
///
/// Tickets keep the order in which they were first seen and each group keeps
/// the input order of its commits; nothing is reordered here.
pub fn group(commits: &[ClassifiedCommit]) -> TicketGroups {
    let mut groups = TicketGroups::new();
    for commit in commits {
        groups
            .entry(TicketKey::of(commit))
            .or_default()
            .push(commit.clone());
    }
    groups
}
