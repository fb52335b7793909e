use serde::{Deserialize, Serialize};

use crate::config::RenderConfig;
use crate::domain::{ClassifiedCommit, Version};
use crate::release_notes::group::TicketGroups;

/// Banner rule; the title lines are centred on its width
pub const SEPARATOR: &str = "--------------------------------";

const INDENT: &str = "    ";

/// Order of the enumerated items inside a multi-commit ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemOrder {
    /// As stored in the group (chronological when fed oldest first)
    #[default]
    Stored,
    Reversed,
}

/// Renders grouped commits into release note lines
#[derive(Debug, Clone)]
pub struct ReleaseNoteRenderer {
    order: ItemOrder,
    attribution: String,
}

impl Default for ReleaseNoteRenderer {
    fn default() -> Self {
        ReleaseNoteRenderer::from_config(&RenderConfig::default())
    }
}

impl ReleaseNoteRenderer {
    pub fn new(order: ItemOrder, attribution: impl Into<String>) -> Self {
        ReleaseNoteRenderer {
            order,
            attribution: attribution.into(),
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        ReleaseNoteRenderer::new(config.item_order, config.attribution.clone())
    }

    /// Render the banner followed by one block per ticket, in group order.
    ///
    /// Output depends only on the arguments, so rendering the same input twice
    /// gives identical lines.
    pub fn render(&self, version: &Version, groups: &TicketGroups) -> Vec<String> {
        let mut lines = self.banner(version);

        for (key, commits) in groups {
            match commits.as_slice() {
                [] => {}
                [single] => {
                    lines.push(format!("* {} - {}", key, entry(single)));
                }
                many => {
                    lines.push(format!("* {}:", key));
                    let items: Vec<&ClassifiedCommit> = match self.order {
                        ItemOrder::Stored => many.iter().collect(),
                        ItemOrder::Reversed => many.iter().rev().collect(),
                    };
                    for (n, commit) in items.into_iter().enumerate() {
                        lines.push(format!("{}{}. {}", INDENT, n + 1, entry(commit)));
                    }
                    lines.push(String::new());
                }
            }
        }

        lines
    }

    fn banner(&self, version: &Version) -> Vec<String> {
        vec![
            SEPARATOR.to_string(),
            centered(&format!("RELEASE {}", version)),
            centered(&self.attribution),
            SEPARATOR.to_string(),
            String::new(),
        ]
    }
}

fn entry(commit: &ClassifiedCommit) -> String {
    format!("{} ({})", commit.message, commit.email)
}

fn centered(text: &str) -> String {
    format!("{:^width$}", text, width = SEPARATOR.len())
        .trim_end()
        .to_string()
}
