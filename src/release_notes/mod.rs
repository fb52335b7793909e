//! Grouping, rendering and persisting of release notes

pub mod group;
pub mod render;
pub mod writer;

pub use group::{group, TicketGroups, TicketKey};
pub use render::{ItemOrder, ReleaseNoteRenderer, SEPARATOR};
pub use writer::{ReleaseNoteDocument, WorkdirSnapshot};
