use std::fs;
use std::path::{Path, PathBuf};

use crate::config::PathsConfig;
use crate::domain::Version;
use crate::error::Result;

/// A rendered release note and the file name it is stored under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseNoteDocument {
    pub version: Version,
    pub lines: Vec<String>,
}

impl ReleaseNoteDocument {
    pub fn new(version: Version, lines: Vec<String>) -> Self {
        ReleaseNoteDocument { version, lines }
    }

    /// `RELEASE_NOTES_<version>.md`
    pub fn filename(&self) -> String {
        format!("RELEASE_NOTES_{}.md", self.version)
    }

    /// Lines joined with newlines, newline-terminated
    pub fn text(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// Create the notes directory and an empty history file when missing
pub fn prepare_paths(root: &Path, paths: &PathsConfig) -> Result<()> {
    let notes_dir = root.join(&paths.release_notes_dir);
    if !notes_dir.exists() {
        fs::create_dir_all(&notes_dir)?;
        tracing::info!(path = %notes_dir.display(), "created release notes directory");
    }

    let history = root.join(&paths.history_file);
    if !history.exists() {
        if let Some(parent) = history.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&history, "")?;
        tracing::info!(path = %history.display(), "created release history file");
    }
    Ok(())
}

/// Write the note into `dir`, returning the file path
pub fn write_note(dir: &Path, document: &ReleaseNoteDocument) -> Result<PathBuf> {
    let path = dir.join(document.filename());
    fs::write(&path, document.text())?;
    tracing::info!(path = %path.display(), "wrote release note");
    Ok(path)
}

/// Put the note at the top of the history file, keeping what was there
pub fn prepend_history(history: &Path, document: &ReleaseNoteDocument) -> Result<()> {
    let existing = if history.exists() {
        fs::read_to_string(history)?
    } else {
        String::new()
    };

    let mut content = document.text();
    content.push_str(&existing);
    fs::write(history, content)?;
    tracing::info!(path = %history.display(), "updated release history");
    Ok(())
}

/// Prepare directories, write the note and prepend the history file.
///
/// Returns the written paths relative to `root`, ready to be staged.
pub fn persist(
    root: &Path,
    paths: &PathsConfig,
    document: &ReleaseNoteDocument,
) -> Result<Vec<PathBuf>> {
    prepare_paths(root, paths)?;
    write_note(&root.join(&paths.release_notes_dir), document)?;
    prepend_history(&root.join(&paths.history_file), document)?;
    Ok(vec![
        paths.release_notes_dir.join(document.filename()),
        paths.history_file.clone(),
    ])
}

/// Contents of the files [`persist`] touches, captured before it runs so a
/// failed publish can put the working tree back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkdirSnapshot {
    note: PathBuf,
    previous_note: Option<String>,
    history: PathBuf,
    previous_history: Option<String>,
    created_dirs: Vec<PathBuf>,
}

impl WorkdirSnapshot {
    pub fn capture(root: &Path, paths: &PathsConfig, document: &ReleaseNoteDocument) -> Result<Self> {
        let notes_dir = root.join(&paths.release_notes_dir);
        let note = notes_dir.join(document.filename());
        let history = root.join(&paths.history_file);

        let mut created_dirs: Vec<PathBuf> = Vec::new();
        for dir in [Some(notes_dir.as_path()), history.parent()].into_iter().flatten() {
            let Some(top) = topmost_missing(root, dir) else {
                continue;
            };
            if created_dirs.iter().any(|d| top.starts_with(d)) {
                continue;
            }
            created_dirs.retain(|d| !d.starts_with(&top));
            created_dirs.push(top);
        }

        Ok(WorkdirSnapshot {
            previous_note: read_optional(&note)?,
            note,
            previous_history: read_optional(&history)?,
            history,
            created_dirs,
        })
    }

    /// Put the captured contents back and remove what did not exist before
    pub fn restore(&self) -> Result<()> {
        restore_file(&self.note, self.previous_note.as_deref())?;
        restore_file(&self.history, self.previous_history.as_deref())?;
        for dir in &self.created_dirs {
            if dir.exists() {
                fs::remove_dir_all(dir)?;
            }
        }
        tracing::info!(path = %self.history.display(), "restored working tree");
        Ok(())
    }
}

/// Highest ancestor of `dir` below `root` that does not exist yet
fn topmost_missing(root: &Path, dir: &Path) -> Option<PathBuf> {
    let mut missing = None;
    let mut current = Some(dir);
    while let Some(path) = current {
        if path == root || path.exists() {
            break;
        }
        missing = Some(path.to_path_buf());
        current = path.parent();
    }
    missing
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn restore_file(path: &Path, previous: Option<&str>) -> Result<()> {
    match previous {
        Some(content) => fs::write(path, content)?,
        None if path.exists() => fs::remove_file(path)?,
        None => {}
    }
    Ok(())
}
