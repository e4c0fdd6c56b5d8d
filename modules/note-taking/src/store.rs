//! NoteStore — in-memory note collection mirrored to a JSON file.
//!
//! Every mutation is committed in memory first and then written to disk as a
//! separate, best-effort step. A failed write is logged and otherwise ignored,
//! so the caller still sees the mutation succeed.

use crate::error::{PersistError, StoreError};
use note_taking_types::{FIRST_ID, Note, NotesSnapshot};
use parking_lot::Mutex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What was found at the notes file path on startup.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(NotesSnapshot),
    Missing,
    Corrupt(String),
}

impl LoadOutcome {
    /// Read and parse the notes file. Never fails: unreadable or malformed
    /// content is reported as `Corrupt`.
    pub fn read(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return LoadOutcome::Missing,
            Err(e) => return LoadOutcome::Corrupt(e.to_string()),
        };

        let snapshot = match serde_json::from_str::<NotesSnapshot>(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => return LoadOutcome::Corrupt(e.to_string()),
        };

        match repair_counter(snapshot) {
            Some(snapshot) => LoadOutcome::Loaded(snapshot),
            None => LoadOutcome::Corrupt(format!("note id {} can never be issued", u64::MAX)),
        }
    }

    /// Starting state for the store. `Missing` and `Corrupt` both give an
    /// empty collection with the counter at 1.
    pub fn into_snapshot(self) -> NotesSnapshot {
        match self {
            LoadOutcome::Loaded(snapshot) => snapshot,
            LoadOutcome::Missing | LoadOutcome::Corrupt(_) => NotesSnapshot::default(),
        }
    }
}

/// Raise `next_id` above every loaded id so a hand-edited file can't cause
/// an id to be issued twice. `None` if a stored id leaves no room above it.
fn repair_counter(mut snapshot: NotesSnapshot) -> Option<NotesSnapshot> {
    let mut floor = FIRST_ID;
    for note in &snapshot.notes {
        floor = floor.max(note.id.checked_add(1)?);
    }

    if snapshot.next_id < floor {
        log::warn!(
            "[NOTES] next_id {} is not above stored ids, raising to {}",
            snapshot.next_id,
            floor
        );
        snapshot.next_id = floor;
    }
    Some(snapshot)
}

/// Writes happen synchronously while the lock is held, so callers on an
/// async runtime should run mutations on a blocking thread
/// (`tokio::task::spawn_blocking`).
pub struct NoteStore {
    path: PathBuf,
    state: Mutex<NotesSnapshot>,
}

impl NoteStore {
    /// Open the store backed by `path`, restoring whatever state it holds.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let outcome = LoadOutcome::read(&path);
        match &outcome {
            LoadOutcome::Loaded(snapshot) => log::info!(
                "[NOTES] Loaded {} notes from {} (next_id {})",
                snapshot.notes.len(),
                path.display(),
                snapshot.next_id
            ),
            LoadOutcome::Missing => {
                log::info!("[NOTES] No notes file at {}, starting empty", path.display())
            }
            LoadOutcome::Corrupt(reason) => log::warn!(
                "[NOTES] Could not load {} ({}), starting empty",
                path.display(),
                reason
            ),
        }

        Self {
            path,
            state: Mutex::new(outcome.into_snapshot()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a note with the next id. `text` must already be validated.
    ///
    /// The id `u64::MAX` is never handed out, so the counter can always move
    /// past the last issued id.
    pub fn create(&self, text: String) -> Result<Note, StoreError> {
        let mut state = self.state.lock();

        let id = state.next_id;
        let next_id = id.checked_add(1).ok_or(StoreError::IdsExhausted)?;

        let note = Note { id, text };
        state.next_id = next_id;
        state.notes.push(note.clone());

        self.persist_logged(&state);
        Ok(note)
    }

    /// All live notes in insertion order.
    pub fn list(&self) -> Vec<Note> {
        self.state.lock().notes.clone()
    }

    /// Remove the note with `id`, returning it, or `None` if no such note.
    pub fn delete(&self, id: u64) -> Option<Note> {
        let mut state = self.state.lock();

        let index = state.notes.iter().position(|n| n.id == id)?;
        let removed = state.notes.remove(index);

        self.persist_logged(&state);
        Some(removed)
    }

    fn persist_logged(&self, snapshot: &NotesSnapshot) {
        if let Err(e) = write_snapshot(&self.path, snapshot) {
            log::error!("[NOTES] Error saving notes to {}: {}", self.path.display(), e);
        }
    }
}

/// Overwrite `path` with the pretty-printed snapshot, creating parent
/// directories as needed.
pub fn write_snapshot(path: &Path, snapshot: &NotesSnapshot) -> Result<(), PersistError> {
    let json = serde_json::to_string_pretty(snapshot)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, json)?;
    Ok(())
}
