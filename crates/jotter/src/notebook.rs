//! The note collection and its active selection.
//!
//! Every mutation is written through to the [`Store`] before returning, so
//! the persisted list always equals the in-memory one. The new list is
//! stored first and only then committed; a failed write changes nothing.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::note::Note;
use crate::store::Store;

/// Store key holding the JSON array of notes.
pub const NOTES_KEY: &str = "notes";

/// Ordered notes (newest first) plus the active note id.
#[derive(Debug)]
pub struct Notebook {
    store: Store,
    notes: Vec<Note>,
    active_id: Option<String>,
}

impl Notebook {
    /// Load the notes persisted in `store`. Nothing is active after loading.
    ///
    /// Notes repeating an earlier id are dropped.
    #[must_use]
    pub fn load(store: Store) -> Self {
        let stored: Vec<Note> = store.read(NOTES_KEY, Vec::new());

        let mut seen = HashSet::new();
        let notes: Vec<Note> = stored
            .into_iter()
            .filter(|note| {
                let fresh = seen.insert(note.id.clone());
                if !fresh {
                    warn!("Dropping note with duplicate id {}", note.id);
                }
                fresh
            })
            .collect();

        debug!("Loaded {} notes", notes.len());
        Self {
            store,
            notes,
            active_id: None,
        }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Give back the underlying store.
    #[must_use]
    pub fn into_store(self) -> Store {
        self.store
    }

    /// All notes, newest first.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Number of notes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Whether there are no notes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Look up a note by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// The active note id, if any.
    #[must_use]
    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// The active note, if any.
    #[must_use]
    pub fn active(&self) -> Option<&Note> {
        self.active_id.as_deref().and_then(|id| self.get(id))
    }

    /// Create a note from the template, prepend it, and make it active.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the collection fails.
    pub fn add(&mut self) -> Result<&Note> {
        self.insert(Note::from_template())
    }

    /// Create a note with the given content, prepend it, and make it active.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the collection fails.
    pub fn add_with_content(&mut self, content: impl Into<String>) -> Result<&Note> {
        self.insert(Note::new(content))
    }

    fn insert(&mut self, note: Note) -> Result<&Note> {
        debug!("Adding note {}", note.id);
        let mut notes = Vec::with_capacity(self.notes.len() + 1);
        notes.push(note);
        notes.extend(self.notes.iter().cloned());

        self.persist(&notes)?;
        self.active_id = Some(notes[0].id.clone());
        self.notes = notes;
        Ok(&self.notes[0])
    }

    /// Remove the note with `id`.
    ///
    /// If it was active, the first remaining note becomes active, or nothing
    /// when the collection is now empty. Returns `false` if no such note
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the collection fails.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        if self.get(id).is_none() {
            return Ok(false);
        }

        let remaining: Vec<Note> = self
            .notes
            .iter()
            .filter(|note| note.id != id)
            .cloned()
            .collect();
        self.persist(&remaining)?;

        if self.active_id.as_deref() == Some(id) {
            self.active_id = remaining.first().map(|note| note.id.clone());
        }
        self.notes = remaining;

        debug!("Deleted note {}", id);
        Ok(true)
    }

    /// Replace the content of the note with `id`, leaving its id, creation
    /// time and position untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoteNotFound`] for an unknown id, or an error if
    /// persisting the collection fails.
    pub fn update_content(&mut self, id: &str, content: impl Into<String>) -> Result<()> {
        let index = self
            .notes
            .iter()
            .position(|note| note.id == id)
            .ok_or_else(|| Error::note_not_found(id))?;

        let mut notes = self.notes.clone();
        notes[index].content = content.into();
        self.persist(&notes)?;
        self.notes = notes;
        Ok(())
    }

    /// Make the note with `id` active.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoteNotFound`] for an unknown id.
    pub fn select(&mut self, id: &str) -> Result<()> {
        if self.get(id).is_none() {
            return Err(Error::note_not_found(id));
        }
        self.active_id = Some(id.to_string());
        Ok(())
    }

    fn persist(&self, notes: &[Note]) -> Result<()> {
        self.store.write(NOTES_KEY, notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::NEW_NOTE_TEMPLATE;

    fn empty_notebook() -> Notebook {
        Notebook::load(Store::open_in_memory().expect("failed to create test store"))
    }

    fn notebook_with(contents: &[&str]) -> (Notebook, Vec<String>) {
        let mut book = empty_notebook();
        let mut ids = Vec::new();
        for content in contents {
            ids.push(book.add_with_content(*content).unwrap().id.clone());
        }
        (book, ids)
    }

    fn reload(book: Notebook) -> Notebook {
        Notebook::load(book.into_store())
    }

    #[test]
    fn test_load_empty() {
        let book = empty_notebook();
        assert!(book.is_empty());
        assert!(book.active_id().is_none());
        assert!(book.active().is_none());
    }

    #[test]
    fn test_add_prepends_and_activates() {
        let mut book = empty_notebook();
        let first = book.add().unwrap().id.clone();
        let second = book.add().unwrap().id.clone();

        assert_eq!(book.len(), 2);
        assert_ne!(first, second);
        assert_eq!(book.notes()[0].id, second);
        assert_eq!(book.active_id(), Some(second.as_str()));
        assert_eq!(book.active().unwrap().content, NEW_NOTE_TEMPLATE);
    }

    #[test]
    fn test_add_grows_by_one_with_unique_ids() {
        let (mut book, _) = notebook_with(&["a", "b", "c"]);
        let before = book.len();
        let id = book.add().unwrap().id.clone();

        assert_eq!(book.len(), before + 1);
        assert_eq!(book.notes().iter().filter(|n| n.id == id).count(), 1);
        assert_eq!(book.active_id(), Some(id.as_str()));
    }

    #[test]
    fn test_delete_active_selects_new_first() {
        let (mut book, ids) = notebook_with(&["a", "b", "c"]);
        // order is c, b, a; c is active
        assert!(book.delete(&ids[2]).unwrap());

        assert_eq!(book.len(), 2);
        assert_eq!(book.active_id(), Some(ids[1].as_str()));
    }

    #[test]
    fn test_delete_active_not_first() {
        let (mut book, ids) = notebook_with(&["a", "b", "c"]);
        book.select(&ids[1]).unwrap();
        book.delete(&ids[1]).unwrap();

        assert_eq!(book.active_id(), Some(ids[2].as_str()));
    }

    #[test]
    fn test_delete_last_clears_selection() {
        let (mut book, ids) = notebook_with(&["only"]);
        book.delete(&ids[0]).unwrap();

        assert!(book.is_empty());
        assert!(book.active_id().is_none());
    }

    #[test]
    fn test_delete_non_active_keeps_selection() {
        let (mut book, ids) = notebook_with(&["a", "b", "c"]);
        book.delete(&ids[0]).unwrap();

        assert_eq!(book.active_id(), Some(ids[2].as_str()));
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_delete_without_selection_stays_unselected() {
        let (book, ids) = notebook_with(&["a", "b"]);
        let mut book = reload(book);
        book.delete(&ids[1]).unwrap();

        assert!(book.active_id().is_none());
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let (mut book, ids) = notebook_with(&["a"]);
        assert!(!book.delete("missing").unwrap());
        assert_eq!(book.len(), 1);
        assert_eq!(book.active_id(), Some(ids[0].as_str()));
    }

    #[test]
    fn test_update_content_only_touches_target() {
        let (mut book, ids) = notebook_with(&["a", "b", "c"]);
        let before = book.notes().to_vec();

        book.update_content(&ids[1], "changed").unwrap();

        let after = book.notes();
        assert_eq!(after.len(), before.len());
        for (old, new) in before.iter().zip(after) {
            assert_eq!(old.id, new.id);
            assert_eq!(old.created_at, new.created_at);
            if new.id == ids[1] {
                assert_eq!(new.content, "changed");
            } else {
                assert_eq!(old.content, new.content);
            }
        }
    }

    #[test]
    fn test_update_unknown_is_not_found() {
        let mut book = empty_notebook();
        let err = book.update_content("missing", "x").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_select_existing_and_missing() {
        let (mut book, ids) = notebook_with(&["a", "b"]);
        book.select(&ids[0]).unwrap();
        assert_eq!(book.active().unwrap().content, "a");

        assert!(book.select("missing").unwrap_err().is_not_found());
        assert_eq!(book.active_id(), Some(ids[0].as_str()));
    }

    #[test]
    fn test_persisted_state_round_trips() {
        let (mut book, ids) = notebook_with(&["a", "b", "c"]);
        book.update_content(&ids[0], "edited").unwrap();
        book.delete(&ids[1]).unwrap();
        let expected = book.notes().to_vec();

        let reloaded = reload(book);
        assert_eq!(reloaded.notes(), expected.as_slice());
        assert!(reloaded.active_id().is_none());
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let mut book = empty_notebook();
        let id = book.add().unwrap().id.clone();
        let stored: Vec<Note> = book.store().read(NOTES_KEY, Vec::new());
        assert_eq!(stored, book.notes());

        book.update_content(&id, "new text").unwrap();
        let stored: Vec<Note> = book.store().read(NOTES_KEY, Vec::new());
        assert_eq!(stored[0].content, "new text");

        book.delete(&id).unwrap();
        let stored: Vec<Note> = book.store().read(NOTES_KEY, Vec::new());
        assert!(stored.is_empty());
    }

    #[test]
    fn test_load_drops_duplicate_ids() {
        let store = Store::open_in_memory().unwrap();
        store
            .write_raw(
                NOTES_KEY,
                r#"[{"id":"x","content":"first","createdAt":1},{"id":"x","content":"second","createdAt":2}]"#,
            )
            .unwrap();

        let book = Notebook::load(store);
        assert_eq!(book.len(), 1);
        assert_eq!(book.notes()[0].content, "first");
    }

    #[test]
    fn test_load_malformed_is_empty() {
        let store = Store::open_in_memory().unwrap();
        store.write_raw(NOTES_KEY, "[{broken").unwrap();

        assert!(Notebook::load(store).is_empty());
    }

    #[test]
    fn test_failed_add_leaves_state_unchanged() {
        let (mut book, ids) = notebook_with(&["a"]);
        book.store().set_read_only(true).unwrap();

        assert!(book.add().is_err());
        assert_eq!(book.len(), 1);
        assert_eq!(book.active_id(), Some(ids[0].as_str()));

        let stored: Vec<Note> = book.store().read(NOTES_KEY, Vec::new());
        assert_eq!(stored, book.notes());
    }

    #[test]
    fn test_failed_delete_leaves_state_unchanged() {
        let (mut book, ids) = notebook_with(&["a", "b"]);
        let before = book.notes().to_vec();
        book.store().set_read_only(true).unwrap();

        assert!(book.delete(&ids[1]).is_err());
        assert_eq!(book.notes(), before.as_slice());
        assert_eq!(book.active_id(), Some(ids[1].as_str()));
    }

    #[test]
    fn test_failed_update_leaves_content_unchanged() {
        let (mut book, ids) = notebook_with(&["original"]);
        book.store().set_read_only(true).unwrap();

        assert!(book.update_content(&ids[0], "changed").is_err());
        assert_eq!(book.get(&ids[0]).unwrap().content, "original");

        book.store().set_read_only(false).unwrap();
        book.update_content(&ids[0], "changed").unwrap();
        let stored: Vec<Note> = book.store().read(NOTES_KEY, Vec::new());
        assert_eq!(stored[0].content, "changed");
    }
}
