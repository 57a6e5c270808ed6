//! Lesson progress tracker — navigation persisted after every change.
//!
//! The in-memory `LessonProgress` is authoritative for the session. Every
//! mutation is written through to the store before the call returns; a
//! failed write is logged and counted but never interrupts navigation.

use chrono::{DateTime, Utc};
use eduscope_logic::lesson::{Lesson, Slide};
use eduscope_logic::progress::LessonProgress;

use crate::store::ProgressStore;

/// Timestamp format used in saved notes.
const NOTE_STAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub struct LessonTracker<S: ProgressStore> {
    lesson: Lesson,
    progress: LessonProgress,
    store: S,
    persist_failures: u32,
}

impl<S: ProgressStore> LessonTracker<S> {
    /// Load progress for `lesson` from `store`, or start fresh at slide 0.
    ///
    /// An unreadable record is treated like a missing one.
    pub fn init(lesson: Lesson, store: S) -> Self {
        let record = match store.load(&lesson.key) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Progress for '{}' unreadable, starting fresh: {}", lesson.key, e);
                None
            }
        };
        let resumed = record.is_some();
        let progress = LessonProgress::for_lesson(&lesson, record);
        log::info!(
            "Lesson '{}' opened at slide {}/{} ({})",
            lesson.key,
            progress.current_index() + 1,
            lesson.slide_count(),
            if resumed { "resumed" } else { "new" }
        );
        Self {
            lesson,
            progress,
            store,
            persist_failures: 0,
        }
    }

    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    pub fn progress(&self) -> &LessonProgress {
        &self.progress
    }

    pub fn current_index(&self) -> usize {
        self.progress.current_index()
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.lesson.slide(self.progress.current_index())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Number of writes that failed since the tracker was opened.
    pub fn persist_failures(&self) -> u32 {
        self.persist_failures
    }

    pub fn next(&mut self) -> bool {
        let moved = self.progress.next();
        if moved {
            self.persist();
        }
        moved
    }

    pub fn prev(&mut self) -> bool {
        let moved = self.progress.prev();
        if moved {
            self.persist();
        }
        moved
    }

    pub fn go_to(&mut self, index: usize) -> bool {
        let moved = self.progress.go_to(index);
        if moved {
            self.persist();
        }
        moved
    }

    /// Append a note stamped with the current time.
    pub fn save_note(&mut self, text: &str) -> bool {
        self.save_note_at(text, Utc::now())
    }

    pub fn save_note_at(&mut self, text: &str, at: DateTime<Utc>) -> bool {
        let stamp = at.format(NOTE_STAMP_FORMAT).to_string();
        let added = self.progress.add_note(text, &stamp);
        if added {
            self.persist();
        }
        added
    }

    fn persist(&mut self) {
        let record = self.progress.to_record();
        if let Err(e) = self.store.save(&self.lesson.key, &record) {
            self.persist_failures += 1;
            log::warn!(
                "Could not save progress for '{}' (keeping in-memory state): {}",
                self.lesson.key,
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError};
    use chrono::TimeZone;
    use eduscope_logic::progress::ProgressRecord;

    fn lesson(n: usize) -> Lesson {
        let slides = (0..n)
            .map(|i| format!(r#"{{"index":{i},"title":"s{i}","body":""}}"#))
            .collect::<Vec<_>>()
            .join(",");
        Lesson::from_json(&format!(r#"{{"key":"eco","title":"Eco","slides":[{slides}]}}"#)).unwrap()
    }

    /// Store whose writes always fail.
    struct BrokenStore;

    impl ProgressStore for BrokenStore {
        fn load(&self, _: &str) -> Result<Option<ProgressRecord>, StoreError> {
            Ok(None)
        }
        fn save(&mut self, _: &str, _: &ProgressRecord) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "quota exceeded",
            )))
        }
    }

    #[test]
    fn test_fresh_start() {
        let tracker = LessonTracker::init(lesson(3), MemoryStore::new());
        assert_eq!(tracker.current_index(), 0);
        assert_eq!(tracker.current_slide().unwrap().title, "s0");
        // nothing is written until something changes
        assert!(tracker.store().raw("eco").is_none());
    }

    #[test]
    fn test_every_move_is_persisted() {
        let mut tracker = LessonTracker::init(lesson(5), MemoryStore::new());
        tracker.next();
        tracker.next();
        let stored = tracker.store().load("eco").unwrap().unwrap();
        assert_eq!(stored.current_index, 2);
        assert_eq!(stored.completed, vec![0, 1]);

        tracker.prev();
        assert_eq!(tracker.store().load("eco").unwrap().unwrap().current_index, 1);
    }

    #[test]
    fn test_reload_resumes() {
        let mut tracker = LessonTracker::init(lesson(4), MemoryStore::new());
        for _ in 0..6 {
            tracker.next();
        }
        let completed = tracker.progress().completed().clone();
        let store = tracker.into_store();

        let reopened = LessonTracker::init(lesson(4), store);
        assert_eq!(reopened.current_index(), 3);
        assert_eq!(reopened.progress().completed(), &completed);
    }

    #[test]
    fn test_notes_timestamped_and_kept() {
        let mut tracker = LessonTracker::init(lesson(2), MemoryStore::new());
        let at = Utc.with_ymd_and_hms(2026, 10, 14, 9, 5, 0).unwrap();
        assert!(tracker.save_note_at("chloroplasts are green", at));
        assert!(!tracker.save_note_at("", at));

        let reopened = LessonTracker::init(lesson(2), tracker.into_store());
        assert_eq!(
            reopened.progress().notes(),
            &["[2026-10-14 09:05] chloroplasts are green".to_string()]
        );
    }

    #[test]
    fn test_write_failure_does_not_block_navigation() {
        let mut tracker = LessonTracker::init(lesson(3), BrokenStore);
        assert!(tracker.next());
        assert!(tracker.save_note("still here"));
        assert_eq!(tracker.current_index(), 1);
        assert_eq!(tracker.progress().notes().len(), 1);
        assert_eq!(tracker.persist_failures(), 2);
    }

    #[test]
    fn test_corrupt_record_starts_fresh() {
        let mut store = MemoryStore::new();
        store.insert_raw("eco", "not json");
        let mut tracker = LessonTracker::init(lesson(3), store);
        assert_eq!(tracker.current_index(), 0);
        tracker.next();
        // the next write replaces the corrupt entry
        assert_eq!(tracker.store().load("eco").unwrap().unwrap().current_index, 1);
    }
}
