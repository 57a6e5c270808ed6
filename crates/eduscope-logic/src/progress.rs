//! Slide navigation, completion tracking, and notes for one lesson.
//!
//! `LessonProgress` is the in-memory state; `ProgressRecord` is the shape
//! written to durable storage (`{currentIndex, completed, notes}`).
//! Persisting is the caller's job — see `eduscope_core::tracker`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::lesson::Lesson;

/// Stored progress for a lesson key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub current_index: usize,
    #[serde(default)]
    pub completed: Vec<usize>,
    #[serde(default)]
    pub notes: Vec<String>,
}

/// Navigation state for a lesson.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonProgress {
    lesson_key: String,
    slide_count: usize,
    current_index: usize,
    completed: BTreeSet<usize>,
    notes: Vec<String>,
}

impl LessonProgress {
    /// Fresh progress at slide 0.
    pub fn new(lesson_key: impl Into<String>, slide_count: usize) -> Self {
        Self {
            lesson_key: lesson_key.into(),
            slide_count,
            current_index: 0,
            completed: BTreeSet::new(),
            notes: Vec::new(),
        }
    }

    /// Progress for `lesson`, resumed from `record` when one exists.
    pub fn for_lesson(lesson: &Lesson, record: Option<ProgressRecord>) -> Self {
        match record {
            Some(record) => Self::from_record(&lesson.key, lesson.slide_count(), record),
            None => Self::new(&lesson.key, lesson.slide_count()),
        }
    }

    /// Restore from storage. Indices that no longer fit the lesson are
    /// clamped (current) or dropped (completed).
    pub fn from_record(lesson_key: &str, slide_count: usize, record: ProgressRecord) -> Self {
        let mut progress = Self::new(lesson_key, slide_count);
        progress.current_index = record.current_index.min(progress.last_index());
        progress.completed = record
            .completed
            .into_iter()
            .filter(|&i| i < slide_count)
            .collect();
        progress.notes = record.notes;
        progress
    }

    pub fn to_record(&self) -> ProgressRecord {
        ProgressRecord {
            current_index: self.current_index,
            completed: self.completed.iter().copied().collect(),
            notes: self.notes.clone(),
        }
    }

    pub fn lesson_key(&self) -> &str {
        &self.lesson_key
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn completed(&self) -> &BTreeSet<usize> {
        &self.completed
    }

    pub fn is_completed(&self, index: usize) -> bool {
        self.completed.contains(&index)
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    fn last_index(&self) -> usize {
        self.slide_count.saturating_sub(1)
    }

    /// Advance one slide. Marks the slide being left as completed.
    /// Returns false when already on the last slide.
    pub fn next(&mut self) -> bool {
        if self.current_index >= self.last_index() {
            return false;
        }
        self.completed.insert(self.current_index);
        self.current_index += 1;
        true
    }

    /// Go back one slide. Returns false when already on the first slide.
    pub fn prev(&mut self) -> bool {
        if self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        true
    }

    /// Jump to `index`, clamped to the lesson. Jumping forward completes the
    /// slide being left and every slide passed over.
    /// Returns false when the position did not change.
    pub fn go_to(&mut self, index: usize) -> bool {
        let target = index.min(self.last_index());
        if target == self.current_index {
            return false;
        }
        if target > self.current_index {
            self.completed.extend(self.current_index..target);
        }
        self.current_index = target;
        true
    }

    /// Append a note stamped with `stamp` (already formatted by the caller).
    /// Blank notes are ignored and return false.
    pub fn add_note(&mut self, text: &str, stamp: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.notes.push(format!("[{stamp}] {text}"));
        true
    }

    /// Fraction of slides completed (0.0 - 1.0).
    pub fn completion_ratio(&self) -> f32 {
        if self.slide_count == 0 {
            return 0.0;
        }
        self.completed.len() as f32 / self.slide_count as f32
    }

    /// True once the last slide has been reached.
    pub fn is_finished(&self) -> bool {
        self.slide_count > 0 && self.current_index == self.last_index()
    }
}
