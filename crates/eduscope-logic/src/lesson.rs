//! Lessons and slides.
//!
//! A lesson is an ordered, non-empty run of slides identified by a lesson key
//! (e.g. `"ecology"`). Lessons are static: loaded once when the lesson screen
//! mounts and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Interactive widget attached to a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimulationKind {
    /// Predator–prey population chart.
    PopulationDynamics,
    /// Food-web edge builder.
    FoodWeb,
    /// Carbon reservoir transfers.
    CarbonCycle,
}

/// One page of lesson content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub index: usize,
    pub title: String,
    pub body: String,
    /// Diagram entity highlighted while this slide is shown (e.g. an organelle id).
    #[serde(default)]
    pub focus: Option<String>,
    #[serde(default)]
    pub interactive: bool,
    #[serde(default)]
    pub simulation: Option<SimulationKind>,
}

/// An ordered sequence of slides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub key: String,
    pub title: String,
    pub slides: Vec<Slide>,
}

/// Reasons a lesson definition can't be used.
#[derive(Debug, thiserror::Error)]
pub enum LessonError {
    #[error("lesson JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("lesson '{0}' has no slides")]
    Empty(String),
    #[error("lesson '{key}': slide at position {position} has index {found}")]
    IndexMismatch {
        key: String,
        position: usize,
        found: usize,
    },
}

impl Lesson {
    /// Parse and validate a lesson from JSON.
    pub fn from_json(json: &str) -> Result<Self, LessonError> {
        let lesson: Lesson = serde_json::from_str(json)?;
        lesson.validate()?;
        Ok(lesson)
    }

    /// Check that the lesson is non-empty and slide indices run 0, 1, 2, ...
    pub fn validate(&self) -> Result<(), LessonError> {
        if self.slides.is_empty() {
            return Err(LessonError::Empty(self.key.clone()));
        }
        for (position, slide) in self.slides.iter().enumerate() {
            if slide.index != position {
                return Err(LessonError::IndexMismatch {
                    key: self.key.clone(),
                    position,
                    found: slide.index,
                });
            }
        }
        Ok(())
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// Simulation widgets used anywhere in this lesson, in slide order, without repeats.
    pub fn simulations(&self) -> Vec<SimulationKind> {
        let mut kinds = Vec::new();
        for kind in self.slides.iter().filter_map(|s| s.simulation) {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "key": "ecology",
        "title": "Ecology",
        "slides": [
            { "index": 0, "title": "Intro", "body": "Ecosystems." },
            { "index": 1, "title": "Populations", "body": "Predators and prey.",
              "interactive": true, "simulation": "population-dynamics" },
            { "index": 2, "title": "Food webs", "body": "Who eats whom.",
              "interactive": true, "simulation": "food-web" },
            { "index": 3, "title": "More populations", "body": "Again.",
              "simulation": "population-dynamics" }
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let lesson = Lesson::from_json(SAMPLE).unwrap();
        assert_eq!(lesson.slide_count(), 4);
        assert_eq!(lesson.slide(0).unwrap().simulation, None);
        assert!(!lesson.slide(0).unwrap().interactive);
        assert_eq!(
            lesson.slide(1).unwrap().simulation,
            Some(SimulationKind::PopulationDynamics)
        );
        assert!(lesson.slide(4).is_none());
    }

    #[test]
    fn test_simulations_deduplicated() {
        let lesson = Lesson::from_json(SAMPLE).unwrap();
        assert_eq!(
            lesson.simulations(),
            vec![SimulationKind::PopulationDynamics, SimulationKind::FoodWeb]
        );
    }

    #[test]
    fn test_empty_lesson_rejected() {
        let err = Lesson::from_json(r#"{"key":"x","title":"X","slides":[]}"#).unwrap_err();
        assert!(matches!(err, LessonError::Empty(_)));
    }

    #[test]
    fn test_index_gap_rejected() {
        let json = r#"{"key":"x","title":"X","slides":[
            {"index":0,"title":"a","body":""},
            {"index":2,"title":"b","body":""}
        ]}"#;
        match Lesson::from_json(json) {
            Err(LessonError::IndexMismatch { position, found, .. }) => {
                assert_eq!(position, 1);
                assert_eq!(found, 2);
            }
            other => panic!("expected index mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Lesson::from_json("{not json"),
            Err(LessonError::Parse(_))
        ));
    }
}
