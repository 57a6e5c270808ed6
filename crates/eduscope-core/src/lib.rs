//! EduScope Core - lesson session runtime
//!
//! Wraps the pure widgets from `eduscope-logic` with everything that touches
//! the outside world: durable progress storage, the simulation tick timer,
//! per-view widget lifecycles, snapshots, and the tutor/auth collaborators.
//!
//! # Architecture
//!
//! - **Tracker**: lesson navigation persisted to a [`store::ProgressStore`]
//!   after every mutation. Storage failures are logged, never fatal.
//! - **Timer**: a [`timer::TickTimer`] is acquired when a simulation starts
//!   and released on pause, reset, or when the owning widget is dropped.
//! - **Session**: one [`session::LessonSession`] per open lesson screen. It
//!   owns the widget for the current slide and discards it on navigation.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use eduscope_core::prelude::*;
//!
//! let json = std::fs::read_to_string("data/lessons/ecology.json").unwrap();
//! let lesson = Lesson::from_json(&json).unwrap();
//! let store = JsonDirStore::new(".eduscope/progress");
//! let mut session = LessonSession::open(lesson, store, CoreConfig::default());
//!
//! session.go_to(3);
//! if let Some(driver) = session.population_mut() {
//!     driver.start();
//! }
//! loop {
//!     session.update(Duration::from_millis(16));
//! }
//! ```

pub mod collaborators;
pub mod config;
pub mod persistence;
pub mod session;
pub mod store;
pub mod timer;
pub mod tracker;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::config::CoreConfig;
    pub use crate::session::{LessonSession, Widget};
    pub use crate::store::{JsonDirStore, MemoryStore, ProgressStore};
    pub use crate::timer::PopulationDriver;
    pub use crate::tracker::LessonTracker;
    pub use eduscope_logic::lesson::{Lesson, SimulationKind};
}
