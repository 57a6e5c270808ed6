//! Pure lesson and simulation logic for EduScope.
//!
//! This crate contains everything the lesson screens compute that is
//! independent of storage, timers, or rendering. Functions take plain data
//! and return results, so every widget can be unit-tested headless and driven
//! by whichever runtime owns the view.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`carbon`] | Carbon reservoirs, named transfer actions, settle cool-down |
//! | [`constants`] | Simulation constants, seed values, timing |
//! | [`foodweb`] | Organism catalog, trophic rule table, two-click edge builder |
//! | [`lesson`] | Lessons, slides, simulation tags, JSON loading |
//! | [`population`] | Discrete Lotka–Volterra step, rolling history, run state |
//! | [`profile`] | Authenticated user profile and greeting text |
//! | [`progress`] | Slide navigation, completion set, notes |
//! | [`quiz`] | Question bank, topic/difficulty selection, scored sessions |

pub mod carbon;
pub mod constants;
pub mod foodweb;
pub mod lesson;
pub mod population;
pub mod profile;
pub mod progress;
pub mod quiz;
