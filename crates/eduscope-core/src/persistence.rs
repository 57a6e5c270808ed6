//! Save/Load of widget state
//!
//! Uses bincode to snapshot the widget on a slide so a learner can come back
//! to a half-built food web or a paused population run. Running simulations
//! are restored paused.

use std::io::{Read, Write};

use eduscope_logic::carbon::CarbonCycle;
use eduscope_logic::foodweb::FoodWebBuilder;
use eduscope_logic::population::PopulationSimulator;
use serde::{Deserialize, Serialize};

use crate::config::CoreConfig;
use crate::session::Widget;
use crate::timer::PopulationDriver;

/// Version number for snapshot format (increment when format changes)
const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
enum WidgetState {
    Population(PopulationSimulator),
    FoodWeb(FoodWebBuilder),
    Carbon(CarbonCycle),
}

#[derive(Serialize, Deserialize)]
struct WidgetSnapshot {
    version: u32,
    lesson_key: String,
    slide_index: usize,
    state: WidgetState,
}

/// A widget read back from a snapshot.
#[derive(Debug)]
pub struct LoadedWidget {
    pub lesson_key: String,
    pub slide_index: usize,
    pub widget: Widget,
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Bincode(#[from] Box<bincode::ErrorKind>),
    #[error("Snapshot version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Write a widget snapshot.
pub fn save_widget<W: Write>(
    writer: W,
    lesson_key: &str,
    slide_index: usize,
    widget: &Widget,
) -> Result<(), SnapshotError> {
    let state = match widget {
        Widget::Population(driver) => WidgetState::Population(driver.simulator().clone()),
        Widget::FoodWeb(web) => WidgetState::FoodWeb(web.clone()),
        Widget::Carbon(cycle) => WidgetState::Carbon(cycle.clone()),
    };
    let snapshot = WidgetSnapshot {
        version: SNAPSHOT_VERSION,
        lesson_key: lesson_key.to_string(),
        slide_index,
        state,
    };
    bincode::serialize_into(writer, &snapshot)?;
    Ok(())
}

/// Read a widget snapshot. Population widgets get timing from `config`.
pub fn load_widget<R: Read>(reader: R, config: &CoreConfig) -> Result<LoadedWidget, SnapshotError> {
    let snapshot: WidgetSnapshot = bincode::deserialize_from(reader)?;

    if snapshot.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::VersionMismatch {
            expected: SNAPSHOT_VERSION,
            found: snapshot.version,
        });
    }

    let widget = match snapshot.state {
        WidgetState::Population(sim) => Widget::Population(PopulationDriver::from_simulator(
            sim,
            config.tick_interval(),
            config.max_catch_up_ticks,
        )),
        WidgetState::FoodWeb(web) => Widget::FoodWeb(web),
        WidgetState::Carbon(cycle) => Widget::Carbon(cycle),
    };

    Ok(LoadedWidget {
        lesson_key: snapshot.lesson_key,
        slide_index: snapshot.slide_index,
        widget,
    })
}
