//! Lesson session — one per open lesson screen.
//!
//! The session owns the tracker and at most one widget: the one matching the
//! current slide's simulation tag. Navigating to a slide with a different
//! tag drops the old widget (releasing any timer it holds) and builds a
//! fresh one. Navigating between slides with the same tag keeps it.

use std::time::Duration;

use eduscope_logic::carbon::{default_actions, default_reservoirs, CarbonCycle};
use eduscope_logic::foodweb::FoodWebBuilder;
use eduscope_logic::lesson::{Lesson, SimulationKind, Slide};

use crate::config::CoreConfig;
use crate::store::ProgressStore;
use crate::timer::PopulationDriver;
use crate::tracker::LessonTracker;

/// Interactive widget living on the current slide.
#[derive(Debug)]
pub enum Widget {
    Population(PopulationDriver),
    FoodWeb(FoodWebBuilder),
    Carbon(CarbonCycle),
}

impl Widget {
    pub fn build(kind: SimulationKind, config: &CoreConfig) -> Self {
        match kind {
            SimulationKind::PopulationDynamics => {
                Widget::Population(PopulationDriver::from_config(config))
            }
            SimulationKind::FoodWeb => Widget::FoodWeb(FoodWebBuilder::default()),
            SimulationKind::CarbonCycle => Widget::Carbon(CarbonCycle::new(
                default_reservoirs(),
                default_actions(),
                config.settle_period_secs,
            )),
        }
    }

    pub fn kind(&self) -> SimulationKind {
        match self {
            Widget::Population(_) => SimulationKind::PopulationDynamics,
            Widget::FoodWeb(_) => SimulationKind::FoodWeb,
            Widget::Carbon(_) => SimulationKind::CarbonCycle,
        }
    }

    /// Advance time-driven state (simulation ticks, settle countdown).
    pub fn update(&mut self, elapsed: Duration) {
        match self {
            Widget::Population(driver) => {
                driver.update(elapsed);
            }
            Widget::Carbon(cycle) => cycle.update(elapsed.as_secs_f32()),
            Widget::FoodWeb(_) => {}
        }
    }
}

pub struct LessonSession<S: ProgressStore> {
    tracker: LessonTracker<S>,
    widget: Option<Widget>,
    config: CoreConfig,
}

impl<S: ProgressStore> LessonSession<S> {
    /// Open `lesson`, resuming stored progress and building the widget for
    /// the resumed slide.
    pub fn open(lesson: Lesson, store: S, config: CoreConfig) -> Self {
        let mut session = Self {
            tracker: LessonTracker::init(lesson, store),
            widget: None,
            config,
        };
        session.sync_widget();
        session
    }

    pub fn tracker(&self) -> &LessonTracker<S> {
        &self.tracker
    }

    pub fn lesson(&self) -> &Lesson {
        self.tracker.lesson()
    }

    pub fn current_index(&self) -> usize {
        self.tracker.current_index()
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.tracker.current_slide()
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn widget(&self) -> Option<&Widget> {
        self.widget.as_ref()
    }

    pub fn widget_mut(&mut self) -> Option<&mut Widget> {
        self.widget.as_mut()
    }

    /// Replace the current widget, e.g. with one restored from a snapshot.
    /// Rejected (returned back) when it doesn't match the current slide.
    pub fn install_widget(&mut self, widget: Widget) -> Result<(), Widget> {
        let wanted = self.current_slide().and_then(|s| s.simulation);
        if wanted != Some(widget.kind()) {
            return Err(widget);
        }
        self.widget = Some(widget);
        Ok(())
    }

    pub fn population_mut(&mut self) -> Option<&mut PopulationDriver> {
        match self.widget.as_mut() {
            Some(Widget::Population(driver)) => Some(driver),
            _ => None,
        }
    }

    pub fn food_web_mut(&mut self) -> Option<&mut FoodWebBuilder> {
        match self.widget.as_mut() {
            Some(Widget::FoodWeb(web)) => Some(web),
            _ => None,
        }
    }

    pub fn carbon_mut(&mut self) -> Option<&mut CarbonCycle> {
        match self.widget.as_mut() {
            Some(Widget::Carbon(cycle)) => Some(cycle),
            _ => None,
        }
    }

    pub fn next(&mut self) -> bool {
        let moved = self.tracker.next();
        self.sync_widget();
        moved
    }

    pub fn prev(&mut self) -> bool {
        let moved = self.tracker.prev();
        self.sync_widget();
        moved
    }

    pub fn go_to(&mut self, index: usize) -> bool {
        let moved = self.tracker.go_to(index);
        self.sync_widget();
        moved
    }

    pub fn save_note(&mut self, text: &str) -> bool {
        self.tracker.save_note(text)
    }

    /// Drive the active widget by `elapsed` wall time.
    pub fn update(&mut self, elapsed: Duration) {
        if let Some(widget) = self.widget.as_mut() {
            widget.update(elapsed);
        }
    }

    /// Tear down the view. The widget (and its timer) is dropped here.
    pub fn close(self) -> S {
        self.tracker.into_store()
    }

    fn sync_widget(&mut self) {
        let wanted = self.tracker.current_slide().and_then(|s| s.simulation);
        let have = self.widget.as_ref().map(Widget::kind);
        if wanted == have {
            return;
        }
        if let Some(old) = have {
            log::debug!("Discarding {:?} widget", old);
        }
        self.widget = wanted.map(|kind| Widget::build(kind, &self.config));
    }
}
