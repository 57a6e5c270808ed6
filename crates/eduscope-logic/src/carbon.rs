//! Carbon cycle reservoirs and transfer actions.
//!
//! Every accepted transfer debits the source and credits the destination by
//! the same amount, so the total across all reservoirs never changes.
//! Quantities are allowed to go negative; no floor is applied.
//!
//! After a transfer the model "settles" for a fixed period while the
//! animation plays. Transfers requested during that window are dropped.

use serde::{Deserialize, Serialize};

use crate::constants::carbon::*;
use crate::constants::timing::SETTLE_PERIOD_SECS;

/// A carbon store on the diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservoir {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub x: f32,
    pub y: f32,
}

/// A named process that moves carbon from one reservoir to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferAction {
    pub label: String,
    pub source: String,
    pub dest: String,
    pub amount: f64,
}

impl TransferAction {
    pub fn new(label: &str, source: &str, dest: &str, amount: f64) -> Self {
        Self {
            label: label.to_string(),
            source: source.to_string(),
            dest: dest.to_string(),
            amount,
        }
    }
}

pub fn default_reservoirs() -> Vec<Reservoir> {
    let r = |id: &str, name: &str, quantity: f64, x: f32, y: f32| Reservoir {
        id: id.to_string(),
        name: name.to_string(),
        quantity,
        x,
        y,
    };
    vec![
        r("atmosphere", "Atmosphere", ATMOSPHERE, 250.0, 40.0),
        r("plants", "Plants", PLANTS, 80.0, 220.0),
        r("animals", "Animals", ANIMALS, 250.0, 260.0),
        r("fossils", "Fossil Fuels", FOSSILS, 420.0, 340.0),
    ]
}

pub fn default_actions() -> Vec<TransferAction> {
    vec![
        TransferAction::new("Photosynthesis", "atmosphere", "plants", PHOTOSYNTHESIS_AMOUNT),
        TransferAction::new("Plant Respiration", "plants", "atmosphere", RESPIRATION_AMOUNT),
        TransferAction::new("Animal Respiration", "animals", "atmosphere", RESPIRATION_AMOUNT),
        TransferAction::new("Feeding", "plants", "animals", FEEDING_AMOUNT),
        TransferAction::new("Combustion", "fossils", "atmosphere", COMBUSTION_AMOUNT),
    ]
}

/// What happened to a transfer request.
#[derive(Debug, Clone, PartialEq)]
pub enum TransferOutcome {
    Applied { label: String, amount: f64 },
    /// A previous transfer is still settling; nothing changed.
    Settling,
    /// Source or destination id doesn't exist; nothing changed.
    UnknownReservoir { id: String },
    /// No action with that label.
    UnknownAction { label: String },
}

/// Carbon cycle widget state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonCycle {
    reservoirs: Vec<Reservoir>,
    actions: Vec<TransferAction>,
    settle_period: f32,
    settle_remaining: f32,
    last_transfer: Option<String>,
}

impl Default for CarbonCycle {
    fn default() -> Self {
        Self::new(default_reservoirs(), default_actions(), SETTLE_PERIOD_SECS)
    }
}

impl CarbonCycle {
    pub fn new(reservoirs: Vec<Reservoir>, actions: Vec<TransferAction>, settle_period: f32) -> Self {
        Self {
            reservoirs,
            actions,
            settle_period: settle_period.max(0.0),
            settle_remaining: 0.0,
            last_transfer: None,
        }
    }

    pub fn reservoirs(&self) -> &[Reservoir] {
        &self.reservoirs
    }

    pub fn actions(&self) -> &[TransferAction] {
        &self.actions
    }

    pub fn quantity(&self, id: &str) -> Option<f64> {
        self.reservoirs.iter().find(|r| r.id == id).map(|r| r.quantity)
    }

    /// Sum over all reservoirs.
    pub fn total(&self) -> f64 {
        self.reservoirs.iter().map(|r| r.quantity).sum()
    }

    pub fn is_settling(&self) -> bool {
        self.settle_remaining > 0.0
    }

    /// Label of the transfer currently animating, if any.
    pub fn last_transfer(&self) -> Option<&str> {
        if self.is_settling() {
            self.last_transfer.as_deref()
        } else {
            None
        }
    }

    /// Move `action.amount` from source to destination.
    pub fn transfer(&mut self, action: &TransferAction) -> TransferOutcome {
        if self.is_settling() {
            return TransferOutcome::Settling;
        }

        let src = self.reservoirs.iter().position(|r| r.id == action.source);
        let dst = self.reservoirs.iter().position(|r| r.id == action.dest);
        let (src, dst) = match (src, dst) {
            (Some(s), Some(d)) => (s, d),
            (None, _) => {
                return TransferOutcome::UnknownReservoir {
                    id: action.source.clone(),
                }
            }
            (_, None) => {
                return TransferOutcome::UnknownReservoir {
                    id: action.dest.clone(),
                }
            }
        };

        self.reservoirs[src].quantity -= action.amount;
        self.reservoirs[dst].quantity += action.amount;
        self.settle_remaining = self.settle_period;
        self.last_transfer = Some(action.label.clone());

        TransferOutcome::Applied {
            label: action.label.clone(),
            amount: action.amount,
        }
    }

    /// Run the registered action called `label`.
    pub fn transfer_by_label(&mut self, label: &str) -> TransferOutcome {
        match self.actions.iter().find(|a| a.label == label).cloned() {
            Some(action) => self.transfer(&action),
            None => TransferOutcome::UnknownAction {
                label: label.to_string(),
            },
        }
    }

    /// Count down the settle period by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.settle_remaining > 0.0 {
            self.settle_remaining = (self.settle_remaining - dt).max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photosynthesis_moves_ten() {
        let mut cycle = CarbonCycle::default();
        let before = cycle.total();
        let outcome = cycle.transfer_by_label("Photosynthesis");
        assert_eq!(
            outcome,
            TransferOutcome::Applied {
                label: "Photosynthesis".into(),
                amount: 10.0,
            }
        );
        assert_eq!(cycle.quantity("atmosphere"), Some(90.0));
        assert_eq!(cycle.quantity("plants"), Some(60.0));
        assert_eq!(cycle.total(), before);
    }

    #[test]
    fn test_second_transfer_inside_window_dropped() {
        let mut cycle = CarbonCycle::default();
        cycle.transfer_by_label("Photosynthesis");
        cycle.update(0.5);
        assert_eq!(cycle.transfer_by_label("Combustion"), TransferOutcome::Settling);
        assert_eq!(cycle.quantity("fossils"), Some(FOSSILS));
        assert_eq!(cycle.last_transfer(), Some("Photosynthesis"));
    }

    #[test]
    fn test_transfer_accepted_after_settle() {
        let mut cycle = CarbonCycle::default();
        cycle.transfer_by_label("Photosynthesis");
        cycle.update(0.6);
        cycle.update(0.6);
        assert!(!cycle.is_settling());
        assert_eq!(cycle.last_transfer(), None);
        assert!(matches!(
            cycle.transfer_by_label("Combustion"),
            TransferOutcome::Applied { .. }
        ));
        assert_eq!(cycle.quantity("atmosphere"), Some(110.0));
    }

    #[test]
    fn test_quantities_may_go_negative() {
        let actions = vec![TransferAction::new("Drain", "animals", "atmosphere", 25.0)];
        let mut cycle = CarbonCycle::new(default_reservoirs(), actions, 0.0);
        let total = cycle.total();
        for _ in 0..3 {
            cycle.transfer_by_label("Drain");
        }
        assert_eq!(cycle.quantity("animals"), Some(ANIMALS - 75.0));
        assert_eq!(cycle.total(), total);
    }

    #[test]
    fn test_total_conserved_over_many_transfers() {
        let mut cycle = CarbonCycle::default();
        let total = cycle.total();
        let labels: Vec<String> = cycle.actions().iter().map(|a| a.label.clone()).collect();
        for i in 0..40 {
            cycle.transfer_by_label(&labels[i % labels.len()]);
            cycle.update(1.0);
            assert!((cycle.total() - total).abs() < 1e-9);
        }
    }

    #[test]
    fn test_unknown_ids() {
        let mut cycle = CarbonCycle::default();
        assert_eq!(
            cycle.transfer_by_label("Volcano"),
            TransferOutcome::UnknownAction {
                label: "Volcano".into(),
            }
        );
        let bad = TransferAction::new("Weathering", "rocks", "atmosphere", 1.0);
        assert_eq!(
            cycle.transfer(&bad),
            TransferOutcome::UnknownReservoir { id: "rocks".into() }
        );
        // a rejected request does not start the settle period
        assert!(!cycle.is_settling());
    }
}
