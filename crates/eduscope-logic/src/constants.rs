//! Simulation constants, seed values and widget timing.

/// Lotka–Volterra coefficients for the predator–prey widget.
pub mod population {
    /// Prey growth rate (α).
    pub const PREY_GROWTH: f64 = 0.1;
    /// Predation rate (β).
    pub const PREDATION_RATE: f64 = 0.005;
    /// Predator growth per predation (δ).
    pub const PREDATOR_GROWTH: f64 = 0.002;
    /// Predator death rate (γ).
    pub const PREDATOR_DEATH: f64 = 0.08;

    /// Prey ceiling (carrying capacity of the meadow).
    pub const PREY_CEILING: f64 = 200.0;

    /// Number of samples kept for the chart.
    pub const HISTORY_WINDOW: usize = 51;

    pub const SEED_PREY: f64 = 40.0;
    pub const SEED_PREDATOR: f64 = 10.0;
}

/// Widget timing.
pub mod timing {
    /// Period of the population simulation tick, in milliseconds.
    pub const TICK_INTERVAL_MS: u64 = 100;
    /// Cool-down after a carbon transfer, in seconds.
    pub const SETTLE_PERIOD_SECS: f32 = 1.0;
}

/// Seed quantities for the carbon cycle reservoirs.
pub mod carbon {
    pub const ATMOSPHERE: f64 = 100.0;
    pub const PLANTS: f64 = 50.0;
    pub const ANIMALS: f64 = 30.0;
    pub const FOSSILS: f64 = 200.0;

    pub const PHOTOSYNTHESIS_AMOUNT: f64 = 10.0;
    pub const RESPIRATION_AMOUNT: f64 = 5.0;
    pub const FEEDING_AMOUNT: f64 = 5.0;
    pub const COMBUSTION_AMOUNT: f64 = 20.0;
}
