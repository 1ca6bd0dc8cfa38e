//! Pre-built plant scenarios
//!
//! Each scenario pairs a level series with the outcome a correct detector
//! must produce under default settings.

use outflow_core::Reading;

use super::generators::LevelGenerator;

/// Series plus expectations
pub struct TestScenario {
    pub name: &'static str,
    pub readings: Vec<Reading>,
    pub expected_events: usize,
}

/// Scenario catalogue
pub struct Scenarios;

impl Scenarios {
    /// Tank idle at a constant level for a day
    pub fn idle_day() -> TestScenario {
        TestScenario {
            name: "idle_day",
            readings: LevelGenerator::new(1.2).hold(2879).build(),
            expected_events: 0,
        }
    }

    /// Stationary level with sensor noise and a single glitch
    pub fn noisy_idle() -> TestScenario {
        TestScenario {
            name: "noisy_idle",
            readings: LevelGenerator::new(1.2).hold(999).noise(0.01).spike(400, 1.0).build(),
            expected_events: 0,
        }
    }

    /// Slow evaporation-like drift, well under the entry slope
    pub fn slow_drift() -> TestScenario {
        TestScenario {
            name: "slow_drift",
            readings: LevelGenerator::new(1.0).ramp_to(0.9, 999).build(),
            expected_events: 0,
        }
    }

    /// Two pump-out cycles separated by refilling
    pub fn two_drains() -> TestScenario {
        TestScenario {
            name: "two_drains",
            readings: LevelGenerator::new(1.0)
                .hold(59)
                .ramp_to(0.8, 60)
                .hold(200)
                .ramp_to(0.6, 60)
                .hold(180)
                .build(),
            expected_events: 2,
        }
    }

    /// Drain with noise and a mid-drain glitch
    pub fn noisy_drain() -> TestScenario {
        TestScenario {
            name: "noisy_drain",
            readings: LevelGenerator::new(1.0)
                .hold(59)
                .ramp_to(0.8, 60)
                .hold(180)
                .noise(0.01)
                .spike(90, -0.5)
                .build(),
            expected_events: 1,
        }
    }

    /// Every scenario in the catalogue
    pub fn all() -> Vec<TestScenario> {
        vec![
            Self::idle_day(),
            Self::noisy_idle(),
            Self::slow_drift(),
            Self::two_drains(),
            Self::noisy_drain(),
        ]
    }
}
