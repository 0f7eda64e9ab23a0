//! Thermostat controller built on the Mamdani engine.
//!
//! Recommends an [`Action`] and a crisp setpoint from measured temperature
//! (°C, universe [0, 40]) and relative humidity (%, universe [0, 100]). The
//! command variable spans [15, 26] °C; two rules drive it:
//!
//! - warm up when it is cold, or warm but dry,
//! - cool down when it is warm and humid, hot, or hottest.
//!
//! ## Example
//!
//! ```
//! use fuzzy_control::{Action, Thermostat};
//!
//! let thermostat = Thermostat::new()?;
//! let rec = thermostat.evaluate(30.0, 80.0)?;
//! assert_eq!(rec.action, Action::CoolDown);
//! # Ok::<(), fuzzy_control::FuzzyError>(())
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::{InferenceEngine, RangePolicy};
use crate::membership::MembershipFunction;
use crate::rule::{Antecedent, Rule};
use crate::simulation::{round_to, Simulation};
use crate::universe::Universe;
use crate::variable::LinguisticVariable;
use crate::{FuzzyError, Result};

pub const TEMPERATURE: &str = "temperature";
pub const HUMIDITY: &str = "humidity";
pub const COMMAND: &str = "command";

/// Recommended thermostat action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    WarmUp,
    NoChange,
    CoolDown,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::WarmUp => write!(f, "Warm up"),
            Action::NoChange => write!(f, "No change"),
            Action::CoolDown => write!(f, "Cool down"),
        }
    }
}

/// Category thresholds applied to the defuzzified command value.
///
/// `value > upper` recommends warming up, `lower < value <= upper` leaves the
/// setting alone, and anything at or below `lower` recommends cooling down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub lower: f64,
    pub upper: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            lower: 18.0,
            upper: 20.0,
        }
    }
}

impl Thresholds {
    /// Build thresholds, requiring `lower < upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if !lower.is_finite() || !upper.is_finite() || lower >= upper {
            return Err(FuzzyError::Configuration(format!(
                "thresholds must satisfy lower < upper, got {lower} and {upper}"
            )));
        }
        Ok(Self { lower, upper })
    }

    /// Map a crisp command value to an action.
    pub fn classify(&self, value: f64) -> Action {
        if value > self.upper {
            Action::WarmUp
        } else if value > self.lower {
            Action::NoChange
        } else {
            Action::CoolDown
        }
    }
}

/// A recommendation: what to do, and where to set the dial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: Action,
    /// Target setpoint in °C, rounded for display.
    pub setpoint: f64,
}

/// The thermostat controller: a configured engine plus category thresholds.
///
/// Construction is the only fallible configuration step; afterwards the
/// controller is immutable and can be shared across threads, with each
/// [`evaluate`](Thermostat::evaluate) call running an independent simulation.
#[derive(Debug, Clone)]
pub struct Thermostat {
    engine: InferenceEngine,
    thresholds: Thresholds,
    precision: u32,
}

impl Thermostat {
    /// Build the controller with the permissive range policy.
    pub fn new() -> Result<Self> {
        Self::with_policy(RangePolicy::Permissive)
    }

    /// Build the controller with an explicit range policy.
    ///
    /// [`RangePolicy::Strict`] rejects temperatures outside [0, 40] and
    /// humidities outside [0, 100], mirroring the validation the original
    /// front end applied to user input.
    pub fn with_policy(policy: RangePolicy) -> Result<Self> {
        let engine = build_engine(policy)?;
        info!(
            "thermostat configured: {} rules, thresholds {:?}",
            engine.rules().len(),
            Thresholds::default()
        );
        Ok(Self {
            engine,
            thresholds: Thresholds::default(),
            precision: 1,
        })
    }

    /// Replace the default 18/20 category thresholds.
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set the display precision of the setpoint (decimal places).
    pub fn with_precision(mut self, decimals: u32) -> Self {
        self.precision = decimals;
        self
    }

    /// The configured thresholds.
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// The underlying engine, for callers that want raw aggregated sets.
    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    /// Recommend an action and setpoint for one measurement.
    ///
    /// Classification uses the unrounded command value; only the reported
    /// setpoint is rounded.
    pub fn evaluate(&self, temperature: f64, humidity: f64) -> Result<Recommendation> {
        let mut simulation = Simulation::new(&self.engine);
        simulation.set_input(TEMPERATURE, temperature)?;
        simulation.set_input(HUMIDITY, humidity)?;
        simulation.run()?;

        let command = simulation
            .output(COMMAND)
            .ok_or_else(|| FuzzyError::NoRuleFired(COMMAND.to_string()))?;
        Ok(Recommendation {
            action: self.thresholds.classify(command),
            setpoint: round_to(command, self.precision),
        })
    }
}

/// Both input conditions hold: `temperature IS t AND humidity IS h`.
fn both(t: &str, h: &str) -> Antecedent {
    Antecedent::is(TEMPERATURE, t).and(Antecedent::is(HUMIDITY, h))
}

fn build_engine(policy: RangePolicy) -> Result<InferenceEngine> {
    let temperature = LinguisticVariable::new(TEMPERATURE, Universe::linspace(0.0, 40.0, 41)?)
        .with_term("coldest", MembershipFunction::trapezoidal(0.0, 4.0, 6.0, 8.0)?)?
        .with_term("cold", MembershipFunction::trapezoidal(6.0, 10.0, 12.0, 16.0)?)?
        .with_term("warm", MembershipFunction::trapezoidal(12.0, 16.0, 18.0, 24.0)?)?
        .with_term("hot", MembershipFunction::trapezoidal(18.0, 22.0, 24.0, 32.0)?)?
        .with_term("hottest", MembershipFunction::trapezoidal(24.0, 28.0, 30.0, 40.0)?)?;

    let humidity = LinguisticVariable::new(HUMIDITY, Universe::linspace(0.0, 100.0, 101)?)
        .with_term("low", MembershipFunction::gaussian(0.0, 30.0)?)?
        .with_term("optimal", MembershipFunction::gaussian(50.0, 15.0)?)?
        .with_term("high", MembershipFunction::gaussian(100.0, 50.0)?)?;

    let command = LinguisticVariable::new(COMMAND, Universe::linspace(15.0, 26.0, 12)?)
        .with_term("cool", MembershipFunction::triangular(15.0, 17.0, 20.0)?)?
        .with_term("warmup", MembershipFunction::triangular(18.0, 20.0, 26.0)?)?;

    let warm_up = both("coldest", "low")
        .or(both("coldest", "optimal"))
        .or(both("coldest", "high"))
        .or(both("cold", "low"))
        .or(both("cold", "optimal"))
        .or(both("warm", "low"));

    let cool_down = both("warm", "optimal")
        .or(both("warm", "high"))
        .or(both("hot", "optimal"))
        .or(both("hot", "high"))
        .or(both("hottest", "low"))
        .or(both("hottest", "optimal"))
        .or(both("hottest", "high"));

    let mut engine = InferenceEngine::with_range_policy(policy);
    engine.add_input(temperature)?;
    engine.add_input(humidity)?;
    engine.add_output(command)?;
    engine.add_rule(Rule::new(warm_up, COMMAND, "warmup"))?;
    engine.add_rule(Rule::new(cool_down, COMMAND, "cool"))?;
    Ok(engine)
}
