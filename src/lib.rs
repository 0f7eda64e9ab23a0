//! # Fuzzy Control
//!
//! A rule-based Mamdani fuzzy inference engine together with a thermostat
//! controller built on top of it.
//!
//! ## Features
//!
//! - **Membership Functions**: triangular, trapezoidal, gaussian
//! - **Linguistic Variables**: labelled fuzzy sets over a discretized universe
//! - **Rules**: antecedent expression trees combined with AND (min) / OR (max)
//! - **Mamdani Inference**: clip implication, pointwise max aggregation
//! - **Defuzzification**: centroid (center of gravity)
//! - **Thermostat**: a ready-made temperature/humidity controller that
//!   recommends "Warm up" / "No change" / "Cool down" and a crisp setpoint
//!
//! ## Example
//!
//! ```
//! use fuzzy_control::{Action, Thermostat};
//!
//! let thermostat = Thermostat::new()?;
//!
//! // 5 °C at 50 % relative humidity: clearly too cold.
//! let recommendation = thermostat.evaluate(5.0, 50.0)?;
//! assert_eq!(recommendation.action, Action::WarmUp);
//! assert!(recommendation.setpoint > 20.0);
//! # Ok::<(), fuzzy_control::FuzzyError>(())
//! ```
//!
//! The configuration side of the API (universes, membership functions,
//! variables, rules) is immutable once an [`InferenceEngine`] is built, so an
//! engine can be shared freely across threads. Per-request mutable state lives
//! only in [`Simulation`], which is created per evaluation and discarded.

pub mod defuzz;
pub mod engine;
pub mod membership;
pub mod rule;
pub mod simulation;
pub mod thermostat;
pub mod universe;
pub mod variable;

pub use engine::{AggregatedSet, InferenceEngine, RangePolicy};
pub use membership::MembershipFunction;
pub use rule::{Antecedent, Rule};
pub use simulation::Simulation;
pub use thermostat::{Action, Recommendation, Thermostat, Thresholds};
pub use universe::Universe;
pub use variable::LinguisticVariable;

/// Errors raised while configuring or evaluating a fuzzy system.
///
/// Configuration problems are fatal to setup and surface while the system is
/// being built; the remaining variants are request-scoped and recoverable by
/// the caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FuzzyError {
    /// Malformed membership parameters, duplicate labels, or rules that
    /// reference unknown variables/labels.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A declared input variable was not supplied for this evaluation.
    #[error("missing input variable '{0}'")]
    MissingInput(String),
    /// A crisp input lies outside its universe bounds (strict mode only).
    #[error("input '{variable}' = {value} is outside the universe [{min}, {max}]")]
    OutOfRange {
        variable: String,
        value: f64,
        min: f64,
        max: f64,
    },
    /// Every rule activation was zero, so the aggregated output set has no
    /// mass to defuzzify. The caller chooses the fallback.
    #[error("no rule fired for output variable '{0}'")]
    NoRuleFired(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FuzzyError>;
