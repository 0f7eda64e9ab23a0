//! Mamdani inference: rule firing, implication, and aggregation.
//!
//! The engine owns the full system configuration (input/output variables and
//! the rule set) and is immutable once built. Each inference cycle:
//!
//! 1. fuzzifies the crisp inputs,
//! 2. computes every rule's firing strength (AND = min, OR = max),
//! 3. clips each targeted consequent set at the maximum strength across the
//!    rules pointing to it (clip/min implication),
//! 4. aggregates the clipped curves pointwise by maximum over the output
//!    variable's universe.
//!
//! An all-zero aggregation is a defined state; the error is only raised later
//! if the caller tries to defuzzify it.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::rule::Rule;
use crate::simulation::Simulation;
use crate::universe::Universe;
use crate::variable::LinguisticVariable;
use crate::{FuzzyError, Result};

/// Policy for crisp inputs that fall outside their universe bounds.
///
/// The permissive default evaluates whatever the membership formulas yield
/// (typically 0 at the extremes); strict mode rejects the value with
/// [`FuzzyError::OutOfRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangePolicy {
    /// Accept any finite value; out-of-range inputs just fuzzify to whatever
    /// the closed forms produce.
    #[default]
    Permissive,
    /// Reject inputs outside the variable's universe bounds.
    Strict,
}

/// An aggregated output fuzzy set sampled over its variable's universe.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedSet {
    universe: Universe,
    degrees: Vec<f64>,
}

impl AggregatedSet {
    pub(crate) fn new(universe: Universe, degrees: Vec<f64>) -> Self {
        Self { universe, degrees }
    }

    /// The output variable's sample grid.
    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Aggregated membership degree at each sample point.
    pub fn degrees(&self) -> &[f64] {
        &self.degrees
    }
}

/// A Mamdani fuzzy inference engine.
///
/// Stateless with respect to history: the only thing it holds between runs is
/// its own configuration, so a shared `&InferenceEngine` can serve any number
/// of concurrent [`Simulation`]s.
#[derive(Debug, Clone, Default)]
pub struct InferenceEngine {
    inputs: HashMap<String, LinguisticVariable>,
    outputs: HashMap<String, LinguisticVariable>,
    rules: Vec<Rule>,
    range_policy: RangePolicy,
}

impl InferenceEngine {
    /// Create an empty engine with the permissive range policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty engine with an explicit range policy.
    pub fn with_range_policy(range_policy: RangePolicy) -> Self {
        Self {
            range_policy,
            ..Self::default()
        }
    }

    /// The configured range policy.
    pub fn range_policy(&self) -> RangePolicy {
        self.range_policy
    }

    /// Register an input (antecedent) variable.
    pub fn add_input(&mut self, variable: LinguisticVariable) -> Result<()> {
        if self.inputs.contains_key(variable.name()) || self.outputs.contains_key(variable.name())
        {
            return Err(FuzzyError::Configuration(format!(
                "variable '{}' is already registered",
                variable.name()
            )));
        }
        self.inputs.insert(variable.name().to_string(), variable);
        Ok(())
    }

    /// Register an output (consequent) variable.
    pub fn add_output(&mut self, variable: LinguisticVariable) -> Result<()> {
        if self.inputs.contains_key(variable.name()) || self.outputs.contains_key(variable.name())
        {
            return Err(FuzzyError::Configuration(format!(
                "variable '{}' is already registered",
                variable.name()
            )));
        }
        self.outputs.insert(variable.name().to_string(), variable);
        Ok(())
    }

    /// Register a rule, validating every variable/label it references.
    pub fn add_rule(&mut self, rule: Rule) -> Result<()> {
        let mut bad: Option<String> = None;
        rule.antecedent.for_each_leaf(&mut |variable, label| {
            if bad.is_some() {
                return;
            }
            match self.inputs.get(variable) {
                Some(var) if var.term(label).is_some() => {}
                Some(_) => {
                    bad = Some(format!(
                        "rule references unknown label '{label}' on input '{variable}'"
                    ))
                }
                None => bad = Some(format!("rule references unknown input '{variable}'")),
            }
        });
        if let Some(message) = bad {
            return Err(FuzzyError::Configuration(message));
        }

        let output = self.outputs.get(&rule.consequent_variable).ok_or_else(|| {
            FuzzyError::Configuration(format!(
                "rule targets unknown output '{}'",
                rule.consequent_variable
            ))
        })?;
        if output.term(&rule.consequent_label).is_none() {
            return Err(FuzzyError::Configuration(format!(
                "rule targets unknown label '{}' on output '{}'",
                rule.consequent_label, rule.consequent_variable
            )));
        }

        self.rules.push(rule);
        debug!(
            "registered rule {} ({} inputs, {} outputs)",
            self.rules.len(),
            self.inputs.len(),
            self.outputs.len()
        );
        Ok(())
    }

    /// Look up an input variable.
    pub fn input(&self, name: &str) -> Option<&LinguisticVariable> {
        self.inputs.get(name)
    }

    /// Look up an output variable.
    pub fn output(&self, name: &str) -> Option<&LinguisticVariable> {
        self.outputs.get(name)
    }

    /// Names of the declared input variables.
    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        self.inputs.keys().map(String::as_str)
    }

    /// Names of the declared output variables.
    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.outputs.keys().map(String::as_str)
    }

    /// The registered rules.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Check one crisp input against its universe under the range policy.
    pub(crate) fn check_range(&self, name: &str, value: f64) -> Result<()> {
        let variable = self.inputs.get(name).ok_or_else(|| {
            FuzzyError::Configuration(format!("unknown input variable '{name}'"))
        })?;
        // Non-finite values are out of range under either policy.
        if !value.is_finite()
            || (self.range_policy == RangePolicy::Strict && !variable.universe().contains(value))
        {
            return Err(FuzzyError::OutOfRange {
                variable: name.to_string(),
                value,
                min: variable.universe().min(),
                max: variable.universe().max(),
            });
        }
        Ok(())
    }

    /// Run one Mamdani cycle, producing an aggregated fuzzy set per output
    /// variable.
    ///
    /// Every declared input must be present in `inputs`; unknown names are a
    /// configuration error. The aggregated sets still need defuzzification,
    /// see [`defuzz::centroid`](crate::defuzz::centroid).
    pub fn infer(&self, inputs: &HashMap<String, f64>) -> Result<HashMap<String, AggregatedSet>> {
        for name in inputs.keys() {
            if !self.inputs.contains_key(name) {
                return Err(FuzzyError::Configuration(format!(
                    "unknown input variable '{name}'"
                )));
            }
        }
        for name in self.inputs.keys() {
            if !inputs.contains_key(name) {
                return Err(FuzzyError::MissingInput(name.clone()));
            }
        }

        // Fuzzification: degree of every label under every input.
        let mut degrees: HashMap<String, HashMap<String, f64>> = HashMap::new();
        for (name, variable) in &self.inputs {
            let fuzzified = variable.fuzzify(inputs[name]);
            trace!("fuzzified '{}' = {}: {:?}", name, inputs[name], fuzzified);
            degrees.insert(name.clone(), fuzzified);
        }

        // Firing strengths, folded into the max strength per consequent label.
        let mut strengths: HashMap<(&str, &str), f64> = HashMap::new();
        for (index, rule) in self.rules.iter().enumerate() {
            let strength = rule.antecedent.activation(&degrees)?;
            debug!(
                "rule {} fired with strength {:.4} -> '{}' IS '{}'",
                index, strength, rule.consequent_variable, rule.consequent_label
            );
            let slot = strengths
                .entry((rule.consequent_variable.as_str(), rule.consequent_label.as_str()))
                .or_insert(0.0);
            *slot = slot.max(strength);
        }

        // Implication (clip) and max-aggregation over each output universe.
        let mut aggregated = HashMap::new();
        for (name, variable) in &self.outputs {
            let universe = variable.universe();
            let mut curve: Vec<f64> = vec![0.0; universe.len()];
            for ((var, label), &strength) in &strengths {
                if *var != name.as_str() || strength <= 0.0 {
                    continue;
                }
                let sampled = variable
                    .term(label)
                    .ok_or_else(|| {
                        FuzzyError::Configuration(format!(
                            "output '{name}' has no label '{label}'"
                        ))
                    })?
                    .sample(universe);
                for (point, clipped) in curve.iter_mut().zip(sampled) {
                    *point = point.max(clipped.min(strength));
                }
            }
            aggregated.insert(
                name.clone(),
                AggregatedSet::new(universe.clone(), curve),
            );
        }
        Ok(aggregated)
    }

    /// Convenience wrapper: run a full cycle and defuzzify every output.
    ///
    /// Equivalent to driving a [`Simulation`] by hand.
    pub fn evaluate(&self, inputs: &HashMap<String, f64>) -> Result<HashMap<String, f64>> {
        let mut simulation = Simulation::new(self);
        for (name, value) in inputs {
            simulation.set_input(name, *value)?;
        }
        simulation.run()?;
        Ok(simulation.outputs().clone())
    }
}
