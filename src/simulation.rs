//! Per-request evaluation state over a shared engine.

use std::collections::HashMap;

use tracing::debug;

use crate::defuzz;
use crate::engine::InferenceEngine;
use crate::Result;

/// One evaluation cycle: bind crisp inputs, run the engine, defuzzify.
///
/// A simulation borrows its engine immutably, so any number of simulations
/// can run concurrently over one configuration; the mutable input bindings
/// live here and are discarded with the simulation.
#[derive(Debug)]
pub struct Simulation<'a> {
    engine: &'a InferenceEngine,
    inputs: HashMap<String, f64>,
    outputs: HashMap<String, f64>,
}

impl<'a> Simulation<'a> {
    /// Start a fresh simulation with no inputs bound.
    pub fn new(engine: &'a InferenceEngine) -> Self {
        Self {
            engine,
            inputs: HashMap::new(),
            outputs: HashMap::new(),
        }
    }

    /// Bind a crisp value to an input variable.
    ///
    /// Unknown names are a configuration error. Under
    /// [`RangePolicy::Strict`](crate::RangePolicy::Strict) values outside the
    /// variable's universe are rejected with
    /// [`FuzzyError::OutOfRange`](crate::FuzzyError::OutOfRange);
    /// the permissive default accepts them as-is.
    pub fn set_input(&mut self, name: &str, value: f64) -> Result<()> {
        self.engine.check_range(name, value)?;
        self.inputs.insert(name.to_string(), value);
        Ok(())
    }

    /// Run the inference cycle and defuzzify every output.
    ///
    /// Fails with [`FuzzyError::MissingInput`](crate::FuzzyError::MissingInput)
    /// if any declared input is unbound, and with
    /// [`FuzzyError::NoRuleFired`](crate::FuzzyError::NoRuleFired) if an output's
    /// aggregated set carries no mass.
    pub fn run(&mut self) -> Result<()> {
        let aggregated = self.engine.infer(&self.inputs)?;
        self.outputs.clear();
        for (name, set) in &aggregated {
            let crisp = defuzz::centroid(name, set)?;
            debug!("defuzzified '{}' -> {:.4}", name, crisp);
            self.outputs.insert(name.clone(), crisp);
        }
        Ok(())
    }

    /// Crisp value computed for an output variable, if [`run`](Self::run)
    /// succeeded.
    pub fn output(&self, name: &str) -> Option<f64> {
        self.outputs.get(name).copied()
    }

    /// Output value rounded to `decimals` decimal places for display.
    pub fn output_rounded(&self, name: &str, decimals: u32) -> Option<f64> {
        self.output(name).map(|v| round_to(v, decimals))
    }

    /// All computed outputs.
    pub fn outputs(&self) -> &HashMap<String, f64> {
        &self.outputs
    }
}

/// Round to a fixed number of decimal places.
pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
