//! Linguistic variables: named families of labelled fuzzy sets.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::membership::MembershipFunction;
use crate::universe::Universe;
use crate::{FuzzyError, Result};

/// A named variable bound to a universe, holding one membership function per
/// linguistic label.
///
/// Variables are immutable once registered with an engine. Crisp input values
/// are not stored here; they are bound per run on a
/// [`Simulation`](crate::Simulation) so that concurrent evaluations can share
/// one configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinguisticVariable {
    name: String,
    universe: Universe,
    terms: HashMap<String, MembershipFunction>,
}

impl LinguisticVariable {
    /// Create a variable with no terms yet.
    pub fn new(name: impl Into<String>, universe: Universe) -> Self {
        Self {
            name: name.into(),
            universe,
            terms: HashMap::new(),
        }
    }

    /// Register a membership function under a linguistic label.
    ///
    /// Labels are unique within a variable; re-registering one is a
    /// configuration error.
    pub fn add_term(
        &mut self,
        label: impl Into<String>,
        function: MembershipFunction,
    ) -> Result<()> {
        let label = label.into();
        if self.terms.contains_key(&label) {
            return Err(FuzzyError::Configuration(format!(
                "duplicate label '{label}' on variable '{}'",
                self.name
            )));
        }
        self.terms.insert(label, function);
        Ok(())
    }

    /// Builder-style [`add_term`](Self::add_term).
    pub fn with_term(
        mut self,
        label: impl Into<String>,
        function: MembershipFunction,
    ) -> Result<Self> {
        self.add_term(label, function)?;
        Ok(self)
    }

    /// Variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The variable's universe.
    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Look up the membership function for a label.
    pub fn term(&self, label: &str) -> Option<&MembershipFunction> {
        self.terms.get(label)
    }

    /// Iterate over the registered labels.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    /// Evaluate the named membership function at a crisp value.
    pub fn membership(&self, label: &str, x: f64) -> Result<f64> {
        self.terms
            .get(label)
            .map(|mf| mf.membership(x))
            .ok_or_else(|| {
                FuzzyError::Configuration(format!(
                    "variable '{}' has no label '{label}'",
                    self.name
                ))
            })
    }

    /// Membership degrees of a crisp value under every label.
    pub(crate) fn fuzzify(&self, x: f64) -> HashMap<String, f64> {
        self.terms
            .iter()
            .map(|(label, mf)| (label.clone(), mf.membership(x)))
            .collect()
    }
}
