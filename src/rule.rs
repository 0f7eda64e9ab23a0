//! Fuzzy rules: antecedent expression trees mapped to a consequent label.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{FuzzyError, Result};

/// An antecedent clause over linguistic labels.
///
/// Leaves reference a (variable, label) pair; internal nodes combine child
/// activations with AND (min) or OR (max). Trees are immutable once built; a
/// rule's firing strength is recomputed from scratch every cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Antecedent {
    /// `variable IS label`
    Is { variable: String, label: String },
    /// Fuzzy AND: minimum of both activations.
    And(Box<Antecedent>, Box<Antecedent>),
    /// Fuzzy OR: maximum of both activations.
    Or(Box<Antecedent>, Box<Antecedent>),
}

impl Antecedent {
    /// Leaf clause `variable IS label`.
    pub fn is(variable: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Is {
            variable: variable.into(),
            label: label.into(),
        }
    }

    /// Combine with another clause under fuzzy AND.
    pub fn and(self, other: Antecedent) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    /// Combine with another clause under fuzzy OR.
    pub fn or(self, other: Antecedent) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    /// Evaluate the clause bottom-up against fuzzified input degrees
    /// (variable → label → degree).
    pub fn activation(&self, degrees: &HashMap<String, HashMap<String, f64>>) -> Result<f64> {
        match self {
            Self::Is { variable, label } => degrees
                .get(variable)
                .and_then(|labels| labels.get(label))
                .copied()
                .ok_or_else(|| {
                    FuzzyError::Configuration(format!(
                        "antecedent references unknown '{variable}' IS '{label}'"
                    ))
                }),
            Self::And(lhs, rhs) => {
                Ok(lhs.activation(degrees)?.min(rhs.activation(degrees)?))
            }
            Self::Or(lhs, rhs) => {
                Ok(lhs.activation(degrees)?.max(rhs.activation(degrees)?))
            }
        }
    }

    /// Visit every (variable, label) leaf, for registration-time validation.
    pub(crate) fn for_each_leaf<'a>(&'a self, f: &mut impl FnMut(&'a str, &'a str)) {
        match self {
            Self::Is { variable, label } => f(variable, label),
            Self::And(lhs, rhs) | Self::Or(lhs, rhs) => {
                lhs.for_each_leaf(f);
                rhs.for_each_leaf(f);
            }
        }
    }
}

/// A fuzzy rule: one antecedent tree targeting one consequent label.
///
/// Several rules may target the same (variable, label) pair; the engine
/// combines their firing strengths by maximum during implication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Condition side of the rule.
    pub antecedent: Antecedent,
    /// Output variable this rule feeds.
    pub consequent_variable: String,
    /// Label on the output variable that gets clipped by the firing strength.
    pub consequent_label: String,
}

impl Rule {
    /// Build a rule `IF antecedent THEN variable IS label`.
    pub fn new(
        antecedent: Antecedent,
        consequent_variable: impl Into<String>,
        consequent_label: impl Into<String>,
    ) -> Self {
        Self {
            antecedent,
            consequent_variable: consequent_variable.into(),
            consequent_label: consequent_label.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn degrees() -> HashMap<String, HashMap<String, f64>> {
        let mut temperature = HashMap::new();
        temperature.insert("cold".to_string(), 0.7);
        temperature.insert("hot".to_string(), 0.2);

        let mut humidity = HashMap::new();
        humidity.insert("low".to_string(), 0.4);
        humidity.insert("high".to_string(), 0.9);

        let mut all = HashMap::new();
        all.insert("temperature".to_string(), temperature);
        all.insert("humidity".to_string(), humidity);
        all
    }

    #[test]
    fn test_leaf_activation() {
        let clause = Antecedent::is("temperature", "cold");
        assert_eq!(clause.activation(&degrees()).unwrap(), 0.7);
    }

    #[test]
    fn test_and_is_min() {
        let clause =
            Antecedent::is("temperature", "cold").and(Antecedent::is("humidity", "low"));
        assert_eq!(clause.activation(&degrees()).unwrap(), 0.4);
    }

    #[test]
    fn test_or_is_max() {
        let clause =
            Antecedent::is("temperature", "hot").or(Antecedent::is("humidity", "high"));
        assert_eq!(clause.activation(&degrees()).unwrap(), 0.9);
    }

    #[test]
    fn test_nested_tree() {
        // (cold AND low) OR (hot AND high) = max(0.4, 0.2) = 0.4
        let clause = Antecedent::is("temperature", "cold")
            .and(Antecedent::is("humidity", "low"))
            .or(Antecedent::is("temperature", "hot").and(Antecedent::is("humidity", "high")));
        assert_eq!(clause.activation(&degrees()).unwrap(), 0.4);
    }

    #[test]
    fn test_unknown_reference_errors() {
        let clause = Antecedent::is("pressure", "low");
        assert!(matches!(
            clause.activation(&degrees()),
            Err(FuzzyError::Configuration(_))
        ));
    }

    #[test]
    fn test_leaf_visitor() {
        let clause = Antecedent::is("temperature", "cold")
            .and(Antecedent::is("humidity", "low"))
            .or(Antecedent::is("temperature", "hot"));
        let mut leaves = Vec::new();
        clause.for_each_leaf(&mut |v, l| leaves.push((v.to_string(), l.to_string())));
        assert_eq!(leaves.len(), 3);
    }
}
