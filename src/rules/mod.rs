// SPDX-License-Identifier: PMPL-1.0-or-later
//! Rule registry and the built-in WCAG rule set.
//!
//! A rule is a pure check over a [`Document`] producing zero or more
//! [`Issue`]s. The [`RuleRegistry`] holds rules in registration order and
//! is never modified once it has been handed to an executor.

pub mod alt_text;
pub mod forms;
pub mod headings;

use crate::dom::Document;
use crate::error::Result;
use crate::issue::{Issue, Standard};

/// Trait implemented by all rules
pub trait Rule: Send + Sync {
    /// Registry key, e.g. "images-alt-text"
    fn name(&self) -> &str;

    /// Short description of what this rule checks
    fn description(&self) -> &str;

    /// Standard the rule reports against
    fn standard(&self) -> Standard {
        Standard::Wcag
    }

    /// WCAG success criterion this rule tests, if any
    fn criterion(&self) -> Option<&str> {
        None
    }

    /// Inspect the document. Must not rely on state from previous calls.
    fn check(&self, document: &Document) -> Result<Vec<Issue>>;
}

/// Marker recorded in `passed_checks` when a rule reports nothing,
/// e.g. "WCAG: images-alt-text (1.1.1)"
pub fn passed_marker(rule: &dyn Rule) -> String {
    match rule.criterion() {
        Some(criterion) => format!("{}: {} ({})", rule.standard(), rule.name(), criterion),
        None => format!("{}: {}", rule.standard(), rule.name()),
    }
}

/// Ordered collection of rules keyed by name
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Create an empty registry
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Registry holding the built-in WCAG rules
    pub fn wcag() -> Self {
        Self::empty()
            .with_rule(Box::new(alt_text::ImagesAltText))
            .with_rule(Box::new(headings::HeadingsStructure))
            .with_rule(Box::new(forms::FormLabels))
    }

    /// Add a rule, replacing any rule already registered under its name
    pub fn with_rule(mut self, rule: Box<dyn Rule>) -> Self {
        match self.rules.iter().position(|r| r.name() == rule.name()) {
            Some(idx) => self.rules[idx] = rule,
            None => self.rules.push(rule),
        }
        self
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Look up a rule by name
    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.rules.iter().find(|r| r.name() == name).map(|r| &**r)
    }

    /// Rule names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::wcag()
    }
}
