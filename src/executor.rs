// SPDX-License-Identifier: PMPL-1.0-or-later
//! Rule executor.
//!
//! Runs every registered rule against one document, isolates rule faults,
//! merges automated engine issues and aggregates the result.

use crate::axe::{self, AutomatedEngine};
use crate::config::Config;
use crate::dom::Document;
use crate::error::{EngineError, Result};
use crate::issue::{EvaluationResult, Issue, RuleFault};
use crate::rules::{self, Rule, RuleRegistry};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, warn};

/// Runs a [`RuleRegistry`] under a [`Config`]
pub struct RuleExecutor {
    registry: RuleRegistry,
    config: Config,
}

impl RuleExecutor {
    pub fn new(registry: RuleRegistry, config: Config) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Evaluate a document with the registered rules only
    pub fn evaluate(&self, document: &Document) -> EvaluationResult {
        self.evaluate_with(document, None)
    }

    /// Evaluate a document, merging issues from an automated engine.
    ///
    /// A failing engine is logged and contributes no issues.
    pub fn evaluate_with(
        &self,
        document: &Document,
        engine: Option<&dyn AutomatedEngine>,
    ) -> EvaluationResult {
        let mut issues = Vec::new();
        let mut passed_checks = Vec::new();
        let mut faults = Vec::new();

        for rule in self.registry.rules() {
            if let Some(criterion) = rule.criterion() {
                if !self.config.is_criterion_enabled(criterion) {
                    debug!("Skipping rule {} (criterion {} disabled)", rule.name(), criterion);
                    continue;
                }
            }

            debug!("Running rule: {}", rule.name());
            match run_isolated(&**rule, document) {
                Ok(rule_issues) => {
                    debug!("Rule {} found {} issue(s)", rule.name(), rule_issues.len());
                    if rule_issues.is_empty() {
                        passed_checks.push(rules::passed_marker(&**rule));
                    }
                    issues.extend(rule_issues);
                }
                Err(e) => {
                    warn!("{}", e);
                    faults.push(RuleFault {
                        rule: rule.name().to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        if let Some(engine) = engine.filter(|_| self.config.run_axe) {
            match axe::collect_issues(engine, document) {
                Ok(engine_issues) => {
                    debug!("{} reported {} issue(s)", engine.name(), engine_issues.len());
                    issues.extend(engine_issues);
                }
                Err(e) => warn!("{}; continuing without automated engine issues", e),
            }
        }

        let issues = self.apply_impact_filter(issues);
        let result = EvaluationResult::new(issues, passed_checks, faults);

        info!(
            "Evaluation finished: {} issue(s), {} passed check(s), {} fault(s)",
            result.summary.total_issues,
            result.passed_checks.len(),
            result.faults.len()
        );
        result
    }

    /// Drop issues below the configured minimum impact. Issues without
    /// an impact are kept.
    fn apply_impact_filter(&self, issues: Vec<Issue>) -> Vec<Issue> {
        match self.config.wcag.min_impact {
            Some(min) => issues
                .into_iter()
                .filter(|i| i.impact.map_or(true, |impact| impact >= min))
                .collect(),
            None => issues,
        }
    }
}

impl Default for RuleExecutor {
    fn default() -> Self {
        Self::new(RuleRegistry::default(), Config::default())
    }
}

/// Run one rule so that an error or a panic is reported instead of
/// aborting the batch
fn run_isolated(rule: &dyn Rule, document: &Document) -> Result<Vec<Issue>> {
    let fault = |message: String| EngineError::Rule {
        rule: rule.name().to_string(),
        message,
    };
    match panic::catch_unwind(AssertUnwindSafe(|| rule.check(document))) {
        Ok(Ok(issues)) => Ok(issues),
        Ok(Err(e)) => Err(fault(e.to_string())),
        Err(payload) => Err(fault(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {}", s)
    } else {
        "panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axe::{AxeNode, AxeViolation, RecordedResults};
    use crate::error::{EngineError, Result};
    use crate::issue::{Impact, IssueType, Standard};

    struct FailingRule;

    impl Rule for FailingRule {
        fn name(&self) -> &str {
            "always-fails"
        }

        fn description(&self) -> &str {
            "returns an error"
        }

        fn check(&self, _document: &Document) -> Result<Vec<Issue>> {
            Err(EngineError::Selector("div[[".to_string()))
        }
    }

    struct PanickingRule;

    impl Rule for PanickingRule {
        fn name(&self) -> &str {
            "panics"
        }

        fn description(&self) -> &str {
            "panics"
        }

        fn check(&self, _document: &Document) -> Result<Vec<Issue>> {
            panic!("rule bug");
        }
    }

    struct BrokenEngine;

    impl AutomatedEngine for BrokenEngine {
        fn name(&self) -> &str {
            "broken"
        }

        fn run(&self, _document: &Document) -> Result<Vec<AxeViolation>> {
            Err(EngineError::Config("browser unavailable".to_string()))
        }
    }

    fn violation(id: &str, impact: &str) -> AxeViolation {
        AxeViolation {
            id: id.to_string(),
            impact: Some(impact.to_string()),
            description: String::new(),
            help: format!("{} help", id),
            help_url: None,
            tags: vec!["wcag2a".to_string()],
            nodes: vec![AxeNode {
                html: "<div>".to_string(),
                target: vec!["div".to_string()],
                impact: Some(impact.to_string()),
                failure_summary: None,
            }],
        }
    }

    #[test]
    fn test_clean_document_passes_all_rules() {
        let doc = Document::parse(
            r#"<html><body><h1>T</h1><h2>S</h2><img src="a.png" alt="A">
               <label for="n">Name</label><input id="n"></body></html>"#,
        )
        .expect("parse");
        let result = RuleExecutor::default().evaluate(&doc);
        assert!(result.issues.is_empty());
        assert_eq!(
            result.passed_checks,
            vec![
                "WCAG: images-alt-text (1.1.1)",
                "WCAG: headings-structure (1.3.1)",
                "WCAG: form-labels (1.3.1)",
            ]
        );
    }

    #[test]
    fn test_failing_instance_suppresses_marker() {
        let doc = Document::parse(r#"<img src="a.png" alt="ok"><img src="b.png">"#).expect("parse");
        let result = RuleExecutor::default().evaluate(&doc);
        assert_eq!(result.summary.errors, 1);
        assert!(!result.passed_checks.iter().any(|c| c.contains("images-alt-text")));
    }

    #[test]
    fn test_rule_faults_are_isolated() {
        let registry = RuleRegistry::wcag()
            .with_rule(Box::new(FailingRule))
            .with_rule(Box::new(PanickingRule));
        let executor = RuleExecutor::new(registry, Config::default());
        let doc = Document::parse(r#"<img src="x.jpg">"#).expect("parse");
        let result = executor.evaluate(&doc);

        assert_eq!(result.faults.len(), 2);
        assert_eq!(result.faults[0].rule, "always-fails");
        assert!(result.faults[1].message.contains("rule bug"));
        assert_eq!(result.summary.errors, 1);
        assert_eq!(result.passed_checks.len(), 2);
    }

    #[test]
    fn test_engine_issues_merged() {
        let engine = RecordedResults::new(vec![violation("image-alt", "critical")]);
        let doc = Document::parse("<p>x</p>").expect("parse");
        let result = RuleExecutor::default().evaluate_with(&doc, Some(&engine));
        assert_eq!(result.summary.total_issues, 1);
        assert_eq!(result.summary.by_standard.get("AXE"), Some(&1));
        assert_eq!(result.issues[0].issue_type, IssueType::Error);
    }

    #[test]
    fn test_engine_failure_does_not_abort() {
        let doc = Document::parse(r#"<img src="x.jpg">"#).expect("parse");
        let result = RuleExecutor::default().evaluate_with(&doc, Some(&BrokenEngine));
        assert_eq!(result.summary.total_issues, 1);
        assert!(result.issues.iter().all(|i| i.standard == Standard::Wcag));
    }

    #[test]
    fn test_engine_skipped_when_disabled() {
        let mut config = Config::default();
        config.run_axe = false;
        let engine = RecordedResults::new(vec![violation("image-alt", "critical")]);
        let doc = Document::parse("<p>x</p>").expect("parse");
        let result = RuleExecutor::new(RuleRegistry::wcag(), config).evaluate_with(&doc, Some(&engine));
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_disabled_criterion_skips_rules() {
        let mut config = Config::default();
        config.wcag.disabled_criteria = vec!["1.3.1".to_string()];
        let doc = Document::parse("<h1>T</h1><h3>S</h3><input>").expect("parse");
        let result = RuleExecutor::new(RuleRegistry::wcag(), config).evaluate(&doc);
        assert!(result.issues.is_empty());
        assert_eq!(result.passed_checks, vec!["WCAG: images-alt-text (1.1.1)"]);
    }

    #[test]
    fn test_min_impact_filter() {
        let mut config = Config::default();
        config.wcag.min_impact = Some(Impact::Serious);
        let doc = Document::parse(r#"<h1>T</h1><h3>S</h3><img src="x.jpg">"#).expect("parse");
        let result = RuleExecutor::new(RuleRegistry::wcag(), config).evaluate(&doc);
        assert_eq!(result.summary.total_issues, 1);
        assert_eq!(result.issues[0].rule, "WCAG 1.1.1");
        // the heading rule still failed, so it is not marked as passed
        assert!(!result.passed_checks.iter().any(|c| c.contains("headings-structure")));
    }
}
