// SPDX-License-Identifier: PMPL-1.0-or-later
//! Integration tests for a11y-engine

use a11y_engine::aria::AriaIssueType;
use a11y_engine::axe::RecordedResults;
use a11y_engine::config::{self, Config};
use a11y_engine::scanner::Scanner;
use a11y_engine::{
    AchievedLevel, AriaValidator, ComplianceCalculator, Document, EngineError, Impact, Issue, IssueType,
    Rule, RuleExecutor, RuleRegistry, Standard, WcagLevel,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn fixture(name: &str) -> Document {
    Document::from_file(&Path::new("tests/fixtures").join(name)).expect("fixture should parse")
}

#[test]
fn test_evaluate_accessible_fixture() {
    let result = RuleExecutor::default().evaluate(&fixture("accessible.html"));

    assert!(
        result.issues.is_empty(),
        "Accessible fixture should have no issues, got {:?}",
        result.issues.iter().map(|i| &i.message).collect::<Vec<_>>()
    );
    assert_eq!(result.passed_checks.len(), 3);
    assert!(result.faults.is_empty());
}

#[test]
fn test_evaluate_inaccessible_fixture() {
    let result = RuleExecutor::default().evaluate(&fixture("inaccessible.html"));

    assert_eq!(result.summary.total_issues, 5);
    assert_eq!(result.summary.errors, 4);
    assert_eq!(result.summary.warnings, 1);
    assert_eq!(result.summary.by_standard.get("WCAG"), Some(&5));
    assert_eq!(result.summary.by_impact.get("critical"), Some(&4));
    assert!(result.passed_checks.is_empty());

    let alt = result.for_rule("WCAG 1.1.1");
    assert_eq!(alt.len(), 2);
    assert!(alt.iter().all(|i| i.level == Some(WcagLevel::A)));
    assert!(alt[0].element.as_deref().is_some_and(|e| e.contains("hero.jpg")));

    let headings = result.warnings();
    assert!(headings[0].message.contains("h4 after h1"));
}

#[test]
fn test_aria_accessible_fixture() {
    let result = AriaValidator::default().validate(&fixture("accessible.html"));

    assert!(result.issues.is_empty(), "unexpected ARIA issues: {:?}", result.issues);
    assert_eq!(result.valid_usages.len(), 5);
    assert_eq!(result.statistics.total_aria_elements, 10);
    assert!(result.statistics.roles_used.contains("tablist"));
    assert!(result.statistics.states_used.contains("aria-selected"));
    assert!(result.statistics.states_used.contains("aria-current"));
}

#[test]
fn test_aria_inaccessible_fixture() {
    let result = AriaValidator::default().validate(&fixture("inaccessible.html"));

    let errors = result.errors();
    assert_eq!(errors.len(), 6, "{:#?}", errors);
    assert_eq!(result.warnings().len(), 1);

    let mains = result
        .issues
        .iter()
        .filter(|i| i.message.contains("Multiple main landmarks"))
        .count();
    assert_eq!(mains, 1);
    assert!(errors.iter().any(|e| e.message.contains("aria-checked")));
    assert!(errors.iter().any(|e| e.message.contains("tablist")));
    assert!(errors.iter().any(|e| e.message.contains("Invalid ARIA role")));
    assert!(errors.iter().any(|e| e.message.contains("references non-existent ID \"nowhere\"")));
    assert!(result.warnings()[0].message.contains("Redundant role"));
    assert!(result.issues.iter().all(|i| i.issue_type != AriaIssueType::Warning || !i.recommendation.is_empty()));
}

#[test]
fn test_compliance_for_fixtures() {
    let calc = ComplianceCalculator::default();

    let good = RuleExecutor::default().evaluate(&fixture("accessible.html"));
    let report = calc.calculate(&good, WcagLevel::AA);
    assert!(report.failed_criteria.is_empty());
    assert_eq!(report.overall_score, 100);
    // only level A criteria are covered by the built-in rules
    assert_eq!(report.level, AchievedLevel::A);
    assert_eq!(
        report.passed_criteria.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec!["1.1.1", "1.3.1"]
    );

    let bad = RuleExecutor::default().evaluate(&fixture("inaccessible.html"));
    let report = calc.calculate(&bad, WcagLevel::AA);
    assert_eq!(report.level, AchievedLevel::None);
    assert_eq!(report.overall_score, 0);
    assert_eq!(report.recommendations().len(), 2);
}

#[test]
fn test_axe_results_merged() {
    let engine = RecordedResults::from_file(Path::new("tests/fixtures/axe-results.json")).expect("axe JSON");
    let result = RuleExecutor::default().evaluate_with(&fixture("accessible.html"), Some(&engine));

    assert_eq!(result.summary.total_issues, 2);
    assert_eq!(result.summary.by_standard.get("AXE"), Some(&2));
    let contrast = result.for_rule("color-contrast");
    assert_eq!(contrast[0].issue_type, IssueType::Error);
    assert_eq!(contrast[0].selector.as_deref(), Some("footer p.muted"));
    assert_eq!(contrast[0].level, Some(WcagLevel::AA));

    // engine issues do not map onto catalog criteria
    let report = ComplianceCalculator::default().calculate(&result, WcagLevel::AA);
    assert!(report.failed_criteria.is_empty());

    let mut config = Config::default();
    config.wcag.min_impact = Some(Impact::Serious);
    let filtered = RuleExecutor::new(RuleRegistry::wcag(), config)
        .evaluate_with(&fixture("accessible.html"), Some(&engine));
    assert_eq!(filtered.summary.total_issues, 1);
}

struct PageTitle;

impl Rule for PageTitle {
    fn name(&self) -> &str {
        "page-title"
    }

    fn description(&self) -> &str {
        "Documents have a non-empty title element"
    }

    fn criterion(&self) -> Option<&str> {
        Some("2.4.2")
    }

    fn check(&self, document: &Document) -> a11y_engine::Result<Vec<Issue>> {
        let has_title = document
            .select("head > title")?
            .iter()
            .any(|t| !t.text().collect::<String>().trim().is_empty());
        if has_title {
            Ok(vec![])
        } else {
            Ok(vec![Issue::error("WCAG 2.4.2", "Document has no title")
                .with_level(WcagLevel::A)
                .with_impact(Impact::Serious)])
        }
    }
}

#[test]
fn test_custom_rule_feeds_compliance() {
    let registry = RuleRegistry::wcag().with_rule(Box::new(PageTitle));
    let executor = RuleExecutor::new(registry, Config::default());
    let calc = ComplianceCalculator::default();

    let good = executor.evaluate(&fixture("accessible.html"));
    assert!(good.passed_checks.iter().any(|c| c == "WCAG: page-title (2.4.2)"));
    let report = calc.calculate(&good, WcagLevel::A);
    assert!(report.passed_criteria.iter().any(|c| c.id == "2.4.2"));

    let bad = executor.evaluate(&fixture("inaccessible.html"));
    assert_eq!(bad.for_rule("WCAG 2.4.2").len(), 1);
    let report = calc.calculate(&bad, WcagLevel::A);
    assert!(report.failed_criteria.iter().any(|c| c.id == "2.4.2"));
}

#[test]
fn test_invalid_level_is_rejected() {
    let result = RuleExecutor::default().evaluate(&fixture("accessible.html"));
    let err = ComplianceCalculator::default()
        .calculate_for_level(&result, "B")
        .expect_err("B is not a WCAG level");
    assert!(matches!(err, EngineError::InvalidLevel(ref l) if l == "B"));
}

#[test]
fn test_empty_document_is_fatal() {
    assert!(matches!(Document::parse(""), Err(EngineError::Document(_))));
    assert!(matches!(Document::parse(" \n\t"), Err(EngineError::Document(_))));
}

#[test]
fn test_load_toml_config() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
run_axe = false

[wcag]
level = "A"
min_impact = "serious"
disabled_criteria = ["1.3.1", "bogus"]

[aria]
required_children = false
"#,
    )
    .expect("write config");

    let config = config::load_config(&path).expect("valid config");
    assert!(!config.run_axe);
    assert_eq!(config.wcag.level, WcagLevel::A);
    assert_eq!(config.wcag.min_impact, Some(Impact::Serious));
    assert!(!config.is_criterion_enabled("1.3.1"));
    assert!(config.aria.unknown_attributes);
    assert!(!config.aria.required_children);
    assert_eq!(config.validate().len(), 1);

    let result = RuleExecutor::new(RuleRegistry::wcag(), config.clone()).evaluate(&fixture("inaccessible.html"));
    assert!(result.issues.iter().all(|i| i.rule == "WCAG 1.1.1"));
    let report = ComplianceCalculator::new(config).calculate_configured(&result);
    assert_eq!(report.target_level, WcagLevel::A);
    assert!(report.applicable_count() > 0);
}

#[test]
fn test_load_yaml_config() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.yaml");
    fs::write(&path, "wcag:\n  level: AAA\n  enabled_criteria:\n    - \"1.1.1\"\n").expect("write config");

    let config = config::load_config(&path).expect("valid config");
    assert_eq!(config.wcag.level, WcagLevel::AAA);
    assert!(config.run_axe);
    assert!(config.is_criterion_enabled("1.1.1"));
    assert!(!config.is_criterion_enabled("1.4.3"));

    let calc = ComplianceCalculator::new(config);
    assert_eq!(calc.applicable_criteria(WcagLevel::AAA).len(), 1);
}

#[test]
fn test_malformed_config_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "[wcag]\nlevel = \"B\"\n").expect("write config");
    assert!(matches!(config::load_config(&path), Err(EngineError::Toml(_))));
}

#[test]
fn test_scan_fixtures_directory() {
    let report = Scanner::default().scan_directory(Path::new("tests/fixtures"));

    assert_eq!(report.files.len(), 2);
    assert!(report.skipped.is_empty());
    assert!(report.has_errors());
    // 5 rule issues + 7 ARIA issues from the inaccessible page
    assert_eq!(report.total_issues(), 12);

    let json = serde_json::to_value(&report).expect("serializable");
    assert!(json["files"][0]["evaluation"]["passedChecks"].is_array());
    assert!(json["files"][0]["compliance"]["detailedScores"].is_object());
}

#[test]
fn test_evaluation_json_shape() {
    let result = RuleExecutor::default().evaluate(&Document::parse(r#"<img src="x.jpg">"#).expect("parse"));
    let json = serde_json::to_value(&result).expect("serializable");

    assert_eq!(json["issues"][0]["type"], "error");
    assert_eq!(json["issues"][0]["rule"], "WCAG 1.1.1");
    assert_eq!(json["issues"][0]["level"], "A");
    assert_eq!(json["issues"][0]["impact"], "critical");
    assert_eq!(json["issues"][0]["standard"], Standard::Wcag.to_string());
    assert_eq!(json["summary"]["totalIssues"], 1);
    assert!(json.get("faults").is_none());
}
