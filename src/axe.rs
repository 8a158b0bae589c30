// SPDX-License-Identifier: PMPL-1.0-or-later
//! Automated rule engine integration (axe-core compatible).
//!
//! The engine itself runs outside this crate; it is reached through the
//! [`AutomatedEngine`] trait. Its violations are translated into
//! [`Issue`]s tagged with [`Standard::Axe`] before aggregation.

use crate::dom::Document;
use crate::error::{EngineError, Result};
use crate::issue::{Impact, Issue, IssueType, Standard, WcagLevel};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A violation as reported by axe-core
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxeViolation {
    pub id: String,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub help_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub nodes: Vec<AxeNode>,
}

/// One element affected by a violation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxeNode {
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub target: Vec<String>,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub failure_summary: Option<String>,
}

/// An automated accessibility engine run against the same document
pub trait AutomatedEngine: Send + Sync {
    /// Engine name for diagnostics
    fn name(&self) -> &str;

    /// Run the engine and return its violations
    fn run(&self, document: &Document) -> Result<Vec<AxeViolation>>;
}

/// Replays violations produced by an earlier axe run (e.g. a saved
/// `axe.run()` JSON result).
pub struct RecordedResults {
    violations: Vec<AxeViolation>,
}

impl RecordedResults {
    pub fn new(violations: Vec<AxeViolation>) -> Self {
        Self { violations }
    }

    /// Parse a full axe result object (`{"violations": [...]}`) or a bare
    /// violation array
    pub fn from_json(json: &str) -> Result<Self> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Payload {
            Full { violations: Vec<AxeViolation> },
            Bare(Vec<AxeViolation>),
        }

        let violations = match serde_json::from_str::<Payload>(json)? {
            Payload::Full { violations } => violations,
            Payload::Bare(violations) => violations,
        };
        Ok(Self::new(violations))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

impl AutomatedEngine for RecordedResults {
    fn name(&self) -> &str {
        "axe-core (recorded)"
    }

    fn run(&self, _document: &Document) -> Result<Vec<AxeViolation>> {
        Ok(self.violations.clone())
    }
}

/// Translate one violation into an issue.
///
/// The impact comes from the first affected node, falling back to the
/// violation's own impact.
pub fn translate(violation: &AxeViolation) -> Issue {
    let first = violation.nodes.first();
    let impact = first
        .and_then(|n| n.impact.as_deref())
        .or(violation.impact.as_deref())
        .and_then(Impact::parse);

    let issue_type = match impact {
        Some(Impact::Critical) | Some(Impact::Serious) => IssueType::Error,
        Some(Impact::Moderate) => IssueType::Warning,
        Some(Impact::Minor) | None => IssueType::Info,
    };

    let message = if violation.help.is_empty() {
        &violation.description
    } else {
        &violation.help
    };

    let mut issue = Issue::new(issue_type, &violation.id, message).with_standard(Standard::Axe);
    if let Some(node) = first {
        if !node.html.is_empty() {
            issue = issue.with_element(&node.html);
        }
        if !node.target.is_empty() {
            issue = issue.with_selector(&node.target.join(" "));
        }
    }
    if let Some(level) = level_from_tags(&violation.tags) {
        issue = issue.with_level(level);
    }
    if let Some(impact) = impact {
        issue = issue.with_impact(impact);
    }
    issue
}

/// Conformance level from axe tags such as `wcag2aa` or `wcag21a`
fn level_from_tags(tags: &[String]) -> Option<WcagLevel> {
    tags.iter().find_map(|tag| {
        let rest = tag.strip_prefix("wcag")?;
        let suffix = rest.trim_start_matches(|c: char| c.is_ascii_digit());
        if suffix.len() == rest.len() {
            return None;
        }
        match suffix {
            "a" => Some(WcagLevel::A),
            "aa" => Some(WcagLevel::AA),
            "aaa" => Some(WcagLevel::AAA),
            _ => None,
        }
    })
}

/// Run an engine and translate its output, mapping failures to
/// [`EngineError::Engine`]
pub fn collect_issues(engine: &dyn AutomatedEngine, document: &Document) -> Result<Vec<Issue>> {
    let violations = engine.run(document).map_err(|e| EngineError::Engine {
        engine: engine.name().to_string(),
        message: e.to_string(),
    })?;
    Ok(violations.iter().map(translate).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const AXE_RESULT: &str = r##"{
        "violations": [
            {
                "id": "color-contrast",
                "impact": "serious",
                "description": "Ensures the contrast between foreground and background colors meets WCAG 2 AA",
                "help": "Elements must have sufficient color contrast",
                "helpUrl": "https://dequeuniversity.com/rules/axe/4.8/color-contrast",
                "tags": ["cat.color", "wcag2aa", "wcag143"],
                "nodes": [
                    {"html": "<p class=\"muted\">x</p>", "target": ["main", ".muted"], "impact": "moderate"}
                ]
            },
            {
                "id": "region",
                "description": "Ensures all page content is contained by landmarks",
                "tags": ["best-practice"],
                "nodes": []
            }
        ]
    }"##;

    #[test]
    fn test_parse_full_result() {
        let engine = RecordedResults::from_json(AXE_RESULT).expect("valid axe JSON");
        let doc = Document::parse("<p>x</p>").expect("parse");
        let violations = engine.run(&doc).expect("run");
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].tags.len(), 3);
    }

    #[test]
    fn test_parse_bare_array() {
        let engine = RecordedResults::from_json(r#"[{"id": "image-alt"}]"#).expect("valid");
        let doc = Document::parse("<p>x</p>").expect("parse");
        assert_eq!(engine.run(&doc).expect("run").len(), 1);
    }

    #[test]
    fn test_translate_uses_first_node_impact() {
        let engine = RecordedResults::from_json(AXE_RESULT).expect("valid axe JSON");
        let issue = translate(&engine.violations[0]);
        assert_eq!(issue.standard, Standard::Axe);
        assert_eq!(issue.rule, "color-contrast");
        assert_eq!(issue.impact, Some(Impact::Moderate));
        assert_eq!(issue.issue_type, IssueType::Warning);
        assert_eq!(issue.level, Some(WcagLevel::AA));
        assert_eq!(issue.selector.as_deref(), Some("main .muted"));
        assert_eq!(issue.message, "Elements must have sufficient color contrast");
    }

    #[test]
    fn test_translate_without_nodes() {
        let engine = RecordedResults::from_json(AXE_RESULT).expect("valid axe JSON");
        let issue = translate(&engine.violations[1]);
        assert_eq!(issue.impact, None);
        assert_eq!(issue.issue_type, IssueType::Info);
        assert!(issue.level.is_none());
        assert!(issue.element.is_none());
        assert!(issue.message.starts_with("Ensures all page content"));
    }

    #[test]
    fn test_level_from_tags() {
        let tags = |t: &[&str]| t.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(level_from_tags(&tags(&["wcag2a"])), Some(WcagLevel::A));
        assert_eq!(level_from_tags(&tags(&["wcag21aa"])), Some(WcagLevel::AA));
        assert_eq!(level_from_tags(&tags(&["wcag2aaa"])), Some(WcagLevel::AAA));
        assert_eq!(level_from_tags(&tags(&["wcag143", "cat.color"])), None);
        assert_eq!(level_from_tags(&tags(&["wcagaa"])), None);
    }
}
