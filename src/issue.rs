// SPDX-License-Identifier: PMPL-1.0-or-later
//! Issue model and aggregation.
//!
//! Every rule, the automated engine adapter and the executor speak in
//! terms of [`Issue`]. An [`EvaluationResult`] bundles the merged issue
//! list with its [`Summary`] counts and the names of rules that passed.

use crate::error::EngineError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Issue severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    /// Conformance failure
    Error,
    /// Likely problem that needs review
    Warning,
    /// Informational
    Info,
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueType::Error => write!(f, "error"),
            IssueType::Warning => write!(f, "warning"),
            IssueType::Info => write!(f, "info"),
        }
    }
}

/// Standard an issue is reported against
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Standard {
    Wcag,
    Aria,
    Mdn,
    Axe,
}

impl std::fmt::Display for Standard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Standard::Wcag => write!(f, "WCAG"),
            Standard::Aria => write!(f, "ARIA"),
            Standard::Mdn => write!(f, "MDN"),
            Standard::Axe => write!(f, "AXE"),
        }
    }
}

/// WCAG conformance level, ordered A < AA < AAA
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum WcagLevel {
    /// Level A - minimum conformance
    A,
    /// Level AA - standard conformance
    #[default]
    AA,
    /// Level AAA - enhanced conformance
    AAA,
}

impl WcagLevel {
    /// All levels in ascending order
    pub const ALL: [WcagLevel; 3] = [WcagLevel::A, WcagLevel::AA, WcagLevel::AAA];

    /// Levels from A up to and including `self`
    pub fn up_to(self) -> impl Iterator<Item = WcagLevel> {
        Self::ALL.into_iter().filter(move |l| *l <= self)
    }
}

impl std::fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WcagLevel::A => write!(f, "A"),
            WcagLevel::AA => write!(f, "AA"),
            WcagLevel::AAA => write!(f, "AAA"),
        }
    }
}

impl FromStr for WcagLevel {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(WcagLevel::A),
            "AA" => Ok(WcagLevel::AA),
            "AAA" => Ok(WcagLevel::AAA),
            _ => Err(EngineError::InvalidLevel(s.to_string())),
        }
    }
}

// Config files accept the same spellings as the CLI ("aa", " AAA ")
impl<'de> Deserialize<'de> for WcagLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// User impact of an issue, ordered minor < moderate < serious < critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Minor,
    Moderate,
    Serious,
    Critical,
}

impl Impact {
    /// Parse an impact keyword as emitted by automated engines
    pub fn parse(s: &str) -> Option<Impact> {
        match s.trim().to_lowercase().as_str() {
            "minor" => Some(Impact::Minor),
            "moderate" => Some(Impact::Moderate),
            "serious" => Some(Impact::Serious),
            "critical" => Some(Impact::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Impact::Minor => write!(f, "minor"),
            Impact::Moderate => write!(f, "moderate"),
            Impact::Serious => write!(f, "serious"),
            Impact::Critical => write!(f, "critical"),
        }
    }
}

/// A single accessibility issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    /// Rule identifier, e.g. "WCAG 1.1.1" or an automated engine rule id
    pub rule: String,
    pub message: String,
    /// Opening-tag snippet of the offending element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    pub standard: Standard,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<WcagLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<Impact>,
}

impl Issue {
    /// Create a new issue reported against WCAG
    pub fn new(issue_type: IssueType, rule: &str, message: &str) -> Self {
        Self {
            issue_type,
            rule: rule.to_string(),
            message: message.to_string(),
            element: None,
            selector: None,
            standard: Standard::Wcag,
            level: None,
            impact: None,
        }
    }

    pub fn error(rule: &str, message: &str) -> Self {
        Self::new(IssueType::Error, rule, message)
    }

    pub fn warning(rule: &str, message: &str) -> Self {
        Self::new(IssueType::Warning, rule, message)
    }

    pub fn info(rule: &str, message: &str) -> Self {
        Self::new(IssueType::Info, rule, message)
    }

    /// Set the element snippet
    pub fn with_element(mut self, element: &str) -> Self {
        self.element = Some(element.to_string());
        self
    }

    /// Set the selector locating the element
    pub fn with_selector(mut self, selector: &str) -> Self {
        self.selector = Some(selector.to_string());
        self
    }

    pub fn with_standard(mut self, standard: Standard) -> Self {
        self.standard = standard;
        self
    }

    pub fn with_level(mut self, level: WcagLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_impact(mut self, impact: Impact) -> Self {
        self.impact = Some(impact);
        self
    }

    /// WCAG criterion id encoded in the rule name ("WCAG 1.3.1" -> "1.3.1")
    pub fn wcag_criterion(&self) -> Option<&str> {
        self.rule
            .strip_prefix("WCAG ")
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// Aggregate counts over an issue list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_issues: usize,
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
    pub by_standard: BTreeMap<String, usize>,
    pub by_impact: BTreeMap<String, usize>,
}

impl Summary {
    /// Compute counts by type, standard and impact
    pub fn from_issues(issues: &[Issue]) -> Self {
        let mut summary = Summary {
            total_issues: issues.len(),
            ..Summary::default()
        };

        for issue in issues {
            match issue.issue_type {
                IssueType::Error => summary.errors += 1,
                IssueType::Warning => summary.warnings += 1,
                IssueType::Info => summary.info += 1,
            }
            *summary
                .by_standard
                .entry(issue.standard.to_string())
                .or_insert(0) += 1;
            if let Some(impact) = issue.impact {
                *summary.by_impact.entry(impact.to_string()).or_insert(0) += 1;
            }
        }

        summary
    }
}

/// A rule that faulted during execution. The rest of the batch still ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleFault {
    pub rule: String,
    pub message: String,
}

/// Outcome of one evaluation call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub issues: Vec<Issue>,
    pub summary: Summary,
    /// Rules that produced zero issues, as "<Standard>: <rule-name> (<criterion>)"
    pub passed_checks: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub faults: Vec<RuleFault>,
    pub evaluated_at: DateTime<Utc>,
}

impl EvaluationResult {
    /// Build a result, computing the summary from `issues`
    pub fn new(issues: Vec<Issue>, passed_checks: Vec<String>, faults: Vec<RuleFault>) -> Self {
        let summary = Summary::from_issues(&issues);
        Self {
            issues,
            summary,
            passed_checks,
            faults,
            evaluated_at: Utc::now(),
        }
    }

    pub fn by_type(&self, issue_type: IssueType) -> Vec<&Issue> {
        self.issues.iter().filter(|i| i.issue_type == issue_type).collect()
    }

    pub fn errors(&self) -> Vec<&Issue> {
        self.by_type(IssueType::Error)
    }

    pub fn warnings(&self) -> Vec<&Issue> {
        self.by_type(IssueType::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.summary.errors > 0
    }

    /// Issues reported under a given rule name
    pub fn for_rule(&self, rule: &str) -> Vec<&Issue> {
        self.issues.iter().filter(|i| i.rule == rule).collect()
    }
}
