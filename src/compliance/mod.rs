// SPDX-License-Identifier: PMPL-1.0-or-later
//! Compliance calculator.
//!
//! Maps an [`EvaluationResult`] onto the WCAG criteria catalog for a target
//! level. Each applicable criterion is classified as passed, failed or not
//! applicable; the report carries the achieved conformance level and
//! percentage scores overall and per principle.
//!
//! ## Level determination
//!
//! Levels are walked from A up to the target. The first level with a
//! failed criterion caps the result at the level below it (a failure at A
//! yields [`AchievedLevel::None`]). Without failures, a level is claimed
//! only when it and every level below it have at least one passed
//! criterion.

pub mod recommendations;

pub use recommendations::Recommendation;

use crate::config::Config;
use crate::error::Result;
use crate::issue::{EvaluationResult, WcagLevel};
use crate::wcag::{self, Principle, WcagCriterion};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info};

/// Conformance level reached by a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AchievedLevel {
    None,
    A,
    AA,
    AAA,
}

impl AchievedLevel {
    /// The level reached when `failed` is the lowest failing level
    fn below(failed: WcagLevel) -> AchievedLevel {
        match failed {
            WcagLevel::A => AchievedLevel::None,
            WcagLevel::AA => AchievedLevel::A,
            WcagLevel::AAA => AchievedLevel::AA,
        }
    }
}

impl From<WcagLevel> for AchievedLevel {
    fn from(level: WcagLevel) -> Self {
        match level {
            WcagLevel::A => AchievedLevel::A,
            WcagLevel::AA => AchievedLevel::AA,
            WcagLevel::AAA => AchievedLevel::AAA,
        }
    }
}

impl fmt::Display for AchievedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AchievedLevel::None => write!(f, "None"),
            AchievedLevel::A => write!(f, "A"),
            AchievedLevel::AA => write!(f, "AA"),
            AchievedLevel::AAA => write!(f, "AAA"),
        }
    }
}

/// Percentage scores per WCAG principle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrincipleScores {
    pub perceivable: u32,
    pub operable: u32,
    pub understandable: u32,
    pub robust: u32,
}

impl PrincipleScores {
    pub fn get(&self, principle: Principle) -> u32 {
        match principle {
            Principle::Perceivable => self.perceivable,
            Principle::Operable => self.operable,
            Principle::Understandable => self.understandable,
            Principle::Robust => self.robust,
        }
    }

    fn set(&mut self, principle: Principle, score: u32) {
        match principle {
            Principle::Perceivable => self.perceivable = score,
            Principle::Operable => self.operable = score,
            Principle::Understandable => self.understandable = score,
            Principle::Robust => self.robust = score,
        }
    }
}

/// Compliance verdict for one evaluation at one target level
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub level: AchievedLevel,
    pub target_level: WcagLevel,
    pub passed_criteria: Vec<&'static WcagCriterion>,
    pub failed_criteria: Vec<&'static WcagCriterion>,
    pub not_applicable_criteria: Vec<&'static WcagCriterion>,
    /// 0-100
    pub overall_score: u32,
    pub detailed_scores: PrincipleScores,
}

impl ComplianceReport {
    /// Whether the target level was reached
    pub fn meets_target(&self) -> bool {
        self.level >= AchievedLevel::from(self.target_level)
    }

    pub fn applicable_count(&self) -> usize {
        self.passed_criteria.len() + self.failed_criteria.len() + self.not_applicable_criteria.len()
    }

    /// One remediation block per failed criterion
    pub fn recommendations(&self) -> Vec<Recommendation> {
        self.failed_criteria.iter().map(|c| recommendations::recommend(c)).collect()
    }
}

/// Derives [`ComplianceReport`]s from evaluation results
#[derive(Debug, Clone, Default)]
pub struct ComplianceCalculator {
    config: Config,
}

impl ComplianceCalculator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Enabled catalog criteria at or below `target`
    pub fn applicable_criteria(&self, target: WcagLevel) -> Vec<&'static WcagCriterion> {
        wcag::criteria_up_to(target)
            .filter(|c| self.config.is_criterion_enabled(c.id))
            .collect()
    }

    /// Calculate compliance at the configured target level
    pub fn calculate_configured(&self, result: &EvaluationResult) -> ComplianceReport {
        self.calculate(result, self.config.wcag.level)
    }

    /// Calculate compliance for a level given as text (`A`, `AA`, `AAA`).
    ///
    /// Any other value is rejected with [`EngineError::InvalidLevel`](crate::error::EngineError::InvalidLevel).
    pub fn calculate_for_level(&self, result: &EvaluationResult, level: &str) -> Result<ComplianceReport> {
        let target: WcagLevel = level.parse()?;
        Ok(self.calculate(result, target))
    }

    pub fn calculate(&self, result: &EvaluationResult, target: WcagLevel) -> ComplianceReport {
        let failing_ids: HashSet<&str> = result.issues.iter().filter_map(|i| i.wcag_criterion()).collect();

        let mut passed = Vec::new();
        let mut failed = Vec::new();
        let mut not_applicable = Vec::new();

        for criterion in self.applicable_criteria(target) {
            if failing_ids.contains(criterion.id) {
                failed.push(criterion);
            } else if result.passed_checks.iter().any(|check| matches_check(criterion, check)) {
                passed.push(criterion);
            } else {
                not_applicable.push(criterion);
            }
        }
        debug!(
            "Classified {} criteria at {}: {} passed, {} failed, {} not applicable",
            passed.len() + failed.len() + not_applicable.len(),
            target,
            passed.len(),
            failed.len(),
            not_applicable.len()
        );

        let level = determine_level(target, &passed, &failed);
        let overall_score = score(passed.len(), failed.len());

        let mut detailed_scores = PrincipleScores::default();
        for principle in Principle::ALL {
            let p = passed.iter().filter(|c| c.principle == principle).count();
            let f = failed.iter().filter(|c| c.principle == principle).count();
            detailed_scores.set(principle, score(p, f));
        }

        info!("Compliance at target {}: level {}, score {}", target, level, overall_score);

        ComplianceReport {
            level,
            target_level: target,
            passed_criteria: passed,
            failed_criteria: failed,
            not_applicable_criteria: not_applicable,
            overall_score,
            detailed_scores,
        }
    }
}

fn determine_level(
    target: WcagLevel,
    passed: &[&WcagCriterion],
    failed: &[&WcagCriterion],
) -> AchievedLevel {
    if let Some(lowest) = target.up_to().find(|l| failed.iter().any(|c| c.level == *l)) {
        return AchievedLevel::below(lowest);
    }

    let mut achieved = AchievedLevel::None;
    for level in target.up_to() {
        if !passed.iter().any(|c| c.level == level) {
            break;
        }
        achieved = level.into();
    }
    achieved
}

/// `round(100 * passed / (passed + failed))`, 0 when nothing was tested
fn score(passed: usize, failed: usize) -> u32 {
    let tested = passed + failed;
    if tested == 0 {
        return 0;
    }
    (100.0 * passed as f64 / tested as f64).round() as u32
}

/// Whether a passed-check entry names the criterion, by id or kebab-case name
fn matches_check(criterion: &WcagCriterion, check: &str) -> bool {
    contains_id(check, criterion.id) || check.to_lowercase().contains(&criterion.kebab_name())
}

/// Substring match on a criterion id that does not split a longer id
/// (`1.4.1` is not found in `1.4.11`)
fn contains_id(haystack: &str, id: &str) -> bool {
    haystack.match_indices(id).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let mut after = haystack[start + id.len()..].chars();
        let next = after.next();
        let continues_before = before.is_some_and(|c| c.is_ascii_digit() || c == '.');
        let continues_after = match next {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => after.next().is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        };
        !continues_before && !continues_after
    })
}
