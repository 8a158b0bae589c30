// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11y-engine - WCAG/ARIA rule evaluation and compliance scoring
//!
//! Evaluates a parsed HTML document against WCAG success criteria and
//! WAI-ARIA 1.2 constraints, then maps the outcome onto the WCAG 2.1
//! criteria catalog to produce a leveled, scored compliance report.
//!
//! ## Pipeline
//!
//! - **Rules** ([`rules`]): pluggable checks (`images-alt-text`,
//!   `headings-structure`, `form-labels`) run by the [`RuleExecutor`] with
//!   per-rule fault isolation; issues from an automated engine ([`axe`])
//!   are merged before aggregation
//! - **ARIA** ([`aria`]): role legality, required properties, containment,
//!   id references, redundancy, hidden focusable content and landmarks
//! - **Compliance** ([`compliance`]): passed/failed/not-applicable
//!   classification, cascading level determination, per-principle scores
//!   and remediation guidance
//!
//! All catalogs are read-only; evaluations share no mutable state and may
//! run in parallel on different documents.

pub mod aria;
pub mod axe;
pub mod compliance;
pub mod config;
pub mod dom;
pub mod error;
pub mod executor;
pub mod issue;
pub mod rules;
pub mod scanner;
pub mod wcag;

pub use aria::{AriaValidationResult, AriaValidator};
pub use compliance::{AchievedLevel, ComplianceCalculator, ComplianceReport};
pub use config::Config;
pub use dom::Document;
pub use error::{EngineError, Result};
pub use executor::RuleExecutor;
pub use issue::{EvaluationResult, Impact, Issue, IssueType, Standard, WcagLevel};
pub use rules::{Rule, RuleRegistry};
