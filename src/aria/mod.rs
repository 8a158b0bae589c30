// SPDX-License-Identifier: PMPL-1.0-or-later
//! ARIA validator - WAI-ARIA 1.2 role and property constraints
//!
//! Runs over one document and checks, in order:
//! - role legality (unknown and abstract roles)
//! - required states and properties per role
//! - required context roles (containment) and required owned roles
//! - property values and id references
//! - redundant roles on native elements
//! - `aria-hidden` content that is still focusable
//! - landmark uniqueness
//!
//! The validator keeps no state between calls; validating the same
//! document twice yields identical results.

pub mod properties;
pub mod roles;

use crate::config::AriaConfig;
use crate::dom::{self, Document};
use scraper::ElementRef;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info};

const ARIA_SPEC_URL: &str = "https://www.w3.org/TR/wai-aria-1.2/";

/// Native elements and the implicit role that makes an explicit one redundant
const REDUNDANT_ROLES: &[(&str, &str)] = &[
    ("button", "button"),
    ("nav", "navigation"),
    ("main", "main"),
    ("aside", "complementary"),
];

/// Landmarks that may repeat only when every instance is labelled
const LABELLED_LANDMARKS: &[&str] = &["navigation", "complementary", "banner", "contentinfo"];

/// Severity of an ARIA issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AriaIssueType {
    Error,
    Warning,
}

/// A single ARIA finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AriaIssue {
    #[serde(rename = "type")]
    pub issue_type: AriaIssueType,
    pub element: String,
    pub selector: String,
    pub message: String,
    pub recommendation: String,
    /// Section of WAI-ARIA the check derives from
    pub specification: String,
}

/// Usage statistics collected while validating
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AriaStatistics {
    #[serde(rename = "totalARIAElements")]
    pub total_aria_elements: usize,
    pub roles_used: BTreeSet<String>,
    pub properties_used: BTreeSet<String>,
    pub states_used: BTreeSet<String>,
}

/// Outcome of one validation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AriaValidationResult {
    pub issues: Vec<AriaIssue>,
    pub valid_usages: Vec<String>,
    pub statistics: AriaStatistics,
}

impl AriaValidationResult {
    pub fn errors(&self) -> Vec<&AriaIssue> {
        self.issues.iter().filter(|i| i.issue_type == AriaIssueType::Error).collect()
    }

    pub fn warnings(&self) -> Vec<&AriaIssue> {
        self.issues.iter().filter(|i| i.issue_type == AriaIssueType::Warning).collect()
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.issue_type == AriaIssueType::Error)
    }
}

/// Validates ARIA usage in a document
#[derive(Debug, Clone, Default)]
pub struct AriaValidator {
    config: AriaConfig,
}

/// Accumulates issues for a single run
struct Run<'d> {
    document: &'d Document,
    ids: HashSet<&'d str>,
    result: AriaValidationResult,
}

impl<'d> Run<'d> {
    fn push(
        &mut self,
        issue_type: AriaIssueType,
        el: &ElementRef<'_>,
        message: String,
        recommendation: &str,
        section: &str,
    ) {
        self.result.issues.push(AriaIssue {
            issue_type,
            element: dom::describe(el),
            selector: dom::css_path(el),
            message,
            recommendation: recommendation.to_string(),
            specification: format!("WAI-ARIA 1.2 {}{}", ARIA_SPEC_URL, section),
        });
    }
}

impl AriaValidator {
    pub fn new(config: AriaConfig) -> Self {
        Self { config }
    }

    /// Validate every ARIA role and property in the document
    pub fn validate(&self, document: &Document) -> AriaValidationResult {
        let ids: HashSet<&str> = document.elements().filter_map(|el| el.value().id()).collect();
        let mut run = Run {
            document,
            ids,
            result: AriaValidationResult::default(),
        };

        debug!("Checking roles");
        self.check_roles(&mut run);
        debug!("Checking properties");
        self.check_properties(&mut run);
        debug!("Checking redundant roles");
        check_redundant_roles(&mut run);
        debug!("Checking hidden focusable content");
        check_hidden_focusable(&mut run);
        debug!("Checking landmarks");
        check_landmarks(&mut run);

        run.result.statistics.total_aria_elements = document
            .elements()
            .filter(|el| {
                el.value().attr("role").is_some()
                    || el.value().attrs().any(|(name, _)| properties::is_property(name))
            })
            .count();

        info!(
            "ARIA validation finished: {} issue(s) across {} ARIA element(s)",
            run.result.issues.len(),
            run.result.statistics.total_aria_elements
        );
        run.result
    }

    fn check_roles(&self, run: &mut Run<'_>) {
        let document = run.document;
        for el in document.elements() {
            let Some(raw_role) = el.value().attr("role") else {
                continue;
            };
            let Some(role) = dom::explicit_role(&el) else {
                run.push(
                    AriaIssueType::Error,
                    &el,
                    "Empty role attribute".to_string(),
                    "Give the role attribute a WAI-ARIA 1.2 role or remove it",
                    "#role_definitions",
                );
                continue;
            };
            run.result.statistics.roles_used.insert(role.clone());

            let Some(spec) = roles::role_spec(&role) else {
                run.push(
                    AriaIssueType::Error,
                    &el,
                    format!("Invalid ARIA role \"{}\"", raw_role.trim()),
                    "Use a role defined in WAI-ARIA 1.2 or remove the role attribute",
                    "#role_definitions",
                );
                continue;
            };

            if spec.is_abstract() {
                run.push(
                    AriaIssueType::Error,
                    &el,
                    format!("Abstract ARIA role \"{}\" must not be used in content", role),
                    "Replace the abstract role with one of its concrete subclass roles",
                    "#abstract_roles",
                );
                continue;
            }

            run.result
                .valid_usages
                .push(format!("<{}> uses valid role \"{}\"", el.value().name(), role));

            for prop in &spec.required_properties {
                if el.value().attr(prop).is_none() && !natively_supplied(&el, prop) {
                    run.push(
                        AriaIssueType::Error,
                        &el,
                        format!("Role \"{}\" requires attribute \"{}\"", role, prop),
                        &format!("Add {} to the element", prop),
                        &format!("#{}", role),
                    );
                }
            }

            if let Some(parents) = &spec.required_parent {
                let contained = dom::ancestors(&el)
                    .any(|a| effective_role(&a).is_some_and(|r| parents.contains(r.as_str())));
                if !contained {
                    let wanted = parents.iter().copied().collect::<Vec<_>>().join("\" or \"");
                    run.push(
                        AriaIssueType::Error,
                        &el,
                        format!(
                            "Element with role \"{}\" must be contained in an element with role \"{}\"",
                            role, wanted
                        ),
                        &format!("Wrap the element in a container with role=\"{}\"", wanted),
                        "#scope",
                    );
                }
            }

            if self.config.required_children {
                if let Some(children) = &spec.required_children {
                    let owns_child = dom::descendants(&el)
                        .any(|d| effective_role(&d).is_some_and(|r| children.contains(r.as_str())));
                    if !owns_child {
                        let wanted = children.iter().copied().collect::<Vec<_>>().join("\" or \"");
                        run.push(
                            AriaIssueType::Warning,
                            &el,
                            format!(
                                "Element with role \"{}\" contains no element with role \"{}\"",
                                role, wanted
                            ),
                            &format!("Add owned elements with role=\"{}\"", wanted),
                            "#mustContain",
                        );
                    }
                }
            }
        }
    }

    fn check_properties(&self, run: &mut Run<'_>) {
        let document = run.document;
        for el in document.elements() {
            for (name, value) in el.value().attrs() {
                if !name.starts_with("aria-") {
                    continue;
                }

                if !properties::is_property(name) {
                    if self.config.unknown_attributes {
                        run.push(
                            AriaIssueType::Warning,
                            &el,
                            format!("Unknown ARIA attribute \"{}\"", name),
                            "Check the attribute name for typos or remove it",
                            "#state_prop_def",
                        );
                    }
                    continue;
                }

                run.result.statistics.properties_used.insert(name.to_string());
                if properties::is_state(name) {
                    run.result.statistics.states_used.insert(name.to_string());
                }

                let value = value.trim();
                if value.is_empty() {
                    run.push(
                        AriaIssueType::Warning,
                        &el,
                        format!("Empty value for \"{}\"", name),
                        &format!("Provide a value for {} or remove the attribute", name),
                        &format!("#{}", name),
                    );
                    continue;
                }

                if let Some(allowed) = properties::allowed_values(name) {
                    if !allowed.contains(&value.to_lowercase().as_str()) {
                        run.push(
                            AriaIssueType::Warning,
                            &el,
                            format!("Invalid value \"{}\" for \"{}\"", value, name),
                            &format!("Use one of: {}", allowed.join(", ")),
                            &format!("#{}", name),
                        );
                    }
                }

                if properties::is_id_reference(name) {
                    for id in value.split_whitespace() {
                        if !run.ids.contains(id) {
                            run.push(
                                AriaIssueType::Error,
                                &el,
                                format!("{} references non-existent ID \"{}\"", name, id),
                                &format!("Add an element with id=\"{}\" or fix the reference", id),
                                &format!("#{}", name),
                            );
                        }
                    }
                }
            }
        }
    }
}

/// Required properties a native element already provides, e.g. the level of `<h2>`
fn natively_supplied(el: &ElementRef<'_>, prop: &str) -> bool {
    let tag = el.value().name();
    prop == "aria-level" && matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

/// Explicit role, falling back to the implicit role of the native element
fn effective_role(el: &ElementRef<'_>) -> Option<String> {
    dom::explicit_role(el).or_else(|| {
        let element = el.value();
        roles::implicit_role(element.name(), element.attr("href").is_some()).map(str::to_string)
    })
}

fn check_redundant_roles(run: &mut Run<'_>) {
    let document = run.document;
    for el in document.elements() {
        let tag = el.value().name();
        let Some(role) = dom::explicit_role(&el) else {
            continue;
        };
        if REDUNDANT_ROLES.iter().any(|(t, r)| *t == tag && *r == role) {
            run.push(
                AriaIssueType::Warning,
                &el,
                format!("Redundant role \"{}\" on <{}> element", role, tag),
                &format!("Remove role=\"{}\"; <{}> already has this role", role, tag),
                "#implicit_semantics",
            );
        }
    }
}

fn check_hidden_focusable(run: &mut Run<'_>) {
    let document = run.document;
    for el in document.elements() {
        let hidden = el
            .value()
            .attr("aria-hidden")
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));
        if !hidden {
            continue;
        }

        let message = if dom::is_focusable(&el) {
            "Focusable element has aria-hidden=\"true\""
        } else if dom::has_focusable_descendant(&el) {
            "Element with aria-hidden=\"true\" contains focusable content"
        } else {
            continue;
        };

        run.push(
            AriaIssueType::Error,
            &el,
            message.to_string(),
            "Remove aria-hidden=\"true\" or take the content out of the tab order with tabindex=\"-1\"",
            "#aria-hidden",
        );
    }
}

fn with_role<'a>(document: &'a Document, role: &str) -> Vec<ElementRef<'a>> {
    document
        .elements()
        .filter(|el| dom::explicit_role(el).as_deref() == Some(role))
        .collect()
}

fn check_landmarks(run: &mut Run<'_>) {
    let document = run.document;
    let mains = with_role(document, "main");
    let mut pending = Vec::new();

    if mains.len() > 1 {
        pending.push((
            AriaIssueType::Error,
            mains[1],
            format!("Multiple main landmarks found ({})", mains.len()),
            "Keep a single element with role=\"main\" per page".to_string(),
        ));
    }

    for landmark in LABELLED_LANDMARKS {
        let found = with_role(document, landmark);
        if found.len() < 2 {
            continue;
        }
        let unlabelled = found
            .iter()
            .filter(|el| {
                el.value().attr("aria-label").is_none() && el.value().attr("aria-labelledby").is_none()
            })
            .count();
        if unlabelled > 0 {
            pending.push((
                AriaIssueType::Warning,
                found[1],
                format!(
                    "Multiple {} landmarks ({}) without unique labels; {} unlabelled",
                    landmark,
                    found.len(),
                    unlabelled
                ),
                format!("Give each {} landmark an aria-label or aria-labelledby", landmark),
            ));
        }
    }

    for (issue_type, el, message, recommendation) in pending {
        run.push(issue_type, &el, message, &recommendation, "#landmark_roles");
    }
}
