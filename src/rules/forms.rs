// SPDX-License-Identifier: PMPL-1.0-or-later
//! form-labels - WCAG 1.3.1 Info and Relationships (Level A)
//!
//! Every `input`, `select` and `textarea` (other than submit, button and
//! hidden inputs) needs a programmatic label: a `<label for>` matching its
//! `id`, an `aria-label`, or an `aria-labelledby`.

use crate::dom::{self, Document};
use crate::error::Result;
use crate::issue::{Impact, Issue, WcagLevel};
use crate::rules::Rule;
use std::collections::HashSet;

/// Input types that do not need a label
const EXEMPT_INPUT_TYPES: &[&str] = &["submit", "button", "hidden"];

/// Rule checking form controls for an associated label
pub struct FormLabels;

impl Rule for FormLabels {
    fn name(&self) -> &str {
        "form-labels"
    }

    fn description(&self) -> &str {
        "Checks that form controls have an associated label (WCAG 1.3.1)"
    }

    fn criterion(&self) -> Option<&str> {
        Some("1.3.1")
    }

    fn check(&self, document: &Document) -> Result<Vec<Issue>> {
        let label_fors: HashSet<&str> = document
            .select("label[for]")?
            .into_iter()
            .filter_map(|l| l.value().attr("for"))
            .collect();

        let mut issues = Vec::new();

        for control in document.select("input, select, textarea")? {
            let element = control.value();

            if element.name() == "input" {
                let input_type = element.attr("type").unwrap_or("text").to_lowercase();
                if EXEMPT_INPUT_TYPES.contains(&input_type.as_str()) {
                    continue;
                }
            }

            let has_label = element.id().is_some_and(|id| label_fors.contains(id));
            let has_aria_label = element.attr("aria-label").is_some()
                || element.attr("aria-labelledby").is_some();

            if !has_label && !has_aria_label {
                issues.push(
                    Issue::error(
                        "WCAG 1.3.1",
                        &format!(
                            "<{}> has no associated label. Form controls need a <label for>, aria-label, or aria-labelledby.",
                            element.name()
                        ),
                    )
                    .with_element(&dom::describe(&control))
                    .with_selector(&dom::css_path(&control))
                    .with_level(WcagLevel::A)
                    .with_impact(Impact::Critical),
                );
            }
        }

        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::IssueType;

    fn check(html: &str) -> Vec<Issue> {
        let document = Document::parse(html).expect("parse");
        FormLabels.check(&document).expect("check")
    }

    #[test]
    fn test_labelled_controls() {
        let issues = check(
            r#"
            <html><body><form>
                <label for="name">Name:</label>
                <input type="text" id="name">
                <input type="search" aria-label="Search">
                <span id="lbl">Country</span>
                <select aria-labelledby="lbl"><option>NL</option></select>
                <label for="bio">Bio</label>
                <textarea id="bio"></textarea>
            </form></body></html>
        "#,
        );
        assert!(issues.is_empty(), "Expected no issues: {:?}", issues);
    }

    #[test]
    fn test_unlabelled_controls() {
        let issues = check(
            r#"
            <html><body><form>
                <input type="text">
                <select><option>a</option></select>
                <textarea></textarea>
            </form></body></html>
        "#,
        );
        assert_eq!(issues.len(), 3);
        for issue in &issues {
            assert_eq!(issue.issue_type, IssueType::Error);
            assert_eq!(issue.rule, "WCAG 1.3.1");
            assert_eq!(issue.impact, Some(Impact::Critical));
        }
    }

    #[test]
    fn test_label_for_must_match_id() {
        let issues = check(r#"<label for="other">Name</label><input type="text" id="name">"#);
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn test_exempt_input_types() {
        let issues = check(
            r#"
            <form>
                <input type="hidden" name="csrf" value="token123">
                <input type="submit" value="Send">
                <input type="BUTTON" value="Go">
            </form>
        "#,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_reset_input_needs_label() {
        let issues = check(r#"<input type="reset">"#);
        assert_eq!(issues.len(), 1);
    }
}
