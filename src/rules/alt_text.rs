// SPDX-License-Identifier: PMPL-1.0-or-later
//! images-alt-text - WCAG 1.1.1 Non-text Content (Level A)
//!
//! Every `<img>` needs an `alt` attribute. `alt=""` marks a decorative
//! image and is compliant, as is an image explicitly removed from the
//! accessibility tree with `role="presentation"` or `role="none"`.

use crate::dom::{self, Document};
use crate::error::Result;
use crate::issue::{Impact, Issue, WcagLevel};
use crate::rules::Rule;

/// Roles that take an image out of the accessibility tree
const PRESENTATIONAL_ROLES: &[&str] = &["presentation", "none"];

/// Rule checking `<img>` elements for an alt attribute
pub struct ImagesAltText;

impl Rule for ImagesAltText {
    fn name(&self) -> &str {
        "images-alt-text"
    }

    fn description(&self) -> &str {
        "Checks <img> elements for an alt attribute (WCAG 1.1.1)"
    }

    fn criterion(&self) -> Option<&str> {
        Some("1.1.1")
    }

    fn check(&self, document: &Document) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();

        for img in document.select("img")? {
            if img.value().attr("alt").is_some() {
                continue;
            }
            let presentational = dom::explicit_role(&img)
                .is_some_and(|role| PRESENTATIONAL_ROLES.contains(&role.as_str()));
            if presentational {
                continue;
            }

            issues.push(
                Issue::error(
                    "WCAG 1.1.1",
                    "Image is missing alt attribute. Add alt=\"description\" for informative images or alt=\"\" for decorative images.",
                )
                .with_element(&dom::describe(&img))
                .with_selector(&dom::css_path(&img))
                .with_level(WcagLevel::A)
                .with_impact(Impact::Critical),
            );
        }

        Ok(issues)
    }
}
