// SPDX-License-Identifier: PMPL-1.0-or-later
//! headings-structure - WCAG 1.3.1 Info and Relationships (Level A)
//!
//! Walks h1-h6 in document order and flags a heading whose level jumps
//! more than one step below the heading immediately before it. Only the
//! preceding heading is consulted; the outline as a whole is not
//! validated. The first heading sets the baseline.

use crate::dom::{self, Document};
use crate::error::Result;
use crate::issue::{Impact, Issue, WcagLevel};
use crate::rules::Rule;

/// Rule checking heading level continuity
pub struct HeadingsStructure;

impl Rule for HeadingsStructure {
    fn name(&self) -> &str {
        "headings-structure"
    }

    fn description(&self) -> &str {
        "Checks that heading levels are not skipped (WCAG 1.3.1)"
    }

    fn criterion(&self) -> Option<&str> {
        Some("1.3.1")
    }

    fn check(&self, document: &Document) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();
        let mut last_level: Option<u8> = None;

        for heading in document.select("h1, h2, h3, h4, h5, h6")? {
            let Some(level) = heading
                .value()
                .name()
                .strip_prefix('h')
                .and_then(|n| n.parse::<u8>().ok())
            else {
                continue;
            };

            if let Some(prev) = last_level {
                if level > prev + 1 {
                    issues.push(
                        Issue::warning(
                            "WCAG 1.3.1",
                            &format!(
                                "Heading levels should only increase by one: found h{} after h{}. Use h{} or add the intermediate levels.",
                                level,
                                prev,
                                prev + 1
                            ),
                        )
                        .with_element(&dom::describe(&heading))
                        .with_selector(&dom::css_path(&heading))
                        .with_level(WcagLevel::A)
                        .with_impact(Impact::Moderate),
                    );
                }
            }
            last_level = Some(level);
        }

        Ok(issues)
    }
}
