// SPDX-License-Identifier: PMPL-1.0-or-later
//! Remediation guidance for failed criteria.

use crate::issue::WcagLevel;
use crate::wcag::WcagCriterion;
use serde::Serialize;
use std::fmt;

/// A remediation block for one failed criterion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub criterion_id: &'static str,
    pub criterion_name: &'static str,
    pub level: WcagLevel,
    pub summary: String,
    pub steps: Vec<&'static str>,
    pub techniques: &'static [&'static str],
    pub common_failures: &'static [&'static str],
}

struct Template {
    summary: &'static str,
    steps: &'static [&'static str],
}

fn template(id: &str) -> Option<Template> {
    let t = match id {
        "1.1.1" => Template {
            summary: "Provide a text alternative for every non-text element",
            steps: &[
                "Add an alt attribute describing the purpose of each informative image",
                "Use alt=\"\" for purely decorative images",
                "Give icon-only controls an accessible name with aria-label",
            ],
        },
        "1.3.1" => Template {
            summary: "Expose structure and relationships in markup",
            steps: &[
                "Use h1-h6 in order without skipping levels",
                "Associate every form control with a label via label[for], aria-label or aria-labelledby",
                "Mark up lists, tables and landmarks with their native elements",
            ],
        },
        "1.4.3" => Template {
            summary: "Raise text contrast to at least 4.5:1 (3:1 for large text)",
            steps: &[
                "Measure foreground and background colors of body text",
                "Darken text or lighten backgrounds that fall below the ratio",
                "Always set a background color alongside a foreground color",
            ],
        },
        "2.1.1" => Template {
            summary: "Make all functionality operable from the keyboard",
            steps: &[
                "Use native button and a[href] elements for interactive controls",
                "Add tabindex=\"0\" and key handlers to custom widgets",
                "Pair every mouse-only handler with a keyboard equivalent",
            ],
        },
        "2.4.4" => Template {
            summary: "Make the purpose of each link clear from its text or context",
            steps: &[
                "Replace generic link text such as \"click here\" or \"more\"",
                "Give image links a descriptive alt text",
                "Use aria-label or aria-labelledby when visible text is not enough",
            ],
        },
        "2.4.7" => Template {
            summary: "Keep a visible focus indicator on every focusable element",
            steps: &[
                "Remove outline: none rules that lack a replacement style",
                "Style :focus-visible with a clearly contrasting outline",
            ],
        },
        "3.1.1" => Template {
            summary: "Declare the language of the page",
            steps: &["Add a valid lang attribute to the html element, e.g. <html lang=\"en\">"],
        },
        "3.3.2" => Template {
            summary: "Provide labels or instructions for user input",
            steps: &[
                "Give every input a visible label",
                "Describe required formats next to the field and link them with aria-describedby",
                "Group related controls with fieldset and legend",
            ],
        },
        "4.1.1" => Template {
            summary: "Keep markup well formed",
            steps: &[
                "Close elements properly and nest them according to the content model",
                "Make every id attribute unique on the page",
                "Remove duplicate attributes",
            ],
        },
        "4.1.2" => Template {
            summary: "Expose name, role and value of every user interface component",
            steps: &[
                "Use native elements or give custom widgets a valid ARIA role",
                "Provide the states and properties the role requires",
                "Give every control an accessible name",
            ],
        },
        _ => return None,
    };
    Some(t)
}

const GENERIC_STEPS: &[&str] = &[
    "Review the affected content against the success criterion",
    "Apply one of the listed techniques",
    "Check the content for the listed common failures",
];

/// Build the recommendation for a failed criterion
pub fn recommend(criterion: &WcagCriterion) -> Recommendation {
    let (summary, steps) = match template(criterion.id) {
        Some(t) => (t.summary.to_string(), t.steps.to_vec()),
        None => (
            format!("Address WCAG {} {}", criterion.id, criterion.name),
            GENERIC_STEPS.to_vec(),
        ),
    };

    Recommendation {
        criterion_id: criterion.id,
        criterion_name: criterion.name,
        level: criterion.level,
        summary,
        steps,
        techniques: criterion.techniques,
        common_failures: criterion.common_failures,
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "[{}] {} (Level {})",
            self.criterion_id, self.criterion_name, self.level
        )?;
        writeln!(f, "  {}", self.summary)?;
        writeln!(f, "  Steps:")?;
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(f, "    {}. {}", i + 1, step)?;
        }
        if !self.techniques.is_empty() {
            writeln!(f, "  Techniques:")?;
            for t in self.techniques {
                writeln!(f, "    - {}", t)?;
            }
        }
        if !self.common_failures.is_empty() {
            writeln!(f, "  Common failures:")?;
            for c in self.common_failures {
                writeln!(f, "    - {}", c)?;
            }
        }
        Ok(())
    }
}
