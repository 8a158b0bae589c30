// SPDX-License-Identifier: PMPL-1.0-or-later
//! WAI-ARIA 1.2 states and properties.

/// Every recognized `aria-*` attribute
pub const ARIA_PROPERTIES: &[&str] = &[
    "aria-activedescendant",
    "aria-atomic",
    "aria-autocomplete",
    "aria-busy",
    "aria-checked",
    "aria-colcount",
    "aria-colindex",
    "aria-colspan",
    "aria-controls",
    "aria-current",
    "aria-describedby",
    "aria-description",
    "aria-details",
    "aria-disabled",
    "aria-dropeffect",
    "aria-errormessage",
    "aria-expanded",
    "aria-flowto",
    "aria-grabbed",
    "aria-haspopup",
    "aria-hidden",
    "aria-invalid",
    "aria-keyshortcuts",
    "aria-label",
    "aria-labelledby",
    "aria-level",
    "aria-live",
    "aria-modal",
    "aria-multiline",
    "aria-multiselectable",
    "aria-orientation",
    "aria-owns",
    "aria-placeholder",
    "aria-posinset",
    "aria-pressed",
    "aria-readonly",
    "aria-relevant",
    "aria-required",
    "aria-roledescription",
    "aria-rowcount",
    "aria-rowindex",
    "aria-rowspan",
    "aria-selected",
    "aria-setsize",
    "aria-sort",
    "aria-valuemax",
    "aria-valuemin",
    "aria-valuenow",
    "aria-valuetext",
];

/// Attributes that are states rather than properties
pub const ARIA_STATES: &[&str] = &[
    "aria-busy",
    "aria-checked",
    "aria-current",
    "aria-disabled",
    "aria-expanded",
    "aria-grabbed",
    "aria-hidden",
    "aria-invalid",
    "aria-pressed",
    "aria-selected",
];

/// Attributes whose value is a space-separated list of element ids
pub const ID_LIST_PROPERTIES: &[&str] = &[
    "aria-labelledby",
    "aria-describedby",
    "aria-controls",
    "aria-owns",
    "aria-flowto",
    "aria-details",
    "aria-errormessage",
];

/// Attributes whose value is a single element id
pub const ID_PROPERTIES: &[&str] = &["aria-activedescendant"];

const BOOLEAN: &[&str] = &["true", "false"];
const BOOLEAN_UNDEFINED: &[&str] = &["true", "false", "undefined"];
const TRISTATE: &[&str] = &["true", "false", "mixed", "undefined"];

pub fn is_property(name: &str) -> bool {
    ARIA_PROPERTIES.contains(&name)
}

pub fn is_state(name: &str) -> bool {
    ARIA_STATES.contains(&name)
}

/// Whether the value of `name` references other elements by id
pub fn is_id_reference(name: &str) -> bool {
    ID_LIST_PROPERTIES.contains(&name) || ID_PROPERTIES.contains(&name)
}

/// Allowed values for token-valued attributes; `None` for free-form,
/// numeric and id-reference attributes
pub fn allowed_values(name: &str) -> Option<&'static [&'static str]> {
    let values: &'static [&'static str] = match name {
        "aria-atomic" | "aria-busy" | "aria-disabled" | "aria-modal" | "aria-multiline"
        | "aria-multiselectable" | "aria-readonly" | "aria-required" => BOOLEAN,
        "aria-expanded" | "aria-hidden" | "aria-selected" | "aria-grabbed" => BOOLEAN_UNDEFINED,
        "aria-checked" | "aria-pressed" => TRISTATE,
        "aria-invalid" => &["true", "false", "grammar", "spelling"],
        "aria-current" => &["page", "step", "location", "date", "time", "true", "false"],
        "aria-live" => &["off", "polite", "assertive"],
        "aria-orientation" => &["horizontal", "vertical", "undefined"],
        "aria-sort" => &["ascending", "descending", "none", "other"],
        "aria-autocomplete" => &["inline", "list", "both", "none"],
        "aria-haspopup" => &["true", "false", "menu", "listbox", "tree", "grid", "dialog"],
        _ => return None,
    };
    Some(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states_are_properties() {
        for state in ARIA_STATES {
            assert!(is_property(state), "{} missing from property list", state);
        }
        for idref in ID_LIST_PROPERTIES.iter().chain(ID_PROPERTIES) {
            assert!(is_property(idref));
        }
    }

    #[test]
    fn test_allowed_values() {
        assert_eq!(allowed_values("aria-checked").map(|v| v.contains(&"mixed")), Some(true));
        assert_eq!(allowed_values("aria-hidden").map(|v| v.contains(&"maybe")), Some(false));
        assert!(allowed_values("aria-label").is_none());
        assert!(allowed_values("aria-valuenow").is_none());
    }

    #[test]
    fn test_id_references() {
        assert!(is_id_reference("aria-labelledby"));
        assert!(is_id_reference("aria-activedescendant"));
        assert!(!is_id_reference("aria-label"));
    }
}
