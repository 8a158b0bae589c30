// SPDX-License-Identifier: PMPL-1.0-or-later
//! WAI-ARIA 1.2 role catalog.
//!
//! Built once on first use and never modified afterwards.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

/// Role taxonomy category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleCategory {
    /// Ontology-only roles, never valid in content
    Abstract,
    Widget,
    Document,
    Landmark,
    Window,
}

/// Catalog entry for one role
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AriaRoleSpec {
    pub name: &'static str,
    pub category: RoleCategory,
    pub required_properties: BTreeSet<&'static str>,
    pub supported_properties: BTreeSet<&'static str>,
    /// Context roles, one of which must be an ancestor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_parent: Option<BTreeSet<&'static str>>,
    /// Owned roles, one of which must be a descendant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_children: Option<BTreeSet<&'static str>>,
}

impl AriaRoleSpec {
    pub fn is_abstract(&self) -> bool {
        self.category == RoleCategory::Abstract
    }
}

fn set(items: &[&'static str]) -> BTreeSet<&'static str> {
    items.iter().copied().collect()
}

fn optional_set(items: &[&'static str]) -> Option<BTreeSet<&'static str>> {
    if items.is_empty() {
        None
    } else {
        Some(set(items))
    }
}

fn spec(
    name: &'static str,
    category: RoleCategory,
    required: &[&'static str],
    supported: &[&'static str],
    parent: &[&'static str],
    children: &[&'static str],
) -> AriaRoleSpec {
    AriaRoleSpec {
        name,
        category,
        required_properties: set(required),
        supported_properties: set(supported),
        required_parent: optional_set(parent),
        required_children: optional_set(children),
    }
}

const MENU_ITEMS: &[&str] = &["menuitem", "menuitemcheckbox", "menuitemradio", "group"];
const MENU_CONTEXT: &[&str] = &["menu", "menubar", "group"];
const ROW_CONTEXT: &[&str] = &["table", "grid", "treegrid", "rowgroup"];
const ROW_CHILDREN: &[&str] = &["cell", "columnheader", "gridcell", "rowheader"];
const RANGE_PROPS: &[&str] = &["aria-valuemax", "aria-valuemin", "aria-valuenow", "aria-valuetext"];

static ROLES: LazyLock<BTreeMap<&'static str, AriaRoleSpec>> = LazyLock::new(|| {
    use RoleCategory::*;

    let specs = vec![
        // Abstract
        spec("command", Abstract, &[], &[], &[], &[]),
        spec("composite", Abstract, &[], &["aria-activedescendant"], &[], &[]),
        spec("input", Abstract, &[], &[], &[], &[]),
        spec("landmark", Abstract, &[], &[], &[], &[]),
        spec("range", Abstract, &[], RANGE_PROPS, &[], &[]),
        spec("roletype", Abstract, &[], &[], &[], &[]),
        spec("section", Abstract, &[], &[], &[], &[]),
        spec("sectionhead", Abstract, &[], &[], &[], &[]),
        spec("select", Abstract, &[], &["aria-orientation"], &[], &[]),
        spec("structure", Abstract, &[], &[], &[], &[]),
        spec("widget", Abstract, &[], &[], &[], &[]),
        spec("window", Abstract, &[], &["aria-modal"], &[], &[]),
        // Widgets
        spec("button", Widget, &[], &["aria-expanded", "aria-pressed"], &[], &[]),
        spec("checkbox", Widget, &["aria-checked"], &["aria-checked", "aria-readonly", "aria-required"], &[], &[]),
        spec(
            "combobox",
            Widget,
            &["aria-controls", "aria-expanded"],
            &["aria-activedescendant", "aria-autocomplete", "aria-expanded", "aria-readonly", "aria-required"],
            &[],
            &[],
        ),
        spec("gridcell", Widget, &[], &["aria-readonly", "aria-required", "aria-selected", "aria-colindex", "aria-rowindex"], &["row"], &[]),
        spec("link", Widget, &[], &["aria-expanded"], &[], &[]),
        spec("menuitem", Widget, &[], &["aria-expanded", "aria-posinset", "aria-setsize"], MENU_CONTEXT, &[]),
        spec("menuitemcheckbox", Widget, &["aria-checked"], &["aria-checked", "aria-posinset", "aria-setsize"], MENU_CONTEXT, &[]),
        spec("menuitemradio", Widget, &["aria-checked"], &["aria-checked", "aria-posinset", "aria-setsize"], MENU_CONTEXT, &[]),
        spec("option", Widget, &[], &["aria-checked", "aria-posinset", "aria-selected", "aria-setsize"], &["listbox", "group"], &[]),
        spec("progressbar", Widget, &[], RANGE_PROPS, &[], &[]),
        spec("radio", Widget, &["aria-checked"], &["aria-checked", "aria-posinset", "aria-setsize"], &[], &[]),
        spec("scrollbar", Widget, &["aria-controls", "aria-valuenow"], RANGE_PROPS, &[], &[]),
        spec("searchbox", Widget, &[], &["aria-autocomplete", "aria-multiline", "aria-placeholder", "aria-readonly", "aria-required"], &[], &[]),
        spec("slider", Widget, &["aria-valuenow"], RANGE_PROPS, &[], &[]),
        spec("spinbutton", Widget, &[], RANGE_PROPS, &[], &[]),
        spec("switch", Widget, &["aria-checked"], &["aria-checked", "aria-readonly", "aria-required"], &[], &[]),
        spec("tab", Widget, &[], &["aria-expanded", "aria-posinset", "aria-selected", "aria-setsize"], &["tablist"], &[]),
        spec("tabpanel", Widget, &[], &[], &[], &[]),
        spec("textbox", Widget, &[], &["aria-activedescendant", "aria-autocomplete", "aria-multiline", "aria-placeholder", "aria-readonly", "aria-required"], &[], &[]),
        spec("treeitem", Widget, &[], &["aria-expanded", "aria-level", "aria-posinset", "aria-selected", "aria-setsize"], &["tree", "group"], &[]),
        spec("grid", Widget, &[], &["aria-colcount", "aria-multiselectable", "aria-readonly", "aria-rowcount"], &[], &["row", "rowgroup"]),
        spec("listbox", Widget, &[], &["aria-multiselectable", "aria-orientation", "aria-readonly", "aria-required"], &[], &["option", "group"]),
        spec("menu", Widget, &[], &["aria-orientation"], &[], MENU_ITEMS),
        spec("menubar", Widget, &[], &["aria-orientation"], &[], MENU_ITEMS),
        spec("radiogroup", Widget, &[], &["aria-readonly", "aria-required"], &[], &["radio"]),
        spec("tablist", Widget, &[], &["aria-multiselectable", "aria-orientation"], &[], &["tab"]),
        spec("tree", Widget, &[], &["aria-multiselectable", "aria-orientation", "aria-required"], &[], &["treeitem", "group"]),
        spec("treegrid", Widget, &[], &["aria-colcount", "aria-multiselectable", "aria-rowcount"], &[], &["row", "rowgroup"]),
        // Document structure
        spec("application", Document, &[], &["aria-activedescendant", "aria-expanded"], &[], &[]),
        spec("article", Document, &[], &["aria-posinset", "aria-setsize"], &[], &[]),
        spec("cell", Document, &[], &["aria-colindex", "aria-colspan", "aria-rowindex", "aria-rowspan"], &["row"], &[]),
        spec("columnheader", Document, &[], &["aria-colindex", "aria-colspan", "aria-sort", "aria-selected"], &["row"], &[]),
        spec("definition", Document, &[], &[], &[], &[]),
        spec("document", Document, &[], &[], &[], &[]),
        spec("feed", Document, &[], &[], &[], &["article"]),
        spec("figure", Document, &[], &[], &[], &[]),
        spec("group", Document, &[], &["aria-activedescendant"], &[], &[]),
        spec("heading", Document, &["aria-level"], &["aria-level"], &[], &[]),
        spec("img", Document, &[], &[], &[], &[]),
        spec("list", Document, &[], &[], &[], &["listitem"]),
        spec("listitem", Document, &[], &["aria-level", "aria-posinset", "aria-setsize"], &["list", "directory"], &[]),
        spec("math", Document, &[], &[], &[], &[]),
        spec("meter", Document, &["aria-valuenow"], RANGE_PROPS, &[], &[]),
        spec("none", Document, &[], &[], &[], &[]),
        spec("note", Document, &[], &[], &[], &[]),
        spec("presentation", Document, &[], &[], &[], &[]),
        spec("row", Document, &[], &["aria-colindex", "aria-expanded", "aria-level", "aria-rowindex", "aria-selected"], ROW_CONTEXT, ROW_CHILDREN),
        spec("rowgroup", Document, &[], &[], &["table", "grid", "treegrid"], &["row"]),
        spec("rowheader", Document, &[], &["aria-colindex", "aria-colspan", "aria-sort", "aria-selected"], &["row"], &[]),
        spec("separator", Document, &[], &["aria-orientation", "aria-valuemax", "aria-valuemin", "aria-valuenow"], &[], &[]),
        spec("table", Document, &[], &["aria-colcount", "aria-rowcount"], &[], &["row", "rowgroup"]),
        spec("term", Document, &[], &[], &[], &[]),
        spec("toolbar", Document, &[], &["aria-orientation"], &[], &[]),
        spec("tooltip", Document, &[], &[], &[], &[]),
        spec("directory", Document, &[], &[], &[], &[]),
        // Live regions
        spec("alert", Document, &[], &[], &[], &[]),
        spec("log", Document, &[], &[], &[], &[]),
        spec("marquee", Document, &[], &[], &[], &[]),
        spec("status", Document, &[], &[], &[], &[]),
        spec("timer", Document, &[], &[], &[], &[]),
        // Landmarks
        spec("banner", Landmark, &[], &[], &[], &[]),
        spec("complementary", Landmark, &[], &[], &[], &[]),
        spec("contentinfo", Landmark, &[], &[], &[], &[]),
        spec("form", Landmark, &[], &[], &[], &[]),
        spec("main", Landmark, &[], &[], &[], &[]),
        spec("navigation", Landmark, &[], &[], &[], &[]),
        spec("region", Landmark, &[], &[], &[], &[]),
        spec("search", Landmark, &[], &[], &[], &[]),
        // Windows
        spec("alertdialog", Window, &[], &["aria-modal"], &[], &[]),
        spec("dialog", Window, &[], &["aria-modal"], &[], &[]),
    ];

    specs.into_iter().map(|s| (s.name, s)).collect()
});

/// Look up a role by name
pub fn role_spec(name: &str) -> Option<&'static AriaRoleSpec> {
    ROLES.get(name)
}

/// All cataloged roles, ordered by name
pub fn roles() -> impl Iterator<Item = &'static AriaRoleSpec> {
    ROLES.values()
}

/// Implicit role of a native HTML element, used for context and
/// ownership lookups
pub fn implicit_role(tag: &str, has_href: bool) -> Option<&'static str> {
    let role = match tag {
        "ul" | "ol" | "menu" => "list",
        "li" => "listitem",
        "table" => "table",
        "thead" | "tbody" | "tfoot" => "rowgroup",
        "tr" => "row",
        "td" => "cell",
        "th" => "columnheader",
        "nav" => "navigation",
        "main" => "main",
        "aside" => "complementary",
        "header" => "banner",
        "footer" => "contentinfo",
        "button" => "button",
        "a" if has_href => "link",
        "article" => "article",
        "dialog" => "dialog",
        "fieldset" | "optgroup" => "group",
        "select" => "listbox",
        "option" => "option",
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => "heading",
        "img" => "img",
        "hr" => "separator",
        _ => return None,
    };
    Some(role)
}
