// SPDX-License-Identifier: PMPL-1.0-or-later
//! WCAG 2.1 success criteria catalog.
//!
//! A read-only table built once on first use. Criteria are kept in
//! numeric id order (`1.4.3` before `1.4.10`).

use crate::issue::WcagLevel;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// The four WCAG principles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Principle {
    Perceivable,
    Operable,
    Understandable,
    Robust,
}

impl Principle {
    pub const ALL: [Principle; 4] = [
        Principle::Perceivable,
        Principle::Operable,
        Principle::Understandable,
        Principle::Robust,
    ];

    /// Principle for the leading number of a criterion id
    fn from_number(n: u32) -> Option<Principle> {
        match n {
            1 => Some(Principle::Perceivable),
            2 => Some(Principle::Operable),
            3 => Some(Principle::Understandable),
            4 => Some(Principle::Robust),
            _ => None,
        }
    }
}

impl fmt::Display for Principle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Principle::Perceivable => write!(f, "Perceivable"),
            Principle::Operable => write!(f, "Operable"),
            Principle::Understandable => write!(f, "Understandable"),
            Principle::Robust => write!(f, "Robust"),
        }
    }
}

/// A WCAG success criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WcagCriterion {
    /// Dotted id, e.g. `1.4.3`
    pub id: &'static str,
    pub name: &'static str,
    pub level: WcagLevel,
    pub principle: Principle,
    pub guideline: &'static str,
    pub techniques: &'static [&'static str],
    pub common_failures: &'static [&'static str],
}

impl WcagCriterion {
    /// Numeric id components, for ordering
    pub fn id_parts(&self) -> [u32; 3] {
        parse_id(self.id).unwrap_or_default()
    }

    /// Lowercase hyphenated name, e.g. `contrast-minimum`
    pub fn kebab_name(&self) -> String {
        kebab_case(self.name)
    }
}

fn parse_id(id: &str) -> Option<[u32; 3]> {
    let mut parts = id.split('.').map(|p| p.parse::<u32>().ok());
    let out = [parts.next()??, parts.next()??, parts.next()??];
    if parts.next().is_some() {
        return None;
    }
    Some(out)
}

/// Convert a criterion name to kebab case
pub fn kebab_case(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

const GUIDELINES: &[(&str, &str)] = &[
    ("1.1", "1.1 Text Alternatives"),
    ("1.2", "1.2 Time-based Media"),
    ("1.3", "1.3 Adaptable"),
    ("1.4", "1.4 Distinguishable"),
    ("2.1", "2.1 Keyboard Accessible"),
    ("2.2", "2.2 Enough Time"),
    ("2.3", "2.3 Seizures and Physical Reactions"),
    ("2.4", "2.4 Navigable"),
    ("2.5", "2.5 Input Modalities"),
    ("3.1", "3.1 Readable"),
    ("3.2", "3.2 Predictable"),
    ("3.3", "3.3 Input Assistance"),
    ("4.1", "4.1 Compatible"),
];

fn guideline_for(id: &str) -> &'static str {
    let prefix = id.rsplit_once('.').map_or(id, |(head, _)| head);
    GUIDELINES
        .iter()
        .find(|(g, _)| *g == prefix)
        .map_or("", |(_, name)| name)
}

fn sc(
    id: &'static str,
    name: &'static str,
    level: WcagLevel,
    techniques: &'static [&'static str],
    common_failures: &'static [&'static str],
) -> WcagCriterion {
    let principle = parse_id(id)
        .and_then(|[major, _, _]| Principle::from_number(major))
        .unwrap_or(Principle::Robust);
    WcagCriterion {
        id,
        name,
        level,
        principle,
        guideline: guideline_for(id),
        techniques,
        common_failures,
    }
}

static CRITERIA: LazyLock<Vec<WcagCriterion>> = LazyLock::new(|| {
    use WcagLevel::{A, AA, AAA};
    let mut all = vec![
        // Perceivable
        sc("1.1.1", "Non-text Content", A,
            &["H37: Using alt attributes on img elements", "H36: Using alt attributes on images used as submit buttons", "ARIA6: Using aria-label to provide labels for objects"],
            &["F65: Omitting the alt attribute on img elements", "F30: Using text alternatives that are not alternatives (e.g. filenames)", "F39: Providing non-null alt text for decorative images"]),
        sc("1.2.1", "Audio-only and Video-only (Prerecorded)", A,
            &["G158: Providing an alternative for time-based media for audio-only content"],
            &["F30: Using text alternatives that are not alternatives"]),
        sc("1.2.2", "Captions (Prerecorded)", A,
            &["G87: Providing closed captions", "H95: Using the track element to provide captions"],
            &["F8: Captions omitting some dialogue or important sound effects"]),
        sc("1.2.3", "Audio Description or Media Alternative (Prerecorded)", A,
            &["G69: Providing an alternative for time based media", "G78: Providing a second audio track that includes audio description"],
            &[]),
        sc("1.2.4", "Captions (Live)", AA, &["G9: Creating captions for live synchronized media"], &[]),
        sc("1.2.5", "Audio Description (Prerecorded)", AA, &["G78: Providing a second audio track that includes audio description"], &[]),
        sc("1.2.6", "Sign Language (Prerecorded)", AAA, &["G54: Including a sign language interpreter in the video stream"], &[]),
        sc("1.2.7", "Extended Audio Description (Prerecorded)", AAA, &["G8: Providing a movie with extended audio descriptions"], &[]),
        sc("1.2.8", "Media Alternative (Prerecorded)", AAA, &["G69: Providing an alternative for time based media"], &[]),
        sc("1.2.9", "Audio-only (Live)", AAA, &["G150: Providing text based alternatives for live audio-only content"], &[]),
        sc("1.3.1", "Info and Relationships", A,
            &["H42: Using h1-h6 to identify headings", "H44: Using label elements to associate text labels with form controls", "H51: Using table markup to present tabular information", "ARIA11: Using ARIA landmarks to identify regions of a page"],
            &["F2: Using changes in text presentation to convey information without using the appropriate markup", "F43: Using structural markup in a way that does not represent relationships in the content", "F68: User interface control not having a programmatically determined name"]),
        sc("1.3.2", "Meaningful Sequence", A,
            &["G57: Ordering the content in a meaningful sequence", "C27: Making the DOM order match the visual order"],
            &["F34: Using white space characters to format tables in plain text content", "F49: Using an HTML layout table that does not make sense when linearized"]),
        sc("1.3.3", "Sensory Characteristics", A,
            &["G96: Providing textual identification of items that otherwise rely only on sensory information"],
            &["F14: Identifying content based on its shape or location", "F26: Using a graphical symbol alone to convey information"]),
        sc("1.3.4", "Orientation", AA, &[], &["F97: Locking the orientation to landscape or portrait view"]),
        sc("1.3.5", "Identify Input Purpose", AA, &["H98: Using HTML 5.2 autocomplete attributes"], &["F107: Incorrect autocomplete attribute values"]),
        sc("1.3.6", "Identify Purpose", AAA, &["ARIA11: Using ARIA landmarks to identify regions of a page"], &[]),
        sc("1.4.1", "Use of Color", A,
            &["G14: Ensuring that information conveyed by color differences is also available in text", "G183: Using a contrast ratio of 3:1 with surrounding text and providing additional visual cues"],
            &["F73: Creating links that are not visually evident without color vision", "F81: Identifying required or error fields using color differences only"]),
        sc("1.4.2", "Audio Control", A, &["G60: Playing a sound that turns off automatically within three seconds"], &["F23: Playing a sound longer than 3 seconds with no mechanism to turn it off"]),
        sc("1.4.3", "Contrast (Minimum)", AA,
            &["G18: Ensuring a contrast ratio of at least 4.5:1 between text and background", "G145: Ensuring a contrast ratio of at least 3:1 for large text"],
            &["F24: Specifying foreground colors without specifying background colors", "F83: Using background images that do not provide sufficient contrast with foreground text"]),
        sc("1.4.4", "Resize Text", AA,
            &["C28: Specifying the size of text containers using em units", "G179: Ensuring that there is no loss of content or functionality when the text resizes"],
            &["F69: Resizing visually rendered text up to 200 percent causes text or controls to be clipped", "F94: Incorrect use of viewport units to resize text"]),
        sc("1.4.5", "Images of Text", AA, &["C22: Using CSS to control visual presentation of text"], &[]),
        sc("1.4.6", "Contrast (Enhanced)", AAA, &["G17: Ensuring a contrast ratio of at least 7:1 between text and background"], &["F24: Specifying foreground colors without specifying background colors"]),
        sc("1.4.7", "Low or No Background Audio", AAA, &["G56: Mixing audio files so that non-speech sounds are at least 20 decibels lower"], &[]),
        sc("1.4.8", "Visual Presentation", AAA, &["C21: Specifying line spacing in CSS", "C26: Providing options within the content to switch to a layout that has no more than 80 characters"], &["F88: Using text that is justified"]),
        sc("1.4.9", "Images of Text (No Exception)", AAA, &["C22: Using CSS to control visual presentation of text"], &[]),
        sc("1.4.10", "Reflow", AA, &["C32: Using media queries and grid CSS to reflow columns", "C38: Using CSS width, max-width and flexbox to fit labels and inputs"], &["F102: Content disappearing and not being available when content has reflowed"]),
        sc("1.4.11", "Non-text Contrast", AA, &["G195: Using an author-supplied, visible focus indicator"], &["F78: Styling element outlines and borders in a way that removes or renders non-visible the visual focus indicator"]),
        sc("1.4.12", "Text Spacing", AA, &["C36: Allowing for text spacing override"], &["F104: Clipped or overlapped content when text spacing is adjusted"]),
        sc("1.4.13", "Content on Hover or Focus", AA, &["SCR39: Making content on focus or hover hoverable, dismissible, and persistent"], &["F95: Content shown on hover is not hoverable"]),
        // Operable
        sc("2.1.1", "Keyboard", A,
            &["G202: Ensuring keyboard control for all functionality", "H91: Using HTML form controls and links", "SCR35: Making actions keyboard accessible by using the onclick event of anchors and buttons"],
            &["F54: Using only pointing-device-specific event handlers for a function", "F42: Using scripting events to emulate links in a way that is not programmatically determinable"]),
        sc("2.1.2", "No Keyboard Trap", A, &["G21: Ensuring that users are not trapped in content"], &["F10: Combining multiple content formats in a way that traps users inside one format type"]),
        sc("2.1.3", "Keyboard (No Exception)", AAA, &["G202: Ensuring keyboard control for all functionality"], &[]),
        sc("2.1.4", "Character Key Shortcuts", A, &[], &["F99: Not allowing shortcuts to be turned off or remapped"]),
        sc("2.2.1", "Timing Adjustable", A, &["G133: Providing a checkbox to request a longer session time limit", "G198: Providing a way for the user to turn the time limit off"], &["F40: Using meta redirect with a time limit", "F41: Using meta refresh to reload the page"]),
        sc("2.2.2", "Pause, Stop, Hide", A, &["G4: Allowing the content to be paused and restarted from where it was paused"], &["F16: Including scrolling content where movement is not essential", "F47: Using the blink element"]),
        sc("2.2.3", "No Timing", AAA, &["G5: Allowing users to complete an activity without any time limit"], &[]),
        sc("2.2.4", "Interruptions", AAA, &["G75: Providing a mechanism to postpone any updating of content"], &["F40: Using meta redirect with a time limit"]),
        sc("2.2.5", "Re-authenticating", AAA, &["G105: Saving data so that it can be used after a user re-authenticates"], &[]),
        sc("2.2.6", "Timeouts", AAA, &[], &[]),
        sc("2.3.1", "Three Flashes or Below Threshold", A, &["G19: Ensuring that no component of the content flashes more than three times in any 1-second period"], &[]),
        sc("2.3.2", "Three Flashes", AAA, &["G19: Ensuring that no component of the content flashes more than three times in any 1-second period"], &[]),
        sc("2.3.3", "Animation from Interactions", AAA, &["C39: Using the CSS reduce-motion query to prevent motion"], &[]),
        sc("2.4.1", "Bypass Blocks", A,
            &["G1: Adding a link at the top of each page that goes directly to the main content area", "ARIA11: Using ARIA landmarks to identify regions of a page", "H69: Providing heading elements at the beginning of each section of content"],
            &[]),
        sc("2.4.2", "Page Titled", A, &["H25: Providing a title using the title element"], &["F25: The title of a Web page not identifying the contents"]),
        sc("2.4.3", "Focus Order", A, &["G59: Placing the interactive elements in an order that follows sequences and relationships within the content"], &["F44: Using tabindex to create a tab order that does not preserve meaning and operability", "F85: Using dialogs or menus that are not adjacent to their trigger control in the sequential navigation order"]),
        sc("2.4.4", "Link Purpose (In Context)", A,
            &["G91: Providing link text that describes the purpose of a link", "H30: Providing link text that describes the purpose of a link for anchor elements", "ARIA7: Using aria-labelledby for link purpose"],
            &["F63: Providing link context only in content that is not related to the link", "F89: Using null alt on an image where the image is the only content in a link"]),
        sc("2.4.5", "Multiple Ways", AA, &["G63: Providing a site map", "G161: Providing a search function to help users find content"], &[]),
        sc("2.4.6", "Headings and Labels", AA, &["G130: Providing descriptive headings", "G131: Providing descriptive labels"], &[]),
        sc("2.4.7", "Focus Visible", AA,
            &["G149: Using user interface components that are highlighted by the user agent when they receive focus", "C15: Using CSS to change the presentation of a user interface component when it receives focus"],
            &["F55: Using script to remove focus when focus is received", "F78: Styling element outlines and borders in a way that removes or renders non-visible the visual focus indicator"]),
        sc("2.4.8", "Location", AAA, &["G65: Providing a breadcrumb trail", "G63: Providing a site map"], &[]),
        sc("2.4.9", "Link Purpose (Link Only)", AAA, &["ARIA8: Using aria-label for link purpose", "G91: Providing link text that describes the purpose of a link"], &["F84: Using a non-specific link such as click here or more without a mechanism to change the link text"]),
        sc("2.4.10", "Section Headings", AAA, &["G141: Organizing a page using headings"], &[]),
        sc("2.5.1", "Pointer Gestures", A, &["G215: Providing controls to achieve the same result as path based or multipoint gestures"], &["F105: Providing path based gestures without simple pointer alternative"]),
        sc("2.5.2", "Pointer Cancellation", A, &["G210: Ensuring that drag-and-drop actions can be cancelled"], &["F101: Activating a control on the down-event"]),
        sc("2.5.3", "Label in Name", A, &["G208: Including the text of the visible label as part of the accessible name"], &["F96: Accessible name does not contain the visible label text"]),
        sc("2.5.4", "Motion Actuation", A, &["G213: Provide conventional controls and an application setting for motion activated input"], &["F106: Inability to deactivate motion actuation"]),
        sc("2.5.5", "Target Size", AAA, &[], &[]),
        sc("2.5.6", "Concurrent Input Mechanisms", AAA, &[], &[]),
        // Understandable
        sc("3.1.1", "Language of Page", A, &["H57: Using the language attribute on the HTML element"], &[]),
        sc("3.1.2", "Language of Parts", AA, &["H58: Using language attributes to identify changes in the human language"], &[]),
        sc("3.1.3", "Unusual Words", AAA, &["G55: Linking to definitions", "H40: Using description lists"], &[]),
        sc("3.1.4", "Abbreviations", AAA, &["G102: Providing the expansion or explanation of an abbreviation", "H28: Providing definitions for abbreviations by using the abbr element"], &[]),
        sc("3.1.5", "Reading Level", AAA, &["G86: Providing a text summary that can be understood by people with lower secondary education level reading ability"], &[]),
        sc("3.1.6", "Pronunciation", AAA, &["G120: Providing the pronunciation immediately following the word"], &[]),
        sc("3.2.1", "On Focus", A, &["G107: Using activate rather than focus as a trigger for changes of context"], &["F52: Opening a new window as soon as a new page is loaded", "F55: Using script to remove focus when focus is received"]),
        sc("3.2.2", "On Input", A, &["G80: Providing a submit button to initiate a change of context", "H32: Providing submit buttons"], &["F36: Automatically submitting a form and presenting new content without prior warning", "F37: Launching a new window without prior warning when the selection of a radio button, check box or select list is changed"]),
        sc("3.2.3", "Consistent Navigation", AA, &["G61: Presenting repeated components in the same relative order each time they appear"], &["F66: Presenting navigation links in a different relative order on different pages"]),
        sc("3.2.4", "Consistent Identification", AA, &["G197: Using labels, names, and text alternatives consistently for content that has the same functionality"], &["F31: Using two different labels for the same function on different Web pages"]),
        sc("3.2.5", "Change on Request", AAA, &["G76: Providing a mechanism to request an update of the content instead of updating automatically"], &["F22: Opening windows that are not requested by the user"]),
        sc("3.3.1", "Error Identification", A, &["G83: Providing text descriptions to identify required fields that were not completed", "ARIA21: Using aria-invalid to indicate an error field"], &[]),
        sc("3.3.2", "Labels or Instructions", A,
            &["G131: Providing descriptive labels", "H44: Using label elements to associate text labels with form controls", "H71: Providing a description for groups of form controls using fieldset and legend elements", "ARIA1: Using the aria-describedby property to provide a descriptive label for user interface controls"],
            &["F82: Visually formatting a set of phone number fields but not including a text label"]),
        sc("3.3.3", "Error Suggestion", AA, &["G85: Providing a text description when user input falls outside the required format or values"], &[]),
        sc("3.3.4", "Error Prevention (Legal, Financial, Data)", AA, &["G98: Providing the ability for the user to review and correct answers before submitting", "G99: Providing the ability to recover deleted information"], &[]),
        sc("3.3.5", "Help", AAA, &["G71: Providing a help link on every Web page", "G184: Providing text instructions at the beginning of a form or set of fields"], &[]),
        sc("3.3.6", "Error Prevention (All)", AAA, &["G98: Providing the ability for the user to review and correct answers before submitting"], &[]),
        // Robust
        sc("4.1.1", "Parsing", A,
            &["H74: Ensuring that opening and closing tags are used according to specification", "H93: Ensuring that id attributes are unique on a Web page", "H94: Ensuring that elements do not contain duplicate attributes"],
            &["F70: Incorrect use of start and end tags or attribute markup", "F77: Duplicate values of type ID"]),
        sc("4.1.2", "Name, Role, Value", A,
            &["ARIA4: Using a WAI-ARIA role to expose the role of a user interface component", "ARIA5: Using WAI-ARIA state and property attributes to expose the state of a user interface component", "ARIA16: Using aria-labelledby to provide a name for user interface controls", "H91: Using HTML form controls and links"],
            &["F59: Using script to make div or span a user interface control without providing a role", "F68: User interface control not having a programmatically determined name", "F79: Focus state of a user interface component not being programmatically determinable"]),
        sc("4.1.3", "Status Messages", AA, &["ARIA19: Using ARIA role=alert or Live Regions to identify errors", "ARIA22: Using role=status to present status messages"], &["F103: Providing status messages that cannot be programmatically determined"]),
    ];
    all.sort_by_key(|c| c.id_parts());
    all
});

/// Every criterion, in numeric id order
pub fn criteria() -> &'static [WcagCriterion] {
    &CRITERIA
}

/// Look up a criterion by id
pub fn criterion(id: &str) -> Option<&'static WcagCriterion> {
    CRITERIA.iter().find(|c| c.id == id)
}

pub fn criteria_for_principle(principle: Principle) -> impl Iterator<Item = &'static WcagCriterion> {
    CRITERIA.iter().filter(move |c| c.principle == principle)
}

/// Criteria at or below `level` (A < AA < AAA)
pub fn criteria_up_to(level: WcagLevel) -> impl Iterator<Item = &'static WcagCriterion> {
    CRITERIA.iter().filter(move |c| c.level <= level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_well_formed() {
        let pattern = Regex::new(r"^\d+\.\d+\.\d+$").expect("regex");
        for c in criteria() {
            assert!(pattern.is_match(c.id), "bad id {}", c.id);
            assert!(!c.guideline.is_empty(), "{} has no guideline", c.id);
        }
    }

    #[test]
    fn test_ids_unique_and_ordered() {
        let ids: HashSet<_> = criteria().iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), criteria().len());
        assert!(criteria().windows(2).all(|w| w[0].id_parts() < w[1].id_parts()));
        assert_eq!(criteria().len(), 78);
    }

    #[test]
    fn test_lookup() {
        let contrast = criterion("1.4.3").expect("1.4.3");
        assert_eq!(contrast.name, "Contrast (Minimum)");
        assert_eq!(contrast.level, WcagLevel::AA);
        assert_eq!(contrast.principle, Principle::Perceivable);
        assert_eq!(contrast.guideline, "1.4 Distinguishable");
        assert_eq!(contrast.kebab_name(), "contrast-minimum");

        assert_eq!(criterion("4.1.2").map(|c| c.principle), Some(Principle::Robust));
        assert!(criterion("9.9.9").is_none());
    }

    #[test]
    fn test_principles_cover_catalog() {
        let total: usize = Principle::ALL.iter().map(|p| criteria_for_principle(*p).count()).sum();
        assert_eq!(total, criteria().len());
        assert!(criteria_for_principle(Principle::Operable).all(|c| c.id.starts_with('2')));
    }

    #[test]
    fn test_levels_nest() {
        let a: HashSet<_> = criteria_up_to(WcagLevel::A).map(|c| c.id).collect();
        let aa: HashSet<_> = criteria_up_to(WcagLevel::AA).map(|c| c.id).collect();
        let aaa: HashSet<_> = criteria_up_to(WcagLevel::AAA).map(|c| c.id).collect();
        assert!(a.is_subset(&aa) && aa.is_subset(&aaa));
        assert_eq!(aaa.len(), criteria().len());
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("Name, Role, Value"), "name-role-value");
        assert_eq!(kebab_case("Non-text Content"), "non-text-content");
        assert_eq!(kebab_case("Error Prevention (Legal, Financial, Data)"), "error-prevention-legal-financial-data");
    }
}
