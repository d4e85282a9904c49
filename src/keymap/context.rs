//! Focus context: which native controls react to which keys
//!
//! The focused element decides which inhibit flags apply. A keybind is
//! suppressed when its own flags overlap the element's.

use std::fmt;
use std::str::FromStr;

use super::flags::InhibitFlags;

const TEXT: InhibitFlags = InhibitFlags::TEXT;
const SELECT: InhibitFlags = InhibitFlags::SELECT;
const ARROW: InhibitFlags = InhibitFlags::ARROW;
const ENTER: InhibitFlags = InhibitFlags::ENTER;
const ENTER_EXTRA: InhibitFlags = InhibitFlags::ENTER_EXTRA;
const SPACE: InhibitFlags = InhibitFlags::SPACE;

/// `<input type>` values and the flags they are sensitive to.
///
/// Date and time pickers open on Enter, plain text fields do not; only the
/// types listed with ENTER claim the key.
const INPUT_TYPES: &[(&str, InhibitFlags)] = &[
    // free text
    ("text", TEXT),
    ("email", TEXT),
    ("number", TEXT),
    ("password", TEXT),
    ("search", TEXT),
    ("tel", TEXT),
    ("url", TEXT),
    // text with a picker
    ("date", TEXT.union(ENTER)),
    ("datetime-local", TEXT.union(ENTER)),
    ("month", TEXT.union(ENTER)),
    ("time", TEXT.union(ENTER)),
    ("week", TEXT.union(ENTER)),
    // activated like buttons
    ("button", ENTER.union(SPACE)),
    ("color", ENTER.union(SPACE)),
    ("file", ENTER.union(SPACE)),
    ("image", ENTER.union(SPACE)),
    ("reset", ENTER.union(SPACE)),
    ("submit", ENTER.union(SPACE)),
    // toggles and sliders
    ("checkbox", SPACE),
    ("radio", ARROW.union(SPACE)),
    ("range", ARROW),
    ("hidden", InhibitFlags::empty()),
];

/// Flags an `<input>` of the given type is sensitive to
///
/// Lookup is case-insensitive. Unknown and custom types yield no flags.
pub fn input_type_flags(input_type: &str) -> InhibitFlags {
    INPUT_TYPES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(input_type))
        .map(|&(_, flags)| flags)
        .unwrap_or_else(InhibitFlags::empty)
}

/// Kind of focused element, without per-element detail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementCategory {
    Input,
    TextArea,
    Select,
    Button,
    Anchor,
    ContentEditable,
    Other,
}

impl ElementCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementCategory::Input => "input",
            ElementCategory::TextArea => "textarea",
            ElementCategory::Select => "select",
            ElementCategory::Button => "button",
            ElementCategory::Anchor => "anchor",
            ElementCategory::ContentEditable => "editable",
            ElementCategory::Other => "other",
        }
    }
}

impl fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flags a focused element category is sensitive to
///
/// `input_type` is only consulted for [`ElementCategory::Input`].
pub fn classify(category: ElementCategory, input_type: Option<&str>) -> InhibitFlags {
    match category {
        ElementCategory::Input => input_type.map(input_type_flags).unwrap_or_default(),
        ElementCategory::TextArea | ElementCategory::ContentEditable => TEXT,
        ElementCategory::Select => SELECT,
        ElementCategory::Button => ENTER | SPACE,
        ElementCategory::Anchor => ENTER | ENTER_EXTRA,
        ElementCategory::Other => InhibitFlags::empty(),
    }
}

/// The element holding keyboard focus when an event fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget<'a> {
    /// `<input>` with its lowercase `type`
    Input { input_type: &'a str },
    TextArea,
    Select,
    Button,
    /// `<a>`; `has_target` is false when `href` resolves to the empty string
    Anchor { has_target: bool },
    /// Any element with `isContentEditable`
    ContentEditable,
    /// Body, document, or anything without native key handling
    #[default]
    Other,
}

impl<'a> FocusTarget<'a> {
    pub fn category(&self) -> ElementCategory {
        match self {
            FocusTarget::Input { .. } => ElementCategory::Input,
            FocusTarget::TextArea => ElementCategory::TextArea,
            FocusTarget::Select => ElementCategory::Select,
            FocusTarget::Button => ElementCategory::Button,
            FocusTarget::Anchor { .. } => ElementCategory::Anchor,
            FocusTarget::ContentEditable => ElementCategory::ContentEditable,
            FocusTarget::Other => ElementCategory::Other,
        }
    }

    pub fn input_type(&self) -> Option<&'a str> {
        match *self {
            FocusTarget::Input { input_type } => Some(input_type),
            _ => None,
        }
    }

    /// Flags this element is sensitive to
    pub fn sensitivity(&self) -> InhibitFlags {
        classify(self.category(), self.input_type())
    }

    /// Whether a keybind with `flags` may be considered while this element is focused
    ///
    /// An anchor without a navigation target never lets a keybind through.
    pub fn allows(&self, flags: InhibitFlags) -> bool {
        if let FocusTarget::Anchor { has_target: false } = self {
            return false;
        }
        flags.permits(self.sensitivity())
    }
}

/// Owned form of [`FocusTarget`], parsed from strings like `input:date`
///
/// Used where focus has to be described in text, such as the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FocusSpec {
    Input(String),
    TextArea,
    Select,
    Button,
    Anchor { has_target: bool },
    ContentEditable,
    #[default]
    Other,
}

impl FocusSpec {
    pub fn as_target(&self) -> FocusTarget<'_> {
        match self {
            FocusSpec::Input(input_type) => FocusTarget::Input {
                input_type: input_type.as_str(),
            },
            FocusSpec::TextArea => FocusTarget::TextArea,
            FocusSpec::Select => FocusTarget::Select,
            FocusSpec::Button => FocusTarget::Button,
            FocusSpec::Anchor { has_target } => FocusTarget::Anchor {
                has_target: *has_target,
            },
            FocusSpec::ContentEditable => FocusTarget::ContentEditable,
            FocusSpec::Other => FocusTarget::Other,
        }
    }
}

impl fmt::Display for FocusSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FocusSpec::Input(input_type) => write!(f, "input:{}", input_type),
            FocusSpec::Anchor { has_target: false } => f.write_str("anchor:none"),
            other => f.write_str(other.as_target().category().as_str()),
        }
    }
}

impl FromStr for FocusSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let (tag, detail) = match lower.split_once(':') {
            Some((tag, detail)) => (tag, Some(detail)),
            None => (lower.as_str(), None),
        };

        match (tag, detail) {
            ("input", Some(input_type)) => Ok(FocusSpec::Input(input_type.to_string())),
            ("input", None) => Ok(FocusSpec::Input("text".to_string())),
            ("textarea", None) => Ok(FocusSpec::TextArea),
            ("select", None) => Ok(FocusSpec::Select),
            ("button", None) => Ok(FocusSpec::Button),
            ("anchor" | "a", None) => Ok(FocusSpec::Anchor { has_target: true }),
            ("anchor" | "a", Some("none")) => Ok(FocusSpec::Anchor { has_target: false }),
            ("editable" | "contenteditable", None) => Ok(FocusSpec::ContentEditable),
            ("other" | "none" | "body", None) => Ok(FocusSpec::Other),
            _ => Err(format!("Unknown focus target: {}", s)),
        }
    }
}
