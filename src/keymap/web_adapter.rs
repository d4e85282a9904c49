//! Adapter from DOM keyboard events (`web_sys`) to [`KeyboardEvent`]
//!
//! Enabled with the `web` feature.
//!
//! ```ignore
//! let mut handler = KeybindHandler::new(
//!     ModifierResolver::new(Platform::from_navigator()),
//!     [("$mod+s", |_: &mut DomKeyEvent| save())],
//!     true,
//! )?;
//! // inside the keydown listener:
//! handler.handle(&mut DomKeyEvent::new(event));
//! ```

use wasm_bindgen::JsCast;
use web_sys::{
    EventTarget, HtmlAnchorElement, HtmlButtonElement, HtmlElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement,
};

use super::context::{FocusSpec, FocusTarget};
use super::event::KeyboardEvent;
use super::platform::Platform;

impl Platform {
    /// Platform from `navigator.platform`, Other when unavailable
    pub fn from_navigator() -> Self {
        web_sys::window()
            .and_then(|window| window.navigator().platform().ok())
            .map(|platform| Platform::from_platform_string(&platform))
            .unwrap_or_default()
    }
}

/// A DOM `KeyboardEvent` with its key names and focus target read once
pub struct DomKeyEvent {
    event: web_sys::KeyboardEvent,
    key: String,
    code: String,
    focus: FocusSpec,
}

impl DomKeyEvent {
    pub fn new(event: web_sys::KeyboardEvent) -> Self {
        let key = event.key();
        let code = event.code();
        let focus = focus_of(event.target());
        Self {
            event,
            key,
            code,
            focus,
        }
    }

    pub fn inner(&self) -> &web_sys::KeyboardEvent {
        &self.event
    }
}

impl KeyboardEvent for DomKeyEvent {
    fn key(&self) -> &str {
        &self.key
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn modifier_state(&self, modifier: &str) -> bool {
        self.event.get_modifier_state(modifier)
    }

    fn default_prevented(&self) -> bool {
        self.event.default_prevented()
    }

    fn prevent_default(&mut self) {
        self.event.prevent_default();
    }

    fn target(&self) -> FocusTarget<'_> {
        self.focus.as_target()
    }
}

/// Map the event target onto the element categories the inhibition table knows
fn focus_of(target: Option<EventTarget>) -> FocusSpec {
    let Some(target) = target else {
        return FocusSpec::Other;
    };

    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        return FocusSpec::Input(input.type_().to_ascii_lowercase());
    }
    if target.dyn_ref::<HtmlTextAreaElement>().is_some() {
        return FocusSpec::TextArea;
    }
    if target.dyn_ref::<HtmlSelectElement>().is_some() {
        return FocusSpec::Select;
    }
    if target.dyn_ref::<HtmlButtonElement>().is_some() {
        return FocusSpec::Button;
    }
    if let Some(anchor) = target.dyn_ref::<HtmlAnchorElement>() {
        return FocusSpec::Anchor {
            has_target: !anchor.href().is_empty(),
        };
    }
    if let Some(element) = target.dyn_ref::<HtmlElement>() {
        if element.is_content_editable() {
            return FocusSpec::ContentEditable;
        }
    }

    FocusSpec::Other
}
