mod registry;
mod widget;

pub use registry::{resolve_select, resolve_widgets};
pub use widget::AutocompleteWidget;

use crate::config::{GuardConfig, ResolveMode};
use leptos::logging::warn;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlFormElement};

const SUBMIT: &str = "submit";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardErrorKind {
    /// An autocomplete input has no resolvable `<select>`.
    MissingSelect,
    Config,
    /// A DOM call threw.
    Dom,
}

#[derive(Clone, Debug)]
pub struct GuardError {
    pub kind: GuardErrorKind,
    pub message: String,
}

impl std::fmt::Display for GuardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for GuardError {}

impl GuardError {
    pub(crate) fn missing_select(input: &str) -> Self {
        Self {
            kind: GuardErrorKind::MissingSelect,
            message: format!("no <select> paired with {input}"),
        }
    }

    pub(crate) fn config(e: impl std::fmt::Display) -> Self {
        Self {
            kind: GuardErrorKind::Config,
            message: format!("invalid config: {e}"),
        }
    }

    pub(crate) fn dom(e: JsValue) -> Self {
        let message = e
            .as_string()
            .or_else(|| e.dyn_ref::<js_sys::Error>().map(|err| String::from(err.message())))
            .unwrap_or_else(|| format!("{e:?}"));
        Self {
            kind: GuardErrorKind::Dom,
            message,
        }
    }
}

pub type GuardResult<T> = Result<T, GuardError>;

struct GuardState {
    root: Element,
    config: GuardConfig,
    widgets: RefCell<Vec<AutocompleteWidget>>,
}

impl GuardState {
    fn normalize(&self) -> usize {
        if self.config.resolve == ResolveMode::EachSubmit {
            match resolve_widgets(&self.root, &self.config) {
                Ok(widgets) => *self.widgets.borrow_mut() = widgets,
                // Keep guarding with the last good set rather than none.
                Err(e) => warn!("country-picker: re-resolve failed: {e}"),
            }
        }

        self.widgets
            .borrow()
            .iter()
            .map(AutocompleteWidget::normalize)
            .filter(|changed| *changed)
            .count()
    }
}

/// Resets empty country pickers to their placeholder option on submit.
///
/// The listener stays attached for as long as the guard lives. Call
/// [`FormSubmitGuard::forget`] to keep it for the rest of the page's life;
/// dropping the guard detaches it.
pub struct FormSubmitGuard {
    form: HtmlFormElement,
    state: Rc<GuardState>,
    listener: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

impl FormSubmitGuard {
    /// Install on the first form of `document`.
    ///
    /// `Ok(None)` means the page has no form; that is not an error.
    pub fn install(document: &Document, config: GuardConfig) -> GuardResult<Option<Self>> {
        let Some(root) = document.document_element() else {
            return Ok(None);
        };
        Self::install_in(&root, config)
    }

    /// Install on the first form found under `root`, guarding the inputs under `root`.
    pub fn install_in(root: &Element, config: GuardConfig) -> GuardResult<Option<Self>> {
        config.validate()?;

        let Some(form) = first_form(root) else {
            return Ok(None);
        };

        let widgets = resolve_widgets(root, &config)?;
        let state = Rc::new(GuardState {
            root: root.clone(),
            config,
            widgets: RefCell::new(widgets),
        });

        let s2 = state.clone();
        let cb = Closure::wrap(Box::new(move |_ev: web_sys::Event| {
            s2.normalize();
        }) as Box<dyn FnMut(web_sys::Event)>);

        form.add_event_listener_with_callback(SUBMIT, cb.as_ref().unchecked_ref())
            .map_err(GuardError::dom)?;

        Ok(Some(Self {
            form,
            state,
            listener: Some(cb),
        }))
    }

    /// Run the submit-time pass now. Returns how many selects were reset.
    pub fn normalize(&self) -> usize {
        self.state.normalize()
    }

    pub fn widget_count(&self) -> usize {
        self.state.widgets.borrow().len()
    }

    pub fn form(&self) -> &HtmlFormElement {
        &self.form
    }

    /// Leave the listener attached for the lifetime of the page.
    pub fn forget(mut self) {
        if let Some(cb) = self.listener.take() {
            cb.forget();
        }
    }
}

impl Drop for FormSubmitGuard {
    fn drop(&mut self) {
        if let Some(cb) = self.listener.take() {
            let _ = self
                .form
                .remove_event_listener_with_callback(SUBMIT, cb.as_ref().unchecked_ref());
        }
    }
}

fn first_form(root: &Element) -> Option<HtmlFormElement> {
    root.get_elements_by_tag_name("form")
        .item(0)?
        .dyn_into::<HtmlFormElement>()
        .ok()
}

thread_local! {
    static PAGE_GUARDED: Cell<bool> = const { Cell::new(false) };
}

/// Install the guard on the current page with config from `window.ENV`.
///
/// A page gets at most one page-level guard: once a form has been guarded,
/// later calls are no-ops. Returns whether the page is guarded.
pub fn install_on_page() -> bool {
    if PAGE_GUARDED.with(Cell::get) {
        return true;
    }

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return false;
    };

    match FormSubmitGuard::install(&document, GuardConfig::new()) {
        Ok(Some(guard)) => {
            guard.forget();
            PAGE_GUARDED.with(|g| g.set(true));
            true
        }
        Ok(None) => false,
        Err(e) => {
            warn!("country-picker: guard not installed: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_select_error_names_input() {
        let e = GuardError::missing_select("input#nationality");
        assert_eq!(e.kind, GuardErrorKind::MissingSelect);
        assert_eq!(e.to_string(), "no <select> paired with input#nationality");
    }

    #[test]
    fn test_config_error_display() {
        let e = GuardError::config("ancestor_depth must be at least 1");
        assert_eq!(e.kind, GuardErrorKind::Config);
        assert_eq!(e.to_string(), "invalid config: ancestor_depth must be at least 1");
    }
}
