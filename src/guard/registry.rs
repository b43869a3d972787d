use super::widget::AutocompleteWidget;
use super::{GuardError, GuardResult};
use crate::config::{GuardConfig, MissingSelectPolicy};
use leptos::logging::warn;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, HtmlSelectElement};

/// Pair every marker-class input under `root` with its `<select>`.
///
/// The input list is a snapshot: the live collection is read once here.
pub fn resolve_widgets(root: &Element, config: &GuardConfig) -> GuardResult<Vec<AutocompleteWidget>> {
    let inputs = root.get_elements_by_class_name(&config.input_class);
    let mut widgets = Vec::with_capacity(inputs.length() as usize);

    for i in 0..inputs.length() {
        let Some(el) = inputs.item(i) else {
            continue;
        };

        let input = match el.dyn_into::<HtmlInputElement>() {
            Ok(input) => input,
            Err(el) => {
                warn!(
                    "country-picker: .{} on <{}> is not an input; ignoring",
                    config.input_class,
                    el.tag_name().to_lowercase()
                );
                continue;
            }
        };

        match resolve_select(&input, config) {
            Some(select) => widgets.push(AutocompleteWidget::new(input, select)),
            None => match config.on_missing_select {
                MissingSelectPolicy::Skip => {
                    warn!(
                        "country-picker: no <select> paired with {}; skipping",
                        describe_input(&input)
                    );
                }
                MissingSelectPolicy::Fail => {
                    return Err(GuardError::missing_select(&describe_input(&input)));
                }
            },
        }
    }

    Ok(widgets)
}

/// Find the `<select>` an input stands in for.
///
/// An explicit pairing attribute wins. A pairing attribute that names a
/// missing id (or a non-select element) is unresolved; it does not fall
/// through to the ancestor walk.
pub fn resolve_select(input: &HtmlInputElement, config: &GuardConfig) -> Option<HtmlSelectElement> {
    if let Some(id) = input.get_attribute(&config.pairing_attribute) {
        let id = id.trim();
        if !id.is_empty() {
            return input
                .owner_document()?
                .get_element_by_id(id)?
                .dyn_into::<HtmlSelectElement>()
                .ok();
        }
    }

    let mut ancestor = input.parent_element()?;
    for _ in 1..config.ancestor_depth {
        ancestor = ancestor.parent_element()?;
    }

    ancestor
        .query_selector("select")
        .ok()
        .flatten()?
        .dyn_into::<HtmlSelectElement>()
        .ok()
}

fn describe_input(input: &HtmlInputElement) -> String {
    let id = input.id();
    if !id.is_empty() {
        return format!("input#{id}");
    }
    let name = input.name();
    if !name.is_empty() {
        return format!("input[name={name}]");
    }
    "an unnamed input".to_string()
}
