use icons::ChevronDown;
use leptos::prelude::*;
use tw_merge::*;

use crate::components::ui::{Hint, Label};
use crate::config::DEFAULT_INPUT_CLASS;
use crate::models::Country;

pub(crate) const MAX_SUGGESTIONS: usize = 10;
const PLACEHOLDER: &str = "Select a country";

/// Suggestions for `query`: name prefix matches first, then substring matches,
/// each group in list order. An empty query suggests nothing.
pub(crate) fn filter_countries(countries: &[Country], query: &str, limit: usize) -> Vec<Country> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return vec![];
    }

    let (prefix, rest): (Vec<&Country>, Vec<&Country>) = countries
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&q))
        .partition(|c| c.name.to_lowercase().starts_with(&q));

    prefix.into_iter().chain(rest).take(limit).cloned().collect()
}

/// Country whose name matches `text` exactly, ignoring case and outer whitespace.
pub(crate) fn find_by_name<'a>(countries: &'a [Country], text: &str) -> Option<&'a Country> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    let t = t.to_lowercase();
    countries.iter().find(|c| c.name.to_lowercase() == t)
}

/// Free-text country autocomplete backed by a hidden native `<select>`.
///
/// The select is what the form submits. The markup keeps the input three
/// levels below the element holding the select, and also names the select
/// through the pairing attribute, so the submit guard finds it either way.
///
/// Clearing the input does not clear the select here; that happens at submit.
#[component]
pub fn CountryPicker(
    #[prop(into)] id: String,
    #[prop(into)] name: String,
    #[prop(into)] label: String,
    countries: Vec<Country>,
    #[prop(optional, into)] hint: String,
    #[prop(optional, into)] default_code: Option<String>,
    #[prop(optional, into)] class: String,
) -> impl IntoView {
    let initial = default_code
        .as_deref()
        .and_then(|code| countries.iter().find(|c| c.code == code))
        .cloned();

    let query = RwSignal::new(initial.as_ref().map(|c| c.name.clone()).unwrap_or_default());
    let selected_code = RwSignal::new(initial.map(|c| c.code).unwrap_or_default());
    let open = RwSignal::new(false);
    let countries = StoredValue::new(countries);

    let select_id = format!("{id}-select");
    let menu_id = format!("{id}-menu");

    let choose = move |c: &Country| {
        query.set(c.name.clone());
        selected_code.set(c.code.clone());
        open.set(false);
    };

    let on_input = move |ev: web_sys::Event| {
        let text = event_target_value(&ev);
        if let Some(c) = countries.with_value(|list| find_by_name(list, &text).cloned()) {
            selected_code.set(c.code);
        }
        query.set(text);
        open.set(true);
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && open.get_untracked() {
            ev.prevent_default();
            open.set(false);
        }
    };

    let suggestions = move || {
        let q = query.get();
        countries.with_value(|list| filter_countries(list, &q, MAX_SUGGESTIONS))
    };

    let options = countries.with_value(|list| {
        list.iter()
            .map(|c| {
                let code = c.code.clone();
                view! {
                    <option value=c.code.clone() prop:selected=move || selected_code.get() == code>
                        {c.name.clone()}
                    </option>
                }
            })
            .collect_view()
    });

    let merged_class = tw_merge!("govuk-form-group flex flex-col gap-2", class);
    let input_class = format!(
        "{DEFAULT_INPUT_CLASS} placeholder:text-muted-foreground border-input flex h-9 w-full min-w-0 rounded-md border bg-transparent px-3 py-1 pr-8 text-base shadow-xs outline-none focus-visible:border-ring focus-visible:ring-2 focus-visible:ring-ring/50 md:text-sm"
    );

    view! {
        <div data-name="CountryPicker" class=merged_class>
            <Label html_for=id.clone()>{label}</Label>
            {(!hint.is_empty()).then(|| view! { <Hint>{hint}</Hint> })}

            <select
                id=select_id.clone()
                name=name
                class="hidden"
                aria-hidden="true"
                tabindex="-1"
            >
                <option value="" prop:selected=move || selected_code.get().is_empty()>
                    {PLACEHOLDER}
                </option>
                {options}
            </select>

            <div class="autocomplete__container relative">
                <div class="autocomplete__wrapper">
                    <input
                        id=id
                        type="text"
                        class=input_class
                        autocomplete="off"
                        role="combobox"
                        aria-autocomplete="list"
                        aria-controls=menu_id.clone()
                        aria-expanded=move || open.get().to_string()
                        data-select-id=select_id
                        prop:value=move || query.get()
                        on:input=on_input
                        on:keydown=on_keydown
                        on:focus=move |_| open.set(true)
                        on:blur=move |_| open.set(false)
                    />
                    <ChevronDown class="pointer-events-none absolute right-2 top-2.5 size-4 text-muted-foreground" />
                    <ul
                        id=menu_id
                        role="listbox"
                        class=move || {
                            if open.get() && !suggestions().is_empty() {
                                "autocomplete__menu absolute z-50 mt-1 max-h-[300px] w-full overflow-auto rounded-md border bg-card p-1 shadow-md"
                            } else {
                                "hidden"
                            }
                        }
                    >
                        <For
                            each=suggestions
                            key=|c| c.code.clone()
                            children=move |c: Country| {
                                let picked = c.clone();
                                view! {
                                    <li
                                        role="option"
                                        class="autocomplete__option cursor-pointer rounded-sm px-2 py-1.5 text-sm hover:bg-accent hover:text-accent-foreground"
                                        // mousedown, not click: the input's blur would close the menu first.
                                        on:mousedown=move |ev: web_sys::MouseEvent| {
                                            ev.prevent_default();
                                            choose(&picked);
                                        }
                                    >
                                        {c.name}
                                    </li>
                                }
                            }
                        />
                    </ul>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> Vec<Country> {
        vec![
            Country::new("AU", "Australia"),
            Country::new("AT", "Austria"),
            Country::new("FR", "France"),
            Country::new("GB", "United Kingdom"),
            Country::new("US", "United States"),
        ]
    }

    fn names(cs: &[Country]) -> Vec<&str> {
        cs.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_filter_empty_query_suggests_nothing() {
        assert!(filter_countries(&list(), "", 10).is_empty());
        assert!(filter_countries(&list(), "   ", 10).is_empty());
    }

    #[test]
    fn test_filter_prefix_matches_first() {
        // "a" is a prefix of Australia/Austria and a substring of France/United States.
        let got = filter_countries(&list(), "a", 10);
        assert_eq!(names(&got), vec!["Australia", "Austria", "France", "United States"]);
    }

    #[test]
    fn test_filter_is_case_insensitive_and_trimmed() {
        let got = filter_countries(&list(), "  UNITED ", 10);
        assert_eq!(names(&got), vec!["United Kingdom", "United States"]);
    }

    #[test]
    fn test_filter_respects_limit() {
        let got = filter_countries(&list(), "a", 2);
        assert_eq!(names(&got), vec!["Australia", "Austria"]);
    }

    #[test]
    fn test_find_by_name_exact_ignoring_case() {
        let l = list();
        assert_eq!(find_by_name(&l, " france ").map(|c| c.code.as_str()), Some("FR"));
        assert!(find_by_name(&l, "Fran").is_none());
        assert!(find_by_name(&l, "  ").is_none());
    }

    #[test]
    fn test_find_by_name_folds_non_ascii_case() {
        let l = vec![Country::new("CI", "Côte d'Ivoire"), Country::new("AX", "Åland Islands")];
        assert_eq!(find_by_name(&l, "CÔTE D'IVOIRE").map(|c| c.code.as_str()), Some("CI"));
        assert_eq!(find_by_name(&l, "åLAND islands").map(|c| c.code.as_str()), Some("AX"));
        // Whatever the menu suggests for an exact name, typing it also selects it.
        assert_eq!(filter_countries(&l, "CÔTE D'IVOIRE", 10).len(), 1);
    }
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::config::GuardConfig;
    use crate::guard::{resolve_select, FormSubmitGuard};
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::{Element, HtmlInputElement, HtmlSelectElement};

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount_picker() -> (Element, impl Sized) {
        let doc = web_sys::window()
            .and_then(|w| w.document())
            .expect("test page should have a document");
        let root = doc.create_element("div").expect("create div");
        doc.body().expect("body").append_child(&root).expect("append");

        let host = root.clone().dyn_into::<web_sys::HtmlElement>().expect("html element");
        let handle = leptos::mount::mount_to(host, || {
            view! {
                <form>
                    <CountryPicker
                        id="pick"
                        name="pick"
                        label="Country"
                        default_code="FR"
                        countries=vec![Country::new("FR", "France"), Country::new("GB", "United Kingdom")]
                    />
                </form>
            }
        });
        (root, handle)
    }

    fn find<T: JsCast>(root: &Element, selector: &str) -> T {
        root.query_selector(selector)
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<T>().ok())
            .expect("element should exist")
    }

    #[wasm_bindgen_test]
    fn test_default_code_preselects_country() {
        let (root, handle) = mount_picker();
        let input: HtmlInputElement = find(&root, "#pick");
        let select: HtmlSelectElement = find(&root, "#pick-select");

        assert_eq!(input.value(), "France");
        assert_eq!(select.selected_index(), 1);
        assert_eq!(select.value(), "FR");

        drop(handle);
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_rendered_markup_resolves_both_ways() {
        let (root, handle) = mount_picker();
        let input: HtmlInputElement = find(&root, "#pick");
        let select: HtmlSelectElement = find(&root, "#pick-select");
        let config = GuardConfig::default();

        assert!(resolve_select(&input, &config).is_some_and(|s| s == select));

        input.remove_attribute("data-select-id").expect("remove attr");
        assert!(resolve_select(&input, &config).is_some_and(|s| s == select));

        drop(handle);
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_guard_resets_cleared_picker() {
        let (root, handle) = mount_picker();
        let input: HtmlInputElement = find(&root, "#pick");
        let select: HtmlSelectElement = find(&root, "#pick-select");

        let guard = FormSubmitGuard::install_in(&root, GuardConfig::default())
            .expect("install")
            .expect("picker is inside a form");
        assert_eq!(guard.widget_count(), 1);

        input.set_value("  ");
        assert_eq!(guard.normalize(), 1);
        assert_eq!(select.selected_index(), 0);
        assert_eq!(select.value(), "");

        drop(guard);
        drop(handle);
        root.remove();
    }
}
