use web_sys::{HtmlInputElement, HtmlSelectElement};

/// Whitespace-only values count as "nothing typed".
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// One free-text autocomplete input and the `<select>` it stands in for.
///
/// The input is what the user sees; the select is what the form actually
/// submits. Built once when the guard is installed.
#[derive(Clone, Debug)]
pub struct AutocompleteWidget {
    input: HtmlInputElement,
    select: HtmlSelectElement,
}

impl AutocompleteWidget {
    pub fn new(input: HtmlInputElement, select: HtmlSelectElement) -> Self {
        Self { input, select }
    }

    pub fn input(&self) -> &HtmlInputElement {
        &self.input
    }

    pub fn select(&self) -> &HtmlSelectElement {
        &self.select
    }

    pub fn is_empty(&self) -> bool {
        is_blank(&self.input.value())
    }

    /// Reset the select to its first option when the input is empty.
    ///
    /// Returns `true` when the selected index actually changed.
    pub fn normalize(&self) -> bool {
        if !self.is_empty() {
            return false;
        }

        let before = self.select.selected_index();
        self.select.set_selected_index(0);
        self.select.selected_index() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank_empty_string() {
        assert!(is_blank(""));
    }

    #[test]
    fn test_is_blank_spaces_and_tabs() {
        assert!(is_blank("   "));
        assert!(is_blank("\t \t"));
        assert!(is_blank(" \n\r\n "));
    }

    #[test]
    fn test_is_blank_non_breaking_space() {
        assert!(is_blank("\u{00A0}\u{2003}"));
    }

    #[test]
    fn test_single_character_is_not_blank() {
        assert!(!is_blank("a"));
        assert!(!is_blank("  x\t"));
    }

    #[test]
    fn test_country_name_is_not_blank() {
        assert!(!is_blank(" United Kingdom "));
    }
}
