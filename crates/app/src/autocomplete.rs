//! Text input with a filtered suggestion panel.

/// Autocomplete state over a fixed option list.
///
/// Filtering is a case-insensitive substring match recomputed on demand; the
/// option lists are small, so there is no index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutocompleteInput {
    options: Vec<String>,
    value: String,
    open: bool,
}

impl AutocompleteInput {
    pub fn new(options: Vec<String>) -> Self {
        Self {
            options,
            value: String::new(),
            open: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
    }

    pub fn focus(&mut self) {
        self.open = true;
    }

    /// Keystroke: the text becomes the value and the panel opens.
    pub fn input(&mut self, text: impl Into<String>) {
        self.value = text.into();
        self.open = true;
    }

    pub fn select(&mut self, option: impl Into<String>) {
        self.value = option.into();
        self.open = false;
    }

    /// Select the `index`-th current suggestion. Returns false if out of range.
    pub fn select_suggestion(&mut self, index: usize) -> bool {
        let Some(choice) = self.suggestions().nth(index).map(str::to_string) else {
            return false;
        };
        self.select(choice);
        true
    }

    pub fn click_outside(&mut self) {
        self.open = false;
    }

    /// The panel is rendered only when open and non-empty.
    pub fn is_open(&self) -> bool {
        self.open && self.suggestions().next().is_some()
    }

    /// Options matching the current value. Each call starts a fresh pass.
    pub fn suggestions(&self) -> Suggestions<'_> {
        Suggestions {
            options: self.options.iter(),
            needle: self.value.to_lowercase(),
        }
    }
}

/// Lazy filtered view over the options; `Clone` to restart from the same point.
#[derive(Debug, Clone)]
pub struct Suggestions<'a> {
    options: std::slice::Iter<'a, String>,
    needle: String,
}

impl<'a> Iterator for Suggestions<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let needle = &self.needle;
        self.options
            .find(|option| option.to_lowercase().contains(needle.as_str()))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comunas() -> AutocompleteInput {
        AutocompleteInput::new(vec![
            "Comuna 1".to_string(),
            "Comuna 10".to_string(),
            "Comuna 2".to_string(),
            "Siloé".to_string(),
        ])
    }

    #[test]
    fn empty_value_suggests_everything() {
        let input = comunas();
        assert_eq!(input.suggestions().count(), 4);
        assert!(!input.is_open());
    }

    #[test]
    fn typing_filters_case_insensitively_and_opens() {
        let mut input = comunas();
        input.input("COMUNA 1");
        let got: Vec<_> = input.suggestions().collect();
        assert_eq!(got, vec!["Comuna 1", "Comuna 10"]);
        assert!(input.is_open());

        input.input("silo");
        assert_eq!(input.suggestions().collect::<Vec<_>>(), vec!["Siloé"]);
    }

    #[test]
    fn no_match_keeps_panel_hidden() {
        let mut input = comunas();
        input.input("zzz");
        assert!(!input.is_open());
        assert_eq!(input.value(), "zzz");
    }

    #[test]
    fn selecting_sets_value_and_closes() {
        let mut input = comunas();
        input.focus();
        input.input("comuna");
        assert!(input.select_suggestion(2));
        assert_eq!(input.value(), "Comuna 2");
        assert!(!input.is_open());
        assert!(!input.select_suggestion(5));
    }

    #[test]
    fn outside_click_closes_panel() {
        let mut input = comunas();
        input.focus();
        assert!(input.is_open());
        input.click_outside();
        assert!(!input.is_open());
    }

    #[test]
    fn suggestions_are_restartable() {
        let mut input = comunas();
        input.input("1");
        let mut first = input.suggestions();
        assert_eq!(first.next(), Some("Comuna 1"));
        let rest = first.clone();
        assert_eq!(rest.collect::<Vec<_>>(), vec!["Comuna 10"]);
        assert_eq!(input.suggestions().count(), 2);
    }
}
