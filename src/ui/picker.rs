use crossterm::event::{Event, KeyEvent};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::catalog::{Catalog, CountryCode};

/// What a picker choice is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerTarget {
    /// The directory filter
    Filter,
    /// The open profile draft
    Draft,
}

/// Country chooser with a title filter.
#[derive(Debug, Clone)]
pub struct CountryPicker {
    pub target: PickerTarget,
    query: Input,
    selected: usize,
}

impl CountryPicker {
    pub fn new(target: PickerTarget) -> Self {
        Self {
            target,
            query: Input::default(),
            selected: 0,
        }
    }

    pub fn query(&self) -> &str {
        self.query.value()
    }

    pub fn visual_cursor(&self) -> usize {
        self.query.visual_cursor()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn matches<'c>(&self, catalog: &'c Catalog) -> Vec<&'c CountryCode> {
        catalog.search_countries(self.query.value())
    }

    pub fn current<'c>(&self, catalog: &'c Catalog) -> Option<&'c CountryCode> {
        self.matches(catalog).get(self.selected).copied()
    }

    /// Feed a key to the title filter. The cursor jumps back to the first
    /// match whenever the filter text changes.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match self.query.handle_event(&Event::Key(key)) {
            Some(change) => {
                if change.value {
                    self.selected = 0;
                }
                true
            }
            None => false,
        }
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

/// Tag toggler over the canonical vocabulary.
#[derive(Debug, Clone)]
pub struct TagPicker {
    pub target: PickerTarget,
    selected: usize,
}

impl TagPicker {
    pub fn new(target: PickerTarget) -> Self {
        Self {
            target,
            selected: 0,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn current<'c>(&self, catalog: &'c Catalog) -> Option<&'c str> {
        catalog
            .canonical_tags()
            .get(self.selected)
            .map(String::as_str)
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

#[derive(Debug, Clone)]
pub enum Picker {
    Country(CountryPicker),
    Tags(TagPicker),
}

impl Picker {
    pub fn target(&self) -> PickerTarget {
        match self {
            Picker::Country(picker) => picker.target,
            Picker::Tags(picker) => picker.target,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Picker::Country(_) => "COUNTRY",
            Picker::Tags(_) => "TAGS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_country_filter_resets_cursor() {
        let catalog = Catalog::builtin().unwrap();
        let mut picker = CountryPicker::new(PickerTarget::Filter);
        picker.select_next(10);
        picker.select_next(10);
        assert_eq!(picker.selected(), 2);

        for c in "united".chars() {
            picker.handle_input(key(c));
        }
        assert_eq!(picker.selected(), 0);
        let titles: Vec<&str> = picker
            .matches(&catalog)
            .iter()
            .map(|country| country.title.as_str())
            .collect();
        assert!(titles.contains(&"United States"));
        assert!(titles.contains(&"United Kingdom"));
        assert!(!titles.contains(&"France"));
    }

    #[test]
    fn test_country_selection_is_clamped() {
        let catalog = Catalog::builtin().unwrap();
        let mut picker = CountryPicker::new(PickerTarget::Draft);
        for c in "france".chars() {
            picker.handle_input(key(c));
        }
        let len = picker.matches(&catalog).len();
        picker.select_next(len);
        picker.select_next(len);
        assert_eq!(picker.current(&catalog).map(|c| c.value.as_str()), Some("FR"));
        picker.select_prev();
        picker.select_prev();
        assert_eq!(picker.selected(), 0);
    }

    #[test]
    fn test_tag_picker_walks_vocabulary() {
        let catalog = Catalog::builtin().unwrap();
        let mut picker = TagPicker::new(PickerTarget::Filter);
        assert_eq!(picker.current(&catalog), Some("Pop"));
        picker.select_next(catalog.canonical_tags().len());
        assert_eq!(picker.current(&catalog), Some("Hip Hop"));
        assert_eq!(Picker::Tags(picker).title(), "TAGS");
    }
}
