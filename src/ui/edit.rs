use crossterm::event::{Event, KeyEvent};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::draft::ProfileField;

/// Single-line text input bound to one draft field.
#[derive(Default)]
pub struct InlineEditor {
    pub active: bool,
    target: Option<ProfileField>,
    input: Input,
}

impl InlineEditor {
    pub fn start(&mut self, current: &str, target: ProfileField) {
        self.active = true;
        self.target = Some(target);
        self.input = Input::new(current.to_string());
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.target = None;
        self.input.reset();
    }

    /// Close the input and hand back what was typed.
    pub fn finish(&mut self) -> Option<(ProfileField, String)> {
        let target = self.target.take()?;
        let value = self.input.value().to_string();
        self.cancel();
        Some((target, value))
    }

    pub fn target(&self) -> Option<ProfileField> {
        self.target
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn visual_cursor(&self) -> usize {
        self.input.visual_cursor()
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        self.input.handle_event(&Event::Key(key)).is_some()
    }
}
