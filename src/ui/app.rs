use std::io::stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::api::{HttpTransport, Transport};
use crate::catalog::{Catalog, CountryCode};
use crate::config::{Config, UiColors};
use crate::draft::{CommitOutcome, CommitRequest, ProfileEditor, ProfileField};
use crate::error::{ApiError, EditError};
use crate::filter::{FilterState, QueryHistory};
use crate::model::{ArtistProfile, SearchPage, TrendPoint};
use crate::search::{SearchCoordinator, SearchStatus, SearchTicket};
use crate::selection::{SelectionController, TrendTicket};

use super::draw;
use super::edit::InlineEditor;
use super::picker::{CountryPicker, Picker, PickerTarget, TagPicker};

const TICK: Duration = Duration::from_millis(100);

/// Results of background requests, delivered to the event loop.
#[derive(Debug)]
pub enum Completion {
    Search(SearchTicket, Result<SearchPage, ApiError>),
    Trends(TrendTicket, Result<Vec<TrendPoint>, ApiError>),
    Commit(CommitRequest, Result<ArtistProfile, ApiError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    SearchInput,
}

pub struct HelpModal {
    pub scroll: usize,
    pub total_lines: usize,
    pub viewport_height: usize,
}

impl HelpModal {
    pub fn new(total_lines: usize) -> Self {
        Self {
            scroll: 0,
            total_lines,
            viewport_height: 0,
        }
    }

    pub fn scroll_down(&mut self, lines: usize) {
        let max_scroll = self.total_lines.saturating_sub(self.viewport_height);
        self.scroll = (self.scroll + lines).min(max_scroll);
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn can_scroll_up(&self) -> bool {
        self.scroll > 0
    }

    pub fn can_scroll_down(&self) -> bool {
        self.scroll + self.viewport_height < self.total_lines
    }
}

pub struct HelpSection {
    pub title: &'static str,
    pub entries: Vec<HelpEntry>,
}

pub struct HelpEntry {
    pub action: &'static str,
    pub keys: String,
}

pub struct App<'a> {
    config: &'a Config,
    catalog: &'a Catalog,
    transport: HttpTransport,
    runtime: Handle,
    completions_tx: UnboundedSender<Completion>,
    completions_rx: UnboundedReceiver<Completion>,
    pub filter: FilterState,
    history: QueryHistory,
    pub search: SearchCoordinator,
    search_task: Option<JoinHandle<()>>,
    pub selection: SelectionController,
    pub editor: Option<ProfileEditor>,
    pub field_input: InlineEditor,
    pub field_index: usize,
    pub search_input: Input,
    pub focus: Focus,
    pub list_index: usize,
    pub picker: Option<Picker>,
    pub help_modal: Option<HelpModal>,
    pub status: Option<String>,
}

impl<'a> App<'a> {
    pub fn new(
        config: &'a Config,
        catalog: &'a Catalog,
        transport: HttpTransport,
        runtime: Handle,
        initial_query: &str,
    ) -> Self {
        let filter = FilterState::from_query(initial_query, catalog);
        let history = QueryHistory::new(filter.query());
        let search_input = Input::new(filter.filter().text.clone());
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        Self {
            config,
            catalog,
            transport,
            runtime,
            completions_tx,
            completions_rx,
            filter,
            history,
            search: SearchCoordinator::new(),
            search_task: None,
            selection: SelectionController::new(),
            editor: None,
            field_input: InlineEditor::default(),
            field_index: 0,
            search_input,
            focus: Focus::List,
            list_index: 0,
            picker: None,
            help_modal: None,
            status: None,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        self.start_search(false);
        let result = self.event_loop(&mut terminal);
        self.shutdown();

        disable_raw_mode()?;
        terminal.backend_mut().execute(LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop<B>(&mut self, terminal: &mut Terminal<B>) -> Result<()>
    where
        B: ratatui::backend::Backend,
    {
        loop {
            self.drain_completions();
            draw::render(terminal, self)?;

            if event::poll(TICK)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key)? {
                            break;
                        }
                    }
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        if let Some(task) = self.search_task.take() {
            task.abort();
        }
        self.search.close();
        self.selection.close();
        info!("dashboard closed");
    }

    // =========================================================================
    // Background requests
    // =========================================================================

    fn start_search(&mut self, force: bool) {
        let ticket = if force {
            self.search.refresh(self.filter.filter())
        } else {
            self.search.begin(self.filter.filter())
        };
        let Some(ticket) = ticket else {
            return;
        };

        // the superseded response would be dropped anyway
        if let Some(task) = self.search_task.take() {
            task.abort();
        }
        self.list_index = 0;

        let transport = self.transport.clone();
        let tx = self.completions_tx.clone();
        self.search_task = Some(self.runtime.spawn(async move {
            let result = transport.search(ticket.key()).await;
            let _ = tx.send(Completion::Search(ticket, result));
        }));
    }

    fn spawn_trends(&self, ticket: TrendTicket) {
        let transport = self.transport.clone();
        let tx = self.completions_tx.clone();
        self.runtime.spawn(async move {
            let result = transport.trends(ticket.user_id()).await;
            let _ = tx.send(Completion::Trends(ticket, result));
        });
    }

    fn spawn_commit(&self, request: CommitRequest) {
        let transport = self.transport.clone();
        let tx = self.completions_tx.clone();
        self.runtime.spawn(async move {
            let result = transport
                .update_profile(request.id(), request.diff())
                .await;
            let _ = tx.send(Completion::Commit(request, result));
        });
    }

    fn drain_completions(&mut self) {
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.apply_completion(completion);
        }
    }

    fn apply_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Search(ticket, result) => {
                if self.search.resolve(ticket, result) {
                    self.clamp_list_index();
                    if let SearchStatus::Failed(message) = self.search.snapshot().status {
                        self.set_status(format!("Search failed: {}", message));
                    }
                }
            }
            Completion::Trends(ticket, result) => {
                let failed = result.as_ref().err().map(|err| err.kind());
                if self.selection.resolve(ticket, result) {
                    if let Some(kind) = failed {
                        self.set_status(format!("Trends unavailable ({} error)", kind));
                    }
                }
            }
            Completion::Commit(request, result) => {
                let saved = result.as_ref().ok().cloned();
                let editor = self
                    .editor
                    .as_mut()
                    .filter(|editor| editor.original().id == request.id());
                match editor {
                    Some(editor) => match editor.finish_commit(request, result) {
                        Ok(CommitOutcome::Saved(_)) => self.set_status("Profile saved"),
                        Ok(CommitOutcome::Unchanged) => {}
                        Err(err) => self.set_status(format!("Save failed: {}", err)),
                    },
                    None => {
                        if let Err(err) = result {
                            self.set_status(format!("Save failed: {}", err));
                        }
                    }
                }
                if let Some(profile) = saved {
                    self.search.replace_item(&profile);
                    self.selection.replace_profile(profile);
                }
            }
        }
    }

    // =========================================================================
    // Filter and history
    // =========================================================================

    /// Follow up on a local filter edit. `record` pushes the new query onto
    /// the back/forward history.
    fn apply_filter_change(&mut self, query: Option<String>, record: bool) {
        let Some(query) = query else {
            return;
        };
        debug!(query = %query, "filter changed");
        if record {
            self.history.push(query);
        }
        self.start_search(false);
    }

    fn navigate_history(&mut self, back: bool) {
        let target = if back {
            self.history.back()
        } else {
            self.history.forward()
        };
        let Some(query) = target.map(str::to_string) else {
            self.set_status(if back {
                "Already at oldest search"
            } else {
                "Already at newest search"
            });
            return;
        };
        if self.filter.navigate(&query, self.catalog) {
            self.search_input = Input::new(self.filter.filter().text.clone());
            self.start_search(false);
        }
    }

    fn set_filter_country(&mut self, country: CountryCode) {
        let change = self.filter.set_country(country);
        self.apply_filter_change(change, true);
    }

    fn toggle_filter_tag(&mut self, tag: &str) {
        if let Some(slug) = self.catalog.resolve_tag(tag) {
            let change = self.filter.toggle_tag(slug);
            self.apply_filter_change(change, true);
        }
    }

    // =========================================================================
    // Key handling
    // =========================================================================

    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        // Ctrl+C always quits (hardcoded for safety)
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            return Ok(true);
        }

        if self.help_modal.is_some() {
            self.handle_help_modal_key(key);
            return Ok(false);
        }

        if self.picker.is_some() {
            self.handle_picker_key(key);
            return Ok(false);
        }

        if self.field_input.active {
            self.handle_field_input_key(key);
            return Ok(false);
        }

        if self.is_editing() {
            self.handle_editor_key(key);
            return Ok(false);
        }

        if self.focus == Focus::SearchInput {
            self.handle_search_input_key(key);
            return Ok(false);
        }

        self.handle_list_key(key)
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Result<bool> {
        let global = &self.config.keys.global;
        let list = &self.config.keys.list;

        if key_matches_any(&key, &global.quit) {
            return Ok(true);
        }

        if key_matches_any(&key, &global.search) {
            self.focus = Focus::SearchInput;
            return Ok(false);
        }

        if key_matches_any(&key, &global.help) {
            self.show_help();
            return Ok(false);
        }

        if key_matches_any(&key, &global.refresh) {
            self.start_search(true);
            self.retry_selection();
            return Ok(false);
        }

        if key_matches_any(&key, &global.back) {
            self.navigate_history(true);
            return Ok(false);
        }

        if key_matches_any(&key, &global.forward) {
            self.navigate_history(false);
            return Ok(false);
        }

        if key_matches_any(&key, &global.edit) {
            self.begin_edit();
            return Ok(false);
        }

        if key_matches_any(&key, &global.country) {
            self.picker = Some(Picker::Country(CountryPicker::new(PickerTarget::Filter)));
            return Ok(false);
        }

        if key_matches_any(&key, &global.tags) {
            self.picker = Some(Picker::Tags(TagPicker::new(PickerTarget::Filter)));
            return Ok(false);
        }

        if key_matches_any(&key, &global.clear) {
            let change = self.filter.reset();
            self.search_input = Input::default();
            self.apply_filter_change(change, true);
            return Ok(false);
        }

        if key_matches_any(&key, &list.next) {
            self.move_selection(1);
            return Ok(false);
        }

        if key_matches_any(&key, &list.prev) {
            self.move_selection(-1);
            return Ok(false);
        }

        if key_matches_any(&key, &list.open) {
            self.open_selected();
            return Ok(false);
        }

        if key_matches_any(&key, &list.close) {
            self.selection.deselect();
            self.editor = None;
            return Ok(false);
        }

        if key_matches_any(&key, &list.next_page) {
            if self.search.snapshot().has_next {
                let change = self.filter.next_page();
                self.apply_filter_change(change, true);
            } else {
                self.set_status("No more results");
            }
            return Ok(false);
        }

        if key_matches_any(&key, &list.prev_page) {
            let change = self.filter.prev_page();
            self.apply_filter_change(change, true);
            return Ok(false);
        }

        Ok(false)
    }

    fn handle_search_input_key(&mut self, key: KeyEvent) {
        let input_keys = &self.config.keys.search_input;

        if key_matches_any(&key, &input_keys.cancel) || key_matches_any(&key, &input_keys.confirm)
        {
            self.focus = Focus::List;
            let query = self.filter.query().to_string();
            self.history.push(query);
            return;
        }

        if let Some(change) = self.search_input.handle_event(&Event::Key(key)) {
            if change.value {
                let text = self.search_input.value().to_string();
                // typing is not recorded per keystroke, only on leaving the input
                let change = self.filter.set_text(&text);
                self.apply_filter_change(change, false);
            }
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let editor_keys = &self.config.keys.editor;

        if key_matches_any(&key, &editor_keys.cancel) {
            if let Some(editor) = self.editor.as_mut() {
                editor.discard();
            }
            self.set_status("Changes discarded");
            return;
        }

        if key_matches_any(&key, &editor_keys.next) {
            self.field_index = (self.field_index + 1).min(ProfileField::ALL.len() - 1);
            return;
        }

        if key_matches_any(&key, &editor_keys.prev) {
            self.field_index = self.field_index.saturating_sub(1);
            return;
        }

        if self.editor.as_ref().is_some_and(|editor| editor.is_saving()) {
            // the draft is frozen until the update answers
            return;
        }

        if key_matches_any(&key, &editor_keys.save) {
            self.save_draft();
            return;
        }

        if key_matches_any(&key, &editor_keys.confirm) {
            self.edit_focused_field();
        }
    }

    fn handle_field_input_key(&mut self, key: KeyEvent) {
        let editor_keys = &self.config.keys.editor;

        if key_matches_any(&key, &editor_keys.cancel) {
            self.field_input.cancel();
            return;
        }

        if key_matches_any(&key, &editor_keys.confirm) {
            if let Some((field, value)) = self.field_input.finish() {
                self.apply_draft_field(field, &value);
            }
            return;
        }

        self.field_input.handle_key_event(key);
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        let picker_keys = &self.config.keys.picker;
        let Some(picker) = self.picker.as_mut() else {
            return;
        };

        if key_matches_any(&key, &picker_keys.cancel) {
            self.picker = None;
            return;
        }

        match picker {
            Picker::Country(country) => {
                if key_matches_any(&key, &picker_keys.next) {
                    let len = country.matches(self.catalog).len();
                    country.select_next(len);
                } else if key_matches_any(&key, &picker_keys.prev) {
                    country.select_prev();
                } else if key_matches_any(&key, &picker_keys.reset) {
                    let target = country.target;
                    self.picker = None;
                    self.choose_country(target, CountryCode::none());
                } else if key_matches_any(&key, &picker_keys.confirm) {
                    let target = country.target;
                    let chosen = country.current(self.catalog).cloned();
                    self.picker = None;
                    if let Some(chosen) = chosen {
                        self.choose_country(target, chosen);
                    }
                } else {
                    country.handle_input(key);
                }
            }
            Picker::Tags(tags) => {
                if key_matches_any(&key, &picker_keys.next) {
                    tags.select_next(self.catalog.canonical_tags().len());
                } else if key_matches_any(&key, &picker_keys.prev) {
                    tags.select_prev();
                } else if key_matches_any(&key, &picker_keys.toggle) {
                    let target = tags.target;
                    if let Some(tag) = tags.current(self.catalog) {
                        match target {
                            PickerTarget::Filter => self.toggle_filter_tag(tag),
                            PickerTarget::Draft => self.toggle_draft_tag(tag),
                        }
                    }
                } else if key_matches_any(&key, &picker_keys.reset) {
                    match tags.target {
                        PickerTarget::Filter => {
                            let change = self.filter.update(|filter| filter.tags.clear());
                            self.apply_filter_change(change, true);
                        }
                        PickerTarget::Draft => self.apply_draft_field(ProfileField::Tags, ""),
                    }
                } else if key_matches_any(&key, &picker_keys.confirm) {
                    self.picker = None;
                }
            }
        }
    }

    fn choose_country(&mut self, target: PickerTarget, country: CountryCode) {
        match target {
            PickerTarget::Filter => self.set_filter_country(country),
            PickerTarget::Draft => {
                let code = country.wire_code();
                self.apply_draft_field(ProfileField::Country, &code);
            }
        }
    }

    // =========================================================================
    // Selection and editing
    // =========================================================================

    fn move_selection(&mut self, delta: isize) {
        let len = self.search.snapshot().items.len();
        if len == 0 {
            self.list_index = 0;
            return;
        }
        let next = self.list_index as isize + delta;
        self.list_index = next.clamp(0, len as isize - 1) as usize;
    }

    fn clamp_list_index(&mut self) {
        let len = self.search.snapshot().items.len();
        if self.list_index >= len {
            self.list_index = len.saturating_sub(1);
        }
    }

    fn open_selected(&mut self) {
        let Some(profile) = self.search.snapshot().items.get(self.list_index).cloned() else {
            return;
        };
        let same = self.selection.selected_id().as_deref() == Some(profile.user_id.as_str());

        if let Some(ticket) = self.selection.select(profile.clone()) {
            self.spawn_trends(ticket);
        }

        if !same || self.editor.is_none() {
            if self.is_editing() {
                self.set_status("Unsaved draft discarded");
            }
            self.editor = Some(ProfileEditor::new(profile));
            self.field_input.cancel();
            self.field_index = 0;
        }
    }

    /// Re-request trends for the open entry when its last fetch failed.
    fn retry_selection(&mut self) {
        if let Some(profile) = self.selection.view().profile().cloned() {
            if let Some(ticket) = self.selection.select(profile) {
                self.spawn_trends(ticket);
            }
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editor.as_ref().map(ProfileEditor::is_editing).unwrap_or(false)
    }

    pub fn focused_field(&self) -> ProfileField {
        ProfileField::ALL[self.field_index.min(ProfileField::ALL.len() - 1)]
    }

    fn begin_edit(&mut self) {
        match self.editor.as_mut() {
            Some(editor) => {
                editor.enter_edit();
                self.field_index = 0;
            }
            None => self.set_status("Open a profile to edit it"),
        }
    }

    fn edit_focused_field(&mut self) {
        let field = self.focused_field();
        match field {
            ProfileField::Country => {
                self.picker = Some(Picker::Country(CountryPicker::new(PickerTarget::Draft)));
            }
            ProfileField::Tags => {
                self.picker = Some(Picker::Tags(TagPicker::new(PickerTarget::Draft)));
            }
            text_field => {
                let Some(editor) = self.editor.as_ref() else {
                    return;
                };
                let current = editor.view().value(text_field).to_string();
                self.field_input.start(&current, text_field);
            }
        }
    }

    fn apply_draft_field(&mut self, field: ProfileField, value: &str) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        if let Err(err) = editor.set_field(self.catalog, field, value) {
            self.set_status(err.to_string());
        }
    }

    fn toggle_draft_tag(&mut self, tag: &str) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        if let Err(err) = editor.toggle_tag(self.catalog, tag) {
            self.set_status(err.to_string());
        }
    }

    fn save_draft(&mut self) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        match editor.begin_commit() {
            Ok(Some(request)) => {
                self.set_status("Saving...");
                self.spawn_commit(request);
            }
            Ok(None) => self.set_status("No changes"),
            Err(EditError::NotEditing) => {}
            Err(err) => self.set_status(err.to_string()),
        }
    }

    fn set_status<S: Into<String>>(&mut self, message: S) {
        self.status = Some(message.into());
    }

    pub fn ui_colors(&self) -> &UiColors {
        &self.config.ui.colors
    }

    pub fn list_width(&self) -> u16 {
        self.config.ui.list_width
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    pub fn history_position(&self) -> usize {
        self.history.len()
    }

    // =========================================================================
    // Help Modal
    // =========================================================================

    /// Generate help content from current keybindings configuration
    pub fn help_entries(&self) -> Vec<HelpSection> {
        let keys = &self.config.keys;
        let entry = |action: &'static str, bindings: &[String]| HelpEntry {
            action,
            keys: bindings.join(", "),
        };

        vec![
            HelpSection {
                title: "Global",
                entries: vec![
                    entry("Quit", &keys.global.quit),
                    entry("Search", &keys.global.search),
                    entry("Help", &keys.global.help),
                    entry("Refresh", &keys.global.refresh),
                    entry("Back", &keys.global.back),
                    entry("Forward", &keys.global.forward),
                    entry("Edit profile", &keys.global.edit),
                    entry("Filter country", &keys.global.country),
                    entry("Filter tags", &keys.global.tags),
                    entry("Clear filters", &keys.global.clear),
                ],
            },
            HelpSection {
                title: "Directory",
                entries: vec![
                    entry("Next", &keys.list.next),
                    entry("Previous", &keys.list.prev),
                    entry("Open", &keys.list.open),
                    entry("Close", &keys.list.close),
                    entry("Next page", &keys.list.next_page),
                    entry("Previous page", &keys.list.prev_page),
                ],
            },
            HelpSection {
                title: "Search Input",
                entries: vec![
                    entry("Back to list", &keys.search_input.cancel),
                    entry("Done", &keys.search_input.confirm),
                ],
            },
            HelpSection {
                title: "Pickers",
                entries: vec![
                    entry("Close", &keys.picker.cancel),
                    entry("Choose", &keys.picker.confirm),
                    entry("Next", &keys.picker.next),
                    entry("Previous", &keys.picker.prev),
                    entry("Toggle tag", &keys.picker.toggle),
                    entry("Reset", &keys.picker.reset),
                ],
            },
            HelpSection {
                title: "Editor",
                entries: vec![
                    entry("Discard / cancel", &keys.editor.cancel),
                    entry("Edit field / apply", &keys.editor.confirm),
                    entry("Next field", &keys.editor.next),
                    entry("Previous field", &keys.editor.prev),
                    entry("Save", &keys.editor.save),
                ],
            },
        ]
    }

    fn help_total_lines(&self) -> usize {
        let sections = self.help_entries();
        // header plus blank separator per section
        sections.iter().map(|section| section.entries.len() + 2).sum()
    }

    pub fn show_help(&mut self) {
        let total_lines = self.help_total_lines();
        self.help_modal = Some(HelpModal::new(total_lines));
    }

    fn handle_help_modal_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc) || matches!(key.code, KeyCode::Char('q')) {
            self.help_modal = None;
            return;
        }

        let Some(modal) = self.help_modal.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => modal.scroll_down(1),
            KeyCode::Char('k') | KeyCode::Up => modal.scroll_up(1),
            KeyCode::PageDown => {
                let page = modal.viewport_height.saturating_sub(1).max(1);
                modal.scroll_down(page);
            }
            KeyCode::PageUp => {
                let page = modal.viewport_height.saturating_sub(1).max(1);
                modal.scroll_up(page);
            }
            _ => {}
        }
    }
}

/// Check if the key event matches any of the bindings in the list
pub fn key_matches_any(event: &KeyEvent, bindings: &[String]) -> bool {
    bindings.iter().any(|b| key_matches_single(event, b))
}

/// Check if the key event matches a single binding string
fn key_matches_single(event: &KeyEvent, binding: &str) -> bool {
    let trimmed = binding.trim();
    if trimmed.is_empty() {
        return false;
    }

    // Disallow Ctrl/Alt/Super modifiers (we don't support them)
    let disallowed = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER;
    if event.modifiers.intersects(disallowed) {
        return false;
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "enter" => matches!(event.code, KeyCode::Enter),
        "tab" => matches!(event.code, KeyCode::Tab),
        "backtab" | "shift+tab" => matches!(event.code, KeyCode::BackTab),
        "backspace" => matches!(event.code, KeyCode::Backspace),
        "esc" | "escape" => matches!(event.code, KeyCode::Esc),
        "space" => matches!(event.code, KeyCode::Char(' ')),
        "up" => matches!(event.code, KeyCode::Up),
        "down" => matches!(event.code, KeyCode::Down),
        "left" => matches!(event.code, KeyCode::Left),
        "right" => matches!(event.code, KeyCode::Right),
        "pageup" | "page_up" => matches!(event.code, KeyCode::PageUp),
        "pagedown" | "page_down" => matches!(event.code, KeyCode::PageDown),
        "home" => matches!(event.code, KeyCode::Home),
        "end" => matches!(event.code, KeyCode::End),
        name if name.len() > 1 && name.starts_with('f') => name[1..]
            .parse::<u8>()
            .map(|n| (1..=12).contains(&n) && matches!(event.code, KeyCode::F(f) if f == n))
            .unwrap_or(false),
        // Single character - case-sensitive (m != M, since M requires Shift)
        _ => {
            let mut chars = trimmed.chars();
            if let (Some(first), None) = (chars.next(), chars.next()) {
                matches!(event.code, KeyCode::Char(c) if c == first)
            } else {
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn bindings(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_named_keys_match() {
        assert!(key_matches_any(&key(KeyCode::Enter), &bindings(&["Enter"])));
        assert!(key_matches_any(&key(KeyCode::Esc), &bindings(&["escape"])));
        assert!(key_matches_any(&key(KeyCode::BackTab), &bindings(&["Backtab"])));
        assert!(key_matches_any(&key(KeyCode::PageDown), &bindings(&["PageDown"])));
        assert!(key_matches_any(&key(KeyCode::F(5)), &bindings(&["F5"])));
        assert!(!key_matches_any(&key(KeyCode::F(5)), &bindings(&["F6"])));
        assert!(!key_matches_any(&key(KeyCode::F(5)), &bindings(&["F55"])));
    }

    #[test]
    fn test_single_chars_are_case_sensitive() {
        assert!(key_matches_any(&key(KeyCode::Char('q')), &bindings(&["q"])));
        assert!(!key_matches_any(&key(KeyCode::Char('Q')), &bindings(&["q"])));
        assert!(key_matches_any(&key(KeyCode::Char('f')), &bindings(&["f"])));
        assert!(key_matches_any(&key(KeyCode::Char('[')), &bindings(&["["])));
    }

    #[test]
    fn test_modifiers_never_match() {
        let ctrl_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(!key_matches_any(&ctrl_q, &bindings(&["q"])));
    }

    #[test]
    fn test_help_modal_scroll_is_bounded() {
        let mut modal = HelpModal::new(10);
        modal.viewport_height = 4;
        modal.scroll_down(100);
        assert_eq!(modal.scroll, 6);
        assert!(!modal.can_scroll_down());
        modal.scroll_up(2);
        assert!(modal.can_scroll_up());
        assert!(modal.can_scroll_down());
    }
}
