use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use directories::BaseDirs;
use serde::de::Deserializer;
use serde::Deserialize;
use tracing::warn;

use crate::catalog::{Catalog, DEFAULT_TAGS};

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_NAME: &str = "artdesk";
const API_URL_ENV: &str = "ARTDESK_API_URL";
const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_TREND_RANGE_DAYS: u32 = 7;

#[derive(Debug, Clone)]
pub struct Config {
    pub config_path: PathBuf,
    pub api_url: Option<String>,
    pub request_timeout: Duration,
    pub trend_range_days: u32,
    pub access_token: Option<String>,
    pub tags: Vec<String>,
    pub keys: Keys,
    pub ui: UiConfig,
}

/// Everything the HTTP transport needs, resolved and validated.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL, always ending in `/`
    pub api_url: String,
    pub request_timeout: Duration,
    pub trend_range_days: u32,
    pub access_token: Option<String>,
}

impl Config {
    /// Settings for talking to the directory API.
    pub fn api(&self) -> Result<ApiConfig> {
        let api_url = self.api_url.clone().ok_or_else(|| {
            anyhow!(
                "`api_url` must be specified in {} or via ${}",
                self.config_path.display(),
                API_URL_ENV
            )
        })?;

        Ok(ApiConfig {
            api_url,
            request_timeout: self.request_timeout,
            trend_range_days: self.trend_range_days,
            access_token: self.access_token.clone(),
        })
    }

    /// Build and validate the reference catalog from the configured vocabulary.
    pub fn catalog(&self) -> Result<Catalog> {
        Catalog::new(self.tags.iter().cloned())
            .with_context(|| format!("invalid [catalog] tags in {}", self.config_path.display()))
    }
}

#[derive(Debug, Clone)]
pub struct UiConfig {
    pub colors: UiColors,
    pub list_width: u16,
}

#[derive(Debug, Clone)]
pub struct UiColors {
    pub border: RgbColor,
    pub selection_bg: RgbColor,
    pub selection_fg: RgbColor,
    pub status_fg: RgbColor,
    pub status_bg: RgbColor,
    pub accent: RgbColor,
}

#[derive(Debug, Clone, Copy)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

// =============================================================================
// Key Bindings - Context-aware with multiple bindings per action
// =============================================================================

/// All key bindings organized by context
#[derive(Debug, Clone, Default)]
pub struct Keys {
    /// Keys available whenever no input or modal has focus
    pub global: GlobalKeys,
    /// Keys for the search text input
    pub search_input: SearchInputKeys,
    /// Keys for the directory list
    pub list: ListKeys,
    /// Keys for country/tag pickers
    pub picker: PickerKeys,
    /// Keys for profile edit mode
    pub editor: EditorKeys,
}

#[derive(Debug, Clone)]
pub struct GlobalKeys {
    pub quit: Vec<String>,
    pub search: Vec<String>,
    pub help: Vec<String>,
    pub refresh: Vec<String>,
    pub back: Vec<String>,
    pub forward: Vec<String>,
    pub edit: Vec<String>,
    pub country: Vec<String>,
    pub tags: Vec<String>,
    pub clear: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SearchInputKeys {
    pub cancel: Vec<String>,
    pub confirm: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ListKeys {
    pub next: Vec<String>,
    pub prev: Vec<String>,
    pub open: Vec<String>,
    pub close: Vec<String>,
    pub next_page: Vec<String>,
    pub prev_page: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PickerKeys {
    pub cancel: Vec<String>,
    pub confirm: Vec<String>,
    pub next: Vec<String>,
    pub prev: Vec<String>,
    pub toggle: Vec<String>,
    pub reset: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct EditorKeys {
    pub cancel: Vec<String>,
    pub confirm: Vec<String>,
    pub next: Vec<String>,
    pub prev: Vec<String>,
    pub save: Vec<String>,
}

// =============================================================================
// Default implementations
// =============================================================================

impl Default for GlobalKeys {
    fn default() -> Self {
        Self {
            quit: vec!["q".into()],
            search: vec!["/".into()],
            help: vec!["F1".into(), "?".into()],
            refresh: vec!["F5".into(), "r".into()],
            back: vec!["[".into()],
            forward: vec!["]".into()],
            edit: vec!["e".into(), "F3".into()],
            country: vec!["c".into()],
            tags: vec!["t".into()],
            clear: vec!["x".into()],
        }
    }
}

impl Default for SearchInputKeys {
    fn default() -> Self {
        Self {
            cancel: vec!["Escape".into()],
            confirm: vec!["Enter".into()],
        }
    }
}

impl Default for ListKeys {
    fn default() -> Self {
        Self {
            next: vec!["j".into(), "Down".into()],
            prev: vec!["k".into(), "Up".into()],
            open: vec!["Enter".into(), "l".into(), "Right".into()],
            close: vec!["Escape".into(), "h".into(), "Left".into()],
            next_page: vec!["n".into(), "PageDown".into()],
            prev_page: vec!["p".into(), "PageUp".into()],
        }
    }
}

impl Default for PickerKeys {
    fn default() -> Self {
        Self {
            cancel: vec!["Escape".into()],
            confirm: vec!["Enter".into()],
            next: vec!["Down".into(), "Tab".into()],
            prev: vec!["Up".into(), "Backtab".into()],
            toggle: vec!["Space".into()],
            reset: vec!["F8".into()],
        }
    }
}

impl Default for EditorKeys {
    fn default() -> Self {
        Self {
            cancel: vec!["Escape".into()],
            confirm: vec!["Enter".into()],
            next: vec!["j".into(), "Down".into(), "Tab".into()],
            prev: vec!["k".into(), "Up".into(), "Backtab".into()],
            save: vec!["s".into(), "F2".into()],
        }
    }
}

// =============================================================================
// Serde deserialization types (support both single string and array)
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum KeyBinding {
    Single(String),
    Multiple(Vec<String>),
}

impl KeyBinding {
    fn into_vec(self) -> Vec<String> {
        match self {
            KeyBinding::Single(s) => vec![s],
            KeyBinding::Multiple(v) => v,
        }
    }
}

impl Default for KeyBinding {
    fn default() -> Self {
        KeyBinding::Multiple(vec![])
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct KeysFile {
    global: GlobalKeysFile,
    search_input: SearchInputKeysFile,
    list: ListKeysFile,
    picker: PickerKeysFile,
    editor: EditorKeysFile,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct GlobalKeysFile {
    quit: KeyBinding,
    search: KeyBinding,
    help: KeyBinding,
    refresh: KeyBinding,
    back: KeyBinding,
    forward: KeyBinding,
    edit: KeyBinding,
    country: KeyBinding,
    tags: KeyBinding,
    clear: KeyBinding,
}

impl Default for GlobalKeysFile {
    fn default() -> Self {
        let defaults = GlobalKeys::default();
        Self {
            quit: KeyBinding::Multiple(defaults.quit),
            search: KeyBinding::Multiple(defaults.search),
            help: KeyBinding::Multiple(defaults.help),
            refresh: KeyBinding::Multiple(defaults.refresh),
            back: KeyBinding::Multiple(defaults.back),
            forward: KeyBinding::Multiple(defaults.forward),
            edit: KeyBinding::Multiple(defaults.edit),
            country: KeyBinding::Multiple(defaults.country),
            tags: KeyBinding::Multiple(defaults.tags),
            clear: KeyBinding::Multiple(defaults.clear),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct SearchInputKeysFile {
    cancel: KeyBinding,
    confirm: KeyBinding,
}

impl Default for SearchInputKeysFile {
    fn default() -> Self {
        let defaults = SearchInputKeys::default();
        Self {
            cancel: KeyBinding::Multiple(defaults.cancel),
            confirm: KeyBinding::Multiple(defaults.confirm),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ListKeysFile {
    next: KeyBinding,
    prev: KeyBinding,
    open: KeyBinding,
    close: KeyBinding,
    next_page: KeyBinding,
    prev_page: KeyBinding,
}

impl Default for ListKeysFile {
    fn default() -> Self {
        let defaults = ListKeys::default();
        Self {
            next: KeyBinding::Multiple(defaults.next),
            prev: KeyBinding::Multiple(defaults.prev),
            open: KeyBinding::Multiple(defaults.open),
            close: KeyBinding::Multiple(defaults.close),
            next_page: KeyBinding::Multiple(defaults.next_page),
            prev_page: KeyBinding::Multiple(defaults.prev_page),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct PickerKeysFile {
    cancel: KeyBinding,
    confirm: KeyBinding,
    next: KeyBinding,
    prev: KeyBinding,
    toggle: KeyBinding,
    reset: KeyBinding,
}

impl Default for PickerKeysFile {
    fn default() -> Self {
        let defaults = PickerKeys::default();
        Self {
            cancel: KeyBinding::Multiple(defaults.cancel),
            confirm: KeyBinding::Multiple(defaults.confirm),
            next: KeyBinding::Multiple(defaults.next),
            prev: KeyBinding::Multiple(defaults.prev),
            toggle: KeyBinding::Multiple(defaults.toggle),
            reset: KeyBinding::Multiple(defaults.reset),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct EditorKeysFile {
    cancel: KeyBinding,
    confirm: KeyBinding,
    next: KeyBinding,
    prev: KeyBinding,
    save: KeyBinding,
}

impl Default for EditorKeysFile {
    fn default() -> Self {
        let defaults = EditorKeys::default();
        Self {
            cancel: KeyBinding::Multiple(defaults.cancel),
            confirm: KeyBinding::Multiple(defaults.confirm),
            next: KeyBinding::Multiple(defaults.next),
            prev: KeyBinding::Multiple(defaults.prev),
            save: KeyBinding::Multiple(defaults.save),
        }
    }
}

// =============================================================================
// Conversion from file types to runtime types
// =============================================================================

impl From<KeysFile> for Keys {
    fn from(file: KeysFile) -> Self {
        Self {
            global: file.global.into(),
            search_input: file.search_input.into(),
            list: file.list.into(),
            picker: file.picker.into(),
            editor: file.editor.into(),
        }
    }
}

impl From<GlobalKeysFile> for GlobalKeys {
    fn from(file: GlobalKeysFile) -> Self {
        Self {
            quit: file.quit.into_vec(),
            search: file.search.into_vec(),
            help: file.help.into_vec(),
            refresh: file.refresh.into_vec(),
            back: file.back.into_vec(),
            forward: file.forward.into_vec(),
            edit: file.edit.into_vec(),
            country: file.country.into_vec(),
            tags: file.tags.into_vec(),
            clear: file.clear.into_vec(),
        }
    }
}

impl From<SearchInputKeysFile> for SearchInputKeys {
    fn from(file: SearchInputKeysFile) -> Self {
        Self {
            cancel: file.cancel.into_vec(),
            confirm: file.confirm.into_vec(),
        }
    }
}

impl From<ListKeysFile> for ListKeys {
    fn from(file: ListKeysFile) -> Self {
        Self {
            next: file.next.into_vec(),
            prev: file.prev.into_vec(),
            open: file.open.into_vec(),
            close: file.close.into_vec(),
            next_page: file.next_page.into_vec(),
            prev_page: file.prev_page.into_vec(),
        }
    }
}

impl From<PickerKeysFile> for PickerKeys {
    fn from(file: PickerKeysFile) -> Self {
        Self {
            cancel: file.cancel.into_vec(),
            confirm: file.confirm.into_vec(),
            next: file.next.into_vec(),
            prev: file.prev.into_vec(),
            toggle: file.toggle.into_vec(),
            reset: file.reset.into_vec(),
        }
    }
}

impl From<EditorKeysFile> for EditorKeys {
    fn from(file: EditorKeysFile) -> Self {
        Self {
            cancel: file.cancel.into_vec(),
            confirm: file.confirm.into_vec(),
            next: file.next.into_vec(),
            prev: file.prev.into_vec(),
            save: file.save.into_vec(),
        }
    }
}

/// Normalize a key binding string to a canonical form for collision detection.
/// Single characters preserve case (since 'M' means Shift+m, different from 'm').
/// Multi-character key names are case-insensitive (Enter, ENTER, enter are the same).
fn normalize_binding(binding: &str) -> String {
    let trimmed = binding.trim();
    if trimmed.chars().count() == 1 {
        trimmed.to_string()
    } else {
        trimmed.to_ascii_lowercase()
    }
}

/// Check for collisions within a single context
fn check_context_collisions(bindings: &[(&str, &[String])], context_name: &str) -> Result<()> {
    let mut seen: HashMap<String, &str> = HashMap::new();

    for (action_name, keys) in bindings {
        for key in *keys {
            let normalized = normalize_binding(key);
            if normalized.is_empty() {
                continue;
            }
            if let Some(existing_action) = seen.get(&normalized) {
                bail!(
                    "key binding collision in [keys.{}]: '{}' is bound to both '{}' and '{}'",
                    context_name,
                    key,
                    existing_action,
                    action_name
                );
            }
            seen.insert(normalized, action_name);
        }
    }

    Ok(())
}

/// Validate all key bindings for collisions within each context.
///
/// The directory list shares the screen with global keys, so both are checked
/// as one context.
fn validate_key_bindings(keys: &Keys) -> Result<()> {
    check_context_collisions(
        &[
            ("quit", &keys.global.quit),
            ("search", &keys.global.search),
            ("help", &keys.global.help),
            ("refresh", &keys.global.refresh),
            ("back", &keys.global.back),
            ("forward", &keys.global.forward),
            ("edit", &keys.global.edit),
            ("country", &keys.global.country),
            ("tags", &keys.global.tags),
            ("clear", &keys.global.clear),
            ("next", &keys.list.next),
            ("prev", &keys.list.prev),
            ("open", &keys.list.open),
            ("close", &keys.list.close),
            ("next_page", &keys.list.next_page),
            ("prev_page", &keys.list.prev_page),
        ],
        "global/list",
    )?;

    check_context_collisions(
        &[
            ("cancel", &keys.search_input.cancel),
            ("confirm", &keys.search_input.confirm),
        ],
        "search_input",
    )?;

    check_context_collisions(
        &[
            ("cancel", &keys.picker.cancel),
            ("confirm", &keys.picker.confirm),
            ("next", &keys.picker.next),
            ("prev", &keys.picker.prev),
            ("toggle", &keys.picker.toggle),
            ("reset", &keys.picker.reset),
        ],
        "picker",
    )?;

    check_context_collisions(
        &[
            ("cancel", &keys.editor.cancel),
            ("confirm", &keys.editor.confirm),
            ("next", &keys.editor.next),
            ("prev", &keys.editor.prev),
            ("save", &keys.editor.save),
        ],
        "editor",
    )?;

    Ok(())
}

// =============================================================================
// Config file structure
// =============================================================================

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    api_url: Option<String>,
    request_timeout_secs: Option<u64>,
    trend_range_days: Option<u32>,
    access_token: Option<String>,
    access_token_env: Option<String>,
    catalog: CatalogFile,
    keys: KeysFile,
    ui: UiFile,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CatalogFile {
    tags: Option<Vec<String>>,
}

fn config_root() -> Result<PathBuf> {
    let base = BaseDirs::new().context("unable to determine base directories")?;
    let dir = base.config_dir().join(APP_NAME);
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_root()?.join(CONFIG_FILE_NAME))
}

/// Load the configuration file, failing when it does not exist.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => config_path()?,
    };
    if !path.exists() {
        bail!(
            "configuration file not found at {}. Please create it as per docs.",
            path.display()
        );
    }
    read_file(&path)
}

/// Load the configuration file if present, otherwise built-in defaults.
///
/// Used by subcommands that never touch the network.
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => config_path()?,
    };
    if path.exists() {
        read_file(&path)
    } else {
        from_toml_str("", path)
    }
}

fn read_file(path: &Path) -> Result<Config> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration file at {}", path.display()))?;
    from_toml_str(&raw, path.to_path_buf())
}

/// Parse configuration from TOML text. `path` is only used in messages.
pub fn from_toml_str(raw: &str, path: PathBuf) -> Result<Config> {
    let value: toml::Value = toml::from_str(raw)
        .with_context(|| format!("failed to parse {} as TOML", path.display()))?;

    warn_unknown_keys(&value);

    let cfg_file: ConfigFile = value
        .try_into()
        .with_context(|| format!("failed to deserialize config from {}", path.display()))?;

    let api_url = std::env::var(API_URL_ENV)
        .ok()
        .or(cfg_file.api_url)
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .map(normalize_api_url)
        .transpose()?;

    let request_timeout_secs = cfg_file.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if request_timeout_secs == 0 {
        bail!("`request_timeout_secs` must be greater than zero");
    }

    let trend_range_days = cfg_file.trend_range_days.unwrap_or(DEFAULT_TREND_RANGE_DAYS);
    if trend_range_days == 0 {
        bail!("`trend_range_days` must be greater than zero");
    }

    let access_token = match (cfg_file.access_token, cfg_file.access_token_env) {
        (Some(token), _) => Some(token),
        (None, Some(var)) => Some(
            std::env::var(&var)
                .with_context(|| format!("environment variable `{}` is not set", var))?,
        ),
        (None, None) => None,
    };

    let tags = cfg_file
        .catalog
        .tags
        .unwrap_or_else(|| DEFAULT_TAGS.iter().map(|tag| tag.to_string()).collect());

    let keys: Keys = cfg_file.keys.into();
    validate_key_bindings(&keys)?;

    Ok(Config {
        config_path: path,
        api_url,
        request_timeout: Duration::from_secs(request_timeout_secs),
        trend_range_days,
        access_token,
        tags,
        keys,
        ui: cfg_file.ui.into(),
    })
}

fn normalize_api_url(url: String) -> Result<String> {
    let parsed = url::Url::parse(&url).with_context(|| format!("invalid api_url `{}`", url))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        bail!("api_url must use http or https, got `{}`", parsed.scheme());
    }
    if url.ends_with('/') {
        Ok(url)
    } else {
        Ok(format!("{}/", url))
    }
}

// =============================================================================
// Unknown key warnings
// =============================================================================

fn warn_unknown_keys(value: &toml::Value) {
    let Some(table) = value.as_table() else {
        return;
    };

    let known = HashSet::from([
        "api_url",
        "request_timeout_secs",
        "trend_range_days",
        "access_token",
        "access_token_env",
        "catalog",
        "keys",
        "ui",
    ]);

    for key in table.keys() {
        if !known.contains(key.as_str()) {
            warn!("unknown configuration key `{}`", key);
        }
    }

    if let Some(catalog_val) = table.get("catalog") {
        warn_unknown_in_context(catalog_val, "catalog", &["tags"]);
    }

    if let Some(keys_val) = table.get("keys") {
        warn_unknown_keys_section(keys_val);
    }

    if let Some(ui_val) = table.get("ui") {
        warn_unknown_in_context(ui_val, "ui", &["colors", "list_width"]);
        if let Some(colors) = ui_val.get("colors") {
            warn_unknown_in_context(
                colors,
                "ui.colors",
                &[
                    "border",
                    "selection_bg",
                    "selection_fg",
                    "status_fg",
                    "status_bg",
                    "accent",
                ],
            );
        }
    }
}

fn warn_unknown_keys_section(value: &toml::Value) {
    let Some(table) = value.as_table() else {
        return;
    };

    let known_contexts = HashSet::from(["global", "search_input", "list", "picker", "editor"]);

    for key in table.keys() {
        if !known_contexts.contains(key.as_str()) {
            warn!("unknown keys.* context `{}`", key);
        }
    }

    if let Some(val) = table.get("global") {
        warn_unknown_in_context(
            val,
            "keys.global",
            &[
                "quit", "search", "help", "refresh", "back", "forward", "edit", "country", "tags",
                "clear",
            ],
        );
    }
    if let Some(val) = table.get("search_input") {
        warn_unknown_in_context(val, "keys.search_input", &["cancel", "confirm"]);
    }
    if let Some(val) = table.get("list") {
        warn_unknown_in_context(
            val,
            "keys.list",
            &["next", "prev", "open", "close", "next_page", "prev_page"],
        );
    }
    if let Some(val) = table.get("picker") {
        warn_unknown_in_context(
            val,
            "keys.picker",
            &["cancel", "confirm", "next", "prev", "toggle", "reset"],
        );
    }
    if let Some(val) = table.get("editor") {
        warn_unknown_in_context(
            val,
            "keys.editor",
            &["cancel", "confirm", "next", "prev", "save"],
        );
    }
}

fn warn_unknown_in_context(value: &toml::Value, context: &str, known: &[&str]) {
    let Some(table) = value.as_table() else {
        return;
    };
    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            warn!("unknown {} key `{}`", context, key);
        }
    }
}

// =============================================================================
// UI
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct UiFile {
    colors: UiColorsFile,
    list_width: u16,
}

impl Default for UiFile {
    fn default() -> Self {
        Self {
            colors: UiColorsFile::default(),
            list_width: 44,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct UiColorsFile {
    border: RgbColor,
    selection_bg: RgbColor,
    selection_fg: RgbColor,
    status_fg: RgbColor,
    status_bg: RgbColor,
    accent: RgbColor,
}

impl Default for UiColorsFile {
    fn default() -> Self {
        Self {
            border: RgbColor::new(255, 165, 0),
            selection_bg: RgbColor::new(255, 165, 0),
            selection_fg: RgbColor::new(0, 0, 0),
            status_fg: RgbColor::new(255, 165, 0),
            status_bg: RgbColor::new(0, 0, 0),
            accent: RgbColor::new(80, 200, 120),
        }
    }
}

impl From<UiFile> for UiConfig {
    fn from(file: UiFile) -> Self {
        let list_width = if file.list_width < 20 { 44 } else { file.list_width };
        Self {
            colors: UiColors {
                border: file.colors.border,
                selection_bg: file.colors.selection_bg,
                selection_fg: file.colors.selection_fg,
                status_fg: file.colors.status_fg,
                status_bg: file.colors.status_bg,
                accent: file.colors.accent,
            },
            list_width,
        }
    }
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl<'de> serde::Deserialize<'de> for RgbColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Helper {
            Array([u8; 3]),
            Map { r: u8, g: u8, b: u8 },
        }

        let helper = Helper::deserialize(deserializer)?;
        let (r, g, b) = match helper {
            Helper::Array(values) => (values[0], values[1], values[2]),
            Helper::Map { r, g, b } => (r, g, b),
        };
        Ok(RgbColor { r, g, b })
    }
}
