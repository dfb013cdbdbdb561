//! User configuration: keybindings, display preferences, and persistence.
//!
//! Stored as TOML at `$XDG_CONFIG_HOME/ml-quiz/config.toml`
//! (default `~/.config/ml-quiz/config.toml`):
//!
//! ```toml
//! show_timer = true
//! confirm_finish = true
//! questions = "/home/me/banks/nlp.toml"
//!
//! [keys]
//! next = ["Right", "l", "n"]
//! quit = ["q", "Ctrl+x"]
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use anyhow::Context;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::core::engine::Phase;
use crate::core::question::OptionKey;

// ───────────────────────────────────────── actions ───────────

/// Every user action the quiz understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Start,
    SelectA,
    SelectB,
    SelectC,
    SelectD,
    Next,
    Previous,
    Finish,
    ToggleTimer,
    Retake,
    ScrollUp,
    ScrollDown,
    Help,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the help popup and the config file).
    pub const ALL: &[Action] = &[
        Action::Start,
        Action::SelectA,
        Action::SelectB,
        Action::SelectC,
        Action::SelectD,
        Action::Next,
        Action::Previous,
        Action::Finish,
        Action::ToggleTimer,
        Action::Retake,
        Action::ScrollUp,
        Action::ScrollDown,
        Action::Help,
        Action::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::Start => "Start Quiz",
            Action::SelectA => "Choose A",
            Action::SelectB => "Choose B",
            Action::SelectC => "Choose C",
            Action::SelectD => "Choose D",
            Action::Next => "Next Question",
            Action::Previous => "Previous Question",
            Action::Finish => "Finish Quiz",
            Action::ToggleTimer => "Toggle Timer",
            Action::Retake => "Retake Quiz",
            Action::ScrollUp => "Scroll Results Up",
            Action::ScrollDown => "Scroll Results Down",
            Action::Help => "Help",
            Action::Quit => "Quit",
        }
    }

    fn config_key(self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::SelectA => "select_a",
            Action::SelectB => "select_b",
            Action::SelectC => "select_c",
            Action::SelectD => "select_d",
            Action::Next => "next",
            Action::Previous => "previous",
            Action::Finish => "finish",
            Action::ToggleTimer => "toggle_timer",
            Action::Retake => "retake",
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::Help => "help",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }

    /// The option this action picks, if it is one of the four choices.
    pub fn option_key(self) -> Option<OptionKey> {
        match self {
            Action::SelectA => Some(OptionKey::A),
            Action::SelectB => Some(OptionKey::B),
            Action::SelectC => Some(OptionKey::C),
            Action::SelectD => Some(OptionKey::D),
            _ => None,
        }
    }

    /// Whether the action means anything on the screen for `phase`.
    /// The same key may be bound to actions that never share a phase.
    pub fn available_in(self, phase: Phase) -> bool {
        match self {
            Action::Help | Action::Quit => true,
            Action::Start => phase == Phase::NotStarted,
            Action::SelectA
            | Action::SelectB
            | Action::SelectC
            | Action::SelectD
            | Action::Next
            | Action::Previous
            | Action::Finish
            | Action::ToggleTimer => phase == Phase::InProgress,
            Action::Retake | Action::ScrollUp | Action::ScrollDown => phase == Phase::Finished,
        }
    }
}

// ───────────────────────────────────────── key bind ──────────

const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

/// A key code plus the CTRL/ALT/SHIFT modifiers that must accompany it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Compare against an event, ignoring platform modifiers like SUPER.
    /// Character keys ignore SHIFT and letter case, so `?`, `Shift+a` and
    /// Caps Lock all match however the terminal reports them.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mut mask = MODIFIER_MASK;
        let same_key = match (self.code, event.code) {
            (KeyCode::Char(bound), KeyCode::Char(pressed)) => {
                mask.remove(KeyModifiers::SHIFT);
                bound.eq_ignore_ascii_case(&pressed)
            }
            (bound, pressed) => bound == pressed,
        };
        same_key && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// `"Ctrl+c"`, `"→"`, `"a"`.  Arrows render as glyphs for the UI.
    pub fn display(&self) -> String {
        self.render(true)
    }

    /// Config-file spelling: `"Ctrl+c"`, `"Right"`, `"a"`.
    fn to_config_string(&self) -> String {
        self.render(false)
    }

    fn render(&self, glyphs: bool) -> String {
        let mut s = String::new();
        for (flag, name) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(flag) {
                s.push_str(name);
            }
        }
        let key = match (self.code, glyphs) {
            (KeyCode::Up, true) => "↑".to_string(),
            (KeyCode::Down, true) => "↓".to_string(),
            (KeyCode::Left, true) => "←".to_string(),
            (KeyCode::Right, true) => "→".to_string(),
            (KeyCode::Char(' '), _) => "Space".to_string(),
            (KeyCode::Char(c), _) => c.to_string(),
            (KeyCode::F(n), _) => format!("F{n}"),
            (code, _) => NAMED_KEYS
                .iter()
                .find(|(_, k)| *k == code)
                .map(|(name, _)| name.to_string())
                .unwrap_or_else(|| format!("{code:?}")),
        };
        s.push_str(&key);
        s
    }

    /// Parse `"Ctrl+c"`, `"Right"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let (mods, key) = match s.rsplit_once('+') {
            // A lone "+" is the plus key, not a separator.
            Some((m, "")) => (Some(m), "+"),
            Some((m, k)) => (Some(m), k),
            None => (None, s),
        };

        let mut modifiers = KeyModifiers::NONE;
        for part in mods.into_iter().flat_map(|m| m.split('+')).filter(|p| !p.is_empty()) {
            modifiers |= match part.to_ascii_lowercase().as_str() {
                "ctrl" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return None,
            };
        }

        let lower = key.to_ascii_lowercase();
        let code = if let Some((_, code)) = NAMED_KEYS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&lower))
        {
            *code
        } else if lower == "space" {
            KeyCode::Char(' ')
        } else if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
            KeyCode::F(n)
        } else {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        };

        Some(Self { code, modifiers })
    }
}

/// Non-character keys by config-file name.
const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("Up", KeyCode::Up),
    ("Down", KeyCode::Down),
    ("Left", KeyCode::Left),
    ("Right", KeyCode::Right),
    ("Enter", KeyCode::Enter),
    ("Esc", KeyCode::Esc),
    ("Tab", KeyCode::Tab),
    ("Backspace", KeyCode::Backspace),
    ("Delete", KeyCode::Delete),
    ("Home", KeyCode::Home),
    ("End", KeyCode::End),
    ("PageUp", KeyCode::PageUp),
    ("PageDown", KeyCode::PageDown),
];

// ───────────────────────────────────────── config ────────────

/// Application configuration: keybindings and display preferences.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Show a running clock in the question header.
    pub show_timer: bool,
    /// Ask before finishing with unanswered questions.
    pub confirm_finish: bool,
    /// Question bank used when `--questions` is not given.
    pub questions: Option<PathBuf>,
    /// File this config came from; [`AppConfig::save`] writes back here.
    source: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            show_timer: true,
            confirm_finish: true,
            questions: None,
            source: None,
        }
    }
}

/// On-disk shape of the config file.
#[derive(Debug, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default = "enabled")]
    show_timer: bool,
    #[serde(default = "enabled")]
    confirm_finish: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    questions: Option<PathBuf>,
    /// Action name to key list, e.g. `next = ["Right", "l"]`.
    #[serde(default)]
    keys: BTreeMap<String, Vec<String>>,
}

fn enabled() -> bool {
    true
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let key = KeyBind::plain;

        HashMap::from([
            (Start, vec![key(Enter), key(Char('s'))]),
            (SelectA, vec![key(Char('a')), key(Char('1'))]),
            (SelectB, vec![key(Char('b')), key(Char('2'))]),
            (SelectC, vec![key(Char('c')), key(Char('3'))]),
            (SelectD, vec![key(Char('d')), key(Char('4'))]),
            (Next, vec![key(Right), key(Char('l')), key(Char('n'))]),
            (Previous, vec![key(Left), key(Char('h')), key(Char('p'))]),
            (Finish, vec![key(Enter), key(Char('f'))]),
            (ToggleTimer, vec![key(Char('t'))]),
            (Retake, vec![key(Char('r'))]),
            (ScrollUp, vec![key(Up), key(Char('k')), key(PageUp)]),
            (ScrollDown, vec![key(Down), key(Char('j')), key(PageDown)]),
            (Help, vec![key(Char('?'))]),
            (Quit, vec![key(Char('q')), key(Esc)]),
        ])
    }

    /// Find the action bound to `event` that is usable in `phase`.
    pub fn match_key(&self, event: KeyEvent, phase: Phase) -> Option<Action> {
        Action::ALL.iter().copied().find(|action| {
            action.available_in(phase)
                && self
                    .bindings
                    .get(action)
                    .is_some_and(|binds| binds.iter().any(|b| b.matches(event)))
        })
    }

    /// Format the binding list for an action (e.g. `"→/l/n"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(KeyBind::display).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    /// First binding only, for compact hints.
    pub fn short_binding(&self, action: Action) -> String {
        self.bindings
            .get(&action)
            .and_then(|binds| binds.first())
            .map(KeyBind::display)
            .unwrap_or_else(|| "?".into())
    }

    /// Status-bar hint for the screen belonging to `phase`.
    pub fn status_bar_hint(&self, phase: Phase) -> String {
        let k = |a| self.short_binding(a);
        match phase {
            Phase::NotStarted => format!(
                "{}: start | {}: help | {}: quit",
                k(Action::Start),
                k(Action::Help),
                k(Action::Quit)
            ),
            Phase::InProgress => format!(
                "{}-{}: answer | {}/{}: prev/next | {}: finish | {}: help",
                k(Action::SelectA),
                k(Action::SelectD),
                k(Action::Previous),
                k(Action::Next),
                k(Action::Finish),
                k(Action::Help),
            ),
            Phase::Finished => format!(
                "{}/{}: scroll | {}: retake | {}: quit",
                k(Action::ScrollUp),
                k(Action::ScrollDown),
                k(Action::Retake),
                k(Action::Quit)
            ),
        }
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load from `path`; a missing or broken file yields defaults.  Either
    /// way, later saves go to `path`.
    pub fn load_from(path: &Path) -> Self {
        let mut config = match Self::read(path) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!("ignoring config: {e:#}");
                Self::default()
            }
        };
        config.source = Some(path.to_path_buf());
        config
    }

    fn read(path: &Path) -> anyhow::Result<Option<Self>> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()))
            }
        };
        Self::parse_config(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))
            .map(Some)
    }

    /// Write back to the file this config was loaded from.  A config that
    /// was never loaded from disk has nowhere to go and is not saved.
    pub fn save(&self) -> anyhow::Result<()> {
        match &self.source {
            Some(path) => self.save_to(path),
            None => {
                tracing::debug!("config has no file; not saving");
                Ok(())
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(path, self.serialise()?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    fn parse_config(s: &str) -> anyhow::Result<Self> {
        let file: ConfigFile = toml::from_str(s)?;
        let mut config = Self {
            show_timer: file.show_timer,
            confirm_finish: file.confirm_finish,
            questions: file.questions.filter(|p| !p.as_os_str().is_empty()),
            ..Self::default()
        };

        for (name, keys) in &file.keys {
            let Some(action) = Action::from_config_key(name) else {
                tracing::debug!("unknown action {name:?} in [keys]");
                continue;
            };
            let parsed: Vec<KeyBind> = keys
                .iter()
                .filter_map(|key| {
                    let bind = KeyBind::parse(key.trim());
                    if bind.is_none() {
                        tracing::debug!("unrecognised key {key:?} for {name}");
                    }
                    bind
                })
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        Ok(config)
    }

    fn serialise(&self) -> anyhow::Result<String> {
        let keys = Action::ALL
            .iter()
            .filter_map(|&action| {
                let binds = self.bindings.get(&action)?;
                let keys = binds.iter().map(KeyBind::to_config_string).collect();
                Some((action.config_key().to_string(), keys))
            })
            .collect();
        let file = ConfigFile {
            show_timer: self.show_timer,
            confirm_finish: self.confirm_finish,
            questions: self.questions.clone(),
            keys,
        };
        let body = toml::to_string(&file).context("failed to encode config")?;
        Ok(format!(
            "# ml-quiz configuration\n# Keys: Ctrl+, Alt+, Shift+ prefixes; named keys like Enter, Right, PageUp.\n\n{body}"
        ))
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/ml-quiz/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("ml-quiz").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn parses_key_strings() {
        assert_eq!(
            KeyBind::parse("Ctrl+c"),
            Some(KeyBind::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
        );
        assert_eq!(KeyBind::parse("right"), Some(KeyBind::plain(KeyCode::Right)));
        assert_eq!(KeyBind::parse("Space"), Some(KeyBind::plain(KeyCode::Char(' '))));
        assert_eq!(KeyBind::parse("F5"), Some(KeyBind::plain(KeyCode::F(5))));
        assert_eq!(KeyBind::parse("+"), Some(KeyBind::plain(KeyCode::Char('+'))));
        assert_eq!(KeyBind::parse("Hyper+x"), None);
        assert_eq!(KeyBind::parse("xyz"), None);
    }

    #[test]
    fn enter_depends_on_phase() {
        let config = AppConfig::default();
        let enter = press(KeyCode::Enter);
        assert_eq!(config.match_key(enter, Phase::NotStarted), Some(Action::Start));
        assert_eq!(config.match_key(enter, Phase::InProgress), Some(Action::Finish));
        assert_eq!(config.match_key(enter, Phase::Finished), None);
    }

    #[test]
    fn option_keys_only_match_while_answering() {
        let config = AppConfig::default();
        let b = press(KeyCode::Char('b'));
        assert_eq!(config.match_key(b, Phase::InProgress), Some(Action::SelectB));
        assert_eq!(config.match_key(b, Phase::NotStarted), None);
        assert_eq!(
            config.match_key(press(KeyCode::Char('3')), Phase::InProgress),
            Some(Action::SelectC)
        );
    }

    #[test]
    fn shifted_question_mark_opens_help() {
        let config = AppConfig::default();
        let ev = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(config.match_key(ev, Phase::InProgress), Some(Action::Help));
    }

    #[test]
    fn shift_and_caps_lock_still_pick_options() {
        let config = AppConfig::default();
        let shifted = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(config.match_key(shifted, Phase::InProgress), Some(Action::SelectA));
        assert_eq!(
            config.match_key(press(KeyCode::Char('D')), Phase::InProgress),
            Some(Action::SelectD)
        );
        // Ctrl still has to match.
        let ctrl = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::CONTROL);
        assert_eq!(config.match_key(ctrl, Phase::InProgress), None);
    }

    #[test]
    fn config_file_overrides_defaults() {
        let config = AppConfig::parse_config(
            r#"
# comment
show_timer = false
questions = "/tmp/bank.toml"
bogus = 3

[keys]
next = ["Tab", "Ctrl+n"]
nonsense = ["x"]
"#,
        )
        .unwrap();
        assert!(!config.show_timer);
        assert!(config.confirm_finish);
        assert_eq!(config.questions, Some(PathBuf::from("/tmp/bank.toml")));
        assert_eq!(config.display_bindings(Action::Next), "Tab/Ctrl+n");
        assert_eq!(config.display_bindings(Action::Previous), "←/h/p");
    }

    #[test]
    fn literal_and_escaped_paths_follow_toml_rules() {
        let literal = AppConfig::parse_config(r"questions = 'C:\banks\nlp.toml'").unwrap();
        assert_eq!(literal.questions, Some(PathBuf::from(r"C:\banks\nlp.toml")));

        let escaped = AppConfig::parse_config(r#"questions = "a \"quoted\" dir/b.toml""#).unwrap();
        assert_eq!(escaped.questions, Some(PathBuf::from(r#"a "quoted" dir/b.toml"#)));
    }

    #[test]
    fn broken_file_is_an_error_not_a_partial_config() {
        assert!(AppConfig::parse_config("show_timer = maybe").is_err());
        assert!(AppConfig::parse_config("[keys]\nnext = \"Right\"").is_err());
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.show_timer = false;
        config.questions = Some(PathBuf::from(r#"C:\quiz "banks"\nlp.toml"#));
        config
            .bindings
            .insert(Action::Quit, vec![KeyBind::new(KeyCode::Char('x'), KeyModifiers::ALT)]);
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path);
        assert!(!loaded.show_timer);
        assert_eq!(loaded.questions, config.questions);
        assert_eq!(loaded.bindings, config.bindings);
    }

    #[test]
    fn save_writes_back_to_loaded_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AppConfig::load_from(&path);
        config.confirm_finish = false;
        config.save().unwrap();
        assert!(!AppConfig::load_from(&path).confirm_finish);

        // Never loaded from disk: nothing to write.
        AppConfig::default().save().unwrap();
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = AppConfig::load_from(&dir.path().join("absent.toml"));
        assert!(loaded.show_timer);
        assert_eq!(loaded.bindings, AppConfig::default_bindings());
    }
}
