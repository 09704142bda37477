//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! Bindings apply to the table and to form navigation. While a text field has
//! focus, plain characters are typed into it instead of being resolved here.

use std::collections::HashMap;
use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Semantic keyboard actions that can be bound to key combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Show the help/keybindings overlay.
    OpenHelp,
    /// Move focus Name → Email → Submit → Table.
    FocusNext,
    /// Move focus backwards.
    FocusPrev,
    /// Submit the form, or edit the selected row when the table has focus.
    Activate,
    /// Leave edit mode and clear the loaded values. No effect while creating.
    CancelEdit,
    /// Load the selected row into the form.
    EditSelection,
    /// Delete the selected row.
    DeleteSelection,
    /// Flip the name column sort direction.
    ToggleSort,
    MoveUp,
    MoveDown,
    PrevPage,
    NextPage,
    FirstPage,
    LastPage,
    /// Swallow the key.
    Ignore,
}

const ALL_ACTIONS: [KeyAction; 16] = [
    KeyAction::Quit,
    KeyAction::OpenHelp,
    KeyAction::FocusNext,
    KeyAction::FocusPrev,
    KeyAction::Activate,
    KeyAction::CancelEdit,
    KeyAction::EditSelection,
    KeyAction::DeleteSelection,
    KeyAction::ToggleSort,
    KeyAction::MoveUp,
    KeyAction::MoveDown,
    KeyAction::PrevPage,
    KeyAction::NextPage,
    KeyAction::FirstPage,
    KeyAction::LastPage,
    KeyAction::Ignore,
];

/// Mapping from `(KeyModifiers, KeyCode)` pairs to [`KeyAction`]s.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Arrow keys plus vim-style hjkl, Tab/Shift+Tab for focus, single letters for row actions.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Char('?')), KeyAction::OpenHelp);
        bindings.insert((M::NONE, Tab), KeyAction::FocusNext);
        // Shift+Tab arrives as BackTab, with or without SHIFT depending on the terminal
        bindings.insert((M::NONE, BackTab), KeyAction::FocusPrev);
        bindings.insert((M::SHIFT, BackTab), KeyAction::FocusPrev);
        bindings.insert((M::NONE, Enter), KeyAction::Activate);
        bindings.insert((M::NONE, Esc), KeyAction::CancelEdit);
        bindings.insert((M::NONE, Char('e')), KeyAction::EditSelection);
        bindings.insert((M::NONE, Char('d')), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Delete), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Char('s')), KeyAction::ToggleSort);

        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Left), KeyAction::PrevPage);
        bindings.insert((M::NONE, Right), KeyAction::NextPage);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('h')), KeyAction::PrevPage);
        bindings.insert((M::NONE, Char('l')), KeyAction::NextPage);
        bindings.insert((M::NONE, PageUp), KeyAction::PrevPage);
        bindings.insert((M::NONE, PageDown), KeyAction::NextPage);
        bindings.insert((M::NONE, Home), KeyAction::FirstPage);
        bindings.insert((M::NONE, End), KeyAction::LastPage);
        bindings.insert((M::NONE, Char('g')), KeyAction::FirstPage);
        bindings.insert((M::SHIFT, Char('G')), KeyAction::LastPage);
        bindings.insert((M::NONE, Char('G')), KeyAction::LastPage);

        Self { bindings }
    }

    /// Load from `path`, or write the defaults there when it is missing.
    ///
    /// A file that exists but cannot be read yields the defaults. Failure to
    /// write the defaults is logged and otherwise ignored.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the keymap configuration file.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let km = Self::default();
        if let Err(e) = km.write_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not write default keybindings");
        }
        km
    }

    /// Read `<Action> = <KeySpec>` lines on top of the defaults.
    ///
    /// The legacy `<KeySpec> = <Action>` order is accepted too. Lines that
    /// parse as neither are skipped.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the keymap configuration file.
    ///
    /// # Returns
    ///
    /// `Some(keymap)` with the file's bindings layered over the defaults, or
    /// `None` if the file cannot be read.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((lhs, rhs)) = line.split_once('=') else {
                continue;
            };
            let (lhs, rhs) = (lhs.trim(), rhs.trim());
            if let (Some(action), Some(key)) = (parse_action(lhs), parse_key(rhs)) {
                map.bindings.insert(key, action);
                continue;
            }
            if let (Some(key), Some(action)) = (parse_key(lhs), parse_action(rhs)) {
                map.bindings.insert(key, action);
                continue;
            }
            tracing::debug!(line = raw, "ignoring unrecognised keybinding");
        }
        Some(map)
    }

    /// Write every binding, grouped by action, in a stable order.
    ///
    /// # Arguments
    ///
    /// * `path` - The path where the keymap will be written.
    ///
    /// # Returns
    ///
    /// `std::io::Result<()>` indicating success or failure.
    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# user-dashboard keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+c, Alt+d, Shift+Down, Enter, Esc, Tab, BackTab, Up, Down, Left, Right, PageUp, PageDown, Home, End, Delete, e, d, s\n");
        let names: Vec<&str> = ALL_ACTIONS.iter().map(|a| format_action(*a)).collect();
        let _ = writeln!(&mut buf, "# Actions: {}\n", names.join(", "));

        let mut rows: Vec<(KeyAction, String)> = self
            .bindings
            .iter()
            .map(|((m, c), a)| (*a, Self::format_key(*m, *c)))
            .collect();
        rows.sort();
        rows.dedup();
        for (action, key) in rows {
            let _ = writeln!(&mut buf, "{} = {}", format_action(action), key);
        }

        std::fs::write(path, buf)
    }

    /// Resolve a key event to its bound action.
    ///
    /// Modifiers must match exactly, so `Shift+Down` and `Down` are distinct.
    ///
    /// # Arguments
    ///
    /// * `key` - The key event to resolve.
    ///
    /// # Returns
    ///
    /// The bound action, or `None` if nothing is mapped to this key.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    /// Add or replace a single binding.
    ///
    /// # Arguments
    ///
    /// * `mods` - Modifiers that must be held.
    /// * `code` - The key code.
    /// * `action` - Action to run; replaces any previous action for this key.
    pub fn bind(&mut self, mods: KeyModifiers, code: KeyCode, action: KeyAction) {
        self.bindings.insert((mods, code), action);
    }

    /// Return a snapshot of all bindings as ((modifiers, code), action) pairs.
    pub fn all_bindings(&self) -> Vec<((KeyModifiers, KeyCode), KeyAction)> {
        self.bindings.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// Human-readable key spec like "Ctrl+c", "Shift+Down", "BackTab", "e".
    ///
    /// # Arguments
    ///
    /// * `mods` - Modifiers held with the key. `Ctrl+`, `Alt+` and `Shift+`
    ///   prefixes are written in that order.
    /// * `code` - The key itself.
    ///
    /// # Returns
    ///
    /// A spec that [`Keymap::from_file`] parses back to the same pair.
    /// `Shift+` is left out for uppercase letters, which imply it.
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Delete => "Delete".to_string(),
            Backspace => "Backspace".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            BackTab => "BackTab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Home => "Home".to_string(),
            End => "End".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        let implied_shift = matches!(code, Char(c) if c.is_ascii_uppercase());
        let mut spec = String::new();
        if mods.contains(KeyModifiers::CONTROL) {
            spec.push_str("Ctrl+");
        }
        if mods.contains(KeyModifiers::ALT) {
            spec.push_str("Alt+");
        }
        if mods.contains(KeyModifiers::SHIFT) && !implied_shift {
            spec.push_str("Shift+");
        }
        spec.push_str(&base);
        spec
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let mut rest = spec.trim();
    let mut mods = KeyModifiers::NONE;
    loop {
        let (flag, after) = if let Some(after) = rest.strip_prefix("Ctrl+") {
            (KeyModifiers::CONTROL, after)
        } else if let Some(after) = rest.strip_prefix("Alt+") {
            (KeyModifiers::ALT, after)
        } else if let Some(after) = rest.strip_prefix("Shift+") {
            (KeyModifiers::SHIFT, after)
        } else {
            break;
        };
        mods |= flag;
        rest = after;
    }
    let code = match rest {
        "Enter" => Enter,
        "Delete" => Delete,
        "Backspace" => Backspace,
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "BackTab" => BackTab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        "Home" => Home,
        "End" => End,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    // crossterm reports uppercase letters with SHIFT held
    if let Char(c) = code
        && c.is_ascii_uppercase()
    {
        mods |= KeyModifiers::SHIFT;
    }
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    let s = s.trim();
    ALL_ACTIONS.into_iter().find(|a| format_action(*a) == s)
}

pub fn format_action(a: KeyAction) -> &'static str {
    match a {
        KeyAction::Quit => "Quit",
        KeyAction::OpenHelp => "OpenHelp",
        KeyAction::FocusNext => "FocusNext",
        KeyAction::FocusPrev => "FocusPrev",
        KeyAction::Activate => "Activate",
        KeyAction::CancelEdit => "CancelEdit",
        KeyAction::EditSelection => "EditSelection",
        KeyAction::DeleteSelection => "DeleteSelection",
        KeyAction::ToggleSort => "ToggleSort",
        KeyAction::MoveUp => "MoveUp",
        KeyAction::MoveDown => "MoveDown",
        KeyAction::PrevPage => "PrevPage",
        KeyAction::NextPage => "NextPage",
        KeyAction::FirstPage => "FirstPage",
        KeyAction::LastPage => "LastPage",
        KeyAction::Ignore => "Ignore",
    }
}
