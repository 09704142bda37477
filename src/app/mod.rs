//! Application state types and entry glue.
//!
//! Wraps the [`Dashboard`] with everything the terminal front end needs:
//! focus, row selection, theme, keymap and modal state. The event loop is
//! re-exported as `run`.
//!
pub mod keymap;
pub mod update;

use ratatui::style::Color;
use std::path::Path;

use crate::dashboard::Dashboard;
use crate::store::UserId;
use keymap::Keymap;

/// Which widget receives typed characters and activation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Focus {
    Name,
    Email,
    Submit,
    Table,
}

impl Focus {
    /// Tab order: Name → Email → Submit → Table, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Focus::Name => Focus::Email,
            Focus::Email => Focus::Submit,
            Focus::Submit => Focus::Table,
            Focus::Table => Focus::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Name => Focus::Table,
            Focus::Email => Focus::Name,
            Focus::Submit => Focus::Email,
            Focus::Table => Focus::Submit,
        }
    }

    /// True for the three form widgets.
    pub fn is_form(self) -> bool {
        !matches!(self, Focus::Table)
    }
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub error: Color,
}

impl Theme {
    /// Plain terminal colors.
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            muted: Color::DarkGray,
            title: Color::Cyan,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
            error: Color::Red,
        }
    }

    /// Catppuccin Mocha theme defaults.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),        // overlay1
            title: Color::Rgb(0xcb, 0xa6, 0xf7),        // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),    // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),    // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),    // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            error: Color::Rgb(0xf3, 0x8b, 0xa8),        // red
        }
    }

    /// Load theme from a simple key=value file. Unknown or missing keys fall back to `mocha`.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the theme configuration file.
    ///
    /// # Returns
    ///
    /// `Some(theme)` if the file is readable; `None` otherwise. Lines with an
    /// unparsable color are skipped.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut theme = Self::mocha();

        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            let Some(color) = parse_color(val.trim()) else {
                tracing::debug!(line = raw_line, "ignoring unparsable theme color");
                continue;
            };
            match key.trim() {
                "text" => theme.text = color,
                "muted" => theme.muted = color,
                "title" => theme.title = color,
                "border" => theme.border = color,
                "header_bg" => theme.header_bg = color,
                "header_fg" => theme.header_fg = color,
                "status_bg" => theme.status_bg = color,
                "status_fg" => theme.status_fg = color,
                "highlight_fg" => theme.highlight_fg = color,
                "highlight_bg" => theme.highlight_bg = color,
                "error" => theme.error = color,
                _ => {}
            }
        }

        Some(theme)
    }

    /// Persist the theme to a config file in key=value format.
    ///
    /// # Arguments
    ///
    /// * `path` - The path where the theme will be written.
    ///
    /// # Returns
    ///
    /// `std::io::Result<()>` indicating success or failure.
    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# user-dashboard theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");

        let mut kv = |k: &str, v: Color| {
            let _ = writeln!(&mut buf, "{} = {}", k, color_to_str(v));
        };
        kv("text", self.text);
        kv("muted", self.muted);
        kv("title", self.title);
        kv("border", self.border);
        kv("header_bg", self.header_bg);
        kv("header_fg", self.header_fg);
        kv("status_bg", self.status_bg);
        kv("status_fg", self.status_fg);
        kv("highlight_fg", self.highlight_fg);
        kv("highlight_bg", self.highlight_bg);
        kv("error", self.error);

        std::fs::write(path, buf)
    }

    /// Load from `path`, writing the `mocha` defaults there first if it does not exist.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the theme configuration file.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        if let Err(e) = t.write_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not write default theme");
        }
        t
    }
}

/// Parse a color from hex ("#RRGGBB" or "RRGGBB") or "reset".
fn parse_color(s: &str) -> Option<Color> {
    let lower = s.trim().to_ascii_lowercase();
    if lower == "reset" {
        return Some(Color::Reset);
    }
    let hex = lower.strip_prefix('#').unwrap_or(lower.as_str());
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn color_to_str(c: Color) -> String {
    match c {
        Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
        Color::Reset => "reset".to_string(),
        // Named colors are written as a best-effort hex approximation
        Color::Black => "#000000".to_string(),
        Color::Red => "#FF0000".to_string(),
        Color::Green => "#00FF00".to_string(),
        Color::Yellow => "#FFFF00".to_string(),
        Color::Blue => "#0000FF".to_string(),
        Color::Magenta => "#FF00FF".to_string(),
        Color::Cyan => "#00FFFF".to_string(),
        Color::Gray => "#B3B3B3".to_string(),
        Color::DarkGray => "#4D4D4D".to_string(),
        Color::LightRed => "#FF6666".to_string(),
        Color::LightGreen => "#66FF66".to_string(),
        Color::LightYellow => "#FFFF66".to_string(),
        Color::LightBlue => "#6666FF".to_string(),
        Color::LightMagenta => "#FF66FF".to_string(),
        Color::LightCyan => "#66FFFF".to_string(),
        Color::White => "#FFFFFF".to_string(),
        Color::Indexed(_) => "reset".to_string(),
    }
}

/// Overlay dialogs drawn above the dashboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalState {
    Help { scroll: u16 },
    Info { message: String },
}

/// Everything the terminal front end holds for one session.
///
/// Key handling mutates it through [`update::handle_key`]; rendering reads it
/// once per frame.
pub struct AppState {
    pub dashboard: Dashboard,
    pub focus: Focus,
    /// Row index within the visible page.
    pub selected_row: usize,
    pub theme: Theme,
    pub keymap: Keymap,
    pub modal: Option<ModalState>,
    /// Outcome of the last action, shown in the status bar.
    pub status: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    /// Create the session state with an empty dashboard and focus on `Name`.
    ///
    /// # Arguments
    ///
    /// * `theme` - Colors used by every widget.
    /// * `keymap` - Bindings resolved for form navigation and table actions.
    pub fn new(theme: Theme, keymap: Keymap) -> Self {
        Self {
            dashboard: Dashboard::new(),
            focus: Focus::Name,
            selected_row: 0,
            theme,
            keymap,
            modal: None,
            status: None,
            should_quit: false,
        }
    }

    /// Id of the highlighted table row.
    ///
    /// # Returns
    ///
    /// `None` when the current page has no rows.
    pub fn selected_user(&self) -> Option<UserId> {
        self.dashboard
            .visible_users()
            .get(self.selected_row)
            .map(|u| u.id)
    }

    /// Keep the selection on an existing row after the page contents changed.
    pub fn clamp_selection(&mut self) {
        let rows = self.dashboard.visible_users().len();
        self.selected_row = self.selected_row.min(rows.saturating_sub(1));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Theme::mocha(), Keymap::default())
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
