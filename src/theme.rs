//! Terminal theme & spinner helpers.
//!
//! Respects the `NO_COLOR` env-var and the `--no-color` CLI flag.
//!
//! # Palette
//!
//! | Token          | Hex       | Usage                          |
//! |----------------|-----------|--------------------------------|
//! | accent         | `#16A34A` | headings, submit control       |
//! | accent_bright  | `#22C55E` | typed digits, emphasis         |
//! | skeleton       | `#CDE74C` | loading placeholder            |
//! | info           | `#7DD3FC` | informational values           |
//! | success        | `#2FBF71` | success states                 |
//! | error          | `#DC2626` | errors, failures               |
//! | muted          | `#8B7F77` | de-emphasis, metadata          |

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

// ── Global color toggle ─────────────────────────────────────────────────────

static COLOR_DISABLED: AtomicBool = AtomicBool::new(false);

/// Call once at startup (after CLI parsing) to disable colour globally.
pub fn disable_color() {
    COLOR_DISABLED.store(true, Ordering::Relaxed);
    colored::control::set_override(false);
}

/// Initialise the colour system.  Checks `NO_COLOR` env-var and optional
/// `--no-color` flag.
pub fn init_color(no_color_flag: bool) {
    if no_color_flag
        || std::env::var("NO_COLOR")
            .map(|v| !v.is_empty())
            .unwrap_or(false)
    {
        disable_color();
    }
}

fn is_color() -> bool {
    !COLOR_DISABLED.load(Ordering::Relaxed)
}

/// Palette hex values.
pub mod palette {
    pub const ACCENT: (u8, u8, u8) = (0x16, 0xA3, 0x4A);
    pub const ACCENT_BRIGHT: (u8, u8, u8) = (0x22, 0xC5, 0x5E);
    pub const SKELETON: (u8, u8, u8) = (0xCD, 0xE7, 0x4C);
    pub const INFO: (u8, u8, u8) = (0x7D, 0xD3, 0xFC);
    pub const SUCCESS: (u8, u8, u8) = (0x2F, 0xBF, 0x71);
    pub const ERROR: (u8, u8, u8) = (0xDC, 0x26, 0x26);
    pub const MUTED: (u8, u8, u8) = (0x8B, 0x7F, 0x77);
}

// ── Themed formatting helpers ───────────────────────────────────────────────

fn apply(text: &str, rgb: (u8, u8, u8)) -> String {
    if is_color() {
        text.truecolor(rgb.0, rgb.1, rgb.2).to_string()
    } else {
        text.to_string()
    }
}

/// Informational values.
pub fn info(text: &str) -> String {
    apply(text, palette::INFO)
}

/// Success state.
pub fn success(text: &str) -> String {
    apply(text, palette::SUCCESS)
}

/// Error / failure.
pub fn error(text: &str) -> String {
    apply(text, palette::ERROR)
}

/// De-emphasis / metadata.
pub fn muted(text: &str) -> String {
    apply(text, palette::MUTED)
}

/// Green ✓
pub fn icon_ok(label: &str) -> String {
    format!("{} {}", success("✓"), label)
}

/// Red ✗
pub fn icon_fail(label: &str) -> String {
    format!("{} {}", error("✗"), label)
}

/// Format "  Label  : value" with the label dimmed and the value in accent.
pub fn label_value(label: &str, value: &str) -> String {
    format!("  {} : {}", muted(label), info(value))
}

// ── Spinner helpers ─────────────────────────────────────────────────────────

const SPINNER_CHARS: &[&str] = &["◒", "◐", "◓", "◑"];

/// Create an indeterminate spinner with a message.
///
/// The caller finishes it with `.finish_and_clear()`.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let template = if is_color() {
        "{spinner:.green}  {msg}"
    } else {
        "{spinner}  {msg}"
    };
    if let Ok(style) = ProgressStyle::with_template(template) {
        pb.set_style(style.tick_strings(SPINNER_CHARS));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}


// ── Ratatui palette ─────────────────────────────────────────────────────────
//
// Pre-built `ratatui::style::Color` and `Style` values derived from the
// palette, for use in TUI pane rendering.

#[cfg(feature = "tui")]
pub mod tui_palette {
    use ratatui::style::{Color, Modifier, Style};

    use super::palette;

    const fn rgb(c: (u8, u8, u8)) -> Color {
        Color::Rgb(c.0, c.1, c.2)
    }

    pub const ACCENT: Color = rgb(palette::ACCENT);
    pub const ACCENT_BRIGHT: Color = rgb(palette::ACCENT_BRIGHT);
    pub const SKELETON: Color = rgb(palette::SKELETON);
    pub const SUCCESS: Color = rgb(palette::SUCCESS);
    pub const ERROR: Color = rgb(palette::ERROR);
    pub const MUTED: Color = rgb(palette::MUTED);

    pub const SURFACE_6: Color = Color::Rgb(0x3C, 0x3C, 0x3C);
    pub const TEXT: Color = Color::Rgb(0xEE, 0xEE, 0xEE);
    pub const TEXT_DIM: Color = Color::Rgb(0x82, 0x82, 0x82);

    pub const fn focused_border() -> Style {
        Style::new().fg(ACCENT_BRIGHT)
    }

    pub const fn unfocused_border() -> Style {
        Style::new().fg(SURFACE_6)
    }

    pub const fn title_focused() -> Style {
        Style::new().fg(ACCENT_BRIGHT).add_modifier(Modifier::BOLD)
    }

    /// Status line hint text style.
    pub const fn hint() -> Style {
        Style::new().fg(TEXT_DIM)
    }

    /// Submit control.
    pub const fn button() -> Style {
        Style::new()
            .fg(TEXT)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub const fn skeleton() -> Style {
        Style::new().bg(SKELETON)
    }

    pub const fn banner_title(is_error: bool) -> Style {
        if is_error {
            Style::new().fg(ERROR).add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(SUCCESS).add_modifier(Modifier::BOLD)
        }
    }

    pub const fn banner_body(is_error: bool) -> Style {
        if is_error {
            Style::new().fg(ERROR)
        } else {
            Style::new().fg(TEXT)
        }
    }
}
