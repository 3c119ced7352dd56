//! Caller-supplied style tokens for the trigger button.
//!
//! The style string is a whitespace separated list such as
//! `"bold underline fg:#fab387 bg:black"`. Recognized tokens become a
//! ratatui [`Style`] that is patched over the theme's base style. Anything
//! unrecognized is skipped.

use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

pub fn parse_style_tokens(tokens: &str) -> Style {
    tokens
        .split_whitespace()
        .fold(Style::default(), |style, token| apply_token(style, token))
}

fn apply_token(style: Style, token: &str) -> Style {
    if let Some(color) = token.strip_prefix("fg:") {
        return match Color::from_str(color) {
            Ok(color) => style.fg(color),
            Err(_) => skip(style, token),
        };
    }
    if let Some(color) = token.strip_prefix("bg:") {
        return match Color::from_str(color) {
            Ok(color) => style.bg(color),
            Err(_) => skip(style, token),
        };
    }
    if let Some(name) = token.strip_prefix("not-") {
        return match modifier(name) {
            Some(m) => style.remove_modifier(m),
            None => skip(style, token),
        };
    }

    match modifier(token) {
        Some(m) => style.add_modifier(m),
        None => skip(style, token),
    }
}

fn modifier(name: &str) -> Option<Modifier> {
    let m = match name {
        "bold" => Modifier::BOLD,
        "dim" => Modifier::DIM,
        "italic" => Modifier::ITALIC,
        "underline" | "underlined" => Modifier::UNDERLINED,
        "reversed" => Modifier::REVERSED,
        "strike" | "crossed-out" => Modifier::CROSSED_OUT,
        _ => return None,
    };
    Some(m)
}

fn skip(style: Style, token: &str) -> Style {
    tracing::debug!("Ignoring unknown style token {:?}", token);
    style
}
