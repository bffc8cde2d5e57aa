// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use std::io::IsTerminal;

pub mod codes {
    /// Section headers: pastel cyan / steel blue
    pub const HEADER: u8 = 74;
    /// Commands and literals: light grey
    pub const LITERAL: u8 = 250;
    /// Descriptions and context: medium grey
    pub const CONTEXT: u8 = 245;
    /// Success lines: soft green
    pub const OK: u8 = 114;
    /// Failure headlines: soft red
    pub const ERROR: u8 = 167;
}

/// Output stream a colored string is headed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Determine if color output should be enabled for `stream`.
///
/// Priority: `NO_COLOR=1` disables → `COLOR=1` forces → TTY check.
pub fn should_colorize(stream: Stream) -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    match stream {
        Stream::Stdout => std::io::stdout().is_terminal(),
        Stream::Stderr => std::io::stderr().is_terminal(),
    }
}

/// Build clap `Styles` using the project palette.
pub fn styles() -> Styles {
    if !should_colorize(Stream::Stdout) {
        return Styles::plain();
    }
    Styles::styled()
        .header(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::HEADER)))))
        .literal(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::LITERAL)))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::CONTEXT)))))
}

fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

const RESET: &str = "\x1b[0m";

fn paint(code: u8, text: &str, stream: Stream) -> String {
    if should_colorize(stream) {
        format!("{}{}{}", fg256(code), text, RESET)
    } else {
        text.to_string()
    }
}

/// Success line on stdout.
pub fn ok(text: &str) -> String {
    paint(codes::OK, text, Stream::Stdout)
}

/// Primary failure message on stderr.
pub fn error(text: &str) -> String {
    paint(codes::ERROR, text, Stream::Stderr)
}

/// `Fix:` / `See:` labels on stderr.
pub fn context(text: &str) -> String {
    paint(codes::CONTEXT, text, Stream::Stderr)
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
