//! Display surface for status, error and informational messages.

use std::io::{self, IsTerminal, Write};

use crossterm::style::Stylize;

/// Kind of a single console message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Informational status (`[*]`)
    Status,
    /// Positive confirmation (`[+]`)
    Good,
    /// Error report (`[-]`)
    Error,
    /// Plain line, no prefix
    Line,
    /// Raw text written as-is (tables, help banners)
    Raw,
}

impl MessageKind {
    /// The marker printed in front of prefixed messages.
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            Self::Status => Some("[*]"),
            Self::Good => Some("[+]"),
            Self::Error => Some("[-]"),
            Self::Line | Self::Raw => None,
        }
    }
}

/// A message recorded by a [`MemoryConsole`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleMessage {
    /// Message kind
    pub kind: MessageKind,

    /// Message text without prefix
    pub text: String,
}

/// Where the shell and the alias engine report to the user.
pub trait Console {
    /// Write one message.
    fn write_message(&mut self, kind: MessageKind, text: &str);

    /// Print an informational status line.
    fn print_status(&mut self, text: &str) {
        self.write_message(MessageKind::Status, text);
    }

    /// Print a success line.
    fn print_good(&mut self, text: &str) {
        self.write_message(MessageKind::Good, text);
    }

    /// Print an error line.
    fn print_error(&mut self, text: &str) {
        self.write_message(MessageKind::Error, text);
    }

    /// Print a plain line.
    fn print_line(&mut self, text: &str) {
        self.write_message(MessageKind::Line, text);
    }

    /// Print pre-rendered text without adding a newline.
    fn print_raw(&mut self, text: &str) {
        self.write_message(MessageKind::Raw, text);
    }
}

/// Console writing to standard output.
#[derive(Debug)]
pub struct TerminalConsole {
    color: bool,
}

impl TerminalConsole {
    /// Create a console, coloring prefixes only when stdout is a terminal.
    pub fn new() -> Self {
        Self { color: io::stdout().is_terminal() }
    }

    /// Force colors on or off.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn styled_prefix(&self, kind: MessageKind) -> Option<String> {
        let prefix = kind.prefix()?;
        if !self.color {
            return Some(prefix.to_string());
        }
        let styled = match kind {
            MessageKind::Status => prefix.blue().bold(),
            MessageKind::Good => prefix.green().bold(),
            _ => prefix.red().bold(),
        };
        Some(styled.to_string())
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn write_message(&mut self, kind: MessageKind, text: &str) {
        let mut stdout = io::stdout().lock();
        // A closed stdout leaves nothing to report to.
        let _ = match (kind, self.styled_prefix(kind)) {
            (MessageKind::Raw, _) => write!(stdout, "{text}"),
            (_, Some(prefix)) => writeln!(stdout, "{prefix} {text}"),
            (_, None) => writeln!(stdout, "{text}"),
        };
        let _ = stdout.flush();
    }
}

/// Console that records messages in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryConsole {
    messages: Vec<ConsoleMessage>,
}

impl MemoryConsole {
    /// Create an empty console.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded messages, oldest first.
    pub fn messages(&self) -> &[ConsoleMessage] {
        &self.messages
    }

    /// Recorded texts of one kind.
    pub fn texts(&self, kind: MessageKind) -> Vec<&str> {
        self.messages.iter().filter(|m| m.kind == kind).map(|m| m.text.as_str()).collect()
    }

    /// Everything written, rendered the way a plain terminal would show it.
    pub fn output(&self) -> String {
        let mut out = String::new();
        for message in &self.messages {
            match (message.kind, message.kind.prefix()) {
                (MessageKind::Raw, _) => out.push_str(&message.text),
                (_, Some(prefix)) => {
                    out.push_str(prefix);
                    out.push(' ');
                    out.push_str(&message.text);
                    out.push('\n');
                }
                (_, None) => {
                    out.push_str(&message.text);
                    out.push('\n');
                }
            }
        }
        out
    }

    /// Check whether any message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.text.contains(needle))
    }

    /// Drop every recorded message.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl Console for MemoryConsole {
    fn write_message(&mut self, kind: MessageKind, text: &str) {
        self.messages.push(ConsoleMessage { kind, text: text.to_string() });
    }
}
