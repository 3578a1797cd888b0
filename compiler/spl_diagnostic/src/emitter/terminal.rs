//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support and a
//! source snippet under each label when the source text is known.

use std::io::{self, Write};

use spl_ir::Span;

use crate::{Diagnostic, Label};

use super::DiagnosticEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Use colors when the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a boolean. `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<'src, W: Write> {
    writer: W,
    colors: bool,
    source: Option<&'src str>,
    file_path: Option<&'src str>,
}

impl<'src, W: Write> TerminalEmitter<'src, W> {
    /// # Arguments
    ///
    /// * `writer` - The output writer
    /// * `mode` - Color mode selection
    /// * `is_tty` - Whether output is a TTY (used for `ColorMode::Auto`)
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
            file_path: None,
        }
    }

    /// Render labels as `line:col` with a source snippet.
    #[must_use]
    pub fn with_source(mut self, source: &'src str) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub fn with_file_path(mut self, path: &'src str) -> Self {
        self.file_path = Some(path);
        self
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_code(&mut self, code: &str) {
        if self.colors {
            let _ = write!(self.writer, "{}[{code}]{}", colors::BOLD, colors::RESET);
        } else {
            let _ = write!(self.writer, "[{code}]");
        }
    }

    fn location(&self, span: Span) -> String {
        match (self.source, self.file_path) {
            (Some(src), Some(path)) => {
                let (line, col) = span.line_col(src);
                format!("{path}:{line}:{col}")
            }
            (Some(src), None) => {
                let (line, col) = span.line_col(src);
                format!("{line}:{col}")
            }
            (None, Some(path)) => format!("{path} {span:?}"),
            (None, None) => format!("{span:?}"),
        }
    }

    fn write_label(&mut self, label: &Label) {
        let marker = if label.is_primary { "-->" } else { ":::" };
        let location = self.location(label.span);
        let _ = writeln!(self.writer, "  {marker} {location}");

        let Some(source) = self.source else {
            let _ = write!(self.writer, "     ");
            self.write_label_message(label);
            let _ = writeln!(self.writer);
            return;
        };

        let (line_no, col) = label.span.line_col(source);
        let line_text = source.lines().nth(line_no as usize - 1).unwrap_or("");
        let gutter = line_no.to_string().len();
        let width = label.span.len().max(1) as usize;

        let _ = writeln!(self.writer, "{:gutter$} |", "");
        let _ = writeln!(self.writer, "{line_no} | {line_text}");
        let _ = write!(self.writer, "{:gutter$} | {:pad$}", "", "", pad = col as usize - 1);
        let underline = if label.is_primary { "^" } else { "-" }.repeat(width);
        let color = if label.is_primary {
            colors::ERROR
        } else {
            colors::SECONDARY
        };
        self.write_colored(&underline, color);
        let _ = write!(self.writer, " ");
        self.write_label_message(label);
        let _ = writeln!(self.writer);
    }

    fn write_label_message(&mut self, label: &Label) {
        if label.is_primary {
            self.write_colored(&label.message, colors::ERROR);
        } else {
            self.write_colored(&label.message, colors::SECONDARY);
        }
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: error[CODE]: message
        self.write_colored("error", colors::ERROR);
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        for label in &diagnostic.labels {
            self.write_label(label);
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            self.write_colored("note", colors::BOLD);
            let _ = writeln!(self.writer, ": {note}");
        }

        for suggestion in &diagnostic.suggestions {
            let _ = write!(self.writer, "  = ");
            self.write_colored("help", colors::HELP);
            let _ = writeln!(self.writer, ": {suggestion}");
        }

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

impl TerminalEmitter<'_, io::Stderr> {
    /// Emitter writing to stderr, honouring `mode`.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}
