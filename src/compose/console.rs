//! Interactive input with live suggestions.

use std::io::{self, BufRead, IsTerminal, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    queue,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::compose::completion::{word_before_cursor, Completer, Suggestion};
use crate::error::{CxError, Result};

/// Maximum number of suggestions drawn under the input line.
const MAX_SUGGESTIONS: usize = 8;

/// Synchronous prompt/response channel to the user.
pub trait Console {
    /// Prompts for one line, offering suggestions from `completer`.
    ///
    /// Returns `Ok(None)` at end of input.
    fn read_line(&mut self, prompt: &str, completer: &dyn Completer) -> Result<Option<String>>;

    /// Shows an informational message.
    fn notice(&mut self, message: &str);

    /// Shows a diagnostic on the error stream.
    fn warn(&mut self, message: &str);
}

/// Returns the console for this process: a line editor on a terminal,
/// plain line reading otherwise.
pub fn stdio_console() -> Box<dyn Console> {
    if io::stdin().is_terminal() {
        Box::new(TerminalConsole::new())
    } else {
        Box::new(LineConsole::new(io::stdin().lock(), io::stderr()))
    }
}

/// Line-oriented console over any reader and writer.
///
/// Used for piped input and to drive compositions from a script.
pub struct LineConsole<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    /// Creates a console reading answers from `reader` and writing prompts
    /// and diagnostics to `writer`.
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Everything written so far.
    pub fn writer(&self) -> &W {
        &self.writer
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn read_line(&mut self, prompt: &str, _completer: &dyn Completer) -> Result<Option<String>> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;

        let mut input = String::new();
        if self.reader.read_line(&mut input)? == 0 {
            return Ok(None);
        }
        let line = input.strip_suffix('\n').unwrap_or(&input);
        let line = line.strip_suffix('\r').unwrap_or(line);
        Ok(Some(line.to_string()))
    }

    fn notice(&mut self, message: &str) {
        let _ = writeln!(self.writer, "{message}");
    }

    fn warn(&mut self, message: &str) {
        let _ = writeln!(self.writer, "{message}");
    }
}

/// Guard that disables raw mode on drop.
struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Raw-mode line editor drawing suggestions below the input.
///
/// Tab accepts the first suggestion, Ctrl+C aborts, Ctrl+D on an empty
/// line ends input.
#[derive(Debug, Default)]
pub struct TerminalConsole;

impl TerminalConsole {
    /// Creates a terminal console.
    pub fn new() -> Self {
        Self
    }

    fn redraw(
        out: &mut impl Write,
        prompt: &str,
        buffer: &str,
        suggestions: &[Suggestion],
    ) -> io::Result<()> {
        queue!(out, cursor::MoveToColumn(0), Clear(ClearType::FromCursorDown))?;
        write!(out, "{prompt}{buffer}")?;

        let shown = &suggestions[..suggestions.len().min(MAX_SUGGESTIONS)];
        if !shown.is_empty() {
            let width = shown.iter().map(|s| s.text.chars().count()).max().unwrap_or(0);
            for suggestion in shown {
                write!(out, "\r\n  {:<width$}  {}", suggestion.text, suggestion.description)?;
            }
            let column = prompt.chars().count() + buffer.chars().count();
            queue!(
                out,
                cursor::MoveUp(shown.len() as u16),
                cursor::MoveToColumn(column as u16)
            )?;
        }
        out.flush()
    }

    fn finish_line(out: &mut impl Write, prompt: &str, buffer: &str) -> io::Result<()> {
        queue!(out, cursor::MoveToColumn(0), Clear(ClearType::FromCursorDown))?;
        write!(out, "{prompt}{buffer}\r\n")?;
        out.flush()
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str, completer: &dyn Completer) -> Result<Option<String>> {
        let mut out = io::stderr();

        enable_raw_mode()?;
        let _guard = RawModeGuard;

        let mut buffer = String::new();
        let mut suggestions = completer.complete(word_before_cursor(&buffer));
        Self::redraw(&mut out, prompt, &buffer, &suggestions)?;

        loop {
            let Event::Key(key_event) = event::read()? else {
                continue;
            };
            if key_event.kind != KeyEventKind::Press {
                continue;
            }
            match key_event.code {
                KeyCode::Enter => {
                    Self::finish_line(&mut out, prompt, &buffer)?;
                    return Ok(Some(buffer));
                }
                KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                    Self::finish_line(&mut out, prompt, &buffer)?;
                    return Err(CxError::Aborted);
                }
                KeyCode::Char('d') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                    if buffer.is_empty() {
                        Self::finish_line(&mut out, prompt, &buffer)?;
                        return Ok(None);
                    }
                }
                KeyCode::Tab => {
                    if let Some(first) = suggestions.first() {
                        let word_len = word_before_cursor(&buffer).len();
                        buffer.truncate(buffer.len() - word_len);
                        buffer.push_str(&first.text);
                    }
                }
                KeyCode::Backspace => {
                    buffer.pop();
                }
                KeyCode::Char(c) => buffer.push(c),
                _ => continue,
            }
            suggestions = completer.complete(word_before_cursor(&buffer));
            Self::redraw(&mut out, prompt, &buffer, &suggestions)?;
        }
    }

    fn notice(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn warn(&mut self, message: &str) {
        let mut stderr = StandardStream::stderr(ColorChoice::Auto);
        let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)));
        let _ = writeln!(stderr, "{message}");
        let _ = stderr.reset();
    }
}
