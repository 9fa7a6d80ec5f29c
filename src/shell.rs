use std::io::{self, BufRead, Write};

use rustyline::{DefaultEditor, error::ReadlineError};
use tracing::{debug, warn};

use crate::{
    error::ErrorKind,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Number,
    },
};

/// Printed once when the shell starts.
pub const BANNER: &str = "Calculator (type 'exit' or 'quit' to leave)";
/// Printed before every line is read.
pub const PROMPT: &str = "> ";
/// Inputs that end the session, compared case-insensitively.
pub const EXIT_COMMANDS: [&str; 3] = ["exit", "quit", "q"];

/// What a [`LineReader`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A line of input without its line terminator.
    Line(String),
    /// The input is exhausted.
    Eof,
    /// The user interrupted the read (Ctrl-C).
    Interrupted,
}

/// A source of input lines for the [`Shell`].
pub trait LineReader {
    /// Shows `prompt` and reads one line.
    fn read_line(&mut self, prompt: &str) -> io::Result<ReadOutcome>;

    /// Called with every line the shell evaluates.
    fn record(&mut self, _line: &str) {}
}

impl<T: LineReader + ?Sized> LineReader for &mut T {
    fn read_line(&mut self, prompt: &str) -> io::Result<ReadOutcome> {
        (**self).read_line(prompt)
    }

    fn record(&mut self, line: &str) {
        (**self).record(line);
    }
}

/// Reads lines through a `rustyline` editor, with in-memory history.
pub struct EditorReader {
    editor: DefaultEditor,
}

impl EditorReader {
    /// Creates a reader attached to the terminal.
    ///
    /// # Errors
    /// Fails if the terminal cannot be configured for line editing.
    pub fn new() -> Result<Self, ReadlineError> {
        Ok(Self { editor: DefaultEditor::new()? })
    }
}

impl LineReader for EditorReader {
    fn read_line(&mut self, prompt: &str) -> io::Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadOutcome::Line(line)),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Io(error)) => Err(error),
            Err(error) => Err(io::Error::other(error.to_string())),
        }
    }

    fn record(&mut self, line: &str) {
        if let Err(error) = self.editor.add_history_entry(line) {
            warn!(%error, "could not add line to history");
        }
    }
}

/// Reads lines from any [`BufRead`], echoing the prompt to `prompt_out`.
///
/// Used when standard input is not a terminal, and in tests.
///
/// # Example
/// ```
/// use std::io::Cursor;
///
/// use reckon::shell::{BufReadReader, LineReader, ReadOutcome};
///
/// let mut prompts = Vec::new();
/// let mut reader = BufReadReader::new(Cursor::new("1 + 1\r\n"), &mut prompts);
/// assert_eq!(reader.read_line("> ").unwrap(), ReadOutcome::Line("1 + 1".into()));
/// assert_eq!(reader.read_line("> ").unwrap(), ReadOutcome::Eof);
/// drop(reader);
/// assert_eq!(prompts, b"> > ");
/// ```
pub struct BufReadReader<R, W> {
    input:      R,
    prompt_out: W,
}

impl<R: BufRead, W: Write> BufReadReader<R, W> {
    pub const fn new(input: R, prompt_out: W) -> Self {
        Self { input,
               prompt_out }
    }
}

impl<R: BufRead, W: Write> LineReader for BufReadReader<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<ReadOutcome> {
        self.prompt_out.write_all(prompt.as_bytes())?;
        self.prompt_out.flush()?;

        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(ReadOutcome::Eof);
        }
        // Undecodable bytes become U+FFFD, which the lexer then rejects.
        let line = String::from_utf8_lossy(&bytes);
        let trimmed = line.strip_suffix('\n')
                          .map_or(&*line, |l| l.strip_suffix('\r').unwrap_or(l));
        Ok(ReadOutcome::Line(trimmed.to_string()))
    }
}

/// The interactive read-evaluate-print loop.
///
/// Prints [`BANNER`], then repeatedly prompts, evaluates the line and prints
/// the result or an `Error: ...` line. Evaluation failures never end the
/// session; only an exit command, end of input or an interrupt does.
///
/// # Example
/// ```
/// use std::io::Cursor;
///
/// use reckon::shell::{BufReadReader, Shell};
///
/// let mut output = Vec::new();
/// let reader = BufReadReader::new(Cursor::new("2 + 2\n1 / 0\nquit\n"), std::io::sink());
/// let evaluated = Shell::new(reader, &mut output).run().unwrap();
///
/// assert_eq!(evaluated, 2);
/// assert_eq!(String::from_utf8(output).unwrap(),
///            "Calculator (type 'exit' or 'quit' to leave)\n4\nError: division by zero\n");
/// ```
pub struct Shell<R, W> {
    reader:    R,
    output:    W,
    evaluator: Evaluator,
}

impl<R: LineReader, W: Write> Shell<R, W> {
    /// Creates a shell using the default [`Evaluator`].
    pub const fn new(reader: R, output: W) -> Self {
        Self { reader,
               output,
               evaluator: Evaluator::new() }
    }

    /// Replaces the evaluator, for example to tighten its depth limit.
    #[must_use]
    pub fn with_evaluator(mut self, evaluator: Evaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Runs the session to completion.
    ///
    /// Returns the number of lines that were evaluated.
    ///
    /// # Errors
    /// Fails only if reading input or writing output fails.
    pub fn run(&mut self) -> io::Result<usize> {
        writeln!(self.output, "{BANNER}")?;
        let mut evaluated = 0;

        loop {
            self.output.flush()?;
            let line = match self.reader.read_line(PROMPT)? {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Eof | ReadOutcome::Interrupted => {
                    writeln!(self.output)?;
                    break;
                },
            };

            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            if is_exit_command(input) {
                break;
            }

            self.reader.record(input);
            let result = self.evaluator.evaluate(input);
            writeln!(self.output, "{}", render(&result))?;
            evaluated += 1;
        }

        debug!(evaluated, "session ended");
        self.output.flush()?;
        Ok(evaluated)
    }
}

/// Whether `input` (already trimmed) ends the session.
///
/// # Example
/// ```
/// use reckon::shell::is_exit_command;
///
/// assert!(is_exit_command("QUIT"));
/// assert!(is_exit_command("q"));
/// assert!(!is_exit_command("quit()"));
/// ```
#[must_use]
pub fn is_exit_command(input: &str) -> bool {
    EXIT_COMMANDS.iter()
                 .any(|command| input.eq_ignore_ascii_case(command))
}

/// Formats an evaluation result as one line of shell output.
///
/// # Example
/// ```
/// use reckon::{evaluate, shell::render};
///
/// assert_eq!(render(&evaluate("7 / 2")), "3.5");
/// assert_eq!(render(&evaluate("7 // 0")), "Error: division by zero");
/// assert_eq!(render(&evaluate("x")), "Error: unsupported expression");
/// ```
#[must_use]
pub fn render(result: &EvalResult<Number>) -> String {
    match result {
        Ok(value) => value.to_string(),
        Err(error) if error.kind() == ErrorKind::DivisionByZero => {
            "Error: division by zero".to_string()
        },
        Err(error) => format!("Error: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn exit_commands_ignore_case() {
        for input in ["exit", "Exit", "QUIT", "q", "Q"] {
            assert!(is_exit_command(input), "{input}");
        }
        for input in ["", "quit now", "exit()", "qq"] {
            assert!(!is_exit_command(input), "{input}");
        }
    }

    #[test]
    fn buf_read_reader_strips_terminators() {
        let mut reader = BufReadReader::new(Cursor::new("a\nb\r\nc"), io::sink());
        assert_eq!(reader.read_line(PROMPT).unwrap(), ReadOutcome::Line("a".into()));
        assert_eq!(reader.read_line(PROMPT).unwrap(), ReadOutcome::Line("b".into()));
        assert_eq!(reader.read_line(PROMPT).unwrap(), ReadOutcome::Line("c".into()));
        assert_eq!(reader.read_line(PROMPT).unwrap(), ReadOutcome::Eof);
    }

    #[test]
    fn render_uses_number_formatting() {
        assert_eq!(render(&Ok(Number::Integer(-9))), "-9");
        assert_eq!(render(&Ok(Number::Float(1e16))), "1e+16");
        assert_eq!(render(&Ok(Number::Float(3.0))), "3.0");
    }
}
