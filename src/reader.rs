use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// What a single read attempt produced.
///
/// End-of-input is its own outcome rather than an empty line, so the caller
/// can leave the loop instead of prompting forever against a closed stream.
#[derive(Debug)]
pub enum ReadOutcome {
    /// A full line of input, without its terminator.
    Line(String),
    /// The user cancelled the line being edited; prompt again.
    Interrupted,
    /// The input stream is exhausted.
    Eof,
}

/// Interactive line reader backed by [`rustyline`].
///
/// Blocks until a whole line is available. Line buffering, editing and
/// history live in the editor; non-blank lines are recorded in the
/// in-session history as they are read.
pub struct LineReader {
    editor: DefaultEditor,
}

impl LineReader {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }

    /// Print `prompt` and read one line.
    ///
    /// Only hard editor failures surface as errors; end-of-input and
    /// interrupts are ordinary outcomes.
    pub fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(ReadOutcome::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(err) => Err(err.into()),
        }
    }
}
