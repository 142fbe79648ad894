use crate::SHELL_NAME;
use crate::command::{CommandFactory, Flow};
use crate::env::Environment;
use crate::lexer;
use crate::reader::{LineReader, ReadOutcome};
use anyhow::Result;
use std::io::{self, Write};

/// Prompt written before each line is read.
const PROMPT: &str = "> ";

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate, the builtins and
/// ExternalCommand.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// The interactive command interpreter.
///
/// Owns the [`Environment`] and an ordered, immutable list of
/// [`CommandFactory`] objects built once at startup: one factory per builtin
/// followed by the external-command launcher. Dispatch scans the list in
/// order, so builtins always win over an external program of the same name.
///
/// Example
/// ```
/// use minnow::{Flow, Interpreter};
///
/// let mut shell = Interpreter::default();
/// let mut out: Vec<u8> = Vec::new();
/// let mut err: Vec<u8> = Vec::new();
/// assert_eq!(shell.eval("exit now", &mut out, &mut err), Flow::Exit);
/// ```
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create an interpreter with a custom set of command factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>) -> Self {
        let builtins = commands.iter().filter_map(|f| f.builtin_name()).collect();
        Self {
            env: Environment::new(builtins),
            commands,
        }
    }

    /// The registered builtin names, in registration (and scan) order.
    pub fn builtin_names(&self) -> &[&'static str] {
        &self.env.builtins
    }

    /// Decide what a token sequence means and run it.
    ///
    /// An empty sequence is a no-op. Otherwise the first token selects a
    /// command: the first factory that recognizes it wins, and an
    /// unrecognized name is reported as not found. Command failures are
    /// reported on `err` as a single prefixed line; they never escape the
    /// dispatcher, which only ever answers with a [`Flow`].
    pub fn dispatch(&mut self, tokens: &[String], out: &mut dyn Write, err: &mut dyn Write) -> Flow {
        let Some((name, rest)) = tokens.split_first() else {
            return Flow::Continue;
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();

        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(&self.env, name, &args) {
                return match cmd.execute(out, &mut self.env) {
                    Ok(flow) => flow,
                    Err(e) => {
                        let _ = writeln!(err, "{}: {:#}", SHELL_NAME, e);
                        Flow::Continue
                    }
                };
            }
        }

        let _ = writeln!(err, "{}: {}: command not found", SHELL_NAME, name);
        Flow::Continue
    }

    /// Tokenize one line and dispatch it: the whole pipeline of a single
    /// loop iteration.
    pub fn eval(&mut self, line: &str, out: &mut dyn Write, err: &mut dyn Write) -> Flow {
        let tokens = lexer::split_into_tokens(line);
        self.dispatch(&tokens, out, err)
    }

    /// Run the interactive loop against the real standard streams.
    ///
    /// Leaves the loop when `exit` is dispatched or the input stream ends;
    /// an interrupt at the prompt discards the pending line. Only hard
    /// reader failures are returned as errors.
    pub fn repl(&mut self) -> Result<()> {
        let mut reader = LineReader::new()?;
        loop {
            match reader.read_line(PROMPT)? {
                ReadOutcome::Eof => break,
                ReadOutcome::Interrupted => continue,
                ReadOutcome::Line(line) => {
                    if self.eval(&line, &mut io::stdout(), &mut io::stderr()) == Flow::Exit {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the default command set: the `cd`, `help`
    /// and `exit` builtins, then the external-command launcher as the
    /// fallback.
    fn default() -> Self {
        use crate::builtin::{Cd, Exit, Help};
        use crate::external::ExternalCommand;
        Self::new(vec![
            Box::new(Factory::<Cd>::default()),
            Box::new(Factory::<Help>::default()),
            Box::new(Factory::<Exit>::default()),
            Box::new(Factory::<ExternalCommand>::default()),
        ])
    }
}
