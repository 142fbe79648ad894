use crate::env::Environment;
use anyhow::Result;
use std::io::Write;

/// Tells the interactive loop whether to keep running after a dispatch.
///
/// Every command, built-in or external, resolves to one of these two values.
/// Only the `exit` built-in produces [`Flow::Exit`]; external commands always
/// continue the loop regardless of how the child terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Prompt for the next line.
    Continue,
    /// Leave the interactive loop.
    Exit,
}

/// Object-safe trait for any command the interpreter can run.
///
/// Implemented by built-ins via a blanket impl and by the external launcher.
pub trait ExecutableCommand {
    /// Executes the command.
    ///
    /// Regular output goes to `stdout`; failures are returned as errors and
    /// reported by the dispatcher on the error stream.
    fn execute(self: Box<Self>, stdout: &mut dyn Write, env: &mut Environment) -> Result<Flow>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`. The factory
/// for external commands uses the environment's search path to resolve
/// executables.
pub trait CommandFactory {
    /// Attempt to create a command instance for the provided name and arguments.
    fn try_create(
        &self,
        env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>>;

    /// Name of the built-in this factory creates, if it creates one.
    ///
    /// The interpreter collects these at construction time to form the
    /// read-only table of built-in names shown by `help`.
    fn builtin_name(&self) -> Option<&'static str> {
        None
    }
}
