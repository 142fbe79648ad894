use crate::command::{CommandFactory, ExecutableCommand, Flow};
use crate::env::Environment;
use crate::interpreter::Factory;
use anyhow::{Context, Result};
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// A command that is not a builtin: a resolved executable plus the arguments
/// it will receive.
pub struct ExternalCommand {
    /// Resolved path of the executable image.
    path: PathBuf,
    /// The command name exactly as typed, kept for `argv[0]` and diagnostics.
    name: OsString,
    args: Vec<OsString>,
}

impl ExternalCommand {
    pub fn new(path: PathBuf, name: OsString, args: Vec<OsString>) -> Self {
        Self { path, name, args }
    }
}

impl CommandFactory for Factory<ExternalCommand> {
    fn try_create(
        &self,
        env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        let search_paths = env.search_path().unwrap_or_default();
        let executable = find_command_path(&search_paths, Path::new(name))?;
        Some(Box::new(ExternalCommand::new(
            executable,
            name.into(),
            args.iter().map(|a| a.into()).collect(),
        )))
    }
}

impl ExecutableCommand for ExternalCommand {
    /// Spawn the child and block until it has truly terminated.
    ///
    /// The child inherits the shell's standard streams, so its output shows
    /// up directly in the session. Whatever status the child ends with, the
    /// interactive loop keeps running.
    fn execute(self: Box<Self>, _stdout: &mut dyn Write, env: &mut Environment) -> Result<Flow> {
        let mut command = Command::new(&self.path);
        command.args(&self.args).current_dir(&env.current_dir);
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.arg0(&self.name);
        }

        let mut child = command
            .spawn()
            .with_context(|| format!("{}: cannot execute", self.name.to_string_lossy()))?;

        // A wait may observe a job-control stop on some platforms; only an
        // exited or signaled status ends the command.
        loop {
            let status = child.wait()?;
            if is_terminal_status(&status) {
                break;
            }
        }
        Ok(Flow::Continue)
    }
}

#[cfg(unix)]
fn is_terminal_status(status: &ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.code().is_some() || status.signal().is_some()
}

#[cfg(not(unix))]
fn is_terminal_status(_status: &ExitStatus) -> bool {
    true
}

/// Resolve a command name the way a typical shell would.
///
/// - An absolute path resolves to itself if it exists.
/// - A `./`-prefixed name resolves against the current directory.
/// - A name with several components (e.g. `bin/tool`) resolves against the
///   current directory.
/// - A bare name is searched through the directories of `search_paths` in
///   order; the first existing candidate wins.
/// - An empty name never resolves.
pub fn find_command_path(search_paths: &OsStr, program: &Path) -> Option<PathBuf> {
    if program.as_os_str().is_empty() {
        return None;
    }
    if program.is_absolute() {
        return exists(program);
    }

    let in_current_dir = cfg!(not(unix)) || program.starts_with("./");
    if in_current_dir && program.exists() {
        return Some(program.to_path_buf());
    }

    if program.components().count() > 1 {
        return exists(program);
    }

    std::env::split_paths(search_paths)
        .map(|dir| dir.join(program))
        .find_map(|candidate| exists(&candidate))
}

fn exists(path: &Path) -> Option<PathBuf> {
    if path.exists() {
        Some(path.to_path_buf())
    } else {
        None
    }
}
