use crate::SHELL_NAME;
use crate::command::{CommandFactory, ExecutableCommand, Flow};
use crate::env::Environment;
use crate::interpreter::Factory;
use anyhow::{Context, Result};
use argh::{EarlyExit, FromArgs};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed
/// directly in-process without spawning a child process. The value they
/// return decides whether the interactive loop keeps running.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "cd" or "exit".
    fn name() -> &'static str;

    /// Executes the command against the provided output stream and environment.
    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<Flow>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(self: Box<Self>, stdout: &mut dyn Write, env: &mut Environment) -> Result<Flow> {
        T::execute(*self, stdout, env)
    }
}

/// Fallback command produced when argument parsing stops early, e.g. for
/// `--help` or an unknown switch. Prints argh's generated text and keeps
/// the loop running.
struct Usage {
    output: String,
}

impl ExecutableCommand for Usage {
    fn execute(self: Box<Self>, stdout: &mut dyn Write, _env: &mut Environment) -> Result<Flow> {
        writeln!(stdout, "{}", self.output.trim_end())?;
        Ok(Flow::Continue)
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(
        &self,
        _env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        if name != T::name() {
            return None;
        }
        Some(match T::from_args(&[name], args) {
            Ok(cmd) => Box::new(cmd),
            Err(EarlyExit { output, .. }) => Box::new(Usage { output }),
        })
    }

    fn builtin_name(&self) -> Option<&'static str> {
        Some(T::name())
    }
}

#[derive(FromArgs)]
/// Change the working directory of the shell.
pub struct Cd {
    #[argh(positional)]
    /// directory to switch to; absolute or relative to the current directory
    pub target: Option<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<Flow> {
        let target = match self.target.as_deref() {
            Some(t) if !t.is_empty() => PathBuf::from(t),
            _ => anyhow::bail!("expected an argument to \"cd\""),
        };

        let new_dir = if target.is_absolute() {
            target
        } else {
            env.current_dir.join(target)
        };

        let canonical = fs::canonicalize(&new_dir)
            .with_context(|| format!("cd: {}", new_dir.display()))?;
        env::set_current_dir(&canonical)
            .with_context(|| format!("cd: {}", canonical.display()))?;
        env.current_dir = canonical;
        Ok(Flow::Continue)
    }
}

#[derive(FromArgs)]
/// List the commands built into the shell.
pub struct Help {
    #[argh(positional, greedy)]
    /// trailing arguments are accepted and ignored
    pub _args: Vec<String>,
}

impl BuiltinCommand for Help {
    fn name() -> &'static str {
        "help"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<Flow> {
        writeln!(stdout, "{}, a small interactive shell", SHELL_NAME)?;
        writeln!(
            stdout,
            "Type a program name followed by its arguments, then press enter."
        )?;
        writeln!(stdout, "The following commands are built in:")?;
        for name in &env.builtins {
            writeln!(stdout, "  {}", name)?;
        }
        writeln!(
            stdout,
            "Use the man command for information on other programs."
        )?;
        Ok(Flow::Continue)
    }
}

#[derive(FromArgs)]
/// Leave the shell.
pub struct Exit {
    #[argh(positional, greedy)]
    /// trailing arguments are accepted and ignored
    pub _args: Vec<String>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(self, _stdout: &mut dyn Write, _env: &mut Environment) -> Result<Flow> {
        Ok(Flow::Exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::lock_current_dir;
    use std::env as stdenv;
    use std::io;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn test_env() -> Environment {
        Environment::new(vec!["cd", "help", "exit"])
    }

    fn make_unique_temp_dir() -> io::Result<PathBuf> {
        let mut p = stdenv::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        p.push(format!("minnow_test_cd_{}_{}", std::process::id(), nanos));
        fs::create_dir_all(&p)?;
        Ok(p)
    }

    #[test]
    fn cd_changes_to_absolute_path() {
        let _lock = lock_current_dir();
        let temp = make_unique_temp_dir().expect("failed to create temp dir");
        let canonical_temp = fs::canonicalize(&temp).expect("canonicalize failed");

        let orig = stdenv::current_dir().unwrap();
        let mut env = test_env();

        let cmd = Cd {
            target: Some(canonical_temp.to_string_lossy().to_string()),
        };
        let flow = cmd.execute(&mut io::sink(), &mut env).unwrap();

        assert_eq!(flow, Flow::Continue);
        assert_eq!(
            fs::canonicalize(stdenv::current_dir().unwrap()).unwrap(),
            canonical_temp
        );
        assert_eq!(env.current_dir, canonical_temp);

        stdenv::set_current_dir(orig).expect("failed to restore cwd");
        let _ = fs::remove_dir_all(&temp);
    }

    #[test]
    fn cd_without_argument_errors_and_keeps_cwd() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();
        let mut env = test_env();

        let cmd = Cd { target: None };
        let res = cmd.execute(&mut io::sink(), &mut env);

        assert!(res.is_err());
        assert!(res.unwrap_err().to_string().contains("cd"));
        assert_eq!(stdenv::current_dir().unwrap(), orig);
        assert_eq!(env.current_dir, orig);
    }

    #[test]
    fn cd_to_nonexistent_path_errors_and_keeps_cwd() {
        let _lock = lock_current_dir();
        let orig = stdenv::current_dir().unwrap();
        let mut env = test_env();

        let name = format!("nonexistent_dir_for_minnow_test_{}", std::process::id());
        let cmd = Cd { target: Some(name) };
        let res = cmd.execute(&mut io::sink(), &mut env);

        assert!(res.is_err());
        assert_eq!(stdenv::current_dir().unwrap(), orig);
        assert_eq!(env.current_dir, orig);
    }

    #[test]
    fn help_lists_builtins_in_registration_order() {
        let mut env = test_env();
        let mut out = Vec::new();

        let cmd = Help { _args: Vec::new() };
        let flow = cmd.execute(&mut out, &mut env).unwrap();
        assert_eq!(flow, Flow::Continue);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].contains(SHELL_NAME));
        assert_eq!(&lines[2..5], &["  cd", "  help", "  exit"]);
        assert!(lines.last().unwrap().contains("man"));
    }

    #[test]
    fn help_ignores_trailing_arguments() {
        let mut env = test_env();
        let mut out = Vec::<u8>::new();

        let cmd = Help {
            _args: vec!["me".to_string(), "please".to_string()],
        };
        let flow = cmd.execute(&mut out, &mut env).unwrap();
        assert_eq!(flow, Flow::Continue);
        assert!(!out.is_empty());
    }

    #[test]
    fn exit_terminates_the_loop() {
        let mut env = test_env();
        let cmd = Exit { _args: Vec::new() };
        assert_eq!(cmd.execute(&mut io::sink(), &mut env).unwrap(), Flow::Exit);
    }

    #[test]
    fn exit_with_arguments_still_terminates_and_prints_nothing() {
        let mut env = test_env();
        let mut out = Vec::<u8>::new();
        let cmd = Exit {
            _args: vec!["0".to_string()],
        };
        assert_eq!(cmd.execute(&mut out, &mut env).unwrap(), Flow::Exit);
        assert!(out.is_empty());
    }
}
