use std::env as stdenv;
use std::ffi::OsString;
use std::path::PathBuf;

/// Mutable process state owned by the interpreter.
///
/// The working directory is the only value a command may change (`cd`); the
/// built-in name table is filled once at construction and read-only after
/// that. There is no variable map: the interpreter performs no
/// environment-variable expansion, and launched children inherit the process
/// environment as-is.
#[derive(Debug, Clone)]
pub struct Environment {
    pub current_dir: PathBuf,
    pub builtins: Vec<&'static str>,
}

impl Environment {
    pub fn new(builtins: Vec<&'static str>) -> Self {
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            current_dir,
            builtins,
        }
    }

    /// The search path used to resolve external command names, straight from
    /// the process environment.
    pub fn search_path(&self) -> Option<OsString> {
        stdenv::var_os("PATH")
    }
}
