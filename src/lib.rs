//! A tiny interactive command interpreter.
//!
//! This crate provides the building blocks of a minimal shell: a line reader,
//! a whitespace tokenizer, a dispatcher that routes the first word of a line
//! to a built-in command or to an external program, and a launcher that runs
//! external programs and waits for them to terminate. It is intentionally
//! small and easy to read, suitable for experiments with process management
//! and interactive loops.
//!
//! The main entry point is [`Interpreter`], which owns the set of registered
//! commands and the mutable process state. The public modules [`command`],
//! [`env`] and [`lexer`] expose the traits and types needed to embed the
//! interpreter or extend it with new commands.

mod builtin;
pub mod command;
pub mod env;
mod external;
mod interpreter;
pub mod lexer;
mod reader;
#[cfg(test)]
mod testutil;

/// Name of the program, used as the prefix of every diagnostic line.
pub const SHELL_NAME: &str = "minnow";

pub use command::Flow;
pub use interpreter::Interpreter;
