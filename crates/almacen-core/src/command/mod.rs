//! `!`-prefixed text commands.

pub mod builtin;

pub use builtin::{
    BuiltinCommand, CommandKind, TextCommand, builtin_commands, find_builtin_command,
    parse_command,
};

/// Prefix that marks a chat message as a command.
pub const COMMAND_PREFIX: &str = "!";
