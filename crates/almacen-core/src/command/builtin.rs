//! Builtin text commands.
//!
//! These commands are always available and cannot be modified by users.
//! They are loaded once at startup and cached for the lifetime of the process.

use std::sync::OnceLock;

/// Which handler a builtin command dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Inventory,
    Stock,
    Help,
}

/// A builtin text command provided by the bot.
#[derive(Debug, Clone)]
pub struct BuiltinCommand {
    /// Command name (without the prefix)
    pub name: &'static str,
    /// Alternative names resolving to the same command
    pub aliases: &'static [&'static str],
    /// Usage format (e.g., "!stock [producto]")
    pub usage: &'static str,
    /// Human-readable description
    pub description: &'static str,
    pub kind: CommandKind,
}

impl BuiltinCommand {
    pub const fn new(
        name: &'static str,
        aliases: &'static [&'static str],
        usage: &'static str,
        description: &'static str,
        kind: CommandKind,
    ) -> Self {
        Self {
            name,
            aliases,
            usage,
            description,
            kind,
        }
    }

    fn matches(&self, word: &str) -> bool {
        self.name == word || self.aliases.contains(&word)
    }
}

/// Static storage for builtin commands (initialized once).
static BUILTIN_COMMANDS: OnceLock<Vec<BuiltinCommand>> = OnceLock::new();

/// Returns a reference to all builtin commands.
pub fn builtin_commands() -> &'static [BuiltinCommand] {
    BUILTIN_COMMANDS.get_or_init(|| {
        vec![
            BuiltinCommand::new(
                "inventario",
                &["inv", "start"],
                "!inventario",
                "Abrir interfaz interactiva",
                CommandKind::Inventory,
            ),
            BuiltinCommand::new(
                "stock",
                &["s"],
                "!stock [producto]",
                "Buscar/Ver stock",
                CommandKind::Stock,
            ),
            BuiltinCommand::new(
                "ayuda",
                &["help"],
                "!ayuda",
                "Esta guía",
                CommandKind::Help,
            ),
        ]
    })
}

/// Find a builtin command by name or alias (case-insensitive).
pub fn find_builtin_command(word: &str) -> Option<&'static BuiltinCommand> {
    let word = word.to_lowercase();
    builtin_commands().iter().find(|cmd| cmd.matches(&word))
}

/// A text command parsed from a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextCommand {
    Inventory,
    /// `None` lists everything; `Some` searches item names.
    Stock { term: Option<String> },
    Help,
}

/// Parses a chat message into a builtin command.
///
/// Returns `None` for messages without the prefix and for unknown
/// commands, which are ignored silently.
pub fn parse_command(content: &str, prefix: &str) -> Option<TextCommand> {
    let body = content.strip_prefix(prefix)?;
    let mut words = body.split_whitespace();
    let command = find_builtin_command(words.next()?)?;
    let args: Vec<&str> = words.collect();

    Some(match command.kind {
        CommandKind::Inventory => TextCommand::Inventory,
        CommandKind::Help => TextCommand::Help,
        CommandKind::Stock if args.is_empty() => TextCommand::Stock { term: None },
        CommandKind::Stock => TextCommand::Stock {
            term: Some(args.join(" ").to_lowercase()),
        },
    })
}
