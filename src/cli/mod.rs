pub mod command;
pub mod repl;

pub use command::{CLI_COMMANDS, CliCommand, Command, help_line};
pub use repl::{Flow, execute, run};
