use std::str::FromStr;

use itertools::Itertools;
use strum::EnumString;

use crate::game::GameError;
use crate::types::TileId;

pub struct CliCommand {
    pub keyword: &'static str,
    pub alias: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub const CLI_COMMANDS: &[CliCommand] = &[
    CliCommand {
        keyword: "roll",
        alias: "r",
        usage: "roll [steps]",
        description: "Roll the dice, or move a fixed number of steps.",
    },
    CliCommand {
        keyword: "buy",
        alias: "b",
        usage: "buy",
        description: "Buy the tile you are standing on.",
    },
    CliCommand {
        keyword: "end",
        alias: "e",
        usage: "end",
        description: "End your turn.",
    },
    CliCommand {
        keyword: "view",
        alias: "v",
        usage: "view <tile>",
        description: "Describe a tile.",
    },
    CliCommand {
        keyword: "ids",
        alias: "i",
        usage: "ids",
        description: "Toggle between tile ids and tile details.",
    },
    CliCommand {
        keyword: "redraw",
        alias: "d",
        usage: "redraw",
        description: "Repaint the whole screen.",
    },
    CliCommand {
        keyword: "help",
        alias: "h",
        usage: "help",
        description: "List commands.",
    },
    CliCommand {
        keyword: "exit",
        alias: "x",
        usage: "exit",
        description: "Quit the game.",
    },
];

/// All commands on one line, for the status bar.
pub fn help_line() -> String {
    CLI_COMMANDS
        .iter()
        .map(|cmd| format!("{} ({})", cmd.usage, cmd.alias))
        .join(", ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
enum Keyword {
    #[strum(serialize = "roll", serialize = "r")]
    Roll,
    #[strum(serialize = "buy", serialize = "b")]
    Buy,
    #[strum(serialize = "end", serialize = "e")]
    End,
    #[strum(serialize = "view", serialize = "v")]
    View,
    #[strum(serialize = "ids", serialize = "i")]
    Ids,
    #[strum(serialize = "redraw", serialize = "d")]
    Redraw,
    #[strum(serialize = "help", serialize = "h")]
    Help,
    #[strum(serialize = "exit", serialize = "x")]
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Roll(Option<usize>),
    Buy,
    End,
    View(TileId),
    ToggleIds,
    Redraw,
    Help,
    Exit,
}

impl FromStr for Command {
    type Err = GameError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let word = words.next().unwrap_or_default();
        let keyword: Keyword = word
            .parse()
            .map_err(|_| GameError::UnknownCommand(word.to_string()))?;
        let arg = words.next();
        if let Some(extra) = words.next() {
            return Err(GameError::InvalidArgument(format!(
                "unexpected `{extra}` after `{word}`"
            )));
        }

        let command = match keyword {
            Keyword::Roll => Command::Roll(arg.map(parse_number).transpose()?),
            Keyword::View => {
                let arg = arg.ok_or_else(|| {
                    GameError::InvalidArgument("view needs a tile number".to_string())
                })?;
                Command::View(parse_number(arg)?)
            }
            Keyword::Buy => Command::Buy,
            Keyword::End => Command::End,
            Keyword::Ids => Command::ToggleIds,
            Keyword::Redraw => Command::Redraw,
            Keyword::Help => Command::Help,
            Keyword::Exit => Command::Exit,
        };
        if arg.is_some() && !matches!(command, Command::Roll(_) | Command::View(_)) {
            return Err(GameError::InvalidArgument(format!(
                "`{word}` takes no argument"
            )));
        }
        Ok(command)
    }
}

fn parse_number(arg: &str) -> Result<usize, GameError> {
    arg.parse()
        .map_err(|_| GameError::InvalidArgument(format!("`{arg}` is not a number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_and_aliases_parse() {
        assert_eq!("roll".parse(), Ok(Command::Roll(None)));
        assert_eq!("r 3".parse(), Ok(Command::Roll(Some(3))));
        assert_eq!("  BUY ".parse(), Ok(Command::Buy));
        assert_eq!("e".parse(), Ok(Command::End));
        assert_eq!("v 39".parse(), Ok(Command::View(39)));
        assert_eq!("ids".parse(), Ok(Command::ToggleIds));
        assert_eq!("redraw".parse(), Ok(Command::Redraw));
        assert_eq!("x".parse(), Ok(Command::Exit));
    }

    #[test]
    fn unknown_words_are_rejected() {
        assert_eq!(
            "trade".parse::<Command>(),
            Err(GameError::UnknownCommand("trade".to_string()))
        );
        assert_eq!(
            "".parse::<Command>(),
            Err(GameError::UnknownCommand(String::new()))
        );
    }

    #[test]
    fn arguments_are_checked() {
        assert!(matches!(
            "view".parse::<Command>(),
            Err(GameError::InvalidArgument(_))
        ));
        assert!(matches!(
            "roll two".parse::<Command>(),
            Err(GameError::InvalidArgument(_))
        ));
        assert!(matches!(
            "buy 3".parse::<Command>(),
            Err(GameError::InvalidArgument(_))
        ));
        assert!(matches!(
            "view 1 2".parse::<Command>(),
            Err(GameError::InvalidArgument(_))
        ));
    }

    #[test]
    fn help_lists_every_command() {
        let help = help_line();
        for cmd in CLI_COMMANDS {
            assert!(help.contains(cmd.usage));
            assert_eq!(cmd.keyword.parse::<Keyword>().ok(), cmd.alias.parse().ok());
        }
    }
}
