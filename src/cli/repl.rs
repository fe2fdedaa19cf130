use std::io::{self, BufRead, Write};

use tracing::{info, warn};

use super::command::{Command, help_line};
use crate::game::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Reads commands line by line until `exit` or end of input.
pub fn run<W: Write, R: BufRead>(session: &mut Session<W>, input: R) -> io::Result<()> {
    session.show_prompt()?;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            session.show_prompt()?;
            continue;
        }

        let flow = match line.parse::<Command>() {
            Ok(command) => execute(session, command)?,
            Err(err) => {
                warn!(%err, line = %line, "could not parse command");
                session.show_status(&err.to_string())?;
                Flow::Continue
            }
        };
        if flow == Flow::Exit {
            break;
        }
        session.show_prompt()?;
    }
    info!(session = %session.id, turns = session.turn(), "session ended");
    Ok(())
}

/// Applies one command and repaints what it changed. Rejected commands end
/// up on the status line; only terminal failures are returned.
pub fn execute<W: Write>(session: &mut Session<W>, command: Command) -> io::Result<Flow> {
    let result = match command {
        Command::Roll(steps) => session.roll(steps),
        Command::Buy => session.buy(),
        Command::End => session.end_turn(),
        Command::View(tile_id) => session.view(tile_id),
        Command::ToggleIds => Ok(session.toggle_ids()),
        Command::Redraw => {
            session.redraw()?;
            Ok(String::new())
        }
        Command::Help => Ok(help_line()),
        Command::Exit => {
            session.show_status("goodbye")?;
            return Ok(Flow::Exit);
        }
    };

    session.draw()?;
    match result {
        Ok(message) => session.show_status(&message)?,
        Err(err) => {
            warn!(%err, ?command, "command rejected");
            session.show_status(&err.to_string())?;
        }
    }
    Ok(Flow::Continue)
}
