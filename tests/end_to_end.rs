use std::io::Cursor;

use monopoly_tui::cli::{self, Command, Flow};
use monopoly_tui::game::{GameConfig, GameError, Session};
use monopoly_tui::types::{NUM_TILES, OwnershipStatus, Position};
use monopoly_tui::{BoardConfig, Renderer};

fn new_session() -> Session<Vec<u8>> {
    let mut session = Session::new(
        &BoardConfig::classic().unwrap(),
        GameConfig::default(),
        Renderer::new(Vec::new()),
    )
    .unwrap();
    session.start().unwrap();
    take_output(&mut session);
    session
}

fn take_output(session: &mut Session<Vec<u8>>) -> String {
    let bytes = std::mem::take(session.renderer_mut().writer_mut());
    String::from_utf8(bytes).unwrap()
}

fn cursor(position: Position) -> String {
    format!("\x1b[{};{}H", position.row, position.col)
}

#[test]
fn first_frame_draws_board_and_tokens() {
    let mut session = Session::new(
        &BoardConfig::classic().unwrap(),
        GameConfig::default(),
        Renderer::new(Vec::new()),
    )
    .unwrap();
    session.start().unwrap();
    let frame = take_output(&mut session);

    assert!(frame.starts_with("\x1b[2J"));
    assert!(frame.contains("BRDWALK"));
    let go_players = cursor(session.board().layout().player_position(0));
    assert!(frame.contains(&go_players));
    for token in ['A', 'B', 'C', 'D'] {
        assert!(frame.contains(token));
    }
}

#[test]
fn buy_then_pay_rent() {
    let mut session = new_session();
    let layout_detail = session.board().layout().detail_position(1);

    // Player A lands on Mediterranean Avenue and buys it.
    assert_eq!(cli::execute(&mut session, Command::Roll(Some(1))).unwrap(), Flow::Continue);
    take_output(&mut session);
    cli::execute(&mut session, Command::Buy).unwrap();

    let tile = &session.board().tiles()[1];
    assert_eq!(tile.status(), OwnershipStatus::Owned);
    assert_eq!(tile.owner(), Some(0));
    assert_eq!(session.player(0).money, 1440);

    let painted = take_output(&mut session);
    let at = painted
        .find(&cursor(layout_detail))
        .expect("detail cell repainted");
    let cell = &painted[at..];
    assert!(cell.contains('X'), "{cell:?}");
    assert!(cell.contains("   $60"), "{cell:?}");

    cli::execute(&mut session, Command::End).unwrap();

    // Player B follows onto the same tile and owes the base rent.
    let message = session.roll(Some(1)).unwrap();
    assert!(message.contains("paid $2 rent to A"), "{message}");
    assert_eq!(session.player(0).money, 1442);
    assert_eq!(session.player(1).money, 1498);

    // B cannot buy it out from under A.
    assert_eq!(
        session.buy(),
        Err(GameError::OwnedByOther {
            tile_id: 1,
            owner: 'A'
        })
    );
    assert_eq!(session.player(1).money, 1498);
    take_output(&mut session);
    cli::execute(&mut session, Command::Buy).unwrap();
    assert!(take_output(&mut session).contains("already owned by player A"));
}

#[test]
fn standing_still_repaints_nothing() {
    let mut session = new_session();
    session.roll(Some(0)).unwrap();
    assert_eq!(session.draw().unwrap(), 0);
    assert!(take_output(&mut session).is_empty());
    assert_eq!(session.board().presence_text(0), "A B C D");
}

#[test]
fn moving_repaints_both_presence_rows() {
    let mut session = new_session();
    session.roll(Some(5)).unwrap();
    assert_eq!(session.draw().unwrap(), 2);
    let painted = take_output(&mut session);
    let layout = session.board().layout();
    let from = painted.find(&cursor(layout.player_position(0))).unwrap();
    let to = painted.find(&cursor(layout.player_position(5))).unwrap();
    assert!(from < to);
    assert_eq!(session.board().presence_text(0), "  B C D");
    assert_eq!(session.board().presence_text(5), "A      ");
}

#[test]
fn redraw_repaints_every_cell() {
    let mut session = new_session();
    cli::execute(&mut session, Command::Redraw).unwrap();
    let frame = take_output(&mut session);
    assert!(frame.starts_with("\x1b[2J"));
    for tile_id in 0..NUM_TILES {
        let detail = cursor(session.board().layout().detail_position(tile_id));
        assert!(frame.contains(&detail), "tile {tile_id}");
    }
}

#[test]
fn repl_reports_errors_and_stops_on_exit() {
    let mut session = new_session();
    let input = Cursor::new("roll 1\n\nbuy\nbogus\nend\nexit\nroll\n");
    cli::run(&mut session, input).unwrap();

    assert_eq!(session.player(0).position(), 1);
    assert_eq!(session.board().tiles()[1].owner(), Some(0));
    assert_eq!(session.current_player().id, 1);
    assert!(!session.has_rolled());

    let output = take_output(&mut session);
    assert!(output.contains("unknown command `bogus`"));
    assert!(output.contains("goodbye"));
}
