use pretty_assertions::assert_eq;
use scott_data::Direction;
use scott_engine::state::DARK_FLAG;
use scott_engine::*;
use std::sync::Arc;

const TINY: &[u8] = include_bytes!("fixtures/tiny.dat");

fn tiny() -> Arc<scott_data::Game> {
    Arc::new(load_game(TINY).expect("fixture loads"))
}

fn play(session: &mut Session, line: &str) -> Turn {
    let command = session.resolve_command(line);
    session.take_turn(&command)
}

#[test]
fn test_lib_version() {
    assert!(!SCOTT_VERSION.is_empty());
}

#[test]
fn test_opening_look() {
    let session = Session::start(tiny());
    assert_eq!(
        session.look(),
        LookData {
            is_dark: false,
            room_description: "I'm in a dusty hallway".into(),
            exits: vec![Direction::North],
            items: vec!["Brass lamp".into(), "Sign says: -EXIT-".into()],
        }
    );
}

#[test]
fn test_move_success_and_blocked() {
    let mut session = Session::start(tiny());
    assert_eq!(play(&mut session, "go west").outcome, Outcome::BadDirection);
    assert_eq!(session.location(), 1);
    assert_eq!(play(&mut session, "go north").outcome, Outcome::Success);
    assert_eq!(session.location(), 2);
    assert!(session.look().room_description.starts_with("I'm standing in a vault"));
}

#[test]
fn test_execute_moves_only() {
    let mut session = Session::start(tiny());
    let go = session.resolve_command("go north");
    assert_eq!(session.execute(&go), Outcome::Success);
    assert_eq!(session.location(), 2);
    let score = session.resolve_command("score");
    assert_eq!(session.execute(&score), Outcome::Success);
    assert!(!session.is_over());
    let nonsense = session.resolve_command("xyzzy");
    assert_eq!(session.execute(&nonsense), Outcome::Unknown);
}

#[test]
fn test_direction_alias_matches_full_command() {
    let session = Session::start(tiny());
    assert_eq!(session.resolve_command("n"), session.resolve_command("GO NORTH"));
}

#[test]
fn test_synonym_resolves_to_main_word() {
    let mut session = Session::start(tiny());
    let command = session.resolve_command("enter north");
    assert_eq!(command.verb, Some(1));
    assert_eq!(play(&mut session, "enter north").outcome, Outcome::Success);
    assert_eq!(session.location(), 2);
}

#[test]
fn test_moving_in_the_dark() {
    let mut session = Session::start(tiny());
    session.state_mut().set_flag(DARK_FLAG, true);
    assert!(session.is_dark());
    assert_eq!(play(&mut session, "n").outcome, Outcome::DangerousDark);
    assert_eq!(session.location(), 2);
    assert!(session.look().is_dark);
}

#[test]
fn test_death_in_the_dark() {
    let mut session = Session::start(tiny());
    session.state_mut().set_flag(DARK_FLAG, true);
    assert_eq!(play(&mut session, "w").outcome, Outcome::DeadDark);
    assert_eq!(session.location(), 3);
    assert!(!session.is_dark());
}

#[test]
fn test_dark_vault_kills_on_every_blocked_direction() {
    for direction in ["n", "s", "e", "w", "u", "d"] {
        let mut session = Session::start(tiny());
        // the vault only leads south
        session.state_mut().location = 2;
        session.state_mut().set_flag(DARK_FLAG, true);
        let outcome = play(&mut session, direction).outcome;
        if direction == "s" {
            assert_eq!(outcome, Outcome::DangerousDark, "{direction}");
            assert_eq!(session.location(), 1, "{direction}");
        } else {
            assert_eq!(outcome, Outcome::DeadDark, "{direction}");
            assert_eq!(session.location(), 3, "{direction}");
            assert!(!session.state().flag(DARK_FLAG), "{direction}");
        }
    }
}

#[test]
fn test_no_direction_leaves_limbo_alive_in_the_dark() {
    for direction in ["n", "s", "e", "w", "u", "d"] {
        let mut session = Session::start(tiny());
        session.state_mut().location = 3;
        session.state_mut().set_flag(DARK_FLAG, true);
        assert_eq!(play(&mut session, direction).outcome, Outcome::DeadDark, "{direction}");
        assert_eq!(session.location(), 3, "{direction}");
        assert!(!session.is_dark(), "{direction}");
    }
}

#[test]
fn test_automatic_actions_depend_on_room() {
    let mut session = Session::start(tiny());
    let ambient = session.default_command();
    assert!(ambient.is_automatic());
    assert_eq!(
        session.take_turn(&ambient).effects,
        vec![Effect::Message("A draught blows past.".into())]
    );
    play(&mut session, "n");
    assert!(session.take_turn(&ambient).effects.is_empty());
}

#[test]
fn test_action_conditions_must_hold() {
    let mut session = Session::start(tiny());
    let turn = play(&mut session, "light lamp");
    assert_eq!(turn, Turn::from(Outcome::Unsuccessful));
    assert_eq!(play(&mut session, "dance").outcome, Outcome::Unknown);
}

#[test]
fn test_score_ends_game_when_all_treasure_stored() {
    let mut session = Session::start(tiny());
    let turn = play(&mut session, "score");
    assert_eq!(turn.outcome, Outcome::Success);
    assert_eq!(turn.effects, vec![Effect::Score { stored: 1, total: 1 }, Effect::GameOver]);
    assert!(session.is_over());
}

#[test]
fn test_restart_discards_progress() {
    let game = tiny();
    let mut session = Session::start(Arc::clone(&game));
    play(&mut session, "n");
    session.state_mut().set_flag(DARK_FLAG, true);
    session.restart();
    assert_eq!(session.location(), 1);
    assert!(!session.state().flag(DARK_FLAG));
    assert_eq!(session.current(), &*game);
}

#[test]
fn test_sessions_are_independent() {
    let game = tiny();
    let mut first = Session::start(Arc::clone(&game));
    let second = Session::start(Arc::clone(&game));
    play(&mut first, "n");
    play(&mut first, "score");
    assert_eq!(first.location(), 2);
    assert!(first.is_over());
    assert_eq!(second.location(), 1);
    assert!(!second.is_over());
    assert_eq!(second.initial(), &*game);
}

#[test]
fn test_fixture_round_trips() {
    assert_eq!(round_trip_mismatch(TINY).unwrap(), None);
}
