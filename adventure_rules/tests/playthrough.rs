//! Whole-game walkthroughs against the campus world.

use adventure_rules::{replay, LocationId, Outcome, Playthrough, Session, World};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

fn play(inputs: &[&str]) -> Playthrough {
    replay(World::campus().unwrap(), inputs.iter().copied()).unwrap()
}

fn ids(ids: &[u32]) -> Vec<LocationId> {
    ids.iter().copied().map(LocationId).collect()
}

#[test]
fn test_acceptance_usb_drive_route() {
    let run = play(&[
        "go south",
        "go south",
        "pick up lost student card",
        "pick up old notebook",
        "read old notebook",
        "go north",
        "go west",
        "go south",
        "3842",
        "pick up usb drive",
    ]);

    assert_eq!(run.id_log(), ids(&[7, 5, 6, 6, 6, 6, 5, 4, 9, 9]));
    assert!(run.session.is_ongoing());
}

#[test]
fn test_winning_walkthrough() {
    let run = play(&[
        "go south",
        "go south",
        "pick up lost student card",
        "pick up old notebook",
        "read old notebook",
        "go north",
        "go west",
        "go south",
        "3842",
        "pick up usb drive",
        "exit",
        "go west",
        "go west",
        "pick up uoft mug",
        "go east",
        "go north",
        "go west",
        "examine door frame",
        "go west",
        "7291",
        "pick up laptop charger",
        "dictionary",
        "exit",
        "go south",
        "go east",
        "go east",
        "go north",
    ]);

    assert_eq!(
        run.id_log(),
        ids(&[7, 5, 6, 6, 6, 6, 5, 4, 9, 9, 4, 2, 1, 1, 2, 3, 3, 3, 8, 8, 3, 2, 4, 5, 7])
    );
    let state = run.session.state();
    assert_eq!(state.outcome(), Some(Outcome::Won));
    assert_eq!(state.remaining_moves(), 18);
    assert!(run.transcript.iter().any(|l| l.contains("Well done!")));
    assert_eq!(run.unused_inputs, 0);
}

#[test]
fn test_losing_walkthrough() {
    let inputs: Vec<&str> = ["go south", "go north"].repeat(21);
    let run = play(&inputs);

    let mut expected = [7, 5].repeat(20);
    expected.push(7);
    assert_eq!(run.id_log(), ids(&expected));
    assert_eq!(run.session.state().outcome(), Some(Outcome::Lost));
    assert_eq!(run.unused_inputs, 2);
}

#[test]
fn test_inventory_demo() {
    let run = play(&[
        "go south",
        "go south",
        "inventory",
        "pick up lost student card",
        "inventory",
        "drop lost student card",
        "inventory",
    ]);

    assert_eq!(run.id_log(), ids(&[7, 5, 6, 6]));
    assert!(run.session.state().has_item("lost student card"));
    assert!(run
        .transcript
        .iter()
        .any(|l| l == "Your inventory contains: lost student card"));
}

#[test]
fn test_score_demo() {
    let run = play(&[
        "go south",
        "go south",
        "pick up old notebook",
        "score",
        "drop old notebook",
    ]);

    assert_eq!(run.id_log(), ids(&[7, 5, 6, 6, 6]));
    assert_eq!(run.session.state().score(), 5);
    assert!(run
        .transcript
        .iter()
        .any(|l| l == "Your current score is: 0"));
}

#[test]
fn test_wrong_lab_code_demo() {
    let run = play(&[
        "go south",
        "go south",
        "pick up old notebook",
        "read old notebook",
        "go north",
        "go west",
        "go south",
        "3942",
        "inventory",
    ]);

    assert_eq!(run.id_log(), ids(&[7, 5, 6, 6, 6, 5, 4, 4]));
    assert_eq!(run.session.state().current_location(), LocationId(4));
    assert_eq!(run.session.state().remaining_moves(), 33);
}

#[test]
fn test_laptop_charger_demo() {
    let run = play(&[
        "go south",
        "go south",
        "pick up lost student card",
        "go north",
        "go west",
        "go west",
        "go north",
        "examine door frame",
        "go west",
        "7291",
        "pick up laptop charger",
        "dictionary",
        "exit",
    ]);

    assert_eq!(run.id_log(), ids(&[7, 5, 6, 6, 5, 4, 2, 3, 3, 8, 8, 3]));
    assert!(run.session.state().has_item("laptop charger"));
    assert!(run.session.state().flag("card-used"));
}

#[test]
fn test_undo_walks_back_through_history() {
    let run = play(&["go south", "go south", "go north", "undo", "undo", "undo", "undo"]);

    assert_eq!(run.id_log(), ids(&[7]));
    assert_eq!(run.session.state().current_location(), LocationId(7));
    assert_eq!(run.session.state().remaining_moves(), 40);
}

const VOCABULARY: &[&str] = &[
    "go north",
    "go south",
    "go east",
    "go west",
    "exit",
    "pick up lost student card",
    "pick up old notebook",
    "pick up uoft mug",
    "pick up usb drive",
    "pick up laptop charger",
    "drop lost student card",
    "drop old notebook",
    "drop uoft mug",
    "drop usb drive",
    "drop laptop charger",
    "read old notebook",
    "examine door frame",
    "undo",
    "undo",
    "look",
    "3842",
    "7291",
    "dictionary",
];

fn check_single_owner(session: &Session) -> Result<(), TestCaseError> {
    let world = session.world();
    for item in world.items() {
        let in_locations = world.locations().filter(|l| l.has_item(&item.name)).count();
        let in_inventory = usize::from(session.state().has_item(&item.name));
        prop_assert_eq!(
            in_locations + in_inventory,
            1,
            "{} is held by {} containers",
            item.name,
            in_locations + in_inventory
        );
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_items_have_exactly_one_owner(
        inputs in prop::collection::vec(prop::sample::select(VOCABULARY.to_vec()), 0..80)
    ) {
        let run = replay(World::campus().unwrap(), inputs).unwrap();
        check_single_owner(&run.session)?;
        prop_assert!(run.session.world().location(run.session.state().current_location()).is_ok());
        prop_assert_eq!(run.id_log()[0], LocationId(7));
    }

    #[test]
    fn prop_score_is_bounded_and_never_decreases(
        inputs in prop::collection::vec(prop::sample::select(VOCABULARY.to_vec()), 0..80)
    ) {
        let max: i64 = World::campus()
            .unwrap()
            .items()
            .iter()
            .map(|i| i64::from(i.target_points))
            .sum();

        let mut session = Session::new(World::campus().unwrap()).unwrap();
        let mut script = adventure_rules::ScriptedResponder::new(inputs);
        let mut last_score = 0;
        while session.is_ongoing() {
            let Some(input) = script.next_input() else { break };
            let resolution = session.resolve(&input, &mut script).unwrap();
            prop_assert!(resolution.state.score() >= last_score);
            prop_assert!(resolution.state.score() <= max);
            last_score = resolution.state.score();
            check_single_owner(&session)?;
        }
    }
}
