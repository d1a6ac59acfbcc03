//! condition.rs -- action condition tests
//!
//! Every action carries five conditions that must all hold before its codes
//! run. `Parameter` conditions are not tests; they supply arguments instead.

use scott_data::{Action, Condition, ConditionKind, DESTROYED, Game, Item};

use crate::state::GameState;

/// Read-only view of a running game used to evaluate conditions.
#[derive(Debug, Clone, Copy)]
pub struct World<'a> {
    pub initial: &'a Game,
    pub game: &'a Game,
    pub state: &'a GameState,
}

impl World<'_> {
    fn item(&self, index: i64) -> Option<&Item> {
        self.game.items.get(usize::try_from(index).ok()?)
    }

    fn item_is(&self, index: i64, test: impl Fn(&Item) -> bool) -> bool {
        self.item(index).is_some_and(test)
    }

    fn is_loaded(&self) -> bool {
        self.game.items.iter().any(Item::is_carried)
    }

    fn has_moved(&self, index: i64) -> Option<bool> {
        let now = self.item(index)?.location;
        let then = self.initial.items.get(usize::try_from(index).ok()?)?.location;
        Some(now != then)
    }
}

/// Test one condition. Conditions naming an item that does not exist fail;
/// unknown condition codes hold.
pub fn condition_holds(condition: Condition, world: &World<'_>) -> bool {
    #[allow(clippy::enum_glob_use)]
    use ConditionKind::*;
    let value = condition.value;
    let here = world.state.location;
    let counter = world.state.counter;

    let Some(kind) = condition.kind() else {
        return true;
    };
    match kind {
        Parameter => true,
        Carried => world.item_is(value, Item::is_carried),
        Here => world.item_is(value, |item| item.location == here),
        Present => world.item_is(value, |item| item.is_carried() || item.location == here),
        At => here == value,
        NotHere => world.item_is(value, |item| item.location != here),
        NotCarried => world.item_is(value, |item| !item.is_carried()),
        NotAt => here != value,
        FlagSet => world.state.flag(value),
        FlagClear => !world.state.flag(value),
        Loaded => world.is_loaded(),
        NotLoaded => !world.is_loaded(),
        NotPresent => world.item_is(value, |item| !item.is_carried() && item.location != here),
        Exists => world.item_is(value, |item| item.location != DESTROYED),
        NotExists => world.item_is(value, |item| item.location == DESTROYED),
        CounterLe => counter <= value,
        CounterGt => counter > value,
        NotMoved => world.has_moved(value) == Some(false),
        Moved => world.has_moved(value) == Some(true),
        CounterEq => counter == value,
    }
}

/// True when every condition of `action` holds.
pub fn conditions_hold(action: &Action, world: &World<'_>) -> bool {
    action.conditions.iter().all(|c| condition_holds(*c, world))
}

/// Values of the action's `Parameter` conditions, in order.
pub fn parameters(action: &Action) -> Vec<i64> {
    action
        .conditions
        .iter()
        .filter(|c| c.kind() == Some(ConditionKind::Parameter))
        .map(|c| c.value)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scott_data::{CARRIED, CARRIED_BYTE, Header};

    fn game() -> Game {
        Game {
            header: Header {
                starting_room: 1,
                ..Header::default()
            },
            items: vec![
                Item {
                    location: 1,
                    ..Item::default()
                },
                Item {
                    location: CARRIED,
                    ..Item::default()
                },
                Item {
                    location: DESTROYED,
                    ..Item::default()
                },
            ],
            ..Game::default()
        }
    }

    fn check(kind: ConditionKind, value: i64, initial: &Game, game: &Game, state: &GameState) -> bool {
        let world = World { initial, game, state };
        condition_holds(Condition::new(kind, value), &world)
    }

    #[test]
    fn item_location_tests() {
        let g = game();
        let state = GameState::new(&g);
        assert!(check(ConditionKind::Here, 0, &g, &g, &state));
        assert!(check(ConditionKind::Carried, 1, &g, &g, &state));
        assert!(check(ConditionKind::Present, 0, &g, &g, &state));
        assert!(check(ConditionKind::Present, 1, &g, &g, &state));
        assert!(check(ConditionKind::NotPresent, 2, &g, &g, &state));
        assert!(check(ConditionKind::NotExists, 2, &g, &g, &state));
        assert!(check(ConditionKind::Exists, 0, &g, &g, &state));
        assert!(!check(ConditionKind::NotHere, 0, &g, &g, &state));
        assert!(!check(ConditionKind::NotCarried, 1, &g, &g, &state));
    }

    #[test]
    fn missing_items_fail_every_item_test() {
        let g = game();
        let state = GameState::new(&g);
        for kind in [ConditionKind::Carried, ConditionKind::NotCarried, ConditionKind::NotPresent] {
            assert!(!check(kind, 40, &g, &g, &state), "{kind:?}");
            assert!(!check(kind, -1, &g, &g, &state), "{kind:?}");
        }
    }

    #[test]
    fn carried_byte_counts_as_carried() {
        let mut g = game();
        g.items[0].location = CARRIED_BYTE;
        let state = GameState::new(&g);
        assert!(check(ConditionKind::Carried, 0, &g, &g, &state));
        assert!(check(ConditionKind::Present, 0, &g, &g, &state));
        assert!(!check(ConditionKind::NotCarried, 0, &g, &g, &state));
    }

    #[test]
    fn unknown_condition_codes_hold() {
        let g = game();
        let state = GameState::new(&g);
        let world = World {
            initial: &g,
            game: &g,
            state: &state,
        };
        assert!(condition_holds(Condition { code: -1, value: -1 }, &world));
        assert!(condition_holds(Condition { code: 25, value: 0 }, &world));
    }

    #[test]
    fn negative_counter_values_compare_as_signed() {
        let g = game();
        let mut state = GameState::new(&g);
        state.counter = -2;
        assert!(check(ConditionKind::CounterLe, -1, &g, &g, &state));
        assert!(check(ConditionKind::CounterGt, -3, &g, &g, &state));
        assert!(check(ConditionKind::CounterEq, -2, &g, &g, &state));
    }

    #[test]
    fn location_flag_and_counter_tests() {
        let g = game();
        let mut state = GameState::new(&g);
        assert!(check(ConditionKind::At, 1, &g, &g, &state));
        assert!(check(ConditionKind::NotAt, 2, &g, &g, &state));
        assert!(check(ConditionKind::FlagClear, 4, &g, &g, &state));
        state.set_flag(4, true);
        assert!(check(ConditionKind::FlagSet, 4, &g, &g, &state));
        state.counter = 3;
        assert!(check(ConditionKind::CounterEq, 3, &g, &g, &state));
        assert!(check(ConditionKind::CounterLe, 3, &g, &g, &state));
        assert!(check(ConditionKind::CounterGt, 2, &g, &g, &state));
        assert!(!check(ConditionKind::CounterGt, 3, &g, &g, &state));
    }

    #[test]
    fn loaded_depends_on_any_carried_item() {
        let mut g = game();
        let state = GameState::new(&g);
        assert!(check(ConditionKind::Loaded, 0, &g, &g, &state));
        g.items[1].location = 1;
        assert!(check(ConditionKind::NotLoaded, 0, &g, &g, &state));
    }

    #[test]
    fn moved_compares_against_initial_model() {
        let initial = game();
        let mut current = initial.clone();
        let state = GameState::new(&initial);
        assert!(check(ConditionKind::NotMoved, 0, &initial, &current, &state));
        current.items[0].location = CARRIED;
        assert!(check(ConditionKind::Moved, 0, &initial, &current, &state));
    }

    #[test]
    fn parameters_are_collected_in_order() {
        let mut action = Action::default();
        action.conditions[0] = Condition::new(ConditionKind::At, 3);
        action.conditions[1] = Condition::new(ConditionKind::Parameter, 7);
        action.conditions[2] = Condition::new(ConditionKind::Parameter, 2);
        // remaining default conditions are Parameter 0
        assert_eq!(parameters(&action), vec![7, 2, 0, 0]);
    }
}
