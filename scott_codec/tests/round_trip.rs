use pretty_assertions::assert_eq;
use proptest::collection::vec;
use proptest::prelude::*;
use scott_codec::{decode, encode, unpack_action_codes, unpack_condition, unpack_verb_noun};
use scott_data::{Action, CARRIED, CARRIED_BYTE, Condition, ConditionKind, Footer, Game, Header, Item, Room, Word};

const TINY: &[u8] = include_bytes!("fixtures/tiny.dat");
const NEGATIVE: &[u8] = include_bytes!("fixtures/negative.dat");

#[test]
fn tiny_fixture_decodes() {
    let game = decode(TINY).expect("decode ok");

    assert_eq!(game.header.num_items, 4);
    assert_eq!(game.header.num_actions, 3);
    assert_eq!(game.header.num_words, 8);
    assert_eq!(game.header.num_rooms, 4);
    assert_eq!(game.header.num_messages, 3);
    assert_eq!(game.header.starting_room, 1);
    assert_eq!(game.header.light_duration, 100);

    let light = &game.actions[1];
    assert_eq!((light.verb, light.noun), (6, 7));
    assert_eq!(light.conditions[0], Condition::new(ConditionKind::Carried, 0));
    assert_eq!(light.codes, [57, 2, 0, 0]);
    assert_eq!(light.comment, "light lamp");

    assert_eq!(game.verbs[2], Word::synonym("ENT"));
    assert_eq!(game.nouns[7], Word::new("LAM"));

    assert_eq!(game.rooms[1].exits, [2, 0, 0, 0, 0, 0]);
    assert_eq!(game.rooms[1].display_text(), "I'm in a dusty hallway");
    assert!(game.rooms[2].is_literal);
    assert_eq!(game.rooms[2].description, "I'm standing in a vault\nwith a low ceiling.");

    assert_eq!(
        game.items[0],
        Item {
            description: "Brass lamp".into(),
            autograb: Some("LAM".into()),
            location: 1,
            is_treasure: false,
        }
    );
    assert!(game.items[1].is_treasure);
    assert_eq!(game.items[1].description, "Gold bar*");
    assert_eq!(game.items[2].autograb, None);

    assert_eq!(game.messages[2], "The lamp flickers on.");
    assert_eq!(
        game.footer,
        Footer {
            version: 416,
            adventure: 1,
            magic: 12345,
        }
    );
}

#[test]
fn tiny_fixture_reencodes_byte_for_byte() {
    let game = decode(TINY).expect("decode ok");
    let bytes = encode(&game).expect("encode ok");
    assert_eq!(String::from_utf8_lossy(&bytes), String::from_utf8_lossy(TINY));
    assert_eq!(bytes, TINY);
}

#[test]
fn negative_values_decode_and_reencode_byte_for_byte() {
    let game = decode(NEGATIVE).expect("decode ok");

    assert_eq!(game.actions[0].conditions[1], Condition::new(ConditionKind::Parameter, -1));
    assert_eq!(game.actions[2].codes, [65, 0, 0, -1]);
    assert_eq!(game.rooms[3].exits[0], -1);
    assert_eq!(game.items[2].location, CARRIED);
    assert!(game.items[2].is_carried());

    assert_eq!(encode(&game).expect("encode ok"), NEGATIVE);
}

#[test]
fn edited_game_survives_round_trip() {
    let mut game = decode(TINY).expect("decode ok");
    game.messages.push("Caf\u{e9} au lait.".into());
    game.header.num_messages += 1;
    game.items[2].location = CARRIED;
    game.items[1].location = CARRIED_BYTE;
    let bytes = encode(&game).expect("encode ok");
    assert_eq!(decode(&bytes).expect("decode ok"), game);
}

// Text never starts with a marker and never ends with a slash.
fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!?'\n\u{e9}-]{0,24}"
}

fn word() -> impl Strategy<Value = Word> {
    ("[A-Z]{1,4}", any::<bool>()).prop_map(|(text, is_synonym)| Word { text, is_synonym })
}

// Packed fields come from raw integers, negatives included, so every
// generated action is one a data file could hold.
fn action() -> impl Strategy<Value = Action> {
    (
        -30_000i64..30_000,
        proptest::array::uniform5((-20_000i64..20_000).prop_map(unpack_condition)),
        proptest::array::uniform2(-30_000i64..30_000),
        text(),
    )
        .prop_map(|(verb_noun, conditions, [low, high], comment)| {
            let (verb, noun) = unpack_verb_noun(verb_noun);
            let (a, b) = unpack_action_codes(low);
            let (c, d) = unpack_action_codes(high);
            Action {
                verb,
                noun,
                conditions,
                codes: [a, b, c, d],
                comment,
            }
        })
}

fn room(rooms: i64) -> impl Strategy<Value = Room> {
    (proptest::array::uniform6(-1..rooms), text(), any::<bool>()).prop_map(|(exits, description, is_literal)| Room {
        exits,
        description,
        is_literal,
    })
}

fn item(rooms: i64) -> impl Strategy<Value = Item> {
    let location = prop_oneof![0..rooms, Just(CARRIED), Just(CARRIED_BYTE)];
    (text(), proptest::option::of("[A-Z]{0,3}"), location, any::<bool>()).prop_map(
        |(description, autograb, location, is_treasure)| Item {
            description,
            autograb,
            location,
            is_treasure,
        },
    )
}

fn game() -> impl Strategy<Value = Game> {
    (1usize..5, 0usize..4, 1usize..5, 0usize..4, 0usize..4).prop_flat_map(|(rooms, actions, words, items, messages)| {
        (
            vec(room(rooms as i64), rooms),
            vec(action(), actions),
            vec(word(), words),
            vec(word(), words),
            vec(item(rooms as i64), items),
            vec(text(), messages),
            proptest::array::uniform8(-1000i64..1000),
        )
            .prop_map(move |(room_list, action_list, verbs, nouns, item_list, message_list, misc)| Game {
                header: Header {
                    reserved: misc[0],
                    num_items: items,
                    num_actions: actions,
                    num_words: words,
                    num_rooms: rooms,
                    max_inventory: misc[1],
                    starting_room: misc[2],
                    num_treasures: misc[3],
                    word_length: misc[4],
                    light_duration: misc[5],
                    num_messages: messages,
                    treasure_room: misc[6],
                },
                actions: action_list,
                verbs,
                nouns,
                rooms: room_list,
                messages: message_list,
                items: item_list,
                footer: Footer {
                    version: 416,
                    adventure: misc[7],
                    magic: 0,
                },
            })
    })
}

proptest! {
    #[test]
    fn generated_games_round_trip(game in game()) {
        let bytes = encode(&game).unwrap();
        let decoded = decode(&bytes).unwrap();
        prop_assert_eq!(&decoded, &game);
        prop_assert_eq!(encode(&decoded).unwrap(), bytes);
    }
}
