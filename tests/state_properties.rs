//! Property tests for lobby state invariants
//!
//! Random operation sequences against a single lobby snapshot must never
//! produce a roster over capacity, a duplicate member, an out-of-range
//! sanity value, or a status that disagrees with the roster.

use proptest::prelude::*;
use seance_lobby::lobby::Lobby;
use seance_lobby::types::LobbyStatus;

#[derive(Debug, Clone)]
enum Op {
    Join(u8),
    Leave(u8),
    Update(u8, f64, bool),
    Bring(u8, u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..8).prop_map(Op::Join),
        (0u8..8).prop_map(Op::Leave),
        ((0u8..8), -200.0f64..300.0, any::<bool>())
            .prop_map(|(user, sanity, dead)| Op::Update(user, sanity, dead)),
        ((0u8..8), (0u8..4)).prop_map(|(user, item)| Op::Bring(user, item)),
    ]
}

fn user(id: u8) -> String {
    format!("user-{id}")
}

proptest! {
    #[test]
    fn invariants_hold_for_any_operation_sequence(
        max_players in 1usize..6,
        ops in prop::collection::vec(op_strategy(), 0..64),
    ) {
        let mut lobby = Lobby::create("user-0", "asylum", "amateur", max_players).unwrap();
        let mut expected_revision = 0u64;

        for op in ops {
            let result = match &op {
                Op::Join(u) => lobby.join(&user(*u)),
                Op::Leave(u) => lobby.leave(&user(*u)),
                Op::Update(u, sanity, dead) => lobby
                    .update_player(&user(*u), Some(*sanity), Some(*dead))
                    .map(|_| ()),
                Op::Bring(u, item) => lobby.bring_item(&user(*u), &format!("item-{item}")),
            };

            // Exactly one revision bump per successful application
            if result.is_ok() {
                expected_revision += 1;
            }
            prop_assert_eq!(lobby.revision, expected_revision);

            // Roster bounded by capacity and free of duplicates
            prop_assert!(lobby.players.len() <= max_players);
            let mut ids: Vec<_> = lobby.players.iter().map(|p| p.user_id.clone()).collect();
            let total = ids.len();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), total);

            // Status agrees with the roster
            prop_assert_eq!(
                lobby.status == LobbyStatus::Closed,
                lobby.players.is_empty()
            );
            if lobby.status == LobbyStatus::Active {
                prop_assert_eq!(lobby.players.len(), max_players);
            }

            // Host refers to a present player unless the lobby closed
            if lobby.status != LobbyStatus::Closed {
                prop_assert!(lobby.player(&lobby.host_user_id).is_some());
            }

            // Player state stays in range, item lists stay sets
            for player in &lobby.players {
                prop_assert!((0.0..=100.0).contains(&player.sanity));
                let mut items = player.items.clone();
                let count = items.len();
                items.sort();
                items.dedup();
                prop_assert_eq!(items.len(), count);
            }
        }
    }

    #[test]
    fn sanity_updates_always_clamp(value in -1e6f64..1e6) {
        let mut lobby = Lobby::create("user-0", "asylum", "amateur", 4).unwrap();
        let player = lobby.update_player("user-0", Some(value), None).unwrap();

        prop_assert!((0.0..=100.0).contains(&player.sanity));
        if (0.0..=100.0).contains(&value) {
            prop_assert_eq!(player.sanity, value);
        }
    }

    #[test]
    fn bring_item_collapses_repeats(repeats in 1usize..6) {
        let mut lobby = Lobby::create("user-0", "asylum", "amateur", 4).unwrap();
        for _ in 0..repeats {
            lobby.bring_item("user-0", "item-1").unwrap();
        }

        prop_assert_eq!(
            &lobby.player("user-0").unwrap().items,
            &vec!["item-1".to_string()]
        );
    }
}
