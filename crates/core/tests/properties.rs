use proptest::prelude::*;
use scalatro_core::{Action, ActionOutcome, EventBus, RunState, MAX_MARKET_SHARE};

/// Maps a random index to an action that refers to cards and offers that
/// actually exist, so sequences reach deep into the game.
fn pick_action(run: &RunState, selector: u8, slot: usize) -> Action {
    let hand = &run.state.hand;
    let offers = run.shop_offers();
    match selector % 9 {
        0 | 1 => Action::DrawCard,
        2 | 3 if !hand.is_empty() => Action::PlayCard(hand[slot % hand.len()].id),
        4 if !hand.is_empty() => Action::DiscardCard(hand[slot % hand.len()].id),
        5 => Action::EndTurn,
        6 if !offers.is_empty() => Action::BuyJoker(offers[slot % offers.len()].id),
        6 => Action::OpenShop,
        7 => Action::CloseShop,
        8 => Action::CalculateScore,
        _ => Action::PlayCard(u32::MAX),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_hold_after_every_action(
        seed in any::<u64>(),
        steps in prop::collection::vec((any::<u8>(), 0usize..8), 1..120),
    ) {
        let mut run = RunState::standard(seed);
        let mut events = EventBus::default();
        let mut cards = run.state.card_count();

        for (selector, slot) in steps {
            let action = pick_action(&run, selector, slot);
            let before = run.state.clone();
            let result = run.dispatch(action, &mut events);
            let state = &run.state;

            if result.is_err() {
                prop_assert_eq!(&before, state);
            }
            prop_assert!(state.hand.len() <= run.config.hand_limit);
            prop_assert!(state.cards_played_this_turn <= state.max_cards_per_turn);
            prop_assert!(state.cards_discarded_this_turn <= state.max_discards_per_turn);
            prop_assert!((0..=MAX_MARKET_SHARE).contains(&state.market_share));
            prop_assert!(state.money >= 0);
            prop_assert!(state.round >= before.round);

            if action == Action::EndTurn && result.is_ok() {
                prop_assert!(state.card_count() >= cards);
            } else {
                prop_assert_eq!(state.card_count(), cards);
            }
            cards = state.card_count();

            if let Ok(ActionOutcome::TurnEnded(report)) = &result {
                prop_assert_eq!(state.can_visit_shop, report.beaten);
                prop_assert_eq!(state.shop_open, report.beaten);
                if !report.beaten {
                    prop_assert!(run.shop_offers().is_empty());
                }
            }

            if action == Action::CalculateScore && !state.game_over {
                prop_assert_eq!(
                    state.score,
                    (state.chips as f64 * state.multiplier).floor() as i64
                );
            }
            if before.game_over {
                prop_assert_eq!(before.hand.len(), state.hand.len());
                prop_assert_eq!(before.round, state.round);
            }
            events.drain().for_each(drop);
        }
    }

    #[test]
    fn ladder_targets_strictly_increase(factor in 0.5f64..3.0) {
        let run = RunState::standard(0);
        let ladder = run.ladder.scaled(factor);
        if let Ok(ladder) = ladder {
            let mut current = ladder.first();
            while let Some(next) = ladder.next_after(&current.id) {
                prop_assert!(next.target_score > current.target_score);
                current = next;
            }
        }
    }
}
