use scalatro_core::{
    joker_def, reduce, Action, ActionOutcome, Card, CardCategory, Deck, Event, EventBus,
    GameOutcome, Phase, Rarity, RunError, RunState, SpecialEffect,
};

fn plain_card(id: u32, chips: i64, multiplier: f64) -> Card {
    Card {
        id,
        name: format!("Card {id}"),
        category: CardCategory::Api,
        rarity: Rarity::Common,
        base_chips: chips,
        base_multiplier: multiplier,
        description: String::new(),
        play_cost: 1,
    }
}

#[test]
fn scenario_a_draw_and_play() {
    let mut run = RunState::standard(1);
    run.state.deck = Deck::new(vec![plain_card(1_000, 5, 1.0)]);
    let mut events = EventBus::default();

    run.draw_card(&mut events).expect("draw");
    assert_eq!(run.state.hand.len(), 1);
    assert!(run.state.deck.draw.is_empty());

    assert_eq!(run.state.max_cards_per_turn, 2);
    run.play_card(1_000, &mut events).expect("play");
    assert_eq!(run.state.chips, 5);
    assert_eq!(run.state.multiplier, 1.0);
    assert_eq!(run.state.cards_played_this_turn, 1);
}

#[test]
fn scenario_b_floor_scoring() {
    let mut run = RunState::standard(2);
    run.state.chips = 20;
    run.state.multiplier = 1.5;
    let mut events = EventBus::default();
    assert_eq!(run.calculate_score(&mut events), 30);
}

#[test]
fn scenario_c_beaten_benchmark_advances() {
    let mut run = RunState::standard(3);
    run.state.current_benchmark = run.ladder.get("bench-2").cloned().expect("bench-2");
    run.state.market_share = 10;
    run.state.chips = 60;
    let mut events = EventBus::default();
    run.end_turn(&mut events).expect("end turn");
    assert_eq!(run.state.market_share, 18);
    assert!(run.state.can_visit_shop);
    assert_eq!(run.state.current_benchmark.id, "bench-3");
    assert!(events
        .events()
        .iter()
        .any(|event| matches!(event, Event::BenchmarkBeaten { .. })));
}

#[test]
fn scenario_d_defeat_clamps_share() {
    let mut run = RunState::standard(4);
    run.state.market_share = 2;
    let mut events = EventBus::default();
    run.end_turn(&mut events).expect("end turn");
    assert_eq!(run.state.market_share, 0);
    assert!(run.state.game_over);
    assert_eq!(run.phase(), Phase::GameOver(GameOutcome::Defeat));
}

#[test]
fn scenario_e_unaffordable_joker() {
    let mut run = RunState::standard(5);
    run.state.chips = 20;
    let mut events = EventBus::default();
    run.end_turn(&mut events).expect("end turn");
    let offer = run.shop_offers()[0].clone();
    run.state.money = 40;
    if let Some(shop) = run.shop.as_mut() {
        shop.offers[0].cost = 50;
    }
    let before = run.state.clone();
    assert_eq!(
        run.buy_joker(offer.id, &mut events),
        Err(RunError::NotEnoughMoney)
    );
    assert_eq!(run.state.money, 40);
    assert_eq!(run.state.active_jokers, before.active_jokers);
}

#[test]
fn scenario_f_extra_play_slot_persists() {
    let mut run = RunState::standard(6);
    run.state.market_share = 60;
    run.state.chips = 20;
    let mut events = EventBus::default();
    run.end_turn(&mut events).expect("end turn");

    let scrum = joker_def("Scrum Master").expect("scrum").instantiate(77_777);
    assert!(scrum.has_effect(SpecialEffect::ExtraPlaySlot));
    if let Some(shop) = run.shop.as_mut() {
        shop.offers.push(scrum);
    }
    run.buy_joker(77_777, &mut events).expect("buy");
    run.close_shop(&mut events);

    for _ in 0..4 {
        run.end_turn(&mut events).expect("end turn");
        assert_eq!(run.state.max_cards_per_turn, 3);
        assert_eq!(run.state.max_discards_per_turn, 2);
        run.close_shop(&mut events);
    }
}

#[test]
fn full_hand_draw_is_idempotent() {
    let mut run = RunState::standard(7);
    let mut events = EventBus::default();
    for _ in 0..3 {
        run.draw_card(&mut events).expect("draw");
    }
    let before = run.state.clone();
    let drained = events.len();
    assert_eq!(run.draw_card(&mut events), Err(RunError::HandFull));
    assert_eq!(run.state, before);
    assert_eq!(events.len(), drained);
}

#[test]
fn reduce_leaves_the_input_untouched() {
    let run = RunState::standard(8);
    let transition = reduce(&run, Action::DrawCard);
    assert!(matches!(transition.result, Ok(ActionOutcome::Drawn(_))));
    assert_eq!(transition.run.state.hand.len(), 1);
    assert_eq!(transition.events.len(), 1);
    assert!(run.state.hand.is_empty());

    let refused = reduce(&run, Action::PlayCard(u32::MAX));
    assert_eq!(refused.result, Err(RunError::CardNotInHand(u32::MAX)));
    assert_eq!(refused.run.state, run.state);
    assert!(refused.events.is_empty());
}

#[test]
fn same_seed_same_actions_same_state() {
    let script = [
        Action::SetDifficulty(0.7),
        Action::DrawCard,
        Action::DrawCard,
        Action::DrawCard,
        Action::EndTurn,
        Action::OpenShop,
        Action::CloseShop,
        Action::DrawCard,
        Action::EndTurn,
    ];
    let mut a = RunState::standard(99);
    let mut b = RunState::standard(99);
    let mut events = EventBus::default();
    for action in script {
        let left = a.dispatch(action, &mut events);
        let right = b.dispatch(action, &mut events);
        assert_eq!(left, right);
    }
    assert_eq!(a.state, b.state);
}

#[test]
fn state_round_trips_through_json() {
    let mut run = RunState::standard(10);
    let mut events = EventBus::default();
    run.draw_card(&mut events).expect("draw");
    let json = serde_json::to_string(&run.state).expect("serialize");
    let back: scalatro_core::GameState = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, run.state);
}
