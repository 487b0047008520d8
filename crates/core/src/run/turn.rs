use super::*;
use crate::*;

impl RunState {
    /// Moves the first card of the draw pile into the hand, reshuffling the
    /// discard pile in when the draw pile is empty.
    pub fn draw_card(&mut self, events: &mut EventBus) -> Result<Card, RunError> {
        self.ensure_running()?;
        if self.state.hand.len() >= self.config.hand_limit {
            return Err(RunError::HandFull);
        }
        if self.state.deck.is_exhausted() {
            return Err(RunError::NothingToDraw);
        }
        if self.state.deck.draw.is_empty() {
            let cards = self.state.deck.reshuffle_discard(&mut self.rng);
            log::debug!("reshuffled {cards} cards into the deck");
            events.push(Event::DeckReshuffled { cards });
        }
        let card = self
            .state
            .deck
            .draw_first()
            .ok_or(RunError::NothingToDraw)?;
        self.state.hand.push(card.clone());
        self.state.started = true;
        log::debug!("drew {} ({})", card.name, card.id);
        events.push(Event::CardDrawn {
            card_id: card.id,
            hand_size: self.state.hand.len(),
        });
        Ok(card)
    }

    pub fn play_card(&mut self, card_id: CardId, events: &mut EventBus) -> Result<Card, RunError> {
        self.ensure_running()?;
        let idx = self.hand_index(card_id)?;
        let cost = self.state.hand[idx].play_cost;
        if self.state.cards_played_this_turn + cost > self.state.max_cards_per_turn {
            return Err(RunError::PlayBudgetExceeded);
        }
        let card = self.state.hand.remove(idx);
        self.state.chips += card.base_chips;
        self.state.multiplier += card.multiplier_delta();
        self.state.cards_played_this_turn += cost;
        self.state.started = true;
        self.state.deck.discard(card.clone());
        log::debug!(
            "played {} chips={} mult={:.2}",
            card.name,
            self.state.chips,
            self.state.multiplier
        );
        events.push(Event::CardPlayed {
            card_id: card.id,
            chips: self.state.chips,
            multiplier: self.state.multiplier,
            story_points: self.state.cards_played_this_turn,
        });
        Ok(card)
    }

    pub fn discard_card(
        &mut self,
        card_id: CardId,
        events: &mut EventBus,
    ) -> Result<Card, RunError> {
        self.ensure_running()?;
        let idx = self.hand_index(card_id)?;
        if self.state.cards_discarded_this_turn >= self.state.max_discards_per_turn {
            return Err(RunError::DiscardBudgetExceeded);
        }
        let card = self.state.hand.remove(idx);
        self.state.cards_discarded_this_turn += 1;
        self.state.started = true;
        self.state.deck.discard(card.clone());
        log::debug!("discarded {}", card.name);
        events.push(Event::CardDiscarded {
            card_id: card.id,
            discards: self.state.cards_discarded_this_turn,
        });
        Ok(card)
    }

    fn hand_index(&self, card_id: CardId) -> Result<usize, RunError> {
        self.state
            .hand
            .iter()
            .position(|card| card.id == card_id)
            .ok_or(RunError::CardNotInHand(card_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: CardId, chips: i64, multiplier: f64, play_cost: u32) -> Card {
        Card {
            id,
            name: format!("Card {id}"),
            category: CardCategory::Product,
            rarity: Rarity::Common,
            base_chips: chips,
            base_multiplier: multiplier,
            description: String::new(),
            play_cost,
        }
    }

    fn run_with_deck(cards: Vec<Card>) -> RunState {
        let mut run = RunState::standard(1);
        run.state.deck = Deck::new(cards);
        run
    }

    #[test]
    fn draw_then_play_single_card() {
        let mut run = run_with_deck(vec![card(900, 5, 1.0, 1)]);
        let mut events = EventBus::default();
        run.draw_card(&mut events).expect("draw");
        assert_eq!(run.state.hand.len(), 1);
        assert!(run.state.deck.draw.is_empty());

        run.play_card(900, &mut events).expect("play");
        assert_eq!(run.state.chips, 5);
        assert_eq!(run.state.multiplier, 1.0);
        assert_eq!(run.state.cards_played_this_turn, 1);
        assert!(run.state.hand.is_empty());
        assert_eq!(run.state.deck.discard.len(), 1);
    }

    #[test]
    fn draw_takes_cards_in_order() {
        let mut run = run_with_deck(vec![card(1, 1, 1.0, 1), card(2, 2, 1.0, 1)]);
        let mut events = EventBus::default();
        assert_eq!(run.draw_card(&mut events).map(|c| c.id), Ok(1));
        assert_eq!(run.draw_card(&mut events).map(|c| c.id), Ok(2));
        assert_eq!(run.draw_card(&mut events), Err(RunError::NothingToDraw));
    }

    #[test]
    fn full_hand_draw_changes_nothing() {
        let mut run = run_with_deck((1..=4).map(|id| card(id, 1, 1.0, 1)).collect());
        let mut events = EventBus::default();
        for _ in 0..3 {
            run.draw_card(&mut events).expect("draw");
        }
        let before = run.state.clone();
        assert_eq!(run.draw_card(&mut events), Err(RunError::HandFull));
        assert_eq!(run.state, before);
    }

    #[test]
    fn empty_deck_reshuffles_discard_pile() {
        let mut run = run_with_deck(Vec::new());
        run.state.deck.discard = vec![card(7, 1, 1.0, 1), card(8, 1, 1.0, 1)];
        let mut events = EventBus::default();
        run.draw_card(&mut events).expect("draw");
        assert!(run.state.deck.discard.is_empty());
        assert_eq!(run.state.deck.draw.len(), 1);
        assert!(matches!(
            events.events()[0],
            Event::DeckReshuffled { cards: 2 }
        ));
    }

    #[test]
    fn play_respects_story_points() {
        let mut run = run_with_deck(vec![card(1, 3, 1.5, 2), card(2, 4, 1.0, 1)]);
        let mut events = EventBus::default();
        run.draw_card(&mut events).expect("draw");
        run.draw_card(&mut events).expect("draw");
        run.play_card(1, &mut events).expect("play");
        assert_eq!(run.state.cards_played_this_turn, 2);
        assert!((run.state.multiplier - 1.5).abs() < 1e-9);

        let before = run.state.clone();
        assert_eq!(
            run.play_card(2, &mut events),
            Err(RunError::PlayBudgetExceeded)
        );
        assert_eq!(run.state, before);
    }

    #[test]
    fn unknown_card_is_refused() {
        let mut run = run_with_deck(vec![card(1, 3, 1.0, 1)]);
        let mut events = EventBus::default();
        assert_eq!(
            run.play_card(1, &mut events),
            Err(RunError::CardNotInHand(1))
        );
        assert_eq!(
            run.discard_card(42, &mut events),
            Err(RunError::CardNotInHand(42))
        );
        assert!(events.is_empty());
    }

    #[test]
    fn discard_respects_budget() {
        let mut run = run_with_deck((1..=3).map(|id| card(id, 1, 1.0, 1)).collect());
        let mut events = EventBus::default();
        for _ in 0..3 {
            run.draw_card(&mut events).expect("draw");
        }
        run.discard_card(1, &mut events).expect("discard");
        run.discard_card(2, &mut events).expect("discard");
        assert_eq!(
            run.discard_card(3, &mut events),
            Err(RunError::DiscardBudgetExceeded)
        );
        assert_eq!(run.state.cards_discarded_this_turn, 2);
        assert_eq!(run.state.deck.discard.len(), 2);
        assert_eq!(run.state.hand.len(), 1);
    }

    #[test]
    fn turn_actions_start_the_game() {
        let mut run = RunState::standard(5);
        let mut events = EventBus::default();
        assert_eq!(run.phase(), Phase::Setup);
        run.draw_card(&mut events).expect("draw");
        assert_eq!(run.phase(), Phase::TurnActive);
    }
}
