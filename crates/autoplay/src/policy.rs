use scalatro_core::{Action, Card, Joker, RunState, SpecialEffect};

/// Picks the next action for a run, or `None` when it has nothing to do.
pub trait Policy {
    fn choose(&mut self, run: &RunState) -> Option<Action>;
}

/// Draws to a full hand, plays whatever raises the score most, discards
/// cards that would lower it and buys the best joker it can afford.
#[derive(Debug, Clone, Default)]
pub struct GreedyPolicy {
    pub money_reserve: i64,
}

impl GreedyPolicy {
    pub fn new(money_reserve: i64) -> Self {
        Self { money_reserve }
    }

    fn shop_action(&self, run: &RunState) -> Action {
        let budget = run.state.money - self.money_reserve;
        run.shop_offers()
            .iter()
            .filter(|joker| joker.cost <= budget)
            .filter(|joker| joker_value(joker) > 0.0)
            .max_by(|a, b| joker_value(a).total_cmp(&joker_value(b)))
            .map(|joker| Action::BuyJoker(joker.id))
            .unwrap_or(Action::CloseShop)
    }
}

impl Policy for GreedyPolicy {
    fn choose(&mut self, run: &RunState) -> Option<Action> {
        let state = &run.state;
        if state.game_over {
            return None;
        }
        if state.shop_open {
            return Some(self.shop_action(run));
        }
        let can_draw = !state.deck.is_exhausted();
        if state.hand.len() < run.config.hand_limit && can_draw {
            return Some(Action::DrawCard);
        }

        let points = state.story_points_left();
        let best = state
            .hand
            .iter()
            .filter(|card| card.play_cost <= points)
            .map(|card| (card, score_gain(state.chips, state.multiplier, card)))
            .max_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((card, gain)) = best {
            if gain > 0.0 {
                return Some(Action::PlayCard(card.id));
            }
        }

        if state.discards_left() > 0 && can_draw {
            let worst = state
                .hand
                .iter()
                .map(|card| (card, score_gain(state.chips, state.multiplier, card)))
                .min_by(|a, b| a.1.total_cmp(&b.1));
            if let Some((card, gain)) = worst {
                if gain <= 0.0 || card.play_cost > points {
                    return Some(Action::DiscardCard(card.id));
                }
            }
        }
        Some(Action::EndTurn)
    }
}

/// Raw score change from playing `card` on top of the current totals.
pub fn score_gain(chips: i64, multiplier: f64, card: &Card) -> f64 {
    let after = (chips + card.base_chips) as f64 * (multiplier + card.multiplier_delta());
    after - chips as f64 * multiplier
}

pub fn joker_value(joker: &Joker) -> f64 {
    let mut value = joker.chip_bonus as f64 + joker.multiplier_bonus * 20.0;
    if joker.has_effect(SpecialEffect::ExtraPlaySlot) {
        value += 30.0;
    }
    if joker.has_effect(SpecialEffect::ExtraDiscardSlot) {
        value += 10.0;
    }
    value
}
