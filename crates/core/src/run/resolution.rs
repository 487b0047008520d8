use super::*;
use crate::*;

impl RunState {
    /// Stores and returns `floor(chips * multiplier)`. Once the game is over
    /// the stored score is returned as is.
    pub fn calculate_score(&mut self, events: &mut EventBus) -> i64 {
        if self.state.game_over {
            return self.state.score;
        }
        let score = Score::new(self.state.chips, self.state.multiplier).total();
        self.state.score = score;
        events.push(Event::ScoreCalculated {
            chips: self.state.chips,
            multiplier: self.state.multiplier,
            score,
        });
        score
    }

    pub fn joker_totals(&self) -> JokerTotals {
        JokerTotals::from_jokers(&self.state.active_jokers)
    }

    /// Resolves the round against the current benchmark and prepares the
    /// next one.
    pub fn end_turn(&mut self, events: &mut EventBus) -> Result<TurnReport, RunError> {
        self.ensure_running()?;
        let round = self.state.round;
        let score = self.calculate_score(events);
        let benchmark = self.state.current_benchmark.clone();
        let beaten = score >= benchmark.target_score;
        let share_before = self.state.market_share;
        let mut money_gained = 0;
        let mut outcome = None;

        if beaten {
            self.state.market_share =
                clamp_market_share(self.state.market_share + benchmark.market_share_reward);
            money_gained = self.config.economy.round_bonus * i64::from(round)
                + self.config.economy.money_per_share * benchmark.market_share_reward;
            self.state.money = (self.state.money + money_gained).max(0);
            self.state.can_visit_shop = true;
            self.state.benchmarks_beaten += 1;
            log::info!(
                "round {round}: beat {} with {score}/{}",
                benchmark.name,
                benchmark.target_score
            );
            events.push(Event::BenchmarkBeaten {
                benchmark: benchmark.name.clone(),
                score,
                target: benchmark.target_score,
                market_share: self.state.market_share,
                reward: benchmark.market_share_reward,
                money: self.state.money,
            });
            match self.next_benchmark(&benchmark) {
                Some(next) => {
                    events.push(Event::BenchmarkAdvanced {
                        benchmark: next.name.clone(),
                        target: next.target_score,
                    });
                    self.state.current_benchmark = next;
                }
                None => {
                    self.state.current_benchmark.completed = true;
                    outcome = Some(GameOutcome::Victory);
                }
            }
        } else {
            let penalty = self
                .config
                .penalty
                .penalty_for(score, benchmark.target_score);
            self.state.market_share = clamp_market_share(self.state.market_share - penalty);
            // A miss forfeits any shop left open from an earlier beat.
            self.close_shop(events);
            log::info!(
                "round {round}: missed {} with {score}/{}, -{penalty} share",
                benchmark.name,
                benchmark.target_score
            );
            events.push(Event::BenchmarkFailed {
                benchmark: benchmark.name.clone(),
                score,
                target: benchmark.target_score,
                penalty,
                market_share: self.state.market_share,
            });
            if self.state.market_share == 0 {
                outcome = Some(GameOutcome::Defeat);
            }
        }

        self.reset_round_resources();
        let mut hand = std::mem::take(&mut self.state.hand);
        self.state.deck.discard_all(&mut hand);
        self.state.round = round + 1;
        self.state.started = true;
        let replenished = self.replenish_deck(events);

        if let Some(outcome) = outcome {
            self.state.game_over = true;
            self.state.outcome = Some(outcome);
            log::info!(
                "game over: {outcome:?} in round {round} with {} share",
                self.state.market_share
            );
            events.push(Event::GameEnded {
                outcome,
                round,
                market_share: self.state.market_share,
            });
        } else {
            events.push(Event::RoundStarted {
                round: self.state.round,
                chips: self.state.chips,
                multiplier: self.state.multiplier,
                play_slots: self.state.max_cards_per_turn,
                discard_slots: self.state.max_discards_per_turn,
            });
        }

        if beaten {
            self.stock_shop(events);
        }

        Ok(TurnReport {
            round,
            score,
            target: benchmark.target_score,
            beaten,
            market_share_change: self.state.market_share - share_before,
            money_gained,
            replenished,
            outcome,
        })
    }

    fn next_benchmark(&mut self, current: &Benchmark) -> Option<Benchmark> {
        if let Some(next) = self.ladder.next_after(&current.id) {
            return Some(next);
        }
        if !self.config.endless {
            return None;
        }
        let next = BenchmarkLadder::generate_after(current, self.state.generated_benchmarks);
        self.state.generated_benchmarks += 1;
        Some(next)
    }

    fn reset_round_resources(&mut self) {
        let totals = self.joker_totals();
        let base = totals.base_score();
        self.state.chips = base.chips;
        self.state.multiplier = base.mult;
        self.state.max_cards_per_turn = self.config.base_play_slots + totals.extra_play_slots;
        self.state.max_discards_per_turn =
            self.config.base_discard_slots + totals.extra_discard_slots;
        self.state.cards_played_this_turn = 0;
        self.state.cards_discarded_this_turn = 0;
    }

    fn replenish_deck(&mut self, events: &mut EventBus) -> usize {
        if self.state.deck.draw.len() >= self.config.deck.replenish_below {
            return 0;
        }
        let cards = advanced_deck(self.state.round, &mut self.rng, &mut self.ids);
        let added = cards.len();
        self.state.deck.draw.extend(cards);
        log::debug!("replenished deck with {added} cards");
        events.push(Event::DeckReplenished { added });
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_is_floored() {
        let mut run = RunState::standard(1);
        let mut events = EventBus::default();
        run.state.chips = 20;
        run.state.multiplier = 1.5;
        assert_eq!(run.calculate_score(&mut events), 30);
        assert_eq!(run.state.score, 30);
    }

    #[test]
    fn beating_a_benchmark_pays_and_advances() {
        let mut run = RunState::standard(2);
        let mut events = EventBus::default();
        run.state.current_benchmark = run.ladder.get("bench-2").cloned().expect("bench-2");
        run.state.chips = 60;
        let report = run.end_turn(&mut events).expect("end turn");
        assert!(report.beaten);
        assert_eq!(run.state.market_share, 18);
        assert_eq!(report.money_gained, 50 + 2 * 8);
        assert_eq!(run.state.money, 100 + 66);
        assert_eq!(run.state.current_benchmark.id, "bench-3");
        assert!(run.state.can_visit_shop);
        assert!(run.state.shop_open);
        assert_eq!(run.phase(), Phase::ShopOpen);
        assert_eq!(run.state.round, 2);
    }

    #[test]
    fn missing_a_benchmark_costs_share() {
        let mut run = RunState::standard(3);
        let mut events = EventBus::default();
        run.state.market_share = 40;
        run.state.chips = 10;
        let report = run.end_turn(&mut events).expect("end turn");
        assert!(!report.beaten);
        assert_eq!(report.market_share_change, -5);
        assert_eq!(run.state.market_share, 35);
        assert!(!run.state.can_visit_shop);
        assert!(!run.state.shop_open);
        assert_eq!(run.state.current_benchmark.id, "bench-1");
    }

    #[test]
    fn missed_benchmark_closes_a_shop_left_open() {
        let mut run = RunState::standard(9);
        let mut events = EventBus::default();
        run.state.chips = 20;
        assert!(run.end_turn(&mut events).expect("beat").beaten);
        assert!(run.state.shop_open);
        assert!(!run.shop_offers().is_empty());

        events.drain().for_each(drop);
        run.state.chips = 0;
        let report = run.end_turn(&mut events).expect("miss");
        assert!(!report.beaten);
        assert_eq!(report.outcome, None);
        assert!(!run.state.can_visit_shop);
        assert!(!run.state.shop_open);
        assert!(run.shop_offers().is_empty());
        assert_eq!(run.phase(), Phase::TurnActive);
        assert!(events.events().contains(&Event::ShopClosed));
        assert!(!events
            .events()
            .iter()
            .any(|event| matches!(event, Event::ShopOpened { .. })));
        assert_eq!(run.open_shop(&mut events), Err(RunError::ShopLocked));
    }

    #[test]
    fn low_share_failure_is_defeat() {
        let mut run = RunState::standard(4);
        let mut events = EventBus::default();
        run.state.market_share = 2;
        let report = run.end_turn(&mut events).expect("end turn");
        assert_eq!(run.state.market_share, 0);
        assert!(run.state.game_over);
        assert_eq!(report.outcome, Some(GameOutcome::Defeat));
        assert_eq!(run.outcome(), Some(GameOutcome::Defeat));

        let before = run.state.clone();
        assert_eq!(run.end_turn(&mut events), Err(RunError::GameOver));
        assert_eq!(run.draw_card(&mut events), Err(RunError::GameOver));
        assert_eq!(run.calculate_score(&mut events), before.score);
        assert_eq!(run.state, before);
    }

    #[test]
    fn last_benchmark_is_victory() {
        let mut run = RunState::standard(5);
        let mut events = EventBus::default();
        run.state.current_benchmark = run.ladder.get("bench-10").cloned().expect("bench-10");
        run.state.chips = 1500;
        let report = run.end_turn(&mut events).expect("end turn");
        assert_eq!(report.outcome, Some(GameOutcome::Victory));
        assert_eq!(run.phase(), Phase::GameOver(GameOutcome::Victory));
        assert!(run.state.current_benchmark.completed);
        assert!(run.state.shop_open);
    }

    #[test]
    fn endless_mode_generates_benchmarks() {
        let config = GameConfig {
            endless: true,
            ..GameConfig::default()
        };
        let mut run = RunState::new(config, 6).expect("run");
        let mut events = EventBus::default();
        run.state.current_benchmark = run.ladder.get("bench-10").cloned().expect("bench-10");
        run.state.chips = 1500;
        let report = run.end_turn(&mut events).expect("end turn");
        assert_eq!(report.outcome, None);
        assert_eq!(run.state.current_benchmark.target_score, 2250);
        assert_eq!(run.state.current_benchmark.market_share_reward, 75);
        assert!(run.state.current_benchmark.name.ends_with(" A"));
        assert_eq!(run.state.generated_benchmarks, 1);
    }

    #[test]
    fn end_turn_resets_round_resources_from_jokers() {
        let mut run = RunState::standard(7);
        let mut events = EventBus::default();
        run.state.market_share = 50;
        run.state
            .active_jokers
            .push(joker_def("Agile Coach").expect("coach").instantiate(500));
        run.state.cards_played_this_turn = 2;
        run.state.cards_discarded_this_turn = 1;
        run.draw_card(&mut events).expect("draw");
        run.end_turn(&mut events).expect("end turn");
        assert_eq!(run.state.chips, 5);
        assert!((run.state.multiplier - 1.3).abs() < 1e-9);
        assert_eq!(run.state.max_cards_per_turn, 3);
        assert_eq!(run.state.max_discards_per_turn, 3);
        assert_eq!(run.state.cards_played_this_turn, 0);
        assert_eq!(run.state.cards_discarded_this_turn, 0);
        assert!(run.state.hand.is_empty());
    }

    #[test]
    fn small_deck_is_replenished() {
        let mut run = RunState::standard(8);
        let mut events = EventBus::default();
        run.state.market_share = 50;
        run.state.deck.draw.truncate(2);
        let report = run.end_turn(&mut events).expect("end turn");
        assert_eq!(report.replenished, ADVANCED_DRAFT_SIZE);
        assert_eq!(run.state.deck.draw.len(), 2 + ADVANCED_DRAFT_SIZE);
    }
}
