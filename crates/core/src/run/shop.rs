use super::*;
use crate::*;

impl RunState {
    /// Opens the shop after a beaten benchmark, or for browsing once the game
    /// is over. Opening an already open shop returns the same offers.
    pub fn open_shop(&mut self, events: &mut EventBus) -> Result<Vec<Joker>, RunError> {
        if self.state.shop_open {
            if let Some(shop) = self.shop.as_ref() {
                events.push(Event::ShopOpened {
                    round: shop.round,
                    tier: shop.tier,
                    offers: shop.offers.len(),
                    reopened: true,
                });
                return Ok(shop.offers.clone());
            }
        }
        if !self.state.can_visit_shop && !self.state.game_over {
            return Err(RunError::ShopLocked);
        }
        Ok(self.stock_shop(events))
    }

    pub(super) fn stock_shop(&mut self, events: &mut EventBus) -> Vec<Joker> {
        let shop = ShopState::generate(
            self.state.round,
            &self.config.shop,
            &mut self.rng,
            &mut self.ids,
        );
        log::debug!(
            "shop round {} tier {} offers {}",
            shop.round,
            shop.tier,
            shop.offers.len()
        );
        events.push(Event::ShopOpened {
            round: shop.round,
            tier: shop.tier,
            offers: shop.offers.len(),
            reopened: false,
        });
        let offers = shop.offers.clone();
        self.shop = Some(shop);
        self.state.shop_open = true;
        offers
    }

    pub fn close_shop(&mut self, events: &mut EventBus) {
        let was_open = self.state.shop_open;
        self.shop = None;
        self.state.shop_open = false;
        self.state.can_visit_shop = false;
        if was_open {
            log::debug!("shop closed");
            events.push(Event::ShopClosed);
        }
    }

    /// Offers currently on sale, empty while the shop is closed.
    pub fn shop_offers(&self) -> &[Joker] {
        match self.shop.as_ref() {
            Some(shop) if self.state.shop_open => shop.offers.as_slice(),
            _ => &[],
        }
    }

    pub fn buy_joker(&mut self, joker_id: JokerId, events: &mut EventBus) -> Result<Joker, RunError> {
        self.ensure_running()?;
        if !self.state.shop_open {
            return Err(RunError::ShopLocked);
        }
        let shop = self.shop.as_mut().ok_or(RunError::ShopLocked)?;
        let cost = shop
            .find(joker_id)
            .map(|joker| joker.cost)
            .ok_or(RunError::JokerNotOffered(joker_id))?;
        if self.state.money < cost {
            return Err(RunError::NotEnoughMoney);
        }
        let mut joker = shop
            .take(joker_id)
            .ok_or(RunError::JokerNotOffered(joker_id))?;
        joker.id = self.ids.alloc();

        self.state.money -= cost;
        self.state.chips += joker.chip_bonus;
        self.state.multiplier += joker.multiplier_bonus;
        if joker.has_effect(SpecialEffect::ExtraPlaySlot) {
            self.state.max_cards_per_turn += 1;
        }
        if joker.has_effect(SpecialEffect::ExtraDiscardSlot) {
            self.state.max_discards_per_turn += 1;
        }
        self.state.started = true;
        self.state.active_jokers.push(joker.clone());
        log::debug!("bought {} for {cost}, money {}", joker.name, self.state.money);
        events.push(Event::JokerBought {
            joker_id: joker.id,
            name: joker.name.clone(),
            cost,
            money: self.state.money,
        });
        Ok(joker)
    }
}
