use std::collections::VecDeque;
use uuid::Uuid;

use crate::{
    errors::GameplayError,
    game::{
        board::{ActiveDefender, Board},
        card::{Card, Defender},
        MAX_MANA, STARTING_HEALTH,
    },
};

/// 게임 안에서의 플레이어 상태
#[derive(Debug, Clone)]
pub struct GamePlayer {
    id: Uuid,
    health: u32,
    mana: u32,
    max_mana: u32,
    hand: Vec<Card>,
    deck: VecDeque<Card>,
    board: Board,
    current: bool,
}

impl GamePlayer {
    pub fn new(id: Uuid, deck: VecDeque<Card>) -> Self {
        Self {
            id,
            health: STARTING_HEALTH,
            mana: 0,
            max_mana: 0,
            hand: Vec::new(),
            deck,
            board: Board::new(),
            current: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn mana(&self) -> u32 {
        self.mana
    }

    pub fn max_mana(&self) -> u32 {
        self.max_mana
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn deck(&self) -> &VecDeque<Card> {
        &self.deck
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn is_current(&self) -> bool {
        self.current
    }

    pub fn set_current(&mut self, current: bool) {
        self.current = current;
    }

    /// 덱 맨 앞에서 한 장. 덱이 비었으면 None.
    pub fn draw(&mut self) -> Option<Card> {
        let card = self.deck.pop_front()?;
        self.hand.push(card.clone());
        Some(card)
    }

    pub fn draw_many(&mut self, count: usize) -> Vec<Card> {
        (0..count).map_while(|_| self.draw()).collect()
    }

    /// 손에 있는 카드만 덱 맨 뒤로 돌려보내고 돌려보낸 수만큼 새로 뽑습니다.
    pub fn discard(&mut self, card_ids: &[Uuid]) -> usize {
        let mut returned = 0;
        for card_id in card_ids {
            if let Some(pos) = self.hand.iter().position(|c| c.id() == *card_id) {
                let card = self.hand.remove(pos);
                self.deck.push_back(card);
                returned += 1;
            }
        }
        self.draw_many(returned);
        returned
    }

    /// 최대 마나 +1 (상한 10), 마나 회복, 한 장 드로우, 보드 Ready
    pub fn start_turn(&mut self) -> Option<Card> {
        self.max_mana = (self.max_mana + 1).min(MAX_MANA);
        self.mana = self.max_mana;
        self.board.ready_all();
        self.draw()
    }

    /// 검증에 실패하면 상태는 그대로입니다.
    /// 보드가 가득 찬 경우 카드와 마나는 소모되지만 배치되지 않아 None.
    pub fn play_card(&mut self, card_id: Uuid) -> Result<Option<ActiveDefender>, GameplayError> {
        let pos = self
            .hand
            .iter()
            .position(|c| c.id() == card_id)
            .ok_or(GameplayError::CardNotFound)?;

        let cost = self.hand[pos].mana_cost();
        if cost > self.mana {
            return Err(GameplayError::NotEnoughMana {
                cost,
                available: self.mana,
            });
        }

        let card = self.hand.remove(pos);
        self.mana -= cost;
        Ok(self.board.place_card(card).cloned())
    }

    pub fn hand_card_mut(&mut self, card_id: Uuid) -> Option<&mut Card> {
        self.hand.iter_mut().find(|c| c.id() == card_id)
    }
}

impl Defender for GamePlayer {
    fn damage(&self) -> u32 {
        0
    }

    fn health(&self) -> u32 {
        self.health
    }

    fn reduce_health(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    fn can_counter_attack(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::AttackStatus;

    fn player_with_deck(cards: Vec<Card>) -> GamePlayer {
        GamePlayer::new(Uuid::new_v4(), cards.into_iter().collect())
    }

    #[test]
    fn max_mana_is_capped() {
        let mut player = player_with_deck(Vec::new());
        for _ in 0..15 {
            player.start_turn();
            assert!(player.max_mana() <= MAX_MANA);
            assert_eq!(player.mana(), player.max_mana());
        }
        assert_eq!(player.max_mana(), MAX_MANA);
    }

    #[test]
    fn discard_returns_cards_to_the_bottom_and_draws_replacements() {
        let cards: Vec<Card> = (0..6).map(|_| Card::new(1, 1, 1)).collect();
        let mut player = player_with_deck(cards.clone());
        player.draw_many(3);

        let missing = Uuid::new_v4();
        let replaced = player.discard(&[cards[0].id(), missing, cards[2].id()]);

        assert_eq!(replaced, 2);
        let hand: Vec<Uuid> = player.hand().iter().map(Card::id).collect();
        assert_eq!(hand, vec![cards[1].id(), cards[3].id(), cards[4].id()]);
        let bottom: Vec<Uuid> = player.deck().iter().rev().take(2).map(Card::id).collect();
        assert_eq!(bottom, vec![cards[2].id(), cards[0].id()]);
    }

    #[test]
    fn unaffordable_play_leaves_state_unchanged() {
        let expensive = Card::new(5, 5, 5);
        let mut player = player_with_deck(vec![expensive.clone()]);
        player.start_turn();

        let err = player.play_card(expensive.id()).unwrap_err();

        assert_eq!(err, GameplayError::NotEnoughMana { cost: 5, available: 1 });
        assert_eq!(err.to_string(), "Not enough mana");
        assert_eq!(player.hand().len(), 1);
        assert_eq!(player.mana(), 1);
        assert!(player.board().is_empty());
    }

    #[test]
    fn play_card_moves_card_to_board() {
        let cheap = Card::new(1, 2, 2);
        let mut player = player_with_deck(vec![cheap.clone()]);
        player.start_turn();

        let placed = player.play_card(cheap.id()).unwrap().unwrap();

        assert_eq!(placed.id(), cheap.id());
        assert_eq!(placed.status(), AttackStatus::Exhausted);
        assert!(player.hand().is_empty());
        assert_eq!(player.mana(), 0);
        assert_eq!(
            player.play_card(cheap.id()),
            Err(GameplayError::CardNotFound)
        );
    }

    #[test]
    fn player_takes_damage_but_never_counters() {
        let mut player = player_with_deck(Vec::new());
        player.reduce_health(40);
        assert_eq!(player.health(), 0);
        assert!(player.is_dead());
        assert!(!player.can_counter_attack());
    }
}
