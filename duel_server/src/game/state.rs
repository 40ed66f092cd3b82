use rand::Rng;
use std::collections::HashSet;
use uuid::Uuid;

use crate::{
    errors::GameplayError,
    game::{
        board::{ActiveDefender, AttackStatus, Board},
        card::{build_deck, Card, CardEffect, Defender},
        player::GamePlayer,
        DECK_SIZE, STARTING_HAND_SIZE,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Mulligan,
    Turns,
    Over,
}

/// 턴 시작 시 현재 플레이어에게 알릴 정보
#[derive(Debug, Clone, PartialEq)]
pub struct TurnStart {
    pub current: Uuid,
    pub waiting: Uuid,
    pub turn_number: u64,
    pub drawn_card: Option<Card>,
    pub mana: u32,
    pub cards_left: usize,
    pub hand_size: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttackOutcome {
    /// 하수인끼리의 전투. 양쪽 보드가 갱신되었습니다.
    Minion,
    /// 상대 플레이어 직접 공격
    Player {
        target: Uuid,
        health: u32,
        defeated: bool,
    },
}

/// 한 판의 규칙 상태. 액터와 무관한 순수 로직입니다.
#[derive(Debug, Clone)]
pub struct GameState {
    id: Uuid,
    players: [GamePlayer; 2],
    phase: GamePhase,
    mulliganed: HashSet<Uuid>,
    turn_number: u64,
}

impl GameState {
    pub fn new<R: Rng + ?Sized>(id: Uuid, player_ids: [Uuid; 2], rng: &mut R) -> Self {
        let players = player_ids.map(|pid| GamePlayer::new(pid, build_deck(rng, DECK_SIZE)));
        Self {
            id,
            players,
            phase: GamePhase::Mulligan,
            mulliganed: HashSet::new(),
            turn_number: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn turn_number(&self) -> u64 {
        self.turn_number
    }

    pub fn players(&self) -> &[GamePlayer; 2] {
        &self.players
    }

    pub fn player(&self, player_id: Uuid) -> Option<&GamePlayer> {
        self.players.iter().find(|p| p.id() == player_id)
    }

    pub fn opponent_of(&self, player_id: Uuid) -> Option<&GamePlayer> {
        let idx = self.index_of(player_id)?;
        Some(&self.players[1 - idx])
    }

    pub fn current_player(&self) -> Option<&GamePlayer> {
        self.players.iter().find(|p| p.is_current())
    }

    /// 각 플레이어가 시작 핸드를 뽑습니다.
    pub fn deal_starting_hands(&mut self) -> Vec<(Uuid, Vec<Card>)> {
        self.players
            .iter_mut()
            .map(|p| (p.id(), p.draw_many(STARTING_HAND_SIZE)))
            .collect()
    }

    /// 멀리건 단계가 아니거나 모르는 플레이어면 None. 여러 번 버려도 됩니다.
    pub fn mulligan(&mut self, player_id: Uuid, card_ids: &[Uuid]) -> Option<Vec<Card>> {
        if self.phase != GamePhase::Mulligan {
            return None;
        }
        let idx = self.index_of(player_id)?;
        self.players[idx].discard(card_ids);
        self.mulliganed.insert(player_id);
        Some(self.players[idx].hand().to_vec())
    }

    pub fn all_mulliganed(&self) -> bool {
        self.players.iter().all(|p| self.mulliganed.contains(&p.id()))
    }

    /// 턴 루프 시작. players[1] 이 선공입니다.
    pub fn start_turns(&mut self) -> Option<TurnStart> {
        if self.phase != GamePhase::Mulligan {
            return None;
        }
        self.phase = GamePhase::Turns;
        self.players[0].set_current(false);
        self.players[1].set_current(true);
        Some(self.begin_turn(1))
    }

    /// 현재 턴을 넘기고 상대의 턴을 시작합니다.
    pub fn end_turn(&mut self) -> Option<TurnStart> {
        if self.phase != GamePhase::Turns {
            return None;
        }
        let next = self.current_index().map_or(1, |idx| 1 - idx);
        self.players[1 - next].set_current(false);
        self.players[next].set_current(true);
        Some(self.begin_turn(next))
    }

    fn begin_turn(&mut self, idx: usize) -> TurnStart {
        self.turn_number += 1;
        let waiting = self.players[1 - idx].id();
        let player = &mut self.players[idx];
        let drawn_card = player.start_turn();

        TurnStart {
            current: player.id(),
            waiting,
            turn_number: self.turn_number,
            drawn_card,
            mana: player.mana(),
            cards_left: player.deck().len(),
            hand_size: player.hand().len(),
        }
    }

    pub fn ensure_current(&self, player_id: Uuid) -> Result<usize, GameplayError> {
        match self.index_of(player_id) {
            Some(idx) if self.players[idx].is_current() => Ok(idx),
            _ => Err(GameplayError::NotYourTurn),
        }
    }

    pub fn play_card(
        &mut self,
        player_id: Uuid,
        card_id: Uuid,
    ) -> Result<Option<ActiveDefender>, GameplayError> {
        let idx = self.ensure_current(player_id)?;
        self.players[idx].play_card(card_id)
    }

    /// 공격자가 자기 보드에 없거나 지정한 대상이 상대 보드에 없으면 Ok(None) 으로 무시합니다.
    pub fn attack(
        &mut self,
        player_id: Uuid,
        attacker_id: Uuid,
        target_id: Option<Uuid>,
    ) -> Result<Option<AttackOutcome>, GameplayError> {
        let idx = self.ensure_current(player_id)?;
        let (own, opponent) = self.pair_mut(idx);

        let Some(attacker) = own.board_mut().get_mut(attacker_id) else {
            return Ok(None);
        };

        match target_id {
            Some(target_id) => {
                let Some(target) = opponent.board_mut().get_mut(target_id) else {
                    return Ok(None);
                };
                attacker.attack(target)?;
                own.board_mut().remove_dead();
                opponent.board_mut().remove_dead();
                Ok(Some(AttackOutcome::Minion))
            }
            None => {
                if !opponent.board().is_empty() {
                    return Err(GameplayError::MinionsOnBoard);
                }
                attacker.attack(&mut *opponent)?;
                let defeated = opponent.is_dead();
                let outcome = AttackOutcome::Player {
                    target: opponent.id(),
                    health: opponent.health(),
                    defeated,
                };
                if defeated {
                    self.finish();
                }
                Ok(Some(outcome))
            }
        }
    }

    /// 손 또는 보드의 카드에 효과를 적용합니다. 카드를 찾지 못하면 false.
    pub fn apply_effect(&mut self, card_id: Uuid, effect: CardEffect) -> bool {
        for player in self.players.iter_mut() {
            if let Some(card) = player.hand_card_mut(card_id) {
                return card.apply(effect);
            }
            if let Some(defender) = player.board_mut().get_mut(card_id) {
                if effect == CardEffect::Freeze {
                    defender.set_status(AttackStatus::Frozen);
                } else {
                    defender.card_mut().apply(effect);
                }
                player.board_mut().remove_dead();
                return true;
            }
        }
        false
    }

    pub fn finish(&mut self) {
        self.phase = GamePhase::Over;
        for player in self.players.iter_mut() {
            player.set_current(false);
        }
    }

    /// (winner, loser). 아직 승부가 나지 않았으면 None.
    pub fn result(&self) -> Option<(Uuid, Uuid)> {
        let [a, b] = &self.players;
        match (a.is_dead(), b.is_dead()) {
            (true, false) => Some((b.id(), a.id())),
            (false, true) => Some((a.id(), b.id())),
            _ => None,
        }
    }

    /// player 시점의 (자기 보드, 상대 보드)
    pub fn boards_for(&self, player_id: Uuid) -> Option<(Board, Board)> {
        let idx = self.index_of(player_id)?;
        Some((
            self.players[idx].board().clone(),
            self.players[1 - idx].board().clone(),
        ))
    }

    fn index_of(&self, player_id: Uuid) -> Option<usize> {
        self.players.iter().position(|p| p.id() == player_id)
    }

    fn current_index(&self) -> Option<usize> {
        self.players.iter().position(GamePlayer::is_current)
    }

    fn pair_mut(&mut self, own: usize) -> (&mut GamePlayer, &mut GamePlayer) {
        let [a, b] = &mut self.players;
        if own == 0 {
            (a, b)
        } else {
            (b, a)
        }
    }
}
