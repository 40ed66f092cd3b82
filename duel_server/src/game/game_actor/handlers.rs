use actix::{Context, Handler};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    dispatcher::messages::Process,
    errors::GameplayError,
    game::{
        card::CardEffect,
        game_actor::GameActor,
        state::{AttackOutcome, GamePhase},
    },
    shared::{
        event::{addressed_to, EventKind},
        player::Player,
        protocol::ServerMessage,
    },
};

impl Handler<Process> for GameActor {
    type Result = ();

    fn handle(&mut self, msg: Process, ctx: &mut Context<Self>) -> Self::Result {
        let event = msg.event;
        match event.kind {
            EventKind::CardsDiscarded { game_id, cards } if addressed_to(&game_id, self.game_id) => {
                if let Some(player) = self.participant(event.player) {
                    self.on_cards_discarded(player, &cards, ctx);
                }
            }
            EventKind::EndTurn { game_id } if addressed_to(&game_id, self.game_id) => {
                if let Some(player) = self.participant(event.player) {
                    self.on_end_turn(player, ctx);
                }
            }
            EventKind::PlayCard { game_id, card_id } if addressed_to(&game_id, self.game_id) => {
                if let Some(player) = self.participant(event.player) {
                    self.on_play_card(player, &card_id);
                }
            }
            EventKind::Attack {
                game_id,
                attacker,
                target,
            } if addressed_to(&game_id, self.game_id) => {
                if let Some(player) = self.participant(event.player) {
                    self.on_attack(player, &attacker, target.as_deref(), ctx);
                }
            }
            EventKind::ApplyEffect {
                game_id,
                card_id,
                effect,
            } if addressed_to(&game_id, self.game_id) => {
                self.on_apply_effect(&card_id, effect);
            }
            _ => {}
        }
    }
}

impl GameActor {
    /// 이 게임의 참가자만 통과시킵니다.
    fn participant(&self, player: Option<Player>) -> Option<Player> {
        let player = player?;
        if self.player(player.id()).is_none() {
            warn!(
                "Player {} is not part of game {}. Ignoring.",
                player.id(),
                self.game_id
            );
            return None;
        }
        Some(player)
    }

    fn in_turn_loop(&self) -> bool {
        if self.state.phase() != GamePhase::Turns {
            debug!(
                "Game {} is in {:?}. Dropping turn action.",
                self.game_id,
                self.state.phase()
            );
            return false;
        }
        true
    }

    fn on_cards_discarded(&mut self, player: Player, cards: &[String], ctx: &mut Context<Self>) {
        let card_ids: Vec<Uuid> = cards
            .iter()
            .filter_map(|raw| Uuid::parse_str(raw).ok())
            .collect();

        let Some(hand) = self.state.mulligan(player.id(), &card_ids) else {
            debug!("Game {}: mulligan is over. Ignoring discard.", self.game_id);
            return;
        };
        player.send(ServerMessage::WaitOtherPlayers { hand: Some(hand) });

        if self.state.all_mulliganed() {
            self.begin_turns(ctx);
        }
    }

    fn on_end_turn(&mut self, player: Player, ctx: &mut Context<Self>) {
        if !self.in_turn_loop() {
            return;
        }
        if let Err(err) = self.state.ensure_current(player.id()) {
            self.reply_error(&player, err);
            return;
        }
        self.advance_turn(ctx);
    }

    fn on_play_card(&mut self, player: Player, card_id: &str) {
        if !self.in_turn_loop() {
            return;
        }
        let Ok(card_id) = Uuid::parse_str(card_id) else {
            self.reply_error(&player, GameplayError::CardNotFound);
            return;
        };

        match self.state.play_card(player.id(), card_id) {
            Ok(Some(card)) => {
                let mana = self
                    .state
                    .player(player.id())
                    .map_or(0, |p| p.mana());
                info!("Game {}: {} played {}", self.game_id, player.id(), card_id);
                self.broadcast(ServerMessage::CardPlayed {
                    game_id: self.game_id,
                    player_id: player.id(),
                    mana,
                    card,
                });
            }
            Ok(None) => {
                debug!(
                    "Game {}: board of {} is full. {} was not placed.",
                    self.game_id,
                    player.id(),
                    card_id
                );
            }
            Err(err) => self.reply_error(&player, err),
        }
    }

    fn on_attack(
        &mut self,
        player: Player,
        attacker: &str,
        target: Option<&str>,
        ctx: &mut Context<Self>,
    ) {
        if !self.in_turn_loop() {
            return;
        }
        let Ok(attacker_id) = Uuid::parse_str(attacker) else {
            debug!("Game {}: unparsable attacker id {}", self.game_id, attacker);
            return;
        };
        let target_id = match target.map(Uuid::parse_str) {
            None => None,
            Some(Ok(id)) => Some(id),
            Some(Err(_)) => {
                debug!("Game {}: unparsable target id {:?}", self.game_id, target);
                return;
            }
        };

        match self.state.attack(player.id(), attacker_id, target_id) {
            Ok(Some(AttackOutcome::Minion)) => {
                for receiver in &self.players {
                    if let Some((own_board, opponent_board)) = self.state.boards_for(receiver.id()) {
                        receiver.send(ServerMessage::AttackResult {
                            own_board,
                            opponent_board,
                        });
                    }
                }
            }
            Ok(Some(AttackOutcome::Player {
                target,
                health,
                defeated,
            })) => {
                info!(
                    "Game {}: {} hit player {} ({} health left)",
                    self.game_id,
                    player.id(),
                    target,
                    health
                );
                self.broadcast(ServerMessage::DamageTaken {
                    player_id: target,
                    health,
                });
                if defeated {
                    self.finish(ctx);
                }
            }
            Ok(None) => {
                debug!(
                    "Game {}: attacker {} or target {:?} not on board",
                    self.game_id, attacker_id, target_id
                );
            }
            Err(err) => self.reply_error(&player, err),
        }
    }

    fn on_apply_effect(&mut self, card_id: &str, effect: CardEffect) {
        if self.state.phase() == GamePhase::Over {
            return;
        }
        let applied = Uuid::parse_str(card_id)
            .map(|id| self.state.apply_effect(id, effect))
            .unwrap_or(false);

        if applied {
            debug!("Game {}: {:?} applied to {}", self.game_id, effect, card_id);
        } else {
            debug!("Game {}: {:?} had no target {}", self.game_id, effect, card_id);
        }
    }
}
