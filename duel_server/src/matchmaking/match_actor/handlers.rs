use actix::{ActorContext, Addr, AsyncContext, Context, Handler};
use metrics::{
    MATCHES_CANCELED_TOTAL, MATCHES_CONFIRMED_TOTAL, MATCH_CONFIRM_DURATION_SECONDS,
    PLAYERS_REQUEUED_TOTAL,
};
use tracing::{debug, info, warn};

use crate::{
    dispatcher::{
        messages::{Dispatch, Process, Unregister},
        Dispatcher,
    },
    matchmaking::match_actor::{MatchActor, MatchState},
    shared::{
        event::{addressed_to, Event, EventKind},
        player::Player,
        protocol::ServerMessage,
    },
};

impl Handler<Process> for MatchActor {
    type Result = ();

    fn handle(&mut self, msg: Process, ctx: &mut Context<Self>) -> Self::Result {
        let Process { event, dispatcher } = msg;
        match event.kind {
            EventKind::AskConfirmation { match_id } if match_id == self.match_id => {
                self.ask_confirmation(&dispatcher, ctx);
            }
            EventKind::MatchConfirmed { match_id } if addressed_to(&match_id, self.match_id) => {
                match event.player {
                    Some(player) => self.confirm(player, &dispatcher, ctx),
                    None => warn!("match_confirmed without a player for {}", self.match_id),
                }
            }
            EventKind::MatchDeclined { match_id } if addressed_to(&match_id, self.match_id) => {
                self.decline(event.player, &dispatcher, ctx);
            }
            _ => {}
        }
    }
}

impl MatchActor {
    fn ask_confirmation(&mut self, dispatcher: &Addr<Dispatcher>, ctx: &mut Context<Self>) {
        if self.state != MatchState::AwaitingConfirmation || self.timer.is_some() {
            debug!("Match {} already asked for confirmation", self.match_id);
            return;
        }

        for player in &self.players {
            player.send(ServerMessage::MatchFound {
                match_id: self.match_id,
            });
        }

        // 만료되면 거절 이벤트를 버스로 흘려보냅니다. 이미 끝난 매치라면 아무 일도 없습니다.
        let dispatcher = dispatcher.clone();
        self.timer = Some(ctx.run_later(self.timeout, move |act, _ctx| {
            act.timer = None;
            if act.state != MatchState::AwaitingConfirmation {
                return;
            }
            warn!("Match {} confirmation timed out", act.match_id);
            act.timed_out = true;
            dispatcher.do_send(Dispatch(Event::internal(EventKind::MatchDeclined {
                match_id: act.match_id.to_string(),
            })));
        }));
    }

    fn confirm(&mut self, player: Player, dispatcher: &Addr<Dispatcher>, ctx: &mut Context<Self>) {
        if self.state != MatchState::AwaitingConfirmation {
            debug!(
                "Match {} is {:?}. Ignoring confirmation from {}",
                self.match_id,
                self.state,
                player.id()
            );
            return;
        }
        if !self.is_member(&player) {
            warn!("Player {} is not part of match {}", player.id(), self.match_id);
            return;
        }

        if !self.confirmed.contains(&player) {
            info!("Player {} confirmed match {}", player.id(), self.match_id);
            self.confirmed.push(player.clone());
        }
        player.send(ServerMessage::WaitOtherPlayers { hand: None });

        if self.all_confirmed() {
            self.state = MatchState::Confirmed;
            self.disarm_timer(ctx);

            info!("Match {} confirmed by all players. Starting game.", self.match_id);
            MATCHES_CONFIRMED_TOTAL.inc();
            MATCH_CONFIRM_DURATION_SECONDS.observe(self.created_at.elapsed().as_secs_f64());

            dispatcher.do_send(Dispatch(Event::internal(EventKind::StartGame {
                players: self.players.clone(),
            })));
            self.release(dispatcher, ctx);
        }
    }

    fn decline(
        &mut self,
        player: Option<Player>,
        dispatcher: &Addr<Dispatcher>,
        ctx: &mut Context<Self>,
    ) {
        if self.state != MatchState::AwaitingConfirmation {
            debug!("Match {} is {:?}. Ignoring decline.", self.match_id, self.state);
            return;
        }
        if let Some(player) = &player {
            if !self.is_member(player) {
                warn!("Player {} is not part of match {}", player.id(), self.match_id);
                return;
            }
        }

        self.state = MatchState::Cancelled;
        self.disarm_timer(ctx);

        let reason = if self.timed_out { "timeout" } else { "declined" };
        info!(
            "Match {} canceled ({}) by {:?}",
            self.match_id,
            reason,
            player.as_ref().map(Player::id)
        );
        MATCHES_CANCELED_TOTAL.with_label_values(&[reason]).inc();

        for player in &self.players {
            player.send(ServerMessage::MatchCanceled);
        }

        // 수락했던 플레이어만 대기열로 돌려보냅니다.
        for player in &self.confirmed {
            PLAYERS_REQUEUED_TOTAL.inc();
            dispatcher.do_send(Dispatch(Event::from_player(
                player.clone(),
                EventKind::QueueUp,
            )));
        }

        self.release(dispatcher, ctx);
    }

    fn disarm_timer(&mut self, ctx: &mut Context<Self>) {
        if let Some(handle) = self.timer.take() {
            ctx.cancel_future(handle);
        }
    }

    fn release(&self, dispatcher: &Addr<Dispatcher>, ctx: &mut Context<Self>) {
        dispatcher.do_send(Unregister {
            handler_id: self.match_id,
        });
        ctx.stop();
    }
}
