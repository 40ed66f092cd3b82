use actix::{Actor, Addr, Context, Handler};
use metrics::MATCHES_CREATED_TOTAL;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    dispatcher::{
        messages::{Dispatch, Process, Register},
        subscriber::Subscriber,
        Dispatcher,
    },
    matchmaking::{
        match_actor::MatchActor, matchmaker::Matchmaker, queue_manager::PLAYERS_PER_MATCH,
    },
    shared::{
        event::{Event, EventKind},
        player::Player,
    },
};

impl Handler<Process> for Matchmaker {
    type Result = ();

    fn handle(&mut self, msg: Process, _ctx: &mut Context<Self>) -> Self::Result {
        if let EventKind::CreateMatch { players } = msg.event.kind {
            self.create_match(players, &msg.dispatcher);
        }
    }
}

impl Matchmaker {
    fn create_match(&self, players: Vec<Player>, dispatcher: &Addr<Dispatcher>) {
        if players.len() != PLAYERS_PER_MATCH {
            warn!(
                "create_match needs exactly {} players, got {}. Ignoring.",
                PLAYERS_PER_MATCH,
                players.len()
            );
            return;
        }

        let match_id = Uuid::new_v4();
        info!(
            "Match {} created for {:?}",
            match_id,
            players.iter().map(Player::id).collect::<Vec<_>>()
        );

        let addr = MatchActor::new(match_id, players, self.settings.confirm_timeout()).start();

        // 등록이 먼저 큐에 들어가야 AskConfirmation 이 새 Match 에 도달합니다.
        dispatcher.do_send(Register(Subscriber::matched(match_id, addr)));
        dispatcher.do_send(Dispatch(Event::internal(EventKind::AskConfirmation {
            match_id,
        })));

        MATCHES_CREATED_TOTAL.inc();
    }
}
