use actix::{Addr, Context, Handler};
use metrics::{PLAYERS_ENQUEUED_TOTAL, PLAYERS_IN_QUEUE};
use tracing::{debug, info, warn};

use crate::{
    dispatcher::{
        messages::{Dispatch, Process},
        Dispatcher,
    },
    matchmaking::queue_manager::{QueueManager, PLAYERS_PER_MATCH},
    shared::{
        event::{Event, EventKind},
        player::Player,
        protocol::ServerMessage,
    },
};

impl Handler<Process> for QueueManager {
    type Result = ();

    fn handle(&mut self, msg: Process, _ctx: &mut Context<Self>) -> Self::Result {
        let Process { event, dispatcher } = msg;
        match event.kind {
            EventKind::QueueUp => match event.player {
                Some(player) => self.queue_up(player, &dispatcher),
                None => warn!("queue_up event without a player. Ignoring."),
            },
            EventKind::Dequeue => match event.player {
                Some(player) => self.dequeue(player),
                None => warn!("dequeue event without a player. Ignoring."),
            },
            _ => {}
        }
    }
}

impl QueueManager {
    fn queue_up(&mut self, player: Player, dispatcher: &Addr<Dispatcher>) {
        if self.queue.push(player.clone()) {
            info!("Player {} enqueued ({} waiting)", player.id(), self.queue.len());
            PLAYERS_ENQUEUED_TOTAL.inc();
        } else {
            debug!("Player {} is already in queue", player.id());
        }
        player.send(ServerMessage::WaitForMatch);

        if self.queue.len() >= PLAYERS_PER_MATCH {
            let players: Vec<Player> = (0..PLAYERS_PER_MATCH)
                .filter_map(|_| self.queue.pop())
                .collect();
            info!(
                "Queue full. Creating match for {:?}",
                players.iter().map(Player::id).collect::<Vec<_>>()
            );
            dispatcher.do_send(Dispatch(Event::internal(EventKind::CreateMatch { players })));
        }

        PLAYERS_IN_QUEUE.set(self.queue.len() as i64);
    }

    fn dequeue(&mut self, player: Player) {
        if self.queue.remove(&player) {
            info!("Player {} dequeued", player.id());
        } else {
            debug!("Player {} was not in queue", player.id());
        }
        player.send(ServerMessage::Dequeued);
        PLAYERS_IN_QUEUE.set(self.queue.len() as i64);
    }
}
