use actix::{AsyncContext, Context, Handler};
use tracing::{debug, info, warn};

use crate::dispatcher::{
    messages::{Dispatch, HandlerCount, Process, Register, Unregister},
    Dispatcher,
};

impl Handler<Register> for Dispatcher {
    type Result = ();

    fn handle(&mut self, msg: Register, _ctx: &mut Context<Self>) -> Self::Result {
        let subscriber = msg.0;
        if self
            .handlers
            .iter()
            .any(|h| h.handler_id == subscriber.handler_id)
        {
            warn!(
                "Handler {} ({}) is already registered. Ignoring.",
                subscriber.handler_id,
                subscriber.kind()
            );
            return;
        }

        info!(
            "Handler {} ({}) registered",
            subscriber.handler_id,
            subscriber.kind()
        );
        self.handlers.push(subscriber);
    }
}

impl Handler<Unregister> for Dispatcher {
    type Result = ();

    fn handle(&mut self, msg: Unregister, _ctx: &mut Context<Self>) -> Self::Result {
        let before = self.handlers.len();
        self.handlers.retain(|h| h.handler_id != msg.handler_id);

        if self.handlers.len() == before {
            debug!("Handler {} was not registered", msg.handler_id);
        } else {
            info!("Handler {} unregistered", msg.handler_id);
        }
    }
}

impl Handler<Dispatch> for Dispatcher {
    type Result = ();

    fn handle(&mut self, msg: Dispatch, ctx: &mut Context<Self>) -> Self::Result {
        let event = msg.0;
        debug!(
            "Dispatching {} (player: {:?}) to {} handlers",
            event.kind.name(),
            event.player.as_ref().map(|p| p.id()),
            self.handlers.len()
        );

        let dispatcher = ctx.address();
        for subscriber in &self.handlers {
            subscriber.do_send_process(Process {
                event: event.clone(),
                dispatcher: dispatcher.clone(),
            });
        }
    }
}

impl Handler<HandlerCount> for Dispatcher {
    type Result = usize;

    fn handle(&mut self, _msg: HandlerCount, _ctx: &mut Context<Self>) -> Self::Result {
        self.handlers.len()
    }
}
