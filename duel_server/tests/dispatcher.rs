mod common;

use actix::{Actor, Context, Handler};
use common::{engine, setup_logger, wait_for_handler_count, RECV_TIMEOUT, RESIDENT_HANDLERS};
use duel_server::{
    dispatcher::{
        messages::{Dispatch, HandlerCount, Process, Register, Unregister},
        subscriber::Subscriber,
        Dispatcher,
    },
    matchmaking::queue_manager::QueueManager,
    shared::event::{Event, EventKind},
};
use tokio::sync::mpsc;
use uuid::Uuid;

/// 받은 이벤트 이름을 자기 이름과 함께 채널로 흘려보내는 핸들러
struct Recorder {
    name: &'static str,
    tx: mpsc::UnboundedSender<(&'static str, &'static str)>,
}

impl Actor for Recorder {
    type Context = Context<Self>;
}

impl Handler<Process> for Recorder {
    type Result = ();

    fn handle(&mut self, msg: Process, _ctx: &mut Self::Context) -> Self::Result {
        let _ = self.tx.send((self.name, msg.event.kind.name()));
    }
}

async fn next_record(
    rx: &mut mpsc::UnboundedReceiver<(&'static str, &'static str)>,
) -> (&'static str, &'static str) {
    tokio::time::timeout(RECV_TIMEOUT, rx.recv())
        .await
        .expect("Timed out waiting for a delivery")
        .expect("Recorder channel closed")
}

#[actix::test]
async fn engine_registers_resident_handlers() {
    setup_logger();
    let dispatcher = engine();

    wait_for_handler_count(&dispatcher, RESIDENT_HANDLERS).await;
}

#[actix::test]
async fn dispatch_to_zero_handlers_is_not_an_error() {
    setup_logger();
    let dispatcher = Dispatcher::new().start();

    dispatcher.do_send(Dispatch(Event::internal(EventKind::QueueUp)));

    let count = dispatcher.send(HandlerCount).await.unwrap();
    assert_eq!(count, 0);
}

#[actix::test]
async fn register_and_unregister_by_identity() {
    setup_logger();
    let dispatcher = Dispatcher::new().start();

    let first = Subscriber::queue_manager(QueueManager::new().start());
    let second = Subscriber::queue_manager(QueueManager::new().start());
    let first_id = first.handler_id;

    dispatcher.do_send(Register(first.clone()));
    dispatcher.do_send(Register(second));
    // 같은 id 로 다시 등록하면 무시됩니다.
    dispatcher.do_send(Register(first));
    assert_eq!(dispatcher.send(HandlerCount).await.unwrap(), 2);

    dispatcher.do_send(Unregister {
        handler_id: Uuid::new_v4(),
    });
    assert_eq!(dispatcher.send(HandlerCount).await.unwrap(), 2);

    dispatcher.do_send(Unregister {
        handler_id: first_id,
    });
    assert_eq!(dispatcher.send(HandlerCount).await.unwrap(), 1);
}

#[actix::test]
async fn dispatch_follows_registration_order() {
    setup_logger();
    let dispatcher = Dispatcher::new().start();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let first_id = Uuid::new_v4();
    for (handler_id, name) in [(first_id, "first"), (Uuid::new_v4(), "second")] {
        let recorder = Recorder {
            name,
            tx: tx.clone(),
        }
        .start();
        dispatcher.do_send(Register(Subscriber::recipient(
            handler_id,
            recorder.recipient(),
        )));
    }
    assert_eq!(dispatcher.send(HandlerCount).await.unwrap(), 2);

    dispatcher.do_send(Dispatch(Event::internal(EventKind::QueueUp)));
    dispatcher.do_send(Dispatch(Event::internal(EventKind::Dequeue)));

    let mut records = Vec::new();
    for _ in 0..4 {
        records.push(next_record(&mut rx).await);
    }
    for event in ["queue_up", "dequeue"] {
        let position = |name| records.iter().position(|r| *r == (name, event)).unwrap();
        assert!(position("first") < position("second"), "{:?}", records);
    }
    // 각 핸들러 안에서도 dispatch 순서가 유지됩니다.
    for name in ["first", "second"] {
        let seen: Vec<_> = records
            .iter()
            .filter(|r| r.0 == name)
            .map(|r| r.1)
            .collect();
        assert_eq!(seen, vec!["queue_up", "dequeue"]);
    }

    // 해제된 핸들러는 더 이상 받지 않습니다.
    dispatcher.do_send(Unregister {
        handler_id: first_id,
    });
    dispatcher.do_send(Dispatch(Event::internal(EventKind::QueueUp)));
    assert_eq!(next_record(&mut rx).await, ("second", "queue_up"));
    assert!(
        tokio::time::timeout(common::SILENCE, rx.recv()).await.is_err(),
        "unregistered handler still received an event"
    );
}
