pub mod match_actor;
pub mod matchmaker;
pub mod queue;
pub mod queue_manager;
