//! # Mailbox to the presentation context.
//!
//! One unbounded FIFO carries both parsed output chunks and lifecycle
//! signals. Posting never blocks the producer, and because a task's output
//! and its `Result`/`Finished` signals share the queue, every line the task
//! wrote is rendered before the result is announced.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::output::Segment;
use crate::tasks::TaskOutcome;

/// Lifecycle signal for the presentation surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Signal {
    /// Exactly once per run, before `Finished`.
    Result {
        /// Task name.
        task: Arc<str>,
        /// Returned value, interrupted result, or fault description.
        outcome: TaskOutcome,
    },
    /// Exactly once per run, after `Result`.
    Finished {
        /// Task name.
        task: Arc<str>,
    },
}

/// Queued unit of presentation work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    /// Segments of one output chunk, applied in order.
    Chunk(Vec<Segment>),
    /// A lifecycle signal.
    Signal(Signal),
}

/// Producer side; cheap to clone, usable from any context.
#[derive(Clone, Debug)]
pub struct Mailbox {
    tx: mpsc::UnboundedSender<Message>,
}

impl Mailbox {
    /// Queues `msg`. Returns `false` if the presenter is gone.
    pub fn post(&self, msg: Message) -> bool {
        self.tx.send(msg).is_ok()
    }
}

/// Consumer side, owned by the presenter.
#[derive(Debug)]
pub struct Inbox {
    rx: mpsc::UnboundedReceiver<Message>,
}

impl Inbox {
    /// Next queued message, if any, without waiting.
    pub fn try_recv(&mut self) -> Option<Message> {
        self.rx.try_recv().ok()
    }

    /// Waits for the next message; `None` once every mailbox is dropped.
    pub async fn recv(&mut self) -> Option<Message> {
        self.rx.recv().await
    }
}

/// Creates a connected mailbox/inbox pair.
pub fn channel() -> (Mailbox, Inbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Mailbox { tx }, Inbox { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fifo_across_clones() {
        let (a, mut inbox) = channel();
        let b = a.clone();
        a.post(Message::Chunk(vec![Segment::Begin]));
        b.post(Message::Signal(Signal::Finished { task: "t".into() }));
        a.post(Message::Chunk(vec![Segment::End]));

        assert_eq!(inbox.recv().await, Some(Message::Chunk(vec![Segment::Begin])));
        assert!(matches!(inbox.recv().await, Some(Message::Signal(Signal::Finished { .. }))));
        assert_eq!(inbox.try_recv(), Some(Message::Chunk(vec![Segment::End])));
        assert_eq!(inbox.try_recv(), None);
    }
}
