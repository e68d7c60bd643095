//! # Line sink.
//!
//! [`LineSink`] is the destination installed while a task runs. It is called
//! on the worker, tokenizes each chunk into [`Segment`]s and posts the whole
//! chunk as one mailbox message. It never touches the line buffer or the
//! surface; the presenter applies the segments on its own context.
//!
//! Chunks with no markers and no printable text are dropped without a post.

use crate::output::{Destination, Markers, segments};
use crate::present::{Mailbox, Message};

/// Destination forwarding parsed output to the presentation context.
#[derive(Clone, Debug)]
pub struct LineSink {
    markers: Markers,
    mailbox: Mailbox,
}

impl LineSink {
    /// Creates a sink recognising `markers` and posting to `mailbox`.
    pub fn new(markers: Markers, mailbox: Mailbox) -> Self {
        Self { markers, mailbox }
    }

    pub(crate) fn mailbox(&self) -> &Mailbox {
        &self.mailbox
    }

    /// Parses `chunk` and posts it. Never blocks.
    pub fn write(&self, chunk: &str) {
        let segs = segments(chunk, &self.markers);
        if segs.is_empty() {
            return;
        }
        if !self.mailbox.post(Message::Chunk(segs)) {
            tracing::trace!("presenter gone; output chunk dropped");
        }
    }
}

impl Destination for LineSink {
    fn write_chunk(&self, chunk: &str) {
        self.write(chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Segment;
    use crate::present::mailbox;

    #[test]
    fn posts_one_message_per_chunk() {
        let (tx, mut rx) = mailbox::channel();
        let sink = LineSink::new(Markers::default(), tx);

        sink.write("a\nb\n");
        sink.write("   \n");
        sink.write("c");

        match rx.try_recv() {
            Some(Message::Chunk(segs)) => assert_eq!(
                segs,
                vec![Segment::Fragment("a".into()), Segment::Fragment("b".into())]
            ),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(rx.try_recv(), Some(Message::Chunk(s)) if s == vec![Segment::Fragment("c".into())]));
        assert!(rx.try_recv().is_none());
    }

    #[test]
    fn closed_mailbox_is_silent() {
        let (tx, rx) = mailbox::channel();
        drop(rx);
        LineSink::new(Markers::default(), tx).write("lost");
    }
}
