use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::core::Executor;
use crate::events::Bus;
use crate::output::Console;
use crate::present::{Presenter, Surface, mailbox};
use crate::subscribers::{Subscribe, SubscriberSet};

/// Builder for an [`Executor`] and its [`Presenter`].
pub struct ExecutorBuilder {
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
    console: Option<Console>,
}

impl ExecutorBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
            console: None,
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive runtime events (task lifecycle, cancel requests,
    /// output redirection) through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Uses `console` as the default output channel instead of stdout.
    pub fn with_console(mut self, console: Console) -> Self {
        self.console = Some(console);
        self
    }

    /// Builds the executor and the presenter rendering into `surface`.
    ///
    /// Initializes:
    /// - event bus and, when subscribers are set, the listener feeding them
    /// - mailbox shared by the line sink and the runner
    /// - presenter owning the line buffer
    ///
    /// Must be called inside a tokio runtime.
    pub fn build(self, surface: impl Surface) -> (Executor, Presenter) {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let listener = CancellationToken::new();

        let set = SubscriberSet::new(self.subscribers, bus.clone());
        if set.is_empty() {
            tracing::debug!("no subscribers; events stay on the bus");
        } else {
            tracing::debug!(subscribers = set.len(), "starting event listener");
            subscriber_listener(&bus, set, listener.clone());
        }

        let (tx, rx) = mailbox::channel();
        let console = self.console.unwrap_or_default();
        let exec = Executor::new_internal(self.cfg, bus, console, tx, listener);
        (exec, Presenter::new(rx, Box::new(surface)))
    }
}

/// Forwards bus events to the subscriber set until `token` is cancelled.
fn subscriber_listener(bus: &Bus, set: SubscriberSet, token: CancellationToken) {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                ev = rx.recv() => match ev {
                    Ok(ev) => set.emit(&ev),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "event listener lagged; events skipped");
                    }
                    Err(RecvError::Closed) => break,
                },
            }
        }
        set.shutdown().await;
    });
}
