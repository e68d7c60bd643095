use crate::tasks::Completion;

/// Presentation collaborator driven by the [`Presenter`](crate::Presenter).
///
/// Every callback runs on the context that owns the presenter, in the order
/// the underlying output and signals were produced. All methods default to
/// no-ops.
pub trait Surface: Send + 'static {
    /// A new last line.
    fn append_line(&mut self, _text: &str) {}

    /// The last line was redrawn.
    fn replace_last_line(&mut self, _text: &str) {}

    /// The task returned a value or the interrupted result.
    fn on_result(&mut self, _task: &str, _value: &Completion) {}

    /// The task faulted; `description` is the verbatim fault text.
    fn on_error(&mut self, _task: &str, _description: &str) {}

    /// The task is finished; start may be re-enabled once the executor is idle.
    fn on_finished(&mut self, _task: &str) {}
}

/// Surface that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// One surface callback, as observed.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub(crate) enum Call {
        Append(String),
        Replace(String),
        Result(String),
        Error(String),
        Finished,
    }

    /// Surface recording every callback into a shared log.
    #[derive(Clone, Default)]
    pub(crate) struct Recording(pub Arc<Mutex<Vec<Call>>>);

    impl Recording {
        pub(crate) fn calls(&self) -> Vec<Call> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Surface for Recording {
        fn append_line(&mut self, text: &str) {
            self.0.lock().unwrap().push(Call::Append(text.to_string()));
        }

        fn replace_last_line(&mut self, text: &str) {
            self.0.lock().unwrap().push(Call::Replace(text.to_string()));
        }

        fn on_result(&mut self, _task: &str, value: &Completion) {
            self.0.lock().unwrap().push(Call::Result(value.to_string()));
        }

        fn on_error(&mut self, _task: &str, description: &str) {
            self.0.lock().unwrap().push(Call::Error(description.to_string()));
        }

        fn on_finished(&mut self, _task: &str) {
            self.0.lock().unwrap().push(Call::Finished);
        }
    }
}
