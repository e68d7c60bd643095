//! # Example: progress
//!
//! Runs one background task that prints a banner, its arguments and a
//! 10-step progress bar, while a terminal surface renders the captured output
//! on the main context.
//!
//! ```bash
//! cargo run --example progress --features logging
//! cargo run --example progress --features logging -- --stop   # cancel after ~2s
//! ```
//!
//! ## Flow
//! ```text
//! Controller::start_requested(task)
//!     ├─► Executor::submit ─► stdout redirected into LineSink
//!     ├─► worker: println / Progress ─► Mailbox
//!     ├─► (--stop) Controller::cancel_requested ─► StopFlag
//!     └─► Presenter::run ─► Terminal::{append_line, replace_last_line, on_*}
//! ```

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use taskline::{
    BlockingTaskFn, Completion, Config, Controller, ExecutorBuilder, LogWriter, LoggerConfig,
    Progress, ShutdownDecision, Subscribe, Surface, TaskContext, TaskRef, TaskResult, logger_init,
};

/// Renders onto the real terminal; the last line stays open for redraws.
#[derive(Default)]
struct Terminal {
    open: bool,
}

impl Terminal {
    fn line(&mut self, text: &str) {
        let mut out = std::io::stdout().lock();
        if self.open {
            let _ = writeln!(out);
        }
        let _ = write!(out, "{text}");
        let _ = out.flush();
        self.open = true;
    }
}

impl Surface for Terminal {
    fn append_line(&mut self, text: &str) {
        self.line(text);
    }

    fn replace_last_line(&mut self, text: &str) {
        let mut out = std::io::stdout().lock();
        let _ = write!(out, "\r\x1b[K{text}");
        let _ = out.flush();
    }

    fn on_result(&mut self, _task: &str, value: &Completion) {
        self.line(&format!("Return value: {value}"));
    }

    fn on_error(&mut self, _task: &str, description: &str) {
        self.line("Error raised by the background task:");
        self.line(description);
    }

    fn on_finished(&mut self, _task: &str) {
        self.line("Asynchronous processing is complete");
        println!();
        self.open = false;
    }
}

/// The sample job: banner, arguments, then ten half-second steps.
fn sample_task(args: Vec<String>) -> TaskRef {
    BlockingTaskFn::arc("sample", move |ctx: TaskContext| -> TaskResult {
        ctx.println("Start the main process");
        ctx.println(format!("args: {args:?}"));

        let mut bar = Progress::new(ctx.out(), "Progress", 10);
        for _ in 0..10 {
            if ctx.is_stop_requested() {
                return Ok(Completion::Interrupted);
            }
            std::thread::sleep(Duration::from_millis(500));
            bar.tick();
        }
        bar.finish();
        Ok(Completion::done("Successful completion"))
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    logger_init(&LoggerConfig {
        level: "warn".into(),
        ..LoggerConfig::default()
    })?;
    let stop_early = std::env::args().any(|a| a == "--stop");

    let cfg = Config::default()
        .with_start_notice("Start asynchronous processing")
        .with_stop_notice("Request to suspend processing");
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let (exec, mut presenter) = ExecutorBuilder::new(cfg)
        .with_subscribers(subs)
        .build(Terminal::default());
    let ctl = Controller::new(Arc::new(exec));

    let token = CancellationToken::new();
    let render = tokio::spawn({
        let token = token.clone();
        async move { presenter.run(&token).await }
    });

    let handle = ctl
        .start_requested(sample_task(vec!["sample args".into(), "option".into()]))
        .context("a task is already running")?;

    if stop_early {
        tokio::time::sleep(Duration::from_secs(2)).await;
        ctl.cancel_requested();
    }
    if let ShutdownDecision::Refuse { notice } = ctl.shutdown_requested() {
        tracing::warn!(%notice, "shutdown deferred");
    }

    let outcome = handle.join().await?;
    ctl.executor().await_idle().await;
    tracing::info!(?outcome, "task done");

    token.cancel();
    render.await?;
    Ok(())
}
