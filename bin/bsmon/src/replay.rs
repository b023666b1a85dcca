//! Feeds captured events from a JSON-lines source into a monitor service.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::sync::Arc;

use bsmon_primitives::CapturedEvent;
use bsmon_registry::{ChannelSubscriber, LoggingSubscriber, MonitorApi, MonitorService};
use eyre::{Result, WrapErr};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

use crate::cli::ReplayArgs;
use crate::config::MonitorConfig;

const LOG_SUBSCRIBER_ID: &str = "log";
const ECHO_SUBSCRIBER_ID: &str = "echo";

/// Outcome of reading one input source.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReplayStats {
    pub(crate) dispatched: usize,
    pub(crate) skipped: usize,
}

/// Outcome of a full replay run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReplaySummary {
    pub(crate) dispatched: usize,
    pub(crate) skipped: usize,
    /// Events that reached the echo consumer.
    pub(crate) delivered: usize,
    /// Events the echo subscriber dropped on a full queue.
    pub(crate) dropped: u64,
}

pub(crate) async fn run(args: ReplayArgs, config: MonitorConfig) -> Result<()> {
    let (summary, _) = replay(&args, &config, tokio::io::stdout()).await?;

    info!(
        dispatched = summary.dispatched,
        skipped = summary.skipped,
        delivered = summary.delivered,
        dropped = summary.dropped,
        "Replay finished"
    );
    if summary.dropped > 0 {
        warn!(
            dropped = summary.dropped,
            overflow = %config.dispatch.channel_overflow,
            "Echo subscriber lost events"
        );
    }
    Ok(())
}

/// Replay the input named by `args` and write echoed events to `out`.
///
/// Dispatch runs on a blocking thread so the echo subscriber may wait for
/// queue space while the consumer task drains it. Returns `out` once the
/// consumer has seen every queued event.
pub(crate) async fn replay<W>(
    args: &ReplayArgs,
    config: &MonitorConfig,
    out: W,
) -> Result<(ReplaySummary, W)>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    let input = args
        .input
        .as_deref()
        .map(|path| {
            File::open(path).wrap_err_with(|| format!("failed to open input {}", path.display()))
        })
        .transpose()?;

    let service = MonitorService::new(&config.dispatch);
    info!(
        strategy = %config.dispatch.strategy,
        overflow = %config.dispatch.channel_overflow,
        "Starting replay"
    );

    service.subscribe(Arc::new(LoggingSubscriber::new(LOG_SUBSCRIBER_ID)))?;

    let (echo, rx) = ChannelSubscriber::from_config(ECHO_SUBSCRIBER_ID, &config.dispatch);
    let echo = Arc::new(echo);
    service.subscribe(echo.clone())?;

    let consumer = tokio::spawn(consume(rx, out, args.echo));

    let replay_service = service.clone();
    let stats = tokio::task::spawn_blocking(move || match input {
        Some(file) => replay_reader(&replay_service, BufReader::new(file)),
        None => replay_reader(&replay_service, io::stdin().lock()),
    })
    .await??;

    // The registry and `echo` hold the only senders; releasing both ends the
    // consumer loop.
    service.unsubscribe(echo.as_ref());
    let dropped = echo.dropped();
    drop(echo);
    let (delivered, out) = consumer.await??;

    let summary = ReplaySummary {
        dispatched: stats.dispatched,
        skipped: stats.skipped,
        delivered,
        dropped,
    };
    Ok((summary, out))
}

async fn consume<W>(
    mut rx: tokio::sync::mpsc::Receiver<CapturedEvent>,
    mut out: W,
    write_events: bool,
) -> Result<(usize, W)>
where
    W: AsyncWrite + Unpin,
{
    let mut delivered = 0usize;
    while let Some(captured) = rx.recv().await {
        delivered += 1;
        if write_events {
            let mut line = serde_json::to_vec(&captured)?;
            line.push(b'\n');
            out.write_all(&line).await?;
        }
    }
    out.flush().await?;
    Ok((delivered, out))
}

/// Dispatch every parseable line of `reader`. Blank lines and lines starting
/// with `#` are ignored; malformed lines are logged and skipped.
pub(crate) fn replay_reader(service: &MonitorService, reader: impl BufRead) -> Result<ReplayStats> {
    let mut stats = ReplayStats::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line.wrap_err("failed to read input")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match serde_json::from_str::<CapturedEvent>(line) {
            Ok(captured) => {
                service.dispatch(&captured);
                stats.dispatched += 1;
            }
            Err(err) => {
                warn!(line = index + 1, %err, "Skipping malformed event");
                stats.skipped += 1;
            }
        }
    }

    Ok(stats)
}
