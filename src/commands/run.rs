use crate::args::RunArgs;
use crate::commands::Out;
use crate::event::{parse_session, Applied, Event};
use crate::render::{render, Format};
use crate::store::Store;
use crate::{utils, Config, Result};
use anyhow::Context;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;
use tracing::{debug, info};

/// What a session did.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct RunSummary {
    /// Number of events applied.
    pub events: usize,
    /// Number of expenses added.
    pub expenses: usize,
    /// Number of expenses visible at the end.
    pub visible: usize,
    /// Total of the visible expenses at the end.
    pub total: Decimal,
    /// Number of views printed.
    pub snapshots: usize,
}

/// Replays a session read from a file, or stdin, and prints views of the result to stdout.
///
/// # Errors
/// - Returns an error if the session cannot be read or contains an invalid event. In that case
///   no event is applied.
/// - Returns an error if writing to stdout fails.
pub async fn run(config: &Config, args: &RunArgs) -> Result<Out<RunSummary>> {
    let text = match args.session() {
        Some(path) => utils::read(path).await?,
        None => {
            debug!("Reading session from stdin");
            utils::read_stdin().await?
        }
    };
    let events = parse_session(&text)?;
    let format = args.format().unwrap_or_else(|| config.format());
    let mut store = config.store();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = run_session(&mut store, events, format, args.each(), &mut out)?;
    out.flush().context("Unable to flush stdout")?;

    let message = format!(
        "Replayed {} events: {} expenses, {} shown",
        summary.events, summary.expenses, summary.visible
    );
    Ok(Out::new(message, summary))
}

/// Applies `events` to `store` in order, writing a view to `out` on every `view` event, after
/// every change when `each` is set, and at the end unless the last view written is current.
pub fn run_session(
    store: &mut Store,
    events: Vec<Event>,
    format: Format,
    each: bool,
    out: &mut impl Write,
) -> Result<RunSummary> {
    let event_count = events.len();
    let mut snapshots = 0;
    let mut stale = true;

    for event in events {
        let show = match event.apply(store) {
            Applied::Snapshot => true,
            Applied::Added(id) => {
                info!("Added expense {id}");
                stale = true;
                each
            }
            Applied::Changed => {
                stale = true;
                each
            }
        };
        if show {
            write_snapshot(store, format, snapshots, out)?;
            snapshots += 1;
            stale = false;
        }
    }

    if stale {
        write_snapshot(store, format, snapshots, out)?;
        snapshots += 1;
    }

    let view = store.view();
    Ok(RunSummary {
        events: event_count,
        expenses: store.len(),
        visible: view.records().len(),
        total: view.total(),
        snapshots,
    })
}

fn write_snapshot(
    store: &Store,
    format: Format,
    written: usize,
    out: &mut impl Write,
) -> Result<()> {
    if written > 0 && format == Format::Table {
        writeln!(out).context("Unable to write output")?;
    }
    render(&store.view(), format, out)
}
