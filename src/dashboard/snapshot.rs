//! A point-in-time copy of everything the dashboard displays.

use std::{path::Path, time::UNIX_EPOCH};

use time::Date;

use crate::{
    AppState, Error,
    analysis::{ChartKind, chart_path},
    ledger::{RECENT_TRANSACTIONS_LIMIT, Summary},
    streaming::StreamingSettings,
    transaction::Transaction,
};

/// An analysis chart and whether it has been generated.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ChartFile {
    pub kind: ChartKind,
    /// The modification time of the chart file in seconds since the Unix
    /// epoch, or `None` if the file does not exist. Used to stop browsers
    /// showing a stale chart after analysis is re-run.
    pub version: Option<u64>,
}

/// The data needed to render the dashboard.
///
/// The session lock is only held while the snapshot is taken, not while
/// rendering.
#[derive(Debug, Clone)]
pub(super) struct DashboardSnapshot {
    pub summary: Summary,
    /// The most recent transactions, newest date first.
    pub recent: Vec<Transaction>,
    pub settings: StreamingSettings,
    pub is_streaming: bool,
    /// Today's date in the local timezone.
    pub today: Date,
    pub charts: Vec<ChartFile>,
}

impl DashboardSnapshot {
    /// Take a snapshot of `state`.
    ///
    /// # Errors
    /// Returns [Error::StateLockError] if a lock is poisoned, or
    /// [Error::InvalidTimezoneError] if the local date cannot be determined.
    pub fn take(state: &AppState) -> Result<Self, Error> {
        let today = state.config.local_now()?.date();
        let is_streaming = state.lock_streamer()?.is_streaming();

        let (summary, recent, settings) = {
            let session = state.lock_session()?;
            let recent = session
                .ledger
                .recent(RECENT_TRANSACTIONS_LIMIT)
                .into_iter()
                .cloned()
                .collect();

            (session.ledger.summary(), recent, session.settings)
        };

        Ok(Self {
            summary,
            recent,
            settings,
            is_streaming,
            today,
            charts: chart_files(&state.config.output_dir),
        })
    }
}

fn chart_files(output_dir: &Path) -> Vec<ChartFile> {
    ChartKind::ALL
        .iter()
        .map(|&kind| ChartFile {
            kind,
            version: file_version(&chart_path(output_dir, kind)),
        })
        .collect()
}

fn file_version(path: &Path) -> Option<u64> {
    let metadata = std::fs::metadata(path).ok()?;

    if !metadata.is_file() {
        return None;
    }

    let version = metadata
        .modified()
        .ok()
        .and_then(|modified| modified.duration_since(UNIX_EPOCH).ok())
        .map(|duration| duration.as_secs())
        .unwrap_or_default();

    Some(version)
}
