//! Implements a struct that holds the state of the server.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use time::{OffsetDateTime, PrimitiveDateTime};

use crate::{
    Error,
    export::write_csv,
    ledger::Ledger,
    streaming::{Streamer, StreamingSettings},
    timezone::get_local_offset,
    transaction::Transaction,
};

/// Settings fixed at start up.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// The directory analysis charts are written to.
    pub output_dir: PathBuf,
    /// The file the transaction table is written to when persistence is on.
    pub csv_path: PathBuf,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl AppConfig {
    /// Create a new [AppConfig].
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a
    /// canonical timezone name.
    pub fn new(
        output_dir: impl Into<PathBuf>,
        csv_path: impl Into<PathBuf>,
        local_timezone: &str,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            output_dir: output_dir.into(),
            csv_path: csv_path.into(),
            local_timezone: local_timezone.to_owned(),
        })
    }

    /// The current date and time in the configured timezone.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if the timezone cannot be resolved.
    pub fn local_now(&self) -> Result<PrimitiveDateTime, Error> {
        let offset = get_local_offset(&self.local_timezone).ok_or_else(|| {
            tracing::error!("Invalid timezone {}", self.local_timezone);
            Error::InvalidTimezoneError(self.local_timezone.clone())
        })?;

        let now = OffsetDateTime::now_utc().to_offset(offset);

        Ok(PrimitiveDateTime::new(now.date(), now.time()))
    }
}

/// The transactions and settings for the running dashboard session.
#[derive(Debug, Default)]
pub struct Session {
    /// Every transaction recorded so far.
    pub ledger: Ledger,
    /// The user controlled streaming settings.
    pub settings: StreamingSettings,
}

impl Session {
    /// Append `transaction` to the ledger.
    ///
    /// If persistence is enabled the whole ledger is written to `csv_path`.
    ///
    /// # Errors
    /// Returns an error if the CSV file could not be written. The transaction
    /// is still recorded.
    pub fn record(&mut self, transaction: Transaction, csv_path: &Path) -> Result<(), Error> {
        self.ledger.push(transaction);

        if self.settings.persist {
            write_csv(self.ledger.transactions(), csv_path)?;
        }

        Ok(())
    }
}

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Settings fixed at start up.
    pub config: Arc<AppConfig>,
    /// The transaction table and streaming settings.
    pub session: Arc<Mutex<Session>>,
    /// The background task that generates transactions.
    pub streamer: Arc<Mutex<Streamer>>,
}

impl AppState {
    /// Create a new [AppState] with an empty session.
    pub fn new(config: AppConfig, settings: StreamingSettings) -> Self {
        Self {
            config: Arc::new(config),
            session: Arc::new(Mutex::new(Session {
                ledger: Ledger::new(),
                settings,
            })),
            streamer: Arc::new(Mutex::new(Streamer::new())),
        }
    }

    /// Acquire the session lock.
    ///
    /// # Errors
    /// Returns [Error::StateLockError] if the lock is poisoned.
    pub fn lock_session(&self) -> Result<MutexGuard<'_, Session>, Error> {
        lock(&self.session)
    }

    /// Acquire the streamer lock.
    ///
    /// # Errors
    /// Returns [Error::StateLockError] if the lock is poisoned.
    pub fn lock_streamer(&self) -> Result<MutexGuard<'_, Streamer>, Error> {
        lock(&self.streamer)
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, Error> {
    mutex.lock().map_err(|error| {
        tracing::error!("could not acquire state lock: {error}");
        Error::StateLockError
    })
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{
        Error,
        app_state::{AppConfig, Session},
        streaming::StreamingSettings,
        test_utils::temp_dir,
        transaction::{Transaction, TransactionType},
    };

    #[test]
    fn config_rejects_invalid_timezone() {
        let result = AppConfig::new("visuals", "data/historical_data.csv", "Not/AZone");

        assert_eq!(
            result.err(),
            Some(Error::InvalidTimezoneError("Not/AZone".to_owned()))
        );
    }

    #[test]
    fn session_record_writes_csv_when_persisting() {
        let dir = temp_dir("session_record_persist");
        let csv_path = dir.path().join("data").join("historical_data.csv");
        let mut session = Session {
            settings: StreamingSettings {
                persist: true,
                ..Default::default()
            },
            ..Default::default()
        };

        let transaction =
            Transaction::build(100.0, datetime!(2025-01-01 08:00), TransactionType::Income)
                .category("Salary")
                .finalise();
        session.record(transaction, &csv_path).unwrap();

        assert_eq!(session.ledger.len(), 1);
        assert!(csv_path.is_file());
    }

    #[test]
    fn session_record_skips_csv_when_not_persisting() {
        let dir = temp_dir("session_record_no_persist");
        let csv_path = dir.path().join("historical_data.csv");
        let mut session = Session::default();

        let transaction =
            Transaction::build(100.0, datetime!(2025-01-01 08:00), TransactionType::Income)
                .finalise();
        session.record(transaction, &csv_path).unwrap();

        assert_eq!(session.ledger.len(), 1);
        assert!(!csv_path.exists());
    }

    #[test]
    fn session_record_keeps_transaction_when_csv_write_fails() {
        let dir = temp_dir("session_record_write_fails");
        let not_a_directory = dir.path().join("data");
        std::fs::write(&not_a_directory, "").unwrap();
        let csv_path = not_a_directory.join("historical_data.csv");
        let mut session = Session {
            settings: StreamingSettings {
                persist: true,
                ..Default::default()
            },
            ..Default::default()
        };

        let transaction =
            Transaction::build(100.0, datetime!(2025-01-01 08:00), TransactionType::Income)
                .finalise();
        let result = session.record(transaction, &csv_path);

        assert!(matches!(result, Err(Error::IoError(_))), "got {result:?}");
        assert_eq!(session.ledger.len(), 1);
    }
}
