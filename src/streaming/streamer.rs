//! The background task that feeds synthetic transactions into the session.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use rand::{Rng, SeedableRng, rngs::StdRng};
use tokio::{task::JoinHandle, time::MissedTickBehavior};

use crate::{
    AppConfig, Error,
    app_state::{Session, lock},
    generator::generate_transaction,
    transaction::Transaction,
};

/// Owns the generator task while streaming is switched on.
#[derive(Debug, Default)]
pub struct Streamer {
    task: Option<JoinHandle<()>>,
    period: Duration,
}

impl Streamer {
    /// Create a [Streamer] that is not streaming.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the generator task is running.
    pub fn is_streaming(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// How often the running generator task ticks, or `None` when stopped.
    pub fn period(&self) -> Option<Duration> {
        self.is_streaming().then_some(self.period)
    }

    /// Spawn the generator task, replacing any task that is already running.
    ///
    /// One transaction is generated straight away and then another every
    /// `period`. Must be called from within a tokio runtime.
    pub fn start(&mut self, session: Arc<Mutex<Session>>, config: Arc<AppConfig>, period: Duration) {
        self.stop();

        tracing::info!("Starting transaction stream every {period:?}");
        self.period = period;
        self.task = Some(tokio::spawn(async move {
            let mut rng = StdRng::from_entropy();
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;

                match stream_tick(&session, &config, &mut rng) {
                    Ok(transaction) => tracing::debug!(
                        "Generated {} of {} for {}",
                        transaction.type_,
                        transaction.amount,
                        transaction.category
                    ),
                    Err(Error::StateLockError) => {
                        tracing::error!("Stopping transaction stream, the session lock is poisoned");
                        break;
                    }
                    Err(error) => tracing::error!("Could not record generated transaction: {error}"),
                }
            }
        }));
    }

    /// Abort the generator task if it is running.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            tracing::info!("Stopping transaction stream");
            task.abort();
        }
    }

    /// Restart the generator task with a new `period` if it is running.
    pub fn restart_if_streaming(
        &mut self,
        session: Arc<Mutex<Session>>,
        config: Arc<AppConfig>,
        period: Duration,
    ) {
        if self.is_streaming() {
            self.start(session, config, period);
        }
    }
}

impl Drop for Streamer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Generate one transaction and record it in `session`.
///
/// The transaction is kept even if writing the CSV file fails.
pub(crate) fn stream_tick<R: Rng + ?Sized>(
    session: &Mutex<Session>,
    config: &AppConfig,
    rng: &mut R,
) -> Result<Transaction, Error> {
    let now = config.local_now()?;
    let transaction = generate_transaction(rng, now);

    let mut session = lock(session)?;
    session.record(transaction.clone(), &config.csv_path)?;

    Ok(transaction)
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };

    use rand::{SeedableRng, rngs::StdRng};

    use crate::{
        AppConfig,
        app_state::Session,
        streaming::StreamingSettings,
        test_utils::{TempDir, temp_dir},
    };

    use super::{Streamer, stream_tick};

    fn test_config(dir: &TempDir) -> AppConfig {
        AppConfig::new(
            dir.path().join("visuals"),
            dir.path().join("data").join("historical_data.csv"),
            "Etc/UTC",
        )
        .unwrap()
    }

    #[test]
    fn stream_tick_appends_one_transaction() {
        let dir = temp_dir("stream_tick_appends");
        let config = test_config(&dir);
        let session = Mutex::new(Session::default());
        let mut rng = StdRng::seed_from_u64(3);

        stream_tick(&session, &config, &mut rng).unwrap();
        stream_tick(&session, &config, &mut rng).unwrap();

        assert_eq!(session.lock().unwrap().ledger.len(), 2);
        assert!(!config.csv_path.exists());
    }

    #[test]
    fn stream_tick_persists_when_enabled() {
        let dir = temp_dir("stream_tick_persists");
        let config = test_config(&dir);
        let session = Mutex::new(Session {
            settings: StreamingSettings {
                persist: true,
                ..Default::default()
            },
            ..Default::default()
        });
        let mut rng = StdRng::seed_from_u64(3);

        stream_tick(&session, &config, &mut rng).unwrap();

        let text = std::fs::read_to_string(&config.csv_path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[tokio::test]
    async fn start_generates_immediately_and_stop_ends_stream() {
        let dir = temp_dir("streamer_start_stop");
        let config = Arc::new(test_config(&dir));
        let session = Arc::new(Mutex::new(Session::default()));
        let mut streamer = Streamer::new();

        streamer.start(session.clone(), config, Duration::from_secs(60));
        assert!(streamer.is_streaming());
        assert_eq!(streamer.period(), Some(Duration::from_secs(60)));

        tokio::time::sleep(Duration::from_millis(100)).await;
        streamer.stop();

        assert!(!streamer.is_streaming());
        assert_eq!(streamer.period(), None);
        assert_eq!(session.lock().unwrap().ledger.len(), 1);
    }

    #[tokio::test]
    async fn restart_does_nothing_when_stopped() {
        let dir = temp_dir("streamer_restart_stopped");
        let config = Arc::new(test_config(&dir));
        let session = Arc::new(Mutex::new(Session::default()));
        let mut streamer = Streamer::new();

        streamer.restart_if_streaming(session.clone(), config, Duration::from_secs(1));
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(!streamer.is_streaming());
        assert!(session.lock().unwrap().ledger.is_empty());
    }
}
