use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use serde::{Serialize, Deserialize};

use crate::error::DataError;
use crate::train::epoch_stats::EpochStats;

/// The plain, file-backed part of a training run's configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainSettings {
    #[serde(default = "default_epochs")]
    pub epochs: usize,
    /// Visit the samples in a fresh random order every epoch.
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
    /// Seeds the shuffle order; `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_epochs() -> usize {
    1
}

fn default_shuffle() -> bool {
    true
}

impl Default for TrainSettings {
    fn default() -> Self {
        TrainSettings { epochs: default_epochs(), shuffle: default_shuffle(), seed: None }
    }
}

impl TrainSettings {
    /// Deserializes training settings from a JSON file; missing fields take
    /// their defaults.
    pub fn load_json(path: &str) -> Result<TrainSettings, DataError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`      — total number of full passes over the training data
/// - `shuffle`     — reorder samples randomly at the start of each epoch
/// - `seed`        — seeds the shuffle generator so a run can be repeated
/// - `progress_tx` — optional channel sender; one `EpochStats` is sent per
///                   completed epoch.  If the receiver is dropped the loop
///                   terminates early.
/// - `stop_flag`   — optional atomic flag; when set to `true` from another
///                   thread the loop terminates after the current epoch.
pub struct TrainConfig {
    pub epochs: usize,
    pub shuffle: bool,
    pub seed: Option<u64>,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with no seed, no progress channel and
    /// no stop flag.
    pub fn new(epochs: usize, shuffle: bool) -> Self {
        TrainConfig {
            epochs,
            shuffle,
            seed: None,
            progress_tx: None,
            stop_flag: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }
}

impl From<&TrainSettings> for TrainConfig {
    fn from(settings: &TrainSettings) -> Self {
        TrainConfig {
            seed: settings.seed,
            ..TrainConfig::new(settings.epochs, settings.shuffle)
        }
    }
}
