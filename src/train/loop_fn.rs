use std::sync::atomic::Ordering;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::data::record::Sample;
use crate::error::Result;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_in_order;

/// Epochs between `info`-level progress lines; the rest log at `debug`.
const LOG_EVERY: usize = 1000;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs and returns the mean training
/// loss of the **last completed epoch** (0.0 if no epoch completed or
/// `samples` is empty).
///
/// With `config.seed` set, the shuffle order is drawn from a generator seeded
/// with it, so a seeded network trained with a seeded config is reproducible.
///
/// # Early termination
/// The loop breaks early if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
///
/// # Errors
/// Returns `NetworkError::Shape` from the first sample whose input or target
/// does not fit the network; samples before it have already been trained on.
pub fn train_loop(
    network: &mut Network,
    samples: &[Sample],
    config: &TrainConfig,
) -> Result<f64> {
    if samples.is_empty() {
        warn!("no samples to train on");
        return Ok(0.0);
    }

    let mut last_train_loss = 0.0;
    let mut order: Vec<usize> = (0..samples.len()).collect();
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for epoch in 1..=config.epochs {
        if stop_requested(config) {
            warn!(epoch, "stop flag set, ending training early");
            break;
        }

        let t_start = Instant::now();

        if config.shuffle {
            order.shuffle(&mut rng);
        }
        let train_loss = train_in_order(network, samples, order.iter().copied())?;
        last_train_loss = train_loss;

        let elapsed_ms = t_start.elapsed().as_millis() as u64;
        if is_milestone(epoch, config.epochs) {
            info!(epoch, total = config.epochs, train_loss, elapsed_ms, "epoch complete");
        } else {
            debug!(epoch, total = config.epochs, train_loss, elapsed_ms, "epoch complete");
        }

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            elapsed_ms,
        };

        if let Some(ref tx) = config.progress_tx {
            if tx.send(stats).is_err() {
                warn!(epoch, "progress receiver dropped, ending training early");
                break;
            }
        }
    }

    Ok(last_train_loss)
}

fn is_milestone(epoch: usize, total: usize) -> bool {
    epoch % LOG_EVERY == 0 || epoch == total
}

fn stop_requested(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .map(|flag| flag.load(Ordering::Relaxed))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use std::sync::{mpsc, Arc};

    use crate::data::record::xor_samples;
    use crate::error::NetworkError;
    use crate::network::config::NetworkConfig;

    fn xor_network() -> Network {
        Network::new(NetworkConfig::new(2, 3, 1, 0.3).with_seed(1).with_bias(true)).unwrap()
    }

    #[test]
    fn progress_is_reported_every_epoch() {
        let (tx, rx) = mpsc::channel();
        let config = TrainConfig::new(5, false).with_progress(tx);
        let mut network = xor_network();

        let last = train_loop(&mut network, &xor_samples(), &config).unwrap();
        drop(config);

        let stats: Vec<EpochStats> = rx.iter().collect();
        assert_eq!(stats.len(), 5);
        assert_eq!(stats[0].epoch, 1);
        assert_eq!(stats[4].epoch, 5);
        assert!(stats.iter().all(|s| s.total_epochs == 5));
        assert_eq!(stats[4].train_loss, last);
    }

    #[test]
    fn dropped_receiver_stops_after_first_epoch() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let config = TrainConfig::new(50, false).with_progress(tx);
        let mut network = xor_network();
        let before = network.weights_snapshot();

        train_loop(&mut network, &xor_samples(), &config).unwrap();

        // One epoch ran before the send failed.
        assert_ne!(network.weights_snapshot(), before);
    }

    #[test]
    fn stop_flag_prevents_any_training() {
        let flag = Arc::new(AtomicBool::new(true));
        let config = TrainConfig::new(10, true).with_stop_flag(flag);
        let mut network = xor_network();
        let before = network.weights_snapshot();

        let loss = train_loop(&mut network, &xor_samples(), &config).unwrap();

        assert_eq!(loss, 0.0);
        assert_eq!(network.weights_snapshot(), before);
    }

    #[test]
    fn loss_falls_over_many_epochs() {
        let mut network = xor_network();
        let samples = xor_samples();
        let first = train_loop(&mut network, &samples, &TrainConfig::new(1, false)).unwrap();
        let config = TrainConfig::new(3000, true).with_seed(4);
        let later = train_loop(&mut network, &samples, &config).unwrap();
        assert!(later < first, "loss went from {first} to {later}");
    }

    #[test]
    fn seeded_shuffled_runs_are_reproducible() {
        let samples = xor_samples();
        let run = || {
            let mut network = xor_network();
            let config = TrainConfig::new(50, true).with_seed(7);
            let loss = train_loop(&mut network, &samples, &config).unwrap();
            (loss, network.weights_snapshot())
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn different_shuffle_seeds_diverge() {
        let samples = xor_samples();
        let run = |seed| {
            let mut network = xor_network();
            let config = TrainConfig::new(20, true).with_seed(seed);
            train_loop(&mut network, &samples, &config).unwrap();
            network.weights_snapshot()
        };

        assert_ne!(run(1), run(2));
    }

    #[test]
    fn only_milestone_epochs_log_at_info() {
        let info_lines = (1..=10_000).filter(|&e| is_milestone(e, 10_000)).count();
        assert_eq!(info_lines, 10);
        assert!(is_milestone(7, 7));
        assert!(!is_milestone(999, 10_000));
    }

    #[test]
    fn empty_sample_set_trains_nothing() {
        let mut network = xor_network();
        let before = network.weights_snapshot();

        let loss = train_loop(&mut network, &[], &TrainConfig::new(5, true)).unwrap();

        assert_eq!(loss, 0.0);
        assert_eq!(network.weights_snapshot(), before);
    }

    #[test]
    fn mismatched_sample_surfaces_shape_error() {
        let mut network = xor_network();
        let samples = vec![Sample::new(vec![0.5], vec![0.5])];
        let err = train_loop(&mut network, &samples, &TrainConfig::new(1, false)).unwrap_err();
        assert!(matches!(err, NetworkError::Shape { what: "input", expected: 2, actual: 1 }));
    }
}
