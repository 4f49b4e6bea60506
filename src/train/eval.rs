use crate::{data::record::Sample, error::Result, loss::mse::MseLoss, network::network::Network};

/// Mean squared error over a dataset without touching the weights.
pub fn evaluate(network: &mut Network, samples: &[Sample]) -> Result<f64> {
    if samples.is_empty() {
        return Ok(0.0);
    }
    let mut total = 0.0;
    for sample in samples {
        let output = network.probe(&sample.input)?;
        total += MseLoss::loss(&output, &sample.target);
    }
    Ok(total / samples.len() as f64)
}

/// Fraction of samples whose strongest output matches the strongest target.
pub fn accuracy(network: &mut Network, samples: &[Sample]) -> Result<f64> {
    if samples.is_empty() {
        return Ok(0.0);
    }
    let mut correct = 0usize;
    for sample in samples {
        let output = network.probe(&sample.input)?;
        if argmax(&output) == argmax(&sample.target) {
            correct += 1;
        }
    }
    Ok(correct as f64 / samples.len() as f64)
}

/// Index of the maximum element in a slice.
pub fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::config::NetworkConfig;

    fn two_class_network() -> Network {
        Network::new(NetworkConfig::new(2, 3, 2, 0.3).with_seed(21)).unwrap()
    }

    /// A soft one-hot target that agrees (or not) with the network's current
    /// strongest output for `input`.
    fn labelled(network: &mut Network, input: Vec<f64>, agree: bool) -> Sample {
        let predicted = argmax(&network.probe(&input).unwrap());
        let class = if agree { predicted } else { 1 - predicted };
        let mut target = vec![0.01; 2];
        target[class] = 0.99;
        Sample::new(input, target)
    }

    #[test]
    fn accuracy_counts_argmax_matches() {
        let mut network = two_class_network();
        let samples = vec![
            labelled(&mut network, vec![0.01, 0.01], true),
            labelled(&mut network, vec![0.99, 0.01], true),
            labelled(&mut network, vec![0.01, 0.99], false),
            labelled(&mut network, vec![0.99, 0.99], true),
        ];

        assert_eq!(accuracy(&mut network, &samples).unwrap(), 0.75);
        assert_eq!(accuracy(&mut network, &samples[2..3]).unwrap(), 0.0);
        assert_eq!(accuracy(&mut network, &samples[..2]).unwrap(), 1.0);
    }

    #[test]
    fn accuracy_of_nothing_is_zero() {
        let mut network = two_class_network();
        assert_eq!(accuracy(&mut network, &[]).unwrap(), 0.0);
    }

    #[test]
    fn accuracy_surfaces_shape_errors() {
        let mut network = two_class_network();
        let samples = vec![Sample::new(vec![0.5; 3], vec![0.99, 0.01])];
        assert!(accuracy(&mut network, &samples).is_err());
    }

    #[test]
    fn evaluate_averages_per_sample_mse() {
        let mut network = two_class_network();
        let a = Sample::new(vec![0.2, 0.8], vec![0.99, 0.01]);
        let b = Sample::new(vec![0.6, 0.1], vec![0.01, 0.99]);

        let loss_a = MseLoss::loss(&network.probe(&a.input).unwrap(), &a.target);
        let loss_b = MseLoss::loss(&network.probe(&b.input).unwrap(), &b.target);
        let mean = evaluate(&mut network, &[a, b]).unwrap();

        assert!((mean - (loss_a + loss_b) / 2.0).abs() < 1e-15);
        assert_eq!(evaluate(&mut network, &[]).unwrap(), 0.0);
    }

    #[test]
    fn argmax_picks_largest() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), 1);
        assert_eq!(argmax(&[0.9]), 0);
        assert_eq!(argmax(&[]), 0);
    }
}
