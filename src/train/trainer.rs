use crate::{
    data::record::Sample,
    error::Result,
    layers::layer::LayerKind,
    loss::mse::MseLoss,
    network::network::Network,
};

/// One online pass over `samples` in the given order.
///
/// Returns the mean squared error of the outputs each sample produced on its
/// own forward pass, i.e. before that sample's weight update.
pub fn train_network(network: &mut Network, samples: &[Sample]) -> Result<f64> {
    train_in_order(network, samples, 0..samples.len())
}

pub(crate) fn train_in_order<I>(network: &mut Network, samples: &[Sample], order: I) -> Result<f64>
where
    I: IntoIterator<Item = usize>,
{
    let mut total_loss = 0.0;
    let mut count = 0usize;

    for idx in order {
        let sample = &samples[idx];
        network.train(&sample.input, &sample.target)?;

        // Backprop leaves the forward-pass outputs in place.
        let output = network.layer(LayerKind::Output).outputs();
        total_loss += MseLoss::loss(&output, &sample.target);
        count += 1;
    }

    if count == 0 {
        return Ok(0.0);
    }
    Ok(total_loss / count as f64)
}
