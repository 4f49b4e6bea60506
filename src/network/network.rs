use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::{NetworkError, Result};
use crate::layers::layer::{Layer, LayerKind};
use crate::network::config::NetworkConfig;

/// Three-layer sigmoid perceptron trained one sample at a time.
///
/// Weights are stored on the sending units: input units carry one weight per
/// hidden unit, hidden units one weight per output unit. Both `train` and
/// `probe` take `&mut self` because every pass rewrites the units'
/// accumulators and outputs.
#[derive(Debug, Clone)]
pub struct Network {
    input: Layer,
    hidden: Layer,
    output: Layer,
    learning_rate: f64,
    bias: bool,
}

impl Network {
    /// Builds a network with weights drawn from a generator seeded by
    /// `config.seed`, or from OS entropy when no seed is given.
    pub fn new(config: NetworkConfig) -> Result<Network> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Network::with_rng(config, &mut rng)
    }

    /// Builds a network drawing its initial weights from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(config: NetworkConfig, rng: &mut R) -> Result<Network> {
        config.validate()?;

        let range = config.weight_range;
        let mut input = Layer::new(config.input_size, LayerKind::Input);
        input.initialise_weights(config.hidden_size, &range, rng);

        let mut hidden = Layer::new(config.hidden_size, LayerKind::Hidden);
        hidden.initialise_weights(config.output_size, &range, rng);

        let mut output = Layer::new(config.output_size, LayerKind::Output);

        if config.bias {
            hidden.initialise_biases(&range, rng);
            output.initialise_biases(&range, rng);
        }

        debug!(
            input = config.input_size,
            hidden = config.hidden_size,
            output = config.output_size,
            learning_rate = config.learning_rate,
            bias = config.bias,
            seed = ?config.seed,
            "network initialised"
        );

        Ok(Network {
            input,
            hidden,
            output,
            learning_rate: config.learning_rate,
            bias: config.bias,
        })
    }

    pub fn input_size(&self) -> usize {
        self.input.len()
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden.len()
    }

    pub fn output_size(&self) -> usize {
        self.output.len()
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn has_bias(&self) -> bool {
        self.bias
    }

    pub fn layer(&self, kind: LayerKind) -> &Layer {
        match kind {
            LayerKind::Input => &self.input,
            LayerKind::Hidden => &self.hidden,
            LayerKind::Output => &self.output,
        }
    }

    /// Copies of the input→hidden and hidden→output weight matrices, one row
    /// per sending unit.
    pub fn weights_snapshot(&self) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        (self.input.weights(), self.hidden.weights())
    }

    /// Forward pass; leaves the activations in the units.
    pub fn forward(&mut self, inputs: &[f64]) -> Result<()> {
        check_shape("input", self.input_size(), inputs)?;
        self.propagate(inputs);
        Ok(())
    }

    /// Forward pass only; returns the output layer's values in order.
    /// Weights are never touched.
    pub fn probe(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        self.forward(inputs)?;
        Ok(self.output.outputs())
    }

    /// One step of online gradient descent on `0.5 * Σ (target - output)²`.
    ///
    /// Both vectors are checked before anything is mutated, so a
    /// `NetworkError::Shape` leaves the network exactly as it was.
    pub fn train(&mut self, inputs: &[f64], target: &[f64]) -> Result<()> {
        check_shape("input", self.input_size(), inputs)?;
        check_shape("target", self.output_size(), target)?;

        self.propagate(inputs);
        self.back_propagate(target);
        Ok(())
    }

    /// `train` for single-output networks.
    pub fn train_scalar(&mut self, inputs: &[f64], target: f64) -> Result<()> {
        self.train(inputs, &[target])
    }

    fn propagate(&mut self, inputs: &[f64]) {
        for (unit, &value) in self.input.units_mut().iter_mut().zip(inputs) {
            unit.output = value;
        }
        feed_forward(&self.input, &mut self.hidden, self.bias);
        feed_forward(&self.hidden, &mut self.output, self.bias);
    }

    fn back_propagate(&mut self, target: &[f64]) {
        for (unit, &expected) in self.output.units_mut().iter_mut().zip(target) {
            unit.error = (expected - unit.output) * unit.output_derivative();
        }

        // Pull the output errors back through the weights as they stood
        // during the forward pass; the update below must come after this.
        let output_units = self.output.units();
        for unit in self.hidden.units_mut() {
            let pulled_back: f64 = unit
                .weights
                .iter()
                .zip(output_units)
                .map(|(weight, receiver)| weight * receiver.error)
                .sum();
            unit.error = pulled_back * unit.output_derivative();
        }

        let lr = self.learning_rate;
        adjust_weights(&mut self.hidden, &self.output, lr);
        adjust_weights(&mut self.input, &self.hidden, lr);

        if self.bias {
            adjust_biases(&mut self.output, lr);
            adjust_biases(&mut self.hidden, lr);
        }
    }
}

fn check_shape(what: &'static str, expected: usize, values: &[f64]) -> Result<()> {
    if values.len() != expected {
        return Err(NetworkError::Shape {
            what,
            expected,
            actual: values.len(),
        });
    }
    Ok(())
}

/// Resets `receiving`, accumulates every sending unit's weighted output into
/// it and activates it.
fn feed_forward(sending: &Layer, receiving: &mut Layer, with_bias: bool) {
    receiving.reset_accumulators(with_bias);
    for unit in sending.units() {
        unit.send_to(receiving.units_mut());
    }
    receiving.apply_activation();
}

/// `w[k] += lr * δ_k * output` for every weight leaving `sending`.
fn adjust_weights(sending: &mut Layer, receiving: &Layer, lr: f64) {
    for unit in sending.units_mut() {
        let output = unit.output;
        for (weight, receiver) in unit.weights.iter_mut().zip(receiving.units()) {
            *weight += lr * receiver.error * output;
        }
    }
}

fn adjust_biases(layer: &mut Layer, lr: f64) {
    for unit in layer.units_mut() {
        unit.bias += lr * unit.error;
    }
}
