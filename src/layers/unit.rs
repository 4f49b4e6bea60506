use crate::activation::{sigmoid, sigmoid_derivative};

/// A single node of the network.
///
/// Outgoing weights live on the sending unit: `weights[k]` connects this unit
/// to unit `k` of the next layer. Output units have no weights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Unit {
    /// Activated value (raw input value for input units).
    pub output: f64,
    /// Weighted sum accumulated during the forward pass.
    pub input: f64,
    pub weights: Vec<f64>,
    pub bias: f64,
    /// δ from the last backward pass; stale outside of `Network::train`.
    pub error: f64,
}

impl Unit {
    pub fn new() -> Unit {
        Unit::default()
    }

    pub fn activate(&mut self) {
        self.output = sigmoid(self.input);
    }

    /// σ'(input), taken from the stored activated output.
    pub fn output_derivative(&self) -> f64 {
        sigmoid_derivative(self.output)
    }

    /// Adds `value * weights[k]` into `receiver`'s accumulator for every
    /// receiving unit `k`.
    pub fn send_to(&self, receivers: &mut [Unit]) {
        debug_assert_eq!(self.weights.len(), receivers.len());
        for (receiver, weight) in receivers.iter_mut().zip(&self.weights) {
            receiver.input += self.output * weight;
        }
    }
}
