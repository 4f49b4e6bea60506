use rand::Rng;

use crate::layers::unit::Unit;
use crate::layers::weight_range::WeightRange;

/// Role of a layer within the three-layer topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Input,
    Hidden,
    Output,
}

/// An ordered group of units. Position `i` is row/column `i` of the implicit
/// weight matrix shared with the neighbouring layers.
#[derive(Debug, Clone)]
pub struct Layer {
    kind: LayerKind,
    units: Vec<Unit>,
}

impl Layer {
    pub fn new(size: usize, kind: LayerKind) -> Layer {
        Layer {
            kind,
            units: vec![Unit::new(); size],
        }
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn unit(&self, index: usize) -> &Unit {
        &self.units[index]
    }

    pub fn unit_mut(&mut self, index: usize) -> &mut Unit {
        &mut self.units[index]
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn units_mut(&mut self) -> &mut [Unit] {
        &mut self.units
    }

    /// Gives every unit `next_layer_size` outgoing weights, each an
    /// independent uniform draw from `range`.
    ///
    /// Never called on the output layer: it has no next layer to send to.
    pub fn initialise_weights<R: Rng + ?Sized>(
        &mut self,
        next_layer_size: usize,
        range: &WeightRange,
        rng: &mut R,
    ) {
        debug_assert_ne!(self.kind, LayerKind::Output);
        for unit in &mut self.units {
            unit.weights = (0..next_layer_size).map(|_| range.sample(rng)).collect();
        }
    }

    /// Draws a starting bias for every unit from `range`.
    pub fn initialise_biases<R: Rng + ?Sized>(&mut self, range: &WeightRange, rng: &mut R) {
        for unit in &mut self.units {
            unit.bias = range.sample(rng);
        }
    }

    /// Clears every accumulator before a forward pass. With `with_bias` the
    /// accumulator starts at the unit's bias instead of zero.
    pub fn reset_accumulators(&mut self, with_bias: bool) {
        for unit in &mut self.units {
            unit.input = if with_bias { unit.bias } else { 0.0 };
        }
    }

    /// `output = sigmoid(input)` for every unit.
    pub fn apply_activation(&mut self) {
        self.units.iter_mut().for_each(Unit::activate);
    }

    /// Output values in layer order.
    pub fn outputs(&self) -> Vec<f64> {
        self.units.iter().map(|u| u.output).collect()
    }

    /// Copy of every unit's outgoing weight vector, one row per unit.
    pub fn weights(&self) -> Vec<Vec<f64>> {
        self.units.iter().map(|u| u.weights.clone()).collect()
    }
}
