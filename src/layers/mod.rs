pub mod layer;
pub mod unit;
pub mod weight_range;

pub use layer::{Layer, LayerKind};
pub use unit::Unit;
pub use weight_range::WeightRange;
