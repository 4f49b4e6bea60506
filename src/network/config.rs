use serde::{Deserialize, Serialize};

use crate::error::{DataError, NetworkError};

pub use crate::layers::weight_range::WeightRange;

/// Everything needed to build a [`Network`](crate::Network).
///
/// Can be saved to / loaded from JSON so a run can be reproduced from a file:
///
/// ```json
/// { "input_size": 784, "hidden_size": 100, "output_size": 10,
///   "learning_rate": 0.3, "seed": 1 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
    pub learning_rate: f64,
    #[serde(default)]
    pub weight_range: WeightRange,
    /// Adds a trained bias to every hidden and output unit.
    #[serde(default)]
    pub bias: bool,
    /// Seeds the weight initialisation; `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl NetworkConfig {
    pub fn new(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        learning_rate: f64,
    ) -> NetworkConfig {
        NetworkConfig {
            input_size,
            hidden_size,
            output_size,
            learning_rate,
            weight_range: WeightRange::default(),
            bias: false,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> NetworkConfig {
        self.seed = Some(seed);
        self
    }

    pub fn with_bias(mut self, bias: bool) -> NetworkConfig {
        self.bias = bias;
        self
    }

    pub fn with_weight_range(mut self, range: WeightRange) -> NetworkConfig {
        self.weight_range = range;
        self
    }

    /// Rejects zero layer sizes, non-positive or non-finite learning rates and
    /// empty weight ranges.
    pub fn validate(&self) -> Result<(), NetworkError> {
        for (name, size) in [
            ("input_size", self.input_size),
            ("hidden_size", self.hidden_size),
            ("output_size", self.output_size),
        ] {
            if size == 0 {
                return Err(NetworkError::Configuration(format!(
                    "{name} must be greater than zero"
                )));
            }
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(NetworkError::Configuration(format!(
                "learning_rate must be a positive finite number, got {}",
                self.learning_rate
            )));
        }
        let WeightRange { low, high } = self.weight_range;
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(NetworkError::Configuration(format!(
                "weight_range [{low}, {high}) is empty or not finite"
            )));
        }
        Ok(())
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<(), DataError> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a config from a JSON file. The result is not validated;
    /// `Network::new` does that.
    pub fn load_json(path: &str) -> Result<NetworkConfig, DataError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_sane_config() {
        assert!(NetworkConfig::new(2, 3, 1, 0.3).validate().is_ok());
    }

    #[test]
    fn rejects_zero_sized_layers() {
        for config in [
            NetworkConfig::new(0, 3, 1, 0.3),
            NetworkConfig::new(2, 0, 1, 0.3),
            NetworkConfig::new(2, 3, 0, 0.3),
        ] {
            assert!(matches!(config.validate(), Err(NetworkError::Configuration(_))));
        }
    }

    #[test]
    fn rejects_bad_learning_rates() {
        for lr in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let config = NetworkConfig::new(2, 3, 1, lr);
            assert!(
                matches!(config.validate(), Err(NetworkError::Configuration(_))),
                "learning rate {lr} was accepted"
            );
        }
    }

    #[test]
    fn rejects_empty_weight_range() {
        let config =
            NetworkConfig::new(2, 3, 1, 0.3).with_weight_range(WeightRange::new(0.5, 0.5));
        assert!(config.validate().is_err());
    }

    #[test]
    fn optional_fields_default_when_missing_from_json() {
        let json = r#"{
            "input_size": 4, "hidden_size": 5, "output_size": 2, "learning_rate": 0.1
        }"#;
        let config: NetworkConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config, NetworkConfig::new(4, 5, 2, 0.1));
    }

    #[test]
    fn json_file_round_trip() {
        let path = std::env::temp_dir()
            .join(format!("ferrite-mlp-config-{}.json", std::process::id()));
        let path = path.to_str().unwrap();
        let config = NetworkConfig::new(784, 100, 10, 0.3).with_seed(9).with_bias(true);

        config.save_json(path).unwrap();
        let loaded = NetworkConfig::load_json(path).unwrap();
        std::fs::remove_file(path).ok();

        assert_eq!(loaded, config);
    }
}
