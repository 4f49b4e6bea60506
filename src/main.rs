use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ferrite_mlp::data::load_records;
use ferrite_mlp::train::{accuracy, evaluate};
use ferrite_mlp::{train_loop, xor_samples, Network, NetworkConfig, TrainConfig, TrainSettings};

const MNIST_CLASSES: usize = 10;
const MNIST_PIXELS: usize = 784;

#[derive(Parser)]
#[command(name = "ferrite-mlp")]
#[command(about = "Three-layer sigmoid perceptron trained by backpropagation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Learn XOR on the 0.01 / 0.99 encoded truth table
    Xor {
        #[arg(long, default_value = "3")]
        hidden: usize,

        #[arg(long, default_value = "0.3")]
        learning_rate: f64,

        #[arg(long, default_value = "10000")]
        epochs: usize,

        /// Give hidden and output units a trained bias
        #[arg(long)]
        bias: bool,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Train on an MNIST CSV file and report accuracy on a test CSV file
    Mnist {
        #[arg(long)]
        train: String,

        #[arg(long)]
        test: String,

        #[arg(long, default_value = "100")]
        hidden: usize,

        #[arg(long, default_value = "0.3")]
        learning_rate: f64,

        #[arg(long, default_value = "1")]
        epochs: usize,

        /// Seeds both weight initialisation and shuffling
        #[arg(long)]
        seed: Option<u64>,

        /// Network config JSON; overrides --hidden, --learning-rate and --seed
        #[arg(long)]
        network_config: Option<String>,

        /// Training settings JSON; overrides --epochs and --seed
        #[arg(long)]
        train_config: Option<String>,

        /// Write the network config actually used to this JSON file
        #[arg(long)]
        save_config: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = Level::from_str(&cli.log_level)
        .with_context(|| format!("unknown log level '{}'", cli.log_level))?;
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Xor { hidden, learning_rate, epochs, bias, seed } => {
            let mut config = NetworkConfig::new(2, hidden, 1, learning_rate).with_bias(bias);
            config.seed = seed;
            let mut train = TrainConfig::new(epochs, true);
            train.seed = seed;
            run_xor(config, &train)
        }
        Commands::Mnist {
            train,
            test,
            hidden,
            learning_rate,
            epochs,
            seed,
            network_config,
            train_config,
            save_config,
        } => {
            let network = match network_config {
                Some(path) => NetworkConfig::load_json(&path)
                    .with_context(|| format!("loading network config '{path}'"))?,
                None => {
                    let mut config =
                        NetworkConfig::new(MNIST_PIXELS, hidden, MNIST_CLASSES, learning_rate);
                    config.seed = seed;
                    config
                }
            };
            let settings = match train_config {
                Some(path) => TrainSettings::load_json(&path)
                    .with_context(|| format!("loading training settings '{path}'"))?,
                None => TrainSettings { epochs, shuffle: true, seed },
            };
            if let Some(path) = save_config {
                network
                    .save_json(&path)
                    .with_context(|| format!("saving network config '{path}'"))?;
                info!(path = %path, "network config saved");
            }
            run_mnist(&train, &test, network, &TrainConfig::from(&settings))
        }
    }
}

fn run_xor(config: NetworkConfig, train: &TrainConfig) -> Result<()> {
    let mut network = Network::new(config)?;
    let samples = xor_samples();

    let loss = train_loop(&mut network, &samples, train)?;
    info!(loss, "training finished");

    for sample in &samples {
        let output = network.probe(&sample.input)?;
        println!(
            "Input: {:?} -> Output: {:.4} (target {:.2})",
            sample.input, output[0], sample.target[0]
        );
    }
    println!("Mean squared error: {:.6}", evaluate(&mut network, &samples)?);
    Ok(())
}

fn run_mnist(
    train_path: &str,
    test_path: &str,
    config: NetworkConfig,
    train: &TrainConfig,
) -> Result<()> {
    let classes = config.output_size;
    let train_set = load_records(train_path, classes)
        .with_context(|| format!("loading training data '{train_path}'"))?;
    let test_set = load_records(test_path, classes)
        .with_context(|| format!("loading test data '{test_path}'"))?;
    anyhow::ensure!(!train_set.is_empty(), "training data '{train_path}' has no records");
    info!(train = train_set.len(), test = test_set.len(), "data loaded");

    let mut network = Network::new(config)?;
    let loss = train_loop(&mut network, &train_set, train)?;
    info!(loss, "training finished");

    let test_accuracy = accuracy(&mut network, &test_set)?;
    println!("Test accuracy: {:.2}%", test_accuracy * 100.0);
    Ok(())
}
