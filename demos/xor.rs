use ferrite_mlp::{xor_samples, MseLoss, Network, NetworkConfig, train_network};

fn main() {
    let mut network = Network::new(NetworkConfig::new(2, 3, 1, 0.3).with_bias(true))
        .expect("valid network configuration");

    let samples = xor_samples();
    let epochs = 10000;

    for epoch in 0..epochs {
        let loss = train_network(&mut network, &samples).expect("samples fit the network");
        if epoch % 1000 == 0 {
            println!("Epoch {epoch}: loss = {loss:.6}");
        }
    }

    for sample in &samples {
        let output = network.probe(&sample.input).expect("input fits the network");
        println!(
            "Input: {:?} -> Output: {:.4} (loss {:.6})",
            sample.input,
            output[0],
            MseLoss::loss(&output, &sample.target)
        );
    }
}
