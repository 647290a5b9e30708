use dense_nn::{evaluate, train, zero_or_one, Network, TrainConfig};

fn main() -> dense_nn::Result<()> {
    let mut network = Network::new(
        "mse",
        vec![2, 2, 1],
        &["linear", "logistic", "logistic"],
    )?;

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let expected = vec![vec![1.0], vec![0.0], vec![1.0], vec![0.0]];

    let config = TrainConfig {
        epochs: 10000,
        learning_rate: 0.5,
        shuffle: true,
        verbose: false,
    };
    let stats = train(&mut network, &inputs, &expected, zero_or_one, &config)?;
    for epoch_stats in stats.iter().step_by(1000) {
        println!(
            "epoch {}: accuracy = {:.2}, loss = {:.6}",
            epoch_stats.epoch, epoch_stats.accuracy, epoch_stats.mean_loss
        );
    }

    for input in &inputs {
        let output = network.predict(input)?;
        println!("Input: {:?} -> Output: {:.4}", input, output[0]);
    }

    let accuracy = evaluate(&mut network, &inputs, &expected, zero_or_one)?;
    println!("final accuracy: {accuracy:.2}");
    Ok(())
}
