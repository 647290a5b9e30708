use rand::seq::SliceRandom;

use crate::error::{NetworkError, Result};
use crate::network::Network;
use crate::train::accuracy::AccuracyFn;
use crate::train::config::TrainConfig;
use crate::train::epoch_stats::EpochStats;

/// Trains `network` in place for `config.epochs` epochs of per-example
/// gradient descent and returns one `EpochStats` per completed epoch.
///
/// Per epoch: the example order is freshly permuted when `config.shuffle`
/// is set (natural order otherwise), then each example runs a forward
/// pass followed by an update. Accuracy and loss are measured on the
/// prediction obtained before that example's update. When
/// `config.verbose` is set, one summary line is printed per epoch.
pub fn train(
    network: &mut Network,
    data: &[Vec<f64>],
    expected: &[Vec<f64>],
    is_accurate: AccuracyFn,
    config: &TrainConfig,
) -> Result<Vec<EpochStats>> {
    validate_dataset(network, data, expected)?;

    let mut stats = Vec::with_capacity(config.epochs);
    for epoch in 1..=config.epochs {
        let order = example_order(data.len(), config.shuffle);

        let mut correct = 0;
        let mut total_loss = 0.0;
        for &idx in &order {
            let output = network.predict(&data[idx])?;
            if is_accurate(&output, &expected[idx]) {
                correct += 1;
            }
            total_loss += example_loss(network, &output, &expected[idx]);
            network.update(config.learning_rate, &expected[idx])?;
        }

        let epoch_stats = EpochStats {
            epoch,
            accuracy: correct as f64 / data.len() as f64,
            mean_loss: total_loss / data.len() as f64,
        };
        if config.verbose {
            println!(
                "epoch {}/{}: accuracy = {:.4}, loss = {:.6}",
                epoch, config.epochs, epoch_stats.accuracy, epoch_stats.mean_loss
            );
        }
        stats.push(epoch_stats);
    }

    Ok(stats)
}

/// Prediction-only accuracy over a dataset: runs `predict` per example
/// and counts the predicate's accepts. Never updates weights or biases.
pub fn evaluate(
    network: &mut Network,
    data: &[Vec<f64>],
    expected: &[Vec<f64>],
    is_accurate: AccuracyFn,
) -> Result<f64> {
    validate_dataset(network, data, expected)?;

    let mut correct = 0;
    for (input, target) in data.iter().zip(expected.iter()) {
        let output = network.predict(input)?;
        if is_accurate(&output, target) {
            correct += 1;
        }
    }
    Ok(correct as f64 / data.len() as f64)
}

fn validate_dataset(network: &Network, data: &[Vec<f64>], expected: &[Vec<f64>]) -> Result<()> {
    if data.is_empty() {
        return Err(NetworkError::ShapeMismatch(
            "dataset has no examples".to_string(),
        ));
    }
    if data.len() != expected.len() {
        return Err(NetworkError::ShapeMismatch(format!(
            "{} data examples but {} expected outputs",
            data.len(),
            expected.len()
        )));
    }
    let input_size = network.node_per_layer()[0];
    let output_size = network.node_per_layer()[network.layer_total() - 1];
    for (i, (input, target)) in data.iter().zip(expected.iter()).enumerate() {
        if input.len() != input_size {
            return Err(NetworkError::ShapeMismatch(format!(
                "example {i} has {} values but the input layer has {input_size} nodes",
                input.len()
            )));
        }
        if target.len() != output_size {
            return Err(NetworkError::ShapeMismatch(format!(
                "expected output {i} has {} values but the output layer has {output_size} nodes",
                target.len()
            )));
        }
    }
    Ok(())
}

/// The processing order for one epoch: the natural order 0..n, freshly
/// permuted when `shuffle` is set.
fn example_order(n: usize, shuffle: bool) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    if shuffle {
        order.shuffle(&mut rand::thread_rng());
    }
    order
}

/// Per-example loss: the per-node loss summed over the output layer.
fn example_loss(network: &Network, output: &[f64], expected: &[f64]) -> f64 {
    output
        .iter()
        .zip(expected.iter())
        .map(|(&o, &e)| network.loss().eval(o, e))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::train::accuracy::zero_or_one;

    fn separable_dataset() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        let data = vec![
            vec![0.1, 0.2],
            vec![0.2, 0.1],
            vec![0.0, 0.3],
            vec![0.3, 0.0],
            vec![0.9, 0.8],
            vec![0.8, 0.9],
            vec![1.0, 0.7],
            vec![0.7, 1.0],
        ];
        let expected = vec![
            vec![0.0],
            vec![0.0],
            vec![0.0],
            vec![0.0],
            vec![1.0],
            vec![1.0],
            vec![1.0],
            vec![1.0],
        ];
        (data, expected)
    }

    fn fresh_network() -> Network {
        let mut network = Network::new(
            "mse",
            vec![2, 2, 1],
            &["linear", "logistic", "logistic"],
        )
        .unwrap();
        network
            .load_wb(&[0.3, -0.2, 0.15, 0.1, 0.2, -0.3], &[0.05, -0.05])
            .unwrap();
        network
    }

    #[test]
    fn natural_order_is_stable_and_shuffled_order_is_a_permutation() {
        assert_eq!(example_order(5, false), vec![0, 1, 2, 3, 4]);
        assert_eq!(example_order(5, false), example_order(5, false));

        let shuffled = example_order(64, true);
        let mut sorted = shuffled.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..64).collect::<Vec<_>>());

        // Two fresh 64-element permutations colliding is vanishingly
        // unlikely; so is either matching the natural order.
        let other = example_order(64, true);
        assert!(shuffled != other || shuffled != (0..64).collect::<Vec<_>>());
    }

    #[test]
    fn training_improves_accuracy_on_separable_data() {
        let (data, expected) = separable_dataset();
        let mut network = fresh_network();
        let config = TrainConfig::new(3000, 1.0);

        let stats = train(&mut network, &data, &expected, zero_or_one, &config).unwrap();
        assert_eq!(stats.len(), 3000);
        let first = stats.first().unwrap().accuracy;
        let last = stats.last().unwrap().accuracy;
        assert!(
            last > first,
            "accuracy did not improve: epoch 1 = {first}, final = {last}"
        );
        assert_eq!(last, 1.0);
    }

    #[test]
    fn evaluate_does_not_mutate_parameters() {
        let (data, expected) = separable_dataset();
        let mut network = fresh_network();
        let snapshot = network.clone();

        let accuracy = evaluate(&mut network, &data, &expected, zero_or_one).unwrap();
        assert!((0.0..=1.0).contains(&accuracy));

        for layer in 0..network.layer_total() - 1 {
            assert_eq!(
                network.bias(layer).unwrap(),
                snapshot.bias(layer).unwrap()
            );
            for dest in 0..network.node_per_layer()[layer + 1] {
                for src in 0..network.node_per_layer()[layer] {
                    assert_eq!(
                        network.weight(layer, dest, src).unwrap(),
                        snapshot.weight(layer, dest, src).unwrap()
                    );
                }
            }
        }
    }

    #[test]
    fn rejects_mismatched_dataset() {
        let mut network = fresh_network();
        let err = train(
            &mut network,
            &[vec![0.1, 0.2]],
            &[vec![0.0], vec![1.0]],
            zero_or_one,
            &TrainConfig::new(1, 0.1),
        );
        assert!(matches!(err, Err(NetworkError::ShapeMismatch(_))));

        let err = train(
            &mut network,
            &[vec![0.1, 0.2, 0.3]],
            &[vec![0.0]],
            zero_or_one,
            &TrainConfig::new(1, 0.1),
        );
        assert!(matches!(err, Err(NetworkError::ShapeMismatch(_))));

        let err = evaluate(&mut network, &[vec![0.1, 0.2]], &[vec![0.0, 1.0]], zero_or_one);
        assert!(matches!(err, Err(NetworkError::ShapeMismatch(_))));
    }
}
