/// Predicate deciding whether one prediction counts as accurate against
/// its expected output.
pub type AccuracyFn = fn(&[f64], &[f64]) -> bool;

/// Argmax match, for softmax/multiclass outputs: accurate when the
/// largest predicted value and the largest expected value sit at the same
/// index.
pub fn max_index(predicted: &[f64], expected: &[f64]) -> bool {
    argmax(predicted) == argmax(expected)
}

/// Threshold-0.5 match, for a single logistic output node: accurate when
/// the prediction rounds to the expected 0 or 1.
pub fn zero_or_one(predicted: &[f64], expected: &[f64]) -> bool {
    if expected[0] == 1.0 && predicted[0] >= 0.5 {
        return true;
    }
    if expected[0] == 0.0 && predicted[0] < 0.5 {
        return true;
    }
    false
}

/// Index of the maximum element; ties resolve to the earliest index.
fn argmax(values: &[f64]) -> usize {
    let mut index = 0;
    let mut best = values[0];
    for (i, &value) in values.iter().enumerate() {
        if value > best {
            index = i;
            best = value;
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_index_matches_argmax() {
        assert!(max_index(&[0.1, 0.7, 0.2], &[0.0, 1.0, 0.0]));
        assert!(!max_index(&[0.7, 0.1, 0.2], &[0.0, 1.0, 0.0]));
        // Ties resolve to the earliest index on both sides.
        assert!(max_index(&[0.5, 0.5], &[1.0, 1.0]));
    }

    #[test]
    fn zero_or_one_thresholds_at_half() {
        assert!(zero_or_one(&[0.5], &[1.0]));
        assert!(zero_or_one(&[0.49], &[0.0]));
        assert!(!zero_or_one(&[0.49], &[1.0]));
        assert!(!zero_or_one(&[0.5], &[0.0]));
        // A non-binary expectation never counts as accurate.
        assert!(!zero_or_one(&[0.9], &[0.7]));
    }
}
