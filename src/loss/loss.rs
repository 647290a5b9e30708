use crate::error::{NetworkError, Result};

/// Per-output-node loss function.
///
/// Both `eval` and `derivative` take a single (output, expected) pair; the
/// trainer sums `eval` over the output layer to report a per-example loss,
/// and the backward pass feeds `derivative` into the output-layer delta.
///
/// - `Mse`          — (o - e)², derivative o - e.
/// - `CrossEntropy` — -e·log2(o), derivative -e/o + (1-e)/(1-o);
///   pair with a softmax or logistic output layer so o stays in (0, 1).
/// - `Custom`       — caller-supplied (function, derivative) pointer pair;
///   has no name and cannot be persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Loss {
    Mse,
    CrossEntropy,
    Custom {
        f: fn(f64, f64) -> f64,
        df: fn(f64, f64) -> f64,
    },
}

impl Loss {
    /// Looks up a built-in loss by identifier.
    pub fn from_name(name: &str) -> Result<Loss> {
        match name {
            "mse" => Ok(Loss::Mse),
            "cross_entropy" => Ok(Loss::CrossEntropy),
            _ => Err(NetworkError::Format(format!(
                "unknown loss function \"{name}\""
            ))),
        }
    }

    /// The identifier of a built-in loss; `None` for `Custom`.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Loss::Mse => Some("mse"),
            Loss::CrossEntropy => Some("cross_entropy"),
            Loss::Custom { .. } => None,
        }
    }

    pub fn eval(&self, output: f64, expected: f64) -> f64 {
        match self {
            Loss::Mse => (output - expected) * (output - expected),
            Loss::CrossEntropy => -expected * output.log2(),
            Loss::Custom { f, .. } => f(output, expected),
        }
    }

    pub fn derivative(&self, output: f64, expected: f64) -> f64 {
        match self {
            Loss::Mse => output - expected,
            Loss::CrossEntropy => {
                -(expected / output) + (1.0 - expected) / (1.0 - output)
            }
            Loss::Custom { df, .. } => df(output, expected),
        }
    }
}
