use crate::error::{NetworkError, Result};

/// Per-layer activation function.
///
/// `Softmax` is a vector-valued activation; the forward engine applies it
/// across the whole destination layer once every raw weighted sum is known
/// (it normalizes by the sum of exponentials over the layer, so it cannot
/// be applied node-by-node). The element-wise `apply()` therefore rejects
/// it; `softmax_in_place()` is the layer-level path.
///
/// `Custom` carries a caller-supplied (function, derivative) pointer pair,
/// the second construction path. It has no name and cannot be persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activation {
    Relu,
    Logistic,
    Tanh,
    Linear,
    Softmax,
    Custom {
        f: fn(f64) -> f64,
        df: fn(f64) -> f64,
    },
}

impl Activation {
    /// Looks up a built-in activation by identifier.
    pub fn from_name(name: &str) -> Result<Activation> {
        match name {
            "relu" => Ok(Activation::Relu),
            "logistic" => Ok(Activation::Logistic),
            "tanh" => Ok(Activation::Tanh),
            "linear" => Ok(Activation::Linear),
            "softmax" => Ok(Activation::Softmax),
            _ => Err(NetworkError::Format(format!(
                "unknown activation function \"{name}\""
            ))),
        }
    }

    /// The identifier of a built-in activation; `None` for `Custom`.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Activation::Relu => Some("relu"),
            Activation::Logistic => Some("logistic"),
            Activation::Tanh => Some("tanh"),
            Activation::Linear => Some("linear"),
            Activation::Softmax => Some("softmax"),
            Activation::Custom { .. } => None,
        }
    }

    /// Element-wise activation of a raw weighted sum.
    ///
    /// `relu` is undefined at exactly 0 in this library's contract and
    /// fails with a domain error there.
    pub fn apply(&self, x: f64) -> Result<f64> {
        match self {
            Activation::Relu => {
                if x == 0.0 {
                    return Err(NetworkError::Domain("relu(0) is undefined".to_string()));
                }
                Ok(if x < 0.0 { 0.0 } else { x })
            }
            Activation::Logistic => Ok(1.0 / (1.0 + (-x).exp())),
            Activation::Tanh => Ok(x.tanh()),
            Activation::Linear => Ok(x),
            Activation::Softmax => Err(NetworkError::Domain(
                "softmax is applied across a whole layer, not element-wise".to_string(),
            )),
            Activation::Custom { f, .. } => Ok(f(x)),
        }
    }

    /// Element-wise derivative, evaluated at the POST-activation value
    /// (e.g. logistic' at activation a is a*(1-a)).
    pub fn derivative(&self, a: f64) -> f64 {
        match self {
            Activation::Relu => {
                if a == 0.0 {
                    0.0
                } else {
                    1.0
                }
            }
            Activation::Logistic => a * (1.0 - a),
            Activation::Tanh => 1.0 - a * a,
            Activation::Linear => 1.0,
            Activation::Softmax => a * (1.0 - a),
            Activation::Custom { df, .. } => df(a),
        }
    }

    /// Whole-layer softmax: replaces each raw value with
    /// exp(raw) / sum of exp over the layer.
    pub fn softmax_in_place(raw: &mut [f64]) {
        let denom: f64 = raw.iter().map(|x| x.exp()).sum();
        for x in raw.iter_mut() {
            *x = x.exp() / denom;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn relu_is_undefined_at_zero() {
        assert!(matches!(
            Activation::Relu.apply(0.0),
            Err(NetworkError::Domain(_))
        ));
        assert_eq!(Activation::Relu.apply(1e-9).unwrap(), 1e-9);
        assert_eq!(Activation::Relu.apply(-1e-9).unwrap(), 0.0);
    }

    #[test]
    fn logistic_and_derivative() {
        let a = Activation::Logistic.apply(0.0).unwrap();
        assert_relative_eq!(a, 0.5);
        assert_relative_eq!(Activation::Logistic.derivative(a), 0.25);
    }

    #[test]
    fn tanh_derivative_uses_post_activation_value() {
        let a = Activation::Tanh.apply(0.5).unwrap();
        assert_relative_eq!(Activation::Tanh.derivative(a), 1.0 - a * a);
    }

    #[test]
    fn softmax_normalizes_layer() {
        let mut raw = vec![1.0, 2.0, 3.0];
        Activation::softmax_in_place(&mut raw);
        assert_relative_eq!(raw.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert!(raw.iter().all(|&p| (0.0..=1.0).contains(&p)));
        assert!(raw[2] > raw[1] && raw[1] > raw[0]);
    }

    #[test]
    fn softmax_rejects_element_wise_apply() {
        assert!(matches!(
            Activation::Softmax.apply(1.0),
            Err(NetworkError::Domain(_))
        ));
    }

    #[test]
    fn name_round_trip() {
        for name in ["relu", "logistic", "tanh", "linear", "softmax"] {
            assert_eq!(Activation::from_name(name).unwrap().name(), Some(name));
        }
        assert!(matches!(
            Activation::from_name("gelu"),
            Err(NetworkError::Format(_))
        ));
    }

    #[test]
    fn custom_pair_is_invoked() {
        fn double(x: f64) -> f64 {
            2.0 * x
        }
        fn two(_: f64) -> f64 {
            2.0
        }
        let act = Activation::Custom { f: double, df: two };
        assert_eq!(act.apply(3.0).unwrap(), 6.0);
        assert_eq!(act.derivative(6.0), 2.0);
        assert_eq!(act.name(), None);
    }
}
