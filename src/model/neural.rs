//! Feed-forward network inference

use crate::error::FitError;

/// Hidden-layer activation function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Relu,
    Tanh,
    Logistic,
    Identity,
}

impl Activation {
    pub const ALL: [Activation; 4] = [
        Activation::Relu,
        Activation::Tanh,
        Activation::Logistic,
        Activation::Identity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Activation::Relu => "relu",
            Activation::Tanh => "tanh",
            Activation::Logistic => "logistic",
            Activation::Identity => "identity",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name.trim())
    }

    pub fn apply(&self, z: f64) -> f64 {
        match self {
            Activation::Relu => z.max(0.0),
            Activation::Tanh => z.tanh(),
            Activation::Logistic => 1.0 / (1.0 + (-z).exp()),
            Activation::Identity => z,
        }
    }
}

/// Weight optimiser requested from the trainer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    Adam,
    Lbfgs,
    Sgd,
}

impl Solver {
    pub const ALL: [Solver; 3] = [Solver::Adam, Solver::Lbfgs, Solver::Sgd];

    pub fn name(&self) -> &'static str {
        match self {
            Solver::Adam => "adam",
            Solver::Lbfgs => "lbfgs",
            Solver::Sgd => "sgd",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name.trim())
    }
}

/// Fully connected layer. `weights[i][j]` links input `i` to unit `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f64>>,
    pub biases: Vec<f64>,
}

impl DenseLayer {
    pub fn inputs(&self) -> usize {
        self.weights.len()
    }

    pub fn units(&self) -> usize {
        self.biases.len()
    }

    fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut out = self.biases.clone();
        for (x, row) in input.iter().zip(&self.weights) {
            for (acc, w) in out.iter_mut().zip(row) {
                *acc += x * w;
            }
        }
        out
    }
}

/// Trained multilayer perceptron with an identity output layer
#[derive(Debug, Clone, PartialEq)]
pub struct NeuralNetwork {
    pub layers: Vec<DenseLayer>,
    pub activation: Activation,
}

impl NeuralNetwork {
    /// Check that consecutive layer shapes line up and the output is a single unit
    pub fn new(layers: Vec<DenseLayer>, activation: Activation) -> Result<Self, FitError> {
        let last = layers.last().ok_or(FitError::EmptyData)?;
        if last.units() != 1 {
            return Err(FitError::DimensionMismatch {
                expected: 1,
                found: last.units(),
            });
        }
        for layer in &layers {
            if let Some(row) = layer.weights.iter().find(|row| row.len() != layer.units()) {
                return Err(FitError::DimensionMismatch {
                    expected: layer.units(),
                    found: row.len(),
                });
            }
        }
        for pair in layers.windows(2) {
            if pair[0].units() != pair[1].inputs() {
                return Err(FitError::DimensionMismatch {
                    expected: pair[1].inputs(),
                    found: pair[0].units(),
                });
            }
        }
        Ok(Self { layers, activation })
    }

    pub fn n_inputs(&self) -> usize {
        self.layers.first().map(DenseLayer::inputs).unwrap_or(0)
    }

    /// `(inputs, units)` for every layer
    pub fn layer_shapes(&self) -> Vec<(usize, usize)> {
        self.layers.iter().map(|l| (l.inputs(), l.units())).collect()
    }

    pub fn predict_row(&self, row: &[f64]) -> Result<f64, FitError> {
        if row.len() != self.n_inputs() {
            return Err(FitError::DimensionMismatch {
                expected: self.n_inputs(),
                found: row.len(),
            });
        }

        let mut activations = row.to_vec();
        let last = self.layers.len() - 1;
        for (i, layer) in self.layers.iter().enumerate() {
            activations = layer.forward(&activations);
            if i != last {
                activations.iter_mut().for_each(|z| *z = self.activation.apply(*z));
            }
        }
        Ok(activations[0])
    }
}

/// Parse hidden layer sizes such as `"100, 50"`
pub fn parse_hidden_layers(text: &str) -> Result<Vec<usize>, FitError> {
    let sizes = text
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(FitError::InvalidParameter(format!("layer size '{}'", s))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if sizes.is_empty() {
        return Err(FitError::InvalidParameter("no hidden layers".into()));
    }
    Ok(sizes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_network(activation: Activation) -> NeuralNetwork {
        NeuralNetwork::new(
            vec![
                DenseLayer {
                    weights: vec![vec![1.0, -1.0], vec![2.0, 0.5]],
                    biases: vec![0.0, 1.0],
                },
                DenseLayer {
                    weights: vec![vec![1.0], vec![3.0]],
                    biases: vec![0.5],
                },
            ],
            activation,
        )
        .unwrap()
    }

    #[test]
    fn test_forward_pass_relu() {
        let net = tiny_network(Activation::Relu);
        // hidden = relu([1 + 4, -1 + 1 + 1]) = [5, 1]; out = 5 + 3 + 0.5
        let y = net.predict_row(&[1.0, 2.0]).unwrap();
        assert!((y - 8.5).abs() < 1e-12);
    }

    #[test]
    fn test_forward_pass_identity() {
        let net = tiny_network(Activation::Identity);
        // hidden = [1 - 4, -1 - 1 + 1] = [-3, -1]; out = -3 - 3 + 0.5
        let y = net.predict_row(&[1.0, -2.0]).unwrap();
        assert!((y + 5.5).abs() < 1e-12);
    }

    #[test]
    fn test_dimension_checks() {
        let net = tiny_network(Activation::Tanh);
        assert_eq!(
            net.predict_row(&[1.0]),
            Err(FitError::DimensionMismatch { expected: 2, found: 1 })
        );
        assert_eq!(net.layer_shapes(), vec![(2, 2), (2, 1)]);

        let bad = NeuralNetwork::new(
            vec![
                DenseLayer { weights: vec![vec![1.0]], biases: vec![0.0] },
                DenseLayer { weights: vec![vec![1.0], vec![1.0]], biases: vec![0.0] },
            ],
            Activation::Relu,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_parse_hidden_layers() {
        assert_eq!(parse_hidden_layers("100, 50").unwrap(), vec![100, 50]);
        assert_eq!(parse_hidden_layers(" 8 ").unwrap(), vec![8]);
        assert!(parse_hidden_layers("").is_err());
        assert!(parse_hidden_layers("10, 0").is_err());
        assert!(parse_hidden_layers("ten").is_err());
    }

    #[test]
    fn test_names_round_trip() {
        for a in Activation::ALL {
            assert_eq!(Activation::parse(a.name()), Some(a));
        }
        for s in Solver::ALL {
            assert_eq!(Solver::parse(s.name()), Some(s));
        }
        assert_eq!(Activation::parse("softmax"), None);
    }
}
