//! Labeled data against which genomes are scored.
use crate::Genome;

use serde::{Deserialize, Serialize};

use std::error::Error;
use std::fmt;

/// A single labeled example.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    pub input: Vec<f64>,
    pub expected: Vec<f64>,
}

/// A fixed, non-empty table of labeled examples.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    /// Wraps a list of samples.
    ///
    /// # Errors
    /// Returns an error if there are no samples,
    /// or if any sample has no expected output.
    pub fn new(samples: Vec<Sample>) -> Result<Dataset, DatasetError> {
        if samples.is_empty() {
            return Err(DatasetError::Empty);
        }
        if let Some(row) = samples.iter().position(|s| s.expected.is_empty()) {
            return Err(DatasetError::MissingExpected(row));
        }
        Ok(Dataset { samples })
    }

    /// Pairs up an input table and an expected output
    /// table row by row.
    ///
    /// # Examples
    /// ```
    /// use oxievo::{Dataset, DatasetError};
    ///
    /// let dataset = Dataset::from_tables(
    ///     vec![vec![0.0, 1.0], vec![1.0, 0.0]],
    ///     vec![vec![1.0], vec![1.0]],
    /// )
    /// .unwrap();
    /// assert_eq!(dataset.len(), 2);
    ///
    /// assert_eq!(
    ///     Dataset::from_tables(vec![vec![0.0]], vec![]),
    ///     Err(DatasetError::LengthMismatch { inputs: 1, expected: 0 })
    /// );
    /// ```
    pub fn from_tables(
        inputs: Vec<Vec<f64>>,
        expected: Vec<Vec<f64>>,
    ) -> Result<Dataset, DatasetError> {
        if inputs.len() != expected.len() {
            return Err(DatasetError::LengthMismatch {
                inputs: inputs.len(),
                expected: expected.len(),
            });
        }
        Dataset::new(
            inputs
                .into_iter()
                .zip(expected)
                .map(|(input, expected)| Sample { input, expected })
                .collect(),
        )
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false: datasets hold at least one sample.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns an iterator over all samples, in order.
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }
}

/// Which output channels contribute to a genome's error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scoring {
    /// Only the first output is compared
    /// against the first expected value.
    #[default]
    FirstChannel,
    /// Every expected value is compared against
    /// the output at the same position.
    AllChannels,
}

/// Returns the mean squared error of `genome`'s
/// predictions over `dataset`.
///
/// # Errors
/// Returns an error if the genome fails to predict a sample
/// or predicts fewer outputs than are scored.
pub fn mean_squared_error<G: Genome>(
    genome: &mut G,
    dataset: &Dataset,
    scoring: Scoring,
) -> Result<f64, EvaluationError<G::Error>> {
    let mut error = 0.0;
    let mut terms = 0usize;
    for (row, sample) in dataset.samples().enumerate() {
        let output = genome.predict(&sample.input).map_err(EvaluationError::Genome)?;
        let channels = match scoring {
            Scoring::FirstChannel => 1,
            Scoring::AllChannels => sample.expected.len(),
        };
        if output.len() < channels {
            return Err(EvaluationError::MissingOutput {
                row,
                expected: channels,
                found: output.len(),
            });
        }
        for (expected, actual) in sample.expected[..channels].iter().zip(&output) {
            error += (expected - actual).powi(2);
        }
        terms += channels;
    }
    Ok(match scoring {
        Scoring::FirstChannel => error / dataset.len() as f64,
        Scoring::AllChannels => error / terms as f64,
    })
}

/// An error type indicating an unusable dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatasetError {
    /// The dataset has no samples.
    Empty,
    /// The sample at this row has no expected output.
    MissingExpected(usize),
    /// The input and expected output tables
    /// have different row counts.
    LengthMismatch { inputs: usize, expected: usize },
}

/// An error type indicating a failure
/// to score a genome.
#[derive(Debug)]
pub enum EvaluationError<E> {
    /// The genome couldn't produce an output.
    Genome(E),
    /// The genome produced fewer outputs than are scored.
    MissingOutput {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "dataset has no samples"),
            Self::MissingExpected(row) => {
                write!(f, "sample {} has no expected output", row)
            }
            Self::LengthMismatch { inputs, expected } => write!(
                f,
                "{} input rows given with {} expected output rows",
                inputs, expected
            ),
        }
    }
}

impl<E: fmt::Display> fmt::Display for EvaluationError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Genome(e) => write!(f, "genome evaluation failed: {}", e),
            Self::MissingOutput {
                row,
                expected,
                found,
            } => write!(
                f,
                "sample {} scores {} outputs but the genome produced {}",
                row, expected, found
            ),
        }
    }
}

impl Error for DatasetError {}

impl<E: Error + 'static> Error for EvaluationError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Genome(e) => Some(e),
            Self::MissingOutput { .. } => None,
        }
    }
}
