//! Statistic selection and the theta-parameter vector.

use crate::error::StatError;
use crate::types::StatIndex;

/// A single named change statistic with whatever side parameters it needs.
#[derive(Clone, Debug, PartialEq)]
pub enum StatKind {
    /// Arc count (network density).
    Arc,
    /// Mutual-dyad count.
    Reciprocity,
    /// Alternating out-k-stars, decay `lambda`.
    AlternatingKStarsOut {
        /// Geometric decay parameter, conventionally `2.0`.
        lambda: f64,
    },
    /// Alternating in-k-stars, decay `lambda`.
    AlternatingKStarsIn {
        /// Geometric decay parameter, conventionally `2.0`.
        lambda: f64,
    },
    /// Alternating k-triangles, transitive orientation (`i -> k -> j`).
    AlternatingKTrianglesT {
        /// Geometric decay parameter.
        lambda: f64,
    },
    /// Alternating k-triangles, cyclic orientation (`j -> k -> i`).
    AlternatingKTrianglesC {
        /// Geometric decay parameter.
        lambda: f64,
    },
    /// Alternating k-triangles, "down" orientation (shared source `k`).
    AlternatingKTrianglesD {
        /// Geometric decay parameter.
        lambda: f64,
    },
    /// Alternating k-triangles, "up" orientation (shared target `k`).
    AlternatingKTrianglesU {
        /// Geometric decay parameter.
        lambda: f64,
    },
    /// Alternating two-paths, transitive/cyclic ("mixed") orientation.
    AlternatingTwoPathsMixed {
        /// Geometric decay parameter.
        lambda: f64,
    },
    /// Alternating two-paths, "down" (shared-source) orientation.
    AlternatingTwoPathsDown {
        /// Geometric decay parameter.
        lambda: f64,
    },
    /// Alternating two-paths, "up" (shared-target) orientation.
    AlternatingTwoPathsUp {
        /// Geometric decay parameter.
        lambda: f64,
    },
    /// Sum of the named binary/categorical attribute over arc tails.
    Sender {
        /// Name of the loaded node attribute.
        attribute: String,
    },
    /// Sum of the named binary/categorical attribute over arc heads.
    Receiver {
        /// Name of the loaded node attribute.
        attribute: String,
    },
    /// Indicator that tail and head share the same categorical value.
    Matching {
        /// Name of the loaded node attribute.
        attribute: String,
    },
    /// Matching combined with reciprocity: both endpoints match and the
    /// dyad is mutual.
    MatchingReciprocity {
        /// Name of the loaded node attribute.
        attribute: String,
    },
    /// Absolute difference of a continuous attribute between endpoints.
    ContinuousDifference {
        /// Name of the loaded continuous node attribute.
        attribute: String,
    },
    /// A dyadic covariate keyed by `(tail, head)`, supplied out of band.
    DyadicCovariate {
        /// Identifier used to look up the covariate matrix at evaluation time.
        covariate_id: String,
    },
    /// Product of two attribute-based statistics (interaction term).
    AttributeInteraction {
        /// First attribute statistic's name, matched against another
        /// selected statistic in the same [`StatSelection`].
        left: String,
        /// Second attribute statistic's name.
        right: String,
    },
}

impl StatKind {
    /// Stable name used in configuration files and error messages.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Arc => "Arc".to_owned(),
            Self::Reciprocity => "Reciprocity".to_owned(),
            Self::AlternatingKStarsOut { .. } => "AltKStarsOut".to_owned(),
            Self::AlternatingKStarsIn { .. } => "AltKStarsIn".to_owned(),
            Self::AlternatingKTrianglesT { .. } => "AltKTrianglesT".to_owned(),
            Self::AlternatingKTrianglesC { .. } => "AltKTrianglesC".to_owned(),
            Self::AlternatingKTrianglesD { .. } => "AltKTrianglesD".to_owned(),
            Self::AlternatingKTrianglesU { .. } => "AltKTrianglesU".to_owned(),
            Self::AlternatingTwoPathsMixed { .. } => "AltTwoPathsMixed".to_owned(),
            Self::AlternatingTwoPathsDown { .. } => "AltTwoPathsDown".to_owned(),
            Self::AlternatingTwoPathsUp { .. } => "AltTwoPathsUp".to_owned(),
            Self::Sender { attribute } => format!("Sender({attribute})"),
            Self::Receiver { attribute } => format!("Receiver({attribute})"),
            Self::Matching { attribute } => format!("Matching({attribute})"),
            Self::MatchingReciprocity { attribute } => format!("MatchingReciprocity({attribute})"),
            Self::ContinuousDifference { attribute } => {
                format!("ContinuousDifference({attribute})")
            }
            Self::DyadicCovariate { covariate_id } => format!("DyadicCovariate({covariate_id})"),
            Self::AttributeInteraction { left, right } => {
                format!("Interaction({left}*{right})")
            }
        }
    }
}

/// An ordered selection of statistics, fixing the component order of every
/// `theta`/change-statistic vector evaluated against it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatSelection {
    kinds: Vec<StatKind>,
}

impl StatSelection {
    /// Creates a selection from an ordered list of statistics.
    #[must_use]
    pub fn new(kinds: Vec<StatKind>) -> Self {
        Self { kinds }
    }

    /// Number of selected statistics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// `true` if no statistics are selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Iterates over the selected statistics in order.
    pub fn iter(&self) -> impl Iterator<Item = &StatKind> {
        self.kinds.iter()
    }

    /// Indexed access, used when an interaction term must resolve its
    /// operand statistics' positions.
    #[must_use]
    pub fn get(&self, index: StatIndex) -> Option<&StatKind> {
        self.kinds.get(index)
    }
}

/// The parameter vector `theta`, one component per statistic in a
/// [`StatSelection`], in the same order.
#[derive(Clone, Debug, PartialEq)]
pub struct Theta(Vec<f64>);

impl Theta {
    /// Wraps a parameter vector, checking its length against `selection`.
    ///
    /// # Errors
    /// Returns [`StatError::ThetaLengthMismatch`] if the lengths differ.
    pub fn new(values: Vec<f64>, selection: &StatSelection) -> Result<Self, StatError> {
        if values.len() != selection.len() {
            return Err(StatError::ThetaLengthMismatch {
                theta_len: values.len(),
                selection_len: selection.len(),
            });
        }
        Ok(Self(values))
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` if the vector is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Builds a zero vector matching `selection`'s length, the EE
    /// estimator's starting point.
    #[must_use]
    pub fn zeros(selection: &StatSelection) -> Self {
        Self(vec![0.0; selection.len()])
    }

    /// Raw component access.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Mutable component access, for the EE estimator's outer-step updates.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.0
    }

    /// `true` if every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|value| value.is_finite())
    }

    /// Dot product with a change-statistic vector of matching length.
    #[must_use]
    pub fn dot(&self, change_stats: &[f64]) -> f64 {
        self.0
            .iter()
            .zip(change_stats)
            .map(|(theta, stat)| theta * stat)
            .sum()
    }
}
