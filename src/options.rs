//! The tagger hyperparameter record.
//!
//! [`TaggerOptions`] is plain value data: construct it from a struct literal,
//! [`Default`], a text config (see [`crate::parse`]), or a stored binary
//! record (see [`crate::codec`]), then hand it to the trainer read-only.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Absolute tolerance used when comparing floating-point options.
pub const FLOAT_TOLERANCE: f32 = 0.001;

/// Training estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Estimator {
    /// Averaged perceptron.
    #[default]
    AvgPerc = 0,
    /// Maximum likelihood.
    Ml = 1,
}

/// Decoding mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Inference {
    /// Most probable label sequence.
    #[default]
    Map = 0,
    /// Per-position marginals.
    Marginal = 1,
}

/// Weight regularisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Regularization {
    #[default]
    None = 0,
    L1 = 1,
    L2 = 2,
}

/// Fixed vocabulary shared by the text parser, renderer, and binary codec.
pub trait Vocabulary: Copy + Sized + 'static {
    /// Every variant paired with its config token, in ordinal order.
    const TOKENS: &'static [(Self, &'static str)];

    /// The config token for this variant.
    #[must_use]
    fn token(self) -> &'static str;

    /// Variant stored under `ordinal` in a binary record.
    #[must_use]
    fn from_ordinal(ordinal: u32) -> Option<Self> {
        Self::TOKENS
            .get(usize::try_from(ordinal).ok()?)
            .map(|&(variant, _)| variant)
    }
}

macro_rules! vocabulary {
    ($ty:ty { $($variant:ident => $token:literal),+ $(,)? }) => {
        impl Vocabulary for $ty {
            const TOKENS: &'static [(Self, &'static str)] = &[$((Self::$variant, $token)),+];

            fn token(self) -> &'static str {
                match self {
                    $(Self::$variant => $token),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.token())
            }
        }
    };
}

vocabulary!(Estimator { AvgPerc => "AVG_PERC", Ml => "ML" });
vocabulary!(Inference { Map => "MAP", Marginal => "MARGINAL" });
vocabulary!(Regularization { None => "NONE", L1 => "L1", L2 => "L2" });

/// Hyperparameters controlling tagger training and inference.
///
/// Sentinel-bearing options are `Option`s: `None` means the feature is
/// disabled and is written as `-1` in both the text and binary formats.
/// `Some` of a negative value is treated as `None` everywhere.
///
/// Equality compares integer and enum fields exactly and float fields within
/// [`FLOAT_TOLERANCE`].
///
/// # Examples
///
/// ```
/// use tagger_options::{Estimator, TaggerOptions};
///
/// let options = TaggerOptions {
///     estimator: Estimator::Ml,
///     beam: Some(5),
///     ..TaggerOptions::default()
/// };
/// assert_eq!(options.suffix_length, 10);
/// assert!(options.delta.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaggerOptions {
    pub estimator: Estimator,
    pub inference: Inference,
    /// Longest word suffix used for feature extraction.
    pub suffix_length: u32,
    /// Order of the label model.
    pub degree: u32,
    pub max_train_passes: u32,
    pub max_lemmatizer_passes: u32,
    /// Passes without development-set improvement before training stops.
    pub max_useless_passes: u32,
    /// Probability mass covered by guessed labels for unknown words.
    pub guess_mass: f32,
    /// Beam width; `None` disables beam search.
    pub beam: Option<u32>,
    /// Adaptive beam mass; `None` disables it.
    pub beam_mass: Option<f32>,
    pub regularization: Regularization,
    pub delta: Option<f32>,
    pub sigma: Option<f32>,
    /// Restrict candidate labels to those seen with a word in training.
    pub use_label_dictionary: bool,
}

impl Default for TaggerOptions {
    fn default() -> Self {
        Self {
            estimator: Estimator::AvgPerc,
            inference: Inference::Map,
            suffix_length: 10,
            degree: 2,
            max_train_passes: 50,
            max_lemmatizer_passes: 50,
            max_useless_passes: 3,
            guess_mass: 0.99,
            beam: None,
            beam_mass: None,
            regularization: Regularization::None,
            delta: None,
            sigma: None,
            use_label_dictionary: true,
        }
    }
}

impl TaggerOptions {
    /// Record with every field zeroed or disabled; the starting point for
    /// binary loads, which only overwrite the fields they carry.
    #[must_use]
    pub const fn zeroed() -> Self {
        Self {
            estimator: Estimator::AvgPerc,
            inference: Inference::Map,
            suffix_length: 0,
            degree: 0,
            max_train_passes: 0,
            max_lemmatizer_passes: 0,
            max_useless_passes: 0,
            guess_mass: 0.0,
            beam: None,
            beam_mass: None,
            regularization: Regularization::None,
            delta: None,
            sigma: None,
            use_label_dictionary: false,
        }
    }
}

#[expect(clippy::float_arithmetic, reason = "tolerance comparison")]
fn float_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < FLOAT_TOLERANCE
}

/// A sentinel option with negative values folded into `None`.
pub(crate) fn enabled(value: Option<f32>) -> Option<f32> {
    value.filter(|v| *v >= 0.0 || v.is_nan())
}

fn sentinel_eq(a: Option<f32>, b: Option<f32>) -> bool {
    match (enabled(a), enabled(b)) {
        (Some(x), Some(y)) => float_eq(x, y),
        (None, None) => true,
        _ => false,
    }
}

impl PartialEq for TaggerOptions {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        self.estimator == other.estimator
            && self.inference == other.inference
            && self.suffix_length == other.suffix_length
            && self.degree == other.degree
            && self.max_train_passes == other.max_train_passes
            && self.max_lemmatizer_passes == other.max_lemmatizer_passes
            && self.max_useless_passes == other.max_useless_passes
            && float_eq(self.guess_mass, other.guess_mass)
            && self.beam == other.beam
            && sentinel_eq(self.beam_mass, other.beam_mass)
            && self.regularization == other.regularization
            && sentinel_eq(self.delta, other.delta)
            && sentinel_eq(self.sigma, other.sigma)
            && self.use_label_dictionary == other.use_label_dictionary
    }
}
