//! Names of the options, shared by the text and binary formats.

/// One named option of a [`TaggerOptions`](crate::TaggerOptions) record.
///
/// [`Field::ALL`] fixes the order used when storing records and when
/// matching text-config lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Estimator,
    Inference,
    SuffixLength,
    Degree,
    MaxTrainPasses,
    MaxLemmatizerPasses,
    MaxUselessPasses,
    GuessMass,
    Beam,
    BeamMass,
    Regularization,
    Delta,
    Sigma,
    UseLabelDictionary,
}

impl Field {
    /// Every field in storage order.
    pub const ALL: [Self; 14] = [
        Self::Estimator,
        Self::Inference,
        Self::SuffixLength,
        Self::Degree,
        Self::MaxTrainPasses,
        Self::MaxLemmatizerPasses,
        Self::MaxUselessPasses,
        Self::GuessMass,
        Self::Beam,
        Self::BeamMass,
        Self::Regularization,
        Self::Delta,
        Self::Sigma,
        Self::UseLabelDictionary,
    ];

    /// Field name as written in config files and binary records.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Estimator => "estimator",
            Self::Inference => "inference",
            Self::SuffixLength => "suffix_length",
            Self::Degree => "degree",
            Self::MaxTrainPasses => "max_train_passes",
            Self::MaxLemmatizerPasses => "max_lemmatizer_passes",
            Self::MaxUselessPasses => "max_useless_passes",
            Self::GuessMass => "guess_mass",
            Self::Beam => "beam",
            Self::BeamMass => "beam_mass",
            Self::Regularization => "regularization",
            Self::Delta => "delta",
            Self::Sigma => "sigma",
            Self::UseLabelDictionary => "use_label_dictionary",
        }
    }

    /// The `key=` marker that introduces this field in a config line.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Estimator => "estimator=",
            Self::Inference => "inference=",
            Self::SuffixLength => "suffix_length=",
            Self::Degree => "degree=",
            Self::MaxTrainPasses => "max_train_passes=",
            Self::MaxLemmatizerPasses => "max_lemmatizer_passes=",
            Self::MaxUselessPasses => "max_useless_passes=",
            Self::GuessMass => "guess_mass=",
            Self::Beam => "beam=",
            Self::BeamMass => "beam_mass=",
            Self::Regularization => "regularization=",
            Self::Delta => "delta=",
            Self::Sigma => "sigma=",
            Self::UseLabelDictionary => "use_label_dictionary=",
        }
    }

    /// Look a field up by its exact name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}
