//! Render a record back to the text config format.

use std::fmt;

use crate::{
    field::Field,
    options::{TaggerOptions, enabled},
};

struct Value<'a>(&'a TaggerOptions, Field);

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Value(options, field) = *self;
        match field {
            Field::Estimator => write!(f, "{}", options.estimator),
            Field::Inference => write!(f, "{}", options.inference),
            Field::SuffixLength => write!(f, "{}", options.suffix_length),
            Field::Degree => write!(f, "{}", options.degree),
            Field::MaxTrainPasses => write!(f, "{}", options.max_train_passes),
            Field::MaxLemmatizerPasses => write!(f, "{}", options.max_lemmatizer_passes),
            Field::MaxUselessPasses => write!(f, "{}", options.max_useless_passes),
            Field::GuessMass => write!(f, "{}", options.guess_mass),
            Field::Beam => disabled_or(f, options.beam),
            Field::BeamMass => disabled_or(f, enabled(options.beam_mass)),
            Field::Regularization => write!(f, "{}", options.regularization),
            Field::Delta => disabled_or(f, enabled(options.delta)),
            Field::Sigma => disabled_or(f, enabled(options.sigma)),
            Field::UseLabelDictionary => write!(f, "{}", u8::from(options.use_label_dictionary)),
        }
    }
}

fn disabled_or<T: fmt::Display>(f: &mut fmt::Formatter<'_>, value: Option<T>) -> fmt::Result {
    match value {
        Some(v) => write!(f, "{v}"),
        None => f.write_str("-1"),
    }
}

/// One `key=value` line per field, in storage order.
///
/// The output parses back to an equal record.
///
/// ```
/// use tagger_options::TaggerOptions;
///
/// let text = TaggerOptions::default().to_string();
/// assert!(text.starts_with("estimator=AVG_PERC\n"));
/// assert!(text.contains("beam=-1\n"));
/// ```
impl fmt::Display for TaggerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Field::ALL
            .into_iter()
            .try_for_each(|field| writeln!(f, "{}{}", field.marker(), Value(self, field)))
    }
}

impl TaggerOptions {
    /// Render the record as a config file, headed by a comment line.
    #[must_use]
    pub fn to_config_string(&self) -> String {
        format!("# tagger options\n{self}")
    }
}
