//! Line-oriented `key=value` config parser.
//!
//! Whitespace is insignificant anywhere on a line. Blank lines and lines
//! starting with `#` are skipped. Every other line must contain one of the
//! [`Field`] markers; the value is everything after the first occurrence of
//! that marker.
//!
//! Numbers are read leniently: the longest leading numeric prefix is used and
//! text without one reads as zero, so `degree=abc` sets `degree` to `0`.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    sync::LazyLock,
};

use regex::Regex;
use tracing::debug;

use crate::{
    error::{OptionsError, Result, SyntaxErrorKind},
    field::Field,
    options::{TaggerOptions, Vocabulary, enabled},
};

static INT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    #[expect(clippy::expect_used, reason = "pattern is constant and valid")]
    Regex::new(r"^[+-]?[0-9]+").expect("valid regex")
});
static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    #[expect(clippy::expect_used, reason = "pattern is constant and valid")]
    Regex::new(r"(?i)^[+-]?(?:infinity|inf|nan|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:e[+-]?[0-9]+)?)")
        .expect("valid regex")
});

/// Remove every space, tab, and carriage return from `line`.
///
/// # Examples
///
/// ```
/// use tagger_options::parse::despace;
///
/// assert_eq!(despace(" degree =\t7\r"), "degree=7");
/// ```
#[must_use]
pub fn despace(line: &str) -> String {
    line.chars()
        .filter(|c| !matches!(c, ' ' | '\t' | '\r'))
        .collect()
}

/// Text following the first occurrence of `marker` in `line`.
#[must_use]
pub fn value_after<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    line.find(marker)
        .and_then(|start| line.get(start + marker.len()..))
}

/// Match `value` against a fixed vocabulary by token prefix, so
/// `MARGINAL_FOO` reads as `MARGINAL`.
#[must_use]
pub fn parse_vocabulary<T: Vocabulary>(value: &str) -> Option<T> {
    T::TOKENS
        .iter()
        .find(|(_, token)| value.starts_with(token))
        .map(|&(variant, _)| variant)
}

/// Leading integer of `value`, or `0` if there is none. Saturates on overflow.
#[must_use]
pub fn leading_int(value: &str) -> i64 {
    INT_PREFIX.find(value).map_or(0, |m| {
        let digits = m.as_str();
        digits.parse().unwrap_or(if digits.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        })
    })
}

/// Leading floating-point number of `value`, or `0.0` if there is none.
#[must_use]
pub fn leading_float(value: &str) -> f32 {
    FLOAT_PREFIX
        .find(value)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0)
}

/// Per-line context for converting a value and reporting failures.
struct Assignment<'a> {
    line: usize,
    field: Field,
    value: &'a str,
}

impl Assignment<'_> {
    fn out_of_range(&self) -> OptionsError {
        OptionsError::NumericalRange {
            line: self.line,
            key: self.field.name(),
            value: self.value.to_owned(),
        }
    }

    fn vocabulary<T: Vocabulary>(&self) -> Result<T> {
        parse_vocabulary(self.value).ok_or_else(|| OptionsError::Syntax {
            line: self.line,
            kind: SyntaxErrorKind::InvalidValue {
                key: self.field.name(),
                value: self.value.to_owned(),
            },
        })
    }

    fn uint(&self) -> Result<u32> {
        u32::try_from(leading_int(self.value)).map_err(|_| self.out_of_range())
    }

    /// Negative values disable the option.
    fn optional_uint(&self) -> Result<Option<u32>> {
        let value = leading_int(self.value);
        if value < 0 {
            return Ok(None);
        }
        u32::try_from(value)
            .map(Some)
            .map_err(|_| self.out_of_range())
    }

    fn non_negative_float(&self) -> Result<f32> {
        let value = leading_float(self.value);
        if value < 0.0 {
            Err(self.out_of_range())
        } else {
            Ok(value)
        }
    }

    /// Negative values disable the option.
    fn optional_float(&self) -> Option<f32> {
        enabled(Some(leading_float(self.value)))
    }

    fn apply(&self, options: &mut TaggerOptions) -> Result<()> {
        match self.field {
            Field::Estimator => options.estimator = self.vocabulary()?,
            Field::Inference => options.inference = self.vocabulary()?,
            Field::SuffixLength => options.suffix_length = self.uint()?,
            Field::Degree => options.degree = self.uint()?,
            Field::MaxTrainPasses => options.max_train_passes = self.uint()?,
            Field::MaxLemmatizerPasses => options.max_lemmatizer_passes = self.uint()?,
            Field::MaxUselessPasses => options.max_useless_passes = self.uint()?,
            Field::GuessMass => options.guess_mass = self.non_negative_float()?,
            Field::Beam => options.beam = self.optional_uint()?,
            Field::BeamMass => options.beam_mass = self.optional_float(),
            Field::Regularization => options.regularization = self.vocabulary()?,
            Field::Delta => options.delta = self.optional_float(),
            Field::Sigma => options.sigma = self.optional_float(),
            Field::UseLabelDictionary => options.use_label_dictionary = self.uint()? != 0,
        }
        debug!(line = self.line, key = self.field.name(), value = self.value, "applied option");
        Ok(())
    }
}

impl TaggerOptions {
    /// Parse a text config, starting from [`TaggerOptions::default`].
    ///
    /// `counter` is incremented once for every line read, including the line
    /// that fails, so callers can report where parsing stopped. Errors carry
    /// the same number.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::Syntax`] for an unrecognised option or an
    /// enumerated value outside its vocabulary, [`OptionsError::NumericalRange`]
    /// for a negative or oversized value where neither is allowed, and
    /// [`OptionsError::ReadFailed`] if the reader fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagger_options::{Inference, TaggerOptions};
    ///
    /// let mut counter = 0;
    /// let text = "# decoding\ninference = MARGINAL\n";
    /// #[expect(clippy::unwrap_used, reason = "test should fail loudly")]
    /// let options = TaggerOptions::read_config(text.as_bytes(), &mut counter).unwrap();
    /// assert_eq!(options.inference, Inference::Marginal);
    /// assert_eq!(counter, 2);
    /// ```
    pub fn read_config<R: BufRead>(mut reader: R, counter: &mut usize) -> Result<Self> {
        let mut options = Self::default();
        let mut raw = Vec::new();
        loop {
            raw.clear();
            if reader
                .read_until(b'\n', &mut raw)
                .map_err(OptionsError::ReadFailed)?
                == 0
            {
                break;
            }
            *counter += 1;
            // Invalid UTF-8 decodes to U+FFFD.
            let line = despace(&String::from_utf8_lossy(&raw).replace('\n', ""));
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (field, value) = Field::ALL
                .into_iter()
                .find_map(|field| value_after(&line, field.marker()).map(|value| (field, value)))
                .ok_or_else(|| OptionsError::Syntax {
                    line: *counter,
                    kind: SyntaxErrorKind::UnrecognisedKey(line.clone()),
                })?;
            Assignment {
                line: *counter,
                field,
                value,
            }
            .apply(&mut options)?;
        }
        Ok(options)
    }

    /// Parse a text config held in memory.
    ///
    /// # Errors
    ///
    /// See [`TaggerOptions::read_config`].
    pub fn from_config_str(text: &str) -> Result<Self> {
        let mut counter = 0;
        Self::read_config(text.as_bytes(), &mut counter)
    }

    /// Parse the text config stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::Io`] if the file cannot be opened or read, and
    /// otherwise the errors of [`TaggerOptions::read_config`].
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let io_error = |source| OptionsError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_error)?;
        let mut counter = 0;
        Self::read_config(BufReader::new(file), &mut counter).map_err(|e| match e {
            OptionsError::ReadFailed(source) => io_error(source),
            other => other,
        })
    }
}
