//! Binary option records.
//!
//! A record is two parallel vectors written with [`crate::wire`]: field names,
//! then field values as `f32`. Fields are matched by name on load, so a
//! reader skips (with a warning) any field it does not know and keeps the
//! value it already had for any field the record lacks. Disabled options are
//! stored as `-1`.

use std::io::{self, Read, Write};

use tracing::{debug, warn};

use crate::{
    error::{OptionsError, Result},
    field::Field,
    options::{TaggerOptions, Vocabulary, enabled},
    wire::{read_vector, write_vector},
};

/// Wire value of a disabled option.
pub const DISABLED: f32 = -1.0;

/// Receives non-fatal diagnostics raised while loading a record.
pub trait DiagnosticSink {
    /// Report a problem that did not stop the load.
    fn warn(&mut self, message: &str);
}

/// Collects messages in memory.
impl DiagnosticSink for Vec<String> {
    fn warn(&mut self, message: &str) {
        self.push(message.to_owned());
    }
}

/// Forwards messages to `tracing` at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warn(&mut self, message: &str) {
        warn!("{message}");
    }
}

/// Writes one line per message to any [`Write`] implementation.
///
/// Write failures are dropped; a diagnostic must not fail the load.
#[derive(Debug)]
pub struct WriterSink<W: Write>(pub W);

impl<W: Write> DiagnosticSink for WriterSink<W> {
    fn warn(&mut self, message: &str) {
        let _ = writeln!(self.0, "{message}");
    }
}

#[expect(clippy::cast_precision_loss, reason = "stored values are small counts")]
fn count(value: u32) -> f32 {
    value as f32
}

/// Overwrite `slot` if `value` is a known ordinal of `T`.
fn set_ordinal<T: Vocabulary>(slot: &mut T, value: f32) -> bool {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "ordinals are checked non-negative and truncate like integer casts"
    )]
    let index = (value >= 0.0).then_some(value as u32);
    match index.and_then(T::from_ordinal) {
        Some(variant) => {
            *slot = variant;
            true
        }
        None => false,
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "stored counts truncate toward zero and saturate"
)]
fn to_count(value: f32) -> u32 {
    value as u32
}

fn to_optional(value: f32) -> Option<f32> {
    enabled(Some(value))
}

impl TaggerOptions {
    /// Every field paired with its stored value, in storage order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagger_options::{Field, TaggerOptions};
    ///
    /// let values = TaggerOptions::default().field_values();
    /// assert_eq!(values.len(), Field::ALL.len());
    /// assert_eq!(values[0], (Field::Estimator, 0.0));
    /// assert_eq!(values[11], (Field::Delta, -1.0));
    /// ```
    #[must_use]
    pub fn field_values(&self) -> Vec<(Field, f32)> {
        Field::ALL
            .into_iter()
            .map(|field| (field, self.stored_value(field)))
            .collect()
    }

    fn stored_value(&self, field: Field) -> f32 {
        match field {
            Field::Estimator => count(self.estimator as u32),
            Field::Inference => count(self.inference as u32),
            Field::SuffixLength => count(self.suffix_length),
            Field::Degree => count(self.degree),
            Field::MaxTrainPasses => count(self.max_train_passes),
            Field::MaxLemmatizerPasses => count(self.max_lemmatizer_passes),
            Field::MaxUselessPasses => count(self.max_useless_passes),
            Field::GuessMass => self.guess_mass,
            Field::Beam => self.beam.map_or(DISABLED, count),
            Field::BeamMass => enabled(self.beam_mass).unwrap_or(DISABLED),
            Field::Regularization => count(self.regularization as u32),
            Field::Delta => enabled(self.delta).unwrap_or(DISABLED),
            Field::Sigma => enabled(self.sigma).unwrap_or(DISABLED),
            Field::UseLabelDictionary => count(u32::from(self.use_label_dictionary)),
        }
    }

    /// Returns `false`, leaving the field untouched, if `value` is not a
    /// variant this version knows.
    fn set_stored_value(&mut self, field: Field, value: f32) -> bool {
        match field {
            Field::Estimator => return set_ordinal(&mut self.estimator, value),
            Field::Inference => return set_ordinal(&mut self.inference, value),
            Field::SuffixLength => self.suffix_length = to_count(value),
            Field::Degree => self.degree = to_count(value),
            Field::MaxTrainPasses => self.max_train_passes = to_count(value),
            Field::MaxLemmatizerPasses => self.max_lemmatizer_passes = to_count(value),
            Field::MaxUselessPasses => self.max_useless_passes = to_count(value),
            Field::GuessMass => self.guess_mass = value,
            Field::Beam => self.beam = to_optional(value).map(to_count),
            Field::BeamMass => self.beam_mass = to_optional(value),
            Field::Regularization => return set_ordinal(&mut self.regularization, value),
            Field::Delta => self.delta = to_optional(value),
            Field::Sigma => self.sigma = to_optional(value),
            Field::UseLabelDictionary => self.use_label_dictionary = to_count(value) != 0,
        }
        true
    }

    /// Write the record as a name vector followed by a value vector.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::WriteFailed`] if `writer` fails.
    pub fn store<W: Write>(&self, mut writer: W) -> Result<()> {
        let (names, values): (Vec<String>, Vec<f32>) = self
            .field_values()
            .into_iter()
            .map(|(field, value)| (field.name().to_owned(), value))
            .unzip();
        write_vector(&mut writer, &names)
            .and_then(|()| write_vector(&mut writer, &values))
            .and_then(|()| writer.flush())
            .map_err(OptionsError::WriteFailed)?;
        debug!(fields = names.len(), "stored options");
        Ok(())
    }

    /// Read a record written by [`TaggerOptions::store`].
    ///
    /// Loading starts from [`TaggerOptions::zeroed`]. Unknown field names, and
    /// enumerated values outside this version's vocabulary, are reported to
    /// `sink` and skipped; a skipped enumerated field keeps its zeroed
    /// variant. Pass `reverse_bytes` when the record was written on a machine
    /// of the opposite endianness.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::ReadFailed`] if the stream ends early or holds
    /// malformed data, and [`OptionsError::BadBinary`] if the name and value
    /// vectors differ in length.
    pub fn load<R: Read>(
        mut reader: R,
        reverse_bytes: bool,
        sink: &mut impl DiagnosticSink,
    ) -> Result<Self> {
        let names: Vec<String> =
            read_vector(&mut reader, reverse_bytes).map_err(OptionsError::ReadFailed)?;
        let values: Vec<f32> =
            read_vector(&mut reader, reverse_bytes).map_err(OptionsError::ReadFailed)?;
        if names.len() != values.len() {
            return Err(OptionsError::BadBinary {
                names: names.len(),
                values: values.len(),
            });
        }

        let mut options = Self::zeroed();
        for (name, value) in names.iter().zip(values) {
            match Field::from_name(name) {
                Some(field) => {
                    if !options.set_stored_value(field, value) {
                        debug!(name = name.as_str(), value, "skipping unknown variant");
                        sink.warn(&format!(
                            "ignoring unknown value {value} for option `{name}`; the record was written by a newer version"
                        ));
                    }
                }
                None => {
                    debug!(name = name.as_str(), value, "skipping unknown option");
                    sink.warn(&format!(
                        "ignoring unknown option `{name}`; the record was written by a newer version"
                    ));
                }
            }
        }
        debug!(fields = names.len(), reverse_bytes, "loaded options");
        Ok(options)
    }

    /// Store the record into a new byte vector.
    ///
    /// # Errors
    ///
    /// See [`TaggerOptions::store`].
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.store(&mut bytes)?;
        Ok(bytes)
    }

    /// Load a record from an in-memory byte slice written in host byte order.
    ///
    /// # Errors
    ///
    /// See [`TaggerOptions::load`].
    pub fn from_bytes(bytes: &[u8], sink: &mut impl DiagnosticSink) -> Result<Self> {
        Self::load(bytes, false, sink)
    }
}

/// Write a raw name/value record, bypassing [`TaggerOptions`].
///
/// Useful for producing records with fields this version does not know.
///
/// # Errors
///
/// Returns [`OptionsError::WriteFailed`] if `writer` fails.
pub fn write_record<W: Write>(mut writer: W, names: &[String], values: &[f32]) -> Result<()> {
    write_vector(&mut writer, names)
        .and_then(|()| write_vector(&mut writer, values))
        .map_err(OptionsError::WriteFailed)
}

/// Whether `error` means the record stream ended before both vectors were read.
#[must_use]
pub fn is_truncated(error: &OptionsError) -> bool {
    matches!(error, OptionsError::ReadFailed(e) if e.kind() == io::ErrorKind::UnexpectedEof)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Estimator, Inference, Regularization};
    use rstest::{fixture, rstest};

    #[fixture]
    fn tuned() -> TaggerOptions {
        TaggerOptions {
            estimator: Estimator::Ml,
            inference: Inference::Marginal,
            suffix_length: 8,
            degree: 7,
            max_train_passes: 6,
            max_lemmatizer_passes: 6,
            max_useless_passes: 5,
            guess_mass: 0.9999,
            beam: Some(3),
            beam_mass: Some(6.0),
            regularization: Regularization::L1,
            delta: Some(2.0),
            sigma: Some(1.0),
            use_label_dictionary: false,
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|&n| n.to_owned()).collect()
    }

    #[rstest]
    fn round_trip(tuned: TaggerOptions) {
        let bytes = tuned.to_bytes().unwrap_or_else(|e| panic!("store: {e}"));
        let mut sink: Vec<String> = Vec::new();
        let back = TaggerOptions::from_bytes(&bytes, &mut sink)
            .unwrap_or_else(|e| panic!("load: {e}"));
        assert_eq!(back, tuned);
        assert!(sink.is_empty());
    }

    #[rstest]
    fn disabled_options_store_sentinel() {
        let values = TaggerOptions::default().field_values();
        for field in [Field::Beam, Field::BeamMass, Field::Delta, Field::Sigma] {
            assert!(values.contains(&(field, DISABLED)), "{field:?} not disabled");
        }
    }

    #[rstest]
    fn unknown_field_is_reported_and_skipped(tuned: TaggerOptions) {
        let (mut list, mut values): (Vec<String>, Vec<f32>) = tuned
            .field_values()
            .into_iter()
            .map(|(f, v)| (f.name().to_owned(), v))
            .unzip();
        list.insert(3, "temperature".to_owned());
        values.insert(3, 0.7);
        let mut bytes: Vec<u8> = Vec::new();
        write_record(&mut bytes, &list, &values).unwrap_or_else(|e| panic!("write: {e}"));

        let mut sink: Vec<String> = Vec::new();
        let back = TaggerOptions::from_bytes(&bytes, &mut sink)
            .unwrap_or_else(|e| panic!("load: {e}"));
        assert_eq!(back, tuned);
        assert_eq!(sink.len(), 1);
        assert!(sink.iter().all(|m| m.contains("temperature")));
    }

    #[rstest]
    fn missing_fields_stay_zeroed() {
        let mut bytes: Vec<u8> = Vec::new();
        write_record(&mut bytes, &names(&["degree", "beam"]), &[3.0, 12.0])
            .unwrap_or_else(|e| panic!("write: {e}"));
        let back = TaggerOptions::from_bytes(&bytes, &mut Vec::<String>::new())
            .unwrap_or_else(|e| panic!("load: {e}"));
        let expected = TaggerOptions {
            degree: 3,
            beam: Some(12),
            ..TaggerOptions::zeroed()
        };
        assert_eq!(back, expected);
    }

    #[rstest]
    fn mismatched_lengths_are_bad_binary() {
        let mut bytes: Vec<u8> = Vec::new();
        write_record(&mut bytes, &names(&["degree", "beam"]), &[3.0])
            .unwrap_or_else(|e| panic!("write: {e}"));
        let result = TaggerOptions::from_bytes(&bytes, &mut Vec::<String>::new());
        assert!(matches!(
            result,
            Err(OptionsError::BadBinary {
                names: 2,
                values: 1
            })
        ));
    }

    #[rstest]
    fn truncated_record_fails_to_read(tuned: TaggerOptions) {
        let bytes = tuned.to_bytes().unwrap_or_else(|e| panic!("store: {e}"));
        let cut = bytes.get(..bytes.len() - 2).unwrap_or_default();
        let result = TaggerOptions::from_bytes(cut, &mut Vec::<String>::new());
        assert!(result.as_ref().is_err_and(is_truncated), "got {result:?}");
    }

    #[rstest]
    #[case("estimator", 2.0)]
    #[case("regularization", 3.0)]
    #[case("inference", -1.0)]
    fn unknown_variant_is_reported_and_skipped(#[case] name: &str, #[case] value: f32) {
        let mut bytes: Vec<u8> = Vec::new();
        write_record(&mut bytes, &names(&[name, "degree"]), &[value, 4.0])
            .unwrap_or_else(|e| panic!("write: {e}"));
        let mut sink: Vec<String> = Vec::new();
        let back = TaggerOptions::from_bytes(&bytes, &mut sink)
            .unwrap_or_else(|e| panic!("load: {e}"));
        let expected = TaggerOptions {
            degree: 4,
            ..TaggerOptions::zeroed()
        };
        assert_eq!(back, expected);
        assert_eq!(sink.len(), 1);
        assert!(sink.iter().all(|m| m.contains(name)));
    }

    #[rstest]
    fn negative_sentinels_survive_storage() {
        let options = TaggerOptions {
            delta: Some(-3.0),
            beam_mass: Some(-0.5),
            ..TaggerOptions::default()
        };
        let values = options.field_values();
        assert!(values.contains(&(Field::Delta, DISABLED)));
        assert!(values.contains(&(Field::BeamMass, DISABLED)));
        let bytes = options.to_bytes().unwrap_or_else(|e| panic!("store: {e}"));
        let back = TaggerOptions::from_bytes(&bytes, &mut Vec::<String>::new())
            .unwrap_or_else(|e| panic!("load: {e}"));
        assert_eq!(back, options);
        assert!(back.delta.is_none());
    }

    #[rstest]
    fn reversed_record_loads(tuned: TaggerOptions) {
        let mut bytes: Vec<u8> = Vec::new();
        let list: Vec<String> = Field::ALL.iter().map(|f| f.name().to_owned()).collect();
        let swap = |word: u32| word.swap_bytes().to_ne_bytes();
        bytes.extend_from_slice(&swap(14));
        for name in &list {
            bytes.extend_from_slice(&swap(u32::try_from(name.len()).unwrap_or_default()));
            bytes.extend_from_slice(name.as_bytes());
        }
        bytes.extend_from_slice(&swap(14));
        for (_, value) in tuned.field_values() {
            bytes.extend_from_slice(&swap(value.to_bits()));
        }
        let back = TaggerOptions::load(bytes.as_slice(), true, &mut Vec::<String>::new())
            .unwrap_or_else(|e| panic!("load: {e}"));
        assert_eq!(back, tuned);
    }

    #[rstest]
    fn tracing_sink_does_not_fail_load() {
        let mut bytes: Vec<u8> = Vec::new();
        write_record(&mut bytes, &names(&["degree", "window"]), &[4.0, 9.0])
            .unwrap_or_else(|e| panic!("write: {e}"));
        let back = TaggerOptions::from_bytes(&bytes, &mut TracingSink)
            .unwrap_or_else(|e| panic!("load: {e}"));
        assert_eq!(back.degree, 4);
    }

    #[rstest]
    fn writer_sink_writes_lines() {
        let mut sink = WriterSink(Vec::<u8>::new());
        sink.warn("first");
        sink.warn("second");
        assert_eq!(sink.0, b"first\nsecond\n");
    }
}
