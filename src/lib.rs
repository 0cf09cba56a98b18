//! Hyperparameter record for a statistical sequence tagger.
//!
//! [`TaggerOptions`] is read from a line-oriented `key=value` config file,
//! stored in and loaded from a forward-compatible binary record, and compared
//! with a small tolerance on floating-point fields.

pub mod codec;
pub mod error;
pub mod field;
pub mod options;
pub mod parse;
pub mod render;
pub mod wire;

pub use codec::{DiagnosticSink, TracingSink, WriterSink};
pub use error::{OptionsError, Result, SyntaxErrorKind};
pub use field::Field;
pub use options::{Estimator, Inference, Regularization, TaggerOptions, Vocabulary};

pub mod tests;
