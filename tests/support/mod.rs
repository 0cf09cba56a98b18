#![allow(dead_code, reason = "each test crate uses a subset of the helpers")]

#[expect(clippy::float_arithmetic, reason = "tolerance comparison")]
#[must_use]
pub fn approx_eq(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() < tol
}

/// Five valid assignments, as found at the top of a typical config.
pub const VALID_PREFIX: &str = "sigma = 1\n\
                                delta = 2\n\
                                regularization=L1\n\
                                beam=3\n\
                                guess_mass=0.9999\n";

/// A config assigning every option a non-default value.
pub const FULL_OVERRIDE: &str = "sigma = 1\n\
                                 delta = 2\n\
                                 regularization=L1\n\
                                 beam=3\n\
                                 guess_mass=0.9999\n\
                                 max_useless_passes =5\n\
                                 max_train_passes =6\n\
                                 max_lemmatizer_passes =6\n\
                                 degree =7\n\
                                 suffix_length =8\n\
                                 inference =MARGINAL\n\
                                 estimator=ML\n\
                                 beam_mass=6\n\
                                 use_label_dictionary=0";
