/// Runtime numeric values.
///
/// Defines the `Number` type produced by evaluation, its promotion rule for
/// mixed integer/float arithmetic, and its text rendering.
pub mod core;
