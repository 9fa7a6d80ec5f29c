/// Numeric helpers.
///
/// This module provides the integer-to-float promotion used for mixed
/// arithmetic, floor-convention division and modulo for integers and floats,
/// and the text rendering of floats.
pub mod num;
