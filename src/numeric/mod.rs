pub mod accumulator;
pub mod bounds;

pub use accumulator::{Accumulator, Edit, EditOutcome};
pub use bounds::{NumericBounds, Radix, is_within_bounds, parse_numeral};
