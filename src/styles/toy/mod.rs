//! Toy stylizer used by the demo binary and tests.

mod effect;

pub use effect::ToyStylizer;
