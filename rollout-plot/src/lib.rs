#[macro_use]
extern crate log;

mod trajectory;

pub use trajectory::{draw_trajectory, plot};

pub type Series = Vec<(f64, f64)>;
