//! Linear minimization oracles for common market structures.
//!
//! - [`ExclusiveOracle`] - Mutually exclusive outcomes (one-hot vertices)
//! - [`ImplicationOracle`] - Chain of nested events `x_0 >= x_1 >= ...`
//! - [`VertexOracle`] - Explicit list of valid outcome vectors
//! - [`MipOracle`] - Binary program over linear constraints (HiGHS)

mod exclusive;
#[cfg(feature = "highs")]
mod highs;
mod implication;
mod vertex;

pub use exclusive::ExclusiveOracle;
#[cfg(feature = "highs")]
pub use highs::MipOracle;
pub use implication::ImplicationOracle;
pub use vertex::VertexOracle;

/// Index of the smallest value; the lowest index wins ties.
pub(crate) fn argmin(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, value) in values.iter().copied().enumerate() {
        if value.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if value >= current => {}
            _ => best = Some((index, value)),
        }
    }
    best.map(|(index, _)| index)
}
