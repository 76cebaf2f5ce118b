//! Nullable jury selection.

use quill_types::{Address, DisputeId};
use quill_voting::JurySelector;

/// A predictable [`JurySelector`].
#[derive(Clone, Debug, Default)]
pub enum NullSelector {
    /// The first `count` jurors of the pool, in pool order.
    #[default]
    PoolOrder,
    /// Always this jury (truncated to `count`), whatever the pool.
    Fixed(Vec<Address>),
}

impl JurySelector for NullSelector {
    fn select(&self, pool: &[Address], _dispute_id: DisputeId, count: usize) -> Vec<Address> {
        let source = match self {
            NullSelector::PoolOrder => pool,
            NullSelector::Fixed(jurors) => jurors.as_slice(),
        };
        source.iter().take(count).cloned().collect()
    }
}
