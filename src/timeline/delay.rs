use crate::{
    animation::ops::staggered_delay,
    foundation::error::{CurveError, CurveResult},
};

/// Per-element entrance delays for one scene, in frames.
///
/// Built once when a scene is set up; every element then reads its delay by index instead of
/// recomputing offsets inline.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DelayTable {
    delays: Vec<u64>,
}

impl DelayTable {
    /// Table from explicit per-element delays.
    pub fn from_delays(delays: Vec<u64>) -> Self {
        Self { delays }
    }

    /// `count` elements entering `per_item` frames apart, the first at `base`.
    pub fn stagger(count: usize, base: u64, per_item: u64) -> Self {
        let delays = (0..count as u64)
            .map(|i| base.saturating_add(staggered_delay(i, per_item)))
            .collect();
        Self { delays }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.delays.len()
    }

    /// `true` when the table has no elements.
    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }

    /// Delay of element `index`.
    pub fn delay(&self, index: usize) -> CurveResult<u64> {
        self.delays.get(index).copied().ok_or_else(|| {
            CurveError::validation(format!(
                "no delay for element {index} (table has {} entries)",
                self.delays.len()
            ))
        })
    }

    /// `frame` shifted into element `index`'s own timeline; negative before it enters.
    pub fn local_frame(&self, index: usize, frame: f64) -> CurveResult<f64> {
        Ok(frame - self.delay(index)? as f64)
    }

    /// Frame at which the last element starts entering.
    pub fn last_start(&self) -> Option<u64> {
        self.delays.iter().copied().max()
    }

    /// `(index, delay)` pairs in element order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.delays.iter().copied().enumerate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/delay.rs"]
mod tests;
