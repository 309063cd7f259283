use crate::error::ShuffleError;
use crate::types::ProportionalRange;
use rand::Rng;
use tracing::{trace, warn};

/// Scale applied to `weight * remaining` before rounding to an integer range length.
/// Weights are `1 / (m * k + 1)`, so two decimal places are plenty.
pub const RANGE_SCALE: f64 = 100.0;

/// Source of uniformly distributed integers
pub trait RandomSource {
    /// Uniform integer in `[low, high)`; callers guarantee `low < high`
    fn next_in_range(&mut self, low: usize, high: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_in_range(&mut self, low: usize, high: usize) -> usize {
        self.gen_range(low..high)
    }
}

/// Sampling weight of a squad that already supplied `already_picked`
/// members to the current group: `1 / (multiplier * already_picked + 1)`
pub fn repetition_weight(already_picked: usize, multiplier: u32) -> f64 {
    1.0 / (multiplier as f64 * already_picked as f64 + 1.0)
}

/// Per-squad weights for the next draw, given each squad's pick count in the group
pub fn relative_weights(pick_counts: &[usize], multiplier: u32) -> Vec<f64> {
    pick_counts
        .iter()
        .map(|&picked| repetition_weight(picked, multiplier))
        .collect()
}

/// Contiguous ranges covering `[0, total)`, one per drawable squad.
///
/// Never empty: `build` refuses to produce a table nothing can be drawn from.
#[derive(Clone, Debug)]
pub struct RangeTable {
    ranges: Vec<ProportionalRange>,
}

impl RangeTable {
    /// Lay out one range per squad, sized `round(RANGE_SCALE * weight * remaining)`.
    /// Squads whose size rounds to zero are left out.
    pub fn build(weights: &[f64], remaining: &[usize]) -> Result<Self, ShuffleError> {
        debug_assert_eq!(weights.len(), remaining.len());

        let mut ranges = Vec::with_capacity(weights.len());
        let mut current_start = 0u64;

        for (squad_index, (&weight, &count)) in weights.iter().zip(remaining).enumerate() {
            let length = (RANGE_SCALE * weight * count as f64).round() as u64;
            if length == 0 {
                continue;
            }

            let range = ProportionalRange {
                start: current_start,
                end: current_start + length,
                squad_index,
            };
            current_start = range.end;
            ranges.push(range);
        }

        if ranges.is_empty() {
            return Err(ShuffleError::NoDrawableSquads {
                remaining: remaining.iter().sum(),
            });
        }

        trace!(?ranges, "built proportional ranges");
        Ok(Self { ranges })
    }

    pub fn ranges(&self) -> &[ProportionalRange] {
        &self.ranges
    }

    /// Upper bound of the last range
    pub fn total(&self) -> u64 {
        self.ranges.last().map(|r| r.end).unwrap_or(0)
    }

    /// Squad owning `value`, found by a linear scan (squad counts are small).
    ///
    /// Values outside `[0, total)` fall back to the squad of the first range,
    /// which is not necessarily squad index 0: squad 0 owns no range when it
    /// is empty or penalized down to zero length.
    pub fn squad_at(&self, value: u64) -> usize {
        if let Some(range) = self.ranges.iter().find(|r| r.contains(value)) {
            return range.squad_index;
        }

        warn!(value, total = self.total(), "value outside proportional ranges, using first squad");
        self.ranges[0].squad_index
    }

    /// Draw a squad index with probability proportional to its range length
    pub fn sample(&self, rng: &mut impl RandomSource) -> usize {
        // usize comfortably holds the total for any realistic roster
        let value = rng.next_in_range(0, self.total() as usize) as u64;
        self.squad_at(value)
    }
}
