use crate::error::ShuffleError;
use crate::sampling::{relative_weights, RandomSource, RangeTable};
use crate::types::*;
use tracing::{debug, info};

/// Fills groups from squad pools with weighted draws that discourage
/// taking several members of one squad into the same group
pub struct Allocator {
    same_squad_weight_multiplier: u32,
}

impl Allocator {
    pub fn new(same_squad_weight_multiplier: u32) -> Self {
        Self {
            same_squad_weight_multiplier,
        }
    }

    /// Members still waiting in any squad pool
    pub fn remaining(squads: &[Squad]) -> usize {
        squads.iter().map(Squad::remaining).sum()
    }

    /// Fill every group in order. Earlier groups draw first, so they shape
    /// what is left for later ones.
    pub fn allocate(
        &self,
        squads: &mut [Squad],
        groups: &mut [Group],
        rng: &mut impl RandomSource,
    ) -> Result<(), ShuffleError> {
        for (group_index, group) in groups.iter_mut().enumerate() {
            self.fill_group(squads, group, rng)?;

            info!(
                group = group_index,
                expected = group.expected_size,
                actual = group.size(),
                drained = group.drained,
                "group filled"
            );
        }
        Ok(())
    }

    /// Fill a single group, either by draining every pool (when there are no
    /// more members left than the group wants) or by `expected_size` weighted picks
    pub fn fill_group(
        &self,
        squads: &mut [Squad],
        group: &mut Group,
        rng: &mut impl RandomSource,
    ) -> Result<(), ShuffleError> {
        let remaining = Self::remaining(squads);

        if remaining <= group.expected_size {
            // Weighting is deliberately skipped here; everyone left joins this group
            for squad in squads.iter_mut() {
                group.members.extend(squad.drain_members());
            }
            group.drained = true;
            return Ok(());
        }

        for _ in 0..group.expected_size {
            let squad_index = self.pick_next_squad(squads, group, rng)?;
            let member = squads[squad_index].pick_random_member(rng)?;

            debug!(
                squad = %squads[squad_index].name,
                member = %member,
                remaining = Self::remaining(squads),
                "picked member"
            );

            group.source_squads.push(squad_index);
            group.members.push(member);
        }
        Ok(())
    }

    /// Choose the squad the group's next member comes from
    pub fn pick_next_squad(
        &self,
        squads: &[Squad],
        group: &Group,
        rng: &mut impl RandomSource,
    ) -> Result<usize, ShuffleError> {
        let weights = relative_weights(
            &group.pick_counts(squads.len()),
            self.same_squad_weight_multiplier,
        );
        let remaining: Vec<usize> = squads.iter().map(Squad::remaining).collect();

        let table = RangeTable::build(&weights, &remaining)?;
        Ok(table.sample(rng))
    }
}
