use crate::allocator::Allocator;
use crate::config::ShuffleConfig;
use crate::error::ShuffleError;
use crate::sampling::RandomSource;
use crate::types::*;
use serde::{Deserialize, Serialize};
use tracing::info;

/// One shuffle run: validated settings, the squad pools and the target groups
pub struct Shuffle {
    squads: Vec<Squad>,
    groups: Vec<Group>,
    allocator: Allocator,
    allocated: bool,
}

impl Shuffle {
    /// Validate the settings and set up fresh pools and empty groups
    pub fn new(config: &ShuffleConfig) -> Result<Self, ShuffleError> {
        config.validate()?;

        let groups = config
            .target_sizes()?
            .into_iter()
            .map(Group::new)
            .collect();

        Ok(Self {
            squads: config.build_squads(),
            groups,
            allocator: Allocator::new(config.multiplier()?),
            allocated: false,
        })
    }

    pub fn squads(&self) -> &[Squad] {
        &self.squads
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Fill all groups. Pools are consumed, so a second call is a no-op.
    pub fn run(&mut self, rng: &mut impl RandomSource) -> Result<&[Group], ShuffleError> {
        if !self.allocated {
            self.allocator.allocate(&mut self.squads, &mut self.groups, rng)?;
            self.allocated = true;

            let leftover = Allocator::remaining(&self.squads);
            if leftover > 0 {
                info!(leftover, "members left unassigned");
            }
        }
        Ok(&self.groups)
    }

    /// Members still sitting in a pool after the run
    pub fn unassigned(&self) -> Vec<String> {
        self.squads
            .iter()
            .flat_map(|s| s.members().iter().cloned())
            .collect()
    }

    pub fn report(&self) -> ShuffleReport {
        let groups = self
            .groups
            .iter()
            .map(|group| GroupReport {
                expected_size: group.expected_size,
                drained: group.drained,
                members: group
                    .members
                    .iter()
                    .map(|name| AssignedMember {
                        name: name.clone(),
                        squad: self
                            .squads
                            .iter()
                            .find(|s| s.has_original_member(name))
                            .map(|s| s.name.clone()),
                    })
                    .collect(),
            })
            .collect();

        ShuffleReport {
            groups,
            unassigned: self.unassigned(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssignedMember {
    pub name: String,
    /// Squad whose roster listed this member, if any
    pub squad: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroupReport {
    pub expected_size: usize,
    pub drained: bool,
    pub members: Vec<AssignedMember>,
}

/// Serializable outcome of a run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShuffleReport {
    pub groups: Vec<GroupReport>,
    pub unassigned: Vec<String>,
}
