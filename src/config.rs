use crate::error::ConfigError;
use crate::types::{Squad, SquadColor};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::warn;

/// Default location of the settings file, relative to the working directory
pub const DEFAULT_SETTINGS_PATH: &str = "./settings.json";

/// One squad as written in the settings file
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SquadConfig {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Members")]
    pub members: Vec<String>,
    #[serde(alias = "Color")]
    pub color: SquadColor,
}

/// Shuffle settings.
///
/// Sizes and the multiplier are kept signed so that negative values in the
/// file are reported by [`ShuffleConfig::validate`] rather than as a parse error.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShuffleConfig {
    #[serde(alias = "Squads")]
    pub squads: Vec<SquadConfig>,
    /// Expected size of each target group, filled in this order
    #[serde(alias = "GroupSizes")]
    pub group_sizes: Vec<i64>,
    /// How strongly repeat picks from one squad are penalized within a group
    #[serde(alias = "SameSquadWeightMultiplier", default = "default_multiplier")]
    pub same_squad_weight_multiplier: i64,
}

/// A missing multiplier means no same-squad penalty
fn default_multiplier() -> i64 {
    0
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self {
            squads: Vec::new(),
            group_sizes: Vec::new(),
            same_squad_weight_multiplier: default_multiplier(),
        }
    }
}

impl ShuffleConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a settings file (not validated yet)
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Check everything the allocator relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.target_sizes()?;
        self.multiplier()?;

        let mut seen = HashSet::new();
        for squad in &self.squads {
            for member in &squad.members {
                if !seen.insert(member.as_str()) {
                    warn!(member = %member, squad = %squad.name, "member listed more than once");
                }
            }
        }
        Ok(())
    }

    /// Group sizes as counts; fails on the first negative entry
    pub fn target_sizes(&self) -> Result<Vec<usize>, ConfigError> {
        self.group_sizes
            .iter()
            .enumerate()
            .map(|(group, &size)| {
                usize::try_from(size).map_err(|_| ConfigError::NegativeGroupSize { group, size })
            })
            .collect()
    }

    pub fn multiplier(&self) -> Result<u32, ConfigError> {
        let value = self.same_squad_weight_multiplier;
        if value < 0 {
            return Err(ConfigError::NegativeMultiplier(value));
        }
        u32::try_from(value).map_err(|_| ConfigError::MultiplierOutOfRange(value))
    }

    /// Fresh squad pools, each with its roster snapshot
    pub fn build_squads(&self) -> Vec<Squad> {
        self.squads
            .iter()
            .map(|s| Squad::new(s.name.clone(), s.color, s.members.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS: &str = r#"{
        "squads": [
            { "name": "Alpha", "members": ["a1", "a2", "a3"], "color": "red" },
            { "name": "Bravo", "members": ["b1", "b2"], "color": "DARKCYAN" }
        ],
        "groupSizes": [3, 2],
        "sameSquadWeightMultiplier": 2
    }"#;

    #[test]
    fn test_parse_settings() {
        let config = ShuffleConfig::from_json(SETTINGS).unwrap();
        config.validate().unwrap();

        assert_eq!(config.squads.len(), 2);
        assert_eq!(config.squads[0].color, SquadColor::Red);
        assert_eq!(config.squads[1].color, SquadColor::DarkCyan);
        assert_eq!(config.target_sizes().unwrap(), vec![3, 2]);
        assert_eq!(config.multiplier().unwrap(), 2);
    }

    #[test]
    fn test_parse_pascal_case_settings() {
        let json = r#"{
            "Squads": [ { "Name": "Alpha", "Members": ["a1"], "Color": "Green" } ],
            "GroupSizes": [1],
            "SameSquadWeightMultiplier": 0
        }"#;
        let config = ShuffleConfig::from_json(json).unwrap();
        assert_eq!(config.squads[0].name, "Alpha");
        assert_eq!(config.multiplier().unwrap(), 0);
    }

    #[test]
    fn test_missing_multiplier_means_no_penalty() {
        let json = r#"{ "Squads": [], "GroupSizes": [] }"#;
        let config = ShuffleConfig::from_json(json).unwrap();
        assert_eq!(config.multiplier().unwrap(), 0);
    }

    #[test]
    fn test_unknown_color_fails_to_parse() {
        let json = r#"{
            "squads": [ { "name": "Alpha", "members": ["a1"], "color": "Purple" } ],
            "groupSizes": [1]
        }"#;
        let err = ShuffleConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Purple"));
    }

    #[test]
    fn test_negative_group_size_is_rejected() {
        let json = r#"{ "squads": [], "groupSizes": [2, -1] }"#;
        let config = ShuffleConfig::from_json(json).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::NegativeGroupSize { group: 1, size: -1 }));
    }

    #[test]
    fn test_negative_multiplier_is_rejected() {
        let config = ShuffleConfig {
            same_squad_weight_multiplier: -3,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NegativeMultiplier(-3))));
    }

    #[test]
    fn test_oversized_multiplier_is_rejected() {
        let too_big = i64::from(u32::MAX) + 1;
        let config = ShuffleConfig {
            same_squad_weight_multiplier: too_big,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::MultiplierOutOfRange(v)) if v == too_big));

        let largest = ShuffleConfig {
            same_squad_weight_multiplier: i64::from(u32::MAX),
            ..Default::default()
        };
        assert_eq!(largest.multiplier().unwrap(), u32::MAX);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = ShuffleConfig::load("does/not/exist.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.json"));
    }

    #[test]
    fn test_build_squads_snapshots_rosters() {
        let config = ShuffleConfig::from_json(SETTINGS).unwrap();
        let squads = config.build_squads();
        assert_eq!(squads[1].name, "Bravo");
        assert_eq!(squads[1].original_members(), squads[1].members());
        assert_eq!(squads[1].remaining(), 2);
    }
}
