use crate::error::{ConfigError, ShuffleError};
use crate::sampling::RandomSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The sixteen classic console colors a squad can be displayed in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SquadColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkCyan,
    DarkRed,
    DarkMagenta,
    DarkYellow,
    Gray,
    DarkGray,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
}

impl SquadColor {
    pub const ALL: [SquadColor; 16] = [
        SquadColor::Black,
        SquadColor::DarkBlue,
        SquadColor::DarkGreen,
        SquadColor::DarkCyan,
        SquadColor::DarkRed,
        SquadColor::DarkMagenta,
        SquadColor::DarkYellow,
        SquadColor::Gray,
        SquadColor::DarkGray,
        SquadColor::Blue,
        SquadColor::Green,
        SquadColor::Cyan,
        SquadColor::Red,
        SquadColor::Magenta,
        SquadColor::Yellow,
        SquadColor::White,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SquadColor::Black => "Black",
            SquadColor::DarkBlue => "DarkBlue",
            SquadColor::DarkGreen => "DarkGreen",
            SquadColor::DarkCyan => "DarkCyan",
            SquadColor::DarkRed => "DarkRed",
            SquadColor::DarkMagenta => "DarkMagenta",
            SquadColor::DarkYellow => "DarkYellow",
            SquadColor::Gray => "Gray",
            SquadColor::DarkGray => "DarkGray",
            SquadColor::Blue => "Blue",
            SquadColor::Green => "Green",
            SquadColor::Cyan => "Cyan",
            SquadColor::Red => "Red",
            SquadColor::Magenta => "Magenta",
            SquadColor::Yellow => "Yellow",
            SquadColor::White => "White",
        }
    }
}

impl fmt::Display for SquadColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SquadColor {
    type Err = ConfigError;

    /// Case-insensitive; `_`, `-` and spaces are ignored and "grey" is accepted
    /// for "gray". `Bright<X>` names the light variant of a base color, so
    /// bright black is DarkGray and bright gray is White; `Bright<DarkX>` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect::<String>()
            .replace("grey", "gray");
        let unknown = || ConfigError::UnknownColor(s.to_string());

        let find = |name: &str| {
            SquadColor::ALL
                .iter()
                .copied()
                .find(|color| color.name().eq_ignore_ascii_case(name))
        };

        match normalized.strip_prefix("bright") {
            Some("black") => Ok(SquadColor::DarkGray),
            Some("gray") => Ok(SquadColor::White),
            Some(base) if base.starts_with("dark") => Err(unknown()),
            Some(base) => find(base).ok_or_else(unknown),
            None => find(&normalized).ok_or_else(unknown),
        }
    }
}

impl TryFrom<String> for SquadColor {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SquadColor> for String {
    fn from(color: SquadColor) -> Self {
        color.name().to_string()
    }
}

/// A source squad: an immutable roster plus the pool of members not yet placed
#[derive(Clone, Debug)]
pub struct Squad {
    pub name: String,
    pub color: SquadColor,
    /// Snapshot taken at construction, used for color attribution
    original_members: Vec<String>,
    /// Shrinks as members are drawn; always a subset of `original_members`
    members: Vec<String>,
}

impl Squad {
    pub fn new(name: impl Into<String>, color: SquadColor, members: Vec<String>) -> Self {
        Self {
            name: name.into(),
            color,
            original_members: members.clone(),
            members,
        }
    }

    pub fn original_members(&self) -> &[String] {
        &self.original_members
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn remaining(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether `name` was on this squad's roster when it was loaded
    pub fn has_original_member(&self, name: &str) -> bool {
        self.original_members.iter().any(|m| m == name)
    }

    /// Remove and return a uniformly chosen member of the current pool
    pub fn pick_random_member(
        &mut self,
        rng: &mut impl RandomSource,
    ) -> Result<String, ShuffleError> {
        if self.members.is_empty() {
            return Err(ShuffleError::EmptySquad {
                squad: self.name.clone(),
            });
        }
        let index = rng.next_in_range(0, self.members.len());
        Ok(self.members.remove(index))
    }

    /// Take every remaining member, in pool order, leaving the pool empty
    pub fn drain_members(&mut self) -> Vec<String> {
        std::mem::take(&mut self.members)
    }
}

/// A target group and, once filled, who ended up in it
#[derive(Clone, Debug, Default)]
pub struct Group {
    pub expected_size: usize,
    pub members: Vec<String>,
    /// Squad index of each weighted pick, parallel to `members`
    pub source_squads: Vec<usize>,
    /// Filled by taking every remaining member instead of weighted draws
    pub drained: bool,
}

impl Group {
    pub fn new(expected_size: usize) -> Self {
        Self {
            expected_size,
            ..Default::default()
        }
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// How often each of `squad_count` squads has been picked for this group
    pub fn pick_counts(&self, squad_count: usize) -> Vec<usize> {
        let mut counts = vec![0; squad_count];
        for &squad_index in &self.source_squads {
            if let Some(count) = counts.get_mut(squad_index) {
                *count += 1;
            }
        }
        counts
    }
}

/// Half-open interval `[start, end)` owned by one squad
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProportionalRange {
    pub start: u64,
    pub end: u64,
    pub squad_index: usize,
}

impl ProportionalRange {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn contains(&self, value: u64) -> bool {
        self.start <= value && value < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_color_parsing_ignores_case_and_separators() {
        assert_eq!("red".parse::<SquadColor>().unwrap(), SquadColor::Red);
        assert_eq!("DARKBLUE".parse::<SquadColor>().unwrap(), SquadColor::DarkBlue);
        assert_eq!("dark_magenta".parse::<SquadColor>().unwrap(), SquadColor::DarkMagenta);
        assert_eq!("Dark Grey".parse::<SquadColor>().unwrap(), SquadColor::DarkGray);
        assert_eq!("BrightCyan".parse::<SquadColor>().unwrap(), SquadColor::Cyan);
    }

    #[test]
    fn test_bright_names_map_to_light_variants() {
        assert_eq!("BrightBlack".parse::<SquadColor>().unwrap(), SquadColor::DarkGray);
        assert_eq!("bright_grey".parse::<SquadColor>().unwrap(), SquadColor::White);
        assert_eq!("BrightGray".parse::<SquadColor>().unwrap(), SquadColor::White);
        assert_eq!("Bright Red".parse::<SquadColor>().unwrap(), SquadColor::Red);
        assert_eq!("brightwhite".parse::<SquadColor>().unwrap(), SquadColor::White);
    }

    #[test]
    fn test_bright_dark_names_are_rejected() {
        for name in ["brightdarkred", "BrightDarkGray", "bright", "brightpurple"] {
            let err = name.parse::<SquadColor>().unwrap_err();
            assert!(matches!(err, ConfigError::UnknownColor(ref n) if n == name));
        }
    }

    #[test]
    fn test_unknown_color_is_rejected() {
        let err = "Purple".parse::<SquadColor>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownColor(ref name) if name == "Purple"));
    }

    #[test]
    fn test_color_round_trips_through_its_name() {
        for color in SquadColor::ALL {
            assert_eq!(color.name().parse::<SquadColor>().unwrap(), color);
        }
    }

    #[test]
    fn test_pick_random_member_shrinks_pool() {
        let mut squad = Squad::new("A", SquadColor::Red, names(&["a1", "a2", "a3"]));
        let mut rng = StdRng::seed_from_u64(7);

        let picked = squad.pick_random_member(&mut rng).unwrap();

        assert_eq!(squad.remaining(), 2);
        assert!(!squad.members().contains(&picked));
        assert!(squad.has_original_member(&picked));
        // Roster snapshot is untouched
        assert_eq!(squad.original_members().len(), 3);
    }

    #[test]
    fn test_pick_from_empty_squad_fails() {
        let mut squad = Squad::new("A", SquadColor::Red, names(&["a1"]));
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(squad.pick_random_member(&mut rng).unwrap(), "a1");
        let result = squad.pick_random_member(&mut rng);
        assert!(matches!(result, Err(ShuffleError::EmptySquad { ref squad }) if squad == "A"));
    }

    #[test]
    fn test_drain_members_keeps_pool_order() {
        let mut squad = Squad::new("B", SquadColor::Blue, names(&["b1", "b2"]));
        assert_eq!(squad.drain_members(), names(&["b1", "b2"]));
        assert!(squad.is_empty());
        assert!(squad.has_original_member("b2"));
    }

    #[test]
    fn test_group_pick_counts() {
        let mut group = Group::new(4);
        group.source_squads = vec![0, 2, 0, 1];
        assert_eq!(group.pick_counts(3), vec![2, 1, 1]);
        assert_eq!(Group::new(2).pick_counts(2), vec![0, 0]);
    }
}
