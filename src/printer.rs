use crate::types::{Group, Squad, SquadColor};
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputStyle {
    Colored,
    Plain,
}

impl From<SquadColor> for Color {
    fn from(color: SquadColor) -> Self {
        match color {
            SquadColor::Black => Color::Black,
            SquadColor::DarkBlue => Color::DarkBlue,
            SquadColor::DarkGreen => Color::DarkGreen,
            SquadColor::DarkCyan => Color::DarkCyan,
            SquadColor::DarkRed => Color::DarkRed,
            SquadColor::DarkMagenta => Color::DarkMagenta,
            SquadColor::DarkYellow => Color::DarkYellow,
            SquadColor::Gray => Color::Grey,
            SquadColor::DarkGray => Color::DarkGrey,
            SquadColor::Blue => Color::Blue,
            SquadColor::Green => Color::Green,
            SquadColor::Cyan => Color::Cyan,
            SquadColor::Red => Color::Red,
            SquadColor::Magenta => Color::Magenta,
            SquadColor::Yellow => Color::Yellow,
            SquadColor::White => Color::White,
        }
    }
}

/// Color of the squad whose original roster lists `name`
pub fn color_of(name: &str, squads: &[Squad]) -> Option<SquadColor> {
    squads
        .iter()
        .find(|squad| squad.has_original_member(name))
        .map(|squad| squad.color)
}

/// Write one group as a single `a, b, c` line, each name in its squad's color.
/// Names no squad claims keep the terminal's default color.
pub fn write_group<W: Write>(
    out: &mut W,
    members: &[String],
    squads: &[Squad],
    style: OutputStyle,
) -> io::Result<()> {
    for (i, name) in members.iter().enumerate() {
        if i > 0 {
            queue!(out, Print(", "))?;
        }

        match (style, color_of(name, squads)) {
            (OutputStyle::Colored, Some(color)) => {
                queue!(out, SetForegroundColor(color.into()), Print(name), ResetColor)?
            }
            _ => queue!(out, Print(name))?,
        }
    }
    queue!(out, Print("\n"))?;
    out.flush()
}

pub fn write_groups<W: Write>(
    out: &mut W,
    groups: &[Group],
    squads: &[Squad],
    style: OutputStyle,
) -> io::Result<()> {
    for group in groups {
        write_group(out, &group.members, squads, style)?;
    }
    Ok(())
}
