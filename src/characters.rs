use crate::input::Direction;

pub const ROSTER: [&str; 23] = [
    "Astra", "Breach", "Brimstone", "Chamber", "Clove", "Cypher", "Fade", "Gekko", "Harbor",
    "Iso", "Jett", "Killjoy", "Neon", "Omen", "Phoenix", "Raze", "Reyna", "Sage", "Skye",
    "Sova", "Viper", "Vyse", "Waylay",
];

/// Columns in the selection grid.
pub const PER_ROW: usize = 4;

/// An avatar from the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Character(usize);

impl Character {
    pub fn from_index(index: usize) -> Option<Self> {
        (index < ROSTER.len()).then_some(Character(index))
    }

    pub fn index(&self) -> usize {
        self.0
    }

    pub fn name(&self) -> &'static str {
        ROSTER[self.0]
    }

    /// Single-cell marker used to draw the avatar in the arena.
    pub fn glyph(&self) -> char {
        self.name().chars().next().unwrap_or('@')
    }
}

impl Default for Character {
    fn default() -> Self {
        // Phoenix
        Character(14)
    }
}

/// Move a grid cursor one step, wrapping around the roster.
pub fn move_cursor(cursor: usize, dir: Direction) -> usize {
    let total = ROSTER.len();
    let cursor = cursor.min(total - 1);
    match dir {
        Direction::Right => (cursor + 1) % total,
        Direction::Left => (cursor + total - 1) % total,
        Direction::Down => {
            if cursor + PER_ROW < total {
                cursor + PER_ROW
            } else {
                cursor % PER_ROW
            }
        }
        Direction::Up => {
            if cursor >= PER_ROW {
                cursor - PER_ROW
            } else {
                // Bottom-most cell in the same column
                let col = cursor % PER_ROW;
                (total - 1 - col) / PER_ROW * PER_ROW + col
            }
        }
    }
}
