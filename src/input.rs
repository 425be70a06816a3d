use crossterm::event::KeyCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Up => Some(Direction::Up),
            KeyCode::Down => Some(Direction::Down),
            KeyCode::Left => Some(Direction::Left),
            KeyCode::Right => Some(Direction::Right),
            _ => None,
        }
    }

    fn slot(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

/// Directions held during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Directions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Directions {
    /// Displacement for one tick. Opposite keys cancel out.
    pub fn delta(&self, speed: i32) -> (i32, i32) {
        let dx = (self.right as i32 - self.left as i32) * speed;
        let dy = (self.down as i32 - self.up as i32) * speed;
        (dx, dy)
    }
}

/// Tracks which arrow keys are currently held.
///
/// Terminals without the keyboard enhancement protocol never send key
/// releases, only presses and auto-repeats. In that mode a key counts as
/// held for `hold_ticks` ticks after the last event seen for it.
pub struct HeldKeys {
    last_seen: [Option<u64>; 4],
    hold_ticks: Option<u64>,
}

impl HeldKeys {
    /// `None` means releases are reported and keys stay held until released.
    pub fn new(hold_ticks: Option<u64>) -> Self {
        Self {
            last_seen: [None; 4],
            hold_ticks,
        }
    }

    pub fn press(&mut self, dir: Direction, tick: u64) {
        self.last_seen[dir.slot()] = Some(tick);
    }

    pub fn release(&mut self, dir: Direction) {
        self.last_seen[dir.slot()] = None;
    }

    pub fn clear(&mut self) {
        self.last_seen = [None; 4];
    }

    fn is_held(&self, dir: Direction, tick: u64) -> bool {
        match (self.last_seen[dir.slot()], self.hold_ticks) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(seen), Some(hold)) => tick.saturating_sub(seen) <= hold,
        }
    }

    pub fn sample(&self, tick: u64) -> Directions {
        Directions {
            up: self.is_held(Direction::Up, tick),
            down: self.is_held(Direction::Down, tick),
            left: self.is_held(Direction::Left, tick),
            right: self.is_held(Direction::Right, tick),
        }
    }
}
