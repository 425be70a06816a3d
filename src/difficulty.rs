/// Difficulty tier: how many balls are in play and how fast they move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    pub fn ball_count(&self) -> usize {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 6,
            Difficulty::Hard => 9,
        }
    }

    /// Per-axis ball speed, in arena units per tick.
    pub fn ball_speed(&self) -> i32 {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 4,
            Difficulty::Hard => 5,
        }
    }

    /// Tag stored in the `Difficulte` column of the score table.
    pub fn tag(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Facile",
            Difficulty::Medium => "Intermediaire",
            Difficulty::Hard => "Difficile",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Facile" => Some(Difficulty::Easy),
            "Intermediaire" => Some(Difficulty::Medium),
            "Difficile" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn next(&self) -> Self {
        let tiers = Self::all();
        tiers[(self.index() + 1) % tiers.len()]
    }

    pub fn prev(&self) -> Self {
        let tiers = Self::all();
        tiers[(self.index() + tiers.len() - 1) % tiers.len()]
    }
}
