use std::time::Duration;

use rand::Rng;

use crate::characters::Character;
use crate::difficulty::Difficulty;
use crate::input::Directions;
use crate::physics::{self, Arena, BallPool, PlayerBox};

/// Fixed play-field parameters, set once at startup.
#[derive(Clone, Copy, Debug)]
pub struct Rules {
    pub arena: Arena,
    pub player_size: i32,
    pub player_speed: i32,
    pub ball_radius: i32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            arena: Arena {
                width: 800,
                height: 600,
            },
            player_size: 50,
            player_speed: 5,
            ball_radius: 20,
        }
    }
}

/// Survival time of the current session.
///
/// Only advanced by Playing ticks, so time spent paused is not counted.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionClock {
    elapsed: Duration,
}

impl SessionClock {
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed += dt;
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn seconds(&self) -> u64 {
        self.elapsed.as_secs()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Alive,
    Hit,
}

/// Everything owned by one play-through, from entering Playing until the
/// first collision.
pub struct SessionContext {
    pub difficulty: Difficulty,
    pub character: Character,
    pub rules: Rules,
    pub player: PlayerBox,
    pub balls: BallPool,
    pub clock: SessionClock,
}

impl SessionContext {
    pub fn start<R: Rng + ?Sized>(
        difficulty: Difficulty,
        character: Character,
        rules: Rules,
        rng: &mut R,
    ) -> Self {
        let mut balls = BallPool::new();
        balls.respawn(
            difficulty.ball_count(),
            difficulty.ball_speed(),
            rules.ball_radius,
            rules.arena,
            rng,
        );
        assert!(!balls.is_empty(), "a session needs at least one ball");

        Self {
            difficulty,
            character,
            rules,
            player: PlayerBox::centered(rules.arena, rules.player_size),
            balls,
            clock: SessionClock::default(),
        }
    }

    /// One Playing tick: clock, player, balls, then collisions.
    pub fn tick(&mut self, dt: Duration, held: Directions) -> TickOutcome {
        self.clock.advance(dt);

        let (dx, dy) = held.delta(self.rules.player_speed);
        self.player.nudge(dx, dy, self.rules.arena);

        physics::step(self.balls.active_mut(), self.rules.ball_radius, self.rules.arena);

        let radius = self.rules.ball_radius;
        if self
            .balls
            .active()
            .iter()
            .any(|ball| physics::collides(&self.player, ball, radius))
        {
            TickOutcome::Hit
        } else {
            TickOutcome::Alive
        }
    }
}
