use rand::Rng;

/// Largest ball count of any tier; the pool never grows past this.
pub const MAX_BALLS: usize = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arena {
    pub width: i32,
    pub height: i32,
}

/// A bouncing ball. Position is the centre of the circle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ball {
    pub x: i32,
    pub y: i32,
    pub dx: i32,
    pub dy: i32,
}

/// The player's avatar as an axis-aligned box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerBox {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl PlayerBox {
    pub fn centered(arena: Arena, size: i32) -> Self {
        Self {
            x: arena.width / 2 - size / 2,
            y: arena.height / 2 - size / 2,
            w: size,
            h: size,
        }
    }

    /// Move by (dx, dy), clamped so the box stays inside the arena.
    pub fn nudge(&mut self, dx: i32, dy: i32, arena: Arena) {
        self.x = (self.x + dx).clamp(0, (arena.width - self.w).max(0));
        self.y = (self.y + dy).clamp(0, (arena.height - self.h).max(0));
    }
}

#[derive(Clone, Copy)]
enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

fn random_sign<R: Rng + ?Sized>(rng: &mut R, speed: i32) -> i32 {
    if rng.gen_bool(0.5) {
        speed
    } else {
        -speed
    }
}

fn spawn_ball<R: Rng + ?Sized>(rng: &mut R, speed: i32, radius: i32, arena: Arena) -> Ball {
    let edge = match rng.gen_range(0..4) {
        0 => Edge::Top,
        1 => Edge::Right,
        2 => Edge::Bottom,
        _ => Edge::Left,
    };
    // Keep one unit clear of the perpendicular walls so only the spawn edge is touched
    let along_x = rng.gen_range(radius + 1..=arena.width - radius - 1);
    let along_y = rng.gen_range(radius + 1..=arena.height - radius - 1);

    match edge {
        Edge::Top => Ball {
            x: along_x,
            y: radius,
            dx: random_sign(rng, speed),
            dy: speed,
        },
        Edge::Right => Ball {
            x: arena.width - radius,
            y: along_y,
            dx: -speed,
            dy: random_sign(rng, speed),
        },
        Edge::Bottom => Ball {
            x: along_x,
            y: arena.height - radius,
            dx: random_sign(rng, speed),
            dy: -speed,
        },
        Edge::Left => Ball {
            x: radius,
            y: along_y,
            dx: speed,
            dy: random_sign(rng, speed),
        },
    }
}

/// Fill every slot of `balls` with a fresh ball flush against a random
/// arena edge, heading inward at `speed`.
pub fn spawn_balls<R: Rng + ?Sized>(
    balls: &mut [Ball],
    speed: i32,
    radius: i32,
    arena: Arena,
    rng: &mut R,
) {
    debug_assert!(arena.width > 2 * radius + 2 && arena.height > 2 * radius + 2);
    for ball in balls.iter_mut() {
        *ball = spawn_ball(rng, speed, radius, arena);
    }
}

/// Advance every ball by its velocity and reflect off the arena walls.
///
/// Each axis is handled on its own, so a ball that reaches a corner flips
/// both components in the same tick. Only signs change; magnitudes are kept.
pub fn step(balls: &mut [Ball], radius: i32, arena: Arena) {
    for ball in balls.iter_mut() {
        ball.x += ball.dx;
        ball.y += ball.dy;

        if ball.x - radius <= 0 {
            ball.dx = ball.dx.abs();
        } else if ball.x + radius >= arena.width {
            ball.dx = -ball.dx.abs();
        }
        if ball.y - radius <= 0 {
            ball.dy = ball.dy.abs();
        } else if ball.y + radius >= arena.height {
            ball.dy = -ball.dy.abs();
        }
    }
}

/// Exact circle-vs-box overlap, inclusive of touching.
pub fn collides(player: &PlayerBox, ball: &Ball, radius: i32) -> bool {
    let closest_x = ball.x.clamp(player.x, player.x + player.w);
    let closest_y = ball.y.clamp(player.y, player.y + player.h);
    let dist_x = i64::from(ball.x - closest_x);
    let dist_y = i64::from(ball.y - closest_y);
    let r = i64::from(radius);
    dist_x * dist_x + dist_y * dist_y <= r * r
}

/// Fixed-capacity ball storage. Only the first `active` slots are in play.
#[derive(Clone, Debug)]
pub struct BallPool {
    slots: [Ball; MAX_BALLS],
    active: usize,
}

impl BallPool {
    pub fn new() -> Self {
        Self {
            slots: [Ball::default(); MAX_BALLS],
            active: 0,
        }
    }

    pub fn respawn<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        speed: i32,
        radius: i32,
        arena: Arena,
        rng: &mut R,
    ) {
        assert!(count <= MAX_BALLS, "ball count {count} exceeds pool capacity");
        self.active = count;
        spawn_balls(&mut self.slots[..count], speed, radius, arena, rng);
    }

    pub fn active(&self) -> &[Ball] {
        &self.slots[..self.active]
    }

    pub fn active_mut(&mut self) -> &mut [Ball] {
        &mut self.slots[..self.active]
    }

    pub fn len(&self) -> usize {
        self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active == 0
    }
}
