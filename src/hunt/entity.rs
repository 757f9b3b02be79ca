//! Fish: spawn placement and per-tick motion.

use rand::Rng;

use crate::config::HuntConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub(crate) u32);

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size of the hunting ground, re-read every frame since the layout is responsive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSize {
    pub width: f64,
    pub height: f64,
}

impl Default for FieldSize {
    fn default() -> Self {
        Self { width: 600.0, height: 300.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityState {
    Active,
    Caught,
    Escaped,
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub id: EntityId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub origin: Origin,
    pub state: EntityState,
}

impl Entity {
    pub fn is_active(&self) -> bool {
        self.state == EntityState::Active
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Escaped,
}

/// Vertical band fish swim in: `(top bounce, bottom bounce)`.
fn vertical_bounds(field: FieldSize, cfg: &HuntConfig) -> (f64, f64) {
    let top = cfg.bounce_margin;
    let bottom = (field.height - cfg.sprite_size).max(top);
    (top, bottom)
}

/// Place a new fish just off one side of the field, heading inwards.
pub fn spawn(id: EntityId, rng: &mut impl Rng, field: FieldSize, cfg: &HuntConfig) -> Entity {
    let origin = if rng.gen_bool(0.5) { Origin::Left } else { Origin::Right };
    let (top, bottom) = vertical_bounds(field, cfg);
    // Spawn inside the bounce band so a fresh fish never starts mid-bounce.
    let band_lo = top + cfg.bounce_margin;
    let band_hi = (bottom - cfg.bounce_margin).max(band_lo);
    let y = rng.gen_range(band_lo..=band_hi).round();
    let speed = f64::from(rng.gen_range(cfg.speed_min..=cfg.speed_max));
    let drift = f64::from(rng.gen_range(cfg.drift_min..=cfg.drift_max));
    let (x, vx) = match origin {
        Origin::Left => (cfg.spawn_left_x, speed),
        Origin::Right => (field.width + cfg.spawn_right_offset, -speed),
    };
    Entity {
        id,
        position: Vec2::new(x, y),
        velocity: Vec2::new(vx, drift),
        origin,
        state: EntityState::Active,
    }
}

/// Advance one motion tick. Bounces off the top and bottom; reports an escape
/// once the fish is `escape_margin` past either side. Does not touch `state`.
pub fn step(entity: &mut Entity, field: FieldSize, cfg: &HuntConfig) -> StepOutcome {
    entity.position.x += entity.velocity.x;
    entity.position.y += entity.velocity.y;

    // The band follows the live field height; a shrink can leave a fish outside it.
    let (top, bottom) = vertical_bounds(field, cfg);
    if entity.position.y <= top {
        entity.velocity.y = entity.velocity.y.abs();
    } else if entity.position.y >= bottom {
        entity.velocity.y = -entity.velocity.y.abs();
    }
    entity.position.y = entity.position.y.clamp(top, bottom);

    let x = entity.position.x;
    if x < -cfg.escape_margin || x > field.width + cfg.escape_margin {
        StepOutcome::Escaped
    } else {
        StepOutcome::Moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fish(x: f64, y: f64, vx: f64, vy: f64) -> Entity {
        Entity {
            id: EntityId(0),
            position: Vec2::new(x, y),
            velocity: Vec2::new(vx, vy),
            origin: if vx >= 0.0 { Origin::Left } else { Origin::Right },
            state: EntityState::Active,
        }
    }

    #[test]
    fn spawn_respects_side_and_ranges() {
        let cfg = HuntConfig::default();
        let field = FieldSize::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen_left = false;
        let mut seen_right = false;
        for i in 0..200 {
            let e = spawn(EntityId(i), &mut rng, field, &cfg);
            assert!(e.is_active());
            assert!((20.0..=250.0).contains(&e.position.y), "y {}", e.position.y);
            assert!((-1.0..=1.0).contains(&e.velocity.y));
            match e.origin {
                Origin::Left => {
                    seen_left = true;
                    assert_eq!(e.position.x, -50.0);
                    assert!((2.0..=5.0).contains(&e.velocity.x));
                }
                Origin::Right => {
                    seen_right = true;
                    assert_eq!(e.position.x, 610.0);
                    assert!((-5.0..=-2.0).contains(&e.velocity.x));
                }
            }
        }
        assert!(seen_left && seen_right);
    }

    #[test]
    fn bounces_at_bottom_without_escaping() {
        let cfg = HuntConfig::default();
        let mut e = fish(100.0, 259.0, 3.0, 1.0);
        assert_eq!(step(&mut e, FieldSize::default(), &cfg), StepOutcome::Moved);
        assert_eq!(e.position.y, 260.0);
        assert_eq!(e.velocity.y, -1.0);
    }

    #[test]
    fn bounces_at_top() {
        let cfg = HuntConfig::default();
        let mut e = fish(100.0, 11.0, 3.0, -1.0);
        step(&mut e, FieldSize::default(), &cfg);
        assert_eq!(e.velocity.y, 1.0);
    }

    #[test]
    fn shrunken_field_sends_fish_back_inside() {
        let cfg = HuntConfig::default();
        let short = FieldSize { width: 600.0, height: 240.0 };
        let mut e = fish(100.0, 250.0, 3.0, 1.0);
        let ys: Vec<f64> = (0..8)
            .map(|_| {
                step(&mut e, short, &cfg);
                e.position.y
            })
            .collect();
        assert_eq!(ys, vec![200.0, 199.0, 198.0, 197.0, 196.0, 195.0, 194.0, 193.0]);
        assert_eq!(e.velocity.y, -1.0);
    }

    #[test]
    fn escapes_past_either_margin() {
        let cfg = HuntConfig::default();
        let field = FieldSize::default();
        let mut right = fish(659.0, 100.0, 2.0, 0.0);
        assert_eq!(step(&mut right, field, &cfg), StepOutcome::Escaped);
        let mut left = fish(-59.0, 100.0, -2.0, 0.0);
        assert_eq!(step(&mut left, field, &cfg), StepOutcome::Escaped);
        let mut inside = fish(-50.0, 100.0, 2.0, 0.0);
        assert_eq!(step(&mut inside, field, &cfg), StepOutcome::Moved);
    }

    #[test]
    fn right_spawn_tracks_field_width() {
        let cfg = HuntConfig::default();
        let narrow = FieldSize { width: 320.0, height: 300.0 };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let e = (0..50)
            .map(|i| spawn(EntityId(i), &mut rng, narrow, &cfg))
            .find(|e| e.origin == Origin::Right)
            .unwrap();
        assert_eq!(e.position.x, 330.0);
    }
}
