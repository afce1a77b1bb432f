// Particle field simulation.
//
// Pure state and arithmetic only; no platform types. The web frontend owns
// one `FieldState`, ticks it once per animation frame, and rasterizes the
// slots onto the backing canvas.

use glam::Vec2;
use rand::prelude::*;

/// Number of particle slots. Slots are respawned in place, never added or
/// removed, so this is also the per-frame draw count.
pub const PARTICLE_COUNT: usize = 55;

/// Probability that a freshly spawned particle is soft mist rather than a
/// hard fine speck.
pub const MIST_SHARE: f64 = 0.4;

/// Amplitude of the sinusoidal lateral wobble, added on top of the linear
/// x velocity each tick.
pub const WOBBLE_AMPLITUDE: f32 = 0.14;

/// Slots are recycled once they rise this far above the top edge.
pub const RESPAWN_MARGIN_Y: f32 = -20.0;

/// Recycled slots re-enter this far below the bottom edge and drift upward
/// into view.
pub const RESPAWN_OFFSET_Y: f32 = 10.0;

/// Warm gold, deep rose, pale parchment.
pub const PALETTE: [Rgb; 3] = [Rgb(200, 169, 110), Rgb(201, 74, 122), Rgb(220, 200, 180)];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// CSS color string with the given alpha, e.g. `rgba(201,74,122,0.12)`.
    pub fn css(&self, alpha: f32) -> String {
        format!("rgba({},{},{},{})", self.0, self.1, self.2, alpha)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    /// Small hard-edged disc.
    Fine,
    /// Larger soft glow drawn as a radial gradient.
    Mist,
}

impl ParticleKind {
    pub fn sample(rng: &mut impl Rng) -> Self {
        if rng.gen_bool(MIST_SHARE) {
            ParticleKind::Mist
        } else {
            ParticleKind::Fine
        }
    }
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub radius: f32,
    /// Peak opacity; rendered alpha is `life * opacity`.
    pub opacity: f32,
    /// `vel.y` is always negative: everything drifts upward.
    pub vel: Vec2,
    pub drift_phase: f32,
    pub drift_rate: f32,
    /// Remaining life in [0, 1); the slot respawns when this hits zero.
    pub life: f32,
    pub decay: f32,
    pub kind: ParticleKind,
    pub tint: Rgb,
}

impl Particle {
    fn spawn(rng: &mut StdRng, width: f32, height: f32) -> Self {
        let width = width.max(1.0);
        let height = height.max(1.0);
        let kind = ParticleKind::sample(rng);
        let radius = match kind {
            ParticleKind::Mist => rng.gen_range(1.0..4.0),
            ParticleKind::Fine => rng.gen_range(0.3..1.7),
        };
        Particle {
            pos: Vec2::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height)),
            radius,
            opacity: rng.gen_range(0.04..0.26),
            vel: Vec2::new(rng.gen_range(-0.11..0.11), -rng.gen_range(0.05..0.33)),
            drift_phase: rng.gen_range(0.0..std::f32::consts::TAU),
            drift_rate: rng.gen_range(0.003..0.011),
            life: rng.gen_range(0.0..1.0),
            decay: rng.gen_range(0.0005..0.002),
            kind,
            tint: *PALETTE.choose(rng).unwrap_or(&PALETTE[0]),
        }
    }

    fn spawn_below(rng: &mut StdRng, width: f32, height: f32) -> Self {
        let mut p = Particle::spawn(rng, width, height);
        p.pos.y = height.max(1.0) + RESPAWN_OFFSET_Y;
        p
    }

    /// Alpha used when rasterizing this particle this frame.
    pub fn alpha(&self) -> f32 {
        self.life * self.opacity
    }

    /// Outer draw radius: mist glows out to four times its base radius.
    pub fn draw_radius(&self) -> f32 {
        match self.kind {
            ParticleKind::Mist => self.radius * 4.0,
            ParticleKind::Fine => self.radius,
        }
    }
}

pub struct FieldState {
    pub particles: Vec<Particle>,
    respawns: Vec<u32>,
    rng: StdRng,
}

impl FieldState {
    /// Allocate all slots with positions scattered across the viewport.
    /// Only respawned slots enter from below the bottom edge.
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = (0..PARTICLE_COUNT)
            .map(|_| Particle::spawn(&mut rng, width, height))
            .collect();
        Self {
            particles,
            respawns: vec![0; PARTICLE_COUNT],
            rng,
        }
    }

    /// Advance every slot one frame: wobble phase, lateral drift, upward
    /// motion, life decay, then the respawn check. Update order matters for
    /// the rendered result and is kept fixed.
    pub fn tick(&mut self, width: f32, height: f32) {
        for (i, p) in self.particles.iter_mut().enumerate() {
            p.drift_phase += p.drift_rate;
            p.pos.x += p.vel.x + p.drift_phase.sin() * WOBBLE_AMPLITUDE;
            p.pos.y += p.vel.y;
            p.life -= p.decay;
            if p.life <= 0.0 || p.pos.y < RESPAWN_MARGIN_Y {
                *p = Particle::spawn_below(&mut self.rng, width, height);
                self.respawns[i] += 1;
            }
        }
    }

    /// How many times each slot has been recycled since field creation.
    pub fn respawn_counts(&self) -> &[u32] {
        &self.respawns
    }
}
