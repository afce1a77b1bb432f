// Host-side tests for the particle field simulation.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod field {
    include!("../src/field.rs");
}

use field::*;
use glam::Vec2;

fn make_field(seed: u64) -> FieldState {
    FieldState::new(800.0, 600.0, seed)
}

#[test]
fn new_fills_every_slot() {
    let f = make_field(7);
    assert_eq!(f.particles.len(), PARTICLE_COUNT);
    assert_eq!(f.respawn_counts().len(), PARTICLE_COUNT);
    assert!(f.respawn_counts().iter().all(|&c| c == 0));
}

#[test]
fn spawn_ranges_hold_for_both_kinds() {
    for seed in 0..10 {
        let f = make_field(seed);
        for p in &f.particles {
            assert!(p.pos.x >= 0.0 && p.pos.x < 800.0);
            assert!(p.pos.y >= 0.0 && p.pos.y < 600.0);
            assert!(p.opacity >= 0.04 && p.opacity < 0.26);
            assert!(p.vel.x >= -0.11 && p.vel.x < 0.11);
            assert!(p.vel.y <= -0.05 && p.vel.y > -0.33, "upward drift only");
            assert!(p.drift_phase >= 0.0 && p.drift_phase < std::f32::consts::TAU);
            assert!(p.drift_rate >= 0.003 && p.drift_rate < 0.011);
            assert!(p.life >= 0.0 && p.life < 1.0);
            assert!(p.decay >= 0.0005 && p.decay < 0.002);
            match p.kind {
                ParticleKind::Mist => assert!(p.radius >= 1.0 && p.radius < 4.0),
                ParticleKind::Fine => assert!(p.radius >= 0.3 && p.radius < 1.7),
            }
            assert!(PALETTE.contains(&p.tint));
        }
    }
}

#[test]
fn mist_share_is_roughly_two_in_five() {
    let mut mist = 0usize;
    let mut total = 0usize;
    for seed in 0..40 {
        let f = make_field(seed);
        for p in &f.particles {
            total += 1;
            if p.kind == ParticleKind::Mist {
                mist += 1;
            }
        }
    }
    let share = mist as f64 / total as f64;
    assert!(
        share > 0.3 && share < 0.5,
        "mist share {share} far from {MIST_SHARE}"
    );
}

#[test]
fn tick_applies_wobble_drift_and_decay_in_order() {
    let mut f = make_field(5);
    let p = &mut f.particles[0];
    p.pos = Vec2::new(100.0, 200.0);
    p.vel = Vec2::new(0.05, -0.1);
    p.drift_phase = 1.0;
    p.drift_rate = 0.25;
    p.life = 0.9;
    p.decay = 0.001;

    let kind_before = f.particles[0].kind;
    f.tick(800.0, 600.0);
    let q = &f.particles[0];
    assert_eq!(q.kind, kind_before, "kind only changes at respawn");
    assert!((q.drift_phase - 1.25).abs() < 1e-6);
    // The wobble samples the advanced phase, not the one from last frame.
    let expected_x = 100.0 + 0.05 + 1.25f32.sin() * WOBBLE_AMPLITUDE;
    assert!((q.pos.x - expected_x).abs() < 1e-4);
    assert!((q.pos.y - 199.9).abs() < 1e-4);
    assert!((q.life - 0.899).abs() < 1e-6);
    assert_eq!(f.respawn_counts()[0], 0);
}

#[test]
fn slot_lives_exactly_life_over_decay_ticks() {
    let mut f = make_field(11);
    let p = &mut f.particles[0];
    p.pos = Vec2::new(400.0, 300.0);
    p.vel = Vec2::new(0.0, -0.05);
    p.drift_phase = 0.0;
    p.drift_rate = 0.0;
    // Dyadic values keep the countdown exact in f32: 0.5 / 2^-6 = 32 ticks.
    p.life = 0.5;
    p.decay = 0.015625;

    for _ in 0..31 {
        f.tick(800.0, 600.0);
    }
    assert_eq!(f.respawn_counts()[0], 0);
    assert!(f.particles[0].life > 0.0);

    f.tick(800.0, 600.0);
    assert_eq!(f.respawn_counts()[0], 1);
    assert_eq!(f.particles[0].pos.y, 600.0 + RESPAWN_OFFSET_Y);
}

#[test]
fn slots_above_the_top_margin_respawn_below() {
    let mut f = make_field(13);
    let p = &mut f.particles[0];
    p.pos = Vec2::new(50.0, -30.0);
    p.vel = Vec2::new(0.0, -0.1);
    p.life = 1.0;
    p.decay = 0.001;

    f.tick(800.0, 600.0);
    assert_eq!(f.respawn_counts()[0], 1);
    let q = &f.particles[0];
    assert_eq!(q.pos.y, 600.0 + RESPAWN_OFFSET_Y);
    assert!(q.pos.x >= 0.0 && q.pos.x < 800.0);
    assert!(q.life >= 0.0 && q.life < 1.0);
}

#[test]
fn slot_on_the_margin_survives_until_it_crosses() {
    let mut f = make_field(19);
    let p = &mut f.particles[0];
    p.pos = Vec2::new(50.0, -19.75);
    p.vel = Vec2::new(0.0, -0.25);
    p.drift_phase = 0.0;
    p.drift_rate = 0.0;
    p.life = 0.9;
    p.decay = 0.001;

    // Dyadic step lands the slot exactly on the margin, which is still in
    // bounds: the respawn test is strictly below it.
    f.tick(800.0, 600.0);
    assert_eq!(f.particles[0].pos.y, RESPAWN_MARGIN_Y);
    assert_eq!(f.respawn_counts()[0], 0);

    f.tick(800.0, 600.0);
    assert_eq!(f.respawn_counts()[0], 1);
    assert_eq!(f.particles[0].pos.y, 600.0 + RESPAWN_OFFSET_Y);
}

#[test]
fn every_slot_recycles_over_a_long_run() {
    let mut f = make_field(17);
    for p in f.particles.iter_mut() {
        p.pos = Vec2::new(400.0, 300.0);
        p.vel = Vec2::new(0.0, -0.05);
        p.drift_phase = 0.0;
        p.drift_rate = 0.0;
        p.life = 1.0;
        p.decay = 0.001953125; // 2^-9: exactly 512 ticks
    }
    for _ in 0..512 {
        f.tick(800.0, 600.0);
    }
    assert_eq!(f.particles.len(), PARTICLE_COUNT);
    assert!(
        f.respawn_counts().iter().all(|&c| c == 1),
        "every slot recycles exactly once at tick 512"
    );
}

#[test]
fn thousand_ticks_recycle_every_slot() {
    // Worst-case slot life over worst-case decay is under the run length,
    // so every slot must cross zero (or the top margin) at least once.
    let mut f = make_field(23);
    for (i, p) in f.particles.iter_mut().enumerate() {
        p.life = i as f32 / 56.0;
        p.decay = 0.001;
    }
    for _ in 0..1_000 {
        f.tick(800.0, 600.0);
    }
    assert_eq!(f.particles.len(), PARTICLE_COUNT);
    assert!(
        f.respawn_counts().iter().all(|&c| c >= 1),
        "a slot survived 1000 ticks: {:?}",
        f.respawn_counts()
    );
}

#[test]
fn alpha_scales_opacity_by_remaining_life() {
    let p = Particle {
        pos: Vec2::new(0.0, 0.0),
        radius: 2.0,
        opacity: 0.2,
        vel: Vec2::new(0.0, -0.1),
        drift_phase: 0.0,
        drift_rate: 0.005,
        life: 0.5,
        decay: 0.001,
        kind: ParticleKind::Mist,
        tint: PALETTE[0],
    };
    assert!((p.alpha() - 0.1).abs() < 1e-6);
    assert_eq!(p.draw_radius(), 8.0, "mist glows out to four radii");

    let fine = Particle {
        kind: ParticleKind::Fine,
        ..p.clone()
    };
    assert_eq!(fine.draw_radius(), 2.0);
}

#[test]
fn css_formats_rgba_with_alpha() {
    assert_eq!(Rgb(201, 74, 122).css(0.5), "rgba(201,74,122,0.5)");
    assert_eq!(Rgb(200, 169, 110).css(0.0), "rgba(200,169,110,0)");
}

#[test]
fn seeded_fields_are_reproducible() {
    let a = make_field(9);
    let b = make_field(9);
    for (pa, pb) in a.particles.iter().zip(b.particles.iter()) {
        assert_eq!(pa.pos, pb.pos);
        assert_eq!(pa.kind, pb.kind);
        assert_eq!(pa.tint, pb.tint);
    }

    let c = make_field(10);
    assert!(
        a.particles
            .iter()
            .zip(c.particles.iter())
            .any(|(pa, pc)| pa.pos != pc.pos),
        "different seeds should scatter differently"
    );
}

#[test]
fn degenerate_viewport_is_clamped() {
    let mut f = FieldState::new(0.0, 0.0, 2);
    for p in &f.particles {
        assert!(p.pos.x >= 0.0 && p.pos.x < 1.0);
        assert!(p.pos.y >= 0.0 && p.pos.y < 1.0);
    }
    // Ticking a zero-sized field must not panic or divide by zero.
    f.tick(0.0, 0.0);
    assert_eq!(f.particles.len(), PARTICLE_COUNT);
}
