/// Page chrome timing and interaction tuning constants.
///
/// Simulation and audio tuning live next to their own modules (`field.rs`,
/// `ambience.rs`); this file only holds the thin chrome around them.
// Delay before the entry veil lifts, milliseconds after module start
pub const VEIL_LIFT_DELAY_MS: i32 = 300;

// Per-frame easing factor for the cursor glow chase (dot snaps, glow lags)
pub const GLOW_EASE: f32 = 0.06;

// Fraction of a `.reveal` element that must be visible before it animates in
pub const REVEAL_THRESHOLD: f64 = 0.12;

// Bottom inset on the reveal viewport so elements animate a little after
// crossing the edge, not exactly on it
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -40px 0px";
