// Host-side tests for chrome constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    // The veil should lift promptly but after first paint
    assert!(VEIL_LIFT_DELAY_MS > 0);
    assert!(VEIL_LIFT_DELAY_MS < 5_000);

    // Easing factor must converge without oscillating
    assert!(GLOW_EASE > 0.0 && GLOW_EASE < 1.0);

    // Threshold is a visibility ratio
    assert!(REVEAL_THRESHOLD > 0.0 && REVEAL_THRESHOLD < 1.0);
}

#[test]
fn reveal_root_margin_shrinks_only_the_bottom() {
    let parts: Vec<&str> = REVEAL_ROOT_MARGIN.split_whitespace().collect();
    assert_eq!(parts.len(), 4, "top right bottom left");
    assert_eq!(parts[0], "0px");
    assert_eq!(parts[1], "0px");
    assert!(
        parts[2].starts_with('-') && parts[2].ends_with("px"),
        "bottom inset pulls the trigger line up into the viewport"
    );
    assert_eq!(parts[3], "0px");
}
