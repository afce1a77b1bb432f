// Ambience descriptions and scheduling policy.
//
// Everything here is pure data and seeded sampling: the two ambience
// variants are values of one `AmbienceSpec` type, and `audio.rs` is the
// single interpreter that realizes a spec as a Web Audio graph. Keeping the
// description separate from node construction is what lets the envelope,
// ramp, and reschedule policies be tested natively.

use rand::prelude::*;

/// Master-gain ramp length for both mute and unmute, in seconds.
pub const MUTE_RAMP_SECS: f64 = 1.5;

/// Exponential ramps cannot reach zero; burst envelopes decay to this floor.
pub const ENVELOPE_FLOOR: f32 = 1e-4;

/// Drone voice fundamentals: C3, E3, G3, C4.
pub const DRONE_FREQS_HZ: [f32; 4] = [130.81, 164.81, 196.00, 261.63];

/// Ping notes: C5, E5, G5, C6.
pub const PING_NOTES_HZ: [f32; 4] = [523.25, 659.25, 783.99, 1046.5];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmbienceVariant {
    /// Layered noise beds, four detuned sine drones, sparse chime pings.
    Drone,
    /// Three rain beds (hiss/body/rumble), a slow swell, frequent drips.
    Rain,
}

impl AmbienceVariant {
    /// Parse the `data-ambience` attribute value. Unknown values map to
    /// `None` so the caller can fall back to the default variant.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "drone" => Some(AmbienceVariant::Drone),
            "rain" => Some(AmbienceVariant::Rain),
            _ => None,
        }
    }

    pub fn spec(self) -> AmbienceSpec {
        match self {
            AmbienceVariant::Drone => AmbienceSpec::drone(),
            AmbienceVariant::Rain => AmbienceSpec::rain(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    Lowpass,
    Bandpass,
    Highpass,
}

#[derive(Clone, Copy, Debug)]
pub struct FilterSpec {
    pub kind: FilterKind,
    pub cutoff_hz: f32,
    pub q: f32,
}

/// A looped buffer of white noise routed through one filter and one gain.
#[derive(Clone, Copy, Debug)]
pub struct NoiseBed {
    pub channels: u32,
    pub seconds: f32,
    pub filter: FilterSpec,
    pub level: f32,
}

/// Slow sine modulation of an oscillator's frequency, in Hz of deviation.
#[derive(Clone, Copy, Debug)]
pub struct Vibrato {
    pub rate_hz: f32,
    pub depth_hz: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct DroneVoice {
    pub freq_hz: f32,
    pub level: f32,
    pub vibrato: Vibrato,
}

/// Slow sine modulation of the master gain value itself.
#[derive(Clone, Copy, Debug)]
pub struct Swell {
    pub rate_hz: f32,
    pub depth: f32,
}

#[derive(Clone, Copy, Debug)]
pub enum BurstPitch {
    /// Draw uniformly from a fixed note set.
    NoteSet(&'static [f32]),
    /// Draw uniformly from a continuous band.
    BandHz { lo: f32, hi: f32 },
}

/// Policy for the self-rescheduling transient generator.
#[derive(Clone, Copy, Debug)]
pub struct BurstSpec {
    pub pitch: BurstPitch,
    /// Envelope peak gain.
    pub peak: f32,
    /// Linear attack length, seconds.
    pub attack_secs: f64,
    /// Offset at which the exponential decay reaches `ENVELOPE_FLOOR`.
    pub decay_secs: f64,
    /// Offset at which the oscillator stops itself.
    pub stop_secs: f64,
    pub min_delay_ms: u32,
    pub delay_span_ms: u32,
}

impl BurstSpec {
    /// Delay until the next burst, uniform in `[min, min + span)`.
    pub fn next_delay_ms(&self, rng: &mut StdRng) -> u32 {
        self.min_delay_ms + rng.gen_range(0..self.delay_span_ms)
    }

    pub fn pick_freq_hz(&self, rng: &mut StdRng) -> f32 {
        match self.pitch {
            BurstPitch::NoteSet(notes) => *notes.choose(rng).unwrap_or(&notes[0]),
            BurstPitch::BandHz { lo, hi } => rng.gen_range(lo..hi),
        }
    }

    /// Absolute envelope timeline for a burst triggered at `now`.
    pub fn plan(&self, now: f64, freq_hz: f32) -> BurstPlan {
        BurstPlan {
            freq_hz,
            start: now,
            peak: self.peak,
            peak_at: now + self.attack_secs,
            floor_at: now + self.decay_secs,
            stop_at: now + self.stop_secs,
        }
    }
}

/// Concrete schedule for one transient burst: linear ramp from zero to
/// `peak` at `peak_at`, exponential decay to `ENVELOPE_FLOOR` at `floor_at`,
/// source stopped at `stop_at`.
#[derive(Clone, Copy, Debug)]
pub struct BurstPlan {
    pub freq_hz: f32,
    pub start: f64,
    pub peak: f32,
    pub peak_at: f64,
    pub floor_at: f64,
    pub stop_at: f64,
}

/// A target value reached by a linear ramp over `secs`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GainRamp {
    pub target: f32,
    pub secs: f64,
}

/// Full description of one ambience: what the graph interpreter builds.
#[derive(Clone, Debug)]
pub struct AmbienceSpec {
    /// Initial master ramp from silence, applied once at construction.
    pub fade_in: GainRamp,
    /// Master level restored on unmute. Not necessarily the fade-in target;
    /// the rain ambience shipped with 0.16 here against a 0.22 fade-in and
    /// that asymmetry is preserved.
    pub unmute_gain: f32,
    pub beds: Vec<NoiseBed>,
    pub drones: Vec<DroneVoice>,
    pub swell: Option<Swell>,
    pub burst: BurstSpec,
}

impl AmbienceSpec {
    pub fn drone() -> Self {
        let beds = vec![
            NoiseBed {
                channels: 1,
                seconds: 4.0,
                filter: FilterSpec {
                    kind: FilterKind::Lowpass,
                    cutoff_hz: 200.0,
                    q: 0.5,
                },
                level: 0.10,
            },
            NoiseBed {
                channels: 1,
                seconds: 4.0,
                filter: FilterSpec {
                    kind: FilterKind::Bandpass,
                    cutoff_hz: 800.0,
                    q: 0.3,
                },
                level: 0.035,
            },
            NoiseBed {
                channels: 1,
                seconds: 4.0,
                filter: FilterSpec {
                    kind: FilterKind::Highpass,
                    cutoff_hz: 1500.0,
                    q: 0.2,
                },
                level: 0.015,
            },
        ];
        // Each voice a little quieter and its vibrato a little faster than
        // the one below it, so the chord never quite stands still.
        let drones = DRONE_FREQS_HZ
            .iter()
            .enumerate()
            .map(|(i, &freq_hz)| DroneVoice {
                freq_hz,
                level: 0.038 - i as f32 * 0.005,
                vibrato: Vibrato {
                    rate_hz: 0.05 + i as f32 * 0.02,
                    depth_hz: 0.003,
                },
            })
            .collect();
        AmbienceSpec {
            fade_in: GainRamp {
                target: 0.16,
                secs: 5.0,
            },
            unmute_gain: 0.16,
            beds,
            drones,
            swell: None,
            burst: BurstSpec {
                pitch: BurstPitch::NoteSet(&PING_NOTES_HZ),
                peak: 0.055,
                attack_secs: 0.02,
                decay_secs: 4.0,
                stop_secs: 4.5,
                min_delay_ms: 7_000,
                delay_span_ms: 11_000,
            },
        }
    }

    pub fn rain() -> Self {
        let beds = vec![
            // High hiss, mid body, low rumble.
            NoiseBed {
                channels: 2,
                seconds: 6.0,
                filter: FilterSpec {
                    kind: FilterKind::Highpass,
                    cutoff_hz: 1200.0,
                    q: 0.3,
                },
                level: 0.18,
            },
            NoiseBed {
                channels: 2,
                seconds: 5.0,
                filter: FilterSpec {
                    kind: FilterKind::Bandpass,
                    cutoff_hz: 600.0,
                    q: 0.5,
                },
                level: 0.10,
            },
            NoiseBed {
                channels: 2,
                seconds: 7.0,
                filter: FilterSpec {
                    kind: FilterKind::Lowpass,
                    cutoff_hz: 180.0,
                    q: 0.4,
                },
                level: 0.06,
            },
        ];
        AmbienceSpec {
            fade_in: GainRamp {
                target: 0.22,
                secs: 6.0,
            },
            unmute_gain: 0.16,
            beds,
            drones: Vec::new(),
            swell: Some(Swell {
                rate_hz: 0.04,
                depth: 0.04,
            }),
            burst: BurstSpec {
                pitch: BurstPitch::BandHz {
                    lo: 1200.0,
                    hi: 2000.0,
                },
                peak: 0.018,
                attack_secs: 0.01,
                decay_secs: 1.8,
                stop_secs: 2.0,
                min_delay_ms: 1_500,
                delay_span_ms: 4_000,
            },
        }
    }

    pub fn mute_ramp() -> GainRamp {
        GainRamp {
            target: 0.0,
            secs: MUTE_RAMP_SECS,
        }
    }

    pub fn unmute_ramp(&self) -> GainRamp {
        GainRamp {
            target: self.unmute_gain,
            secs: MUTE_RAMP_SECS,
        }
    }
}

/// Fill one channel with uniform white noise in [-1, 1).
pub fn noise_fill(out: &mut [f32], rng: &mut StdRng) {
    for s in out.iter_mut() {
        *s = rng.gen_range(-1.0f32..1.0);
    }
}

/// Lifecycle of the page's single audio graph. One instance per page load,
/// owned by the toggle wiring; there is no concurrency to guard against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioStatus {
    NotStarted,
    Active,
    Muted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleAction {
    /// Build the graph and fade in. Only ever valid from `NotStarted`;
    /// a failed build stays in `NotStarted` so the next click retries.
    Start,
    Mute,
    Unmute,
}

impl AudioStatus {
    /// What a click on the audio toggle does in this state.
    pub fn next_action(self) -> ToggleAction {
        match self {
            AudioStatus::NotStarted => ToggleAction::Start,
            AudioStatus::Active => ToggleAction::Mute,
            AudioStatus::Muted => ToggleAction::Unmute,
        }
    }

    /// Status once `action` has been carried out. `built` reports whether a
    /// `Start` actually produced a graph; a failed build keeps the current
    /// status, so the next click retries instead of latching a dead graph.
    pub fn apply(self, action: ToggleAction, built: bool) -> AudioStatus {
        match action {
            ToggleAction::Start if built => AudioStatus::Active,
            ToggleAction::Start => self,
            ToggleAction::Mute => AudioStatus::Muted,
            ToggleAction::Unmute => AudioStatus::Active,
        }
    }
}
