use crate::ambience::{
    self, AmbienceSpec, AmbienceVariant, AudioStatus, BurstPlan, DroneVoice, FilterKind, GainRamp,
    NoiseBed, Swell, ToggleAction, ENVELOPE_FLOOR,
};
use crate::{dom, sched};
use rand::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> Result<web::GainNode, ()> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

fn create_osc(
    audio_ctx: &web::AudioContext,
    freq_hz: f32,
    label: &str,
) -> Result<web::OscillatorNode, ()> {
    match web::OscillatorNode::new(audio_ctx) {
        Ok(o) => {
            o.set_type(web::OscillatorType::Sine);
            o.frequency().set_value(freq_hz);
            Ok(o)
        }
        Err(e) => {
            log::error!("{} OscillatorNode error: {:?}", label, e);
            Err(())
        }
    }
}

fn filter_type(kind: FilterKind) -> web::BiquadFilterType {
    match kind {
        FilterKind::Lowpass => web::BiquadFilterType::Lowpass,
        FilterKind::Bandpass => web::BiquadFilterType::Bandpass,
        FilterKind::Highpass => web::BiquadFilterType::Highpass,
    }
}

/// Looping filtered-noise layer: buffer source -> biquad -> level -> master.
/// Each channel gets its own noise so stereo beds decorrelate.
fn build_noise_bed(
    audio_ctx: &web::AudioContext,
    bed: &NoiseBed,
    master: &web::GainNode,
    rng: &mut StdRng,
) -> Result<(), ()> {
    let sample_rate = audio_ctx.sample_rate();
    let len = (sample_rate * bed.seconds) as u32;
    let buffer = audio_ctx
        .create_buffer(bed.channels, len, sample_rate)
        .map_err(|e| {
            log::error!("noise buffer error: {:?}", e);
        })?;
    let mut samples = vec![0.0f32; len as usize];
    for ch in 0..bed.channels {
        ambience::noise_fill(&mut samples, rng);
        _ = buffer.copy_to_channel(&mut samples, ch as i32);
    }

    let source = audio_ctx.create_buffer_source().map_err(|e| {
        log::error!("noise source error: {:?}", e);
    })?;
    source.set_buffer(Some(&buffer));
    source.set_loop(true);

    let filter = web::BiquadFilterNode::new(audio_ctx).map_err(|e| {
        log::error!("bed filter error: {:?}", e);
    })?;
    filter.set_type(filter_type(bed.filter.kind));
    filter.frequency().set_value(bed.filter.cutoff_hz);
    filter.q().set_value(bed.filter.q);

    let level = create_gain(audio_ctx, bed.level, "bed level")?;
    _ = source.connect_with_audio_node(&filter);
    _ = filter.connect_with_audio_node(&level);
    _ = level.connect_with_audio_node(master);
    _ = source.start();
    Ok(())
}

/// One sustained sine plus a dedicated vibrato oscillator driving its
/// frequency param.
fn build_drone_voice(
    audio_ctx: &web::AudioContext,
    voice: &DroneVoice,
    master: &web::GainNode,
) -> Result<(), ()> {
    let osc = create_osc(audio_ctx, voice.freq_hz, "drone")?;
    let level = create_gain(audio_ctx, voice.level, "drone level")?;

    let lfo = create_osc(audio_ctx, voice.vibrato.rate_hz, "vibrato")?;
    let depth = create_gain(audio_ctx, voice.vibrato.depth_hz, "vibrato depth")?;
    _ = lfo.connect_with_audio_node(&depth);
    _ = depth.connect_with_audio_param(&osc.frequency());

    _ = osc.connect_with_audio_node(&level);
    _ = level.connect_with_audio_node(master);
    _ = osc.start();
    _ = lfo.start();
    Ok(())
}

/// Slow LFO summed into the master gain param, breathing the whole bed.
fn build_swell(
    audio_ctx: &web::AudioContext,
    swell: &Swell,
    master: &web::GainNode,
) -> Result<(), ()> {
    let lfo = create_osc(audio_ctx, swell.rate_hz, "swell")?;
    let depth = create_gain(audio_ctx, swell.depth, "swell depth")?;
    _ = lfo.connect_with_audio_node(&depth);
    _ = depth.connect_with_audio_param(&master.gain());
    _ = lfo.start();
    Ok(())
}

/// Fire one transient: sine oscillator through its own envelope gain into
/// the master. Nothing retains the nodes; the scheduled stop lets the host
/// collect them.
fn trigger_burst(audio_ctx: &web::AudioContext, master: &web::GainNode, plan: &BurstPlan) {
    if let Ok(osc) = create_osc(audio_ctx, plan.freq_hz, "burst") {
        if let Ok(env) = create_gain(audio_ctx, 0.0, "burst env") {
            let gain = env.gain();
            _ = gain.set_value_at_time(0.0, plan.start);
            _ = gain.linear_ramp_to_value_at_time(plan.peak, plan.peak_at);
            _ = gain.exponential_ramp_to_value_at_time(ENVELOPE_FLOOR, plan.floor_at);
            _ = osc.connect_with_audio_node(&env);
            _ = env.connect_with_audio_node(master);
            _ = osc.start();
            _ = osc.stop_with_when(plan.stop_at);
        }
    }
}

/// A running ambience graph. Looping sources keep themselves alive inside
/// the context; the struct retains only what later operations touch.
pub struct AmbienceGraph {
    audio_ctx: web::AudioContext,
    master: web::GainNode,
    spec: AmbienceSpec,
    burst_timer: Option<sched::TimerLoop>,
}

impl AmbienceGraph {
    /// Build and start the whole graph for one variant. The master fades in
    /// from silence over the spec's ramp; beds, drones and the swell start
    /// at once, and the first burst fires under cover of the fade.
    pub fn build(variant: AmbienceVariant, seed: u64) -> Result<AmbienceGraph, ()> {
        let audio_ctx = web::AudioContext::new().map_err(|e| {
            log::error!("AudioContext error: {:?}", e);
        })?;
        match Self::populate(&audio_ctx, variant.spec(), seed) {
            Ok(graph) => Ok(graph),
            Err(()) => {
                // A half-built graph closes its context so a later click can
                // start from scratch.
                _ = audio_ctx.close();
                Err(())
            }
        }
    }

    fn populate(
        audio_ctx: &web::AudioContext,
        spec: AmbienceSpec,
        seed: u64,
    ) -> Result<AmbienceGraph, ()> {
        _ = audio_ctx.resume();

        let master = create_gain(audio_ctx, 0.0, "master")?;
        let now = audio_ctx.current_time();
        _ = master.gain().set_value_at_time(0.0, now);
        _ = master
            .gain()
            .linear_ramp_to_value_at_time(spec.fade_in.target, now + spec.fade_in.secs);
        _ = master.connect_with_audio_node(&audio_ctx.destination());

        let mut rng = StdRng::seed_from_u64(seed);
        for bed in &spec.beds {
            build_noise_bed(audio_ctx, bed, &master, &mut rng)?;
        }
        for voice in &spec.drones {
            build_drone_voice(audio_ctx, voice, &master)?;
        }
        if let Some(swell) = &spec.swell {
            build_swell(audio_ctx, swell, &master)?;
        }

        let mut graph = AmbienceGraph {
            audio_ctx: audio_ctx.clone(),
            master,
            spec,
            burst_timer: None,
        };
        graph.start_bursts(rng);
        Ok(graph)
    }

    /// Arm the self-rescheduling burst timer. The first burst fires at once,
    /// masked by the fade-in; each later one waits a fresh draw from the
    /// spec's delay range. Muting does not pause the timer.
    fn start_bursts(&mut self, mut rng: StdRng) {
        let audio_ctx = self.audio_ctx.clone();
        let master = self.master.clone();
        let burst = self.spec.burst;
        self.burst_timer = sched::TimerLoop::start(0, move || {
            if audio_ctx.state() == web::AudioContextState::Closed {
                return None;
            }
            let freq_hz = burst.pick_freq_hz(&mut rng);
            let plan = burst.plan(audio_ctx.current_time(), freq_hz);
            trigger_burst(&audio_ctx, &master, &plan);
            Some(burst.next_delay_ms(&mut rng))
        });
    }

    fn apply_ramp(&self, ramp: GainRamp) {
        let now = self.audio_ctx.current_time();
        _ = self
            .master
            .gain()
            .linear_ramp_to_value_at_time(ramp.target, now + ramp.secs);
    }

    /// Ramp the master to silence. Sources keep running and the burst timer
    /// keeps firing into the zeroed master; only teardown stops them.
    pub fn mute(&self) {
        self.apply_ramp(AmbienceSpec::mute_ramp());
    }

    /// Restore the steady level, resuming the clock if the host suspended it.
    pub fn unmute(&self) {
        _ = self.audio_ctx.resume();
        self.apply_ramp(self.spec.unmute_ramp());
    }
}

impl Drop for AmbienceGraph {
    fn drop(&mut self) {
        self.burst_timer.take();
        _ = self.audio_ctx.close();
    }
}

/// Owned activation state for the page's audio toggle.
pub struct AudioControl {
    pub status: AudioStatus,
    graph: Option<AmbienceGraph>,
    variant: AmbienceVariant,
    seed: u64,
}

impl AudioControl {
    pub fn new(variant: AmbienceVariant, seed: u64) -> Self {
        AudioControl {
            status: AudioStatus::NotStarted,
            graph: None,
            variant,
            seed,
        }
    }

    /// One click on the toggle. Returns the resulting status so the caller
    /// can flip the button icons.
    pub fn toggle(&mut self) -> AudioStatus {
        let action = self.status.next_action();
        let built = match action {
            ToggleAction::Start => match AmbienceGraph::build(self.variant, self.seed) {
                Ok(graph) => {
                    log::info!("ambience started ({:?})", self.variant);
                    self.graph = Some(graph);
                    true
                }
                Err(()) => {
                    log::error!("ambience start failed");
                    false
                }
            },
            ToggleAction::Mute => {
                if let Some(g) = &self.graph {
                    g.mute();
                }
                true
            }
            ToggleAction::Unmute => {
                if let Some(g) = &self.graph {
                    g.unmute();
                }
                true
            }
        };
        self.status = self.status.apply(action, built);
        self.status
    }

    /// Drop the graph, closing its context and cancelling the burst timer.
    pub fn shutdown(&mut self) {
        self.graph.take();
        self.status = AudioStatus::NotStarted;
    }
}

/// Variant choice comes from the page: `data-ambience` on the toggle button.
pub fn variant_from_dom(document: &web::Document) -> AmbienceVariant {
    document
        .get_element_by_id("audio-btn")
        .and_then(|el| el.get_attribute("data-ambience"))
        .and_then(|v| AmbienceVariant::parse(&v))
        .unwrap_or(AmbienceVariant::Drone)
}

/// Hook the audio button: the first click builds the graph, later clicks
/// toggle mute. Icon visibility tracks the resulting status.
pub fn wire_toggle(document: &web::Document, control: Rc<RefCell<AudioControl>>) {
    let icon_sound = dom::html_element_by_id(document, "icon-sound");
    let icon_muted = dom::html_element_by_id(document, "icon-muted");
    dom::add_click_listener(document, "audio-btn", move || {
        let status = control.borrow_mut().toggle();
        let audible = status == AudioStatus::Active;
        if let Some(el) = &icon_sound {
            dom::set_display(el, if audible { "block" } else { "none" });
        }
        if let Some(el) = &icon_muted {
            dom::set_display(el, if audible { "none" } else { "block" });
        }
    });
}
