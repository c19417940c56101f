//! Seeded clip synthesizer.
//!
//! A clip is a four-bar chord loop with an improvised melody on top, played
//! by one oscillator. Every musical decision comes from the stream passed
//! in, so identical stream state yields a bit-identical buffer.
//!
//! Draw order: tempo, scale, root, waveform (see [`SongPlan::draw`]), then
//! one melody offset per eighth-note step in playback order. Steps that fall
//! past the end of the buffer still consume their draw.

use log::debug;

use crate::error::Result;
use crate::rng::Stream;

/// Output sample rate in Hz.
pub const SAMPLE_RATE: u32 = 44100;

/// Shortest clip in seconds.
pub const MIN_SECONDS: u32 = 1;

/// Longest clip in seconds.
pub const MAX_SECONDS: u32 = 15;

const MAJOR_INTERVALS: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];
const MINOR_INTERVALS: [i32; 7] = [0, 2, 3, 5, 7, 8, 10];

/// Scale degrees of the chord root per bar, cycled.
const PROGRESSION: [usize; 4] = [0, 5, 3, 4];

/// Chord tones as scale-index offsets from the bar's degree.
const CHORD_TONES: [usize; 3] = [0, 4, 7];

const STEPS_PER_BAR: usize = 8;

const REFERENCE_HZ: f64 = 440.0;

/// Semitones from the reference A down to the scale's tonic.
const TONIC_OFFSET: i32 = -9;

const ATTACK_SECONDS: f64 = 0.01;
const RELEASE_FRACTION: f64 = 0.2;
const CHORD_GAIN: f64 = 0.25;
const MELODY_GAIN: f64 = 0.5;

/// Peak level after normalization.
const HEADROOM: f64 = 0.98;

/// Clamps a requested duration to [`MIN_SECONDS`]..=[`MAX_SECONDS`].
pub fn clamp_seconds(seconds: u32) -> u32 {
    seconds.clamp(MIN_SECONDS, MAX_SECONDS)
}

/// Interval table a clip is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Major,
    Minor,
}

impl Scale {
    /// Semitone offsets of the seven degrees.
    pub fn intervals(&self) -> &'static [i32; 7] {
        match self {
            Scale::Major => &MAJOR_INTERVALS,
            Scale::Minor => &MINOR_INTERVALS,
        }
    }
}

/// Oscillator shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    /// Arcsine of a sine, scaled to [-1, 1].
    Triangle,
    /// Sign of a sine; exactly 0 at zero crossings.
    Square,
}

impl Waveform {
    const ALL: [Waveform; 3] = [Waveform::Sine, Waveform::Triangle, Waveform::Square];

    /// Oscillator value at absolute time `t` seconds.
    pub fn sample(&self, freq: f64, t: f64) -> f64 {
        let s = (std::f64::consts::TAU * freq * t).sin();
        match self {
            Waveform::Sine => s,
            Waveform::Triangle => 2.0 * s.asin() / std::f64::consts::PI,
            Waveform::Square => {
                if s > 0.0 {
                    1.0
                } else if s < 0.0 {
                    -1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// Clip-wide parameters, drawn before any note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SongPlan {
    /// 110-149.
    pub bpm: u32,
    pub scale: Scale,
    /// Semitones relative to the reference, -12 to 12.
    pub root: i32,
    pub waveform: Waveform,
}

impl SongPlan {
    /// Draws the plan: tempo, scale, root, waveform, one draw each.
    pub fn draw(stream: &mut Stream) -> Self {
        let bpm = 110 + (stream.next_f64() * 40.0).floor() as u32;
        let scale = if stream.next_f64() < 0.5 {
            Scale::Major
        } else {
            Scale::Minor
        };
        let root = stream.int_in(-12, 12) as i32;
        let waveform = stream
            .pick(&Waveform::ALL[..])
            .copied()
            .unwrap_or(Waveform::Sine);
        Self {
            bpm,
            scale,
            root,
            waveform,
        }
    }

    pub fn beat_seconds(&self) -> f64 {
        60.0 / f64::from(self.bpm)
    }

    /// Four beats.
    pub fn bar_seconds(&self) -> f64 {
        4.0 * self.beat_seconds()
    }

    /// One eighth note.
    pub fn step_seconds(&self) -> f64 {
        self.beat_seconds() / 2.0
    }

    /// Frequency of a scale degree; degrees wrap within the octave.
    pub fn degree_frequency(&self, degree: i64) -> f64 {
        let idx = degree.rem_euclid(7) as usize;
        let semitone = self.root + self.scale.intervals()[idx] + TONIC_OFFSET;
        REFERENCE_HZ * 2f64.powf(f64::from(semitone) / 12.0)
    }
}

/// Fixed-length 16-bit mono PCM at [`SAMPLE_RATE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl PcmBuffer {
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn duration_sec(&self) -> f32 {
        super::wav::samples_to_duration(self.samples.len(), self.sample_rate)
    }

    /// Encodes the buffer as a WAV file.
    pub fn to_wav(&self) -> Result<Vec<u8>> {
        super::wav::encode_wav(&self.samples, self.sample_rate)
    }
}

/// Synthesizes a clip of `seconds` (clamped to 1-15) from `stream`.
pub fn synthesize(stream: &mut Stream, seconds: u32) -> PcmBuffer {
    let seconds = clamp_seconds(seconds);
    let sr = f64::from(SAMPLE_RATE);
    let length = (seconds * SAMPLE_RATE) as usize;
    let mut mix = vec![0.0f64; length];

    let plan = SongPlan::draw(stream);
    let step = plan.step_seconds();
    let step_samples = (step * sr).floor() as usize;
    let bars = (f64::from(seconds) / plan.bar_seconds()).ceil() as usize;

    let mut t = 0.0;
    for bar in 0..bars {
        let degree = PROGRESSION[bar % PROGRESSION.len()];
        let chord = CHORD_TONES.map(|tone| plan.degree_frequency((degree + tone) as i64));

        for _ in 0..STEPS_PER_BAR {
            let start = (t * sr).floor() as usize;
            let end = length.min(start + step_samples);
            let melody_degree = degree as i64 + stream.int_in(-1, 1);
            let melody = plan.degree_frequency(melody_degree);

            render_step(&mut mix, start, end, &chord, melody, plan.waveform);
            t += step;
        }
    }

    debug!(
        "Synthesized {}s clip: {} bpm, {:?}, root {}, {:?}",
        seconds, plan.bpm, plan.scale, plan.root, plan.waveform
    );

    normalize_to_pcm(&mix)
}

/// Adds one enveloped step (chord plus melody) into `mix[start..end]`.
fn render_step(
    mix: &mut [f64],
    start: usize,
    end: usize,
    chord: &[f64; 3],
    melody: f64,
    waveform: Waveform,
) {
    if end <= start {
        return;
    }
    let sr = f64::from(SAMPLE_RATE);
    let step_len = (end - start) as f64;
    let attack_samples = ATTACK_SECONDS * sr;

    for (offset, slot) in mix[start..end].iter_mut().enumerate() {
        let k = offset as f64;
        let env = envelope(k, step_len, attack_samples);
        let t = (start + offset) as f64 / sr;

        let chord_sum: f64 = chord.iter().map(|&f| waveform.sample(f, t)).sum();
        let chord_voice = chord_sum / 3.0 * CHORD_GAIN;
        let lead = waveform.sample(melody, t) * MELODY_GAIN;
        *slot += (chord_voice + lead) * env;
    }
}

/// Linear attack, flat sustain, linear release over the last 20%.
fn envelope(k: f64, step_len: f64, attack_samples: f64) -> f64 {
    let attack = (k / attack_samples).min(1.0);
    let release = ((1.0 - k / step_len) / RELEASE_FRACTION).min(1.0);
    attack.min(release).max(0.0)
}

/// Peak-normalizes to [`HEADROOM`] and quantizes to 16-bit.
///
/// A silent mix stays silent (gain 1).
pub fn normalize_to_pcm(mix: &[f64]) -> PcmBuffer {
    let peak = mix.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    let gain = if peak > 0.0 { HEADROOM / peak } else { 1.0 };
    let samples = mix
        .iter()
        .map(|v| ((v * gain).clamp(-1.0, 1.0) * 32767.0).round() as i16)
        .collect();
    PcmBuffer::new(samples, SAMPLE_RATE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{derive_stream, Seed};

    fn clip(seed: u64, salt: u64, seconds: u32) -> PcmBuffer {
        synthesize(&mut derive_stream(Seed::from(seed), salt), seconds)
    }

    #[test]
    fn duration_is_clamped() {
        assert_eq!(clip(1, 1001, 0).len(), 44100);
        assert_eq!(clip(1, 1001, 100).len(), 661_500);
        assert_eq!(clip(1, 1001, 3).len(), 3 * 44100);
    }

    #[test]
    fn same_stream_same_samples() {
        let a = clip(0x1, 1001, 10);
        let b = clip(0x1, 1001, 10);
        assert_eq!(a, b);
    }

    #[test]
    fn different_salt_different_samples() {
        assert_ne!(clip(0x1, 1001, 2), clip(0x1, 1002, 2));
    }

    #[test]
    fn normalized_peak_hits_headroom() {
        let pcm = clip(0xfeed, 2003, 4);
        let peak = pcm.samples().iter().map(|s| i32::from(*s).abs()).max().unwrap();
        let target = (HEADROOM * 32767.0).round() as i32;
        assert!(peak <= 32767);
        assert!((peak - target).abs() <= 1, "peak {} target {}", peak, target);
    }

    #[test]
    fn normalize_silence_stays_silent() {
        let pcm = normalize_to_pcm(&[0.0; 16]);
        assert!(pcm.samples().iter().all(|&s| s == 0));
    }

    #[test]
    fn normalize_scales_to_headroom() {
        let pcm = normalize_to_pcm(&[0.0, 0.25, -0.5, 0.1]);
        assert_eq!(pcm.samples()[2], -((HEADROOM * 32767.0).round() as i16));
        assert_eq!(pcm.samples()[1], (0.49 * 32767.0f64).round() as i16);
    }

    #[test]
    fn plan_consumes_four_draws() {
        let mut stream = derive_stream(Seed::from(5), 5);
        let mut reference = stream.clone();
        let plan = SongPlan::draw(&mut stream);
        reference.burn(4);
        assert_eq!(stream, reference);
        assert!((110..150).contains(&plan.bpm));
        assert!((-12..=12).contains(&plan.root));
    }

    #[test]
    fn every_step_consumes_one_draw() {
        let mut stream = derive_stream(Seed::from(77), 3001);
        let mut reference = stream.clone();
        let plan = SongPlan::draw(&mut stream.clone());
        let _ = synthesize(&mut stream, 2);

        let bars = (2.0 / plan.bar_seconds()).ceil() as usize;
        reference.burn(4 + bars * STEPS_PER_BAR);
        assert_eq!(stream, reference);
    }

    #[test]
    fn degree_frequency_reference_points() {
        let plan = SongPlan {
            bpm: 120,
            scale: Scale::Major,
            root: 9,
            waveform: Waveform::Sine,
        };
        // root 9 cancels the tonic offset: degree 0 is A440.
        assert!((plan.degree_frequency(0) - 440.0).abs() < 1e-9);
        // Degree 7 wraps to degree 0; -1 wraps to degree 6.
        assert_eq!(plan.degree_frequency(7), plan.degree_frequency(0));
        assert_eq!(plan.degree_frequency(-1), plan.degree_frequency(6));
    }

    #[test]
    fn step_timing() {
        let plan = SongPlan {
            bpm: 120,
            scale: Scale::Minor,
            root: 0,
            waveform: Waveform::Square,
        };
        assert_eq!(plan.bar_seconds(), 2.0);
        assert_eq!(plan.step_seconds(), 0.25);
    }

    #[test]
    fn waveform_shapes() {
        // Quarter period of 1 Hz: sine peaks at 1.
        assert!((Waveform::Sine.sample(1.0, 0.25) - 1.0).abs() < 1e-12);
        assert!((Waveform::Triangle.sample(1.0, 0.25) - 1.0).abs() < 1e-6);
        assert_eq!(Waveform::Square.sample(1.0, 0.75), -1.0);
        assert_eq!(Waveform::Square.sample(1.0, 0.0), 0.0);
    }

    #[test]
    fn envelope_shape() {
        let attack = ATTACK_SECONDS * f64::from(SAMPLE_RATE);
        assert_eq!(envelope(0.0, 10_000.0, attack), 0.0);
        assert_eq!(envelope(5_000.0, 10_000.0, attack), 1.0);
        assert!(envelope(9_000.0, 10_000.0, attack) < 0.6);
        assert!(envelope(9_999.0, 10_000.0, attack) < 0.01);
    }

    #[test]
    fn published_clip_is_stable() {
        // Seed 0x1, page 1, index 1, 10 seconds.
        let mut stream = derive_stream(Seed::from(1), 1001);
        let plan = SongPlan::draw(&mut stream.clone());
        assert_eq!(plan.bpm, 121);
        assert_eq!(plan.scale, Scale::Minor);
        assert_eq!(plan.root, -10);
        assert_eq!(plan.waveform, Waveform::Sine);

        let pcm = synthesize(&mut stream, 10);
        let samples = pcm.samples();
        assert_eq!(&samples[..4], &[0, 2, 10, 22]);
        assert_eq!(samples[22_050], 6394);
        let checksum: i64 = samples.iter().map(|&s| i64::from(s)).sum();
        assert_eq!(checksum, 818_276);
    }
}
