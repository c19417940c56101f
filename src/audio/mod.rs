//! Audio synthesis and WAV output.
//!
//! Provides the seeded synthesizer and a canonical 16-bit mono WAV encoder.

pub mod synth;
pub mod wav;

// Re-export commonly used items
pub use synth::{
    clamp_seconds, normalize_to_pcm, synthesize, PcmBuffer, Scale, SongPlan, Waveform,
    MAX_SECONDS, MIN_SECONDS, SAMPLE_RATE,
};
pub use wav::{encode_wav, samples_to_duration, write_wav, CHANNELS, WAV_HEADER_LEN};
