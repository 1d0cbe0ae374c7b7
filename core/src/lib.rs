//! Morse-code call-sign trainer core
//!
//! Renders call signs as keyed CW tone bursts with PARIS timing, appends
//! spelled-out phonetic audio clips, and keeps a video frame stream
//! numerically synchronized to the audio sample count.

pub mod error;
pub mod morse;
pub mod session;
pub mod sink;
pub mod spell;
pub mod sync;
pub mod tone;

pub use error::{Result, TrainerError};
pub use morse::{MorseConfig, MorseEncoder};
pub use session::{CallsignRecord, NoVideo, Session, VideoTrack};
pub use sink::{AudioSink, Frame, MapSource, VideoSink, WavAudioSink};
pub use spell::SpellCorpus;
pub use sync::frames_owed;

// PARIS standard: one word is 50 dit units
// https://morsecode.world/international/timing/
pub const DIT_UNITS_PER_WORD: u32 = 50;

/// Peak sample value for keyed tones, leaving headroom under the i16 ceiling
pub const TONE_AMPLITUDE: f64 = 20000.0;

/// Envelope fade length as a fraction of one dit (fade = dit / 5)
pub const FADE_DIVISOR: usize = 5;

/// Pacing gap between a call sign's Morse rendering and its spelled-out audio
pub const SPELL_GAP_DITS: u64 = 40;

/// Pacing gap after a call sign, before the next one
pub const CALLSIGN_GAP_DITS: u64 = 15;

// Video frame geometry (fixed, matches the pre-rendered map bitmaps)
pub const FRAME_WIDTH: u32 = 1920;
pub const FRAME_HEIGHT: u32 = 1080;

// Session defaults; callers pick one consistent configuration per session
pub const DEFAULT_WPM: u32 = 35;
pub const DEFAULT_TONE_HZ: f64 = 600.0;
pub const DEFAULT_SAMPLE_RATE: u32 = 48000;
pub const DEFAULT_FPS: u32 = 2;
