//! Morse keying: character table, element sequencing, and the audio clock

use crate::error::{Result, TrainerError};
use crate::sink::AudioSink;
use crate::tone::ToneGenerator;
use crate::DIT_UNITS_PER_WORD;

/// Fixed international Morse table: upper-case letters, digits, the
/// prefix separator `/`, and space (one inter-word gap token)
pub fn pattern(ch: char) -> Option<&'static str> {
    let mapped = match ch {
        'A' => ".-",
        'B' => "-...",
        'C' => "-.-.",
        'D' => "-..",
        'E' => ".",
        'F' => "..-.",
        'G' => "--.",
        'H' => "....",
        'I' => "..",
        'J' => ".---",
        'K' => "-.-",
        'L' => ".-..",
        'M' => "--",
        'N' => "-.",
        'O' => "---",
        'P' => ".--.",
        'Q' => "--.-",
        'R' => ".-.",
        'S' => "...",
        'T' => "-",
        'U' => "..-",
        'V' => "...-",
        'W' => ".--",
        'X' => "-..-",
        'Y' => "-.--",
        'Z' => "--..",
        '1' => ".----",
        '2' => "..---",
        '3' => "...--",
        '4' => "....-",
        '5' => ".....",
        '6' => "-....",
        '7' => "--...",
        '8' => "---..",
        '9' => "----.",
        '0' => "-----",
        '/' => "-..-.",
        ' ' => " ",
        _ => return None,
    };
    Some(mapped)
}

/// Session timing parameters, fixed at construction
#[derive(Debug, Clone, Copy)]
pub struct MorseConfig {
    pub wpm: u32,
    pub tone_hz: f64,
    pub sample_rate: u32,
}

impl Default for MorseConfig {
    fn default() -> Self {
        Self {
            wpm: crate::DEFAULT_WPM,
            tone_hz: crate::DEFAULT_TONE_HZ,
            sample_rate: crate::DEFAULT_SAMPLE_RATE,
        }
    }
}

/// Writes keyed dit/dah tones and silences to an audio sink
///
/// The dit and dah buffers are rendered once at construction and reused
/// for every element. Owns the audio clock: a monotonically increasing
/// count of samples written, read by the A/V reconciler between writes.
pub struct MorseEncoder<W: AudioSink> {
    sink: W,
    sample_rate: u32,
    samples_per_dit: usize,
    dit: Vec<i16>,
    dah: Vec<i16>,
    samples_written: u64,
}

impl<W: AudioSink> MorseEncoder<W> {
    pub fn new(sink: W, config: MorseConfig) -> Result<Self> {
        if config.wpm == 0 {
            return Err(TrainerError::InvalidConfig("wpm must be > 0".into()));
        }
        if config.sample_rate == 0 {
            return Err(TrainerError::InvalidConfig("sample rate must be > 0".into()));
        }
        if !(config.tone_hz > 0.0) {
            return Err(TrainerError::InvalidConfig("tone pitch must be > 0".into()));
        }

        // PARIS: one word is 50 dit units, so wpm fixes the dit length
        let samples_per_dit = (config.sample_rate as f64 * 60.0
            / (DIT_UNITS_PER_WORD as f64 * config.wpm as f64))
            .round() as usize;
        if samples_per_dit < 1 {
            return Err(TrainerError::InvalidConfig(format!(
                "wpm {} too fast for sample rate {}",
                config.wpm, config.sample_rate
            )));
        }

        let tone = ToneGenerator::new(config.tone_hz, config.sample_rate, samples_per_dit);
        Ok(Self {
            sink,
            sample_rate: config.sample_rate,
            samples_per_dit,
            dit: tone.render(samples_per_dit),
            dah: tone.render(3 * samples_per_dit),
            samples_written: 0,
        })
    }

    pub fn samples_per_dit(&self) -> usize {
        self.samples_per_dit
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Audio clock: total samples written so far
    pub fn audio_clock(&self) -> u64 {
        self.samples_written
    }

    /// Audio clock in seconds
    pub fn elapsed(&self) -> f64 {
        self.samples_written as f64 / self.sample_rate as f64
    }

    fn emit(sink: &mut W, clock: &mut u64, samples: &[i16]) -> Result<()> {
        sink.write_samples(samples)?;
        *clock += samples.len() as u64;
        Ok(())
    }

    /// Append raw PCM frames, advancing the audio clock
    pub fn write_samples(&mut self, samples: &[i16]) -> Result<()> {
        Self::emit(&mut self.sink, &mut self.samples_written, samples)
    }

    pub fn write_silence(&mut self, sample_count: usize) -> Result<()> {
        self.write_samples(&vec![0i16; sample_count])
    }

    /// Encode one character
    ///
    /// An unknown character fails before anything reaches the sink. Each
    /// dit/dah is followed by one unit of silence; the character ends with
    /// two more units, so letters sit three units apart and the space
    /// token (4 units, then the common 1+2) yields the 7-unit word gap.
    pub fn write_character(&mut self, ch: char) -> Result<()> {
        let pattern = pattern(ch).ok_or(TrainerError::UnknownSymbol(ch))?;
        for element in pattern.chars() {
            match element {
                '.' => Self::emit(&mut self.sink, &mut self.samples_written, &self.dit)?,
                '-' => Self::emit(&mut self.sink, &mut self.samples_written, &self.dah)?,
                ' ' => self.write_silence(4 * self.samples_per_dit)?,
                _ => unreachable!("table only holds '.', '-' and ' '"),
            }
            self.write_silence(self.samples_per_dit)?;
        }
        self.write_silence(2 * self.samples_per_dit)
    }

    /// Upper-case `text` and encode it character by character
    pub fn write_text(&mut self, text: &str) -> Result<()> {
        for ch in text.to_uppercase().chars() {
            self.write_character(ch)?;
        }
        Ok(())
    }

    /// Hand the sink back for finalization
    pub fn into_sink(self) -> W {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder(wpm: u32, sample_rate: u32) -> MorseEncoder<Vec<i16>> {
        MorseEncoder::new(
            Vec::new(),
            MorseConfig {
                wpm,
                tone_hz: 600.0,
                sample_rate,
            },
        )
        .expect("encoder")
    }

    #[test]
    fn test_samples_per_dit_follows_paris() {
        // 8000 * 60 / (50 * 20) = 480 exactly
        assert_eq!(encoder(20, 8000).samples_per_dit(), 480);
        // 48000 * 60 / (50 * 35) = 1645.71.. rounds to 1646
        assert_eq!(encoder(35, 48000).samples_per_dit(), 1646);
    }

    #[test]
    fn test_dah_is_three_dits() {
        let enc = encoder(35, 48000);
        assert_eq!(enc.dah.len(), 3 * enc.dit.len());
        assert_eq!(enc.dit.len(), enc.samples_per_dit());
    }

    #[test]
    fn test_unknown_symbol_writes_nothing() {
        let mut enc = encoder(20, 8000);
        let err = enc.write_character('#').unwrap_err();
        assert!(matches!(err, TrainerError::UnknownSymbol('#')));
        assert_eq!(enc.audio_clock(), 0);
        assert!(enc.into_sink().is_empty());
    }

    #[test]
    fn test_single_dah_character_layout() {
        // T = dah(3) + element gap(1) + letter gap(2) = 6 units
        let mut enc = encoder(20, 8000);
        enc.write_character('T').unwrap();
        assert_eq!(enc.audio_clock(), 6 * 480);
        let samples = enc.into_sink();
        // tone occupies the first 3 units, everything after is silence
        assert!(samples[3 * 480..].iter().all(|&s| s == 0));
        assert!(samples[..3 * 480].iter().any(|&s| s != 0));
    }

    #[test]
    fn test_space_is_seven_units() {
        let mut enc = encoder(20, 8000);
        enc.write_character(' ').unwrap();
        assert_eq!(enc.audio_clock(), 7 * 480);
        assert!(enc.into_sink().iter().all(|&s| s == 0));
    }

    #[test]
    fn test_sos_decomposition() {
        let dit = 480u64;
        let mut enc = encoder(20, 8000);
        enc.write_text("sos").unwrap();
        // S: 3*(1+1) + 2 = 8; O: 3*(3+1) + 2 = 14; S: 8 -> 30 units
        assert_eq!(enc.audio_clock(), 30 * dit);

        // boundary check: first S's letter gap is silent, dit bursts are not
        let samples = enc.into_sink();
        let s_units = |u: u64| (u * dit) as usize;
        assert!(samples[s_units(6)..s_units(8)].iter().all(|&s| s == 0));
        assert!(samples[s_units(0)..s_units(1)].iter().any(|&s| s != 0));
        assert!(samples[s_units(2)..s_units(3)].iter().any(|&s| s != 0));
    }

    #[test]
    fn test_known_string_total_sample_count() {
        // TEST at 20 wpm / 8000 Hz: T=6, E=4, S=8, T=6 units, dit=480
        let mut enc = encoder(20, 8000);
        enc.write_text("TEST").unwrap();
        assert_eq!(enc.audio_clock(), 24 * 480);
    }

    #[test]
    fn test_write_text_uppercases() {
        let mut lower = encoder(20, 8000);
        let mut upper = encoder(20, 8000);
        lower.write_text("k1abc/p").unwrap();
        upper.write_text("K1ABC/P").unwrap();
        assert_eq!(lower.audio_clock(), upper.audio_clock());
        assert_eq!(lower.into_sink(), upper.into_sink());
    }

    #[test]
    fn test_zero_wpm_rejected() {
        let err = MorseEncoder::new(
            Vec::new(),
            MorseConfig {
                wpm: 0,
                tone_hz: 600.0,
                sample_rate: 48000,
            },
        )
        .err()
        .unwrap();
        assert!(matches!(err, TrainerError::InvalidConfig(_)));
    }
}
