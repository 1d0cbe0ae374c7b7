//! Spelled-word insertion: appends pre-rendered phonetic clips
//!
//! Clips live under `<root>/<sample_rate>/<token>.wav`, one per symbol,
//! mono 16-bit at the session rate. This is a byte-copy join, no
//! synthesis: frames are streamed into the encoder in fixed-size chunks
//! so the audio clock advances by exactly the clip's frame count.

use crate::error::{Result, TrainerError};
use crate::morse::MorseEncoder;
use crate::sink::AudioSink;
use std::path::{Path, PathBuf};

const CHUNK_FRAMES: usize = 4096;

/// Directory of per-symbol audio clips for one sample rate
pub struct SpellCorpus {
    root: PathBuf,
    sample_rate: u32,
}

impl SpellCorpus {
    pub fn new<P: AsRef<Path>>(root: P, sample_rate: u32) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            sample_rate,
        }
    }

    /// Clip file for one call-sign character; `/` is spoken as "stroke"
    pub fn clip_path(&self, ch: char) -> PathBuf {
        let token = match ch {
            '/' => "stroke".to_string(),
            other => other.to_string(),
        };
        self.root
            .join(self.sample_rate.to_string())
            .join(format!("{token}.wav"))
    }

    fn open_clip(&self, path: &Path) -> Result<hound::WavReader<std::io::BufReader<std::fs::File>>> {
        if !path.is_file() {
            return Err(TrainerError::AssetMissing(path.to_path_buf()));
        }
        let reader = hound::WavReader::open(path)?;
        let spec = reader.spec();
        let format_ok = spec.channels == 1
            && spec.bits_per_sample == 16
            && spec.sample_format == hound::SampleFormat::Int
            && spec.sample_rate == self.sample_rate;
        if !format_ok {
            return Err(TrainerError::FormatMismatch {
                path: path.to_path_buf(),
                expected: format!("mono 16-bit int @ {} Hz", self.sample_rate),
                actual: format!(
                    "{}ch {}-bit {:?} @ {} Hz",
                    spec.channels, spec.bits_per_sample, spec.sample_format, spec.sample_rate
                ),
            });
        }
        Ok(reader)
    }
}

/// Append the clip for every character of `word`, in word order
pub fn append_spelled_word<W: AudioSink>(
    encoder: &mut MorseEncoder<W>,
    corpus: &SpellCorpus,
    word: &str,
) -> Result<()> {
    for ch in word.chars() {
        let path = corpus.clip_path(ch);
        let mut reader = corpus.open_clip(&path)?;
        let mut chunk = Vec::with_capacity(CHUNK_FRAMES);
        for sample in reader.samples::<i16>() {
            chunk.push(sample?);
            if chunk.len() == CHUNK_FRAMES {
                encoder.write_samples(&chunk)?;
                chunk.clear();
            }
        }
        if !chunk.is_empty() {
            encoder.write_samples(&chunk)?;
        }
    }
    Ok(())
}
