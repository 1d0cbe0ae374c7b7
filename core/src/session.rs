//! Session assembly: one call sign at a time, audio first, video caught up
//!
//! Records arrive from a pluggable source (any iterator), already carrying
//! the resolved country so the core never touches the lookup collaborator.
//! Output order equals iteration order.

use crate::error::{Result, TrainerError};
use crate::morse::MorseEncoder;
use crate::sink::{AudioSink, Frame, MapSource, VideoSink};
use crate::spell::{append_spelled_word, SpellCorpus};
use crate::sync::frames_owed;
use crate::{CALLSIGN_GAP_DITS, SPELL_GAP_DITS};
use log::{debug, info, warn};
use std::sync::Arc;

/// One unit of content, produced by the external corpus/lookup collaborators
#[derive(Debug, Clone)]
pub struct CallsignRecord {
    pub callsign: String,
    pub country: Option<String>,
}

impl CallsignRecord {
    pub fn new(callsign: impl Into<String>, country: Option<String>) -> Self {
        Self {
            callsign: callsign.into(),
            country,
        }
    }
}

/// Video side of a session: sink, map supplier, and the video clock
pub struct VideoTrack<V: VideoSink, M: MapSource> {
    sink: V,
    maps: M,
    fps: u32,
    frames_written: u64,
}

impl<V: VideoSink, M: MapSource> VideoTrack<V, M> {
    pub fn new(sink: V, maps: M, fps: u32) -> Self {
        Self {
            sink,
            maps,
            fps,
            frames_written: 0,
        }
    }

    /// Video clock: total frames written so far
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Video clock in seconds
    pub fn elapsed(&self) -> f64 {
        self.frames_written as f64 / self.fps as f64
    }

    pub fn into_sink(self) -> V {
        self.sink
    }
}

/// Placeholder for audio-only sessions
pub struct NoVideo;

impl VideoSink for NoVideo {
    fn write_frame(&mut self, _frame: &Frame) -> Result<()> {
        Ok(())
    }
}

impl MapSource for NoVideo {
    fn map_image(&mut self, country: &str) -> Result<Arc<Frame>> {
        Err(TrainerError::InvalidConfig(format!(
            "no map source configured, cannot render a frame for {country}"
        )))
    }
}

/// Drives the per-call-sign pipeline against one audio (and optionally one
/// video) output stream
pub struct Session<W: AudioSink, V: VideoSink, M: MapSource> {
    encoder: MorseEncoder<W>,
    corpus: SpellCorpus,
    video: Option<VideoTrack<V, M>>,
}

impl<W: AudioSink> Session<W, NoVideo, NoVideo> {
    pub fn audio_only(encoder: MorseEncoder<W>, corpus: SpellCorpus) -> Self {
        Session {
            encoder,
            corpus,
            video: None,
        }
    }
}

impl<W: AudioSink, V: VideoSink, M: MapSource> Session<W, V, M> {
    pub fn new(
        encoder: MorseEncoder<W>,
        corpus: SpellCorpus,
        video: Option<VideoTrack<V, M>>,
    ) -> Self {
        Self {
            encoder,
            corpus,
            video,
        }
    }

    pub fn encoder(&self) -> &MorseEncoder<W> {
        &self.encoder
    }

    /// Render one call sign: Morse, pacing gap, spelled-out audio, pacing
    /// gap, then enough video frames to catch the video clock up
    pub fn append_callsign(&mut self, record: &CallsignRecord) -> Result<()> {
        info!(
            "appending callsign {} ({})",
            record.callsign,
            record.country.as_deref().unwrap_or("unresolved")
        );
        let dit = self.encoder.samples_per_dit();
        self.encoder.write_text(&record.callsign)?;
        self.encoder.write_silence(SPELL_GAP_DITS as usize * dit)?;
        append_spelled_word(&mut self.encoder, &self.corpus, &record.callsign)?;
        self.encoder.write_silence(CALLSIGN_GAP_DITS as usize * dit)?;

        if let Some(video) = &mut self.video {
            let country = match record.country.as_deref() {
                Some(country) => country,
                None => {
                    warn!(
                        "no country for {}, skipping video frames",
                        record.callsign
                    );
                    return Ok(());
                }
            };
            let image = video.maps.map_image(country)?;
            let owed = frames_owed(
                self.encoder.audio_clock(),
                self.encoder.sample_rate(),
                video.fps,
                video.frames_written,
            );
            for _ in 0..owed {
                video.sink.write_frame(&image)?;
                video.frames_written += 1;
            }
            debug!(
                "A-V drift after {}: {:.4} s",
                record.callsign,
                self.encoder.elapsed() - video.elapsed()
            );
        }
        Ok(())
    }

    /// Process records strictly in iteration order
    pub fn run<I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = CallsignRecord>,
    {
        for record in records {
            self.append_callsign(&record)?;
        }
        Ok(())
    }

    /// Tear down for finalization of the underlying sinks
    pub fn into_parts(self) -> (MorseEncoder<W>, Option<VideoTrack<V, M>>) {
        (self.encoder, self.video)
    }
}
