//! Output sink traits and the WAV audio sink
//!
//! The encoder and session assembler write through these traits so the
//! actual destinations (WAV file, Y4M stream, in-memory buffers in tests)
//! stay pluggable. All writes are append-only.

use crate::error::{Result, TrainerError};
use crate::{FRAME_HEIGHT, FRAME_WIDTH};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

/// Append-only destination for mono 16-bit PCM frames
pub trait AudioSink {
    fn write_samples(&mut self, samples: &[i16]) -> Result<()>;
}

/// In-memory sink, used by tests to inspect the emitted sample stream
impl AudioSink for Vec<i16> {
    fn write_samples(&mut self, samples: &[i16]) -> Result<()> {
        self.extend_from_slice(samples);
        Ok(())
    }
}

/// WAV file sink (mono, 16-bit signed little-endian) backed by hound
///
/// The header carries the final frame count, so `finalize` must run on the
/// normal completion path; dropping without it leaves a file hound patches
/// on drop but without error reporting.
pub struct WavAudioSink {
    writer: hound::WavWriter<BufWriter<File>>,
}

impl WavAudioSink {
    pub fn create<P: AsRef<Path>>(path: P, sample_rate: u32) -> Result<Self> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let writer = hound::WavWriter::create(path, spec)?;
        Ok(Self { writer })
    }

    /// Commit the header with the final frame count and close the file
    pub fn finalize(self) -> Result<()> {
        self.writer.finalize()?;
        Ok(())
    }
}

impl AudioSink for WavAudioSink {
    fn write_samples(&mut self, samples: &[i16]) -> Result<()> {
        for &sample in samples {
            self.writer.write_sample(sample)?;
        }
        Ok(())
    }
}

/// One video frame: fixed-geometry RGB24 raster
#[derive(Clone, Debug)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, rgb: Vec<u8>) -> Result<Self> {
        if width != FRAME_WIDTH || height != FRAME_HEIGHT {
            return Err(TrainerError::FrameSizeMismatch {
                expected_width: FRAME_WIDTH,
                expected_height: FRAME_HEIGHT,
                width,
                height,
            });
        }
        if rgb.len() != (width as usize) * (height as usize) * 3 {
            return Err(TrainerError::InvalidConfig(format!(
                "frame buffer is {} bytes, expected {}",
                rgb.len(),
                width as usize * height as usize * 3
            )));
        }
        Ok(Self { width, height, rgb })
    }
}

/// Append-only destination for video frames at a fixed declared frame rate
pub trait VideoSink {
    fn write_frame(&mut self, frame: &Frame) -> Result<()>;
}

/// In-memory sink counting frames, used by tests
impl VideoSink for Vec<Frame> {
    fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        self.push(frame.clone());
        Ok(())
    }
}

/// Supplier of the highlight-map bitmap for a country, cached by the
/// implementation under the normalized (slug) country name
pub trait MapSource {
    fn map_image(&mut self, country: &str) -> Result<Arc<Frame>>;
}
