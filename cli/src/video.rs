//! YUV4MPEG2 video sink
//!
//! Y4M is uncompressed and self-describing, so the video track stays
//! independently playable and feeds straight into the ffmpeg mux step.
//! Frames arrive as RGB24 and are converted to full-range BT.601 4:2:0.

use cwtrainer_core::{Frame, Result, VideoSink};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct Y4mVideoSink {
    writer: BufWriter<File>,
}

impl Y4mVideoSink {
    pub fn create<P: AsRef<Path>>(path: P, width: u32, height: u32, fps: u32) -> Result<Self> {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "YUV4MPEG2 W{width} H{height} F{fps}:1 Ip A1:1 C420jpeg")?;
        Ok(Self { writer })
    }

    /// Flush and close the stream
    pub fn finalize(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl VideoSink for Y4mVideoSink {
    fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        let (y, u, v) = rgb_to_yuv420(frame);
        self.writer.write_all(b"FRAME\n")?;
        self.writer.write_all(&y)?;
        self.writer.write_all(&u)?;
        self.writer.write_all(&v)?;
        Ok(())
    }
}

/// Full-range BT.601 conversion with 2x2 chroma subsampling
fn rgb_to_yuv420(frame: &Frame) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let w = frame.width as usize;
    let h = frame.height as usize;
    let rgb = &frame.rgb;

    let mut y_plane = vec![0u8; w * h];
    for (i, px) in rgb.chunks_exact(3).enumerate() {
        let (r, g, b) = (px[0] as f32, px[1] as f32, px[2] as f32);
        y_plane[i] = (0.299 * r + 0.587 * g + 0.114 * b).round().clamp(0.0, 255.0) as u8;
    }

    let (cw, ch) = (w / 2, h / 2);
    let mut u_plane = vec![0u8; cw * ch];
    let mut v_plane = vec![0u8; cw * ch];
    for cy in 0..ch {
        for cx in 0..cw {
            // average the 2x2 block before converting chroma
            let (mut r, mut g, mut b) = (0.0f32, 0.0f32, 0.0f32);
            for dy in 0..2 {
                for dx in 0..2 {
                    let idx = ((cy * 2 + dy) * w + cx * 2 + dx) * 3;
                    r += rgb[idx] as f32;
                    g += rgb[idx + 1] as f32;
                    b += rgb[idx + 2] as f32;
                }
            }
            let (r, g, b) = (r / 4.0, g / 4.0, b / 4.0);
            let u = 128.0 - 0.168736 * r - 0.331264 * g + 0.5 * b;
            let v = 128.0 + 0.5 * r - 0.418688 * g - 0.081312 * b;
            u_plane[cy * cw + cx] = u.round().clamp(0.0, 255.0) as u8;
            v_plane[cy * cw + cx] = v.round().clamp(0.0, 255.0) as u8;
        }
    }
    (y_plane, u_plane, v_plane)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cwtrainer_core::{FRAME_HEIGHT, FRAME_WIDTH};
    use std::fs;

    fn solid_frame(r: u8, g: u8, b: u8) -> Frame {
        let mut rgb = Vec::with_capacity((FRAME_WIDTH * FRAME_HEIGHT * 3) as usize);
        for _ in 0..FRAME_WIDTH * FRAME_HEIGHT {
            rgb.extend_from_slice(&[r, g, b]);
        }
        Frame::new(FRAME_WIDTH, FRAME_HEIGHT, rgb).unwrap()
    }

    #[test]
    fn test_gray_maps_to_neutral_chroma() {
        let (y, u, v) = rgb_to_yuv420(&solid_frame(128, 128, 128));
        assert!(y.iter().all(|&s| s == 128));
        assert!(u.iter().all(|&s| s == 128));
        assert!(v.iter().all(|&s| s == 128));
    }

    #[test]
    fn test_red_pushes_v_up() {
        let (_, u, v) = rgb_to_yuv420(&solid_frame(255, 0, 0));
        assert!(v[0] > 200, "v = {}", v[0]);
        assert!(u[0] < 128);
    }

    #[test]
    fn test_stream_layout() {
        let path = std::env::temp_dir().join(format!("cwtrainer-y4m-{}.y4m", std::process::id()));
        let mut sink = Y4mVideoSink::create(&path, FRAME_WIDTH, FRAME_HEIGHT, 2).unwrap();
        sink.write_frame(&solid_frame(0, 0, 0)).unwrap();
        sink.write_frame(&solid_frame(0, 0, 0)).unwrap();
        sink.finalize().unwrap();

        let bytes = fs::read(&path).unwrap();
        let header = b"YUV4MPEG2 W1920 H1080 F2:1 Ip A1:1 C420jpeg\n";
        assert!(bytes.starts_with(header));
        let frame_bytes = (1920 * 1080 * 3 / 2) + "FRAME\n".len();
        assert_eq!(bytes.len(), header.len() + 2 * frame_bytes);
        fs::remove_file(&path).unwrap();
    }
}
