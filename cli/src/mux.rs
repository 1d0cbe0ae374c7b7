//! Final mux step: hand the finished audio and video streams to ffmpeg

use log::info;
use std::io;
use std::path::Path;
use std::process::Command;

/// Combine the video and audio tracks into one container. The audio is
/// stereoized with a short Haas delay; video is still-image-tuned x264.
pub fn mux_streams(video: &Path, audio: &Path, output: &Path) -> io::Result<()> {
    info!("multiplexing {} + {} -> {}", video.display(), audio.display(), output.display());
    let status = Command::new("ffmpeg")
        .arg("-i")
        .arg(video)
        .arg("-i")
        .arg(audio)
        .args(["-c:v", "libx264"])
        .args(["-preset", "medium"])
        .args(["-tune", "stillimage"])
        .args(["-crf", "18"])
        .args(["-pix_fmt", "yuv420p"])
        .args(["-c:a", "flac"])
        .args(["-compression_level", "12"])
        .args(["-af", "pan=stereo|c0=c0|c1=-1*c0,adelay=0|10"])
        .args(["-cues_to_front", "1"])
        .arg("-shortest")
        .arg("-y")
        .arg(output)
        .status()?;
    if !status.success() {
        return Err(io::Error::other(format!("ffmpeg exited with {status}")));
    }
    Ok(())
}
