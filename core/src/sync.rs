//! Audio/video clock reconciliation
//!
//! The video track is caught up to the audio clock by emitting however
//! many frames the elapsed audio time implies. Integer arithmetic keeps
//! the target exact: video never leads audio and, immediately after a
//! reconciliation, lags by less than one frame period.

/// Frames still owed to reach `floor(fps * audio_samples / sample_rate)`
pub fn frames_owed(audio_samples: u64, sample_rate: u32, fps: u32, frames_written: u64) -> u64 {
    let target = fps as u64 * audio_samples / sample_rate as u64;
    target.saturating_sub(frames_written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_exact_boundaries() {
        // one second of audio at 2 fps owes exactly 2 frames
        assert_eq!(frames_owed(48000, 48000, 2, 0), 2);
        // one sample short of the second frame boundary
        assert_eq!(frames_owed(47999, 48000, 2, 1), 0);
        assert_eq!(frames_owed(24000, 48000, 2, 0), 1);
    }

    #[test]
    fn test_never_negative_when_ahead() {
        assert_eq!(frames_owed(1000, 48000, 2, 50), 0);
        assert_eq!(frames_owed(0, 48000, 30, 0), 0);
    }

    #[test]
    fn test_catch_up_after_long_gap() {
        // 90 s of audio at 30 fps with only 100 frames down
        assert_eq!(frames_owed(90 * 48000, 48000, 30, 100), 2600);
    }

    #[test]
    fn test_lag_bounded_over_random_sequences() {
        let mut rng = StdRng::seed_from_u64(7);
        for &(sample_rate, fps) in &[(48000u32, 2u32), (44100, 30), (8000, 25)] {
            let mut audio: u64 = 0;
            let mut frames: u64 = 0;
            for _ in 0..2000 {
                audio += rng.gen_range(0..200_000);
                let owed = frames_owed(audio, sample_rate, fps, frames);
                frames += owed;
                let target = fps as u64 * audio / sample_rate as u64;
                // video never leads, and after reconciliation it is caught up
                assert_eq!(frames, target);
                // lag below one frame period
                let lag = audio as f64 / sample_rate as f64 - frames as f64 / fps as f64;
                assert!(lag > -1e-9 && lag < 1.0 / fps as f64, "lag {} out of bounds", lag);
            }
        }
    }

    #[test]
    fn test_noop_calls_are_stable() {
        let owed = frames_owed(48000, 48000, 2, 2);
        assert_eq!(owed, 0);
        // repeated reconciliation with no audio progress stays a no-op
        assert_eq!(frames_owed(48000, 48000, 2, 2 + owed), 0);
    }
}
