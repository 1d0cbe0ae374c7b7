//! Keyed sinusoid rendering with click-suppressing edge envelope

use crate::{FADE_DIVISOR, TONE_AMPLITUDE};
use std::f64::consts::PI;

/// Renders windowed sine bursts at a fixed pitch and sample rate
///
/// Phase starts at 0 and accumulates across the whole buffer. The first
/// and last `fade_len` samples are smoothstep-tapered to zero so the keyed
/// edges carry no discontinuity.
pub struct ToneGenerator {
    delta_phi: f64,
    fade_len: usize,
}

impl ToneGenerator {
    pub fn new(tone_hz: f64, sample_rate: u32, samples_per_dit: usize) -> Self {
        Self {
            delta_phi: 2.0 * PI * tone_hz / sample_rate as f64,
            fade_len: (samples_per_dit / FADE_DIVISOR).max(1),
        }
    }

    /// Render one tone burst of `duration_samples` 16-bit mono samples
    pub fn render(&self, duration_samples: usize) -> Vec<i16> {
        let fade_len = self.fade_len as f64;
        let mut samples = Vec::with_capacity(duration_samples);
        let mut phi = 0.0f64;
        for i in 0..duration_samples {
            let rise = i as f64 / fade_len;
            let fall = (duration_samples - 1 - i) as f64 / fade_len;
            let e = rise.min(fall).min(1.0).max(0.0);
            // smoothstep on the linear ramp for a softer keying edge
            let e = e * e * (3.0 - 2.0 * e);
            samples.push((phi.sin() * TONE_AMPLITUDE * e).round() as i16);
            phi += self.delta_phi;
        }
        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_length_matches_request() {
        let gen = ToneGenerator::new(600.0, 48000, 823);
        assert_eq!(gen.render(823).len(), 823);
        assert_eq!(gen.render(3 * 823).len(), 3 * 823);
    }

    #[test]
    fn test_edges_start_and_end_at_zero() {
        let gen = ToneGenerator::new(600.0, 48000, 823);
        let burst = gen.render(3 * 823);
        assert_eq!(burst[0], 0, "first sample must be silent");
        assert_eq!(*burst.last().unwrap(), 0, "last sample must be silent");
    }

    #[test]
    fn test_amplitude_stays_within_headroom() {
        let gen = ToneGenerator::new(600.0, 48000, 823);
        let burst = gen.render(823);
        let peak = burst.iter().map(|s| s.unsigned_abs()).max().unwrap();
        assert!(peak <= 20000, "peak {} exceeds tone amplitude", peak);
        assert!(peak > 15000, "burst should reach near full amplitude");
    }

    #[test]
    fn test_fade_region_stays_quiet() {
        let gen = ToneGenerator::new(600.0, 48000, 500);
        let burst = gen.render(500);
        // fade is dit/5 = 100 samples; nothing before ~half the fade may be loud
        for (i, &s) in burst.iter().take(50).enumerate() {
            assert!(
                s.unsigned_abs() < 10000,
                "sample {} = {} too loud inside fade-in",
                i,
                s
            );
        }
    }

    #[test]
    fn test_tiny_dit_does_not_panic() {
        // samples_per_dit below the fade divisor still yields a valid fade
        let gen = ToneGenerator::new(600.0, 8000, 3);
        let burst = gen.render(3);
        assert_eq!(burst.len(), 3);
    }
}
