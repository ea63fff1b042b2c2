//! Realtime render glue between a frame source and the audio driver.
//!
//! This module defines the minimal `FrameSource` trait and `render_interleaved`,
//! which fills one driver buffer of interleaved stereo `f32` with zero heap
//! work: frame `i` lands at `out[2i]` (left) and `out[2i + 1]` (right).
//!
//! Design goals
//! - No dynamic allocations, locks, or logging in the audio thread
//! - Silence after exhaustion is handled once, here, for every source
//! - Generic over the source type, so sessions can be swapped without trait objects

/// Per-invocation status reported back to the driver.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StreamStatus {
    /// More audio follows; keep invoking.
    Continue,
    /// The source is exhausted; this and every later buffer is silence.
    Complete,
}

/// Anything that can produce one stereo frame at a time until it runs dry.
pub trait FrameSource {
    /// Produce the next `(left, right)` frame, or `None` once the source is
    /// exhausted. Returning `None` must leave `is_finished()` true for good.
    fn next_frame(&mut self) -> Option<(f32, f32)>;

    /// True once the source has run dry. Never reverts to false.
    fn is_finished(&self) -> bool;
}

/// Fill `out` with `out.len() / 2` interleaved stereo frames from `src`.
///
/// Frames after the source finishes are zero. Returns
/// [`StreamStatus::Complete`] when the source is finished at the end of this
/// buffer, otherwise [`StreamStatus::Continue`]. An empty buffer is a no-op.
#[inline]
pub fn render_interleaved<S: FrameSource + ?Sized>(src: &mut S, out: &mut [f32]) -> StreamStatus {
    let mut frames = out.chunks_exact_mut(2);
    for frame in &mut frames {
        if src.is_finished() {
            frame.fill(0.0);
            continue;
        }
        let (l, r) = src.next_frame().unwrap_or((0.0, 0.0));
        frame[0] = l;
        frame[1] = r;
    }
    // A trailing half-frame is never meaningful audio.
    frames.into_remainder().fill(0.0);

    if src.is_finished() { StreamStatus::Complete } else { StreamStatus::Continue }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Emits `remaining` frames of `(1, -1)` then runs dry.
    struct Countdown {
        remaining: usize,
        done: bool,
        calls_after_done: usize,
    }

    impl FrameSource for Countdown {
        fn next_frame(&mut self) -> Option<(f32, f32)> {
            if self.done {
                self.calls_after_done += 1;
            }
            if self.remaining == 0 {
                self.done = true;
                return None;
            }
            self.remaining -= 1;
            Some((1.0, -1.0))
        }
        fn is_finished(&self) -> bool { self.done }
    }

    #[test]
    fn interleaves_left_then_right() {
        let mut src = Countdown { remaining: 10, done: false, calls_after_done: 0 };
        let mut out = [9.0f32; 6];
        assert_eq!(render_interleaved(&mut src, &mut out), StreamStatus::Continue);
        assert_eq!(out, [1.0, -1.0, 1.0, -1.0, 1.0, -1.0]);
    }

    #[test]
    fn pads_with_silence_and_completes() {
        let mut src = Countdown { remaining: 2, done: false, calls_after_done: 0 };
        let mut out = [9.0f32; 10];
        assert_eq!(render_interleaved(&mut src, &mut out), StreamStatus::Complete);
        assert_eq!(out, [1.0, -1.0, 1.0, -1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(src.calls_after_done, 0);

        let mut again = [9.0f32; 4];
        assert_eq!(render_interleaved(&mut src, &mut again), StreamStatus::Complete);
        assert_eq!(again, [0.0; 4]);
        assert_eq!(src.calls_after_done, 0);
    }

    #[test]
    fn exhaustion_on_last_frame_reports_on_next_buffer() {
        let mut src = Countdown { remaining: 2, done: false, calls_after_done: 0 };
        let mut out = [0.0f32; 4];
        assert_eq!(render_interleaved(&mut src, &mut out), StreamStatus::Continue);
        assert_eq!(render_interleaved(&mut src, &mut out), StreamStatus::Complete);
        assert_eq!(out, [0.0; 4]);
    }

    #[test]
    fn empty_buffer_is_a_no_op() {
        let mut src = Countdown { remaining: 0, done: false, calls_after_done: 0 };
        assert_eq!(render_interleaved(&mut src, &mut []), StreamStatus::Continue);
        assert!(!src.is_finished());
    }

    #[test]
    fn odd_tail_is_zeroed() {
        let mut src = Countdown { remaining: 5, done: false, calls_after_done: 0 };
        let mut out = [9.0f32; 3];
        render_interleaved(&mut src, &mut out);
        assert_eq!(out, [1.0, -1.0, 0.0]);
    }
}
