use std::time::{Duration, Instant};

/// Fixed capture window. Recording stops automatically; there is no
/// user-facing cancel.
pub const CAPTURE_WINDOW: Duration = Duration::from_secs(5);

/// Phase of one speech-analysis attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturePhase {
    Idle,
    RequestingPermission,
    Recording,
    Stopping,
    Transcribing,
    Failed,
}

/// State machine for one recording attempt. Timers and the audio device
/// live outside; this type only decides which transitions are legal, with
/// explicit instants so the capture window is testable without waiting.
#[derive(Debug)]
pub struct RecordingSession {
    phase: CapturePhase,
    deadline: Option<Instant>,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self {
            phase: CapturePhase::Idle,
            deadline: None,
        }
    }

    pub fn phase(&self) -> CapturePhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == CapturePhase::Idle
    }

    /// User pressed record. Rejected (returns false) while an attempt is
    /// already running; this is the busy flag for the speech flow.
    pub fn begin(&mut self) -> bool {
        if self.phase != CapturePhase::Idle {
            log::info!("Ignoring record request while {:?}", self.phase);
            return false;
        }
        self.phase = CapturePhase::RequestingPermission;
        true
    }

    /// Microphone opened; the fixed window starts counting from `now`.
    /// Ignored (returns false) unless permission was being requested.
    pub fn capture_started(&mut self, now: Instant) -> bool {
        if self.phase != CapturePhase::RequestingPermission {
            log::warn!("Ignoring capture start while {:?}", self.phase);
            return false;
        }
        self.phase = CapturePhase::Recording;
        self.deadline = Some(now + CAPTURE_WINDOW);
        true
    }

    /// Whether the fixed window has elapsed.
    pub fn window_elapsed(&self, now: Instant) -> bool {
        matches!(self.phase, CapturePhase::Recording)
            && self.deadline.is_some_and(|d| now >= d)
    }

    /// Timer fired: stop the capture device. Only legal while recording.
    pub fn begin_stop(&mut self) -> bool {
        if self.phase != CapturePhase::Recording {
            return false;
        }
        self.phase = CapturePhase::Stopping;
        true
    }

    /// Device confirmed stopped. With buffered audio the blob goes out for
    /// analysis; an empty capture ends the attempt. Ignored unless a stop
    /// was in progress.
    pub fn capture_stopped(&mut self, captured_any: bool) -> bool {
        if self.phase != CapturePhase::Stopping {
            return false;
        }
        if captured_any {
            self.phase = CapturePhase::Transcribing;
            true
        } else {
            self.reset();
            false
        }
    }

    /// Analysis response arrived (success path). Ignored unless an upload
    /// was awaiting its response.
    pub fn finished(&mut self) {
        if self.phase != CapturePhase::Transcribing {
            return;
        }
        self.reset();
    }

    /// Permission denial, device error, or transport error.
    pub fn failed(&mut self) {
        self.phase = CapturePhase::Failed;
        self.deadline = None;
    }

    /// Back to Idle, ready for the next attempt.
    pub fn reset(&mut self) {
        self.phase = CapturePhase::Idle;
        self.deadline = None;
    }
}

impl Default for RecordingSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_attempt_returns_to_idle() {
        let mut session = RecordingSession::new();
        assert!(session.begin());
        let now = Instant::now();
        session.capture_started(now);
        assert_eq!(session.phase(), CapturePhase::Recording);

        assert!(session.begin_stop());
        assert!(session.capture_stopped(true));
        assert_eq!(session.phase(), CapturePhase::Transcribing);

        session.finished();
        assert!(session.is_idle());
    }

    #[test]
    fn window_elapses_at_exactly_five_seconds() {
        let mut session = RecordingSession::new();
        session.begin();
        let start = Instant::now();
        assert!(session.capture_started(start));

        assert!(!session.window_elapsed(start));
        assert!(!session.window_elapsed(start + Duration::from_millis(4_999)));
        assert!(session.window_elapsed(start + Duration::from_secs(5)));
        assert!(session.window_elapsed(start + Duration::from_millis(5_200)));
    }

    #[test]
    fn resubmission_rejected_while_running() {
        let mut session = RecordingSession::new();
        assert!(session.begin());
        assert!(!session.begin());
        session.capture_started(Instant::now());
        assert!(!session.begin());
    }

    #[test]
    fn empty_capture_ends_the_attempt() {
        let mut session = RecordingSession::new();
        session.begin();
        session.capture_started(Instant::now());
        session.begin_stop();
        assert!(!session.capture_stopped(false));
        assert!(session.is_idle());
    }

    #[test]
    fn failure_then_reset_allows_retry() {
        let mut session = RecordingSession::new();
        session.begin();
        session.failed();
        assert_eq!(session.phase(), CapturePhase::Failed);
        session.reset();
        assert!(session.begin());
    }

    #[test]
    fn stop_is_only_legal_while_recording() {
        let mut session = RecordingSession::new();
        assert!(!session.begin_stop());
        session.begin();
        assert!(!session.begin_stop());
    }

    #[test]
    fn out_of_phase_signals_are_ignored() {
        let mut session = RecordingSession::new();
        assert!(!session.capture_started(Instant::now()));
        assert!(!session.capture_stopped(true));
        assert!(session.is_idle());

        session.begin();
        session.failed();
        session.finished();
        assert_eq!(session.phase(), CapturePhase::Failed);

        session.reset();
        session.begin();
        session.capture_started(Instant::now());
        assert!(!session.capture_stopped(true));
        assert_eq!(session.phase(), CapturePhase::Recording);
    }
}
