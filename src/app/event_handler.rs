use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use gtk4::glib;
use gtk4::prelude::*;
use serde_json::Value;

use super::pipeline::{
    dispatch_analyze, dispatch_login, dispatch_signup, dispatch_speech_upload,
    dispatch_upload_file, dispatch_upload_text,
};
use super::speech::CAPTURE_WINDOW;
use super::state::{AppState, BackendEvent, Page};
use crate::api::{self, SpeechAnalysis};
use crate::ui::notify::Notice;
use crate::ui::shell::navigate;
use crate::ui::text_view_contents;

const TEXT_BUTTON_LABEL: &str = "Analyze Text Emotions";
const FILE_BUTTON_LABEL: &str = "Analyze File Emotions";
const RECORD_BUTTON_LABEL: &str = "Start Speech Analysis";

/// Why a submission was blocked before reaching the network.
#[derive(Debug, PartialEq, Eq)]
enum SubmitGate {
    /// A request for the same action is already in flight; new submissions
    /// are rejected, not queued.
    Busy,
    /// Nothing to submit (blank text, or no file chosen).
    MissingInput,
}

/// Client-side gate for the text paths. Runs before any dispatch, so a
/// blocked submission never produces a network call.
fn gate_text_submission(busy: bool, text: &str) -> Result<String, SubmitGate> {
    if busy {
        return Err(SubmitGate::Busy);
    }
    if text.trim().is_empty() {
        return Err(SubmitGate::MissingInput);
    }
    Ok(text.to_string())
}

/// Same gate for the file-upload path.
fn gate_file_submission(busy: bool, chosen: Option<PathBuf>) -> Result<PathBuf, SubmitGate> {
    if busy {
        return Err(SubmitGate::Busy);
    }
    chosen.ok_or(SubmitGate::MissingInput)
}

/// Handle one backend event on the GTK main thread.
pub fn handle_backend_event(state: &Rc<RefCell<AppState>>, event: BackendEvent) {
    match event {
        BackendEvent::NavigateRequested(page) => navigate(state, page),
        BackendEvent::LoginSubmitted => on_login_submitted(state),
        BackendEvent::AuthFinished(result) => on_auth_finished(state, result),
        BackendEvent::SignupSubmitted => on_signup_submitted(state),
        BackendEvent::SignupFinished(result) => on_signup_finished(state, result),
        BackendEvent::UploadTextSubmitted => on_upload_text_submitted(state),
        BackendEvent::UploadTextFinished(result) => on_upload_text_finished(state, result),
        BackendEvent::FileChosen(path) => {
            let mut s = state.borrow_mut();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            if let Some(ref shell) = s.shell {
                shell.upload.file_label.set_text(&name);
            }
            s.chosen_file = Some(path);
        }
        BackendEvent::UploadFileSubmitted => on_upload_file_submitted(state),
        BackendEvent::UploadFileFinished(result) => on_upload_file_finished(state, result),
        BackendEvent::SpeechStartRequested => on_speech_start(state),
        BackendEvent::CaptureWindowElapsed => on_capture_elapsed(state),
        BackendEvent::SpeechFinished(result) => on_speech_finished(state, result),
        BackendEvent::AnalyzeSubmitted => on_analyze_submitted(state),
        BackendEvent::AnalyzeFinished(result) => on_analyze_finished(state, result),
        BackendEvent::LogoutRequested => {
            log::info!("Logging out");
            if let Err(e) = state.borrow().session.clear() {
                log::warn!("Failed to clear session: {e}");
            }
            navigate(state, Page::Login);
        }
        BackendEvent::HealthChecked(result) => {
            let s = state.borrow();
            if let Some(ref shell) = s.shell {
                match result {
                    Ok(status) => shell
                        .dashboard
                        .service_label
                        .set_text(&format!("Service: {status}")),
                    Err(cause) => {
                        log::warn!("Health check failed: {cause}");
                        shell.dashboard.service_label.set_text("Service: unreachable");
                    }
                }
            }
        }
    }
}

fn show_notice(state: &Rc<RefCell<AppState>>, notice: Notice) {
    let s = state.borrow();
    if let Some(ref shell) = s.shell {
        crate::ui::notify::present(&shell.toasts, notice);
    }
}

// ---- Login ----

fn on_login_submitted(state: &Rc<RefCell<AppState>>) {
    if state.borrow().auth_busy {
        log::info!("Ignoring login while one is in flight");
        return;
    }
    let (username, password) = {
        let s = state.borrow();
        let Some(ref shell) = s.shell else { return };
        (
            shell.login.username.text().to_string(),
            shell.login.password.text().to_string(),
        )
    };
    if username.trim().is_empty() || password.is_empty() {
        let s = state.borrow();
        if let Some(ref shell) = s.shell {
            shell
                .login
                .error_label
                .set_text("Please enter a username and password.");
            shell.login.error_label.set_visible(true);
        }
        return;
    }
    {
        let mut s = state.borrow_mut();
        s.auth_busy = true;
        if let Some(ref shell) = s.shell {
            shell.login.error_label.set_visible(false);
            shell.login.submit_button.set_label("Logging in\u{2026}");
            shell.login.submit_button.set_sensitive(false);
        }
    }
    dispatch_login(state, username, password);
}

fn on_auth_finished(state: &Rc<RefCell<AppState>>, result: Result<String, String>) {
    {
        let mut s = state.borrow_mut();
        s.auth_busy = false;
        if let Some(ref shell) = s.shell {
            shell.login.submit_button.set_label("Log In");
            shell.login.submit_button.set_sensitive(true);
        }
    }

    match result {
        Ok(token) => {
            if let Err(e) = state.borrow().session.set(&token) {
                log::warn!("Failed to persist session: {e}");
            }
            let s = state.borrow();
            if let Some(ref shell) = s.shell {
                shell.login.password.set_text("");
            }
            drop(s);
            navigate(state, Page::Upload);
        }
        Err(message) => {
            let s = state.borrow();
            if let Some(ref shell) = s.shell {
                shell.login.error_label.set_text(&message);
                shell.login.error_label.set_visible(true);
            }
        }
    }
}

// ---- Signup ----

fn on_signup_submitted(state: &Rc<RefCell<AppState>>) {
    if state.borrow().signup_busy {
        log::info!("Ignoring signup while one is in flight");
        return;
    }
    let (username, password) = {
        let s = state.borrow();
        let Some(ref shell) = s.shell else { return };
        (
            shell.signup.username.text().to_string(),
            shell.signup.password.text().to_string(),
        )
    };
    if username.trim().is_empty() || password.is_empty() {
        let s = state.borrow();
        if let Some(ref shell) = s.shell {
            shell
                .signup
                .error_label
                .set_text("Please enter a username and password.");
            shell.signup.error_label.set_visible(true);
        }
        return;
    }
    {
        let mut s = state.borrow_mut();
        s.signup_busy = true;
        if let Some(ref shell) = s.shell {
            shell.signup.error_label.set_visible(false);
            shell.signup.success_label.set_visible(false);
            shell.signup.submit_button.set_label("Signing up\u{2026}");
            shell.signup.submit_button.set_sensitive(false);
        }
    }
    dispatch_signup(state, username, password);
}

fn on_signup_finished(state: &Rc<RefCell<AppState>>, result: Result<(), String>) {
    let mut s = state.borrow_mut();
    s.signup_busy = false;
    let sender = s.backend_sender.clone();
    if let Some(ref shell) = s.shell {
        shell.signup.submit_button.set_label("Sign Up");
        shell.signup.submit_button.set_sensitive(true);
        match result {
            Ok(()) => {
                shell
                    .signup
                    .success_label
                    .set_text("Account created successfully! Redirecting to login...");
                shell.signup.success_label.set_visible(true);
                // Fixed redirect delay, matching the page's confirmation.
                glib::timeout_add_local_once(std::time::Duration::from_secs(2), move || {
                    let _ = sender.try_send(BackendEvent::NavigateRequested(Page::Login));
                });
            }
            Err(cause) => {
                log::warn!("Registration failed: {cause}");
                shell
                    .signup
                    .error_label
                    .set_text("Signup failed. Username may already exist.");
                shell.signup.error_label.set_visible(true);
            }
        }
    }
}

// ---- Upload page: text ----

fn on_upload_text_submitted(state: &Rc<RefCell<AppState>>) {
    let gated = {
        let s = state.borrow();
        let Some(ref shell) = s.shell else { return };
        gate_text_submission(
            s.upload_text_busy,
            &text_view_contents(&shell.upload.text_view),
        )
    };
    let text = match gated {
        Ok(text) => text,
        Err(SubmitGate::Busy) => {
            log::info!("Ignoring text analysis while one is in flight");
            return;
        }
        Err(SubmitGate::MissingInput) => {
            show_notice(state, Notice::error("Please enter text for analysis."));
            return;
        }
    };
    {
        let mut s = state.borrow_mut();
        s.upload_text_busy = true;
        if let Some(ref shell) = s.shell {
            shell.upload.text_button.set_label("Analyzing\u{2026}");
            shell.upload.text_button.set_sensitive(false);
        }
    }
    dispatch_upload_text(state, text);
}

fn on_upload_text_finished(state: &Rc<RefCell<AppState>>, result: Result<Value, String>) {
    let mut s = state.borrow_mut();
    s.upload_text_busy = false;
    if let Some(ref shell) = s.shell {
        shell.upload.text_button.set_label(TEXT_BUTTON_LABEL);
        shell.upload.text_button.set_sensitive(true);
        let display = match result {
            Ok(body) => match api::emotions_of(&body) {
                Some(emotions) => api::format_emotions(emotions),
                None => serde_json::to_string_pretty(&body).unwrap_or_default(),
            },
            Err(cause) => {
                log::error!("Text analysis failed: {cause}");
                "Error during emotion analysis.".to_string()
            }
        };
        shell.upload.show_result(&display);
    }
}

// ---- Upload page: file ----

fn on_upload_file_submitted(state: &Rc<RefCell<AppState>>) {
    let gated = {
        let s = state.borrow();
        gate_file_submission(s.upload_file_busy, s.chosen_file.clone())
    };
    let path = match gated {
        Ok(path) => path,
        Err(SubmitGate::Busy) => {
            log::info!("Ignoring file analysis while one is in flight");
            return;
        }
        Err(SubmitGate::MissingInput) => {
            show_notice(state, Notice::error("Please select an audio or media file."));
            return;
        }
    };
    {
        let mut s = state.borrow_mut();
        s.upload_file_busy = true;
        if let Some(ref shell) = s.shell {
            shell.upload.file_button.set_label("Uploading\u{2026}");
            shell.upload.file_button.set_sensitive(false);
        }
    }
    dispatch_upload_file(state, path);
}

fn on_upload_file_finished(state: &Rc<RefCell<AppState>>, result: Result<Value, String>) {
    let mut s = state.borrow_mut();
    s.upload_file_busy = false;
    if let Some(ref shell) = s.shell {
        shell.upload.file_button.set_label(FILE_BUTTON_LABEL);
        shell.upload.file_button.set_sensitive(true);
        let display = match result {
            Ok(Value::String(text)) => text,
            Ok(other) => serde_json::to_string_pretty(&other).unwrap_or_default(),
            Err(cause) => {
                log::error!("File analysis failed: {cause}");
                "Error during file-based emotion evaluation.".to_string()
            }
        };
        shell.upload.show_result(&display);
    }
}

// ---- Upload page: speech ----

fn on_speech_start(state: &Rc<RefCell<AppState>>) {
    if !state.borrow_mut().recording.begin() {
        return;
    }

    {
        let s = state.borrow();
        s.audio_buffer.lock().unwrap().clear();
    }

    let buffer = state.borrow().audio_buffer.clone();
    match crate::recorder::start_capture(buffer) {
        Ok((stream, sample_rate)) => {
            let mut s = state.borrow_mut();
            s.cpal_stream = Some(stream);
            s.sample_rate = sample_rate;
            s.recording.capture_started(Instant::now());
            if let Some(ref shell) = s.shell {
                shell.upload.record_button.set_label("Recording\u{2026}");
                shell.upload.record_button.set_sensitive(false);
            }

            let sender = s.backend_sender.clone();
            let source = glib::timeout_add_local_once(CAPTURE_WINDOW, move || {
                let _ = sender.try_send(BackendEvent::CaptureWindowElapsed);
            });
            s.capture_timer = Some(source);
            drop(s);

            show_notice(
                state,
                Notice::info("Recording started! Speak now and express your emotions."),
            );
        }
        Err(e) => {
            log::error!("Failed to start recording: {e}");
            {
                let mut s = state.borrow_mut();
                s.recording.failed();
                s.recording.reset();
            }
            show_notice(
                state,
                Notice::error("Error accessing microphone. Please enable permissions."),
            );
        }
    }
}

fn on_capture_elapsed(state: &Rc<RefCell<AppState>>) {
    // Stray timer after a failure leaves nothing to stop.
    if !state.borrow().recording.window_elapsed(Instant::now()) {
        return;
    }
    if !state.borrow_mut().recording.begin_stop() {
        return;
    }

    let (samples, sample_rate) = {
        let mut s = state.borrow_mut();
        s.capture_timer = None;
        // Dropping the stream stops the device.
        s.cpal_stream = None;
        let samples: Vec<f32> = s.audio_buffer.lock().unwrap().clone();
        (samples, s.sample_rate)
    };

    show_notice(
        state,
        Notice::info("Recording stopped. Processing your voice for emotion analysis\u{2026}"),
    );

    if !state
        .borrow_mut()
        .recording
        .capture_stopped(!samples.is_empty())
    {
        log::info!("No audio captured");
        restore_record_button(state);
        show_notice(state, Notice::error("No audio was captured. Please try again."));
        return;
    }

    log::info!(
        "Captured {} samples ({:.1}s at {}Hz)",
        samples.len(),
        samples.len() as f32 / sample_rate as f32,
        sample_rate
    );

    match crate::recorder::samples_to_wav(&samples, sample_rate) {
        Ok(wav) => {
            if let Some(ref shell) = state.borrow().shell {
                shell.upload.record_button.set_label("Analyzing\u{2026}");
            }
            dispatch_speech_upload(state, wav);
        }
        Err(e) => {
            log::error!("WAV encoding failed: {e}");
            let mut s = state.borrow_mut();
            s.recording.failed();
            s.recording.reset();
            drop(s);
            restore_record_button(state);
            show_notice(state, Notice::error("Error during speech emotion analysis."));
        }
    }
}

fn on_speech_finished(state: &Rc<RefCell<AppState>>, result: Result<SpeechAnalysis, String>) {
    match result {
        Ok(analysis) => {
            state.borrow_mut().recording.finished();
            restore_record_button(state);

            if let Some(ref text) = analysis.transcribed_text {
                show_notice(
                    state,
                    Notice::success(format!("Speech converted to text: \u{201c}{text}\u{201d}")),
                );
            }

            let display = match analysis.emotions {
                Some(ref emotions) => api::format_emotions(emotions),
                None => analysis.transcribed_text.unwrap_or_default(),
            };
            let s = state.borrow();
            if let Some(ref shell) = s.shell {
                shell.upload.show_result(&display);
            }
        }
        Err(cause) => {
            log::error!("Speech analysis failed: {cause}");
            let mut s = state.borrow_mut();
            s.recording.failed();
            s.recording.reset();
            drop(s);
            restore_record_button(state);
            show_notice(state, Notice::error("Error during speech emotion analysis."));
        }
    }
}

fn restore_record_button(state: &Rc<RefCell<AppState>>) {
    let s = state.borrow();
    if let Some(ref shell) = s.shell {
        shell.upload.record_button.set_label(RECORD_BUTTON_LABEL);
        shell.upload.record_button.set_sensitive(true);
    }
}

// ---- Analyze page ----

fn on_analyze_submitted(state: &Rc<RefCell<AppState>>) {
    let gated = {
        let s = state.borrow();
        let Some(ref shell) = s.shell else { return };
        gate_text_submission(s.analyze_busy, &text_view_contents(&shell.analyze.text_view))
    };
    let text = match gated {
        Ok(text) => text,
        Err(SubmitGate::Busy) => {
            log::info!("Ignoring analysis while one is in flight");
            return;
        }
        Err(SubmitGate::MissingInput) => {
            show_notice(state, Notice::error("Please enter text for analysis."));
            return;
        }
    };
    {
        let mut s = state.borrow_mut();
        s.analyze_busy = true;
        if let Some(ref shell) = s.shell {
            shell.analyze.submit_button.set_label("Analyzing\u{2026}");
            shell.analyze.submit_button.set_sensitive(false);
            shell.analyze.error_label.set_visible(false);
        }
    }
    dispatch_analyze(state, text);
}

fn on_analyze_finished(state: &Rc<RefCell<AppState>>, result: Result<Value, String>) {
    let mut s = state.borrow_mut();
    s.analyze_busy = false;
    if let Some(ref shell) = s.shell {
        shell.analyze.submit_button.set_label("Analyze");
        shell.analyze.submit_button.set_sensitive(true);
        match result {
            Ok(body) => {
                let dump = serde_json::to_string_pretty(&body).unwrap_or_default();
                shell.analyze.show_result(&dump);
            }
            Err(cause) => {
                log::error!("Analysis failed: {cause}");
                shell
                    .analyze
                    .error_label
                    .set_text("An error occurred during analysis.");
                shell.analyze.error_label.set_visible(true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_blocked_before_dispatch() {
        assert_eq!(gate_text_submission(false, ""), Err(SubmitGate::MissingInput));
        assert_eq!(
            gate_text_submission(false, "  \n\t  "),
            Err(SubmitGate::MissingInput)
        );
    }

    #[test]
    fn in_flight_submissions_are_rejected_not_queued() {
        assert_eq!(
            gate_text_submission(true, "I am thrilled today"),
            Err(SubmitGate::Busy)
        );
        assert_eq!(
            gate_file_submission(true, Some(PathBuf::from("clip.wav"))),
            Err(SubmitGate::Busy)
        );
    }

    #[test]
    fn valid_text_passes_the_gate_unchanged() {
        assert_eq!(
            gate_text_submission(false, "I am thrilled today"),
            Ok("I am thrilled today".to_string())
        );
    }

    #[test]
    fn missing_file_is_blocked() {
        assert_eq!(gate_file_submission(false, None), Err(SubmitGate::MissingInput));
        let path = PathBuf::from("song.mp3");
        assert_eq!(gate_file_submission(false, Some(path.clone())), Ok(path));
    }
}
