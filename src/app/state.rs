use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use gtk4::glib;
use serde_json::Value;

use super::speech::RecordingSession;
use crate::api::{ApiClient, SpeechAnalysis};
use crate::config::Config;
use crate::session::SessionStore;
use crate::ui::shell::ShellWidgets;

/// Logical pages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Signup,
    Upload,
    Analyze,
    Dashboard,
    About,
}

impl Page {
    pub fn name(self) -> &'static str {
        match self {
            Page::Login => "login",
            Page::Signup => "signup",
            Page::Upload => "upload",
            Page::Analyze => "analyze",
            Page::Dashboard => "dashboard",
            Page::About => "about",
        }
    }

    /// Pages that require a stored session token.
    pub fn is_protected(self) -> bool {
        matches!(self, Page::Upload | Page::Analyze | Page::Dashboard)
    }
}

/// Events delivered to the main-thread loop, both from UI handlers and
/// from network tasks finishing on the tokio runtime.
#[derive(Debug)]
pub enum BackendEvent {
    // UI intents
    NavigateRequested(Page),
    LoginSubmitted,
    SignupSubmitted,
    UploadTextSubmitted,
    FileChosen(PathBuf),
    UploadFileSubmitted,
    SpeechStartRequested,
    AnalyzeSubmitted,
    LogoutRequested,

    // Timer
    CaptureWindowElapsed,

    // Network task completions; Err carries the underlying cause for the
    // log, the handler picks the user-facing message.
    AuthFinished(Result<String, String>),
    SignupFinished(Result<(), String>),
    UploadTextFinished(Result<Value, String>),
    UploadFileFinished(Result<Value, String>),
    AnalyzeFinished(Result<Value, String>),
    SpeechFinished(Result<SpeechAnalysis, String>),
    HealthChecked(Result<String, String>),
}

/// Central application state. Lives on the GTK main thread inside
/// Rc<RefCell<>>.
pub struct AppState {
    pub config: Config,
    pub session: SessionStore,
    pub api: Arc<ApiClient>,
    pub tokio_rt: tokio::runtime::Runtime,
    pub backend_sender: async_channel::Sender<BackendEvent>,

    // One in-flight request per action; new submissions are rejected, not
    // queued.
    pub auth_busy: bool,
    pub signup_busy: bool,
    pub upload_text_busy: bool,
    pub upload_file_busy: bool,
    pub analyze_busy: bool,

    // Speech capture
    pub recording: RecordingSession,
    pub audio_buffer: Arc<Mutex<Vec<f32>>>,
    pub cpal_stream: Option<cpal::Stream>,
    pub sample_rate: u32,
    pub capture_timer: Option<glib::SourceId>,

    // Upload page's picked file
    pub chosen_file: Option<PathBuf>,

    // UI handles
    pub shell: Option<ShellWidgets>,
}

impl AppState {
    pub fn new(sender: async_channel::Sender<BackendEvent>) -> Self {
        let config = Config::load();
        if let Err(e) = config.ensure_saved() {
            log::warn!("Failed to write config: {e}");
        }
        let session = SessionStore::open_default();
        let api = Arc::new(ApiClient::new(config.endpoints.clone()));
        let tokio_rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

        Self {
            config,
            session,
            api,
            tokio_rt,
            backend_sender: sender,
            auth_busy: false,
            signup_busy: false,
            upload_text_busy: false,
            upload_file_busy: false,
            analyze_busy: false,
            recording: RecordingSession::new(),
            audio_buffer: Arc::new(Mutex::new(Vec::new())),
            cpal_stream: None,
            sample_rate: 16_000,
            capture_timer: None,
            chosen_file: None,
            shell: None,
        }
    }

    /// Token handed to analysis calls; only attached when configured.
    pub fn token(&self) -> Option<String> {
        self.session.get()
    }
}
