use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::auth::login_with_fallback;
use super::state::{AppState, BackendEvent};

/// Run the login flow (with registration fallback) on the tokio runtime.
pub fn dispatch_login(state: &Rc<RefCell<AppState>>, username: String, password: String) {
    let s = state.borrow();
    let api = s.api.clone();
    let sender = s.backend_sender.clone();

    s.tokio_rt.spawn(async move {
        let result = login_with_fallback(api.as_ref(), &username, &password).await;
        let _ = sender.send(BackendEvent::AuthFinished(result)).await;
    });
}

pub fn dispatch_signup(state: &Rc<RefCell<AppState>>, username: String, password: String) {
    let s = state.borrow();
    let api = s.api.clone();
    let sender = s.backend_sender.clone();

    s.tokio_rt.spawn(async move {
        let result = api
            .register(&username, &password)
            .await
            .map_err(|e| e.to_string());
        let _ = sender.send(BackendEvent::SignupFinished(result)).await;
    });
}

/// Text analysis for the upload page (primary base).
pub fn dispatch_upload_text(state: &Rc<RefCell<AppState>>, text: String) {
    let s = state.borrow();
    let api = s.api.clone();
    let sender = s.backend_sender.clone();
    let token = s.token();

    s.tokio_rt.spawn(async move {
        let result = api
            .analyze_text(&text, token.as_deref())
            .await
            .map_err(|e| e.to_string());
        let _ = sender.send(BackendEvent::UploadTextFinished(result)).await;
    });
}

/// Text analysis for the analyze page (alternate base).
pub fn dispatch_analyze(state: &Rc<RefCell<AppState>>, text: String) {
    let s = state.borrow();
    let api = s.api.clone();
    let sender = s.backend_sender.clone();
    let token = s.token();

    s.tokio_rt.spawn(async move {
        let result = api
            .analyze_text_raw(&text, token.as_deref())
            .await
            .map_err(|e| e.to_string());
        let _ = sender.send(BackendEvent::AnalyzeFinished(result)).await;
    });
}

/// Read the picked file and upload it for analysis.
pub fn dispatch_upload_file(state: &Rc<RefCell<AppState>>, path: PathBuf) {
    let s = state.borrow();
    let api = s.api.clone();
    let sender = s.backend_sender.clone();
    let token = s.token();

    s.tokio_rt.spawn(async move {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.bin".to_string());
        let mime = mime_for_path(&path);

        let result = match tokio::fs::read(&path).await {
            Ok(bytes) => api
                .analyze_file(&file_name, mime, bytes, token.as_deref())
                .await
                .map_err(|e| e.to_string()),
            Err(e) => Err(format!("failed to read {}: {e}", path.display())),
        };
        let _ = sender.send(BackendEvent::UploadFileFinished(result)).await;
    });
}

/// Upload an assembled WAV blob for speech analysis.
pub fn dispatch_speech_upload(state: &Rc<RefCell<AppState>>, wav: Vec<u8>) {
    let s = state.borrow();
    let api = s.api.clone();
    let sender = s.backend_sender.clone();
    let token = s.token();

    s.tokio_rt.spawn(async move {
        let result = api
            .analyze_speech(wav, token.as_deref())
            .await
            .map_err(|e| e.to_string());
        let _ = sender.send(BackendEvent::SpeechFinished(result)).await;
    });
}

/// Probe the service once at startup for the dashboard status row.
pub fn dispatch_health_check(state: &Rc<RefCell<AppState>>) {
    let s = state.borrow();
    let api = s.api.clone();
    let sender = s.backend_sender.clone();

    s.tokio_rt.spawn(async move {
        let result = api.health().await.map_err(|e| e.to_string());
        let _ = sender.send(BackendEvent::HealthChecked(result)).await;
    });
}

/// Best-effort content type from the file extension. The picker accepts
/// audio and video files.
fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        "m4a" => "audio/mp4",
        "ogg" | "oga" => "audio/ogg",
        "flac" => "audio/flac",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_map_to_media_types() {
        assert_eq!(mime_for_path(Path::new("clip.WAV")), "audio/wav");
        assert_eq!(mime_for_path(Path::new("song.mp3")), "audio/mpeg");
        assert_eq!(mime_for_path(Path::new("video.webm")), "video/webm");
    }

    #[test]
    fn unknown_extensions_fall_back_to_octet_stream() {
        assert_eq!(mime_for_path(Path::new("data.xyz")), "application/octet-stream");
        assert_eq!(mime_for_path(Path::new("noext")), "application/octet-stream");
    }
}
