use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::Endpoints;

/// Failure of a single API invocation. No retries happen at this layer;
/// the user re-triggers the action to try again.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// 401 on an auth call; drives the login page's register fallback.
    #[error("invalid username or password")]
    Unauthorized,
    #[error("service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    /// Application-level error payload, e.g. `{ "error": "..." }`.
    #[error("{0}")]
    Service(String),
}

#[derive(Debug, Deserialize)]
struct TokenEnvelope {
    access_token: String,
}

/// Response of the speech endpoint. The service answers either with a
/// transcription (and usually emotion scores) or an error payload.
#[derive(Debug, Deserialize)]
pub struct SpeechAnalysis {
    pub transcribed_text: Option<String>,
    pub emotions: Option<serde_json::Map<String, Value>>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HealthEnvelope {
    status: String,
}

/// Thin wrapper over the remote analysis service. One attempt per call,
/// no client-side timeout; callers surface errors locally.
pub struct ApiClient {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl ApiClient {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoints,
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let resp = self
            .http
            .post(self.endpoints.login_url())
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;
        let resp = check_auth(resp).await?;
        let envelope: TokenEnvelope = resp.json().await?;
        Ok(envelope.access_token)
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let resp = self
            .http
            .post(self.endpoints.register_url())
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;
        check_auth(resp).await?;
        Ok(())
    }

    /// Text analysis against the primary base. Returns the raw JSON body;
    /// callers look for an `emotions` mapping and fall back to a dump.
    pub async fn analyze_text(&self, text: &str, token: Option<&str>) -> Result<Value, ApiError> {
        let req = self
            .http
            .post(self.endpoints.text_url())
            .json(&serde_json::json!({ "text": text }));
        let resp = self.maybe_bearer(req, token).send().await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    /// Text analysis against the alternate base used by the analyze page.
    pub async fn analyze_text_raw(
        &self,
        text: &str,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        let req = self
            .http
            .post(self.endpoints.raw_text_url())
            .json(&serde_json::json!({ "text": text }));
        let resp = self.maybe_bearer(req, token).send().await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    /// Multipart file upload. Returns the `result` field of the response.
    pub async fn analyze_file(
        &self,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)?;
        let form = reqwest::multipart::Form::new().part("file", part);
        let req = self.http.post(self.endpoints.file_url()).multipart(form);
        let resp = self.maybe_bearer(req, token).send().await?;
        let resp = check(resp).await?;
        let body: Value = resp.json().await?;
        Ok(body.get("result").cloned().unwrap_or(body))
    }

    /// Speech analysis: a single WAV blob uploaded as `recording.wav`.
    pub async fn analyze_speech(
        &self,
        wav: Vec<u8>,
        token: Option<&str>,
    ) -> Result<SpeechAnalysis, ApiError> {
        let part = reqwest::multipart::Part::bytes(wav)
            .file_name("recording.wav")
            .mime_str("audio/wav")?;
        let form = reqwest::multipart::Form::new().part("file", part);
        let req = self.http.post(self.endpoints.speech_url()).multipart(form);
        let resp = self.maybe_bearer(req, token).send().await?;
        let resp = check(resp).await?;
        let analysis: SpeechAnalysis = resp.json().await?;
        if let Some(err) = analysis.error {
            return Err(ApiError::Service(err));
        }
        Ok(analysis)
    }

    /// Service liveness probe, shown on the dashboard.
    pub async fn health(&self) -> Result<String, ApiError> {
        let resp = self.http.get(self.endpoints.health_url()).send().await?;
        let resp = check(resp).await?;
        let envelope: HealthEnvelope = resp.json().await?;
        Ok(envelope.status)
    }

    fn maybe_bearer(
        &self,
        req: reqwest::RequestBuilder,
        token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        match token {
            Some(t) if self.endpoints.attach_token => req.bearer_auth(t),
            _ => req,
        }
    }
}

async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        let body = resp.text().await.unwrap_or_default();
        Err(ApiError::Status { status, body })
    }
}

/// Like `check`, but maps 401 to the dedicated variant the login fallback
/// keys on.
async fn check_auth(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    check(resp).await
}

/// Pull the emotion mapping out of an analysis response, if present.
pub fn emotions_of(body: &Value) -> Option<&serde_json::Map<String, Value>> {
    body.get("emotions")?.as_object()
}

/// Render an emotion mapping as `"label: score"` pairs joined by `", "`,
/// preserving the mapping's own order.
pub fn format_emotions(emotions: &serde_json::Map<String, Value>) -> String {
    emotions
        .iter()
        .map(|(label, score)| format!("{label}: {}", format_score(score)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Scores are numbers; render them exactly as the JSON carries them.
/// Strings lose their quotes, anything else falls back to raw JSON.
fn format_score(score: &Value) -> String {
    match score {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_emotions_in_response_order() {
        let body: Value =
            serde_json::from_str(r#"{"emotions": {"joy": 0.9, "surprise": 0.1}}"#).unwrap();
        let emotions = emotions_of(&body).unwrap();
        assert_eq!(format_emotions(emotions), "joy: 0.9, surprise: 0.1");
    }

    #[test]
    fn preserves_non_alphabetical_order() {
        let body: Value =
            serde_json::from_str(r#"{"emotions": {"sadness": 0.7, "anger": 0.2, "fear": 0.1}}"#)
                .unwrap();
        let emotions = emotions_of(&body).unwrap();
        assert_eq!(
            format_emotions(emotions),
            "sadness: 0.7, anger: 0.2, fear: 0.1"
        );
    }

    #[test]
    fn missing_emotions_yields_none() {
        let body: Value = serde_json::from_str(r#"{"label": "joy"}"#).unwrap();
        assert!(emotions_of(&body).is_none());
        let body: Value = serde_json::from_str(r#"{"emotions": "joy"}"#).unwrap();
        assert!(emotions_of(&body).is_none());
    }

    #[test]
    fn scores_keep_their_json_form() {
        assert_eq!(format_score(&serde_json::json!(0.305)), "0.305");
        assert_eq!(format_score(&serde_json::json!(1)), "1");
        assert_eq!(format_score(&serde_json::json!("high")), "high");
    }

    #[test]
    fn speech_response_parses_both_shapes() {
        let ok: SpeechAnalysis = serde_json::from_str(
            r#"{"transcribed_text": "hello there", "emotions": {"joy": 0.8}}"#,
        )
        .unwrap();
        assert_eq!(ok.transcribed_text.as_deref(), Some("hello there"));
        assert!(ok.emotions.is_some());
        assert!(ok.error.is_none());

        let err: SpeechAnalysis =
            serde_json::from_str(r#"{"error": "could not decode audio"}"#).unwrap();
        assert_eq!(err.error.as_deref(), Some("could not decode audio"));
    }
}
