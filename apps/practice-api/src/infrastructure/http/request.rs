//! HTTP request schemas.
//!
//! Create schemas reject unknown fields. Update schemas make every field
//! optional; nullable fields distinguish "absent" from an explicit `null`.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::domain::chat::{ChatRole, ChatScope, NewChatMessage};
use crate::domain::client::{ClientChanges, ClientStatus, NewClient};
use crate::domain::framework::{FrameworkChanges, NewFramework, NewFrameworkFile};
use crate::domain::note::{NewNote, NoteChanges};
use crate::domain::session::{NewSession, SessionChanges};
use crate::domain::shared::{ClientId, FrameworkId, SessionId, Timestamp};

use super::error::ApiError;
use super::response::FieldIssue;

/// Maximum length of a chat message, in UTF-16 code units.
pub const MAX_CHAT_MESSAGE_LEN: usize = 5000;

/// A JSON body with its own validation rules.
pub trait InputSchema: DeserializeOwned {
    /// Error message used when the body is rejected.
    const INVALID_MESSAGE: &'static str;

    /// Semantic checks beyond deserialization.
    fn validate(&self) -> Vec<FieldIssue> {
        Vec::new()
    }
}

/// JSON extractor that deserializes and validates an [`InputSchema`].
///
/// Any failure is a 400 carrying the schema's message and field detail.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: InputSchema + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        parse_body::<T>(&bytes).map(Self)
    }
}

/// Query string extractor whose rejection is a JSON 400.
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::try_from_uri(&parts.uri)
            .map(|Query(value)| Self(value))
            .map_err(|e| {
                ApiError::validation(
                    "Invalid query parameters",
                    vec![FieldIssue::new("query", e.body_text())],
                )
            })
    }
}

/// Deserialize and validate `bytes` as `T`.
pub fn parse_body<T: InputSchema>(bytes: &[u8]) -> Result<T, ApiError> {
    let value: T = serde_json::from_slice(bytes).map_err(|e| {
        ApiError::validation(T::INVALID_MESSAGE, vec![issue_from_json_error(&e)])
    })?;

    let issues = value.validate();
    if issues.is_empty() {
        Ok(value)
    } else {
        Err(ApiError::validation(T::INVALID_MESSAGE, issues))
    }
}

/// Field named in a serde error such as "missing field `name`", or `body`.
fn issue_from_json_error(error: &serde_json::Error) -> FieldIssue {
    let message = error.to_string();
    let field = message
        .split('`')
        .nth(1)
        .filter(|_| message.contains(" field `"))
        .unwrap_or("body")
        .to_string();
    FieldIssue { field, message }
}

/// Deserialize a present field as `Some(value)`, where `value` may be `None`
/// for an explicit `null`. Pair with `#[serde(default)]` so an absent field is
/// `None`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn require_non_empty(issues: &mut Vec<FieldIssue>, field: &str, value: &str) {
    if value.trim().is_empty() {
        issues.push(FieldIssue::new(field, "must not be empty"));
    }
}

// ============================================
// Clients
// ============================================

/// Body of `POST /api/clients`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateClientRequest {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Status, `active` when omitted.
    pub status: Option<ClientStatus>,
    /// Date of the first session.
    pub first_session: Option<Timestamp>,
}

impl InputSchema for CreateClientRequest {
    const INVALID_MESSAGE: &'static str = "Invalid client data";

    fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        require_non_empty(&mut issues, "name", &self.name);
        issues
    }
}

impl From<CreateClientRequest> for NewClient {
    fn from(req: CreateClientRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            status: req.status,
            first_session: req.first_session,
        }
    }
}

/// Body of `PATCH /api/clients/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateClientRequest {
    /// Full name.
    pub name: Option<String>,
    /// Email address; `null` clears it.
    #[serde(default, deserialize_with = "nullable")]
    pub email: Option<Option<String>>,
    /// Phone number; `null` clears it.
    #[serde(default, deserialize_with = "nullable")]
    pub phone: Option<Option<String>>,
    /// Status.
    pub status: Option<ClientStatus>,
    /// First session date; `null` clears it.
    #[serde(default, deserialize_with = "nullable")]
    pub first_session: Option<Option<Timestamp>>,
}

impl InputSchema for UpdateClientRequest {
    const INVALID_MESSAGE: &'static str = "Invalid client data";

    fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        if let Some(name) = &self.name {
            require_non_empty(&mut issues, "name", name);
        }
        issues
    }
}

impl From<UpdateClientRequest> for ClientChanges {
    fn from(req: UpdateClientRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            status: req.status,
            first_session: req.first_session,
        }
    }
}

// ============================================
// Sessions
// ============================================

/// Body of `POST /api/sessions`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateSessionRequest {
    /// Owning client.
    pub client_id: ClientId,
    /// When the session took place.
    pub date: Timestamp,
    /// Length in minutes.
    pub duration: u32,
    /// Kind of session.
    pub session_type: String,
    /// Status, `pending` when omitted.
    pub status: Option<String>,
    /// Recorded audio location.
    pub audio_file_path: Option<String>,
    /// Transcript text.
    pub transcription: Option<String>,
}

impl InputSchema for CreateSessionRequest {
    const INVALID_MESSAGE: &'static str = "Invalid session data";

    fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        require_non_empty(&mut issues, "clientId", self.client_id.as_str());
        issues
    }
}

impl From<CreateSessionRequest> for NewSession {
    fn from(req: CreateSessionRequest) -> Self {
        Self {
            client_id: req.client_id,
            date: req.date,
            duration: req.duration,
            session_type: req.session_type,
            status: req.status,
            audio_file_path: req.audio_file_path,
            transcription: req.transcription,
        }
    }
}

/// Body of `PATCH /api/sessions/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateSessionRequest {
    /// Owning client.
    pub client_id: Option<ClientId>,
    /// When the session took place.
    pub date: Option<Timestamp>,
    /// Length in minutes.
    pub duration: Option<u32>,
    /// Kind of session.
    pub session_type: Option<String>,
    /// Status.
    pub status: Option<String>,
    /// Recorded audio location; `null` clears it.
    #[serde(default, deserialize_with = "nullable")]
    pub audio_file_path: Option<Option<String>>,
    /// Transcript text; `null` clears it.
    #[serde(default, deserialize_with = "nullable")]
    pub transcription: Option<Option<String>>,
}

impl InputSchema for UpdateSessionRequest {
    const INVALID_MESSAGE: &'static str = "Invalid session data";

    fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        if let Some(client_id) = &self.client_id {
            require_non_empty(&mut issues, "clientId", client_id.as_str());
        }
        issues
    }
}

impl From<UpdateSessionRequest> for SessionChanges {
    fn from(req: UpdateSessionRequest) -> Self {
        Self {
            client_id: req.client_id,
            date: req.date,
            duration: req.duration,
            session_type: req.session_type,
            status: req.status,
            audio_file_path: req.audio_file_path,
            transcription: req.transcription,
        }
    }
}

// ============================================
// Notes
// ============================================

/// Body of `POST /api/notes`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateNoteRequest {
    /// Session the note belongs to.
    pub session_id: SessionId,
    /// Note text.
    pub content: String,
    /// Whether the assistant wrote it, `false` when omitted.
    pub is_ai_generated: Option<bool>,
}

impl InputSchema for CreateNoteRequest {
    const INVALID_MESSAGE: &'static str = "Invalid note data";

    fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        require_non_empty(&mut issues, "sessionId", self.session_id.as_str());
        issues
    }
}

impl From<CreateNoteRequest> for NewNote {
    fn from(req: CreateNoteRequest) -> Self {
        Self {
            session_id: req.session_id,
            content: req.content,
            is_ai_generated: req.is_ai_generated,
        }
    }
}

/// Body of `PATCH /api/notes/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateNoteRequest {
    /// Note text.
    pub content: Option<String>,
    /// Whether the assistant wrote it.
    pub is_ai_generated: Option<bool>,
}

impl InputSchema for UpdateNoteRequest {
    const INVALID_MESSAGE: &'static str = "Invalid note data";
}

impl From<UpdateNoteRequest> for NoteChanges {
    fn from(req: UpdateNoteRequest) -> Self {
        Self {
            content: req.content,
            is_ai_generated: req.is_ai_generated,
        }
    }
}

// ============================================
// Frameworks
// ============================================

/// Body of `POST /api/frameworks`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateFrameworkRequest {
    /// Framework name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Free-form tags.
    pub tags: Option<Vec<String>>,
    /// Note template.
    pub template_structure: Option<String>,
}

impl InputSchema for CreateFrameworkRequest {
    const INVALID_MESSAGE: &'static str = "Invalid framework data";

    fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        require_non_empty(&mut issues, "name", &self.name);
        issues
    }
}

impl From<CreateFrameworkRequest> for NewFramework {
    fn from(req: CreateFrameworkRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            tags: req.tags,
            template_structure: req.template_structure,
        }
    }
}

/// Body of `PATCH /api/frameworks/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateFrameworkRequest {
    /// Framework name.
    pub name: Option<String>,
    /// Description; `null` clears it.
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    /// Tags; `null` clears them.
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Option<Option<Vec<String>>>,
    /// Note template; `null` clears it.
    #[serde(default, deserialize_with = "nullable")]
    pub template_structure: Option<Option<String>>,
}

impl InputSchema for UpdateFrameworkRequest {
    const INVALID_MESSAGE: &'static str = "Invalid framework data";

    fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        if let Some(name) = &self.name {
            require_non_empty(&mut issues, "name", name);
        }
        issues
    }
}

impl From<UpdateFrameworkRequest> for FrameworkChanges {
    fn from(req: UpdateFrameworkRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            tags: req.tags,
            template_structure: req.template_structure,
        }
    }
}

/// Body of `POST /api/frameworks/{id}/files`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateFrameworkFileRequest {
    /// Must equal the path id when present.
    pub framework_id: Option<FrameworkId>,
    /// Display file name.
    pub file_name: String,
    /// Storage location.
    pub file_path: String,
}

impl InputSchema for CreateFrameworkFileRequest {
    const INVALID_MESSAGE: &'static str = "Invalid framework file data";

    fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        require_non_empty(&mut issues, "fileName", &self.file_name);
        require_non_empty(&mut issues, "filePath", &self.file_path);
        issues
    }
}

impl CreateFrameworkFileRequest {
    /// Bind the file to `framework_id` from the path.
    pub fn into_new_file(self, framework_id: FrameworkId) -> Result<NewFrameworkFile, ApiError> {
        if let Some(body_id) = &self.framework_id
            && body_id != &framework_id
        {
            return Err(ApiError::validation(
                Self::INVALID_MESSAGE,
                vec![FieldIssue::new(
                    "frameworkId",
                    "does not match the framework in the path",
                )],
            ));
        }

        Ok(NewFrameworkFile {
            framework_id,
            file_name: self.file_name,
            file_path: self.file_path,
        })
    }
}

// ============================================
// Chat
// ============================================

/// Query of `GET /api/chat/messages`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessagesQuery {
    /// Client scope; absent or empty means global.
    pub client_id: Option<String>,
}

impl ChatMessagesQuery {
    /// Requested scope.
    pub fn scope(self) -> ChatScope {
        ChatScope::from_client_id(self.client_id.map(ClientId::from))
    }
}

/// Body of `POST /api/chat/messages`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateChatMessageRequest {
    /// Client scope; absent, `null` or empty means global.
    pub client_id: Option<String>,
    /// Author.
    pub role: ChatRole,
    /// Message text.
    pub content: String,
}

impl InputSchema for CreateChatMessageRequest {
    const INVALID_MESSAGE: &'static str = "Invalid message data";

    fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        require_non_empty(&mut issues, "content", &self.content);
        issues
    }
}

impl From<CreateChatMessageRequest> for NewChatMessage {
    fn from(req: CreateChatMessageRequest) -> Self {
        Self {
            scope: ChatScope::from_client_id(req.client_id.map(ClientId::from)),
            role: req.role,
            content: req.content,
        }
    }
}

/// Body of `POST /api/chat/generate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GenerateChatRequest {
    /// User message, 1 to 5000 UTF-16 code units.
    pub message: String,
    /// Client scope; absent or empty means global.
    pub client_id: Option<String>,
}

impl InputSchema for GenerateChatRequest {
    const INVALID_MESSAGE: &'static str = "Invalid request data";

    fn validate(&self) -> Vec<FieldIssue> {
        let len = self.message.encode_utf16().count();
        if len == 0 {
            vec![FieldIssue::new("message", "must not be empty")]
        } else if len > MAX_CHAT_MESSAGE_LEN {
            vec![FieldIssue::new(
                "message",
                format!("must be at most {MAX_CHAT_MESSAGE_LEN} characters"),
            )]
        } else {
            Vec::new()
        }
    }
}

impl GenerateChatRequest {
    /// Requested scope.
    pub fn scope(&self) -> ChatScope {
        ChatScope::from_client_id(self.client_id.clone().map(ClientId::from))
    }
}

// ============================================
// AI seams
// ============================================

/// Body of `POST /api/transcribe`. The whole body is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeRequest {
    /// Session whose audio to transcribe.
    pub session_id: Option<SessionId>,
    /// Audio file overriding the session's recorded path.
    pub audio_file_path: Option<String>,
}

impl InputSchema for TranscribeRequest {
    const INVALID_MESSAGE: &'static str = "Invalid transcription request";
}

impl TranscribeRequest {
    /// Parse an optional body; empty means all defaults.
    pub fn from_body(bytes: &[u8]) -> Result<Self, ApiError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        parse_body(bytes)
    }
}

/// Body of `POST /api/generate-notes`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GenerateNotesRequest {
    /// Session to write the note for.
    pub session_id: SessionId,
    /// Transcript to summarise; the session's stored transcript otherwise.
    pub transcription: Option<String>,
}

impl InputSchema for GenerateNotesRequest {
    const INVALID_MESSAGE: &'static str = "Invalid note generation request";

    fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        require_non_empty(&mut issues, "sessionId", self.session_id.as_str());
        issues
    }
}
