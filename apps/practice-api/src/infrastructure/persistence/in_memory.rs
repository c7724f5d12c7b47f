//! In-memory practice store.
//!
//! One keyed table per record type behind a single `RwLock`. Every repository
//! trait is implemented on the same store so the client cascade can remove
//! sessions, notes and chat messages under one write lock.

use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::chat::{ChatMessage, ChatMessageRepository, ChatScope, NewChatMessage};
use crate::domain::client::{Client, ClientChanges, ClientRepository, NewClient};
use crate::domain::framework::{
    Framework, FrameworkChanges, FrameworkFile, FrameworkFileRepository, FrameworkRepository,
    NewFramework, NewFrameworkFile,
};
use crate::domain::note::{NewNote, Note, NoteChanges, NoteRepository};
use crate::domain::session::{NewSession, Session, SessionChanges, SessionRepository};
use crate::domain::shared::{
    ChatMessageId, ClientId, FrameworkId, NoteId, RepositoryError, SessionId,
};

const STORE_NAME: &str = "in-memory practice store";

/// A keyed table that remembers insertion order.
#[derive(Debug)]
struct Table<T> {
    rows: HashMap<String, Row<T>>,
    next_seq: u64,
}

#[derive(Debug)]
struct Row<T> {
    seq: u64,
    record: T,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<T: Clone> Table<T> {
    fn get(&self, id: &str) -> Option<T> {
        self.rows.get(id).map(|row| row.record.clone())
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.rows.get_mut(id).map(|row| &mut row.record)
    }

    fn insert(&mut self, id: &str, record: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.rows.insert(id.to_string(), Row { seq, record });
    }

    fn remove(&mut self, id: &str) -> Option<T> {
        self.rows.remove(id).map(|row| row.record)
    }

    /// Matching records in insertion order.
    fn select(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let mut rows: Vec<&Row<T>> = self
            .rows
            .values()
            .filter(|row| predicate(&row.record))
            .collect();
        rows.sort_by_key(|row| row.seq);
        rows.into_iter().map(|row| row.record.clone()).collect()
    }

    /// Remove every matching record, returning how many were removed.
    fn remove_where(&mut self, predicate: impl Fn(&T) -> bool) -> usize {
        let before = self.rows.len();
        self.rows.retain(|_, row| !predicate(&row.record));
        before - self.rows.len()
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Default)]
struct Tables {
    clients: Table<Client>,
    sessions: Table<Session>,
    notes: Table<Note>,
    frameworks: Table<Framework>,
    framework_files: Table<FrameworkFile>,
    chat_messages: Table<ChatMessage>,
}

/// Row counts per table, for diagnostics and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounts {
    /// Client rows.
    pub clients: usize,
    /// Session rows.
    pub sessions: usize,
    /// Note rows.
    pub notes: usize,
    /// Framework rows.
    pub frameworks: usize,
    /// Framework file rows.
    pub framework_files: usize,
    /// Chat message rows.
    pub chat_messages: usize,
}

/// In-memory implementation of every practice repository trait.
///
/// Data lives for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryPracticeStore {
    tables: RwLock<Tables>,
}

impl InMemoryPracticeStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current row counts.
    pub fn counts(&self) -> Result<StoreCounts, RepositoryError> {
        let tables = self.read()?;
        Ok(StoreCounts {
            clients: tables.clients.len(),
            sessions: tables.sessions.len(),
            notes: tables.notes.len(),
            frameworks: tables.frameworks.len(),
            framework_files: tables.framework_files.len(),
            chat_messages: tables.chat_messages.len(),
        })
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, RepositoryError> {
        self.tables
            .read()
            .map_err(|_| RepositoryError::poisoned(STORE_NAME))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, RepositoryError> {
        self.tables
            .write()
            .map_err(|_| RepositoryError::poisoned(STORE_NAME))
    }
}

#[async_trait]
impl ClientRepository for InMemoryPracticeStore {
    async fn get_client(&self, id: &ClientId) -> Result<Option<Client>, RepositoryError> {
        Ok(self.read()?.clients.get(id.as_str()))
    }

    async fn list_clients(&self) -> Result<Vec<Client>, RepositoryError> {
        Ok(self.read()?.clients.select(|_| true))
    }

    async fn create_client(&self, new: NewClient) -> Result<Client, RepositoryError> {
        let client = Client::create(new);
        self.write()?
            .clients
            .insert(client.id.as_str(), client.clone());
        Ok(client)
    }

    async fn update_client(
        &self,
        id: &ClientId,
        changes: ClientChanges,
    ) -> Result<Option<Client>, RepositoryError> {
        let mut tables = self.write()?;
        Ok(tables.clients.get_mut(id.as_str()).map(|client| {
            client.apply(changes);
            client.clone()
        }))
    }

    async fn delete_client(&self, id: &ClientId) -> Result<bool, RepositoryError> {
        let mut tables = self.write()?;

        let session_ids: HashSet<SessionId> = tables
            .sessions
            .select(|session| &session.client_id == id)
            .into_iter()
            .map(|session| session.id)
            .collect();

        let notes_removed = tables
            .notes
            .remove_where(|note| session_ids.contains(&note.session_id));
        let sessions_removed = tables
            .sessions
            .remove_where(|session| &session.client_id == id);
        let messages_removed = tables
            .chat_messages
            .remove_where(|message| message.client_id.as_ref() == Some(id));
        let existed = tables.clients.remove(id.as_str()).is_some();

        tracing::debug!(
            client_id = %id,
            existed,
            sessions_removed,
            notes_removed,
            messages_removed,
            "Client cascade delete"
        );

        Ok(existed)
    }
}

#[async_trait]
impl SessionRepository for InMemoryPracticeStore {
    async fn get_session(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError> {
        Ok(self.read()?.sessions.get(id.as_str()))
    }

    async fn list_sessions(&self) -> Result<Vec<Session>, RepositoryError> {
        Ok(self.read()?.sessions.select(|_| true))
    }

    async fn list_sessions_by_client(
        &self,
        client_id: &ClientId,
    ) -> Result<Vec<Session>, RepositoryError> {
        Ok(self
            .read()?
            .sessions
            .select(|session| &session.client_id == client_id))
    }

    async fn create_session(&self, new: NewSession) -> Result<Session, RepositoryError> {
        let session = Session::create(new);
        self.write()?
            .sessions
            .insert(session.id.as_str(), session.clone());
        Ok(session)
    }

    async fn update_session(
        &self,
        id: &SessionId,
        changes: SessionChanges,
    ) -> Result<Option<Session>, RepositoryError> {
        let mut tables = self.write()?;
        Ok(tables.sessions.get_mut(id.as_str()).map(|session| {
            session.apply(changes);
            session.clone()
        }))
    }
}

#[async_trait]
impl NoteRepository for InMemoryPracticeStore {
    async fn get_note(&self, id: &NoteId) -> Result<Option<Note>, RepositoryError> {
        Ok(self.read()?.notes.get(id.as_str()))
    }

    async fn list_notes_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<Note>, RepositoryError> {
        Ok(self
            .read()?
            .notes
            .select(|note| &note.session_id == session_id))
    }

    async fn create_note(&self, new: NewNote) -> Result<Note, RepositoryError> {
        let note = Note::create(new);
        self.write()?.notes.insert(note.id.as_str(), note.clone());
        Ok(note)
    }

    async fn update_note(
        &self,
        id: &NoteId,
        changes: NoteChanges,
    ) -> Result<Option<Note>, RepositoryError> {
        let mut tables = self.write()?;
        Ok(tables.notes.get_mut(id.as_str()).map(|note| {
            note.apply(changes);
            note.clone()
        }))
    }
}

#[async_trait]
impl FrameworkRepository for InMemoryPracticeStore {
    async fn get_framework(&self, id: &FrameworkId) -> Result<Option<Framework>, RepositoryError> {
        Ok(self.read()?.frameworks.get(id.as_str()))
    }

    async fn list_frameworks(&self) -> Result<Vec<Framework>, RepositoryError> {
        Ok(self.read()?.frameworks.select(|_| true))
    }

    async fn create_framework(&self, new: NewFramework) -> Result<Framework, RepositoryError> {
        let framework = Framework::create(new);
        self.write()?
            .frameworks
            .insert(framework.id.as_str(), framework.clone());
        Ok(framework)
    }

    async fn update_framework(
        &self,
        id: &FrameworkId,
        changes: FrameworkChanges,
    ) -> Result<Option<Framework>, RepositoryError> {
        let mut tables = self.write()?;
        Ok(tables.frameworks.get_mut(id.as_str()).map(|framework| {
            framework.apply(changes);
            framework.clone()
        }))
    }

    async fn delete_framework(&self, id: &FrameworkId) -> Result<bool, RepositoryError> {
        Ok(self.write()?.frameworks.remove(id.as_str()).is_some())
    }
}

#[async_trait]
impl FrameworkFileRepository for InMemoryPracticeStore {
    async fn list_framework_files(
        &self,
        framework_id: &FrameworkId,
    ) -> Result<Vec<FrameworkFile>, RepositoryError> {
        Ok(self
            .read()?
            .framework_files
            .select(|file| &file.framework_id == framework_id))
    }

    async fn create_framework_file(
        &self,
        new: NewFrameworkFile,
    ) -> Result<FrameworkFile, RepositoryError> {
        let file = FrameworkFile::create(new);
        self.write()?
            .framework_files
            .insert(file.id.as_str(), file.clone());
        Ok(file)
    }
}

#[async_trait]
impl ChatMessageRepository for InMemoryPracticeStore {
    async fn get_chat_message(
        &self,
        id: &ChatMessageId,
    ) -> Result<Option<ChatMessage>, RepositoryError> {
        Ok(self.read()?.chat_messages.get(id.as_str()))
    }

    async fn list_chat_messages(
        &self,
        scope: &ChatScope,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        Ok(self
            .read()?
            .chat_messages
            .select(|message| scope.contains(message.client_id.as_ref())))
    }

    async fn create_chat_message(
        &self,
        new: NewChatMessage,
    ) -> Result<ChatMessage, RepositoryError> {
        let message = ChatMessage::create(new);
        self.write()?
            .chat_messages
            .insert(message.id.as_str(), message.clone());
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chat::ChatRole;
    use crate::domain::client::ClientStatus;
    use crate::domain::shared::Timestamp;

    fn new_client(name: &str) -> NewClient {
        NewClient {
            name: name.to_string(),
            ..NewClient::default()
        }
    }

    fn new_session(client_id: &ClientId) -> NewSession {
        NewSession {
            client_id: client_id.clone(),
            date: Timestamp::parse("2026-03-01T09:00:00Z").unwrap(),
            duration: 50,
            session_type: "Individual Therapy".to_string(),
            status: None,
            audio_file_path: None,
            transcription: None,
        }
    }

    fn new_note(session_id: &SessionId, content: &str) -> NewNote {
        NewNote {
            session_id: session_id.clone(),
            content: content.to_string(),
            is_ai_generated: None,
        }
    }

    fn chat(scope: ChatScope, content: &str) -> NewChatMessage {
        NewChatMessage {
            scope,
            role: ChatRole::User,
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn create_and_get_client() {
        let store = InMemoryPracticeStore::new();
        let client = store.create_client(new_client("Ada")).await.unwrap();

        let found = store.get_client(&client.id).await.unwrap();
        assert_eq!(found, Some(client));
    }

    #[tokio::test]
    async fn get_unknown_client_is_none() {
        let store = InMemoryPracticeStore::new();
        let found = store.get_client(&ClientId::new("missing")).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn list_clients_preserves_creation_order() {
        let store = InMemoryPracticeStore::new();
        for name in ["first", "second", "third", "fourth"] {
            store.create_client(new_client(name)).await.unwrap();
        }

        let names: Vec<String> = store
            .list_clients()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["first", "second", "third", "fourth"]);
    }

    #[tokio::test]
    async fn update_keeps_position_in_listing() {
        let store = InMemoryPracticeStore::new();
        let first = store.create_client(new_client("first")).await.unwrap();
        store.create_client(new_client("second")).await.unwrap();

        store
            .update_client(
                &first.id,
                ClientChanges {
                    status: Some(ClientStatus::Inactive),
                    ..ClientChanges::default()
                },
            )
            .await
            .unwrap();

        let listed = store.list_clients().await.unwrap();
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[0].status, ClientStatus::Inactive);
    }

    #[tokio::test]
    async fn update_unknown_client_is_none() {
        let store = InMemoryPracticeStore::new();
        let updated = store
            .update_client(&ClientId::new("missing"), ClientChanges::default())
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn delete_client_cascades_to_sessions_notes_and_messages() {
        let store = InMemoryPracticeStore::new();
        let doomed = store.create_client(new_client("doomed")).await.unwrap();
        let kept = store.create_client(new_client("kept")).await.unwrap();

        let s1 = store.create_session(new_session(&doomed.id)).await.unwrap();
        let s2 = store.create_session(new_session(&doomed.id)).await.unwrap();
        let kept_session = store.create_session(new_session(&kept.id)).await.unwrap();
        store.create_note(new_note(&s1.id, "a")).await.unwrap();
        store.create_note(new_note(&s1.id, "b")).await.unwrap();
        store.create_note(new_note(&s2.id, "c")).await.unwrap();
        let kept_note = store
            .create_note(new_note(&kept_session.id, "kept"))
            .await
            .unwrap();
        store
            .create_chat_message(chat(ChatScope::Client(doomed.id.clone()), "x"))
            .await
            .unwrap();
        store
            .create_chat_message(chat(ChatScope::Global, "global"))
            .await
            .unwrap();

        assert!(store.delete_client(&doomed.id).await.unwrap());

        assert!(store.get_client(&doomed.id).await.unwrap().is_none());
        assert!(store.get_session(&s1.id).await.unwrap().is_none());
        assert!(store.get_session(&s2.id).await.unwrap().is_none());
        assert!(store.list_notes_by_session(&s1.id).await.unwrap().is_empty());
        assert!(
            store
                .list_chat_messages(&ChatScope::Client(doomed.id.clone()))
                .await
                .unwrap()
                .is_empty()
        );

        let counts = store.counts().unwrap();
        assert_eq!(counts.clients, 1);
        assert_eq!(counts.sessions, 1);
        assert_eq!(counts.notes, 1);
        assert_eq!(counts.chat_messages, 1);
        assert_eq!(store.get_note(&kept_note.id).await.unwrap(), Some(kept_note));
    }

    #[tokio::test]
    async fn delete_unknown_client_returns_false() {
        let store = InMemoryPracticeStore::new();
        assert!(!store.delete_client(&ClientId::new("missing")).await.unwrap());
    }

    #[tokio::test]
    async fn delete_framework_keeps_files() {
        let store = InMemoryPracticeStore::new();
        let framework = store
            .create_framework(NewFramework {
                name: "DBT".to_string(),
                ..NewFramework::default()
            })
            .await
            .unwrap();
        store
            .create_framework_file(NewFrameworkFile {
                framework_id: framework.id.clone(),
                file_name: "skills.pdf".to_string(),
                file_path: "/files/skills.pdf".to_string(),
            })
            .await
            .unwrap();

        assert!(store.delete_framework(&framework.id).await.unwrap());
        assert!(!store.delete_framework(&framework.id).await.unwrap());

        let orphaned = store.list_framework_files(&framework.id).await.unwrap();
        assert_eq!(orphaned.len(), 1);
    }

    #[tokio::test]
    async fn chat_scopes_never_overlap() {
        let store = InMemoryPracticeStore::new();
        let a = ClientId::new("client-a");
        let b = ClientId::new("client-b");
        store.create_chat_message(chat(ChatScope::Global, "g1")).await.unwrap();
        store
            .create_chat_message(chat(ChatScope::Client(a.clone()), "a1"))
            .await
            .unwrap();
        store.create_chat_message(chat(ChatScope::Global, "g2")).await.unwrap();
        store
            .create_chat_message(chat(ChatScope::Client(b.clone()), "b1"))
            .await
            .unwrap();

        let contents = |messages: Vec<ChatMessage>| -> Vec<String> {
            messages.into_iter().map(|m| m.content).collect()
        };

        assert_eq!(
            contents(store.list_chat_messages(&ChatScope::Global).await.unwrap()),
            ["g1", "g2"]
        );
        assert_eq!(
            contents(store.list_chat_messages(&ChatScope::Client(a)).await.unwrap()),
            ["a1"]
        );
        assert_eq!(
            contents(store.list_chat_messages(&ChatScope::Client(b)).await.unwrap()),
            ["b1"]
        );
    }

    #[tokio::test]
    async fn sessions_filter_by_client() {
        let store = InMemoryPracticeStore::new();
        let a = ClientId::new("a");
        let b = ClientId::new("b");
        store.create_session(new_session(&a)).await.unwrap();
        store.create_session(new_session(&b)).await.unwrap();
        store.create_session(new_session(&a)).await.unwrap();

        assert_eq!(store.list_sessions_by_client(&a).await.unwrap().len(), 2);
        assert_eq!(store.list_sessions().await.unwrap().len(), 3);
        assert!(
            store
                .list_sessions_by_client(&ClientId::new("c"))
                .await
                .unwrap()
                .is_empty()
        );
    }
}
