//! Session state store: ordered transcript, draft input, in-flight and
//! server-health flags. Single source of truth for everything rendered.

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// One transcript entry. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub text: String,
    pub sender: Sender,
}

impl TranscriptEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
        }
    }
}

/// Mutable session aggregate. The transcript is append-only: entries are
/// added and read, never edited or removed.
#[derive(Debug, Default)]
pub struct SessionState {
    transcript: Vec<TranscriptEntry>,
    draft: String,
    pending: bool,
    server_online: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the transcript.
    pub fn push_entry(&mut self, entry: TranscriptEntry) {
        self.transcript.push(entry);
    }

    /// Ordered transcript; insertion order is display order.
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Replace the draft verbatim, whitespace included. Trimming happens
    /// only at submit-eligibility checks.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn set_server_online(&mut self, online: bool) {
        self.server_online = online;
    }

    pub fn is_server_online(&self) -> bool {
        self.server_online
    }

    /// True until the first entry is appended.
    pub fn show_welcome(&self) -> bool {
        self.transcript.is_empty()
    }
}
