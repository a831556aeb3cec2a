//! Append-only conversation transcript.
//!
//! Every line the user sees ends up here as a [`TranscriptEntry`]: messages
//! the user sent, chat lines from other participants, and informational
//! notices from the server. Entries are immutable once appended and the
//! transcript never removes or reorders them.

use chrono::NaiveDateTime;
use parley_proto::ClassifiedMessage;

/// Label rendered in place of a sender for entries the user sent.
pub const SENT_LABEL: &str = "You";

/// Origin of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Submitted by the local user.
    Sent,
    /// Chat line from another participant.
    Received,
    /// Server notice.
    Info,
}

/// A single immutable line of the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    kind: EntryKind,
    sender: Option<String>,
    body: String,
    timestamp: NaiveDateTime,
}

impl TranscriptEntry {
    /// Entry for a message the user submitted.
    pub fn sent(body: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self { kind: EntryKind::Sent, sender: None, body: body.into(), timestamp }
    }

    /// Entry for a classified incoming payload.
    ///
    /// Chat lines become [`EntryKind::Received`] with their sender, everything
    /// else becomes [`EntryKind::Info`].
    pub fn received(message: ClassifiedMessage, timestamp: NaiveDateTime) -> Self {
        match message {
            ClassifiedMessage::Info { text } => {
                Self { kind: EntryKind::Info, sender: None, body: text, timestamp }
            },
            ClassifiedMessage::Chat { sender, body } => {
                Self { kind: EntryKind::Received, sender: Some(sender), body, timestamp }
            },
        }
    }

    /// Origin of this entry.
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Sender label for received chat lines. `None` for sent and info entries.
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    /// Message body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Local wall-clock time the entry was recorded.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Display line without the timestamp.
    pub fn line(&self) -> String {
        match (self.kind, self.sender.as_deref()) {
            (EntryKind::Sent, _) => format!("{SENT_LABEL}: {}", self.body),
            (EntryKind::Received, Some(sender)) => format!("{sender}: {}", self.body),
            _ => self.body.clone(),
        }
    }
}

/// Destination for transcript entries.
pub trait TranscriptSink {
    /// Append an entry. Entries already appended are never touched.
    fn append(&mut self, entry: TranscriptEntry);
}

/// In-memory transcript backing the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries in append order.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in append order.
    pub fn iter(&self) -> std::slice::Iter<'_, TranscriptEntry> {
        self.entries.iter()
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }
}

impl TranscriptSink for Transcript {
    fn append(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a TranscriptEntry;
    type IntoIter = std::slice::Iter<'a, TranscriptEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
