//! HTTP message types for the answer service, plus the display projections
//! rendered into the transcript. Client ↔ server JSON.

use serde::{Deserialize, Serialize};

/// Client → server: body of POST /process-question.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionRequest<'a> {
    pub question: &'a str,
}

/// Server → client: one retrieved evidence record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EvidenceChunk {
    pub title: String,
    pub author: String,
    pub url: String,
    pub source: String,
    pub category: String,
    pub published_at: String,
    pub chunk: String,
}

/// Server → client: success body of POST /process-question. Deserialization
/// is strict: a body missing any field is rejected as a whole, never
/// partially mapped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnswerResponse {
    pub query: String,
    pub answer: String,
    pub question_type: String,
    pub evidence_list: Vec<EvidenceChunk>,
}

/// Displayable evidence record; `fact` carries the wire `chunk` text, all
/// other fields pass through by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvidenceItem {
    pub title: String,
    pub author: String,
    pub url: String,
    pub source: String,
    pub category: String,
    pub published_at: String,
    pub fact: String,
}

impl From<EvidenceChunk> for EvidenceItem {
    fn from(chunk: EvidenceChunk) -> Self {
        Self {
            title: chunk.title,
            author: chunk.author,
            url: chunk.url,
            source: chunk.source,
            category: chunk.category,
            published_at: chunk.published_at,
            fact: chunk.chunk,
        }
    }
}

/// One answered query, assembled from a server response and serialized to
/// text for display. Key order in the rendered JSON follows field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnsweredQuery {
    pub query: String,
    pub answer: String,
    pub question_type: String,
    pub evidence_list: Vec<EvidenceItem>,
}

impl From<AnswerResponse> for AnsweredQuery {
    fn from(response: AnswerResponse) -> Self {
        Self {
            query: response.query,
            answer: response.answer,
            question_type: response.question_type,
            evidence_list: response
                .evidence_list
                .into_iter()
                .map(EvidenceItem::from)
                .collect(),
        }
    }
}

impl AnsweredQuery {
    /// Pretty-printed JSON form appended to the transcript as a bot entry.
    pub fn render(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
