//! Chat client library for the RAG answer service (config, HTTP protocol,
//! session state, submission control, health probing).
//! Used by the `rag-chat` terminal front-end.

pub mod client;
pub mod config;
pub mod controller;
pub mod health;
pub mod messages;
pub mod session;

pub use client::{ApiClient, ApiError};
pub use config::{default_config_path, ApiSection, Config, ConfigError, ProbeSection};
pub use controller::{ChatController, CONNECT_FAILURE_MESSAGE};
pub use health::HealthMonitor;
pub use messages::{AnswerResponse, AnsweredQuery, EvidenceChunk, EvidenceItem, QuestionRequest};
pub use session::{Sender, SessionState, TranscriptEntry};
