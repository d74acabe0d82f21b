//! Text-generation request adapter: one "send prompt, get text back"
//! operation over chat-completions and reasoning (responses) backends,
//! plus an MCP tool server that exposes it.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod message;
pub mod parsers;
pub mod response;
pub mod server;
pub mod tools;

pub use config::Config;
pub use dispatch::registry::{ApiFormat, Registry, classify};
pub use dispatch::{GenerateResult, PromptRequest};
pub use error::GenError;
pub use message::{Message, Role, Segment, SegmentKind};
pub use parsers::extract_text;
