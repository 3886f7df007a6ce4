//! HTTP adapter for the reasoning service
//!
//! ```text
//! POST {base}/chat                 {user_id, message, meta: {city, place, time}}
//! POST {base}/chat/whatsapp        {user_id, chat_text}
//! GET  {base}/chat/learning/{id}
//! GET  {base}/                     health
//! ```

pub mod dto;
pub mod error;
pub mod transport;

pub use error::HttpTransportError;
pub use transport::{DEFAULT_BASE_URL, HttpChatTransport};
