//! Request bodies of the reasoning service.
//!
//! Replies decode straight into [`ChatReply`](yara_domain::ChatReply) and
//! [`LearningInsights`](yara_domain::LearningInsights); only the outgoing
//! shapes live here.

use serde::Serialize;
use yara_domain::ResolvedContext;

/// `POST /chat`
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub user_id: &'a str,
    pub message: &'a str,
    pub meta: MetaDto<'a>,
}

/// Ambient context attached to a chat request
#[derive(Debug, Serialize)]
pub struct MetaDto<'a> {
    pub city: &'a str,
    pub place: &'a str,
    pub time: &'a str,
}

impl<'a> From<&'a ResolvedContext> for MetaDto<'a> {
    fn from(context: &'a ResolvedContext) -> Self {
        Self {
            city: &context.city,
            place: &context.place,
            time: &context.time,
        }
    }
}

/// `POST /chat/whatsapp`
#[derive(Debug, Serialize)]
pub struct ImportRequest<'a> {
    pub user_id: &'a str,
    pub chat_text: &'a str,
}
