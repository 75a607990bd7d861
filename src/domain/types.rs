//! # Domain Types
//!
//! Plain data passed between the transport adapter, the router and the link store.

/// A single server name → link mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    pub name: String,
    pub link: String,
}

impl LinkEntry {
    pub fn new(name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
        }
    }
}

/// An inbound chat message as handed over by the transport.
/// The reply channel travels separately as a `ChatProvider`.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub sender: String,
    pub body: String,
}

impl InboundMessage {
    pub fn new(sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            body: body.into(),
        }
    }
}

/// An outbound reply. User data (names, links) goes out as plain text so the client does not
/// render `_` or `*` inside it; fixed bot text may use markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Plain(String),
    Markdown(String),
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Self::Markdown(text.into())
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Markdown(text) => text,
        }
    }
}

impl PartialEq<&str> for Reply {
    fn eq(&self, other: &&str) -> bool {
        self.text() == *other
    }
}
