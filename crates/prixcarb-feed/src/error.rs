use prixcarb_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read feed {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("feed is not valid Windows-1252 text")]
    Encoding,

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("feed has no root element")]
    EmptyDocument,

    #[error("feed ends inside an unclosed <{0}> element")]
    Truncated(String),

    /// A tag outside the feed grammar. The grammar is closed so new tags are
    /// surfaced instead of ignored.
    #[error("unexpected tag <{tag}> in {context}")]
    MalformedFeed { tag: String, context: String },

    #[error("missing <{tag}> in {context}")]
    MissingChild { tag: &'static str, context: String },

    #[error("missing attribute {attribute:?} on <{tag}>")]
    MissingAttribute {
        tag: String,
        attribute: &'static str,
    },

    #[error("invalid {attribute:?} on <{tag}>: {value:?}")]
    InvalidAttribute {
        tag: String,
        attribute: &'static str,
        value: String,
    },

    #[error(transparent)]
    Model(#[from] CoreError),
}
