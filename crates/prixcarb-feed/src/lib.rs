//! Reader for the prix-carburants open-data XML feed.
//!
//! The feed is decoded from Windows-1252, materialized into an [`Element`]
//! tree, and every `pdv` element is mapped to a [`prixcarb_core::SalePoint`].
//! Mapping is all-or-nothing: the first malformed station aborts the batch.

pub mod element;
pub mod error;
pub mod mapper;
pub mod parse;
pub mod reader;

pub use element::{parse_document, Element};
pub use error::FeedError;
pub use mapper::map_sale_point;
pub use reader::{decode_feed, load_sale_points, parse_sale_points};
