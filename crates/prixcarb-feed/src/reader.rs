use std::borrow::Cow;
use std::path::Path;

use encoding_rs::WINDOWS_1252;
use prixcarb_core::SalePoint;

use crate::element::parse_document;
use crate::error::FeedError;
use crate::mapper::map_sale_point;

const SALE_POINT_TAG: &str = "pdv";

/// Bytes with no character assigned in Windows-1252. The WHATWG mapping used
/// by `encoding_rs` passes them through as C1 controls, so they are rejected
/// before decoding.
const UNDEFINED_BYTES: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

/// Decode raw feed bytes from Windows-1252 (the feed declares ISO-8859-1,
/// which Windows-1252 extends).
///
/// # Errors
///
/// Returns [`FeedError::Encoding`] if the bytes hold a value undefined in
/// Windows-1252. No other encoding is tried.
pub fn decode_feed(bytes: &[u8]) -> Result<Cow<'_, str>, FeedError> {
    if let Some(offset) = bytes.iter().position(|b| UNDEFINED_BYTES.contains(b)) {
        tracing::debug!(offset, byte = bytes[offset], "undefined windows-1252 byte");
        return Err(FeedError::Encoding);
    }
    WINDOWS_1252
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or(FeedError::Encoding)
}

/// Map every top-level child of the feed's root element to a [`SalePoint`].
///
/// # Errors
///
/// Returns the first mapping error; no partial list is ever returned. A
/// top-level child other than `pdv` is a [`FeedError::MalformedFeed`].
pub fn parse_sale_points(xml: &str) -> Result<Vec<SalePoint>, FeedError> {
    let root = parse_document(xml)?;
    tracing::debug!(
        root = %root.name,
        elements = root.children.len(),
        "feed document materialized"
    );

    root.children
        .iter()
        .map(|element| {
            if element.name != SALE_POINT_TAG {
                return Err(FeedError::MalformedFeed {
                    tag: element.name.clone(),
                    context: format!("<{}>", root.name),
                });
            }
            map_sale_point(element)
        })
        .collect()
}

/// Read, decode and map a feed file.
///
/// The file is read fully before parsing; the handle is released whether or
/// not parsing succeeds.
///
/// # Errors
///
/// Returns [`FeedError::Io`] if the file cannot be read, otherwise any error
/// from [`decode_feed`] or [`parse_sale_points`].
pub fn load_sale_points(path: &Path) -> Result<Vec<SalePoint>, FeedError> {
    tracing::info!(path = %path.display(), "building sale points");
    let bytes = std::fs::read(path).map_err(|source| FeedError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let xml = decode_feed(&bytes)?;
    let sale_points = parse_sale_points(&xml)?;
    tracing::info!(
        path = %path.display(),
        count = sale_points.len(),
        "sale points built"
    );
    Ok(sale_points)
}
