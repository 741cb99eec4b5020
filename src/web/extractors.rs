//! # Request Extractors
//!
//! Typed request values validated once at the transport boundary, so the
//! core only ever sees a plain `include_history` flag.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use crate::constants::web::HISTORY_DISABLED_LITERAL;

/// `history` query parameter, resolved to a boolean
///
/// Only a single `history=false` disables history. Absence, any other
/// value, repeated parameters, or an unparseable query string all enable it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryFlag(pub bool);

impl HistoryFlag {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut values = pairs
            .iter()
            .filter(|(key, _)| key == "history")
            .map(|(_, value)| value.as_str());

        let include = match (values.next(), values.next()) {
            (Some(HISTORY_DISABLED_LITERAL), None) => false,
            _ => true,
        };
        HistoryFlag(include)
    }
}

impl<S> FromRequestParts<S> for HistoryFlag
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pairs = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();
        Ok(Self::from_pairs(&pairs))
    }
}
