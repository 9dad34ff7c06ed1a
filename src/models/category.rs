use serde::{Deserialize, Serialize};

/// A word category ("Technology", "Emotions", ...).
///
/// `name` is unique server-side; `id` is assigned by the remote service.
/// Categories are created but never updated or deleted from this client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Insert payload for a new category. The server assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct NewCategoryRow<'a> {
    pub name: &'a str,
}
