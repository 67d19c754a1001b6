use jiff::civil::Date;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i64,
    pub name: String,
    pub release_date: Date,
}

// Create/replace request body. An id supplied by the caller is ignored;
// the store assigns ids on insert and full updates keep the stored id.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDraft {
    pub name: String,
    pub release_date: Date,
}
