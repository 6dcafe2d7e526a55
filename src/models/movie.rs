use serde::{Deserialize, Serialize};

/// Wire representation of a persisted movie record. Fields the client
/// never supplied serialize as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: Option<String>,
    pub director: Option<String>,
    pub release_year: Option<i32>,
}

/// Request body for create and update. Everything is optional: create
/// stores whatever arrives without validation, and update merges only
/// the fields that are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieInput {
    pub title: Option<String>,
    pub director: Option<String>,
    pub release_year: Option<i32>,
}
