use serde::{Deserialize, Serialize};

/// Raw post payload as returned by the `posts.json` endpoint.
///
/// Every field is optional: the API omits `file_url` on takedowns and login
/// walls, and the `only=` request parameter already strips everything else.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DanbooruItem {
    pub id: Option<u64>,
    pub score: Option<i64>,
    pub rating: Option<String>,
    pub file_ext: Option<String>,
    pub file_url: Option<String>,
    pub large_file_url: Option<String>,
}

/// Slice of the `profile.json` payload used for the account tier probe.
#[derive(Serialize, Deserialize, Debug)]
pub struct ProfileData {
    pub level_string: Option<String>,
}
