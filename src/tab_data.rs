/// Data structures for Site Muter
use serde::{Deserialize, Serialize};

/// Information about a browser tab, as delivered by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabInfo {
    pub id: i32,
    pub url: String,
    pub muted: bool,
}

impl TabInfo {
    pub fn new(id: i32, url: String, muted: bool) -> TabInfo {
        TabInfo { id, url, muted }
    }
}
