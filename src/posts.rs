//! Wire shape of the proxied `posts` resource.

use serde::{Deserialize, Serialize};

/// A post as served by the upstream. Missing fields decode to zero
/// values; unknown fields are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Post {
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    pub body: String,
}
