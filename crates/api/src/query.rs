//! Query-string parameter structs.
//!
//! Every field is a raw `Option<String>` so malformed values reach the
//! listing filters instead of being rejected by the extractor.

use serde::Deserialize;

/// `GET /ads/list?q=&category=&condition=&page=`
#[derive(Debug, Default, Deserialize)]
pub struct AdListParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub page: Option<String>,
}

/// `GET /proposals/list?sender=&receiver=&status=`
#[derive(Debug, Default, Deserialize)]
pub struct ProposalListParams {
    pub sender: Option<String>,
    pub receiver: Option<String>,
    pub status: Option<String>,
}

/// `GET /auth/login?next=`
#[derive(Debug, Default, Deserialize)]
pub struct NextParams {
    pub next: Option<String>,
}
