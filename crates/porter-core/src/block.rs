//! Block-check wire types.

use serde::{Deserialize, Serialize};

/// The analytics service's answer to a block check.
///
/// Authoritative only when it arrives with HTTP 200; a caller that sees a
/// transport failure, timeout, or non-200 response must treat the visitor as
/// not blocked (fail-open).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockCheckResult {
    #[serde(default)]
    pub is_blocked: bool,
}
