//! Chat message envelope. The relay parses inbound frames only far enough to
//! confirm they are well-formed; field values are never inspected or
//! transformed, and the original frame is forwarded verbatim.

use serde::{Deserialize, Serialize};

/// One chat message as it travels over the wire.
///
/// `kind` is a free-form tag interpreted by clients (e.g. "chat"), `user` is
/// an opaque identifier the relay does not verify, and `timestamp` is a
/// producer-supplied epoch value taken on trust.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: String,
    pub user: String,
    pub text: String,
    pub timestamp: i64,
}
