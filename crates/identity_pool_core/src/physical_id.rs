//! Guard applied before deleting by physical resource id.
//!
//! A failed Create reports the Lambda log stream name as its physical id, so
//! the Delete that CloudFormation sends on rollback must not reach the service.

/// Returns true when `id` contains `<word-or-hyphen>:<alnum-or-hyphen>`,
/// the shape of `<region>:<uuid>` identity pool ids.
pub fn looks_like_identity_pool_id(id: &str) -> bool {
    let bytes = id.as_bytes();
    bytes.iter().enumerate().any(|(index, byte)| {
        *byte == b':'
            && index > 0
            && is_prefix_char(bytes[index - 1])
            && bytes.get(index + 1).copied().is_some_and(is_suffix_char)
    })
}

fn is_prefix_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-'
}

fn is_suffix_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-'
}
