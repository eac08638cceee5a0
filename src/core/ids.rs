//! Identifier generation

use uuid::Uuid;

/// Derive a 32-bit record identifier from a fresh random UUID
///
/// Takes the first four bytes of a v4 UUID, big-endian. Identifiers are not
/// contiguous and are allocated before validation runs, so a rejected create
/// simply discards its id.
pub fn generate_id() -> u32 {
    let uuid = Uuid::new_v4();
    let bytes = uuid.as_bytes();
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
