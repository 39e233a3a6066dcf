// Document ID geometry: 10 timestamp digits followed by 6 counter digits.
pub const ID_TIMESTAMP_DIGITS: usize = 10;
pub const ID_COUNTER_DIGITS: usize = 6;
pub const ID_LENGTH: usize = ID_TIMESTAMP_DIGITS + ID_COUNTER_DIGITS;

// The per-second counter is encoded modulo this and rolls silently.
pub const ID_COUNTER_MODULUS: u32 = 1_000_000;

// FNV-1a 32-bit parameters (query cache keys).
pub const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
pub const FNV_PRIME: u32 = 16_777_619;

// Cursor limit when the caller does not supply one.
pub const DEFAULT_FIND_LIMIT: u32 = u32::MAX;

// Reserved member name stamped onto every appended document.
pub const ID_FIELD: &str = "_id";
