/// The eight signature bytes every PNG file starts with,
/// `\x89PNG\r\n\x1a\n` read big-endian.
pub const PNG_SIGNATURE: u64 = 0x8950_4E47_0D0A_1A0A;
