/// Number of symbols in the code-length (pre-code) alphabet.
pub const DEFLATE_NUM_PRECODE_SYMS: usize = 19;

/// Maximum number of literal/length symbols a block may declare.
pub const DEFLATE_NUM_LITLEN_SYMS: usize = 288;

/// Maximum number of distance symbols a block may declare.
pub const DEFLATE_NUM_OFFSET_SYMS: usize = 32;

/// End-of-block marker in the literal/length alphabet.
pub const DEFLATE_END_OF_BLOCK: u16 = 256;

/// Order in which pre-code lengths are stored in a dynamic block
/// header.
pub static DEFLATE_PRECODE_LENS_PERMUTATION: [u8; DEFLATE_NUM_PRECODE_SYMS] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15,
];

/// Base match length for each length class (symbols 257..=285).
pub static DEFLATE_LENGTH_BASE: [u16; 29] = [
    3, 4, 5, 6, 7, 8, 9, 10, 11, 13, 15, 17, 19, 23, 27, 31, 35, 43, 51, 59, 67, 83, 99, 115, 131,
    163, 195, 227, 258,
];

/// Number of extra bits to add to the base length, per length class.
pub static DEFLATE_LENGTH_EXTRA_BITS: [u8; 29] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 0,
];

/// Base match distance for each distance symbol (0..=29).
pub static DEFLATE_DISTANCE_BASE: [u16; 30] = [
    1, 2, 3, 4, 5, 7, 9, 13, 17, 25, 33, 49, 65, 97, 129, 193, 257, 385, 513, 769, 1025, 1537,
    2049, 3073, 4097, 6145, 8193, 12289, 16385, 24577,
];

/// Number of extra bits to add to the base distance, per distance
/// symbol.
pub static DEFLATE_DISTANCE_EXTRA_BITS: [u8; 30] = [
    0, 0, 0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 12, 12, 13,
    13,
];
