//! Board geometry constants and direction tables.

/// Protocol major version written into the serialized header.
pub const PROTOCOL_VERSION: u8 = 1;

// Home squares. White's back rank is 0..7 (a1 = 0), black's is 56..63.
pub const WHITE_QUEEN_ROOK_HOME: i8 = 0;
pub const WHITE_KING_HOME: i8 = 4;
pub const WHITE_KING_ROOK_HOME: i8 = 7;
pub const BLACK_QUEEN_ROOK_HOME: i8 = 56;
pub const BLACK_KING_HOME: i8 = 60;
pub const BLACK_KING_ROOK_HOME: i8 = 63;

/// Knight jump offsets; wraparound is filtered by the column-distance check.
pub const KNIGHT_OFFSETS: [i8; 8] = [-17, -15, 15, 17, -10, -6, 10, 6];

/// King single-step offsets.
pub const KING_OFFSETS: [i8; 8] = [8, -8, 7, 9, -7, -9, -1, 1];

/// Ray directions as (file step, rank step).
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (1, 1), (1, -1), (-1, 1)];
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (-1, 1),
];
