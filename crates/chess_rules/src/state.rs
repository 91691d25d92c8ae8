//! Game state machine.
//!
//! Owns the board, the captured pile, the move history and every rule flag;
//! all mutation funnels through [`GameState::update`]. A rejected move
//! leaves the state bit-for-bit identical to its pre-call value.

use crate::board::{column, coords_to_pos, initial_board, pos_to_algebraic, Board};
use crate::constants::{
    BLACK_KING_HOME, BLACK_KING_ROOK_HOME, BLACK_QUEEN_ROOK_HOME, PROTOCOL_VERSION,
    WHITE_KING_HOME, WHITE_KING_ROOK_HOME, WHITE_QUEEN_ROOK_HOME,
};
use crate::error::{DecodeError, MoveError};
use crate::move_gen::{attack, pseudo_legal_moves};
use crate::parser::{parse_uci, ParsedMove};
use crate::serialize;
use crate::types::{CastleRights, Color, GameStatus, MoveResult, Piece, PieceKind};

/// Full state of one chess game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) version: u8,
    pub(crate) board: Board,
    pub(crate) captured: Vec<Piece>,
    pub(crate) moves: Vec<String>,
    pub(crate) player_turn: Color,
    pub(crate) checked_player: Color,
    pub(crate) status: GameStatus,
    pub(crate) last_move_pawn_jump: bool,
    pub(crate) castle_rights: CastleRights,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Initial position, white to move.
    pub fn new() -> Self {
        GameState {
            version: PROTOCOL_VERSION,
            board: initial_board(),
            captured: Vec::new(),
            moves: Vec::new(),
            player_turn: Color::White,
            checked_player: Color::Unknown,
            status: GameStatus::Playing,
            last_move_pawn_jump: false,
            castle_rights: CastleRights::all(),
        }
    }

    /// State for an arbitrary position with an empty history.
    ///
    /// Castle rights are derived from the `has_moved` flags of the kings and
    /// rooks standing on their home squares; check status is recomputed.
    pub fn from_position(board: Board, player_turn: Color) -> Self {
        let mut state = GameState {
            version: PROTOCOL_VERSION,
            board,
            captured: Vec::new(),
            moves: Vec::new(),
            player_turn,
            checked_player: Color::Unknown,
            status: GameStatus::Playing,
            last_move_pawn_jump: false,
            castle_rights: CastleRights::none(),
        };
        state.castle_rights = derived_castle_rights(&state.board);
        let (white_checked, black_checked) = attack::checked_players(&state);
        state.checked_player = checked_color(white_checked, black_checked);
        state
    }

    /// Decode a state previously produced by [`GameState::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<GameState, DecodeError> {
        serialize::from_bytes(bytes)
    }

    /// Bit-packed serialization of the entire game.
    pub fn to_bytes(&self) -> Vec<u8> {
        serialize::to_bytes(self)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Piece on a square; `None` for empty or out-of-range squares.
    #[inline]
    pub fn piece_at(&self, pos: i8) -> Option<Piece> {
        if (0..64).contains(&pos) {
            self.board[pos as usize]
        } else {
            None
        }
    }

    pub fn player_turn(&self) -> Color {
        self.player_turn
    }

    pub fn checked_player(&self) -> Color {
        self.checked_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    pub fn castle_rights(&self) -> CastleRights {
        self.castle_rights
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    /// True for exactly the one ply following a two-square pawn push.
    pub fn last_move_was_pawn_jump(&self) -> bool {
        self.last_move_pawn_jump
    }

    /// Destination square of the last recorded move.
    pub(crate) fn last_move_destination(&self) -> Option<i8> {
        let record = self.moves.last()?;
        let bytes = record.as_bytes();
        let file = *bytes.get(2)? as char;
        let rank = (*bytes.get(3)? as char).to_digit(10)? as u8;
        coords_to_pos(file, rank)
    }

    /// Validate and apply one UCI move for the side to move.
    ///
    /// On success the turn flips, history grows by one record and the result
    /// describes the new position. On failure the state is unchanged and the
    /// error carries a stable code.
    pub fn update(&mut self, uci: &str) -> Result<MoveResult, MoveError> {
        let mv = parse_uci(uci)?;
        match self.status {
            GameStatus::Checkmate => return Err(MoveError::Checkmate),
            GameStatus::Stalemate => return Err(MoveError::Stalemate),
            GameStatus::Playing => {}
        }
        let mover = self.player_turn;
        let piece = match self.piece_at(mv.from) {
            Some(piece) if piece.color == mover => piece,
            _ => return Err(MoveError::InvalidPieceSelected),
        };
        if matches!(self.piece_at(mv.to), Some(target) if target.color == mover) {
            return Err(MoveError::InvalidPosition);
        }
        if mv.from == mv.to {
            return Err(MoveError::NoMove);
        }
        if !pseudo_legal_moves(self, mv.from).contains(&mv.to) {
            return Err(MoveError::MoveNotAllowed);
        }

        let promoting = piece.kind == PieceKind::Pawn && is_last_rank(mv.to, mover);
        if promoting && mv.promotion.is_none() {
            return Err(MoveError::MissingPromotion);
        }

        // Facts about the move, taken before any mutation.
        let forward = mover.pawn_direction();
        let pawn_jump = piece.kind == PieceKind::Pawn && mv.to - mv.from == 2 * forward;
        let en_passant = piece.kind == PieceKind::Pawn
            && column(mv.from) != column(mv.to)
            && self.piece_at(mv.to).is_none();
        let castling = piece.kind == PieceKind::King && (mv.to - mv.from).abs() == 2;

        // Snapshot for the rollback on MOVE_IN_CHECK.
        let board_before = self.board;
        let captured_before = self.captured.len();
        let rights_before = self.castle_rights;

        if let Some(victim) = self.board[mv.to as usize] {
            self.captured.push(victim);
        }
        if castling {
            self.relocate_castle_rook(mv.to);
        }
        let mut en_passant_square = None;
        if en_passant {
            let victim_pos = mv.to - forward;
            if let Some(victim) = self.board[victim_pos as usize].take() {
                self.captured.push(victim);
            }
            en_passant_square = Some(victim_pos);
        }

        let mut moved = piece;
        moved.has_moved = true;
        if promoting {
            if let Some(kind) = mv.promotion {
                moved = Piece {
                    kind,
                    color: mover,
                    has_moved: true,
                };
            }
        }
        self.board[mv.from as usize] = None;
        self.board[mv.to as usize] = Some(moved);
        self.update_castle_rights(mv.from, mv.to);

        let (white_checked, black_checked) = attack::checked_players(self);
        let mover_checked = match mover {
            Color::White => white_checked,
            Color::Black => black_checked,
            Color::Unknown => false,
        };
        if mover_checked {
            self.board = board_before;
            self.captured.truncate(captured_before);
            self.castle_rights = rights_before;
            return Err(MoveError::MoveInCheck);
        }

        let record = render_record(&mv, promoting, en_passant);
        self.moves.push(record.clone());
        self.checked_player = checked_color(white_checked, black_checked);
        self.player_turn = mover.opposite();
        // The jump flag must be armed before the escape search runs, or the
        // search cannot see an en-passant escape.
        self.last_move_pawn_jump = pawn_jump;
        self.status = self.compute_status();

        Ok(MoveResult {
            uci: record,
            en_passant_capture: en_passant_square.map(pos_to_algebraic).unwrap_or_default(),
            checked_player: self.checked_player,
            status: self.status,
        })
    }

    /// Move the rook half of a castle; the king half follows the regular
    /// move path.
    fn relocate_castle_rook(&mut self, king_to: i8) {
        let (rook_from, rook_to) = match king_to {
            6 => (WHITE_KING_ROOK_HOME, 5),
            2 => (WHITE_QUEEN_ROOK_HOME, 3),
            62 => (BLACK_KING_ROOK_HOME, 61),
            58 => (BLACK_QUEEN_ROOK_HOME, 59),
            _ => return,
        };
        if let Some(mut rook) = self.board[rook_from as usize].take() {
            rook.has_moved = true;
            self.board[rook_to as usize] = Some(rook);
        }
    }

    /// Clear rights whose rook home square was vacated or captured, and both
    /// of a color's rights when its king leaves home.
    fn update_castle_rights(&mut self, from: i8, to: i8) {
        for pos in [from, to] {
            match pos {
                WHITE_QUEEN_ROOK_HOME => self.castle_rights.white_queen_side = false,
                WHITE_KING_ROOK_HOME => self.castle_rights.white_king_side = false,
                WHITE_KING_HOME => {
                    self.castle_rights.white_king_side = false;
                    self.castle_rights.white_queen_side = false;
                }
                BLACK_QUEEN_ROOK_HOME => self.castle_rights.black_queen_side = false,
                BLACK_KING_ROOK_HOME => self.castle_rights.black_king_side = false,
                BLACK_KING_HOME => {
                    self.castle_rights.black_king_side = false;
                    self.castle_rights.black_queen_side = false;
                }
                _ => {}
            }
        }
    }

    /// Status for the side to move. Checkmate and stalemate both mean "no
    /// legal move exists", split on whether that side stands in check.
    fn compute_status(&mut self) -> GameStatus {
        if self.has_any_escape() {
            GameStatus::Playing
        } else if self.checked_player == self.player_turn {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        }
    }

    fn has_any_escape(&mut self) -> bool {
        let side = self.player_turn;
        for from in 0..64 {
            let Some(piece) = self.piece_at(from) else {
                continue;
            };
            if piece.color != side {
                continue;
            }
            for to in pseudo_legal_moves(self, from) {
                if self.escapes_check(from, to, side) {
                    return true;
                }
            }
        }
        false
    }

    /// Hypothetically relocate `from` to `to` and test whether `side` is
    /// still in check. En-passant targets also lift the jumped pawn.
    fn escapes_check(&mut self, from: i8, to: i8, side: Color) -> bool {
        let board_before = self.board;
        let piece = self.board[from as usize].take();
        let en_passant = matches!(piece, Some(p) if p.kind == PieceKind::Pawn)
            && column(from) != column(to)
            && self.board[to as usize].is_none();
        if en_passant {
            self.board[(to - side.pawn_direction()) as usize] = None;
        }
        self.board[to as usize] = piece;
        let safe = !attack::is_in_check(self, side);
        self.board = board_before;
        safe
    }
}

fn checked_color(white_checked: bool, black_checked: bool) -> Color {
    if white_checked {
        Color::White
    } else if black_checked {
        Color::Black
    } else {
        Color::Unknown
    }
}

fn is_last_rank(pos: i8, mover: Color) -> bool {
    match mover {
        Color::White => pos > 55,
        Color::Black => pos < 8,
        Color::Unknown => false,
    }
}

/// Normalized history record: lowercase squares, uppercase promotion letter,
/// `e.p` suffix for en-passant captures.
fn render_record(mv: &ParsedMove, promoting: bool, en_passant: bool) -> String {
    let mut record = format!("{}{}", pos_to_algebraic(mv.from), pos_to_algebraic(mv.to));
    if promoting {
        if let Some(letter) = mv.promotion.and_then(promotion_letter) {
            record.push(letter);
        }
    }
    if en_passant {
        record.push_str("e.p");
    }
    record
}

fn promotion_letter(kind: PieceKind) -> Option<char> {
    match kind {
        PieceKind::Queen => Some('Q'),
        PieceKind::Knight => Some('N'),
        PieceKind::Bishop => Some('B'),
        PieceKind::Rook => Some('R'),
        PieceKind::Pawn | PieceKind::King => None,
    }
}

fn derived_castle_rights(board: &Board) -> CastleRights {
    let unmoved = |pos: i8, kind: PieceKind, color: Color| {
        matches!(
            board[pos as usize],
            Some(piece) if piece.kind == kind && piece.color == color && !piece.has_moved
        )
    };
    let white_king = unmoved(WHITE_KING_HOME, PieceKind::King, Color::White);
    let black_king = unmoved(BLACK_KING_HOME, PieceKind::King, Color::Black);
    CastleRights {
        white_king_side: white_king && unmoved(WHITE_KING_ROOK_HOME, PieceKind::Rook, Color::White),
        white_queen_side: white_king
            && unmoved(WHITE_QUEEN_ROOK_HOME, PieceKind::Rook, Color::White),
        black_king_side: black_king && unmoved(BLACK_KING_ROOK_HOME, PieceKind::Rook, Color::Black),
        black_queen_side: black_king
            && unmoved(BLACK_QUEEN_ROOK_HOME, PieceKind::Rook, Color::Black),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_errors_in_order() {
        let mut state = GameState::new();
        assert_eq!(state.update("zzzz"), Err(MoveError::Unparseable));
        // Black pawn selected on white's turn.
        assert_eq!(state.update("e7e5"), Err(MoveError::InvalidPieceSelected));
        // Empty origin square.
        assert_eq!(state.update("e4e5"), Err(MoveError::InvalidPieceSelected));
        // Own piece on the destination.
        assert_eq!(state.update("d1e1"), Err(MoveError::InvalidPosition));
        // Knight cannot reach e4 from g1.
        assert_eq!(state.update("g1e4"), Err(MoveError::MoveNotAllowed));
        // Nothing above mutated the state.
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn update_flips_turn_and_records_history() {
        let mut state = GameState::new();
        let result = state.update("e2e4").unwrap();
        assert_eq!(result.uci, "e2e4");
        assert_eq!(result.status, GameStatus::Playing);
        assert_eq!(result.checked_player, Color::Unknown);
        assert_eq!(state.player_turn(), Color::Black);
        assert_eq!(state.moves(), ["e2e4"]);
        assert!(state.piece_at(28).unwrap().has_moved);
        assert!(state.piece_at(12).is_none());
    }

    #[test]
    fn pawn_jump_flag_lasts_exactly_one_ply() {
        let mut state = GameState::new();
        state.update("e2e4").unwrap();
        assert!(state.last_move_was_pawn_jump());
        state.update("g8f6").unwrap();
        assert!(!state.last_move_was_pawn_jump());
        state.update("d2d3").unwrap();
        assert!(!state.last_move_was_pawn_jump());
    }

    #[test]
    fn capture_lands_on_the_pile() {
        let mut state = GameState::new();
        for uci in ["e2e4", "d7d5", "e4d5"] {
            state.update(uci).unwrap();
        }
        assert_eq!(state.captured().len(), 1);
        let victim = state.captured()[0];
        assert_eq!(victim.kind, PieceKind::Pawn);
        assert_eq!(victim.color, Color::Black);
    }

    #[test]
    fn promotion_requires_a_kind_and_replaces_the_pawn() {
        let mut board: Board = [None; 64];
        board[48] = Some(Piece::new(PieceKind::Pawn, Color::White));
        board[4] = Some(Piece::new(PieceKind::King, Color::White));
        board[55] = Some(Piece::new(PieceKind::King, Color::Black));
        let mut state = GameState::from_position(board, Color::White);

        assert_eq!(state.update("a7a8"), Err(MoveError::MissingPromotion));
        // A king qualifier is coerced to "unspecified" and fails the same way.
        assert_eq!(state.update("a7a8k"), Err(MoveError::MissingPromotion));

        state.update("a7a8Q").unwrap();
        let queen = state.piece_at(56).unwrap();
        assert_eq!(queen.kind, PieceKind::Queen);
        assert_eq!(queen.color, Color::White);
        assert!(queen.has_moved);
        assert!(state.piece_at(48).is_none());
        assert_eq!(state.moves(), ["a7a8Q"]);
    }

    #[test]
    fn move_in_check_rolls_everything_back() {
        // White bishop pinned on e2 by the e8 rook.
        let mut board: Board = [None; 64];
        board[4] = Some(Piece::new(PieceKind::King, Color::White));
        board[12] = Some(Piece::new(PieceKind::Bishop, Color::White));
        board[60] = Some(Piece::new(PieceKind::Rook, Color::Black));
        board[62] = Some(Piece::new(PieceKind::King, Color::Black));
        let mut state = GameState::from_position(board, Color::White);
        let before = state.to_bytes();

        assert_eq!(state.update("e2d3"), Err(MoveError::MoveInCheck));
        assert_eq!(state.to_bytes(), before);
    }

    #[test]
    fn terminal_status_rejects_further_moves() {
        let mut state = GameState::new();
        for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            state.update(uci).unwrap();
        }
        assert_eq!(state.status(), GameStatus::Checkmate);
        assert_eq!(state.checked_player(), Color::White);
        assert_eq!(state.update("e1f2"), Err(MoveError::Checkmate));
    }

    #[test]
    fn stalemate_is_detected() {
        // Black king a8; Qb5-b6 seals a7, b7 and b8 without giving check.
        let mut board: Board = [None; 64];
        board[56] = Some(Piece::new(PieceKind::King, Color::Black));
        board[33] = Some(Piece::new(PieceKind::Queen, Color::White));
        board[42] = Some(Piece::new(PieceKind::King, Color::White));
        let mut state = GameState::from_position(board, Color::White);

        state.update("b5b6").unwrap();
        assert_eq!(state.status(), GameStatus::Stalemate);
        assert_eq!(state.checked_player(), Color::Unknown);
        assert_eq!(state.update("a8a7"), Err(MoveError::Stalemate));
    }

    #[test]
    fn castle_rights_clear_when_rook_or_king_moves() {
        let mut state = GameState::new();
        for uci in ["h2h4", "a7a5", "h1h3", "a8a6"] {
            state.update(uci).unwrap();
        }
        let rights = state.castle_rights();
        assert!(!rights.white_king_side);
        assert!(rights.white_queen_side);
        assert!(!rights.black_queen_side);
        assert!(rights.black_king_side);
    }
}
