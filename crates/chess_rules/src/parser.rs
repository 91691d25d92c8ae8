//! UCI (long-algebraic) move parsing.
//!
//! Accepts `<from><to>` with an optional promotion qualifier, e.g. `e2e4`
//! or `a7a8q`. The `e.p` suffix only ever appears in engine-produced history
//! records and is rejected on input.

use std::sync::LazyLock;

use regex::Regex;

use crate::board::coords_to_pos;
use crate::error::MoveError;
use crate::types::PieceKind;

static UCI_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-h][1-8])([a-h][1-8])([nbrqkNBRQK]?|e\.p)$").unwrap());

/// A parsed client move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedMove {
    pub from: i8,
    pub to: i8,
    pub promotion: Option<PieceKind>,
}

/// Parse a client-supplied UCI move string.
pub fn parse_uci(input: &str) -> Result<ParsedMove, MoveError> {
    let caps = UCI_PATTERN.captures(input).ok_or(MoveError::Unparseable)?;
    let from = square_of(&caps[1]).ok_or(MoveError::Unparseable)?;
    let to = square_of(&caps[2]).ok_or(MoveError::Unparseable)?;
    let qualifier = &caps[3];
    if qualifier == "e.p" {
        return Err(MoveError::Unparseable);
    }
    let promotion = qualifier.chars().next().and_then(promotion_kind);
    Ok(ParsedMove {
        from,
        to,
        promotion,
    })
}

fn square_of(coords: &str) -> Option<i8> {
    let mut chars = coords.chars();
    let file = chars.next()?;
    let rank = chars.next()?.to_digit(10)? as u8;
    coords_to_pos(file, rank)
}

/// Promotion qualifier to piece kind. A king qualifier collapses to
/// "unspecified"; the state machine then reports the promotion as missing.
fn promotion_kind(qualifier: char) -> Option<PieceKind> {
    match qualifier.to_ascii_lowercase() {
        'b' => Some(PieceKind::Bishop),
        'n' => Some(PieceKind::Knight),
        'q' => Some(PieceKind::Queen),
        'r' => Some(PieceKind::Rook),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_moves() {
        let mv = parse_uci("e2e4").unwrap();
        assert_eq!(mv.from, 12);
        assert_eq!(mv.to, 28);
        assert_eq!(mv.promotion, None);
    }

    #[test]
    fn parses_promotion_qualifiers_in_either_case() {
        assert_eq!(parse_uci("a7a8q").unwrap().promotion, Some(PieceKind::Queen));
        assert_eq!(parse_uci("a7a8N").unwrap().promotion, Some(PieceKind::Knight));
        assert_eq!(parse_uci("h2h1r").unwrap().promotion, Some(PieceKind::Rook));
        assert_eq!(parse_uci("h2h1B").unwrap().promotion, Some(PieceKind::Bishop));
    }

    #[test]
    fn king_qualifier_collapses_to_unspecified() {
        assert_eq!(parse_uci("a7a8k").unwrap().promotion, None);
        assert_eq!(parse_uci("a7a8K").unwrap().promotion, None);
    }

    #[test]
    fn rejects_engine_only_en_passant_suffix() {
        assert_eq!(parse_uci("d5e6e.p"), Err(MoveError::Unparseable));
    }

    #[test]
    fn rejects_malformed_input() {
        for input in ["", "e2", "e2e9", "i2e4", "e2e4x", "e2 e4", "e2e4qq", "22e4"] {
            assert_eq!(parse_uci(input), Err(MoveError::Unparseable), "input {input:?}");
        }
    }
}
