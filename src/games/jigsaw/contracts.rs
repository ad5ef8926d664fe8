//! Contract-based validation for drag transitions.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} drop {Q}. Drops are total, so the drag controller checks them with
//! debug assertions rather than returning errors.

use super::board::PuzzleBoard;
use super::invariants::{BoardInvariants, InvariantSet};
use super::types::PieceId;
use derive_more::Display;
use tracing::instrument;

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), ContractViolation>;

    /// Checks postconditions after applying the action.
    fn post(state: &S, action: &A) -> Result<(), ContractViolation>;
}

/// A broken precondition or postcondition.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ContractViolation {
    /// The piece does not exist on this board.
    #[display("Piece {} is not on the board", _0)]
    UnknownPiece(PieceId),

    /// The piece is not the one in hand.
    #[display("Piece {} is not being dragged", _0)]
    NotDragging(PieceId),

    /// The piece is already locked into its cell.
    #[display("Piece {} is already placed", _0)]
    AlreadyPlaced(PieceId),

    /// An invariant failed after the transition.
    #[display("Invariant violation: {}", _0)]
    Invariant(String),
}

impl std::error::Error for ContractViolation {}

/// Precondition: the piece is in hand.
pub struct PieceInHand;

impl PieceInHand {
    /// Checks that `piece` exists and is being dragged.
    #[instrument(skip(board))]
    pub fn check(piece: &PieceId, board: &PuzzleBoard) -> Result<(), ContractViolation> {
        let found = board
            .piece(*piece)
            .ok_or(ContractViolation::UnknownPiece(*piece))?;
        if !found.is_dragging() {
            return Err(ContractViolation::NotDragging(*piece));
        }
        Ok(())
    }
}

/// Precondition: the piece can still move.
pub struct PieceNotPlaced;

impl PieceNotPlaced {
    /// Checks that `piece` exists and is not placed.
    #[instrument(skip(board))]
    pub fn check(piece: &PieceId, board: &PuzzleBoard) -> Result<(), ContractViolation> {
        match board.piece(*piece) {
            Some(found) if found.is_placed() => Err(ContractViolation::AlreadyPlaced(*piece)),
            Some(_) => Ok(()),
            None => Err(ContractViolation::UnknownPiece(*piece)),
        }
    }
}

/// Contract for dropping the piece in hand.
///
/// Preconditions:
/// - The piece is being dragged
/// - The piece is not placed
///
/// Postconditions:
/// - The piece is no longer dragging
/// - Every board invariant holds
pub struct DropContract;

impl Contract<PuzzleBoard, PieceId> for DropContract {
    fn pre(board: &PuzzleBoard, piece: &PieceId) -> Result<(), ContractViolation> {
        PieceInHand::check(piece, board)?;
        PieceNotPlaced::check(piece, board)
    }

    fn post(board: &PuzzleBoard, piece: &PieceId) -> Result<(), ContractViolation> {
        if board.piece(*piece).is_some_and(|found| found.is_dragging()) {
            return Err(ContractViolation::Invariant(format!(
                "piece {} still dragging after drop",
                piece
            )));
        }
        BoardInvariants::check_all(board).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            ContractViolation::Invariant(format!("Postcondition failed: {}", descriptions))
        })
    }
}
