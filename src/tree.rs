//! Bounded-depth game tree expansion

use crate::board::{Board, Player};
use crate::evaluate::evaluate;

/// A hypothetical position reached from the root of a search
///
/// Every node owns its own copy of the board, so sibling branches never see
/// each other's speculative moves.
#[derive(Clone, Debug)]
pub struct GameTreeNode {
    pub board: Board,
    /// The move that led here from the parent, `None` at the root
    pub column: Option<usize>,
    pub score: i32,
    pub children: Vec<GameTreeNode>,
}

impl GameTreeNode {
    pub fn new(board: Board, column: Option<usize>) -> Self {
        Self {
            board,
            column,
            score: 0,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(GameTreeNode::node_count).sum::<usize>()
    }

    /// Scores leaves from `player`'s point of view and backs the scores up the tree
    ///
    /// `to_move` is the player whose turn it is at this node: `player` picks the
    /// highest child score, the opponent the lowest.
    pub fn back_up(&mut self, player: Player, to_move: Player) -> i32 {
        self.score = if self.is_leaf() {
            evaluate(&self.board, player)
        } else {
            let scores = self
                .children
                .iter_mut()
                .map(|child| child.back_up(player, to_move.other()));
            let best = if to_move == player {
                scores.max()
            } else {
                scores.min()
            };
            best.unwrap_or(0)
        };
        self.score
    }
}

/// Expands `board` into a tree `depth` plies deep, with `mover` playing first
///
/// Each level holds one child per open column, in column order. The tree is
/// built in full: there is no pruning and no cut-off on won positions. The
/// node count grows as 7^depth on an open board, so the caller is expected
/// to keep `depth` within [`MAX_SEARCH_DEPTH`](crate::MAX_SEARCH_DEPTH).
pub fn build(board: &Board, depth: usize, mover: Player) -> GameTreeNode {
    let mut root = GameTreeNode::new(*board, None);
    expand(&mut root, depth, mover);
    root
}

fn expand(node: &mut GameTreeNode, depth: usize, mover: Player) {
    if depth == 0 {
        return;
    }
    for column in node.board.open_columns() {
        let mut board = node.board.clone();
        // open_columns guarantees a free row
        if let Ok(row) = board.drop_row(column) {
            board.place(row, column, mover);
            let mut child = GameTreeNode::new(board, Some(column));
            expand(&mut child, depth - 1, mover.other());
            node.children.push(child);
        }
    }
}
