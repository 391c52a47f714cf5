// Board a 32 caselle giocabili: a1=0, c1=1, e1=2, g1=3, b2=4, ..., h8=31
// Stesso mapping per generazione mosse, valutazione e notazione

use crate::action::Action;
use crate::error::BoardError;
use crate::utils::{NUM_SQUARES, SQUARES_PER_ROW};
use std::ops::{Deref, DerefMut, Not};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl Not for Color {
    type Output = Color;

    fn not(self) -> Color {
        self.opposite()
    }
}

/// Content of one playable square. The discriminant indexes the piece-count table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Piece {
    #[default]
    Empty = 0,
    WhiteMan = 1,
    BlackMan = 2,
    WhiteKing = 3,
    BlackKing = 4,
}

impl Piece {
    pub const ALL: [Piece; 5] = [
        Piece::Empty,
        Piece::WhiteMan,
        Piece::BlackMan,
        Piece::WhiteKing,
        Piece::BlackKing,
    ];

    pub fn man(color: Color) -> Piece {
        match color {
            Color::White => Piece::WhiteMan,
            Color::Black => Piece::BlackMan,
        }
    }

    pub fn king(color: Color) -> Piece {
        match color {
            Color::White => Piece::WhiteKing,
            Color::Black => Piece::BlackKing,
        }
    }

    /// Owning side, `None` for an empty cell
    pub fn color(self) -> Option<Color> {
        match self {
            Piece::Empty => None,
            Piece::WhiteMan | Piece::WhiteKing => Some(Color::White),
            Piece::BlackMan | Piece::BlackKing => Some(Color::Black),
        }
    }

    pub fn is_man(self) -> bool {
        matches!(self, Piece::WhiteMan | Piece::BlackMan)
    }

    pub fn is_king(self) -> bool {
        matches!(self, Piece::WhiteKing | Piece::BlackKing)
    }

    /// King reached on promotion; kings and empty cells are unchanged
    pub fn crowned(self) -> Piece {
        match self {
            Piece::WhiteMan => Piece::WhiteKing,
            Piece::BlackMan => Piece::BlackKing,
            other => other,
        }
    }

    fn symbol(self) -> char {
        match self {
            Piece::Empty => '.',
            Piece::WhiteMan => 'w',
            Piece::BlackMan => 'b',
            Piece::WhiteKing => 'W',
            Piece::BlackKing => 'B',
        }
    }

    fn from_symbol(ch: char) -> Option<Piece> {
        match ch {
            '.' | '-' => Some(Piece::Empty),
            'w' => Some(Piece::WhiteMan),
            'b' => Some(Piece::BlackMan),
            'W' => Some(Piece::WhiteKing),
            'B' => Some(Piece::BlackKing),
            _ => None,
        }
    }
}

pub const START_LAYOUT: &str = "wwww/wwww/wwww/..../..../bbbb/bbbb/bbbb";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Piece; NUM_SQUARES],
    // pezzi in gioco per tipo; la voce Empty resta a zero
    counts: [u8; 5],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard starting layout: White men on 0..12, Black men on 20..32
    pub fn new() -> Self {
        let mut board = Self::empty();
        for pos in 0..12 {
            board.set_piece(pos, Piece::WhiteMan);
        }
        for pos in 20..NUM_SQUARES {
            board.set_piece(pos, Piece::BlackMan);
        }
        board
    }

    /// Board with no pieces, for hand setup
    pub fn empty() -> Self {
        Self {
            cells: [Piece::Empty; NUM_SQUARES],
            counts: [0; 5],
        }
    }

    /// Parse a layout string: one symbol per square in index order,
    /// `/` and whitespace ignored. A layout without pieces is rejected.
    pub fn from_layout(layout: &str) -> Result<Self, BoardError> {
        let mut board = Self::empty();
        let mut index = 0;
        for symbol in layout.chars() {
            if symbol == '/' || symbol.is_ascii_whitespace() {
                continue;
            }
            let piece = Piece::from_symbol(symbol).ok_or(BoardError::InvalidCell { symbol, index })?;
            if index >= NUM_SQUARES {
                // conta il resto per riportare la lunghezza effettiva
                index += 1;
                continue;
            }
            board.set_piece(index, piece);
            index += 1;
        }
        if index != NUM_SQUARES {
            return Err(BoardError::InvalidLayoutLength { found: index });
        }
        if board.pieces(Color::White) == 0 && board.pieces(Color::Black) == 0 {
            return Err(BoardError::NoPieces);
        }
        Ok(board)
    }

    /// Canonical layout string, row 1 first, rows separated by `/`
    pub fn to_layout(&self) -> String {
        let mut out = String::with_capacity(NUM_SQUARES + 7);
        for (pos, piece) in self.cells.iter().enumerate() {
            if pos > 0 && pos % SQUARES_PER_ROW == 0 {
                out.push('/');
            }
            out.push(piece.symbol());
        }
        out
    }

    #[inline]
    pub fn piece_on(&self, pos: usize) -> Piece {
        self.cells[pos]
    }

    pub fn cells(&self) -> &[Piece; NUM_SQUARES] {
        &self.cells
    }

    /// Place a piece during setup, keeping the counters in step
    pub fn set_piece(&mut self, pos: usize, piece: Piece) {
        let old = self.cells[pos];
        if old != Piece::Empty {
            self.counts[old as usize] -= 1;
        }
        if piece != Piece::Empty {
            self.counts[piece as usize] += 1;
        }
        self.cells[pos] = piece;
    }

    #[inline]
    pub fn count(&self, piece: Piece) -> u8 {
        self.counts[piece as usize]
    }

    pub fn men(&self, color: Color) -> u8 {
        self.count(Piece::man(color))
    }

    pub fn kings(&self, color: Color) -> u8 {
        self.count(Piece::king(color))
    }

    pub fn pieces(&self, color: Color) -> u8 {
        self.men(color) + self.kings(color)
    }

    /// Recount every piece type by scanning the cells.
    ///
    /// The counters are never rebuilt from this; it exists to check them.
    pub fn tally(&self) -> [u8; 5] {
        let mut counts = [0u8; 5];
        for piece in self.cells {
            if piece != Piece::Empty {
                counts[piece as usize] += 1;
            }
        }
        counts
    }

    pub fn counts(&self) -> [u8; 5] {
        self.counts
    }

    /// Squares holding a piece of `color`, in index order
    pub fn squares_of(&self, color: Color) -> impl Iterator<Item = usize> + '_ {
        (0..NUM_SQUARES).filter(move |&pos| self.cells[pos].color() == Some(color))
    }

    /// Winner if one side has no pieces left and the other has at least one.
    ///
    /// Both sides empty cannot arise from play; it is not resolved to either
    /// side and reports `None` (debug builds assert on it).
    pub fn win_status(&self) -> Option<Color> {
        let white = self.pieces(Color::White);
        let black = self.pieces(Color::Black);
        debug_assert!(white != 0 || black != 0, "win_status on a board with no pieces");
        match (white, black) {
            (w, 0) if w != 0 => Some(Color::White),
            (0, b) if b != 0 => Some(Color::Black),
            _ => None,
        }
    }

    pub fn apply(&mut self, action: &Action) {
        debug_assert!(
            self.check_applicable(action).is_ok(),
            "apply of an action not generated from this board: {action}"
        );
        self.cells[action.start_pos] = Piece::Empty;
        self.cells[action.end_pos] = action.end_piece;
        self.counts[action.start_piece as usize] -= 1;
        self.counts[action.end_piece as usize] += 1;
        if action.is_capture() {
            self.cells[action.capture_pos] = Piece::Empty;
            self.counts[action.capture_piece as usize] -= 1;
        }
    }

    pub fn unapply(&mut self, action: &Action) {
        debug_assert!(
            self.cells[action.start_pos] == Piece::Empty
                && self.cells[action.end_pos] == action.end_piece
                && (!action.is_capture() || self.cells[action.capture_pos] == Piece::Empty),
            "unapply of an action that is not on the board: {action}"
        );
        self.cells[action.start_pos] = action.start_piece;
        self.cells[action.end_pos] = Piece::Empty;
        self.counts[action.end_piece as usize] -= 1;
        self.counts[action.start_piece as usize] += 1;
        if action.is_capture() {
            self.cells[action.capture_pos] = action.capture_piece;
            self.counts[action.capture_piece as usize] += 1;
        }
    }

    /// Apply after checking the action against the board; the board is left
    /// untouched on mismatch.
    pub fn try_apply(&mut self, action: &Action) -> Result<(), BoardError> {
        self.check_applicable(action)?;
        self.apply(action);
        Ok(())
    }

    /// Apply `action` for the lifetime of the returned guard; it is unapplied
    /// when the guard drops, on every exit path.
    pub fn scoped_apply<'b, 'a>(&'b mut self, action: &'a Action) -> Applied<'b, 'a> {
        self.apply(action);
        Applied { board: self, action }
    }

    fn check_applicable(&self, action: &Action) -> Result<(), BoardError> {
        let expect = |pos: usize, expected: Piece| {
            let found = self.cells[pos];
            if found == expected {
                Ok(())
            } else {
                Err(BoardError::ActionMismatch { pos, expected, found })
            }
        };
        expect(action.start_pos, action.start_piece)?;
        expect(action.end_pos, Piece::Empty)?;
        if action.is_capture() {
            expect(action.capture_pos, action.capture_piece)?;
        }
        Ok(())
    }
}

/// A board with one action applied; dropping it unapplies the action
pub struct Applied<'b, 'a> {
    board: &'b mut Board,
    action: &'a Action,
}

impl Deref for Applied<'_, '_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Applied<'_, '_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Applied<'_, '_> {
    fn drop(&mut self) {
        self.board.unapply(self.action);
    }
}

// Diagramma 8x8, riga 8 in alto
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in (0..8).rev() {
            write!(f, "{} ", r + 1)?;
            for c in 0..8 {
                if c % 2 != r % 2 {
                    write!(f, "  ")?;
                } else {
                    let pos = r * SQUARES_PER_ROW + c / 2;
                    write!(f, "{} ", self.cells[pos].symbol())?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}
