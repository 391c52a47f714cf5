// Index arithmetic for the 32 playable squares, shared by move generation and evaluation
//
// Square 0 is a1, the corner of White's back row. Each row holds four squares:
// even rows use columns 0,2,4,6 and odd rows columns 1,3,5,7. "Up" is towards
// increasing index, White's forward direction.

pub const NUM_SQUARES: usize = 32;
pub const SQUARES_PER_ROW: usize = 4;

/// The four diagonal directions, in move generation scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    UpLeft = 0,
    UpRight = 1,
    DownLeft = 2,
    DownRight = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];
    pub const UP: [Direction; 2] = [Direction::UpLeft, Direction::UpRight];
    pub const DOWN: [Direction; 2] = [Direction::DownLeft, Direction::DownRight];
}

#[inline]
pub const fn row(pos: usize) -> usize {
    pos / SQUARES_PER_ROW
}

#[inline]
pub const fn col(pos: usize) -> usize {
    2 * (pos % SQUARES_PER_ROW) + row(pos) % 2
}

/// Neighbouring square one diagonal step away, or `None` at a board edge.
///
/// The left edge is `pos % 8 == 0` (first square of an even row), the right
/// edge `pos % 8 == 7` (last square of an odd row). The offset pairs are
/// +3/+4 and -5/-4 on even rows, +4/+5 and -4/-3 on odd rows.
pub const fn step(pos: usize, dir: Direction) -> Option<usize> {
    if pos >= NUM_SQUARES {
        return None;
    }
    let odd = row(pos) % 2;
    match dir {
        Direction::UpLeft => {
            if pos >= 28 || pos % 8 == 0 {
                None
            } else {
                Some(pos + 3 + odd)
            }
        }
        Direction::UpRight => {
            if pos >= 28 || pos % 8 == 7 {
                None
            } else {
                Some(pos + 4 + odd)
            }
        }
        Direction::DownLeft => {
            if pos < 4 || pos % 8 == 0 {
                None
            } else {
                Some(pos + odd - 5)
            }
        }
        Direction::DownRight => {
            if pos < 4 || pos % 8 == 7 {
                None
            } else {
                Some(pos + odd - 4)
            }
        }
    }
}

/// Jumped square and landing square of a capture in `dir`, both edge-checked.
pub const fn jump(pos: usize, dir: Direction) -> Option<(usize, usize)> {
    match step(pos, dir) {
        Some(over) => match step(over, dir) {
            Some(land) => Some((over, land)),
            None => None,
        },
        None => None,
    }
}

/// Back row of White (where Black promotes).
#[inline]
pub const fn is_white_back_row(pos: usize) -> bool {
    pos < SQUARES_PER_ROW
}

/// Back row of Black (where White promotes).
#[inline]
pub const fn is_black_back_row(pos: usize) -> bool {
    pos >= NUM_SQUARES - SQUARES_PER_ROW && pos < NUM_SQUARES
}

/// Distance to the nearest board edge, folded to 0..=3.
#[inline]
pub const fn edge_distance(pos: usize) -> usize {
    let (r, c) = (row(pos), col(pos));
    let vertical = if r < 4 { r } else { 7 - r };
    let horizontal = if c < 4 { c } else { 7 - c };
    if vertical < horizontal {
        vertical
    } else {
        horizontal
    }
}

/// Convert a square index (0-31) to a name, e.g. 0 -> "a1", 31 -> "h8".
pub fn square_name(pos: usize) -> String {
    let file_char = (b'a' + col(pos) as u8) as char;
    let rank_char = (b'1' + row(pos) as u8) as char;
    format!("{}{}", file_char, rank_char)
}

/// Inverse of [`square_name`]; `None` for light squares and malformed names.
pub fn parse_square(name: &str) -> Option<usize> {
    let bytes = name.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let (file, rank) = (bytes[0], bytes[1]);
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return None;
    }
    let c = (file - b'a') as usize;
    let r = (rank - b'1') as usize;
    // casella chiara: non giocabile
    if c % 2 != r % 2 {
        return None;
    }
    Some(r * SQUARES_PER_ROW + c / 2)
}
