//! Board representation for Gomoku

pub mod board;
pub mod generator;
pub mod window;


// Re-exports
pub use board::Board;
pub use generator::GenMode;
pub use window::{MoveGuard, WindowSnapshot};

/// Board size (15x15)
pub const BOARD_SIZE: usize = 15;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 225

/// Half-width of the line window scored around a cell (9 cells total)
pub const WINDOW_RADIUS: i32 = 4;
pub const WINDOW_LEN: usize = 2 * WINDOW_RADIUS as usize + 1;

/// Cell contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stone {
    Empty,
    Computer,
    Human,
}

impl Stone {
    /// Get opponent side
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Computer => Stone::Human,
            Stone::Human => Stone::Computer,
            Stone::Empty => Stone::Empty,
        }
    }

    /// Index into per-side tables (`None` for Empty)
    #[inline]
    pub fn side_index(self) -> Option<usize> {
        match self {
            Stone::Computer => Some(0),
            Stone::Human => Some(1),
            Stone::Empty => None,
        }
    }
}

/// Line orientation through a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Vertical,
    Horizontal,
    Diagonal,
    AntiDiagonal,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Vertical,
        Direction::Horizontal,
        Direction::Diagonal,
        Direction::AntiDiagonal,
    ];

    /// (row, col) step along the line
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Vertical => (1, 0),
            Direction::Horizontal => (0, 1),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (-1, 1),
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < BOARD_SIZE as u8 && col < BOARD_SIZE as u8);
        Self { row, col }
    }

    /// Checked constructor from signed coordinates
    #[inline]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn try_new(row: i32, col: i32) -> Option<Self> {
        if Self::is_valid(row, col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Board centre, the default opening move
    #[inline]
    pub fn center() -> Self {
        let mid = (BOARD_SIZE / 2) as u8;
        Self::new(mid, mid)
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32) -> bool {
        row >= 0 && row < BOARD_SIZE as i32 && col >= 0 && col < BOARD_SIZE as i32
    }

    /// The 9 coordinates of the window centred here along `dir`.
    /// Entries off the board are `None`.
    pub fn window(self, dir: Direction) -> [Option<Pos>; WINDOW_LEN] {
        let (dr, dc) = dir.delta();
        let mut out = [None; WINDOW_LEN];
        for (k, slot) in out.iter_mut().enumerate() {
            let step = k as i32 - WINDOW_RADIUS;
            *slot = Pos::try_new(
                i32::from(self.row) + dr * step,
                i32::from(self.col) + dc * step,
            );
        }
        out
    }

    /// All on-board cells within Chebyshev distance `radius`, excluding self
    pub fn neighbors(self, radius: i32) -> impl Iterator<Item = Pos> {
        let (r0, c0) = (i32::from(self.row), i32::from(self.col));
        (-radius..=radius)
            .flat_map(move |dr| (-radius..=radius).map(move |dc| (dr, dc)))
            .filter(|&(dr, dc)| dr != 0 || dc != 0)
            .filter_map(move |(dr, dc)| Pos::try_new(r0 + dr, c0 + dc))
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}
