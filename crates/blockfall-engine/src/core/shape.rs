use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Serialize, Serializer};

/// Largest side of any piece bounding box, in any orientation.
pub const MAX_PATTERN_SIZE: usize = 4;

/// Occupancy pattern of a piece within its tight bounding box.
///
/// Row 0 is the top row. Patterns are plain values: rotating one yields a new
/// pattern and never touches the catalog entry it came from.
///
/// # Example
///
/// ```
/// use blockfall_engine::PieceKind;
///
/// let t = PieceKind::T.base_shape();
/// assert_eq!((t.width(), t.height()), (3, 2));
///
/// let rotated = t.rotated_clockwise();
/// assert_eq!((rotated.width(), rotated.height()), (2, 3));
/// assert_eq!(rotated.rotated_clockwise().rotated_clockwise().rotated_clockwise(), t);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pattern {
    width: u8,
    height: u8,
    cells: [[bool; MAX_PATTERN_SIZE]; MAX_PATTERN_SIZE],
}

impl Pattern {
    /// Builds a pattern from rows of `#` (occupied) and `.` (empty).
    #[expect(clippy::cast_possible_truncation)]
    const fn parse(rows: &[&str]) -> Self {
        let height = rows.len();
        assert!(height > 0 && height <= MAX_PATTERN_SIZE);
        let width = rows[0].len();
        assert!(width > 0 && width <= MAX_PATTERN_SIZE);

        let mut cells = [[false; MAX_PATTERN_SIZE]; MAX_PATTERN_SIZE];
        let mut y = 0;
        while y < height {
            let row = rows[y].as_bytes();
            assert!(row.len() == width);
            let mut x = 0;
            while x < width {
                cells[y][x] = row[x] == b'#';
                x += 1;
            }
            y += 1;
        }
        Self {
            width: width as u8,
            height: height as u8,
            cells,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        usize::from(self.width)
    }

    #[must_use]
    pub fn height(&self) -> usize {
        usize::from(self.height)
    }

    /// Returns whether the cell at column `x`, row `y` of the bounding box is occupied.
    ///
    /// Coordinates outside the bounding box are empty.
    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height() && self.cells[y][x]
    }

    /// Iterates rows top to bottom, each as a slice of occupancy flags.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells[..self.height()]
            .iter()
            .map(|row| &row[..self.width()])
    }

    /// Offsets `(dx, dy)` of the occupied cells, row-major from the top-left.
    pub fn occupied_offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(dx, &occupied)| occupied.then_some((dx, dy)))
        })
    }

    /// Rotates the pattern 90° clockwise.
    ///
    /// This is the transpose of the row-reversed matrix, so a `w×h` pattern
    /// becomes `h×w`.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        let mut cells = [[false; MAX_PATTERN_SIZE]; MAX_PATTERN_SIZE];
        let height = self.height();
        for (y, row) in cells.iter_mut().take(self.width()).enumerate() {
            for (x, cell) in row.iter_mut().take(height).enumerate() {
                *cell = self.cells[height - 1 - x][y];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

// Rows as strings, e.g. [".#.", "###"]
impl Serialize for Pattern {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.rows().map(|row| {
            row.iter()
                .map(|&occupied| if occupied { '#' } else { '.' })
                .collect::<String>()
        }))
    }
}

/// Display color attached to each piece kind and to the cells it locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Cyan,
    Yellow,
    Purple,
    Green,
    Red,
    Blue,
    Orange,
}

impl Color {
    /// Returns the RGB triple used to draw this color.
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Cyan => (0, 255, 255),
            Color::Yellow => (255, 255, 0),
            Color::Purple => (128, 0, 128),
            Color::Green => (0, 255, 0),
            Color::Red => (255, 0, 0),
            Color::Blue => (0, 0, 255),
            Color::Orange => (255, 165, 0),
        }
    }
}

/// The seven piece kinds.
///
/// The discriminant is the stable kind identifier (0-6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    /// All kinds in identifier order.
    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        if (id as usize) < Self::LEN {
            Some(Self::ALL[id as usize])
        } else {
            None
        }
    }

    /// Returns the spawn-orientation occupancy pattern.
    #[must_use]
    pub const fn base_shape(self) -> Pattern {
        BASE_SHAPES[self as usize]
    }

    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::O => Color::Yellow,
            PieceKind::T => Color::Purple,
            PieceKind::S => Color::Green,
            PieceKind::Z => Color::Red,
            PieceKind::J => Color::Blue,
            PieceKind::L => Color::Orange,
        }
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::from_char('L'), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}

const BASE_SHAPES: [Pattern; PieceKind::LEN] = [
    // I-piece
    Pattern::parse(&["####"]),
    // O-piece
    Pattern::parse(&["##", "##"]),
    // T-piece
    Pattern::parse(&[".#.", "###"]),
    // S-piece
    Pattern::parse(&["##.", ".##"]),
    // Z-piece
    Pattern::parse(&[".##", "##."]),
    // J-piece
    Pattern::parse(&["#..", "###"]),
    // L-piece
    Pattern::parse(&["..#", "###"]),
];

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn rotations(pattern: Pattern, n: usize) -> Pattern {
        (0..n).fold(pattern, |p, _| p.rotated_clockwise())
    }

    #[test]
    fn test_every_base_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.base_shape().occupied_offsets().count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn test_four_rotations_is_identity() {
        for kind in PieceKind::ALL {
            let base = kind.base_shape();
            assert_eq!(rotations(base, 4), base, "{kind:?}");
        }
    }

    #[test]
    fn test_rotation_period() {
        assert_eq!(rotations(PieceKind::O.base_shape(), 1), PieceKind::O.base_shape());
        for kind in [PieceKind::I, PieceKind::S, PieceKind::Z] {
            let base = kind.base_shape();
            assert_ne!(rotations(base, 1), base, "{kind:?}");
            assert_eq!(rotations(base, 2), base, "{kind:?}");
        }
        for kind in [PieceKind::T, PieceKind::J, PieceKind::L] {
            let base = kind.base_shape();
            assert_ne!(rotations(base, 2), base, "{kind:?}");
        }
    }

    #[test]
    fn test_t_rotates_clockwise() {
        let rotated = PieceKind::T.base_shape().rotated_clockwise();
        let rows: Vec<Vec<bool>> = rotated.rows().map(<[bool]>::to_vec).collect();
        assert_eq!(
            rows,
            vec![
                vec![true, false],
                vec![true, true],
                vec![true, false],
            ]
        );
    }

    #[test]
    fn test_i_rotates_to_vertical() {
        let rotated = PieceKind::I.base_shape().rotated_clockwise();
        assert_eq!((rotated.width(), rotated.height()), (1, 4));
        assert_eq!(
            rotated.occupied_offsets().collect::<Vec<_>>(),
            vec![(0, 0), (0, 1), (0, 2), (0, 3)]
        );
    }

    #[test]
    fn test_j_and_l_are_mirrored() {
        assert!(PieceKind::J.base_shape().is_occupied(0, 0));
        assert!(!PieceKind::J.base_shape().is_occupied(2, 0));
        assert!(PieceKind::L.base_shape().is_occupied(2, 0));
        assert!(!PieceKind::L.base_shape().is_occupied(0, 0));
        assert_eq!(PieceKind::J.color(), Color::Blue);
        assert_eq!(PieceKind::L.color(), Color::Orange);
    }

    #[test]
    fn test_s_and_z_base_shapes() {
        let rows = |kind: PieceKind| -> Vec<Vec<bool>> {
            kind.base_shape().rows().map(<[bool]>::to_vec).collect()
        };
        assert_eq!(PieceKind::S.id(), 3);
        assert_eq!(
            rows(PieceKind::S),
            vec![vec![true, true, false], vec![false, true, true]]
        );
        assert_eq!(PieceKind::S.color(), Color::Green);
        assert_eq!(PieceKind::Z.id(), 4);
        assert_eq!(
            rows(PieceKind::Z),
            vec![vec![false, true, true], vec![true, true, false]]
        );
        assert_eq!(PieceKind::Z.color(), Color::Red);
    }

    #[test]
    fn test_kind_id_roundtrip() {
        for (i, kind) in PieceKind::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(kind.id()), i);
            assert_eq!(PieceKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(PieceKind::from_id(7), None);
    }

    #[test]
    fn test_random_kind_covers_all_kinds() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [0_usize; PieceKind::LEN];
        for _ in 0..7000 {
            let kind: PieceKind = rng.random();
            seen[kind as usize] += 1;
        }
        // Loose bound; a uniform draw puts ~1000 in each bucket.
        assert!(seen.iter().all(|&n| (700..1300).contains(&n)), "{seen:?}");
    }

    #[test]
    fn test_pattern_serialization() {
        let json = serde_json::to_string(&PieceKind::S.base_shape()).unwrap();
        assert_eq!(json, "[\"##.\",\".##\"]");
        assert_eq!(serde_json::to_string(&Color::Orange).unwrap(), r#""orange""#);
    }
}
