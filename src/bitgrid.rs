//! A `width × height` bit grid packed into unsigned words.
//!
//! Cells are stored row-major: bit `y * width + x` of the word sequence.
//! The word type `T` is generic so small grids can be packed tighter, but
//! the engine uses the default `u64`.

use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

use crate::common::Coordinate;

/// Errors returned by bit grid operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitGridError {
    /// Width or height is zero.
    ZeroSize { width: usize, height: usize },
    /// Column or row index is out of bounds.
    IndexOutOfBounds { x: usize, y: usize },
    /// `width * height` does not fit in memory.
    TooLarge { width: usize, height: usize },
    /// Stored words do not match the grid size.
    WordCount { expected: usize, found: usize },
    /// Bits are set past the last cell.
    PaddingBits,
}

impl fmt::Display for BitGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitGridError::ZeroSize { width, height } => {
                write!(f, "ZeroSize: {}x{} grid has no cells", width, height)
            }
            BitGridError::IndexOutOfBounds { x, y } => {
                write!(f, "IndexOutOfBounds: x={}, y={}", x, y)
            }
            BitGridError::TooLarge { width, height } => {
                write!(f, "TooLarge: {}x{} grid cannot be allocated", width, height)
            }
            BitGridError::WordCount { expected, found } => {
                write!(f, "WordCount: expected {} words, found {}", expected, found)
            }
            BitGridError::PaddingBits => write!(f, "PaddingBits: bits set past the last cell"),
        }
    }
}

/// A fixed-size bit grid stored in a sequence of unsigned words `T`.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct BitGrid<T = u64>
where
    T: PrimInt + Unsigned + Zero,
{
    width: usize,
    height: usize,
    words: Vec<T>,
}

impl<T> BitGrid<T>
where
    T: PrimInt + Unsigned + Zero,
{
    const WORD_BITS: usize = mem::size_of::<T>() * 8;

    /// Create an empty grid. Fails if either dimension is zero or the grid
    /// is too large to allocate.
    pub fn new(width: usize, height: usize) -> Result<Self, BitGridError> {
        let count = Self::word_count(width, height)?;
        let mut words = Vec::new();
        words
            .try_reserve_exact(count)
            .map_err(|_| BitGridError::TooLarge { width, height })?;
        words.resize(count, T::zero());
        Ok(BitGrid {
            width,
            height,
            words,
        })
    }

    /// Rebuild a grid from its packed words, checking that they fit the
    /// dimensions exactly.
    pub fn from_words(width: usize, height: usize, words: Vec<T>) -> Result<Self, BitGridError> {
        let expected = Self::word_count(width, height)?;
        if words.len() != expected {
            return Err(BitGridError::WordCount {
                expected,
                found: words.len(),
            });
        }
        let used = (width * height) % Self::WORD_BITS;
        if used != 0 {
            let last = words[expected - 1];
            if (last >> used) != T::zero() {
                return Err(BitGridError::PaddingBits);
            }
        }
        Ok(BitGrid {
            width,
            height,
            words,
        })
    }

    fn word_count(width: usize, height: usize) -> Result<usize, BitGridError> {
        if width == 0 || height == 0 {
            return Err(BitGridError::ZeroSize { width, height });
        }
        let cells = width
            .checked_mul(height)
            .ok_or(BitGridError::TooLarge { width, height })?;
        Ok(cells.div_ceil(Self::WORD_BITS))
    }

    /// Creates a grid from an iterator over coordinates.
    pub fn from_coords<I>(width: usize, height: usize, iter: I) -> Result<Self, BitGridError>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut grid = Self::new(width, height)?;
        for c in iter {
            grid.set(c)?;
        }
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of set cells.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if no cells are set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| w.is_zero())
    }

    /// Gets the bit at `c`.
    pub fn get(&self, c: Coordinate) -> Result<bool, BitGridError> {
        let (word, bit) = self.locate(c)?;
        Ok(((self.words[word] >> bit) & T::one()) != T::zero())
    }

    /// Like [`BitGrid::get`] but treats out-of-bounds cells as unset.
    #[inline]
    pub fn contains(&self, c: Coordinate) -> bool {
        self.get(c).unwrap_or(false)
    }

    /// Sets the bit at `c` to 1.
    pub fn set(&mut self, c: Coordinate) -> Result<(), BitGridError> {
        let (word, bit) = self.locate(c)?;
        self.words[word] = self.words[word] | (T::one() << bit);
        Ok(())
    }

    /// Clears the bit at `c` to 0.
    pub fn clear(&mut self, c: Coordinate) -> Result<(), BitGridError> {
        let (word, bit) = self.locate(c)?;
        self.words[word] = self.words[word] & !(T::one() << bit);
        Ok(())
    }

    /// Clears all bits to `0`.
    #[inline]
    pub fn clear_all(&mut self) {
        for w in self.words.iter_mut() {
            *w = T::zero();
        }
    }

    /// `true` when no cell is set in both grids. Grids of different shape
    /// are compared cell by cell on their common area.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        if self.width == other.width && self.height == other.height {
            return self
                .words
                .iter()
                .zip(other.words.iter())
                .all(|(a, b)| (*a & *b).is_zero());
        }
        self.iter_set_bits().all(|c| !other.contains(c))
    }

    /// Iterator over the set cells, row by row.
    #[inline]
    pub fn iter_set_bits(&self) -> SetBits<'_, T> {
        SetBits { grid: self, idx: 0 }
    }

    #[inline]
    fn locate(&self, c: Coordinate) -> Result<(usize, usize), BitGridError> {
        if c.x >= self.width || c.y >= self.height {
            return Err(BitGridError::IndexOutOfBounds { x: c.x, y: c.y });
        }
        let idx = c.y * self.width + c.x;
        Ok((idx / Self::WORD_BITS, idx % Self::WORD_BITS))
    }
}

impl<T> fmt::Debug for BitGrid<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitGrid {}x{}:", self.width, self.height)?;
        write!(f, "{}", self)
    }
}

impl<T> fmt::Display for BitGrid<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let bit = if self.contains(Coordinate::new(x, y)) {
                    '■'
                } else {
                    '□'
                };
                write!(f, "{} ", bit)?;
            }
            if y > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
impl<'de, T> serde::Deserialize<'de> for BitGrid<T>
where
    T: PrimInt + Unsigned + Zero + serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(rename = "BitGrid")]
        struct Packed<W> {
            width: usize,
            height: usize,
            words: Vec<W>,
        }

        let packed = Packed::<T>::deserialize(deserializer)?;
        BitGrid::from_words(packed.width, packed.height, packed.words)
            .map_err(serde::de::Error::custom)
    }
}

/// Iterator over the set bits of a grid.
#[derive(Clone, Copy)]
pub struct SetBits<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    grid: &'a BitGrid<T>,
    idx: usize,
}

impl<'a, T> Iterator for SetBits<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = Coordinate;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let total = self.grid.width * self.grid.height;
        while self.idx < total {
            let idx = self.idx;
            self.idx += 1;
            let word = self.grid.words[idx / BitGrid::<T>::WORD_BITS];
            if ((word >> (idx % BitGrid::<T>::WORD_BITS)) & T::one()) != T::zero() {
                return Some(Coordinate::new(idx % self.grid.width, idx / self.grid.width));
            }
        }
        None
    }
}
