use core::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub, SubAssign};
use std::fmt;
use std::str::FromStr;
use crate::direction::Direction;
use crate::error::Error;




/**
 * A statically-sized integer vector which addresses a geometric entity of a
 * structured grid. Along each axis, an even component names a vertex layer
 * and an odd component names a cell center. Entity `2 * c + 1` (on every
 * axis) is the cell with integer coordinate `c`; the entities on its
 * boundary are reached by adding or subtracting one on some axes.
 *
 * The codimension of the entity is derived from the parities, never stored.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MultiIndex<const DIM: usize> {
    data: [i64; DIM],
}




// ============================================================================
impl<const DIM: usize> MultiIndex<DIM> {


    pub const fn new(data: [i64; DIM]) -> Self {
        Self { data }
    }


    /**
     * The multi-index with every component equal to zero.
     */
    pub const fn zero() -> Self {
        Self { data: [0; DIM] }
    }


    /**
     * The multi-index with every component equal to `value`.
     */
    pub const fn splat(value: i64) -> Self {
        Self { data: [value; DIM] }
    }


    /**
     * Out-of-range sentinel used to mark exhausted iterators.
     */
    pub const fn max_value() -> Self {
        Self::splat(i64::MAX)
    }


    pub fn as_array(&self) -> &[i64; DIM] {
        &self.data
    }


    pub fn iter(&self) -> impl Iterator<Item = &i64> {
        self.data.iter()
    }


    /**
     * Return the number of axes along which this entity has extent (the
     * number of odd components).
     */
    pub fn mydimension(&self) -> usize {
        self.data.iter().filter(|&&x| x & 1 != 0).count()
    }


    /**
     * Return the codimension of the entity: 0 for cells, `DIM` for vertices.
     */
    pub fn codimension(&self) -> usize {
        DIM - self.mydimension()
    }


    /**
     * Return the direction bitmask of this multi-index, bit `i` being set
     * when component `i` is odd.
     */
    pub fn direction(&self) -> Direction<DIM> {
        Direction::of(self)
    }


    /**
     * Odometer-style increment over the box `[0, bound)`: component 0 is
     * advanced by `step` and carries into the next component on overflow.
     * Returns `false` when every component has wrapped back to zero.
     */
    pub fn increment(&mut self, bound: &Self, step: i64) -> bool {
        for i in 0..DIM {
            self.data[i] += step;
            if self.data[i] < bound.data[i] {
                return true;
            }
            self.data[i] = 0;
        }
        false
    }


    /**
     * Add `a * other` to this multi-index.
     */
    pub fn axpy(&mut self, a: i64, other: &Self) {
        for (x, y) in self.data.iter_mut().zip(other.data.iter()) {
            *x += a * y
        }
    }


    /**
     * Component-wise minimum. The derived `Ord` is lexicographic.
     */
    pub fn component_min(&self, other: &Self) -> Self {
        self.zip_with(other, i64::min)
    }


    /**
     * Component-wise maximum.
     */
    pub fn component_max(&self, other: &Self) -> Self {
        self.zip_with(other, i64::max)
    }


    /**
     * Return the axis holding the largest component (the first one on ties).
     */
    pub fn argmax(&self) -> usize {
        let mut axis = 0;
        for i in 1..DIM {
            if self.data[i] > self.data[axis] {
                axis = i
            }
        }
        axis
    }


    /**
     * Return the product of the components.
     */
    pub fn product(&self) -> i64 {
        self.data.iter().product()
    }


    pub fn map<F: Fn(i64) -> i64>(&self, f: F) -> Self {
        let mut data = self.data;
        for x in data.iter_mut() {
            *x = f(*x)
        }
        Self { data }
    }


    pub fn zip_with<F: Fn(i64, i64) -> i64>(&self, other: &Self, f: F) -> Self {
        let mut data = self.data;
        for (x, y) in data.iter_mut().zip(other.data.iter()) {
            *x = f(*x, *y)
        }
        Self { data }
    }
}




// ============================================================================
impl<const DIM: usize> Add for MultiIndex<DIM> {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        self.zip_with(&other, |a, b| a + b)
    }
}

impl<const DIM: usize> Sub for MultiIndex<DIM> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        self.zip_with(&other, |a, b| a - b)
    }
}

impl<const DIM: usize> Mul<i64> for MultiIndex<DIM> {
    type Output = Self;

    fn mul(self, a: i64) -> Self::Output {
        self.map(|x| x * a)
    }
}

impl<const DIM: usize> Div<i64> for MultiIndex<DIM> {
    type Output = Self;

    fn div(self, a: i64) -> Self::Output {
        self.map(|x| x / a)
    }
}

impl<const DIM: usize> Neg for MultiIndex<DIM> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.map(|x| -x)
    }
}

impl<const DIM: usize> AddAssign for MultiIndex<DIM> {
    fn add_assign(&mut self, other: Self) {
        self.axpy(1, &other)
    }
}

impl<const DIM: usize> SubAssign for MultiIndex<DIM> {
    fn sub_assign(&mut self, other: Self) {
        self.axpy(-1, &other)
    }
}




// ============================================================================
impl<const DIM: usize> Index<usize> for MultiIndex<DIM> {
    type Output = i64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<const DIM: usize> IndexMut<usize> for MultiIndex<DIM> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl<const DIM: usize> From<[i64; DIM]> for MultiIndex<DIM> {
    fn from(data: [i64; DIM]) -> Self {
        Self { data }
    }
}

impl<const DIM: usize> From<MultiIndex<DIM>> for [i64; DIM] {
    fn from(index: MultiIndex<DIM>) -> Self {
        index.data
    }
}




// ============================================================================
impl<const DIM: usize> fmt::Display for MultiIndex<DIM> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, x) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, ")")
    }
}


/**
 * Parses `(1, 2, 3)`, `1,2,3` or `1 2 3`.
 */
impl<const DIM: usize> FromStr for MultiIndex<DIM> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s.trim().trim_start_matches('(').trim_end_matches(')');
        let parts: Vec<_> = inner
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();

        if parts.len() != DIM {
            return Err(Error::DimensionMismatch { expected: DIM, found: parts.len() });
        }
        let mut data = [0; DIM];

        for (x, p) in data.iter_mut().zip(parts) {
            *x = p.parse().map_err(|_| Error::ParseMultiIndex(s.to_string()))?;
        }
        Ok(Self { data })
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::MultiIndex;

    #[test]
    fn codimension_counts_odd_components() {
        assert_eq!(MultiIndex::new([1, 3]).codimension(), 0);
        assert_eq!(MultiIndex::new([2, 3]).codimension(), 1);
        assert_eq!(MultiIndex::new([1, 4]).codimension(), 1);
        assert_eq!(MultiIndex::new([0, 4]).codimension(), 2);
        assert_eq!(MultiIndex::new([-1, -2, 5]).codimension(), 1);
    }

    #[test]
    fn vector_arithmetic_works() {
        let a = MultiIndex::new([1, 2, 3]);
        let b = MultiIndex::new([4, 5, 6]);
        assert_eq!(a + b, MultiIndex::new([5, 7, 9]));
        assert_eq!(b - a, MultiIndex::new([3, 3, 3]));
        assert_eq!(a * 2, MultiIndex::new([2, 4, 6]));
        assert_eq!(b / 2, MultiIndex::new([2, 2, 3]));
        assert_eq!(-a, MultiIndex::new([-1, -2, -3]));

        let mut c = a;
        c.axpy(2, &b);
        assert_eq!(c, MultiIndex::new([9, 12, 15]));
    }

    #[test]
    fn min_and_max_are_componentwise() {
        let a = MultiIndex::new([1, 7]);
        let b = MultiIndex::new([4, 2]);
        assert_eq!(a.component_min(&b), MultiIndex::new([1, 2]));
        assert_eq!(a.component_max(&b), MultiIndex::new([4, 7]));
        assert_eq!(a.min(b), a);
    }

    #[test]
    fn increment_visits_every_index_in_bound() {
        let bound = MultiIndex::new([3, 2]);
        let mut index = MultiIndex::zero();
        let mut visited = vec![index];

        while index.increment(&bound, 1) {
            visited.push(index);
        }
        assert_eq!(visited.len(), 6);
        assert_eq!(visited[1], MultiIndex::new([1, 0]));
        assert_eq!(visited[3], MultiIndex::new([0, 1]));
        assert_eq!(index, MultiIndex::zero());
    }

    #[test]
    fn argmax_prefers_first_axis_on_ties() {
        assert_eq!(MultiIndex::new([4, 3]).argmax(), 0);
        assert_eq!(MultiIndex::new([2, 3]).argmax(), 1);
        assert_eq!(MultiIndex::new([3, 3, 1]).argmax(), 0);
    }

    #[test]
    fn display_and_parse_agree() {
        let a = MultiIndex::new([4, -3, 0]);
        assert_eq!(a.to_string(), "(4, -3, 0)");
        assert_eq!(a.to_string().parse::<MultiIndex<3>>().unwrap(), a);
        assert_eq!("4,3".parse::<MultiIndex<2>>().unwrap(), MultiIndex::new([4, 3]));
        assert!("4,3".parse::<MultiIndex<3>>().is_err());
        assert!("4,x".parse::<MultiIndex<2>>().is_err());
    }
}
