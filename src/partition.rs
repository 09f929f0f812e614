use std::fmt;
use crate::multi_index::MultiIndex;




#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]


/**
 * Represents an axis-aligned box of grid cells, `origin[i] <= x[i] <
 * origin[i] + width[i]`. The box is a pure value: growing, intersecting and
 * translating all return new partitions. A partition with zero width on any
 * axis is empty, which is a valid outcome of an intersection rather than an
 * error.
 */
pub struct Partition<const DIM: usize> {
    origin: MultiIndex<DIM>,
    width: MultiIndex<DIM>,
}




/**
 * Describes a box in cell coordinates. The entities (vertices, faces, cells)
 * belonging to the box are addressed in multi-index space, where the box
 * covers `2 * origin ..= 2 * (origin + width)` on every axis.
 */
impl<const DIM: usize> Partition<DIM> {


    pub fn new(origin: MultiIndex<DIM>, width: MultiIndex<DIM>) -> Self {

        assert!(
            width.iter().all(|&w| w >= 0),
            "partition has negative width {}", width);

        Self { origin, width }
    }


    /**
     * The box of the given width, anchored at the origin.
     */
    pub fn from_width(width: MultiIndex<DIM>) -> Self {
        Self::new(MultiIndex::zero(), width)
    }


    /**
     * Return the lower corner (inclusive).
     */
    pub fn origin(&self) -> &MultiIndex<DIM> {
        &self.origin
    }


    /**
     * Return the number of cells along each axis.
     */
    pub fn width(&self) -> &MultiIndex<DIM> {
        &self.width
    }


    /**
     * Return the upper corner (exclusive).
     */
    pub fn end(&self) -> MultiIndex<DIM> {
        self.origin + self.width
    }


    /**
     * Determine whether the box contains no cells.
     */
    pub fn empty(&self) -> bool {
        self.width.iter().any(|&w| w == 0)
    }


    /**
     * Return the number of cells in this box.
     */
    pub fn volume(&self) -> i64 {
        self.width.product()
    }


    /**
     * Expand this box by `amount` cells on both sides of each axis whose bit
     * is set in `mask`. A negative amount shrinks the box; widths which would
     * become negative are clamped to zero.
     */
    pub fn grow(&self, amount: i64, mask: u32) -> Self {
        let mut origin = self.origin;
        let mut width = self.width;

        for i in 0..DIM {
            let s = ((mask >> i) & 1) as i64 * amount;
            origin[i] -= s;
            width[i] = (width[i] + 2 * s).max(0);
        }
        Self::new(origin, width)
    }


    /**
     * Expand this box by `amount` cells on every axis.
     */
    pub fn grow_all(&self, amount: i64) -> Self {
        self.grow(amount, (1 << DIM) - 1)
    }


    /**
     * Return the component-wise intersection with another box. Axes without
     * overlap yield zero width, making the result empty.
     */
    pub fn intersect(&self, other: &Self) -> Self {
        let origin = self.origin.component_max(&other.origin);
        let end = self.end().component_min(&other.end());
        Self::new(origin, (end - origin).map(|w| w.max(0)))
    }


    /**
     * Determine whether the two boxes share at least one cell.
     */
    pub fn intersects(&self, other: &Self) -> bool {
        !self.intersect(other).empty()
    }


    /**
     * Return this box shifted by the given offset.
     */
    pub fn translate(&self, offset: &MultiIndex<DIM>) -> Self {
        Self::new(self.origin + *offset, self.width)
    }


    /**
     * Increase the size of this box by the given factor.
     */
    pub fn scale(&self, factor: i64) -> Self {
        self.refine(&MultiIndex::splat(factor))
    }


    /**
     * Map this box onto a grid refined by `factor[i]` cells per coarse cell
     * along axis `i`.
     */
    pub fn refine(&self, factor: &MultiIndex<DIM>) -> Self {
        let scale = |a: i64, b: i64| a * b;
        Self::new(self.origin.zip_with(factor, scale), self.width.zip_with(factor, scale))
    }


    /**
     * Determine whether this box contains the given cell.
     */
    pub fn contains(&self, cell: &MultiIndex<DIM>) -> bool {
        (0..DIM).all(|i| self.origin[i] <= cell[i] && cell[i] < self.origin[i] + self.width[i])
    }


    /**
     * Determine whether another box is a subset of this one.
     */
    pub fn contains_partition(&self, other: &Self) -> bool {
        other.empty() || self.intersect(other) == *other
    }


    /**
     * Return the lowest multi-index of the entities in this box: the lower
     * vertex layer on each axis.
     */
    pub fn entity_begin(&self) -> MultiIndex<DIM> {
        self.origin * 2
    }


    /**
     * Return the highest multi-index (inclusive) of the entities in this box.
     */
    pub fn entity_end(&self) -> MultiIndex<DIM> {
        self.end() * 2
    }


    /**
     * Determine whether the entity addressed by `id` lies in the closure of
     * this box.
     */
    pub fn contains_entity(&self, id: &MultiIndex<DIM>) -> bool {
        let b = self.entity_begin();
        let e = self.entity_end();
        (0..DIM).all(|i| b[i] <= id[i] && id[i] <= e[i])
    }


    /**
     * Return an iterator over the cell coordinates of this box, with axis 0
     * increasing fastest.
     */
    pub fn cells(&self) -> impl Iterator<Item = MultiIndex<DIM>> + '_ {
        let total = if self.empty() { 0 } else { self.volume() as usize };
        let mut offset = MultiIndex::zero();
        let mut first = true;

        (0..total).map(move |_| {
            if !first {
                offset.increment(&self.width, 1);
            }
            first = false;
            self.origin + offset
        })
    }
}




// ============================================================================
impl<const DIM: usize> fmt::Display for Partition<DIM> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ {}, {} [", self.origin, self.end())
    }
}
