use crate::direction::Direction;
use crate::multi_index::MultiIndex;
use crate::partition::Partition;




/**
 * One step of a super-entity traversal: the offset from an entity to one of
 * its adjacent cells, and the boundary flags under which that cell does not
 * exist. Bit `2i` of `boundary` is set when the step goes below axis `i`,
 * bit `2i + 1` when it goes above.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step<const DIM: usize> {
    pub offset: MultiIndex<DIM>,
    pub boundary: u32,
}




/**
 * Lookup table of the codimension-0 entities (cells) adjacent to an entity,
 * per direction. An entity sitting on a vertex layer along `k` axes touches
 * `2^k` cells, reached by stepping one half-cell down or up along each of
 * those axes.
 *
 * The table depends only on the dimension. It is built once when a grid
 * level is constructed and handed out by reference.
 */
#[derive(Clone, Debug)]
pub struct SuperEntityTable<const DIM: usize> {
    steps: Vec<Vec<Step<DIM>>>,
}




// ============================================================================
impl<const DIM: usize> SuperEntityTable<DIM> {

    pub fn new() -> Self {
        let steps = Direction::<DIM>::all()
            .map(|dir| {
                Direction::<DIM>::all()
                    .filter(|d| d.bits() & dir.bits() == 0)
                    .map(|d| {
                        let mut offset = MultiIndex::zero();
                        let mut boundary = 0;

                        for i in 0..DIM {
                            let dirbit = dir.bit(i);
                            let dbit = d.bit(i);
                            offset[i] = (1 - dirbit) * (2 * dbit - 1);
                            boundary |= ((1 - dirbit) as u32) << (2 * i as u32 + dbit as u32);
                        }
                        Step { offset, boundary }
                    })
                    .collect()
            })
            .collect();

        Self { steps }
    }

    /// Return the steps from an entity of the given direction to its
    /// adjacent cells.
    pub fn steps(&self, direction: Direction<DIM>) -> &[Step<DIM>] {
        &self.steps[direction.bits() as usize]
    }

    /// Return an iterator over the cells adjacent to the entity `id`, which
    /// lie inside the partition `bounds`. Cells across a face of `bounds`
    /// are skipped.
    pub fn iter<'a>(&'a self, id: &MultiIndex<DIM>, bounds: &Partition<DIM>) -> SuperEntityIter<'a, DIM> {
        SuperEntityIter {
            steps: self.steps(id.direction()).iter(),
            id: *id,
            flags: boundary_flags(id, bounds),
        }
    }
}

impl<const DIM: usize> Default for SuperEntityTable<DIM> {
    fn default() -> Self {
        Self::new()
    }
}




/**
 * Return the boundary flags of an entity relative to a partition: bit `2i`
 * if the entity sits on (or below) the lower layer of axis `i`, bit `2i + 1`
 * if it sits on (or above) the upper layer.
 */
pub fn boundary_flags<const DIM: usize>(id: &MultiIndex<DIM>, bounds: &Partition<DIM>) -> u32 {
    let begin = bounds.entity_begin();
    let end = bounds.entity_end();
    let mut flags = 0;

    for i in 0..DIM {
        let low = (id[i] <= begin[i]) as u32;
        let high = (id[i] >= end[i]) as u32;
        flags |= (low | (high << 1)) << (2 * i);
    }
    flags
}




/**
 * Iterator over the cells adjacent to one entity.
 */
#[derive(Clone, Debug)]
pub struct SuperEntityIter<'a, const DIM: usize> {
    steps: std::slice::Iter<'a, Step<DIM>>,
    id: MultiIndex<DIM>,
    flags: u32,
}

impl<'a, const DIM: usize> Iterator for SuperEntityIter<'a, DIM> {
    type Item = MultiIndex<DIM>;

    fn next(&mut self) -> Option<Self::Item> {
        let flags = self.flags;
        self.steps
            .find(|step| flags & step.boundary == 0)
            .map(|step| self.id + step.offset)
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::{SuperEntityTable, boundary_flags};
    use crate::direction::Direction;
    use crate::multi_index::MultiIndex;
    use crate::partition::Partition;

    fn cells2d(table: &SuperEntityTable<2>, id: [i64; 2], bounds: &Partition<2>) -> Vec<[i64; 2]> {
        table.iter(&MultiIndex::new(id), bounds).map(|c| c.into()).collect()
    }

    #[test]
    fn step_counts_follow_the_entity_dimension() {
        let table = SuperEntityTable::<3>::new();
        for dir in Direction::<3>::all() {
            assert_eq!(table.steps(dir).len(), 1 << dir.codimension());
        }
    }

    #[test]
    fn interior_faces_touch_two_cells() {
        let table = SuperEntityTable::new();
        let bounds = Partition::from_width(MultiIndex::new([2, 2]));
        assert_eq!(cells2d(&table, [2, 1], &bounds), vec![[1, 1], [3, 1]]);
        assert_eq!(cells2d(&table, [1, 2], &bounds), vec![[1, 1], [1, 3]]);
    }

    #[test]
    fn boundary_faces_touch_one_cell() {
        let table = SuperEntityTable::new();
        let bounds = Partition::from_width(MultiIndex::new([2, 2]));
        assert_eq!(cells2d(&table, [0, 1], &bounds), vec![[1, 1]]);
        assert_eq!(cells2d(&table, [4, 3], &bounds), vec![[3, 3]]);
    }

    #[test]
    fn vertices_touch_up_to_four_cells() {
        let table = SuperEntityTable::new();
        let bounds = Partition::from_width(MultiIndex::new([2, 2]));
        assert_eq!(cells2d(&table, [2, 2], &bounds).len(), 4);
        assert_eq!(cells2d(&table, [0, 0], &bounds), vec![[1, 1]]);
        assert_eq!(cells2d(&table, [2, 4], &bounds), vec![[1, 3], [3, 3]]);
    }

    #[test]
    fn a_cell_is_its_own_only_super_entity() {
        let table = SuperEntityTable::new();
        let bounds = Partition::from_width(MultiIndex::new([2, 2]));
        assert_eq!(cells2d(&table, [3, 1], &bounds), vec![[3, 1]]);
    }

    #[test]
    fn boundary_flags_mark_lower_and_upper_layers() {
        let bounds = Partition::new(MultiIndex::new([1, 1]), MultiIndex::new([2, 2]));
        assert_eq!(boundary_flags(&MultiIndex::new([2, 4]), &bounds), 0b0001);
        assert_eq!(boundary_flags(&MultiIndex::new([3, 6]), &bounds), 0b1000);
        assert_eq!(boundary_flags(&MultiIndex::new([3, 3]), &bounds), 0);
    }
}
