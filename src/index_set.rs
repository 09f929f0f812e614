use crate::direction::Direction;
use crate::multi_index::MultiIndex;
use crate::partition::Partition;
use crate::reference_cube::ReferenceCube;




/**
 * Assigns every entity in the closure of a partition a dense, zero-based
 * index within its codimension, suitable for addressing flat storage arrays.
 *
 * The entities of one codimension are grouped by direction, in increasing
 * bitmask order. Within a direction, entities are numbered with axis 0
 * fastest, using the number of cells along each axis the entity spans and
 * one more along each axis it does not.
 */
#[derive(Clone, Debug)]
pub struct IndexSet<const DIM: usize> {
    domain: Partition<DIM>,
    offsets: Vec<usize>,
    sizes: Vec<usize>,
}




// ============================================================================
impl<const DIM: usize> IndexSet<DIM> {




    /**
     * Build the index set of the given partition, normally the local mesh of
     * a grid level.
     */
    pub fn new(domain: &Partition<DIM>) -> Self {
        let cells = domain.width();
        let mut offsets = vec![0; Direction::<DIM>::COUNT as usize];
        let mut sizes = vec![0; DIM + 1];

        for dir in Direction::<DIM>::all() {
            let factor: i64 = (0..DIM).map(|j| cells[j] + (1 - dir.bit(j))).product();
            let codim = dir.codimension();
            offsets[dir.bits() as usize] = sizes[codim];
            sizes[codim] += factor as usize;
        }

        Self { domain: *domain, offsets, sizes }
    }




    /**
     * Return the partition this index set covers.
     */
    pub fn domain(&self) -> &Partition<DIM> {
        &self.domain
    }




    /**
     * Return the number of entities of the given codimension.
     */
    pub fn size(&self, codim: usize) -> usize {
        self.sizes[codim]
    }




    /**
     * Determine whether the entity lies in the closure of the domain, and so
     * has an index.
     */
    pub fn contains(&self, id: &MultiIndex<DIM>) -> bool {
        self.domain.contains_entity(id)
    }




    /**
     * Return the index of the entity within its codimension. The entity must
     * be contained in the domain; this is checked in debug builds only.
     */
    pub fn index(&self, id: &MultiIndex<DIM>) -> usize {
        debug_assert!(self.contains(id), "entity {} outside of {}", id, self.domain);

        let begin = self.domain.entity_begin();
        let cells = self.domain.width();
        let mut index = 0;
        let mut factor = 1;
        let mut dir = 0;

        for j in 0..DIM {
            let r = id[j] - begin[j];
            let d = r & 1;
            index += (r >> 1) * factor;
            factor *= cells[j] + (1 - d);
            dir |= (d as usize) << j;
        }
        self.offsets[dir] + index as usize
    }




    /**
     * Return the index of sub-entity `i` of codimension `codim` of the given
     * cell.
     */
    pub fn sub_index(&self, cell: &MultiIndex<DIM>, codim: usize, i: usize, cube: &ReferenceCube<DIM>) -> usize {
        debug_assert_eq!(cell.codimension(), 0, "{} is not a cell", cell);
        self.index(&(*cell + *cube.sub_id(codim, i)))
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use proptest::prelude::*;
    use super::IndexSet;
    use crate::multi_index::MultiIndex;
    use crate::partition::Partition;
    use crate::partition_list::PartitionList;
    use crate::reference_cube::ReferenceCube;
    use crate::sweep::SweepIterator;

    #[test]
    fn faces_of_a_single_cell_are_grouped_by_direction() {
        let set = IndexSet::new(&Partition::from_width(MultiIndex::new([1, 1])));
        assert_eq!(set.size(0), 1);
        assert_eq!(set.size(1), 4);
        assert_eq!(set.size(2), 4);
        assert_eq!(set.index(&MultiIndex::new([1, 0])), 0);
        assert_eq!(set.index(&MultiIndex::new([1, 2])), 1);
        assert_eq!(set.index(&MultiIndex::new([0, 1])), 2);
        assert_eq!(set.index(&MultiIndex::new([2, 1])), 3);
    }

    #[test]
    fn indices_are_relative_to_the_domain_origin() {
        let domain = Partition::new(MultiIndex::new([-2, 3]), MultiIndex::new([3, 2]));
        let set = IndexSet::new(&domain);
        assert_eq!(set.index(&MultiIndex::new([-3, 7])), 0);
        assert_eq!(set.index(&MultiIndex::new([1, 9])), 5);
        assert!(set.contains(&MultiIndex::new([2, 10])));
        assert!(!set.contains(&MultiIndex::new([3, 10])));
    }

    #[test]
    fn sub_indices_address_the_faces_of_a_cell() {
        let set = IndexSet::new(&Partition::from_width(MultiIndex::new([1, 1])));
        let cube = ReferenceCube::new();
        let cell = MultiIndex::new([1, 1]);
        let faces: Vec<_> = (0..4).map(|i| set.sub_index(&cell, 1, i, &cube)).collect();
        assert_eq!(faces, vec![2, 3, 0, 1]);
        assert_eq!(set.sub_index(&cell, 0, 0, &cube), 0);
    }

    proptest! {
        #[test]
        fn index_is_a_bijection_onto_each_codimension(
            o0 in -3i64..3, o1 in -3i64..3, o2 in -3i64..3,
            w0 in 1i64..4, w1 in 1i64..4, w2 in 1i64..4,
        ) {
            let domain = Partition::new(MultiIndex::new([o0, o1, o2]), MultiIndex::new([w0, w1, w2]));
            let set = IndexSet::new(&domain);
            let mut list = PartitionList::new();
            list.push(domain, 0);

            for codim in 0..=3 {
                let mut seen = vec![false; set.size(codim)];
                for id in SweepIterator::begin(&list, codim, 0) {
                    let index = set.index(&id);
                    prop_assert!(index < seen.len());
                    prop_assert!(!seen[index]);
                    seen[index] = true;
                }
                prop_assert!(seen.iter().all(|&s| s));
            }
        }
    }
}
