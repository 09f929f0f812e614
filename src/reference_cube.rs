use crate::multi_index::MultiIndex;




/// Sub-entities of the reference cell of a `DIM`-dimensional grid, as
/// offsets relative to a cell's multi-index. Every component of an offset is
/// -1, 0, or +1. The numbering is the classic cube numbering: faces come as
/// -x, +x, -y, +y, ..., and corners count with axis 0 fastest.
///
/// The tables are built once, when the grid level is constructed, and are
/// read-only afterwards.
///
#[derive(Clone, Debug)]
pub struct ReferenceCube<const DIM: usize> {
    sub_ids: Vec<Vec<MultiIndex<DIM>>>,
}




// ============================================================================
impl<const DIM: usize> ReferenceCube<DIM> {

    pub fn new() -> Self {
        let sub_ids = (0..=DIM)
            .map(|codim| {
                (0..num_sub_entities(DIM, codim))
                    .map(|i| {
                        let mut id = MultiIndex::zero();
                        sub_id(DIM, codim, i, &mut id);
                        id
                    })
                    .collect()
            })
            .collect();
        Self { sub_ids }
    }

    /// Return the number of sub-entities of the given codimension.
    pub fn count(&self, codim: usize) -> usize {
        self.sub_ids[codim].len()
    }

    /// Return the offset of sub-entity `i` of the given codimension. Adding
    /// it to the multi-index of a cell yields the sub-entity's multi-index.
    pub fn sub_id(&self, codim: usize, i: usize) -> &MultiIndex<DIM> {
        debug_assert!(i < self.count(codim), "sub-entity {} of codim {} out of range", i, codim);
        &self.sub_ids[codim][i]
    }

    pub fn sub_ids(&self, codim: usize) -> &[MultiIndex<DIM>] {
        &self.sub_ids[codim]
    }

    /// Return the axis and the sign (-1 or +1) of the outer normal of face
    /// `i`.
    pub fn face_normal(&self, i: usize) -> (usize, i64) {
        debug_assert!(i < 2 * DIM);
        (i / 2, 2 * (i & 1) as i64 - 1)
    }

    pub fn num_corners(&self) -> usize {
        1 << DIM
    }

    pub fn num_faces(&self) -> usize {
        2 * DIM
    }
}

impl<const DIM: usize> Default for ReferenceCube<DIM> {
    fn default() -> Self {
        Self::new()
    }
}




/// Number of codimension-`codim` sub-entities of a `dimension`-dimensional
/// cube.
pub fn num_sub_entities(dimension: usize, codim: usize) -> usize {
    assert!(codim <= dimension);

    if codim == 0 {
        return 1;
    }
    let n0 = if codim < dimension { num_sub_entities(dimension - 1, codim) } else { 0 };
    let n1 = num_sub_entities(dimension - 1, codim - 1);
    n0 + 2 * n1
}

/// Sub-entities of the `dimension`-cube either extend along the last axis,
/// and are then the sub-entities of the same codimension of the lower cube,
/// or sit on its lower or upper layer, and are then the sub-entities of one
/// codimension less of the lower cube.
fn sub_id<const DIM: usize>(dimension: usize, codim: usize, i: usize, id: &mut MultiIndex<DIM>) {
    if dimension == 0 {
        return;
    }
    let n0 = if codim < dimension { num_sub_entities(dimension - 1, codim) } else { 0 };

    if i < n0 {
        sub_id(dimension - 1, codim, i, id);
        id[dimension - 1] = 0;
    } else {
        let n1 = num_sub_entities(dimension - 1, codim - 1);
        sub_id(dimension - 1, codim - 1, (i - n0) % n1, id);
        id[dimension - 1] = 2 * ((i - n0) / n1) as i64 - 1;
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::{ReferenceCube, num_sub_entities};
    use crate::multi_index::MultiIndex;

    #[test]
    fn sub_entity_counts_match_the_cube() {
        assert_eq!(num_sub_entities(1, 1), 2);
        assert_eq!(num_sub_entities(2, 1), 4);
        assert_eq!(num_sub_entities(2, 2), 4);
        assert_eq!(num_sub_entities(3, 1), 6);
        assert_eq!(num_sub_entities(3, 2), 12);
        assert_eq!(num_sub_entities(3, 3), 8);
    }

    #[test]
    fn faces_are_numbered_minus_then_plus_per_axis() {
        let cube = ReferenceCube::<2>::new();
        let faces: Vec<[i64; 2]> = cube.sub_ids(1).iter().map(|&id| id.into()).collect();
        assert_eq!(faces, vec![[-1, 0], [1, 0], [0, -1], [0, 1]]);
        assert_eq!(cube.face_normal(0), (0, -1));
        assert_eq!(cube.face_normal(3), (1, 1));
    }

    #[test]
    fn corners_count_with_axis_zero_fastest() {
        let cube = ReferenceCube::<2>::new();
        let corners: Vec<[i64; 2]> = cube.sub_ids(2).iter().map(|&id| id.into()).collect();
        assert_eq!(corners, vec![[-1, -1], [1, -1], [-1, 1], [1, 1]]);
        assert_eq!(cube.count(2), cube.num_corners());
    }

    #[test]
    fn sub_entities_have_the_requested_codimension() {
        let cube = ReferenceCube::<3>::new();
        let cell = MultiIndex::new([3, 5, 1]);

        for codim in 0..=3 {
            for offset in cube.sub_ids(codim) {
                assert!(offset.iter().all(|x| (-1..=1).contains(x)));
                assert_eq!((cell + *offset).codimension(), codim);
            }
        }
        assert_eq!(*cube.sub_id(0, 0), MultiIndex::zero());
        assert_eq!(cube.count(1), cube.num_faces());
    }
}
