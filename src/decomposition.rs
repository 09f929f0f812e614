use log::debug;
use crate::multi_index::MultiIndex;
use crate::partition::Partition;




/**
 * A node in the decomposition tree. Leaves are assigned to exactly one rank;
 * internal nodes own exactly two children whose partitions tile their own.
 */
#[derive(Clone, Debug)]
struct Node<const DIM: usize> {
    partition: Partition<DIM>,
    size: usize,
    children: Option<Box<[Node<DIM>; 2]>>,
}




// ============================================================================
impl<const DIM: usize> Node<DIM> {




    /**
     * Recursively split the given partition among `size` ranks, along its
     * longest axis. The left child receives `size - size / 2` ranks and a
     * proportional (rounded-down) share of the cells on the split axis; the
     * right child receives the rest.
     */
    fn new(partition: Partition<DIM>, size: usize) -> Self {
        if size <= 1 {
            return Self { partition, size, children: None };
        }

        let width = *partition.width();
        let axis = width.argmax();
        let lsize = size - size / 2;
        let rsize = size / 2;

        let mut lwidth = width;
        lwidth[axis] = (lsize as i64 * width[axis]) / size as i64;
        let mut rwidth = width;
        rwidth[axis] -= lwidth[axis];

        let lorigin = *partition.origin();
        let mut rorigin = lorigin;
        rorigin[axis] += lwidth[axis];

        debug!(
            "split {} among {} ranks along axis {}: {} + {} cells",
            partition, size, axis, lwidth[axis], rwidth[axis]);

        let l = Self::new(Partition::new(lorigin, lwidth), lsize);
        let r = Self::new(Partition::new(rorigin, rwidth), rsize);

        Self { partition, size, children: Some(Box::new([l, r])) }
    }




    /**
     * Return the leaf partition assigned to the given rank, relative to this
     * sub-tree.
     */
    fn leaf(&self, rank: usize) -> &Partition<DIM> {
        match &self.children {
            Some(children) => {
                let [l, r] = &**children;
                if rank < l.size {
                    l.leaf(rank)
                } else {
                    r.leaf(rank - l.size)
                }
            }
            None => &self.partition,
        }
    }




    /**
     * Return the rank (relative to this sub-tree) whose leaf contains the
     * given cell. The cell must be contained in this node's partition.
     */
    fn rank_of(&self, cell: &MultiIndex<DIM>) -> usize {
        match &self.children {
            Some(children) => {
                let [l, r] = &**children;
                if l.partition.contains(cell) {
                    l.rank_of(cell)
                } else {
                    l.size + r.rank_of(cell)
                }
            }
            None => 0,
        }
    }




    /**
     * Append the leaf partitions of this sub-tree, in rank order.
     */
    fn collect_leaves(&self, leaves: &mut Vec<Partition<DIM>>) {
        match &self.children {
            Some(children) => {
                children[0].collect_leaves(leaves);
                children[1].collect_leaves(leaves);
            }
            None => leaves.push(self.partition),
        }
    }




    /**
     * Return the number of levels below and including this node.
     */
    fn depth(&self) -> usize {
        self.children
            .as_ref()
            .map_or(0, |c| c[0].depth().max(c[1].depth())) + 1
    }
}




/**
 * A static binary space partition of the global cell box among a fixed
 * number of ranks. The tree depends only on `(width, size)`, so every rank
 * can rebuild it and look up any other rank's partition without
 * communication.
 */
#[derive(Clone, Debug)]
pub struct DecompositionTree<const DIM: usize> {
    root: Node<DIM>,
    periodic: u32,
}




// ============================================================================
impl<const DIM: usize> DecompositionTree<DIM> {


    /**
     * Build the decomposition of the box `[0, width)` among `size` ranks.
     * Bit `i` of `periodic` marks axis `i` as wrapping around.
     */
    pub fn new(width: MultiIndex<DIM>, size: usize, periodic: u32) -> Self {
        assert!(size >= 1, "decomposition requires at least one rank");
        debug!("decompose {} cells among {} ranks (periodic {:#b})", width, size, periodic);

        Self {
            root: Node::new(Partition::from_width(width), size),
            periodic,
        }
    }


    /**
     * Return the number of ranks (leaves).
     */
    pub fn size(&self) -> usize {
        self.root.size
    }


    /**
     * Return the global cell counts.
     */
    pub fn width(&self) -> &MultiIndex<DIM> {
        self.root.partition.width()
    }


    /**
     * Return the periodicity bitmask.
     */
    pub fn periodic(&self) -> u32 {
        self.periodic
    }


    pub fn is_periodic(&self, axis: usize) -> bool {
        (self.periodic >> axis) & 1 == 1
    }


    /**
     * Return the global partition, `[0, width)`.
     */
    pub fn global_partition(&self) -> &Partition<DIM> {
        &self.root.partition
    }


    /**
     * Return the number of levels in the tree.
     */
    pub fn depth(&self) -> usize {
        self.root.depth()
    }


    /**
     * Return the partition of the given rank grown by `overlap` cells. The
     * growth is clipped against the global partition, itself grown along the
     * periodic axes only: overlap extends past a periodic boundary (into the
     * periodic image) but never past a non-periodic domain edge.
     *
     * Panics if `rank >= self.size()`.
     */
    pub fn partition_for_rank(&self, rank: usize, overlap: i64) -> Partition<DIM> {
        assert!(rank < self.size(), "rank {} out of range for {} ranks", rank, self.size());

        let leaf = self.root.leaf(rank).grow_all(overlap);
        let all = self.root.partition.grow(overlap, self.periodic);
        leaf.intersect(&all)
    }


    /**
     * Return the partitions of all ranks, in rank order.
     */
    pub fn partitions(&self, overlap: i64) -> Vec<Partition<DIM>> {
        (0..self.size())
            .map(|rank| self.partition_for_rank(rank, overlap))
            .collect()
    }


    /**
     * Return the un-grown leaf partitions, in rank order.
     */
    pub fn leaves(&self) -> Vec<Partition<DIM>> {
        let mut leaves = Vec::with_capacity(self.size());
        self.root.collect_leaves(&mut leaves);
        leaves
    }


    /**
     * Return the rank owning the given cell, or `None` if the cell lies
     * outside the global partition.
     */
    pub fn rank_of(&self, cell: &MultiIndex<DIM>) -> Option<usize> {
        if self.root.partition.contains(cell) {
            Some(self.root.rank_of(cell))
        } else {
            None
        }
    }
}
