use log::{debug, info};
use rayon::prelude::*;
use crate::adjacency_list::AdjacencyList;
use crate::comm::{Communicator, StaticCommunicator};
use crate::decomposition::DecompositionTree;
use crate::error::{Error, Result};
use crate::index_set::IndexSet;
use crate::multi_index::MultiIndex;
use crate::partition::Partition;
use crate::partition_list::PartitionList;
use crate::reference_cube::ReferenceCube;
use crate::super_entity::{SuperEntityIter, SuperEntityTable};
use crate::sweep::SweepIterator;




/// Selects one of the regions a grid level keeps for its rank.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartitionKind {
    /// The rank's own leaf of the decomposition.
    Interior,
    /// The pieces of the local mesh owned by other ranks (or by periodic
    /// images of this one).
    Ghost,
    /// The whole local mesh, interior plus overlap.
    All,
}




/// Classifies an entity relative to the partitions of one rank.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityPartition {
    /// Inside the rank's leaf, or on a face of it which is a non-periodic
    /// domain boundary.
    Interior,
    /// On a face of the rank's leaf shared with another rank, or with a
    /// periodic image.
    Border,
    /// In the local mesh, outside the rank's leaf.
    Overlap,
    /// Outside the local mesh.
    Exterior,
}




/**
 * One rank's view of a decomposed grid level. It holds the decomposition,
 * the rank's leaf and local mesh, the partition lists the sweep iterator
 * walks, and the lookup tables (index set, reference cube, super-entity
 * table) built once for the level.
 *
 * A grid level is computed from the decomposition alone; two processes
 * given the same tree, rank and overlap produce identical levels.
 */
#[derive(Clone, Debug)]
pub struct GridLevel<const DIM: usize> {
    tree: DecompositionTree<DIM>,
    rank: usize,
    overlap: i64,
    leaf: Partition<DIM>,
    local_mesh: Partition<DIM>,
    interior: PartitionList<DIM>,
    ghost: PartitionList<DIM>,
    all: PartitionList<DIM>,
    index_set: IndexSet<DIM>,
    reference_cube: ReferenceCube<DIM>,
    super_entities: SuperEntityTable<DIM>,
}




// ============================================================================
impl<const DIM: usize> GridLevel<DIM> {




    /**
     * Build the view of the rank given by the communicator. Fails if the
     * communicator and the decomposition disagree on the number of ranks, if
     * the overlap is negative, or if it exceeds the global width of a periodic
     * axis (ghosts are taken from the nearest periodic image only).
     */
    pub fn new<C: Communicator>(tree: &DecompositionTree<DIM>, comm: &C, overlap: i64) -> Result<Self> {
        if comm.size() != tree.size() {
            return Err(Error::SizeMismatch { expected: tree.size(), found: comm.size() });
        }
        if overlap < 0 {
            return Err(Error::InvalidDescription(format!("negative overlap {}", overlap)));
        }
        for i in 0..DIM {
            if tree.is_periodic(i) && overlap > tree.width()[i] {
                return Err(Error::InvalidDescription(format!(
                    "overlap {} exceeds {} cells on periodic axis {}",
                    overlap, tree.width()[i], i)));
            }
        }
        let rank = comm.rank();
        let leaf = tree.partition_for_rank(rank, 0);
        let local_mesh = tree.partition_for_rank(rank, overlap);

        let mut interior = PartitionList::new();
        interior.push(leaf, rank);

        let mut all = PartitionList::new();
        all.push(local_mesh, rank);

        let ghost = ghost_partitions(tree, rank, &local_mesh);

        debug!(
            "rank {}: interior {} local {} ghost [{}]",
            rank, leaf, local_mesh, ghost);

        Ok(Self {
            tree: tree.clone(),
            rank,
            overlap,
            leaf,
            local_mesh,
            interior,
            ghost,
            all,
            index_set: IndexSet::new(&local_mesh),
            reference_cube: ReferenceCube::new(),
            super_entities: SuperEntityTable::new(),
        })
    }




    /**
     * Build the views of every rank of the decomposition, in rank order. The
     * views are independent of one another and are constructed in parallel.
     */
    pub fn build_all(tree: &DecompositionTree<DIM>, overlap: i64) -> Result<Vec<Self>> {
        let size = tree.size();
        info!("building {} rank views with overlap {}", size, overlap);

        (0..size)
            .into_par_iter()
            .map(|rank| Self::new(tree, &StaticCommunicator::new(rank, size), overlap))
            .collect()
    }




    /**
     * Return the graph with an edge a -> b whenever rank a owns part of the
     * ghost region of rank b: the data rank b must receive from rank a.
     * Periodic self-images do not produce edges.
     */
    pub fn neighbor_graph(tree: &DecompositionTree<DIM>, overlap: i64) -> AdjacencyList<usize> {
        let mut graph = AdjacencyList::new();

        for rank in 0..tree.size() {
            let local_mesh = tree.partition_for_rank(rank, overlap);
            for item in &ghost_partitions(tree, rank, &local_mesh) {
                if item.owner != rank {
                    graph.insert(item.owner, rank);
                }
            }
        }
        graph
    }


    /// Return the global number of cells along each axis.
    pub fn cells(&self) -> &MultiIndex<DIM> {
        self.tree.width()
    }

    pub fn periodic(&self) -> u32 {
        self.tree.periodic()
    }

    pub fn is_periodic(&self, axis: usize) -> bool {
        self.tree.is_periodic(axis)
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Return the number of ranks sharing the grid.
    pub fn size(&self) -> usize {
        self.tree.size()
    }

    pub fn overlap(&self) -> i64 {
        self.overlap
    }

    pub fn decomposition(&self) -> &DecompositionTree<DIM> {
        &self.tree
    }

    /// Return the partition covering the whole domain.
    pub fn global_mesh(&self) -> &Partition<DIM> {
        self.tree.global_partition()
    }

    /// Return this rank's leaf grown by the overlap, and clipped at
    /// non-periodic domain edges.
    pub fn local_mesh(&self) -> &Partition<DIM> {
        &self.local_mesh
    }

    pub fn interior_mesh(&self) -> &Partition<DIM> {
        &self.leaf
    }

    pub fn partition(&self, kind: PartitionKind) -> &PartitionList<DIM> {
        match kind {
            PartitionKind::Interior => &self.interior,
            PartitionKind::Ghost => &self.ghost,
            PartitionKind::All => &self.all,
        }
    }

    pub fn index_set(&self) -> &IndexSet<DIM> {
        &self.index_set
    }

    pub fn reference_cube(&self) -> &ReferenceCube<DIM> {
        &self.reference_cube
    }




    /**
     * Return an iterator over the entities of the given codimension in one of
     * this rank's regions. Bit `i` of `sweep` walks axis `i` from high to
     * low.
     */
    pub fn sweep(&self, kind: PartitionKind, codim: usize, sweep: u32) -> SweepIterator<'_, DIM> {
        SweepIterator::begin(self.partition(kind), codim, sweep)
    }




    /**
     * Return an iterator over the cells of the local mesh adjacent to the
     * given entity.
     */
    pub fn super_entities(&self, id: &MultiIndex<DIM>) -> SuperEntityIter<'_, DIM> {
        self.super_entities.iter(id, &self.local_mesh)
    }




    /**
     * Return the rank owning the given cell. Along periodic axes the cell is
     * first mapped into the domain; along other axes a cell outside the
     * domain has no owner.
     */
    pub fn owner_of_cell(&self, cell: &MultiIndex<DIM>) -> Option<usize> {
        let cells = self.cells();
        let mut wrapped = *cell;

        for i in 0..DIM {
            if self.is_periodic(i) && cells[i] > 0 {
                wrapped[i] = cell[i].rem_euclid(cells[i]);
            }
        }
        self.tree.rank_of(&wrapped)
    }




    /**
     * Classify an entity relative to this rank's partitions.
     */
    pub fn entity_partition(&self, id: &MultiIndex<DIM>) -> EntityPartition {
        if !self.local_mesh.contains_entity(id) {
            return EntityPartition::Exterior;
        }
        if self.leaf.empty() || !self.leaf.contains_entity(id) {
            return EntityPartition::Overlap;
        }
        let begin = self.leaf.entity_begin();
        let end = self.leaf.entity_end();
        let global_begin = self.global_mesh().entity_begin();
        let global_end = self.global_mesh().entity_end();

        for i in 0..DIM {
            let on_domain_boundary = !self.is_periodic(i) && (
                (id[i] == begin[i] && begin[i] == global_begin[i]) ||
                (id[i] == end[i] && end[i] == global_end[i]));

            if (id[i] == begin[i] || id[i] == end[i]) && !on_domain_boundary {
                return EntityPartition::Border;
            }
        }
        EntityPartition::Interior
    }
}




/**
 * Collect the pieces of `local_mesh` owned by other ranks, or by periodic
 * images of any rank, in rank order. Only the nearest periodic image along
 * each periodic axis is considered, so the overlap must not exceed the
 * global width.
 */
fn ghost_partitions<const DIM: usize>(
    tree: &DecompositionTree<DIM>,
    rank: usize,
    local_mesh: &Partition<DIM>) -> PartitionList<DIM>
{
    let width = *tree.width();
    let shifts = periodic_shifts::<DIM>(tree.periodic());
    let mut ghost = PartitionList::new();

    for (owner, leaf) in tree.leaves().iter().enumerate() {
        for shift in &shifts {
            if owner == rank && *shift == MultiIndex::zero() {
                continue;
            }
            let image = leaf.translate(&shift.zip_with(&width, |s, w| s * w));
            let piece = local_mesh.intersect(&image);

            if !piece.empty() {
                ghost.push(piece, owner);
            }
        }
    }
    ghost
}




/**
 * Return every combination of -1, 0, +1 along the periodic axes (and 0
 * along the others), axis 0 varying fastest.
 */
fn periodic_shifts<const DIM: usize>(periodic: u32) -> Vec<MultiIndex<DIM>> {
    let mut shifts = Vec::new();

    for code in 0..3usize.pow(DIM as u32) {
        let mut shift = MultiIndex::zero();
        let mut c = code;

        for i in 0..DIM {
            shift[i] = (c % 3) as i64 - 1;
            c /= 3;
        }
        if (0..DIM).all(|i| shift[i] == 0 || (periodic >> i) & 1 == 1) {
            shifts.push(shift);
        }
    }
    shifts
}
