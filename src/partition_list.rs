use core::iter::FromIterator;
use std::fmt;
use crate::multi_index::MultiIndex;
use crate::partition::Partition;




/// A partition tagged with the number of the rank owning it.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RankPartition<const DIM: usize> {
    pub partition: Partition<DIM>,
    pub owner: usize,
}




/// An ordered sequence of partitions forming one named region of a grid
/// level, for example the interior of a rank, or the pieces of its ghost
/// region owned by each of its neighbors. Elements are appended during
/// construction and only read afterwards. Elements are not required to be
/// disjoint; periodic images may overlap in index space.
///
/// Queries are linear in the number of elements, which is proportional to
/// the number of neighbors of a rank rather than to the grid size.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionList<const DIM: usize> {
    items: Vec<RankPartition<DIM>>,
}




// ============================================================================
impl<const DIM: usize> PartitionList<DIM> {

    pub fn new() -> Self {
        Self::default()
    }

    /// Append a partition owned by the given rank.
    pub fn push(&mut self, partition: Partition<DIM>, owner: usize) {
        self.items.push(RankPartition { partition, owner })
    }

    /// Return the number of partitions in the list.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RankPartition<DIM>> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankPartition<DIM>> {
        self.items.iter()
    }

    /// Return an iterator over the partitions, without their owners.
    pub fn partitions(&self) -> impl Iterator<Item = &Partition<DIM>> {
        self.items.iter().map(|item| &item.partition)
    }

    /// Return the total number of cells in the list, counting overlapping
    /// elements multiple times.
    pub fn volume(&self) -> i64 {
        self.partitions().map(|p| p.volume()).sum()
    }

    /// Determine whether some partition in the list contains the entity
    /// `id`. The first partition found is expected to be owned by `owner`;
    /// this is checked in debug builds. An entity absent from every
    /// partition is an ordinary outcome, not an error.
    pub fn contains(&self, id: &MultiIndex<DIM>, owner: usize) -> bool {
        match self.find(id) {
            Some(item) => {
                debug_assert_eq!(
                    item.owner, owner,
                    "entity {} found in a partition owned by {}, not {}", id, item.owner, owner);
                true
            }
            None => false,
        }
    }

    /// Return the owner of the first partition containing the entity `id`.
    pub fn owner_of(&self, id: &MultiIndex<DIM>) -> Option<usize> {
        self.find(id).map(|item| item.owner)
    }

    fn find(&self, id: &MultiIndex<DIM>) -> Option<&RankPartition<DIM>> {
        self.items.iter().find(|item| item.partition.contains_entity(id))
    }
}




// ============================================================================
impl<const DIM: usize> Default for PartitionList<DIM> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<'a, const DIM: usize> IntoIterator for &'a PartitionList<DIM> {
    type Item = &'a RankPartition<DIM>;
    type IntoIter = std::slice::Iter<'a, RankPartition<DIM>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<const DIM: usize> FromIterator<(Partition<DIM>, usize)> for PartitionList<DIM> {
    fn from_iter<I: IntoIterator<Item = (Partition<DIM>, usize)>>(iter: I) -> Self {
        let mut result = Self::new();

        for (partition, owner) in iter {
            result.push(partition, owner);
        }
        result
    }
}

impl<const DIM: usize> fmt::Display for PartitionList<DIM> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}@{}", item.partition, item.owner)?;
        }
        Ok(())
    }
}
