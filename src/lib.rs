//! Cartgrid is the addressing, decomposition, and traversal engine of a
//! structured, distributed Cartesian grid. Every geometric entity (vertex,
//! edge, face, cell) of a `DIM`-dimensional block-structured mesh is named by
//! a multi-index whose component parities encode the entity's codimension.
//! The global box of cells is split among a fixed number of ranks by a
//! deterministic binary decomposition tree, so any rank can recompute any
//! other rank's partition, including overlap and periodic ghost regions,
//! without communication. Sweep iterators visit the entities of one
//! codimension inside a list of partitions, and an index set maps them to
//! dense storage slots.

pub mod adjacency_list;
pub mod comm;
pub mod decomposition;
pub mod description;
pub mod direction;
pub mod error;
pub mod grid_level;
pub mod index_set;
pub mod multi_index;
pub mod partition;
pub mod partition_list;
pub mod reference_cube;
pub mod super_entity;
pub mod sweep;

pub use decomposition::DecompositionTree;
pub use description::GridDescription;
pub use error::{Error, Result};
pub use grid_level::{EntityPartition, GridLevel, PartitionKind};
pub use multi_index::MultiIndex;
pub use partition::Partition;
pub use partition_list::PartitionList;
pub use sweep::SweepIterator;
