use core::iter::FusedIterator;
use core::ops::Deref;
use crate::direction::Direction;
use crate::multi_index::MultiIndex;
use crate::partition::Partition;
use crate::partition_list::PartitionList;




/**
 * Enumerates every entity of one codimension contained in a partition list.
 * The traversal is a state machine over three coordinates: the position in
 * the partition list, the current direction (which axes the entity spans),
 * and the multi-index within the rectangular range of that direction in the
 * current partition. Empty partitions are skipped.
 *
 * Bit `i` of the sweep mask selects whether axis `i` is walked from the low
 * bound to the high bound (bit clear) or the reverse (bit set). The sweep
 * mask reorders the traversal but never changes the set of visited entities.
 *
 * Entities on the shared boundary of two partitions in the list are visited
 * once per partition.
 */
#[derive(Clone, Debug)]
pub struct SweepIterator<'a, const DIM: usize> {
    list: &'a PartitionList<DIM>,
    partition: usize,
    direction: Direction<DIM>,
    id: MultiIndex<DIM>,
    mydimension: usize,
    sweep: u32,
}




// ============================================================================
impl<'a, const DIM: usize> SweepIterator<'a, DIM> {




    /**
     * Create an iterator positioned at the first entity of the given
     * codimension in the list, or at the end if there is none.
     */
    pub fn begin(list: &'a PartitionList<DIM>, codim: usize, sweep: u32) -> Self {
        let mut iter = Self::new(list, codim, sweep, 0);
        iter.init();
        iter
    }




    /**
     * Create an iterator positioned past the last entity.
     */
    pub fn end(list: &'a PartitionList<DIM>, codim: usize, sweep: u32) -> Self {
        let mut iter = Self::new(list, codim, sweep, list.len());
        iter.init();
        iter
    }




    fn new(list: &'a PartitionList<DIM>, codim: usize, sweep: u32, partition: usize) -> Self {
        assert!(codim <= DIM, "codimension {} exceeds dimension {}", codim, DIM);
        assert!(sweep < Direction::<DIM>::COUNT, "sweep mask {:#b} out of range", sweep);

        let direction = match Direction::first_with_codimension(codim) {
            Some(direction) => direction,
            None => unreachable!("every codimension up to DIM has a direction"),
        };

        Self {
            list,
            partition,
            direction,
            id: MultiIndex::max_value(),
            mydimension: DIM - codim,
            sweep,
        }
    }




    /**
     * Return the multi-index of the current entity. At the end, this is the
     * all-maximum sentinel.
     */
    pub fn current(&self) -> &MultiIndex<DIM> {
        &self.id
    }


    /**
     * Return the direction of the current entity.
     */
    pub fn direction(&self) -> Direction<DIM> {
        self.direction
    }


    /**
     * Return the position of the current partition within the list.
     */
    pub fn partition_index(&self) -> usize {
        self.partition
    }


    pub fn is_end(&self) -> bool {
        self.partition >= self.list.len()
    }


    pub fn codimension(&self) -> usize {
        DIM - self.mydimension
    }




    /**
     * Advance to the next entity. Axis 0 advances fastest; on overflow of
     * every axis the next direction with the same entity dimension is
     * started, and after the last direction the next non-empty partition.
     * Must not be called at the end.
     */
    pub fn increment(&mut self) {
        debug_assert!(!self.is_end(), "increment past the end of a sweep");

        let partition = match self.list.get(self.partition) {
            Some(item) => item.partition,
            None => return,
        };

        for i in 0..DIM {
            let s = self.sense(i);
            self.id[i] += 2 - 4 * s;
            if self.id[i] != self.bound_end(&partition, i, self.direction) {
                return;
            }
            self.id[i] = self.bound_begin(&partition, i, self.direction);
        }

        match self.direction.next_sibling() {
            Some(direction) => {
                self.direction = direction;
                self.id = self.first_id(&partition, direction);
            }
            None => {
                self.partition += 1;
                self.init();
            }
        }
    }




    /**
     * Position the iterator at the first entity of the current partition,
     * skipping empty partitions. Past the last partition, the multi-index is
     * set to the end sentinel.
     */
    fn init(&mut self) {
        while let Some(item) = self.list.get(self.partition) {
            if !item.partition.empty() {
                break;
            }
            self.partition += 1;
        }

        match self.list.get(self.partition) {
            Some(item) => {
                let first = Direction::all().find(|d| d.mydimension() == self.mydimension);
                if let Some(direction) = first {
                    self.direction = direction;
                    self.id = self.first_id(&item.partition, direction);
                }
            }
            None => {
                self.partition = self.list.len();
                self.id = MultiIndex::max_value();
            }
        }
    }




    fn first_id(&self, partition: &Partition<DIM>, direction: Direction<DIM>) -> MultiIndex<DIM> {
        let mut id = MultiIndex::zero();
        for i in 0..DIM {
            id[i] = self.bound_begin(partition, i, direction);
        }
        id
    }


    /**
     * 1 if axis `i` is swept from high to low, 0 otherwise.
     */
    fn sense(&self, i: usize) -> i64 {
        ((self.sweep >> i) & 1) as i64
    }


    /**
     * First value of component `i` for entities of the given direction. The
     * result is the lowest (or highest, sweeping backwards) value in the
     * partition's closure having the parity selected by the direction.
     */
    fn bound_begin(&self, partition: &Partition<DIM>, i: usize, direction: Direction<DIM>) -> i64 {
        let b = partition.entity_begin()[i];
        let e = partition.entity_end()[i];
        let s = self.sense(i);
        let d = direction.bit(i);
        (1 - s) * (b + ((b ^ d) & 1)) + s * (e - ((e ^ d) & 1))
    }


    /**
     * One step past the last value of component `i` for entities of the
     * given direction.
     */
    fn bound_end(&self, partition: &Partition<DIM>, i: usize, direction: Direction<DIM>) -> i64 {
        let b = partition.entity_begin()[i];
        let e = partition.entity_end()[i];
        let s = self.sense(i);
        let d = direction.bit(i);
        (1 - s) * (e + 2 - ((b ^ d) & 1)) + s * (b - 2 + ((e ^ d) & 1))
    }
}




// ============================================================================
impl<'a, const DIM: usize> PartialEq for SweepIterator<'a, DIM> {

    /**
     * Two iterators are equal when they point at the same entity; all
     * exhausted iterators compare equal regardless of their history.
     */
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<'a, const DIM: usize> Deref for SweepIterator<'a, DIM> {
    type Target = MultiIndex<DIM>;

    fn deref(&self) -> &Self::Target {
        &self.id
    }
}

impl<'a, const DIM: usize> Iterator for SweepIterator<'a, DIM> {
    type Item = MultiIndex<DIM>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_end() {
            None
        } else {
            let id = self.id;
            self.increment();
            Some(id)
        }
    }
}

impl<'a, const DIM: usize> FusedIterator for SweepIterator<'a, DIM> {}
