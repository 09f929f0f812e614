/// Interface for the group of processes sharing one decomposed grid. The
/// grid only needs to know its own place in the group; exchanging ghost
/// data is left to the transport behind the implementation.
///
pub trait Communicator {
    /// Must be implemented to return the rank of this process within the
    /// communicator.
    fn rank(&self) -> usize;

    /// Must be implemented to return the number of peer processes in this
    /// communicator.
    fn size(&self) -> usize;
}




/// A communicator for a program running on a single process.
///
#[derive(Clone, Copy, Debug, Default)]
pub struct SerialCommunicator;

impl Communicator for SerialCommunicator {
    fn rank(&self) -> usize {
        0
    }

    fn size(&self) -> usize {
        1
    }
}




/// A communicator with a fixed rank and size. It stands in for one member
/// of a group when every rank's view is computed in a single process, for
/// example to inspect or test a decomposition.
///
#[derive(Clone, Copy, Debug)]
pub struct StaticCommunicator {
    rank: usize,
    size: usize,
}

impl StaticCommunicator {
    pub fn new(rank: usize, size: usize) -> Self {
        assert!(rank < size, "rank {} out of range for {} ranks", rank, size);
        Self { rank, size }
    }
}

impl Communicator for StaticCommunicator {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::{Communicator, SerialCommunicator, StaticCommunicator};

    #[test]
    fn serial_communicator_is_a_group_of_one() {
        assert_eq!(SerialCommunicator.rank(), 0);
        assert_eq!(SerialCommunicator.size(), 1);
    }

    #[test]
    #[should_panic]
    fn static_communicator_rejects_rank_out_of_range() {
        StaticCommunicator::new(4, 4);
    }
}
