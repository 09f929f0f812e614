use crate::multi_index::MultiIndex;




/// Bitmask selecting, per axis, whether an entity spans the axis (bit set,
/// odd component) or sits on a vertex layer of it (bit clear, even
/// component). The number of set bits is the entity's own dimension; every
/// consumer that needs the codimension of a direction goes through this
/// type so the parity convention is decided in one place.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Direction<const DIM: usize>(u32);




// ============================================================================
impl<const DIM: usize> Direction<DIM> {

    /// The number of distinct directions, `2^DIM`.
    pub const COUNT: u32 = 1 << DIM;

    pub fn new(bits: u32) -> Self {
        debug_assert!(bits < Self::COUNT, "direction {:#b} out of range", bits);
        Self(bits)
    }

    /// Return the direction of the entity addressed by `id`.
    pub fn of(id: &MultiIndex<DIM>) -> Self {
        let mut bits = 0;
        for i in 0..DIM {
            bits |= ((id[i] & 1) as u32) << i;
        }
        Self(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    /// Return 1 if the entity spans the given axis, 0 otherwise.
    pub fn bit(self, axis: usize) -> i64 {
        ((self.0 >> axis) & 1) as i64
    }

    pub fn spans(self, axis: usize) -> bool {
        self.bit(axis) == 1
    }

    pub fn mydimension(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn codimension(self) -> usize {
        DIM - self.mydimension()
    }

    /// Iterate over every direction in increasing bitmask order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(Self)
    }

    /// Iterate over the directions of entities with the given codimension,
    /// in increasing bitmask order.
    pub fn with_codimension(codim: usize) -> impl Iterator<Item = Self> {
        Self::all().filter(move |d| d.codimension() == codim)
    }

    /// Return the lowest direction with the given codimension.
    pub fn first_with_codimension(codim: usize) -> Option<Self> {
        Self::with_codimension(codim).next()
    }

    /// Return the next larger direction with the same codimension as this
    /// one, if any.
    pub fn next_sibling(self) -> Option<Self> {
        let mydim = self.mydimension();
        (self.0 + 1..Self::COUNT)
            .map(Self)
            .find(|d| d.mydimension() == mydim)
    }
}
