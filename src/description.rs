use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use log::info;
use serde::{Deserialize, Serialize};
use crate::decomposition::DecompositionTree;
use crate::error::{Error, Result};
use crate::multi_index::MultiIndex;




/**
 * The persisted parameters of a decomposed grid: exactly the inputs two
 * independently started programs need to rebuild identical partitions. The
 * dimension is not stored separately; it is the length of `cells`, and is
 * checked whenever the description is turned back into typed values.
 */
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDescription {
    pub name: String,
    pub cells: Vec<i64>,
    pub overlap: i64,
    pub periodic: Vec<usize>,
    pub ranks: usize,
}




// ============================================================================
impl GridDescription {




    /**
     * Create a description from typed values. Bit `i` of `periodic` marks
     * axis `i` as periodic.
     */
    pub fn new<const DIM: usize>(
        name: &str,
        cells: MultiIndex<DIM>,
        ranks: usize,
        periodic: u32,
        overlap: i64) -> Self
    {
        Self {
            name: name.to_string(),
            cells: cells.iter().cloned().collect(),
            overlap,
            periodic: (0..DIM).filter(|i| (periodic >> i) & 1 == 1).collect(),
            ranks,
        }
    }


    /**
     * Return the number of axes of the described grid.
     */
    pub fn dimension(&self) -> usize {
        self.cells.len()
    }


    /**
     * Return the cell counts as a multi-index, failing if the description
     * has a different number of axes.
     */
    pub fn cells<const DIM: usize>(&self) -> Result<MultiIndex<DIM>> {
        if self.cells.len() != DIM {
            return Err(Error::DimensionMismatch { expected: DIM, found: self.cells.len() });
        }
        let mut cells = MultiIndex::zero();

        for (i, &n) in self.cells.iter().enumerate() {
            cells[i] = n;
        }
        Ok(cells)
    }


    /**
     * Return the periodic axes as a bitmask.
     */
    pub fn periodic_mask<const DIM: usize>(&self) -> Result<u32> {
        let mut mask = 0;

        for &axis in &self.periodic {
            if axis >= DIM {
                return Err(Error::InvalidPeriodicAxis { axis, dimension: DIM });
            }
            mask |= 1 << axis;
        }
        Ok(mask)
    }


    pub fn validate<const DIM: usize>(&self) -> Result<()> {
        let cells = self.cells::<DIM>()?;
        let mask = self.periodic_mask::<DIM>()?;

        if self.ranks == 0 {
            return Err(Error::InvalidDescription("at least one rank is required".to_string()));
        }
        if cells.iter().any(|&n| n < 0) {
            return Err(Error::InvalidDescription(format!("negative cell count {}", cells)));
        }
        if self.overlap < 0 {
            return Err(Error::InvalidDescription(format!("negative overlap {}", self.overlap)));
        }
        for i in 0..DIM {
            if (mask >> i) & 1 == 1 && self.overlap > cells[i] {
                return Err(Error::InvalidDescription(format!(
                    "overlap {} exceeds {} cells on periodic axis {}",
                    self.overlap, cells[i], i)));
            }
        }
        Ok(())
    }


    /**
     * Validate the description and build its decomposition tree.
     */
    pub fn decomposition<const DIM: usize>(&self) -> Result<DecompositionTree<DIM>> {
        self.validate::<DIM>()?;
        Ok(DecompositionTree::new(self.cells()?, self.ranks, self.periodic_mask::<DIM>()?))
    }


    pub fn write_cbor<W: Write>(&self, writer: W) -> Result<()> {
        ciborium::ser::into_writer(self, writer).map_err(|e| Error::Encode(format!("{:?}", e)))
    }


    pub fn read_cbor<R: Read>(reader: R) -> Result<Self> {
        ciborium::de::from_reader(reader).map_err(|e| Error::Decode(format!("{:?}", e)))
    }


    /**
     * Write the description to a CBOR file.
     */
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut buffer = BufWriter::new(File::create(path.as_ref())?);
        self.write_cbor(&mut buffer)?;
        buffer.flush()?;
        info!("saved grid description '{}' to {}", self.name, path.as_ref().display());
        Ok(())
    }


    /**
     * Read a description from a CBOR file.
     */
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let description = Self::read_cbor(BufReader::new(File::open(path.as_ref())?))?;
        info!("loaded grid description '{}' from {}", description.name, path.as_ref().display());
        Ok(description)
    }
}
