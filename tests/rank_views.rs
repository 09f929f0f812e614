use std::collections::{BTreeMap, HashMap};
use cartgrid::{DecompositionTree, EntityPartition, GridDescription, GridLevel, MultiIndex, PartitionKind};




fn levels<const DIM: usize>(description: &GridDescription) -> Vec<GridLevel<DIM>> {
    let tree = description.decomposition::<DIM>().unwrap();
    GridLevel::build_all(&tree, description.overlap).unwrap()
}




#[test]
fn every_cell_is_interior_to_exactly_one_rank() {
    let description = GridDescription::new("cube", MultiIndex::new([6, 5, 4]), 7, 0b001, 1);
    let levels = levels::<3>(&description);
    let mut owners = BTreeMap::new();

    for level in &levels {
        for id in level.sweep(PartitionKind::Interior, 0, 0) {
            assert!(owners.insert(id, level.rank()).is_none(), "cell {} visited twice", id);
        }
    }
    assert_eq!(owners.len(), 6 * 5 * 4);

    for (id, rank) in &owners {
        let cell = id.map(|x| x >> 1);
        assert_eq!(levels[0].owner_of_cell(&cell), Some(*rank));
    }
}




#[test]
fn ghost_cells_match_a_neighbors_interior() {
    let description = GridDescription::new("slab", MultiIndex::new([12, 8]), 4, 0b11, 2);
    let levels = levels::<2>(&description);
    let cells = MultiIndex::new([12, 8]);

    for level in &levels {
        for item in level.partition(PartitionKind::Ghost) {
            let remote = &levels[item.owner];
            for cell in item.partition.cells() {
                let wrapped = cell.zip_with(&cells, i64::rem_euclid);
                assert!(remote.interior_mesh().contains(&wrapped));
            }
        }
    }
}




#[test]
fn local_entities_are_classified_consistently() {
    let description = GridDescription::new("plane", MultiIndex::new([8, 6]), 3, 0b00, 1);

    for level in levels::<2>(&description) {
        let index_set = level.index_set();
        let mut counts = HashMap::new();

        for codim in 0..=2 {
            for id in level.sweep(PartitionKind::All, codim, 0b10) {
                assert!(index_set.index(&id) < index_set.size(codim));
                *counts.entry(level.entity_partition(&id)).or_insert(0) += 1;
            }
        }
        assert!(!counts.contains_key(&EntityPartition::Exterior));
        assert!(counts[&EntityPartition::Border] > 0);
        assert!(counts[&EntityPartition::Overlap] > 0);
    }
}




#[test]
fn saved_description_reproduces_every_rank() {
    let path = std::env::temp_dir().join(format!("cartgrid-{}.cbor", std::process::id()));
    let description = GridDescription::new("saved", MultiIndex::new([9, 7]), 5, 0b01, 2);
    description.save(&path).unwrap();

    let loaded = GridDescription::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let a = levels::<2>(&description);
    let b = levels::<2>(&loaded);

    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.local_mesh(), y.local_mesh());
        assert_eq!(x.partition(PartitionKind::Ghost), y.partition(PartitionKind::Ghost));
    }
}




#[test]
fn neighbor_graph_agrees_with_ghost_owners() {
    let tree = DecompositionTree::new(MultiIndex::new([10, 10]), 6, 0b10);
    let graph = GridLevel::neighbor_graph(&tree, 1);

    for level in GridLevel::build_all(&tree, 1).unwrap() {
        for item in level.partition(PartitionKind::Ghost) {
            if item.owner != level.rank() {
                assert!(graph.contains(&item.owner, &level.rank()));
            }
        }
    }
    assert!(graph.is_symmetric());
}
