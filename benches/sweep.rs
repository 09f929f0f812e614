use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cartgrid::index_set::IndexSet;
use cartgrid::multi_index::MultiIndex;
use cartgrid::partition::Partition;
use cartgrid::partition_list::PartitionList;
use cartgrid::sweep::SweepIterator;

const NI: i64 = 100;
const NJ: i64 = 100;
const NK: i64 = 100;




fn block() -> PartitionList<3> {
    let mut list = PartitionList::new();
    list.push(Partition::from_width(MultiIndex::new([NI, NJ, NK])), 0);
    list
}




// ============================================================================
fn cell_traversal(c: &mut Criterion) {
    let list = block();

    c.bench_function("cells with sweep iterator", |b| {
        b.iter(|| {
            let total: i64 = SweepIterator::begin(black_box(&list), 0, 0).map(|id| id[0]).sum();
            assert!(total > 0);
        })
    });

    c.bench_function("cells with reversed sweep iterator", |b| {
        b.iter(|| {
            let total: i64 = SweepIterator::begin(black_box(&list), 0, 0b111).map(|id| id[0]).sum();
            assert!(total > 0);
        })
    });

    c.bench_function("cells with triple for loop", |b| {
        b.iter(|| {
            let mut total = 0;
            for _ in 0..black_box(NK) {
                for _ in 0..NJ {
                    for i in 0..NI {
                        total += 2 * i + 1;
                    }
                }
            }
            assert!(total > 0);
        })
    });
}




// ============================================================================
fn face_indexing(c: &mut Criterion) {
    let list = block();
    let index_set = IndexSet::new(&Partition::from_width(MultiIndex::new([NI, NJ, NK])));

    c.bench_function("faces with index lookup", |b| {
        b.iter(|| {
            let mut data = vec![0u8; index_set.size(1)];
            for id in SweepIterator::begin(black_box(&list), 1, 0) {
                data[index_set.index(&id)] += 1;
            }
            assert!(data.iter().all(|&n| n == 1));
        })
    });
}

criterion_group!(benches, cell_traversal, face_indexing);
criterion_main!(benches);
