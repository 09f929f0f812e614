use std::collections::{BTreeMap, BTreeSet};




/**
 * A directed graph which stores only edges. Vertices are kept in sorted
 * order, so iteration is deterministic; this matters when every rank walks
 * the same graph to agree on a communication pattern. Duplicate edges are
 * collapsed.
 */
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyList<K: Ord> {
    outgoing: BTreeMap<K, BTreeSet<K>>,
    incoming: BTreeMap<K, BTreeSet<K>>,
}




// ============================================================================
impl<K> AdjacencyList<K> where K: Ord + Clone {


    pub fn new() -> Self {
        Self::default()
    }


    /**
     * Return the number of edges in the graph.
     */
    pub fn len(&self) -> usize {
        self.outgoing.values().map(|edges| edges.len()).sum()
    }


    /**
     * Determine whether there are any edges in the graph.
     */
    pub fn is_empty(&self) -> bool {
        self.outgoing.values().all(|edges| edges.is_empty())
    }


    /**
     * Insert an edge from a -> b. Returns `false` if the edge was already
     * present. Circular edges are allowed.
     */
    pub fn insert(&mut self, a: K, b: K) -> bool {
        self.incoming.entry(b.clone()).or_default().insert(a.clone());
        self.outgoing.entry(a).or_default().insert(b)
    }


    /**
     * Determine whether the given edge exists.
     */
    pub fn contains(&self, a: &K, b: &K) -> bool {
        self.outgoing.get(a).map_or(false, |edges| edges.contains(b))
    }


    /**
     * Return an iterator over the vertices with edges emanating from the given
     * vertex, in sorted order.
     */
    pub fn outgoing_edges(&self, a: &K) -> impl Iterator<Item = &K> {
        self.outgoing.get(a).into_iter().flat_map(|edges| edges.iter())
    }


    /**
     * Return an iterator over the vertices with edges pointing to the given
     * vertex, in sorted order.
     */
    pub fn incoming_edges(&self, b: &K) -> impl Iterator<Item = &K> {
        self.incoming.get(b).into_iter().flat_map(|edges| edges.iter())
    }


    /**
     * Return an iterator over all edges, ordered by source then target.
     */
    pub fn edges(&self) -> impl Iterator<Item = (&K, &K)> {
        self.outgoing
            .iter()
            .flat_map(|(a, edges)| edges.iter().map(move |b| (a, b)))
    }


    /**
     * Determine whether every edge a -> b has a matching edge b -> a.
     */
    pub fn is_symmetric(&self) -> bool {
        self.edges().all(|(a, b)| self.contains(b, a))
    }
}

impl<K: Ord> Default for AdjacencyList<K> {
    fn default() -> Self {
        Self {
            outgoing: BTreeMap::new(),
            incoming: BTreeMap::new(),
        }
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::AdjacencyList;


    #[test]
    fn graph_contained_works() {
        let mut edges = AdjacencyList::new();
        edges.insert(0, 1);
        assert!(edges.contains(&0, &1));
        assert!(!edges.contains(&1, &0));
        assert!(!edges.is_symmetric());
    }


    #[test]
    fn duplicate_edges_are_collapsed() {
        let mut edges = AdjacencyList::new();
        assert!(edges.insert(0, 1));
        assert!(edges.insert(1, 0));
        assert!(edges.insert(1, 1));
        assert!(!edges.insert(0, 1));
        assert_eq!(edges.len(), 3);
        assert!(edges.is_symmetric());
    }


    #[test]
    fn graph_can_iterate_incoming_and_outgoing_edges() {
        let mut edges = AdjacencyList::new();
        edges.insert(0, 3);
        edges.insert(0, 1);
        edges.insert(0, 2);

        edges.insert(4, 1);
        edges.insert(4, 2);

        assert_eq!(edges.incoming_edges(&1).collect::<Vec<_>>(), vec![&0, &4]);
        assert_eq!(edges.incoming_edges(&3).count(), 1);
        assert_eq!(edges.outgoing_edges(&0).collect::<Vec<_>>(), vec![&1, &2, &3]);
        assert_eq!(edges.outgoing_edges(&4).count(), 2);
        assert_eq!(edges.edges().next(), Some((&0, &1)));
    }


    #[test]
    fn empty_graph_has_no_edges() {
        let edges = AdjacencyList::<usize>::new();
        assert!(edges.is_empty());
        assert_eq!(edges.len(), 0);
        assert_eq!(edges.outgoing_edges(&0).count(), 0);
    }
}
