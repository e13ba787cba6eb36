use spantree::core::dsu::DisjointSet;
use spantree::core::heap::IndexedMinHeap;

// ============================================================================
// Disjoint-set union
// ============================================================================

#[test]
fn test_dsu_representatives_follow_unions() {
    let mut dsu = DisjointSet::new(8);
    dsu.union(0, 1);
    dsu.union(2, 3);
    dsu.union(1, 3);

    assert!(dsu.same_set(0, 2));
    assert!(dsu.same_set(1, 2));
    assert!(!dsu.same_set(0, 4));
    assert_eq!(dsu.len(), 8);
}

#[test]
fn test_dsu_union_returns_whether_sets_merged() {
    let mut dsu = DisjointSet::new(3);
    assert!(dsu.union(0, 1));
    assert!(!dsu.union(1, 0));
    assert!(dsu.union(1, 2));
}

#[test]
fn test_dsu_long_chain_compresses() {
    let n = 64;
    let mut dsu = DisjointSet::new(n);
    for i in 1..n {
        dsu.union(i - 1, i);
    }
    let root = dsu.find(0);
    for i in 0..n {
        assert_eq!(dsu.find(i), root);
    }
}

// ============================================================================
// Indexed min-heap
// ============================================================================

#[test]
fn test_heap_top_is_minimum_under_interleaved_ops() {
    let mut heap = IndexedMinHeap::new();
    heap.push(10, 50usize).unwrap();
    heap.push(11, 30).unwrap();
    assert_eq!(heap.peek(), Some(&(11, 30)));

    heap.push(12, 20).unwrap();
    assert_eq!(heap.peek(), Some(&(12, 20)));

    assert_eq!(heap.pop(), Some((12, 20)));
    assert_eq!(heap.peek(), Some(&(11, 30)));
    assert_eq!(heap.len(), 2);
}

#[test]
fn test_heap_index_of_points_at_value() {
    let mut heap = IndexedMinHeap::new();
    for (item, key) in [(3, 40usize), (1, 10), (4, 30), (2, 20)] {
        heap.push(item, key).unwrap();
    }
    for item in 1..=4 {
        assert!(heap.index_of(item).is_some());
    }
    heap.pop();
    assert_eq!(heap.index_of(1), None);
}

#[test]
fn test_heap_decrease_key_reorders() {
    let mut heap = IndexedMinHeap::new();
    heap.push(0, 100usize).unwrap();
    heap.push(1, 200).unwrap();
    heap.push(2, 300).unwrap();

    heap.decrease_key(2, 150).unwrap();
    heap.decrease_key(1, 50).unwrap();

    assert_eq!(heap.pop(), Some((1, 50)));
    assert_eq!(heap.pop(), Some((0, 100)));
    assert_eq!(heap.pop(), Some((2, 150)));
}

#[test]
fn test_heap_decrease_key_keeps_identity_stable() {
    // Changing an item's key must not lose track of the item itself.
    let mut heap = IndexedMinHeap::new();
    heap.push(7, 90usize).unwrap();
    heap.push(8, 80).unwrap();
    heap.decrease_key(7, 10).unwrap();

    assert_eq!(heap.key_of(7), Some(10));
    assert_eq!(heap.key_of(8), Some(80));
    assert_eq!(heap.pop(), Some((7, 10)));
}

#[test]
fn test_heap_empty_pop_is_none() {
    let mut heap: IndexedMinHeap<usize> = IndexedMinHeap::new();
    assert!(heap.is_empty());
    assert_eq!(heap.pop(), None);
}
