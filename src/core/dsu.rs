/*!
# Disjoint-Set Union

A union-find structure with full path compression and union by rank, used by
Kruskal's algorithm for cycle detection and component merging. Both
optimizations together give near-constant amortized cost per operation.
*/

/// A disjoint-set (union-find) structure over the elements `0..n`.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl DisjointSet {
    /// Creates `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Number of elements the structure was created with.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Finds the representative of the set containing `i`, compressing the
    /// whole path onto the representative.
    pub fn find(&mut self, i: usize) -> usize {
        if self.parent[i] != i {
            let root = self.find(self.parent[i]);
            self.parent[i] = root;
        }
        self.parent[i]
    }

    /// Merges the sets containing `i` and `j` by rank. Returns true if two
    /// distinct sets were merged, false if they already shared a
    /// representative.
    pub fn union(&mut self, i: usize, j: usize) -> bool {
        let i = self.find(i);
        let j = self.find(j);
        if i == j {
            return false;
        }
        match self.rank[i].cmp(&self.rank[j]) {
            std::cmp::Ordering::Less => self.parent[i] = j,
            std::cmp::Ordering::Greater => self.parent[j] = i,
            std::cmp::Ordering::Equal => {
                self.parent[j] = i;
                self.rank[i] += 1;
            }
        }
        true
    }

    /// Returns true if `i` and `j` currently share a representative.
    pub fn same_set(&mut self, i: usize, j: usize) -> bool {
        self.find(i) == self.find(j)
    }
}
