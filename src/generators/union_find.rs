/// Disjoint-set forest over room indices, with union by rank and path compression.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
    /// Set size, only meaningful at roots
    size: Vec<usize>,
    sets: usize,
}

impl UnionFind {
    pub fn new(len: usize) -> Self {
        UnionFind {
            parent: (0..len).collect(),
            rank: vec![0; len],
            size: vec![1; len],
            sets: len,
        }
    }

    pub fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    pub fn same(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// Merges the sets holding `x` and `y`. Returns `false` if they were already one set.
    pub fn unite(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return false; // Already in same set
        }

        let (root, child) = match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Greater => (root_x, root_y),
            std::cmp::Ordering::Less => (root_y, root_x),
            std::cmp::Ordering::Equal => {
                self.rank[root_x] += 1;
                (root_x, root_y)
            }
        };
        self.parent[child] = root;
        self.size[root] += self.size[child];
        self.sets -= 1;
        true
    }

    /// Number of elements in the set holding `x`.
    pub fn size_of(&mut self, x: usize) -> usize {
        let root = self.find(x);
        self.size[root]
    }

    /// Number of disjoint sets left.
    pub fn set_count(&self) -> usize {
        self.sets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unite_and_find() {
        let mut sets = UnionFind::new(6);
        assert_eq!(sets.set_count(), 6);
        assert!(sets.unite(0, 1));
        assert!(sets.unite(2, 3));
        assert!(!sets.same(1, 2));
        assert!(sets.unite(1, 3));
        // Transitive: 0 and 2 were never united directly
        assert!(sets.same(0, 2));
        assert!(!sets.unite(0, 3));
        assert_eq!(sets.set_count(), 3);
        assert_eq!(sets.size_of(2), 4);
        assert_eq!(sets.size_of(5), 1);
    }
}
