//! Weighted union-find over a fixed number of integer elements.
//!
//! The labeler sizes one [`DisjointSet`] to the pixel count of a grid and
//! merges neighbouring bright pixels into it. Lookups compress paths
//! iteratively and merges attach the lighter tree beneath the heavier one, so
//! every operation runs in near-constant amortised time without recursion.

use crate::error::DisjointSetError;

/// Union-find with path compression and union by weight.
///
/// Elements are the integers `0..len`. Every element starts as the root of its
/// own singleton component. Merges are deterministic: the root of the
/// strictly lighter component is attached beneath the other root, and on a
/// weight tie the root of the *second* argument to [`DisjointSet::union`]
/// survives.
///
/// # Examples
/// ```
/// use cellcount_core::DisjointSet;
///
/// let mut set = DisjointSet::new(4)?;
/// set.union(0, 2)?;
/// set.union(2, 3)?;
/// assert!(set.connected(0, 3)?);
/// assert!(!set.connected(0, 1)?);
/// assert_eq!(set.component_count(), 2);
/// # Ok::<(), cellcount_core::DisjointSetError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    weight: Vec<usize>,
    components: usize,
    calls: u64,
    compressions: u64,
}

impl DisjointSet {
    /// Creates a structure over `0..len`, each element its own root with
    /// weight one.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::InvalidSize`] when `len == 0`.
    pub fn new(len: usize) -> Result<Self, DisjointSetError> {
        if len == 0 {
            return Err(DisjointSetError::InvalidSize);
        }
        Ok(Self {
            parent: (0..len).collect(),
            weight: vec![1; len],
            components: len,
            calls: 0,
            compressions: 0,
        })
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Always `false`; construction rejects empty structures.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the number of disjoint components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components
    }

    /// Number of [`connected`](Self::connected) and [`union`](Self::union)
    /// calls made so far.
    #[must_use]
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// Number of parent pointers rewritten by path compression so far.
    #[must_use]
    pub fn compressions(&self) -> u64 {
        self.compressions
    }

    /// Returns the representative of `element`'s component.
    ///
    /// Every ancestor visited on the way up is re-pointed directly at the
    /// root, so later lookups from the same path take a single step.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::IndexOutOfRange`] when `element >= len`.
    ///
    /// # Examples
    /// ```
    /// use cellcount_core::DisjointSet;
    ///
    /// let mut set = DisjointSet::new(3)?;
    /// assert_eq!(set.root(2)?, 2);
    /// set.union(1, 2)?;
    /// assert_eq!(set.root(1)?, 2);
    /// # Ok::<(), cellcount_core::DisjointSetError>(())
    /// ```
    pub fn root(&mut self, element: usize) -> Result<usize, DisjointSetError> {
        self.check(element)?;
        Ok(self.find(element))
    }

    /// Returns whether `left` and `right` belong to the same component.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::IndexOutOfRange`] when either index is
    /// `>= len`.
    pub fn connected(&mut self, left: usize, right: usize) -> Result<bool, DisjointSetError> {
        self.check(left)?;
        self.check(right)?;
        self.calls += 1;
        Ok(self.find(left) == self.find(right))
    }

    /// Merges the components containing `left` and `right`.
    ///
    /// Returns `true` when two distinct components were merged and `false`
    /// when both elements already shared a root, in which case nothing
    /// changes.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::IndexOutOfRange`] when either index is
    /// `>= len`. Both indices are validated before the forest is touched.
    ///
    /// # Examples
    /// ```
    /// use cellcount_core::DisjointSet;
    ///
    /// let mut set = DisjointSet::new(2)?;
    /// assert!(set.union(0, 1)?);
    /// // Equal weights: the second argument's root survives.
    /// assert_eq!(set.root(0)?, 1);
    /// assert!(!set.union(0, 1)?);
    /// # Ok::<(), cellcount_core::DisjointSetError>(())
    /// ```
    pub fn union(&mut self, left: usize, right: usize) -> Result<bool, DisjointSetError> {
        self.check(left)?;
        self.check(right)?;
        self.calls += 1;

        let left_root = self.find(left);
        let right_root = self.find(right);
        if left_root == right_root {
            return Ok(false);
        }

        let (survivor, absorbed) = if self.weight[left_root] > self.weight[right_root] {
            (left_root, right_root)
        } else {
            (right_root, left_root)
        };
        self.parent[absorbed] = survivor;
        self.weight[survivor] += self.weight[absorbed];
        self.components -= 1;
        Ok(true)
    }

    /// Returns the number of elements in `element`'s component.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::IndexOutOfRange`] when `element >= len`.
    pub fn component_size(&mut self, element: usize) -> Result<usize, DisjointSetError> {
        let root = self.root(element)?;
        Ok(self.weight[root])
    }

    /// Returns whether `element` is currently the root of its component.
    ///
    /// # Errors
    /// Returns [`DisjointSetError::IndexOutOfRange`] when `element >= len`.
    pub fn is_root(&self, element: usize) -> Result<bool, DisjointSetError> {
        self.check(element)?;
        Ok(self.parent[element] == element)
    }

    fn check(&self, element: usize) -> Result<(), DisjointSetError> {
        if element < self.parent.len() {
            Ok(())
        } else {
            Err(DisjointSetError::IndexOutOfRange {
                index: element,
                len: self.parent.len(),
            })
        }
    }

    fn find(&mut self, element: usize) -> usize {
        let mut root = element;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = element;
        while node != root {
            let next = self.parent[node];
            if next != root {
                self.parent[node] = root;
                self.compressions += 1;
            }
            node = next;
        }

        root
    }
}

#[cfg(test)]
mod property;
