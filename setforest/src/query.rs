#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::element::{self, find_root, ElemId, Node};
use crate::error::{ForestError, InvariantViolation};
use crate::forest::Forest;

impl<T> Forest<T> {
    /// Every element in the same set as `e`, `e` included.
    ///
    /// The set's root comes first; the rest follow the children index
    /// depth-first. The length always equals the root's size.
    pub fn all_in_set(&self, e: ElemId) -> Result<Vec<ElemId>, ForestError> {
        let i = self.check(e)?;
        let root = find_root(&self.nodes, i);
        Ok(element::subtree(&self.nodes, root)
            .into_iter()
            .map(|n| self.handle(n))
            .collect())
    }

    /// The root of every set, in id order.
    pub fn roots(&self) -> Vec<ElemId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(i, _)| self.handle(i))
            .collect()
    }

    /// Number of disjoint sets.
    pub fn set_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.parent.is_none()).count()
    }

    /// Every set as a list of members, ordered by root id.
    pub fn sets(&self) -> Vec<Vec<ElemId>> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(root, _)| {
                element::subtree(&self.nodes, root)
                    .into_iter()
                    .map(|n| self.handle(n))
                    .collect()
            })
            .collect()
    }

    /// Height of the subtree at `e`, recomputed from scratch.
    pub fn calc_height(&self, e: ElemId) -> Result<usize, ForestError> {
        let i = self.check(e)?;
        Ok(element::calc_height(&self.nodes, i))
    }

    /// Size of the subtree at `e`, recomputed from scratch.
    pub fn calc_size(&self, e: ElemId) -> Result<usize, ForestError> {
        let i = self.check(e)?;
        Ok(element::calc_size(&self.nodes, i))
    }

    /// Check every structural invariant against a full recomputation.
    ///
    /// Parent and children links must mirror each other, parent chains must
    /// end at a root, and each cached height and size must match the value
    /// recomputed from the subtree.
    pub fn verify(&self) -> Result<(), InvariantViolation> {
        let nodes = &self.nodes;
        check_links(nodes)?;
        check_acyclic(nodes)?;

        #[cfg(feature = "parallel")]
        let metrics = (0..nodes.len())
            .into_par_iter()
            .try_for_each(|i| check_metrics(nodes, i));
        #[cfg(not(feature = "parallel"))]
        let metrics = (0..nodes.len()).try_for_each(|i| check_metrics(nodes, i));

        metrics
    }
}

fn check_links(nodes: &[Node]) -> Result<(), InvariantViolation> {
    for (i, node) in nodes.iter().enumerate() {
        if let Some(p) = node.parent {
            if !nodes[p].children.contains(&i) {
                return Err(InvariantViolation::MissingChild { parent: p, child: i });
            }
        }
        for &c in &node.children {
            if nodes[c].parent != Some(i) {
                return Err(InvariantViolation::StrayChild { parent: i, child: c });
            }
        }
    }
    Ok(())
}

fn check_acyclic(nodes: &[Node]) -> Result<(), InvariantViolation> {
    for i in 0..nodes.len() {
        let mut cur = i;
        let mut steps = 0;
        while let Some(p) = nodes[cur].parent {
            steps += 1;
            if steps > nodes.len() {
                return Err(InvariantViolation::Cycle { id: i });
            }
            cur = p;
        }
    }
    Ok(())
}

fn check_metrics(nodes: &[Node], i: usize) -> Result<(), InvariantViolation> {
    let height = element::calc_height(nodes, i);
    if height != nodes[i].height {
        return Err(InvariantViolation::Height {
            id: i,
            recorded: nodes[i].height,
            actual: height,
        });
    }
    let size = element::calc_size(nodes, i);
    if size != nodes[i].size {
        return Err(InvariantViolation::Size {
            id: i,
            recorded: nodes[i].size,
            actual: size,
        });
    }
    Ok(())
}
