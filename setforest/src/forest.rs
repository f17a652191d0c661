use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, trace};

use crate::element::{find_root, set_parent, ElemId, Node};
use crate::error::ForestError;
use crate::policy::{ForestConfig, MergePolicy, Weighing, Winner};

static NEXT_TAG: AtomicU64 = AtomicU64::new(0);

fn next_tag() -> u64 {
    NEXT_TAG.fetch_add(1, Ordering::Relaxed)
}

/// A disjoint-set forest over an append-only universe of elements.
///
/// Unions never compress paths, so every set stays a fully linked tree that
/// can be walked downward through the children index. Each element may hold
/// an optional payload of type `T`.
#[derive(Debug)]
pub struct Forest<T = ()> {
    pub config: ForestConfig,
    tag: u64,
    pub(crate) nodes: Vec<Node>,
    data: Vec<Option<T>>,
}

impl<T> Default for Forest<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Forest<T> {
    /// Create an empty forest merging by height.
    pub fn new() -> Self {
        Self::with_config(ForestConfig::default())
    }

    /// Create an empty forest with the given configuration.
    pub fn with_config(config: ForestConfig) -> Self {
        Self {
            config,
            tag: next_tag(),
            nodes: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Register a new isolated element with no payload.
    pub fn register_new(&mut self) -> ElemId {
        self.nodes.push(Node::new());
        self.data.push(None);
        self.handle(self.nodes.len() - 1)
    }

    /// Register a new isolated element carrying `data`.
    pub fn register_with(&mut self, data: T) -> ElemId {
        let e = self.register_new();
        self.data[e.index] = Some(data);
        e
    }

    /// Number of registered elements.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Handles for every registered element, in id order.
    pub fn elements(&self) -> impl Iterator<Item = ElemId> + '_ {
        (0..self.nodes.len()).map(|i| self.handle(i))
    }

    /// Drop every element and payload. Handles issued before the clear are
    /// rejected afterwards, and ids start again from 0.
    pub fn clear(&mut self) {
        trace!("clearing forest of {} elements", self.nodes.len());
        self.nodes.clear();
        self.data.clear();
        self.tag = next_tag();
    }

    /// Merge future unions by height.
    pub fn set_merge_by_height(&mut self) {
        self.config.policy = MergePolicy::ByHeight;
    }

    /// Merge future unions by size.
    pub fn set_merge_by_size(&mut self) {
        self.config.policy = MergePolicy::BySize;
    }

    /// Switch the merge policy. Only later unions are affected.
    pub fn set_merge_policy(&mut self, policy: MergePolicy) {
        self.config.policy = policy;
    }

    /// The policy used by the next union.
    pub fn merge_policy(&self) -> MergePolicy {
        self.config.policy
    }

    /// Choose whether unions compare operands or roots. Only later unions
    /// are affected.
    pub fn set_weighing(&mut self, weighing: Weighing) {
        self.config.weighing = weighing;
    }

    /// Return the root of the set containing `e`.
    pub fn find(&self, e: ElemId) -> Result<ElemId, ForestError> {
        let i = self.check(e)?;
        Ok(self.handle(find_root(&self.nodes, i)))
    }

    /// Merge the sets containing `a` and `b`.
    ///
    /// Returns `false` without touching anything when both are already in the
    /// same set. Otherwise the active policy picks which root goes under the
    /// other and exactly one reparenting happens.
    pub fn union(&mut self, a: ElemId, b: ElemId) -> Result<bool, ForestError> {
        let ia = self.check(a)?;
        let ib = self.check(b)?;
        let pa = find_root(&self.nodes, ia);
        let pb = find_root(&self.nodes, ib);
        if pa == pb {
            trace!("union({ia}, {ib}): already joined under {pa}");
            return Ok(false);
        }

        let (wa, wb) = match self.config.weighing {
            Weighing::Operands => (ia, ib),
            Weighing::Roots => (pa, pb),
        };
        let metric = |n: usize| (self.nodes[n].height, self.nodes[n].size);
        let (child, parent) = match self.config.policy.pick(metric(wa), metric(wb)) {
            Winner::Second => (pa, pb),
            Winner::First => (pb, pa),
        };

        set_parent(&mut self.nodes, child, parent);
        debug!(
            "union({ia}, {ib}): root {child} under {parent} ({:?}, {:?})",
            self.config.policy, self.config.weighing
        );
        Ok(true)
    }

    /// Whether `a` and `b` are in the same set.
    pub fn connected(&self, a: ElemId, b: ElemId) -> Result<bool, ForestError> {
        Ok(self.find(a)? == self.find(b)?)
    }

    /// Attach `data` to `e`, replacing any previous payload. Returns the
    /// element's id.
    pub fn set_data(&mut self, e: ElemId, data: T) -> Result<usize, ForestError> {
        let i = self.check(e)?;
        self.data[i] = Some(data);
        Ok(i)
    }

    pub fn data(&self, e: ElemId) -> Result<Option<&T>, ForestError> {
        let i = self.check(e)?;
        Ok(self.data[i].as_ref())
    }

    pub fn data_mut(&mut self, e: ElemId) -> Result<Option<&mut T>, ForestError> {
        let i = self.check(e)?;
        Ok(self.data[i].as_mut())
    }

    /// Detach and return the payload of `e`, leaving the slot empty.
    pub fn take_data(&mut self, e: ElemId) -> Result<Option<T>, ForestError> {
        let i = self.check(e)?;
        Ok(self.data[i].take())
    }

    /// Direct parent of `e`, or `None` for a root.
    pub fn parent(&self, e: ElemId) -> Result<Option<ElemId>, ForestError> {
        let i = self.check(e)?;
        Ok(self.nodes[i].parent.map(|p| self.handle(p)))
    }

    /// Direct children of `e`.
    pub fn children(&self, e: ElemId) -> Result<Vec<ElemId>, ForestError> {
        let i = self.check(e)?;
        Ok(self.nodes[i].children.iter().map(|&c| self.handle(c)).collect())
    }

    /// Height of the subtree rooted at `e` (0 for a leaf).
    pub fn height(&self, e: ElemId) -> Result<usize, ForestError> {
        let i = self.check(e)?;
        Ok(self.nodes[i].height)
    }

    /// Number of elements in the subtree rooted at `e`, itself included.
    pub fn size(&self, e: ElemId) -> Result<usize, ForestError> {
        let i = self.check(e)?;
        Ok(self.nodes[i].size)
    }

    /// Number of elements in the whole set containing `e`.
    pub fn set_size(&self, e: ElemId) -> Result<usize, ForestError> {
        let i = self.check(e)?;
        Ok(self.nodes[find_root(&self.nodes, i)].size)
    }

    /// Validate that `e` was issued by this forest and return its index.
    pub(crate) fn check(&self, e: ElemId) -> Result<usize, ForestError> {
        if e.forest != self.tag {
            return Err(ForestError::ForeignElement { id: e.index });
        }
        if e.index >= self.nodes.len() {
            return Err(ForestError::UnknownElement { id: e.index });
        }
        Ok(e.index)
    }

    pub(crate) fn handle(&self, index: usize) -> ElemId {
        ElemId {
            forest: self.tag,
            index,
        }
    }
}
