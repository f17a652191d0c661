use indexmap::IndexSet;
use smallvec::{smallvec, SmallVec};

/// Handle to an element registered in a [`Forest`](crate::forest::Forest).
///
/// Carries the element's integer id together with a tag for the forest that
/// issued it, so handles from another forest are rejected instead of aliasing
/// an unrelated element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElemId {
    pub(crate) forest: u64,
    pub(crate) index: usize,
}

impl ElemId {
    /// The element's id, unique within its forest and assigned from 0 upward.
    pub fn id(self) -> usize {
        self.index
    }
}

/// Structural state of one element: its tree links and cached subtree metrics.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<usize>,
    /// Exactly the ids whose `parent` is this node.
    pub(crate) children: IndexSet<usize>,
    /// 0 for a leaf, otherwise 1 + the tallest child's height.
    pub(crate) height: usize,
    /// 1 + the sizes of all children.
    pub(crate) size: usize,
}

impl Node {
    /// An isolated root: no parent, no children.
    pub(crate) fn new() -> Self {
        Self {
            parent: None,
            children: IndexSet::new(),
            height: 0,
            size: 1,
        }
    }
}

/// Follow parent links from `n` to the root of its tree.
pub(crate) fn find_root(nodes: &[Node], mut n: usize) -> usize {
    while let Some(p) = nodes[n].parent {
        n = p;
    }
    n
}

/// Move `child` (and its whole subtree) under `parent`.
///
/// Detaches `child` from its current parent first. Sizes, heights and
/// children indexes are updated incrementally along both ancestor chains
/// before this returns. `parent` must not be inside `child`'s subtree.
pub(crate) fn set_parent(nodes: &mut [Node], child: usize, parent: usize) {
    debug_assert_ne!(child, parent);
    debug_assert_ne!(find_root(nodes, parent), child);

    if let Some(old) = nodes[child].parent {
        remove_child(nodes, old, child);
    }
    nodes[child].parent = Some(parent);
    add_child(nodes, parent, child);
}

fn add_child(nodes: &mut [Node], parent: usize, child: usize) {
    let moved = nodes[child].size;
    let mut cur = Some(parent);
    while let Some(n) = cur {
        nodes[n].size += moved;
        cur = nodes[n].parent;
    }

    let needed = nodes[child].height + 1;
    if nodes[parent].height < needed {
        nodes[parent].height = needed;
        raise_height_upward(nodes, parent);
    }

    nodes[parent].children.insert(child);
}

fn remove_child(nodes: &mut [Node], parent: usize, child: usize) {
    let moved = nodes[child].size;
    let mut cur = Some(parent);
    while let Some(n) = cur {
        nodes[n].size -= moved;
        cur = nodes[n].parent;
    }

    nodes[parent].children.swap_remove(&child);

    // Only a tallest child can lower the parent's height.
    if nodes[child].height + 1 == nodes[parent].height {
        refresh_height_upward(nodes, parent);
    }
}

/// Raise ancestor heights after `from` grew, stopping at the first ancestor
/// that is already tall enough.
fn raise_height_upward(nodes: &mut [Node], from: usize) {
    let mut cur = from;
    while let Some(p) = nodes[cur].parent {
        let needed = nodes[cur].height + 1;
        if nodes[p].height >= needed {
            break;
        }
        nodes[p].height = needed;
        cur = p;
    }
}

/// Recompute heights from `from` upward after a child was removed, stopping
/// at the first node whose height does not change.
fn refresh_height_upward(nodes: &mut [Node], from: usize) {
    let mut cur = Some(from);
    while let Some(n) = cur {
        let height = height_from_children(nodes, n);
        if height == nodes[n].height {
            break;
        }
        nodes[n].height = height;
        cur = nodes[n].parent;
    }
}

fn height_from_children(nodes: &[Node], n: usize) -> usize {
    nodes[n]
        .children
        .iter()
        .map(|&c| nodes[c].height + 1)
        .max()
        .unwrap_or(0)
}

/// All ids in the subtree rooted at `n`, `n` first.
pub(crate) fn subtree(nodes: &[Node], n: usize) -> Vec<usize> {
    let mut out = Vec::with_capacity(nodes[n].size);
    let mut stack: SmallVec<[usize; 16]> = smallvec![n];
    while let Some(cur) = stack.pop() {
        out.push(cur);
        stack.extend(nodes[cur].children.iter().rev().copied());
    }
    out
}

/// Height of the subtree at `n`, recomputed by walking every descendant.
pub(crate) fn calc_height(nodes: &[Node], n: usize) -> usize {
    let mut height = 0;
    let mut stack: SmallVec<[(usize, usize); 16]> = smallvec![(n, 0)];
    while let Some((cur, depth)) = stack.pop() {
        height = height.max(depth);
        stack.extend(nodes[cur].children.iter().map(|&c| (c, depth + 1)));
    }
    height
}

/// Size of the subtree at `n`, recomputed by walking every descendant.
pub(crate) fn calc_size(nodes: &[Node], n: usize) -> usize {
    let mut size = 0;
    let mut stack: SmallVec<[usize; 16]> = smallvec![n];
    while let Some(cur) = stack.pop() {
        size += 1;
        stack.extend(nodes[cur].children.iter().copied());
    }
    size
}
