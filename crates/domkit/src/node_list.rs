//! NodeList Operations

use domkit_dom::{NodeId, NodeList};

use crate::{CapabilityRegistry, Category, capabilities};

/// `each`
pub type EachFn = fn(&NodeList, &mut dyn FnMut(NodeId, usize));

/// `get`
pub type GetFn = fn(&NodeList, isize) -> Option<NodeId>;

pub(crate) fn each(list: &NodeList, f: &mut dyn FnMut(NodeId, usize)) {
    for (index, node) in list.iter().enumerate() {
        f(node, index);
    }
}

/// Negative indices count from the end; out of range is `None`
pub(crate) fn get(list: &NodeList, index: isize) -> Option<NodeId> {
    if index < 0 {
        list.length()
            .checked_sub(index.unsigned_abs())
            .and_then(|i| list.item(i))
    } else {
        list.item(index.unsigned_abs())
    }
}

/// `each` / `get` on node lists
pub trait NodeListExt {
    /// Call `f(node, index)` for every member, in order
    fn each<F: FnMut(NodeId, usize)>(&self, f: F) {
        self.each_with(capabilities(), f)
    }

    /// Member at `index`; `-1` is the last member
    fn get(&self, index: isize) -> Option<NodeId> {
        self.get_with(capabilities(), index)
    }

    fn each_with<F: FnMut(NodeId, usize)>(&self, registry: &CapabilityRegistry, f: F);

    fn get_with(&self, registry: &CapabilityRegistry, index: isize) -> Option<NodeId>;
}

impl NodeListExt for NodeList {
    fn each_with<F: FnMut(NodeId, usize)>(&self, registry: &CapabilityRegistry, mut f: F) {
        let each_fn = registry
            .resolve::<EachFn>(Category::NodeList, "each")
            .copied()
            .unwrap_or(each);
        each_fn(self, &mut f);
    }

    fn get_with(&self, registry: &CapabilityRegistry, index: isize) -> Option<NodeId> {
        let get_fn = registry
            .resolve::<GetFn>(Category::NodeList, "get")
            .copied()
            .unwrap_or(get);
        get_fn(self, index)
    }
}
