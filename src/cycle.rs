use crate::model::Person;
use std::collections::{HashMap, HashSet};

/// True when following `children_ids` edges can revisit a node already on the
/// current path. The candidate node participates in the edge set before
/// traversal: it replaces the stored record with the same ID, or joins the
/// graph as a new node, so a mutation can be vetted before it is committed.
pub fn detect_cycle(nodes: &[Person], candidate: Option<&Person>) -> bool {
    let mut children: HashMap<&str, &[String]> = nodes
        .iter()
        .map(|node| (node.id.as_str(), node.children_ids.as_slice()))
        .collect();
    if let Some(candidate) = candidate {
        children.insert(candidate.id.as_str(), candidate.children_ids.as_slice());
    }

    let mut explored: HashSet<&str> = HashSet::with_capacity(children.len());
    let mut on_stack: HashSet<&str> = HashSet::new();
    let roots: Vec<&str> = children.keys().copied().collect();

    for root in roots {
        if explored.contains(root) {
            continue;
        }
        // Iterative DFS; each frame remembers how far into its child list
        // the scan has advanced.
        let mut stack: Vec<(&str, usize)> = vec![(root, 0)];
        on_stack.insert(root);
        while let Some((id, child_pos)) = stack.pop() {
            let edges = children.get(id).copied().unwrap_or(&[]);
            let mut advanced = false;
            for (offset, child_id) in edges.iter().enumerate().skip(child_pos) {
                let child_id = child_id.as_str();
                if !children.contains_key(child_id) {
                    continue;
                }
                if on_stack.contains(child_id) {
                    return true;
                }
                if explored.contains(child_id) {
                    continue;
                }
                stack.push((id, offset + 1));
                stack.push((child_id, 0));
                on_stack.insert(child_id);
                advanced = true;
                break;
            }
            if !advanced {
                on_stack.remove(id);
                explored.insert(id);
            }
        }
    }
    false
}
