use crate::model::{Person, index_by_id};

/// Assign every node a depth with each child strictly below the deepest of
/// its parents, then shift so the shallowest node sits at 0.
///
/// Longest-path relaxation over the parent->child relation. Stored values
/// seed the working depths (clamped to >= 0) so previously computed graphs
/// converge quickly. Acyclicity is guaranteed by the cycle check at mutation
/// time; the pass cap is a safety valve for malformed input, and when hit the
/// best-effort depths are kept rather than failing the render.
pub fn assign_generations(nodes: &mut [Person]) {
    if nodes.is_empty() {
        return;
    }
    let index = index_by_id(nodes);
    let parent_indices: Vec<Vec<usize>> = nodes
        .iter()
        .map(|node| {
            node.parent_ids
                .iter()
                .filter_map(|parent_id| index.get(parent_id).copied())
                .collect()
        })
        .collect();

    let mut depths: Vec<i64> = nodes.iter().map(|node| node.generation.max(0)).collect();
    let max_passes = nodes.len() * 4 + 16;
    for _ in 0..max_passes {
        let mut changed = false;
        for (idx, parents) in parent_indices.iter().enumerate() {
            let Some(deepest) = parents.iter().map(|&parent| depths[parent]).max() else {
                continue;
            };
            if deepest + 1 > depths[idx] {
                depths[idx] = deepest + 1;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    let floor = depths.iter().copied().min().unwrap_or(0);
    for (node, depth) in nodes.iter_mut().zip(depths) {
        node.generation = depth - floor;
    }
}

/// Depth of a single node without touching the stored collection. For UI
/// that needs just one value outside a full layout pass.
pub fn compute_generation(nodes: &[Person], node_id: &str) -> Option<i64> {
    let mut scratch = nodes.to_vec();
    assign_generations(&mut scratch);
    scratch
        .iter()
        .find(|node| node.id == node_id)
        .map(|node| node.generation)
}
