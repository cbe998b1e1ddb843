use crate::layout::types::{Connector, NodeLayout};
use crate::model::Person;
use std::collections::{BTreeMap, HashSet};

/// Derive drawable connectors from final node coordinates: one spouse line
/// per unique unordered partner pair and one orthogonal elbow per child with
/// at least one resolved parent.
pub fn build_connectors(
    nodes: &[Person],
    positioned: &BTreeMap<String, NodeLayout>,
) -> Vec<Connector> {
    let mut edges: Vec<Connector> = Vec::new();

    // Spouse connectors, deduplicated with an order-independent key so A-B
    // and B-A never draw twice.
    let mut seen: HashSet<(String, String)> = HashSet::new();
    for node in nodes {
        let Some(here) = positioned.get(&node.id) else {
            continue;
        };
        for partner_id in &node.partners {
            let Some(there) = positioned.get(partner_id) else {
                continue;
            };
            let key = pair_key(&node.id, partner_id);
            if !seen.insert(key.clone()) {
                continue;
            }
            let (a, b) = key;
            let (first, second) = if node.id == a {
                (here, there)
            } else {
                (there, here)
            };
            edges.push(Connector::Spouse {
                a,
                b,
                points: vec![first.center(), second.center()],
            });
        }
    }

    // Union-child elbows: start at the horizontal midpoint of the resolved
    // parents on the parent row's lower edge, drop partway, run across to the
    // child's x, then drop into its upper edge.
    for node in nodes {
        let Some(child) = positioned.get(&node.id) else {
            continue;
        };
        let parents: Vec<&NodeLayout> = node
            .parent_ids
            .iter()
            .filter_map(|parent_id| positioned.get(parent_id))
            .collect();
        if parents.is_empty() {
            continue;
        }
        let midpoint = parents.iter().map(|p| p.center().0).sum::<f32>() / parents.len() as f32;
        let drop_from = parents
            .iter()
            .map(|p| p.y + p.height)
            .fold(f32::MIN, f32::max);
        let (child_x, _) = child.center();
        let bend_y = drop_from + (child.y - drop_from) / 2.0;
        edges.push(Connector::UnionChild {
            parents: node
                .parent_ids
                .iter()
                .filter(|parent_id| positioned.contains_key(*parent_id))
                .cloned()
                .collect(),
            child: node.id.clone(),
            points: vec![
                (midpoint, drop_from),
                (midpoint, bend_y),
                (child_x, bend_y),
                (child_x, child.y),
            ],
        });
    }

    edges
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}
