use crate::model::{Person, Sex, label_cmp};
use std::collections::{BTreeMap, HashMap, HashSet};

/// One slot in an ordered row. `Gap` is the logical break between sibling
/// clusters; it widens the spacing at positioning time but is not a node and
/// does not consume an order index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowItem {
    Node(String),
    Gap,
}

#[derive(Debug, Clone)]
pub struct Rows {
    pub rows: Vec<Vec<RowItem>>,
    /// id -> (row index, order index within the row, gaps excluded)
    pub order: HashMap<String, (usize, usize)>,
}

/// Group nodes into ordered rows, one per generation (ascending).
///
/// The oldest generation has no parents to anchor against and is sorted by
/// label alone. Every later row is clustered by parent-set signature, the
/// clusters ordered under their parents' average position in the row above,
/// and partners pulled adjacent within each cluster.
pub fn build_rows(nodes: &[Person]) -> Rows {
    let mut by_generation: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (idx, node) in nodes.iter().enumerate() {
        by_generation.entry(node.generation).or_default().push(idx);
    }

    let mut rows: Vec<Vec<RowItem>> = Vec::with_capacity(by_generation.len());
    let mut order: HashMap<String, (usize, usize)> = HashMap::with_capacity(nodes.len());
    let mut above: HashMap<String, usize> = HashMap::new();

    for (row_idx, members) in by_generation.into_values().enumerate() {
        let items = if row_idx == 0 {
            let mut sorted = members;
            sorted.sort_by(|&a, &b| label_cmp(&nodes[a], &nodes[b]));
            compact_partners(&sorted, nodes)
                .into_iter()
                .map(|idx| RowItem::Node(nodes[idx].id.clone()))
                .collect()
        } else {
            build_clustered_row(&members, nodes, &above)
        };

        above.clear();
        let mut position = 0usize;
        for item in &items {
            if let RowItem::Node(id) = item {
                order.insert(id.clone(), (row_idx, position));
                above.insert(id.clone(), position);
                position += 1;
            }
        }
        rows.push(items);
    }

    Rows { rows, order }
}

fn build_clustered_row(
    members: &[usize],
    nodes: &[Person],
    above: &HashMap<String, usize>,
) -> Vec<RowItem> {
    // Cluster by parent-set signature; parentless nodes get a singleton
    // cluster keyed by their own ID so they never merge.
    let mut clusters: Vec<(String, Vec<usize>)> = Vec::new();
    let mut by_signature: HashMap<String, usize> = HashMap::new();
    for &member in members {
        let node = &nodes[member];
        let signature = if node.parent_ids.is_empty() {
            node.id.clone()
        } else {
            let mut parents: Vec<&str> = node.parent_ids.iter().map(String::as_str).collect();
            parents.sort_unstable();
            parents.join("|")
        };
        match by_signature.get(&signature) {
            Some(&cluster_idx) => clusters[cluster_idx].1.push(member),
            None => {
                by_signature.insert(signature.clone(), clusters.len());
                clusters.push((signature, vec![member]));
            }
        }
    }

    // Anchor each cluster under the average position of its members' parents
    // in the row above; clusters with nothing to anchor against sort last.
    let mut ordered: Vec<(f64, &String, &Vec<usize>)> = clusters
        .iter()
        .map(|(signature, cluster_members)| {
            let mut total = 0.0f64;
            let mut count = 0usize;
            for &member in cluster_members {
                for parent_id in &nodes[member].parent_ids {
                    if let Some(&position) = above.get(parent_id) {
                        total += position as f64;
                        count += 1;
                    }
                }
            }
            let anchor = if count == 0 { f64::INFINITY } else { total / count as f64 };
            (anchor, signature, cluster_members)
        })
        .collect();
    ordered.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.1.cmp(b.1))
    });

    let mut items: Vec<RowItem> = Vec::new();
    for (cluster_pos, (_, _, cluster_members)) in ordered.iter().enumerate() {
        if cluster_pos > 0 {
            items.push(RowItem::Gap);
        }
        let mut sorted = (*cluster_members).clone();
        sorted.sort_by(|&a, &b| label_cmp(&nodes[a], &nodes[b]));
        for idx in compact_partners(&sorted, nodes) {
            items.push(RowItem::Node(nodes[idx].id.clone()));
        }
    }
    items
}

/// Pull partner pairs adjacent. Scans in order; the first unvisited member
/// claims its lowest-labelled unvisited partner from the same slice, the
/// pair is emitted male-first when both are tagged (label order otherwise),
/// and everyone else stays where the scan finds them.
fn compact_partners(members: &[usize], nodes: &[Person]) -> Vec<usize> {
    let in_slice: HashMap<&str, usize> = members
        .iter()
        .map(|&idx| (nodes[idx].id.as_str(), idx))
        .collect();
    let mut visited: HashSet<usize> = HashSet::with_capacity(members.len());
    let mut out: Vec<usize> = Vec::with_capacity(members.len());

    for &member in members {
        if visited.contains(&member) {
            continue;
        }
        visited.insert(member);
        let mut partner: Option<usize> = None;
        for partner_id in &nodes[member].partners {
            let Some(&candidate) = in_slice.get(partner_id.as_str()) else {
                continue;
            };
            if visited.contains(&candidate) {
                continue;
            }
            let better = match partner {
                Some(current) => label_cmp(&nodes[candidate], &nodes[current]).is_lt(),
                None => true,
            };
            if better {
                partner = Some(candidate);
            }
        }
        match partner {
            Some(partner) => {
                visited.insert(partner);
                let (left, right) = pair_order(member, partner, nodes);
                out.push(left);
                out.push(right);
            }
            None => out.push(member),
        }
    }
    out
}

/// Left/right convention inside a couple: male before female when both are
/// tagged, label order otherwise. Purely visual; carries no semantics.
fn pair_order(a: usize, b: usize, nodes: &[Person]) -> (usize, usize) {
    match (nodes[a].sex, nodes[b].sex) {
        (Some(Sex::Male), Some(Sex::Female)) => (a, b),
        (Some(Sex::Female), Some(Sex::Male)) => (b, a),
        _ => {
            if label_cmp(&nodes[a], &nodes[b]).is_le() {
                (a, b)
            } else {
                (b, a)
            }
        }
    }
}
