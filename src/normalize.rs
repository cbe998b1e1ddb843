use crate::generation::assign_generations;
use crate::model::{Person, index_by_id};
use std::collections::HashSet;

/// Canonicalize a raw, possibly one-sided node collection.
///
/// Runs a fixed sequence of passes over the collection; each pass re-reads
/// the state left by the previous one, with no iteration to a fixed point
/// beyond what is listed. Order of the input is preserved. The result
/// satisfies the mirroring invariants (parent<->child, partner<->partner),
/// keeps the legacy `parent_id` in sync, and carries freshly assigned
/// generations.
pub fn normalize_and_link(mut nodes: Vec<Person>) -> Vec<Person> {
    coerce_fields(&mut nodes);
    mirror_partners(&mut nodes);
    strip_sibling_partners(&mut nodes);
    mirror_children_to_parents(&mut nodes);
    mirror_parents_to_children(&mut nodes);
    infer_co_parents(&mut nodes);
    sync_legacy_parent(&mut nodes);
    assign_generations(&mut nodes);
    nodes
}

fn dedup_preserving(ids: &mut Vec<String>) {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.retain(|id| seen.insert(id.clone()));
}

fn trim_handle(handle: &mut Option<String>) {
    if let Some(value) = handle {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            *handle = None;
        } else if trimmed.len() != value.len() {
            *handle = Some(trimmed.to_string());
        }
    }
}

/// Pass 1: per-node field coercion. Merges the legacy single-parent field
/// into `parent_ids`, deduplicates every relationship array, drops references
/// to IDs not present in the collection, and tidies the profile block.
fn coerce_fields(nodes: &mut [Person]) {
    let known: HashSet<String> = nodes.iter().map(|node| node.id.clone()).collect();
    for node in nodes.iter_mut() {
        if let Some(legacy) = node.parent_id.take() {
            if !node.parent_ids.contains(&legacy) {
                node.parent_ids.push(legacy);
            }
        }
        dedup_preserving(&mut node.parent_ids);
        dedup_preserving(&mut node.partners);
        dedup_preserving(&mut node.children_ids);

        let own_id = node.id.clone();
        let keep = |id: &String| known.contains(id) && *id != own_id;
        node.parent_ids.retain(keep);
        node.partners.retain(keep);
        node.children_ids.retain(keep);

        node.profile.text = node.profile.text.trim().to_string();
        trim_handle(&mut node.profile.website);
        trim_handle(&mut node.profile.twitter);
        trim_handle(&mut node.profile.instagram);
    }
}

/// Pass 2: make partner membership symmetric.
fn mirror_partners(nodes: &mut Vec<Person>) {
    let index = index_by_id(nodes);
    let mut additions: Vec<(usize, String)> = Vec::new();
    for node in nodes.iter() {
        for partner_id in &node.partners {
            if let Some(&partner_idx) = index.get(partner_id) {
                if !nodes[partner_idx].partners.contains(&node.id) {
                    additions.push((partner_idx, node.id.clone()));
                }
            }
        }
    }
    for (idx, id) in additions {
        if !nodes[idx].partners.contains(&id) {
            nodes[idx].partners.push(id);
        }
    }
}

/// Pass 3: two people sharing a parent are siblings, never partners. Strips
/// the offending IDs from both sides rather than rejecting the input.
fn strip_sibling_partners(nodes: &mut Vec<Person>) {
    let index = index_by_id(nodes);
    let parent_sets: Vec<HashSet<String>> = nodes
        .iter()
        .map(|node| node.parent_ids.iter().cloned().collect())
        .collect();
    for idx in 0..nodes.len() {
        let node_parents = parent_sets[idx].clone();
        nodes[idx].partners.retain(|partner_id| {
            let Some(&partner_idx) = index.get(partner_id) else {
                return false;
            };
            parent_sets[partner_idx].is_disjoint(&node_parents)
        });
    }
}

/// Pass 4: every child listed by a parent lists that parent back.
fn mirror_children_to_parents(nodes: &mut Vec<Person>) {
    let index = index_by_id(nodes);
    let mut additions: Vec<(usize, String)> = Vec::new();
    for node in nodes.iter() {
        for child_id in &node.children_ids {
            if let Some(&child_idx) = index.get(child_id) {
                if !nodes[child_idx].parent_ids.contains(&node.id) {
                    additions.push((child_idx, node.id.clone()));
                }
            }
        }
    }
    for (idx, id) in additions {
        if !nodes[idx].parent_ids.contains(&id) {
            nodes[idx].parent_ids.push(id);
        }
    }
}

/// Pass 5: every parent listed by a child lists that child back.
fn mirror_parents_to_children(nodes: &mut Vec<Person>) {
    let index = index_by_id(nodes);
    let mut additions: Vec<(usize, String)> = Vec::new();
    for node in nodes.iter() {
        for parent_id in &node.parent_ids {
            if let Some(&parent_idx) = index.get(parent_id) {
                if !nodes[parent_idx].children_ids.contains(&node.id) {
                    additions.push((parent_idx, node.id.clone()));
                }
            }
        }
    }
    for (idx, id) in additions {
        if !nodes[idx].children_ids.contains(&id) {
            nodes[idx].children_ids.push(id);
        }
    }
}

/// Pass 6: co-parent inference. User input commonly records only one parent
/// explicitly when a stable couple is already linked as partners; when that
/// single parent has exactly one plausible partner, adopt the partner as the
/// second parent and mirror the link.
///
/// Precedence, preserved from the source behavior: a lone candidate wins
/// outright; with several candidates, only one that already lists the child
/// wins; any other ambiguity suppresses the inference entirely.
fn infer_co_parents(nodes: &mut Vec<Person>) {
    let index = index_by_id(nodes);
    let mut inferred: Vec<(usize, usize)> = Vec::new();
    for (child_idx, child) in nodes.iter().enumerate() {
        if child.parent_ids.len() != 1 {
            continue;
        }
        let Some(&parent_idx) = index.get(&child.parent_ids[0]) else {
            continue;
        };
        let candidates: Vec<usize> = nodes[parent_idx]
            .partners
            .iter()
            .filter_map(|partner_id| index.get(partner_id).copied())
            .filter(|&candidate_idx| {
                candidate_idx != child_idx && !nodes[candidate_idx].shares_parent_with(child)
            })
            .collect();
        let chosen = match candidates.len() {
            0 => None,
            1 => Some(candidates[0]),
            _ => {
                let linked: Vec<usize> = candidates
                    .iter()
                    .copied()
                    .filter(|&candidate_idx| nodes[candidate_idx].children_ids.contains(&child.id))
                    .collect();
                if linked.len() == 1 { Some(linked[0]) } else { None }
            }
        };
        if let Some(candidate_idx) = chosen {
            inferred.push((child_idx, candidate_idx));
        }
    }
    for (child_idx, candidate_idx) in inferred {
        let candidate_id = nodes[candidate_idx].id.clone();
        let child_id = nodes[child_idx].id.clone();
        if !nodes[child_idx].parent_ids.contains(&candidate_id) {
            nodes[child_idx].parent_ids.push(candidate_id);
        }
        if !nodes[candidate_idx].children_ids.contains(&child_id) {
            nodes[candidate_idx].children_ids.push(child_id);
        }
    }
}

/// Pass 7: the deprecated `parent_id` always mirrors `parent_ids[0]`.
fn sync_legacy_parent(nodes: &mut [Person]) {
    for node in nodes.iter_mut() {
        node.parent_id = node.parent_ids.first().cloned();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Person;

    fn person(id: &str, label: &str) -> Person {
        Person::new(id, label)
    }

    #[test]
    fn mirrors_one_sided_parent_link() {
        let mut parent = person("p", "Pat");
        parent.children_ids.push("c".to_string());
        let child = person("c", "Kim");
        let nodes = normalize_and_link(vec![parent, child]);
        assert_eq!(nodes[1].parent_ids, vec!["p"]);
        assert_eq!(nodes[1].parent_id.as_deref(), Some("p"));
        assert_eq!(nodes[0].children_ids, vec!["c"]);
    }

    #[test]
    fn mirrors_one_sided_partner_link() {
        let mut a = person("a", "Ann");
        a.partners.push("b".to_string());
        let b = person("b", "Ben");
        let nodes = normalize_and_link(vec![a, b]);
        assert!(nodes[1].partners.contains(&"a".to_string()));
    }

    #[test]
    fn drops_dangling_references() {
        let mut a = person("a", "Ann");
        a.partners.push("ghost".to_string());
        a.children_ids.push("ghost".to_string());
        a.parent_ids.push("ghost".to_string());
        let nodes = normalize_and_link(vec![a]);
        assert!(nodes[0].partners.is_empty());
        assert!(nodes[0].children_ids.is_empty());
        assert!(nodes[0].parent_ids.is_empty());
        assert!(nodes[0].parent_id.is_none());
    }

    #[test]
    fn merges_legacy_parent_field() {
        let mut child = person("c", "Kim");
        child.parent_id = Some("p".to_string());
        let parent = person("p", "Pat");
        let nodes = normalize_and_link(vec![child, parent]);
        assert_eq!(nodes[0].parent_ids, vec!["p"]);
        assert_eq!(nodes[0].parent_id.as_deref(), Some("p"));
        assert!(nodes[1].children_ids.contains(&"c".to_string()));
    }

    #[test]
    fn strips_sibling_partner_pairs() {
        let parent = person("p", "Pat");
        let mut a = person("a", "Ann");
        a.parent_ids.push("p".to_string());
        a.partners.push("b".to_string());
        let mut b = person("b", "Ben");
        b.parent_ids.push("p".to_string());
        b.partners.push("a".to_string());
        let nodes = normalize_and_link(vec![parent, a, b]);
        assert!(nodes[1].partners.is_empty());
        assert!(nodes[2].partners.is_empty());
    }

    #[test]
    fn infers_single_partner_as_co_parent() {
        let mut a = person("a", "Ann");
        a.partners.push("b".to_string());
        let b = person("b", "Ben");
        let mut child = person("c", "Kim");
        child.parent_ids.push("a".to_string());
        let nodes = normalize_and_link(vec![a, b, child]);
        assert_eq!(nodes[2].parent_ids, vec!["a", "b"]);
        assert!(nodes[1].children_ids.contains(&"c".to_string()));
    }

    #[test]
    fn ambiguous_candidates_suppress_inference() {
        let mut a = person("a", "Ann");
        a.partners.push("b".to_string());
        a.partners.push("d".to_string());
        let b = person("b", "Ben");
        let d = person("d", "Dee");
        let mut child = person("c", "Kim");
        child.parent_ids.push("a".to_string());
        let nodes = normalize_and_link(vec![a, b, d, child]);
        assert_eq!(nodes[3].parent_ids, vec!["a"]);
    }

    #[test]
    fn trims_profile_block() {
        let mut a = person("a", "Ann");
        a.profile.text = "  kept  ".to_string();
        a.profile.website = Some("   ".to_string());
        a.profile.twitter = Some(" @ann ".to_string());
        let nodes = normalize_and_link(vec![a]);
        assert_eq!(nodes[0].profile.text, "kept");
        assert!(nodes[0].profile.website.is_none());
        assert_eq!(nodes[0].profile.twitter.as_deref(), Some("@ann"));
    }

    #[test]
    fn normalization_is_idempotent() {
        let mut a = person("a", "Ann");
        a.partners.push("b".to_string());
        let b = person("b", "Ben");
        let mut child = person("c", "Kim");
        child.parent_ids.push("a".to_string());
        child.parent_ids.push("a".to_string());
        let once = normalize_and_link(vec![a, b, child]);
        let twice = normalize_and_link(once.clone());
        assert_eq!(once, twice);
    }
}
