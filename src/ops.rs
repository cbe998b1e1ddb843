use crate::cycle::detect_cycle;
use crate::error::GraphError;
use crate::model::{LineTag, MediaAttachment, Person, Profile, Sex, WorkRecord};
use crate::normalize::normalize_and_link;
use serde::Deserialize;

/// Partial update for an existing person. `None` leaves a field unchanged;
/// relationship arrays are replaced wholesale when present and re-mirrored by
/// normalization afterwards.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonUpdate {
    pub label: Option<String>,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub profile: Option<Profile>,
    pub media: Option<Vec<MediaAttachment>>,
    pub works: Option<Vec<WorkRecord>>,
    pub image: Option<String>,
    pub line: Option<LineTag>,
    pub sex: Option<Sex>,
    pub parent_ids: Option<Vec<String>>,
    pub parent_id: Option<String>,
    pub partners: Option<Vec<String>>,
    pub children_ids: Option<Vec<String>>,
}

impl PersonUpdate {
    fn apply(&self, node: &mut Person) {
        if let Some(label) = &self.label {
            node.label = label.clone();
        }
        if let Some(year) = self.birth_year {
            node.birth_year = Some(year);
        }
        if let Some(year) = self.death_year {
            node.death_year = Some(year);
        }
        if let Some(profile) = &self.profile {
            node.profile = profile.clone();
        }
        if let Some(media) = &self.media {
            node.media = media.clone();
        }
        if let Some(works) = &self.works {
            node.works = Some(works.clone());
        }
        if let Some(image) = &self.image {
            node.image = Some(image.clone());
        }
        if let Some(line) = self.line {
            node.line = Some(line);
        }
        if let Some(sex) = self.sex {
            node.sex = Some(sex);
        }
        if let Some(parent_ids) = &self.parent_ids {
            node.parent_ids = parent_ids.clone();
        }
        if let Some(parent_id) = &self.parent_id {
            node.parent_id = Some(parent_id.clone());
        }
        if let Some(partners) = &self.partners {
            node.partners = partners.clone();
        }
        if let Some(children_ids) = &self.children_ids {
            node.children_ids = children_ids.clone();
        }
    }
}

/// Insert a caller-supplied (possibly partial) record and re-canonicalize the
/// whole collection. An existing record with the same ID is replaced in
/// place, preserving collection order. Rejected without side effects when the
/// new record's child links would close a cycle.
pub fn create_person(nodes: Vec<Person>, draft: Person) -> Result<Vec<Person>, GraphError> {
    if detect_cycle(&nodes, Some(&draft)) {
        return Err(GraphError::CycleDetected { id: draft.id });
    }
    let mut nodes = nodes;
    match nodes.iter_mut().find(|node| node.id == draft.id) {
        Some(existing) => *existing = draft,
        None => nodes.push(draft),
    }
    Ok(normalize_and_link(nodes))
}

/// Apply a partial update, vetting changed parent/child links against the
/// cycle detector first. No partial mutation is ever committed: a rejected
/// update leaves the caller's collection as it was.
pub fn update_person(
    nodes: Vec<Person>,
    id: &str,
    update: &PersonUpdate,
) -> Result<Vec<Person>, GraphError> {
    let Some(position) = nodes.iter().position(|node| node.id == id) else {
        return Err(GraphError::UnknownNode { id: id.to_string() });
    };
    let mut candidate = nodes[position].clone();
    update.apply(&mut candidate);
    if detect_cycle(&nodes, Some(&candidate)) {
        return Err(GraphError::CycleDetected { id: id.to_string() });
    }
    let mut nodes = nodes;
    nodes[position] = candidate;
    Ok(normalize_and_link(nodes))
}

/// Remove a person and strip the ID from every other node's relationship
/// arrays. A child left with one parent gets it promoted into the legacy
/// `parent_id` slot by the normalization that follows.
pub fn remove_person(nodes: Vec<Person>, id: &str) -> Result<Vec<Person>, GraphError> {
    if !nodes.iter().any(|node| node.id == id) {
        return Err(GraphError::UnknownNode { id: id.to_string() });
    }
    let mut nodes = nodes;
    nodes.retain(|node| node.id != id);
    for node in nodes.iter_mut() {
        node.parent_ids.retain(|other| other != id);
        node.partners.retain(|other| other != id);
        node.children_ids.retain(|other| other != id);
        if node.parent_id.as_deref() == Some(id) {
            node.parent_id = None;
        }
    }
    Ok(normalize_and_link(nodes))
}

/// Record a partnership between two existing people. Unknown IDs make this a
/// no-op returning the input unchanged; mirroring and the sibling/partner
/// rule are applied by normalization.
pub fn add_partner_link(nodes: Vec<Person>, a: &str, b: &str) -> Vec<Person> {
    if a == b {
        return nodes;
    }
    let known_a = nodes.iter().any(|node| node.id == a);
    let known_b = nodes.iter().any(|node| node.id == b);
    if !known_a || !known_b {
        return nodes;
    }
    let mut nodes = nodes;
    if let Some(node) = nodes.iter_mut().find(|node| node.id == a) {
        if !node.partners.contains(&b.to_string()) {
            node.partners.push(b.to_string());
        }
    }
    normalize_and_link(nodes)
}

/// Record a parent->child link. Unknown IDs are a no-op; a link that would
/// make the child its own ancestor is rejected without side effects.
pub fn add_parent_link(
    nodes: Vec<Person>,
    child: &str,
    parent: &str,
) -> Result<Vec<Person>, GraphError> {
    if child == parent {
        return Err(GraphError::CycleDetected { id: child.to_string() });
    }
    let known_child = nodes.iter().any(|node| node.id == child);
    let known_parent = nodes.iter().any(|node| node.id == parent);
    if !known_child || !known_parent {
        return Ok(nodes);
    }
    let mut candidate = nodes
        .iter()
        .find(|node| node.id == parent)
        .cloned()
        .unwrap_or_else(|| Person::new(parent, parent));
    if !candidate.children_ids.contains(&child.to_string()) {
        candidate.children_ids.push(child.to_string());
    }
    if detect_cycle(&nodes, Some(&candidate)) {
        return Err(GraphError::CycleDetected { id: child.to_string() });
    }
    let mut nodes = nodes;
    if let Some(node) = nodes.iter_mut().find(|node| node.id == parent) {
        *node = candidate;
    }
    Ok(normalize_and_link(nodes))
}
