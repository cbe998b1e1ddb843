use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cosmetic lineage tag. Display styling only; never consulted by the
/// consistency or layout passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTag {
    Paternal,
    Maternal,
    Union,
    Descendant,
    #[serde(rename = "self")]
    SelfLine,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAttachment {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkRecord {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

/// Free-text description block. The optional handle fields are dropped by
/// normalization when empty or whitespace-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

/// One member of the family graph. Relationships are held by ID, never by
/// embedding, so the record stays serializable and the normalization passes
/// can treat the collection as an arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_year: Option<i32>,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub media: Vec<MediaAttachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub works: Option<Vec<WorkRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<LineTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    /// Multi-parent list; biological convention caps at two, the data model
    /// does not hard-enforce it.
    #[serde(default)]
    pub parent_ids: Vec<String>,
    /// Deprecated single-parent mirror, kept equal to `parent_ids[0]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub partners: Vec<String>,
    #[serde(default)]
    pub children_ids: Vec<String>,
    /// Computed depth; recomputed by the engine whenever the graph changes.
    /// Stored values only seed the relaxation and are clamped to >= 0.
    #[serde(default)]
    pub generation: i64,
}

impl Person {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            birth_year: None,
            death_year: None,
            profile: Profile::default(),
            media: Vec::new(),
            works: None,
            image: None,
            line: None,
            sex: None,
            parent_ids: Vec::new(),
            parent_id: None,
            partners: Vec::new(),
            children_ids: Vec::new(),
            generation: 0,
        }
    }

    /// True when the two people share at least one parent.
    pub fn shares_parent_with(&self, other: &Person) -> bool {
        self.parent_ids
            .iter()
            .any(|parent| other.parent_ids.contains(parent))
    }
}

/// ID -> index lookup over an order-preserving node slice. Rebuilt per pass;
/// later duplicates of an ID are ignored so the first record wins.
pub fn index_by_id(nodes: &[Person]) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(nodes.len());
    for (idx, node) in nodes.iter().enumerate() {
        index.entry(node.id.clone()).or_insert(idx);
    }
    index
}

/// Case-insensitive label ordering used everywhere a deterministic person
/// order is needed. Falls back to the raw label, then the ID, so equal-label
/// rows still sort stably.
pub fn label_cmp(a: &Person, b: &Person) -> std::cmp::Ordering {
    a.label
        .to_lowercase()
        .cmp(&b.label.to_lowercase())
        .then_with(|| a.label.cmp(&b.label))
        .then_with(|| a.id.cmp(&b.id))
}
