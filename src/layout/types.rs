use crate::model::{LineTag, Sex};
use serde::Serialize;
use std::collections::BTreeMap;

/// One positioned person card. `generation` here is the row index actually
/// shown, which becomes authoritative for rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeLayout {
    pub id: String,
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub row: usize,
    pub order: usize,
    pub generation: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
}

impl NodeLayout {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Drawable connector geometry. Spouse connectors are a direct two-point
/// path between partner centers; union-child connectors are the orthogonal
/// elbow from a parent group down to one child.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum Connector {
    #[serde(rename = "spouse")]
    Spouse {
        a: String,
        b: String,
        points: Vec<(f32, f32)>,
    },
    #[serde(rename = "union-child")]
    UnionChild {
        parents: Vec<String>,
        child: String,
        points: Vec<(f32, f32)>,
    },
}

impl Connector {
    pub fn points(&self) -> &[(f32, f32)] {
        match self {
            Connector::Spouse { points, .. } => points,
            Connector::UnionChild { points, .. } => points,
        }
    }
}

/// Render-ready output of the layout stage: positioned nodes, drawable edge
/// paths, and the overall canvas extent. Cached per render, never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub nodes: BTreeMap<String, NodeLayout>,
    pub edges: Vec<Connector>,
    pub width: f32,
    pub height: f32,
}
