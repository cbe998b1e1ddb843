use crate::layout::{Connector, Layout};
use crate::model::LineTag;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// JSON shape handed across the rendering boundary: positioned cards, flat
/// connector paths, canvas extent.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDump {
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
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDump {
    pub kind: String,
    pub ends: Vec<String>,
    pub points: Vec<[f32; 2]>,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let nodes = layout
            .nodes
            .values()
            .map(|node| NodeDump {
                id: node.id.clone(),
                label: node.label.clone(),
                x: node.x,
                y: node.y,
                width: node.width,
                height: node.height,
                row: node.row,
                order: node.order,
                generation: node.generation,
                line: node.line,
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .map(|edge| {
                let (kind, ends) = match edge {
                    Connector::Spouse { a, b, .. } => {
                        ("spouse".to_string(), vec![a.clone(), b.clone()])
                    }
                    Connector::UnionChild { parents, child, .. } => {
                        let mut ends = parents.clone();
                        ends.push(child.clone());
                        ("union-child".to_string(), ends)
                    }
                };
                EdgeDump {
                    kind,
                    ends,
                    points: edge.points().iter().map(|(x, y)| [*x, *y]).collect(),
                }
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            nodes,
            edges,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::layout::layout;
    use crate::model::Person;
    use crate::normalize::normalize_and_link;

    #[test]
    fn dump_serializes_edge_kinds() {
        let mut a = Person::new("a", "Ann");
        a.partners.push("b".to_string());
        let b = Person::new("b", "Ben");
        let mut c = Person::new("c", "Kim");
        c.parent_ids.push("a".to_string());
        let nodes = normalize_and_link(vec![a, b, c]);
        let dump = LayoutDump::from_layout(&layout(&nodes, &LayoutConfig::default()));
        let json = serde_json::to_string(&dump).expect("serialize failed");
        assert!(json.contains("\"spouse\""));
        assert!(json.contains("\"union-child\""));
    }
}
