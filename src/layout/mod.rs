mod edges;
mod position;
mod rows;
pub(crate) mod types;
pub use rows::{RowItem, Rows, build_rows};
pub use types::*;

use crate::config::LayoutConfig;
use crate::generation::assign_generations;
use crate::model::Person;
use edges::build_connectors;
use position::position_rows;

/// Compute render-ready geometry for a canonical node collection.
///
/// Works on its own copy: generations are (re)assigned, rows built, pixel
/// coordinates placed, and connectors derived, without touching the caller's
/// collection. The result is cached for the current render only.
pub fn layout(nodes: &[Person], config: &LayoutConfig) -> Layout {
    let mut working = nodes.to_vec();
    assign_generations(&mut working);
    let rows = build_rows(&working);
    let (positioned, width, height) = position_rows(&rows, &working, config);
    let edges = build_connectors(&working, &positioned);
    Layout {
        nodes: positioned,
        edges,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Person;
    use crate::normalize::normalize_and_link;

    #[test]
    fn single_root_lays_out_alone() {
        let nodes = normalize_and_link(vec![Person::new("n1", "Ann")]);
        let config = LayoutConfig::default();
        let result = layout(&nodes, &config);
        assert_eq!(result.nodes.len(), 1);
        assert_eq!(result.nodes["n1"].row, 0);
        assert!(result.edges.is_empty());
    }

    #[test]
    fn couple_with_child_emits_both_edge_kinds() {
        let mut n1 = Person::new("n1", "Ann");
        n1.partners.push("n2".to_string());
        let n2 = Person::new("n2", "Ben");
        let mut n3 = Person::new("n3", "Kim");
        n3.parent_ids.push("n1".to_string());
        let nodes = normalize_and_link(vec![n1, n2, n3]);

        // Co-parent inference has already adopted n2.
        assert_eq!(nodes[2].parent_ids, vec!["n1", "n2"]);
        assert_eq!(nodes[2].generation, 1);

        let result = layout(&nodes, &LayoutConfig::default());
        let spouses = result
            .edges
            .iter()
            .filter(|edge| matches!(edge, Connector::Spouse { .. }))
            .count();
        let unions = result
            .edges
            .iter()
            .filter(|edge| matches!(edge, Connector::UnionChild { .. }))
            .count();
        assert_eq!(spouses, 1);
        assert_eq!(unions, 1);
    }

    #[test]
    fn layout_leaves_input_untouched() {
        let mut parent = Person::new("p", "Pat");
        parent.children_ids.push("c".to_string());
        let child = Person::new("c", "Kim");
        let nodes = normalize_and_link(vec![parent, child]);
        let before = nodes.clone();
        let _ = layout(&nodes, &LayoutConfig::default());
        assert_eq!(nodes, before);
    }
}
