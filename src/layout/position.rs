use crate::config::LayoutConfig;
use crate::layout::rows::{RowItem, Rows};
use crate::layout::types::NodeLayout;
use crate::model::{Person, index_by_id};
use std::collections::BTreeMap;

/// Turn ordered rows into pixel coordinates. Rows are laid out left to right
/// with a fixed node box and column gap (break markers add the group gap on
/// top), centered against the widest row, and stacked with fixed vertical
/// spacing. The row index overwrites `generation` here; it is the value the
/// renderer trusts.
pub fn position_rows(
    rows: &Rows,
    nodes: &[Person],
    config: &LayoutConfig,
) -> (BTreeMap<String, NodeLayout>, f32, f32) {
    let index = index_by_id(nodes);

    // First sweep: x offsets relative to each row's own left edge.
    let mut relative: Vec<Vec<(String, f32)>> = Vec::with_capacity(rows.rows.len());
    let mut widest = 0.0f32;
    for row in &rows.rows {
        let mut placed: Vec<(String, f32)> = Vec::new();
        let mut cursor = 0.0f32;
        let mut pending_gap = false;
        for item in row {
            match item {
                RowItem::Gap => pending_gap = true,
                RowItem::Node(id) => {
                    if !placed.is_empty() {
                        cursor += config.column_gap;
                    }
                    if pending_gap {
                        cursor += config.group_gap;
                        pending_gap = false;
                    }
                    placed.push((id.clone(), cursor));
                    cursor += config.node_width;
                }
            }
        }
        widest = widest.max(cursor);
        relative.push(placed);
    }

    // Second sweep: center every row within the widest extent.
    let mut positioned: BTreeMap<String, NodeLayout> = BTreeMap::new();
    for (row_idx, placed) in relative.iter().enumerate() {
        let extent = placed
            .last()
            .map(|(_, x)| x + config.node_width)
            .unwrap_or(0.0);
        let shift = config.padding_x + (widest - extent) / 2.0;
        let y = config.padding_y + row_idx as f32 * config.row_spacing;
        for (id, x) in placed {
            let Some(&node_idx) = index.get(id) else {
                continue;
            };
            let node = &nodes[node_idx];
            let (_, order) = rows.order.get(id).copied().unwrap_or((row_idx, 0));
            positioned.insert(
                id.clone(),
                NodeLayout {
                    id: id.clone(),
                    label: node.label.clone(),
                    x: x + shift,
                    y,
                    width: config.node_width,
                    height: config.node_height,
                    row: row_idx,
                    order,
                    generation: row_idx as i64,
                    line: node.line,
                    sex: node.sex,
                },
            );
        }
    }

    let width = widest + config.padding_x * 2.0;
    let height = if rows.rows.is_empty() {
        config.padding_y * 2.0
    } else {
        config.padding_y * 2.0
            + (rows.rows.len() - 1) as f32 * config.row_spacing
            + config.node_height
    };
    (positioned, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::rows::build_rows;
    use crate::model::Person;

    fn person(id: &str, label: &str, generation: i64) -> Person {
        let mut p = Person::new(id, label);
        p.generation = generation;
        p
    }

    #[test]
    fn rows_share_a_y_and_stack_vertically() {
        let mut parent = person("p", "Pat", 0);
        parent.children_ids.push("c".to_string());
        let mut child = person("c", "Kim", 1);
        child.parent_ids.push("p".to_string());
        let nodes = vec![parent, child];
        let config = LayoutConfig::default();
        let (positioned, _, _) = position_rows(&build_rows(&nodes), &nodes, &config);
        assert_eq!(positioned["p"].y, config.padding_y);
        assert_eq!(positioned["c"].y, config.padding_y + config.row_spacing);
    }

    #[test]
    fn narrow_row_is_centered_under_the_widest() {
        let mut parent = person("p", "Pat", 0);
        parent.children_ids.push("c".to_string());
        let other = person("q", "Quinn", 0);
        let mut child = person("c", "Kim", 1);
        child.parent_ids.push("p".to_string());
        let nodes = vec![parent, other, child];
        let config = LayoutConfig::default();
        let (positioned, width, _) = position_rows(&build_rows(&nodes), &nodes, &config);

        let widest = config.node_width * 2.0 + config.column_gap;
        assert_eq!(width, widest + config.padding_x * 2.0);
        let expected_x = config.padding_x + (widest - config.node_width) / 2.0;
        assert_eq!(positioned["c"].x, expected_x);
    }

    #[test]
    fn row_index_overwrites_generation() {
        // A stored generation of 7 with nothing in between still renders in
        // row 1, and the layout says so.
        let root = person("a", "Ann", 0);
        let mut deep = person("b", "Ben", 7);
        deep.parent_ids.push("a".to_string());
        let nodes = vec![root, deep];
        let config = LayoutConfig::default();
        let (positioned, _, _) = position_rows(&build_rows(&nodes), &nodes, &config);
        assert_eq!(positioned["b"].row, 1);
        assert_eq!(positioned["b"].generation, 1);
    }

    #[test]
    fn empty_input_yields_padding_only_canvas() {
        let nodes: Vec<Person> = Vec::new();
        let config = LayoutConfig::default();
        let (positioned, width, height) = position_rows(&build_rows(&nodes), &nodes, &config);
        assert!(positioned.is_empty());
        assert_eq!(width, config.padding_x * 2.0);
        assert_eq!(height, config.padding_y * 2.0);
    }
}
