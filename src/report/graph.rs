//! Two-column node-link diagram of symptoms and the conditions they feed.
//!
//! Symptoms sit in the left column, ranked conditions in the right. An edge
//! joins a symptom to a condition whenever the symptom's prime divides the
//! condition's signature quotient.

use serde::Serialize;
use std::fmt::Write as _;

use crate::core::condition::DiseaseMatch;
use crate::core::symptom::Symptom;
use crate::report::escape_html;
use crate::report::palette::color_for;
use crate::utils::validation::divides;

pub const WIDTH: f64 = 800.0;
pub const HEIGHT: f64 = 400.0;
pub const SIDE_MARGIN: f64 = 200.0;
pub const VERTICAL_MARGIN: f64 = 50.0;
pub const NODE_RADIUS: f64 = 10.0;

/// Helper function to convert usize count to f64 with explicit precision loss allowance
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub color: &'static str,
}

/// Edge between `symptoms[symptom]` and `conditions[condition]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub symptom: usize,
    pub condition: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualizationGraph {
    pub symptoms: Vec<GraphNode>,
    pub conditions: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Evenly space `count` nodes down a column, leaving one gap above and below
fn column_y(index: usize, count: usize) -> f64 {
    let spacing = (HEIGHT - 2.0 * VERTICAL_MARGIN) / count_to_f64(count + 1);
    VERTICAL_MARGIN + count_to_f64(index + 1) * spacing
}

impl VisualizationGraph {
    /// Lay out the graph. Returns `None` when either column would be empty,
    /// in which case there is nothing to draw.
    pub fn layout(symptoms: &[Symptom], matches: &[DiseaseMatch]) -> Option<Self> {
        if symptoms.is_empty() || matches.is_empty() {
            return None;
        }

        let left_x = SIDE_MARGIN;
        let right_x = WIDTH - SIDE_MARGIN;

        let symptom_nodes = symptoms
            .iter()
            .enumerate()
            .map(|(i, s)| GraphNode {
                label: format!("{} ({})", s.name, s.prime),
                x: left_x,
                y: column_y(i, symptoms.len()),
                color: color_for(s.group.label()),
            })
            .collect();

        let condition_nodes = matches
            .iter()
            .enumerate()
            .map(|(i, m)| GraphNode {
                label: format!("{} ({})", m.name, m.match_count),
                x: right_x,
                y: column_y(i, matches.len()),
                color: color_for(&m.category),
            })
            .collect();

        let mut edges = Vec::new();
        for (si, symptom) in symptoms.iter().enumerate() {
            for (ci, condition) in matches.iter().enumerate() {
                if divides(condition.signature_quotient, symptom.prime) {
                    edges.push(GraphEdge {
                        symptom: si,
                        condition: ci,
                    });
                }
            }
        }

        Some(Self {
            symptoms: symptom_nodes,
            conditions: condition_nodes,
            edges,
        })
    }

    /// Render as a standalone SVG document fragment
    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" width="{WIDTH}" height="{HEIGHT}" class="visualization" role="img">"#
        );

        // Edges first so nodes are drawn over them
        svg.push_str(r##"<g stroke="#888" stroke-width="1" opacity="0.3">"##);
        svg.push('\n');
        for edge in &self.edges {
            let from = &self.symptoms[edge.symptom];
            let to = &self.conditions[edge.condition];
            let _ = writeln!(
                svg,
                r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}"/>"#,
                from.x, from.y, to.x, to.y
            );
        }
        svg.push_str("</g>\n");

        for node in &self.symptoms {
            write_node(&mut svg, node, "end", node.x - 15.0);
        }
        for node in &self.conditions {
            write_node(&mut svg, node, "start", node.x + 15.0);
        }

        let _ = writeln!(
            svg,
            r##"<text x="{SIDE_MARGIN}" y="25" text-anchor="middle" font-weight="bold" font-size="14" fill="#333">Symptoms</text>"##
        );
        let _ = writeln!(
            svg,
            r##"<text x="{}" y="25" text-anchor="middle" font-weight="bold" font-size="14" fill="#333">Potential Conditions</text>"##,
            WIDTH - SIDE_MARGIN
        );
        svg.push_str("</svg>\n");
        svg
    }
}

fn write_node(svg: &mut String, node: &GraphNode, anchor: &str, label_x: f64) {
    let color = node.color;
    let _ = writeln!(
        svg,
        r##"<circle cx="{:.1}" cy="{:.1}" r="{NODE_RADIUS}" fill="{color}" stroke="#666" stroke-width="1"/>"##,
        node.x, node.y
    );
    let _ = writeln!(
        svg,
        r##"<text x="{label_x:.1}" y="{:.1}" text-anchor="{anchor}" font-size="12" fill="#333">{}</text>"##,
        node.y + 4.0,
        escape_html(&node.label)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::Catalog;
    use crate::matching::engine::MatchingEngine;
    use crate::matching::selection::SymptomSelection;

    fn analyze(catalog: &Catalog, names: &[&str]) -> (Vec<Symptom>, Vec<DiseaseMatch>) {
        let mut selection = SymptomSelection::new();
        for name in names {
            selection.add(catalog.find_by_name(name).unwrap());
        }
        let matches = MatchingEngine::new(catalog).find_matches(&selection);
        (selection.as_slice().to_vec(), matches)
    }

    #[test]
    fn test_empty_inputs_have_no_graph() {
        let catalog = Catalog::load_embedded().unwrap();
        let (symptoms, matches) = analyze(&catalog, &["Confusion"]);
        assert!(VisualizationGraph::layout(&symptoms, &matches).is_none());
        assert!(VisualizationGraph::layout(&[], &[]).is_none());
    }

    #[test]
    fn test_edges_follow_divisibility() {
        let catalog = Catalog::load_embedded().unwrap();
        let (symptoms, matches) = analyze(&catalog, &["Itchy eyes", "Fever", "Confusion"]);
        let graph = VisualizationGraph::layout(&symptoms, &matches).unwrap();

        // Influenza (13 | sqf) and Seasonal Allergies (29 | sqf); Confusion feeds nothing
        assert_eq!(graph.conditions.len(), 2);
        assert_eq!(
            graph.edges,
            vec![
                GraphEdge {
                    symptom: 0,
                    condition: 1
                },
                GraphEdge {
                    symptom: 1,
                    condition: 0
                },
            ]
        );
    }

    #[test]
    fn test_layout_positions() {
        let catalog = Catalog::load_embedded().unwrap();
        let (symptoms, matches) = analyze(&catalog, &["Cough"]);
        let graph = VisualizationGraph::layout(&symptoms, &matches).unwrap();

        // One symptom sits midway down the drawable area
        let cough = &graph.symptoms[0];
        assert!((cough.x - 200.0).abs() < f64::EPSILON);
        assert!((cough.y - 200.0).abs() < f64::EPSILON);
        assert_eq!(cough.label, "Cough (2)");

        // Three conditions at 125, 200, 275
        let ys: Vec<f64> = graph.conditions.iter().map(|n| n.y).collect();
        assert!((ys[0] - 125.0).abs() < 1e-9);
        assert!((ys[2] - 275.0).abs() < 1e-9);
        assert!(graph.conditions.iter().all(|n| (n.x - 600.0).abs() < f64::EPSILON));
        assert_eq!(graph.edges.len(), 3);
    }

    #[test]
    fn test_svg_contains_nodes_and_escaped_labels() {
        let catalog = Catalog::load_embedded().unwrap();
        let (symptoms, matches) = analyze(&catalog, &["Cough", "Sneezing"]);
        let svg = VisualizationGraph::layout(&symptoms, &matches)
            .unwrap()
            .to_svg();

        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<circle").count(), 2 + 3);
        assert_eq!(svg.matches("<line").count(), 3 + 2);
        assert!(svg.contains("Common Cold (2)"));
        assert!(svg.contains("Potential Conditions"));
    }
}
