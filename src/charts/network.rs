//! Force-directed graph widget.
//! Lays out nodes with a small spring/repulsion simulation stepped once per
//! frame and paints them with the egui painter. Supports pan (drag) and
//! zoom (scroll).

use egui::{vec2, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};
use std::collections::{HashMap, HashSet};

const BACKGROUND: Color32 = Color32::from_rgb(0x2B, 0x2B, 0x2B);
const LABEL_COLOR: Color32 = Color32::from_rgb(0xEE, 0xEE, 0xEE);
const EDGE_LABEL_COLOR: Color32 = Color32::from_rgb(0xAA, 0xAA, 0xAA);

/// Frames simulated after a change before the layout is considered settled.
const SETTLE_FRAMES: u32 = 240;

/// Node description handed to [`ForceGraph::set_nodes`].
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    pub id: String,
    pub label: String,
    pub color: Color32,
    pub radius: f32,
    /// Held at the origin (e.g. the centre of a star).
    pub pinned: bool,
    pub outline: Option<Stroke>,
}

impl NodeSpec {
    pub fn new(id: impl Into<String>, label: impl Into<String>, color: Color32, radius: f32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            color,
            radius,
            pinned: false,
            outline: None,
        }
    }

    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    pub fn outline(mut self, stroke: Stroke) -> Self {
        self.outline = Some(stroke);
        self
    }
}

/// Edge description handed to [`ForceGraph::set_links`].
#[derive(Debug, Clone, PartialEq)]
pub struct LinkSpec {
    pub a: String,
    pub b: String,
    pub color: Color32,
    pub width: f32,
    pub label: Option<String>,
    /// Hidden links still pull on the layout but are not painted.
    pub visible: bool,
}

#[derive(Debug, Clone)]
struct Node {
    spec: NodeSpec,
    pos: Vec2,
    vel: Vec2,
}

#[derive(Debug, Clone)]
struct Link {
    from: usize,
    to: usize,
    spec: LinkSpec,
}

/// Interactive force-directed graph.
pub struct ForceGraph {
    id: String,
    nodes: Vec<Node>,
    links: Vec<Link>,
    index: HashMap<String, usize>,
    pan: Vec2,
    zoom: f32,
    settle: u32,
    message: Option<String>,
}

fn seed_position(i: usize) -> Vec2 {
    let angle = i as f32 * 2.399_963;
    let radius = 40.0 * ((i + 1) as f32).sqrt();
    vec2(angle.cos(), angle.sin()) * radius
}

impl ForceGraph {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            nodes: Vec::new(),
            links: Vec::new(),
            index: HashMap::new(),
            pan: Vec2::ZERO,
            zoom: 1.0,
            settle: 0,
            message: None,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn visible_link_count(&self) -> usize {
        self.links.iter().filter(|l| l.spec.visible).count()
    }

    /// Text painted in the middle of the canvas instead of a graph.
    pub fn set_message(&mut self, message: Option<String>) {
        self.message = message;
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.links.clear();
        self.index.clear();
    }

    /// Replace the node set. Nodes whose id already existed keep their position.
    pub fn set_nodes(&mut self, specs: Vec<NodeSpec>) {
        let previous: HashMap<String, (Vec2, Vec2)> = self
            .nodes
            .drain(..)
            .map(|n| (n.spec.id.clone(), (n.pos, n.vel)))
            .collect();

        self.index.clear();
        for (i, spec) in specs.into_iter().enumerate() {
            let (pos, vel) = if spec.pinned {
                (Vec2::ZERO, Vec2::ZERO)
            } else {
                previous
                    .get(&spec.id)
                    .copied()
                    .unwrap_or((seed_position(i), Vec2::ZERO))
            };
            self.index.insert(spec.id.clone(), i);
            self.nodes.push(Node { spec, pos, vel });
        }
        self.links.clear();
        self.settle = SETTLE_FRAMES;
    }

    /// Replace the links. Links naming unknown nodes are dropped, as are
    /// duplicates of an already-linked unordered pair.
    pub fn set_links(&mut self, specs: Vec<LinkSpec>) {
        self.links.clear();
        let mut seen = HashSet::new();
        for spec in specs {
            let (Some(&from), Some(&to)) = (self.index.get(&spec.a), self.index.get(&spec.b)) else {
                continue;
            };
            if from == to || !seen.insert((from.min(to), from.max(to))) {
                continue;
            }
            self.links.push(Link { from, to, spec });
        }
        self.settle = self.settle.max(SETTLE_FRAMES / 2);
    }

    pub fn is_settling(&self) -> bool {
        self.settle > 0
    }

    #[cfg(test)]
    fn position_of(&self, id: &str) -> Option<Vec2> {
        self.index.get(id).map(|&i| self.nodes[i].pos)
    }

    /// Advance the simulation by one step.
    pub fn step(&mut self) {
        let n = self.nodes.len();
        if n == 0 {
            self.settle = 0;
            return;
        }
        self.settle = self.settle.saturating_sub(1);

        let repulsion = 9_000.0;
        let spring = 0.02;
        let preferred = 110.0;
        let center_pull = 0.004;
        let damping = 0.82;
        let softening = 400.0;

        let mut forces = vec![Vec2::ZERO; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let delta = self.nodes[i].pos - self.nodes[j].pos;
                let distance_sq = delta.length_sq();
                let direction = if distance_sq > 1e-6 {
                    delta / distance_sq.sqrt()
                } else {
                    let angle = (i as f32 * 0.618_034 + j as f32 * 0.414_214) * std::f32::consts::TAU;
                    vec2(angle.cos(), angle.sin())
                };
                let push = repulsion / (distance_sq + softening);
                forces[i] += direction * push;
                forces[j] -= direction * push;
            }
        }

        for link in &self.links {
            let delta = self.nodes[link.from].pos - self.nodes[link.to].pos;
            let distance = delta.length();
            if distance <= 1e-4 {
                continue;
            }
            let correction = delta / distance * (distance - preferred) * spring;
            forces[link.from] -= correction;
            forces[link.to] += correction;
        }

        for (node, force) in self.nodes.iter_mut().zip(forces) {
            if node.spec.pinned {
                node.pos = Vec2::ZERO;
                node.vel = Vec2::ZERO;
                continue;
            }
            let force = force - node.pos * center_pull;
            node.vel = (node.vel + force) * damping;
            node.pos += node.vel;
        }
    }

    fn to_screen(&self, rect: Rect, world: Vec2) -> Pos2 {
        rect.center() + self.pan + world * self.zoom
    }

    /// Paint the graph filling the available space.
    pub fn show(&mut self, ui: &mut egui::Ui) {
        if self.is_settling() {
            self.step();
            ui.ctx().request_repaint();
        }

        let (rect, _) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
        let response = ui.interact(rect, ui.id().with(&self.id), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, BACKGROUND);

        if let Some(message) = &self.message {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                message,
                FontId::proportional(18.0),
                EDGE_LABEL_COLOR,
            );
            return;
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll.abs() > f32::EPSILON {
                self.zoom = (self.zoom * (1.0 + scroll * 0.0018)).clamp(0.2, 5.0);
            }
        }
        if response.dragged() {
            self.pan += response.drag_delta();
        }
        if response.double_clicked() {
            self.pan = Vec2::ZERO;
            self.zoom = 1.0;
        }

        for link in self.links.iter().filter(|l| l.spec.visible) {
            let a = self.to_screen(rect, self.nodes[link.from].pos);
            let b = self.to_screen(rect, self.nodes[link.to].pos);
            painter.line_segment([a, b], Stroke::new(link.spec.width, link.spec.color));
            if let Some(label) = &link.spec.label {
                painter.text(
                    a + (b - a) * 0.5,
                    Align2::CENTER_CENTER,
                    label,
                    FontId::proportional(11.0),
                    EDGE_LABEL_COLOR,
                );
            }
        }

        let pointer = response.hover_pos();
        let mut hovered = false;
        for node in &self.nodes {
            let center = self.to_screen(rect, node.pos);
            let radius = node.spec.radius * self.zoom.sqrt();
            painter.circle(
                center,
                radius,
                node.spec.color,
                node.spec.outline.unwrap_or(Stroke::new(1.0, Color32::from_gray(0x33))),
            );
            painter.text(
                center + vec2(0.0, radius + 8.0),
                Align2::CENTER_CENTER,
                &node.spec.label,
                FontId::proportional(13.0),
                LABEL_COLOR,
            );
            if pointer.is_some_and(|p| p.distance(center) <= radius) {
                hovered = true;
            }
        }

        if hovered {
            ui.output_mut(|o| o.cursor_icon = egui::CursorIcon::Grab);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(ids: &[&str]) -> Vec<NodeSpec> {
        ids.iter()
            .map(|id| NodeSpec::new(*id, *id, Color32::GRAY, 10.0))
            .collect()
    }

    fn link(a: &str, b: &str) -> LinkSpec {
        LinkSpec {
            a: a.into(),
            b: b.into(),
            color: Color32::RED,
            width: 2.0,
            label: None,
            visible: true,
        }
    }

    #[test]
    fn links_to_unknown_nodes_are_dropped() {
        let mut g = ForceGraph::new("t");
        g.set_nodes(nodes(&["en", "de"]));
        g.set_links(vec![link("en", "de"), link("de", "en"), link("en", "fr")]);
        assert_eq!(g.visible_link_count(), 1);
    }

    #[test]
    fn positions_survive_node_refresh() {
        let mut g = ForceGraph::new("t");
        g.set_nodes(nodes(&["en", "de", "fr"]));
        for _ in 0..20 {
            g.step();
        }
        let before = g.position_of("de").unwrap();
        g.set_nodes(nodes(&["de", "fr", "es"]));
        assert_eq!(g.position_of("de"), Some(before));
        assert!(g.position_of("en").is_none());
    }

    #[test]
    fn simulation_settles_and_stays_finite() {
        let mut g = ForceGraph::new("t");
        g.set_nodes(nodes(&["a", "b", "c", "d"]));
        g.set_links(vec![link("a", "b"), link("b", "c")]);
        while g.is_settling() {
            g.step();
        }
        for id in ["a", "b", "c", "d"] {
            let p = g.position_of(id).unwrap();
            assert!(p.x.is_finite() && p.y.is_finite());
        }
    }

    #[test]
    fn pinned_nodes_stay_at_origin() {
        let mut g = ForceGraph::new("t");
        let mut specs = nodes(&["s1", "s2"]);
        specs.insert(0, NodeSpec::new("CENTER", "centre", Color32::YELLOW, 20.0).pinned());
        g.set_nodes(specs);
        g.set_links(vec![link("CENTER", "s1"), link("CENTER", "s2")]);
        for _ in 0..50 {
            g.step();
        }
        assert_eq!(g.position_of("CENTER"), Some(Vec2::ZERO));
    }
}
