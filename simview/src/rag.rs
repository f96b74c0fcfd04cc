//! Resource-allocation graphs: one per strategy, with an "allocated"
//! edge from every block to the process it holds and a "requesting"
//! edge from every unplaced process to some block.

use crate::*;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use rand::Rng;

const SKYBLUE:      RGBColor = RGBColor(135, 206, 235);
const LIGHTGREEN:   RGBColor = RGBColor(144, 238, 144);

const WIDTH:        u32 = 1000;
const HEIGHT:       u32 = 800;
const NODE_RADIUS:  i32 = 28;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Node {
    Process(ProcessId),
    Resource(BlockId),
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Process(p)    => { write!(f, "{}", p) },
            Node::Resource(r)   => { write!(f, "R{}", r) },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    /// Resource -> process.
    Allocated,
    /// Process -> resource.
    Requesting,
}

impl EdgeKind {
    fn color(&self) -> RGBColor {
        match self {
            EdgeKind::Allocated     => { RED },
            EdgeKind::Requesting    => { BLUE },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub from:   Node,
    pub to:     Node,
    pub kind:   EdgeKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocationGraph {
    pub processes:  usize,
    pub resources:  usize,
    pub edges:      Vec<Edge>,
}

impl AllocationGraph {
    /// Turns an assignment into edges. An unplaced process did not ask
    /// for any block in particular, so the one it is drawn requesting
    /// is picked by `rng`.
    pub fn build<R: Rng + ?Sized>(outcome: &AllocOutcome, resources: usize, rng: &mut R) -> Self {
        let edges = outcome.assignment
            .iter()
            .enumerate()
            .filter_map(|(i, a)| {
                let p = Node::Process(ProcessId(i));
                match a {
                    Some(b) => {
                        Some(Edge { from: Node::Resource(*b), to: p, kind: EdgeKind::Allocated })
                    },
                    None if resources > 0   => {
                        let r = rng.gen_range(0..resources);
                        Some(Edge { from: p, to: Node::Resource(r), kind: EdgeKind::Requesting })
                    },
                    None    => { None }
                }
            })
            .collect();

        Self {
            processes: outcome.assignment.len(),
            resources,
            edges,
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        (0..self.processes)
            .map(|i| Node::Process(ProcessId(i)))
            .chain((0..self.resources).map(Node::Resource))
    }

    pub fn edges_of(&self, kind: EdgeKind) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.kind == kind)
    }

    /// Processes sit in a column on the left, resources on the right,
    /// both spread evenly over the height of the canvas.
    fn position(&self, n: Node) -> (i32, i32) {
        let column = |idx: usize, count: usize, x: i32| {
            let top = 90;
            let span = HEIGHT as i32 - top - 60;
            let step = span / count.max(1) as i32;
            (x, top + step / 2 + idx as i32 * step)
        };
        match n {
            Node::Process(p)    => { column(p.0, self.processes, WIDTH as i32 / 4) },
            Node::Resource(r)   => { column(r, self.resources, WIDTH as i32 * 3 / 4) },
        }
    }
}

pub fn draw(path: &Path, strategy: Strategy, g: &AllocationGraph) -> Result<()> {
    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;
    let title = format!("Resource Allocation Graph - {} Strategy", strategy.name());
    root.draw(&Text::new(
        title,
        (WIDTH as i32 / 2, 30),
        ("sans-serif", 28).into_font().color(&BLACK).pos(Pos::new(HPos::Center, VPos::Center)),
    ))?;

    for e in &g.edges {
        draw_arrow(&root, g.position(e.from), g.position(e.to), e.kind.color())?;
    }

    let label_style = ("sans-serif", 18)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    for n in g.nodes() {
        let (x, y) = g.position(n);
        match n {
            Node::Process(_)    => {
                root.draw(&Circle::new((x, y), NODE_RADIUS, SKYBLUE.filled()))?;
            },
            Node::Resource(_)   => {
                root.draw(&Rectangle::new(
                    [(x - NODE_RADIUS, y - NODE_RADIUS), (x + NODE_RADIUS, y + NODE_RADIUS)],
                    LIGHTGREEN.filled(),
                ))?;
            }
        }
        root.draw(&Text::new(n.to_string(), (x, y), label_style.clone()))?;
    }

    draw_legend(&root)?;
    root.present()?;

    Ok(())
}

/// A straight line from the rim of one node to the rim of the other,
/// with a filled head at the target end.
fn draw_arrow(
    root:   &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
    from:   (i32, i32),
    to:     (i32, i32),
    color:  RGBColor,
) -> Result<()> {
    let (dx, dy) = ((to.0 - from.0) as f64, (to.1 - from.1) as f64);
    let len = (dx * dx + dy * dy).sqrt();
    if len <= 2.0 * NODE_RADIUS as f64 { return Ok(()); }
    let (ux, uy) = (dx / len, dy / len);
    let r = NODE_RADIUS as f64;
    let at = |d: f64, off: f64| {
        (
            (from.0 as f64 + ux * d - uy * off).round() as i32,
            (from.1 as f64 + uy * d + ux * off).round() as i32,
        )
    };

    let start = at(r, 0.0);
    let tip = at(len - r, 0.0);
    root.draw(&PathElement::new(vec![start, tip], color.stroke_width(2)))?;
    root.draw(&Polygon::new(
        vec![tip, at(len - r - 16.0, 7.0), at(len - r - 16.0, -7.0)],
        color.filled(),
    ))?;

    Ok(())
}

fn draw_legend(root: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>) -> Result<()> {
    let (x, y) = (WIDTH as i32 - 190, 60);
    let text = |s: &str, row: i32| {
        Text::new(
            s.to_string(),
            (x + 40, y + row * 28),
            ("sans-serif", 16).into_font().color(&BLACK).pos(Pos::new(HPos::Left, VPos::Center)),
        )
    };

    root.draw(&Rectangle::new([(x - 10, y - 18), (x + 170, y + 3 * 28 + 18)], BLACK.stroke_width(1)))?;
    root.draw(&Circle::new((x + 12, y), 8, SKYBLUE.filled()))?;
    root.draw(&text("Process", 0))?;
    root.draw(&Rectangle::new([(x + 4, y + 28 - 8), (x + 20, y + 28 + 8)], LIGHTGREEN.filled()))?;
    root.draw(&text("Resource", 1))?;
    root.draw(&PathElement::new(vec![(x, y + 56), (x + 24, y + 56)], BLUE.stroke_width(2)))?;
    root.draw(&text("Requesting", 2))?;
    root.draw(&PathElement::new(vec![(x, y + 84), (x + 24, y + 84)], RED.stroke_width(2)))?;
    root.draw(&text("Allocated", 3))?;

    Ok(())
}
