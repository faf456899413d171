//! Grid-based obstacle router
//!
//! Builds a sparse routing grid whose lanes run along the obstacle edges
//! (pushed out by a clearance), through the endpoints, and halfway between
//! neighbouring lanes, then runs A* over it with a penalty for every bend.
//!
//! Endpoints usually sit inside an inflated obstacle. Each such endpoint gets
//! an escape ray leaving the obstacle through its nearest side; segments on
//! that ray are exempt from the obstacle.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::trace;

use super::config::GridConfig;
use super::routing::ObstacleRouter;
use super::types::{BoundingBox, Point};

const COORD_EPS: f64 = 1e-6;

/// Costs are kept as integers so heap entries are totally ordered
const COST_SCALE: f64 = 100.0;

/// Marker for "no direction yet" in search states
const NO_DIR: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dir {
    Right,
    Left,
    Down,
    Up,
}

impl Dir {
    const ALL: [Dir; 4] = [Dir::Right, Dir::Left, Dir::Down, Dir::Up];

    fn index(self) -> usize {
        match self {
            Dir::Right => 0,
            Dir::Left => 1,
            Dir::Down => 2,
            Dir::Up => 3,
        }
    }
}

fn same(a: f64, b: f64) -> bool {
    (a - b).abs() < COORD_EPS
}

/// Integer cost of `distance`, or `None` when it does not fit in a `u64`
fn scaled(distance: f64) -> Option<u64> {
    let cost = (distance * COST_SCALE).round();
    (cost >= 0.0 && cost < u64::MAX as f64).then_some(cost as u64)
}

/// Ray along which an endpoint may leave the obstacle containing it
#[derive(Debug, Clone, Copy)]
struct Escape {
    obstacle: usize,
    origin: Point,
    dir: Dir,
}

impl Escape {
    /// Leave through the nearest side of `bounds`
    ///
    /// The router only sees points, not attachment angles. A point in a corner
    /// is equally near two sides; the tie goes to the longer side, which for a
    /// node wider than tall means leaving through the top or bottom.
    fn new(obstacle: usize, bounds: &BoundingBox, origin: Point) -> Self {
        let sides = [
            (Dir::Right, bounds.right() - origin.x, bounds.height),
            (Dir::Left, origin.x - bounds.x, bounds.height),
            (Dir::Down, bounds.bottom() - origin.y, bounds.width),
            (Dir::Up, origin.y - bounds.y, bounds.width),
        ];
        let mut dir = Dir::Right;
        let mut nearest = f64::INFINITY;
        let mut longest = f64::NEG_INFINITY;
        for (side, distance, length) in sides {
            let closer = distance < nearest - COORD_EPS;
            let tie_but_longer = same(distance, nearest) && length > longest;
            if closer || tie_but_longer {
                nearest = distance;
                longest = length;
                dir = side;
            }
        }
        Self {
            obstacle,
            origin,
            dir,
        }
    }

    /// Whether the segment `a`-`b` lies on this ray
    fn covers(&self, a: Point, b: Point) -> bool {
        let o = self.origin;
        match self.dir {
            Dir::Right => same(a.y, o.y) && same(b.y, o.y) && a.x.min(b.x) >= o.x - COORD_EPS,
            Dir::Left => same(a.y, o.y) && same(b.y, o.y) && a.x.max(b.x) <= o.x + COORD_EPS,
            Dir::Down => same(a.x, o.x) && same(b.x, o.x) && a.y.min(b.y) >= o.y - COORD_EPS,
            Dir::Up => same(a.x, o.x) && same(b.x, o.x) && a.y.max(b.y) <= o.y + COORD_EPS,
        }
    }
}

/// Whether the axis-aligned segment `a`-`b` passes through the interior of `bounds`
fn segment_crosses(bounds: &BoundingBox, a: Point, b: Point) -> bool {
    if same(a.y, b.y) {
        let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
        a.y > bounds.y && a.y < bounds.bottom() && x0 < bounds.right() && x1 > bounds.x
    } else {
        let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
        a.x > bounds.x && a.x < bounds.right() && y0 < bounds.bottom() && y1 > bounds.y
    }
}

/// Sorted, deduplicated lane coordinates with midlines between neighbours
fn lanes(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut lanes: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    lanes.sort_by(f64::total_cmp);
    lanes.dedup_by(|a, b| same(*a, *b));

    let mids: Vec<f64> = lanes.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect();
    lanes.extend(mids);
    lanes.sort_by(f64::total_cmp);
    lanes.dedup_by(|a, b| same(*a, *b));
    lanes
}

struct RoutingGrid<'a> {
    xs: Vec<f64>,
    ys: Vec<f64>,
    obstacles: &'a [BoundingBox],
    escapes: Vec<Escape>,
}

impl<'a> RoutingGrid<'a> {
    fn new(obstacles: &'a [BoundingBox], endpoints: [Point; 2], clearance: f64) -> Self {
        let xs = lanes(
            obstacles
                .iter()
                .flat_map(|o| [o.x - clearance, o.right() + clearance])
                .chain(endpoints.iter().map(|p| p.x)),
        );
        let ys = lanes(
            obstacles
                .iter()
                .flat_map(|o| [o.y - clearance, o.bottom() + clearance])
                .chain(endpoints.iter().map(|p| p.y)),
        );

        let mut escapes = Vec::new();
        for (idx, bounds) in obstacles.iter().enumerate() {
            for p in endpoints {
                if bounds.contains_strict(p) {
                    escapes.push(Escape::new(idx, bounds, p));
                }
            }
        }

        Self {
            xs,
            ys,
            obstacles,
            escapes,
        }
    }

    fn cols(&self) -> usize {
        self.xs.len()
    }

    fn point(&self, node: usize) -> Point {
        Point::new(self.xs[node % self.cols()], self.ys[node / self.cols()])
    }

    fn locate(&self, p: Point) -> Option<usize> {
        let ix = self.xs.iter().position(|x| same(*x, p.x))?;
        let iy = self.ys.iter().position(|y| same(*y, p.y))?;
        Some(iy * self.cols() + ix)
    }

    fn neighbor(&self, node: usize, dir: Dir) -> Option<usize> {
        let cols = self.cols();
        let (ix, iy) = (node % cols, node / cols);
        let (nx, ny) = match dir {
            Dir::Right => (ix + 1, iy),
            Dir::Left => (ix.checked_sub(1)?, iy),
            Dir::Down => (ix, iy + 1),
            Dir::Up => (ix, iy.checked_sub(1)?),
        };
        (nx < cols && ny < self.ys.len()).then_some(ny * cols + nx)
    }

    fn edge_clear(&self, a: Point, b: Point) -> bool {
        self.obstacles.iter().enumerate().all(|(idx, bounds)| {
            !segment_crosses(bounds, a, b)
                || self
                    .escapes
                    .iter()
                    .any(|e| e.obstacle == idx && e.covers(a, b))
        })
    }

    fn heuristic(&self, node: usize, goal: Point) -> Option<u64> {
        let p = self.point(node);
        scaled((p.x - goal.x).abs() + (p.y - goal.y).abs())
    }

    /// A* from `from` to `to`; returns the visited grid nodes in order
    ///
    /// Declines when a cost no longer fits in a `u64`, which only happens for
    /// coordinates far beyond any canvas.
    fn search(&self, from: usize, to: usize, config: &GridConfig) -> Option<Vec<usize>> {
        let states = self.cols() * self.ys.len() * 5;
        let mut best = vec![u64::MAX; states];
        let mut prev: Vec<Option<usize>> = vec![None; states];
        let mut heap = BinaryHeap::new();

        let goal = self.point(to);
        let turn_cost = scaled(config.turn_penalty.max(0.0))?;

        let start_state = from * 5 + NO_DIR;
        best[start_state] = 0;
        heap.push(Reverse((self.heuristic(from, goal)?, 0u64, start_state)));

        let mut expansions = 0usize;
        while let Some(Reverse((_, cost, state))) = heap.pop() {
            if cost > best[state] {
                continue;
            }
            expansions += 1;
            if expansions > config.max_expansions {
                trace!(expansions, "grid search budget exhausted");
                return None;
            }

            let (node, dir) = (state / 5, state % 5);
            if node == to {
                trace!(expansions, cost, "grid search reached goal");
                let mut nodes = vec![node];
                let mut cur = state;
                while let Some(p) = prev[cur] {
                    nodes.push(p / 5);
                    cur = p;
                }
                nodes.reverse();
                return Some(nodes);
            }

            let here = self.point(node);
            for next_dir in Dir::ALL {
                let Some(next) = self.neighbor(node, next_dir) else {
                    continue;
                };
                let there = self.point(next);
                if !self.edge_clear(here, there) {
                    continue;
                }
                let turn = if dir != NO_DIR && dir != next_dir.index() {
                    turn_cost
                } else {
                    0
                };
                let step = scaled((there.x - here.x).abs() + (there.y - here.y).abs());
                let Some(next_cost) = step
                    .and_then(|step| cost.checked_add(step))
                    .and_then(|c| c.checked_add(turn))
                else {
                    trace!(expansions, "grid search cost overflow");
                    return None;
                };
                let next_state = next * 5 + next_dir.index();
                if next_cost < best[next_state] {
                    let Some(estimate) = self
                        .heuristic(next, goal)
                        .and_then(|h| next_cost.checked_add(h))
                    else {
                        trace!(expansions, "grid search cost overflow");
                        return None;
                    };
                    best[next_state] = next_cost;
                    prev[next_state] = Some(state);
                    heap.push(Reverse((estimate, next_cost, next_state)));
                }
            }
        }
        None
    }
}

/// Drop repeated points and interior points on a straight run
fn simplify(points: Vec<Point>) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        if out.last().is_some_and(|last| last.approx_eq(p, COORD_EPS)) {
            continue;
        }
        if let [.., a, b] = out.as_slice() {
            let straight =
                (same(a.x, b.x) && same(b.x, p.x)) || (same(a.y, b.y) && same(b.y, p.y));
            if straight {
                out.pop();
            }
        }
        out.push(p);
    }
    out
}

/// Orthogonal obstacle router searching a sparse lane grid
#[derive(Debug, Clone, Default)]
pub struct GridRouter {
    config: GridConfig,
}

impl GridRouter {
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }
}

impl ObstacleRouter for GridRouter {
    fn route(&self, obstacles: &[BoundingBox], endpoints: [Point; 2]) -> Option<Vec<Point>> {
        let [start, end] = endpoints;
        if start.approx_eq(end, COORD_EPS) {
            return None;
        }

        let grid = RoutingGrid::new(obstacles, endpoints, self.config.clearance);
        let from = grid.locate(start)?;
        let to = grid.locate(end)?;
        let nodes = grid.search(from, to, &self.config)?;

        let mut points: Vec<Point> = nodes.into_iter().map(|n| grid.point(n)).collect();
        if let Some(first) = points.first_mut() {
            *first = start;
        }
        if let Some(last) = points.last_mut() {
            *last = end;
        }
        Some(simplify(points))
    }
}
