//! Connector routing between two attachment points

use tracing::debug;

use super::attachment::{validate, ConnectionPoint};
use super::config::RoutingConfig;
use super::error::{Endpoint, RouteError};
use super::grid::GridRouter;
use super::types::{BoundingBox, Point, Rect};

/// Routing mode for connectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutingMode {
    /// Obstacle-aware routing with orthogonal fallback
    #[default]
    Smart,
    /// Deterministic two-bend orthogonal path
    Orthogonal,
}

impl From<bool> for RoutingMode {
    fn from(smart: bool) -> Self {
        if smart {
            RoutingMode::Smart
        } else {
            RoutingMode::Orthogonal
        }
    }
}

/// Obstacle-aware pathfinding capability
///
/// Implementations receive the inflated node boxes and the two required
/// endpoints. Returning `None`, or fewer than two points, makes the router fall
/// back to [`shortcut_l_shape`].
pub trait ObstacleRouter {
    fn route(&self, obstacles: &[BoundingBox], endpoints: [Point; 2]) -> Option<Vec<Point>>;
}

impl<F> ObstacleRouter for F
where
    F: Fn(&[BoundingBox], [Point; 2]) -> Option<Vec<Point>>,
{
    fn route(&self, obstacles: &[BoundingBox], endpoints: [Point; 2]) -> Option<Vec<Point>> {
        self(obstacles, endpoints)
    }
}

/// Obstacle router that never finds a route
#[derive(Debug, Clone, Copy, Default)]
pub struct NoObstacleRouter;

impl ObstacleRouter for NoObstacleRouter {
    fn route(&self, _obstacles: &[BoundingBox], _endpoints: [Point; 2]) -> Option<Vec<Point>> {
        None
    }
}

/// Two-bend orthogonal path between two points
///
/// Bends on the vertical axis when the points are further apart vertically
/// than horizontally; ties bend on the horizontal axis.
pub fn shortcut_l_shape(from: Point, to: Point) -> Vec<Point> {
    if (from.x - to.x).abs() < (from.y - to.y).abs() {
        let mid_y = (from.y + to.y) / 2.0;
        vec![from, Point::new(from.x, mid_y), Point::new(to.x, mid_y), to]
    } else {
        let mid_x = (from.x + to.x) / 2.0;
        vec![from, Point::new(mid_x, from.y), Point::new(mid_x, to.y), to]
    }
}

/// A routed connector: the path plus the leads from the raw attachment points
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub path: Vec<Point>,
    /// Segments from each attachment point to the first and last path point
    pub leads: [[Point; 2]; 2],
}

impl Connector {
    fn new(path: Vec<Point>, start: Point, end: Point) -> Self {
        // path is never empty, route() guarantees at least two points
        let first = path.first().copied().unwrap_or(start);
        let last = path.last().copied().unwrap_or(end);
        Self {
            path,
            leads: [[start, first], [last, end]],
        }
    }

    /// The full polyline: lead, path, lead, without repeated points
    pub fn polyline(&self) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.path.len() + 2);
        for p in self.leads[0]
            .iter()
            .chain(self.path.iter())
            .chain(self.leads[1].iter())
        {
            if points.last() != Some(p) {
                points.push(*p);
            }
        }
        points
    }
}

/// Routes connectors between two rectangles
#[derive(Debug, Clone)]
pub struct ConnectorRouter<R = GridRouter> {
    config: RoutingConfig,
    obstacle_router: R,
}

impl ConnectorRouter<GridRouter> {
    /// Router with default configuration and the grid obstacle router
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for ConnectorRouter<GridRouter> {
    fn default() -> Self {
        Self {
            config: RoutingConfig::default(),
            obstacle_router: GridRouter::default(),
        }
    }
}

impl<R: ObstacleRouter> ConnectorRouter<R> {
    /// Router using `obstacle_router` for smart routing
    pub fn with_obstacle_router(obstacle_router: R) -> Self {
        Self {
            config: RoutingConfig::default(),
            obstacle_router,
        }
    }

    /// Replace the routing configuration
    pub fn with_config(mut self, config: RoutingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Route from `cp_a` on `rect_a` to `cp_b` on `rect_b`
    ///
    /// `smart_routing` selects [`RoutingMode::Smart`] when true.
    pub fn route(
        &self,
        rect_a: &Rect,
        rect_b: &Rect,
        cp_a: &ConnectionPoint,
        cp_b: &ConnectionPoint,
        smart_routing: bool,
    ) -> Result<Vec<Point>, RouteError> {
        self.route_with_mode(rect_a, rect_b, cp_a, cp_b, smart_routing.into())
    }

    /// Route with an explicit [`RoutingMode`]
    pub fn route_with_mode(
        &self,
        rect_a: &Rect,
        rect_b: &Rect,
        cp_a: &ConnectionPoint,
        cp_b: &ConnectionPoint,
        mode: RoutingMode,
    ) -> Result<Vec<Point>, RouteError> {
        let tolerance = self.config.validation_tolerance;
        validate(rect_a, cp_a, tolerance).map_err(|e| RouteError::attachment(Endpoint::Start, e))?;
        validate(rect_b, cp_b, tolerance).map_err(|e| RouteError::attachment(Endpoint::End, e))?;

        let start = cp_a.point;
        let end = cp_b.point;

        let eps = self.config.collinear_tolerance;
        if (start.x - end.x).abs() < eps || (start.y - end.y).abs() < eps {
            debug!(?start, ?end, "endpoints aligned, using straight segment");
            return Ok(vec![start, end]);
        }

        if mode == RoutingMode::Orthogonal {
            return Ok(shortcut_l_shape(start, end));
        }

        let margin = self.config.obstacle_margin;
        let obstacles = [rect_a.inflate(margin), rect_b.inflate(margin)];

        match self.obstacle_router.route(&obstacles, [start, end]) {
            Some(path) if self.is_usable(&path, start, end) => {
                debug!(points = path.len(), "using obstacle route");
                Ok(path)
            }
            other => {
                debug!(
                    points = other.as_ref().map(Vec::len),
                    "degenerate obstacle route, falling back to orthogonal path"
                );
                Ok(shortcut_l_shape(start, end))
            }
        }
    }

    /// Route and attach the leads from the raw attachment points
    pub fn connect(
        &self,
        rect_a: &Rect,
        rect_b: &Rect,
        cp_a: &ConnectionPoint,
        cp_b: &ConnectionPoint,
        mode: RoutingMode,
    ) -> Result<Connector, RouteError> {
        let path = self.route_with_mode(rect_a, rect_b, cp_a, cp_b, mode)?;
        Ok(Connector::new(path, cp_a.point, cp_b.point))
    }

    fn is_usable(&self, path: &[Point], start: Point, end: Point) -> bool {
        let tolerance = self.config.validation_tolerance;
        match (path.first(), path.last()) {
            (Some(first), Some(last)) if path.len() >= 2 => {
                first.approx_eq(start, tolerance) && last.approx_eq(end, tolerance)
            }
            _ => false,
        }
    }
}
