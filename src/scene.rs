//! Scene files describing the two connected nodes
//!
//! A scene is a small TOML document with one table per node and an optional
//! `[routing]` table overriding the router defaults:
//!
//! ```toml
//! [routing]
//! smart = false
//!
//! [a]
//! center = { x = 200.0, y = 200.0 }
//! size = { width = 60.0, height = 60.0 }
//! angle = 0
//!
//! [b]
//! center = { x = 400.0, y = 400.0 }
//! size = { width = 60.0, height = 60.0 }
//! angle = 180
//! point = { x = 370.0, y = 400.0 }
//! ```
//!
//! A node's attachment is given either as an `offset` along the side selected
//! by `angle`, or as an explicit `point`. Without either, the side midpoint is
//! used.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::connector::{
    Angle, AttachmentError, ConnectionPoint, Connector, ConnectorRouter, GridConfig, GridRouter,
    ObstacleRouter, Point, Rect, RouteError, RoutingConfig, RoutingMode, Size,
};

/// Errors that can occur when loading a scene
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read scene file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse scene TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("node '{node}' is {width}x{height}, both dimensions must be at least {}", Size::MIN_DIMENSION)]
    SizeTooSmall {
        node: String,
        width: f64,
        height: f64,
    },
    #[error("node '{node}' sets both 'offset' and 'point', use only one")]
    AmbiguousAttachment { node: String },
    #[error("node '{node}': {source}")]
    Attachment {
        node: String,
        #[source]
        source: AttachmentError,
    },
}

/// A rectangle with its attachment point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub rect: Rect,
    pub attachment: ConnectionPoint,
}

/// Two nodes plus the routing options to connect them with
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub a: Node,
    pub b: Node,
    pub mode: RoutingMode,
    pub routing: RoutingConfig,
    pub grid: GridConfig,
}

#[derive(Deserialize)]
struct TomlScene {
    routing: Option<TomlRouting>,
    a: TomlNode,
    b: TomlNode,
}

#[derive(Deserialize)]
struct TomlRouting {
    smart: Option<bool>,
    validation_tolerance: Option<f64>,
    collinear_tolerance: Option<f64>,
    obstacle_margin: Option<f64>,
    clearance: Option<f64>,
    turn_penalty: Option<f64>,
}

#[derive(Deserialize)]
struct TomlNode {
    center: Point,
    size: Size,
    angle: i32,
    offset: Option<f64>,
    point: Option<Point>,
}

impl TomlNode {
    fn into_node(self, name: &str) -> Result<Node, SceneError> {
        if !self.size.is_valid() {
            return Err(SceneError::SizeTooSmall {
                node: name.to_string(),
                width: self.size.width,
                height: self.size.height,
            });
        }
        let rect = Rect::new(self.center, self.size);

        let attachment = match (self.offset, self.point) {
            (Some(_), Some(_)) => {
                return Err(SceneError::AmbiguousAttachment {
                    node: name.to_string(),
                })
            }
            // Explicit points are checked by the router, not here
            (None, Some(point)) => ConnectionPoint::new(point, self.angle),
            (offset, None) => {
                let angle = Angle::try_from(self.angle).map_err(|source| SceneError::Attachment {
                    node: name.to_string(),
                    source,
                })?;
                ConnectionPoint::on_side(&rect, angle, offset.unwrap_or(0.0))
            }
        };

        Ok(Node { rect, attachment })
    }
}

impl Scene {
    /// Load a scene from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a scene from a TOML string
    pub fn from_str(content: &str) -> Result<Self, SceneError> {
        let parsed: TomlScene = toml::from_str(content)?;

        let mut mode = RoutingMode::default();
        let mut routing = RoutingConfig::default();
        let mut grid = GridConfig::default();
        if let Some(r) = parsed.routing {
            if let Some(smart) = r.smart {
                mode = smart.into();
            }
            if let Some(v) = r.validation_tolerance {
                routing = routing.with_validation_tolerance(v);
            }
            if let Some(v) = r.collinear_tolerance {
                routing = routing.with_collinear_tolerance(v);
            }
            if let Some(v) = r.obstacle_margin {
                routing = routing.with_obstacle_margin(v);
            }
            if let Some(v) = r.clearance {
                grid = grid.with_clearance(v);
            }
            if let Some(v) = r.turn_penalty {
                grid = grid.with_turn_penalty(v);
            }
        }

        Ok(Scene {
            a: parsed.a.into_node("a")?,
            b: parsed.b.into_node("b")?,
            mode,
            routing,
            grid,
        })
    }

    /// Router configured from this scene, using the grid obstacle router
    pub fn router(&self) -> ConnectorRouter<GridRouter> {
        ConnectorRouter::with_obstacle_router(GridRouter::new(self.grid.clone()))
            .with_config(self.routing.clone())
    }

    /// Route the connector with the scene's own router
    pub fn connect(&self) -> Result<Connector, RouteError> {
        self.connect_with(&self.router())
    }

    /// Route the connector with `router`, keeping the scene's routing mode
    pub fn connect_with<R: ObstacleRouter>(
        &self,
        router: &ConnectorRouter<R>,
    ) -> Result<Connector, RouteError> {
        router.connect(
            &self.a.rect,
            &self.b.rect,
            &self.a.attachment,
            &self.b.attachment,
            self.mode,
        )
    }
}
