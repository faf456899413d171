//! Connector Router - routes a connector line between two rectangular nodes
//!
//! This library validates the attachment point on each node and computes the
//! polyline joining them. Aligned endpoints get a straight segment, smart mode
//! asks an obstacle router for a path around both nodes, and everything else
//! (or a failed smart route) gets a deterministic two-bend orthogonal path.
//!
//! # Example
//!
//! ```rust
//! use connector_router::connector::{ConnectionPoint, ConnectorRouter, Point, Rect};
//!
//! let a = Rect::centered(200.0, 200.0, 60.0, 60.0);
//! let b = Rect::centered(400.0, 400.0, 60.0, 60.0);
//! let start = ConnectionPoint::new(Point::new(230.0, 200.0), 0);
//! let end = ConnectionPoint::new(Point::new(370.0, 400.0), 180);
//!
//! let path = ConnectorRouter::new().route(&a, &b, &start, &end, false).unwrap();
//! assert_eq!(path[1], Point::new(300.0, 200.0));
//! ```

pub mod connector;
pub mod output;
pub mod scene;

pub use connector::{
    AttachmentError, ConnectionPoint, Connector, ConnectorRouter, GridRouter, ObstacleRouter,
    Point, Rect, RouteError, RoutingConfig, RoutingMode,
};
pub use output::OutputFormat;
pub use scene::{Scene, SceneError};

use thiserror::Error;
use tracing::debug;

use connector::NoObstacleRouter;

/// Errors that can occur in the scene-to-output pipeline
#[derive(Debug, Error)]
pub enum ConnectError {
    /// Error while loading the scene
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    /// Error while routing
    #[error("routing error: {0}")]
    Route(#[from] RouteError),

    /// Error while serializing the result
    #[error("output error: {0}")]
    Output(#[from] toml::ser::Error),
}

/// Configuration for the complete connect pipeline
#[derive(Debug, Clone, Default)]
pub struct ConnectConfig {
    /// Output format
    pub format: OutputFormat,
    /// Routing mode overriding the one from the scene
    pub mode: Option<RoutingMode>,
    /// Skip the grid router, so smart mode always takes the orthogonal fallback
    pub without_grid: bool,
}

impl ConnectConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Force a routing mode
    pub fn with_mode(mut self, mode: RoutingMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Enable or disable the grid obstacle router
    pub fn with_grid(mut self, enabled: bool) -> Self {
        self.without_grid = !enabled;
        self
    }
}

/// Route the connector described by a TOML scene with default configuration
///
/// # Example
///
/// ```rust
/// use connector_router::connect;
///
/// let out = connect(r#"
///     [a]
///     center = { x = 100.0, y = 100.0 }
///     size = { width = 50.0, height = 40.0 }
///     angle = 90
///
///     [b]
///     center = { x = 100.0, y = 300.0 }
///     size = { width = 60.0, height = 50.0 }
///     angle = -90
/// "#).unwrap();
///
/// assert!(out.contains("100,120\n100,275\n"));
/// ```
pub fn connect(source: &str) -> Result<String, ConnectError> {
    connect_with_config(source, ConnectConfig::default())
}

/// Route the connector described by a TOML scene with custom configuration
pub fn connect_with_config(source: &str, config: ConnectConfig) -> Result<String, ConnectError> {
    let mut scene = Scene::from_str(source)?;
    if let Some(mode) = config.mode {
        scene.mode = mode;
    }
    debug!(mode = ?scene.mode, without_grid = config.without_grid, "routing scene");

    let connector = if config.without_grid {
        let router =
            ConnectorRouter::with_obstacle_router(NoObstacleRouter).with_config(scene.routing.clone());
        scene.connect_with(&router)?
    } else {
        scene.connect()?
    };

    Ok(output::format_connector(&connector, config.format)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIAGONAL: &str = r#"
        [a]
        center = { x = 200.0, y = 200.0 }
        size = { width = 60.0, height = 60.0 }
        angle = 0

        [b]
        center = { x = 400.0, y = 400.0 }
        size = { width = 60.0, height = 60.0 }
        angle = 180
    "#;

    #[test]
    fn test_connect_collinear() {
        let out = connect(
            r#"
            [a]
            center = { x = 100.0, y = 100.0 }
            size = { width = 50.0, height = 40.0 }
            angle = 90
            [b]
            center = { x = 100.0, y = 300.0 }
            size = { width = 60.0, height = 50.0 }
            angle = -90
            "#,
        )
        .unwrap();
        assert_eq!(
            out,
            "lead 100,120 -> 100,120\n100,120\n100,275\nlead 100,275 -> 100,275\n"
        );
    }

    #[test]
    fn test_connect_orthogonal_override() {
        let config = ConnectConfig::new().with_mode(RoutingMode::Orthogonal);
        let out = connect_with_config(DIAGONAL, config).unwrap();
        assert!(out.contains("230,200\n300,200\n300,400\n370,400\n"));
    }

    #[test]
    fn test_connect_without_grid_matches_orthogonal() {
        let orthogonal =
            connect_with_config(DIAGONAL, ConnectConfig::new().with_mode(RoutingMode::Orthogonal))
                .unwrap();
        let fallback = connect_with_config(DIAGONAL, ConnectConfig::new().with_grid(false)).unwrap();
        assert_eq!(orthogonal, fallback);
    }

    #[test]
    fn test_connect_toml_format() {
        let config = ConnectConfig::new().with_format(OutputFormat::Toml);
        let out = connect_with_config(DIAGONAL, config).unwrap();
        assert!(out.contains("lead_start"));
        assert!(out.contains("path"));
    }

    #[test]
    fn test_connect_reports_scene_error() {
        let err = connect("not toml [").unwrap_err();
        assert!(matches!(err, ConnectError::Scene(SceneError::ParseError(_))));
    }

    #[test]
    fn test_connect_reports_route_error() {
        let err = connect(&DIAGONAL.replace("angle = 180", "angle = 180\npoint = { x = 0.0, y = 0.0 }"))
            .unwrap_err();
        assert!(matches!(err, ConnectError::Route(_)));
        assert!(err.to_string().starts_with("routing error: end attachment"));
    }
}
