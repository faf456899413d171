//! Connector routing between two rectangular nodes
//!
//! This module validates the attachment point on each node and computes the
//! polyline joining them: a straight segment for aligned endpoints, an
//! obstacle-aware route in smart mode, or a deterministic two-bend path.

pub mod attachment;
pub mod config;
pub mod error;
pub mod grid;
pub mod routing;
pub mod types;

pub use attachment::{offset_bounds, validate, Angle, ConnectionPoint};
pub use config::{GridConfig, RoutingConfig};
pub use error::{AttachmentError, Endpoint, RouteError};
pub use grid::GridRouter;
pub use routing::{
    shortcut_l_shape, Connector, ConnectorRouter, NoObstacleRouter, ObstacleRouter, RoutingMode,
};
pub use types::*;
