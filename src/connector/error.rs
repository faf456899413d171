//! Error types for connector routing

use thiserror::Error;

use super::types::Point;

/// Reasons an attachment point is rejected for its rectangle
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttachmentError {
    /// Angle outside {0, 90, 180, -90}
    #[error("invalid angle {angle}, must be one of 0, 90, 180, -90")]
    InvalidAngle { angle: i32 },

    /// Point does not lie on the border the angle selects
    #[error(
        "point ({}, {}) must lie on the {angle}° border of rect centered at ({}, {})",
        .point.x, .point.y, .center.x, .center.y
    )]
    PointNotOnBorder {
        point: Point,
        center: Point,
        angle: i32,
    },

    /// Point lies on the border line but points back into the rectangle
    #[error(
        "point ({}, {}) with angle {angle}° must point outward from ({}, {})",
        .point.x, .point.y, .center.x, .center.y
    )]
    PointFacesInward {
        point: Point,
        center: Point,
        angle: i32,
    },
}

impl AttachmentError {
    /// Create an invalid angle error
    pub fn invalid_angle(angle: i32) -> Self {
        Self::InvalidAngle { angle }
    }

    /// Create a not-on-border error
    pub fn not_on_border(point: Point, center: Point, angle: i32) -> Self {
        Self::PointNotOnBorder {
            point,
            center,
            angle,
        }
    }

    /// Create a facing-inward error
    pub fn faces_inward(point: Point, center: Point, angle: i32) -> Self {
        Self::PointFacesInward {
            point,
            center,
            angle,
        }
    }
}

/// Which end of the connector an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::End => f.write_str("end"),
        }
    }
}

/// Errors that can occur while routing a connector
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    /// One of the attachment points failed validation
    #[error("{endpoint} attachment: {source}")]
    Attachment {
        endpoint: Endpoint,
        #[source]
        source: AttachmentError,
    },
}

impl RouteError {
    pub fn attachment(endpoint: Endpoint, source: AttachmentError) -> Self {
        Self::Attachment { endpoint, source }
    }

    /// The underlying attachment error
    pub fn attachment_error(&self) -> &AttachmentError {
        match self {
            Self::Attachment { source, .. } => source,
        }
    }

    /// Which endpoint failed
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Attachment { endpoint, .. } => *endpoint,
        }
    }
}
