//! Configuration for connector routing

/// Tolerance for attachment point validation (sub-pixel drift)
pub const DEFAULT_VALIDATION_TOLERANCE: f64 = 0.01;

/// Tolerance below which two endpoints count as aligned on an axis
pub const DEFAULT_COLLINEAR_TOLERANCE: f64 = 2.0;

/// Clearance added around each node before it is handed to the obstacle router
pub const DEFAULT_OBSTACLE_MARGIN: f64 = 2.0;

/// Configuration options for the connector router
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingConfig {
    /// Maximum distance an attachment point may drift from its border
    pub validation_tolerance: f64,

    /// Axis distance under which start and end are joined by a straight segment
    pub collinear_tolerance: f64,

    /// Margin added around both nodes when building obstacles
    pub obstacle_margin: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            validation_tolerance: DEFAULT_VALIDATION_TOLERANCE,
            collinear_tolerance: DEFAULT_COLLINEAR_TOLERANCE,
            obstacle_margin: DEFAULT_OBSTACLE_MARGIN,
        }
    }
}

impl RoutingConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the attachment validation tolerance
    pub fn with_validation_tolerance(mut self, tolerance: f64) -> Self {
        self.validation_tolerance = tolerance;
        self
    }

    /// Set the collinearity tolerance
    pub fn with_collinear_tolerance(mut self, tolerance: f64) -> Self {
        self.collinear_tolerance = tolerance;
        self
    }

    /// Set the obstacle margin
    pub fn with_obstacle_margin(mut self, margin: f64) -> Self {
        self.obstacle_margin = margin;
        self
    }
}

/// Configuration options for the grid obstacle router
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Distance between an obstacle edge and the routing lane running along it
    pub clearance: f64,

    /// Extra cost of a bend, in distance units
    pub turn_penalty: f64,

    /// Upper bound on node expansions during a search
    pub max_expansions: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            clearance: 10.0,
            turn_penalty: 20.0,
            max_expansions: 50_000,
        }
    }
}

impl GridConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lane clearance
    pub fn with_clearance(mut self, clearance: f64) -> Self {
        self.clearance = clearance;
        self
    }

    /// Set the turn penalty
    pub fn with_turn_penalty(mut self, penalty: f64) -> Self {
        self.turn_penalty = penalty;
        self
    }

    /// Set the search budget
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RoutingConfig::default();
        assert_eq!(config.validation_tolerance, 0.01);
        assert_eq!(config.collinear_tolerance, 2.0);
        assert_eq!(config.obstacle_margin, 2.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = RoutingConfig::new()
            .with_collinear_tolerance(5.0)
            .with_obstacle_margin(8.0);

        assert_eq!(config.collinear_tolerance, 5.0);
        assert_eq!(config.obstacle_margin, 8.0);
        assert_eq!(config.validation_tolerance, 0.01);
    }

    #[test]
    fn test_grid_builder_pattern() {
        let config = GridConfig::new().with_clearance(5.0).with_turn_penalty(0.0);
        assert_eq!(config.clearance, 5.0);
        assert_eq!(config.turn_penalty, 0.0);
        assert_eq!(config.max_expansions, 50_000);
    }
}
