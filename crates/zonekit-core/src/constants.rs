//! Shared tolerances, defaults, and limits.

/// Tolerance below which two geometry values are considered equal.
///
/// Geometry updates whose every component moves less than this are
/// treated as no-ops and produce no undo entry.
pub const GEOMETRY_EPSILON: f64 = 1e-4;

/// Tolerance used when matching zone edges for adjacency and divider
/// queries.
pub const EDGE_EPSILON: f64 = 1e-3;

/// Default minimum zone width and height, in normalized coordinates.
pub const DEFAULT_MIN_ZONE_SIZE: f64 = 0.05;

/// Default grid interval for grid snapping, both axes.
pub const DEFAULT_GRID_INTERVAL: f64 = 0.05;

/// Default distance within which an edge snaps to a neighboring zone's
/// edge.
pub const DEFAULT_EDGE_SNAP_THRESHOLD: f64 = 0.02;

/// Positional offset applied to duplicated and offset-pasted zones.
pub const DUPLICATE_OFFSET: f64 = 0.02;

/// Highest zone number assignable within a layout.
pub const MAX_ZONE_NUMBER: u8 = 99;

/// Maximum length of a zone name, in characters.
pub const MAX_ZONE_NAME_LEN: usize = 100;

/// Characters rejected in zone names.
pub const FORBIDDEN_NAME_CHARS: [char; 5] = ['<', '>', '"', '\'', '\\'];

/// Default bound on undo history depth.
pub const DEFAULT_UNDO_DEPTH: usize = 100;

/// Sentinel for per-layout padding/gap overrides meaning "inherit the
/// global default".
pub const INHERIT_DEFAULT: f64 = -1.0;
