//! Application-wide constants.

/// Target thumbnail width in pixels. Height follows the source aspect ratio.
pub const THUMBNAIL_WIDTH: u32 = 64;

/// Prefix applied to thumbnail object names: `thumb@{width}_{name}`.
pub const THUMBNAIL_PREFIX: &str = "thumb";

/// Directory name used under the scratch root for per-event working
/// directories. Each invocation gets its own unique subdirectory.
pub const SCRATCH_DIR_NAME: &str = "photostow";
