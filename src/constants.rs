// Canonical resolution (logical points) at which base images are stored
// before any on-demand resizing.
pub const ORIGINAL_SIZE: u32 = 250;

// High-density display convention: rendered pixels per logical point.
pub const DISPLAY_SCALE: u32 = 2;

// Image sizes used by the views (logical points)
pub const ROW_IMAGE_SIZE: u32 = 50;
pub const DETAIL_IMAGE_SIZE: u32 = 250;

// Detail screen map: region span in degrees and layout height in points
pub const DETAIL_MAP_SPAN: f64 = 0.02;
pub const DETAIL_MAP_HEIGHT: u32 = 300;
