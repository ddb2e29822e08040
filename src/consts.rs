// Floating point comparisons
pub const FEQ_EPSILON: f64 = 0.0001;

// Distance an intersection point is pushed along its normal before it is used
// as the origin of a shadow ray.
pub const SHADOW_BIAS: f64 = 0.0001;

// Demo scene canvas and default output path
pub const CANVAS_WIDTH: usize = 800;
pub const CANVAS_HEIGHT: usize = 400;
pub const OUT_FILE: &str = "./out.ppm";

// PPM serialization
pub const PPM_MAX_COLOR: f64 = 255.0;
pub const PPM_LINE_WIDTH: usize = 70;
