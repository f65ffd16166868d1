/// Floating point type used throughout the workspace
pub type Real = f64;
