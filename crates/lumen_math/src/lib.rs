// Re-export glam for convenience
pub use glam::{self, DVec3};

// Lumen math types
mod error;
mod point;
mod ray;
pub mod util;
mod vector;

pub use error::{MathError, MathResult};
pub use point::Point3;
pub use ray::{Ray, DELTA};
pub use vector::Vector3;
