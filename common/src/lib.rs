pub mod descriptor;
pub mod error;
pub mod resolve;
pub mod shapes;

pub use descriptor::{ShapeDescriptor, Transform};
pub use error::ShapeError;
