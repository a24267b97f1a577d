mod error;
mod field;
pub mod ident;
mod model;
mod target;

pub use error::Error;
pub use field::{BaseType, FieldDescriptor, FieldShape, NestedReference};
pub use model::ModelDescriptor;
pub use target::TargetConfig;

pub type Result<T> = std::result::Result<T, Error>;
