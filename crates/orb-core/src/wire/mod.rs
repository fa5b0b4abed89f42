//! Generic plumbing between raw JSON and typed models.

mod model;
mod open_enum;
mod raw;
mod union;

pub use model::{Model, Unchecked};
pub use open_enum::{ApiEnum, WireEnum};
pub use raw::RawObject;
pub use union::{OpenUnion, TaggedUnion, decode_as, decode_strict, deserialize_strict};
