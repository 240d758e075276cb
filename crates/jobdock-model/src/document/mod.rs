mod raw;
pub use raw::{RawConfigDocument, RawJobDefinition, RawPort, RawTimeout};

pub(crate) mod scalar;
