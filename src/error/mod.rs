pub mod portal;

pub use portal::{PageError, PortalError, StructureReason};
