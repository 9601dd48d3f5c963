//! Blocking seek/read backends and offset sources.
//!
//! The pattern generators only see these two traits, so they run the same
//! way against a real file and against an in-memory store with scripted
//! offsets.

mod offsets;
mod reader;

pub use offsets::{OffsetSource, RandomOffsets, ScriptedOffsets};
pub use reader::{BlockReader, FileReader, IoOp, MemoryReader};
