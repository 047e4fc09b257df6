mod jsonl;
mod memory;
mod record;
mod traits;

pub use jsonl::{JsonlSink, STDOUT_TARGET};
pub use memory::MemorySink;
pub use record::PurityRecord;
pub use traits::ResultSink;
