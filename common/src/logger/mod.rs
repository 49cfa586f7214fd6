mod init;
mod span;
mod trace_id;

pub use init::init_logger;
pub use span::{annotate_span, child_span, root_span};
pub use trace_id::TraceId;
