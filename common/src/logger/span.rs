use tracing::{Span, field};

use super::TraceId;

/// Root span for one scheduled run. `product_id` is filled in once the
/// configuration is known.
pub fn root_span(name: &'static str, trace_id: &TraceId) -> Span {
    tracing::info_span!(
        "run",
        name = %name,
        trace_id = %trace_id.as_str(),
        product_id = field::Empty
    )
}

/// Child span (inherits trace_id from the current root)
pub fn child_span(name: &'static str) -> Span {
    tracing::info_span!("step", name = %name)
}

pub fn annotate_span(product_id: &str) {
    Span::current().record("product_id", field::display(product_id));
}
