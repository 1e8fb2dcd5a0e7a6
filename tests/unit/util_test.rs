//! Tests for utility functions

use upload_pool::util::init_tracing;

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
}
