//! Mechanical, electrical and plumbing requests.
//!
//! The field is recognised for routing but has no extraction recipe yet.

use crate::capability::NlpAdapter;
use crate::field::Field;
use std::sync::Arc;

pub const NAME: &str = "MEP";

pub const ALIASES: [&str; 4] = ["mechanical", "electrical", "plumbing", "fire protection"];

pub fn field(adapter: Arc<NlpAdapter>) -> Field {
    Field::builder(NAME, adapter).aliases(ALIASES).build()
}
