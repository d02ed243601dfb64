mod boolean;
pub(crate) mod number;
mod string;

pub use boolean::BooleanSchema;
pub use number::NumberSchema;
pub use string::{Candidate, StringSchema};
