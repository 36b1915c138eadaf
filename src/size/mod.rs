//! Size arithmetic: the `px` / `fr` size union and the CSS expressions derived
//! from it.

mod core;

pub use core::{SizeKind, SizeSpec, format_number, relative_size_expression};
