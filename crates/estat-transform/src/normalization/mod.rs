//! Cell-level cleaning rules.
//!
//! Every rule returns `None` when the input cannot be cleaned; the caller drops
//! the row.
//!
//! - **year**: time period labels to integers
//! - **value**: flagged observation cells to floats
//! - **country**: footnote bracket removal
//! - **age**: age band codes to integers

pub mod age;
pub mod country;
pub mod value;
pub mod year;

pub use age::clean_age;
pub use country::clean_country;
pub use value::{clean_value, first_number, strip_non_numeric};
pub use year::{clean_year, first_four_digits, strip_spaces};
