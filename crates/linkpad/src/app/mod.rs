//! Application layer: the text operations and the notebook that drives them.

pub mod cut;
pub mod difference;
pub mod notebook;
pub mod range;
pub mod session;
pub mod transform;

pub use cut::{CutReport, cut, cut_or_original, cut_with_report};
pub use difference::{difference, difference_batch, difference_text};
pub use range::{parse_num_range, parse_range};
pub use transform::{SortOptions, capitalize_words, sort_lines, sort_lines_with};
