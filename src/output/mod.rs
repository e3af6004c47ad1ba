pub mod table;
pub mod writer;

pub use table::{project_importance, project_total_lines, ProjectedRecord};
pub use writer::{table_rows, write_table};
