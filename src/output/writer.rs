//! JSON emission of the projected table
//!
//! The renderer consumes a flat columnar table: fixed columns plus one
//! hierarchy column per path depth (`p0`, `p1`, ...). Rows shallower than
//! the widest row pad their hierarchy columns with empty strings.

use std::io::Write;

use serde_json::{Map, Value};

use crate::core::errors::Result;
use crate::output::table::ProjectedRecord;

fn column_name(depth: usize) -> String {
    format!("p{depth}")
}

/// Flatten records into renderer rows
pub fn table_rows(records: &[ProjectedRecord]) -> Vec<Value> {
    let depth = records
        .iter()
        .map(|record| record.segments.len())
        .max()
        .unwrap_or(0);
    records
        .iter()
        .map(|record| {
            let mut row = Map::new();
            row.insert("path".to_string(), Value::from(record.path.as_str()));
            row.insert("name".to_string(), Value::from(record.name.as_str()));
            row.insert("value".to_string(), Value::from(record.value));
            row.insert(
                "percent_covered".to_string(),
                Value::from(record.percent_covered),
            );
            for i in 0..depth {
                let segment = record.segments.get(i).map(String::as_str).unwrap_or("");
                row.insert(column_name(i), Value::from(segment));
            }
            Value::Object(row)
        })
        .collect()
}

/// Write the projected table as pretty-printed JSON
pub fn write_table<W: Write>(writer: &mut W, records: &[ProjectedRecord]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &table_rows(records))?;
    writer.write_all(b"\n")?;
    Ok(())
}
