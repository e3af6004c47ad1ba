//! Cobertura XML coverage report importer
//!
//! Reads the subset coverage.py emits: the basename of the first `<source>`
//! element becomes a path prefix for every `<class filename="...">`, and a
//! class's counts come from its `<lines>` block (`hits="0"` is a missing
//! line, anything else a covered one). Per-method `<line>` entries under
//! `<methods>` repeat the class-level ones and are not counted.

use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::Reader;

use super::collect_report;
use crate::config::ReportConfig;
use crate::core::errors::{Error, Result};
use crate::core::types::{CoverageReport, FileCoverage};

/// Import a Cobertura XML coverage report with the default entry policy
pub fn import_xml(text: &str) -> Result<CoverageReport> {
    import_xml_with(text, &ReportConfig::default())
}

/// Import a Cobertura XML coverage report.
///
/// Unparsable XML or a `<class>` without a `filename` attribute fails the
/// whole import.
pub fn import_xml_with(text: &str, config: &ReportConfig) -> Result<CoverageReport> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    // Classes are collected with their raw filenames and only prefixed once
    // the whole document has been read, so element order does not matter.
    let mut classes: Vec<(String, FileCoverage)> = Vec::new();
    let mut current: Option<(String, FileCoverage)> = None;

    let mut in_sources = false;
    let mut in_first_source = false;
    let mut first_source_done = false;
    let mut in_methods = false;
    let mut source_buf = String::new();

    loop {
        match reader.read_event() {
            Err(e) => {
                return Err(Error::malformed_report(format!(
                    "invalid coverage XML at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"sources" => in_sources = true,
                b"source" if in_sources && !first_source_done => in_first_source = true,
                b"methods" => in_methods = true,
                b"class" => current = Some((class_filename(&e)?, FileCoverage::default())),
                b"line" if !in_methods => tally_line(&e, &mut current)?,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"source" if in_sources && !first_source_done => first_source_done = true,
                b"class" => classes.push((class_filename(&e)?, FileCoverage::default())),
                b"line" if !in_methods => tally_line(&e, &mut current)?,
                _ => {}
            },
            Ok(Event::Text(t)) if in_first_source => {
                let chunk = t
                    .unescape()
                    .map_err(|e| Error::malformed_report(format!("invalid source text: {e}")))?;
                source_buf.push_str(&chunk);
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"sources" => in_sources = false,
                b"source" if in_first_source => {
                    in_first_source = false;
                    first_source_done = true;
                }
                b"methods" => in_methods = false,
                b"class" => {
                    if let Some(class) = current.take() {
                        classes.push(class);
                    }
                }
                _ => {}
            },
            Ok(_) => {}
        }
    }

    let root_prefix = basename(source_buf.trim()).to_string();
    log::debug!(
        "imported {} class entries from XML report (root prefix {root_prefix:?})",
        classes.len()
    );
    Ok(collect_report(
        classes
            .into_iter()
            .map(|(filename, cov)| (prefixed(&root_prefix, &filename), cov)),
        config,
    ))
}

fn class_filename(e: &BytesStart) -> Result<String> {
    let attr = e
        .try_get_attribute("filename")
        .map_err(|err| Error::malformed_report(format!("invalid class attributes: {err}")))?
        .ok_or_else(|| Error::malformed_report("class element without filename attribute"))?;
    let value = attr
        .unescape_value()
        .map_err(|err| Error::malformed_report(format!("invalid filename attribute: {err}")))?;
    Ok(value.into_owned())
}

/// Count a `<line>` element into the currently open class, if any
fn tally_line(e: &BytesStart, current: &mut Option<(String, FileCoverage)>) -> Result<()> {
    let Some((_, cov)) = current.as_mut() else {
        return Ok(());
    };
    let missed = match e
        .try_get_attribute("hits")
        .map_err(|err| Error::malformed_report(format!("invalid line attributes: {err}")))?
    {
        Some(attr) => {
            let hits = attr
                .unescape_value()
                .map_err(|err| Error::malformed_report(format!("invalid hits attribute: {err}")))?;
            hits == "0"
        }
        // A line without a hits attribute is not a recorded miss
        None => false,
    };
    if missed {
        cov.missing_lines += 1;
    } else {
        cov.covered_lines += 1;
    }
    Ok(())
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn prefixed(root_prefix: &str, filename: &str) -> String {
    if root_prefix.is_empty() {
        filename.to_string()
    } else {
        format!("{root_prefix}/{filename}")
    }
}
