//! Plain-text rule file parser.
//!
//! One rule per line: `direction,protocol,ports,ips`. Fields may be
//! separated by commas, whitespace or both. `ports` and `ips` accept a
//! single value or a `start-end` range. `#` starts a comment.

use std::io::{BufRead, BufReader, Read};

use crate::rule::split_fields;
use crate::{Error, RawRule, Result, Rule};

/// Plain-text rule file parser.
pub struct TextParser;

impl TextParser {
    /// Parse raw rule records from a reader.
    ///
    /// Only the shape of each line is checked here; field values are
    /// validated by [`TextParser::parse_rules`].
    pub fn parse<R: Read>(reader: R) -> Result<Vec<RawRule>> {
        Ok(Self::records(reader)?
            .into_iter()
            .map(|(_, raw)| raw)
            .collect())
    }

    /// Parse and normalize rules from a reader.
    ///
    /// Errors carry the 1-based line number of the offending rule.
    pub fn parse_rules<R: Read>(reader: R) -> Result<Vec<Rule>> {
        Self::records(reader)?
            .into_iter()
            .map(|(line, raw)| {
                Rule::from_raw(&raw).map_err(|e| Error::Parse {
                    line,
                    message: e.to_string(),
                })
            })
            .collect()
    }

    fn records<R: Read>(reader: R) -> Result<Vec<(usize, RawRule)>> {
        let buf_reader = BufReader::new(reader);
        let mut records = Vec::new();

        for (idx, line) in buf_reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;

            // Remove comments
            let line = match line.find('#') {
                Some(pos) => &line[..pos],
                None => line.as_str(),
            };

            let fields = split_fields(line);
            match fields.as_slice() {
                [] => continue,
                [first, ..] if first.eq_ignore_ascii_case("direction") => continue,
                [direction, protocol, ports, ips] => {
                    let raw = RawRule::new(*direction, *protocol, *ports, *ips);
                    records.push((line_no, raw));
                }
                _ => {
                    return Err(Error::Parse {
                        line: line_no,
                        message: format!("expected 4 fields, got {}", fields.len()),
                    });
                }
            }
        }

        log::debug!("Parsed {} rule lines", records.len());
        Ok(records)
    }
}
