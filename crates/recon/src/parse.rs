//! Format parsers: raw inventory text → ordered [`RawRecord`]s.
//!
//! One line produces at most one record. Blank lines are skipped but still
//! counted, so line numbers in errors match what an editor shows.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{ReconError, Result};
use crate::model::RawRecord;

/// Whitespace, a literal `x`, then a digit. The first match separates the
/// item name from its quantity in multibuy and EFT lines.
static QTY_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\sx[0-9]").expect("quantity suffix pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Tab-separated `item, type, location, quantity` (container contents).
    Contents,
    /// `<item> x<qty>` per line, quantity optional.
    Multibuy,
    /// EFT fitting block: `[Hull, Name]` header and module lines.
    Eft,
}

impl InputFormat {
    pub const ALL: [InputFormat; 3] = [InputFormat::Contents, InputFormat::Multibuy, InputFormat::Eft];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contents => "contents",
            Self::Multibuy => "multibuy",
            Self::Eft => "eft",
        }
    }

    /// Guess a format from a file extension. Only unambiguous extensions map.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "tsv" => Some(Self::Contents),
            "eft" => Some(Self::Eft),
            _ => None,
        }
    }

    fn expected_shape(&self) -> &'static str {
        match self {
            Self::Contents => "item<TAB>type<TAB>location<TAB>quantity",
            Self::Multibuy => "<item name> [x<quantity>]",
            Self::Eft => "[<item name>, <qualifier>] [x<quantity>]",
        }
    }
}

impl FromStr for InputFormat {
    type Err = ReconError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "contents" => Ok(Self::Contents),
            "multibuy" => Ok(Self::Multibuy),
            "eft" => Ok(Self::Eft),
            other => Err(ReconError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse `raw_text` using a format named by its string tag.
pub fn parse(raw_text: &str, format: &str) -> Result<Vec<RawRecord>> {
    parse_records(raw_text, format.parse()?)
}

/// Parse `raw_text` in the given format. Fails on the first malformed line.
pub fn parse_records(raw_text: &str, format: InputFormat) -> Result<Vec<RawRecord>> {
    let parse_line = match format {
        InputFormat::Contents => parse_contents_line,
        InputFormat::Multibuy => parse_multibuy_line,
        InputFormat::Eft => parse_eft_line,
    };

    let records = content_lines(raw_text)
        .map(|(line_no, line)| parse_line(line_no, line))
        .collect::<Result<Vec<_>>>()?;

    tracing::trace!(%format, records = records.len(), "parsed inventory text");
    Ok(records)
}

/// Non-blank lines with their 1-based line numbers. `\r\n` endings tolerated.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| (i + 1, l))
}

fn parse_error(format: InputFormat, line: usize, content: &str, reason: impl Into<String>) -> ReconError {
    ReconError::Parse {
        format,
        line,
        content: content.to_string(),
        reason: reason.into(),
        expected: format.expected_shape(),
    }
}

fn parse_quantity(format: InputFormat, line_no: usize, line: &str, raw: &str) -> Result<u64> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(parse_error(format, line_no, line, format!("invalid quantity '{raw}'")));
    }
    raw.parse::<u64>()
        .map_err(|_| parse_error(format, line_no, line, format!("quantity '{raw}' out of range")))
}

fn parse_contents_line(line_no: usize, line: &str) -> Result<RawRecord> {
    let format = InputFormat::Contents;
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 4 {
        return Err(parse_error(
            format,
            line_no,
            line,
            format!("expected 4 tab-separated fields, found {}", fields.len()),
        ));
    }

    let item = fields[0].trim();
    if item.is_empty() {
        return Err(parse_error(format, line_no, line, "empty item name"));
    }
    let quantity = parse_quantity(format, line_no, line, fields[3])?;

    Ok(RawRecord::new(item, quantity, line_no))
}

/// Split at the first `<ws>x<digit>`. Returns the name part and, when present,
/// the text starting at the digit.
fn split_quantity(line: &str) -> (&str, Option<&str>) {
    match QTY_SUFFIX.find(line) {
        // The match ends just past the single-byte ASCII digit.
        Some(m) => (&line[..m.start()], Some(&line[m.end() - 1..])),
        None => (line, None),
    }
}

fn tokenize(format: InputFormat, line_no: usize, line: &str) -> Result<(String, u64)> {
    let (name, qty) = split_quantity(line);
    let quantity = match qty {
        Some(raw) => parse_quantity(format, line_no, line, raw)?,
        None => 1,
    };
    Ok((name.trim().to_string(), quantity))
}

fn parse_multibuy_line(line_no: usize, line: &str) -> Result<RawRecord> {
    let (item, quantity) = tokenize(InputFormat::Multibuy, line_no, line)?;
    if item.is_empty() {
        return Err(parse_error(InputFormat::Multibuy, line_no, line, "empty item name"));
    }
    Ok(RawRecord::new(item, quantity, line_no))
}

fn parse_eft_line(line_no: usize, line: &str) -> Result<RawRecord> {
    let format = InputFormat::Eft;
    let (name, quantity) = tokenize(format, line_no, line)?;

    if name.starts_with('[') != name.ends_with(']') {
        return Err(parse_error(format, line_no, line, "unbalanced bracket"));
    }

    let unbracketed = name.trim_matches(|c| c == '[' || c == ']');
    let item = unbracketed.split(',').next().unwrap_or_default().trim();
    if item.is_empty() {
        return Err(parse_error(format, line_no, line, "empty item name"));
    }

    Ok(RawRecord::new(item, quantity, line_no))
}
