//! PTM text header: six newline-terminated ASCII lines.
//!
//! ```text
//! PTM_1.2
//! PTM_FORMAT_LRGB
//! <width>
//! <height>
//! <scale0> ... <scale5>
//! <bias0> ... <bias5>
//! ```
//!
//! `\r` bytes are dropped wherever they appear, so CRLF files parse too.

use crate::error::PtmError;
use crate::format::PtmFormat;

const HEADER_LINES: usize = 6;
const VERSION_PREFIX: &str = "PTM_1.";
const MAX_SHOWN_VERSION: usize = 64;

/// Parsed PTM header.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    pub version: String,
    pub format: PtmFormat,
    pub width: u32,
    pub height: u32,
    pub scale: [f64; 6],
    pub bias: [f64; 6],
}

impl Header {
    /// Dequantize a stored coefficient byte: `(raw - bias[c]) * scale[c]`.
    #[inline]
    pub fn dequantize(&self, c: usize, raw: u8) -> f64 {
        (f64::from(raw) - self.bias[c]) * self.scale[c]
    }
}

/// One header line with `\r` removed, and the byte offset where it started.
struct Line {
    bytes: Vec<u8>,
    offset: usize,
}

impl Line {
    fn text(&self, index: usize) -> Result<&str, PtmError> {
        core::str::from_utf8(&self.bytes).map_err(|_| PtmError::MalformedHeader {
            line: index,
            offset: self.offset,
            reason: "line is not valid text".into(),
        })
    }
}

/// Parse the header, returning it together with the offset of the pixel data.
pub(crate) fn parse_header(data: &[u8]) -> Result<(Header, usize), PtmError> {
    let mut lines = Lines::new(data);

    // Foreign files are rejected on the first line, before anything else is read.
    let line = match lines.next_line() {
        Ok(line) => line,
        Err(truncated) => {
            let partial = lines.remainder();
            if !version_prefix_ok(&partial, false) {
                return Err(unsupported_version(&partial));
            }
            return Err(truncated);
        }
    };
    if !version_prefix_ok(&line.bytes, true) {
        return Err(unsupported_version(&line.bytes));
    }
    let version = line.text(0)?.trim_end().to_owned();

    let line = lines.next_line()?;
    let format_name = String::from_utf8_lossy(&line.bytes);
    let format_name = format_name.trim();
    let format = PtmFormat::from_name(format_name).ok_or_else(|| PtmError::UnsupportedFormat {
        found: format_name.to_owned(),
    })?;

    let width = parse_dimension(&lines.next_line()?, 2, "width")?;
    let height = parse_dimension(&lines.next_line()?, 3, "height")?;
    let scale = parse_six(&lines.next_line()?, 4, "scale")?;
    let bias = parse_six(&lines.next_line()?, 5, "bias")?;

    Ok((
        Header {
            version,
            format,
            width,
            height,
            scale,
            bias,
        },
        lines.pos,
    ))
}

/// Whether `version` names a PTM 1.x file.
pub(crate) fn is_supported_version(version: &str) -> bool {
    version.starts_with(VERSION_PREFIX)
}

/// Serialize a header in the layout [`parse_header`] reads.
pub(crate) fn write_header(header: &Header, out: &mut Vec<u8>) {
    let join = |v: &[f64; 6]| {
        v.iter()
            .map(|x| format!("{x}"))
            .collect::<Vec<_>>()
            .join(" ")
    };
    let text = format!(
        "{}\n{}\n{}\n{}\n{}\n{}\n",
        header.version,
        header.format.name(),
        header.width,
        header.height,
        join(&header.scale),
        join(&header.bias),
    );
    out.extend_from_slice(text.as_bytes());
}

/// Pulls newline-terminated lines off the front of the buffer.
struct Lines<'a> {
    data: &'a [u8],
    pos: usize,
    read: usize,
}

impl<'a> Lines<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            read: 0,
        }
    }

    fn next_line(&mut self) -> Result<Line, PtmError> {
        let rest = &self.data[self.pos..];
        let Some(end) = rest.iter().position(|&b| b == b'\n') else {
            return Err(PtmError::Truncated {
                stage: "header",
                offset: self.pos,
                needed: HEADER_LINES,
                actual: self.read,
            });
        };
        let line = Line {
            bytes: strip_cr(&rest[..end]),
            offset: self.pos,
        };
        self.pos += end + 1;
        self.read += 1;
        Ok(line)
    }

    /// Start of the unterminated line after the last complete one.
    fn remainder(&self) -> Vec<u8> {
        let rest = &self.data[self.pos..];
        strip_cr(&rest[..rest.len().min(MAX_SHOWN_VERSION)])
    }
}

fn strip_cr(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().copied().filter(|&b| b != b'\r').collect()
}

/// Whether `bytes` can still become a supported version line.
fn version_prefix_ok(bytes: &[u8], complete: bool) -> bool {
    let prefix = VERSION_PREFIX.as_bytes();
    bytes.starts_with(prefix) || (!complete && prefix.starts_with(bytes))
}

fn unsupported_version(bytes: &[u8]) -> PtmError {
    let shown = &bytes[..bytes.len().min(MAX_SHOWN_VERSION)];
    PtmError::UnsupportedVersion {
        found: String::from_utf8_lossy(shown).trim_end().to_owned(),
    }
}

fn parse_dimension(line: &Line, index: usize, what: &str) -> Result<u32, PtmError> {
    let text = line.text(index)?;
    let value: u32 = text.trim().parse().map_err(|_| PtmError::MalformedHeader {
        line: index,
        offset: line.offset,
        reason: format!("{what} {text:?} is not a non-negative integer"),
    })?;
    if value == 0 {
        return Err(PtmError::MalformedHeader {
            line: index,
            offset: line.offset,
            reason: format!("{what} is zero"),
        });
    }
    Ok(value)
}

fn parse_six(line: &Line, index: usize, what: &str) -> Result<[f64; 6], PtmError> {
    let malformed = |reason: String| PtmError::MalformedHeader {
        line: index,
        offset: line.offset,
        reason,
    };

    let mut out = [0.0; 6];
    let mut count = 0;
    for token in line.text(index)?.split_whitespace() {
        if count == 6 {
            return Err(malformed(format!("more than 6 {what} values")));
        }
        let v: f64 = token
            .parse()
            .map_err(|_| malformed(format!("{what} value {token:?} is not a number")))?;
        if !v.is_finite() {
            return Err(malformed(format!("{what} value {token:?} is not finite")));
        }
        out[count] = v;
        count += 1;
    }
    if count != 6 {
        return Err(malformed(format!("expected 6 {what} values, got {count}")));
    }
    Ok(out)
}
