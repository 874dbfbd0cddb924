//! Raw PPM (P6) header splitting and validation.

use anyhow::{bail, Result};

use pixleak_core::{Dimensions, HeaderTemplate};

/// A raw PPM image split into parsed header and pixel data.
#[derive(Debug)]
pub struct SplitImage<'a> {
    pub dims: Dimensions,
    pub body: &'a [u8],
}

/// Split a raw PPM image into its four header fields and the pixel data.
///
/// Accepted form: `MAGIC WIDTH HEIGHT MAXVAL` as ASCII tokens separated by
/// whitespace, one whitespace byte terminating the header, pixel bytes to
/// the end. Magic and maxval must equal the template's constants and the
/// dimensions must be plain decimal: the digest contract hashes the
/// canonical single-space rendering, so nothing else can participate.
pub fn split_image<'a>(data: &'a [u8], template: &HeaderTemplate) -> Result<SplitImage<'a>> {
    let mut pos = 0usize;
    let mut take_token = |what: &str| -> Result<&'a str> {
        while pos < data.len() && data[pos].is_ascii_whitespace() {
            pos += 1;
        }
        let start = pos;
        while pos < data.len() && !data[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if start == pos {
            bail!("truncated header: missing {what}");
        }
        std::str::from_utf8(&data[start..pos])
            .map_err(|_| anyhow::anyhow!("non-ASCII bytes in {what}"))
    };

    let magic = take_token("magic number")?;
    let width = take_token("width")?;
    let height = take_token("height")?;
    let maxval = take_token("maxval")?;

    if magic != template.magic() {
        bail!("unsupported magic number '{magic}' (expected {})", template.magic());
    }
    if maxval != template.maxval() {
        bail!("unsupported maxval '{maxval}' (expected {})", template.maxval());
    }
    let dims = Dimensions::new(parse_dimension(width)?, parse_dimension(height)?);

    // exactly one whitespace byte separates maxval from the pixel data
    if pos >= data.len() || !data[pos].is_ascii_whitespace() {
        bail!("missing whitespace terminator after header");
    }
    pos += 1;

    Ok(SplitImage {
        dims,
        body: &data[pos..],
    })
}

/// Decimal with no sign and no leading zeros: the only form the canonical
/// rendering can reproduce.
fn parse_dimension(token: &str) -> Result<u32> {
    if token.len() > 1 && token.starts_with('0') {
        bail!("non-canonical dimension '{token}'");
    }
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        bail!("non-decimal dimension '{token}'");
    }
    Ok(token.parse()?)
}
