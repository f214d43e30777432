use super::Result;

pub const BYTES_PER_ROW: usize = 32;

/// Two characters of a hex dump. `text` may be a single trailing character
/// for an odd-length dump, read as one hex digit. Cells holding non-hex
/// characters count as non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteCell {
    pub text: String,
    pub nonzero: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteView {
    cells: Vec<ByteCell>,
}

impl ByteView {
    pub fn parse(text: &str) -> Self {
        let digits = strip_hex_prefix(text);
        let chars: Vec<char> = digits.chars().collect();
        let cells = chars
            .chunks(2)
            .map(|chunk| {
                let text: String = chunk.iter().collect();
                let nonzero = u8::from_str_radix(&text, 16).map_or(true, |byte| byte != 0);
                ByteCell { text, nonzero }
            })
            .collect();
        Self { cells }
    }

    pub fn byte_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[ByteCell] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[ByteCell]> {
        self.cells.chunks(BYTES_PER_ROW)
    }

    /// Rows rendered as space-separated byte pairs.
    pub fn lines(&self) -> Vec<String> {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}

fn strip_hex_prefix(text: &str) -> String {
    let text = text.trim();
    let text = text.strip_prefix("0x").unwrap_or(text);
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Strict decode of a hex dump into bytes.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(strip_hex_prefix(text))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_into_rows_of_thirty_two() {
        let dump = format!("0x{}", "00ff".repeat(20));
        let view = ByteView::parse(&dump);
        assert_eq!(view.byte_count(), 40);
        let lines = view.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("00 ff 00 ff"));
        assert_eq!(lines[1].split(' ').count(), 8);
    }

    #[test]
    fn marks_nonzero_cells() {
        let view = ByteView::parse("00a1zz0");
        let flags: Vec<bool> = view.cells().iter().map(|c| c.nonzero).collect();
        assert_eq!(flags, vec![false, true, true, false]);
        assert_eq!(view.cells()[3].text, "0");
    }

    #[test]
    fn empty_input_has_no_bytes() {
        let view = ByteView::parse("0x");
        assert_eq!(view.byte_count(), 0);
        assert!(view.lines().is_empty());
    }

    #[test]
    fn strict_decode() {
        assert_eq!(decode("0xdead beef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert!(decode("0xabc").is_err());
        assert!(decode("zz").is_err());
    }
}
