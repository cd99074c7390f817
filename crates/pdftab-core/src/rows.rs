//! Row heuristic over extracted page text.
//!
//! A line is table-like when runs of two or more spaces split it into at
//! least two non-empty cells. Column alignment across lines, tabs and
//! single-space gaps are not considered.

/// One table-like line: its trimmed, non-empty cells in order.
pub type Row = Vec<String>;

/// Parse one page of text into rows, in line order.
pub fn parse_page(text: &str) -> Vec<Row> {
    text.split('\n').filter_map(parse_line).collect()
}

/// Parse a single line; `None` if it is not table-like.
pub fn parse_line(line: &str) -> Option<Row> {
    let cells: Row = split_on_gaps(line)
        .into_iter()
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect();
    (cells.len() > 1).then_some(cells)
}

/// Split on every run of two or more consecutive spaces.
fn split_on_gaps(line: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let bytes = line.as_bytes();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b' ' && bytes.get(i + 1) == Some(&b' ') {
            segments.push(&line[start..i]);
            while bytes.get(i) == Some(&b' ') {
                i += 1;
            }
            start = i;
        } else {
            i += 1;
        }
    }
    segments.push(&line[start..]);
    segments
}
