//! Comma-separated row splitting.

/// One parsed record with its 1-based position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub index: usize,
    pub fields: Vec<String>,
}

impl Row {
    /// Number of fields the record was split into.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Split decoded text into rows.
///
/// Standard quoting applies (embedded commas, newlines and doubled quotes
/// inside quoted fields). There is no header row, records may have any
/// field count, and fields are returned untrimmed.
///
/// A blank line between records is a row with zero fields and takes its
/// own index. Blank lines after the last record are not rows, so trailing
/// newlines never produce a spurious final row.
pub fn parse_rows(text: &str) -> Result<Vec<Row>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    let mut record = csv::StringRecord::new();
    let mut consumed = 0;

    while reader.read_record(&mut record)? {
        // The reader skips empty lines; recover them from the bytes between
        // the end of the previous record and the start of this one.
        for _ in 0..blank_lines_at(text.as_bytes(), consumed) {
            rows.push(Row {
                index: rows.len() + 1,
                fields: Vec::new(),
            });
        }
        rows.push(Row {
            index: rows.len() + 1,
            fields: record.iter().map(str::to_owned).collect(),
        });
        consumed = usize::try_from(reader.position().byte()).unwrap_or(text.len());
    }

    Ok(rows)
}

/// Count the empty lines starting at byte `start`.
///
/// `\n`, `\r\n` and a lone `\r` each end a line. A `\n` right after a `\r`
/// at `start` completes the previous line's terminator and is not counted.
fn blank_lines_at(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    if i > 0 && bytes.get(i - 1) == Some(&b'\r') && bytes.get(i) == Some(&b'\n') {
        i += 1;
    }

    let mut count = 0;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'\r' => {
                i += 1;
                if bytes.get(i) == Some(&b'\n') {
                    i += 1;
                }
            }
            b'\n' => i += 1,
            _ => break,
        }
        count += 1;
    }
    count
}
