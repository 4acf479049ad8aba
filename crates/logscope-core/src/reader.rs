//! Tail reader for JSON-lines log files.
//!
//! Only the last `max_lines` physical lines are kept in memory while the file
//! streams past; those lines are then decoded one by one. A line that fails
//! to decode is dropped so that one bad write never hides the rest of the log.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::mem;
use std::path::Path;

use crate::config::{LogConfig, LogSource};
use crate::error::Result;
use crate::record::LogRecord;

/// Read and decode the tail of one of the configured log files.
pub fn read_log(config: &LogConfig, source: LogSource, max_lines: usize) -> Result<Vec<LogRecord>> {
    read_tail(config.path_for(source), max_lines)
}

/// Read the last `max_lines` lines of `path` and decode each as a record.
///
/// A missing file yields no records. Records are returned in file order.
pub fn read_tail(path: impl AsRef<Path>, max_lines: usize) -> Result<Vec<LogRecord>> {
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Log file not found, treating as empty");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let lines = tail_lines(BufReader::new(file), max_lines)?;
    let total = lines.len();
    let records = decode_lines(lines);

    let skipped = total - records.len();
    if skipped > 0 {
        tracing::debug!(path = %path.display(), skipped, "Dropped malformed log lines");
    }

    Ok(records)
}

/// Collect the last `max_lines` raw lines from `reader`.
///
/// A line is a `\n`-terminated chunk or the final unterminated chunk. Memory
/// held is bounded by the retained lines; evicted buffers are reused.
pub fn tail_lines<R: BufRead>(mut reader: R, max_lines: usize) -> io::Result<VecDeque<Vec<u8>>> {
    let mut tail: VecDeque<Vec<u8>> = VecDeque::with_capacity(max_lines.min(4096));
    if max_lines == 0 {
        return Ok(tail);
    }

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        if tail.len() == max_lines {
            let recycled = tail.pop_front().unwrap_or_default();
            tail.push_back(mem::replace(&mut buf, recycled));
        } else {
            tail.push_back(mem::take(&mut buf));
        }
    }

    Ok(tail)
}

/// Decode lines, keeping successes in order and discarding failures.
fn decode_lines(lines: impl IntoIterator<Item = Vec<u8>>) -> Vec<LogRecord> {
    lines
        .into_iter()
        .filter_map(|line| LogRecord::from_json_line(&line).ok())
        .collect()
}
