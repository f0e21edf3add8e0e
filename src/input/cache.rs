use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::input::{InputError, require_file};

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    require_file(path)?;
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Next non-blank line as raw bytes, trimmed of trailing whitespace. Bytes are
/// not decoded here; `line_no` counts every physical line read so far.
pub fn read_content_line(
    reader: &mut dyn BufRead,
    buf: &mut Vec<u8>,
    line_no: &mut usize,
) -> Result<bool, InputError> {
    loop {
        buf.clear();
        let read = reader.read_until(b'\n', buf)?;
        if read == 0 {
            return Ok(false);
        }
        *line_no += 1;
        let trimmed = buf.trim_ascii_end().len();
        buf.truncate(trimmed);
        if !buf.trim_ascii_start().is_empty() {
            return Ok(true);
        }
    }
}
