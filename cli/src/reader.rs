use anyhow::{Context, Result};
use std::io::BufRead;

/// Line-based reader over any buffered input source, so the console
/// never leaks into the engine and tests can drive it from memory.
pub struct LineReader<R> {
    input: R,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// One line without its terminator; `None` at end of input.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    /// One integer on its own line.
    pub fn read_int(&mut self) -> Result<i32> {
        let line = self.read_line()?.context("unexpected end of input")?;
        line.trim()
            .parse()
            .with_context(|| format!("expected an integer, got {line:?}"))
    }

    /// A count followed by that many ratings, all on one line.
    pub fn read_ratings(&mut self) -> Result<Vec<i32>> {
        let line = self.read_line()?.context("unexpected end of input")?;
        let mut numbers = line.split_whitespace();
        let count: usize = numbers
            .next()
            .context("expected a ratings count")?
            .parse()
            .with_context(|| format!("bad ratings count in {line:?}"))?;

        let mut ratings = Vec::with_capacity(count);
        for _ in 0..count {
            let raw = numbers
                .next()
                .with_context(|| format!("expected {count} ratings in {line:?}"))?;
            ratings.push(raw.parse().with_context(|| format!("bad rating {raw:?}"))?);
        }
        Ok(ratings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_lines_and_integers() {
        let mut reader = LineReader::new(Cursor::new("white cat\n3\n"));
        assert_eq!(reader.read_line().unwrap().unwrap(), "white cat");
        assert_eq!(reader.read_int().unwrap(), 3);
        assert!(reader.read_line().unwrap().is_none());
    }

    #[test]
    fn reads_count_prefixed_ratings() {
        let mut reader = LineReader::new(Cursor::new("2 8 -3\n0\n"));
        assert_eq!(reader.read_ratings().unwrap(), vec![8, -3]);
        assert_eq!(reader.read_ratings().unwrap(), Vec::<i32>::new());
    }

    #[test]
    fn short_ratings_line_is_an_error() {
        let mut reader = LineReader::new(Cursor::new("3 8 -3\n"));
        assert!(reader.read_ratings().is_err());
    }

    #[test]
    fn strips_carriage_returns() {
        let mut reader = LineReader::new(Cursor::new("fluffy cat\r\n"));
        assert_eq!(reader.read_line().unwrap().unwrap(), "fluffy cat");
    }
}
