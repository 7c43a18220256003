use std::collections::VecDeque;
use std::io::{self, BufRead, Read};

const NAN: &[u8] = b"nan";
const NULL: &[u8] = b"null";

/// Streaming reader that rewrites bare not-a-number tokens (`NaN`, `-NaN`, `nan`, any ASCII case)
/// to `null`.
///
/// Tokens inside string literals and tokens glued to a word byte (`banana`, `1.nan`) are passed
/// through. A token may straddle any number of `fill_buf` chunks of the inner reader.
pub(crate) struct NanTokens<R> {
    inner: R,
    scan: Scanner,
    out: VecDeque<u8>,
    eof: bool,
}

impl<R: BufRead> NanTokens<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            scan: Scanner::default(),
            out: VecDeque::new(),
            eof: false,
        }
    }
}

impl<R: BufRead> Read for NanTokens<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        while self.out.is_empty() && !self.eof {
            let chunk = self.inner.fill_buf()?;
            if chunk.is_empty() {
                self.scan.finish(&mut self.out);
                self.eof = true;
                break;
            }
            let n = chunk.len();
            for &b in chunk {
                self.scan.feed(b, &mut self.out);
            }
            self.inner.consume(n);
        }

        let n = buf.len().min(self.out.len());
        for (dst, src) in buf.iter_mut().zip(self.out.drain(..n)) {
            *dst = src;
        }
        Ok(n)
    }
}

// Holds back at most one candidate token (`-nan` is the longest) until the byte after it is seen.
#[derive(Default)]
struct Scanner {
    in_string: bool,
    escaped: bool,
    prev_word: bool,
    cand: [u8; 4],
    cand_len: usize,
}

impl Scanner {
    fn feed(&mut self, b: u8, out: &mut VecDeque<u8>) {
        if self.in_string {
            out.push_back(b);
            if self.escaped {
                self.escaped = false;
            } else if b == b'\\' {
                self.escaped = true;
            } else if b == b'"' {
                self.in_string = false;
            }
            return;
        }

        if self.cand_len > 0 {
            let body = self.body_len();
            if body < NAN.len() {
                if b.to_ascii_lowercase() == NAN[body] {
                    self.cand[self.cand_len] = b;
                    self.cand_len += 1;
                } else {
                    self.abandon(b, out);
                }
                return;
            }
            if is_word_byte(b) {
                self.abandon(b, out);
                return;
            }
            out.extend(NULL);
            self.cand_len = 0;
            self.prev_word = true;
        }

        if b == b'"' {
            out.push_back(b);
            self.in_string = true;
            self.prev_word = false;
        } else if !self.prev_word && (b == b'-' || b.to_ascii_lowercase() == NAN[0]) {
            self.cand[0] = b;
            self.cand_len = 1;
        } else {
            out.push_back(b);
            self.prev_word = is_word_byte(b);
        }
    }

    fn finish(&mut self, out: &mut VecDeque<u8>) {
        if self.cand_len == 0 {
            return;
        }
        if self.body_len() == NAN.len() {
            out.extend(NULL);
        } else {
            out.extend(&self.cand[..self.cand_len]);
        }
        self.cand_len = 0;
    }

    fn body_len(&self) -> usize {
        self.cand_len - usize::from(self.cand[0] == b'-')
    }

    // The held bytes are not a token: emit the first one and rescan the rest, since a token may
    // start inside them (`--nan`).
    fn abandon(&mut self, b: u8, out: &mut VecDeque<u8>) {
        let (held, len) = (self.cand, self.cand_len);
        self.cand_len = 0;
        out.push_back(held[0]);
        self.prev_word = is_word_byte(held[0]);
        for &c in &held[1..len] {
            self.feed(c, out);
        }
        self.feed(b, out);
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'.'
}

#[cfg(test)]
#[path = "../../tests/unit/decode/nan.rs"]
mod tests;
