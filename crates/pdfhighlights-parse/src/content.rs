//! Content stream lexer.
//!
//! Splits decoded content stream bytes into [`Operation`]s (an operator plus
//! the operands that preceded it). Inline image data (`BI ... ID ... EI`) is
//! skipped since nothing downstream reads it.

use crate::error::BackendError;

/// A content stream operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Integer(i64),
    Real(f64),
    /// Name without the leading `/`.
    Name(String),
    /// Literal or hex string, already unescaped.
    String(Vec<u8>),
    Array(Vec<Operand>),
    Dictionary(Vec<(String, Operand)>),
    Boolean(bool),
    Null,
}

impl Operand {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Operand::Integer(i) => Some(*i as f64),
            Operand::Real(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Operand::Name(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Operand::String(s) => Some(s),
            _ => None,
        }
    }
}

/// One operator with its operands, in stream order.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub operator: String,
    pub operands: Vec<Operand>,
}

impl Operation {
    /// Numeric operand at `index`.
    pub fn number(&self, index: usize) -> Option<f64> {
        self.operands.get(index).and_then(Operand::as_f64)
    }

    /// The first `N` operands as numbers, if all present and numeric.
    pub fn numbers<const N: usize>(&self) -> Option<[f64; N]> {
        let mut out = [0.0; N];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.number(i)?;
        }
        Some(out)
    }
}

/// Lex a whole content stream.
///
/// # Errors
///
/// Returns [`BackendError::Interpreter`] for unterminated strings, arrays or
/// dictionaries and for malformed numbers.
pub fn parse_content(data: &[u8]) -> Result<Vec<Operation>, BackendError> {
    let mut lexer = Lexer { data, pos: 0 };
    let mut operations = Vec::new();
    let mut operands = Vec::new();

    while let Some(token) = lexer.next_token()? {
        match token {
            Token::Operand(operand) => operands.push(operand),
            Token::Keyword(keyword) if keyword == "BI" => {
                lexer.skip_inline_image();
                operands.clear();
            }
            Token::Keyword(keyword) => operations.push(Operation {
                operator: keyword,
                operands: std::mem::take(&mut operands),
            }),
            Token::ArrayEnd | Token::DictEnd => {}
        }
    }

    Ok(operations)
}

enum Token {
    Operand(Operand),
    Keyword(String),
    ArrayEnd,
    DictEnd,
}

struct Lexer<'a> {
    data: &'a [u8],
    pos: usize,
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0C | 0x00)
}

fn is_delimiter(b: u8) -> bool {
    matches!(
        b,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

fn is_regular(b: u8) -> bool {
    !is_whitespace(b) && !is_delimiter(b)
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

impl Lexer<'_> {
    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.data.get(self.pos + offset).copied()
    }

    fn skip_blanks(&mut self) {
        while let Some(b) = self.peek() {
            if is_whitespace(b) {
                self.pos += 1;
            } else if b == b'%' {
                while let Some(c) = self.peek() {
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, BackendError> {
        loop {
            self.skip_blanks();
            let Some(b) = self.peek() else {
                return Ok(None);
            };
            let token = match b {
                b'(' => Token::Operand(Operand::String(self.literal_string()?)),
                b'<' if self.peek_at(1) == Some(b'<') => {
                    self.pos += 2;
                    Token::Operand(Operand::Dictionary(self.dictionary()?))
                }
                b'<' => Token::Operand(Operand::String(self.hex_string()?)),
                b'>' if self.peek_at(1) == Some(b'>') => {
                    self.pos += 2;
                    Token::DictEnd
                }
                b'[' => {
                    self.pos += 1;
                    Token::Operand(Operand::Array(self.array()?))
                }
                b']' => {
                    self.pos += 1;
                    Token::ArrayEnd
                }
                b'/' => Token::Operand(Operand::Name(self.name())),
                b'0'..=b'9' | b'+' | b'-' | b'.' => Token::Operand(self.number()?),
                b if is_regular(b) => {
                    let word = self.keyword();
                    match word.as_str() {
                        "true" => Token::Operand(Operand::Boolean(true)),
                        "false" => Token::Operand(Operand::Boolean(false)),
                        "null" => Token::Operand(Operand::Null),
                        _ => Token::Keyword(word),
                    }
                }
                _ => {
                    // Stray delimiter such as `)` or `{`.
                    self.pos += 1;
                    continue;
                }
            };
            return Ok(Some(token));
        }
    }

    fn literal_string(&mut self) -> Result<Vec<u8>, BackendError> {
        self.pos += 1;
        let mut out = Vec::new();
        let mut depth = 1u32;

        while let Some(b) = self.peek() {
            self.pos += 1;
            match b {
                b'(' => {
                    depth += 1;
                    out.push(b);
                }
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(out);
                    }
                    out.push(b);
                }
                b'\\' => {
                    let Some(esc) = self.peek() else { break };
                    self.pos += 1;
                    match esc {
                        b'n' => out.push(b'\n'),
                        b'r' => out.push(b'\r'),
                        b't' => out.push(b'\t'),
                        b'b' => out.push(0x08),
                        b'f' => out.push(0x0C),
                        b'\r' => {
                            if self.peek() == Some(b'\n') {
                                self.pos += 1;
                            }
                        }
                        b'\n' => {}
                        b'0'..=b'7' => {
                            let mut value = u32::from(esc - b'0');
                            for _ in 0..2 {
                                match self.peek() {
                                    Some(d @ b'0'..=b'7') => {
                                        value = value * 8 + u32::from(d - b'0');
                                        self.pos += 1;
                                    }
                                    _ => break,
                                }
                            }
                            out.push((value & 0xFF) as u8);
                        }
                        other => out.push(other),
                    }
                }
                _ => out.push(b),
            }
        }

        Err(BackendError::Interpreter(
            "unterminated literal string".to_string(),
        ))
    }

    fn hex_string(&mut self) -> Result<Vec<u8>, BackendError> {
        self.pos += 1;
        let mut nibbles = Vec::new();
        loop {
            let Some(b) = self.peek() else {
                return Err(BackendError::Interpreter(
                    "unterminated hex string".to_string(),
                ));
            };
            self.pos += 1;
            if b == b'>' {
                break;
            }
            if is_whitespace(b) {
                continue;
            }
            let value = hex_value(b).ok_or_else(|| {
                BackendError::Interpreter(format!("invalid hex digit {:?}", b as char))
            })?;
            nibbles.push(value);
        }
        if nibbles.len() % 2 == 1 {
            nibbles.push(0);
        }
        Ok(nibbles.chunks(2).map(|p| (p[0] << 4) | p[1]).collect())
    }

    fn array(&mut self) -> Result<Vec<Operand>, BackendError> {
        let mut items = Vec::new();
        loop {
            match self.next_token()? {
                None => {
                    return Err(BackendError::Interpreter("unterminated array".to_string()));
                }
                Some(Token::ArrayEnd) => return Ok(items),
                Some(Token::Operand(operand)) => items.push(operand),
                // Keywords never belong in arrays; keep them as names.
                Some(Token::Keyword(word)) => items.push(Operand::Name(word)),
                Some(Token::DictEnd) => {}
            }
        }
    }

    fn dictionary(&mut self) -> Result<Vec<(String, Operand)>, BackendError> {
        let mut entries = Vec::new();
        let mut key: Option<String> = None;
        loop {
            match self.next_token()? {
                None => {
                    return Err(BackendError::Interpreter(
                        "unterminated dictionary".to_string(),
                    ));
                }
                Some(Token::DictEnd) => return Ok(entries),
                Some(Token::Operand(operand)) => match key.take() {
                    Some(k) => entries.push((k, operand)),
                    None => match operand {
                        Operand::Name(name) => key = Some(name),
                        _ => {
                            return Err(BackendError::Interpreter(
                                "expected name key in dictionary".to_string(),
                            ));
                        }
                    },
                },
                Some(Token::Keyword(word)) => {
                    if let Some(k) = key.take() {
                        entries.push((k, Operand::Name(word)));
                    }
                }
                Some(Token::ArrayEnd) => {}
            }
        }
    }

    fn name(&mut self) -> String {
        self.pos += 1;
        let mut raw = Vec::new();
        while let Some(b) = self.peek() {
            if !is_regular(b) {
                break;
            }
            self.pos += 1;
            if b == b'#' {
                if let (Some(hi), Some(lo)) = (
                    self.peek().and_then(hex_value),
                    self.peek_at(1).and_then(hex_value),
                ) {
                    raw.push((hi << 4) | lo);
                    self.pos += 2;
                    continue;
                }
            }
            raw.push(b);
        }
        String::from_utf8_lossy(&raw).into_owned()
    }

    fn number(&mut self) -> Result<Operand, BackendError> {
        let start = self.pos;
        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        let mut seen_dot = false;
        while let Some(b) = self.peek() {
            match b {
                b'0'..=b'9' => self.pos += 1,
                b'.' if !seen_dot => {
                    seen_dot = true;
                    self.pos += 1;
                }
                _ => break,
            }
        }

        let token = std::str::from_utf8(&self.data[start..self.pos])
            .map_err(|_| BackendError::Interpreter("non-ASCII number".to_string()))?;
        // Lone signs or dots occur in damaged streams; read them as zero.
        if matches!(token, "+" | "-" | "." | "+." | "-.") {
            return Ok(Operand::Integer(0));
        }
        if seen_dot {
            token
                .parse::<f64>()
                .map(Operand::Real)
                .map_err(|_| BackendError::Interpreter(format!("invalid real number: {token}")))
        } else {
            match token.parse::<i64>() {
                Ok(i) => Ok(Operand::Integer(i)),
                // Integers too large for i64 still make sense as reals.
                Err(_) => token
                    .parse::<f64>()
                    .map(Operand::Real)
                    .map_err(|_| BackendError::Interpreter(format!("invalid integer: {token}"))),
            }
        }
    }

    fn keyword(&mut self) -> String {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if !is_regular(b) {
                break;
            }
            self.pos += 1;
        }
        String::from_utf8_lossy(&self.data[start..self.pos]).into_owned()
    }

    /// Skip from after `BI` to just past the matching `EI`.
    fn skip_inline_image(&mut self) {
        while self.pos < self.data.len() {
            let at_ei = self.data[self.pos] == b'E'
                && self.peek_at(1) == Some(b'I')
                && self.pos > 0
                && is_whitespace(self.data[self.pos - 1])
                && self.peek_at(2).is_none_or(|b| !is_regular(b));
            if at_ei {
                self.pos += 2;
                return;
            }
            self.pos += 1;
        }
    }
}
