//! CSS selector subset.
//!
//! Supports type, universal, `#id`, `.class` and attribute selectors
//! (`[a]`, `[a=v]`, `[a^=v]`, `[a$=v]`, `[a*=v]`, `[a~=v]`), compound
//! selectors, the descendant combinator and comma-separated lists. That
//! covers every selector the page behaviors and their markup rely on.

use super::document::{Document, NodeId};

/// Errors from parsing a selector string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected {found:?} at offset {offset} in selector {selector:?}")]
    UnexpectedChar {
        selector: String,
        found: char,
        offset: usize,
    },

    #[error("expected a name after {after:?} in selector {selector:?}")]
    MissingName { selector: String, after: char },

    #[error("unterminated attribute selector in {0:?}")]
    UnterminatedAttribute(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
    Suffix(String),
    Substring(String),
    Word(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    op: AttrOp,
}

impl AttrMatch {
    fn matches(&self, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return false;
        };
        match &self.op {
            AttrOp::Exists => true,
            AttrOp::Equals(v) => value == v,
            AttrOp::Prefix(v) => !v.is_empty() && value.starts_with(v.as_str()),
            AttrOp::Suffix(v) => !v.is_empty() && value.ends_with(v.as_str()),
            AttrOp::Substring(v) => !v.is_empty() && value.contains(v.as_str()),
            AttrOp::Word(v) => value.split_whitespace().any(|w| w == v),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
    universal: bool,
}

impl Compound {
    fn is_empty(&self) -> bool {
        !self.universal
            && self.tag.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attrs.is_empty()
    }

    fn matches(&self, doc: &Document, id: NodeId) -> bool {
        let Some(element) = doc.element(id) else {
            return false;
        };
        if self.tag.as_deref().is_some_and(|t| t != element.tag()) {
            return false;
        }
        if self.id.as_deref().is_some_and(|i| Some(i) != element.id()) {
            return false;
        }
        if !self.classes.iter().all(|c| element.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|a| a.matches(element.attr(&a.name)))
    }
}

/// One comma-separated alternative: compounds joined by descendant
/// combinators, subject last.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    compounds: Vec<Compound>,
}

impl Complex {
    fn matches(&self, doc: &Document, id: NodeId) -> bool {
        let Some((subject, rest)) = self.compounds.split_last() else {
            return false;
        };
        if !subject.matches(doc, id) {
            return false;
        }
        let mut ancestors = doc.ancestors(id).skip(1);
        rest.iter()
            .rev()
            .all(|compound| ancestors.any(|a| compound.matches(doc, a)))
    }
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Complex>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut parser = Parser {
            input,
            chars: input.char_indices().collect(),
            pos: 0,
        };
        let alternatives = parser.parse_list()?;
        Ok(Self { alternatives })
    }

    /// Whether the node is an element matching any alternative.
    pub fn matches(&self, doc: &Document, id: NodeId) -> bool {
        self.alternatives.iter().any(|c| c.matches(doc, id))
    }
}

struct Parser<'a> {
    input: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || c == ':' || !c.is_ascii()
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, c)| c)
    }

    fn offset(&self) -> usize {
        self.chars
            .get(self.pos)
            .map(|&(o, _)| o)
            .unwrap_or(self.input.len())
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn name(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek().filter(|&c| is_name_char(c)) {
            out.push(c);
            self.pos += 1;
        }
        out
    }

    fn unexpected(&self, found: char) -> SelectorError {
        SelectorError::UnexpectedChar {
            selector: self.input.to_string(),
            found,
            offset: self.offset(),
        }
    }

    fn missing_name(&self, after: char) -> SelectorError {
        SelectorError::MissingName {
            selector: self.input.to_string(),
            after,
        }
    }

    fn parse_list(&mut self) -> Result<Vec<Complex>, SelectorError> {
        let mut alternatives = vec![self.parse_complex()?];
        while self.peek() == Some(',') {
            self.pos += 1;
            alternatives.push(self.parse_complex()?);
        }
        if let Some(c) = self.peek() {
            return Err(self.unexpected(c));
        }
        Ok(alternatives)
    }

    fn parse_complex(&mut self) -> Result<Complex, SelectorError> {
        let mut compounds = Vec::new();
        self.skip_whitespace();
        loop {
            let compound = self.parse_compound()?;
            if compound.is_empty() {
                break;
            }
            compounds.push(compound);
            if !self.skip_whitespace() {
                break;
            }
        }
        if compounds.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(Complex { compounds })
    }

    fn parse_compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();
        while let Some(c) = self.peek() {
            match c {
                '*' => {
                    self.pos += 1;
                    compound.universal = true;
                }
                '#' => {
                    self.pos += 1;
                    let name = self.name();
                    if name.is_empty() {
                        return Err(self.missing_name('#'));
                    }
                    compound.id = Some(name);
                }
                '.' => {
                    self.pos += 1;
                    let name = self.name();
                    if name.is_empty() {
                        return Err(self.missing_name('.'));
                    }
                    compound.classes.push(name);
                }
                '[' => {
                    self.pos += 1;
                    compound.attrs.push(self.parse_attr()?);
                }
                c if is_name_char(c) && compound.is_empty() => {
                    compound.tag = Some(self.name().to_ascii_lowercase());
                }
                c if c.is_whitespace() || c == ',' => break,
                other => return Err(self.unexpected(other)),
            }
        }
        Ok(compound)
    }

    fn parse_attr(&mut self) -> Result<AttrMatch, SelectorError> {
        self.skip_whitespace();
        let name = self.name().to_ascii_lowercase();
        if name.is_empty() {
            return Err(self.missing_name('['));
        }
        self.skip_whitespace();

        let op_char = match self.peek() {
            Some(']') => {
                self.pos += 1;
                return Ok(AttrMatch {
                    name,
                    op: AttrOp::Exists,
                });
            }
            Some('=') => None,
            Some(c @ ('^' | '$' | '*' | '~')) => {
                self.pos += 1;
                Some(c)
            }
            Some(c) => return Err(self.unexpected(c)),
            None => return Err(SelectorError::UnterminatedAttribute(self.input.to_string())),
        };
        match self.peek() {
            Some('=') => self.pos += 1,
            Some(c) => return Err(self.unexpected(c)),
            None => return Err(SelectorError::UnterminatedAttribute(self.input.to_string())),
        }
        self.skip_whitespace();

        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let mut value = String::new();
                loop {
                    match self.peek() {
                        Some(c) if c == quote => {
                            self.pos += 1;
                            break;
                        }
                        Some(c) => {
                            value.push(c);
                            self.pos += 1;
                        }
                        None => {
                            return Err(SelectorError::UnterminatedAttribute(
                                self.input.to_string(),
                            ));
                        }
                    }
                }
                value
            }
            _ => self.name(),
        };
        self.skip_whitespace();
        match self.peek() {
            Some(']') => self.pos += 1,
            Some(c) => return Err(self.unexpected(c)),
            None => return Err(SelectorError::UnterminatedAttribute(self.input.to_string())),
        }

        let op = match op_char {
            None => AttrOp::Equals(value),
            Some('^') => AttrOp::Prefix(value),
            Some('$') => AttrOp::Suffix(value),
            Some('*') => AttrOp::Substring(value),
            _ => AttrOp::Word(value),
        };
        Ok(AttrMatch { name, op })
    }
}
