//! 頁面查詢用的 CSS 子集。
//!
//! 支援：`tag`、`#id`、`.class`、`[attr]`、`[attr=value]`、複合（`section[id]`）、
//! 後代組合子（`.hero [data-animate]`）以及逗號分隔的選擇器列表。
//! `MemoryPage` 直接比對；`WebPage` 透過 `Display` 轉回 CSS 字串交給瀏覽器。

use crate::utils::error::{FolioError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    groups: Vec<Complex>,
}

/// 以後代組合子串接的複合選擇器，最後一個是比對主體
#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    parts: Vec<Compound>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

/// 可被選擇器比對的元素視圖
pub trait SelectorSubject: Sized {
    fn tag(&self) -> &str;
    fn id(&self) -> Option<&str>;
    fn has_class(&self, class: &str) -> bool;
    fn attribute(&self, name: &str) -> Option<&str>;
    fn parent(&self) -> Option<Self>;
}

impl Selector {
    pub fn id(id: &str) -> Self {
        Self {
            groups: vec![Complex {
                parts: vec![Compound {
                    id: Some(id.to_string()),
                    ..Compound::default()
                }],
            }],
        }
    }

    pub fn class(class: &str) -> Self {
        Self {
            groups: vec![Complex {
                parts: vec![Compound {
                    classes: vec![class.to_string()],
                    ..Compound::default()
                }],
            }],
        }
    }

    pub fn matches<S: SelectorSubject>(&self, subject: &S) -> bool {
        self.groups.iter().any(|group| group.matches(subject))
    }
}

impl Complex {
    fn matches<S: SelectorSubject>(&self, subject: &S) -> bool {
        let Some((last, ancestors)) = self.parts.split_last() else {
            return false;
        };
        if !last.matches(subject) {
            return false;
        }

        // 只有後代組合子，由右往左貪婪比對祖先即可
        let mut cursor = subject.parent();
        for part in ancestors.iter().rev() {
            loop {
                match cursor {
                    Some(node) => {
                        let next = node.parent();
                        if part.matches(&node) {
                            cursor = next;
                            break;
                        }
                        cursor = next;
                    }
                    None => return false,
                }
            }
        }
        true
    }
}

impl Compound {
    fn matches<S: SelectorSubject>(&self, subject: &S) -> bool {
        if let Some(tag) = &self.tag {
            if !subject.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if subject.id() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| subject.has_class(class)) {
            return false;
        }
        self.attrs.iter().all(|attr| match (&attr.value, subject.attribute(&attr.name)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(expected), Some(actual)) => expected == actual,
        })
    }

    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attrs.is_empty()
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

struct Parser<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Parser<'a> {
    fn error(&self, reason: impl Into<String>) -> FolioError {
        FolioError::SelectorError {
            selector: self.source.to_string(),
            reason: reason.into(),
        }
    }

    fn ident(&mut self) -> Result<String> {
        let mut out = String::new();
        while let Some(&c) = self.chars.peek() {
            if !is_ident_char(c) {
                break;
            }
            out.push(c);
            self.chars.next();
        }
        if out.is_empty() {
            return Err(self.error("expected an identifier"));
        }
        Ok(out)
    }

    fn attr(&mut self) -> Result<AttrMatch> {
        let name = self.ident()?;
        match self.chars.next() {
            Some(']') => Ok(AttrMatch { name, value: None }),
            Some('=') => {
                let quote = match self.chars.peek() {
                    Some(&q) if q == '"' || q == '\'' => {
                        self.chars.next();
                        Some(q)
                    }
                    _ => None,
                };
                let mut value = String::new();
                loop {
                    match self.chars.next() {
                        Some(c) if Some(c) == quote => {
                            if self.chars.next() != Some(']') {
                                return Err(self.error("expected ']' after attribute value"));
                            }
                            break;
                        }
                        Some(']') if quote.is_none() => break,
                        // 引號內以反斜線跳脫下一個字元，與 Display 的輸出對應
                        Some('\\') if quote.is_some() => match self.chars.next() {
                            Some(c) => value.push(c),
                            None => return Err(self.error("unterminated attribute selector")),
                        },
                        Some(c) => value.push(c),
                        None => return Err(self.error("unterminated attribute selector")),
                    }
                }
                Ok(AttrMatch {
                    name,
                    value: Some(value),
                })
            }
            _ => Err(self.error("expected ']' or '=' in attribute selector")),
        }
    }

    fn compound(&mut self) -> Result<Compound> {
        let mut compound = Compound::default();
        if matches!(self.chars.peek(), Some(&c) if is_ident_char(c)) {
            compound.tag = Some(self.ident()?.to_ascii_lowercase());
        }
        loop {
            match self.chars.peek() {
                Some('#') => {
                    self.chars.next();
                    compound.id = Some(self.ident()?);
                }
                Some('.') => {
                    self.chars.next();
                    compound.classes.push(self.ident()?);
                }
                Some('[') => {
                    self.chars.next();
                    compound.attrs.push(self.attr()?);
                }
                _ => break,
            }
        }
        if compound.is_empty() {
            return Err(self.error("empty selector component"));
        }
        Ok(compound)
    }

    fn skip_whitespace(&mut self) -> bool {
        let mut skipped = false;
        while matches!(self.chars.peek(), Some(c) if c.is_whitespace()) {
            self.chars.next();
            skipped = true;
        }
        skipped
    }

    fn parse(mut self) -> Result<Selector> {
        let mut groups = Vec::new();
        let mut parts = Vec::new();
        self.skip_whitespace();
        loop {
            parts.push(self.compound()?);
            self.skip_whitespace();
            match self.chars.peek() {
                None => break,
                Some(',') => {
                    self.chars.next();
                    groups.push(Complex {
                        parts: std::mem::take(&mut parts),
                    });
                    self.skip_whitespace();
                }
                Some(&c) if is_ident_char(c) || c == '#' || c == '.' || c == '[' => {}
                Some(&c) => return Err(self.error(format!("unsupported character '{}'", c))),
            }
        }
        groups.push(Complex { parts });
        Ok(Selector { groups })
    }
}

impl FromStr for Selector {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(FolioError::SelectorError {
                selector: s.to_string(),
                reason: "selector is empty".to_string(),
            });
        }
        Parser {
            source: s,
            chars: s.chars().peekable(),
        }
        .parse()
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = &self.tag {
            write!(f, "{}", tag)?;
        }
        if let Some(id) = &self.id {
            write!(f, "#{}", id)?;
        }
        for class in &self.classes {
            write!(f, ".{}", class)?;
        }
        for attr in &self.attrs {
            match &attr.value {
                Some(value) => {
                    write!(f, "[{}=\"", attr.name)?;
                    for c in value.chars() {
                        if c == '"' || c == '\\' {
                            write!(f, "\\")?;
                        }
                        write!(f, "{}", c)?;
                    }
                    write!(f, "\"]")?;
                }
                None => write!(f, "[{}]", attr.name)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            for (j, part) in group.parts.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", part)?;
            }
        }
        Ok(())
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
