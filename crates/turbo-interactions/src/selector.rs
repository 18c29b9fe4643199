//! A small CSS selector engine.
//!
//! Covers what storefront markup hooks need: type, `#id`, `.class` and
//! attribute conditions, joined by descendant or child combinators, with
//! `,`-separated alternatives. Browser hosts hand the source text to the
//! native engine; the in-memory DOM matches with [`Selector::matches`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{InteractionError, Result};

/// Attribute condition inside `[...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrCondition {
    /// `[name]`
    Exists { name: String },
    /// `[name=value]`
    Equals { name: String, value: String },
    /// `[name^=value]`
    StartsWith { name: String, value: String },
    /// `[name$=value]`
    EndsWith { name: String, value: String },
    /// `[name*=value]`
    Contains { name: String, value: String },
    /// `[name~=value]`
    Includes { name: String, value: String },
}

impl AttrCondition {
    fn name(&self) -> &str {
        match self {
            Self::Exists { name }
            | Self::Equals { name, .. }
            | Self::StartsWith { name, .. }
            | Self::EndsWith { name, .. }
            | Self::Contains { name, .. }
            | Self::Includes { name, .. } => name,
        }
    }

    fn test(&self, actual: &str) -> bool {
        match self {
            Self::Exists { .. } => true,
            Self::Equals { value, .. } => actual == value,
            Self::StartsWith { value, .. } => {
                !value.is_empty() && actual.starts_with(value.as_str())
            }
            Self::EndsWith { value, .. } => !value.is_empty() && actual.ends_with(value.as_str()),
            Self::Contains { value, .. } => !value.is_empty() && actual.contains(value.as_str()),
            Self::Includes { value, .. } => actual.split_whitespace().any(|word| word == value),
        }
    }
}

/// One compound selector, e.g. `button.primary[type="submit"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundSelector {
    pub tag: Option<String>,
    pub universal: bool,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrCondition>,
}

impl CompoundSelector {
    fn is_empty(&self) -> bool {
        self.tag.is_none()
            && !self.universal
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attrs.is_empty()
    }

    fn matches<T: ElementTree>(&self, tree: &T, node: T::Id) -> bool {
        if let Some(tag) = &self.tag {
            if !tree.tag_name(node).eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if tree.attribute(node, "id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let class_attr = tree.attribute(node, "class").unwrap_or("");
            let has_all = self
                .classes
                .iter()
                .all(|class| class_attr.split_whitespace().any(|c| c == class));
            if !has_all {
                return false;
            }
        }
        self.attrs.iter().all(|cond| {
            tree.attribute(node, cond.name())
                .is_some_and(|actual| cond.test(actual))
        })
    }
}

/// Relation between a compound selector and the one to its left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorPart {
    pub compound: CompoundSelector,
    pub combinator: Option<Combinator>,
}

/// Read access to an element tree, as needed for matching.
pub trait ElementTree {
    type Id: Copy;

    fn tag_name(&self, node: Self::Id) -> &str;
    fn attribute(&self, node: Self::Id, name: &str) -> Option<&str>;
    fn parent_element(&self, node: Self::Id) -> Option<Self::Id>;
}

/// A parsed selector that remembers its source text.
#[derive(Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<Vec<SelectorPart>>,
}

impl Selector {
    /// Parse a selector list.
    pub fn parse(source: &str) -> Result<Self> {
        let alternatives = Parser::new(source).parse_list()?;
        Ok(Self {
            source: source.trim().to_string(),
            alternatives,
        })
    }

    /// Selector matching a single class, e.g. `.notification`.
    pub fn class(name: &str) -> Self {
        let compound = CompoundSelector {
            classes: vec![name.to_string()],
            ..Default::default()
        };
        Self {
            source: format!(".{}", name),
            alternatives: vec![vec![SelectorPart {
                compound,
                combinator: None,
            }]],
        }
    }

    /// Source text, suitable for a native `querySelectorAll`.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Check whether `node` matches any alternative.
    pub fn matches<T: ElementTree>(&self, tree: &T, node: T::Id) -> bool {
        self.alternatives
            .iter()
            .any(|parts| matches_chain(parts, tree, node))
    }
}

fn matches_chain<T: ElementTree>(parts: &[SelectorPart], tree: &T, node: T::Id) -> bool {
    let Some((last, rest)) = parts.split_last() else {
        return false;
    };
    if !last.compound.matches(tree, node) {
        return false;
    }
    if rest.is_empty() {
        return true;
    }

    match last.combinator {
        Some(Combinator::Child) => tree
            .parent_element(node)
            .is_some_and(|parent| matches_chain(rest, tree, parent)),
        _ => {
            let mut ancestor = tree.parent_element(node);
            while let Some(current) = ancestor {
                if matches_chain(rest, tree, current) {
                    return true;
                }
                ancestor = tree.parent_element(current);
            }
            false
        }
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Selector({:?})", self.source)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for Selector {
    type Err = InteractionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Selector {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Selector::parse(&source).map_err(serde::de::Error::custom)
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, reason: impl Into<String>) -> InteractionError {
        InteractionError::InvalidSelector {
            selector: self.source.to_string(),
            reason: reason.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Returns true if any whitespace was consumed.
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn parse_list(&mut self) -> Result<Vec<Vec<SelectorPart>>> {
        let mut alternatives = Vec::new();
        loop {
            self.skip_ws();
            alternatives.push(self.parse_chain()?);
            if self.eat(',') {
                continue;
            }
            if self.peek().is_none() {
                return Ok(alternatives);
            }
            return Err(self.error(format!("unexpected character at {}", self.pos)));
        }
    }

    fn parse_chain(&mut self) -> Result<Vec<SelectorPart>> {
        let mut parts = Vec::new();
        let mut combinator = None;
        loop {
            let compound = self.parse_compound()?;
            parts.push(SelectorPart {
                compound,
                combinator,
            });

            let had_ws = self.skip_ws();
            match self.peek() {
                None | Some(',') => return Ok(parts),
                Some('>') => {
                    self.bump();
                    self.skip_ws();
                    combinator = Some(Combinator::Child);
                }
                Some(_) if had_ws => combinator = Some(Combinator::Descendant),
                Some(ch) => return Err(self.error(format!("unsupported token {:?}", ch))),
            }
        }
    }

    fn parse_compound(&mut self) -> Result<CompoundSelector> {
        let mut compound = CompoundSelector::default();

        if self.eat('*') {
            compound.universal = true;
        } else if self.peek().is_some_and(is_ident_char) {
            compound.tag = Some(self.ident().to_ascii_lowercase());
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    let id = self.required_ident("id")?;
                    compound.id = Some(id);
                }
                Some('.') => {
                    self.bump();
                    let class = self.required_ident("class name")?;
                    compound.classes.push(class);
                }
                Some('[') => {
                    self.bump();
                    let cond = self.attr_condition()?;
                    compound.attrs.push(cond);
                }
                _ => break,
            }
        }

        if compound.is_empty() {
            return Err(self.error("expected a selector"));
        }
        Ok(compound)
    }

    fn ident(&mut self) -> String {
        let mut out = String::new();
        while let Some(ch) = self.peek().filter(|c| is_ident_char(*c)) {
            out.push(ch);
            self.pos += 1;
        }
        out
    }

    fn required_ident(&mut self, what: &str) -> Result<String> {
        let ident = self.ident();
        if ident.is_empty() {
            Err(self.error(format!("expected {}", what)))
        } else {
            Ok(ident)
        }
    }

    fn attr_condition(&mut self) -> Result<AttrCondition> {
        self.skip_ws();
        let name = self.required_ident("attribute name")?.to_ascii_lowercase();
        self.skip_ws();

        if self.eat(']') {
            return Ok(AttrCondition::Exists { name });
        }

        let op = match self.bump() {
            Some('=') => '=',
            Some(op @ ('^' | '$' | '*' | '~')) if self.eat('=') => op,
            _ => return Err(self.error("expected attribute operator")),
        };
        self.skip_ws();
        let value = self.attr_value()?;
        self.skip_ws();
        if !self.eat(']') {
            return Err(self.error("expected ']'"));
        }

        Ok(match op {
            '^' => AttrCondition::StartsWith { name, value },
            '$' => AttrCondition::EndsWith { name, value },
            '*' => AttrCondition::Contains { name, value },
            '~' => AttrCondition::Includes { name, value },
            _ => AttrCondition::Equals { name, value },
        })
    }

    fn attr_value(&mut self) -> Result<String> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let mut value = String::new();
                loop {
                    match self.bump() {
                        Some('\\') => match self.bump() {
                            Some(escaped) => value.push(escaped),
                            None => return Err(self.error("unterminated string")),
                        },
                        Some(ch) if ch == quote => return Ok(value),
                        Some(ch) => value.push(ch),
                        None => return Err(self.error("unterminated string")),
                    }
                }
            }
            _ => self.required_ident("attribute value"),
        }
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '-' || ch == '_' || !ch.is_ascii()
}
