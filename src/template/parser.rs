//! Template syntax.
//!
//! Text is copied verbatim; actions sit between `{{` and `}}`:
//!
//! - `{{.name}}` and `{{.name.field}}` print a token value
//! - `{{if .name}}...{{else}}...{{end}}` renders a branch on truthiness
//! - `{{/* ... */}}` is a comment
//! - a `-` right inside the braces (`{{- ` / ` -}}`) trims the adjacent
//!   whitespace of the surrounding text

use crate::error::{SmarterrError, SmarterrResult};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{map, opt, peek, value},
    error::{context, VerboseError, VerboseErrorKind},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};
use std::fmt;

pub type ParserResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// `.name` or `.name.field`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    pub name: String,
    pub field: Option<String>,
}

impl FieldPath {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, ".{}.{}", self.name, field),
            None => write!(f, ".{}", self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Field(FieldPath),
    If {
        cond: FieldPath,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Directive {
    Field(FieldPath),
    If(FieldPath),
    Else,
    End,
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Action {
    trim_left: bool,
    directive: Directive,
    trim_right: bool,
}

#[derive(Debug)]
enum Piece {
    Text(String),
    Action(Directive),
}

fn ident(input: &str) -> ParserResult<'_, &str> {
    context(
        "identifier",
        take_while1(|c: char| c.is_alphanumeric() || c == '_'),
    )(input)
}

fn field_path(input: &str) -> ParserResult<'_, FieldPath> {
    context(
        "field reference",
        map(
            preceded(char('.'), pair(ident, opt(preceded(char('.'), ident)))),
            |(name, field): (&str, Option<&str>)| FieldPath {
                name: name.to_string(),
                field: field.map(str::to_string),
            },
        ),
    )(input)
}

fn comment(input: &str) -> ParserResult<'_, Directive> {
    context(
        "comment",
        value(
            Directive::Comment,
            delimited(tag("/*"), take_until("*/"), tag("*/")),
        ),
    )(input)
}

fn if_directive(input: &str) -> ParserResult<'_, Directive> {
    context(
        "if",
        map(
            preceded(pair(tag("if"), multispace1), field_path),
            Directive::If,
        ),
    )(input)
}

fn directive(input: &str) -> ParserResult<'_, Directive> {
    alt((
        comment,
        if_directive,
        value(Directive::Else, tag("else")),
        value(Directive::End, tag("end")),
        map(field_path, Directive::Field),
    ))(input)
}

/// One `{{ ... }}` action, trim markers included.
fn action(input: &str) -> ParserResult<'_, Action> {
    context(
        "action",
        map(
            tuple((
                tag("{{"),
                opt(terminated(char('-'), peek(multispace1))),
                multispace0,
                directive,
                multispace0,
                opt(char('-')),
                tag("}}"),
            )),
            |(_, left, _, directive, _, right, _)| Action {
                trim_left: left.is_some(),
                directive,
                trim_right: right.is_some(),
            },
        ),
    )(input)
}

fn describe(source: &str, input: &str, err: VerboseError<&str>) -> String {
    let offset = source.len() - input.len();
    let label = err
        .errors
        .iter()
        .rev()
        .find_map(|(_, kind)| match kind {
            VerboseErrorKind::Context(label) => Some(*label),
            _ => None,
        })
        .unwrap_or("action");
    let snippet: String = input.chars().take(24).collect();
    if !input.contains("}}") {
        return format!("unclosed action at offset {offset}: {snippet:?}");
    }
    format!("bad {label} at offset {offset}: {snippet:?}")
}

/// Splits `source` into text and actions, applying trim markers.
fn lex(name: &str, source: &str) -> SmarterrResult<Vec<Piece>> {
    let mut pieces = Vec::new();
    let mut input = source;
    let mut trim_next = false;
    while !input.is_empty() {
        if input.starts_with("{{") {
            let (rest, action) = match action(input) {
                Ok(parsed) => parsed,
                Err(nom::Err::Error(err)) | Err(nom::Err::Failure(err)) => {
                    return Err(SmarterrError::template(name, describe(source, input, err)));
                }
                Err(nom::Err::Incomplete(_)) => {
                    return Err(SmarterrError::template(name, "incomplete action"));
                }
            };
            if action.trim_left {
                if let Some(Piece::Text(text)) = pieces.last_mut() {
                    text.truncate(text.trim_end().len());
                }
            }
            trim_next = action.trim_right;
            pieces.push(Piece::Action(action.directive));
            input = rest;
        } else {
            let end = input.find("{{").unwrap_or(input.len());
            let (text, rest) = input.split_at(end);
            let text = if trim_next { text.trim_start() } else { text };
            trim_next = false;
            pieces.push(Piece::Text(text.to_string()));
            input = rest;
        }
    }
    Ok(pieces)
}

struct OpenIf {
    cond: FieldPath,
    then: Vec<Node>,
    otherwise: Option<Vec<Node>>,
}

impl OpenIf {
    fn body(&mut self) -> &mut Vec<Node> {
        match &mut self.otherwise {
            Some(otherwise) => otherwise,
            None => &mut self.then,
        }
    }
}

/// Parses `source` into a node tree.
pub fn parse(name: &str, source: &str) -> SmarterrResult<Vec<Node>> {
    let mut root = Vec::new();
    let mut open: Vec<OpenIf> = Vec::new();
    for piece in lex(name, source)? {
        let node = match piece {
            Piece::Text(text) if text.is_empty() => continue,
            Piece::Text(text) => Node::Text(text),
            Piece::Action(Directive::Comment) => continue,
            Piece::Action(Directive::Field(path)) => Node::Field(path),
            Piece::Action(Directive::If(cond)) => {
                open.push(OpenIf {
                    cond,
                    then: Vec::new(),
                    otherwise: None,
                });
                continue;
            }
            Piece::Action(Directive::Else) => {
                match open.last_mut() {
                    Some(top) if top.otherwise.is_none() => top.otherwise = Some(Vec::new()),
                    Some(_) => {
                        return Err(SmarterrError::template(
                            name,
                            "second {{else}} in one {{if}}",
                        ))
                    }
                    None => return Err(SmarterrError::template(name, "{{else}} without {{if}}")),
                }
                continue;
            }
            Piece::Action(Directive::End) => {
                let Some(done) = open.pop() else {
                    return Err(SmarterrError::template(name, "{{end}} without {{if}}"));
                };
                Node::If {
                    cond: done.cond,
                    then: done.then,
                    otherwise: done.otherwise.unwrap_or_default(),
                }
            }
        };
        match open.last_mut() {
            Some(top) => top.body().push(node),
            None => root.push(node),
        }
    }
    if let Some(unclosed) = open.last() {
        return Err(SmarterrError::template(
            name,
            format!("{{{{if {}}}}} is missing {{{{end}}}}", unclosed.cond),
        ));
    }
    Ok(root)
}
