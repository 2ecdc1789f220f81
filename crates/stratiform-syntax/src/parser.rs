//! Parser producing a [`Template`].
//!
//! The grammar is written as winnow parsers that build a raw tree of words
//! and literals with their spans. Lowering then checks the rules the grammar
//! leaves open: block multiplicity, reference names, and per-kind properties.

use std::sync::LazyLock;

use regex::Regex;
use winnow::{
    Parser,
    error::{ContextError, ErrMode, StrContext, StrContextValue},
    stream::{Location, Stream},
};

use crate::ast::*;
use crate::error::ParseError;
use crate::lexer::{
    Input, PResult, TokenKind, Word, eat, next_token, skip_trivia, string_literal, word,
};
use crate::span::{Span, ensure_addressable};

static REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9]*(_[a-z0-9]+)*$").expect("invalid reference regex")
});

const TOP_LEVEL_ITEM: &str = "`version`, `description`, `parameters`, or `resources`";

/// Parse Stratiform source text into a syntax tree.
pub fn parse(source: &str) -> Result<Template, ParseError> {
    ensure_addressable(source.len())?;
    let mut input = Input::new(source);
    let items = match items(&mut input) {
        Ok(items) => items,
        Err(err) => return Err(syntax_error(source, &mut input, &err)),
    };
    lower(items)
}

enum RawItem<'i> {
    Version(StringLiteral),
    Description(StringLiteral),
    Parameters {
        keyword: Span,
        parameters: Vec<RawParameter<'i>>,
    },
    Resources {
        keyword: Span,
        resources: Vec<RawResource<'i>>,
    },
}

struct RawParameter<'i> {
    name: Word<'i>,
    parameter_type: Word<'i>,
    default: StringLiteral,
    semicolon: Span,
}

struct RawResource<'i> {
    kind: Word<'i>,
    name: Word<'i>,
    properties: Vec<(Word<'i>, StringLiteral)>,
    closing: Span,
}

/// A cut error recording what the parser expected at the current position.
fn expected<O>(description: &'static str) -> PResult<O> {
    let mut error = ContextError::new();
    error.push(StrContext::Expected(StrContextValue::Description(
        description,
    )));
    Err(ErrMode::Cut(error))
}

/// Run `parser` after trivia. On failure the input is left where the
/// expected construct should have started.
fn expect<'i, O>(
    input: &mut Input<'i>,
    description: &'static str,
    mut parser: impl Parser<Input<'i>, O, ErrMode<ContextError>>,
) -> PResult<O> {
    skip_trivia(input);
    let checkpoint = input.checkpoint();
    match parser.parse_next(input) {
        Ok(output) => Ok(output),
        Err(_) => {
            input.reset(&checkpoint);
            expected(description)
        }
    }
}

/// Turn a grammar failure into a [`ParseError`] naming the token found at the
/// failure position. Input that is not a token becomes a lexer error.
fn syntax_error(source: &str, input: &mut Input<'_>, err: &ErrMode<ContextError>) -> ParseError {
    let description = match err {
        ErrMode::Backtrack(context) | ErrMode::Cut(context) => context
            .context()
            .find_map(|context| match context {
                StrContext::Expected(StrContextValue::Description(description)) => {
                    Some(*description)
                }
                _ => None,
            }),
        ErrMode::Incomplete(_) => None,
    };
    let found = match next_token(input) {
        Ok(token) => token,
        Err(lexer_error) => return lexer_error,
    };
    let found_text = match found.kind {
        TokenKind::Word => format!("`{}`", found.span.as_str(source)),
        other => other.to_string(),
    };
    ParseError::syntax(
        found.span,
        format!(
            "expected {}, found {found_text}",
            description.unwrap_or("a token")
        ),
    )
}

fn items<'i>(input: &mut Input<'i>) -> PResult<Vec<RawItem<'i>>> {
    let mut items = Vec::new();
    loop {
        skip_trivia(input);
        if input.eof_offset() == 0 {
            return Ok(items);
        }
        let checkpoint = input.checkpoint();
        let keyword = expect(input, TOP_LEVEL_ITEM, word)?;
        let item = match keyword.text {
            "version" => RawItem::Version(scalar(input)?),
            "description" => RawItem::Description(scalar(input)?),
            "parameters" => RawItem::Parameters {
                keyword: keyword.span,
                parameters: block(input, parameter)?,
            },
            "resources" => RawItem::Resources {
                keyword: keyword.span,
                resources: block(input, resource)?,
            },
            _ => {
                input.reset(&checkpoint);
                return expected(TOP_LEVEL_ITEM);
            }
        };
        items.push(item);
    }
}

fn scalar(input: &mut Input<'_>) -> PResult<StringLiteral> {
    let literal = expect(input, "string literal", string_literal)?;
    expect(input, "`;`", ';')?;
    Ok(literal)
}

/// A braced list of entries.
fn block<'i, O>(
    input: &mut Input<'i>,
    mut entry: impl FnMut(&mut Input<'i>) -> PResult<O>,
) -> PResult<Vec<O>> {
    expect(input, "`{`", '{')?;
    let mut entries = Vec::new();
    loop {
        skip_trivia(input);
        if eat(input, '}') {
            return Ok(entries);
        }
        entries.push(entry(input)?);
    }
}

fn parameter<'i>(input: &mut Input<'i>) -> PResult<RawParameter<'i>> {
    let name = expect(input, "reference name", word)?;
    expect(input, "`:`", ':')?;
    let parameter_type = expect(input, "parameter type", word)?;
    expect(input, "`=`", '=')?;
    let default = expect(input, "string literal", string_literal)?;
    let semicolon = expect(input, "`;`", ';'.span())?;
    Ok(RawParameter {
        name,
        parameter_type,
        default,
        semicolon: Span::from(semicolon),
    })
}

fn resource<'i>(input: &mut Input<'i>) -> PResult<RawResource<'i>> {
    let kind = expect(input, "resource kind", word)?;
    let name = expect(input, "reference name", word)?;
    expect(input, "`{`", '{')?;
    let mut properties = Vec::new();
    loop {
        skip_trivia(input);
        let start = input.current_token_start();
        if eat(input, '}') {
            return Ok(RawResource {
                kind,
                name,
                properties,
                closing: Span::from(start..start + 1),
            });
        }
        let key = expect(input, "identifier", word)?;
        expect(input, "`=`", '=')?;
        let value = expect(input, "string literal", string_literal)?;
        expect(input, "`;`", ';')?;
        properties.push((key, value));
    }
}

fn lower(items: Vec<RawItem<'_>>) -> Result<Template, ParseError> {
    let mut template = Template::default();
    let mut parameters_seen = false;
    let mut resources_seen = false;

    for item in items {
        let item = match item {
            RawItem::Version(literal) => Item::Version(literal),
            RawItem::Description(literal) => Item::Description(literal),
            RawItem::Parameters {
                keyword,
                parameters,
            } => {
                if std::mem::replace(&mut parameters_seen, true) {
                    return Err(ParseError::syntax(keyword, "duplicate `parameters` block"));
                }
                Item::Parameters(ParametersBlock {
                    span: keyword,
                    parameters: parameters
                        .into_iter()
                        .map(lower_parameter)
                        .collect::<Result<_, _>>()?,
                })
            }
            RawItem::Resources { keyword, resources } => {
                if std::mem::replace(&mut resources_seen, true) {
                    return Err(ParseError::syntax(keyword, "duplicate `resources` block"));
                }
                Item::Resources(ResourcesBlock {
                    span: keyword,
                    resources: resources
                        .into_iter()
                        .map(lower_resource)
                        .collect::<Result<_, _>>()?,
                })
            }
        };
        template.items.push(item);
    }
    Ok(template)
}

fn reference(word: Word<'_>) -> Result<Reference, ParseError> {
    if !REFERENCE_PATTERN.is_match(word.text) {
        return Err(ParseError::syntax(
            word.span,
            format!(
                "invalid reference name `{}`: use lowercase words separated by underscores",
                word.text
            ),
        ));
    }
    Ok(Reference {
        name: word.text.to_string(),
        span: word.span,
    })
}

fn lower_parameter(raw: RawParameter<'_>) -> Result<ParameterDefinition, ParseError> {
    let reference = reference(raw.name)?;
    Ok(ParameterDefinition {
        span: reference.span.merge(raw.semicolon),
        reference,
        parameter_type: TypeKeyword {
            text: raw.parameter_type.text.to_string(),
            span: raw.parameter_type.span,
        },
        default: raw.default,
    })
}

fn lower_resource(raw: RawResource<'_>) -> Result<ResourceDefinition, ParseError> {
    let Some(kind) = ResourceKind::from_keyword(raw.kind.text) else {
        return Err(ParseError::syntax(
            raw.kind.span,
            format!(
                "unknown resource kind `{}`: expected `vpc`, `route_table`, `network_acl`, or `subnet`",
                raw.kind.text
            ),
        ));
    };
    let reference = reference(raw.name)?;
    let closing = raw.closing;

    let mut properties = PropertySet::new(kind, &reference);
    for (key, value) in raw.properties {
        properties.insert(key.text, key.span, value)?;
    }

    let name = properties.take("name", closing)?;
    let description = properties.take("description", closing)?;
    let properties = match kind {
        ResourceKind::Vpc => ResourceProperties::Vpc(VpcProperties {
            cidr_block: properties.take("cidr_block", closing)?,
        }),
        ResourceKind::RouteTable => ResourceProperties::RouteTable(RouteTableProperties {
            vpc_id: properties.take("vpc_id", closing)?,
        }),
        ResourceKind::NetworkAcl => ResourceProperties::NetworkAcl(NetworkAclProperties {
            vpc_id: properties.take("vpc_id", closing)?,
        }),
        ResourceKind::Subnet => ResourceProperties::Subnet(SubnetProperties {
            vpc_id: properties.take("vpc_id", closing)?,
            route_table_id: properties.take("route_table_id", closing)?,
            network_acl_id: properties.take("network_acl_id", closing)?,
            availability_zone: properties.take("availability_zone", closing)?,
            cidr_block: properties.take("cidr_block", closing)?,
        }),
    };

    Ok(ResourceDefinition {
        span: raw.kind.span.merge(closing),
        reference,
        name,
        description,
        properties,
    })
}

/// Properties collected from one resource body, checked against its kind.
struct PropertySet<'r> {
    kind: ResourceKind,
    reference: &'r Reference,
    entries: Vec<(String, StringLiteral)>,
}

impl<'r> PropertySet<'r> {
    fn new(kind: ResourceKind, reference: &'r Reference) -> Self {
        Self {
            kind,
            reference,
            entries: Vec::new(),
        }
    }

    fn allows(&self, name: &str) -> bool {
        name == "name" || name == "description" || self.kind.property_names().contains(&name)
    }

    fn insert(&mut self, name: &str, span: Span, value: StringLiteral) -> Result<(), ParseError> {
        if !self.allows(name) {
            return Err(ParseError::syntax(
                span,
                format!("unknown property `{name}` for {} resource", self.kind),
            ));
        }
        if self.entries.iter().any(|(existing, _)| existing == name) {
            return Err(ParseError::syntax(
                span,
                format!(
                    "duplicate property `{name}` in {} resource `{}`",
                    self.kind, self.reference.name
                ),
            ));
        }
        self.entries.push((name.to_string(), value));
        Ok(())
    }

    fn take(&mut self, name: &str, closing: Span) -> Result<StringLiteral, ParseError> {
        let Some(index) = self.entries.iter().position(|(existing, _)| existing == name) else {
            return Err(ParseError::syntax(
                closing,
                format!(
                    "missing property `{name}` in {} resource `{}`",
                    self.kind, self.reference.name
                ),
            ));
        };
        Ok(self.entries.swap_remove(index).1)
    }
}
