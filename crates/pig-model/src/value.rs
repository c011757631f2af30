//! Literal values, enumerated eligible values and XSD datatypes.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Scalar XSD kinds a Property class may declare.
///
/// Both `xs:` and `xsd:` prefixes are accepted on input; `xs:` is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Datatype {
    #[default]
    #[serde(rename = "xs:string", alias = "xsd:string")]
    String,
    #[serde(rename = "xs:normalizedString", alias = "xsd:normalizedString")]
    NormalizedString,
    #[serde(rename = "xs:token", alias = "xsd:token")]
    Token,
    #[serde(rename = "rdf:langString")]
    LangString,
    #[serde(rename = "xs:boolean", alias = "xsd:boolean")]
    Boolean,
    #[serde(rename = "xs:integer", alias = "xsd:integer")]
    Integer,
    #[serde(rename = "xs:long", alias = "xsd:long")]
    Long,
    #[serde(rename = "xs:int", alias = "xsd:int")]
    Int,
    #[serde(rename = "xs:short", alias = "xsd:short")]
    Short,
    #[serde(rename = "xs:byte", alias = "xsd:byte")]
    Byte,
    #[serde(rename = "xs:nonNegativeInteger", alias = "xsd:nonNegativeInteger")]
    NonNegativeInteger,
    #[serde(rename = "xs:positiveInteger", alias = "xsd:positiveInteger")]
    PositiveInteger,
    #[serde(rename = "xs:nonPositiveInteger", alias = "xsd:nonPositiveInteger")]
    NonPositiveInteger,
    #[serde(rename = "xs:negativeInteger", alias = "xsd:negativeInteger")]
    NegativeInteger,
    #[serde(rename = "xs:unsignedLong", alias = "xsd:unsignedLong")]
    UnsignedLong,
    #[serde(rename = "xs:unsignedInt", alias = "xsd:unsignedInt")]
    UnsignedInt,
    #[serde(rename = "xs:unsignedShort", alias = "xsd:unsignedShort")]
    UnsignedShort,
    #[serde(rename = "xs:unsignedByte", alias = "xsd:unsignedByte")]
    UnsignedByte,
    #[serde(rename = "xs:decimal", alias = "xsd:decimal")]
    Decimal,
    #[serde(rename = "xs:float", alias = "xsd:float")]
    Float,
    #[serde(rename = "xs:double", alias = "xsd:double")]
    Double,
    #[serde(rename = "xs:dateTime", alias = "xsd:dateTime")]
    DateTime,
    #[serde(rename = "xs:date", alias = "xsd:date")]
    Date,
    #[serde(rename = "xs:anyURI", alias = "xsd:anyURI")]
    AnyUri,
}

impl Datatype {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "xs:string",
            Self::NormalizedString => "xs:normalizedString",
            Self::Token => "xs:token",
            Self::LangString => "rdf:langString",
            Self::Boolean => "xs:boolean",
            Self::Integer => "xs:integer",
            Self::Long => "xs:long",
            Self::Int => "xs:int",
            Self::Short => "xs:short",
            Self::Byte => "xs:byte",
            Self::NonNegativeInteger => "xs:nonNegativeInteger",
            Self::PositiveInteger => "xs:positiveInteger",
            Self::NonPositiveInteger => "xs:nonPositiveInteger",
            Self::NegativeInteger => "xs:negativeInteger",
            Self::UnsignedLong => "xs:unsignedLong",
            Self::UnsignedInt => "xs:unsignedInt",
            Self::UnsignedShort => "xs:unsignedShort",
            Self::UnsignedByte => "xs:unsignedByte",
            Self::Decimal => "xs:decimal",
            Self::Float => "xs:float",
            Self::Double => "xs:double",
            Self::DateTime => "xs:dateTime",
            Self::Date => "xs:date",
            Self::AnyUri => "xs:anyURI",
        }
    }

    /// String family: values may be language tagged and are counted per language.
    pub const fn is_string(self) -> bool {
        matches!(
            self,
            Self::String | Self::NormalizedString | Self::Token | Self::LangString
        )
    }

    pub const fn is_numeric(self) -> bool {
        self.is_integer() || matches!(self, Self::Decimal | Self::Float | Self::Double)
    }

    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Integer
                | Self::Long
                | Self::Int
                | Self::Short
                | Self::Byte
                | Self::NonNegativeInteger
                | Self::PositiveInteger
                | Self::NonPositiveInteger
                | Self::NegativeInteger
                | Self::UnsignedLong
                | Self::UnsignedInt
                | Self::UnsignedShort
                | Self::UnsignedByte
        )
    }

    /// Value space of the integer kinds, inclusive on both ends. Unbounded
    /// sides saturate at the `i128` range.
    pub fn integer_bounds(self) -> Option<(i128, i128)> {
        let bounds = match self {
            Self::Integer => (i128::MIN, i128::MAX),
            Self::Long => (i64::MIN.into(), i64::MAX.into()),
            Self::Int => (i32::MIN.into(), i32::MAX.into()),
            Self::Short => (i16::MIN.into(), i16::MAX.into()),
            Self::Byte => (i8::MIN.into(), i8::MAX.into()),
            Self::NonNegativeInteger => (0, i128::MAX),
            Self::PositiveInteger => (1, i128::MAX),
            Self::NonPositiveInteger => (i128::MIN, 0),
            Self::NegativeInteger => (i128::MIN, -1),
            Self::UnsignedLong => (0, u64::MAX.into()),
            Self::UnsignedInt => (0, u32::MAX.into()),
            Self::UnsignedShort => (0, u16::MAX.into()),
            Self::UnsignedByte => (0, u8::MAX.into()),
            _ => return None,
        };
        Some(bounds)
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text with an optional language tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageText {
    #[serde(alias = "@value")]
    pub text: String,
    #[serde(default, alias = "@language", skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

/// A literal property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Text(LanguageText),
    String(String),
    Number(serde_json::Number),
    Boolean(bool),
}

impl Literal {
    /// Lexical form, with any language tag stripped.
    pub fn lexical(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(&text.text),
            Self::String(text) => Cow::Borrowed(text),
            Self::Number(number) => Cow::Owned(number.to_string()),
            Self::Boolean(flag) => Cow::Owned(flag.to_string()),
        }
    }

    pub fn lang(&self) -> Option<&str> {
        match self {
            Self::Text(text) => text.lang.as_deref(),
            _ => None,
        }
    }
}

/// An entry of a Property class's `eligibleValue` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EligibleValue {
    Entry(EligibleValueEntry),
    Bare(Literal),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibleValueEntry {
    #[serde(alias = "@id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Literal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Literal>,
}

impl EligibleValue {
    /// Identity used for `idRef` matching; a bare scalar is its own id.
    pub fn id(&self) -> Cow<'_, str> {
        match self {
            Self::Entry(entry) => Cow::Borrowed(&entry.id),
            Self::Bare(literal) => literal.lexical(),
        }
    }
}
