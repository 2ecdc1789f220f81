//! Typed syntax tree of a Stratiform template.
//!
//! Every construct kind of the language is a distinct type, and resource
//! kinds form the closed enum [`ResourceProperties`], so consumers dispatch
//! with an exhaustive `match`.

use core::fmt::{self, Display};

use crate::span::Span;

/// A double-quoted string literal exactly as written, quotes included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    pub raw: String,
    pub span: Span,
}

impl StringLiteral {
    pub fn new(raw: impl Into<String>, span: Span) -> Self {
        Self {
            raw: raw.into(),
            span,
        }
    }
}

/// A reference name such as `main_vpc`: lowercase words joined by underscores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub name: String,
    pub span: Span,
}

/// The type keyword of a parameter declaration, e.g. `cidr`.
///
/// The grammar accepts any word here; the set of meaningful keywords is
/// decided by the translation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeKeyword {
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    pub items: Vec<Item>,
}

/// A top-level item, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Version(StringLiteral),
    Description(StringLiteral),
    Parameters(ParametersBlock),
    Resources(ResourcesBlock),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParametersBlock {
    /// Span of the `parameters` keyword.
    pub span: Span,
    pub parameters: Vec<ParameterDefinition>,
}

/// `vpc_cidr: cidr = "10.0.0.0/16";`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDefinition {
    pub reference: Reference,
    pub parameter_type: TypeKeyword,
    pub default: StringLiteral,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcesBlock {
    /// Span of the `resources` keyword.
    pub span: Span,
    pub resources: Vec<ResourceDefinition>,
}

/// A resource declaration with its shared `name`/`description` fields and
/// its kind-specific properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDefinition {
    pub reference: Reference,
    pub name: StringLiteral,
    pub description: StringLiteral,
    pub properties: ResourceProperties,
    pub span: Span,
}

impl ResourceDefinition {
    pub fn kind(&self) -> ResourceKind {
        self.properties.kind()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceProperties {
    Vpc(VpcProperties),
    RouteTable(RouteTableProperties),
    NetworkAcl(NetworkAclProperties),
    Subnet(SubnetProperties),
}

impl ResourceProperties {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceProperties::Vpc(_) => ResourceKind::Vpc,
            ResourceProperties::RouteTable(_) => ResourceKind::RouteTable,
            ResourceProperties::NetworkAcl(_) => ResourceKind::NetworkAcl,
            ResourceProperties::Subnet(_) => ResourceKind::Subnet,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VpcProperties {
    pub cidr_block: StringLiteral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTableProperties {
    pub vpc_id: StringLiteral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkAclProperties {
    pub vpc_id: StringLiteral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetProperties {
    pub vpc_id: StringLiteral,
    pub route_table_id: StringLiteral,
    pub network_acl_id: StringLiteral,
    pub availability_zone: StringLiteral,
    pub cidr_block: StringLiteral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Vpc,
    RouteTable,
    NetworkAcl,
    Subnet,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Vpc,
        ResourceKind::RouteTable,
        ResourceKind::NetworkAcl,
        ResourceKind::Subnet,
    ];

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }

    /// The keyword that introduces this resource kind in source text.
    pub fn keyword(&self) -> &'static str {
        match self {
            ResourceKind::Vpc => "vpc",
            ResourceKind::RouteTable => "route_table",
            ResourceKind::NetworkAcl => "network_acl",
            ResourceKind::Subnet => "subnet",
        }
    }

    /// Kind-specific property names, in output order.
    pub fn property_names(&self) -> &'static [&'static str] {
        match self {
            ResourceKind::Vpc => &["cidr_block"],
            ResourceKind::RouteTable | ResourceKind::NetworkAcl => &["vpc_id"],
            ResourceKind::Subnet => &[
                "vpc_id",
                "route_table_id",
                "network_acl_id",
                "availability_zone",
                "cidr_block",
            ],
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
