//! One mapping rule per construct kind.
//!
//! Each rule turns the typed fields of a construct into the entry that the
//! [`DocumentBuilder`](stratiform_document::DocumentBuilder) receives. Rules
//! never touch the builder themselves.

use stratiform_document::{
    LogicalId, Parameter, ParameterConstraint, ParameterType, Properties, ResourceType, Value,
    resolve,
};
use stratiform_syntax::{
    NetworkAclProperties, ParameterDefinition, ResourceDefinition, ResourceKind,
    RouteTableProperties, StringLiteral, SubnetProperties, VpcProperties,
};

use crate::error::TranslateError;

pub const CIDR_ALLOWED_PATTERN: &str = r"(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})/(\d{1,2})";
pub const CIDR_CONSTRAINT_DESCRIPTION: &str = "Must be a valid CIDR range of the form x.x.x.x/x.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterEntry {
    pub logical_id: LogicalId,
    pub parameter: Parameter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub logical_id: LogicalId,
    pub resource_type: ResourceType,
    /// Kind-specific properties, without `Tags`.
    pub properties: Properties,
    pub name: Value,
    pub description: Value,
}

/// Resolve a string literal, pointing errors at the literal.
pub fn resolve_literal(literal: &StringLiteral) -> Result<Value, TranslateError> {
    resolve(&literal.raw).map_err(|source| TranslateError::malformed(source, literal))
}

/// The output type tag of a resource kind.
pub fn resource_type(kind: ResourceKind) -> ResourceType {
    match kind {
        ResourceKind::Vpc => ResourceType::Vpc,
        ResourceKind::RouteTable => ResourceType::RouteTable,
        ResourceKind::NetworkAcl => ResourceType::NetworkAcl,
        ResourceKind::Subnet => ResourceType::Subnet,
    }
}

/// `string` and `number` map directly; `cidr` becomes a `String` carrying
/// the CIDR pattern constraint.
pub fn map_parameter(definition: &ParameterDefinition) -> Result<ParameterEntry, TranslateError> {
    let keyword = &definition.parameter_type;
    let (parameter_type, constraint) = match keyword.text.as_str() {
        "string" => (ParameterType::String, None),
        "number" => (ParameterType::Number, None),
        "cidr" => (
            ParameterType::String,
            Some(ParameterConstraint {
                allowed_pattern: CIDR_ALLOWED_PATTERN.to_string(),
                constraint_description: CIDR_CONSTRAINT_DESCRIPTION.to_string(),
            }),
        ),
        _ => {
            return Err(TranslateError::UnknownParameterType {
                keyword: keyword.text.clone(),
                span: keyword.span,
            });
        }
    };

    let mut parameter = Parameter::new(parameter_type, resolve_literal(&definition.default)?);
    if let Some(constraint) = constraint {
        parameter = parameter.with_constraint(constraint);
    }
    Ok(ParameterEntry {
        logical_id: LogicalId::from_reference(&definition.reference.name),
        parameter,
    })
}

pub fn map_vpc(
    resource: &ResourceDefinition,
    properties: &VpcProperties,
) -> Result<ResourceEntry, TranslateError> {
    resource_entry(resource, &[("CidrBlock", &properties.cidr_block)])
}

pub fn map_route_table(
    resource: &ResourceDefinition,
    properties: &RouteTableProperties,
) -> Result<ResourceEntry, TranslateError> {
    resource_entry(resource, &[("VpcId", &properties.vpc_id)])
}

pub fn map_network_acl(
    resource: &ResourceDefinition,
    properties: &NetworkAclProperties,
) -> Result<ResourceEntry, TranslateError> {
    resource_entry(resource, &[("VpcId", &properties.vpc_id)])
}

pub fn map_subnet(
    resource: &ResourceDefinition,
    properties: &SubnetProperties,
) -> Result<ResourceEntry, TranslateError> {
    resource_entry(
        resource,
        &[
            ("VpcId", &properties.vpc_id),
            ("RouteTableId", &properties.route_table_id),
            ("NetworkAclId", &properties.network_acl_id),
            ("AvailabilityZone", &properties.availability_zone),
            ("CidrBlock", &properties.cidr_block),
        ],
    )
}

fn resource_entry(
    resource: &ResourceDefinition,
    fields: &[(&str, &StringLiteral)],
) -> Result<ResourceEntry, TranslateError> {
    let name = resolve_literal(&resource.name)?;
    let description = resolve_literal(&resource.description)?;
    let mut properties = Properties::with_capacity(fields.len() + 1);
    for (key, literal) in fields {
        properties.insert(key.to_string(), resolve_literal(literal)?.into());
    }
    Ok(ResourceEntry {
        logical_id: LogicalId::from_reference(&resource.reference.name),
        resource_type: resource_type(resource.kind()),
        properties,
        name,
        description,
    })
}
