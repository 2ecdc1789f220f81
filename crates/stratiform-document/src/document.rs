//! The ordered output document and its entries.

use core::fmt::{self, Display};

use indexmap::IndexMap;

use crate::identifier::LogicalId;
use crate::value::Value;

/// Top-level keys of an [`OutputDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKey {
    FormatVersion,
    Description,
    Parameters,
    Resources,
}

impl SectionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::FormatVersion => "AWSTemplateFormatVersion",
            SectionKey::Description => "Description",
            SectionKey::Parameters => "Parameters",
            SectionKey::Resources => "Resources",
        }
    }
}

impl Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Section {
    FormatVersion(String),
    Description(Value),
    Parameters(IndexMap<LogicalId, Parameter>),
    Resources(IndexMap<LogicalId, Resource>),
}

/// A translated template.
///
/// Top-level sections iterate in the order they were first created. The
/// document can only be populated through [`crate::DocumentBuilder`]; once
/// handed out it is read-only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputDocument {
    pub(crate) sections: IndexMap<SectionKey, Section>,
}

impl OutputDocument {
    /// Top-level keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = SectionKey> + '_ {
        self.sections.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn format_version(&self) -> Option<&str> {
        match self.sections.get(&SectionKey::FormatVersion) {
            Some(Section::FormatVersion(version)) => Some(version),
            _ => None,
        }
    }

    pub fn description(&self) -> Option<&Value> {
        match self.sections.get(&SectionKey::Description) {
            Some(Section::Description(description)) => Some(description),
            _ => None,
        }
    }

    pub fn parameters(&self) -> Option<&IndexMap<LogicalId, Parameter>> {
        match self.sections.get(&SectionKey::Parameters) {
            Some(Section::Parameters(parameters)) => Some(parameters),
            _ => None,
        }
    }

    pub fn resources(&self) -> Option<&IndexMap<LogicalId, Resource>> {
        match self.sections.get(&SectionKey::Resources) {
            Some(Section::Resources(resources)) => Some(resources),
            _ => None,
        }
    }

    pub fn parameter(&self, logical_id: &str) -> Option<&Parameter> {
        self.parameters()?.get(logical_id)
    }

    pub fn resource(&self, logical_id: &str) -> Option<&Resource> {
        self.resources()?.get(logical_id)
    }

    /// Whether a parameter or resource is declared under `logical_id`.
    pub fn declares(&self, logical_id: &str) -> bool {
        self.parameter(logical_id).is_some() || self.resource(logical_id).is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterType {
    String,
    Number,
}

impl ParameterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterType::String => "String",
            ParameterType::Number => "Number",
        }
    }
}

/// Pattern constraint attached to CIDR parameters. Both fields always travel
/// together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterConstraint {
    pub allowed_pattern: String,
    pub constraint_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub parameter_type: ParameterType,
    pub default: Value,
    pub constraint: Option<ParameterConstraint>,
}

impl Parameter {
    pub fn new(parameter_type: ParameterType, default: Value) -> Self {
        Self {
            parameter_type,
            default,
            constraint: None,
        }
    }

    #[must_use]
    pub fn with_constraint(mut self, constraint: ParameterConstraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    pub fn allowed_pattern(&self) -> Option<&str> {
        self.constraint.as_ref().map(|c| c.allowed_pattern.as_str())
    }

    pub fn constraint_description(&self) -> Option<&str> {
        self.constraint
            .as_ref()
            .map(|c| c.constraint_description.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Vpc,
    RouteTable,
    NetworkAcl,
    Subnet,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Vpc => "AWS::EC2::VPC",
            ResourceType::RouteTable => "AWS::EC2::RouteTable",
            ResourceType::NetworkAcl => "AWS::EC2::NetworkAcl",
            ResourceType::Subnet => "AWS::EC2::Subnet",
        }
    }
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property value: a resolved [`Value`] or a nested mapping such as `Tags`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Value(Value),
    Map(IndexMap<String, Value>),
}

impl PropertyValue {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            PropertyValue::Value(value) => Some(value),
            PropertyValue::Map(_) => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            PropertyValue::Value(_) => None,
            PropertyValue::Map(map) => Some(map),
        }
    }
}

impl From<Value> for PropertyValue {
    fn from(value: Value) -> Self {
        PropertyValue::Value(value)
    }
}

/// Ordered resource properties.
pub type Properties = IndexMap<String, PropertyValue>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub resource_type: ResourceType,
    pub properties: Properties,
}

impl Resource {
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// The `Tags` mapping, always the last property.
    pub fn tags(&self) -> Option<&IndexMap<String, Value>> {
        self.property("Tags")?.as_map()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_type_strings_are_distinct() {
        let all = [
            ResourceType::Vpc,
            ResourceType::RouteTable,
            ResourceType::NetworkAcl,
            ResourceType::Subnet,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.as_str(), b.as_str());
            }
        }
        assert_eq!(ResourceType::NetworkAcl.as_str(), "AWS::EC2::NetworkAcl");
    }

    #[test]
    fn test_empty_document() {
        let doc = OutputDocument::default();
        assert!(doc.is_empty());
        assert!(doc.parameters().is_none());
        assert!(!doc.declares("Anything"));
    }
}
