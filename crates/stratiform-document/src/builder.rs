//! Incremental construction of an [`OutputDocument`].

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::document::{
    OutputDocument, Parameter, Properties, PropertyValue, Resource, ResourceType, Section,
    SectionKey,
};
use crate::identifier::LogicalId;
use crate::value::Value;

/// A top-level scalar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    FormatVersion(String),
    Description(Value),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("`{section}` section is not open")]
    SectionNotOpen { section: SectionKey },
    #[error("`{section}` section is already open")]
    SectionAlreadyOpen { section: SectionKey },
    #[error("logical id `{logical_id}` is already declared in `{existing}`")]
    DuplicateLogicalId {
        logical_id: LogicalId,
        existing: SectionKey,
    },
}

/// Accumulates document entries in traversal order.
///
/// Sections must be opened before entries are added to them, and each
/// section can be opened once. Logical ids are unique across parameters and
/// resources, since both are targets of the same `Ref` namespace.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    document: OutputDocument,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a top-level scalar. Setting the same scalar twice overwrites the
    /// value and keeps its original position.
    pub fn set_scalar(&mut self, scalar: Scalar) {
        let (key, section) = match scalar {
            Scalar::FormatVersion(version) => {
                (SectionKey::FormatVersion, Section::FormatVersion(version))
            }
            Scalar::Description(value) => (SectionKey::Description, Section::Description(value)),
        };
        self.document.sections.insert(key, section);
    }

    pub fn open_parameters_section(&mut self) -> Result<(), BuildError> {
        self.open(SectionKey::Parameters, Section::Parameters(IndexMap::new()))
    }

    pub fn open_resources_section(&mut self) -> Result<(), BuildError> {
        self.open(SectionKey::Resources, Section::Resources(IndexMap::new()))
    }

    fn open(&mut self, key: SectionKey, empty: Section) -> Result<(), BuildError> {
        match self.document.sections.entry(key) {
            Entry::Occupied(_) => Err(BuildError::SectionAlreadyOpen { section: key }),
            Entry::Vacant(entry) => {
                entry.insert(empty);
                Ok(())
            }
        }
    }

    pub fn add_parameter(
        &mut self,
        logical_id: LogicalId,
        parameter: Parameter,
    ) -> Result<(), BuildError> {
        self.ensure_unique(&logical_id)?;
        match self.document.sections.get_mut(&SectionKey::Parameters) {
            Some(Section::Parameters(parameters)) => {
                parameters.insert(logical_id, parameter);
                Ok(())
            }
            _ => Err(BuildError::SectionNotOpen {
                section: SectionKey::Parameters,
            }),
        }
    }

    /// Append the `Tags` entry (`Name`, then `Description`) to `properties`
    /// and insert the resource.
    pub fn add_resource(
        &mut self,
        logical_id: LogicalId,
        resource_type: ResourceType,
        mut properties: Properties,
        name: Value,
        description: Value,
    ) -> Result<(), BuildError> {
        self.ensure_unique(&logical_id)?;
        let Some(Section::Resources(resources)) =
            self.document.sections.get_mut(&SectionKey::Resources)
        else {
            return Err(BuildError::SectionNotOpen {
                section: SectionKey::Resources,
            });
        };

        let mut tags = IndexMap::with_capacity(2);
        tags.insert("Name".to_string(), name);
        tags.insert("Description".to_string(), description);
        // Tags must come last even if a caller already put a key with that name.
        properties.shift_remove("Tags");
        properties.insert("Tags".to_string(), PropertyValue::Map(tags));

        resources.insert(
            logical_id,
            Resource {
                resource_type,
                properties,
            },
        );
        Ok(())
    }

    fn ensure_unique(&self, logical_id: &LogicalId) -> Result<(), BuildError> {
        let existing = if self.document.parameter(logical_id.as_str()).is_some() {
            SectionKey::Parameters
        } else if self.document.resource(logical_id.as_str()).is_some() {
            SectionKey::Resources
        } else {
            return Ok(());
        };
        Err(BuildError::DuplicateLogicalId {
            logical_id: logical_id.clone(),
            existing,
        })
    }

    /// Number of parameters and resources added so far.
    pub fn counts(&self) -> (usize, usize) {
        (
            self.document.parameters().map_or(0, IndexMap::len),
            self.document.resources().map_or(0, IndexMap::len),
        )
    }

    /// Finish building and hand out the completed document.
    pub fn finalize(self) -> OutputDocument {
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ParameterType;
    use pretty_assertions::assert_eq;

    fn id(name: &str) -> LogicalId {
        LogicalId::from_reference(name)
    }

    #[test]
    fn test_sections_keep_first_encounter_order() {
        let mut builder = DocumentBuilder::new();
        builder.set_scalar(Scalar::Description(Value::literal("d")));
        builder.open_resources_section().unwrap();
        builder.set_scalar(Scalar::FormatVersion("2010-09-09".to_string()));
        builder.open_parameters_section().unwrap();
        let doc = builder.finalize();
        assert_eq!(
            doc.keys().collect::<Vec<_>>(),
            vec![
                SectionKey::Description,
                SectionKey::Resources,
                SectionKey::FormatVersion,
                SectionKey::Parameters,
            ]
        );
        assert!(doc.parameters().unwrap().is_empty());
        assert!(doc.resources().unwrap().is_empty());
    }

    #[test]
    fn test_scalar_overwrite_keeps_position() {
        let mut builder = DocumentBuilder::new();
        builder.set_scalar(Scalar::FormatVersion("1".to_string()));
        builder.set_scalar(Scalar::Description(Value::literal("d")));
        builder.set_scalar(Scalar::FormatVersion("2".to_string()));
        let doc = builder.finalize();
        assert_eq!(doc.format_version(), Some("2"));
        assert_eq!(doc.keys().next(), Some(SectionKey::FormatVersion));
    }

    #[test]
    fn test_add_before_open() {
        let mut builder = DocumentBuilder::new();
        assert_eq!(
            builder.add_parameter(
                id("env"),
                Parameter::new(ParameterType::String, Value::literal("dev"))
            ),
            Err(BuildError::SectionNotOpen {
                section: SectionKey::Parameters
            })
        );
        assert_eq!(
            builder.add_resource(
                id("main_vpc"),
                ResourceType::Vpc,
                Properties::new(),
                Value::literal("n"),
                Value::literal("d"),
            ),
            Err(BuildError::SectionNotOpen {
                section: SectionKey::Resources
            })
        );
    }

    #[test]
    fn test_open_twice() {
        let mut builder = DocumentBuilder::new();
        builder.open_parameters_section().unwrap();
        assert_eq!(
            builder.open_parameters_section(),
            Err(BuildError::SectionAlreadyOpen {
                section: SectionKey::Parameters
            })
        );
    }

    #[test]
    fn test_tags_appended_last() {
        let mut builder = DocumentBuilder::new();
        builder.open_resources_section().unwrap();
        let mut properties = Properties::new();
        properties.insert(
            "CidrBlock".to_string(),
            Value::literal("10.0.0.0/16").into(),
        );
        builder
            .add_resource(
                id("main_vpc"),
                ResourceType::Vpc,
                properties,
                Value::literal("main"),
                Value::literal("primary"),
            )
            .unwrap();
        let doc = builder.finalize();
        let resource = doc.resource("MainVpc").unwrap();
        assert_eq!(
            resource.properties.keys().collect::<Vec<_>>(),
            vec!["CidrBlock", "Tags"]
        );
        let tags = resource.tags().unwrap();
        assert_eq!(tags.keys().collect::<Vec<_>>(), vec!["Name", "Description"]);
        assert_eq!(tags["Name"], Value::literal("main"));
        assert_eq!(tags["Description"], Value::literal("primary"));
    }

    #[test]
    fn test_duplicate_logical_id_across_sections() {
        let mut builder = DocumentBuilder::new();
        builder.open_parameters_section().unwrap();
        builder.open_resources_section().unwrap();
        builder
            .add_parameter(
                id("main_vpc"),
                Parameter::new(ParameterType::String, Value::literal("x")),
            )
            .unwrap();
        assert_eq!(
            builder.add_resource(
                id("main_vpc"),
                ResourceType::Vpc,
                Properties::new(),
                Value::literal("n"),
                Value::literal("d"),
            ),
            Err(BuildError::DuplicateLogicalId {
                logical_id: id("main_vpc"),
                existing: SectionKey::Parameters,
            })
        );
        assert_eq!(builder.counts(), (1, 0));
    }

    #[test]
    fn test_resources_iterate_in_insertion_order() {
        let mut builder = DocumentBuilder::new();
        builder.open_resources_section().unwrap();
        for name in ["zeta", "alpha", "mid"] {
            builder
                .add_resource(
                    id(name),
                    ResourceType::RouteTable,
                    Properties::new(),
                    Value::literal(name),
                    Value::literal(name),
                )
                .unwrap();
        }
        let doc = builder.finalize();
        assert_eq!(
            doc.resources()
                .unwrap()
                .keys()
                .map(LogicalId::as_str)
                .collect::<Vec<_>>(),
            vec!["Zeta", "Alpha", "Mid"]
        );
    }
}
