use stratiform_document::{DocumentBuilder, OutputDocument, Scalar, unquote};
use stratiform_syntax::{
    NetworkAclProperties, ParameterDefinition, ParametersBlock, ResourceDefinition,
    ResourcesBlock, RouteTableProperties, Span, StringLiteral, SubnetProperties, Template,
    TemplateVisitor, VpcProperties, walk,
};
use tracing::{debug, info};

use crate::error::TranslateError;
use crate::mapping::{self, ResourceEntry};

/// Feeds every visited construct through its mapping rule into a
/// [`DocumentBuilder`].
#[derive(Debug, Default)]
pub struct CloudFormationVisitor {
    builder: DocumentBuilder,
}

impl CloudFormationVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> OutputDocument {
        let (parameters, resources) = self.builder.counts();
        info!(parameters, resources, "translation finished");
        self.builder.finalize()
    }

    fn add_resource(&mut self, entry: ResourceEntry, span: Span) -> Result<(), TranslateError> {
        debug!(
            logical_id = %entry.logical_id,
            resource_type = %entry.resource_type,
            "mapped resource"
        );
        self.builder
            .add_resource(
                entry.logical_id,
                entry.resource_type,
                entry.properties,
                entry.name,
                entry.description,
            )
            .map_err(|err| TranslateError::build(err, span))
    }
}

impl TemplateVisitor for CloudFormationVisitor {
    type Error = TranslateError;

    fn visit_version(&mut self, version: &StringLiteral) -> Result<(), Self::Error> {
        let text = unquote(&version.raw).map_err(|err| TranslateError::malformed(err, version))?;
        debug!(version = text, "mapped format version");
        self.builder.set_scalar(Scalar::FormatVersion(text.to_string()));
        Ok(())
    }

    fn visit_description(&mut self, description: &StringLiteral) -> Result<(), Self::Error> {
        let value = mapping::resolve_literal(description)?;
        debug!(?value, "mapped description");
        self.builder.set_scalar(Scalar::Description(value));
        Ok(())
    }

    fn visit_parameters_begin(&mut self, block: &ParametersBlock) -> Result<(), Self::Error> {
        self.builder
            .open_parameters_section()
            .map_err(|err| TranslateError::build(err, block.span))
    }

    fn visit_parameter(&mut self, parameter: &ParameterDefinition) -> Result<(), Self::Error> {
        let entry = mapping::map_parameter(parameter)?;
        debug!(
            logical_id = %entry.logical_id,
            parameter_type = entry.parameter.parameter_type.as_str(),
            "mapped parameter"
        );
        self.builder
            .add_parameter(entry.logical_id, entry.parameter)
            .map_err(|err| TranslateError::build(err, parameter.reference.span))
    }

    fn visit_resources_begin(&mut self, block: &ResourcesBlock) -> Result<(), Self::Error> {
        self.builder
            .open_resources_section()
            .map_err(|err| TranslateError::build(err, block.span))
    }

    fn visit_vpc(
        &mut self,
        resource: &ResourceDefinition,
        properties: &VpcProperties,
    ) -> Result<(), Self::Error> {
        let entry = mapping::map_vpc(resource, properties)?;
        self.add_resource(entry, resource.reference.span)
    }

    fn visit_route_table(
        &mut self,
        resource: &ResourceDefinition,
        properties: &RouteTableProperties,
    ) -> Result<(), Self::Error> {
        let entry = mapping::map_route_table(resource, properties)?;
        self.add_resource(entry, resource.reference.span)
    }

    fn visit_network_acl(
        &mut self,
        resource: &ResourceDefinition,
        properties: &NetworkAclProperties,
    ) -> Result<(), Self::Error> {
        let entry = mapping::map_network_acl(resource, properties)?;
        self.add_resource(entry, resource.reference.span)
    }

    fn visit_subnet(
        &mut self,
        resource: &ResourceDefinition,
        properties: &SubnetProperties,
    ) -> Result<(), Self::Error> {
        let entry = mapping::map_subnet(resource, properties)?;
        self.add_resource(entry, resource.reference.span)
    }
}

/// Translate a parsed template. The first error aborts the run and no
/// partial document is returned.
pub fn translate(template: &Template) -> Result<OutputDocument, TranslateError> {
    let mut visitor = CloudFormationVisitor::new();
    walk(template, &mut visitor)?;
    Ok(visitor.finish())
}
