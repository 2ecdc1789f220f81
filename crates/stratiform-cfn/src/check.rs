//! Detection of references that nothing in the document declares.

use stratiform_document::{LogicalId, OutputDocument, resolve};
use stratiform_syntax::{
    NetworkAclProperties, ParameterDefinition, ResourceDefinition, RouteTableProperties, Span,
    StringLiteral, SubnetProperties, Template, TemplateVisitor, VpcProperties, walk,
};
use tracing::warn;

/// A `Ref` target that is neither a parameter nor a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub logical_id: String,
    /// Output path of the value holding the reference, e.g.
    /// `Resources.MainVpc.CidrBlock`.
    pub location: String,
    /// The string literal holding the reference.
    pub span: Span,
}

/// Collect every unresolved reference of `template` in document order.
///
/// `document` must be the translation of `template`. Names containing `::`
/// (pseudo parameters such as `AWS::Region`) are provided by the deployment
/// target and never reported.
pub fn unresolved_references(
    template: &Template,
    document: &OutputDocument,
) -> Vec<UnresolvedReference> {
    let mut collector = Collector {
        document,
        found: Vec::new(),
    };
    // The collector never fails.
    let Ok(()) = walk(template, &mut collector);
    collector.found
}

struct Collector<'a> {
    document: &'a OutputDocument,
    found: Vec<UnresolvedReference>,
}

impl Collector<'_> {
    fn literal(&mut self, literal: &StringLiteral, location: &str) {
        // Malformed literals never reach a translated document.
        let Ok(value) = resolve(&literal.raw) else {
            return;
        };
        for logical_id in value.references() {
            if logical_id.contains("::") || self.document.declares(logical_id) {
                continue;
            }
            warn!(logical_id, location, "unresolved reference");
            self.found.push(UnresolvedReference {
                logical_id: logical_id.to_string(),
                location: location.to_string(),
                span: literal.span,
            });
        }
    }

    fn resource(&mut self, resource: &ResourceDefinition, fields: &[(&str, &StringLiteral)]) {
        let id = LogicalId::from_reference(&resource.reference.name);
        for (key, literal) in fields {
            self.literal(literal, &format!("Resources.{id}.{key}"));
        }
        self.literal(&resource.name, &format!("Resources.{id}.Tags.Name"));
        self.literal(
            &resource.description,
            &format!("Resources.{id}.Tags.Description"),
        );
    }
}

impl TemplateVisitor for Collector<'_> {
    type Error = core::convert::Infallible;

    fn visit_description(&mut self, description: &StringLiteral) -> Result<(), Self::Error> {
        self.literal(description, "Description");
        Ok(())
    }

    fn visit_parameter(&mut self, parameter: &ParameterDefinition) -> Result<(), Self::Error> {
        let id = LogicalId::from_reference(&parameter.reference.name);
        self.literal(&parameter.default, &format!("Parameters.{id}.Default"));
        Ok(())
    }

    fn visit_vpc(
        &mut self,
        resource: &ResourceDefinition,
        properties: &VpcProperties,
    ) -> Result<(), Self::Error> {
        self.resource(resource, &[("CidrBlock", &properties.cidr_block)]);
        Ok(())
    }

    fn visit_route_table(
        &mut self,
        resource: &ResourceDefinition,
        properties: &RouteTableProperties,
    ) -> Result<(), Self::Error> {
        self.resource(resource, &[("VpcId", &properties.vpc_id)]);
        Ok(())
    }

    fn visit_network_acl(
        &mut self,
        resource: &ResourceDefinition,
        properties: &NetworkAclProperties,
    ) -> Result<(), Self::Error> {
        self.resource(resource, &[("VpcId", &properties.vpc_id)]);
        Ok(())
    }

    fn visit_subnet(
        &mut self,
        resource: &ResourceDefinition,
        properties: &SubnetProperties,
    ) -> Result<(), Self::Error> {
        self.resource(
            resource,
            &[
                ("VpcId", &properties.vpc_id),
                ("RouteTableId", &properties.route_table_id),
                ("NetworkAclId", &properties.network_acl_id),
                ("AvailabilityZone", &properties.availability_zone),
                ("CidrBlock", &properties.cidr_block),
            ],
        );
        Ok(())
    }
}
