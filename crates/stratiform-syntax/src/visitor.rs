//! Source-order traversal of a [`Template`].
//!
//! Implementors override the callbacks for the constructs they care about;
//! every callback defaults to doing nothing. [`walk`] guarantees that
//!
//! - callbacks fire in source declaration order,
//! - a section's `*_begin` callback fires before any construct in it,
//! - each construct is visited exactly once,
//!
//! and stops at the first callback error.

use crate::ast::*;

pub trait TemplateVisitor {
    type Error;

    fn visit_version(&mut self, _version: &StringLiteral) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_description(&mut self, _description: &StringLiteral) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_parameters_begin(&mut self, _block: &ParametersBlock) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_parameter(&mut self, _parameter: &ParameterDefinition) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_resources_begin(&mut self, _block: &ResourcesBlock) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_vpc(
        &mut self,
        _resource: &ResourceDefinition,
        _properties: &VpcProperties,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_route_table(
        &mut self,
        _resource: &ResourceDefinition,
        _properties: &RouteTableProperties,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_network_acl(
        &mut self,
        _resource: &ResourceDefinition,
        _properties: &NetworkAclProperties,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_subnet(
        &mut self,
        _resource: &ResourceDefinition,
        _properties: &SubnetProperties,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub fn walk<V: TemplateVisitor + ?Sized>(
    template: &Template,
    visitor: &mut V,
) -> Result<(), V::Error> {
    for item in &template.items {
        match item {
            Item::Version(literal) => visitor.visit_version(literal)?,
            Item::Description(literal) => visitor.visit_description(literal)?,
            Item::Parameters(block) => {
                visitor.visit_parameters_begin(block)?;
                for parameter in &block.parameters {
                    visitor.visit_parameter(parameter)?;
                }
            }
            Item::Resources(block) => {
                visitor.visit_resources_begin(block)?;
                for resource in &block.resources {
                    walk_resource(resource, visitor)?;
                }
            }
        }
    }
    Ok(())
}

fn walk_resource<V: TemplateVisitor + ?Sized>(
    resource: &ResourceDefinition,
    visitor: &mut V,
) -> Result<(), V::Error> {
    match &resource.properties {
        ResourceProperties::Vpc(properties) => visitor.visit_vpc(resource, properties),
        ResourceProperties::RouteTable(properties) => {
            visitor.visit_route_table(resource, properties)
        }
        ResourceProperties::NetworkAcl(properties) => {
            visitor.visit_network_acl(resource, properties)
        }
        ResourceProperties::Subnet(properties) => visitor.visit_subnet(resource, properties),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[derive(Default)]
    struct EventLog(Vec<String>);

    impl TemplateVisitor for EventLog {
        type Error = String;

        fn visit_version(&mut self, version: &StringLiteral) -> Result<(), String> {
            self.0.push(format!("version {}", version.raw));
            Ok(())
        }

        fn visit_parameters_begin(&mut self, _block: &ParametersBlock) -> Result<(), String> {
            self.0.push("parameters".to_string());
            Ok(())
        }

        fn visit_parameter(&mut self, parameter: &ParameterDefinition) -> Result<(), String> {
            self.0.push(format!("parameter {}", parameter.reference.name));
            Ok(())
        }

        fn visit_resources_begin(&mut self, _block: &ResourcesBlock) -> Result<(), String> {
            self.0.push("resources".to_string());
            Ok(())
        }

        fn visit_vpc(
            &mut self,
            resource: &ResourceDefinition,
            _properties: &VpcProperties,
        ) -> Result<(), String> {
            self.0.push(format!("vpc {}", resource.reference.name));
            Ok(())
        }

        fn visit_route_table(
            &mut self,
            resource: &ResourceDefinition,
            _properties: &RouteTableProperties,
        ) -> Result<(), String> {
            if resource.reference.name == "stop_here" {
                return Err("stopped".to_string());
            }
            self.0.push(format!("route_table {}", resource.reference.name));
            Ok(())
        }
    }

    const SOURCE: &str = r#"
resources {
    vpc first { name = "a"; description = "b"; cidr_block = "c"; }
    route_table second { name = "a"; description = "b"; vpc_id = "c"; }
}
version "2010-09-09";
parameters {
    env: string = "dev";
}
"#;

    #[test]
    fn test_walk_follows_source_order() {
        let template = parse(SOURCE).unwrap();
        let mut log = EventLog::default();
        walk(&template, &mut log).unwrap();
        assert_eq!(
            log.0,
            vec![
                "resources",
                "vpc first",
                "route_table second",
                "version \"2010-09-09\"",
                "parameters",
                "parameter env",
            ]
        );
    }

    #[test]
    fn test_walk_stops_at_first_error() {
        let template = parse(&SOURCE.replace("second", "stop_here")).unwrap();
        let mut log = EventLog::default();
        assert_eq!(walk(&template, &mut log), Err("stopped".to_string()));
        assert_eq!(log.0, vec!["resources", "vpc first"]);
    }
}
