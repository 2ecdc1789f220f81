use std::convert::Infallible;

use stratiform::document::LogicalId;
use stratiform::syntax::{
    NetworkAclProperties, ParameterDefinition, ResourceDefinition, RouteTableProperties, Span,
    StringLiteral, SubnetProperties, Template, TemplateVisitor, VpcProperties, walk,
};

use crate::util::Input;

#[derive(clap::Args)]
pub struct Args {
    /// Path to the template to inspect (use - for stdin)
    pub file: String,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let input = Input::read(&args.file)?;
    let template = input.parse()?;
    for line in construct_lines(&template, &input.source) {
        println!("{line}");
    }
    Ok(())
}

/// One line per construct: `line:column  kind  logical-id`.
fn construct_lines(template: &Template, source: &str) -> Vec<String> {
    let mut lister = Lister {
        source,
        lines: Vec::new(),
    };
    let Ok(()) = walk(template, &mut lister);
    lister.lines
}

struct Lister<'a> {
    source: &'a str,
    lines: Vec<String>,
}

impl Lister<'_> {
    fn push(&mut self, span: Span, kind: &str, name: &str) {
        let (line, column) = line_column(self.source, span.start as usize);
        self.lines.push(format!("{line}:{column}\t{kind:<12}\t{name}"));
    }

    fn resource(&mut self, resource: &ResourceDefinition) {
        let id = LogicalId::from_reference(&resource.reference.name);
        self.push(resource.span, resource.kind().keyword(), id.as_str());
    }
}

impl TemplateVisitor for Lister<'_> {
    type Error = Infallible;

    fn visit_version(&mut self, version: &StringLiteral) -> Result<(), Self::Error> {
        self.push(version.span, "version", &version.raw);
        Ok(())
    }

    fn visit_description(&mut self, description: &StringLiteral) -> Result<(), Self::Error> {
        self.push(description.span, "description", &description.raw);
        Ok(())
    }

    fn visit_parameter(&mut self, parameter: &ParameterDefinition) -> Result<(), Self::Error> {
        let id = LogicalId::from_reference(&parameter.reference.name);
        self.push(parameter.span, "parameter", id.as_str());
        Ok(())
    }

    fn visit_vpc(
        &mut self,
        resource: &ResourceDefinition,
        _: &VpcProperties,
    ) -> Result<(), Self::Error> {
        self.resource(resource);
        Ok(())
    }

    fn visit_route_table(
        &mut self,
        resource: &ResourceDefinition,
        _: &RouteTableProperties,
    ) -> Result<(), Self::Error> {
        self.resource(resource);
        Ok(())
    }

    fn visit_network_acl(
        &mut self,
        resource: &ResourceDefinition,
        _: &NetworkAclProperties,
    ) -> Result<(), Self::Error> {
        self.resource(resource);
        Ok(())
    }

    fn visit_subnet(
        &mut self,
        resource: &ResourceDefinition,
        _: &SubnetProperties,
    ) -> Result<(), Self::Error> {
        self.resource(resource);
        Ok(())
    }
}

/// 1-based line and column of a byte offset.
fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset.min(source.len())];
    let line = before.matches('\n').count() + 1;
    let column = before.rfind('\n').map_or(before.len(), |i| before.len() - i - 1) + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construct_lines() {
        let source = "version \"2010-09-09\";\nparameters {\n  env: string = \"dev\";\n}\nresources {\n  vpc main_vpc { name = \"n\"; description = \"d\"; cidr_block = \"c\"; }\n}\n";
        let template = stratiform::syntax::parse(source).unwrap();
        assert_eq!(
            construct_lines(&template, source),
            vec![
                "1:9\tversion     \t\"2010-09-09\"".to_string(),
                "3:3\tparameter   \tEnv".to_string(),
                "6:3\tvpc         \tMainVpc".to_string(),
            ]
        );
    }

    #[test]
    fn test_line_column() {
        assert_eq!(line_column("ab\ncd", 0), (1, 1));
        assert_eq!(line_column("ab\ncd", 4), (2, 2));
    }
}
