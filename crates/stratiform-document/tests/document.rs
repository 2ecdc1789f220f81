use pretty_assertions::assert_eq;
use serde_json::json;
use stratiform_document::{
    DocumentBuilder, LogicalId, Parameter, ParameterConstraint, ParameterType, Properties,
    ResourceType, Scalar, Value, resolve,
};

fn id(name: &str) -> LogicalId {
    LogicalId::from_reference(name)
}

#[test]
fn test_build_and_serialize() {
    let mut builder = DocumentBuilder::new();
    builder.set_scalar(Scalar::FormatVersion("2010-09-09".to_string()));
    builder.set_scalar(Scalar::Description(resolve("\"net {{ env }}\"").unwrap()));
    builder.open_parameters_section().unwrap();
    builder
        .add_parameter(
            id("env"),
            Parameter::new(ParameterType::String, resolve("\"dev\"").unwrap()),
        )
        .unwrap();
    builder
        .add_parameter(
            id("vpc_cidr"),
            Parameter::new(ParameterType::String, resolve("\"10.0.0.0/16\"").unwrap())
                .with_constraint(ParameterConstraint {
                    allowed_pattern: "pattern".to_string(),
                    constraint_description: "description".to_string(),
                }),
        )
        .unwrap();
    builder.open_resources_section().unwrap();
    let mut properties = Properties::new();
    properties.insert(
        "CidrBlock".to_string(),
        resolve("\"{{ vpc_cidr }}\"").unwrap().into(),
    );
    builder
        .add_resource(
            id("main_vpc"),
            ResourceType::Vpc,
            properties,
            resolve("\"{{ env }}-vpc\"").unwrap(),
            Value::literal("primary"),
        )
        .unwrap();
    assert_eq!(builder.counts(), (2, 1));

    let document = builder.finalize();
    let value = serde_json::to_value(&document).unwrap();
    assert_eq!(
        value,
        json!({
            "AWSTemplateFormatVersion": "2010-09-09",
            "Description": { "Fn::Join": ["", ["net ", { "Ref": "Env" }]] },
            "Parameters": {
                "Env": { "Type": "String", "Default": "dev" },
                "VpcCidr": {
                    "Type": "String",
                    "Default": "10.0.0.0/16",
                    "AllowedPattern": "pattern",
                    "ConstraintDescription": "description"
                }
            },
            "Resources": {
                "MainVpc": {
                    "Type": "AWS::EC2::VPC",
                    "Properties": {
                        "CidrBlock": { "Ref": "VpcCidr" },
                        "Tags": {
                            "Name": { "Fn::Join": ["", [{ "Ref": "Env" }, "-vpc"]] },
                            "Description": "primary"
                        }
                    }
                }
            }
        })
    );

    // `json!` objects compare without order; check the order explicitly.
    let keys: Vec<&str> = value["Parameters"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["Env", "VpcCidr"]);
    assert!(document.declares("MainVpc"));
    assert!(!document.declares("main_vpc"));
}

#[test]
fn test_reference_ids_match_declared_ids() {
    let declared = id("public_subnet_a");
    let referenced = resolve("\"{{ public_subnet_a }}\"").unwrap();
    assert_eq!(referenced, Value::Reference(declared.as_str().to_string()));
}
