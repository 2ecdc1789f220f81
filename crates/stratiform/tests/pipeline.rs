use std::path::PathBuf;

use pretty_assertions::assert_eq;
use stratiform::cfn::{Config, to_string};
use stratiform::{Error, translate_file, translate_source};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_translate_file() {
    let translation = translate_file(&fixture("vpc.stf")).unwrap();
    let json = to_string(&translation.document, &Config::compact()).unwrap();
    assert_eq!(
        json,
        concat!(
            r#"{"AWSTemplateFormatVersion":"2010-09-09","#,
            r#""Parameters":{"VpcCidr":{"Type":"String","Default":"10.0.0.0/16","#,
            r#""AllowedPattern":"(\\d{1,3})\\.(\\d{1,3})\\.(\\d{1,3})\\.(\\d{1,3})/(\\d{1,2})","#,
            r#""ConstraintDescription":"Must be a valid CIDR range of the form x.x.x.x/x."}},"#,
            r#""Resources":{"MainVpc":{"Type":"AWS::EC2::VPC","Properties":{"#,
            r#""CidrBlock":{"Ref":"VpcCidr"},"#,
            r#""Tags":{"Name":"main","Description":"primary network"}}}}}"#
        )
    );
    assert!(translation.unresolved_references().is_empty());
}

#[test]
fn test_no_document_on_error() {
    let result = translate_source(
        r#"
        parameters { vpc_cidr: cidr = "10.0.0.0/16"; }
        resources {
            vpc vpc_cidr { name = "n"; description = "d"; cidr_block = "c"; }
        }
        "#,
    );
    let Err(Error::Translate(err)) = result else {
        panic!("expected translation error");
    };
    assert_eq!(
        err.to_string(),
        "duplicate logical id `VpcCidr`: already declared in `Parameters`"
    );
}
