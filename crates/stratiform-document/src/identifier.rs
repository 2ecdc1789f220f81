use core::borrow::Borrow;
use core::fmt::{self, Display};

/// Convert a reference name to its logical identifier.
///
/// Each underscore-delimited word gets its first character uppercased, the
/// rest of the word is kept as is, and the underscores are dropped:
/// `my_vpc` becomes `MyVpc`.
pub fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for word in name.split('_') {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// A normalized, PascalCase identifier used as a document key and as the
/// target of `Ref` expressions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogicalId(String);

impl LogicalId {
    /// Derive the logical id of a reference name.
    pub fn from_reference(name: &str) -> Self {
        LogicalId(normalize(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for LogicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LogicalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LogicalId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_single_word() {
        assert_eq!(normalize("vpc"), "Vpc");
    }

    #[test]
    fn test_normalize_multiple_words() {
        assert_eq!(normalize("my_vpc"), "MyVpc");
        assert_eq!(normalize("public_subnet_a"), "PublicSubnetA");
    }

    #[test]
    fn test_normalize_keeps_rest_of_word() {
        assert_eq!(normalize("subnet_az1b"), "SubnetAz1b");
        assert_eq!(normalize("AWS::Region"), "AWS::Region");
    }

    #[test]
    fn test_normalize_is_stable() {
        let first = normalize("route_table_main");
        let _ = normalize("something_else");
        assert_eq!(normalize("route_table_main"), first);
    }

    #[test]
    fn test_logical_id_from_reference() {
        let id = LogicalId::from_reference("main_vpc");
        assert_eq!(id.as_str(), "MainVpc");
        assert_eq!(id.to_string(), "MainVpc");
    }
}
