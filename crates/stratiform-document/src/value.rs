/// A resolved string value.
///
/// Serializes as a plain JSON string, `{"Ref": id}`, or
/// `{"Fn::Join": [delimiter, [parts...]]}` respectively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Literal(String),
    Reference(String),
    Join { delimiter: String, parts: Vec<Value> },
}

impl Value {
    pub fn literal(text: impl Into<String>) -> Self {
        Value::Literal(text.into())
    }

    pub fn reference(logical_id: impl Into<String>) -> Self {
        Value::Reference(logical_id.into())
    }

    /// A join with the empty delimiter, the only form the translator emits.
    pub fn concat(parts: Vec<Value>) -> Self {
        Value::Join {
            delimiter: String::new(),
            parts,
        }
    }

    /// Logical ids referenced by this value, in order of appearance.
    pub fn references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Value::Literal(_) => {}
            Value::Reference(id) => out.push(id),
            Value::Join { parts, .. } => {
                for part in parts {
                    part.collect_references(out);
                }
            }
        }
    }
}
