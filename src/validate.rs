use crate::error::BuildError;
use crate::kind::Kind;
use crate::node::Attributes;

const BASE_ATTRIBUTES: [&str; 5] = ["id", "class", "style", "hidden", "title"];

/// Lower-case attribute names a kind accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedAttributes {
    names: Vec<&'static str>,
}

impl AllowedAttributes {
    /// The attributes every element kind accepts.
    pub fn base() -> Self {
        Self {
            names: BASE_ATTRIBUTES.to_vec(),
        }
    }

    pub fn empty() -> Self {
        Self { names: Vec::new() }
    }

    /// Appends kind-specific names. Names already present are skipped.
    pub fn extend(&mut self, names: &[&'static str]) {
        for name in names {
            if !self.names.contains(name) {
                self.names.push(name);
            }
        }
    }

    /// Case-insensitive membership.
    pub fn contains(&self, name: &str) -> bool {
        let folded = name.to_lowercase();
        self.names.iter().any(|allowed| *allowed == folded)
    }
}

/// Rejects the first attribute key that `allowed` does not contain.
pub fn validate(
    kind: Kind,
    allowed: &AllowedAttributes,
    attributes: &Attributes,
) -> Result<(), BuildError> {
    match attributes.keys().find(|name| !allowed.contains(name)) {
        Some(name) => Err(BuildError::InvalidAttribute {
            attribute: name.clone(),
            kind,
        }),
        None => Ok(()),
    }
}
