use serde::{Deserialize, Serialize};

/// What to do with an element that has more than one TEXT child.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextChildren {
    /// Accept it. Each TEXT child replaces the element's text content when
    /// materialized, so only the last payload survives.
    #[default]
    Overwrite,
    /// Fail construction with [`BuildError::MultipleText`](crate::BuildError::MultipleText).
    Reject,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    pub text_children: TextChildren,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject_multiple_text(mut self) -> Self {
        self.text_children = TextChildren::Reject;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterializeOptions {
    /// Lower-case attribute names on the platform element, as an HTML
    /// document does for `setAttribute`. Nodes keep the original keys either way.
    pub lowercase_attribute_names: bool,
}

impl Default for MaterializeOptions {
    fn default() -> Self {
        Self {
            lowercase_attribute_names: true,
        }
    }
}

impl MaterializeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preserve_attribute_case(mut self) -> Self {
        self.lowercase_attribute_names = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(BuildOptions::new().text_children, TextChildren::Overwrite);
        assert!(MaterializeOptions::new().lowercase_attribute_names);
    }

    #[test]
    fn options_deserialize_with_missing_fields() {
        let build: BuildOptions = serde_json::from_str(r#"{"text_children": "reject"}"#).unwrap();
        assert_eq!(build, BuildOptions::new().reject_multiple_text());

        let materialize: MaterializeOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(materialize, MaterializeOptions::default());

        let materialize: MaterializeOptions =
            serde_json::from_str(r#"{"lowercase_attribute_names": false}"#).unwrap();
        assert_eq!(materialize, MaterializeOptions::new().preserve_attribute_case());
    }
}
