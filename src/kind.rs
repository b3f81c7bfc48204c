use std::fmt;
use std::str::FromStr;

use crate::error::BuildError;
use crate::validate::AllowedAttributes;

/// The closed set of element kinds the builder knows how to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `<div>`
    Container,
    /// `<ul>`
    List,
    /// `<li>`
    ListItem,
    /// `<span>`
    Inline,
    /// `<form>`
    Form,
    /// `<label>`
    Label,
    /// `<br>`
    LineBreak,
    /// `<input>`
    Field,
    /// `<p>`
    Paragraph,
    /// Raw text payload, never an element of its own.
    Text,
}

impl Kind {
    pub const ALL: [Kind; 10] = [
        Kind::Container,
        Kind::List,
        Kind::ListItem,
        Kind::Inline,
        Kind::Form,
        Kind::Label,
        Kind::LineBreak,
        Kind::Field,
        Kind::Paragraph,
        Kind::Text,
    ];

    /// Canonical upper-case label, compared against caller labels after case-folding.
    pub fn label(self) -> &'static str {
        match self {
            Kind::Container => "DIV",
            Kind::List => "UL",
            Kind::ListItem => "LI",
            Kind::Inline => "SPAN",
            Kind::Form => "FORM",
            Kind::Label => "LABEL",
            Kind::LineBreak => "BR",
            Kind::Field => "INPUT",
            Kind::Paragraph => "P",
            Kind::Text => "TEXT",
        }
    }

    /// Tag name of the platform element this kind materializes to.
    pub fn tag(self) -> &'static str {
        match self {
            Kind::Container => "div",
            Kind::List => "ul",
            Kind::ListItem => "li",
            Kind::Inline => "span",
            Kind::Form => "form",
            Kind::Label => "label",
            Kind::LineBreak => "br",
            Kind::Field => "input",
            Kind::Paragraph => "p",
            Kind::Text => "text",
        }
    }

    pub fn from_label(label: &str) -> Result<Self, BuildError> {
        let folded = label.to_uppercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == folded)
            .ok_or_else(|| BuildError::UnknownKind {
                label: label.to_string(),
            })
    }

    /// Attributes this kind accepts on top of the shared base set.
    pub fn extra_attributes(self) -> &'static [&'static str] {
        match self {
            Kind::Container | Kind::Inline | Kind::Text => &[],
            Kind::List => &["type"],
            Kind::ListItem => &["type", "value"],
            Kind::Form => &["action", "autocomplete", "method", "name", "enctype"],
            Kind::Label => &["for"],
            Kind::LineBreak => &["clear"],
            Kind::Field => &[
                "type",
                "value",
                "form",
                "formaction",
                "disabled",
                "name",
                "placeholder",
                "required",
            ],
            Kind::Paragraph => &["align"],
        }
    }

    /// The full allowed set: base attributes extended once with this kind's extras.
    ///
    /// TEXT skips the extension step and accepts no attributes at all.
    pub fn allowed_attributes(self) -> AllowedAttributes {
        if self == Kind::Text {
            return AllowedAttributes::empty();
        }

        let mut allowed = AllowedAttributes::base();
        let extra = self.extra_attributes();
        if !extra.is_empty() {
            allowed.extend(extra);
        }
        allowed
    }

    /// Void elements never serialize a closing tag.
    pub fn is_void(self) -> bool {
        matches!(self, Kind::LineBreak | Kind::Field)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Kind {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("div", Kind::Container)]
    #[case("DIV", Kind::Container)]
    #[case("Ul", Kind::List)]
    #[case("li", Kind::ListItem)]
    #[case("span", Kind::Inline)]
    #[case("form", Kind::Form)]
    #[case("label", Kind::Label)]
    #[case("br", Kind::LineBreak)]
    #[case("input", Kind::Field)]
    #[case("p", Kind::Paragraph)]
    #[case("text", Kind::Text)]
    fn labels_fold_to_their_kind(#[case] label: &str, #[case] expected: Kind) {
        assert_eq!(Kind::from_label(label).unwrap(), expected);
        assert_eq!(label.parse::<Kind>().unwrap(), expected);
    }

    #[rstest]
    #[case("UNKNOWN_KIND")]
    #[case("container")]
    #[case("")]
    #[case(" div")]
    fn unknown_labels_are_rejected(#[case] label: &str) {
        let err = Kind::from_label(label).unwrap_err();
        assert!(matches!(err, BuildError::UnknownKind { label: l } if l == label));
    }

    #[test]
    fn every_element_kind_starts_from_the_base_set() {
        for kind in Kind::ALL.into_iter().filter(|k| *k != Kind::Text) {
            let allowed = kind.allowed_attributes();
            for name in ["id", "class", "style", "hidden", "title"] {
                assert!(allowed.contains(name), "{kind} should allow {name}");
            }
            for name in kind.extra_attributes() {
                assert!(allowed.contains(name), "{kind} should allow {name}");
            }
        }
    }

    #[test]
    fn text_allows_nothing() {
        assert_eq!(Kind::Text.allowed_attributes(), AllowedAttributes::empty());
        assert!(!Kind::Text.allowed_attributes().contains("id"));
    }

    #[test]
    fn extensions_do_not_leak_between_kinds() {
        assert!(Kind::Field.allowed_attributes().contains("placeholder"));
        assert!(!Kind::Form.allowed_attributes().contains("placeholder"));
        assert!(!Kind::Container.allowed_attributes().contains("type"));
        assert!(Kind::List.allowed_attributes().contains("type"));
    }

    #[test]
    fn labels_and_tags_agree() {
        for kind in Kind::ALL {
            assert_eq!(kind.tag().to_uppercase(), kind.label());
            assert_eq!(kind.to_string(), kind.label());
        }
    }
}
