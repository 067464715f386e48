use serde::Deserialize;

/// Descriptive fields lifted from a specification document. Every field is
/// optional and an empty string in the source counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSpecDescriptor {
    pub contact_email: Option<String>,
    pub contact_name: Option<String>,
    pub external_docs_url: Option<String>,
}

impl ParsedSpecDescriptor {
    /// Best-effort parse of raw YAML or JSON bytes. Anything that fails to
    /// deserialize yields an empty descriptor.
    pub fn parse(raw: &[u8]) -> Self {
        match serde_yaml::from_slice::<SpecDocument>(raw) {
            Ok(doc) => Self {
                contact_email: non_empty(doc.info.contact.email),
                contact_name: non_empty(doc.info.contact.name),
                external_docs_url: non_empty(doc.external_docs.url),
            },
            Err(e) => {
                tracing::debug!("Specification did not parse: {}", e);
                Self::default()
            }
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.contact_email.is_none()
            && self.contact_name.is_none()
            && self.external_docs_url.is_none()
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SpecDocument {
    info: Info,
    #[serde(rename = "externalDocs")]
    external_docs: ExternalDocs,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Info {
    contact: Contact,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Contact {
    name: String,
    email: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExternalDocs {
    url: String,
}
