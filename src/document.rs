//! The finished document, as one value per kind, and its serialized forms.
use anyhow::{Context, Result};
use serde::Serialize;

use crate::knative::{Build, Configuration, Route, Secret, Service, ServiceAccount};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Document {
    Build(Build),
    Configuration(Configuration),
    Service(Service),
    Route(Route),
    Secret(Secret),
    ServiceAccount(ServiceAccount),
}

/// Serialized form handed to stdout or kubectl.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl Document {
    pub fn kind(&self) -> &str {
        &self.type_meta().kind
    }

    pub fn name(&self) -> &str {
        match self {
            Document::Build(doc) => &doc.metadata.name,
            Document::Configuration(doc) => &doc.metadata.name,
            Document::Service(doc) => &doc.metadata.name,
            Document::Route(doc) => &doc.metadata.name,
            Document::Secret(doc) => &doc.metadata.name,
            Document::ServiceAccount(doc) => &doc.metadata.name,
        }
    }

    fn type_meta(&self) -> &crate::knative::meta::TypeMeta {
        match self {
            Document::Build(doc) => &doc.type_meta,
            Document::Configuration(doc) => &doc.type_meta,
            Document::Service(doc) => &doc.type_meta,
            Document::Route(doc) => &doc.type_meta,
            Document::Secret(doc) => &doc.type_meta,
            Document::ServiceAccount(doc) => &doc.type_meta,
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        self.render(OutputFormat::Yaml)
    }

    pub fn to_json(&self) -> Result<String> {
        self.render(OutputFormat::Json)
    }

    /// Serialize by dispatching on the document kind.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        let rendered = match self {
            Document::Build(doc) => encode(doc, format),
            Document::Configuration(doc) => encode(doc, format),
            Document::Service(doc) => encode(doc, format),
            Document::Route(doc) => encode(doc, format),
            Document::Secret(doc) => encode(doc, format),
            Document::ServiceAccount(doc) => encode(doc, format),
        };
        rendered.with_context(|| format!("serialize {} {}", self.kind(), self.name()))
    }
}

fn encode<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(value)?;
            text.push('\n');
            Ok(text)
        }
    }
}

macro_rules! impl_from_document {
    ($($kind:ident),*) => {
        $(impl From<$kind> for Document {
            fn from(doc: $kind) -> Self {
                Document::$kind(doc)
            }
        })*
    };
}

impl_from_document!(Build, Configuration, Service, Route, Secret, ServiceAccount);

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
