//! Structured-data projection for link responses.
//!
//! Downstream consumers (link-preview rendering, feed builders) get a small
//! JSON-LD object alongside each link. It is derived on the way out and
//! never written back to the store.

use serde::Serialize;

use crate::models::Link;

const CONTEXT: &str = "https://schema.org";
const TYPE: &str = "WebSite";

/// Fixed-shape JSON-LD metadata derived from a [`Link`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredData {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Project a link into its structured-data form. Pure: the input is only
/// borrowed and the result carries copies of the relevant fields.
pub fn project(link: &Link) -> StructuredData {
    StructuredData {
        context: CONTEXT,
        kind: TYPE,
        title: link.name.clone(),
        url: link.url.clone(),
        image: link.image_url.clone(),
        description: link.description.clone(),
    }
}
