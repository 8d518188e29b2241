//! Extraction and rewriting of CDN image references inside one document.

use anyhow::Result;
use ego_tree::NodeId;
use scraper::{Html, Selector};
use tracing::info;
use url::Url;

use crate::config::ArchiveLayout;
use crate::fetch::AssetFetcher;

/// Result of localizing a single document.
#[derive(Debug)]
pub struct DocumentOutcome {
    /// Serialized document text with CDN references rewritten.
    pub html: String,
    /// Remote filenames downloaded while processing this document.
    pub downloads: Vec<String>,
}

/// Derive the local filename for a remote image URL.
///
/// The filename is the final segment of the URL path; the query string is
/// discarded. Returns `None` for values that do not parse as absolute URLs or
/// whose path has no terminal segment, which callers treat as "not a matching
/// image".
pub fn asset_filename(src: &str) -> Option<String> {
    let url = Url::parse(src).ok()?;
    let segment = url.path_segments()?.next_back()?;
    if segment.is_empty() {
        None
    } else {
        Some(segment.to_string())
    }
}

/// Rewrite every CDN-hosted image reference in `html`, downloading any asset
/// not already present in the layout's asset directory.
///
/// Images whose `src` is absent, points at another host, or fails to parse
/// pass through unchanged. Distinct remote URLs sharing a final path segment
/// share one local asset.
pub fn localize_document(
    html: &str,
    layout: &ArchiveLayout,
    fetcher: &dyn AssetFetcher,
) -> Result<DocumentOutcome> {
    let mut document = Html::parse_document(html);
    let selector = Selector::parse("img").expect("invalid img selector");

    // Collect matches up front; mutating the tree needs exclusive access.
    let matches: Vec<_> = document
        .select(&selector)
        .filter_map(|element| {
            let src = element.value().attr("src")?;
            src.contains(&layout.cdn_host)
                .then(|| (element.id(), src.to_string()))
        })
        .collect();

    let mut downloads = Vec::new();
    for (node_id, src) in matches {
        let Some(filename) = asset_filename(&src) else {
            continue;
        };

        let dest = layout.asset_path(&filename);
        if !dest.exists() {
            info!("downloading {src} to {}", dest.display());
            fetcher.fetch(&src, &dest)?;
            downloads.push(filename.clone());
        }

        set_src_attribute(&mut document, node_id, &layout.asset_src(&filename));
    }

    Ok(DocumentOutcome {
        html: document.html(),
        downloads,
    })
}

fn set_src_attribute(document: &mut Html, node_id: NodeId, value: &str) {
    let Some(mut node) = document.tree.get_mut(node_id) else {
        return;
    };
    if let scraper::Node::Element(element) = node.value() {
        for (name, attr_value) in element.attrs.iter_mut() {
            if name.local.as_ref() == "src" {
                *attr_value = value.into();
            }
        }
    }
}
