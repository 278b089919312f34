//! Bootstrap page shell.

use crate::services::page_assembler::PageCompositor;
use crate::types::page::{Asset, AssetPlacement, PageLayout};

/// Composes a full HTML document from rendered sections.
#[derive(Debug, Default, Clone, Copy)]
pub struct PageBuilder;

impl PageBuilder {
    pub fn new() -> Self {
        Self
    }

    fn asset_tags(assets: &[Asset], placement: AssetPlacement) -> String {
        let mut html = String::new();
        for asset in assets {
            match asset {
                Asset::Bootstrap { version } => match placement {
                    AssetPlacement::Head => html.push_str(&format!(
                        "<link rel=\"stylesheet\" href=\"https://cdn.jsdelivr.net/npm/bootstrap@{}/dist/css/bootstrap.min.css\">",
                        version
                    )),
                    AssetPlacement::Body => html.push_str(&format!(
                        "<script src=\"https://cdn.jsdelivr.net/npm/bootstrap@{}/dist/js/bootstrap.bundle.min.js\"></script>",
                        version
                    )),
                },
                Asset::Stylesheet { href } if placement == AssetPlacement::Head => {
                    html.push_str(&format!("<link rel=\"stylesheet\" href=\"{}\">", href));
                }
                Asset::Script { src, placement: at } if *at == placement => {
                    html.push_str(&format!("<script src=\"{}\"></script>", src));
                }
                Asset::InlineStyle { css, placement: at } if *at == placement => {
                    html.push_str(&format!("<style>\n{}\n</style>", css));
                }
                _ => {}
            }
        }
        html
    }
}

impl PageCompositor for PageBuilder {
    /// `layout.title` is inserted as-is; it arrives escaped.
    fn compose(&self, layout: &PageLayout) -> String {
        let container = if layout.fluid { "container-fluid" } else { "container" };
        let columns = layout.columns;

        let mut html = String::with_capacity(
            layout.header.len() + layout.left.len() + layout.main.len() + layout.footer.len() + 2048,
        );
        html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"UTF-8\">");
        html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
        html.push_str(&format!("<title>{}</title>", layout.title));
        html.push_str(&Self::asset_tags(&layout.assets, AssetPlacement::Head));
        html.push_str("</head><body>");
        html.push_str(&layout.header);
        html.push_str(&format!("<div class=\"{}\"><div class=\"row\">", container));
        if columns.left > 0 {
            html.push_str(&format!("<div class=\"col-md-{}\">{}</div>", columns.left, layout.left));
        }
        html.push_str(&format!("<div class=\"col-md-{}\">{}</div>", columns.main, layout.main));
        if columns.right > 0 {
            html.push_str(&format!("<div class=\"col-md-{}\"></div>", columns.right));
        }
        html.push_str("</div></div>");
        html.push_str(&layout.footer);
        html.push_str(&Self::asset_tags(&layout.assets, AssetPlacement::Body));
        html.push_str("</body></html>");
        html
    }
}
