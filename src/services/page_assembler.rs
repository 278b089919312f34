//! Page assembly for the link manager.
//!
//! Builds the [`ViewModel`] for a read request, renders the five page sections
//! through a [`Renderer`] and hands them to a [`PageCompositor`] in layout order.
//! The view model is plain data, so it can be built and inspected without any
//! renderer present.

use rusqlite::Connection;
use serde_json::{json, Value};
use std::time::Instant;

use super::group_service::{GroupService, GroupServiceTrait};
use super::search_aggregator::SearchAggregator;
use crate::config::AppConfig;
use crate::managers::bookmark_manager::{BookmarkManager, BookmarkStore};
use crate::managers::flash_manager::FlashManager;
use crate::managers::group_manager::{GroupManager, GroupStore};
use crate::types::errors::{FatalError, RenderError, StoreError};
use crate::types::flash::FlashMessage;
use crate::types::page::{
    Asset, AssetPlacement, ColumnLayout, PageLayout, PageRequest, Section, ViewModel,
};

pub const GROUP_NOT_FOUND_TITLE: &str = "Group Not Found";

/// Inline style that reveals a group's action buttons on hover.
const GROUP_ACTION_STYLE: &str = "\
.list-group-item .btn-group-action {
    opacity: 0;
    transition: opacity 0.2s ease-in-out;
}
.list-group-item:hover .btn-group-action {
    opacity: 1;
}
.list-group-item.active {
    font-weight: bold;
}";

/// Renders a named template against a JSON context.
pub trait Renderer {
    fn render(&self, template: &str, context: &Value) -> Result<String, RenderError>;
}

/// Wraps rendered sections into a complete HTML document.
pub trait PageCompositor {
    fn compose(&self, layout: &PageLayout) -> String;
}

/// Rendered output of every [`Section`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedSections {
    pub header: String,
    pub sidebar: String,
    pub main_content: String,
    pub footer: String,
    pub modals: String,
}

/// Escapes text for safe inclusion in HTML element content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Builds and renders pages for read requests.
pub struct PageAssembler<'a> {
    conn: &'a Connection,
    config: &'a AppConfig,
}

impl<'a> PageAssembler<'a> {
    pub fn new(conn: &'a Connection, config: &'a AppConfig) -> Self {
        Self { conn, config }
    }

    /// Resolves the request into a view model carrying `flash_messages`.
    ///
    /// A non-blank search wins over a numeric group selector; with neither, the
    /// landing state is shown.
    pub fn build_view(
        &self,
        request: &PageRequest,
        flash_messages: Vec<FlashMessage>,
    ) -> Result<ViewModel, StoreError> {
        let groups = GroupService::new(self.conn).list_groups_with_counts()?;
        let search_query = request.search.as_deref().map(str::trim).unwrap_or("").to_string();
        let current_group = request.group.as_deref().map(str::trim).unwrap_or("").to_string();

        let mut view = ViewModel {
            page_title: escape_html(&self.config.app_title),
            current_group,
            search_query,
            groups,
            bookmarks: Vec::new(),
            selected_group: None,
            search_results: Vec::new(),
            is_searching: false,
            flash_messages,
        };

        if !view.search_query.is_empty() {
            view.search_results = SearchAggregator::new(self.conn).search(&view.search_query)?;
            view.page_title = format!("Search Results: {}", escape_html(&view.search_query));
            view.is_searching = true;
        } else if let Ok(group_id) = view.current_group.parse::<i64>() {
            match GroupManager::new(self.conn).find(group_id)? {
                Some(group) => {
                    view.bookmarks = BookmarkManager::new(self.conn).list_in_group(group_id)?;
                    view.page_title = format!("Group: {}", escape_html(&group.name));
                    view.selected_group = Some(group);
                }
                None => view.page_title = GROUP_NOT_FOUND_TITLE.to_string(),
            }
        }

        Ok(view)
    }

    /// Renders each section independently. The footer only receives the render timing.
    pub fn render_sections(
        &self,
        view: &ViewModel,
        renderer: &dyn Renderer,
        started: Instant,
    ) -> Result<RenderedSections, RenderError> {
        let context = serde_json::to_value(view)?;
        let footer_context = json!({
            "time": format!("{:.3}", started.elapsed().as_secs_f64()),
        });

        let mut sections = RenderedSections::default();
        for section in Section::ALL {
            let ctx = if section == Section::Footer { &footer_context } else { &context };
            let html = renderer.render(section.template_name(), ctx)?;
            match section {
                Section::Header => sections.header = html,
                Section::Sidebar => sections.sidebar = html,
                Section::MainContent => sections.main_content = html,
                Section::Footer => sections.footer = html,
                Section::Modals => sections.modals = html,
            }
        }
        Ok(sections)
    }

    /// Places rendered sections into the fixed page layout: header on top, a narrow
    /// navigation column beside a wide content column, footer and modals last.
    pub fn layout(&self, view: &ViewModel, sections: RenderedSections) -> PageLayout {
        let assets = &self.config.assets;
        PageLayout {
            title: view.page_title.clone(),
            fluid: true,
            columns: ColumnLayout { left: 3, main: 9, right: 0 },
            header: sections.header,
            left: sections.sidebar,
            main: sections.main_content,
            footer: sections.footer + &sections.modals,
            assets: vec![
                Asset::Bootstrap { version: assets.bootstrap_version.clone() },
                Asset::Stylesheet { href: assets.icons_stylesheet.clone() },
                Asset::Script { src: assets.app_script.clone(), placement: AssetPlacement::Body },
                Asset::InlineStyle {
                    css: GROUP_ACTION_STYLE.to_string(),
                    placement: AssetPlacement::Head,
                },
            ],
        }
    }

    /// Full read path: view model, section rendering, composition.
    ///
    /// The session's flash messages are consumed only once the page exists; on a
    /// store or render failure they stay queued for the next read.
    pub fn assemble(
        &self,
        request: &PageRequest,
        flash: &mut FlashManager,
        session: &str,
        renderer: &dyn Renderer,
        compositor: &dyn PageCompositor,
        started: Instant,
    ) -> Result<String, FatalError> {
        let view = self.build_view(request, flash.pending(session))?;
        let sections = self.render_sections(&view, renderer, started)?;
        let html = compositor.compose(&self.layout(&view, sections));
        flash.take(session);
        Ok(html)
    }
}
