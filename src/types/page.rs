use serde::{Deserialize, Serialize};

use super::bookmark::Bookmark;
use super::flash::FlashMessage;
use super::group::{Group, GroupSummary};
use super::search::SearchResult;

/// Selectors of a read request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Raw `group` query parameter.
    pub group: Option<String>,
    /// Raw `search` query parameter.
    pub search: Option<String>,
}

impl PageRequest {
    pub fn group(id: &str) -> Self {
        Self { group: Some(id.to_string()), search: None }
    }

    pub fn search(query: &str) -> Self {
        Self { group: None, search: Some(query.to_string()) }
    }
}

/// Everything the page templates need, with no rendering concerns attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewModel {
    /// Already HTML-escaped.
    pub page_title: String,
    pub current_group: String,
    pub search_query: String,
    pub groups: Vec<GroupSummary>,
    pub bookmarks: Vec<Bookmark>,
    pub selected_group: Option<Group>,
    pub search_results: Vec<SearchResult>,
    pub is_searching: bool,
    pub flash_messages: Vec<FlashMessage>,
}

/// Named page sections, each rendered independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    Sidebar,
    MainContent,
    Footer,
    Modals,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Header,
        Section::Sidebar,
        Section::MainContent,
        Section::Footer,
        Section::Modals,
    ];

    pub fn template_name(self) -> &'static str {
        match self {
            Section::Header => "header",
            Section::Sidebar => "sidebar",
            Section::MainContent => "main_content",
            Section::Footer => "footer",
            Section::Modals => "modals",
        }
    }
}

/// Bootstrap grid widths of the left, main and right columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub left: u8,
    pub main: u8,
    pub right: u8,
}

/// Where an asset is injected in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetPlacement {
    Head,
    Body,
}

/// A static asset declared on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asset {
    Bootstrap { version: String },
    Stylesheet { href: String },
    Script { src: String, placement: AssetPlacement },
    InlineStyle { css: String, placement: AssetPlacement },
}

/// Input of the page compositor: the rendered sections in layout order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    /// Already HTML-escaped.
    pub title: String,
    pub fluid: bool,
    pub columns: ColumnLayout,
    pub header: String,
    pub left: String,
    pub main: String,
    pub footer: String,
    pub assets: Vec<Asset>,
}
