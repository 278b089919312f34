//! Application context for the link manager.
//!
//! Built once at process start and passed by reference to the request router;
//! there is no global instance.

use crate::config::AppConfig;
use crate::database::connection::Database;
use crate::managers::flash_manager::FlashManager;
use crate::services::bookmark_service::BookmarkService;
use crate::services::group_service::GroupService;
use crate::services::page_assembler::{PageCompositor, Renderer};
use crate::types::errors::StoreError;
use crate::ui::page_builder::PageBuilder;
use crate::ui::templates::TemplateRenderer;

/// Everything one request needs: configuration, store, flash queues and presentation.
pub struct App {
    pub config: AppConfig,
    pub db: Database,
    pub flash: FlashManager,
    pub renderer: Box<dyn Renderer>,
    pub compositor: Box<dyn PageCompositor>,
}

impl App {
    /// Opens the database named by `config` and wires the built-in presentation.
    pub fn new(config: AppConfig) -> Result<Self, StoreError> {
        let db = Database::open(&config.database_path)?;
        Ok(Self::with_database(config, db))
    }

    /// An app backed by an in-memory database.
    pub fn in_memory(config: AppConfig) -> Result<Self, StoreError> {
        Ok(Self::with_database(config, Database::open_in_memory()?))
    }

    pub fn with_database(config: AppConfig, db: Database) -> Self {
        Self {
            config,
            db,
            flash: FlashManager::new(),
            renderer: Box::new(TemplateRenderer::new()),
            compositor: Box::new(PageBuilder::new()),
        }
    }

    /// Replaces the renderer and compositor.
    pub fn with_presentation(
        mut self,
        renderer: Box<dyn Renderer>,
        compositor: Box<dyn PageCompositor>,
    ) -> Self {
        self.renderer = renderer;
        self.compositor = compositor;
        self
    }

    pub fn groups(&self) -> GroupService<'_> {
        GroupService::new(self.db.connection())
    }

    pub fn bookmarks(&self) -> BookmarkService<'_> {
        BookmarkService::new(self.db.connection())
    }
}
