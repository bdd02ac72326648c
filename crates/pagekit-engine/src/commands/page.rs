//! Page creation and lookup

use crate::engine::PageEngine;
use pagekit_core::ops::component_ops::initialize_from_template;
use pagekit_core::{Page, PageTemplate};
use pagekit_store::{PageRepository, Result};

impl<R: PageRepository> PageEngine<R> {
    /// Create and store an empty page
    ///
    /// # Errors
    /// Returns a `Persistence` error if the page cannot be stored.
    pub fn create_page(&self, template_id: &str) -> Result<Page> {
        let page = Page::new(template_id);
        let page_id = page.id.clone();
        self.observed("page_create", &page_id, || self.repo_save_new(page))
    }

    /// Create a page and fill it from a template's blocks
    ///
    /// # Errors
    /// * `ValidationFailed` - If a block's defaults produce an invalid component
    /// * `Persistence` - If the page cannot be stored
    pub fn create_page_from_template(&self, template: &PageTemplate) -> Result<Page> {
        let mut page = Page::new(template.id.clone());
        let page_id = page.id.clone();
        self.observed("page_create_from_template", &page_id, || {
            initialize_from_template(&mut page, template)?;
            self.repo_save_new(page)
        })
    }

    /// # Errors
    /// Returns `NotFound` if the page does not exist.
    pub fn get_page(&self, page_id: &str) -> Result<Page> {
        self.observed("page_get", page_id, || self.load_page(page_id))
    }

    fn repo_save_new(&self, page: Page) -> Result<Page> {
        let page_id = page.id.clone();
        self.locks()
            .with_page(&page_id, || self.repository().save_page(&page))
    }
}
