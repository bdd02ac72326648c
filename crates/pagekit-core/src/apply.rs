//! Functional-boundary apply function
//!
//! `apply()` is the canonical entry point for atomic page mutations.
//!
//! ## Atomicity Contract
//!
//! - **All-or-nothing**: either the command succeeds and a valid new page is
//!   returned, or it fails and the caller's copy of the old page is untouched
//! - **No panics**: invalid input returns typed errors
//! - **Validate before commit**: every candidate is checked in full first
//!
//! ## Example
//!
//! ```
//! use pagekit_core::{apply, Command, ComponentKind, Page};
//!
//! let page = Page::new("landing");
//! let cmd = Command::ComponentCreate {
//!     kind: ComponentKind::Card,
//!     order: None,
//!     payload: None,
//! };
//!
//! let page = apply(page, cmd).unwrap();
//! assert_eq!(page.component_count(), 1);
//! ```

use crate::commands::Command;
use crate::errors::Result;
use crate::model::Page;
use crate::ops::{component_ops, item_ops};

/// Apply a command to a page, returning the new page
///
/// # Errors
///
/// Returns the domain error of the failed operation. See `PageKitError`
/// for the full taxonomy. The page passed in is consumed either way; keep
/// a clone if the old state is still needed after a failure.
pub fn apply(mut page: Page, cmd: Command) -> Result<Page> {
    match cmd {
        Command::ComponentAdd { component } => {
            component_ops::add_component(&mut page, component)?;
        }
        Command::ComponentCreate {
            kind,
            order,
            payload,
        } => {
            component_ops::add_new_component(&mut page, kind, order, payload.as_ref())?;
        }
        Command::ComponentUpdate {
            component_id,
            patch,
        } => {
            component_ops::update_component(&mut page, &component_id, patch)?;
        }
        Command::ComponentRemove { component_id } => {
            component_ops::remove_component(&mut page, &component_id)?;
        }
        Command::ComponentReorder { ordered_ids } => {
            component_ops::reorder_components(&mut page, &ordered_ids)?;
        }
        Command::InitializeFromTemplate { template } => {
            component_ops::initialize_from_template(&mut page, &template)?;
        }
        Command::AccordionItemAdd { component_id, item } => {
            item_ops::add_accordion_item(&mut page, &component_id, item)?;
        }
        Command::AccordionItemUpdate {
            component_id,
            item_id,
            patch,
        } => {
            item_ops::update_accordion_item(&mut page, &component_id, &item_id, patch)?;
        }
        Command::AccordionItemRemove {
            component_id,
            item_id,
        } => {
            item_ops::remove_accordion_item(&mut page, &component_id, &item_id)?;
        }
        Command::AccordionItemReorder {
            component_id,
            ordered_ids,
        } => {
            item_ops::reorder_accordion_items(&mut page, &component_id, &ordered_ids)?;
        }
        Command::LinkAdd { component_id, link } => {
            item_ops::add_link(&mut page, &component_id, link)?;
        }
        Command::LinkUpdate {
            component_id,
            link_id,
            patch,
        } => {
            item_ops::update_link(&mut page, &component_id, &link_id, patch)?;
        }
        Command::LinkRemove {
            component_id,
            link_id,
        } => {
            item_ops::remove_link(&mut page, &component_id, &link_id)?;
        }
        Command::LinkReorder {
            component_id,
            ordered_ids,
        } => {
            item_ops::reorder_links(&mut page, &component_id, &ordered_ids)?;
        }
    }
    Ok(page)
}
