//! Engine-level commands
//!
//! One enum for every caller-facing operation, so a transport (HTTP, CLI,
//! queue) can deserialize a request and dispatch it in one call. The
//! request id from `RequestContext` is stamped onto logs and errors.

use crate::engine::PageEngine;
use pagekit_core::snapshot::SnapshotRequest;
use pagekit_core::{
    log_op_end, log_op_error, log_op_start, Command, Component, Page, PageTemplate, PageVersion,
    RevertResult,
};
use pagekit_core_types::RequestContext;
use pagekit_store::{PageRepository, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EngineCommand {
    PageCreate {
        template_id: String,
    },
    PageCreateFromTemplate {
        template: PageTemplate,
    },
    PageGet {
        page_id: String,
    },
    /// Any component or nested collection edit
    PageApply {
        page_id: String,
        command: Command,
    },
    ComponentList {
        page_id: String,
    },
    VersionCreate {
        page_id: String,
        author_id: String,
        #[serde(default)]
        version_name: Option<String>,
        #[serde(default)]
        change_description: Option<String>,
    },
    VersionList {
        page_id: String,
    },
    VersionGet {
        page_id: String,
        version_id: String,
    },
    Revert {
        page_id: String,
        version_id: String,
        /// `None` uses the engine's configured default
        #[serde(default)]
        create_backup: Option<bool>,
        author_id: String,
    },
}

impl EngineCommand {
    pub fn action_name(&self) -> &'static str {
        match self {
            EngineCommand::PageCreate { .. } => "page_create",
            EngineCommand::PageCreateFromTemplate { .. } => "page_create_from_template",
            EngineCommand::PageGet { .. } => "page_get",
            EngineCommand::PageApply { .. } => "page_apply",
            EngineCommand::ComponentList { .. } => "component_list",
            EngineCommand::VersionCreate { .. } => "version_create",
            EngineCommand::VersionList { .. } => "version_list",
            EngineCommand::VersionGet { .. } => "version_get",
            EngineCommand::Revert { .. } => "revert",
        }
    }
}

/// Result of applying an engine command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", content = "data", rename_all = "snake_case")]
pub enum EngineCommandResult {
    Page(Page),
    Components(Vec<Component>),
    Version(PageVersion),
    Versions(Vec<PageVersion>),
    Revert(RevertResult),
}

/// Dispatch an engine command
///
/// # Errors
/// Returns the error of the dispatched operation with the request id (and
/// trace id, if any) attached.
pub fn apply_engine_command<R: PageRepository>(
    engine: &PageEngine<R>,
    ctx: &RequestContext,
    cmd: EngineCommand,
) -> Result<EngineCommandResult> {
    let action = cmd.action_name();
    log_op_start!("engine_command", action = action, request_id = %ctx.request_id);
    let start = std::time::Instant::now();

    let result = dispatch(engine, cmd).map_err(|e| {
        let e = match &ctx.trace_id {
            Some(trace_id) => e.with_trace_id(trace_id.clone()),
            None => e,
        }
        .with_request_id(ctx.request_id.clone());
        log_op_error!(
            "engine_command",
            e,
            duration_ms = start.elapsed().as_millis() as u64,
            action = action,
            request_id = %ctx.request_id
        );
        e
    })?;

    log_op_end!(
        "engine_command",
        duration_ms = start.elapsed().as_millis() as u64,
        action = action,
        request_id = %ctx.request_id
    );

    Ok(result)
}

fn dispatch<R: PageRepository>(
    engine: &PageEngine<R>,
    cmd: EngineCommand,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::PageCreate { template_id } => {
            engine.create_page(&template_id).map(EngineCommandResult::Page)
        }
        EngineCommand::PageCreateFromTemplate { template } => engine
            .create_page_from_template(&template)
            .map(EngineCommandResult::Page),
        EngineCommand::PageGet { page_id } => {
            engine.get_page(&page_id).map(EngineCommandResult::Page)
        }
        EngineCommand::PageApply { page_id, command } => {
            engine.execute(&page_id, command).map(EngineCommandResult::Page)
        }
        EngineCommand::ComponentList { page_id } => engine
            .list_components(&page_id)
            .map(EngineCommandResult::Components),
        EngineCommand::VersionCreate {
            page_id,
            author_id,
            version_name,
            change_description,
        } => {
            let request = SnapshotRequest {
                author_id,
                version_name,
                change_description,
            };
            engine
                .create_version(&page_id, request)
                .map(EngineCommandResult::Version)
        }
        EngineCommand::VersionList { page_id } => engine
            .list_versions(&page_id)
            .map(EngineCommandResult::Versions),
        EngineCommand::VersionGet {
            page_id,
            version_id,
        } => engine
            .get_version_content(&page_id, &version_id)
            .map(EngineCommandResult::Version),
        EngineCommand::Revert {
            page_id,
            version_id,
            create_backup,
            author_id,
        } => engine
            .revert(&page_id, &version_id, create_backup, &author_id)
            .map(EngineCommandResult::Revert),
    }
}
