//! Request router for the link manager.
//!
//! A mutating request carries an `action` field naming exactly one domain
//! operation. Validation, not-found and conflict failures are caught here, turned
//! into a single error flash message, and answered with a redirect back to the
//! request URI. Store and render failures propagate to the shell.
//!
//! Read requests skip dispatch and go straight to page assembly.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use tracing::{debug, error, warn};

use crate::app::App;
use crate::services::bookmark_service::BookmarkServiceTrait;
use crate::services::group_service::GroupServiceTrait;
use crate::services::page_assembler::PageAssembler;
use crate::types::bookmark::DeleteOutcome;
use crate::types::errors::{FatalError, LinkError, StoreError};
use crate::types::http::{Request, Response, RouteTarget};
use crate::types::page::PageRequest;

/// The six mutations a write request can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddBookmark,
    EditBookmark,
    DeleteBookmark,
    AddGroup,
    EditGroup,
    DeleteGroup,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::AddBookmark => "add_bookmark",
            Action::EditBookmark => "edit_bookmark",
            Action::DeleteBookmark => "delete_bookmark",
            Action::AddGroup => "add_group",
            Action::EditGroup => "edit_group",
            Action::DeleteGroup => "delete_group",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add_bookmark" => Ok(Action::AddBookmark),
            "edit_bookmark" => Ok(Action::EditBookmark),
            "delete_bookmark" => Ok(Action::DeleteBookmark),
            "add_group" => Ok(Action::AddGroup),
            "edit_group" => Ok(Action::EditGroup),
            "delete_group" => Ok(Action::DeleteGroup),
            other => Err(LinkError::validation(format!("Unknown action: {}", other))),
        }
    }
}

/// A successful mutation: where to send the browser and what to tell the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub target: RouteTarget,
    pub message: &'static str,
}

impl Outcome {
    fn new(target: RouteTarget, message: &'static str) -> Self {
        Self { target, message }
    }
}

/// Handles one exchange end to end.
pub fn handle_request(app: &mut App, request: &Request) -> Result<Response, FatalError> {
    if request.method.is_mutating() {
        Ok(handle_mutation(app, request)?)
    } else {
        render_page(app, request)
    }
}

/// Parses the action, dispatches it, and converts the result into a redirect plus
/// exactly one flash message. Only store failures escape.
pub fn handle_mutation(app: &mut App, request: &Request) -> Result<Response, StoreError> {
    let result = request
        .text("action")
        .parse::<Action>()
        .and_then(|action| {
            debug!(%action, uri = %request.uri, "dispatching");
            dispatch(&*app, action, request)
        });

    match result {
        Ok(outcome) => {
            app.flash.queue(&request.session).success(outcome.message);
            Ok(Response::redirect(&outcome.target))
        }
        Err(LinkError::Store(e)) => {
            error!(error = %e, uri = %request.uri, "store failure while handling mutation");
            Err(e)
        }
        Err(e) => {
            warn!(kind = ?e.kind(), error = %e, "mutation rejected");
            app.flash.queue(&request.session).error(e.to_string());
            Ok(Response::redirect(&RouteTarget::Uri(request.uri.clone())))
        }
    }
}

/// Runs a single domain operation with the action's form fields.
pub fn dispatch(app: &App, action: Action, request: &Request) -> Result<Outcome, LinkError> {
    let bookmarks = app.bookmarks();
    let groups = app.groups();

    match action {
        Action::AddBookmark => {
            let placed = bookmarks.add_bookmark(
                request.id("group_id"),
                request.text("url"),
                request.text("title"),
                request.text("description"),
            )?;
            Ok(Outcome::new(RouteTarget::Group(placed.group_id), "Bookmark added successfully"))
        }
        Action::EditBookmark => {
            let placed = bookmarks.edit_bookmark(
                request.id("bookmark_id"),
                request.id("group_id"),
                request.text("url"),
                request.text("title"),
                request.text("description"),
            )?;
            Ok(Outcome::new(RouteTarget::Group(placed.group_id), "Bookmark updated successfully"))
        }
        Action::DeleteBookmark => {
            match bookmarks.delete_bookmark(request.id("bookmark_id"), request.id("group_id"))? {
                DeleteOutcome::GroupCascaded { .. } => Ok(Outcome::new(
                    RouteTarget::NoGroup,
                    "Bookmark and empty group deleted successfully",
                )),
                DeleteOutcome::Removed { redirect_group } => Ok(Outcome::new(
                    RouteTarget::Group(redirect_group),
                    "Bookmark deleted successfully",
                )),
            }
        }
        Action::AddGroup => {
            let id = groups.add_group(request.text("group_name"), request.text("group_description"))?;
            Ok(Outcome::new(RouteTarget::Group(id), "Group added successfully"))
        }
        Action::EditGroup => {
            let id = request.id("group_id");
            groups.edit_group(id, request.text("group_name"), request.text("group_description"))?;
            Ok(Outcome::new(RouteTarget::Group(id), "Group updated successfully"))
        }
        Action::DeleteGroup => {
            groups.delete_group(request.id("group_id"))?;
            Ok(Outcome::new(RouteTarget::NoGroup, "Group deleted successfully"))
        }
    }
}

/// Assembles the page for a read request, consuming the session's flash messages.
pub fn render_page(app: &mut App, request: &Request) -> Result<Response, FatalError> {
    let started = Instant::now();
    let page_request = PageRequest {
        group: request.query.get("group").cloned(),
        search: request.query.get("search").cloned(),
    };

    let assembler = PageAssembler::new(app.db.connection(), &app.config);
    let html = assembler
        .assemble(
            &page_request,
            &mut app.flash,
            &request.session,
            app.renderer.as_ref(),
            app.compositor.as_ref(),
            started,
        )
        .inspect_err(|e| error!(error = %e, uri = %request.uri, "page assembly failed"))?;

    Ok(Response::Page { html })
}
