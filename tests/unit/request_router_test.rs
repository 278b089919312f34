//! Unit tests for the request router: action dispatch, redirects and flash
//! messages, and the read path.

use linkmanager::app::App;
use linkmanager::config::AppConfig;
use linkmanager::request_router::*;
use linkmanager::services::group_service::GroupServiceTrait;
use linkmanager::services::page_assembler::Renderer;
use linkmanager::types::errors::{FatalError, LinkError, RenderError};
use linkmanager::types::flash::FlashKind;
use linkmanager::types::http::{Method, Request, Response};
use linkmanager::ui::page_builder::PageBuilder;
use rstest::rstest;
use serde_json::Value;

const SESSION: &str = "s1";

fn setup() -> App {
    App::in_memory(AppConfig::default()).expect("Failed to create in-memory app")
}

struct FailingRenderer;

impl Renderer for FailingRenderer {
    fn render(&self, template: &str, _context: &Value) -> Result<String, RenderError> {
        Err(RenderError::UnknownTemplate(template.to_string()))
    }
}

fn post(action: &str) -> Request {
    Request::post("/?group=1").with_session(SESSION).with_field("action", action)
}

fn location(response: &Response) -> &str {
    match response {
        Response::Redirect { location } => location,
        Response::Page { .. } => panic!("expected a redirect, got a page"),
    }
}

fn html(response: &Response) -> &str {
    match response {
        Response::Page { html } => html,
        Response::Redirect { .. } => panic!("expected a page, got a redirect"),
    }
}

fn add_group(app: &mut App, name: &str) -> i64 {
    let response = handle_request(app, &post("add_group").with_field("group_name", name)).unwrap();
    location(&response).trim_start_matches("?group=").parse().unwrap()
}

fn add_bookmark(app: &mut App, group_id: i64, title: &str) {
    let request = post("add_bookmark")
        .with_field("group_id", &group_id.to_string())
        .with_field("url", "https://example.com")
        .with_field("title", title);
    handle_request(app, &request).unwrap();
}

// === Action parsing ===

#[rstest]
#[case("add_bookmark", Action::AddBookmark)]
#[case("edit_bookmark", Action::EditBookmark)]
#[case("delete_bookmark", Action::DeleteBookmark)]
#[case("add_group", Action::AddGroup)]
#[case("edit_group", Action::EditGroup)]
#[case("delete_group", Action::DeleteGroup)]
fn actions_parse_from_their_names(#[case] name: &str, #[case] expected: Action) {
    assert_eq!(name.parse::<Action>().unwrap(), expected);
    assert_eq!(expected.to_string(), name);
}

#[test]
fn unknown_action_is_a_validation_error() {
    let err = "frobnicate".parse::<Action>().unwrap_err();
    assert!(matches!(err, LinkError::Validation(ref m) if m == "Unknown action: frobnicate"));
}

#[rstest]
#[case(Method::Get, false)]
#[case(Method::Head, false)]
#[case(Method::Post, true)]
#[case(Method::Put, true)]
#[case(Method::Patch, true)]
#[case(Method::Delete, true)]
fn only_writes_are_mutating(#[case] method: Method, #[case] mutating: bool) {
    assert_eq!(method.is_mutating(), mutating);
}

// === Mutations ===

#[test]
fn add_group_redirects_to_new_group_with_success_flash() {
    let mut app = setup();
    let response = handle_request(&mut app, &post("add_group").with_field("group_name", "Work")).unwrap();

    assert_eq!(response.status(), 303);
    assert_eq!(location(&response), "?group=1");

    let messages = app.flash.take(SESSION);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].kind, FlashKind::Success);
    assert_eq!(messages[0].text, "Group added successfully");
}

#[test]
fn unknown_action_redirects_back_with_error_flash() {
    let mut app = setup();
    let response = handle_request(&mut app, &post("frobnicate")).unwrap();

    assert_eq!(location(&response), "/?group=1");
    let messages = app.flash.take(SESSION);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].kind, FlashKind::Error);
    assert_eq!(messages[0].text, "Unknown action: frobnicate");
}

#[test]
fn missing_action_is_unknown() {
    let mut app = setup();
    let request = Request::post("/").with_session(SESSION);
    let response = handle_request(&mut app, &request).unwrap();

    assert_eq!(location(&response), "/");
    assert_eq!(app.flash.take(SESSION)[0].text, "Unknown action: ");
}

#[test]
fn duplicate_group_redirects_back_with_conflict_message() {
    let mut app = setup();
    add_group(&mut app, "Work");
    app.flash.take(SESSION);

    let response = handle_request(&mut app, &post("add_group").with_field("group_name", "Work")).unwrap();
    assert_eq!(location(&response), "/?group=1");

    let messages = app.flash.take(SESSION);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].kind, FlashKind::Error);
    assert_eq!(messages[0].text, "A group with this name already exists");
}

#[test]
fn deleting_the_only_bookmark_removes_its_group() {
    let mut app = setup();
    let work = add_group(&mut app, "Work");
    add_bookmark(&mut app, work, "Gmail");
    app.flash.take(SESSION);

    let request = post("delete_bookmark")
        .with_field("bookmark_id", "1")
        .with_field("group_id", &work.to_string());
    let response = handle_request(&mut app, &request).unwrap();

    assert_eq!(location(&response), "/");
    let messages = app.flash.take(SESSION);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, "Bookmark and empty group deleted successfully");
    assert!(app.groups().list_groups_with_counts().unwrap().is_empty());
}

#[test]
fn deleting_one_of_several_bookmarks_returns_to_the_group() {
    let mut app = setup();
    let work = add_group(&mut app, "Work");
    add_bookmark(&mut app, work, "Gmail");
    add_bookmark(&mut app, work, "Jira");
    app.flash.take(SESSION);

    let request = post("delete_bookmark")
        .with_field("bookmark_id", "1")
        .with_field("group_id", &work.to_string());
    let response = handle_request(&mut app, &request).unwrap();

    assert_eq!(location(&response), format!("?group={}", work));
    assert_eq!(app.flash.take(SESSION)[0].text, "Bookmark deleted successfully");
}

#[test]
fn editing_a_missing_bookmark_flashes_one_error_only() {
    let mut app = setup();
    let work = add_group(&mut app, "Work");
    app.flash.take(SESSION);

    let request = post("edit_bookmark")
        .with_field("bookmark_id", "5")
        .with_field("group_id", &work.to_string())
        .with_field("url", "https://x.io")
        .with_field("title", "X");
    handle_request(&mut app, &request).unwrap();

    let queue = app.flash.queue(SESSION);
    assert_eq!(queue.count(FlashKind::Error), 1);
    assert_eq!(queue.count(FlashKind::Success), 0);
}

#[test]
fn edit_and_delete_group_round_trip() {
    let mut app = setup();
    let work = add_group(&mut app, "Work");
    let id = work.to_string();

    let edit = post("edit_group")
        .with_field("group_id", &id)
        .with_field("group_name", "Job")
        .with_field("group_description", "day job");
    let response = handle_request(&mut app, &edit).unwrap();
    assert_eq!(location(&response), format!("?group={}", work));

    let delete = post("delete_group").with_field("group_id", &id);
    let response = handle_request(&mut app, &delete).unwrap();
    assert_eq!(location(&response), "/");

    let texts: Vec<String> = app.flash.take(SESSION).into_iter().map(|m| m.text).collect();
    assert_eq!(
        texts,
        vec![
            "Group added successfully",
            "Group updated successfully",
            "Group deleted successfully"
        ]
    );
}

#[test]
fn store_failure_propagates_without_flash() {
    let mut app = setup();
    let work = add_group(&mut app, "Work");
    app.flash.take(SESSION);
    app.db.connection().execute_batch("DROP TABLE bookmarks").unwrap();

    let request = post("add_bookmark")
        .with_field("group_id", &work.to_string())
        .with_field("url", "https://x.io")
        .with_field("title", "X");
    let result = handle_request(&mut app, &request);

    assert!(matches!(result, Err(FatalError::Store(_))));
    assert_eq!(app.flash.pending_sessions(), 0);
}

// === Reads ===

#[test]
fn page_shows_and_consumes_flash() {
    let mut app = setup();
    let work = add_group(&mut app, "Work");
    let read = Request::get("/")
        .with_session(SESSION)
        .with_query("group", &work.to_string());

    let first = handle_request(&mut app, &read).unwrap();
    assert_eq!(first.status(), 200);
    assert!(html(&first).contains("Group added successfully"));
    assert!(html(&first).contains("<title>Group: Work</title>"));

    let second = handle_request(&mut app, &read).unwrap();
    assert!(!html(&second).contains("Group added successfully"));
}

#[test]
fn flash_is_scoped_to_its_session() {
    let mut app = setup();
    add_group(&mut app, "Work");

    let other = handle_request(&mut app, &Request::get("/").with_session("s2")).unwrap();
    assert!(!html(&other).contains("Group added successfully"));
    assert_eq!(app.flash.pending(SESSION).len(), 1);
    assert_eq!(app.flash.pending_sessions(), 1);
}

#[test]
fn reads_do_not_accumulate_session_entries() {
    let mut app = setup();
    for i in 0..500 {
        let read = Request::get("/").with_session(&format!("visitor-{}", i));
        handle_request(&mut app, &read).unwrap();
    }
    assert_eq!(app.flash.pending_sessions(), 0);

    add_group(&mut app, "Work");
    assert_eq!(app.flash.pending_sessions(), 1);
    handle_request(&mut app, &Request::get("/").with_session(SESSION)).unwrap();
    assert_eq!(app.flash.pending_sessions(), 0);
}

#[test]
fn render_failure_keeps_flash_for_the_next_read() {
    let mut app = setup().with_presentation(Box::new(FailingRenderer), Box::new(PageBuilder::new()));
    add_group(&mut app, "Work");

    let result = handle_request(&mut app, &Request::get("/").with_session(SESSION));
    assert!(matches!(result, Err(FatalError::Render(RenderError::UnknownTemplate(_)))));

    let pending = app.flash.pending(SESSION);
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].text, "Group added successfully");
}

#[test]
fn search_page_escapes_the_query() {
    let mut app = setup();
    let read = Request::get("/").with_query("search", "<script>alert(1)</script>");
    let response = handle_request(&mut app, &read).unwrap();

    let page = html(&response);
    assert!(!page.contains("<script>alert(1)"));
    assert!(page.contains("Search Results: &lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[test]
fn dispatch_reports_domain_errors_directly() {
    let app = setup();
    let err = dispatch(&app, Action::DeleteGroup, &post("delete_group").with_field("group_id", "3"))
        .unwrap_err();
    assert!(matches!(err, LinkError::NotFound(_)));
}
