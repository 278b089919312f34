//! Section templates rendered from the JSON view context.
//!
//! Every value taken from the context is HTML-escaped on output.

use serde_json::Value;

use crate::services::page_assembler::{escape_html, Renderer};
use crate::types::errors::RenderError;

/// Renders the link manager's section templates.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for TemplateRenderer {
    fn render(&self, template: &str, context: &Value) -> Result<String, RenderError> {
        let html = match template {
            "header" => header(context),
            "sidebar" => sidebar(context),
            "sidebar_content" => sidebar_content(context),
            "main_content" => main_content(context),
            "footer" => footer(context),
            "modals" => modals(context),
            other => return Err(RenderError::UnknownTemplate(other.to_string())),
        };
        Ok(html)
    }
}

fn text<'v>(v: &'v Value, key: &str) -> &'v str {
    v.get(key).and_then(Value::as_str).unwrap_or("")
}

fn int(v: &Value, key: &str) -> i64 {
    v.get(key).and_then(Value::as_i64).unwrap_or(0)
}

fn list<'v>(v: &'v Value, key: &str) -> &'v [Value] {
    v.get(key).and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[])
}

fn e(v: &Value, key: &str) -> String {
    escape_html(text(v, key))
}

/// Escapes and turns newlines into `<br />`.
fn nl2br(input: &str) -> String {
    escape_html(input).replace('\n', "<br />\n")
}

fn is_current(ctx: &Value, group_id: i64) -> bool {
    text(ctx, "current_group") == group_id.to_string()
}

fn header(ctx: &Value) -> String {
    let query = e(ctx, "search_query");
    let mut html = String::with_capacity(2048);
    html.push_str("<header class=\"bg-white shadow-sm sticky-top py-3 mb-4\"><div class=\"container-fluid\">");
    html.push_str("<div class=\"d-flex flex-wrap align-items-center justify-content-between\">");
    html.push_str("<div class=\"d-flex align-items-center\">");
    html.push_str("<button class=\"btn btn-outline-secondary d-md-none me-3\" type=\"button\" data-bs-toggle=\"offcanvas\" data-bs-target=\"#offcanvasNav\" aria-controls=\"offcanvasNav\" aria-label=\"Toggle navigation\"><i class=\"bi bi-list fs-5\"></i></button>");
    html.push_str("<a href=\"/\" class=\"text-decoration-none text-dark\"><h1 class=\"h4 mb-0\">&#128218; Bookmark Manager</h1></a></div>");
    html.push_str("<div class=\"col-12 col-md-auto mt-2 mt-md-0 ms-md-auto\" style=\"max-width: 450px;\">");
    html.push_str("<form class=\"d-flex\" method=\"GET\" action=\"\">");
    html.push_str(&format!(
        "<input class=\"form-control me-2\" type=\"search\" name=\"search\" placeholder=\"Search bookmarks...\" value=\"{}\" aria-label=\"Search\">",
        query
    ));
    html.push_str("<button class=\"btn btn-outline-primary\" type=\"submit\" aria-label=\"Search\"><i class=\"bi bi-search\"></i></button>");
    if !query.is_empty() {
        html.push_str("<a href=\"/\" class=\"btn btn-outline-secondary ms-2\" aria-label=\"Clear search\"><i class=\"bi bi-x\"></i></a>");
    }
    html.push_str("</form></div></div></div></header>");

    html.push_str("<div class=\"offcanvas offcanvas-start d-md-none\" tabindex=\"-1\" id=\"offcanvasNav\" aria-labelledby=\"offcanvasNavLabel\">");
    html.push_str("<div class=\"offcanvas-header\"><h5 class=\"offcanvas-title\" id=\"offcanvasNavLabel\">Navigation</h5>");
    html.push_str("<button type=\"button\" class=\"btn-close\" data-bs-dismiss=\"offcanvas\" aria-label=\"Close\"></button></div>");
    html.push_str("<div class=\"offcanvas-body p-0\">");
    html.push_str(&sidebar_content(ctx));
    html.push_str("</div></div>");
    html
}

fn sidebar(ctx: &Value) -> String {
    format!("<div class=\"d-none d-md-block\">{}</div>", sidebar_content(ctx))
}

fn sidebar_content(ctx: &Value) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<div class=\"card shadow-sm border-0 h-100\">");
    html.push_str("<div class=\"card-header bg-body-tertiary text-secondary text-uppercase fw-semibold d-flex align-items-center\"><i class=\"bi bi-book me-2\"></i>Groups</div>");
    html.push_str("<div class=\"card-body p-0\"><div class=\"d-grid p-3 gap-2\">");
    html.push_str("<button type=\"button\" class=\"btn btn-primary\" data-bs-toggle=\"modal\" data-bs-target=\"#addGroupModal\"><i class=\"bi bi-plus-lg me-2\"></i>Add Group</button>");
    html.push_str("<button type=\"button\" class=\"btn btn-success\" data-bs-toggle=\"modal\" data-bs-target=\"#addBookmarkModal\"><i class=\"bi bi-bookmark-plus me-2\"></i>Add Bookmark</button>");
    html.push_str("</div><ul class=\"list-group list-group-flush\">");

    for group in list(ctx, "groups") {
        let id = int(group, "id");
        let count = int(group, "bookmark_count");
        let active = if is_current(ctx, id) { "fw-bold text-primary" } else { "" };

        html.push_str("<li class=\"list-group-item d-flex justify-content-between align-items-center position-relative\">");
        html.push_str(&format!(
            "<a href=\"?group={}\" class=\"text-decoration-none text-body flex-grow-1 pe-2 stretched-link {}\">{}",
            id,
            active,
            e(group, "name")
        ));
        if count > 0 {
            html.push_str(&format!(
                "<span class=\"badge bg-secondary rounded-pill ms-2\">{}</span>",
                count
            ));
        }
        html.push_str("</a><div class=\"btn-group-action ms-2\" style=\"position: relative; z-index: 2;\">");
        if count == 0 {
            html.push_str("<form method=\"POST\" class=\"d-inline\" onsubmit=\"return confirm('Delete this empty group?');\">");
            html.push_str("<input type=\"hidden\" name=\"action\" value=\"delete_group\">");
            html.push_str(&format!("<input type=\"hidden\" name=\"group_id\" value=\"{}\">", id));
            html.push_str("<button type=\"submit\" class=\"btn btn-sm btn-outline-danger\" aria-label=\"Delete group\"><i class=\"bi bi-trash\"></i></button></form>");
        }
        html.push_str(&format!(
            "<button type=\"button\" class=\"btn btn-sm btn-outline-secondary\" data-bs-toggle=\"modal\" data-bs-target=\"#editGroupModal\" data-group-id=\"{}\" data-group-name=\"{}\" data-group-description=\"{}\" aria-label=\"Edit group\"><i class=\"bi bi-pencil\"></i></button>",
            id,
            e(group, "name"),
            e(group, "description")
        ));
        html.push_str("</div></li>");
    }

    html.push_str("</ul></div></div>");
    html
}

fn flash_alerts(ctx: &Value) -> String {
    let mut html = String::new();
    for message in list(ctx, "flash_messages") {
        let class = if text(message, "kind") == "error" { "danger" } else { "success" };
        html.push_str(&format!(
            "<div class=\"alert alert-{} alert-dismissible fade show\" role=\"alert\">{}<button type=\"button\" class=\"btn-close\" data-bs-dismiss=\"alert\" aria-label=\"Close\"></button></div>",
            class,
            e(message, "text")
        ));
    }
    html
}

fn bookmark_table(bookmarks: &[Value], group_id: i64) -> String {
    let mut html = String::with_capacity(1024 + bookmarks.len() * 1024);
    html.push_str("<div class=\"table-responsive\"><table class=\"table table-hover align-middle\">");
    html.push_str("<thead class=\"bg-body-tertiary text-secondary text-uppercase\"><tr>");
    html.push_str("<th class=\"fw-semibold\" style=\"width: 80px;\">Delete</th><th class=\"fw-semibold\" style=\"width: 80px;\">Edit</th>");
    html.push_str("<th class=\"fw-semibold\">Title</th><th class=\"fw-semibold\">Description</th></tr></thead><tbody>");

    for bookmark in bookmarks {
        let id = int(bookmark, "id");
        let title = e(bookmark, "title");
        html.push_str("<tr><td>");
        html.push_str("<form method=\"POST\" class=\"d-inline\" onsubmit=\"return confirm('Delete this bookmark?');\">");
        html.push_str("<input type=\"hidden\" name=\"action\" value=\"delete_bookmark\">");
        html.push_str(&format!("<input type=\"hidden\" name=\"bookmark_id\" value=\"{}\">", id));
        html.push_str(&format!("<input type=\"hidden\" name=\"group_id\" value=\"{}\">", group_id));
        html.push_str(&format!(
            "<button type=\"submit\" class=\"btn btn-danger btn-sm\" aria-label=\"Delete '{}'\"><i class=\"bi bi-trash\"></i></button></form></td>",
            title
        ));
        html.push_str(&format!(
            "<td><button type=\"button\" class=\"btn btn-warning btn-sm\" data-bs-toggle=\"modal\" data-bs-target=\"#editBookmarkModal\" data-bookmark-id=\"{}\" data-bookmark-title=\"{}\" data-bookmark-url=\"{}\" data-bookmark-description=\"{}\" data-bookmark-group=\"{}\" aria-label=\"Edit '{}'\"><i class=\"bi bi-pencil\"></i></button></td>",
            id,
            title,
            e(bookmark, "url"),
            e(bookmark, "description"),
            group_id,
            title
        ));
        html.push_str(&format!(
            "<td><a href=\"{}\" target=\"_blank\" class=\"text-decoration-none fw-medium\">{}</a></td>",
            e(bookmark, "url"),
            title
        ));
        html.push_str(&format!("<td>{}</td></tr>", nl2br(text(bookmark, "description"))));
    }

    html.push_str("</tbody></table></div>");
    html
}

fn card_open(icon: &str, heading: &str) -> String {
    format!(
        "<div class=\"card shadow-sm border-0\"><div class=\"card-header bg-body-tertiary text-secondary text-uppercase fw-semibold d-flex align-items-center\"><i class=\"bi {} me-2\"></i>{}</div><div class=\"card-body\">",
        icon, heading
    )
}

fn empty_state(icon: &str, message: &str) -> String {
    format!(
        "<div class=\"text-center py-5\"><i class=\"bi {} fs-1 text-muted mb-3\"></i><p class=\"text-muted\">{}</p></div>",
        icon, message
    )
}

fn main_content(ctx: &Value) -> String {
    let mut html = String::with_capacity(8192);
    html.push_str("<main class=\"p-4\">");
    html.push_str(&flash_alerts(ctx));

    let is_searching = ctx.get("is_searching").and_then(Value::as_bool).unwrap_or(false);
    let selected = ctx.get("selected_group").filter(|g| !g.is_null());

    if is_searching {
        html.push_str(&card_open("bi-search", "Search Results"));
        html.push_str(&format!(
            "<p class=\"mb-3\">Search results for: <strong>{}</strong></p>",
            e(ctx, "search_query")
        ));
        let results = list(ctx, "search_results");
        if results.is_empty() {
            html.push_str(&empty_state("bi-search", "No bookmarks found matching your search."));
        }
        for result in results {
            let bookmarks = list(result, "bookmarks");
            html.push_str(&format!(
                "<h5 class=\"fw-bold text-primary mb-2 mt-4\">{} ({})</h5>",
                e(result, "group_name"),
                bookmarks.len()
            ));
            html.push_str(&bookmark_table(bookmarks, int(result, "group_id")));
        }
        html.push_str("</div></div>");
    } else if let Some(group) = selected {
        html.push_str(&card_open("bi-folder", &e(group, "name")));
        if !text(group, "description").is_empty() {
            html.push_str(&format!("<p class=\"text-muted mb-4\">{}</p>", e(group, "description")));
        }
        let bookmarks = list(ctx, "bookmarks");
        if bookmarks.is_empty() {
            html.push_str(&empty_state("bi-bookmark", "No bookmarks in this group yet."));
        } else {
            html.push_str(&bookmark_table(bookmarks, int(group, "id")));
        }
        html.push_str("</div></div>");
    } else {
        html.push_str("<div class=\"card shadow-sm border-0 text-center py-5\"><div class=\"card-body\">");
        html.push_str("<i class=\"bi bi-arrow-left fs-1 text-muted mb-3 d-none d-md-inline-block\"></i>");
        html.push_str("<i class=\"bi bi-list fs-1 text-muted mb-3 d-md-none\"></i>");
        html.push_str("<p class=\"text-muted fs-5 d-none d-md-block\">Select a group to get started.</p>");
        html.push_str("<p class=\"text-muted fs-5 d-md-none\">Select a group from the menu to get started.</p>");
        html.push_str("</div></div>");
    }

    html.push_str("</main>");
    html
}

fn footer(ctx: &Value) -> String {
    format!(
        "<footer class=\"bg-light border-top py-3 mt-4\"><div class=\"container-fluid\"><div class=\"row\"><div class=\"col text-center text-muted small\">Time: {}s</div></div></div></footer>",
        e(ctx, "time")
    )
}

fn modal(id: &str, title: &str, action: &str, body: &str, submit: &str) -> String {
    format!(
        "<div class=\"modal fade\" id=\"{id}\" tabindex=\"-1\" aria-labelledby=\"{id}Label\" aria-hidden=\"true\"><div class=\"modal-dialog\"><div class=\"modal-content\">\
<div class=\"modal-header bg-primary text-white\"><h5 class=\"modal-title\" id=\"{id}Label\">{title}</h5><button type=\"button\" class=\"btn-close btn-close-white\" data-bs-dismiss=\"modal\" aria-label=\"Close\"></button></div>\
<form method=\"POST\"><div class=\"modal-body\"><input type=\"hidden\" name=\"action\" value=\"{action}\">{body}</div>\
<div class=\"modal-footer\"><button type=\"button\" class=\"btn btn-secondary\" data-bs-dismiss=\"modal\">Cancel</button><button type=\"submit\" class=\"btn btn-primary\">{submit}</button></div></form>\
</div></div></div>"
    )
}

fn field(id: &str, label: &str, control: &str) -> String {
    format!("<div class=\"mb-3\"><label for=\"{}\" class=\"form-label\">{}</label>{}</div>", id, label, control)
}

fn group_options(ctx: &Value, mark_current: bool) -> String {
    let mut html = String::new();
    for group in list(ctx, "groups") {
        let id = int(group, "id");
        let selected = if mark_current && is_current(ctx, id) { " selected" } else { "" };
        html.push_str(&format!("<option value=\"{}\"{}>{}</option>", id, selected, e(group, "name")));
    }
    html
}

fn modals(ctx: &Value) -> String {
    let add_bookmark = [
        field(
            "addBookmarkGroup",
            "Group *",
            &format!(
                "<select name=\"group_id\" id=\"addBookmarkGroup\" class=\"form-select\" required><option value=\"\">Select a group</option>{}</select>",
                group_options(ctx, true)
            ),
        ),
        field("addBookmarkUrl", "URL *", "<input type=\"url\" name=\"url\" id=\"addBookmarkUrl\" class=\"form-control\" placeholder=\"https://example.com\" required>"),
        field("addBookmarkTitle", "Title *", "<input type=\"text\" name=\"title\" id=\"addBookmarkTitle\" class=\"form-control\" placeholder=\"Bookmark title\" required>"),
        field("addBookmarkDescription", "Description", "<textarea name=\"description\" id=\"addBookmarkDescription\" class=\"form-control\" placeholder=\"Optional description\" rows=\"3\"></textarea>"),
    ]
    .concat();

    let edit_bookmark = [
        "<input type=\"hidden\" id=\"editBookmarkId\" name=\"bookmark_id\">".to_string(),
        field(
            "editBookmarkGroup",
            "Group *",
            &format!(
                "<select name=\"group_id\" id=\"editBookmarkGroup\" class=\"form-select\" required>{}</select>",
                group_options(ctx, false)
            ),
        ),
        field("editBookmarkUrl", "URL *", "<input type=\"url\" name=\"url\" id=\"editBookmarkUrl\" class=\"form-control\" required>"),
        field("editBookmarkTitle", "Title *", "<input type=\"text\" name=\"title\" id=\"editBookmarkTitle\" class=\"form-control\" required>"),
        field("editBookmarkDescription", "Description", "<textarea name=\"description\" id=\"editBookmarkDescription\" class=\"form-control\" rows=\"3\"></textarea>"),
    ]
    .concat();

    let add_group = [
        field("addGroupName", "Group Name *", "<input type=\"text\" name=\"group_name\" id=\"addGroupName\" class=\"form-control\" required>"),
        field("addGroupDescription", "Description", "<textarea name=\"group_description\" id=\"addGroupDescription\" class=\"form-control\" rows=\"2\"></textarea>"),
    ]
    .concat();

    let edit_group = [
        "<input type=\"hidden\" id=\"editGroupId\" name=\"group_id\">".to_string(),
        field("editGroupName", "Group Name *", "<input type=\"text\" name=\"group_name\" id=\"editGroupName\" class=\"form-control\" required>"),
        field("editGroupDescription", "Description", "<textarea name=\"group_description\" id=\"editGroupDescription\" class=\"form-control\" rows=\"2\"></textarea>"),
    ]
    .concat();

    [
        modal("addBookmarkModal", "Add Bookmark", "add_bookmark", &add_bookmark, "Add Bookmark"),
        modal("editBookmarkModal", "Edit Bookmark", "edit_bookmark", &edit_bookmark, "Save Changes"),
        modal("addGroupModal", "Add New Group", "add_group", &add_group, "Add Group"),
        modal("editGroupModal", "Edit Group", "edit_group", &edit_group, "Save Changes"),
    ]
    .concat()
}
