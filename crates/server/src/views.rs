//! Server-rendered HTML pages.

use std::fmt::Write;

use service::warehouses::WarehouseRecord;

use crate::flash::Flash;

/// Escape text for use inside HTML element content and quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, flashes: &[Flash], body: &str) -> String {
    let mut messages = String::new();
    for f in flashes {
        let _ = write!(
            messages,
            r#"<div class="flash flash-{}">{}</div>"#,
            f.kind.as_str(),
            escape(&f.message)
        );
    }
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Warehouse Manager</title>
</head>
<body>
<header><h1><a href="/">Warehouse Manager</a></h1></header>
<div class="messages">{messages}</div>
<main>
<h2>{title}</h2>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}

pub fn index(records: &[WarehouseRecord], flashes: &[Flash]) -> String {
    let mut body = String::from(r#"<p><a class="button" href="/create">Create warehouse</a></p>"#);
    if records.is_empty() {
        body.push_str(r#"<p class="empty">No warehouses yet.</p>"#);
        return layout("Warehouses", flashes, &body);
    }
    body.push_str(
        "<table>\n<thead><tr><th>ID</th><th>Name</th><th>Capacity</th><th>Balance</th>\
         <th>Available space</th><th>Fill</th><th>Actions</th></tr></thead>\n<tbody>\n",
    );
    for r in records {
        let w = &r.warehouse;
        let _ = write!(
            body,
            r#"<tr><td>{id}</td><td>{name}</td><td>{capacity}</td><td>{balance}</td><td>{available}</td><td>{fill:.1}%</td><td><a href="/edit/{id}">Edit</a> <a href="/add/{id}">Add</a> <a href="/take/{id}">Take</a> <form method="post" action="/delete/{id}" style="display:inline"><button type="submit">Delete</button></form></td></tr>
"#,
            id = r.id,
            name = escape(&r.name),
            capacity = w.capacity(),
            balance = w.balance(),
            available = w.available(),
            fill = w.fill_percent(),
        );
    }
    body.push_str("</tbody>\n</table>");
    layout("Warehouses", flashes, &body)
}

pub fn create_form(flashes: &[Flash]) -> String {
    let body = r#"<form method="post" action="/create">
<label>Name <input type="text" name="name" required></label>
<label>Capacity <input type="number" name="capacity" step="any" min="0" required></label>
<label>Initial balance <input type="number" name="initial_balance" step="any" min="0" value="0"></label>
<button type="submit">Create</button> <a href="/">Cancel</a>
</form>"#;
    layout("Create warehouse", flashes, body)
}

pub fn edit_form(record: &WarehouseRecord, flashes: &[Flash]) -> String {
    let body = format!(
        r#"<form method="post" action="/edit/{id}">
<label>Name <input type="text" name="name" value="{name}" required></label>
<button type="submit">Save</button> <a href="/">Cancel</a>
</form>"#,
        id = record.id,
        name = escape(&record.name),
    );
    layout(&format!("Edit {}", record.name), flashes, &body)
}

/// Shared form for the add and take pages.
fn amount_form(action: &str, verb: &str, record: &WarehouseRecord, flashes: &[Flash]) -> String {
    let body = format!(
        r#"<p class="state">{state}</p>
<form method="post" action="/{action}/{id}">
<label>Amount <input type="number" name="amount" step="any" min="0" required></label>
<button type="submit">{verb}</button> <a href="/">Cancel</a>
</form>"#,
        state = escape(&record.warehouse.to_string()),
        id = record.id,
    );
    layout(&format!("{verb} items: {}", record.name), flashes, &body)
}

pub fn add_form(record: &WarehouseRecord, flashes: &[Flash]) -> String {
    amount_form("add", "Add", record, flashes)
}

pub fn take_form(record: &WarehouseRecord, flashes: &[Flash]) -> String {
    amount_form("take", "Take", record, flashes)
}
