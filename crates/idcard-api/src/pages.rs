//! # HTML Pages
//!
//! Minimal server-rendered pages: the public submission form, the admin
//! password prompt, and the admin entry table. Every interpolated value
//! passes through [`escape`].

use std::fmt::Write;

use idcard_core::Entry;

use crate::session::Flash;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

fn layout(title: &str, flashes: &[Flash], body: &str) -> String {
    let mut notices = String::new();
    for flash in flashes {
        let _ = writeln!(
            notices,
            r#"<div class="alert alert-{}">{}</div>"#,
            flash.kind.as_str(),
            escape(&flash.message)
        );
    }
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n<main>\n<h1>{title}</h1>\n{notices}{body}</main>\n</body>\n</html>\n",
        title = escape(title),
    )
}

/// Public ID-card request form.
pub fn submission_form(flashes: &[Flash]) -> String {
    let inputs = [
        ("full_name", "Full name"),
        ("registration_number", "Registration number"),
        ("roll_number", "Roll number"),
        ("session", "Session"),
        ("mobile_number", "Mobile number"),
        ("blood_group", "Blood group"),
    ];

    let mut body = String::from(
        "<form method=\"post\" action=\"/submit\" enctype=\"multipart/form-data\">\n",
    );
    for (name, label) in inputs {
        let _ = writeln!(
            body,
            r#"<label>{label} <input type="text" name="{name}" required></label><br>"#
        );
    }
    body.push_str(
        "<label>Photo <input type=\"file\" name=\"photo_file\" \
         accept=\".png,.jpg,.jpeg,.gif,.webp\" required></label><br>\n\
         <button type=\"submit\">Submit</button>\n</form>\n",
    );

    layout("ID Card Request", flashes, &body)
}

/// Admin password prompt.
pub fn admin_login(flashes: &[Flash]) -> String {
    let body = "<form method=\"post\" action=\"/admin\">\n\
                <label>Password <input type=\"password\" name=\"password\" required></label>\n\
                <button type=\"submit\">Unlock</button>\n</form>\n";
    layout("Admin Login", flashes, body)
}

/// Admin table listing every entry in store order.
pub fn admin_entries(entries: &[Entry], flashes: &[Flash]) -> String {
    let mut body = format!("<p>{} submission(s)</p>\n", entries.len());
    body.push_str(
        "<table>\n<thead><tr><th>#</th><th>Full name</th><th>Registration</th><th>Roll</th>\
         <th>Session</th><th>Mobile</th><th>Blood group</th><th>Photo</th></tr></thead>\n<tbody>\n",
    );
    for (i, entry) in entries.iter().enumerate() {
        let photo = if entry.photo_url.is_empty() {
            String::new()
        } else {
            let url = escape(&entry.photo_url);
            format!(r#"<a href="{url}"><img src="{url}" alt="photo" width="80"></a>"#)
        };
        let _ = writeln!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td>{photo}</td></tr>",
            i + 1,
            escape(&entry.full_name),
            escape(&entry.registration_number),
            escape(&entry.roll_number),
            escape(&entry.session),
            escape(&entry.mobile_number),
            escape(&entry.blood_group),
        );
    }
    body.push_str("</tbody>\n</table>\n");
    layout("Submitted ID Card Requests", flashes, &body)
}
