use super::control;
use crate::client::BookForm;
use crate::models::ReadingStatus;

pub fn render_form(form: &BookForm) -> String {
    let heading = if form.is_edit() { "Edit Book" } else { "Add New Book" };
    let mut lines = vec![heading.to_string(), String::new()];

    if let Some(error) = form.error() {
        lines.push("Error".to_string());
        lines.push(error.to_string());
        lines.push(String::new());
    }

    lines.push(format!(
        "ISBN:           {}  {}",
        form.isbn,
        control("Lookup", true)
    ));

    lines.push(format!("Title *:        {}", form.title));
    lines.push(format!("Author *:       {}", form.author));
    lines.push(format!("Genre:          {}", form.genre));
    lines.push(format!("Published Year: {}", form.published_year));
    lines.push(format!("Description:    {}", form.description));
    lines.push(format!("Cover URL:      {}", form.cover_url));

    let statuses: Vec<String> = ReadingStatus::ALL
        .iter()
        .map(|status| {
            if *status == form.reading_status {
                format!("*{}*", status.label())
            } else {
                status.label().to_string()
            }
        })
        .collect();
    lines.push(format!("Reading Status: {}", statuses.join(" | ")));
    lines.push(format!("Tags:           {}", form.tags.join(", ")));

    lines.push(String::new());
    let submit = if form.is_edit() { "Update Book" } else { "Add Book" };
    lines.push(format!("{} {}", control(submit, true), control("Cancel", true)));
    lines.join("\n")
}
