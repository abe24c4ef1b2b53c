//! Built-in HTML templates
//!
//! Every interpolated value is escaped on output. Author names and imprints
//! are stored in their sanitized (escaped) form and go through [`sanitized`]
//! so a form re-render or an edit does not add another layer of entities.

use std::fmt::{Result as FmtResult, Write};

use super::{
    AuthorDeletePage, AuthorDetailPage, AuthorFormPage, AuthorListPage, BookDetailPage,
    BookInstanceDeletePage, BookInstanceDetailPage, BookInstanceFormPage, BookInstanceListPage,
    BookListPage, ErrorPage, GenreDetailPage, GenreListPage, IndexPage, MessageListPage, Page,
    Renderer,
};
use crate::{
    config::ViewsConfig,
    error::AppResult,
    models::{
        Author, BookInstance, BookInstanceStatus, BookInstanceWithBook, BookSummary, FieldError,
    },
    sanitize::{escape, unescape},
};

pub struct HtmlRenderer {
    site_title: String,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new(&ViewsConfig::default())
    }
}

impl HtmlRenderer {
    pub fn new(config: &ViewsConfig) -> Self {
        Self {
            site_title: config.site_title.clone(),
        }
    }

    fn title(&self, page: &Page) -> String {
        match page {
            Page::Index(_) => format!("{} Home", self.site_title),
            Page::AuthorList(_) => "Author List".to_string(),
            Page::AuthorDetail(_) => "Author Detail".to_string(),
            Page::AuthorForm(p) => p.title.to_string(),
            Page::AuthorDelete(_) => "Delete Author".to_string(),
            Page::BookList(_) => "Book List".to_string(),
            Page::BookDetail(p) => format!("Title: {}", p.detail.book.title),
            Page::GenreList(_) => "Genre List".to_string(),
            Page::GenreDetail(_) => "Genre Detail".to_string(),
            Page::BookInstanceList(_) => "Book Instance List".to_string(),
            Page::BookInstanceDetail(_) => "Book Instance".to_string(),
            Page::BookInstanceForm(p) => p.title.to_string(),
            Page::BookInstanceDelete(_) => "Delete Book Instance".to_string(),
            Page::MessageList(_) => "Messages".to_string(),
            Page::MessageForm => "New Message".to_string(),
            Page::Error(_) => "Error".to_string(),
        }
    }

    fn body(&self, out: &mut String, page: &Page) -> FmtResult {
        match page {
            Page::Index(p) => self.index(out, p),
            Page::AuthorList(p) => author_list(out, p),
            Page::AuthorDetail(p) => author_detail(out, p),
            Page::AuthorForm(p) => author_form(out, p),
            Page::AuthorDelete(p) => author_delete(out, p),
            Page::BookList(p) => book_list(out, p),
            Page::BookDetail(p) => book_detail(out, p),
            Page::GenreList(p) => genre_list(out, p),
            Page::GenreDetail(p) => genre_detail(out, p),
            Page::BookInstanceList(p) => book_instance_list(out, p),
            Page::BookInstanceDetail(p) => book_instance_detail(out, p),
            Page::BookInstanceForm(p) => book_instance_form(out, p),
            Page::BookInstanceDelete(p) => book_instance_delete(out, p),
            Page::MessageList(p) => message_list(out, p),
            Page::MessageForm => message_form(out),
            Page::Error(p) => error(out, p),
        }
    }

    fn index(&self, out: &mut String, page: &IndexPage) -> FmtResult {
        let s = &page.summary;
        write!(
            out,
            "<p>Welcome to <em>{}</em>, a very basic website for browsing the catalog.</p>",
            escape(&self.site_title)
        )?;
        out.push_str("<h2>Dynamic content</h2><p>The library has the following record counts:</p><ul>");
        write!(out, "<li><strong>Books:</strong> {}</li>", s.book_count)?;
        write!(out, "<li><strong>Copies:</strong> {}</li>", s.book_instance_count)?;
        write!(out, "<li><strong>Copies available:</strong> {}</li>", s.book_instance_available_count)?;
        write!(out, "<li><strong>Authors:</strong> {}</li>", s.author_count)?;
        write!(out, "<li><strong>Genres:</strong> {}</li>", s.genre_count)?;
        out.push_str("</ul>");
        Ok(())
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, page: &Page) -> AppResult<String> {
        let title = self.title(page);
        let mut content = String::new();
        self.body(&mut content, page)?;

        let mut out = String::with_capacity(content.len() + 1024);
        write!(
            out,
            "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
             <title>{} | {}</title></head><body>",
            escape(&title),
            escape(&self.site_title)
        )?;
        out.push_str(
            "<nav class=\"sidebar\"><ul>\
             <li><a href=\"/catalog\">Home</a></li>\
             <li><a href=\"/catalog/books\">All books</a></li>\
             <li><a href=\"/catalog/authors\">All authors</a></li>\
             <li><a href=\"/catalog/genres\">All genres</a></li>\
             <li><a href=\"/catalog/bookinstances\">All book-instances</a></li>\
             </ul><hr><ul>\
             <li><a href=\"/catalog/author/create\">Create new author</a></li>\
             <li><a href=\"/catalog/bookinstance/create\">Create new book instance (copy)</a></li>\
             </ul></nav>",
        );
        write!(out, "<main><h1>{}</h1>{}</main></body></html>", escape(&title), content)?;
        Ok(out)
    }
}

/// Escape a value that was already escaped by form sanitization. Decoding
/// first makes the output the same whether or not the value was sanitized.
fn sanitized(value: &str) -> String {
    escape(&unescape(value))
}

fn lifespan_suffix(author: &Author) -> String {
    let lifespan = author.lifespan();
    if lifespan.is_empty() {
        String::new()
    } else {
        format!(" ({})", escape(&lifespan))
    }
}

fn errors(out: &mut String, errors: &[FieldError]) -> FmtResult {
    if errors.is_empty() {
        return Ok(());
    }
    out.push_str("<ul class=\"errors\">");
    for e in errors {
        write!(out, "<li>{}</li>", escape(&e.msg))?;
    }
    out.push_str("</ul>");
    Ok(())
}

fn book_summaries(out: &mut String, books: &[BookSummary]) -> FmtResult {
    out.push_str("<dl>");
    for book in books {
        write!(
            out,
            "<dt><a href=\"{}\">{}</a></dt><dd>{}</dd>",
            book.url(),
            escape(&book.title),
            escape(&book.summary)
        )?;
    }
    out.push_str("</dl>");
    Ok(())
}

fn status_and_due(out: &mut String, instance: &BookInstance) -> FmtResult {
    let class = match instance.status {
        BookInstanceStatus::Available => "text-success",
        BookInstanceStatus::Maintenance => "text-danger",
        BookInstanceStatus::Loaned | BookInstanceStatus::Reserved => "text-warning",
    };
    write!(
        out,
        "<p><strong>Status:</strong> <span class=\"{}\">{}</span></p>",
        class, instance.status
    )?;
    if instance.status != BookInstanceStatus::Available && instance.due_back.is_some() {
        write!(out, "<p><strong>Due back:</strong> {}</p>", instance.due_back_formatted())?;
    }
    Ok(())
}

fn author_list(out: &mut String, page: &AuthorListPage) -> FmtResult {
    if page.authors.is_empty() {
        out.push_str("<p>There are no authors.</p>");
        return Ok(());
    }
    out.push_str("<ul>");
    for author in &page.authors {
        write!(
            out,
            "<li><a href=\"{}\">{}</a>{}</li>",
            author.url(),
            sanitized(&author.name()),
            lifespan_suffix(author)
        )?;
    }
    out.push_str("</ul>");
    Ok(())
}

fn author_detail(out: &mut String, page: &AuthorDetailPage) -> FmtResult {
    let author = &page.author;
    write!(out, "<h2>{}</h2>", sanitized(&author.name()))?;
    if !author.lifespan().is_empty() {
        write!(out, "<p>{}</p>", escape(&author.lifespan()))?;
    }
    out.push_str("<div><h4>Books</h4>");
    if page.books.is_empty() {
        out.push_str("<p>This author has no books.</p>");
    } else {
        book_summaries(out, &page.books)?;
    }
    out.push_str("</div><hr>");
    write!(
        out,
        "<p><a href=\"{0}/delete\">Delete author</a></p><p><a href=\"{0}/update\">Update author</a></p>",
        author.url()
    )
}

fn author_form(out: &mut String, page: &AuthorFormPage) -> FmtResult {
    let a = &page.author;
    out.push_str("<form method=\"POST\" action=\"\">");
    write!(
        out,
        "<div class=\"form-group\"><label for=\"first_name\">First Name:</label>\
         <input id=\"first_name\" type=\"text\" name=\"first_name\" placeholder=\"First name\" required value=\"{}\"></div>",
        sanitized(&a.first_name)
    )?;
    write!(
        out,
        "<div class=\"form-group\"><label for=\"family_name\">Family Name:</label>\
         <input id=\"family_name\" type=\"text\" name=\"family_name\" placeholder=\"Family name\" required value=\"{}\"></div>",
        sanitized(&a.family_name)
    )?;
    write!(
        out,
        "<div class=\"form-group\"><label for=\"date_of_birth\">Date of birth:</label>\
         <input id=\"date_of_birth\" type=\"date\" name=\"date_of_birth\" value=\"{}\"></div>",
        escape(&a.date_of_birth)
    )?;
    write!(
        out,
        "<div class=\"form-group\"><label for=\"date_of_death\">Date of death:</label>\
         <input id=\"date_of_death\" type=\"date\" name=\"date_of_death\" value=\"{}\"></div>",
        escape(&a.date_of_death)
    )?;
    out.push_str("<button type=\"submit\">Submit</button></form>");
    errors(out, &page.errors)
}

fn author_delete(out: &mut String, page: &AuthorDeletePage) -> FmtResult {
    if let Some(author) = &page.author {
        write!(out, "<h2>{}</h2>", sanitized(&author.name()))?;
        if !author.lifespan().is_empty() {
            write!(out, "<p>{}</p>", escape(&author.lifespan()))?;
        }
    }

    if !page.books.is_empty() {
        out.push_str(
            "<p><strong>Delete the following books before attempting to delete this author.</strong></p>\
             <div><h4>Books</h4>",
        );
        book_summaries(out, &page.books)?;
        out.push_str("</div>");
        return Ok(());
    }

    write!(
        out,
        "<p>Do you really want to delete this Author?</p>\
         <form method=\"POST\" action=\"\">\
         <input type=\"hidden\" name=\"authorid\" value=\"{}\" required>\
         <button type=\"submit\">Delete</button></form>",
        page.author_id
    )
}

fn book_list(out: &mut String, page: &BookListPage) -> FmtResult {
    if page.books.is_empty() {
        out.push_str("<p>There are no books.</p>");
        return Ok(());
    }
    out.push_str("<ul>");
    for book in &page.books {
        write!(
            out,
            "<li><a href=\"{}\">{}</a> ({})</li>",
            book.url(),
            escape(&book.title),
            sanitized(&book.author_name())
        )?;
    }
    out.push_str("</ul>");
    Ok(())
}

fn book_detail(out: &mut String, page: &BookDetailPage) -> FmtResult {
    let d = &page.detail;
    write!(
        out,
        "<p><strong>Author:</strong> <a href=\"{}\">{}</a></p>",
        d.author.url(),
        sanitized(&d.author.name())
    )?;
    write!(out, "<p><strong>Summary:</strong> {}</p>", escape(&d.book.summary))?;
    write!(out, "<p><strong>ISBN:</strong> {}</p>", escape(&d.book.isbn))?;
    let genres: Vec<String> = d
        .genres
        .iter()
        .map(|g| format!("<a href=\"{}\">{}</a>", g.url(), escape(&g.name)))
        .collect();
    write!(out, "<p><strong>Genre:</strong> {}</p>", genres.join(", "))?;

    out.push_str("<div><h4>Copies</h4>");
    if d.instances.is_empty() {
        out.push_str("<p>There are no copies of this book in the library.</p>");
    }
    for instance in &d.instances {
        out.push_str("<hr>");
        status_and_due(out, instance)?;
        write!(out, "<p><strong>Imprint:</strong> {}</p>", sanitized(&instance.imprint))?;
        write!(
            out,
            "<p><strong>Id:</strong> <a href=\"{}\">{}</a></p>",
            instance.url(),
            instance.id
        )?;
    }
    out.push_str("</div>");
    Ok(())
}

fn genre_list(out: &mut String, page: &GenreListPage) -> FmtResult {
    if page.genres.is_empty() {
        out.push_str("<p>There are no genres.</p>");
        return Ok(());
    }
    out.push_str("<ul>");
    for genre in &page.genres {
        write!(out, "<li><a href=\"{}\">{}</a></li>", genre.url(), escape(&genre.name))?;
    }
    out.push_str("</ul>");
    Ok(())
}

fn genre_detail(out: &mut String, page: &GenreDetailPage) -> FmtResult {
    write!(out, "<h2>Genre: {}</h2><div><h4>Books</h4>", escape(&page.genre.name))?;
    if page.books.is_empty() {
        out.push_str("<p>This genre has no books.</p>");
    } else {
        book_summaries(out, &page.books)?;
    }
    out.push_str("</div>");
    Ok(())
}

fn book_instance_list(out: &mut String, page: &BookInstanceListPage) -> FmtResult {
    if page.instances.is_empty() {
        out.push_str("<p>There are no book copies in this library.</p>");
        return Ok(());
    }
    out.push_str("<ul>");
    for BookInstanceWithBook { instance, book } in &page.instances {
        write!(
            out,
            "<li><a href=\"{}\">{} : {}</a> - {}",
            instance.url(),
            escape(&book.title),
            sanitized(&instance.imprint),
            instance.status
        )?;
        if instance.status != BookInstanceStatus::Available && instance.due_back.is_some() {
            write!(out, " (Due: {})", instance.due_back_formatted())?;
        }
        out.push_str("</li>");
    }
    out.push_str("</ul>");
    Ok(())
}

fn book_instance_summary(out: &mut String, entry: &BookInstanceWithBook) -> FmtResult {
    let BookInstanceWithBook { instance, book } = entry;
    write!(
        out,
        "<p><strong>Title:</strong> <a href=\"{}\">{}</a></p>",
        book.url(),
        escape(&book.title)
    )?;
    write!(out, "<p><strong>Imprint:</strong> {}</p>", sanitized(&instance.imprint))?;
    status_and_due(out, instance)
}

fn book_instance_detail(out: &mut String, page: &BookInstanceDetailPage) -> FmtResult {
    let instance = &page.instance.instance;
    write!(out, "<h2>ID: {}</h2>", instance.id)?;
    book_instance_summary(out, &page.instance)?;
    write!(
        out,
        "<hr><p><a href=\"{0}/delete\">Delete BookInstance</a></p><p><a href=\"{0}/update\">Update BookInstance</a></p>",
        instance.url()
    )
}

fn book_instance_form(out: &mut String, page: &BookInstanceFormPage) -> FmtResult {
    let form = &page.instance;
    out.push_str(
        "<form method=\"POST\" action=\"\">\
         <div class=\"form-group\"><label for=\"book\">Book:</label>\
         <select id=\"book\" name=\"book\" required><option value=\"\">--Please select a book--</option>",
    );
    for book in &page.books {
        let selected = if page.selected_book == Some(book.id) { " selected" } else { "" };
        write!(
            out,
            "<option value=\"{}\"{}>{}</option>",
            book.id,
            selected,
            escape(&book.title)
        )?;
    }
    out.push_str("</select></div>");
    write!(
        out,
        "<div class=\"form-group\"><label for=\"imprint\">Imprint:</label>\
         <input id=\"imprint\" type=\"text\" name=\"imprint\" placeholder=\"Publisher and date information\" required value=\"{}\"></div>",
        sanitized(&form.imprint)
    )?;
    write!(
        out,
        "<div class=\"form-group\"><label for=\"due_back\">Date when book available:</label>\
         <input id=\"due_back\" type=\"date\" name=\"due_back\" value=\"{}\"></div>",
        escape(&form.due_back)
    )?;
    out.push_str(
        "<div class=\"form-group\"><label for=\"status\">Status:</label>\
         <select id=\"status\" name=\"status\" required><option value=\"\">--Please select a status--</option>",
    );
    let current = form.status.parse::<BookInstanceStatus>().ok();
    for status in BookInstanceStatus::ALL {
        let selected = if current == Some(status) { " selected" } else { "" };
        write!(out, "<option value=\"{0}\"{1}>{0}</option>", status, selected)?;
    }
    out.push_str("</select></div><button type=\"submit\">Submit</button></form>");
    errors(out, &page.errors)
}

fn book_instance_delete(out: &mut String, page: &BookInstanceDeletePage) -> FmtResult {
    out.push_str("<p><strong>Do you really want to delete this BookInstance?</strong></p><div>");
    book_instance_summary(out, &page.instance)?;
    write!(
        out,
        "</div><form method=\"POST\" action=\"\">\
         <input type=\"hidden\" name=\"bookInstanceId\" value=\"{}\" required>\
         <button type=\"submit\">Delete</button></form>",
        page.instance.instance.id
    )
}

fn message_list(out: &mut String, page: &MessageListPage) -> FmtResult {
    out.push_str("<ul>");
    for m in &page.messages {
        write!(
            out,
            "<li><strong>{}</strong>: {} <em>{}</em></li>",
            escape(&m.user),
            escape(&m.text),
            m.added.format("%Y-%m-%d %H:%M")
        )?;
    }
    out.push_str("</ul><p><a href=\"/new\">New message</a></p>");
    Ok(())
}

fn message_form(out: &mut String) -> FmtResult {
    out.push_str(
        "<form method=\"POST\" action=\"/new\">\
         <div class=\"form-group\"><label for=\"name\">Name:</label>\
         <input id=\"name\" type=\"text\" name=\"name\" required></div>\
         <div class=\"form-group\"><label for=\"message\">Message:</label>\
         <input id=\"message\" type=\"text\" name=\"message\" required></div>\
         <button type=\"submit\">Send</button></form>",
    );
    Ok(())
}

fn error(out: &mut String, page: &ErrorPage) -> FmtResult {
    write!(out, "<h2>{}</h2><p>{}</p>", page.status, escape(&page.message))
}
