//! Scraping and merging of the post-edit form.

use crate::forum::error::ParseError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Form fields in document order.
///
/// Inserting an existing name updates the value in place, so a merged
/// form is submitted in the same field order the page used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFieldMap {
    fields: Vec<(String, String)>,
}

impl FormFieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some((_, v)) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            *v = value;
        } else {
            self.fields.push((name, value));
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let idx = self.fields.iter().position(|(n, _)| n == name)?;
        Some(self.fields.remove(idx).1)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFieldMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = FormFieldMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// The edit form as found on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostForm {
    /// Absolute submission URL.
    pub action: Url,
    pub fields: FormFieldMap,
}

fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|_| ParseError::InvalidSelector {
        selector: css.to_string(),
    })
}

/// Value an element contributes when the form is submitted unmodified,
/// or `None` when it contributes nothing.
fn submitted_value(element: ElementRef<'_>) -> Option<String> {
    let el = element.value();
    match el.name() {
        "textarea" => Some(element.text().collect()),
        "input" => {
            let kind = el.attr("type").unwrap_or("text").to_ascii_lowercase();
            match kind.as_str() {
                "submit" => None,
                "checkbox" => el
                    .attr("checked")
                    .map(|_| el.attr("value").unwrap_or("on").to_string()),
                _ => Some(el.attr("value").unwrap_or_default().to_string()),
            }
        }
        _ => None,
    }
}

/// Scrape `form#<form_id>` from an edit page served at `page_url`.
///
/// Textareas and every input except checkboxes and submit buttons are
/// recorded; checkboxes only when checked. Unnamed elements are skipped.
pub fn scrape_post_form(html: &str, form_id: &str, page_url: &Url) -> Result<PostForm, ParseError> {
    let document = Html::parse_document(html);
    let form_selector = selector(&format!("form#{}", form_id))?;
    let field_selector = selector("input, textarea")?;

    let form = document
        .select(&form_selector)
        .next()
        .ok_or_else(|| ParseError::FormNotFound {
            form_id: form_id.to_string(),
        })?;

    let action = form
        .value()
        .attr("action")
        .ok_or_else(|| ParseError::FormActionMissing {
            form_id: form_id.to_string(),
        })?;
    let action = page_url
        .join(action.trim())
        .map_err(|_| ParseError::InvalidFormAction {
            action: action.to_string(),
        })?;

    let mut fields = FormFieldMap::new();
    for element in form.select(&field_selector) {
        let Some(name) = element.value().attr("name") else {
            continue;
        };
        if let Some(value) = submitted_value(element) {
            fields.insert(name, value);
        }
    }

    Ok(PostForm { action, fields })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EDIT_PAGE: &str = r#"
        <html><body>
        <form id="search" action="/search"><input name="q" value="nope"></form>
        <form action="https://forum.example.com/index.php?action=post2;start=0;board=12"
              method="post" id="postmodify" name="postmodify">
          <input type="hidden" name="topic" value="45557">
          <input type="text" name="subject" value="Old title">
          <textarea name="message">Old body
second line</textarea>
          <input type="checkbox" name="notify" value="1">
          <input type="checkbox" name="lock" value="1" checked="checked">
          <input type="checkbox" name="ns" value="NS" checked>
          <input type="checkbox" name="sticky" checked>
          <input type="text" name="guestname">
          <input name="icon" value="xx">
          <input type="submit" name="post" value="Save">
          <input type="hidden" value="unnamed">
          <input type="hidden" name="e4a1b2" value="0123456789abcdef0123456789abcdef">
        </form>
        </body></html>"#;

    fn page_url() -> Url {
        Url::parse("https://forum.example.com/index.php?action=post;msg=1;topic=2").unwrap()
    }

    #[test]
    fn test_scrape_respects_checkbox_semantics() {
        let form = scrape_post_form(EDIT_PAGE, "postmodify", &page_url()).unwrap();
        let fields = &form.fields;

        assert!(!fields.contains("notify"));
        assert_eq!(fields.get("lock"), Some("1"));
        assert_eq!(fields.get("ns"), Some("NS"));
        // Checked checkbox without a value submits "on".
        assert_eq!(fields.get("sticky"), Some("on"));
    }

    #[test]
    fn test_scrape_includes_inputs_and_textareas() {
        let form = scrape_post_form(EDIT_PAGE, "postmodify", &page_url()).unwrap();
        let fields = &form.fields;

        assert_eq!(fields.get("topic"), Some("45557"));
        assert_eq!(fields.get("subject"), Some("Old title"));
        assert_eq!(fields.get("message"), Some("Old body\nsecond line"));
        assert_eq!(fields.get("guestname"), Some(""));
        assert_eq!(fields.get("icon"), Some("xx"));
        assert_eq!(
            fields.get("e4a1b2"),
            Some("0123456789abcdef0123456789abcdef")
        );
        assert!(!fields.contains("post"));
        assert!(!fields.contains("q"));
    }

    #[test]
    fn test_scrape_keeps_document_order() {
        let form = scrape_post_form(EDIT_PAGE, "postmodify", &page_url()).unwrap();
        let names: Vec<&str> = form.fields.iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec!["topic", "subject", "message", "lock", "ns", "sticky", "guestname", "icon", "e4a1b2"]
        );
    }

    #[test]
    fn test_scrape_captures_action() {
        let form = scrape_post_form(EDIT_PAGE, "postmodify", &page_url()).unwrap();
        assert_eq!(
            form.action.as_str(),
            "https://forum.example.com/index.php?action=post2;start=0;board=12"
        );
    }

    #[test]
    fn test_relative_action_resolves_against_page() {
        let html = r#"<form id="postmodify" action="index.php?action=post2"></form>"#;
        let form = scrape_post_form(html, "postmodify", &page_url()).unwrap();
        assert_eq!(
            form.action.as_str(),
            "https://forum.example.com/index.php?action=post2"
        );
        assert!(form.fields.is_empty());
    }

    #[test]
    fn test_missing_form_is_parse_error() {
        let html = "<html><body><p>You are not allowed to access this section</p></body></html>";
        let err = scrape_post_form(html, "postmodify", &page_url()).unwrap_err();
        assert!(matches!(err, ParseError::FormNotFound { .. }));
    }

    #[test]
    fn test_missing_action_is_parse_error() {
        let html = r#"<form id="postmodify"><input name="a" value="b"></form>"#;
        let err = scrape_post_form(html, "postmodify", &page_url()).unwrap_err();
        assert!(matches!(err, ParseError::FormActionMissing { .. }));
    }

    #[test]
    fn test_field_map_insert_updates_in_place() {
        let mut map: FormFieldMap = [("a", "1"), ("b", "2")].into_iter().collect();
        map.insert("a", "3");
        map.insert("c", "4");
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2"), ("c", "4")]);
        assert_eq!(map.remove("b").as_deref(), Some("2"));
        assert_eq!(map.len(), 2);
    }
}
