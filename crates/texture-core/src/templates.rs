//! Placeholder substitution for LaTeX document boilerplate.
//!
//! Templates use `${__key__}` placeholders. Substitution is literal and
//! forgiving: placeholders without a supplied value are left intact, so a
//! template referencing a key the caller does not know about still renders.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::defaults::TEMPLATE_DATE_FORMAT;

/// Render `template`, replacing every `${__key__}` present in `vars`.
pub fn render(template: &str, vars: &HashMap<&str, String>) -> String {
    let mut out = template.to_string();
    for (key, value) in vars {
        out = out.replace(&format!("${{__{}__}}", key), value);
    }
    out
}

/// Format a date the way the document templates expect, e.g. "June 01, 2024".
pub fn template_date(date: NaiveDate) -> String {
    date.format(TEMPLATE_DATE_FORMAT).to_string()
}

/// Convenience builder for the standard document variables.
pub fn document_vars(title: &str, author: &str, date: NaiveDate) -> HashMap<&'static str, String> {
    let mut vars = HashMap::new();
    vars.insert("title", title.to_string());
    vars.insert("author", author.to_string());
    vars.insert("date", template_date(date));
    vars
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::LATEX_SUBFILE_TEMPLATE;

    #[test]
    fn test_render_substitutes_known_placeholders() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let vars = document_vars("Vector Spaces", "Someone", date);
        let out = render(LATEX_SUBFILE_TEMPLATE, &vars);

        assert!(out.contains(r"\title{Vector Spaces}"));
        assert!(out.contains(r"\author{Someone}"));
        assert!(out.contains(r"\date{June 01, 2024}"));
        assert!(!out.contains("${__"));
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        let mut vars = HashMap::new();
        vars.insert("title", "T".to_string());
        let out = render("${__title__} ${__mystery__}", &vars);
        assert_eq!(out, "T ${__mystery__}");
    }

    #[test]
    fn test_template_date_format() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 9).unwrap();
        assert_eq!(template_date(date), "December 09, 2023");
    }
}
