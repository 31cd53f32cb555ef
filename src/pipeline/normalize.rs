//! Per-programme cleanup applied to every kept entry
//!
//! Builds a new programme node from the fetched one: text fields are
//! repaired, sub-titles and descriptions are tagged as French, and the
//! first category gets its ETSI equivalent inserted in front of it.

use crate::data_mapping::map_category;
use crate::utils::encoding::repair_text;
use crate::utils::xmltv_parser::{XmlElement, XmlNode};

use super::reporter::TransformReporter;

/// Language of the feed's free-text fields
pub const FEED_LANGUAGE: &str = "fr";

/// Return a cleaned copy of a `<programme>` node
pub fn normalize_programme(source: &XmlElement, reporter: &dyn TransformReporter) -> XmlElement {
    let mut programme = XmlElement::new(source.name.clone());
    programme.attributes = source.attributes.clone();

    let mut category_seen = false;
    for node in &source.children {
        let child = match node {
            XmlNode::Element(child) => child,
            XmlNode::Text(text) => {
                programme.push_text(text.clone());
                continue;
            }
        };

        match child.name.as_str() {
            "title" => programme.push_element(repaired(child, None)),
            "sub-title" | "desc" => programme.push_element(repaired(child, Some(FEED_LANGUAGE))),
            "category" if !category_seen => {
                category_seen = true;
                let label = child.text();
                let label = label.trim();
                if !label.is_empty()
                    && let Some(etsi) = map_category(label, reporter)
                {
                    programme.push_element(XmlElement::with_text("category", etsi));
                }
                programme.push_element(child.clone());
            }
            _ => programme.push_element(child.clone()),
        }
    }

    programme
}

fn repaired(element: &XmlElement, lang: Option<&str>) -> XmlElement {
    let mut fixed = element.clone();
    fixed.set_text(repair_text(&element.text()));
    if let Some(lang) = lang {
        fixed.set_attr("lang", lang);
    }
    fixed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::reporter::{RecordingReporter, TransformWarning};
    use crate::utils::xmltv_parser::parse_document;

    fn normalize(xml: &str) -> (XmlElement, Vec<TransformWarning>) {
        let reporter = RecordingReporter::new();
        let source = parse_document(xml.as_bytes()).unwrap();
        let normalized = normalize_programme(&source, &reporter);
        (normalized, reporter.warnings())
    }

    fn child_names(element: &XmlElement) -> Vec<&str> {
        element.elements().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_text_fields_are_repaired_and_tagged() {
        let (programme, _) = normalize(
            "<programme channel=\"a\" start=\"s\" stop=\"e\">\
               <title lang=\"en\"> 10\u{80} </title>\
               <sub-title>\u{93}Pilote\u{94}</sub-title>\
               <desc lang=\"de\">Suite\u{85} </desc>\
             </programme>",
        );

        let title = programme.child("title").unwrap();
        assert_eq!(title.text(), "10\u{20AC}");
        assert_eq!(title.attr("lang"), Some("en"));

        let subtitle = programme.child("sub-title").unwrap();
        assert_eq!(subtitle.text(), "\u{201C}Pilote\u{201D}");
        assert_eq!(subtitle.attr("lang"), Some("fr"));

        let desc = programme.child("desc").unwrap();
        assert_eq!(desc.text(), "Suite\u{2026}");
        assert_eq!(desc.attr("lang"), Some("fr"));

        assert_eq!(programme.attributes.len(), 3);
    }

    #[test]
    fn test_mapped_category_is_inserted_before_original() {
        let (programme, warnings) = normalize(
            "<programme><title>Film</title><category>Cinéma</category><icon src=\"x\"/></programme>",
        );

        assert_eq!(child_names(&programme), vec!["title", "category", "category", "icon"]);
        let categories: Vec<_> = programme
            .elements()
            .filter(|e| e.name == "category")
            .map(XmlElement::text)
            .collect();
        assert_eq!(categories, vec!["Movie / Drama", "Cinéma"]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_unknown_category_is_reported_and_left_alone() {
        let (programme, warnings) =
            normalize("<programme><title>X</title><category>Foo</category></programme>");

        assert_eq!(child_names(&programme), vec!["title", "category"]);
        assert_eq!(
            warnings,
            vec![TransformWarning::UnmappedCategory {
                label: "Foo".to_string()
            }]
        );
    }

    #[test]
    fn test_suppressed_and_blank_categories_add_nothing() {
        let (emission, warnings) =
            normalize("<programme><category> Emission </category></programme>");
        assert_eq!(child_names(&emission), vec!["category"]);
        assert!(warnings.is_empty());

        let (blank, warnings) = normalize("<programme><category>  </category></programme>");
        assert_eq!(child_names(&blank), vec!["category"]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_only_first_category_is_mapped() {
        let (programme, warnings) = normalize(
            "<programme><category>Série</category><category>Foo</category></programme>",
        );
        assert_eq!(child_names(&programme), vec!["category", "category", "category"]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_source_node_is_untouched() {
        let source = parse_document("<programme><title> a\u{80} </title></programme>".as_bytes())
            .unwrap();
        let before = source.clone();
        let _ = normalize_programme(&source, &RecordingReporter::new());
        assert_eq!(source, before);
    }
}
