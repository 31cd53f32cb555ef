//! TVClub category labels to ETSI EN 300 468 content descriptors

use crate::pipeline::reporter::{TransformReporter, TransformWarning};

/// Known TVClub labels. An empty target means the label carries no
/// category worth emitting.
pub static ETSI_PROGRAM_CATEGORIES: [(&str, &str); 7] = [
    ("Cinéma", "Movie / Drama"),
    ("Clips", "Music / Ballet / Dance"),
    ("Dessin animé", "Cartoons / Puppets"),
    ("Emission", ""),
    ("Spectacle", "Performing arts"),
    ("Série", "Movie / Drama"),
    ("Téléfilm", "Movie / Drama"),
];

/// Outcome of looking up a TVClub label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryMapping {
    /// Translated to an ETSI category
    Mapped(&'static str),
    /// Known label with nothing to emit
    Suppressed,
    /// Label missing from the table
    Unknown,
}

/// Look a label up in the ETSI table
pub fn etsi_category(label: &str) -> CategoryMapping {
    match ETSI_PROGRAM_CATEGORIES
        .iter()
        .find(|(tvclub, _)| *tvclub == label)
    {
        Some(&(_, "")) => CategoryMapping::Suppressed,
        Some(&(_, etsi)) => CategoryMapping::Mapped(etsi),
        None => CategoryMapping::Unknown,
    }
}

/// ETSI category to add for a label, if any; unknown labels are reported
pub fn map_category(label: &str, reporter: &dyn TransformReporter) -> Option<&'static str> {
    match etsi_category(label) {
        CategoryMapping::Mapped(etsi) => Some(etsi),
        CategoryMapping::Suppressed => None,
        CategoryMapping::Unknown => {
            reporter.report(TransformWarning::UnmappedCategory {
                label: label.to_string(),
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::reporter::RecordingReporter;
    use rstest::rstest;

    #[rstest]
    #[case("Cinéma", Some("Movie / Drama"))]
    #[case("Clips", Some("Music / Ballet / Dance"))]
    #[case("Dessin animé", Some("Cartoons / Puppets"))]
    #[case("Spectacle", Some("Performing arts"))]
    #[case("Série", Some("Movie / Drama"))]
    #[case("Téléfilm", Some("Movie / Drama"))]
    #[case("Emission", None)]
    fn test_known_labels(#[case] label: &str, #[case] expected: Option<&str>) {
        let reporter = RecordingReporter::new();
        assert_eq!(map_category(label, &reporter), expected);
        assert!(reporter.warnings().is_empty());
    }

    #[test]
    fn test_unknown_label_is_reported() {
        let reporter = RecordingReporter::new();
        assert_eq!(map_category("Foo", &reporter), None);
        assert_eq!(
            reporter.warnings(),
            vec![TransformWarning::UnmappedCategory {
                label: "Foo".to_string()
            }]
        );
    }

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(etsi_category("cinéma"), CategoryMapping::Unknown);
        assert_eq!(etsi_category("Emission"), CategoryMapping::Suppressed);
    }
}
