//! Windows-1252 repair for feed text
//!
//! The feed is declared as UTF-8 but some texts were produced from
//! Windows-1252 data decoded as Latin-1, which leaves C1 control characters
//! (U+0080 to U+009F) where punctuation and a few letters should be.
//!
//! See <http://www.microsoft.com/typography/unicode/1252.htm>.

/// C1 code points and the Windows-1252 characters they stand for
pub const WINDOWS_1252_REPAIRS: [(char, char); 27] = [
    ('\u{80}', '\u{20AC}'), // EURO SIGN
    ('\u{82}', '\u{201A}'), // SINGLE LOW-9 QUOTATION MARK
    ('\u{83}', '\u{0192}'), // LATIN SMALL LETTER F WITH HOOK
    ('\u{84}', '\u{201E}'), // DOUBLE LOW-9 QUOTATION MARK
    ('\u{85}', '\u{2026}'), // HORIZONTAL ELLIPSIS
    ('\u{86}', '\u{2020}'), // DAGGER
    ('\u{87}', '\u{2021}'), // DOUBLE DAGGER
    ('\u{88}', '\u{02C6}'), // MODIFIER LETTER CIRCUMFLEX ACCENT
    ('\u{89}', '\u{2030}'), // PER MILLE SIGN
    ('\u{8A}', '\u{0160}'), // LATIN CAPITAL LETTER S WITH CARON
    ('\u{8B}', '\u{2039}'), // SINGLE LEFT-POINTING ANGLE QUOTATION MARK
    ('\u{8C}', '\u{0152}'), // LATIN CAPITAL LIGATURE OE
    ('\u{8E}', '\u{017D}'), // LATIN CAPITAL LETTER Z WITH CARON
    ('\u{91}', '\u{2018}'), // LEFT SINGLE QUOTATION MARK
    ('\u{92}', '\u{2019}'), // RIGHT SINGLE QUOTATION MARK
    ('\u{93}', '\u{201C}'), // LEFT DOUBLE QUOTATION MARK
    ('\u{94}', '\u{201D}'), // RIGHT DOUBLE QUOTATION MARK
    ('\u{95}', '\u{2022}'), // BULLET
    ('\u{96}', '\u{2013}'), // EN DASH
    ('\u{97}', '\u{2014}'), // EM DASH
    ('\u{98}', '\u{02DC}'), // SMALL TILDE
    ('\u{99}', '\u{2122}'), // TRADE MARK SIGN
    ('\u{9A}', '\u{0161}'), // LATIN SMALL LETTER S WITH CARON
    ('\u{9B}', '\u{203A}'), // SINGLE RIGHT-POINTING ANGLE QUOTATION MARK
    ('\u{9C}', '\u{0153}'), // LATIN SMALL LIGATURE OE
    ('\u{9E}', '\u{017E}'), // LATIN SMALL LETTER Z WITH CARON
    ('\u{9F}', '\u{0178}'), // LATIN CAPITAL LETTER Y WITH DIAERESIS
];

fn repair_char(c: char) -> char {
    // Only the C1 block can need repairing
    if !('\u{80}'..='\u{9F}').contains(&c) {
        return c;
    }
    WINDOWS_1252_REPAIRS
        .iter()
        .find(|(legacy, _)| *legacy == c)
        .map_or(c, |(_, fixed)| *fixed)
}

/// Replace Windows-1252 leftovers with their Unicode characters and trim
/// surrounding whitespace
pub fn repair_text(text: &str) -> String {
    text.chars().map(repair_char).collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euro_sign_is_repaired() {
        assert_eq!(repair_text("Prix : 10\u{80}"), "Prix : 10\u{20AC}");
    }

    #[test]
    fn test_typographic_quotes_and_ligatures() {
        assert_eq!(
            repair_text("l\u{92}\u{9C}uvre \u{93}culte\u{94} \u{85}"),
            "l\u{2019}\u{0153}uvre \u{201C}culte\u{201D} \u{2026}"
        );
    }

    #[test]
    fn test_no_table_code_point_survives() {
        let all_legacy: String = WINDOWS_1252_REPAIRS.iter().map(|(legacy, _)| *legacy).collect();
        let repaired = repair_text(&all_legacy);
        assert!(
            repaired
                .chars()
                .all(|c| WINDOWS_1252_REPAIRS.iter().all(|(legacy, _)| *legacy != c))
        );
        assert_eq!(repaired.chars().count(), WINDOWS_1252_REPAIRS.len());
    }

    #[test]
    fn test_unmapped_c1_and_regular_text_pass_through() {
        // 0x81, 0x8D, 0x8F, 0x90 and 0x9D are undefined in Windows-1252
        assert_eq!(repair_text("a\u{81}b\u{9D}c"), "a\u{81}b\u{9D}c");
        assert_eq!(repair_text("Série télé"), "Série télé");
    }

    #[test]
    fn test_result_is_trimmed() {
        assert_eq!(repair_text("  \n Journal de 20h \t"), "Journal de 20h");
        assert_eq!(repair_text("   "), "");
    }
}
