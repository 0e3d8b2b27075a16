//! Ordered phrase substitutions for booktitle compaction.
//!
//! The table is an explicit list of `(pattern, replacement)` pairs that is
//! applied front to back with plain substring replacement. Order matters:
//! compound ordinals such as "Twenty-First" must be rewritten before the
//! single word "First", otherwise the compound would end up as
//! "Twenty-1st".

/// Academic phrases that are abbreviated in every booktitle.
const FIXED_PHRASES: &[(&str, &str)] = &[
    ("Proceedings", "Proc."),
    ("Conference", "Conf."),
    ("International", "Int'l."),
];

const UNITS: &[(&str, &str)] = &[
    ("First", "1st"),
    ("Second", "2nd"),
    ("Third", "3rd"),
    ("Fourth", "4th"),
    ("Fifth", "5th"),
    ("Sixth", "6th"),
    ("Seventh", "7th"),
    ("Eighth", "8th"),
    ("Ninth", "9th"),
];

const TENS: &[(&str, &str)] = &[
    ("Twenty", "2"),
    ("Thirty", "3"),
    ("Forty", "4"),
    ("Fifty", "5"),
    ("Sixty", "6"),
    ("Seventy", "7"),
    ("Eighty", "8"),
    ("Ninety", "9"),
];

const TEENS: &[(&str, &str)] = &[
    ("Tenth", "10th"),
    ("Eleventh", "11th"),
    ("Twelfth", "12th"),
    ("Thirteenth", "13th"),
    ("Fourteenth", "14th"),
    ("Fifteenth", "15th"),
    ("Sixteenth", "16th"),
    ("Seventeenth", "17th"),
    ("Eighteenth", "18th"),
    ("Nineteenth", "19th"),
];

const ROUND_TENS: &[(&str, &str)] = &[
    ("Twentieth", "20th"),
    ("Thirtieth", "30th"),
    ("Fortieth", "40th"),
    ("Fiftieth", "50th"),
    ("Sixtieth", "60th"),
    ("Seventieth", "70th"),
    ("Eightieth", "80th"),
    ("Ninetieth", "90th"),
];

/// An ordered list of `(pattern, replacement)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionTable {
    pairs: Vec<(String, String)>,
}

impl SubstitutionTable {
    /// The ordinal words "First" through "Ninety-Ninth".
    ///
    /// Teens and round tens come first, then every `<Tens>-<Unit>`
    /// compound, and the single units last.
    pub fn ordinals() -> Self {
        let mut pairs: Vec<(String, String)> = TEENS
            .iter()
            .chain(ROUND_TENS)
            .map(|(long, short)| (long.to_string(), short.to_string()))
            .collect();

        for (tens_long, tens_short) in TENS {
            for (unit_long, unit_short) in UNITS {
                pairs.push((
                    format!("{}-{}", tens_long, unit_long),
                    format!("{}{}", tens_short, unit_short),
                ));
            }
        }

        // after the compounds, or "Twenty-Third" would become "Twenty-3rd"
        pairs.extend(
            UNITS
                .iter()
                .map(|(long, short)| (long.to_string(), short.to_string())),
        );

        Self { pairs }
    }

    /// The full booktitle table: fixed phrases followed by the ordinals.
    pub fn booktitle() -> Self {
        let mut pairs: Vec<(String, String)> = FIXED_PHRASES
            .iter()
            .map(|(long, short)| (long.to_string(), short.to_string()))
            .collect();
        pairs.extend(Self::ordinals().pairs);
        Self { pairs }
    }

    /// Rewrites every occurrence of every pattern, in table order.
    pub fn apply(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (long, short) in &self.pairs {
            if result.contains(long.as_str()) {
                result = result.replace(long.as_str(), short);
            }
        }
        result
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(l, s)| (l.as_str(), s.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Default for SubstitutionTable {
    fn default() -> Self {
        Self::booktitle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(table: &SubstitutionTable, pattern: &str) -> usize {
        table
            .iter()
            .position(|(long, _)| long == pattern)
            .unwrap_or_else(|| panic!("'{}' missing from table", pattern))
    }

    // ============================================
    // Table construction
    // ============================================

    #[test]
    fn test_ordinals_cover_first_to_ninety_ninth() {
        // 10 teens + 8 round tens + 72 compounds + 9 units
        let table = SubstitutionTable::ordinals();
        assert_eq!(table.len(), 99);
    }

    #[test]
    fn test_booktitle_table_starts_with_fixed_phrases() {
        let table = SubstitutionTable::booktitle();
        let first: Vec<_> = table.iter().take(3).collect();
        assert_eq!(
            first,
            vec![
                ("Proceedings", "Proc."),
                ("Conference", "Conf."),
                ("International", "Int'l."),
            ]
        );
        assert_eq!(table.len(), 102);
    }

    #[test]
    fn test_compounds_precede_their_single_units() {
        let table = SubstitutionTable::ordinals();
        for (tens, _) in TENS {
            for (unit, _) in UNITS {
                let compound = format!("{}-{}", tens, unit);
                assert!(
                    position(&table, &compound) < position(&table, unit),
                    "'{}' must be replaced before '{}'",
                    compound,
                    unit
                );
            }
        }
    }

    #[test]
    fn test_units_are_last() {
        let table = SubstitutionTable::ordinals();
        let tail: Vec<_> = table.iter().skip(90).map(|(long, _)| long).collect();
        assert_eq!(
            tail,
            vec![
                "First", "Second", "Third", "Fourth", "Fifth", "Sixth", "Seventh", "Eighth",
                "Ninth"
            ]
        );
    }

    // ============================================
    // Replacement behaviour
    // ============================================

    #[test]
    fn test_every_compound_ordinal_compacts_to_digits() {
        let table = SubstitutionTable::booktitle();
        for (t, (tens, tens_digit)) in TENS.iter().enumerate() {
            for (u, (unit, unit_short)) in UNITS.iter().enumerate() {
                let long = format!("{}-{}", tens, unit);
                let expected = format!("{}{}", tens_digit, unit_short);
                assert_eq!(table.apply(&long), expected);
                // sanity: numeric value matches position
                let value: usize = expected[..2].parse().unwrap();
                assert_eq!(value, (t + 2) * 10 + u + 1);
            }
        }
    }

    #[test]
    fn test_forty_second() {
        let table = SubstitutionTable::booktitle();
        assert_eq!(table.apply("Forty-Second"), "42nd");
    }

    #[test]
    fn test_single_units_compact() {
        let table = SubstitutionTable::booktitle();
        let expected = ["1st", "2nd", "3rd", "4th", "5th", "6th", "7th", "8th", "9th"];
        for ((unit, _), short) in UNITS.iter().zip(expected) {
            assert_eq!(table.apply(unit), short);
        }
    }

    #[test]
    fn test_single_unit_next_to_compound() {
        // Given: a title with both a compound and a bare unit ordinal
        let table = SubstitutionTable::booktitle();
        let title = "Joint Twenty-First and First Workshop";

        // When: we compact it
        let result = table.apply(title);

        // Then: the compound is intact and the unit is compacted
        assert_eq!(result, "Joint 21st and 1st Workshop");
    }

    #[test]
    fn test_teens_and_round_tens() {
        let table = SubstitutionTable::booktitle();
        assert_eq!(table.apply("Nineteenth"), "19th");
        assert_eq!(table.apply("Twentieth"), "20th");
        assert_eq!(table.apply("Ninetieth"), "90th");
        assert_eq!(table.apply("Twelfth"), "12th");
    }

    #[test]
    fn test_full_booktitle() {
        let table = SubstitutionTable::booktitle();
        assert_eq!(
            table.apply("Proceedings of the Twenty-Third International Conference"),
            "Proc. of the 23rd Int'l. Conf."
        );
    }

    #[test]
    fn test_all_occurrences_replaced() {
        let table = SubstitutionTable::booktitle();
        assert_eq!(
            table.apply("Conference and Conference"),
            "Conf. and Conf."
        );
    }

    #[test]
    fn test_compaction_is_idempotent() {
        let table = SubstitutionTable::booktitle();
        let once = table.apply("Proceedings of the Twenty-Third International Conference");
        assert_eq!(table.apply(&once), once);
        assert_eq!(table.apply("23rd"), "23rd");
        assert_eq!(table.apply("Proc. of the 1st Int'l. Conf."), "Proc. of the 1st Int'l. Conf.");
    }

    #[test]
    fn test_unrelated_text_untouched() {
        let table = SubstitutionTable::booktitle();
        assert_eq!(table.apply("Workshop on Types"), "Workshop on Types");
        assert_eq!(table.apply(""), "");
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let table = SubstitutionTable::booktitle();
        assert_eq!(table.apply("proceedings"), "proceedings");
    }
}
