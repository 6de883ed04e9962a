//! Gazetteer store: the known surface forms for clubs and cities.
//!
//! Built once at startup from the knowledge base's club list, then shared
//! read-only. Forms are lowercased char by char, exactly as query text is,
//! and kept in sorted sets, so iteration order (and therefore tie-breaking
//! between equally scored matches) is lexicographic and reproducible.
//!
//! # Expansion
//!
//! ```text
//! club "Bayer 04 Leverkusen" → "bayer 04 leverkusen", "leverkusen"
//!                              (full name + longest token)
//! city "Frankfurt am Main"   → "frankfurt", "frankfurt am main"
//!                              (first token + full name)
//! ```

use std::collections::BTreeSet;

use gaffer_core::EntityLabel;

use crate::kb::ClubRecord;
use crate::matcher::fold_lowercase;

/// Label → set of lowercased surface forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gazetteer {
    clubs: BTreeSet<String>,
    cities: BTreeSet<String>,
}

impl Gazetteer {
    /// Create an empty gazetteer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw club names and city names.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gaffer::Gazetteer;
    /// use gaffer_core::EntityLabel;
    ///
    /// let gaz = Gazetteer::from_names(["FC Bayern Munich"], ["Munich"]);
    /// assert!(gaz.contains(EntityLabel::Clubs, "fc bayern munich"));
    /// assert!(gaz.contains(EntityLabel::Clubs, "bayern"));
    /// assert!(gaz.contains(EntityLabel::Cities, "munich"));
    /// ```
    pub fn from_names<C, T, S, U>(clubs: C, cities: T) -> Self
    where
        C: IntoIterator<Item = S>,
        T: IntoIterator<Item = U>,
        S: AsRef<str>,
        U: AsRef<str>,
    {
        let mut gazetteer = Self::new();
        for club in clubs {
            gazetteer.add_club(club.as_ref());
        }
        for city in cities {
            gazetteer.add_city(city.as_ref());
        }
        gazetteer
    }

    /// Build from knowledge-base club records.
    #[must_use]
    pub fn from_records(records: &[ClubRecord]) -> Self {
        let gazetteer = Self::from_names(
            records.iter().map(|r| r.club_name.as_str()),
            records.iter().filter_map(|r| r.city_name.as_deref()),
        );
        log::info!(
            "Built gazetteer from {} records: {} club forms, {} city forms",
            records.len(),
            gazetteer.clubs.len(),
            gazetteer.cities.len()
        );
        gazetteer
    }

    /// Register a club: its full name and its longest token.
    ///
    /// Empty or whitespace-only names are ignored.
    pub fn add_club(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        self.clubs.insert(fold_form(name));
        if let Some(token) = longest_token(name) {
            self.clubs.insert(fold_form(token));
        }
    }

    /// Register a city: its first token and its full name.
    ///
    /// Empty or whitespace-only names are ignored.
    pub fn add_city(&mut self, name: &str) {
        let name = name.trim();
        let Some(first) = name.split_whitespace().next() else {
            return;
        };
        self.cities.insert(fold_form(first));
        self.cities.insert(fold_form(name));
    }

    /// Insert a form verbatim, bypassing trimming and folding.
    #[cfg(test)]
    pub(crate) fn insert_raw(&mut self, label: EntityLabel, form: &str) {
        match label {
            EntityLabel::Clubs => self.clubs.insert(form.to_string()),
            EntityLabel::Cities => self.cities.insert(form.to_string()),
        };
    }

    /// Surface forms for one label, in sorted order.
    #[must_use]
    pub fn forms(&self, label: EntityLabel) -> &BTreeSet<String> {
        match label {
            EntityLabel::Clubs => &self.clubs,
            EntityLabel::Cities => &self.cities,
        }
    }

    /// Whether a lowercased form is registered under `label`.
    #[must_use]
    pub fn contains(&self, label: EntityLabel, form: &str) -> bool {
        self.forms(label).contains(form)
    }

    /// All `(label, form)` pairs: clubs first, then cities, each sorted.
    pub fn iter(&self) -> impl Iterator<Item = (EntityLabel, &str)> + '_ {
        EntityLabel::ALL
            .into_iter()
            .flat_map(move |label| self.forms(label).iter().map(move |f| (label, f.as_str())))
    }

    /// Total number of surface forms across labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clubs.len() + self.cities.len()
    }

    /// True when no forms are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Stored form of a name: the same per-char fold applied to query text.
fn fold_form(name: &str) -> String {
    fold_lowercase(name).into_iter().collect()
}

/// Longest whitespace token by char count; the first one wins ties.
fn longest_token(name: &str) -> Option<&str> {
    let mut best: Option<&str> = None;
    for token in name.split_whitespace() {
        if best.map_or(true, |b| token.chars().count() > b.chars().count()) {
            best = Some(token);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn club_expands_to_full_name_and_longest_token() {
        let gaz = Gazetteer::from_names(["Bayer 04 Leverkusen"], Vec::<&str>::new());
        let forms: Vec<_> = gaz.forms(EntityLabel::Clubs).iter().cloned().collect();
        assert_eq!(forms, vec!["bayer 04 leverkusen", "leverkusen"]);
    }

    #[test]
    fn longest_token_tie_takes_first() {
        assert_eq!(longest_token("Borussia Mönchengladbach"), Some("Mönchengladbach"));
        assert_eq!(longest_token("SV Werder Bremen"), Some("Werder"));
        assert_eq!(longest_token("   "), None);
    }

    #[test]
    fn city_expands_to_first_token_and_full_name() {
        let gaz = Gazetteer::from_names(Vec::<&str>::new(), ["Frankfurt am Main"]);
        assert!(gaz.contains(EntityLabel::Cities, "frankfurt"));
        assert!(gaz.contains(EntityLabel::Cities, "frankfurt am main"));
        assert_eq!(gaz.len(), 2);
    }

    #[test]
    fn single_word_names_collapse() {
        let gaz = Gazetteer::from_names(["Mainz"], ["Mainz", "mainz"]);
        assert_eq!(gaz.forms(EntityLabel::Clubs).len(), 1);
        assert_eq!(gaz.forms(EntityLabel::Cities).len(), 1);
    }

    #[test]
    fn empty_names_are_skipped() {
        let gaz = Gazetteer::from_names(["", "  "], ["", "\t"]);
        assert!(gaz.is_empty());
        assert!(gaz.iter().all(|(_, f)| !f.is_empty()));
    }

    #[test]
    fn iteration_is_clubs_then_cities_sorted() {
        let gaz = Gazetteer::from_names(["Werder Bremen", "1. FC Köln"], ["Cologne", "Bremen"]);
        let pairs: Vec<_> = gaz.iter().collect();
        assert_eq!(
            pairs,
            vec![
                (EntityLabel::Clubs, "1. fc köln"),
                (EntityLabel::Clubs, "köln"),
                (EntityLabel::Clubs, "werder"),
                (EntityLabel::Clubs, "werder bremen"),
                (EntityLabel::Cities, "bremen"),
                (EntityLabel::Cities, "cologne"),
            ]
        );
    }

    #[test]
    fn forms_use_per_char_fold() {
        // str::to_lowercase would turn the final sigma into 'ς'
        let gaz = Gazetteer::from_names(["ΟΛΥΜΠΙΑΚΟΣ"], ["ΠΕΙΡΑΙΑΣ"]);
        assert!(gaz.contains(EntityLabel::Clubs, "ολυμπιακοσ"));
        assert!(gaz.contains(EntityLabel::Cities, "πειραιασ"));
        assert_eq!(gaz.len(), 2);
    }

    #[test]
    fn from_records_skips_missing_cities() {
        let records = vec![
            ClubRecord {
                club_name: "FC St. Pauli".into(),
                city_name: Some("Hamburg".into()),
            },
            ClubRecord {
                club_name: "VfL Wolfsburg".into(),
                city_name: None,
            },
        ];
        let gaz = Gazetteer::from_records(&records);
        assert!(gaz.contains(EntityLabel::Clubs, "pauli"));
        assert!(gaz.contains(EntityLabel::Clubs, "wolfsburg"));
        assert_eq!(gaz.forms(EntityLabel::Cities).len(), 1);
    }
}
