//! In-memory venue search.

use crate::venue::Venue;

/// Normalized search box value.
///
/// Matches a venue when the query is a case-insensitive substring of its
/// name, district, neighborhood or address. An empty (or whitespace-only)
/// query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueQuery {
    needle: String,
}

impl VenueQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.trim().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, venue: &Venue) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        let d = &venue.details;
        [&d.name, &d.district, &d.neighborhood, &d.address]
            .into_iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }

    /// Matching venues, in input order.
    pub fn filter<'q, 'v>(&'q self, venues: &'v [Venue]) -> impl Iterator<Item = &'v Venue> + 'q
    where
        'v: 'q,
    {
        venues.iter().filter(move |v| self.matches(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venue::{VenueDetails, VenueStatus};
    use inventario_core::VenueId;
    use proptest::prelude::*;

    fn venue(name: &str, district: &str, neighborhood: &str, address: &str) -> Venue {
        Venue {
            id: VenueId::new(),
            details: VenueDetails {
                name: name.into(),
                district: district.into(),
                neighborhood: neighborhood.into(),
                address: address.into(),
                administrator: "no-match-field".into(),
                ..VenueDetails::default()
            },
            status: VenueStatus::Pending,
            created_at: None,
        }
    }

    #[test]
    fn matches_any_of_the_four_fields() {
        let venues = vec![
            venue("Cancha Siloé", "Comuna 20", "Siloé", "Calle 1"),
            venue("Coliseo", "Comuna 8", "La Base", "Cra 8"),
            venue("Piscina", "Comuna 2", "Granada", "Av 6N"),
        ];

        let q = VenueQuery::new("  comuna 8 ");
        let names: Vec<_> = q.filter(&venues).map(|v| v.details.name.as_str()).collect();
        assert_eq!(names, vec!["Coliseo"]);

        let q = VenueQuery::new("GRANADA");
        assert_eq!(q.filter(&venues).count(), 1);

        let q = VenueQuery::new("av 6");
        assert_eq!(q.filter(&venues).count(), 1);
    }

    #[test]
    fn other_fields_are_not_searched() {
        let venues = vec![venue("A", "B", "C", "D")];
        assert_eq!(VenueQuery::new("no-match").filter(&venues).count(), 0);
    }

    #[test]
    fn blank_query_matches_everything() {
        let venues = vec![venue("A", "B", "C", "D"), venue("E", "F", "G", "H")];
        assert_eq!(VenueQuery::new("").filter(&venues).count(), 2);
        assert_eq!(VenueQuery::new("   ").filter(&venues).count(), 2);
    }

    fn field() -> impl Strategy<Value = String> {
        "[a-zA-Z ]{0,8}"
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the filter keeps exactly the venues where the trimmed,
        /// lowercased query occurs in one of the four searchable fields.
        #[test]
        fn filter_is_exactly_the_substring_predicate(
            rows in prop::collection::vec((field(), field(), field(), field()), 0..12),
            raw in "[a-zA-Z ]{0,4}",
        ) {
            let venues: Vec<Venue> = rows
                .iter()
                .map(|(a, b, c, d)| venue(a, b, c, d))
                .collect();
            let query = VenueQuery::new(&raw);
            let needle = raw.trim().to_lowercase();

            let got: Vec<VenueId> = query.filter(&venues).map(|v| v.id).collect();
            let expected: Vec<VenueId> = venues
                .iter()
                .filter(|v| {
                    let d = &v.details;
                    needle.is_empty()
                        || d.name.to_lowercase().contains(&needle)
                        || d.district.to_lowercase().contains(&needle)
                        || d.neighborhood.to_lowercase().contains(&needle)
                        || d.address.to_lowercase().contains(&needle)
                })
                .map(|v| v.id)
                .collect();

            prop_assert_eq!(got, expected);
            if needle.is_empty() {
                prop_assert_eq!(query.filter(&venues).count(), venues.len());
            }
        }
    }
}
