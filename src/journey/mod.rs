//! Map journey: documents grouped by geocoded location
//!
//! Every located, geocoded document becomes a journey point. Points are
//! grouped into stops by location; stops are ordered by their earliest
//! document, so scrolling the journey follows the corpus chronologically.
//! Each stop carries a theme-frequency table — the "theme cloud" the front
//! end renders as a filter control.

use crate::corpus::{Corpus, DateKey, DocId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::collections::HashMap;
use tracing::warn;

/// A geographic coordinate from the gazetteer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Location name → coordinates, from `places.json`
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    places: IndexMap<String, GeoPoint>,
}

impl Gazetteer {
    pub fn from_map(places: impl IntoIterator<Item = (String, GeoPoint)>) -> Self {
        Gazetteer {
            places: places.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, point: GeoPoint) {
        self.places.insert(name.into(), point);
    }

    pub fn get(&self, name: &str) -> Option<GeoPoint> {
        self.places.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

/// One document plotted on the map
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyPoint {
    pub doc: DocId,
    pub title: String,
    pub date: Option<DateKey>,
    pub year: Option<i32>,
    pub location: String,
    pub geo: GeoPoint,
    pub themes: BTreeSet<String>,
}

/// Theme with its document count at a stop
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeCount {
    pub theme: String,
    pub count: usize,
}

/// All documents at one location, in chronological order
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationStop {
    pub location: String,
    pub geo: GeoPoint,
    pub documents: Vec<JourneyPoint>,
    /// Themes at this stop, most frequent first, ties alphabetical
    pub theme_cloud: Vec<ThemeCount>,
    pub first_date: Option<DateKey>,
    /// Min/max year over dated documents at this stop
    pub year_span: Option<(i32, i32)>,
}

/// The full journey: ordered stops plus a tally of documents whose
/// location had no gazetteer entry
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    pub stops: Vec<LocationStop>,
    pub skipped: usize,
}

impl Journey {
    /// Group the corpus into a journey
    ///
    /// Documents without a location are silently excluded (they still show
    /// in the graph and tree); documents whose location is missing from the
    /// gazetteer are counted in `skipped`.
    pub fn build(corpus: &Corpus, gazetteer: &Gazetteer) -> Self {
        Self::build_filtered(corpus, gazetteer, None)
    }

    /// Build restricted to documents carrying `theme`
    pub fn build_filtered(corpus: &Corpus, gazetteer: &Gazetteer, theme: Option<&str>) -> Self {
        let mut groups: IndexMap<String, Vec<JourneyPoint>> = IndexMap::new();
        let mut skipped = 0usize;

        for doc in corpus.documents() {
            let Some(location) = doc.location.as_deref() else {
                continue;
            };
            if let Some(theme) = theme {
                if !doc.has_theme(theme) {
                    continue;
                }
            }
            let Some(geo) = gazetteer.get(location) else {
                warn!(location, id = doc.id.as_u64(), "location not in gazetteer");
                skipped += 1;
                continue;
            };
            groups.entry(location.to_string()).or_default().push(JourneyPoint {
                doc: doc.id,
                title: doc.title.clone(),
                date: doc.date,
                year: doc.year(),
                location: location.to_string(),
                geo,
                themes: doc.themes.clone(),
            });
        }

        let mut stops: Vec<LocationStop> = groups
            .into_iter()
            .map(|(location, mut documents)| {
                documents.sort_by_key(|p| (p.date.is_none(), p.date, p.doc));

                let theme_cloud = theme_cloud(&documents);
                let first_date = documents.iter().filter_map(|p| p.date).min();
                let year_span = year_span(&documents);
                let geo = documents[0].geo;

                LocationStop {
                    location,
                    geo,
                    documents,
                    theme_cloud,
                    first_date,
                    year_span,
                }
            })
            .collect();

        // chronological journey: stops with no dated document come last
        stops.sort_by(|a, b| {
            (a.first_date.is_none(), a.first_date, &a.location)
                .cmp(&(b.first_date.is_none(), b.first_date, &b.location))
        });

        Journey { stops, skipped }
    }

    /// Restrict an existing journey to a theme, recomputing clouds
    pub fn filter_theme(&self, theme: &str) -> Journey {
        let mut stops: Vec<LocationStop> = Vec::new();
        for stop in &self.stops {
            let documents: Vec<JourneyPoint> = stop
                .documents
                .iter()
                .filter(|p| p.themes.contains(theme))
                .cloned()
                .collect();
            if documents.is_empty() {
                continue;
            }
            let theme_cloud = theme_cloud(&documents);
            let first_date = documents.iter().filter_map(|p| p.date).min();
            let year_span = year_span(&documents);
            stops.push(LocationStop {
                location: stop.location.clone(),
                geo: stop.geo,
                documents,
                theme_cloud,
                first_date,
                year_span,
            });
        }
        stops.sort_by(|a, b| {
            (a.first_date.is_none(), a.first_date, &a.location)
                .cmp(&(b.first_date.is_none(), b.first_date, &b.location))
        });
        Journey {
            stops,
            skipped: self.skipped,
        }
    }

    /// Total number of plotted documents
    pub fn point_count(&self) -> usize {
        self.stops.iter().map(|s| s.documents.len()).sum()
    }
}

fn theme_cloud(documents: &[JourneyPoint]) -> Vec<ThemeCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for point in documents {
        for theme in &point.themes {
            *counts.entry(theme.as_str()).or_insert(0) += 1;
        }
    }
    let mut cloud: Vec<ThemeCount> = counts
        .into_iter()
        .map(|(theme, count)| ThemeCount {
            theme: theme.to_string(),
            count,
        })
        .collect();
    cloud.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.theme.cmp(&b.theme)));
    cloud
}

fn year_span(documents: &[JourneyPoint]) -> Option<(i32, i32)> {
    let mut span: Option<(i32, i32)> = None;
    for point in documents {
        if let Some(y) = point.year {
            span = Some(match span {
                Some((lo, hi)) => (lo.min(y), hi.max(y)),
                None => (y, y),
            });
        }
    }
    span
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Document;

    fn corpus() -> Corpus {
        Corpus::from_documents(vec![
            Document::new(1, "Arrival", "1915-01-09", Some("Bombay"), ["Return"], ""),
            Document::new(2, "Ashram founded", "1915-05", Some("Ahmedabad"), ["Ashram", "Khadi"], ""),
            Document::new(3, "Khadi speech", "1921-08-01", Some("Ahmedabad"), ["Khadi"], ""),
            Document::new(4, "Undated letter", "", Some("Ahmedabad"), ["Khadi"], ""),
            Document::new(5, "No location", "1916", None, ["Return"], ""),
            Document::new(6, "Unknown place", "1917", Some("Atlantis"), ["Return"], ""),
        ])
    }

    fn gazetteer() -> Gazetteer {
        let mut g = Gazetteer::default();
        g.insert("Bombay", GeoPoint { lat: 18.94, lon: 72.83 });
        g.insert("Ahmedabad", GeoPoint { lat: 23.03, lon: 72.58 });
        g
    }

    #[test]
    fn test_stops_in_chronological_order() {
        let journey = Journey::build(&corpus(), &gazetteer());
        let names: Vec<&str> = journey.stops.iter().map(|s| s.location.as_str()).collect();
        assert_eq!(names, vec!["Bombay", "Ahmedabad"]);
        assert_eq!(journey.point_count(), 4);
    }

    #[test]
    fn test_missing_gazetteer_entry_counted() {
        let journey = Journey::build(&corpus(), &gazetteer());
        assert_eq!(journey.skipped, 1);
        // the locationless document is excluded but not "skipped"
        assert!(journey.stops.iter().all(|s| s.location != "Atlantis"));
    }

    #[test]
    fn test_documents_sorted_undated_last() {
        let journey = Journey::build(&corpus(), &gazetteer());
        let ahmedabad = &journey.stops[1];
        let ids: Vec<u64> = ahmedabad.documents.iter().map(|p| p.doc.as_u64()).collect();
        assert_eq!(ids, vec![2, 3, 4]);
        assert_eq!(ahmedabad.year_span, Some((1915, 1921)));
    }

    #[test]
    fn test_theme_cloud_counts_and_order() {
        let journey = Journey::build(&corpus(), &gazetteer());
        let cloud = &journey.stops[1].theme_cloud;
        assert_eq!(cloud[0], ThemeCount { theme: "Khadi".into(), count: 3 });
        assert_eq!(cloud[1], ThemeCount { theme: "Ashram".into(), count: 1 });
    }

    #[test]
    fn test_filter_theme_drops_empty_stops() {
        let journey = Journey::build(&corpus(), &gazetteer());
        let khadi = journey.filter_theme("Khadi");
        assert_eq!(khadi.stops.len(), 1);
        assert_eq!(khadi.stops[0].location, "Ahmedabad");
        assert_eq!(khadi.point_count(), 3);
        // cloud recomputed over the filtered set
        assert!(khadi.stops[0].theme_cloud.iter().any(|t| t.theme == "Ashram"));
    }

    #[test]
    fn test_build_filtered_matches_filter_theme() {
        let full = Journey::build(&corpus(), &gazetteer());
        let a = full.filter_theme("Return");
        let b = Journey::build_filtered(&corpus(), &gazetteer(), Some("Return"));
        assert_eq!(a.stops.len(), b.stops.len());
        assert_eq!(a.point_count(), b.point_count());
    }
}
