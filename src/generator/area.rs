//! Broadcast area expansion
//!
//! Area tags come in three shapes: `c/XX` for a country, `r/CODE` for a
//! region and `s/XX-YY` for a subdivision. Country and region playlists need
//! them flattened into plain country and region lists.

use std::collections::HashMap;

use crate::models::{Region, Stream, Subdivision};

pub struct AreaResolver<'a> {
    regions: &'a [Region],
    regions_by_code: HashMap<&'a str, &'a Region>,
    subdivisions: HashMap<&'a str, &'a Subdivision>,
}

impl<'a> AreaResolver<'a> {
    pub fn new(regions: &'a [Region], subdivisions: &'a [Subdivision]) -> Self {
        Self {
            regions,
            regions_by_code: regions.iter().map(|r| (r.code.as_str(), r)).collect(),
            subdivisions: subdivisions.iter().map(|s| (s.code.as_str(), s)).collect(),
        }
    }

    /// Country codes covered by the stream, first mention first, no repeats
    pub fn countries(&self, stream: &Stream) -> Vec<String> {
        let mut codes: Vec<String> = Vec::new();
        for area in &stream.broadcast_area {
            let expanded: Vec<&str> = match area.split_once('/') {
                Some(("c", code)) => vec![code],
                Some(("r", code)) => self
                    .regions_by_code
                    .get(code)
                    .map(|r| r.countries.iter().map(String::as_str).collect())
                    .unwrap_or_default(),
                Some(("s", code)) => self
                    .subdivisions
                    .get(code)
                    .map(|s| vec![s.country.as_str()])
                    .unwrap_or_default(),
                _ => vec![],
            };
            for code in expanded {
                if !codes.iter().any(|c| c == code) {
                    codes.push(code.to_string());
                }
            }
        }
        codes
    }

    /// Regions the stream belongs to, in region list order.
    ///
    /// A region counts when named directly with `r/` or when it contains any
    /// of the stream's countries.
    pub fn regions(&self, stream: &Stream) -> Vec<&'a Region> {
        let countries = self.countries(stream);
        self.regions
            .iter()
            .filter(|region| {
                stream
                    .broadcast_area
                    .iter()
                    .any(|area| area.strip_prefix("r/") == Some(region.code.as_str()))
                    || region.countries.iter().any(|c| countries.contains(c))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions() -> Vec<Region> {
        vec![
            Region {
                code: "EUR".into(),
                name: "Europe".into(),
                countries: vec!["FR".into(), "DE".into()],
            },
            Region {
                code: "NAM".into(),
                name: "North America".into(),
                countries: vec!["US".into(), "CA".into()],
            },
            Region {
                code: "INT".into(),
                name: "International".into(),
                countries: vec![],
            },
        ]
    }

    fn subdivisions() -> Vec<Subdivision> {
        vec![Subdivision {
            code: "CA-QC".into(),
            name: "Quebec".into(),
            country: "CA".into(),
        }]
    }

    fn stream(areas: &[&str]) -> Stream {
        Stream {
            broadcast_area: areas.iter().map(|a| a.to_string()).collect(),
            ..Stream::default()
        }
    }

    #[test]
    fn expands_every_area_kind() {
        let (regions, subdivisions) = (regions(), subdivisions());
        let resolver = AreaResolver::new(&regions, &subdivisions);

        assert_eq!(resolver.countries(&stream(&["c/US"])), vec!["US"]);
        assert_eq!(resolver.countries(&stream(&["r/EUR"])), vec!["FR", "DE"]);
        assert_eq!(resolver.countries(&stream(&["s/CA-QC"])), vec!["CA"]);
        assert_eq!(
            resolver.countries(&stream(&["c/FR", "r/EUR", "s/CA-QC"])),
            vec!["FR", "DE", "CA"]
        );
        assert!(resolver.countries(&stream(&["r/XXX", "bogus"])).is_empty());
    }

    #[test]
    fn region_membership_is_direct_or_through_countries() {
        let (regions, subdivisions) = (regions(), subdivisions());
        let resolver = AreaResolver::new(&regions, &subdivisions);

        let codes = |areas: &[&str]| -> Vec<String> {
            resolver
                .regions(&stream(areas))
                .iter()
                .map(|r| r.code.clone())
                .collect()
        };
        assert_eq!(codes(&["c/DE"]), vec!["EUR"]);
        assert_eq!(codes(&["r/INT"]), vec!["INT"]);
        assert_eq!(codes(&["s/CA-QC", "c/FR"]), vec!["EUR", "NAM"]);
        assert!(codes(&[]).is_empty());
    }
}
