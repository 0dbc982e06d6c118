//! Reference catalogs: country codes and the canonical tag vocabulary.
//!
//! Both tables are immutable after startup. A `Catalog` is built once in
//! `main` and handed to every component by reference.

use std::collections::HashMap;
use std::fmt;

use crate::error::CatalogError;

/// Default tag vocabulary, in display order.
pub const DEFAULT_TAGS: &[&str] = &[
    "Pop",
    "Hip Hop",
    "R&B",
    "Rock",
    "Electronic",
    "Latin",
    "K-Pop",
    "Indie",
    "Jazz",
    "Soul",
    "Lo-Fi",
];

const FLAG_CDN: &str = "https://flagcdn.com";

/// A country as shown in pickers: display title plus upper-case ISO code.
///
/// `CountryCode::none()` (both fields empty) means "no country selected".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CountryCode {
    pub title: String,
    pub value: String,
}

impl CountryCode {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
        }
    }

    /// The "no country selected" sentinel.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.value.is_empty()
    }

    /// Lower-case code as stored on profiles and carried in query strings.
    pub fn wire_code(&self) -> String {
        self.value.to_ascii_lowercase()
    }

    pub fn flag_url(&self) -> Option<String> {
        if self.is_none() {
            None
        } else {
            Some(format!("{}/{}.svg", FLAG_CDN, self.wire_code()))
        }
    }
}

/// Normalized tag identifier: lowercase with all whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagSlug(String);

impl TagSlug {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TagSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TagSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Derive the slug for a display tag (`"Hip Hop"` -> `"hiphop"`).
pub fn slug_of(tag: &str) -> TagSlug {
    let compact: String = tag.chars().filter(|c| !c.is_whitespace()).collect();
    TagSlug(compact.to_lowercase())
}

#[derive(Debug, Clone)]
pub struct Catalog {
    countries: Vec<CountryCode>,
    tags: Vec<String>,
    slug_index: HashMap<TagSlug, usize>,
}

impl Catalog {
    /// Build a catalog with a custom tag vocabulary.
    ///
    /// Fails when a tag is blank or two tags share a slug.
    pub fn new<I, S>(tags: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        let mut slug_index = HashMap::new();

        for (idx, tag) in tags.iter().enumerate() {
            let slug = slug_of(tag);
            if slug.as_str().is_empty() {
                return Err(CatalogError::EmptyTag);
            }
            if let Some(&existing) = slug_index.get(&slug) {
                let first: &String = &tags[existing];
                return Err(CatalogError::SlugCollision {
                    first: first.clone(),
                    second: tag.clone(),
                    slug: slug.into_string(),
                });
            }
            slug_index.insert(slug, idx);
        }

        let mut countries: Vec<CountryCode> = COUNTRIES
            .iter()
            .map(|(title, value)| CountryCode::new(*title, *value))
            .collect();
        countries.sort_by(|a, b| a.title.cmp(&b.title));

        Ok(Self {
            countries,
            tags,
            slug_index,
        })
    }

    /// Catalog with the built-in vocabulary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(DEFAULT_TAGS.iter().copied())
    }

    pub fn all_countries(&self) -> &[CountryCode] {
        &self.countries
    }

    /// Case-insensitive lookup by ISO code. The empty code is not a country.
    pub fn country_by_code(&self, code: &str) -> Option<&CountryCode> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        self.countries
            .iter()
            .find(|country| country.value.eq_ignore_ascii_case(code))
    }

    /// Countries whose title contains `text`, ignoring case.
    pub fn search_countries(&self, text: &str) -> Vec<&CountryCode> {
        let needle = text.trim().to_lowercase();
        self.countries
            .iter()
            .filter(|country| needle.is_empty() || country.title.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn canonical_tags(&self) -> &[String] {
        &self.tags
    }

    /// First canonical tag whose slug matches.
    pub fn display_of(&self, slug: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| slug_of(tag).as_str() == slug)
            .map(String::as_str)
    }

    pub fn is_known_slug(&self, slug: &str) -> bool {
        self.slug_index.contains_key(&TagSlug(slug.to_string()))
    }

    /// Resolve user input (display tag or slug) to a known slug.
    pub fn resolve_tag(&self, input: &str) -> Option<TagSlug> {
        let slug = slug_of(input);
        if self.slug_index.contains_key(&slug) {
            Some(slug)
        } else {
            None
        }
    }

    /// Display titles for a list of stored slugs; unknown slugs are omitted.
    pub fn display_tags<'a, I>(&'a self, slugs: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a String>,
    {
        slugs
            .into_iter()
            .filter_map(|slug| self.display_of(slug))
            .collect()
    }
}

/// ISO 3166-1 alpha-2 codes with English short names.
const COUNTRIES: &[(&str, &str)] = &[
    ("Afghanistan", "AF"),
    ("Albania", "AL"),
    ("Algeria", "DZ"),
    ("Andorra", "AD"),
    ("Angola", "AO"),
    ("Antigua and Barbuda", "AG"),
    ("Argentina", "AR"),
    ("Armenia", "AM"),
    ("Australia", "AU"),
    ("Austria", "AT"),
    ("Azerbaijan", "AZ"),
    ("Bahamas", "BS"),
    ("Bahrain", "BH"),
    ("Bangladesh", "BD"),
    ("Barbados", "BB"),
    ("Belarus", "BY"),
    ("Belgium", "BE"),
    ("Belize", "BZ"),
    ("Benin", "BJ"),
    ("Bhutan", "BT"),
    ("Bolivia", "BO"),
    ("Bosnia and Herzegovina", "BA"),
    ("Botswana", "BW"),
    ("Brazil", "BR"),
    ("Brunei", "BN"),
    ("Bulgaria", "BG"),
    ("Burkina Faso", "BF"),
    ("Burundi", "BI"),
    ("Cabo Verde", "CV"),
    ("Cambodia", "KH"),
    ("Cameroon", "CM"),
    ("Canada", "CA"),
    ("Central African Republic", "CF"),
    ("Chad", "TD"),
    ("Chile", "CL"),
    ("China", "CN"),
    ("Colombia", "CO"),
    ("Comoros", "KM"),
    ("Congo", "CG"),
    ("Costa Rica", "CR"),
    ("Croatia", "HR"),
    ("Cuba", "CU"),
    ("Cyprus", "CY"),
    ("Czechia", "CZ"),
    ("Denmark", "DK"),
    ("Djibouti", "DJ"),
    ("Dominica", "DM"),
    ("Dominican Republic", "DO"),
    ("DR Congo", "CD"),
    ("Ecuador", "EC"),
    ("Egypt", "EG"),
    ("El Salvador", "SV"),
    ("Equatorial Guinea", "GQ"),
    ("Eritrea", "ER"),
    ("Estonia", "EE"),
    ("Eswatini", "SZ"),
    ("Ethiopia", "ET"),
    ("Fiji", "FJ"),
    ("Finland", "FI"),
    ("France", "FR"),
    ("Gabon", "GA"),
    ("Gambia", "GM"),
    ("Georgia", "GE"),
    ("Germany", "DE"),
    ("Ghana", "GH"),
    ("Greece", "GR"),
    ("Grenada", "GD"),
    ("Guatemala", "GT"),
    ("Guinea", "GN"),
    ("Guinea-Bissau", "GW"),
    ("Guyana", "GY"),
    ("Haiti", "HT"),
    ("Honduras", "HN"),
    ("Hong Kong", "HK"),
    ("Hungary", "HU"),
    ("Iceland", "IS"),
    ("India", "IN"),
    ("Indonesia", "ID"),
    ("Iran", "IR"),
    ("Iraq", "IQ"),
    ("Ireland", "IE"),
    ("Israel", "IL"),
    ("Italy", "IT"),
    ("Ivory Coast", "CI"),
    ("Jamaica", "JM"),
    ("Japan", "JP"),
    ("Jordan", "JO"),
    ("Kazakhstan", "KZ"),
    ("Kenya", "KE"),
    ("Kiribati", "KI"),
    ("Kosovo", "XK"),
    ("Kuwait", "KW"),
    ("Kyrgyzstan", "KG"),
    ("Laos", "LA"),
    ("Latvia", "LV"),
    ("Lebanon", "LB"),
    ("Lesotho", "LS"),
    ("Liberia", "LR"),
    ("Libya", "LY"),
    ("Liechtenstein", "LI"),
    ("Lithuania", "LT"),
    ("Luxembourg", "LU"),
    ("Madagascar", "MG"),
    ("Malawi", "MW"),
    ("Malaysia", "MY"),
    ("Maldives", "MV"),
    ("Mali", "ML"),
    ("Malta", "MT"),
    ("Marshall Islands", "MH"),
    ("Mauritania", "MR"),
    ("Mauritius", "MU"),
    ("Mexico", "MX"),
    ("Micronesia", "FM"),
    ("Moldova", "MD"),
    ("Monaco", "MC"),
    ("Mongolia", "MN"),
    ("Montenegro", "ME"),
    ("Morocco", "MA"),
    ("Mozambique", "MZ"),
    ("Myanmar", "MM"),
    ("Namibia", "NA"),
    ("Nauru", "NR"),
    ("Nepal", "NP"),
    ("Netherlands", "NL"),
    ("New Zealand", "NZ"),
    ("Nicaragua", "NI"),
    ("Niger", "NE"),
    ("Nigeria", "NG"),
    ("North Korea", "KP"),
    ("North Macedonia", "MK"),
    ("Norway", "NO"),
    ("Oman", "OM"),
    ("Pakistan", "PK"),
    ("Palau", "PW"),
    ("Palestine", "PS"),
    ("Panama", "PA"),
    ("Papua New Guinea", "PG"),
    ("Paraguay", "PY"),
    ("Peru", "PE"),
    ("Philippines", "PH"),
    ("Poland", "PL"),
    ("Portugal", "PT"),
    ("Puerto Rico", "PR"),
    ("Qatar", "QA"),
    ("Romania", "RO"),
    ("Russia", "RU"),
    ("Rwanda", "RW"),
    ("Saint Kitts and Nevis", "KN"),
    ("Saint Lucia", "LC"),
    ("Saint Vincent and the Grenadines", "VC"),
    ("Samoa", "WS"),
    ("San Marino", "SM"),
    ("Sao Tome and Principe", "ST"),
    ("Saudi Arabia", "SA"),
    ("Senegal", "SN"),
    ("Serbia", "RS"),
    ("Seychelles", "SC"),
    ("Sierra Leone", "SL"),
    ("Singapore", "SG"),
    ("Slovakia", "SK"),
    ("Slovenia", "SI"),
    ("Solomon Islands", "SB"),
    ("Somalia", "SO"),
    ("South Africa", "ZA"),
    ("South Korea", "KR"),
    ("South Sudan", "SS"),
    ("Spain", "ES"),
    ("Sri Lanka", "LK"),
    ("Sudan", "SD"),
    ("Suriname", "SR"),
    ("Sweden", "SE"),
    ("Switzerland", "CH"),
    ("Syria", "SY"),
    ("Taiwan", "TW"),
    ("Tajikistan", "TJ"),
    ("Tanzania", "TZ"),
    ("Thailand", "TH"),
    ("Timor-Leste", "TL"),
    ("Togo", "TG"),
    ("Tonga", "TO"),
    ("Trinidad and Tobago", "TT"),
    ("Tunisia", "TN"),
    ("Turkey", "TR"),
    ("Turkmenistan", "TM"),
    ("Tuvalu", "TV"),
    ("Uganda", "UG"),
    ("Ukraine", "UA"),
    ("United Arab Emirates", "AE"),
    ("United Kingdom", "GB"),
    ("United States", "US"),
    ("Uruguay", "UY"),
    ("Uzbekistan", "UZ"),
    ("Vanuatu", "VU"),
    ("Vatican City", "VA"),
    ("Venezuela", "VE"),
    ("Vietnam", "VN"),
    ("Yemen", "YE"),
    ("Zambia", "ZM"),
    ("Zimbabwe", "ZW"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_of_strips_whitespace_and_lowercases() {
        assert_eq!(slug_of("Hip Hop").as_str(), "hiphop");
        assert_eq!(slug_of("  Lo-Fi ").as_str(), "lo-fi");
        assert_eq!(slug_of("R&B").as_str(), "r&b");
        assert_eq!(slug_of("Hip\tHop").as_str(), "hiphop");
    }

    #[test]
    fn test_display_of_reverses_slug() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.display_of("hiphop"), Some("Hip Hop"));
        assert_eq!(catalog.display_of("k-pop"), Some("K-Pop"));
        assert_eq!(catalog.display_of("polka"), None);
    }

    #[test]
    fn test_builtin_vocabulary_is_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.canonical_tags().len(), DEFAULT_TAGS.len());
        for tag in catalog.canonical_tags() {
            assert!(catalog.is_known_slug(slug_of(tag).as_str()));
        }
    }

    #[test]
    fn test_slug_collision_is_rejected() {
        let err = Catalog::new(["Hip Hop", "HipHop"]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::SlugCollision {
                first: "Hip Hop".to_string(),
                second: "HipHop".to_string(),
                slug: "hiphop".to_string(),
            }
        );
    }

    #[test]
    fn test_blank_tag_is_rejected() {
        assert_eq!(Catalog::new(["Pop", "  "]).unwrap_err(), CatalogError::EmptyTag);
    }

    #[test]
    fn test_country_lookup_is_case_insensitive() {
        let catalog = Catalog::builtin().unwrap();
        let us = catalog.country_by_code("us").unwrap();
        assert_eq!(us.title, "United States");
        assert_eq!(us.value, "US");
        assert_eq!(us.wire_code(), "us");
        assert_eq!(catalog.country_by_code("US"), Some(us));
        assert!(catalog.country_by_code("zz").is_none());
        assert!(catalog.country_by_code("").is_none());
    }

    #[test]
    fn test_sentinel_is_distinct_from_lookup_miss() {
        let sentinel = CountryCode::none();
        assert!(sentinel.is_none());
        assert_eq!(sentinel.flag_url(), None);

        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.all_countries().iter().all(|c| !c.is_none()));
    }

    #[test]
    fn test_countries_are_sorted_by_title() {
        let catalog = Catalog::builtin().unwrap();
        let titles: Vec<&str> = catalog.all_countries().iter().map(|c| c.title.as_str()).collect();
        let mut sorted = titles.clone();
        sorted.sort();
        assert_eq!(titles, sorted);
    }

    #[test]
    fn test_country_codes_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for (_, code) in COUNTRIES {
            assert!(seen.insert(*code), "duplicate country code {}", code);
        }
    }

    #[test]
    fn test_search_countries_filters_by_title() {
        let catalog = Catalog::builtin().unwrap();
        let hits: Vec<&str> = catalog
            .search_countries("united")
            .into_iter()
            .map(|c| c.value.as_str())
            .collect();
        assert_eq!(hits, vec!["AE", "GB", "US"]);
        assert_eq!(catalog.search_countries("").len(), catalog.all_countries().len());
    }

    #[test]
    fn test_flag_url() {
        let catalog = Catalog::builtin().unwrap();
        let jp = catalog.country_by_code("JP").unwrap();
        assert_eq!(jp.flag_url().as_deref(), Some("https://flagcdn.com/jp.svg"));
    }

    #[test]
    fn test_display_tags_omits_unknown() {
        let catalog = Catalog::builtin().unwrap();
        let stored = vec!["hiphop".to_string(), "polka".to_string(), "pop".to_string()];
        assert_eq!(catalog.display_tags(&stored), vec!["Hip Hop", "Pop"]);
    }

    #[test]
    fn test_resolve_tag_accepts_display_or_slug() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.resolve_tag("Hip Hop").unwrap().as_str(), "hiphop");
        assert_eq!(catalog.resolve_tag("hiphop").unwrap().as_str(), "hiphop");
        assert!(catalog.resolve_tag("Polka").is_none());
    }
}
