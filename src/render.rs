//! Plain-text rendering of controller snapshots, shared by the CLI
//! subcommands and the dashboard's detail pane.

use std::fmt::Write as _;

use time::macros::format_description;
use time::OffsetDateTime;

use crate::catalog::Catalog;
use crate::draft::ProfileDiff;
use crate::model::{bio_segments, website_label, ArtistProfile, BioSegment};
use crate::search::{SearchSnapshot, SearchStatus};
use crate::selection::DetailView;
use crate::trends::{Metric, Series};

pub fn format_date(at: OffsetDateTime) -> String {
    at.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| at.to_string())
}

pub fn format_timestamp(at: OffsetDateTime) -> String {
    at.format(format_description!("[year]-[month]-[day] [hour]:[minute] UTC"))
        .unwrap_or_else(|_| at.to_string())
}

/// `1234567` -> `1,234,567`
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_change(change: i64) -> String {
    let sign = if change >= 0 { "+" } else { "-" };
    format!("{}{}", sign, format_count(change.unsigned_abs()))
}

/// Country title for a stored code; unknown codes are shown raw.
pub fn country_label(catalog: &Catalog, code: &str) -> String {
    if code.trim().is_empty() {
        return "-".to_string();
    }
    match catalog.country_by_code(code) {
        Some(country) => format!("{} ({})", country.title, country.wire_code()),
        None => code.to_string(),
    }
}

/// Display names of known tags, comma separated.
pub fn tags_label(catalog: &Catalog, slugs: &[String]) -> String {
    let names = catalog.display_tags(slugs);
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(", ")
    }
}

/// One-line summary of a series, for status lines and CLI output.
pub fn series_summary(series: &Series) -> String {
    match series {
        Series::Loading => "loading...".to_string(),
        Series::Empty => "no data".to_string(),
        Series::Points(points) => {
            let last = points.last().map(|point| point.value).unwrap_or_default();
            let mut line = format!("{} ({} points", format_count(last), points.len());
            if let Some(change) = series.change() {
                let _ = write!(line, ", {}", format_change(change));
            }
            if let Some((min, max)) = series.bounds() {
                let _ = write!(line, ", min {} max {}", format_count(min), format_count(max));
            }
            line.push(')');
            line
        }
    }
}

pub fn bio_text(bio: &str) -> String {
    bio_segments(bio)
        .into_iter()
        .map(|segment| match segment {
            BioSegment::Text(text) => text,
            BioSegment::Mention { handle, url } => format!("@{} <{}>", handle, url),
        })
        .collect()
}

pub fn list_row(catalog: &Catalog, profile: &ArtistProfile) -> String {
    let country = profile
        .country
        .as_deref()
        .filter(|code| !code.is_empty())
        .map(|code| code.to_ascii_uppercase())
        .unwrap_or_else(|| "--".to_string());
    format!(
        "{:<12} @{:<20} {:<28} {:<3} {}",
        profile.user_id,
        profile.username,
        profile.display_name(),
        country,
        tags_label(catalog, &profile.tags)
    )
}

pub fn render_list(catalog: &Catalog, snapshot: &SearchSnapshot) -> String {
    match &snapshot.status {
        SearchStatus::Idle => "No search issued.\n".to_string(),
        SearchStatus::Loading => "Loading...\n".to_string(),
        SearchStatus::Failed(message) => format!("Search failed: {}\n", message),
        SearchStatus::Ready if snapshot.items.is_empty() => "No artists found.\n".to_string(),
        SearchStatus::Ready => {
            let mut out = String::new();
            for profile in &snapshot.items {
                out.push_str(&list_row(catalog, profile));
                out.push('\n');
            }
            if snapshot.has_next {
                out.push_str("(more results on the next page)\n");
            }
            out
        }
    }
}

pub fn render_profile(catalog: &Catalog, profile: &ArtistProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (@{})", profile.display_name(), profile.username);
    let _ = writeln!(out, "Profile:   {}", profile.profile_url());
    let _ = writeln!(out, "User ID:   {}", profile.user_id);
    let _ = writeln!(
        out,
        "Country:   {}",
        country_label(catalog, profile.country.as_deref().unwrap_or_default())
    );
    if let Some(flag) = profile
        .country
        .as_deref()
        .and_then(|code| catalog.country_by_code(code))
        .and_then(|country| country.flag_url())
    {
        let _ = writeln!(out, "Flag:      {}", flag);
    }
    let _ = writeln!(out, "Tags:      {}", tags_label(catalog, &profile.tags));
    match profile.website.as_deref().filter(|site| !site.is_empty()) {
        Some(site) => {
            let _ = writeln!(out, "Website:   {} <{}>", website_label(site), site);
        }
        None => {
            let _ = writeln!(out, "Website:   -");
        }
    }
    let _ = writeln!(out, "Followers: {}", format_count(profile.followers_count));
    let _ = writeln!(out, "Tweets:    {}", format_count(profile.tweets_count));
    let _ = writeln!(out, "Joined:    {}", format_date(profile.joined_at));
    let _ = writeln!(out, "Tracked:   {}", format_date(profile.created_at));
    let _ = writeln!(out, "Updated:   {}", format_timestamp(profile.last_updated_at));
    if let Some(bio) = profile.bio.as_deref().filter(|bio| !bio.is_empty()) {
        let _ = writeln!(out, "\n{}", bio_text(bio));
    }
    out
}

pub fn render_detail(catalog: &Catalog, view: &DetailView) -> String {
    let Some(profile) = view.profile() else {
        return "Nothing selected.\n".to_string();
    };

    let mut out = render_profile(catalog, profile);
    out.push('\n');
    if let DetailView::Failed { error, .. } = view {
        let _ = writeln!(out, "Trends unavailable: {}", error);
        return out;
    }
    for metric in Metric::ALL {
        let series = Series::from_detail(view, metric);
        let _ = writeln!(out, "{:<10} {}", format!("{}:", metric.label()), series_summary(&series));
    }
    out
}

pub fn render_diff(diff: &ProfileDiff) -> String {
    if diff.is_empty() {
        return "No changes.\n".to_string();
    }
    let mut out = String::new();
    for (field, value) in diff.iter() {
        let _ = writeln!(out, "{:<9} -> {}", field.label(), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{ProfileEditor, ProfileField};
    use crate::error::ApiError;
    use crate::model::fixtures;
    use crate::trends::project;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
        assert_eq!(format_change(-1500), "-1,500");
        assert_eq!(format_change(0), "+0");
    }

    #[test]
    fn test_country_label() {
        let catalog = catalog();
        assert_eq!(country_label(&catalog, "us"), "United States (us)");
        assert_eq!(country_label(&catalog, "zz"), "zz");
        assert_eq!(country_label(&catalog, ""), "-");
    }

    #[test]
    fn test_tags_label_skips_unknown() {
        let tags = vec!["hiphop".to_string(), "retired".to_string()];
        assert_eq!(tags_label(&catalog(), &tags), "Hip Hop");
        assert_eq!(tags_label(&catalog(), &[]), "-");
    }

    #[test]
    fn test_series_summary() {
        let points = vec![fixtures::trend(0, 1000, 1), fixtures::trend(1, 1500, 2)];
        let series = project(Some(points.as_slice()), Metric::Followers);
        assert_eq!(series_summary(&series), "1,500 (2 points, +500, min 1,000 max 1,500)");
        assert_eq!(series_summary(&Series::Loading), "loading...");
        assert_eq!(series_summary(&Series::Empty), "no data");
    }

    #[test]
    fn test_bio_text_links_mentions() {
        assert_eq!(
            bio_text("Collabs with @friend"),
            "Collabs with @friend <https://x.com/friend>"
        );
    }

    #[test]
    fn test_render_detail_loaded() {
        let view = DetailView::Loaded {
            profile: fixtures::profile("1", "beatsmith"),
            trends: vec![fixtures::trend(0, 10, 1), fixtures::trend(1, 12, 4)],
        };
        let text = render_detail(&catalog(), &view);
        assert!(text.contains("beatsmith Name (@beatsmith)"));
        assert!(text.contains("United States (us)"));
        assert!(text.contains("https://flagcdn.com/us.svg"));
        assert!(text.contains("example.com <https://www.example.com>"));
        assert!(text.contains("Hip Hop, Pop"));
        assert!(text.contains("Joined:    2015-06-15"));
        assert!(text.contains("Updated:   2024-03-05 12:45 UTC"));
        assert!(text.contains("Followers: 12 (2 points, +2"));
    }

    #[test]
    fn test_render_detail_failed() {
        let view = DetailView::Failed {
            profile: fixtures::profile("1", "beatsmith"),
            error: ApiError::NotFound("trends for 1".to_string()),
        };
        let text = render_detail(&catalog(), &view);
        assert!(text.contains("Trends unavailable: not found: trends for 1"));
        assert_eq!(render_detail(&catalog(), &DetailView::Empty), "Nothing selected.\n");
    }

    #[test]
    fn test_render_list_states() {
        let catalog = catalog();
        let mut snapshot = SearchSnapshot {
            status: SearchStatus::Loading,
            ..SearchSnapshot::default()
        };
        assert_eq!(render_list(&catalog, &snapshot), "Loading...\n");

        snapshot.status = SearchStatus::Ready;
        assert_eq!(render_list(&catalog, &snapshot), "No artists found.\n");

        snapshot.items = vec![fixtures::profile("7", "beatsmith")];
        snapshot.has_next = true;
        let text = render_list(&catalog, &snapshot);
        assert!(text.contains("@beatsmith"));
        assert!(text.contains(" US "));
        assert!(text.contains("next page"));
    }

    #[test]
    fn test_render_diff() {
        let mut editor = ProfileEditor::new(fixtures::profile("1", "beatsmith"));
        editor.enter_edit();
        assert_eq!(render_diff(&editor.diff()), "No changes.\n");
        editor
            .set_field(&catalog(), ProfileField::Tags, "Jazz, Soul")
            .unwrap();
        assert_eq!(render_diff(&editor.diff()), "Tags      -> jazz, soul\n");
    }
}
