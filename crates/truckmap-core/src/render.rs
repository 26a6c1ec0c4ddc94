// crates/truckmap-core/src/render.rs
//! Projection of place details into info window content.
//!
//! Everything here is pure: the same [`PlaceDetails`] always yields the same
//! [`InfoContent`]. Each optional row toggles independently.
use crate::model::{PlaceDetails, PlaceId, Review};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scheme plus host, including the first slash after the host.
static HOSTNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://.+?/").expect("hostname pattern is valid"));

pub const RATING_UNITS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingGlyph {
    Filled,
    Empty,
}

impl RatingGlyph {
    pub const fn as_char(self) -> char {
        match self {
            Self::Filled => '\u{272D}',
            Self::Empty => '\u{2729}',
        }
    }
}

/// Five-unit star bar, rounded to the nearest half.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingBar {
    pub rating: f64,
    pub glyphs: [RatingGlyph; RATING_UNITS],
}

impl RatingBar {
    pub fn filled(&self) -> usize {
        self.glyphs
            .iter()
            .filter(|g| **g == RatingGlyph::Filled)
            .count()
    }
}

impl fmt::Display for RatingBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.glyphs
            .iter()
            .try_for_each(|g| write!(f, "{}", g.as_char()))
    }
}

/// Unit `i` is filled iff `rating >= i + 0.5`.
pub fn rating_glyphs(rating: f64) -> [RatingGlyph; RATING_UNITS] {
    let mut glyphs = [RatingGlyph::Empty; RATING_UNITS];
    for (i, glyph) in glyphs.iter_mut().enumerate() {
        if rating >= i as f64 + 0.5 {
            *glyph = RatingGlyph::Filled;
        }
    }
    glyphs
}

/// A website as shown in the info window: short text, full link target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteLink {
    pub display: String,
    pub href: String,
}

/// Derives the short display form of a website.
///
/// `https://example.com/path` displays as `https://example.com/` and keeps
/// the full URL as link target. A value without a matching scheme+host
/// prefix is taken as a bare host: `example.com` becomes
/// `http://example.com/` for both display and target.
pub fn shorten_website(raw: &str) -> WebsiteLink {
    match HOSTNAME_RE.find(raw) {
        Some(m) => WebsiteLink {
            display: m.as_str().to_owned(),
            href: raw.to_owned(),
        },
        None => {
            let synthesized = format!("http://{raw}/");
            WebsiteLink {
                display: synthesized.clone(),
                href: synthesized,
            }
        }
    }
}

/// Content of the details panel for one place.
///
/// `None` means the row is hidden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoContent {
    pub place_id: Option<PlaceId>,
    pub icon: Option<String>,
    pub name: String,
    pub url: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub rating: Option<RatingBar>,
    pub website: Option<WebsiteLink>,
    pub hours: Option<Vec<String>>,
    pub review: Option<Review>,
    pub photo: Option<String>,
}

impl InfoContent {
    /// Number of optional rows currently visible.
    pub fn visible_rows(&self) -> usize {
        [
            self.phone.is_some(),
            self.rating.is_some(),
            self.website.is_some(),
            self.hours.is_some(),
            self.review.is_some(),
        ]
        .into_iter()
        .filter(|v| *v)
        .count()
    }
}

fn non_blank(v: Option<&String>) -> Option<String> {
    v.map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

pub fn render_details(details: &PlaceDetails) -> InfoContent {
    // A zero rating is treated as "not rated".
    let rating = details
        .rating
        .filter(|r| r.is_finite() && *r > 0.0)
        .map(|r| RatingBar {
            rating: r,
            glyphs: rating_glyphs(r),
        });

    InfoContent {
        place_id: details.place_id.clone(),
        icon: non_blank(details.icon.as_ref()),
        name: details.name.clone(),
        url: non_blank(details.url.as_ref()),
        address: non_blank(details.vicinity.as_ref()),
        phone: non_blank(details.phone.as_ref()),
        rating,
        website: non_blank(details.website.as_ref()).map(|w| shorten_website(&w)),
        hours: details
            .opening_hours
            .as_ref()
            .filter(|lines| !lines.is_empty())
            .cloned(),
        review: details.review.clone(),
        photo: non_blank(details.photo.as_ref()),
    }
}
