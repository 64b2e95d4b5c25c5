//! Accept header parsing

/// The media range that matches every representation
pub const WILDCARD: &str = "*/*";

/// Normalizes a mimetype for registry keys and comparisons.
pub(crate) fn normalize_mimetype(mimetype: &str) -> String {
	mimetype.trim().to_ascii_lowercase()
}

/// A single media range of an Accept header together with its quality factor
#[derive(Debug, Clone, PartialEq)]
pub struct MediaRange {
	/// Lowercased mimetype, e.g. "text/turtle" or "*/*"
	pub mimetype: String,
	/// Quality factor (0.0 to 1.0)
	pub quality: f32,
}

impl MediaRange {
	/// Creates a media range with quality 1.0
	///
	/// # Examples
	///
	/// ```
	/// use rdf_conneg_core::accept::MediaRange;
	///
	/// let range = MediaRange::new("Text/Turtle");
	/// assert_eq!(range.mimetype, "text/turtle");
	/// assert_eq!(range.quality, 1.0);
	/// ```
	pub fn new(mimetype: impl AsRef<str>) -> Self {
		Self {
			mimetype: normalize_mimetype(mimetype.as_ref()),
			quality: 1.0,
		}
	}

	/// Creates a media range with an explicit quality, clamped to 0.0..=1.0
	pub fn with_quality(mimetype: impl AsRef<str>, quality: f32) -> Self {
		Self {
			mimetype: normalize_mimetype(mimetype.as_ref()),
			quality: if quality.is_nan() {
				1.0
			} else {
				quality.clamp(0.0, 1.0)
			},
		}
	}

	/// Parses one comma-separated item of an Accept header (e.g. "text/turtle;q=0.9")
	///
	/// Only the `q` parameter is interpreted. A missing, unparseable or
	/// out-of-range quality leaves the default of 1.0 in place.
	///
	/// # Examples
	///
	/// ```
	/// use rdf_conneg_core::accept::MediaRange;
	///
	/// let range = MediaRange::parse("text/turtle; charset=utf-8; q=0.5").unwrap();
	/// assert_eq!(range.mimetype, "text/turtle");
	/// assert_eq!(range.quality, 0.5);
	///
	/// let malformed = MediaRange::parse("text/n3;q=high").unwrap();
	/// assert_eq!(malformed.quality, 1.0);
	///
	/// assert!(MediaRange::parse("  ").is_none());
	/// ```
	pub fn parse(s: &str) -> Option<Self> {
		let mut parts = s.split(';');
		let mimetype = parts.next()?.trim();
		if mimetype.is_empty() {
			return None;
		}

		let mut quality = 1.0;
		for param in parts {
			if let Some((key, value)) = param.split_once('=')
				&& key.trim().eq_ignore_ascii_case("q")
				&& let Ok(q) = value.trim().parse::<f32>()
				&& (0.0..=1.0).contains(&q)
			{
				quality = q;
			}
		}

		Some(Self {
			mimetype: mimetype.to_ascii_lowercase(),
			quality,
		})
	}

	/// Returns true for the `*/*` range
	pub fn is_wildcard(&self) -> bool {
		self.mimetype == WILDCARD
	}

	/// Returns true when the client explicitly refused this range (`q=0`)
	pub fn is_refused(&self) -> bool {
		self.quality <= 0.0
	}
}

/// Represents a parsed Accept header
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcceptHeader {
	/// Media ranges in the order they appeared in the header
	pub media_ranges: Vec<MediaRange>,
}

impl AcceptHeader {
	/// Parses an Accept header string, keeping header order
	///
	/// # Examples
	///
	/// ```
	/// use rdf_conneg_core::accept::AcceptHeader;
	///
	/// let accept = AcceptHeader::parse("text/turtle;q=0.5, application/rdf+xml");
	/// assert_eq!(accept.media_ranges.len(), 2);
	/// assert_eq!(accept.media_ranges[0].mimetype, "text/turtle");
	/// assert_eq!(accept.media_ranges[1].quality, 1.0);
	/// ```
	pub fn parse(header: &str) -> Self {
		Self {
			media_ranges: header.split(',').filter_map(MediaRange::parse).collect(),
		}
	}

	/// Parses an optional header; an absent header yields an empty AcceptHeader
	pub fn from_option(header: Option<&str>) -> Self {
		header.map(Self::parse).unwrap_or_default()
	}

	/// Creates an AcceptHeader with no media ranges
	pub fn empty() -> Self {
		Self::default()
	}

	/// Returns true when the header expressed no preference at all
	pub fn is_empty(&self) -> bool {
		self.media_ranges.is_empty()
	}

	/// Returns the media ranges ordered by descending quality
	///
	/// Ranges of equal quality keep their header order.
	///
	/// # Examples
	///
	/// ```
	/// use rdf_conneg_core::accept::AcceptHeader;
	///
	/// let accept = AcceptHeader::parse("text/n3;q=0.9, text/turtle, application/rdf+xml;q=0.9");
	/// let ordered: Vec<&str> = accept
	///     .by_preference()
	///     .into_iter()
	///     .map(|range| range.mimetype.as_str())
	///     .collect();
	/// assert_eq!(ordered, ["text/turtle", "text/n3", "application/rdf+xml"]);
	/// ```
	pub fn by_preference(&self) -> Vec<&MediaRange> {
		let mut ordered: Vec<&MediaRange> = self.media_ranges.iter().collect();
		// sort_by is stable, so header order breaks ties
		ordered.sort_by(|a, b| b.quality.total_cmp(&a.quality));
		ordered
	}
}
