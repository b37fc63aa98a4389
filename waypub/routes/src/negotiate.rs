use axum::http::{header, HeaderMap};

/// whether a client would rather receive ActivityStreams than html
///
/// clients that do not negotiate at all get json-ld; clients whose top
/// preference is a browser page type get refused; everyone else qualifies
/// only by explicitly accepting one of the ActivityStreams media types
pub fn accepts_json_ld(headers: &HeaderMap) -> bool {
	let mut entries: Vec<(String, f32)> = Vec::new();
	for value in headers.get_all(header::ACCEPT) {
		let Ok(value) = value.to_str() else { continue };
		for entry in value.split(',') {
			let mut pieces = entry.split(';');
			let media = pieces.next().unwrap_or_default().trim().to_ascii_lowercase();
			if media.is_empty() {
				continue;
			}
			let quality = pieces
				.find_map(|p| p.trim().strip_prefix("q="))
				.and_then(|q| q.parse::<f32>().ok())
				.unwrap_or(1.0);
			if quality <= 0.0 {
				continue;
			}
			entries.push((media, quality));
		}
	}

	if entries.is_empty() {
		return true;
	}

	// order by weight, ties broken by appearance (sort_by is stable)
	entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

	if matches!(entries[0].0.as_str(), "text/html" | "application/xhtml+xml") {
		return false;
	}

	entries.iter().any(|(media, _)| apvoc::jsonld::is_activity_pub_content_type(media))
}
