/// Parse a page range string like "1,3-5" into a sorted list of 0-indexed
/// page numbers.
///
/// Input is 1-indexed (user-facing). Output is 0-indexed (internal).
/// Returns an error for invalid input (page 0, malformed ranges, pages
/// beyond the document).
pub fn parse_page_range(input: &str, page_count: usize) -> Result<Vec<usize>, String> {
    let parse_number = |token: &str| -> Result<usize, String> {
        let page: usize = token
            .trim()
            .parse()
            .map_err(|_| format!("invalid page number: '{}'", token.trim()))?;
        if page == 0 {
            return Err("page 0 is invalid (pages start at 1)".to_string());
        }
        if page > page_count {
            return Err(format!(
                "page {page} exceeds document page count ({page_count})"
            ));
        }
        Ok(page)
    };

    let mut pages = Vec::new();
    let mut saw_spec = false;

    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        saw_spec = true;

        if let Some((start_str, end_str)) = part.split_once('-') {
            let start = parse_number(start_str)?;
            let end = parse_number(end_str)?;
            if start > end {
                return Err(format!("invalid range: {start}-{end} (start > end)"));
            }
            pages.extend((start..=end).map(|p| p - 1));
        } else {
            pages.push(parse_number(part)? - 1);
        }
    }

    if !saw_spec {
        return Err("page specification cannot be empty".to_string());
    }

    pages.sort();
    pages.dedup();
    Ok(pages)
}
