use std::sync::OnceLock;

use regex::Regex;

use crate::item::{ItemId, ListItem, RawItem};

/// Minimum accepted identifier length. A sanity filter against
/// mis-extraction; shorter candidates are treated as misses.
pub const MIN_ID_LEN: usize = 10;

type Strategy = fn(&RawItem) -> Option<String>;

/// Extraction strategies in priority order; the first hit that passes the
/// length filter wins.
const STRATEGIES: &[Strategy] = &[
    from_href_query,
    from_id_attr,
    from_thumb_attr,
    from_href_regex,
];

/// `v` query parameter of the watch link
fn from_href_query(raw: &RawItem) -> Option<String> {
    let href = raw.watch_href.as_deref()?;
    let query = href.split_once('?')?.1;
    let query = query.split('#').next().unwrap_or(query);
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "v")
        .map(|(_, value)| value.to_string())
}

/// The entry's own data attribute
fn from_id_attr(raw: &RawItem) -> Option<String> {
    raw.id_attr.clone()
}

/// Nested thumbnail element's data attribute
fn from_thumb_attr(raw: &RawItem) -> Option<String> {
    raw.thumb_id_attr.clone()
}

/// Last resort: regex over the raw href
fn from_href_regex(raw: &RawItem) -> Option<String> {
    static HREF_ID: OnceLock<Regex> = OnceLock::new();
    let re = HREF_ID.get_or_init(|| Regex::new(r"[?&]v=([^&]+)").expect("valid literal regex"));

    let href = raw.watch_href.as_deref()?;
    re.captures(href).map(|caps| caps[1].to_string())
}

/// Derive a stable identifier for one rendered entry.
///
/// Returns `None` when every strategy misses; the caller must skip the entry
/// rather than abort the batch.
pub fn resolve(raw: &RawItem) -> Option<ItemId> {
    for strategy in STRATEGIES {
        if let Some(id) = strategy(raw)
            && id.len() >= MIN_ID_LEN
        {
            return Some(ItemId::new(id));
        }
    }
    None
}

/// Resolve a full render pass into list items with 1-based positions.
///
/// Unresolvable entries are logged and skipped, but still occupy their render
/// position so that range filters keep matching what the user sees.
pub fn resolve_items(raw_items: &[RawItem]) -> Vec<ListItem> {
    let mut items = Vec::with_capacity(raw_items.len());

    for (index, raw) in raw_items.iter().enumerate() {
        let position = index + 1;
        match resolve(raw) {
            Some(id) => items.push(ListItem {
                id,
                title: raw.title.clone(),
                position,
            }),
            None => {
                tracing::warn!(position, title = %raw.title, "could not resolve item id, skipping");
            }
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(href: Option<&str>, id_attr: Option<&str>, thumb: Option<&str>) -> RawItem {
        RawItem {
            title: "test".to_string(),
            watch_href: href.map(String::from),
            id_attr: id_attr.map(String::from),
            thumb_id_attr: thumb.map(String::from),
        }
    }

    #[test]
    fn test_resolve_from_href_query() {
        let item = raw(Some("https://host.example/watch?v=abcdefghijk&list=WL"), None, None);
        assert_eq!(resolve(&item), Some(ItemId::from("abcdefghijk")));
    }

    #[test]
    fn test_href_query_wins_over_attributes() {
        let item = raw(
            Some("https://host.example/watch?v=hrefwins123"),
            Some("attr-id-456789"),
            None,
        );
        assert_eq!(resolve(&item), Some(ItemId::from("hrefwins123")));
    }

    #[test]
    fn test_short_candidate_falls_through_to_next_strategy() {
        // href yields a 5-char id, too short; the data attribute is next
        let item = raw(Some("https://host.example/watch?v=short"), Some("attr-id-456789"), None);
        assert_eq!(resolve(&item), Some(ItemId::from("attr-id-456789")));
    }

    #[test]
    fn test_thumbnail_attribute_fallback() {
        let item = raw(None, None, Some("thumb-id-0001"));
        assert_eq!(resolve(&item), Some(ItemId::from("thumb-id-0001")));
    }

    #[test]
    fn test_regex_fallback_on_mangled_href() {
        // No '?' so the query-parameter parse misses, but the regex still hits
        let item = raw(Some("https://host.example/watch&v=regexid1234&t=5"), None, None);
        assert_eq!(resolve(&item), Some(ItemId::from("regexid1234")));
    }

    #[test]
    fn test_all_strategies_fail() {
        assert_eq!(resolve(&raw(None, None, None)), None);
        assert_eq!(resolve(&raw(Some("https://host.example/"), Some("tiny"), None)), None);
    }

    #[test]
    fn test_positions_survive_skipped_entries() {
        let raws = vec![
            raw(Some("https://h/watch?v=firstitem01"), None, None),
            raw(None, None, None), // unresolvable, occupies position 2
            raw(Some("https://h/watch?v=thirditem03"), None, None),
        ];
        let items = resolve_items(&raws);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].position, 1);
        assert_eq!(items[1].position, 3);
    }
}
