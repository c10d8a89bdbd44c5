//! A simulated playlist page. Stands in for the remote list view so the
//! engine and pipeline can be exercised end to end in a terminal.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Deserialize;

use lsweep_core::{ItemId, ItemRemover, RawItem};

/// One entry on the simulated page
#[derive(Debug, Clone)]
pub struct SimVideo {
    pub id: String,
    pub title: String,
    pub removed: bool,
}

/// Playlist entry as loaded from a JSON file
#[derive(Debug, Deserialize)]
struct PlaylistEntry {
    id: String,
    title: String,
}

/// The simulated list page. Removed entries stay in the vector but are no
/// longer rendered, like a row the real page has taken out of the DOM.
#[derive(Debug, Default)]
pub struct SimPage {
    videos: Vec<SimVideo>,
}

const DEMO_TOPICS: &[&str] = &[
    "Sourdough Basics",
    "Rust Iterators Deep Dive",
    "Mountain Biking the Alps",
    "Lo-fi Mix",
    "Woodworking Joints Explained",
    "Historic Bridges",
    "Synth Patch Design",
    "Trail Running Form",
];

impl SimPage {
    /// Generate a deterministic demo playlist
    pub fn demo(count: usize) -> Self {
        let videos = (1..=count)
            .map(|i| SimVideo {
                id: format!("demo{i:07}vid"),
                title: format!("{} - Part {}", DEMO_TOPICS[(i - 1) % DEMO_TOPICS.len()], i),
                removed: false,
            })
            .collect();
        Self { videos }
    }

    /// Load a playlist from a JSON file: an array of `{"id", "title"}` objects
    pub fn from_json_file(path: &Path) -> color_eyre::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let entries: Vec<PlaylistEntry> = serde_json::from_str(&data)?;
        let videos = entries
            .into_iter()
            .map(|e| SimVideo {
                id: e.id,
                title: e.title,
                removed: false,
            })
            .collect();
        Ok(Self { videos })
    }

    /// Snapshot of the currently rendered entries, in render order
    pub fn rendered_items(&self) -> Vec<RawItem> {
        self.videos
            .iter()
            .filter(|v| !v.removed)
            .map(|v| RawItem {
                title: v.title.clone(),
                watch_href: Some(format!(
                    "https://watch.example/watch?v={}&list=WL",
                    v.id
                )),
                ..RawItem::default()
            })
            .collect()
    }

    pub fn remaining(&self) -> usize {
        self.videos.iter().filter(|v| !v.removed).count()
    }

    fn find_mut(&mut self, id: &ItemId) -> Option<&mut SimVideo> {
        self.videos.iter_mut().find(|v| v.id == id.as_str())
    }

    fn is_rendered(&self, id: &ItemId) -> bool {
        self.videos
            .iter()
            .any(|v| v.id == id.as_str() && !v.removed)
    }
}

/// Page adapter the deletion pipeline drives. Shares the page with the UI
/// thread through a mutex; `fail_every` injects a transient failure on every
/// Nth removal trigger for demoing the retry path.
pub struct SimRemover {
    page: Arc<Mutex<SimPage>>,
    fail_every: Option<usize>,
    triggers: usize,
}

impl SimRemover {
    pub fn new(page: Arc<Mutex<SimPage>>, fail_every: Option<usize>) -> Self {
        Self {
            page,
            fail_every,
            triggers: 0,
        }
    }
}

impl ItemRemover for SimRemover {
    fn trigger_remove(&mut self, id: &ItemId) -> bool {
        self.triggers += 1;
        if let Some(n) = self.fail_every
            && n > 0
            && self.triggers % n == 0
        {
            return false;
        }

        let mut page = match self.page.lock() {
            Ok(page) => page,
            Err(_) => return false,
        };
        match page.find_mut(id) {
            Some(video) => {
                video.removed = true;
                true
            }
            None => false,
        }
    }

    fn is_rendered(&mut self, id: &ItemId) -> bool {
        self.page
            .lock()
            .map(|page| page.is_rendered(id))
            .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsweep_core::resolve_items;

    #[test]
    fn test_demo_ids_resolve() {
        let page = SimPage::demo(12);
        let items = resolve_items(&page.rendered_items());
        assert_eq!(items.len(), 12);
        assert_eq!(items[0].id.as_str(), "demo0000001vid");
        assert_eq!(items[11].position, 12);
    }

    #[test]
    fn test_removed_entries_leave_the_render() {
        let page = Arc::new(Mutex::new(SimPage::demo(3)));
        let mut remover = SimRemover::new(page.clone(), None);

        let target = ItemId::from("demo0000002vid");
        assert!(remover.trigger_remove(&target));
        assert!(!remover.is_rendered(&target));

        let page = page.lock().unwrap();
        assert_eq!(page.remaining(), 2);
        assert_eq!(page.rendered_items().len(), 2);
    }

    #[test]
    fn test_fail_every_injects_transient_failures() {
        let page = Arc::new(Mutex::new(SimPage::demo(4)));
        let mut remover = SimRemover::new(page.clone(), Some(2));

        let first = ItemId::from("demo0000001vid");
        let second = ItemId::from("demo0000002vid");
        assert!(remover.trigger_remove(&first));
        // Second trigger fails, the retry succeeds
        assert!(!remover.trigger_remove(&second));
        assert!(remover.is_rendered(&second));
        assert!(remover.trigger_remove(&second));
        assert!(!remover.is_rendered(&second));
    }

    #[test]
    fn test_unknown_id_is_a_failed_trigger() {
        let page = Arc::new(Mutex::new(SimPage::demo(2)));
        let mut remover = SimRemover::new(page, None);
        assert!(!remover.trigger_remove(&ItemId::from("not-a-real-id")));
    }
}
