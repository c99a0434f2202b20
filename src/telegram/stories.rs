/// Story lookup and media download
///
/// Stories live in three collections per peer: the active set
/// (`stories.getPeerStories`), the pinned set shown on the profile
/// (`stories.getPinnedStories`) and the owner-only archive
/// (`stories.getStoriesArchive`). A story is located by scanning the
/// collections in that order; the collection it was found in becomes its
/// scope. `stories.getStoriesById` remains as a fallback for stories
/// that are reachable by id but listed in no collection.
use grammers_client::Client;
use grammers_tl_types as tl;
use serde::Serialize;

use crate::arguments::is_debug_stories_enabled;
use crate::errors::{StoryGateError, TelegramError};
use crate::logger::{self, LogTag};

/// Page size for pinned/archive scans
const SCAN_PAGE_SIZE: i32 = 100;

/// Hard cap on scanned pages per collection; a profile with more than
/// this many pages of stories is out of scope for a linear scan
const SCAN_PAGE_LIMIT: usize = 20;

/// Chunk size for `upload.getFile` (must stay a multiple of 4 KiB)
const DOWNLOAD_CHUNK_SIZE: i32 = 512 * 1024;

/// Which collection a story was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryScope {
    Active,
    Pinned,
    Archived,
}

impl StoryScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryScope::Active => "active",
            StoryScope::Pinned => "pinned",
            StoryScope::Archived => "archived",
        }
    }
}

impl std::fmt::Display for StoryScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A story item together with the collection it was found in
#[derive(Debug, Clone)]
pub struct LocatedStory {
    pub item: tl::types::StoryItem,
    pub scope: StoryScope,
}

/// Resolve a username (or `@username`) into an input peer
pub async fn resolve_input_peer(
    client: &Client,
    username: &str,
) -> Result<tl::enums::InputPeer, StoryGateError> {
    let name = username.trim_start_matches('@');
    match client.resolve_username(name).await {
        Ok(Some(chat)) => Ok(chat.pack().to_input_peer()),
        Ok(None) => Err(StoryGateError::peer_not_found(username)),
        Err(e) => {
            let message = e.to_string();
            // Malformed names (numeric ids, too short) surface as RPC
            // errors; report them the same way as an unknown peer
            if message.contains("USERNAME_INVALID") || message.contains("USERNAME_NOT_OCCUPIED") {
                return Err(StoryGateError::peer_not_found(username));
            }
            Err(StoryGateError::rpc_error(
                "contacts.resolveUsername",
                message,
            ))
        }
    }
}

/// Story hits per collection for one story id
///
/// Active stories also appear in the pinned set, so the reported scope
/// is decided in one place: active wins over pinned, pinned over
/// archived.
#[derive(Debug, Default)]
struct CollectionHits {
    active: Option<tl::types::StoryItem>,
    pinned: Option<tl::types::StoryItem>,
    archived: Option<tl::types::StoryItem>,
}

impl CollectionHits {
    fn is_empty(&self) -> bool {
        self.active.is_none() && self.pinned.is_none() && self.archived.is_none()
    }

    /// Pick the scope the story is reported under
    fn resolve(self) -> Option<LocatedStory> {
        if let Some(item) = self.active {
            return Some(LocatedStory {
                item,
                scope: StoryScope::Active,
            });
        }
        if let Some(item) = self.pinned {
            return Some(LocatedStory {
                item,
                scope: StoryScope::Pinned,
            });
        }
        self.archived.map(|item| LocatedStory {
            item,
            scope: StoryScope::Archived,
        })
    }
}

/// Locate a story by id across the peer's collections
///
/// Collections are scanned highest-priority first, so lower collections
/// are only consulted when the story has not been seen yet.
pub async fn find_story(
    client: &Client,
    peer: &tl::enums::InputPeer,
    username: &str,
    story_id: i32,
) -> Result<LocatedStory, StoryGateError> {
    let mut hits = CollectionHits {
        active: scan_active(client, peer, story_id).await,
        ..CollectionHits::default()
    };
    if hits.is_empty() {
        hits.pinned = scan_paged(client, peer, story_id, PagedCollection::Pinned).await;
    }
    if hits.is_empty() {
        hits.archived = scan_paged(client, peer, story_id, PagedCollection::Archive).await;
    }

    if let Some(located) = hits.resolve() {
        return Ok(located);
    }

    // Listed in no collection; try direct id lookup before giving up
    match fetch_by_id(client, peer, story_id).await? {
        Some(item) => {
            let scope = if item.pinned {
                StoryScope::Pinned
            } else {
                StoryScope::Archived
            };
            Ok(LocatedStory { item, scope })
        }
        None => Err(StoryGateError::story_not_found(username, story_id)),
    }
}

/// Scan the active story set; errors count as "not found here"
async fn scan_active(
    client: &Client,
    peer: &tl::enums::InputPeer,
    story_id: i32,
) -> Option<tl::types::StoryItem> {
    let request = tl::functions::stories::GetPeerStories { peer: peer.clone() };
    match client.invoke(&request).await {
        Ok(tl::enums::stories::PeerStories::Stories(wrapper)) => {
            let tl::enums::PeerStories::Stories(peer_stories) = wrapper.stories;
            pick_story(peer_stories.stories, story_id)
        }
        Err(e) => {
            if is_debug_stories_enabled() {
                logger::debug(
                    LogTag::Stories,
                    &format!("stories.getPeerStories failed: {}", e),
                );
            }
            None
        }
    }
}

enum PagedCollection {
    Pinned,
    Archive,
}

impl PagedCollection {
    fn name(&self) -> &'static str {
        match self {
            PagedCollection::Pinned => "stories.getPinnedStories",
            PagedCollection::Archive => "stories.getStoriesArchive",
        }
    }
}

/// Page through a pinned/archive collection looking for a story id
///
/// The archive is only visible to the peer itself; Telegram answers with
/// an RPC error for foreign peers, which is treated as an empty
/// collection here.
async fn scan_paged(
    client: &Client,
    peer: &tl::enums::InputPeer,
    story_id: i32,
    collection: PagedCollection,
) -> Option<tl::types::StoryItem> {
    let mut offset_id = 0i32;

    for _ in 0..SCAN_PAGE_LIMIT {
        let result = match collection {
            PagedCollection::Pinned => {
                let request = tl::functions::stories::GetPinnedStories {
                    peer: peer.clone(),
                    offset_id,
                    limit: SCAN_PAGE_SIZE,
                };
                client.invoke(&request).await
            }
            PagedCollection::Archive => {
                let request = tl::functions::stories::GetStoriesArchive {
                    peer: peer.clone(),
                    offset_id,
                    limit: SCAN_PAGE_SIZE,
                };
                client.invoke(&request).await
            }
        };

        let stories = match result {
            Ok(tl::enums::stories::Stories::Stories(page)) => page.stories,
            Err(e) => {
                if is_debug_stories_enabled() {
                    logger::debug(
                        LogTag::Stories,
                        &format!("{} failed: {}", collection.name(), e),
                    );
                }
                return None;
            }
        };

        if stories.is_empty() {
            return None;
        }

        let page_len = stories.len();
        let mut min_id = i32::MAX;
        for story in &stories {
            if let tl::enums::StoryItem::Item(item) = story {
                min_id = min_id.min(item.id);
            }
        }

        if let Some(item) = pick_story(stories, story_id) {
            return Some(item);
        }

        // Pages are newest-first; continue below the smallest id seen
        if min_id == i32::MAX || page_len < SCAN_PAGE_SIZE as usize {
            return None;
        }
        offset_id = min_id;
    }

    None
}

/// Direct id lookup via `stories.getStoriesById`
async fn fetch_by_id(
    client: &Client,
    peer: &tl::enums::InputPeer,
    story_id: i32,
) -> Result<Option<tl::types::StoryItem>, StoryGateError> {
    let request = tl::functions::stories::GetStoriesById {
        peer: peer.clone(),
        id: vec![story_id],
    };
    match client.invoke(&request).await {
        Ok(tl::enums::stories::Stories::Stories(result)) => {
            Ok(pick_story(result.stories, story_id))
        }
        Err(e) => {
            let message = e.to_string();
            // STORY_ID_INVALID means "no such story", not a failure
            if message.contains("STORY_ID_INVALID") {
                return Ok(None);
            }
            Err(StoryGateError::rpc_error(
                "stories.getStoriesById",
                message,
            ))
        }
    }
}

/// Find a full story item with a matching id in a collection page
fn pick_story(
    stories: Vec<tl::enums::StoryItem>,
    story_id: i32,
) -> Option<tl::types::StoryItem> {
    stories.into_iter().find_map(|story| match story {
        tl::enums::StoryItem::Item(item) if item.id == story_id => Some(*item),
        _ => None,
    })
}

/// Download a file location into memory, chunk by chunk
pub async fn download_media_bytes(
    client: &Client,
    location: tl::enums::InputFileLocation,
    story_id: i32,
) -> Result<Vec<u8>, StoryGateError> {
    let mut bytes: Vec<u8> = Vec::new();
    let mut offset = 0i64;

    loop {
        let request = tl::functions::upload::GetFile {
            precise: true,
            cdn_supported: false,
            location: location.clone(),
            offset,
            limit: DOWNLOAD_CHUNK_SIZE,
        };

        let chunk = match client.invoke(&request).await {
            Ok(tl::enums::upload::File::File(file)) => file.bytes,
            Ok(tl::enums::upload::File::CdnRedirect(_)) => {
                return Err(StoryGateError::Telegram(TelegramError::DownloadFailed {
                    story_id,
                    reason: "CDN redirect is not supported".to_string(),
                }));
            }
            Err(e) => {
                return Err(StoryGateError::Telegram(TelegramError::DownloadFailed {
                    story_id,
                    reason: e.to_string(),
                }));
            }
        };

        let received = chunk.len();
        bytes.extend_from_slice(&chunk);

        if received < DOWNLOAD_CHUNK_SIZE as usize {
            break;
        }
        offset += received as i64;
    }

    if bytes.is_empty() {
        return Err(StoryGateError::Telegram(TelegramError::DownloadFailed {
            story_id,
            reason: "Telegram returned no data".to_string(),
        }));
    }

    if is_debug_stories_enabled() {
        logger::debug(
            LogTag::Stories,
            &format!("Downloaded {} bytes for story {}", bytes.len(), story_id),
        );
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story_item(id: i32, pinned: bool) -> tl::enums::StoryItem {
        tl::types::StoryItem {
            pinned,
            public: true,
            close_friends: false,
            min: false,
            noforwards: false,
            edited: false,
            contacts: false,
            selected_contacts: false,
            out: false,
            id,
            date: 1_700_000_000,
            from_id: None,
            fwd_from: None,
            expire_date: 1_700_086_400,
            caption: None,
            entities: None,
            media: tl::enums::MessageMedia::Unsupported,
            media_areas: None,
            privacy: None,
            views: None,
            sent_reaction: None,
        }
        .into()
    }

    #[test]
    fn pick_story_matches_by_id() {
        let stories = vec![story_item(1, false), story_item(2, true), story_item(3, false)];
        let found = pick_story(stories, 2).unwrap();
        assert_eq!(found.id, 2);
        assert!(found.pinned);
    }

    #[test]
    fn pick_story_skips_deleted_placeholders() {
        let stories = vec![
            tl::enums::StoryItem::Deleted(tl::types::StoryItemDeleted { id: 5 }),
            story_item(6, false),
        ];
        assert!(pick_story(stories, 5).is_none());
    }

    fn full_item(id: i32, pinned: bool) -> tl::types::StoryItem {
        match story_item(id, pinned) {
            tl::enums::StoryItem::Item(item) => *item,
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn active_outranks_pinned_and_archived() {
        let hits = CollectionHits {
            active: Some(full_item(9, true)),
            pinned: Some(full_item(9, true)),
            archived: Some(full_item(9, true)),
        };
        let located = hits.resolve().unwrap();
        assert_eq!(located.scope, StoryScope::Active);
        assert_eq!(located.item.id, 9);
    }

    #[test]
    fn pinned_outranks_archived() {
        let hits = CollectionHits {
            active: None,
            pinned: Some(full_item(3, true)),
            archived: Some(full_item(3, true)),
        };
        assert_eq!(hits.resolve().unwrap().scope, StoryScope::Pinned);

        let archived_only = CollectionHits {
            active: None,
            pinned: None,
            archived: Some(full_item(3, false)),
        };
        assert_eq!(archived_only.resolve().unwrap().scope, StoryScope::Archived);
    }

    #[test]
    fn no_hits_resolve_to_nothing() {
        let hits = CollectionHits::default();
        assert!(hits.is_empty());
        assert!(hits.resolve().is_none());
    }

    #[test]
    fn scope_labels_are_lowercase() {
        assert_eq!(StoryScope::Active.as_str(), "active");
        assert_eq!(StoryScope::Archived.to_string(), "archived");
    }
}
