/// Story service layer
///
/// Orchestrates the Telegram client and the file host for the routes:
/// locate a story, classify its media, optionally download the bytes,
/// optionally push them to tmpfiles.org for a time-limited link.
use crate::apis::tmpfiles::TmpFilesClient;
use crate::arguments::is_debug_stories_enabled;
use crate::config;
use crate::errors::{StoryGateError, TelegramError};
use crate::logger::{self, LogTag};
use crate::stories::types::{FetchedStory, LinkedStory, StoryRecord};
use crate::stories::url::clean_username;
use crate::telegram::media::{self, StoryMedia};
use crate::telegram::{client, stories};

/// Locate a story and classify its media without downloading anything
pub async fn check_story(username: &str, story_id: i32) -> Result<StoryRecord, StoryGateError> {
    let (record, _media) = locate(username, story_id).await?;
    Ok(record)
}

/// Locate a story and download its media into memory
pub async fn fetch_story_media(
    username: &str,
    story_id: i32,
) -> Result<FetchedStory, StoryGateError> {
    let (record, story_media) = locate(username, story_id).await?;

    let location = story_media.location.ok_or(StoryGateError::Telegram(
        TelegramError::StoryHasNoMedia { story_id },
    ))?;

    let tg = client::get_client().await?;
    let bytes = stories::download_media_bytes(&tg, location, story_id).await?;
    let filename = media::filename_for(&record.username, story_id, record.media_kind);

    Ok(FetchedStory {
        record,
        bytes,
        filename,
    })
}

/// Fetch a story's media and upload it for a time-limited download link
pub async fn fetch_story_with_link(
    username: &str,
    story_id: i32,
) -> Result<LinkedStory, StoryGateError> {
    let fetched = fetch_story_media(username, story_id).await?;

    let uploader = TmpFilesClient::from_config(&config::get_config().upload)
        .map_err(StoryGateError::configuration_error)?;
    let uploaded = uploader
        .upload(
            fetched.bytes,
            &fetched.filename,
            &fetched.record.mime_type,
        )
        .await?;

    Ok(LinkedStory {
        record: fetched.record,
        download_url: uploaded.download_url,
        expires_in: uploaded.expires_in,
    })
}

/// Shared lookup path: resolve the peer, find the story, inspect media
async fn locate(
    username: &str,
    story_id: i32,
) -> Result<(StoryRecord, StoryMedia), StoryGateError> {
    let name = clean_username(username);
    if name.is_empty() {
        return Err(StoryGateError::peer_not_found(username));
    }

    let tg = client::get_client().await?;
    let peer = stories::resolve_input_peer(&tg, &name).await?;
    let located = stories::find_story(&tg, &peer, &name, story_id).await?;

    if is_debug_stories_enabled() {
        logger::debug(
            LogTag::Stories,
            &format!(
                "Story {} of {} found in {} collection",
                story_id, name, located.scope
            ),
        );
    }

    let story_media = media::inspect(&located.item.media);
    let record = StoryRecord {
        username: name,
        story_id,
        scope: located.scope,
        media_kind: story_media.kind,
        mime_type: story_media.mime_type.clone(),
        date: located.item.date as i64,
        caption: located.item.caption.clone(),
        size: story_media.size_hint,
    };

    Ok((record, story_media))
}
