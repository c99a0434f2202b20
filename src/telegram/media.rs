/// Story media classification
///
/// Maps the raw `MessageMedia` attached to a story item onto a media
/// kind, a mime type, and the file location used by the download loop.
use grammers_tl_types as tl;
use serde::Serialize;

/// What kind of media a story carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
    Image,
    Document,
    Unknown,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
            MediaKind::Image => "image",
            MediaKind::Document => "document",
            MediaKind::Unknown => "unknown",
        }
    }

    /// File extension for attachment filenames
    pub fn extension(&self) -> &'static str {
        match self {
            MediaKind::Photo => ".jpg",
            MediaKind::Video => ".mp4",
            MediaKind::Image => ".jpg",
            MediaKind::Document | MediaKind::Unknown => ".bin",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inspected story media: classification plus download location
#[derive(Debug, Clone)]
pub struct StoryMedia {
    pub kind: MediaKind,
    pub mime_type: String,
    /// Location for `upload.getFile`; `None` when the media has no
    /// downloadable payload
    pub location: Option<tl::enums::InputFileLocation>,
    /// Size reported by Telegram, when known
    pub size_hint: Option<i64>,
}

impl StoryMedia {
    pub fn downloadable(&self) -> bool {
        self.location.is_some()
    }
}

/// Classify story media and derive its download location
pub fn inspect(media: &tl::enums::MessageMedia) -> StoryMedia {
    match media {
        tl::enums::MessageMedia::Photo(photo_media) => inspect_photo(photo_media),
        tl::enums::MessageMedia::Document(document_media) => inspect_document(document_media),
        _ => StoryMedia {
            kind: MediaKind::Unknown,
            mime_type: "application/octet-stream".to_string(),
            location: None,
            size_hint: None,
        },
    }
}

fn inspect_photo(media: &tl::types::MessageMediaPhoto) -> StoryMedia {
    let mut result = StoryMedia {
        kind: MediaKind::Photo,
        mime_type: "image/jpeg".to_string(),
        location: None,
        size_hint: None,
    };

    if let Some(tl::enums::Photo::Photo(photo)) = &media.photo {
        if let Some((thumb_size, size)) = best_photo_size(&photo.sizes) {
            result.location = Some(
                tl::types::InputPhotoFileLocation {
                    id: photo.id,
                    access_hash: photo.access_hash,
                    file_reference: photo.file_reference.clone(),
                    thumb_size,
                }
                .into(),
            );
            result.size_hint = size.map(|s| s as i64);
        }
    }

    result
}

fn inspect_document(media: &tl::types::MessageMediaDocument) -> StoryMedia {
    let mut result = StoryMedia {
        kind: MediaKind::Document,
        mime_type: "application/octet-stream".to_string(),
        location: None,
        size_hint: None,
    };

    if let Some(tl::enums::Document::Document(document)) = &media.document {
        result.mime_type = document.mime_type.clone();
        result.kind = kind_from_mime(&document.mime_type);
        result.location = Some(
            tl::types::InputDocumentFileLocation {
                id: document.id,
                access_hash: document.access_hash,
                file_reference: document.file_reference.clone(),
                thumb_size: String::new(),
            }
            .into(),
        );
        result.size_hint = Some(document.size);
    }

    result
}

/// Mime-based kind rules: video/* is video, image/* is image,
/// everything else stays a document
fn kind_from_mime(mime: &str) -> MediaKind {
    if mime.contains("video") {
        MediaKind::Video
    } else if mime.contains("image") {
        MediaKind::Image
    } else {
        MediaKind::Document
    }
}

/// Pick the largest real photo size and return its type letter
/// (the `thumb_size` parameter of `upload.getFile`) and byte size
fn best_photo_size(sizes: &[tl::enums::PhotoSize]) -> Option<(String, Option<i32>)> {
    let mut best: Option<(String, Option<i32>, i64)> = None;

    for size in sizes {
        let candidate = match size {
            tl::enums::PhotoSize::Size(s) => {
                Some((s.r#type.clone(), Some(s.size), s.w as i64 * s.h as i64))
            }
            tl::enums::PhotoSize::Progressive(s) => {
                let bytes = s.sizes.iter().copied().max();
                Some((s.r#type.clone(), bytes, s.w as i64 * s.h as i64))
            }
            _ => None,
        };

        if let Some((type_, bytes, area)) = candidate {
            let better = match &best {
                Some((_, _, best_area)) => area > *best_area,
                None => true,
            };
            if better {
                best = Some((type_, bytes, area));
            }
        }
    }

    best.map(|(type_, bytes, _)| (type_, bytes))
}

/// Attachment filename for a downloaded story
pub fn filename_for(username: &str, story_id: i32, kind: MediaKind) -> String {
    let clean = username.trim_start_matches('@');
    format!("story_{}_{}{}", clean, story_id, kind.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo_size(type_: &str, w: i32, h: i32, size: i32) -> tl::enums::PhotoSize {
        tl::types::PhotoSize {
            r#type: type_.to_string(),
            w,
            h,
            size,
        }
        .into()
    }

    #[test]
    fn mime_rules_match_the_contract() {
        assert_eq!(kind_from_mime("video/mp4"), MediaKind::Video);
        assert_eq!(kind_from_mime("image/png"), MediaKind::Image);
        assert_eq!(kind_from_mime("application/pdf"), MediaKind::Document);
    }

    #[test]
    fn largest_photo_size_wins() {
        let sizes = vec![
            photo_size("s", 90, 160, 1_000),
            photo_size("x", 720, 1280, 90_000),
            photo_size("m", 320, 570, 20_000),
        ];
        let (type_, bytes) = best_photo_size(&sizes).unwrap();
        assert_eq!(type_, "x");
        assert_eq!(bytes, Some(90_000));
    }

    #[test]
    fn stripped_thumbnails_are_skipped() {
        let sizes = vec![tl::enums::PhotoSize::PhotoStrippedSize(
            tl::types::PhotoStrippedSize {
                r#type: "i".to_string(),
                bytes: vec![1, 2, 3],
            },
        )];
        assert!(best_photo_size(&sizes).is_none());
    }

    #[test]
    fn unsupported_media_is_not_downloadable() {
        let media = tl::enums::MessageMedia::Unsupported;
        let inspected = inspect(&media);
        assert_eq!(inspected.kind, MediaKind::Unknown);
        assert!(!inspected.downloadable());
    }

    #[test]
    fn attachment_filenames_use_kind_extension() {
        assert_eq!(
            filename_for("@alice", 42, MediaKind::Video),
            "story_alice_42.mp4"
        );
        assert_eq!(
            filename_for("bob", 7, MediaKind::Photo),
            "story_bob_7.jpg"
        );
    }
}
