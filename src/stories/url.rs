/// Story URL parsing
///
/// Accepted shapes:
///   https://t.me/username/s/123456        (story link)
///   https://telegram.me/username/s/123456
///   https://t.me/c/2123456789/42          (private channel, internal id)
///   https://t.me/username/123456          (legacy shape, still a story id)
///
/// The scheme is optional and matching is case-insensitive. Private
/// channel links carry the internal channel id, which is normalized to
/// the `-100`-prefixed form used by the client layer.
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::StoryGateError;

/// A parsed story reference: who and which story
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRef {
    pub username: String,
    pub story_id: i32,
}

static STORY_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:t|telegram)\.me/([a-zA-Z0-9_]{3,64})/s/(\d+)")
        .unwrap_or_else(|e| panic!("invalid story link pattern: {}", e))
});

static CHANNEL_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:t|telegram)\.me/c/(\d+)/(\d+)")
        .unwrap_or_else(|e| panic!("invalid channel link pattern: {}", e))
});

static LEGACY_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:t|telegram)\.me/([a-zA-Z0-9_]{3,64})/(\d+)")
        .unwrap_or_else(|e| panic!("invalid legacy link pattern: {}", e))
});

/// Parse a t.me story link into a story reference
pub fn parse_story_url(url: &str) -> Result<StoryRef, StoryGateError> {
    let trimmed = url.trim();

    if let Some(caps) = STORY_LINK.captures(trimmed) {
        return build_ref(&caps[1], &caps[2], trimmed);
    }

    // /c/ links must be checked before the legacy shape: "c" would
    // otherwise fail the username length rule and fall through
    if let Some(caps) = CHANNEL_LINK.captures(trimmed) {
        let channel = format!("-100{}", &caps[1]);
        return build_ref(&channel, &caps[2], trimmed);
    }

    if let Some(caps) = LEGACY_LINK.captures(trimmed) {
        return build_ref(&caps[1], &caps[2], trimmed);
    }

    Err(StoryGateError::invalid_story_url(trimmed))
}

fn build_ref(username: &str, id: &str, url: &str) -> Result<StoryRef, StoryGateError> {
    let story_id: i32 = id
        .parse()
        .map_err(|_| StoryGateError::invalid_story_url(url))?;
    if story_id <= 0 {
        return Err(StoryGateError::invalid_story_url(url));
    }
    Ok(StoryRef {
        username: username.to_string(),
        story_id,
    })
}

/// Normalize a username query parameter: strip `@` and surrounding space
pub fn clean_username(username: &str) -> String {
    username.trim().trim_start_matches('@').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_standard_story_link() {
        let parsed = parse_story_url("https://t.me/durov/s/123456").unwrap();
        assert_eq!(parsed.username, "durov");
        assert_eq!(parsed.story_id, 123456);
    }

    #[test]
    fn parses_telegram_me_host() {
        let parsed = parse_story_url("https://telegram.me/durov/s/7").unwrap();
        assert_eq!(parsed.username, "durov");
        assert_eq!(parsed.story_id, 7);
    }

    #[test]
    fn scheme_is_optional() {
        let parsed = parse_story_url("t.me/durov/s/42").unwrap();
        assert_eq!(parsed.story_id, 42);
    }

    #[test]
    fn host_match_is_case_insensitive() {
        let parsed = parse_story_url("HTTPS://T.ME/durov/s/9").unwrap();
        assert_eq!(parsed.username, "durov");
    }

    #[test]
    fn private_channel_link_normalizes_id() {
        let parsed = parse_story_url("https://t.me/c/2123456789/42").unwrap();
        assert_eq!(parsed.username, "-1002123456789");
        assert_eq!(parsed.story_id, 42);
    }

    #[test]
    fn legacy_shape_is_accepted() {
        let parsed = parse_story_url("https://t.me/durov/123456").unwrap();
        assert_eq!(parsed.username, "durov");
        assert_eq!(parsed.story_id, 123456);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_story_url("https://example.com/durov/s/1").is_err());
        assert!(parse_story_url("not a url").is_err());
        assert!(parse_story_url("").is_err());
    }

    #[test]
    fn non_numeric_story_id_is_rejected() {
        assert!(parse_story_url("https://t.me/durov/s/abc").is_err());
    }

    #[test]
    fn clean_username_strips_at_and_space() {
        assert_eq!(clean_username(" @durov "), "durov");
        assert_eq!(clean_username("durov"), "durov");
    }
}
