/// HTML templates for the index page
///
/// Single static page documenting the HTTP surface; everything else the
/// server speaks is JSON.

pub fn index_page() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>StoryGate</title>
    <style>
        body {{ font-family: -apple-system, 'Segoe UI', sans-serif; background: #0f1115; color: #e5e7eb; margin: 0; padding: 2rem; }}
        h1 {{ color: #60a5fa; }}
        code {{ background: #1f2430; padding: 0.15rem 0.4rem; border-radius: 4px; }}
        table {{ border-collapse: collapse; margin-top: 1rem; }}
        td, th {{ text-align: left; padding: 0.4rem 1rem 0.4rem 0; vertical-align: top; }}
        th {{ color: #9ca3af; font-weight: 600; }}
        .muted {{ color: #9ca3af; }}
    </style>
</head>
<body>
    <h1>StoryGate v{version}</h1>
    <p class="muted">HTTP gateway for Telegram stories. Identify a story by
    <code>username</code> + <code>storyid</code>, or by a full
    <code>t.me/&lt;user&gt;/s/&lt;id&gt;</code> link.</p>
    <table>
        <tr><th>Endpoint</th><th>Description</th></tr>
        <tr><td><code>GET /api/story?username=&amp;storyid=</code></td><td>Fetch a story, upload its media, return a time-limited <code>download_url</code></td></tr>
        <tr><td><code>GET /api/direct?url=</code></td><td>Same, story identified by a t.me link</td></tr>
        <tr><td><code>GET /api/download?username=&amp;storyid=</code></td><td>Raw media bytes as a file attachment</td></tr>
        <tr><td><code>GET /api/base64?username=&amp;storyid=</code></td><td>Media bytes base64-encoded in the JSON envelope</td></tr>
        <tr><td><code>GET /api/check?username=&amp;storyid=</code></td><td>Existence, collection, and media kind; no download</td></tr>
        <tr><td><code>GET /api/health</code></td><td>Telegram connectivity check</td></tr>
        <tr><td><code>GET /api/status</code></td><td>Uptime, requests served, version</td></tr>
    </table>
</body>
</html>"#,
        version = env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_lists_every_endpoint() {
        let page = index_page();
        for endpoint in [
            "/api/story",
            "/api/direct",
            "/api/download",
            "/api/base64",
            "/api/check",
            "/api/health",
            "/api/status",
        ] {
            assert!(page.contains(endpoint), "missing {}", endpoint);
        }
    }
}
