//! HTML for the mock consent page.

/// Escape HTML special characters to prevent XSS.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Consent page: pick an identity, then allow or deny.
pub fn consent_page(state: &str, redirect_uri: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Mock Google Sign In (DEV ONLY)</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, sans-serif;
            max-width: 400px;
            margin: 100px auto;
            padding: 20px;
        }}
        .warning {{
            background: #fff3cd;
            border: 1px solid #ffc107;
            padding: 15px;
            border-radius: 8px;
            margin-bottom: 20px;
        }}
        form {{
            background: #f8f9fa;
            padding: 20px;
            border-radius: 8px;
        }}
        label {{
            display: block;
            margin-bottom: 5px;
            font-weight: 500;
        }}
        input[type="email"], input[type="text"] {{
            width: 100%;
            padding: 10px;
            margin-bottom: 15px;
            border: 1px solid #ced4da;
            border-radius: 4px;
            box-sizing: border-box;
        }}
        button {{
            width: 48%;
            padding: 12px;
            border: none;
            border-radius: 4px;
            cursor: pointer;
            font-size: 16px;
        }}
        button[value="allow"] {{ background: #f97316; color: white; }}
        button[value="deny"] {{ background: #e9ecef; }}
    </style>
</head>
<body>
    <div class="warning">
        <h2>Development Only</h2>
        <p>This is a <strong>mock Google consent screen</strong> for PizzaDash.</p>
        <p>Enter any email address. After allowing, copy the URL you land on.</p>
    </div>

    <form action="/authorize/submit" method="POST">
        <input type="hidden" name="state" value="{state}" />
        <input type="hidden" name="redirect_uri" value="{redirect_uri}" />

        <label for="email">Email Address</label>
        <input type="email" id="email" name="email" placeholder="chef@example.com" required />

        <label for="name">Name (optional)</label>
        <input type="text" id="name" name="name" placeholder="Pizza Chef" />

        <button type="submit" name="decision" value="allow">Allow</button>
        <button type="submit" name="decision" value="deny">Deny</button>
    </form>
</body>
</html>"#,
        state = html_escape(state),
        redirect_uri = html_escape(redirect_uri),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consent_page_escapes_inputs() {
        let html = consent_page("\"><script>", "http://x/?a=1&b=2");
        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;\""));
        assert!(html.contains("http://x/?a=1&amp;b=2"));
        assert!(!html.contains("\"><script>"));
    }
}
