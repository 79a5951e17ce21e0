//! HTML templates for the upload interface.

/// Escape text for HTML element content and attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Base HTML template.
pub fn base_template(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - lipikar</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
    <header id="main-header">
        <nav>
            <a href="/" class="logo">lipikar</a>
        </nav>
    </header>
    <main>
        <h1>{}</h1>
        {}
    </main>
</body>
</html>"#,
        html_escape(title),
        html_escape(title),
        content
    )
}

/// Upload form, with an optional error banner.
pub fn index_page(error: Option<&str>) -> String {
    let banner = match error {
        Some(message) if !message.is_empty() => format!(
            r#"<div class="flash flash-error" role="alert">{}</div>"#,
            html_escape(message)
        ),
        _ => String::new(),
    };

    let content = format!(
        r#"{}
        <form id="pdf-form" action="/process" method="post" enctype="multipart/form-data">
            <fieldset>
                <legend>PDF file</legend>
                <input type="file" name="pdf_file" accept=".pdf,application/pdf" required>
            </fieldset>
            <fieldset>
                <legend>Processing method</legend>
                <label><input type="radio" name="processing_method" value="no_ocr" checked>
                    Text layer (digital PDFs, Bijoy or Unicode)</label>
                <label><input type="radio" name="processing_method" value="ocr">
                    OCR (scanned PDFs)</label>
                <label><input type="radio" name="processing_method" value="vision_model">
                    Vision model (Gemini, needs an API key)</label>
                <input type="password" name="api_key" placeholder="Gemini API key" autocomplete="off">
            </fieldset>
            <fieldset>
                <legend>Output format</legend>
                <label><input type="radio" name="output_format" value="txt" checked> TXT</label>
                <label><input type="radio" name="output_format" value="docx"> DOCX</label>
            </fieldset>
            <button type="submit" class="btn">Extract text</button>
        </form>"#,
        banner
    );

    base_template("Extract text from PDF", &content)
}

/// Download confirmation page. Starts the download automatically.
pub fn download_page(filename: &str) -> String {
    let encoded = urlencoding::encode(filename);
    let content = format!(
        r#"<p class="success">Your file <strong>{}</strong> is ready.</p>
        <p><a id="download-link" class="btn" href="/direct-download/{}">Download</a>
           <a class="btn-small" href="/">Process another file</a></p>
        <script>
            window.addEventListener('load', function () {{
                document.getElementById('download-link').click();
            }});
        </script>"#,
        html_escape(filename),
        encoded
    );

    base_template("Extraction complete", &content)
}
