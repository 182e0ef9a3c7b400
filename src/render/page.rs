//! Standalone HTML documents wrapping rendered fragments.

const DOCUMENT_STYLE: &str = r#"
        h1 { color: #2c3e50; border-bottom: 2px solid #3498db; }
        h2 { color: #2c3e50; }
        h3 { color: #34495e; }
        code { background: #f4f4f4; padding: 2px 4px; border-radius: 3px; }
        pre { background: #2d2d2d; color: #f8f8f2; padding: 10px; border-radius: 5px; overflow-x: auto; }
        pre code { background: none; padding: 0; }
        table { border-collapse: collapse; margin: 10px 0; }
        th, td { border: 1px solid #ccc; padding: 4px 8px; }
        .theorem { background: #e8f5e8; border-left: 4px solid #27ae60; padding: 10px; margin: 10px 0; }
        .proof { background: #e3f2fd; border-left: 4px solid #3498db; padding: 10px; margin: 10px 0; }
        ul, ol { margin: 10px 0; padding-left: 20px; }
        li { margin: 5px 0; }"#;

/// Title of exported HTML documents
pub const EXPORT_TITLE: &str = "Exported document";

/// Full HTML document for download, centered at 800px
pub fn export_document(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{EXPORT_TITLE}</title>
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; padding: 20px; max-width: 800px; margin: 0 auto; }}{DOCUMENT_STYLE}
    </style>
</head>
<body>
{body}
</body>
</html>
"#
    )
}

/// Full HTML document used as PDF renderer input
pub fn print_document(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; margin: 0; padding: 20px; }}{DOCUMENT_STYLE}
    </style>
</head>
<body>
{body}
</body>
</html>
"#
    )
}
