use colored::*;

use crate::icon::Icon;

pub const CSV_HEADER: &str = "site,url,mimetype,extension,width,height,hash\n";

/// Format an icon as plain text output
pub fn format_plain_output(site: &str, icon: &Icon, template: &Option<String>, colored: bool) -> String {
    if let Some(template_str) = template {
        let mut output = template_str
            .replace("%site", site)
            .replace("%url", &icon.url)
            .replace("%mimetype", &icon.mime_type)
            .replace("%ext", &icon.file_ext)
            .replace("%width", &icon.width.to_string())
            .replace("%height", &icon.height.to_string())
            .replace("%hash", &icon.hash);
        output.push('\n');
        return output;
    }

    let size = format!("{}x{}", icon.width, icon.height);
    if colored {
        format!(
            "[{}] [{}] -> {} | Size: {}\n",
            site.yellow(),
            icon.url.cyan(),
            icon.mime_type.magenta(),
            size.blue()
        )
    } else {
        format!(
            "[{}] [{}] -> {} | Size: {}\n",
            site, icon.url, icon.mime_type, size
        )
    }
}

/// One JSON object per line: the icon record plus the site it belongs to.
pub fn format_json_line(site: &str, icon: &Icon) -> String {
    let mut value = serde_json::to_value(icon).unwrap_or_default();
    if let Some(object) = value.as_object_mut() {
        object.insert("site".to_string(), site.into());
    }
    serde_json::to_string(&value).unwrap_or_default() + "\n"
}

pub fn format_csv_line(site: &str, icon: &Icon) -> String {
    let width = icon.width.to_string();
    let height = icon.height.to_string();
    let fields: [&str; 7] = [
        site,
        &icon.url,
        &icon.mime_type,
        &icon.file_ext,
        &width,
        &height,
        &icon.hash,
    ];
    let quoted: Vec<String> = fields
        .iter()
        .map(|f| format!("\"{}\"", f.replace('"', "\"\"")))
        .collect();
    quoted.join(",") + "\n"
}
