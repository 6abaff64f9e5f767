use crate::foundation::core::CanvasFormat;

/// File name of one slide of a multi-slide export: `{name}-slide-{index+1}.png`.
pub fn slide_file_name(animal_name: &str, fallback: &str, index: usize) -> String {
    format!("{}-slide-{}.png", stem(animal_name, fallback), index + 1)
}

/// File name of a single-slide export: `{prefix}-{name}-{format}.png`.
pub fn project_file_name(
    prefix: &str,
    animal_name: &str,
    fallback: &str,
    format: CanvasFormat,
) -> String {
    format!(
        "{}-{}-{}.png",
        sanitize(prefix),
        stem(animal_name, fallback),
        format.id()
    )
}

fn stem(animal_name: &str, fallback: &str) -> String {
    let name = sanitize(animal_name);
    if name.is_empty() {
        sanitize(fallback)
    } else {
        name
    }
}

// Path separators and characters Windows refuses in file names.
fn sanitize(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect::<String>()
        .trim_matches('.')
        .to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/export/naming.rs"]
mod tests;
