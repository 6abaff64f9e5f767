use super::*;

#[test]
fn slide_names_are_one_based() {
    assert_eq!(slide_file_name("Bello", "post", 0), "Bello-slide-1.png");
    assert_eq!(slide_file_name("Bello", "post", 2), "Bello-slide-3.png");
}

#[test]
fn empty_name_uses_fallback() {
    assert_eq!(slide_file_name("", "post", 0), "post-slide-1.png");
    assert_eq!(slide_file_name("   ", "post", 1), "post-slide-2.png");
    assert_eq!(
        project_file_name("streunergluck", "", "post", CanvasFormat::Instagram),
        "streunergluck-post-instagram.png"
    );
}

#[test]
fn project_name_carries_format() {
    assert_eq!(
        project_file_name("streunergluck", "Luna", "post", CanvasFormat::Story),
        "streunergluck-Luna-story.png"
    );
}

#[test]
fn separators_cannot_escape_the_output_dir() {
    assert_eq!(slide_file_name("../Mia/x", "post", 0), "-Mia-x-slide-1.png");
    assert_eq!(slide_file_name("a:b", "post", 0), "a-b-slide-1.png");
    assert_eq!(slide_file_name("..", "post", 0), "post-slide-1.png");
}
