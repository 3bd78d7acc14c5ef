// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_inline_content(size: usize) -> String {
    let base = "Plain words with *emphasis*, **strong text** and `code spans`. \
        A [link](http://example.com \"title\") and ![an image](/img.png), \
        plus <http://autolink.example> and snake_case_names. ";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_nested_emphasis(depth: usize) -> String {
    let mut content = String::new();
    for level in 0..depth {
        let marker = if level % 2 == 0 { "*" } else { "_" };
        content.push_str(marker);
        content.push_str("word ");
    }
    content.push_str("core");
    for level in (0..depth).rev() {
        content.push_str(if level % 2 == 0 { "*" } else { "_" });
    }
    content
}

#[allow(dead_code)]
pub fn generate_unmatched_brackets(count: usize) -> String {
    "[x ".repeat(count)
}

#[allow(dead_code)]
pub fn generate_unclosed_destinations(count: usize) -> String {
    "[a](".repeat(count)
}
