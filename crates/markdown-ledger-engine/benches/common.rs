// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "Title\n\nSection\n\nParagraph with some content.\n\nBullet point\nNested item\nAnother item\n\n";
    base.repeat(size)
}

/// Every line start in `content`, for queueing one edit per line.
#[allow(dead_code)]
pub fn line_starts(content: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(content.match_indices('\n').map(|(i, _)| i + 1))
        .filter(|&start| start < content.len())
        .collect()
}
