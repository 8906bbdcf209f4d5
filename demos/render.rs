//! Render a timeline request to SVG on stdout.
//!
//! Run with: cargo run --example render --features tracing -- request.json

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let input = std::env::args()
        .nth(1)
        .map(|path| std::fs::read_to_string(&path).expect("Failed to read file"))
        .unwrap_or_else(|| r#"{"lang": "en"}"#.to_string());

    match policy_timeline::render_svg_json(&input) {
        Ok(svg) => println!("{}", svg),
        Err(e) => eprintln!("Error: {:?}", e),
    }
}
