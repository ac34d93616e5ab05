use waypost_outline::{Outline, OutlineOptions, scan_page_headings};

const PAGE: &str = r##"<main>
  <h2 id="overview"><a href="#overview">Overview</a></h2>
  <h3 id="goals"><a href="#goals">Goals</a></h3>
  <h3 id="layout"><a href="#layout">Layout</a></h3>
  <h4 id="crates"><a href="#crates">Crates</a></h4>
  <h2 id="usage"><a href="#usage">Usage</a></h2>
</main>"##;

fn main() {
  println!("Scanning demo page for headings...\n");

  let headings = scan_page_headings(PAGE);
  println!("Headings found: {}", headings.len());
  for heading in &headings {
    println!("  h{} #{}", heading.level.depth(), heading.id);
  }

  let outline = Outline::build(&headings, &OutlineOptions::default());
  println!("\nTop-level sections: {}", outline.roots().len());

  println!("\nRendered block:\n{}", outline.to_html());
}
