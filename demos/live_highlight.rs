//! Simulates a search box that re-parses the query on every keystroke and
//! highlights the recognized filters.

use querus::prelude::*;

/// Wraps a segment in brackets tagged with its category.
fn render(segment: &Segment<'_>) -> String {
  match segment.category {
    Some(category) => format!("[{}|{}]", segment.text, category),
    None => segment.text.to_string(),
  }
}

fn main() {
  let parser = QueryParser::default();
  let query = "beginner friendly rust or golang projects, 1k+ stars, help wanted";

  let mut typed = String::new();
  for c in query.chars() {
    typed.push(c);
    // Re-parse only at word ends, like a debounced input would.
    if !(c.is_whitespace() || c == ',') && typed.len() < query.len() {
      continue;
    }

    let parsed = parser.parse(&typed);
    let line: String = parsed.segments().iter().map(render).collect();
    println!("{:>5.2}  {}", parsed.confidence, line);
  }

  let parsed = parser.parse(query);
  println!();
  println!("free text: {:?}", parsed.free_text());
  match serde_json::to_string_pretty(&parsed.filters) {
    Ok(json) => println!("filters: {json}"),
    Err(err) => eprintln!("failed to serialize filters: {err}"),
  }
}
