//! Known languages, frameworks and libraries.
//!
//! Within each list, a name that starts with another name's spelling comes
//! first (`objective-c`, `c++` and `c#` before `c`; `react native` before
//! `react`), because earlier patterns win overlapping text.

use crate::types::FilterCategory;

/// A canonical name and the spellings that refer to it.
#[derive(Debug, Clone, Copy)]
pub struct Term {
  pub canonical: &'static str,
  pub aliases: &'static [&'static str],
}

const fn term(canonical: &'static str, aliases: &'static [&'static str]) -> Term {
  Term { canonical, aliases }
}

pub const LANGUAGES: &[Term] = &[
  term("objective-c", &["objective c", "objc"]),
  term("c++", &["c++", "cpp", "cplusplus"]),
  term("c#", &["c#", "csharp", "c sharp"]),
  term("f#", &["f#", "fsharp"]),
  term("javascript", &["javascript", "js", "ecmascript"]),
  term("typescript", &["typescript", "ts"]),
  term("python", &["python"]),
  term("go", &["go", "golang"]),
  term("rust", &["rust", "rustlang"]),
  term("java", &["java"]),
  term("kotlin", &["kotlin"]),
  term("swift", &["swift"]),
  term("ruby", &["ruby"]),
  term("php", &["php"]),
  term("scala", &["scala"]),
  term("haskell", &["haskell"]),
  term("elixir", &["elixir"]),
  term("erlang", &["erlang"]),
  term("clojure", &["clojure"]),
  term("dart", &["dart"]),
  term("lua", &["lua"]),
  term("perl", &["perl"]),
  term("julia", &["julia"]),
  term("zig", &["zig"]),
  term("ocaml", &["ocaml"]),
  term("elm", &["elm"]),
  term("nim", &["nim"]),
  term("solidity", &["solidity"]),
  term("shell", &["shell script", "shell", "bash", "zsh"]),
  term("html", &["html"]),
  term("css", &["css"]),
  term("sql", &["sql"]),
  term("c", &["c"]),
];

pub const FRAMEWORKS: &[Term] = &[
  term("react-native", &["react native"]),
  term("next.js", &["next.js", "nextjs"]),
  term("nuxt", &["nuxt.js", "nuxtjs", "nuxt"]),
  term("react", &["react.js", "reactjs", "react"]),
  term("vue", &["vue.js", "vuejs", "vue"]),
  term("angular", &["angular.js", "angularjs", "angular"]),
  term("svelte", &["sveltekit", "svelte"]),
  term("nestjs", &["nest.js", "nestjs"]),
  term("express", &["express.js", "expressjs", "express"]),
  term("node.js", &["node.js", "nodejs", "node"]),
  term("django", &["django"]),
  term("flask", &["flask"]),
  term("fastapi", &["fastapi"]),
  term("rails", &["ruby on rails", "rails", "ror"]),
  term("laravel", &["laravel"]),
  term("symfony", &["symfony"]),
  term("spring", &["spring boot", "spring"]),
  term(".net", &["asp.net", ".net", "dotnet"]),
  term("flutter", &["flutter"]),
  term("electron", &["electron"]),
  term("tauri", &["tauri"]),
  term("actix", &["actix web", "actix"]),
  term("axum", &["axum"]),
  term("rocket", &["rocket"]),
  term("gin", &["gin"]),
  term("phoenix", &["phoenix"]),
];

pub const LIBRARIES: &[Term] = &[
  term("tensorflow", &["tensorflow"]),
  term("pytorch", &["pytorch", "torch"]),
  term("scikit-learn", &["scikit learn", "sklearn"]),
  term("numpy", &["numpy"]),
  term("pandas", &["pandas"]),
  term("keras", &["keras"]),
  term("matplotlib", &["matplotlib"]),
  term("opencv", &["opencv"]),
  term("langchain", &["langchain"]),
  term("jquery", &["jquery"]),
  term("lodash", &["lodash"]),
  term("redux", &["redux"]),
  term("rxjs", &["rxjs"]),
  term("three.js", &["three.js", "threejs"]),
  term("d3", &["d3.js", "d3"]),
  term("tailwind", &["tailwind css", "tailwindcss", "tailwind"]),
  term("bootstrap", &["bootstrap"]),
  term("tokio", &["tokio"]),
  term("serde", &["serde"]),
];

/// The vocabulary for a multi-valued category. Other categories have none.
pub fn terms_for(category: FilterCategory) -> &'static [Term] {
  match category {
    FilterCategory::Language => LANGUAGES,
    FilterCategory::Framework => FRAMEWORKS,
    FilterCategory::Library => LIBRARIES,
    _ => &[],
  }
}

/// Lowercases and folds `-`, `_` and whitespace runs to a single space.
fn fold(s: &str) -> String {
  s.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
    .filter(|part| !part.is_empty())
    .map(str::to_lowercase)
    .collect::<Vec<_>>()
    .join(" ")
}

fn lookup(terms: &[Term], folded: &str) -> Option<&'static str> {
  terms
    .iter()
    .find(|term| {
      fold(term.canonical) == folded || term.aliases.iter().any(|alias| fold(alias) == folded)
    })
    .map(|term| term.canonical)
}

/// Maps a user-supplied name onto its canonical spelling.
///
/// `Golang`, `golang` and `go1.21` all become `go`. Names that are not in
/// the vocabulary are lowercased and passed through, so `lang:gleam` still
/// yields a usable filter.
pub fn canonicalize(terms: &[Term], raw: &str) -> String {
  let folded = fold(raw);
  if let Some(canonical) = lookup(terms, &folded) {
    return canonical.to_string();
  }

  let unversioned = folded.trim_end_matches(|c: char| c.is_ascii_digit() || c == '.');
  if !unversioned.is_empty() && unversioned != folded {
    if let Some(canonical) = lookup(terms, unversioned) {
      return canonical.to_string();
    }
  }

  folded
}

/// Spellings suitable for fuzzy matching: purely alphabetic ones, paired
/// with their canonical name.
#[cfg(feature = "fuzzy")]
pub fn fuzzy_entries(terms: &[Term]) -> Vec<(&'static str, &'static str)> {
  terms
    .iter()
    .flat_map(|term| term.aliases.iter().map(move |alias| (*alias, term.canonical)))
    .filter(|(alias, _)| alias.chars().all(char::is_alphabetic))
    .collect()
}
