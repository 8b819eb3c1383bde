//! String casing helpers for namespace and command-name transformation.
//!
//! These are the building blocks behind the `camelize`/`titleize` dispatch
//! options: route-like strings (`/api/app_name/v1`) become qualifier-ready
//! constant paths (`Api::AppName::V1`), and individual segments can be
//! normalized independently of how the caller spelled them.
//!
//! The rules are locale-free ASCII: only ASCII letters participate in case
//! boundaries, and non-ASCII letters pass through untouched (`café` titlecases
//! to `Café`).

/// Characters treated as path separators when normalizing a route or
/// qualifier string. Runs of these collapse into a single `::` boundary.
const SEPARATORS: [char; 4] = ['/', '-', '.', ':'];

/// Removes every Unicode whitespace character from `s`, including embedded
/// whitespace.
///
/// # Example
///
/// ```rust
/// assert_eq!(summon::trim_all(" Api :: App\tName "), "Api::AppName");
/// ```
pub fn trim_all(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Splits a raw qualifier or route string into its non-empty segments.
///
/// Whitespace is removed first, then runs of `/`, `-`, `.` and `:` are
/// treated as boundaries. Empty segments (from leading separators, runs, or
/// trailing separators) are dropped.
pub(crate) fn split_segments(raw: &str) -> Vec<String> {
    trim_all(raw)
        .split(|c| SEPARATORS.contains(&c))
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Snake_cases a single segment: case-boundary humps become `_` splits,
/// `-` and spaces become `_`, and ASCII letters are lowercased.
///
/// `AppName` -> `app_name`, `APIKey` -> `api_key`, `aPi` -> `a_pi`.
fn underscore(segment: &str) -> String {
    let chars: Vec<char> = segment.chars().collect();
    let mut out = String::with_capacity(segment.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == ' ' {
            out.push('_');
            continue;
        }
        if c.is_uppercase() {
            let boundary = match i.checked_sub(1).map(|p| chars[p]) {
                None => false,
                Some(prev) => {
                    prev.is_lowercase()
                        || prev.is_ascii_digit()
                        // end of an acronym run: the next char starts a new word
                        || (prev.is_uppercase()
                            && chars.get(i + 1).is_some_and(|n| n.is_lowercase()))
                }
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

/// Upcases the first character of `part`, leaving the rest untouched.
fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// PascalCases a single segment by snake_casing it first, then capitalizing
/// each `_`-separated word.
///
/// `app_name` -> `AppName`, `appName` -> `AppName`, `V1` -> `V1`.
pub(crate) fn pascalize(segment: &str) -> String {
    underscore(segment)
        .split('_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect()
}

/// Transforms a route-like string into a `::`-separated constant path.
///
/// Whitespace is removed, runs of `/`, `-`, `.` and `:` become segment
/// boundaries, empty segments are dropped, and each remaining segment is
/// PascalCased. An empty or separator-only input yields an empty string.
///
/// # Example
///
/// ```rust
/// use summon::camelize;
///
/// assert_eq!(camelize("/api/app_name/v1"), "Api::AppName::V1");
/// assert_eq!(camelize("api::app::auth"), "Api::App::Auth");
/// assert_eq!(camelize("api-app_name.auth/v1"), "Api::AppName::Auth::V1");
/// ```
pub fn camelize(token: &str) -> String {
    let segments: Vec<String> = split_segments(token)
        .iter()
        .map(|segment| pascalize(segment))
        .filter(|segment| !segment.is_empty())
        .collect();
    segments.join("::")
}

/// Titlecases a single segment: snake_cases it, then capitalizes each word
/// and joins with spaces.
///
/// The spaces are deliberate (`app_name` -> `App Name`); qualifier assembly
/// strips all whitespace afterwards, so a titleized namespace segment ends up
/// as `AppName`.
pub fn titleize(segment: &str) -> String {
    underscore(segment)
        .split('_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_all_removes_all_whitespace() {
        assert_eq!(trim_all(" a b\tc\nd "), "abcd");
        assert_eq!(trim_all("no_whitespace"), "no_whitespace");
        assert_eq!(trim_all("\u{00a0}nbsp\u{2003}"), "nbsp");
        assert_eq!(trim_all(""), "");
    }

    #[test]
    fn test_camelize_routes() {
        assert_eq!(camelize("/api/app/auth/v1"), "Api::App::Auth::V1");
        assert_eq!(camelize("/api/app_name/auth/v1"), "Api::AppName::Auth::V1");
        assert_eq!(camelize("/API/appName/AUTH/v1"), "Api::AppName::Auth::V1");
        assert_eq!(camelize("api/app/auth/v1"), "Api::App::Auth::V1");
        assert_eq!(camelize("/api/app/auth/v1/"), "Api::App::Auth::V1");
    }

    #[test]
    fn test_camelize_module_strings() {
        assert_eq!(camelize("api::app::auth::v1"), "Api::App::Auth::V1");
        assert_eq!(camelize("Api::App::Auth::V1"), "Api::App::Auth::V1");
        assert_eq!(camelize("api/app::auth/v1"), "Api::App::Auth::V1");
    }

    #[test]
    fn test_camelize_single_words() {
        assert_eq!(camelize("api"), "Api");
        assert_eq!(camelize("API"), "Api");
        assert_eq!(camelize("aPi"), "APi");
        assert_eq!(camelize("app_name"), "AppName");
        assert_eq!(camelize("AppName"), "AppName");
        assert_eq!(camelize("a"), "A");
    }

    #[test]
    fn test_camelize_empty_and_separator_only() {
        assert_eq!(camelize(""), "");
        assert_eq!(camelize("/"), "");
        assert_eq!(camelize("///"), "");
        assert_eq!(camelize("___"), "");
        assert_eq!(camelize("::"), "");
    }

    #[test]
    fn test_camelize_whitespace_is_removed_before_splitting() {
        // embedded spaces are not separators; they vanish entirely
        assert_eq!(camelize("api app auth"), "Apiappauth");
        assert_eq!(camelize(" /api / app_name :: auth / v1 "), "Api::AppName::Auth::V1");
    }

    #[test]
    fn test_camelize_leading_colons() {
        assert_eq!(camelize("::api::app"), "Api::App");
    }

    #[test]
    fn test_camelize_alternate_separators() {
        assert_eq!(camelize("api-app-auth"), "Api::App::Auth");
        assert_eq!(camelize("api.app.auth"), "Api::App::Auth");
        assert_eq!(camelize("api-app_name.auth/v1"), "Api::AppName::Auth::V1");
    }

    #[test]
    fn test_camelize_numeric_components() {
        assert_eq!(camelize("/api/v1/auth"), "Api::V1::Auth");
        assert_eq!(camelize("Carz4Rent"), "Carz4Rent");
    }

    #[test]
    fn test_camelize_long_nested_path() {
        assert_eq!(
            camelize("/api/services/auth/providers/oauth/google/v2/endpoints"),
            "Api::Services::Auth::Providers::Oauth::Google::V2::Endpoints"
        );
    }

    #[test]
    fn test_camelize_non_ascii_passthrough() {
        assert_eq!(camelize("api/café/naïve"), "Api::Café::Naïve");
        assert_eq!(camelize("api_café_naïve"), "ApiCaféNaïve");
    }

    #[test]
    fn test_pascalize_boundaries() {
        assert_eq!(pascalize("app_name"), "AppName");
        assert_eq!(pascalize("appName"), "AppName");
        assert_eq!(pascalize("APIKey"), "ApiKey");
        assert_eq!(pascalize("v1"), "V1");
        assert_eq!(pascalize(""), "");
    }

    #[test]
    fn test_titleize_words() {
        assert_eq!(titleize("app_name"), "App Name");
        assert_eq!(titleize("appName"), "App Name");
        assert_eq!(titleize("api"), "Api");
        assert_eq!(titleize("V1"), "V1");
        assert_eq!(titleize(""), "");
    }

    #[test]
    fn test_split_segments() {
        assert_eq!(split_segments("a::b/c"), vec!["a", "b", "c"]);
        assert_eq!(split_segments("::a::"), vec!["a"]);
        assert_eq!(split_segments(" "), Vec::<String>::new());
    }
}
