//! Path templates.
//!
//! Supported syntax:
//!
//! - `/users` - static segments, matched case-sensitively
//! - `/users/{id}` - a parameter, matching one non-empty segment
//! - `/files/{*path}` - a catch-all, final segment only, matching the rest of the path

use waypost_core::RouteParams;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
    CatchAll(String),
}

impl Segment {
    fn parse(raw: &str, is_last: bool) -> Self {
        let Some(name) = raw
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .filter(|name| !name.is_empty())
        else {
            return Segment::Static(raw.to_owned());
        };

        match name.strip_prefix('*') {
            Some(rest) if is_last && !rest.is_empty() => Segment::CatchAll(rest.to_owned()),
            // A catch-all anywhere but the end is taken literally.
            Some(_) => Segment::Static(raw.to_owned()),
            None => Segment::Param(name.to_owned()),
        }
    }

    /// Lower is more specific.
    fn rank(&self) -> u8 {
        match self {
            Segment::Static(_) => 0,
            Segment::Param(_) => 1,
            Segment::CatchAll(_) => 2,
        }
    }
}

/// Split a path into its `/`-separated segments, ignoring one leading slash.
fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.strip_prefix('/').unwrap_or(path).split('/')
}

/// A compiled path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    segments: Vec<Segment>,
    specificity: Vec<u8>,
}

impl Pattern {
    /// Compile a template. Parsing never fails; anything that is not a
    /// well-formed placeholder is a static segment.
    pub fn parse(template: &str) -> Self {
        let raw: Vec<&str> = segments(template).collect();
        let last = raw.len().saturating_sub(1);
        let segments: Vec<Segment> = raw
            .iter()
            .enumerate()
            .map(|(index, segment)| Segment::parse(segment, index == last))
            .collect();
        let specificity = segments.iter().map(Segment::rank).collect();
        Self {
            segments,
            specificity,
        }
    }

    /// Per-segment specificity, compared lexicographically (lower wins).
    ///
    /// Static segments beat parameters, parameters beat catch-alls.
    pub fn specificity(&self) -> &[u8] {
        &self.specificity
    }

    /// Match `path`, returning the bound parameters.
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let rest = path.strip_prefix('/').unwrap_or(path);
        let parts: Vec<&str> = rest.split('/').collect();
        let mut params = RouteParams::new();

        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Static(expected) => {
                    if parts.get(index) != Some(&expected.as_str()) {
                        return None;
                    }
                }
                Segment::Param(name) => match parts.get(index) {
                    Some(value) if !value.is_empty() => params.push(name.as_str(), *value),
                    _ => return None,
                },
                Segment::CatchAll(name) => {
                    if index >= parts.len() {
                        return None;
                    }
                    let remainder = parts[index..].join("/");
                    if remainder.is_empty() {
                        return None;
                    }
                    params.push(name.as_str(), remainder);
                    return Some(params);
                }
            }
        }

        (parts.len() == self.segments.len()).then_some(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_pattern() {
        let pattern = Pattern::parse("/hello");
        assert!(pattern.matches("/hello").is_some());
        assert!(pattern.matches("/Hello").is_none());
        assert!(pattern.matches("/hello/").is_none());
        assert!(pattern.matches("/hello/world").is_none());
    }

    #[test]
    fn root_pattern() {
        let pattern = Pattern::parse("/");
        assert!(pattern.matches("/").is_some());
        assert!(pattern.matches("/x").is_none());
    }

    #[test]
    fn param_binds_segment() {
        let pattern = Pattern::parse("/users/{id}/posts/{post}");
        let params = pattern.matches("/users/42/posts/7").unwrap();
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.get("post"), Some("7"));
    }

    #[test]
    fn param_rejects_empty_segment() {
        let pattern = Pattern::parse("/users/{id}");
        assert!(pattern.matches("/users/").is_none());
        assert!(pattern.matches("/users").is_none());
    }

    #[test]
    fn catch_all_takes_remainder() {
        let pattern = Pattern::parse("/static/{*path}");
        let params = pattern.matches("/static/css/site.css").unwrap();
        assert_eq!(params.get("path"), Some("css/site.css"));
        assert!(pattern.matches("/static").is_none());
        assert!(pattern.matches("/static/").is_none());
    }

    #[test]
    fn catch_all_in_the_middle_is_literal() {
        let pattern = Pattern::parse("/{*path}/edit");
        assert!(pattern.matches("/{*path}/edit").is_some());
        assert!(pattern.matches("/a/edit").is_none());
    }

    #[test]
    fn malformed_placeholder_is_literal() {
        let pattern = Pattern::parse("/users/{id");
        assert!(pattern.matches("/users/{id").is_some());
        assert!(pattern.matches("/users/42").is_none());
    }

    #[test]
    fn specificity_orders_static_param_catch_all() {
        let fixed = Pattern::parse("/users/new");
        let param = Pattern::parse("/users/{id}");
        let rest = Pattern::parse("/users/{*rest}");
        assert!(fixed.specificity() < param.specificity());
        assert!(param.specificity() < rest.specificity());
    }
}
