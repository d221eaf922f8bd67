//! Content path globs.
//!
//! Supports `*` and `?` within a segment and `**` for any number of whole
//! segments. A leading `./` on either side is ignored.

/// Whether `path` matches the glob `pattern`.
pub fn glob_matches(pattern: &str, path: &str) -> bool {
    let pattern = segments(pattern);
    let path = segments(path);
    match_segments(&pattern, &path)
}

fn segments(s: &str) -> Vec<&str> {
    let s = s.trim_start_matches("./");
    s.split('/').filter(|seg| !seg.is_empty() && *seg != ".").collect()
}

fn match_segments(pattern: &[&str], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((&"**", rest)) => {
            (0..=path.len()).any(|skip| match_segments(rest, &path[skip..]))
        }
        Some((first, rest)) => match path.split_first() {
            Some((segment, path_rest)) => {
                segment_matches(first, segment) && match_segments(rest, path_rest)
            }
            None => false,
        },
    }
}

/// Single-segment wildcard match with backtracking on the last `*`.
fn segment_matches(pattern: &str, candidate: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let c: Vec<char> = candidate.chars().collect();
    let (mut pi, mut ci) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while ci < c.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == c[ci]) {
            pi += 1;
            ci += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some((pi, ci));
            pi += 1;
        } else if let Some((star_pi, star_ci)) = star {
            pi = star_pi + 1;
            ci = star_ci + 1;
            star = Some((star_pi, star_ci + 1));
        } else {
            return false;
        }
    }
    p[pi..].iter().all(|&ch| ch == '*')
}
