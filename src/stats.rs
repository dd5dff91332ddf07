//! Summary statistics over an in-memory blog collection.
//!
//! Pure functions, no I/O. They take whatever slice of blogs the caller
//! already loaded; persistence is not involved.

use crate::models::blog::Blog;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MostBlogs {
    pub author: String,
    pub blogs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MostLikes {
    pub author: String,
    pub likes: i64,
}

/// Sum of likes across all entries. Empty input sums to 0.
#[must_use]
pub fn total_likes(blogs: &[Blog]) -> i64 {
    blogs.iter().map(|b| b.likes).sum()
}

/// The entry with the most likes. Ties keep the first one encountered.
#[must_use]
pub fn favorite_blog(blogs: &[Blog]) -> Option<&Blog> {
    blogs.iter().fold(None, |best, current| match best {
        Some(b) if b.likes >= current.likes => Some(b),
        _ => Some(current),
    })
}

/// Author with the largest number of posts. Blogs without an author
/// group under the empty string. Ties keep the first maximum found.
#[must_use]
pub fn most_blogs(blogs: &[Blog]) -> Option<MostBlogs> {
    group_by_author(blogs)
        .into_iter()
        .fold(None, |best: Option<MostBlogs>, (author, group)| match best {
            Some(b) if b.blogs >= group.len() => Some(b),
            _ => Some(MostBlogs {
                author: author.to_string(),
                blogs: group.len(),
            }),
        })
}

/// Author with the largest summed like count. Same grouping and
/// tie-break rules as [`most_blogs`].
#[must_use]
pub fn most_likes(blogs: &[Blog]) -> Option<MostLikes> {
    group_by_author(blogs)
        .into_iter()
        .fold(None, |best: Option<MostLikes>, (author, group)| {
            let likes = group.iter().map(|b| b.likes).sum();
            match best {
                Some(b) if b.likes >= likes => Some(b),
                _ => Some(MostLikes {
                    author: author.to_string(),
                    likes,
                }),
            }
        })
}

/// Group blogs by author, preserving first-seen author order so the
/// tie-break rules above stay deterministic.
fn group_by_author(blogs: &[Blog]) -> Vec<(&str, Vec<&Blog>)> {
    let mut groups: Vec<(&str, Vec<&Blog>)> = Vec::new();

    for blog in blogs {
        let author = blog.author.as_deref().unwrap_or("");
        match groups.iter_mut().find(|(a, _)| *a == author) {
            Some((_, group)) => group.push(blog),
            None => groups.push((author, vec![blog])),
        }
    }

    groups
}
