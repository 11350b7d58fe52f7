//! Aggregations over an already-loaded collection of posts. Pure
//! functions: no I/O, input is never mutated.

use serde::Serialize;

use crate::domain::post::Post;

/// Slice of a post returned by [`favorite_post`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub title: String,
    pub author: String,
    pub likes: i64,
}

/// An author with their post count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorPosts {
    pub author: String,
    pub count: usize,
}

/// An author with their summed likes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorLikes {
    pub author: String,
    pub likes: i64,
}

/// Sum of likes across all posts; 0 for empty input.
pub fn total_likes(posts: &[Post]) -> i64 {
    posts.iter().map(|post| post.likes).sum()
}

/// The post with the strictly highest like count above 0. Posts never
/// exceeding 0 likes yield `None`; ties keep the first post seen.
pub fn favorite_post(posts: &[Post]) -> Option<PostSummary> {
    let mut max = 0;
    let mut favorite = None;
    for post in posts {
        if post.likes > max {
            max = post.likes;
            favorite = Some(PostSummary {
                title: post.title.clone(),
                author: post.author.clone(),
                likes: post.likes,
            });
        }
    }
    favorite
}

/// The author with the most posts; `None` for empty input. On a tie the
/// author whose group appeared first in the input wins.
pub fn most_posts(posts: &[Post]) -> Option<AuthorPosts> {
    let counts = group_by_author(posts, |_| 1);
    first_max(counts).map(|(author, count)| AuthorPosts {
        author,
        count: count as usize,
    })
}

/// The author with the highest summed likes; `None` for empty input.
/// Same first-group-wins tie rule as [`most_posts`].
pub fn most_likes(posts: &[Post]) -> Option<AuthorLikes> {
    let totals = group_by_author(posts, |post| post.likes);
    first_max(totals).map(|(author, likes)| AuthorLikes { author, likes })
}

/// Keep the group that reaches the maximum first; later groups replace
/// it only on a strictly greater total.
fn first_max(groups: Vec<(String, i64)>) -> Option<(String, i64)> {
    let mut best: Option<(String, i64)> = None;
    for group in groups {
        let better = match &best {
            Some((_, max)) => group.1 > *max,
            None => true,
        };
        if better {
            best = Some(group);
        }
    }
    best
}

/// Group posts by author in first-seen order, summing `value` per group.
fn group_by_author<F>(posts: &[Post], value: F) -> Vec<(String, i64)>
where
    F: Fn(&Post) -> i64,
{
    let mut groups: Vec<(String, i64)> = Vec::new();
    for post in posts {
        match groups.iter_mut().find(|(author, _)| *author == post.author) {
            Some((_, total)) => *total += value(post),
            None => groups.push((post.author.clone(), value(post))),
        }
    }
    groups
}
