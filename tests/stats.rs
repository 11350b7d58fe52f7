//! Statistics helper tests: pure aggregations over in-memory posts.

use time::OffsetDateTime;
use uuid::Uuid;

use quill::app::stats::{favorite_post, most_likes, most_posts, total_likes};
use quill::domain::post::Post;

fn post(title: &str, author: &str, likes: i64) -> Post {
    Post {
        id: Uuid::new_v4(),
        title: title.to_string(),
        author: author.to_string(),
        url: format!("https://example.com/{}", title.replace(' ', "-")),
        likes,
        user_id: Uuid::new_v4(),
        owner_username: None,
        owner_name: None,
        created_at: OffsetDateTime::now_utc(),
    }
}

// ===========================================================================
// total_likes
// ===========================================================================

#[test]
fn total_likes_of_empty_list_is_zero() {
    assert_eq!(total_likes(&[]), 0);
}

#[test]
fn total_likes_of_single_post_is_its_likes() {
    let posts = vec![post("React patterns", "Michael Chan", 7)];
    assert_eq!(total_likes(&posts), 7);
}

#[test]
fn total_likes_sums_all_posts() {
    let posts = vec![
        post("React patterns", "Michael Chan", 7),
        post("Go To Statement Considered Harmful", "Edsger W. Dijkstra", 5),
        post("Canonical string reduction", "Edsger W. Dijkstra", 12),
    ];
    assert_eq!(total_likes(&posts), 24);
}

// ===========================================================================
// favorite_post
// ===========================================================================

#[test]
fn favorite_post_of_empty_list_is_none() {
    assert_eq!(favorite_post(&[]), None);
}

#[test]
fn favorite_post_picks_highest_likes() {
    let posts = vec![
        post("a", "A", 5),
        post("b", "B", 10),
        post("c", "C", 3),
    ];
    let favorite = favorite_post(&posts).unwrap();
    assert_eq!(favorite.title, "b");
    assert_eq!(favorite.author, "B");
    assert_eq!(favorite.likes, 10);
}

#[test]
fn favorite_post_tie_keeps_first() {
    let posts = vec![post("first", "A", 7), post("second", "B", 7)];
    let favorite = favorite_post(&posts).unwrap();
    assert_eq!(favorite.title, "first");
}

#[test]
fn favorite_post_ignores_posts_without_positive_likes() {
    let posts = vec![post("a", "A", 0), post("b", "B", 0)];
    assert_eq!(favorite_post(&posts), None);
}

// ===========================================================================
// most_posts
// ===========================================================================

#[test]
fn most_posts_of_empty_list_is_none() {
    assert_eq!(most_posts(&[]), None);
}

#[test]
fn most_posts_counts_per_author() {
    let posts = vec![post("a", "A", 1), post("b", "B", 2), post("c", "A", 3)];
    let top = most_posts(&posts).unwrap();
    assert_eq!(top.author, "A");
    assert_eq!(top.count, 2);
}

#[test]
fn most_posts_tie_keeps_first_seen_author() {
    let posts = vec![
        post("a", "A", 1),
        post("b", "B", 1),
        post("c", "A", 1),
        post("d", "B", 1),
    ];
    let top = most_posts(&posts).unwrap();
    assert_eq!(top.author, "A");
    assert_eq!(top.count, 2);
}

// ===========================================================================
// most_likes
// ===========================================================================

#[test]
fn most_likes_of_empty_list_is_none() {
    assert_eq!(most_likes(&[]), None);
}

#[test]
fn most_likes_sums_per_author() {
    let posts = vec![post("a", "A", 5), post("b", "B", 10), post("c", "A", 7)];
    let top = most_likes(&posts).unwrap();
    assert_eq!(top.author, "A");
    assert_eq!(top.likes, 12);
}

#[test]
fn most_likes_tie_keeps_first_seen_author() {
    let posts = vec![post("a", "A", 4), post("b", "B", 4)];
    let top = most_likes(&posts).unwrap();
    assert_eq!(top.author, "A");
    assert_eq!(top.likes, 4);
}
