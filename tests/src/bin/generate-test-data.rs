//! Prints a random action script on stdout, for `tertulia-ctl` to replay

use rand::{seq::SliceRandom, Rng};
use tertulia_api::{Action, CommentId, NewComment, Source, Uuid};

const NUM_USERS: usize = 6;
const NUM_SOURCES: i64 = 5;

const NUM_COMMENTS: usize = 200;
const REPLY_PROBABILITY: f64 = 0.6;
const COMMENT_WORD_COUNT: usize = 25;

const NUM_ACTIONS_PER_TYPE: usize = 80;
// Probability that an edit or delete comes from the comment's author, the
// rest are expected to be rejected by the store
const AUTHORED_PROBABILITY: f64 = 0.7;

#[derive(Clone, Copy)]
enum Kind {
    Like,
    Edit,
    Report,
    Delete,
}

fn gen_user(rng: &mut impl Rng, users: &[String]) -> String {
    users.choose(rng).cloned().unwrap_or_default()
}

fn gen_text(words: usize) -> String {
    lipsum::lipsum_words(words)
}

fn gen_source(rng: &mut impl Rng) -> Source {
    let id = rng.gen_range(1..=NUM_SOURCES);
    let title = lipsum::lipsum_title();
    match rng.gen_bool(0.5) {
        true => Source::article(id, title),
        false => Source::reel(id, title),
    }
}

fn gen_actions(mut rng: impl Rng) -> Vec<Action> {
    let mut users = Vec::new();
    for _ in 0..NUM_USERS {
        let word = gen_text(1).replace(|c: char| !c.is_alphanumeric(), "");
        users.push(format!("{word}{}", rng.gen_range(10..100)));
    }

    let mut actions = vec![Action::SetCurrentUser {
        user: users[0].clone(),
    }];

    // Comments first, as everything else refers to them
    let mut comments: Vec<(CommentId, String)> = Vec::new();
    for _ in 0..NUM_COMMENTS {
        let id = CommentId(Uuid::new_v4());
        let author = gen_user(&mut rng, &users);
        let parent_id = match rng.gen_bool(REPLY_PROBABILITY) {
            true => comments.choose(&mut rng).map(|(id, _)| *id),
            false => None,
        };
        actions.push(Action::AddComment {
            id: Some(id),
            comment: NewComment {
                author: author.clone(),
                content: gen_text(COMMENT_WORD_COUNT),
                source: gen_source(&mut rng),
            },
            parent_id,
        });
        comments.push((id, author));
    }

    for kind in [Kind::Like, Kind::Edit, Kind::Report, Kind::Delete] {
        for _ in 0..NUM_ACTIONS_PER_TYPE {
            let Some((id, author)) = comments.choose(&mut rng).cloned() else {
                break;
            };
            let user = match rng.gen_bool(AUTHORED_PROBABILITY) {
                true => author,
                false => gen_user(&mut rng, &users),
            };
            actions.push(match kind {
                Kind::Like => Action::LikeComment {
                    id,
                    user: gen_user(&mut rng, &users),
                },
                Kind::Edit => Action::EditComment {
                    id,
                    content: gen_text(COMMENT_WORD_COUNT),
                    user,
                },
                Kind::Report => Action::ReportComment {
                    id,
                    reason: gen_text(3),
                    user: gen_user(&mut rng, &users),
                },
                Kind::Delete => Action::DeleteComment { id, user },
            });
        }
    }

    // Leave the first user with all their notifications unread
    for u in users.iter().skip(1) {
        if rng.gen_bool(0.5) {
            actions.push(Action::MarkAllNotificationsAsRead { user: u.clone() });
        }
    }

    actions
}

fn main() {
    let actions = gen_actions(rand::thread_rng());
    match serde_json::to_string_pretty(&actions) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("failed serializing actions: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;

    use super::*;

    #[test]
    fn scripts_only_refer_to_earlier_comments() {
        let actions = gen_actions(rand::rngs::StdRng::seed_from_u64(42));
        let mut added = HashSet::new();
        for a in actions.iter() {
            assert_eq!(a.validate(), Ok(()), "invalid action {a:?}");
            let target = match a {
                Action::AddComment { id, parent_id, .. } => {
                    let id = id.expect("generated comments have pre-assigned ids");
                    if let Some(parent) = parent_id {
                        assert!(added.contains(parent), "reply before its parent");
                    }
                    assert!(added.insert(id), "id generated twice");
                    continue;
                }
                Action::LikeComment { id, .. }
                | Action::EditComment { id, .. }
                | Action::DeleteComment { id, .. }
                | Action::ReportComment { id, .. } => id,
                _ => continue,
            };
            assert!(added.contains(target), "action on unknown comment {a:?}");
        }
        assert_eq!(added.len(), NUM_COMMENTS);

        let json = serde_json::to_string(&actions).expect("serializing script");
        let parsed: Vec<Action> = serde_json::from_str(&json).expect("parsing script");
        assert_eq!(parsed, actions);
    }
}
