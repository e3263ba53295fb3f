use std::collections::HashSet;

use crate::{
    api::{CommentId, Error, NewComment, Source, SourceType, MAX_RECENT_ACTIVITY},
    Store,
};

const USERS: [&str; 4] = ["Ana", "Bob", "Carla", "Dani"];

fn user(i: u8) -> &'static str {
    USERS[usize::from(i) % USERS.len()]
}

#[derive(Clone, Debug, bolero::generator::TypeGenerator)]
enum Op {
    Add {
        author: u8,
        parent: Option<u8>,
        source_type: SourceType,
        source_id: u8,
        empty: bool,
    },
    Like {
        comment: u8,
        user: u8,
    },
    Edit {
        comment: u8,
        user: u8,
    },
    Delete {
        comment: u8,
        user: u8,
    },
    Report {
        comment: u8,
        user: u8,
    },
    MarkAllRead {
        user: u8,
    },
}

fn pick(ids: &[CommentId], i: u8) -> CommentId {
    match ids.len() {
        0 => CommentId::stub(),
        n => ids[usize::from(i) % n],
    }
}

fn run(store: &Store, ids: &mut Vec<CommentId>, op: Op) -> Result<(), Error> {
    match op {
        Op::Add {
            author,
            parent,
            source_type,
            source_id,
            empty,
        } => {
            let c = NewComment {
                author: String::from(user(author)),
                content: match empty {
                    true => String::new(),
                    false => format!("comment number {}", ids.len()),
                },
                source: Source {
                    source_type,
                    id: i64::from(source_id % 4),
                    title: String::from("title"),
                },
            };
            let parent = parent.map(|p| pick(ids, p));
            let c = store.add_comment(c, parent)?;
            ids.push(c.id);
            Ok(())
        }
        Op::Like { comment, user: u } => store.like_comment(pick(ids, comment), user(u)).map(|_| ()),
        Op::Edit { comment, user: u } => {
            store.edit_comment(pick(ids, comment), String::from("edited"), user(u))
        }
        Op::Delete { comment, user: u } => store.delete_comment(pick(ids, comment), user(u)),
        Op::Report { comment, user: u } => {
            store.report_comment(pick(ids, comment), String::from("spam"), user(u))
        }
        Op::MarkAllRead { user: u } => {
            store.mark_all_notifications_as_read(user(u));
            Ok(())
        }
    }
}

fn check_invariants(store: &Store, ids: &[CommentId]) {
    let dump = store.dump();
    let all = dump
        .comments
        .iter()
        .flat_map(|c| c.walk())
        .collect::<Vec<_>>();

    let distinct = all.iter().map(|c| c.id).collect::<HashSet<_>>();
    assert_eq!(distinct.len(), all.len(), "duplicate comment ids");
    assert_eq!(all.len(), ids.len());

    for c in all.iter() {
        assert_eq!(c.likes, c.liked_by.len() as u64);
        for child in c.children.iter() {
            assert_eq!(child.parent_id, Some(c.id));
        }
        if c.deleted {
            assert_eq!(c.content, store.config().deleted_placeholder);
        }
    }

    for n in dump.notifications.iter() {
        assert_ne!(n.from_user, n.to_user, "self-notification {n:?}");
    }

    let comments_count: u64 = dump.profiles.iter().map(|p| p.comments_count).sum();
    assert_eq!(comments_count, all.len() as u64);
    let likes_received: u64 = dump.profiles.iter().map(|p| p.likes_received).sum();
    let likes: u64 = all.iter().map(|c| c.likes).sum();
    assert_eq!(likes_received, likes);
    for p in dump.profiles.iter() {
        assert!(p.recent_activity.len() <= MAX_RECENT_ACTIVITY);
    }

    assert!(store.get_comments().iter().all(|c| !c.deleted));
    assert!(store.search_comments("").iter().all(|c| !c.deleted));
}

#[test]
fn random_operations_keep_invariants() {
    bolero::check!()
        .with_type::<Vec<Op>>()
        .cloned()
        .for_each(|ops| {
            let store = Store::new();
            let mut ids = Vec::new();
            for op in ops {
                let _ = run(&store, &mut ids, op);
                check_invariants(&store, &ids);
            }
        })
}

#[test]
fn concurrent_writers() {
    const THREADS: usize = 8;
    const READERS: usize = 4;
    const REPLIES: usize = 50;

    let store = Store::new();
    let root = store
        .add_comment(
            NewComment {
                author: String::from("Ana"),
                content: String::from("Hi"),
                source: Source::article(1, "T"),
            },
            None,
        )
        .expect("adding root comment");

    std::thread::scope(|s| {
        for t in 0..THREADS {
            let store = &store;
            let root = root.id;
            s.spawn(move || {
                let name = format!("user{t}");
                for i in 0..REPLIES {
                    store
                        .add_comment(
                            NewComment {
                                author: name.clone(),
                                content: format!("reply {i}"),
                                source: Source::article(1, "T"),
                            },
                            Some(root),
                        )
                        .expect("adding reply");
                    store.like_comment(root, &name).expect("liking root");
                    assert!(store.search_comments("reply").len() <= THREADS * REPLIES);
                }
            });
        }
        for _ in 0..READERS {
            let store = &store;
            let root = root.id;
            s.spawn(move || {
                let mut seen_replies = 0;
                for _ in 0..REPLIES {
                    let root = store.find_comment_by_id(root).expect("finding root");
                    assert_eq!(root.likes, root.liked_by.len() as u64);
                    assert!(root.likes <= THREADS as u64);
                    assert!(root.children.len() <= THREADS * REPLIES);
                    assert!(root.children.len() >= seen_replies, "replies went missing");
                    seen_replies = root.children.len();
                    let ana = store.get_user_profile("Ana").expect("Ana has a profile");
                    assert!(ana.likes_received <= THREADS as u64);
                }
            });
        }
    });

    let root = store.find_comment_by_id(root.id).expect("finding root");
    assert_eq!(root.children.len(), THREADS * REPLIES);
    assert_eq!(root.likes, THREADS as u64);
    assert_eq!(root.liked_by.len(), THREADS);
    let ana = store.get_user_profile("Ana").expect("Ana has a profile");
    assert_eq!(ana.likes_received, THREADS as u64);
    assert_eq!(
        store.get_unread_notification_count("Ana"),
        THREADS * REPLIES + THREADS
    );
    let ids = root.walk().map(|c| c.id).collect::<HashSet<_>>();
    assert_eq!(ids.len(), THREADS * REPLIES + 1);
}
