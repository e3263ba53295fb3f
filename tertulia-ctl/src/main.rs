use std::path::PathBuf;

use anyhow::Context;
use tertulia_store::{
    api::{Action, Order, SourceType},
    Store,
};

#[derive(structopt::StructOpt)]
struct Opt {
    /// JSON file holding the list of actions to replay
    #[structopt(env = "TERTULIA_SCRIPT", parse(from_os_str))]
    script: PathBuf,

    /// Log in as this user before replaying the script
    #[structopt(long)]
    as_user: Option<String>,

    /// Stop at the first action the store rejects
    #[structopt(long)]
    strict: bool,

    #[structopt(subcommand)]
    view: View,
}

#[derive(structopt::StructOpt)]
enum View {
    /// Top-level comments, newest first
    Comments,

    /// Top-level comments on one article or reel
    Source {
        /// article or reel
        source_type: SourceType,
        id: i64,
    },

    /// Comments matching a search, e.g. `author:Ana or "great article"`
    Search {
        query: String,

        /// tree, newest, oldest or most-liked
        #[structopt(long, default_value = "tree")]
        order: Order,
    },

    /// Comments written by a user
    User { name: String },

    Profile { name: String },

    Notifications {
        name: String,

        /// Only print the number of unread notifications
        #[structopt(long)]
        unread: bool,
    },

    /// The whole store
    Dump,
}

fn replay(store: &Store, actions: Vec<Action>, strict: bool) -> anyhow::Result<()> {
    let total = actions.len();
    let mut rejected = 0;
    for (i, a) in actions.into_iter().enumerate() {
        if let Err(err) = store.apply(a) {
            if strict {
                return Err(err).with_context(|| format!("applying action {i}"));
            }
            tracing::warn!(action = i, kind = ?err.kind(), %err, "store rejected action");
            rejected += 1;
        }
    }
    tracing::info!(total, rejected, "replayed script");
    Ok(())
}

fn print_json<T: serde::Serialize>(v: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(v).context("serializing output")?;
    println!("{out}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opt = <Opt as structopt::StructOpt>::from_args();

    let script = std::fs::read_to_string(&opt.script)
        .with_context(|| format!("reading script {:?}", opt.script))?;
    let actions: Vec<Action> = serde_json::from_str(&script)
        .with_context(|| format!("parsing script {:?}", opt.script))?;

    let store = Store::new();
    if let Some(user) = &opt.as_user {
        store
            .set_current_user(user)
            .with_context(|| format!("logging in as {user:?}"))?;
    }
    replay(&store, actions, opt.strict)?;

    match opt.view {
        View::Comments => print_json(&store.get_comments()),
        View::Source { source_type, id } => print_json(&store.get_comments_by_source(source_type, id)),
        View::Search { query, order } => {
            let res = store
                .search(&query, order)
                .with_context(|| format!("running search {query:?}"))?;
            print_json(&res)
        }
        View::User { name } => print_json(&store.filter_comments_by_user(&name)),
        View::Profile { name } => match store.get_user_profile(&name) {
            Some(p) => print_json(&p),
            None => anyhow::bail!("no profile for user {name:?}"),
        },
        View::Notifications { name, unread: true } => {
            println!("{}", store.get_unread_notification_count(&name));
            Ok(())
        }
        View::Notifications { name, unread: false } => print_json(&store.get_notifications(&name)),
        View::Dump => print_json(&store.dump()),
    }
}
