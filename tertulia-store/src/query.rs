use crate::api::{Comment, Query};

pub trait QueryExt {
    fn matches(&self, comment: &Comment) -> bool;
}

impl QueryExt for Query {
    fn matches(&self, c: &Comment) -> bool {
        match self {
            Query::Any(queries) => queries.iter().any(|q| q.matches(c)),
            Query::All(queries) => queries.iter().all(|q| q.matches(c)),
            Query::Not(q) => !q.matches(c),
            Query::Phrase(p) => {
                let p = p.to_lowercase();
                c.content.to_lowercase().contains(&p) || c.author.to_lowercase().contains(&p)
            }
            Query::Author(a) => c.author == *a,
            Query::Source { source_type, id } => {
                c.source.source_type == *source_type && c.source.id == *id
            }
            Query::DateBetween { start, end } => *start <= c.date && c.date <= *end,
            Query::Reported(r) => c.reported == *r,
            Query::Edited(e) => c.edited == *e,
        }
    }
}
