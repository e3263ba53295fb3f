use crate::{Error, SourceType, Time};

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum Query {
    Any(Vec<Query>),
    All(Vec<Query>),
    Not(Box<Query>),

    /// Case-insensitive substring of either the content or the author
    Phrase(String),

    /// Exact author name
    Author(String),

    Source {
        source_type: SourceType,
        id: i64,
    },

    /// Both bounds are inclusive
    DateBetween {
        start: Time,
        end: Time,
    },

    Reported(bool),
    Edited(bool),
}

impl Query {
    pub fn everything() -> Query {
        Query::All(Vec::new())
    }

    pub fn validate(&self) -> Result<(), Error> {
        match self {
            Query::Any(queries) | Query::All(queries) => {
                for q in queries {
                    q.validate()?;
                }
                Ok(())
            }
            Query::Not(q) => q.validate(),
            Query::Phrase(s) => crate::validate_string(s),
            Query::Author(s) => crate::validate_string(s),
            Query::Source { .. } => Ok(()),
            Query::DateBetween { .. } => Ok(()),
            Query::Reported(_) => Ok(()),
            Query::Edited(_) => Ok(()),
        }
    }

    pub fn from_search(search: &str) -> Result<Query, Error> {
        use pest::Parser;
        let pairs = search_parser::Parser::parse(search_parser::Rule::everything, search)
            .map_err(|_| Error::InvalidSearch(String::from(search)))?;
        for p in pairs {
            if p.as_rule() == search_parser::Rule::search {
                return search_parser::parse_search(search, p.into_inner());
            }
        }
        // only EOI: the search string was empty
        Ok(Query::everything())
    }
}

mod search_parser {
    use super::Query;
    use crate::{Error, SourceType};
    use pest::iterators::Pairs;
    use pest::pratt_parser::PrattParser;

    #[derive(pest_derive::Parser)]
    #[grammar = "search.pest"]
    pub struct Parser;

    lazy_static::lazy_static! {
        static ref SEARCH_PARSER: PrattParser<Rule> = {
            use pest::pratt_parser::{Assoc::*, Op};
            use Rule::*;
            PrattParser::new()
                .op(Op::infix(or, Left))
                .op(Op::infix(and, Left))
                .op(Op::prefix(not))
        };
    }

    // Unescape a quoted-string
    fn unescape(s: &str) -> String {
        let inner = s
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(s);
        let mut res = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    res.push(escaped);
                }
            } else {
                res.push(c);
            }
        }
        res
    }

    fn boolean(p: Option<pest::iterators::Pair<Rule>>) -> bool {
        matches!(p.map(|p| p.as_rule()), Some(Rule::yes))
    }

    pub fn parse_search(search: &str, pairs: Pairs<Rule>) -> Result<Query, Error> {
        let invalid = || Error::InvalidSearch(String::from(search));
        let res = SEARCH_PARSER
            .map_primary(|p| match p.as_rule() {
                Rule::search => parse_search(search, p.into_inner()),
                Rule::author => {
                    let name = p.into_inner().next().ok_or_else(invalid)?;
                    Ok(Query::Author(String::from(name.as_str())))
                }
                Rule::source => {
                    let mut inner = p.into_inner();
                    let source_type = match inner
                        .next()
                        .and_then(|t| t.into_inner().next())
                        .map(|t| t.as_rule())
                    {
                        Some(Rule::article) => SourceType::Article,
                        Some(Rule::reel) => SourceType::Reel,
                        _ => return Err(invalid()),
                    };
                    let id = inner
                        .next()
                        .and_then(|id| id.as_str().parse::<i64>().ok())
                        .ok_or_else(invalid)?;
                    Ok(Query::Source { source_type, id })
                }
                Rule::reported => Ok(Query::Reported(boolean(p.into_inner().next()))),
                Rule::edited => Ok(Query::Edited(boolean(p.into_inner().next()))),
                Rule::phrase => Ok(Query::Phrase(unescape(p.as_str()))),
                Rule::word => Ok(Query::Phrase(String::from(p.as_str()))),
                _ => Err(invalid()),
            })
            .map_infix(|lhs, op, rhs| {
                let (lhs, rhs) = (lhs?, rhs?);
                match op.as_rule() {
                    Rule::and => Ok(match lhs {
                        Query::All(mut v) => {
                            v.push(rhs);
                            Query::All(v)
                        }
                        _ => Query::All(vec![lhs, rhs]),
                    }),
                    Rule::or => Ok(match lhs {
                        Query::Any(mut v) => {
                            v.push(rhs);
                            Query::Any(v)
                        }
                        _ => Query::Any(vec![lhs, rhs]),
                    }),
                    _ => Err(invalid()),
                }
            })
            .map_prefix(|op, rhs| match op.as_rule() {
                Rule::not => Ok(Query::Not(Box::new(rhs?))),
                _ => Err(invalid()),
            })
            .parse(pairs);
        res
    }
}
